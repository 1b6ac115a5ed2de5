use serde::Serialize;
use serde_json::{Map, Value};
use tracing::error;

use crate::interview::prompts::build_analysis_prompt;
use crate::interview::questions::value_to_text;
use crate::llm_client::{JsonModel, LlmError};

/// Feedback used when the model omitted the `feedback` key.
pub const MISSING_FEEDBACK: &str = "Could not analyze answer.";
/// Feedback used when the model call or its parsing failed outright.
pub const FAILED_FEEDBACK: &str = "Error analyzing response. Please try again.";

/// Scored critique of a single answer. All three fields are always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerAnalysis {
    /// Nominally 1–10; not range-checked.
    pub score: i64,
    pub feedback: String,
    pub keywords_missed: Vec<String>,
}

impl AnswerAnalysis {
    pub fn fallback() -> Self {
        Self {
            score: 0,
            feedback: FAILED_FEEDBACK.to_string(),
            keywords_missed: Vec::new(),
        }
    }
}

/// Asks the model to score an answer. Never fails: any model or parse error
/// degrades to `AnswerAnalysis::fallback()`.
pub async fn analyze_answer(
    model: &dyn JsonModel,
    question: &str,
    user_answer: &str,
) -> AnswerAnalysis {
    match try_analyze_answer(model, question, user_answer).await {
        Ok(analysis) => analysis,
        Err(e) => {
            error!("Error analyzing answer: {e}");
            AnswerAnalysis::fallback()
        }
    }
}

pub async fn try_analyze_answer(
    model: &dyn JsonModel,
    question: &str,
    user_answer: &str,
) -> Result<AnswerAnalysis, LlmError> {
    let prompt = build_analysis_prompt(question, user_answer);
    let value = model.generate_json(&prompt).await?;
    normalize_analysis(value)
}

/// Fills defaults for missing keys and coerces `score` to an integer.
/// Only a non-object reply is an error.
pub fn normalize_analysis(value: Value) -> Result<AnswerAnalysis, LlmError> {
    let mut map = match value {
        Value::Object(map) => map,
        other => {
            return Err(LlmError::UnexpectedShape(format!(
                "expected an analysis object, got {other}"
            )))
        }
    };

    Ok(AnswerAnalysis {
        score: take(&mut map, "score").map(coerce_score).unwrap_or(0),
        feedback: take(&mut map, "feedback")
            .map(value_to_text)
            .unwrap_or_else(|| MISSING_FEEDBACK.to_string()),
        keywords_missed: match take(&mut map, "keywords_missed") {
            Some(Value::Array(items)) => items.into_iter().map(value_to_text).collect(),
            _ => Vec::new(),
        },
    })
}

/// Removes a key, treating an explicit `null` as missing.
fn take(map: &mut Map<String, Value>, key: &str) -> Option<Value> {
    map.remove(key).filter(|v| !v.is_null())
}

fn coerce_score(value: Value) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
            .unwrap_or(0),
        Value::String(s) => s.trim().parse::<i64>().unwrap_or(0),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interview::testing::StubModel;
    use serde_json::json;

    #[test]
    fn test_complete_reply_passes_through() {
        let analysis = normalize_analysis(json!({
            "score": 8,
            "feedback": "Solid answer, mention borrowing.",
            "keywords_missed": ["borrow checker"]
        }))
        .unwrap();
        assert_eq!(
            analysis,
            AnswerAnalysis {
                score: 8,
                feedback: "Solid answer, mention borrowing.".to_string(),
                keywords_missed: vec!["borrow checker".to_string()],
            }
        );
    }

    #[test]
    fn test_missing_score_defaults_to_zero() {
        let analysis = normalize_analysis(json!({"feedback": "ok", "keywords_missed": []})).unwrap();
        assert_eq!(analysis.score, 0);
    }

    #[test]
    fn test_missing_feedback_uses_default() {
        let analysis = normalize_analysis(json!({"score": 3, "keywords_missed": []})).unwrap();
        assert_eq!(analysis.feedback, MISSING_FEEDBACK);
    }

    #[test]
    fn test_missing_keywords_default_to_empty() {
        let analysis = normalize_analysis(json!({"score": 3, "feedback": "ok"})).unwrap();
        assert!(analysis.keywords_missed.is_empty());
    }

    #[test]
    fn test_empty_object_gets_every_default() {
        let analysis = normalize_analysis(json!({})).unwrap();
        assert_eq!(analysis.score, 0);
        assert_eq!(analysis.feedback, MISSING_FEEDBACK);
        assert!(analysis.keywords_missed.is_empty());
    }

    #[test]
    fn test_numeric_string_score_is_coerced() {
        let analysis = normalize_analysis(json!({"score": "7"})).unwrap();
        assert_eq!(analysis.score, 7);
    }

    #[test]
    fn test_non_numeric_string_score_becomes_zero() {
        let analysis = normalize_analysis(json!({"score": "abc"})).unwrap();
        assert_eq!(analysis.score, 0);
    }

    #[test]
    fn test_fractional_score_is_truncated() {
        assert_eq!(normalize_analysis(json!({"score": 7.9})).unwrap().score, 7);
        assert_eq!(normalize_analysis(json!({"score": "7.5"})).unwrap().score, 0);
    }

    #[test]
    fn test_score_is_not_range_checked() {
        assert_eq!(normalize_analysis(json!({"score": 42})).unwrap().score, 42);
    }

    #[test]
    fn test_keywords_keep_order_and_duplicates() {
        let analysis =
            normalize_analysis(json!({"keywords_missed": ["Arc", "Mutex", "Arc", 3]})).unwrap();
        assert_eq!(analysis.keywords_missed, vec!["Arc", "Mutex", "Arc", "3"]);
    }

    #[test]
    fn test_non_object_reply_is_an_error() {
        assert!(matches!(
            normalize_analysis(json!(["score", 5])),
            Err(LlmError::UnexpectedShape(_))
        ));
    }

    #[test]
    fn test_serializes_exactly_three_keys() {
        let value = serde_json::to_value(AnswerAnalysis::fallback()).unwrap();
        assert_eq!(
            value,
            json!({
                "score": 0,
                "feedback": FAILED_FEEDBACK,
                "keywords_missed": []
            })
        );
    }

    #[tokio::test]
    async fn test_analyze_answer_degrades_on_model_error() {
        let model = StubModel::failing();
        assert_eq!(
            analyze_answer(&model, "q", "a").await,
            AnswerAnalysis::fallback()
        );
    }

    #[tokio::test]
    async fn test_analyze_answer_normalizes_model_reply() {
        let model = StubModel::ok(json!({"score": "6", "feedback": "Decent."}));
        let analysis = analyze_answer(&model, "What is Send?", "Thread-safe transfer").await;
        assert_eq!(analysis.score, 6);
        assert_eq!(analysis.feedback, "Decent.");
        assert!(analysis.keywords_missed.is_empty());

        let prompt = model.last_prompt().unwrap();
        assert!(prompt.contains("Question: What is Send?"));
        assert!(prompt.contains("Candidate's Answer: Thread-safe transfer"));
    }
}
