use serde_json::Value;
use tracing::error;

use crate::interview::prompts::build_question_prompt;
use crate::llm_client::{JsonModel, LlmError};

pub const FALLBACK_QUESTION: &str = "Could not generate questions. Please try again.";

/// Asks the model for interview questions. Never fails: any model or parse
/// error degrades to a single fallback question.
pub async fn generate_questions(
    model: &dyn JsonModel,
    resume_text: &str,
    job_description: &str,
) -> Vec<String> {
    match try_generate_questions(model, resume_text, job_description).await {
        Ok(questions) => questions,
        Err(e) => {
            error!("Error generating questions: {e}");
            vec![FALLBACK_QUESTION.to_string()]
        }
    }
}

pub async fn try_generate_questions(
    model: &dyn JsonModel,
    resume_text: &str,
    job_description: &str,
) -> Result<Vec<String>, LlmError> {
    let prompt = build_question_prompt(resume_text, job_description);
    let value = model.generate_json(&prompt).await?;
    questions_from_value(value)
}

/// Accepts `["q1", ...]` or `{"questions": ["q1", ...]}`. The count is not checked.
fn questions_from_value(value: Value) -> Result<Vec<String>, LlmError> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("questions") {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(LlmError::UnexpectedShape(
                    "object without a questions array".to_string(),
                ))
            }
        },
        other => {
            return Err(LlmError::UnexpectedShape(format!(
                "expected a list of questions, got {other}"
            )))
        }
    };

    Ok(items.into_iter().map(value_to_text).collect())
}

/// Strings verbatim, anything else as its JSON text.
pub(crate) fn value_to_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}
