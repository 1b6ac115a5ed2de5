// LLM prompt templates for the interview module.
// Placeholders are replaced verbatim; inputs are not truncated or escaped.

/// Question generation prompt. Replace `{resume_text}` and `{job_description}`.
pub const QUESTION_PROMPT_TEMPLATE: &str = r#"You are a technical interviewer.
Resume Context: {resume_text}
Job Description: {job_description}

Task: Generate 5 specific technical interview questions based on the candidate's resume and job description.

Output Schema:
Return a list of strings.
Example: ["Question 1", "Question 2", "Question 3"]"#;

/// Answer analysis prompt. Replace `{question}` and `{user_answer}`.
pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"You are an interviewer evaluating a candidate.
Question: {question}
Candidate's Answer: {user_answer}

Task: Rate the confidence/quality (1-10) and identify missing technical keywords.

IMPORTANT: You MUST return a JSON object with EXACTLY these keys: "score", "feedback", "keywords_missed".

Output Schema (JSON):
{
    "feedback": "A constructive 1-2 sentence feedback string.",
    "score": 5,
    "keywords_missed": ["keyword1", "keyword2"]
}"#;

pub fn build_question_prompt(resume_text: &str, job_description: &str) -> String {
    fill(
        QUESTION_PROMPT_TEMPLATE,
        &[
            ("{resume_text}", resume_text),
            ("{job_description}", job_description),
        ],
    )
}

pub fn build_analysis_prompt(question: &str, user_answer: &str) -> String {
    fill(
        ANALYSIS_PROMPT_TEMPLATE,
        &[("{question}", question), ("{user_answer}", user_answer)],
    )
}

/// Single-pass placeholder substitution, so a placeholder appearing inside
/// caller-supplied text is never expanded a second time.
fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some((pos, key, value)) = values
        .iter()
        .filter_map(|(key, value)| rest.find(key).map(|pos| (pos, *key, *value)))
        .min_by_key(|(pos, _, _)| *pos)
    {
        out.push_str(&rest[..pos]);
        out.push_str(value);
        rest = &rest[pos + key.len()..];
    }
    out.push_str(rest);
    out
}
