//! Axum route handlers for the interview API.

use anyhow::Context;
use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::interview::analysis::{analyze_answer, AnswerAnalysis};
use crate::interview::questions::{generate_questions, value_to_text};
use crate::pdf::extract_text_or_empty;
use crate::state::AppState;

const NO_FILE_PART: &str = "No file part";
const NO_SELECTED_FILE: &str = "No selected file";
const MISSING_ANSWER_FIELDS: &str = "Missing question or user_answer";

#[derive(Debug, Serialize)]
pub struct QuestionsResponse {
    pub questions: Vec<String>,
}

/// The uploaded resume as read off the multipart stream.
struct ResumeUpload {
    file_name: String,
    data: Bytes,
}

/// POST /upload-resume
///
/// Multipart form with a `file` part (the resume PDF) and an optional
/// `job_description` text part.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<QuestionsResponse>, AppError> {
    debug!("/upload-resume called");

    // A body that is not multipart has no file part at all.
    let mut multipart = multipart.map_err(|_| AppError::Validation(NO_FILE_PART.to_string()))?;

    let mut upload: Option<ResumeUpload> = None;
    let mut job_description = String::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .context("Failed to read multipart body")?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") if upload.is_none() => {
                // A `file` part without a filename is a plain form value, not a file.
                let Some(file_name) = field.file_name().map(str::to_string) else {
                    continue;
                };
                let data = field
                    .bytes()
                    .await
                    .context("Failed to read uploaded file")?;
                upload = Some(ResumeUpload { file_name, data });
            }
            Some("job_description") => {
                let raw = field
                    .bytes()
                    .await
                    .context("Failed to read job_description")?;
                job_description = String::from_utf8_lossy(&raw).into_owned();
            }
            _ => {}
        }
    }

    let upload = upload.ok_or_else(|| AppError::Validation(NO_FILE_PART.to_string()))?;
    if upload.file_name.is_empty() {
        return Err(AppError::Validation(NO_SELECTED_FILE.to_string()));
    }

    let resume_text = extract_text_or_empty(upload.data).await;
    info!(
        "Resume text extracted from '{}' (len: {})",
        upload.file_name,
        resume_text.len()
    );

    let questions = generate_questions(state.model.as_ref(), &resume_text, &job_description).await;
    info!("Questions generated: {}", questions.len());
    debug!("Questions: {questions:?}");

    Ok(Json(QuestionsResponse { questions }))
}

/// POST /analyze-answer
///
/// JSON body `{"question": ..., "user_answer": ...}`. The body is parsed as JSON
/// whatever its content type.
pub async fn handle_analyze_answer(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<AnswerAnalysis>, AppError> {
    debug!("/analyze-answer called");

    let (question, user_answer) = parse_answer_request(&body).ok_or_else(|| {
        tracing::warn!("Missing question or user_answer");
        AppError::Validation(MISSING_ANSWER_FIELDS.to_string())
    })?;

    let analysis = analyze_answer(state.model.as_ref(), &question, &user_answer).await;
    debug!("Analysis result: {analysis:?}");

    Ok(Json(analysis))
}

/// Both keys must be present; non-string values are used as their JSON text.
fn parse_answer_request(body: &[u8]) -> Option<(String, String)> {
    let Value::Object(mut map) = serde_json::from_slice::<Value>(body).ok()? else {
        return None;
    };
    let question = map.remove("question")?;
    let user_answer = map.remove("user_answer")?;
    Some((value_to_text(question), value_to_text(user_answer)))
}
