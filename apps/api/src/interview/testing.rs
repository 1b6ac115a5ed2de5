//! Stub `JsonModel` shared by the interview and router tests.

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::llm_client::{JsonModel, LlmError};

pub struct StubModel {
    reply: Option<Value>,
    last_prompt: Mutex<Option<String>>,
}

impl StubModel {
    pub fn ok(reply: Value) -> Self {
        Self {
            reply: Some(reply),
            last_prompt: Mutex::new(None),
        }
    }

    /// A model whose every call fails like a provider outage.
    pub fn failing() -> Self {
        Self {
            reply: None,
            last_prompt: Mutex::new(None),
        }
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().unwrap().clone()
    }
}

#[async_trait]
impl JsonModel for StubModel {
    async fn generate_json(&self, prompt: &str) -> Result<Value, LlmError> {
        *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
        self.reply.clone().ok_or(LlmError::Api {
            status: 503,
            message: "model unavailable".to_string(),
        })
    }
}
