use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::models::GenerationSettings;
use crate::domain::models::InferenceClient;
use crate::domain::models::InferenceError;
use crate::domain::models::PromptRequest;

#[derive(Clone, Debug)]
pub struct RecordedCall {
    pub model_id: String,
    pub request: PromptRequest,
    pub settings: GenerationSettings,
}

pub type RecordedCalls = Arc<Mutex<Vec<RecordedCall>>>;

/// Replays queued replies in order and records every request it receives.
pub struct ScriptedBackend {
    replies: Mutex<VecDeque<Result<String, InferenceError>>>,
    calls: RecordedCalls,
}

impl ScriptedBackend {
    pub fn new(replies: Vec<Result<String, InferenceError>>) -> (ScriptedBackend, RecordedCalls) {
        let calls: RecordedCalls = Arc::new(Mutex::new(vec![]));
        let backend = ScriptedBackend {
            replies: Mutex::new(replies.into_iter().collect()),
            calls: calls.clone(),
        };

        return (backend, calls);
    }
}

#[async_trait]
impl InferenceClient for ScriptedBackend {
    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn list_models(&self) -> Result<Vec<String>> {
        return Ok(vec!["llama3".to_string()]);
    }

    #[allow(clippy::implicit_return)]
    async fn generate(
        &self,
        model_id: &str,
        request: &PromptRequest,
        settings: &GenerationSettings,
    ) -> Result<String, InferenceError> {
        self.calls.lock().unwrap().push(RecordedCall {
            model_id: model_id.to_string(),
            request: request.clone(),
            settings: *settings,
        });

        return self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                return Err(InferenceError::Unreachable(
                    "no scripted reply".to_string(),
                ));
            });
    }
}
