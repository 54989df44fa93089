#[cfg(test)]
#[path = "ollama_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::models::GenerationSettings;
use crate::domain::models::InferenceClient;
use crate::domain::models::InferenceError;
use crate::domain::models::ModelDescriptor;
use crate::domain::models::PromptPart;
use crate::domain::models::PromptRequest;

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
struct ChatOptions {
    temperature: f32,
    num_predict: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<PromptPart>,
    stream: bool,
    options: ChatOptions,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ChatResponseMessage {
    role: String,
    content: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ChatResponse {
    message: ChatResponseMessage,
    done: bool,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Model {
    name: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ModelListResponse {
    pub models: Vec<Model>,
}

pub struct Ollama {
    url: String,
    health_check_timeout: Duration,
    client: reqwest::Client,
}

impl Ollama {
    pub fn new(
        url: &str,
        health_check_timeout: Duration,
        request_timeout: Duration,
    ) -> Result<Ollama> {
        reqwest::Url::parse(url)?;

        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()?;

        return Ok(Ollama {
            url: url.trim_end_matches('/').to_string(),
            health_check_timeout,
            client,
        });
    }
}

#[async_trait]
impl InferenceClient for Ollama {
    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        let res = match self
            .client
            .get(&self.url)
            .timeout(self.health_check_timeout)
            .send()
            .await
        {
            Ok(res) => res,
            Err(err) => {
                tracing::error!(error = ?err, "Ollama is not running");
                bail!("Ollama is not running");
            }
        };

        if res.status() != 200 {
            tracing::error!(status = res.status().as_u16(), "Ollama health check failed");
            bail!("Ollama health check failed");
        }

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn list_models(&self) -> Result<Vec<String>> {
        let res = self
            .client
            .get(format!("{url}/api/tags", url = self.url))
            .timeout(self.health_check_timeout)
            .send()
            .await?
            .json::<ModelListResponse>()
            .await?;

        let mut models: Vec<String> = res
            .models
            .iter()
            .map(|model| {
                return model.name.to_string();
            })
            .collect();

        models.sort();

        return Ok(models);
    }

    #[allow(clippy::implicit_return)]
    async fn generate(
        &self,
        model_id: &str,
        request: &PromptRequest,
        settings: &GenerationSettings,
    ) -> Result<String, InferenceError> {
        if !ModelDescriptor::is_known(model_id) {
            tracing::error!(model = model_id, "Model is not configured");
            return Err(InferenceError::ModelUnavailable);
        }

        let req = ChatRequest {
            model: model_id.to_string(),
            messages: request.parts().to_vec(),
            stream: false,
            options: ChatOptions {
                temperature: settings.temperature,
                num_predict: settings.max_tokens,
            },
        };
        tracing::debug!(
            model = model_id,
            temperature = settings.temperature,
            max_tokens = settings.max_tokens,
            "Completion request"
        );

        let res = self
            .client
            .post(format!("{url}/api/chat", url = self.url))
            .json(&req)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            let body = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| return e.error)
                .unwrap_or(body);

            tracing::error!(
                status = status.as_u16(),
                body = %body,
                "Failed to make completion request to Ollama"
            );
            return Err(InferenceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let ores = res.json::<ChatResponse>().await?;
        tracing::debug!(body = ?ores, "Completion response");

        return Ok(ores.message.content);
    }
}
