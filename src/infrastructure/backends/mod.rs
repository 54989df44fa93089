pub mod ollama;
#[cfg(test)]
pub mod scripted;

use std::time::Duration;

use anyhow::bail;
use anyhow::Result;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::InferenceClient;

pub type BackendBox = Box<dyn InferenceClient + Send + Sync>;

pub struct BackendManager {}

impl BackendManager {
    pub fn get() -> Result<BackendBox> {
        let url = Config::get(ConfigKey::OllamaURL);
        if url.is_empty() {
            bail!("Ollama URL is not defined");
        }

        let health_check_timeout =
            Duration::from_millis(Config::get(ConfigKey::BackendHealthCheckTimeout).parse::<u64>()?);
        let request_timeout =
            Duration::from_millis(Config::get(ConfigKey::RequestTimeout).parse::<u64>()?);

        let backend = ollama::Ollama::new(&url, health_check_timeout, request_timeout)?;
        return Ok(Box::new(backend));
    }
}
