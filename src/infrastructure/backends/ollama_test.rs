use std::time::Duration;

use anyhow::Result;
use mockito::Matcher;
use test_utils::ollama_chat_response;
use test_utils::ollama_error_response;
use test_utils::ollama_tags_response;

use super::Ollama;
use crate::domain::models::GenerationSettings;
use crate::domain::models::InferenceClient;
use crate::domain::models::InferenceError;
use crate::domain::models::Persona;
use crate::domain::models::PromptBuilder;

impl Ollama {
    fn with_url(url: String) -> Ollama {
        return Ollama::new(&url, Duration::from_millis(200), Duration::from_secs(2)).unwrap();
    }
}

#[tokio::test]
async fn it_successfully_health_checks() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/")
        .with_status(200)
        .create_async()
        .await;

    let backend = Ollama::with_url(server.url());
    let res = backend.health_check().await;

    assert!(res.is_ok());
    mock.assert_async().await;
}

#[tokio::test]
async fn it_fails_health_checks() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/")
        .with_status(500)
        .create_async()
        .await;

    let backend = Ollama::with_url(server.url());
    let res = backend.health_check().await;

    assert!(res.is_err());
    mock.assert_async().await;
}

#[tokio::test]
async fn it_lists_models() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/tags")
        .with_status(200)
        .with_body(ollama_tags_response(&["mistral", "llama3"]))
        .create_async()
        .await;

    let backend = Ollama::with_url(server.url());
    let res = backend.list_models().await?;

    assert_eq!(res, vec!["llama3".to_string(), "mistral".to_string()]);
    mock.assert_async().await;

    return Ok(());
}

#[tokio::test]
async fn it_generates_completions() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/chat")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "model": "llama3",
            "stream": false,
            "options": {
                "num_predict": 150
            },
            "messages": [
                {
                    "role": "system",
                    "content": "You are an educational assistant. Explain concepts clearly with examples."
                },
                {
                    "role": "user",
                    "content": "What is gravity?"
                }
            ]
        })))
        .with_status(200)
        .with_body(ollama_chat_response("Gravity is a force..."))
        .create_async()
        .await;

    let persona = Persona::find("Teacher").unwrap();
    let request = PromptBuilder::build(&persona, "What is gravity?");
    let backend = Ollama::with_url(server.url());
    let res = backend
        .generate("llama3", &request, &GenerationSettings::default())
        .await?;

    assert_eq!(res, "Gravity is a force...");
    mock.assert_async().await;

    return Ok(());
}

#[tokio::test]
async fn it_does_not_call_unknown_models() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/chat")
        .expect(0)
        .create_async()
        .await;

    let request = PromptBuilder::build(&Persona::default(), "Hello");
    let backend = Ollama::with_url(server.url());
    let res = backend
        .generate("gpt-4", &request, &GenerationSettings::default())
        .await;

    assert_eq!(res, Err(InferenceError::ModelUnavailable));
    mock.assert_async().await;
}

#[tokio::test]
async fn it_returns_status_errors() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/chat")
        .with_status(404)
        .with_body(ollama_error_response("model \"mistral\" not found, try pulling it first"))
        .create_async()
        .await;

    let request = PromptBuilder::build(&Persona::default(), "Hello");
    let backend = Ollama::with_url(server.url());
    let err = backend
        .generate("mistral", &request, &GenerationSettings::default())
        .await
        .unwrap_err();

    assert_eq!(
        err,
        InferenceError::Status {
            status: 404,
            body: "model \"mistral\" not found, try pulling it first".to_string(),
        }
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn it_returns_decode_errors() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/chat")
        .with_status(200)
        .with_body("not json")
        .create_async()
        .await;

    let request = PromptBuilder::build(&Persona::default(), "Hello");
    let backend = Ollama::with_url(server.url());
    let err = backend
        .generate("llama3", &request, &GenerationSettings::default())
        .await
        .unwrap_err();

    assert!(matches!(err, InferenceError::Decode(_)));
    mock.assert_async().await;
}

#[tokio::test]
async fn it_returns_unreachable_errors() {
    let request = PromptBuilder::build(&Persona::default(), "Hello");
    let backend = Ollama::with_url("http://127.0.0.1:9".to_string());
    let err = backend
        .generate("llama3", &request, &GenerationSettings::default())
        .await
        .unwrap_err();

    assert!(err
        .surfaced_text()
        .starts_with("Error generating response: "));
}

#[test]
fn it_rejects_invalid_urls() {
    let res = Ollama::new(
        "not a url",
        Duration::from_millis(200),
        Duration::from_secs(2),
    );
    assert!(res.is_err());
}
