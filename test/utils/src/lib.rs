use serde_json::json;

/// Body of a non streamed `/api/chat` reply.
pub fn ollama_chat_response(content: &str) -> String {
    return json!({
        "model": "llama3",
        "created_at": "2024-01-01T00:00:00.000000Z",
        "message": {
            "role": "assistant",
            "content": content,
        },
        "done": true,
        "total_duration": 5_191_566_416u64,
        "eval_count": 42,
    })
    .to_string();
}

pub fn ollama_error_response(error: &str) -> String {
    return json!({ "error": error }).to_string();
}

pub fn ollama_tags_response(names: &[&str]) -> String {
    let models = names
        .iter()
        .map(|name| {
            return json!({
                "name": name,
                "modified_at": "2024-01-01T00:00:00.000000Z",
                "size": 3_825_819_519u64,
            });
        })
        .collect::<Vec<_>>();

    return json!({ "models": models }).to_string();
}
