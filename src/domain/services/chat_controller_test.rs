use anyhow::Result;

use super::ChatController;
use super::TurnOutcome;
use super::TurnState;
use crate::domain::models::ChatError;
use crate::domain::models::GenerationSettings;
use crate::domain::models::InferenceError;
use crate::domain::models::ModelDescriptor;
use crate::domain::models::Persona;
use crate::domain::models::Role;
use crate::domain::models::SessionStats;
use crate::infrastructure::backends::scripted::RecordedCalls;
use crate::infrastructure::backends::scripted::ScriptedBackend;

fn controller(replies: Vec<Result<String, InferenceError>>) -> (ChatController, RecordedCalls) {
    let (backend, calls) = ScriptedBackend::new(replies);
    let controller = ChatController::new(
        Some(Box::new(backend)),
        ModelDescriptor::find("llama3").unwrap(),
        Persona::find("Teacher").unwrap(),
        GenerationSettings::default(),
    );

    return (controller, calls);
}

#[tokio::test]
async fn it_completes_a_turn() {
    let (mut controller, calls) = controller(vec![Ok("Gravity is a force...".to_string())]);

    let outcome = controller.submit("What is gravity?").await;
    let messages = controller.session().messages();

    assert!(matches!(outcome, TurnOutcome::Completed(_)));
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].role(), Role::User);
    assert_eq!(messages[0].content(), "What is gravity?");
    assert_eq!(messages[1].role(), Role::Assistant);
    assert_eq!(messages[1].content(), "Gravity is a force...");
    assert_eq!(
        controller.session().stats(),
        SessionStats {
            total: 2,
            user_count: 1,
        }
    );
    assert_eq!(controller.state(), TurnState::Idle);

    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].model_id, "llama3");
    assert_eq!(
        calls[0].request.system(),
        "You are an educational assistant. Explain concepts clearly with examples."
    );
    assert_eq!(calls[0].request.user(), "What is gravity?");
    assert_eq!(calls[0].settings, GenerationSettings::default());
}

#[tokio::test]
async fn it_rejects_blank_input() {
    for input in ["", " ", "\n\t  "] {
        let (mut controller, calls) = controller(vec![Ok("unused".to_string())]);

        let outcome = controller.submit(input).await;

        assert_eq!(outcome, TurnOutcome::Rejected);
        assert!(controller.session().is_empty());
        assert!(calls.lock().unwrap().is_empty());
        assert_eq!(controller.state(), TurnState::Idle);
    }
}

#[test]
fn it_returns_validation_errors_on_dispatch() {
    let (mut controller, _calls) = controller(vec![]);
    assert_eq!(controller.dispatch("   ").unwrap_err(), ChatError::Validation);
}

#[tokio::test]
async fn it_records_user_message_before_generating() -> Result<()> {
    let (mut controller, calls) = controller(vec![Ok("Hi!".to_string())]);

    let request = controller.dispatch("Hello")?;

    assert_eq!(controller.state(), TurnState::Awaiting);
    assert!(controller.view().waiting_for_backend);
    assert_eq!(controller.session().len(), 1);
    assert!(calls.lock().unwrap().is_empty());

    controller.complete(request).await;

    assert_eq!(controller.session().len(), 2);
    assert!(!controller.view().waiting_for_backend);

    return Ok(());
}

#[tokio::test]
async fn it_appends_error_text_on_failure() {
    let (mut controller, _calls) = controller(vec![
        Err(InferenceError::Unreachable(
            "error sending request for url (http://localhost:11434/api/chat)".to_string(),
        )),
        Ok("Back online".to_string()),
    ]);

    let outcome = controller.submit("Hello").await;
    let messages = controller.session().messages();

    assert!(matches!(outcome, TurnOutcome::Failed { .. }));
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].role(), Role::User);
    assert_eq!(messages[0].content(), "Hello");
    assert_eq!(messages[1].role(), Role::Assistant);
    insta::assert_snapshot!(messages[1].content(), @"Error generating response: error sending request for url (http://localhost:11434/api/chat)");

    // The session stays usable after a failure.
    controller.submit("Are you there?").await;
    assert_eq!(controller.session().len(), 4);
    assert_eq!(controller.session().messages()[3].content(), "Back online");
}

#[tokio::test]
async fn it_fails_as_unavailable_without_a_backend() {
    let mut controller = ChatController::new(
        None,
        ModelDescriptor::default(),
        Persona::default(),
        GenerationSettings::default(),
    );

    let outcome = controller.submit("Hello").await;

    match outcome {
        TurnOutcome::Failed { message, error } => {
            assert_eq!(error, InferenceError::ModelUnavailable);
            assert_eq!(message.content(), "Error: Model not available");
        }
        _ => panic!("expected a failed turn"),
    }
    assert_eq!(controller.session().stats().total, 2);
    assert_eq!(controller.state(), TurnState::Idle);
}

#[tokio::test]
async fn it_uses_selected_model_persona_and_settings() -> Result<()> {
    let (mut controller, calls) = controller(vec![Ok("A haiku".to_string())]);

    controller.select_model("3")?;
    controller.select_persona("Creative Writer")?;
    controller.set_temperature(0.2);
    controller.set_max_tokens(400);
    controller.submit("Write a haiku").await;

    let calls = calls.lock().unwrap();
    assert_eq!(calls[0].model_id, "mistral");
    assert_eq!(
        calls[0].request.system(),
        "You are a creative writing assistant. Help with storytelling and creative content."
    );
    assert_eq!(calls[0].settings, GenerationSettings::new(0.2, 400));

    return Ok(());
}

#[test]
fn it_keeps_selection_on_unknown_names() {
    let (mut controller, _calls) = controller(vec![]);

    assert_eq!(
        controller.select_model("gpt-4").unwrap_err(),
        ChatError::UnknownModel("gpt-4".to_string())
    );
    assert_eq!(
        controller.select_persona("Pirate").unwrap_err(),
        ChatError::UnknownPersona("Pirate".to_string())
    );
    assert_eq!(controller.model().id, "llama3");
    assert_eq!(controller.persona().name, "Teacher");
}

#[tokio::test]
async fn it_clears_and_suppresses_empty_exports() {
    let (mut controller, _calls) = controller(vec![Ok("Hi".to_string())]);
    assert!(controller.export_snapshot().is_none());

    controller.submit("Hello").await;
    let snapshot = controller.export_snapshot().unwrap();
    assert_eq!(snapshot.model, "llama3");
    assert_eq!(snapshot.messages, controller.session().messages().to_vec());

    controller.clear();
    controller.clear();
    assert!(controller.export_snapshot().is_none());
    assert_eq!(controller.view().stats, SessionStats::default());
}
