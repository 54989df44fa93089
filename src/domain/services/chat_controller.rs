#[cfg(test)]
#[path = "chat_controller_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Result;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::ChatError;
use crate::domain::models::ChatView;
use crate::domain::models::ConversationSession;
use crate::domain::models::ExportSnapshot;
use crate::domain::models::GenerationSettings;
use crate::domain::models::InferenceError;
use crate::domain::models::Message;
use crate::domain::models::ModelDescriptor;
use crate::domain::models::Persona;
use crate::domain::models::PromptBuilder;
use crate::domain::models::PromptRequest;
use crate::domain::models::Role;
use crate::infrastructure::backends::BackendBox;
use crate::infrastructure::backends::BackendManager;

#[derive(Copy, Clone, Debug, PartialEq, Eq, strum::Display)]
pub enum TurnState {
    Idle,
    Validating,
    Rejected,
    Dispatching,
    Awaiting,
    Completed,
    Failed,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TurnOutcome {
    /// Input was empty; nothing was appended and no request was made.
    Rejected,
    Completed(Message),
    Failed {
        message: Message,
        error: InferenceError,
    },
}

/// Runs chat turns against a single conversation. Turns take `&mut self`, so
/// only one can be in flight at a time.
pub struct ChatController {
    session: ConversationSession,
    backend: Option<BackendBox>,
    model: ModelDescriptor,
    persona: Persona,
    settings: GenerationSettings,
    state: TurnState,
}

impl ChatController {
    /// `backend` is `None` when the client failed to initialize; every turn then
    /// fails as model unavailable without touching the network.
    pub fn new(
        backend: Option<BackendBox>,
        model: ModelDescriptor,
        persona: Persona,
        settings: GenerationSettings,
    ) -> ChatController {
        return ChatController {
            session: ConversationSession::new(),
            backend,
            model,
            persona,
            settings,
            state: TurnState::Idle,
        };
    }

    /// Builds a controller from loaded config. A backend that fails to
    /// initialize is logged and turns surface as model unavailable.
    pub fn from_config() -> Result<ChatController> {
        let backend = match BackendManager::get() {
            Ok(backend) => Some(backend),
            Err(err) => {
                tracing::error!(error = ?err, "unable to create the Ollama client");
                None
            }
        };

        let model = ModelDescriptor::find(&Config::get(ConfigKey::Model)).unwrap_or_default();
        let persona = Persona::find(&Config::get(ConfigKey::Persona)).unwrap_or_default();
        let settings = Config::generation_settings()?;

        return Ok(ChatController::new(backend, model, persona, settings));
    }

    fn transition(&mut self, state: TurnState) {
        tracing::debug!(from = %self.state, to = %state, "turn state");
        self.state = state;
    }

    pub fn state(&self) -> TurnState {
        return self.state;
    }

    pub fn session(&self) -> &ConversationSession {
        return &self.session;
    }

    pub fn model(&self) -> ModelDescriptor {
        return self.model;
    }

    pub fn persona(&self) -> Persona {
        return self.persona;
    }

    /// Checks the backend is reachable. Fails when no client was initialized.
    pub async fn health_check(&self) -> Result<()> {
        match &self.backend {
            Some(backend) => return backend.health_check().await,
            None => bail!("{}", InferenceError::ModelUnavailable),
        }
    }

    /// Models installed on the backend, empty when no client was initialized.
    pub async fn installed_models(&self) -> Result<Vec<String>> {
        match &self.backend {
            Some(backend) => return backend.list_models().await,
            None => return Ok(vec![]),
        }
    }

    /// Validates the input and records the user message before any network
    /// activity, returning the prompt to send.
    pub fn dispatch(&mut self, input: &str) -> Result<PromptRequest, ChatError> {
        self.transition(TurnState::Validating);
        if input.trim().is_empty() {
            self.transition(TurnState::Rejected);
            self.transition(TurnState::Idle);
            return Err(ChatError::Validation);
        }

        self.transition(TurnState::Dispatching);
        self.session.append(Role::User, input);

        let request = PromptBuilder::build(&self.persona, input);
        self.transition(TurnState::Awaiting);

        return Ok(request);
    }

    /// Awaits the backend and records its reply, or the error text when the
    /// request fails. Failures never end the session.
    pub async fn complete(&mut self, request: PromptRequest) -> TurnOutcome {
        let res = match &self.backend {
            Some(backend) => {
                backend
                    .generate(self.model.id, &request, &self.settings)
                    .await
            }
            None => Err(InferenceError::ModelUnavailable),
        };

        let outcome = match res {
            Ok(text) => {
                self.transition(TurnState::Completed);
                let message = self.session.append(Role::Assistant, &text).clone();
                TurnOutcome::Completed(message)
            }
            Err(error) => {
                tracing::error!(error = %error, model = self.model.id, "generation failed");
                self.transition(TurnState::Failed);
                let message = self
                    .session
                    .append(Role::Assistant, &error.surfaced_text())
                    .clone();
                TurnOutcome::Failed { message, error }
            }
        };

        self.transition(TurnState::Idle);
        return outcome;
    }

    pub async fn submit(&mut self, input: &str) -> TurnOutcome {
        match self.dispatch(input) {
            Ok(request) => return self.complete(request).await,
            Err(_) => return TurnOutcome::Rejected,
        }
    }

    pub fn select_model(&mut self, text: &str) -> Result<ModelDescriptor, ChatError> {
        if let Some(model) = ModelDescriptor::resolve(text) {
            self.model = model;
            return Ok(model);
        }

        return Err(ChatError::UnknownModel(text.trim().to_string()));
    }

    pub fn select_persona(&mut self, text: &str) -> Result<Persona, ChatError> {
        if let Some(persona) = Persona::resolve(text) {
            self.persona = persona;
            return Ok(persona);
        }

        return Err(ChatError::UnknownPersona(text.trim().to_string()));
    }

    pub fn set_temperature(&mut self, temperature: f32) {
        self.settings.temperature = temperature;
    }

    pub fn set_max_tokens(&mut self, max_tokens: u32) {
        self.settings.max_tokens = max_tokens;
    }

    pub fn clear(&mut self) {
        self.session.clear();
    }

    /// Returns `None` when there is nothing to export.
    pub fn export_snapshot(&self) -> Option<ExportSnapshot> {
        if self.session.is_empty() {
            return None;
        }

        return Some(self.session.export_snapshot(self.model.id));
    }

    pub fn view(&self) -> ChatView {
        return ChatView {
            messages: self.session.messages().to_vec(),
            stats: self.session.stats(),
            model: self.model,
            persona: self.persona,
            settings: self.settings,
            waiting_for_backend: self.state == TurnState::Awaiting,
        };
    }
}
