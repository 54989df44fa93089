use super::GenerationSettings;
use super::Message;
use super::ModelDescriptor;
use super::Persona;
use super::SessionStats;

/// Everything the UI needs to redraw after a command completes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChatView {
    pub messages: Vec<Message>,
    pub stats: SessionStats,
    pub model: ModelDescriptor,
    pub persona: Persona,
    pub settings: GenerationSettings,
    pub waiting_for_backend: bool,
}
