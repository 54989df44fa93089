#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

use chrono::Local;
use chrono::SecondsFormat;
use serde::Deserialize;
use serde::Serialize;

use super::Message;
use super::Role;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub total: usize,
    pub user_count: usize,
}

/// Read only view of a session written out by the export action.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExportSnapshot {
    pub timestamp: String,
    pub model: String,
    pub messages: Vec<Message>,
}

/// The ordered message log of the running chat. Insertion order is
/// chronological order, entries are only ever removed by `clear`.
#[derive(Clone, Debug, Default)]
pub struct ConversationSession {
    messages: Vec<Message>,
}

impl ConversationSession {
    pub fn new() -> ConversationSession {
        return ConversationSession::default();
    }

    pub fn append(&mut self, role: Role, content: &str) -> &Message {
        self.messages.push(Message::new(role, content));
        return &self.messages[self.messages.len() - 1];
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn messages(&self) -> &[Message] {
        return &self.messages;
    }

    pub fn len(&self) -> usize {
        return self.messages.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.messages.is_empty();
    }

    pub fn stats(&self) -> SessionStats {
        return SessionStats {
            total: self.messages.len(),
            user_count: self
                .messages
                .iter()
                .filter(|e| return e.role() == Role::User)
                .count(),
        };
    }

    pub fn export_snapshot(&self, model_id: &str) -> ExportSnapshot {
        return ExportSnapshot {
            timestamp: Local::now().to_rfc3339_opts(SecondsFormat::Micros, false),
            model: model_id.to_string(),
            messages: self.messages.to_vec(),
        };
    }
}
