#[cfg(test)]
#[path = "prompt_test.rs"]
mod tests;

use serde::Serialize;

use super::Persona;

/// Shortcuts offered next to the input box. Submitted like typed input.
pub const QUICK_PROMPTS: &[&str] = &[
    "Explain quantum computing",
    "Write a haiku",
    "Debug my Python code",
    "Summarize latest AI news",
];

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PromptRole {
    System,
    User,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PromptPart {
    pub role: PromptRole,
    pub content: String,
}

/// A model ready request: the persona instruction followed by the latest user
/// text. History is never included.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PromptRequest {
    system: String,
    user: String,
}

impl PromptRequest {
    pub fn system(&self) -> &str {
        return &self.system;
    }

    pub fn user(&self) -> &str {
        return &self.user;
    }

    pub fn parts(&self) -> [PromptPart; 2] {
        return [
            PromptPart {
                role: PromptRole::System,
                content: self.system.to_string(),
            },
            PromptPart {
                role: PromptRole::User,
                content: self.user.to_string(),
            },
        ];
    }
}

pub struct PromptBuilder {}

impl PromptBuilder {
    pub fn build(persona: &Persona, user_text: &str) -> PromptRequest {
        return PromptRequest {
            system: persona.system_prompt.to_string(),
            user: user_text.to_string(),
        };
    }

    pub fn quick_prompt(index: usize) -> Option<&'static str> {
        if index < 1 {
            return None;
        }
        return QUICK_PROMPTS.get(index - 1).copied();
    }
}
