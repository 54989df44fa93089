#[cfg(test)]
#[path = "model_test.rs"]
mod tests;

use std::fmt;

/// A model that can be selected in the UI. Ids match the tags used by Ollama.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModelDescriptor {
    pub id: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
}

pub const MODELS: &[ModelDescriptor] = &[
    ModelDescriptor {
        id: "deepseek-r1:latest",
        icon: "🧠",
        description: "Advanced reasoning model",
    },
    ModelDescriptor {
        id: "llama3",
        icon: "🦙",
        description: "Fast and reliable",
    },
    ModelDescriptor {
        id: "mistral",
        icon: "⚡",
        description: "Efficient performance",
    },
];

impl ModelDescriptor {
    pub fn all() -> &'static [ModelDescriptor] {
        return MODELS;
    }

    pub fn find(id: &str) -> Option<ModelDescriptor> {
        return MODELS.iter().find(|e| return e.id == id).copied();
    }

    pub fn is_known(id: &str) -> bool {
        return ModelDescriptor::find(id).is_some();
    }

    /// Resolves either a model id or a 1-based index into the model table.
    pub fn resolve(text: &str) -> Option<ModelDescriptor> {
        let text = text.trim();
        if let Ok(idx) = text.parse::<usize>() {
            if idx < 1 || idx > MODELS.len() {
                return None;
            }
            return Some(MODELS[idx - 1]);
        }

        return ModelDescriptor::find(text);
    }

    pub fn ids() -> Vec<&'static str> {
        return MODELS.iter().map(|e| return e.id).collect();
    }

    pub fn label(&self) -> String {
        return format!("{} {} - {}", self.icon, self.id, self.description);
    }
}

impl Default for ModelDescriptor {
    fn default() -> ModelDescriptor {
        return MODELS[0];
    }
}

impl fmt::Display for ModelDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        return write!(f, "{}", self.id);
    }
}
