#[cfg(test)]
#[path = "persona_test.rs"]
mod tests;

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Persona {
    pub name: &'static str,
    pub system_prompt: &'static str,
}

pub const PERSONAS: &[Persona] = &[
    Persona {
        name: "Assistant",
        system_prompt: "You are a helpful AI assistant. Provide clear, accurate responses.",
    },
    Persona {
        name: "Creative Writer",
        system_prompt:
            "You are a creative writing assistant. Help with storytelling and creative content.",
    },
    Persona {
        name: "Code Helper",
        system_prompt: "You are a programming assistant. Help with coding questions and debugging.",
    },
    Persona {
        name: "Teacher",
        system_prompt: "You are an educational assistant. Explain concepts clearly with examples.",
    },
];

impl Persona {
    pub fn all() -> &'static [Persona] {
        return PERSONAS;
    }

    pub fn find(name: &str) -> Option<Persona> {
        return PERSONAS.iter().find(|e| return e.name == name).copied();
    }

    /// Resolves either an exact persona name or a 1-based index into the
    /// persona table.
    pub fn resolve(text: &str) -> Option<Persona> {
        let text = text.trim();
        if let Ok(idx) = text.parse::<usize>() {
            if idx < 1 || idx > PERSONAS.len() {
                return None;
            }
            return Some(PERSONAS[idx - 1]);
        }

        return Persona::find(text);
    }

    pub fn names() -> Vec<&'static str> {
        return PERSONAS.iter().map(|e| return e.name).collect();
    }
}

impl Default for Persona {
    fn default() -> Persona {
        return PERSONAS[0];
    }
}

impl fmt::Display for Persona {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        return write!(f, "{}", self.name);
    }
}
