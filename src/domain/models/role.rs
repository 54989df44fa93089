use serde::Deserialize;
use serde::Serialize;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Label shown above chat bubbles.
    pub fn title(&self) -> &'static str {
        match self {
            Role::User => return "User",
            Role::Assistant => return "Assistant",
        }
    }
}
