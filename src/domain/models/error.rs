use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChatError {
    #[error("Message is empty")]
    Validation,

    #[error("No model named {0} is configured.")]
    UnknownModel(String),

    #[error("No persona named {0} is configured.")]
    UnknownPersona(String),
}
