mod action;
mod backend;
mod error;
mod event;
mod generation;
mod loading;
mod message;
mod model;
mod persona;
mod prompt;
mod role;
mod session;
mod slash_commands;
mod textarea;
mod view;

pub use action::*;
pub use backend::*;
pub use error::*;
pub use event::*;
pub use generation::*;
pub use loading::*;
pub use message::*;
pub use model::*;
pub use persona::*;
pub use prompt::*;
pub use role::*;
pub use session::*;
pub use slash_commands::*;
pub use textarea::*;
pub use view::*;
