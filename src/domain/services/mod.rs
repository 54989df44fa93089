pub mod actions;
mod app_state;
mod bubble;
mod bubble_list;
mod chat_controller;
pub mod events;
mod exports;
mod scroll;

pub use app_state::*;
pub use bubble::*;
pub use bubble_list::*;
pub use chat_controller::*;
pub use exports::*;
pub use scroll::*;
