mod action;
mod author;
mod banner;
mod chat_input;
mod chat_state;
mod entry;
mod error;
mod event;
mod message;
mod prompt;
mod provider;
mod render_unit;
mod role;
mod slash_commands;
mod textarea;
mod tracer;

pub use action::*;
pub use author::*;
pub use banner::*;
pub use chat_input::*;
pub use chat_state::*;
pub use entry::*;
pub use error::*;
pub use event::*;
pub use message::*;
pub use prompt::*;
pub use provider::*;
pub use render_unit::*;
pub use role::*;
pub use slash_commands::*;
pub use textarea::*;
pub use tracer::*;
