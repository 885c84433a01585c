pub mod actions;
mod app_state;
mod bubble;
mod bubble_list;
mod chat_controller;
pub mod events;
mod image_refs;
mod message_codec;
mod prompt_assembler;
mod scroll;
mod session_lifecycle;
mod session_store;

pub use app_state::*;
pub use bubble::*;
pub use bubble_list::*;
pub use chat_controller::*;
pub use image_refs::*;
pub use message_codec::*;
pub use prompt_assembler::*;
pub use scroll::*;
pub use session_lifecycle::*;
pub use session_store::*;
