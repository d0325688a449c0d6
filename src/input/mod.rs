//! Raw input events and their translation into engine commands.

pub mod event;
pub mod processor;

pub use event::{InputEvent, MouseButton};
pub use processor::InputProcessor;
