//! The viewer engine: one owned instance of all viewer state.

pub mod command;
mod core;

pub use command::ViewerCommand;
pub use core::ViewerEngine;
