//! Application-Layer: Controller, Session, Events und Handler.

pub mod command_log;
pub mod controller;
pub mod events;
pub mod handlers;
mod intent_mapping;
pub mod tools;

pub use command_log::CommandLog;
pub use controller::{CapController, ModalStatus};
pub use events::{CapCommand, ModalEvent, ModalKey};
pub use tools::{CapError, CapTool};
