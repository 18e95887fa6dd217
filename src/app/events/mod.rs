//! Modal-Events und Commands der Cap-Session.
//! Events sind rohe Host-Eingaben ohne Mutationslogik; Commands sind
//! die zentral ausgeführten mutierenden Schritte.

pub mod command;
pub mod intent;

pub use command::CapCommand;
pub use intent::{ModalEvent, ModalKey};
