//! Daten-Schnittstelle zur Host-UI: Status, Header, Cursor, Hilfslinie.

pub mod feedback;

pub use feedback::{CursorShape, GuideLine, ViewportFeedback};
