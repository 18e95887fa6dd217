//! Feature-Handler für CapCommand-Verarbeitung.
//!
//! Jeder Handler gruppiert die Command-Ausführung eines Feature-Bereichs.
//! Der Controller dispatcht an die passende Handler-Funktion; jeder
//! Fehler wandert als `Err` zurück und löst dort den Revert aus.

pub mod finish;
pub mod numeric;
pub mod params;
pub mod preview;
pub mod segments;
