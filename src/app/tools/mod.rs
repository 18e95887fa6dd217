//! Editor-Tools und ihre gemeinsame Fehlertaxonomie.

pub mod cap;

pub use cap::CapTool;

use crate::core::MeshError;

/// Fehlertaxonomie des Cap-Tools.
///
/// Setup-Fehler (`NoFacesSelected`, `SelectionTooLarge`, `Topology`)
/// brechen ab, bevor Geometrie liegen bleibt. `Runtime` deckt alles
/// Unerwartete während der Active-Phase ab und löst dort den
/// automatischen Revert aus.
#[derive(Debug, Clone)]
pub enum CapError {
    /// Keine Fläche selektiert — nichts zu tun.
    NoFacesSelected,
    /// Die dominante Gruppe umfasst das gesamte Mesh; es bleibt kein
    /// Ring, in den hineingelaufen werden könnte.
    SelectionTooLarge,
    /// Ring-Subdivision oder Walk auf inkompatibler Topologie.
    Topology(String),
    /// Unerwarteter Laufzeitfehler (z.B. verwaistes Handle).
    Runtime(String),
}

impl CapError {
    /// Topologie-Fehler mit Kontext.
    pub fn topology(msg: impl Into<String>) -> Self {
        Self::Topology(msg.into())
    }

    /// Laufzeitfehler mit Kontext.
    pub fn runtime(msg: impl Into<String>) -> Self {
        Self::Runtime(msg.into())
    }
}

impl std::fmt::Display for CapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoFacesSelected => write!(f, "Keine Flächen selektiert"),
            Self::SelectionTooLarge => {
                write!(f, "Selektion umfasst das gesamte Mesh")
            }
            Self::Topology(msg) => write!(f, "Topologie-Fehler: {msg}"),
            Self::Runtime(msg) => write!(f, "Laufzeitfehler: {msg}"),
        }
    }
}

impl std::error::Error for CapError {}

impl From<MeshError> for CapError {
    fn from(err: MeshError) -> Self {
        match err {
            MeshError::InvalidTopology(msg) => Self::Topology(msg),
            MeshError::MissingElement(msg) => Self::Runtime(msg),
        }
    }
}
