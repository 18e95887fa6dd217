//! Handler für das Session-Ende: Bestätigen und Abbrechen.

use crate::app::tools::{cap::CapTool, CapError};
use crate::core::EditMesh;

/// Bestätigt die Session: Ursprungsflächen werden gelöscht, die neue
/// Kappengeometrie bleibt.
pub fn confirm(tool: &mut CapTool, mesh: &mut EditMesh) -> Result<(), CapError> {
    tool.confirm(mesh)
}

/// Bricht die Session ab: neue Geometrie wird gelöscht, die
/// Ursprungsflächen kommen sichtbar und selektiert zurück.
pub fn cancel(tool: &mut CapTool, mesh: &mut EditMesh) -> Result<(), CapError> {
    tool.revert(mesh)
}
