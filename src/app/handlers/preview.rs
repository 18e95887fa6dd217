//! Handler für Pointer-Bewegungen (Live-Preview).

use crate::app::tools::{cap::CapTool, CapError};
use crate::core::EditMesh;
use glam::Vec2;

/// Wendet den Falloff-Transform mit der neuen Pointer-Position an.
pub fn update(tool: &mut CapTool, mesh: &mut EditMesh, region_px: Vec2) -> Result<(), CapError> {
    tool.update_preview(mesh, region_px)
}
