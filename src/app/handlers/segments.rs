//! Handler für das interaktive Hinzufügen/Entfernen von Segment-Loops.

use crate::app::tools::cap::{grower, CapTool};
use crate::app::tools::CapError;
use crate::core::EditMesh;
use crate::shared::{SEGMENTS_MAX, SEGMENTS_MIN};

/// Fügt randseitig einen Segment-Loop ein und rechnet die Preview neu.
pub fn add(tool: &mut CapTool, mesh: &mut EditMesh) -> Result<(), CapError> {
    if tool.segment_count() >= SEGMENTS_MAX {
        log::debug!("Segment-Obergrenze erreicht, Hinzufügen ignoriert");
        return Ok(());
    }
    let inner = tool
        .loops()
        .first()
        .cloned()
        .ok_or_else(|| CapError::runtime("Session ohne Loops"))?;
    let seed = grower::seed_toward_boundary(tool, mesh, &inner)?;
    grower::add_segment(tool, mesh, seed, false)?;
    tool.recompute(mesh)
}

/// Entfernt den innersten Segment-Loop und rechnet die Preview neu.
pub fn remove(tool: &mut CapTool, mesh: &mut EditMesh) -> Result<(), CapError> {
    if tool.segment_count() <= SEGMENTS_MIN {
        log::debug!("Segment-Untergrenze erreicht, Entfernen ignoriert");
        return Ok(());
    }
    grower::remove_innermost_segment(tool, mesh)?;
    tool.recompute(mesh)
}
