//! Handler für Parameter-Umschalter der laufenden Session.

use crate::app::tools::cap::{grower, CapTool};
use crate::app::tools::CapError;
use crate::core::EditMesh;

/// Verschiebt die Falloff-Basis und rechnet die Preview neu.
pub fn step_scale_fac(tool: &mut CapTool, mesh: &mut EditMesh, delta: f32) -> Result<(), CapError> {
    tool.options.step_scale_fac(delta);
    log::debug!("Falloff-Basis: {:.3}", tool.options.scale_fac);
    tool.recompute(mesh)
}

/// Invertiert die Verschiebungsrichtung.
pub fn toggle_invert(tool: &mut CapTool, mesh: &mut EditMesh) -> Result<(), CapError> {
    tool.options.invert = !tool.options.invert;
    tool.recompute(mesh)
}

/// Spiegelt die Loop-Skalierung (invertiert die Wölbung).
pub fn toggle_flip_scale(tool: &mut CapTool, mesh: &mut EditMesh) -> Result<(), CapError> {
    tool.options.flip_scale = !tool.options.flip_scale;
    tool.recompute(mesh)
}

/// Schaltet den Control-Length-Modus um.
///
/// Beim Einschalten wird die aktuelle Lage zur neuen Basis: Ruhelagen
/// und Drag-Ursprung werden neu gesetzt, weitere Drags messen ab hier.
pub fn toggle_control_length(tool: &mut CapTool, mesh: &mut EditMesh) -> Result<(), CapError> {
    tool.options.control_length = !tool.options.control_length;
    if tool.options.control_length {
        tool.rebaseline(mesh)?;
    }
    tool.recompute(mesh)
}

/// Setzt alle Parameter auf die persistierten Standardwerte zurück.
pub fn reset(tool: &mut CapTool, mesh: &mut EditMesh) -> Result<(), CapError> {
    let defaults = tool.defaults.clone();
    tool.options.scale_fac = defaults.scale_fac;
    tool.options.invert = defaults.invert;
    tool.options.flip_scale = defaults.flip_scale;
    tool.options.control_length = defaults.control_length;
    tool.options.falloff_bias = defaults.falloff_bias;
    grower::set_segment_count(tool, mesh, defaults.segment_count)?;
    log::debug!("Parameter auf Standardwerte zurückgesetzt");
    tool.recompute(mesh)
}
