//! Handler für die gepufferte Zahleneingabe der Segmentanzahl.

use crate::app::tools::cap::{grower, CapTool};
use crate::app::tools::CapError;
use crate::core::EditMesh;
use crate::shared::SEGMENTS_MAX;

/// Maximale Ziffernzahl des Puffers (Obergrenze ist dreistellig).
const BUFFER_DIGITS: usize = 3;

/// Hängt eine Ziffer an den Eingabe-Puffer an.
pub fn push_digit(tool: &mut CapTool, digit: u8) -> Result<(), CapError> {
    if tool.numeric_buffer.len() >= BUFFER_DIGITS {
        log::debug!("Zahleneingabe voll, Ziffer {digit} ignoriert");
        return Ok(());
    }
    tool.numeric_buffer.push((b'0' + digit.min(9)) as char);
    tool.refresh_header();
    Ok(())
}

/// Entfernt die letzte Ziffer des Eingabe-Puffers.
pub fn pop_digit(tool: &mut CapTool) -> Result<(), CapError> {
    tool.numeric_buffer.pop();
    tool.refresh_header();
    Ok(())
}

/// Übernimmt den Puffer als neue Segmentanzahl (0..=250, untere Grenze
/// greift beim Wachsen) und rechnet die Preview neu.
pub fn commit(tool: &mut CapTool, mesh: &mut EditMesh) -> Result<(), CapError> {
    let buffer = std::mem::take(&mut tool.numeric_buffer);
    let target = match buffer.parse::<u32>() {
        Ok(value) => value.min(SEGMENTS_MAX),
        Err(_) => {
            log::debug!("Zahleneingabe '{buffer}' nicht lesbar, verworfen");
            tool.refresh_header();
            return Ok(());
        }
    };
    grower::set_segment_count(tool, mesh, target)?;
    tool.recompute(mesh)
}
