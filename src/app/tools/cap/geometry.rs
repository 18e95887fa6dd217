//! Falloff-Kurve und der Per-Frame-Geometrie-Durchlauf.

use super::super::CapError;
use super::state::CapTool;
use crate::core::ops::{preview_triangulation, recalc_face_normals};
use crate::core::EditMesh;
use crate::shared::SCALE_FAC_UNITY_EPS;
use glam::Vec3;

/// Normierter Exponential-Easing-Faktor in [0, 1].
///
/// `factor(i) = (s^((i+1)/(n+k)) − 1) / (s − 1)` mit Basis `s`,
/// Segmentanzahl `n` und Easing-Offset `k`. Bei `i = −1` exakt 0, bei
/// `i = n` (mit `k = 1`) exakt 1. Für `s ≈ 1` degeneriert die Form zu
/// 0/0; dort gilt der analytische Grenzwert `(i+1)/(n+k)` — die Kurve
/// wird linear.
pub(crate) fn falloff_factor(scale_fac: f32, bias: f32, segment_count: u32, index: f32) -> f32 {
    let exponent = (index + 1.0) / (segment_count as f32 + bias);
    if (scale_fac - 1.0).abs() < SCALE_FAC_UNITY_EPS {
        return exponent;
    }
    (scale_fac.powf(exponent) - 1.0) / (scale_fac - 1.0)
}

/// Rechnet alle Loop-Positionen aus den Ruhelagen neu.
///
/// Pro Loop: Verschiebung entlang der mittleren Normalen mit
/// `falloff(loop_idx)`, dann Skalierung um den frisch verschobenen
/// Schwerpunkt mit dem gespiegelten Index `falloff(n − loop_idx)` — der
/// Rand-Loop bleibt bei Faktor ~1 am Basisring verklebt, die Spitze
/// zieht sich zusammen. Flip-Scale ersetzt den Faktor durch seinen
/// Kehrwert und invertiert so die Wölbung.
///
/// Bei Drag-Distanz exakt 0 werden alle Vertices auf ihre Ruhelagen
/// zurückgesetzt (Identität), ohne Skalierungs-Durchlauf.
///
/// Gibt die vorzeichenbehaftete Drag-Distanz zurück.
pub(crate) fn apply_falloff(tool: &mut CapTool, mesh: &mut EditMesh) -> Result<f32, CapError> {
    let d = tool.drag_distance();
    let n = tool.options.segment_count;
    let scale_fac = tool.options.scale_fac;
    let bias = tool.options.falloff_bias;

    if tool.loops.len() != tool.init_loop_co.len() {
        return Err(CapError::runtime(format!(
            "Loop-Snapshots asynchron: {} Loops, {} Snapshots",
            tool.loops.len(),
            tool.init_loop_co.len()
        )));
    }

    for (loop_idx, (loop_verts, init_cos)) in
        tool.loops.iter().zip(&tool.init_loop_co).enumerate()
    {
        if loop_verts.len() != init_cos.len() {
            return Err(CapError::runtime(format!(
                "Loop {loop_idx} hat {} Vertices, aber {} Ruhelagen",
                loop_verts.len(),
                init_cos.len()
            )));
        }
        if loop_verts.is_empty() {
            continue;
        }

        if d == 0.0 {
            // Identität bei Null-Drag: exakt die Ruhelagen
            for (&v, &init) in loop_verts.iter().zip(init_cos) {
                let vert = mesh
                    .vert_mut(v)
                    .ok_or_else(|| CapError::runtime(format!("Loop-Vertex {v} fehlt")))?;
                vert.co = init;
            }
            continue;
        }

        // Verschiebung
        let move_factor = falloff_factor(scale_fac, bias, n, loop_idx as f32);
        let displacement = tool.avg_normal * (d * move_factor);
        let mut sum = Vec3::ZERO;
        for (&v, &init) in loop_verts.iter().zip(init_cos) {
            let vert = mesh
                .vert_mut(v)
                .ok_or_else(|| CapError::runtime(format!("Loop-Vertex {v} fehlt")))?;
            vert.co = init + displacement;
            sum += vert.co;
        }

        // Skalierung um den Loop-Schwerpunkt (gespiegelter Index)
        let centroid = sum / loop_verts.len() as f32;
        let mut scale = falloff_factor(scale_fac, bias, n, (n as f32) - loop_idx as f32);
        if tool.options.flip_scale && scale.abs() > f32::EPSILON {
            scale = 1.0 / scale;
        }
        for &v in loop_verts {
            let vert = mesh
                .vert_mut(v)
                .ok_or_else(|| CapError::runtime(format!("Loop-Vertex {v} fehlt")))?;
            vert.co = centroid + (vert.co - centroid) * scale;
        }
    }

    // Quads sind während des Drags unplanar: Normalen auffrischen und die
    // Region für das Host-Shading neu triangulieren
    let region = mesh.selected_face_ids();
    recalc_face_normals(mesh, &region)?;
    tool.feedback.preview_triangles = preview_triangulation(mesh, &region);

    Ok(d)
}
