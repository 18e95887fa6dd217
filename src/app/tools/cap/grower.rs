//! Loop-Grower: materialisiert Segment-Loops über Ring-Schnitte und
//! hält die Loop-Ordnung Rand → Spitze aufrecht.

use super::super::CapError;
use super::state::CapTool;
use crate::core::ops::{dissolve_edges, dissolve_verts, subdivide_edge_ring, walk_edge_ring};
use crate::core::{EdgeId, EditMesh, VertId};
use crate::shared::{SEGMENTS_MAX, SEGMENTS_MIN};
use glam::Vec3;
use std::collections::HashSet;

/// Findet eine Kante von `from_verts` hinüber zum Ursprungsrand.
///
/// Während des Setups liegt der zuletzt gewachsene Loop immer einen Ring
/// vom Rand entfernt — die Suche beginnt beim ersten Vertex des Loops
/// und liefert dessen Vertikal-Kante.
pub(crate) fn seed_toward_boundary(
    tool: &CapTool,
    mesh: &EditMesh,
    from_verts: &[VertId],
) -> Result<EdgeId, CapError> {
    for &v in from_verts {
        for &e in mesh.vert_edges(v) {
            if let Some(other) = mesh.edge(e).and_then(|edge| edge.other_vert(v)) {
                if tool.start_verts.contains(&other) {
                    return Ok(e);
                }
            }
        }
    }
    Err(CapError::topology(
        "keine Kante zum Ursprungsrand gefunden",
    ))
}

/// Prüft ob der erste Vertex eines Loops eine Kante zum Ursprungsrand hat.
fn touches_boundary(tool: &CapTool, mesh: &EditMesh, v: VertId) -> bool {
    mesh.vert_edges(v).iter().any(|&e| {
        mesh.edge(e)
            .and_then(|edge| edge.other_vert(v))
            .is_some_and(|other| tool.start_verts.contains(&other))
    })
}

/// Schneidet einen neuen Loop in den Ring, der `seed` enthält.
///
/// `insert_at_tip = true` hängt den Loop ans Ende (Setup-Wachstum),
/// `false` fügt ihn randseitig bei Index 0 ein (interaktives Hinzufügen)
/// und erhöht die Segmentanzahl. Die Ruhelagen des randseitigen Falls
/// werden aus den Eltern-Ruhelagen interpoliert: der Rand-Vertex steht
/// still, die Ruhelage des Loop-0-Partners ist aus dessen Snapshot
/// bekannt — der Mittelwert ist exakt, unabhängig vom aktuellen Drag.
pub(crate) fn add_segment(
    tool: &mut CapTool,
    mesh: &mut EditMesh,
    seed: EdgeId,
    insert_at_tip: bool,
) -> Result<(), CapError> {
    let ring = walk_edge_ring(mesh, seed)?;
    let cut = subdivide_edge_ring(mesh, &ring)?;

    // Schnitt-Hälften sichtbar und selektiert halten
    for &f in &cut.new_faces {
        if let Some(face) = mesh.face_mut(f) {
            face.select = true;
            face.hide = false;
        }
    }

    // Neue Loop-Vertices gegen die Session-Registry filtern
    let mut fresh: Vec<(VertId, (VertId, VertId))> = Vec::with_capacity(cut.new_verts.len());
    for (&v, &parents) in cut.new_verts.iter().zip(&cut.parents) {
        if tool.known_verts.insert(v) {
            fresh.push((v, parents));
        }
    }
    if fresh.is_empty() {
        return Err(CapError::topology("Ring-Schnitt erzeugte keinen neuen Loop"));
    }

    if insert_at_tip {
        // Setup: Geometrie ist unverschoben, Live-Lage = Ruhelage
        let mut verts = Vec::with_capacity(fresh.len());
        let mut init = Vec::with_capacity(fresh.len());
        for (v, _) in fresh {
            let co = mesh
                .vert(v)
                .ok_or_else(|| CapError::runtime(format!("neuer Loop-Vertex {v} fehlt")))?
                .co;
            verts.push(v);
            init.push(co);
        }
        tool.loops.push(verts);
        tool.init_loop_co.push(init);
    } else {
        // Interaktiv: Ruhelage = Mittel der Eltern-Ruhelagen
        let mut verts = Vec::with_capacity(fresh.len());
        let mut init = Vec::with_capacity(fresh.len());
        for (v, (pa, pb)) in fresh {
            let rest_a = tool
                .rest_or_live_co(mesh, pa)
                .ok_or_else(|| CapError::runtime(format!("Eltern-Vertex {pa} fehlt")))?;
            let rest_b = tool
                .rest_or_live_co(mesh, pb)
                .ok_or_else(|| CapError::runtime(format!("Eltern-Vertex {pb} fehlt")))?;
            verts.push(v);
            init.push((rest_a + rest_b) / 2.0);
        }
        tool.loops.insert(0, verts);
        tool.init_loop_co.insert(0, init);
        tool.options.segment_count += 1;
    }
    Ok(())
}

/// Setup-Wachstum: schneidet `segment_count` Loops, korrigiert die
/// Ordnung und hängt die extrudierten Vertices als Spitzen-Loop an.
pub(crate) fn grow_initial(
    tool: &mut CapTool,
    mesh: &mut EditMesh,
    tip_verts: &[VertId],
    tip_init: Vec<Vec3>,
) -> Result<(), CapError> {
    for _ in 0..tool.options.segment_count {
        let seed = match tool.loops.last() {
            Some(last) => seed_toward_boundary(tool, mesh, last)?,
            None => seed_toward_boundary(tool, mesh, tip_verts)?,
        };
        add_segment(tool, mesh, seed, true)?;
    }

    // Ordnung prüfen: Index 0 muss am Ursprungsrand liegen
    let reverse_needed = match tool.loops.last().and_then(|l| l.first()) {
        Some(&first) => touches_boundary(tool, mesh, first),
        None => false,
    };
    if reverse_needed {
        tool.loops.reverse();
        tool.init_loop_co.reverse();
    }

    tool.loops.push(tip_verts.to_vec());
    tool.init_loop_co.push(tip_init);
    Ok(())
}

/// Entfernt den innersten Loop (Index 0): Ringkanten auflösen, Vertices
/// auflösen, Zählung anpassen und den neuen innersten Ring selektieren.
pub(crate) fn remove_innermost_segment(
    tool: &mut CapTool,
    mesh: &mut EditMesh,
) -> Result<(), CapError> {
    if tool.options.segment_count <= SEGMENTS_MIN || tool.loops.len() < 2 {
        log::debug!("Segment-Entfernen an der Untergrenze ignoriert");
        return Ok(());
    }

    let loop0 = tool.loops[0].clone();
    let loop_set: HashSet<VertId> = loop0.iter().copied().collect();

    // Ringkanten: beide Endpunkte im innersten Loop
    let mut ring_edges: Vec<EdgeId> = Vec::new();
    let mut seen: HashSet<EdgeId> = HashSet::new();
    for &v in &loop0 {
        for &e in mesh.vert_edges(v) {
            if !seen.insert(e) {
                continue;
            }
            if let Some(edge) = mesh.edge(e) {
                if loop_set.contains(&edge.verts[0]) && loop_set.contains(&edge.verts[1]) {
                    ring_edges.push(e);
                }
            }
        }
    }

    dissolve_edges(mesh, &ring_edges)?;
    dissolve_verts(mesh, &loop0)?;

    tool.loops.remove(0);
    tool.init_loop_co.remove(0);
    for v in &loop0 {
        tool.known_verts.shift_remove(v);
    }
    tool.options.segment_count -= 1;

    // Neuen innersten Ring selektieren (Vertex-Mitgliedschafts-Variante)
    let inner: HashSet<VertId> = tool.loops[0].iter().copied().collect();
    let to_select: Vec<_> = mesh
        .iter_faces()
        .filter(|f| f.verts.iter().any(|v| inner.contains(v)))
        .map(|f| f.id)
        .collect();
    for f in to_select {
        if let Some(face) = mesh.face_mut(f) {
            face.select = true;
        }
    }
    Ok(())
}

/// Wächst oder schrumpft auf die Ziel-Segmentanzahl (Zahleneingabe).
pub(crate) fn set_segment_count(
    tool: &mut CapTool,
    mesh: &mut EditMesh,
    target: u32,
) -> Result<(), CapError> {
    let target = target.clamp(SEGMENTS_MIN, SEGMENTS_MAX);
    while tool.options.segment_count < target {
        let inner = tool
            .loops
            .first()
            .cloned()
            .ok_or_else(|| CapError::runtime("Session ohne Loops"))?;
        let seed = seed_toward_boundary(tool, mesh, &inner)?;
        add_segment(tool, mesh, seed, false)?;
    }
    while tool.options.segment_count > target {
        remove_innermost_segment(tool, mesh)?;
    }
    Ok(())
}
