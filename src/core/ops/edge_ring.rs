//! Kantenring-Walk und Ring-Subdivision.
//!
//! Der Walk reproduziert die Ring-Selektions-Semantik des Hosts auf der
//! frisch extrudierten Geometrie: von einer Seed-Kante aus wird pro
//! anliegendem Quad die parallele Gegenkante besucht, Nicht-Quads beenden
//! den Ast. Die Subdivision schneidet den kompletten Ring in einem
//! einzigen Aufruf, damit alle neuen Vertices einen konsistenten Loop
//! bilden.

use crate::core::edit_mesh::{EditMesh, MeshError};
use crate::core::handle::{EdgeId, FaceId, VertId};
use crate::core::ops::delete::delete_verts;
use indexmap::IndexMap;
use std::collections::HashSet;

/// Ergebnis eines Ring-Schnitts.
#[derive(Debug, Clone)]
pub struct RingCutResult {
    /// Durch den Schnitt entstandene Quad-Hälften (Schnitt-Reihenfolge)
    pub new_faces: Vec<FaceId>,
    /// Neue Mittelpunkt-Vertices, ein Eintrag pro Ring-Kante
    pub new_verts: Vec<VertId>,
    /// Endpunkte der geteilten Kante, parallel zu `new_verts` —
    /// Basis für die Ruhelagen-Interpolation nachträglich eingefügter Loops
    pub parents: Vec<(VertId, VertId)>,
}

/// Läuft den topologischen Kantenring ab, der `seed` enthält.
///
/// Iterative Tiefensuche über das Besucht-Flag der Kanten; das Flag wird
/// vorab für das gesamte Mesh zurückgesetzt. Terminiert garantiert, da
/// jede Kante höchstens einmal besucht wird. Die Reihenfolge der
/// Rückgabe ist deterministisch, aber ohne Bedeutung.
pub fn walk_edge_ring(mesh: &mut EditMesh, seed: EdgeId) -> Result<Vec<EdgeId>, MeshError> {
    if mesh.edge(seed).is_none() {
        return Err(MeshError::MissingElement(format!("Seed-Kante {seed}")));
    }
    mesh.clear_edge_tags();

    let mut ring = Vec::new();
    let mut stack = vec![seed];
    if let Some(e) = mesh.edge_mut(seed) {
        e.tag = true;
    }

    while let Some(current) = stack.pop() {
        ring.push(current);
        let faces: Vec<FaceId> = mesh.edge_faces(current).to_vec();
        for f in faces {
            let Some(face) = mesh.face(f) else {
                continue;
            };
            // Ring-Schnitte sind nur durch Quads definiert
            if !face.is_quad() {
                continue;
            }
            let Some(pos) = face.edges.iter().position(|e| *e == current) else {
                continue;
            };
            let opposite = face.edges[(pos + 2) % 4];
            let visited = mesh.edge(opposite).map_or(true, |e| e.tag);
            if !visited {
                if let Some(e) = mesh.edge_mut(opposite) {
                    e.tag = true;
                }
                stack.push(opposite);
            }
        }
    }
    Ok(ring)
}

/// Fügt einen neuen Vertex-Loop ein, indem jede Ring-Kante am Mittelpunkt
/// geteilt und jedes Ring-Quad in zwei Quads geschnitten wird.
///
/// Muss mit der kompletten Kantenliste eines Walks aufgerufen werden —
/// Einzelkanten-Schnitte würden die Loop-Zuordnung zerstören. Schlägt die
/// Operation nach Beginn der Mutation fehl, werden bereits erzeugte
/// Mittelpunkte wieder entfernt, bevor der Fehler zurückgegeben wird.
pub fn subdivide_edge_ring(
    mesh: &mut EditMesh,
    ring: &[EdgeId],
) -> Result<RingCutResult, MeshError> {
    validate_ring(mesh, ring)?;

    let mut created: Vec<VertId> = Vec::with_capacity(ring.len());
    match cut_ring(mesh, ring, &mut created) {
        Ok(result) => Ok(result),
        Err(err) => {
            if let Err(cleanup_err) = delete_verts(mesh, &created) {
                log::warn!("Aufräumen nach Ring-Schnitt-Fehler unvollständig: {cleanup_err}");
            }
            Err(err)
        }
    }
}

/// Prüft den Ring vollständig, bevor irgendetwas mutiert wird.
fn validate_ring(mesh: &EditMesh, ring: &[EdgeId]) -> Result<(), MeshError> {
    if ring.is_empty() {
        return Err(MeshError::InvalidTopology("leerer Kantenring".into()));
    }
    let ring_set: HashSet<EdgeId> = ring.iter().copied().collect();

    let mut seen_faces: HashSet<FaceId> = HashSet::new();
    let mut cuttable = 0usize;
    for &eid in ring {
        if mesh.edge(eid).is_none() {
            return Err(MeshError::MissingElement(format!("Ring-Kante {eid}")));
        }
        let faces = mesh.edge_faces(eid);
        if faces.is_empty() {
            return Err(MeshError::InvalidTopology(format!(
                "Ring-Kante {eid} ohne Fläche"
            )));
        }
        if faces.len() > 2 {
            return Err(MeshError::InvalidTopology(format!(
                "nicht-mannigfaltige Ring-Kante {eid}"
            )));
        }
        for &f in faces {
            if !seen_faces.insert(f) {
                continue;
            }
            let Some(face) = mesh.face(f) else {
                return Err(MeshError::MissingElement(format!("Ring-Fläche {f}")));
            };
            let positions: Vec<usize> = face
                .edges
                .iter()
                .enumerate()
                .filter(|(_, e)| ring_set.contains(*e))
                .map(|(i, _)| i)
                .collect();
            if positions.len() < 2 {
                continue;
            }
            if positions.len() > 2 || !face.is_quad() {
                return Err(MeshError::InvalidTopology(format!(
                    "Fläche {f} trägt {} Ring-Kanten",
                    positions.len()
                )));
            }
            if (positions[1] + 4 - positions[0]) % 4 != 2 {
                return Err(MeshError::InvalidTopology(format!(
                    "Ring-Kanten in Fläche {f} sind nicht parallel"
                )));
            }
            cuttable += 1;
        }
    }
    if cuttable == 0 {
        return Err(MeshError::InvalidTopology(
            "kein Quad für den Ring-Schnitt".into(),
        ));
    }
    Ok(())
}

fn cut_ring(
    mesh: &mut EditMesh,
    ring: &[EdgeId],
    created: &mut Vec<VertId>,
) -> Result<RingCutResult, MeshError> {
    let mut parents: Vec<(VertId, VertId)> = Vec::with_capacity(ring.len());
    // Fläche → bereits eingefügte Mittelpunkte; einfügereihenfolge-stabil,
    // damit die Schnitt-Reihenfolge dem Ring folgt
    let mut mids_by_face: IndexMap<FaceId, Vec<VertId>> = IndexMap::new();

    // Phase 1: jede Ring-Kante am Mittelpunkt teilen, anliegende Flächen
    // mit eingefügtem Mittelpunkt neu aufbauen
    for &eid in ring {
        let edge = mesh
            .edge(eid)
            .ok_or_else(|| MeshError::MissingElement(format!("Ring-Kante {eid}")))?;
        let [a, b] = edge.verts;
        let co_a = mesh
            .vert(a)
            .ok_or_else(|| MeshError::MissingElement(format!("Kanten-Vertex {a}")))?
            .co;
        let co_b = mesh
            .vert(b)
            .ok_or_else(|| MeshError::MissingElement(format!("Kanten-Vertex {b}")))?
            .co;

        let adj: Vec<FaceId> = mesh.edge_faces(eid).to_vec();
        let mut snapshots = Vec::with_capacity(adj.len());
        for &f in &adj {
            let face = mesh
                .face(f)
                .ok_or_else(|| MeshError::MissingElement(format!("Nachbar-Fläche {f}")))?;
            snapshots.push((f, face.verts.clone(), face.select, face.hide));
        }

        let mid = mesh.add_vert((co_a + co_b) / 2.0);
        created.push(mid);
        parents.push((a, b));

        for (f, _, _, _) in &snapshots {
            mesh.remove_face(*f)?;
        }
        mesh.remove_edge(eid)?;

        for (old_id, old_ring, select, hide) in snapshots {
            let new_ring = insert_midpoint(&old_ring, a, b, mid).ok_or_else(|| {
                MeshError::InvalidTopology(format!("Kante {a}-{b} nicht im Ring von {old_id}"))
            })?;
            let new_id = mesh.add_face(&new_ring)?;
            if let Some(face) = mesh.face_mut(new_id) {
                face.select = select;
                face.hide = hide;
            }
            let mut mids = mids_by_face.shift_remove(&old_id).unwrap_or_default();
            mids.push(mid);
            mids_by_face.insert(new_id, mids);
        }
    }

    // Phase 2: Flächen mit zwei Mittelpunkten (Sechsecke) in zwei Quads teilen
    let mut new_faces = Vec::new();
    for (f, mids) in mids_by_face {
        if mids.len() < 2 {
            // Nachbarfläche mit nur einem eingefügten Mittelpunkt bleibt stehen
            continue;
        }
        if mids.len() > 2 {
            return Err(MeshError::InvalidTopology(format!(
                "Fläche {f} trägt {} Ring-Schnitte",
                mids.len()
            )));
        }
        let face = mesh
            .face(f)
            .ok_or_else(|| MeshError::MissingElement(format!("Schnitt-Fläche {f}")))?;
        let ring_now = face.verts.clone();
        let (select, hide) = (face.select, face.hide);
        let n = ring_now.len();
        let i1 = ring_now
            .iter()
            .position(|v| *v == mids[0])
            .ok_or_else(|| MeshError::MissingElement(format!("Mittelpunkt {}", mids[0])))?;
        let i2 = ring_now
            .iter()
            .position(|v| *v == mids[1])
            .ok_or_else(|| MeshError::MissingElement(format!("Mittelpunkt {}", mids[1])))?;
        if n != 6 || (i2 + n - i1) % n != 3 {
            return Err(MeshError::InvalidTopology(format!(
                "Fläche {f} lässt sich nicht entlang der Mittelpunkte teilen"
            )));
        }

        let quad_a: Vec<VertId> = (0..=3).map(|k| ring_now[(i1 + k) % n]).collect();
        let quad_b: Vec<VertId> = (0..=3).map(|k| ring_now[(i2 + k) % n]).collect();

        mesh.remove_face(f)?;
        for quad in [quad_a, quad_b] {
            let new_id = mesh.add_face(&quad)?;
            if let Some(face) = mesh.face_mut(new_id) {
                face.select = select;
                face.hide = hide;
            }
            new_faces.push(new_id);
        }
    }

    Ok(RingCutResult {
        new_faces,
        new_verts: created.clone(),
        parents,
    })
}

/// Fügt `m` zwischen dem konsekutiven Paar `a`,`b` (beliebige Richtung)
/// in den zyklischen Ring ein.
fn insert_midpoint(ring: &[VertId], a: VertId, b: VertId, m: VertId) -> Option<Vec<VertId>> {
    let n = ring.len();
    for i in 0..n {
        let va = ring[i];
        let vb = ring[(i + 1) % n];
        if (va == a && vb == b) || (va == b && vb == a) {
            let mut out = Vec::with_capacity(n + 1);
            out.extend_from_slice(&ring[..=i]);
            out.push(m);
            out.extend_from_slice(&ring[i + 1..]);
            return Some(out);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ops::extrude::extrude_face_region;
    use glam::Vec3;

    /// Baut ein reguläres Quad-Gitter mit `nx` × `ny` Vertices.
    fn make_grid(nx: usize, ny: usize) -> (EditMesh, Vec<Vec<VertId>>) {
        let mut mesh = EditMesh::new();
        let mut verts = vec![vec![VertId(0); ny]; nx];
        for (x, column) in verts.iter_mut().enumerate() {
            for (y, slot) in column.iter_mut().enumerate() {
                *slot = mesh.add_vert(Vec3::new(x as f32, y as f32, 0.0));
            }
        }
        for x in 0..nx - 1 {
            for y in 0..ny - 1 {
                mesh.add_face(&[
                    verts[x][y],
                    verts[x + 1][y],
                    verts[x + 1][y + 1],
                    verts[x][y + 1],
                ])
                .unwrap();
            }
        }
        (mesh, verts)
    }

    #[test]
    fn test_walk_ring_on_5x5_grid_yields_one_edge_per_column() {
        let (mut mesh, verts) = make_grid(5, 5);
        let seed = mesh.edge_between(verts[0][0], verts[0][1]).unwrap();

        let ring = walk_edge_ring(&mut mesh, seed).unwrap();

        // Eine parallele Kante pro Spalte, jede genau einmal
        assert_eq!(ring.len(), 5);
        let unique: HashSet<EdgeId> = ring.iter().copied().collect();
        assert_eq!(unique.len(), 5);
        for x in 0..5 {
            let e = mesh.edge_between(verts[x][0], verts[x][1]).unwrap();
            assert!(unique.contains(&e), "Spalte {} fehlt im Ring", x);
        }
    }

    #[test]
    fn test_walk_ring_from_interior_seed_matches_boundary_seed() {
        let (mut mesh, verts) = make_grid(5, 5);
        let boundary_seed = mesh.edge_between(verts[0][2], verts[0][3]).unwrap();
        let interior_seed = mesh.edge_between(verts[2][2], verts[2][3]).unwrap();

        let from_boundary: HashSet<EdgeId> = walk_edge_ring(&mut mesh, boundary_seed)
            .unwrap()
            .into_iter()
            .collect();
        let from_interior: HashSet<EdgeId> = walk_edge_ring(&mut mesh, interior_seed)
            .unwrap()
            .into_iter()
            .collect();

        assert_eq!(from_boundary, from_interior);
    }

    #[test]
    fn test_walk_terminates_at_non_quad() {
        let mut mesh = EditMesh::new();
        let a = mesh.add_vert(Vec3::new(0.0, 0.0, 0.0));
        let b = mesh.add_vert(Vec3::new(0.0, 1.0, 0.0));
        let c = mesh.add_vert(Vec3::new(1.0, 1.0, 0.0));
        let d = mesh.add_vert(Vec3::new(1.0, 0.0, 0.0));
        let e = mesh.add_vert(Vec3::new(2.0, 0.5, 0.0));
        mesh.add_face(&[a, d, c, b]).unwrap();
        // Dreieck hinter der rechten Kante beendet den Walk
        mesh.add_face(&[d, e, c]).unwrap();

        let seed = mesh.edge_between(a, b).unwrap();
        let ring = walk_edge_ring(&mut mesh, seed).unwrap();

        let right = mesh.edge_between(c, d).unwrap();
        assert_eq!(ring.len(), 2);
        assert!(ring.contains(&seed));
        assert!(ring.contains(&right));
    }

    #[test]
    fn test_subdivide_ring_on_extruded_quad() {
        let mut mesh = EditMesh::new();
        let a = mesh.add_vert(Vec3::new(0.0, 0.0, 0.0));
        let b = mesh.add_vert(Vec3::new(1.0, 0.0, 0.0));
        let c = mesh.add_vert(Vec3::new(1.0, 1.0, 0.0));
        let d = mesh.add_vert(Vec3::new(0.0, 1.0, 0.0));
        let f = mesh.add_face(&[a, b, c, d]).unwrap();
        let extrusion = extrude_face_region(&mut mesh, &[f]).unwrap();

        // Vertikale Kante als Seed: Original-Vertex → Duplikat
        let new_a = extrusion.vert_map[&a];
        let seed = mesh.edge_between(a, new_a).unwrap();
        let ring = walk_edge_ring(&mut mesh, seed).unwrap();
        assert_eq!(ring.len(), 4, "geschlossener Ring um den Tubus");

        let before_faces = mesh.face_count();
        let result = subdivide_edge_ring(&mut mesh, &ring).unwrap();

        assert_eq!(result.new_verts.len(), 4);
        assert_eq!(result.new_faces.len(), 8);
        // 4 Seiten-Quads wurden durch 8 Hälften ersetzt
        assert_eq!(mesh.face_count(), before_faces + 4);

        // Eltern-Paare sind genau die Original/Duplikat-Paare
        for (pa, pb) in &result.parents {
            let pair_ok = extrusion.vert_map.get(pa) == Some(pb)
                || extrusion.vert_map.get(pb) == Some(pa);
            assert!(pair_ok, "Eltern-Paar {pa}/{pb} ist keine Vertikal-Kante");
        }

        // Mittelpunkte liegen exakt zwischen ihren Eltern
        for (mid, (pa, pb)) in result.new_verts.iter().zip(&result.parents) {
            let co_m = mesh.vert(*mid).unwrap().co;
            let co_a = mesh.vert(*pa).unwrap().co;
            let co_b = mesh.vert(*pb).unwrap().co;
            assert!((co_m - (co_a + co_b) / 2.0).length() < 1e-6);
        }
    }

    #[test]
    fn test_subdivide_empty_ring_fails() {
        let (mut mesh, _) = make_grid(3, 3);
        assert!(subdivide_edge_ring(&mut mesh, &[]).is_err());
    }

    #[test]
    fn test_subdivide_without_cuttable_quad_fails() {
        let mut mesh = EditMesh::new();
        let a = mesh.add_vert(Vec3::ZERO);
        let b = mesh.add_vert(Vec3::X);
        let c = mesh.add_vert(Vec3::Y);
        mesh.add_face(&[a, b, c]).unwrap();
        let e = mesh.edge_between(a, b).unwrap();

        let before = (mesh.vert_count(), mesh.edge_count(), mesh.face_count());
        assert!(subdivide_edge_ring(&mut mesh, &[e]).is_err());
        // Fehlgeschlagener Schnitt hinterlässt keine Teilgeometrie
        assert_eq!(
            before,
            (mesh.vert_count(), mesh.edge_count(), mesh.face_count())
        );
    }
}
