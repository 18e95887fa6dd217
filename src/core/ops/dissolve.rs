//! Dissolve-Operatoren: Kanten und Vertices entfernen ohne Löcher.
//!
//! Wird vom Segment-Entfernen des Cap-Tools benutzt: erst verschmelzen
//! die Loop-Ringkanten die anliegenden Quad-Paare, dann räumt das
//! Vertex-Dissolve die übrig gebliebenen Zweikant-Vertices ab und stellt
//! die Quads wieder her.

use crate::core::edit_mesh::{EditMesh, MeshError};
use crate::core::handle::{EdgeId, FaceId, VertId};

/// Löst Kanten auf, indem die beiden anliegenden Flächen verschmolzen werden.
///
/// Kanten ohne genau zwei Flächen werden übersprungen (Rand- oder
/// Drahtkanten lassen sich nicht verschmelzen).
pub fn dissolve_edges(mesh: &mut EditMesh, edges: &[EdgeId]) -> Result<(), MeshError> {
    for &eid in edges {
        let Some(edge) = mesh.edge(eid) else {
            log::debug!("Dissolve: Kante {eid} existiert nicht mehr");
            continue;
        };
        let [a, b] = edge.verts;
        let adjacent: Vec<FaceId> = mesh.edge_faces(eid).to_vec();
        if adjacent.len() != 2 {
            log::debug!(
                "Dissolve: Kante {eid} hat {} Flächen, übersprungen",
                adjacent.len()
            );
            continue;
        }

        let fa = mesh
            .face(adjacent[0])
            .ok_or_else(|| MeshError::MissingElement(format!("Fläche {}", adjacent[0])))?;
        let fb = mesh
            .face(adjacent[1])
            .ok_or_else(|| MeshError::MissingElement(format!("Fläche {}", adjacent[1])))?;
        let (ring_a, sel_a, hide_a) = (fa.verts.clone(), fa.select, fa.hide);
        let (ring_b, sel_b, hide_b) = (fb.verts.clone(), fb.select, fb.hide);

        let merged = merge_rings(&ring_a, &ring_b, a, b).ok_or_else(|| {
            MeshError::InvalidTopology(format!("Kante {eid} liegt nicht konsistent in beiden Ringen"))
        })?;

        mesh.remove_face(adjacent[0])?;
        mesh.remove_face(adjacent[1])?;
        mesh.remove_edge(eid)?;
        let merged_id = mesh.add_face(&merged)?;
        if let Some(face) = mesh.face_mut(merged_id) {
            face.select = sel_a || sel_b;
            face.hide = hide_a && hide_b;
        }
    }
    Ok(())
}

/// Löst Zweikant-Vertices auf: die beiden Kanten verschmelzen zu einer,
/// der Vertex verschwindet aus allen anliegenden Flächen-Ringen.
///
/// Vertices mit anderer Valenz werden übersprungen.
pub fn dissolve_verts(mesh: &mut EditMesh, verts: &[VertId]) -> Result<(), MeshError> {
    for &vid in verts {
        if mesh.vert(vid).is_none() {
            log::debug!("Dissolve: Vertex {vid} existiert nicht mehr");
            continue;
        }
        let incident: Vec<EdgeId> = mesh.vert_edges(vid).to_vec();
        if incident.len() != 2 {
            log::debug!(
                "Dissolve: Vertex {vid} hat Valenz {}, übersprungen",
                incident.len()
            );
            continue;
        }
        let e1 = incident[0];
        let e2 = incident[1];
        let x = mesh
            .edge(e1)
            .and_then(|e| e.other_vert(vid))
            .ok_or_else(|| MeshError::MissingElement(format!("Kante {e1}")))?;
        let y = mesh
            .edge(e2)
            .and_then(|e| e.other_vert(vid))
            .ok_or_else(|| MeshError::MissingElement(format!("Kante {e2}")))?;
        if x == y {
            log::debug!("Dissolve: Vertex {vid} liegt auf einer Doppelkante, übersprungen");
            continue;
        }

        // Jede Fläche mit vid nutzt beide Kanten (Valenz 2)
        let affected: Vec<FaceId> = mesh.edge_faces(e1).to_vec();

        let mut rebuilt = Vec::with_capacity(affected.len());
        let mut valid = true;
        for &f in &affected {
            let face = mesh
                .face(f)
                .ok_or_else(|| MeshError::MissingElement(format!("Fläche {f}")))?;
            let ring: Vec<VertId> = face.verts.iter().copied().filter(|v| *v != vid).collect();
            if ring.len() < 3 {
                valid = false;
                break;
            }
            rebuilt.push((f, ring, face.select, face.hide));
        }
        if !valid {
            log::debug!("Dissolve: Vertex {vid} würde eine Fläche degenerieren, übersprungen");
            continue;
        }

        for (f, _, _, _) in &rebuilt {
            mesh.remove_face(*f)?;
        }
        mesh.remove_edge(e1)?;
        mesh.remove_edge(e2)?;
        for (_, ring, select, hide) in rebuilt {
            let new_id = mesh.add_face(&ring)?;
            if let Some(face) = mesh.face_mut(new_id) {
                face.select = select;
                face.hide = hide;
            }
        }
        mesh.remove_vert(vid)?;
    }
    Ok(())
}

/// Verschmilzt zwei Flächen-Ringe entlang ihrer gemeinsamen Kante `a`-`b`.
fn merge_rings(ring_a: &[VertId], ring_b: &[VertId], a: VertId, b: VertId) -> Option<Vec<VertId>> {
    let na = ring_a.len();
    let nb = ring_b.len();

    // Position der Kante in Ring A (a→b oder b→a)
    let ia = (0..na).find(|&i| {
        let pair = (ring_a[i], ring_a[(i + 1) % na]);
        pair == (a, b) || pair == (b, a)
    })?;
    let second = ring_a[(ia + 1) % na];
    let first = ring_a[ia];

    // Ring A ab dem zweiten Endpunkt vollständig ablaufen: [second, …, first]
    let mut out: Vec<VertId> = (0..na).map(|k| ring_a[(ia + 1 + k) % na]).collect();

    // Ring B muss die Kante in Gegenrichtung tragen; sonst Winding angleichen
    let oriented: Vec<VertId>;
    let ring_b: &[VertId] = if find_pair(ring_b, second, first).is_some() {
        ring_b
    } else {
        oriented = ring_b.iter().rev().copied().collect();
        find_pair(&oriented, second, first)?;
        oriented.as_slice()
    };

    // Innere Vertices von B zwischen first und second anhängen
    let jb = find_pair(ring_b, second, first)?;
    for k in 0..nb - 2 {
        out.push(ring_b[(jb + 2 + k) % nb]);
    }
    Some(out)
}

fn find_pair(ring: &[VertId], a: VertId, b: VertId) -> Option<usize> {
    let n = ring.len();
    (0..n).find(|&i| ring[i] == a && ring[(i + 1) % n] == b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    /// Zwei Quads mit gemeinsamer Mittelkante b-e.
    fn two_quads() -> (EditMesh, EdgeId, VertId, VertId) {
        let mut mesh = EditMesh::new();
        let a = mesh.add_vert(Vec3::new(0.0, 0.0, 0.0));
        let b = mesh.add_vert(Vec3::new(1.0, 0.0, 0.0));
        let c = mesh.add_vert(Vec3::new(2.0, 0.0, 0.0));
        let d = mesh.add_vert(Vec3::new(2.0, 1.0, 0.0));
        let e = mesh.add_vert(Vec3::new(1.0, 1.0, 0.0));
        let g = mesh.add_vert(Vec3::new(0.0, 1.0, 0.0));
        mesh.add_face(&[a, b, e, g]).unwrap();
        mesh.add_face(&[b, c, d, e]).unwrap();
        let shared = mesh.edge_between(b, e).unwrap();
        (mesh, shared, b, e)
    }

    #[test]
    fn test_dissolve_edge_merges_quads() {
        let (mut mesh, shared, _, _) = two_quads();
        dissolve_edges(&mut mesh, &[shared]).unwrap();

        assert_eq!(mesh.face_count(), 1);
        assert_eq!(mesh.edge_count(), 6);
        let merged = mesh.iter_faces().next().unwrap();
        assert_eq!(merged.verts.len(), 6);
    }

    #[test]
    fn test_dissolve_boundary_edge_is_skipped() {
        let (mut mesh, _, b, _) = two_quads();
        let a = mesh.iter_verts().next().unwrap().id;
        let boundary = mesh.edge_between(a, b).unwrap();

        dissolve_edges(&mut mesh, &[boundary]).unwrap();
        assert_eq!(mesh.face_count(), 2);
    }

    #[test]
    fn test_dissolve_vert_restores_quad() {
        let (mut mesh, shared, b, e) = two_quads();
        dissolve_edges(&mut mesh, &[shared]).unwrap();
        dissolve_verts(&mut mesh, &[b, e]).unwrap();

        // Sechseck kollabiert zurück zum äußeren Quad
        assert_eq!(mesh.face_count(), 1);
        let face = mesh.iter_faces().next().unwrap();
        assert_eq!(face.verts.len(), 4);
        assert_eq!(mesh.vert_count(), 4);
        assert_eq!(mesh.edge_count(), 4);
    }

    #[test]
    fn test_dissolve_vert_with_high_valence_is_skipped() {
        let (mut mesh, _, b, _) = two_quads();
        // b hat Valenz 3 (zwei Randkanten + Mittelkante)
        dissolve_verts(&mut mesh, &[b]).unwrap();
        assert!(mesh.vert(b).is_some());
        assert_eq!(mesh.face_count(), 2);
    }
}
