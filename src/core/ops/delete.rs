//! Lösch-Operatoren mit transitiver Aufräum-Semantik.

use crate::core::edit_mesh::{EditMesh, MeshError};
use crate::core::handle::{EdgeId, FaceId, VertId};
use std::collections::HashSet;

/// Löscht Vertices samt aller inzidenten Kanten und Flächen.
///
/// Entspricht dem Revert-Pfad des Cap-Tools: alle Loop-Vertices löschen
/// reißt die gesamte neue Geometrie mit.
pub fn delete_verts(mesh: &mut EditMesh, verts: &[VertId]) -> Result<(), MeshError> {
    let vset: HashSet<VertId> = verts.iter().copied().collect();
    if vset.is_empty() {
        return Ok(());
    }

    let doomed_faces: Vec<FaceId> = mesh
        .iter_faces()
        .filter(|f| f.verts.iter().any(|v| vset.contains(v)))
        .map(|f| f.id)
        .collect();
    for f in doomed_faces {
        mesh.remove_face(f)?;
    }

    let mut doomed_edges: Vec<EdgeId> = Vec::new();
    let mut seen: HashSet<EdgeId> = HashSet::new();
    for &v in &vset {
        for &e in mesh.vert_edges(v) {
            if seen.insert(e) {
                doomed_edges.push(e);
            }
        }
    }
    for e in doomed_edges {
        mesh.remove_edge(e)?;
    }

    for &v in verts {
        if mesh.vert(v).is_some() {
            mesh.remove_vert(v)?;
        }
    }
    Ok(())
}

/// Löscht Flächen und räumt danach verwaiste Kanten und Vertices ab.
///
/// Entspricht dem Commit-Pfad des Cap-Tools: die Ursprungsflächen
/// verschwinden, gemeinsam genutzte Randgeometrie bleibt bestehen.
pub fn delete_faces_with_orphans(mesh: &mut EditMesh, faces: &[FaceId]) -> Result<(), MeshError> {
    let mut affected_edges: Vec<EdgeId> = Vec::new();
    let mut affected_verts: Vec<VertId> = Vec::new();
    let mut seen_e: HashSet<EdgeId> = HashSet::new();
    let mut seen_v: HashSet<VertId> = HashSet::new();
    let mut seen_f: HashSet<FaceId> = HashSet::new();

    for &f in faces {
        if !seen_f.insert(f) {
            continue;
        }
        let face = mesh
            .face(f)
            .ok_or_else(|| MeshError::MissingElement(format!("Fläche {f}")))?;
        for &e in &face.edges {
            if seen_e.insert(e) {
                affected_edges.push(e);
            }
        }
        for &v in &face.verts {
            if seen_v.insert(v) {
                affected_verts.push(v);
            }
        }
    }

    for &f in &seen_f {
        // seen_f ist ein HashSet; Reihenfolge egal, Entfernen ist idempotent geprüft
        if mesh.face(f).is_some() {
            mesh.remove_face(f)?;
        }
    }

    for e in affected_edges {
        if mesh.edge(e).is_some() && mesh.edge_faces(e).is_empty() {
            mesh.remove_edge(e)?;
        }
    }
    for v in affected_verts {
        if mesh.vert(v).is_some() && mesh.vert_edges(v).is_empty() {
            mesh.remove_vert(v)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn two_quads() -> (EditMesh, FaceId, FaceId, Vec<VertId>) {
        let mut mesh = EditMesh::new();
        let a = mesh.add_vert(Vec3::new(0.0, 0.0, 0.0));
        let b = mesh.add_vert(Vec3::new(1.0, 0.0, 0.0));
        let c = mesh.add_vert(Vec3::new(2.0, 0.0, 0.0));
        let d = mesh.add_vert(Vec3::new(2.0, 1.0, 0.0));
        let e = mesh.add_vert(Vec3::new(1.0, 1.0, 0.0));
        let g = mesh.add_vert(Vec3::new(0.0, 1.0, 0.0));
        let f1 = mesh.add_face(&[a, b, e, g]).unwrap();
        let f2 = mesh.add_face(&[b, c, d, e]).unwrap();
        (mesh, f1, f2, vec![a, b, c, d, e, g])
    }

    #[test]
    fn test_delete_verts_removes_incident_geometry() {
        let (mut mesh, _, _, verts) = two_quads();
        // b und e löschen reißt beide Quads mit
        delete_verts(&mut mesh, &[verts[1], verts[4]]).unwrap();

        assert_eq!(mesh.face_count(), 0);
        assert_eq!(mesh.vert_count(), 4);
        assert_eq!(mesh.edge_count(), 2);
    }

    #[test]
    fn test_delete_faces_with_orphans_keeps_shared_geometry() {
        let (mut mesh, f1, _, verts) = two_quads();
        delete_faces_with_orphans(&mut mesh, &[f1]).unwrap();

        // a und g verlieren alle Kanten und verschwinden,
        // die mit f2 geteilte Kante b-e bleibt
        assert_eq!(mesh.face_count(), 1);
        assert_eq!(mesh.vert_count(), 4);
        assert!(mesh.vert(verts[0]).is_none());
        assert!(mesh.vert(verts[5]).is_none());
        assert!(mesh.edge_between(verts[1], verts[4]).is_some());
    }

    #[test]
    fn test_delete_all_faces_empties_mesh() {
        let (mut mesh, f1, f2, _) = two_quads();
        delete_faces_with_orphans(&mut mesh, &[f1, f2]).unwrap();

        assert_eq!(mesh.face_count(), 0);
        assert_eq!(mesh.edge_count(), 0);
        assert_eq!(mesh.vert_count(), 0);
    }
}
