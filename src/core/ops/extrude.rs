//! Region-Extrusion: dupliziert eine Flächengruppe und näht Seiten-Quads an.

use crate::core::edit_mesh::{EditMesh, MeshError};
use crate::core::handle::{FaceId, VertId};
use std::collections::{HashMap, HashSet};

/// Ergebnis einer Region-Extrusion.
#[derive(Debug, Clone)]
pub struct ExtrudeResult {
    /// Neue Vertices in deterministischer Reihenfolge (Erst-Vorkommen im Region-Ring)
    pub new_verts: Vec<VertId>,
    /// Zuordnung Quell-Vertex → duplizierter Vertex
    pub vert_map: HashMap<VertId, VertId>,
    /// Neue Flächen: erst die Deckel-Kopien, dann die Seiten-Quads
    pub new_faces: Vec<FaceId>,
}

/// Extrudiert eine Flächenregion mit Versatz null.
///
/// Die Region-Vertices werden an Ort und Stelle dupliziert, jede
/// Region-Fläche auf den Duplikaten neu aufgebaut und pro Rand-Kante ein
/// Seiten-Quad eingenäht. Die Originalflächen bleiben unangetastet — der
/// Aufrufer entscheidet beim Abschluss, ob sie gelöscht oder
/// wiederhergestellt werden.
pub fn extrude_face_region(
    mesh: &mut EditMesh,
    faces: &[FaceId],
) -> Result<ExtrudeResult, MeshError> {
    if faces.is_empty() {
        return Err(MeshError::InvalidTopology(
            "Extrusion ohne Region-Flächen".into(),
        ));
    }
    let region: HashSet<FaceId> = faces.iter().copied().collect();

    // Ring-Daten vor jeder Mutation einsammeln
    let mut face_rings = Vec::with_capacity(faces.len());
    for &f in faces {
        let face = mesh
            .face(f)
            .ok_or_else(|| MeshError::MissingElement(format!("Region-Fläche {f}")))?;
        face_rings.push((face.verts.clone(), face.edges.clone()));
    }

    // Vertex-Union in Erst-Vorkommen-Reihenfolge
    let mut old_verts: Vec<VertId> = Vec::new();
    let mut seen: HashSet<VertId> = HashSet::new();
    for (ring, _) in &face_rings {
        for &v in ring {
            if seen.insert(v) {
                old_verts.push(v);
            }
        }
    }

    // Rand-Kanten: genau eine Region-Fläche teilt sie.
    // Die Winding-Richtung der besitzenden Fläche bestimmt die Quad-Orientierung.
    let mut boundary: Vec<(VertId, VertId)> = Vec::new();
    for (ring, edges) in &face_rings {
        for i in 0..ring.len() {
            let region_count = mesh
                .edge_faces(edges[i])
                .iter()
                .filter(|f| region.contains(*f))
                .count();
            if region_count == 1 {
                boundary.push((ring[i], ring[(i + 1) % ring.len()]));
            }
        }
    }

    // Vertices duplizieren
    let mut vert_map: HashMap<VertId, VertId> = HashMap::with_capacity(old_verts.len());
    let mut new_verts = Vec::with_capacity(old_verts.len());
    for &v in &old_verts {
        let co = mesh
            .vert(v)
            .ok_or_else(|| MeshError::MissingElement(format!("Region-Vertex {v}")))?
            .co;
        let nv = mesh.add_vert(co);
        vert_map.insert(v, nv);
        new_verts.push(nv);
    }

    let mapped = |vert_map: &HashMap<VertId, VertId>, v: VertId| -> Result<VertId, MeshError> {
        vert_map
            .get(&v)
            .copied()
            .ok_or_else(|| MeshError::MissingElement(format!("Duplikat von {v}")))
    };

    // Deckel-Kopien mit identischem Winding
    let mut new_faces = Vec::new();
    for (ring, _) in &face_rings {
        let mut top = Vec::with_capacity(ring.len());
        for &v in ring {
            top.push(mapped(&vert_map, v)?);
        }
        new_faces.push(mesh.add_face(&top)?);
    }

    // Seiten-Quads entlang des Randes
    for (va, vb) in boundary {
        let quad = [va, vb, mapped(&vert_map, vb)?, mapped(&vert_map, va)?];
        new_faces.push(mesh.add_face(&quad)?);
    }

    Ok(ExtrudeResult {
        new_verts,
        vert_map,
        new_faces,
    })
}
