//! Nicht-destruktive Vorschau-Triangulation für das Host-Shading.
//!
//! Während des Falloff-Drags werden die Cap-Quads vorübergehend unplanar;
//! der Host shadet die Region deshalb über diese Dreiecksliste statt über
//! die Quads selbst. Die Topologie bleibt unangetastet — ein destruktives
//! Triangulieren würde die Quad-Ringe zerstören, auf denen jedes weitere
//! Segment-Einfügen aufbaut.

use crate::core::edit_mesh::EditMesh;
use crate::core::handle::FaceId;
use glam::Vec3;

/// Fächer-Triangulation der angegebenen Flächen als reine Positionsdaten.
///
/// Unbekannte Handles und degenerierte Ringe werden übersprungen.
pub fn preview_triangulation(mesh: &EditMesh, faces: &[FaceId]) -> Vec<[Vec3; 3]> {
    let mut triangles = Vec::new();
    for &f in faces {
        let Some(face) = mesh.face(f) else {
            continue;
        };
        if face.verts.len() < 3 {
            continue;
        }
        let mut positions = Vec::with_capacity(face.verts.len());
        let mut complete = true;
        for &v in &face.verts {
            match mesh.vert(v) {
                Some(vert) => positions.push(vert.co),
                None => {
                    complete = false;
                    break;
                }
            }
        }
        if !complete {
            continue;
        }
        for i in 1..positions.len() - 1 {
            triangles.push([positions[0], positions[i], positions[i + 1]]);
        }
    }
    triangles
}
