//! Neuberechnung von Flächennormalen aus den aktuellen Vertex-Positionen.

use crate::core::edit_mesh::{polygon_normal, EditMesh, MeshError};
use crate::core::handle::FaceId;

/// Berechnet die Normalen der angegebenen Flächen neu (Newell).
///
/// Wird nach jedem Falloff-Durchlauf für die Cap-Region und beim Revert
/// für die Ursprungsflächen aufgerufen — die Extrusion kann Normalen
/// kippen.
pub fn recalc_face_normals(mesh: &mut EditMesh, faces: &[FaceId]) -> Result<(), MeshError> {
    for &f in faces {
        let face = mesh
            .face(f)
            .ok_or_else(|| MeshError::MissingElement(format!("Fläche {f}")))?;
        let mut positions = Vec::with_capacity(face.verts.len());
        for &v in &face.verts {
            let vert = mesh
                .vert(v)
                .ok_or_else(|| MeshError::MissingElement(format!("Ring-Vertex {v}")))?;
            positions.push(vert.co);
        }
        let normal = polygon_normal(&positions);
        if let Some(face) = mesh.face_mut(f) {
            face.normal = normal;
        }
    }
    Ok(())
}
