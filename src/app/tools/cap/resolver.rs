//! Face-Group-Resolver: zerlegt die Selektion in Zusammenhangsgruppen
//! und wählt die dominante Gruppe als Ursprungsregion.

use super::super::CapError;
use crate::core::{EditMesh, FaceId, VertId};
use glam::Vec3;
use indexmap::IndexSet;

/// Ergebnis der Ursprungs-Auflösung.
pub(crate) struct ResolvedOrigin {
    /// Flächen der dominanten Gruppe, aktive Fläche zuerst
    pub faces: Vec<FaceId>,
    /// Vertex-Union der Gruppe
    pub start_verts: IndexSet<VertId>,
    /// Mittel der Flächennormalen
    pub avg_normal: Vec3,
}

/// In Aufbau befindliche Zusammenhangsgruppe.
struct FaceGroup {
    faces: Vec<FaceId>,
    verts: IndexSet<VertId>,
}

impl FaceGroup {
    fn shared_verts(&self, ring: &[VertId]) -> usize {
        ring.iter().filter(|v| self.verts.contains(*v)).count()
    }
}

/// Partitioniert die selektierten Flächen in Gruppen (Adjazenz = ≥2
/// gemeinsame Vertices), wählt die größte Gruppe und bereitet sie als
/// Ursprungsregion vor.
///
/// Seiteneffekte auf dem Mesh: Flächen der übrigen Gruppen werden
/// deselektiert; die Ursprungsflächen werden versteckt und deselektiert,
/// ihre Randkanten versteckt (innere Kanten bleiben sichtbar, damit die
/// Silhouette sauber bleibt); die aktive Fläche wird gelöscht.
pub(crate) fn resolve_origin(mesh: &mut EditMesh) -> Result<ResolvedOrigin, CapError> {
    let selected = mesh.selected_face_ids();
    if selected.is_empty() {
        return Err(CapError::NoFacesSelected);
    }

    // Union-Find per Scan: jede Fläche verschmilzt alle Gruppen, mit
    // denen sie ≥2 Vertices teilt. O(Flächen × Gruppen) — Selektionen
    // sind handverlesen klein.
    let mut groups: Vec<FaceGroup> = Vec::new();
    for &f in &selected {
        let ring = match mesh.face(f) {
            Some(face) => face.verts.clone(),
            None => continue,
        };
        let matches: Vec<usize> = groups
            .iter()
            .enumerate()
            .filter(|(_, g)| g.shared_verts(&ring) >= 2)
            .map(|(i, _)| i)
            .collect();

        match matches.split_first() {
            None => {
                let mut verts = IndexSet::new();
                verts.extend(ring.iter().copied());
                groups.push(FaceGroup {
                    faces: vec![f],
                    verts,
                });
            }
            Some((&base, rest)) => {
                // Getroffene Gruppen von hinten nach vorn in die erste mergen
                for &idx in rest.iter().rev() {
                    let absorbed = groups.remove(idx);
                    groups[base].faces.extend(absorbed.faces);
                    groups[base].verts.extend(absorbed.verts);
                }
                groups[base].faces.push(f);
                groups[base].verts.extend(ring.iter().copied());
            }
        }
    }

    if groups.is_empty() {
        return Err(CapError::NoFacesSelected);
    }

    // Dominante Gruppe: meiste Flächen, bei Gleichstand die zuerst gebaute
    let mut dominant_idx = 0;
    for (i, g) in groups.iter().enumerate() {
        if g.faces.len() > groups[dominant_idx].faces.len() {
            dominant_idx = i;
        }
    }

    if groups[dominant_idx].faces.len() == mesh.face_count() {
        return Err(CapError::SelectionTooLarge);
    }

    // Übrige Gruppen deselektieren, im Mesh aber unangetastet lassen
    for (i, g) in groups.iter().enumerate() {
        if i == dominant_idx {
            continue;
        }
        for &f in &g.faces {
            if let Some(face) = mesh.face_mut(f) {
                face.select = false;
            }
        }
    }
    if groups.len() > 1 {
        log::debug!(
            "Selektion zerfällt in {} Gruppen, dominante hat {} Flächen",
            groups.len(),
            groups[dominant_idx].faces.len()
        );
    }

    let dominant = groups.swap_remove(dominant_idx);
    let mut faces = dominant.faces;
    let start_verts = dominant.verts;

    // Aktive Fläche an den Anfang der Liste
    if let Some(active) = mesh.active_face() {
        if let Some(pos) = faces.iter().position(|f| *f == active) {
            if pos > 0 {
                faces.remove(pos);
                faces.insert(0, active);
            }
        }
    }
    mesh.set_active_face(None);

    // Mittlere Normale (Mittel der Einheitsnormalen, nicht renormiert)
    let mut normal_sum = Vec3::ZERO;
    for &f in &faces {
        if let Some(face) = mesh.face(f) {
            normal_sum += face.normal;
        }
    }
    let avg_normal = normal_sum / faces.len() as f32;

    // Ursprungsflächen verstecken und deselektieren
    for &f in &faces {
        if let Some(face) = mesh.face_mut(f) {
            face.select = false;
            face.hide = true;
        }
    }

    // Nur Randkanten verstecken: innere Kanten teilen zwei Gruppenflächen
    let origin_set: IndexSet<FaceId> = faces.iter().copied().collect();
    let mut boundary_edges = Vec::new();
    for &f in &faces {
        let edges = match mesh.face(f) {
            Some(face) => face.edges.clone(),
            None => continue,
        };
        for e in edges {
            let origin_count = mesh
                .edge_faces(e)
                .iter()
                .filter(|fid| origin_set.contains(*fid))
                .count();
            if origin_count == 1 {
                boundary_edges.push(e);
            }
        }
    }
    for e in boundary_edges {
        if let Some(edge) = mesh.edge_mut(e) {
            edge.hide = true;
        }
    }

    Ok(ResolvedOrigin {
        faces,
        start_verts,
        avg_normal,
    })
}
