//! Der zentrale Mesh-Edit-Buffer mit Vertices, Kanten, Flächen und Adjazenz.

use super::handle::{EdgeId, FaceId, VertId};
use glam::Vec3;
use indexmap::IndexMap;
use std::collections::{HashMap, HashSet};

/// Fehler auf Mesh-Ebene. Wird an der Tool-Grenze in die
/// Operator-Fehlertaxonomie übersetzt.
#[derive(Debug, Clone)]
pub enum MeshError {
    /// Handle zeigt auf ein gelöschtes oder fremdes Element.
    MissingElement(String),
    /// Topologie lässt die angeforderte Operation nicht zu.
    InvalidTopology(String),
}

impl std::fmt::Display for MeshError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingElement(msg) => write!(f, "Element nicht gefunden: {msg}"),
            Self::InvalidTopology(msg) => write!(f, "Ungültige Topologie: {msg}"),
        }
    }
}

impl std::error::Error for MeshError {}

/// Einzelner Vertex mit Position und Sichtbarkeits-/Selektions-Flags.
#[derive(Debug, Clone)]
pub struct Vert {
    pub id: VertId,
    /// Position in Welt-Koordinaten
    pub co: Vec3,
    pub select: bool,
    pub hide: bool,
}

/// Kante zwischen genau zwei Vertices.
#[derive(Debug, Clone)]
pub struct Edge {
    pub id: EdgeId,
    /// Endpunkte (Reihenfolge = Erstellung)
    pub verts: [VertId; 2],
    pub select: bool,
    pub hide: bool,
    /// Ephemeres Besucht-Flag für Ring-Walks (vor jedem Walk zurückgesetzt)
    pub tag: bool,
}

impl Edge {
    /// Gibt den jeweils anderen Endpunkt zurück.
    pub fn other_vert(&self, v: VertId) -> Option<VertId> {
        if self.verts[0] == v {
            Some(self.verts[1])
        } else if self.verts[1] == v {
            Some(self.verts[0])
        } else {
            None
        }
    }

    /// Prüft ob `v` ein Endpunkt dieser Kante ist.
    pub fn has_vert(&self, v: VertId) -> bool {
        self.verts[0] == v || self.verts[1] == v
    }
}

/// Polygon-Fläche mit geordnetem Vertex-Ring.
#[derive(Debug, Clone)]
pub struct Face {
    pub id: FaceId,
    /// Vertex-Ring in Winding-Reihenfolge
    pub verts: Vec<VertId>,
    /// Kanten-Ring: `edges[i]` verbindet `verts[i]` mit `verts[(i+1) % n]`
    pub edges: Vec<EdgeId>,
    /// Flächennormale (Newell), aktualisiert über `recalc_face_normals`
    pub normal: Vec3,
    pub select: bool,
    pub hide: bool,
}

impl Face {
    /// Prüft ob `v` im Vertex-Ring enthalten ist.
    pub fn has_vert(&self, v: VertId) -> bool {
        self.verts.contains(&v)
    }

    /// True wenn die Fläche ein Quad ist (Ring-Cuts sind nur durch Quads definiert).
    pub fn is_quad(&self) -> bool {
        self.verts.len() == 4
    }
}

/// Berechnet die Polygon-Normale nach Newell aus den Ring-Positionen.
pub fn polygon_normal(positions: &[Vec3]) -> Vec3 {
    let mut n = Vec3::ZERO;
    for i in 0..positions.len() {
        let a = positions[i];
        let b = positions[(i + 1) % positions.len()];
        n.x += (a.y - b.y) * (a.z + b.z);
        n.y += (a.z - b.z) * (a.x + b.x);
        n.z += (a.x - b.x) * (a.y + b.y);
    }
    n.normalize_or_zero()
}

/// Mesh-Edit-Buffer: Element-Arenen plus Adjazenz.
///
/// Alle Container sind einfügereihenfolge-stabil, damit Loop-Erkennung und
/// Selektionsabfragen deterministisch bleiben.
pub struct EditMesh {
    verts: IndexMap<VertId, Vert>,
    edges: IndexMap<EdgeId, Edge>,
    faces: IndexMap<FaceId, Face>,
    /// Vertex → inzidente Kanten (Einfügereihenfolge)
    vert_edges: HashMap<VertId, Vec<EdgeId>>,
    /// Kante → inzidente Flächen (Einfügereihenfolge)
    edge_faces: HashMap<EdgeId, Vec<FaceId>>,
    /// (min, max)-Vertexpaar → Kante für O(1)-Lookup
    edge_lookup: HashMap<(VertId, VertId), EdgeId>,
    /// Aktive Fläche (Host-Markierung, z.B. zuletzt angeklickt)
    active_face: Option<FaceId>,
    next_vert: u64,
    next_edge: u64,
    next_face: u64,
}

fn edge_key(a: VertId, b: VertId) -> (VertId, VertId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

impl EditMesh {
    /// Erstellt einen leeren Edit-Buffer.
    pub fn new() -> Self {
        Self {
            verts: IndexMap::new(),
            edges: IndexMap::new(),
            faces: IndexMap::new(),
            vert_edges: HashMap::new(),
            edge_faces: HashMap::new(),
            edge_lookup: HashMap::new(),
            active_face: None,
            next_vert: 1,
            next_edge: 1,
            next_face: 1,
        }
    }

    // ── Aufbau ───────────────────────────────────────────────────────

    /// Fügt einen Vertex hinzu.
    pub fn add_vert(&mut self, co: Vec3) -> VertId {
        let id = VertId(self.next_vert);
        self.next_vert += 1;
        self.verts.insert(
            id,
            Vert {
                id,
                co,
                select: false,
                hide: false,
            },
        );
        self.vert_edges.insert(id, Vec::new());
        id
    }

    /// Holt die Kante zwischen `a` und `b` oder legt sie neu an.
    fn ensure_edge(&mut self, a: VertId, b: VertId) -> Result<EdgeId, MeshError> {
        if !self.verts.contains_key(&a) || !self.verts.contains_key(&b) {
            return Err(MeshError::MissingElement(format!(
                "Kanten-Endpunkt {a} oder {b}"
            )));
        }
        if a == b {
            return Err(MeshError::InvalidTopology(format!(
                "degenerierte Kante an {a}"
            )));
        }
        if let Some(&e) = self.edge_lookup.get(&edge_key(a, b)) {
            return Ok(e);
        }
        let id = EdgeId(self.next_edge);
        self.next_edge += 1;
        self.edges.insert(
            id,
            Edge {
                id,
                verts: [a, b],
                select: false,
                hide: false,
                tag: false,
            },
        );
        self.edge_lookup.insert(edge_key(a, b), id);
        self.edge_faces.insert(id, Vec::new());
        if let Some(list) = self.vert_edges.get_mut(&a) {
            list.push(id);
        }
        if let Some(list) = self.vert_edges.get_mut(&b) {
            list.push(id);
        }
        Ok(id)
    }

    /// Fügt eine Fläche über ihren Vertex-Ring hinzu.
    ///
    /// Fehlende Kanten werden angelegt, die Normale per Newell berechnet.
    pub fn add_face(&mut self, ring: &[VertId]) -> Result<FaceId, MeshError> {
        if ring.len() < 3 {
            return Err(MeshError::InvalidTopology(format!(
                "Fläche braucht mindestens 3 Vertices, bekam {}",
                ring.len()
            )));
        }
        let unique: HashSet<VertId> = ring.iter().copied().collect();
        if unique.len() != ring.len() {
            return Err(MeshError::InvalidTopology(
                "doppelter Vertex im Flächen-Ring".into(),
            ));
        }

        let mut positions = Vec::with_capacity(ring.len());
        for v in ring {
            let vert = self
                .verts
                .get(v)
                .ok_or_else(|| MeshError::MissingElement(format!("Ring-Vertex {v}")))?;
            positions.push(vert.co);
        }

        let mut edges = Vec::with_capacity(ring.len());
        for i in 0..ring.len() {
            edges.push(self.ensure_edge(ring[i], ring[(i + 1) % ring.len()])?);
        }

        let id = FaceId(self.next_face);
        self.next_face += 1;
        self.faces.insert(
            id,
            Face {
                id,
                verts: ring.to_vec(),
                edges: edges.clone(),
                normal: polygon_normal(&positions),
                select: false,
                hide: false,
            },
        );
        for e in edges {
            if let Some(list) = self.edge_faces.get_mut(&e) {
                list.push(id);
            }
        }
        Ok(id)
    }

    // ── Entfernen ────────────────────────────────────────────────────

    /// Entfernt eine Fläche; Kanten und Vertices bleiben bestehen.
    pub fn remove_face(&mut self, id: FaceId) -> Result<Face, MeshError> {
        let face = self
            .faces
            .shift_remove(&id)
            .ok_or_else(|| MeshError::MissingElement(format!("Fläche {id}")))?;
        for e in &face.edges {
            if let Some(list) = self.edge_faces.get_mut(e) {
                list.retain(|f| *f != id);
            }
        }
        if self.active_face == Some(id) {
            self.active_face = None;
        }
        Ok(face)
    }

    /// Entfernt eine flächenlose Kante.
    pub fn remove_edge(&mut self, id: EdgeId) -> Result<(), MeshError> {
        let has_faces = self.edge_faces.get(&id).map_or(false, |l| !l.is_empty());
        if has_faces {
            return Err(MeshError::InvalidTopology(format!(
                "Kante {id} hat noch Flächen"
            )));
        }
        let edge = self
            .edges
            .shift_remove(&id)
            .ok_or_else(|| MeshError::MissingElement(format!("Kante {id}")))?;
        self.edge_faces.remove(&id);
        self.edge_lookup
            .remove(&edge_key(edge.verts[0], edge.verts[1]));
        for v in edge.verts {
            if let Some(list) = self.vert_edges.get_mut(&v) {
                list.retain(|e| *e != id);
            }
        }
        Ok(())
    }

    /// Entfernt einen kantenlosen Vertex.
    pub fn remove_vert(&mut self, id: VertId) -> Result<(), MeshError> {
        let has_edges = self.vert_edges.get(&id).map_or(false, |l| !l.is_empty());
        if has_edges {
            return Err(MeshError::InvalidTopology(format!(
                "Vertex {id} hat noch Kanten"
            )));
        }
        self.verts
            .shift_remove(&id)
            .ok_or_else(|| MeshError::MissingElement(format!("Vertex {id}")))?;
        self.vert_edges.remove(&id);
        Ok(())
    }

    // ── Zugriff ──────────────────────────────────────────────────────

    /// Liefert einen Vertex per Handle.
    pub fn vert(&self, id: VertId) -> Option<&Vert> {
        self.verts.get(&id)
    }

    /// Mutable Variante von [`EditMesh::vert`].
    pub fn vert_mut(&mut self, id: VertId) -> Option<&mut Vert> {
        self.verts.get_mut(&id)
    }

    /// Liefert eine Kante per Handle.
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(&id)
    }

    /// Mutable Variante von [`EditMesh::edge`].
    pub fn edge_mut(&mut self, id: EdgeId) -> Option<&mut Edge> {
        self.edges.get_mut(&id)
    }

    /// Liefert eine Fläche per Handle.
    pub fn face(&self, id: FaceId) -> Option<&Face> {
        self.faces.get(&id)
    }

    /// Mutable Variante von [`EditMesh::face`].
    pub fn face_mut(&mut self, id: FaceId) -> Option<&mut Face> {
        self.faces.get_mut(&id)
    }

    /// Iterator über alle Vertices (Einfügereihenfolge).
    pub fn iter_verts(&self) -> impl Iterator<Item = &Vert> {
        self.verts.values()
    }

    /// Iterator über alle Kanten (Einfügereihenfolge).
    pub fn iter_edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    /// Iterator über alle Flächen (Einfügereihenfolge).
    pub fn iter_faces(&self) -> impl Iterator<Item = &Face> {
        self.faces.values()
    }

    /// Anzahl der Vertices.
    pub fn vert_count(&self) -> usize {
        self.verts.len()
    }

    /// Anzahl der Kanten.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Anzahl der Flächen.
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    // ── Adjazenz ─────────────────────────────────────────────────────

    /// Inzidente Kanten eines Vertex (leer wenn unbekannt).
    pub fn vert_edges(&self, v: VertId) -> &[EdgeId] {
        self.vert_edges.get(&v).map(|l| l.as_slice()).unwrap_or(&[])
    }

    /// Inzidente Flächen einer Kante (leer wenn unbekannt).
    pub fn edge_faces(&self, e: EdgeId) -> &[FaceId] {
        self.edge_faces.get(&e).map(|l| l.as_slice()).unwrap_or(&[])
    }

    /// Findet die Kante zwischen zwei Vertices — O(1).
    pub fn edge_between(&self, a: VertId, b: VertId) -> Option<EdgeId> {
        self.edge_lookup.get(&edge_key(a, b)).copied()
    }

    // ── Flags & Markierungen ─────────────────────────────────────────

    /// Setzt alle Kanten-Besucht-Flags zurück (vor jedem Ring-Walk).
    pub fn clear_edge_tags(&mut self) {
        for edge in self.edges.values_mut() {
            edge.tag = false;
        }
    }

    /// Gibt die aktive Fläche zurück.
    pub fn active_face(&self) -> Option<FaceId> {
        self.active_face
    }

    /// Setzt oder löscht die aktive Fläche.
    pub fn set_active_face(&mut self, face: Option<FaceId>) {
        self.active_face = match face {
            Some(f) if self.faces.contains_key(&f) => Some(f),
            _ => None,
        };
    }

    /// IDs aller selektierten Flächen (Einfügereihenfolge).
    pub fn selected_face_ids(&self) -> Vec<FaceId> {
        self.faces
            .values()
            .filter(|f| f.select)
            .map(|f| f.id)
            .collect()
    }
}

impl Default for EditMesh {
    fn default() -> Self {
        Self::new()
    }
}
