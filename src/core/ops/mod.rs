//! Mesh-Operatoren auf dem Edit-Buffer.
//!
//! Jeder Operator mutiert das Mesh als Ganzes und gibt reine Daten zurück;
//! Selektions- und Sichtbarkeits-Flags setzt der Aufrufer.

pub mod delete;
pub mod dissolve;
pub mod edge_ring;
pub mod extrude;
pub mod normals;
pub mod triangulate;

pub use delete::{delete_faces_with_orphans, delete_verts};
pub use dissolve::{dissolve_edges, dissolve_verts};
pub use edge_ring::{subdivide_edge_ring, walk_edge_ring, RingCutResult};
pub use extrude::{extrude_face_region, ExtrudeResult};
pub use normals::recalc_face_normals;
pub use triangulate::preview_triangulation;
