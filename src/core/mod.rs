//! Core-Domänentypen: Edit-Buffer, Element-Handles, Mesh-Operatoren, Viewport.

pub mod edit_mesh;
pub mod handle;
pub mod ops;
pub mod viewport;

pub use edit_mesh::{polygon_normal, Edge, EditMesh, Face, MeshError, Vert};
pub use handle::{EdgeId, FaceId, VertId};
pub use viewport::Viewport;
