//! PolyCap Editor Library.
//! Cap-Tool als Host-Erweiterung: Kern-Funktionalität als Library
//! exportiert für Host-Integration und Tests.

pub mod app;
pub mod core;
pub mod shared;
pub mod ui;

pub use app::{CapCommand, CapController, CapError, CapTool, CommandLog, ModalEvent, ModalKey, ModalStatus};
pub use core::{Edge, EditMesh, EdgeId, Face, FaceId, MeshError, Vert, VertId, Viewport};
pub use shared::CapOptions;
pub use ui::{CursorShape, GuideLine, ViewportFeedback};
