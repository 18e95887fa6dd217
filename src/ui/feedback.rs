//! Viewport-Feedback der laufenden Modal-Session.
//!
//! Die Session produziert nach jedem verarbeiteten Event reine
//! Anzeige-Daten; gezeichnet wird ausschließlich vom Host. Status- und
//! Header-Texte sind `Option` — `None` heißt "Anzeige löschen", genau
//! wie beim Session-Ende.

use glam::{Vec2, Vec3};

/// Cursor-Form, die der Host während der Session setzen soll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorShape {
    /// Host-Standard-Cursor
    #[default]
    Default,
    /// Scroll-Cursor während der aktiven Modal-Session
    ScrollXY,
}

/// 2D-Hilfslinie in Region-Pixeln, vom Drag-Ursprung zum Pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuideLine {
    pub from_px: Vec2,
    pub to_px: Vec2,
}

/// Gesammelte Anzeige-Daten eines Event-Durchlaufs.
#[derive(Debug, Clone, Default)]
pub struct ViewportFeedback {
    /// Text für die Status-Leiste (Tastenbelegung)
    pub status_text: Option<String>,
    /// Text für den Viewport-Header (Live-Werte)
    pub header_text: Option<String>,
    /// Gewünschte Cursor-Form
    pub cursor: CursorShape,
    /// Hilfslinie vom Drag-Ursprung zum Pointer
    pub guide: Option<GuideLine>,
    /// Vorschau-Triangulation der Cap-Region für das Shading
    pub preview_triangles: Vec<[Vec3; 3]>,
}

impl ViewportFeedback {
    /// Erstellt leeres Feedback (nichts anzeigen).
    pub fn new() -> Self {
        Self::default()
    }

    /// Löscht alle Anzeigen — beim Commit wie beim Revert.
    pub fn clear(&mut self) {
        self.status_text = None;
        self.header_text = None;
        self.cursor = CursorShape::Default;
        self.guide = None;
        self.preview_triangles.clear();
    }
}
