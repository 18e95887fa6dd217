//! Viewport-Metriken: Umrechnung von Pointer-Pixeln in Welt-Distanzen.

use glam::Vec2;

/// Viewport-Zustand, den der Host pro Modal-Session liefert.
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    /// Region-Breite in Pixeln
    pub width_px: f32,
    /// Region-Höhe in Pixeln
    pub height_px: f32,
    /// Betrachtungsdistanz der 3D-View in Welt-Einheiten
    pub view_distance: f32,
}

impl Viewport {
    /// Erstellt einen Viewport mit expliziten Maßen.
    pub fn new(width_px: f32, height_px: f32, view_distance: f32) -> Self {
        Self {
            width_px,
            height_px,
            view_distance,
        }
    }

    /// Rechnet eine Pointer-Drag-Strecke in eine Welt-Distanz um.
    ///
    /// Pixel-Distanz relativ zur mittleren Region-Ausdehnung, skaliert mit
    /// der Betrachtungsdistanz — eine Näherung, die sich mit dem Zoom der
    /// View mitbewegt.
    pub fn drag_world_distance(&self, from_px: Vec2, to_px: Vec2) -> f32 {
        let extent = ((self.width_px + self.height_px) / 2.0).max(1.0);
        let ratio = (to_px - from_px).length() / extent;
        ratio * self.view_distance
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 720.0, 10.0)
    }
}
