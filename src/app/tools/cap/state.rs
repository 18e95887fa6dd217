//! Session-Zustand des Cap-Tools.

use crate::app::command_log::CommandLog;
use crate::core::{EditMesh, FaceId, VertId, Viewport};
use crate::shared::CapOptions;
use crate::ui::ViewportFeedback;
use glam::{Vec2, Vec3};
use indexmap::IndexSet;

/// Lebenszyklus einer Modal-Session.
///
/// `Committing` und `Reverting` sind transient — sie liegen innerhalb
/// eines Event-Durchlaufs und enden immer in `Terminated`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SessionPhase {
    /// Session nimmt Events entgegen
    Active,
    /// Ursprungsflächen werden gelöscht (Bestätigung)
    Committing,
    /// Neue Geometrie wird verworfen, Ursprung wiederhergestellt
    Reverting,
    /// Session ist abgeschlossen, Events werden abgelehnt
    Terminated,
}

/// Laufende Cap-Tool-Session.
///
/// Besitzt Loops, Koordinaten-Snapshots und Ursprungsflächen exklusiv
/// für ihre Lebensdauer; der Host besitzt das Mesh selbst. Die Session
/// überlebt keine Modal-Interaktion.
pub struct CapTool {
    pub(crate) phase: SessionPhase,
    /// Viewport-Maße für die Pixel→Welt-Umrechnung
    pub(crate) viewport: Viewport,
    /// Arbeitskopie der Parameter (mutiert durch Events)
    pub(crate) options: CapOptions,
    /// Persistierte Ausgangswerte für Reset
    pub(crate) defaults: CapOptions,
    /// Pointer-Position beim Aufruf (Drag-Ursprung)
    pub(crate) init_pointer: Vec2,
    /// Zuletzt gesehene Pointer-Position
    pub(crate) last_pointer: Vec2,
    /// Mittlere Normale der Ursprungsflächen
    pub(crate) avg_normal: Vec3,
    /// Ursprungsflächen, aktive Fläche zuerst
    pub(crate) origin_faces: Vec<FaceId>,
    /// Vertex-Union der Ursprungsflächen (unverschobener Rand)
    pub(crate) start_verts: IndexSet<VertId>,
    /// Loops vom Rand (Index 0) zur Kappenspitze (letzter Index)
    pub(crate) loops: Vec<Vec<VertId>>,
    /// Ruhelagen-Snapshot parallel zu `loops`
    pub(crate) init_loop_co: Vec<Vec<Vec3>>,
    /// Alle in dieser Session erzeugten Vertices (Revert-Registry)
    pub(crate) known_verts: IndexSet<VertId>,
    /// Gepufferte Ziffern der Zahleneingabe
    pub(crate) numeric_buffer: String,
    /// Verlauf ausgeführter Commands
    pub command_log: CommandLog,
    /// Anzeige-Daten für den Host
    pub feedback: ViewportFeedback,
}

impl CapTool {
    /// Aktuelle Segmentanzahl.
    pub fn segment_count(&self) -> u32 {
        self.options.segment_count
    }

    /// Arbeitskopie der Parameter (für Persistierung nach Bestätigung).
    pub fn options(&self) -> &CapOptions {
        &self.options
    }

    /// Gepufferte Zahleneingabe.
    pub fn numeric_buffer(&self) -> &str {
        &self.numeric_buffer
    }

    /// True solange die Session Events annimmt.
    pub fn is_active(&self) -> bool {
        self.phase == SessionPhase::Active
    }

    /// Loops vom Rand zur Spitze (read-only).
    pub fn loops(&self) -> &[Vec<VertId>] {
        &self.loops
    }

    /// Ruhelagen-Snapshots parallel zu [`CapTool::loops`].
    pub fn initial_coordinates(&self) -> &[Vec<Vec3>] {
        &self.init_loop_co
    }

    /// Mittlere Normale der Ursprungsflächen.
    pub fn average_normal(&self) -> Vec3 {
        self.avg_normal
    }

    /// Ursprungsflächen der Session (aktive Fläche zuerst).
    pub fn origin_faces(&self) -> &[FaceId] {
        &self.origin_faces
    }

    /// Ruhelage eines Session-Vertex, falls er zu einem Loop gehört.
    ///
    /// Rand-Vertices werden nie verschoben — ihre Ruhelage ist die
    /// Live-Position, die der Aufrufer direkt aus dem Mesh liest.
    pub(crate) fn rest_co(&self, v: VertId) -> Option<Vec3> {
        for (loop_verts, init_cos) in self.loops.iter().zip(&self.init_loop_co) {
            if let Some(idx) = loop_verts.iter().position(|x| *x == v) {
                return init_cos.get(idx).copied();
            }
        }
        None
    }

    /// Ruhelage mit Fallback auf die Live-Position.
    pub(crate) fn rest_or_live_co(&self, mesh: &EditMesh, v: VertId) -> Option<Vec3> {
        self.rest_co(v).or_else(|| mesh.vert(v).map(|vert| vert.co))
    }

    /// Vorzeichenbehaftete Drag-Distanz entlang der Normalen.
    pub(crate) fn drag_distance(&self) -> f32 {
        let raw = self
            .viewport
            .drag_world_distance(self.init_pointer, self.last_pointer);
        if self.options.invert {
            -raw
        } else {
            raw
        }
    }

    /// Aktualisiert den Header-Text aus dem aktuellen Zustand.
    pub(crate) fn refresh_header(&mut self) {
        let d = self.drag_distance();
        let mut text = format!("D: {:.5} m     Segmente: {}", d, self.options.segment_count);
        if !self.numeric_buffer.is_empty() {
            text.push_str(&format!("     Eingabe: {}", self.numeric_buffer));
        }
        self.feedback.header_text = Some(text);
    }
}
