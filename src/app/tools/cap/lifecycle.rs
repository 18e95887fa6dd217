//! Lebenszyklus der Cap-Session: Aufruf, Preview-Updates, Abschluss.

use super::super::CapError;
use super::state::{CapTool, SessionPhase};
use super::{geometry, grower, resolver};
use crate::app::command_log::CommandLog;
use crate::core::ops::{delete_faces_with_orphans, delete_verts, extrude_face_region, recalc_face_normals};
use crate::core::{EditMesh, Viewport};
use crate::shared::CapOptions;
use crate::ui::{CursorShape, GuideLine, ViewportFeedback};
use glam::Vec2;
use indexmap::IndexSet;

/// Status-Text für die Dauer der Session.
const STATUS_TEXT: &str = "Linksklick: Bestätigen     Rechtsklick/Esc: Abbrechen     \
                           Scrollen: Segmente hinzufügen/entfernen";

impl CapTool {
    /// Startet eine Modal-Session: Resolver, Extrusion, Setup-Wachstum.
    ///
    /// Schlägt das Setup fehl, bleibt keine Teilgeometrie zurück — bereits
    /// erzeugte Vertices werden gelöscht und die Ursprungsflächen
    /// wiederhergestellt, bevor der Fehler zurückkehrt.
    pub fn invoke(
        mesh: &mut EditMesh,
        viewport: Viewport,
        options: CapOptions,
        pointer_px: Vec2,
    ) -> Result<CapTool, CapError> {
        let options = options.clamped();
        let origin = resolver::resolve_origin(mesh)?;

        let mut tool = CapTool {
            phase: SessionPhase::Active,
            viewport,
            defaults: options.clone(),
            options,
            init_pointer: pointer_px,
            last_pointer: pointer_px,
            avg_normal: origin.avg_normal,
            origin_faces: origin.faces,
            start_verts: origin.start_verts,
            loops: Vec::new(),
            init_loop_co: Vec::new(),
            known_verts: IndexSet::new(),
            numeric_buffer: String::new(),
            command_log: CommandLog::new(),
            feedback: ViewportFeedback::new(),
        };

        if let Err(err) = tool.setup_geometry(mesh) {
            log::warn!("Cap-Setup fehlgeschlagen, Geometrie wird zurückgerollt: {err}");
            if let Err(rollback_err) = tool.discard_session_geometry(mesh) {
                log::error!("Setup-Rollback unvollständig: {rollback_err}");
            }
            if let Err(restore_err) = tool.restore_origin_faces(mesh) {
                log::error!("Ursprungsflächen nicht wiederhergestellt: {restore_err}");
            }
            tool.phase = SessionPhase::Terminated;
            return Err(err);
        }

        tool.feedback.status_text = Some(STATUS_TEXT.to_string());
        tool.feedback.cursor = CursorShape::ScrollXY;
        tool.refresh_header();
        log::info!(
            "Cap-Session gestartet: {} Ursprungsflächen, {} Segmente",
            tool.origin_faces.len(),
            tool.options.segment_count
        );
        Ok(tool)
    }

    /// Extrusion plus Setup-Wachstum; jede erzeugte Geometrie landet in
    /// der Session-Registry, damit der Rollback sie findet.
    fn setup_geometry(&mut self, mesh: &mut EditMesh) -> Result<(), CapError> {
        let extrusion = extrude_face_region(mesh, &self.origin_faces)?;

        // Extrudierte Flächen sichtbar und selektiert, Kanten einblenden
        for &f in &extrusion.new_faces {
            let edges = match mesh.face_mut(f) {
                Some(face) => {
                    face.select = true;
                    face.hide = false;
                    face.edges.clone()
                }
                None => continue,
            };
            for e in edges {
                if let Some(edge) = mesh.edge_mut(e) {
                    edge.hide = false;
                }
            }
        }

        let tip_verts = extrusion.new_verts.clone();
        let mut tip_init = Vec::with_capacity(tip_verts.len());
        for &v in &tip_verts {
            let co = mesh
                .vert(v)
                .ok_or_else(|| CapError::runtime(format!("extrudierter Vertex {v} fehlt")))?
                .co;
            tip_init.push(co);
        }
        self.known_verts.extend(tip_verts.iter().copied());

        grower::grow_initial(self, mesh, &tip_verts, tip_init)
    }

    /// Verarbeitet eine Pointer-Bewegung: Falloff anwenden, Anzeigen nachziehen.
    pub(crate) fn update_preview(
        &mut self,
        mesh: &mut EditMesh,
        pointer_px: Vec2,
    ) -> Result<(), CapError> {
        self.last_pointer = pointer_px;
        self.recompute(mesh)
    }

    /// Falloff-Durchlauf mit der zuletzt gesehenen Pointer-Position.
    pub(crate) fn recompute(&mut self, mesh: &mut EditMesh) -> Result<(), CapError> {
        geometry::apply_falloff(self, mesh)?;
        self.feedback.guide = Some(GuideLine {
            from_px: self.init_pointer,
            to_px: self.last_pointer,
        });
        self.refresh_header();
        Ok(())
    }

    /// Control-Length: aktuelle Lage als neue Basis übernehmen.
    ///
    /// Die verschobenen Positionen werden zu den neuen Ruhelagen, der
    /// aktuelle Pointer zum neuen Drag-Ursprung — weitere Drags messen
    /// ab hier.
    pub(crate) fn rebaseline(&mut self, mesh: &EditMesh) -> Result<(), CapError> {
        for (loop_verts, init_cos) in self.loops.iter().zip(self.init_loop_co.iter_mut()) {
            for (&v, slot) in loop_verts.iter().zip(init_cos.iter_mut()) {
                let co = mesh
                    .vert(v)
                    .ok_or_else(|| CapError::runtime(format!("Loop-Vertex {v} fehlt")))?
                    .co;
                *slot = co;
            }
        }
        self.init_pointer = self.last_pointer;
        Ok(())
    }

    /// Bestätigung: Ursprungsflächen löschen, Anzeigen räumen.
    pub(crate) fn confirm(&mut self, mesh: &mut EditMesh) -> Result<(), CapError> {
        self.phase = SessionPhase::Committing;
        delete_faces_with_orphans(mesh, &self.origin_faces)?;
        self.feedback.clear();
        self.phase = SessionPhase::Terminated;
        log::info!(
            "Cap bestätigt: {} Loops, {} Segmente",
            self.loops.len(),
            self.options.segment_count
        );
        Ok(())
    }

    /// Abbruch: neue Geometrie löschen, Ursprung wiederherstellen.
    pub(crate) fn revert(&mut self, mesh: &mut EditMesh) -> Result<(), CapError> {
        self.phase = SessionPhase::Reverting;
        self.discard_session_geometry(mesh)?;
        self.restore_origin_faces(mesh)?;
        self.feedback.clear();
        self.phase = SessionPhase::Terminated;
        log::info!("Cap-Session abgebrochen und zurückgesetzt");
        Ok(())
    }

    /// Löscht jede in dieser Session erzeugte Geometrie (transitiv über
    /// die Vertex-Registry).
    fn discard_session_geometry(&mut self, mesh: &mut EditMesh) -> Result<(), CapError> {
        let verts: Vec<_> = self.known_verts.iter().copied().collect();
        delete_verts(mesh, &verts)?;
        self.known_verts.clear();
        self.loops.clear();
        self.init_loop_co.clear();
        Ok(())
    }

    /// Macht die Ursprungsflächen wieder sichtbar, selektiert sie und
    /// berechnet ihre Normalen neu (die Extrusion kann sie kippen).
    fn restore_origin_faces(&mut self, mesh: &mut EditMesh) -> Result<(), CapError> {
        for &f in &self.origin_faces {
            let edges = match mesh.face_mut(f) {
                Some(face) => {
                    face.hide = false;
                    face.select = true;
                    face.edges.clone()
                }
                None => continue,
            };
            for e in edges {
                if let Some(edge) = mesh.edge_mut(e) {
                    edge.hide = false;
                }
            }
        }
        recalc_face_normals(mesh, &self.origin_faces)?;
        mesh.set_active_face(self.origin_faces.first().copied());
        Ok(())
    }
}
