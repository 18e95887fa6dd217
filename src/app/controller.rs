//! Session-Controller für zentrale Event-Verarbeitung.

use super::events::{CapCommand, ModalEvent};
use super::handlers;
use super::intent_mapping;
use super::tools::{cap::CapTool, CapError};
use crate::core::{EditMesh, Viewport};
use crate::shared::CapOptions;
use glam::Vec2;

/// Rückgabe eines Event-Durchlaufs — entspricht dem Modal-Status des Hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalStatus {
    /// Session läuft weiter, nächstes Event bitte
    RunningModal,
    /// Session wurde bestätigt
    Finished,
    /// Session wurde abgebrochen
    Cancelled,
}

/// Orchestriert Modal-Events und Handler auf der Cap-Session.
#[derive(Default)]
pub struct CapController;

impl CapController {
    /// Erstellt einen neuen Controller.
    pub fn new() -> Self {
        Self
    }

    /// Startet eine Modal-Session (Setup-Phase).
    ///
    /// Setup-Fehler kommen ohne zurückgelassene Geometrie zurück —
    /// entweder war noch nichts erzeugt, oder es wurde vor der Rückkehr
    /// gelöscht.
    pub fn begin_session(
        &mut self,
        mesh: &mut EditMesh,
        viewport: Viewport,
        options: CapOptions,
        pointer_px: Vec2,
    ) -> anyhow::Result<CapTool> {
        CapTool::invoke(mesh, viewport, options, pointer_px).map_err(|err| {
            log::warn!("Cap-Session nicht gestartet: {err}");
            anyhow::Error::new(err)
        })
    }

    /// Verarbeitet ein Host-Event über Event→Command-Mapping.
    ///
    /// Jeder Handler-Fehler in der Active-Phase löst den vollständigen
    /// Revert aus, bevor der Fehler den Host erreicht — eine halbfertige
    /// Kappe bleibt nie im Mesh zurück.
    pub fn handle_event(
        &mut self,
        tool: &mut CapTool,
        mesh: &mut EditMesh,
        event: ModalEvent,
    ) -> anyhow::Result<ModalStatus> {
        if !tool.is_active() {
            anyhow::bail!("Session ist beendet, Event verworfen");
        }

        let commands = intent_mapping::map_event_to_commands(tool, event);
        for command in commands {
            tool.command_log.record(&command);
            match self.handle_command(tool, mesh, command) {
                Ok(Some(status)) => return Ok(status),
                Ok(None) => {}
                Err(err) => {
                    log::error!("Modal-Command fehlgeschlagen: {err}");
                    if let Err(revert_err) = tool.revert(mesh) {
                        log::error!("Revert nach Fehler unvollständig: {revert_err}");
                    }
                    return Err(
                        anyhow::Error::new(err).context("Session nach Fehler zurückgesetzt")
                    );
                }
            }
        }
        Ok(ModalStatus::RunningModal)
    }

    /// Führt einen mutierenden Command aus.
    /// Dispatcht an Feature-Handler in `handlers/`.
    fn handle_command(
        &mut self,
        tool: &mut CapTool,
        mesh: &mut EditMesh,
        command: CapCommand,
    ) -> Result<Option<ModalStatus>, CapError> {
        match command {
            // === Preview ===
            CapCommand::UpdatePreview { region_px } => {
                handlers::preview::update(tool, mesh, region_px)?
            }

            // === Segmente ===
            CapCommand::AddSegment => handlers::segments::add(tool, mesh)?,
            CapCommand::RemoveSegment => handlers::segments::remove(tool, mesh)?,

            // === Parameter ===
            CapCommand::StepScaleFac { delta } => {
                handlers::params::step_scale_fac(tool, mesh, delta)?
            }
            CapCommand::ToggleInvert => handlers::params::toggle_invert(tool, mesh)?,
            CapCommand::ToggleFlipScale => handlers::params::toggle_flip_scale(tool, mesh)?,
            CapCommand::ToggleControlLength => {
                handlers::params::toggle_control_length(tool, mesh)?
            }
            CapCommand::ResetParams => handlers::params::reset(tool, mesh)?,

            // === Zahleneingabe ===
            CapCommand::PushNumericDigit { digit } => handlers::numeric::push_digit(tool, digit)?,
            CapCommand::PopNumericDigit => handlers::numeric::pop_digit(tool)?,
            CapCommand::CommitNumericEntry => handlers::numeric::commit(tool, mesh)?,

            // === Abschluss ===
            CapCommand::Confirm => {
                handlers::finish::confirm(tool, mesh)?;
                return Ok(Some(ModalStatus::Finished));
            }
            CapCommand::Cancel => {
                handlers::finish::cancel(tool, mesh)?;
                return Ok(Some(ModalStatus::Cancelled));
            }
        }
        Ok(None)
    }
}
