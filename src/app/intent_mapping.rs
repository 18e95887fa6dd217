//! Mapping von Modal-Events auf mutierende Commands.
//!
//! Zustandsabhängig: Segment-Grenzen werden hier geprüft, und die
//! Zahleneingabe entscheidet, ob Enter/Backspace etwas bedeuten.

use super::events::{CapCommand, ModalEvent, ModalKey};
use super::tools::cap::CapTool;
use crate::shared::{SCALE_FAC_STEP, SEGMENTS_MAX, SEGMENTS_MIN};

#[cfg(test)]
mod tests;

/// Übersetzt ein `ModalEvent` in eine Sequenz ausführbarer `CapCommand`s.
pub fn map_event_to_commands(tool: &CapTool, event: ModalEvent) -> Vec<CapCommand> {
    match event {
        ModalEvent::PointerMoved { region_px } => {
            vec![CapCommand::UpdatePreview { region_px }]
        }
        ModalEvent::WheelUp => add_segment_commands(tool),
        ModalEvent::WheelDown => remove_segment_commands(tool),
        ModalEvent::KeyPressed { key } => match key {
            ModalKey::Digit(digit) if digit <= 9 => {
                vec![CapCommand::PushNumericDigit { digit }]
            }
            ModalKey::Digit(_) => Vec::new(),
            ModalKey::Backspace => {
                if tool.numeric_buffer().is_empty() {
                    Vec::new()
                } else {
                    vec![CapCommand::PopNumericDigit]
                }
            }
            ModalKey::Enter => {
                if tool.numeric_buffer().is_empty() {
                    Vec::new()
                } else {
                    vec![CapCommand::CommitNumericEntry]
                }
            }
            ModalKey::Plus => add_segment_commands(tool),
            ModalKey::Minus => remove_segment_commands(tool),
            ModalKey::ArrowUp => vec![CapCommand::StepScaleFac {
                delta: SCALE_FAC_STEP,
            }],
            ModalKey::ArrowDown => vec![CapCommand::StepScaleFac {
                delta: -SCALE_FAC_STEP,
            }],
            ModalKey::KeyI => vec![CapCommand::ToggleInvert],
            ModalKey::KeyF => vec![CapCommand::ToggleFlipScale],
            ModalKey::KeyV => vec![CapCommand::ToggleControlLength],
            ModalKey::KeyR => vec![CapCommand::ResetParams],
        },
        ModalEvent::LeftMouse => vec![CapCommand::Confirm],
        ModalEvent::RightMouse | ModalEvent::Escape => vec![CapCommand::Cancel],
    }
}

fn add_segment_commands(tool: &CapTool) -> Vec<CapCommand> {
    if tool.segment_count() < SEGMENTS_MAX {
        vec![CapCommand::AddSegment]
    } else {
        Vec::new()
    }
}

fn remove_segment_commands(tool: &CapTool) -> Vec<CapCommand> {
    if tool.segment_count() > SEGMENTS_MIN {
        vec![CapCommand::RemoveSegment]
    } else {
        Vec::new()
    }
}
