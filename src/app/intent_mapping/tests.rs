use super::map_event_to_commands;
use crate::app::events::{CapCommand, ModalEvent, ModalKey};
use crate::app::tools::cap::tests::active_session;
use crate::shared::{SCALE_FAC_STEP, SEGMENTS_MAX, SEGMENTS_MIN};
use glam::Vec2;

#[test]
fn test_pointer_move_maps_to_update() {
    let (_, tool) = active_session();
    let pos = Vec2::new(12.0, 34.0);
    let commands = map_event_to_commands(&tool, ModalEvent::PointerMoved { region_px: pos });
    assert_eq!(commands, vec![CapCommand::UpdatePreview { region_px: pos }]);
}

#[test]
fn test_wheel_up_respects_segment_ceiling() {
    let (_, mut tool) = active_session();
    assert_eq!(
        map_event_to_commands(&tool, ModalEvent::WheelUp),
        vec![CapCommand::AddSegment]
    );

    tool.options.segment_count = SEGMENTS_MAX;
    assert!(map_event_to_commands(&tool, ModalEvent::WheelUp).is_empty());
}

#[test]
fn test_wheel_down_respects_segment_floor() {
    let (_, mut tool) = active_session();
    assert_eq!(
        map_event_to_commands(&tool, ModalEvent::WheelDown),
        vec![CapCommand::RemoveSegment]
    );

    tool.options.segment_count = SEGMENTS_MIN;
    assert!(map_event_to_commands(&tool, ModalEvent::WheelDown).is_empty());
}

#[test]
fn test_digits_buffer_and_enter_commits() {
    let (_, mut tool) = active_session();
    assert_eq!(
        map_event_to_commands(
            &tool,
            ModalEvent::KeyPressed {
                key: ModalKey::Digit(7)
            }
        ),
        vec![CapCommand::PushNumericDigit { digit: 7 }]
    );

    // Enter und Backspace bedeuten ohne Puffer nichts
    assert!(map_event_to_commands(
        &tool,
        ModalEvent::KeyPressed {
            key: ModalKey::Enter
        }
    )
    .is_empty());
    assert!(map_event_to_commands(
        &tool,
        ModalEvent::KeyPressed {
            key: ModalKey::Backspace
        }
    )
    .is_empty());

    tool.numeric_buffer.push('7');
    assert_eq!(
        map_event_to_commands(
            &tool,
            ModalEvent::KeyPressed {
                key: ModalKey::Enter
            }
        ),
        vec![CapCommand::CommitNumericEntry]
    );
    assert_eq!(
        map_event_to_commands(
            &tool,
            ModalEvent::KeyPressed {
                key: ModalKey::Backspace
            }
        ),
        vec![CapCommand::PopNumericDigit]
    );
}

#[test]
fn test_parameter_keys() {
    let (_, tool) = active_session();
    let key = |k| ModalEvent::KeyPressed { key: k };

    assert_eq!(
        map_event_to_commands(&tool, key(ModalKey::ArrowUp)),
        vec![CapCommand::StepScaleFac {
            delta: SCALE_FAC_STEP
        }]
    );
    assert_eq!(
        map_event_to_commands(&tool, key(ModalKey::ArrowDown)),
        vec![CapCommand::StepScaleFac {
            delta: -SCALE_FAC_STEP
        }]
    );
    assert_eq!(
        map_event_to_commands(&tool, key(ModalKey::KeyI)),
        vec![CapCommand::ToggleInvert]
    );
    assert_eq!(
        map_event_to_commands(&tool, key(ModalKey::KeyF)),
        vec![CapCommand::ToggleFlipScale]
    );
    assert_eq!(
        map_event_to_commands(&tool, key(ModalKey::KeyV)),
        vec![CapCommand::ToggleControlLength]
    );
    assert_eq!(
        map_event_to_commands(&tool, key(ModalKey::KeyR)),
        vec![CapCommand::ResetParams]
    );
}

#[test]
fn test_confirm_and_cancel_mapping() {
    let (_, tool) = active_session();
    assert_eq!(
        map_event_to_commands(&tool, ModalEvent::LeftMouse),
        vec![CapCommand::Confirm]
    );
    assert_eq!(
        map_event_to_commands(&tool, ModalEvent::RightMouse),
        vec![CapCommand::Cancel]
    );
    assert_eq!(
        map_event_to_commands(&tool, ModalEvent::Escape),
        vec![CapCommand::Cancel]
    );
}
