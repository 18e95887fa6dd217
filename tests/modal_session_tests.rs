//! End-to-End-Tests der Modal-Session über die öffentliche Controller-API.

use glam::{Vec2, Vec3};
use polycap_editor::{
    CapController, CapError, CapOptions, EditMesh, FaceId, ModalEvent, ModalKey, ModalStatus,
    VertId, Viewport,
};

/// Reguläres Quad-Gitter mit `nx` × `ny` Vertices in der XY-Ebene.
fn make_grid(nx: usize, ny: usize) -> (EditMesh, Vec<Vec<VertId>>, Vec<Vec<FaceId>>) {
    let mut mesh = EditMesh::new();
    let mut verts = vec![vec![VertId(0); ny]; nx];
    for (x, column) in verts.iter_mut().enumerate() {
        for (y, slot) in column.iter_mut().enumerate() {
            *slot = mesh.add_vert(Vec3::new(x as f32, y as f32, 0.0));
        }
    }
    let mut faces = vec![vec![FaceId(0); ny - 1]; nx - 1];
    for x in 0..nx - 1 {
        for y in 0..ny - 1 {
            faces[x][y] = mesh
                .add_face(&[
                    verts[x][y],
                    verts[x + 1][y],
                    verts[x + 1][y + 1],
                    verts[x][y + 1],
                ])
                .expect("Gitter-Quad erwartet");
        }
    }
    (mesh, verts, faces)
}

/// 3×3-Flächen-Gitter mit selektierter Mittel-Fläche.
fn center_selected_grid() -> (EditMesh, FaceId) {
    let (mut mesh, _, faces) = make_grid(4, 4);
    let center = faces[1][1];
    mesh.face_mut(center).unwrap().select = true;
    (mesh, center)
}

fn viewport() -> Viewport {
    // 100 px Drag entsprechen 1.0 Welt-Einheiten
    Viewport::new(1000.0, 1000.0, 10.0)
}

const START: Vec2 = Vec2::new(500.0, 500.0);

fn counts(mesh: &EditMesh) -> (usize, usize, usize) {
    (mesh.vert_count(), mesh.edge_count(), mesh.face_count())
}

fn key(k: ModalKey) -> ModalEvent {
    ModalEvent::KeyPressed { key: k }
}

#[test]
fn test_no_selection_cancels_without_mutation() {
    let (mut mesh, _, _) = make_grid(4, 4);
    let before = counts(&mesh);
    let mut controller = CapController::new();

    let result = controller.begin_session(&mut mesh, viewport(), CapOptions::default(), START);

    let err = result.err().expect("Fehler erwartet");
    match err.downcast_ref::<CapError>() {
        Some(CapError::NoFacesSelected) => {}
        other => panic!("NoFacesSelected erwartet, bekam {other:?}"),
    }
    assert_eq!(counts(&mesh), before, "Mesh wurde trotz Abbruch verändert");
}

#[test]
fn test_whole_mesh_selection_is_rejected() {
    let (mut mesh, _, faces) = make_grid(3, 3);
    for row in &faces {
        for &f in row {
            mesh.face_mut(f).unwrap().select = true;
        }
    }
    let before = counts(&mesh);
    let mut controller = CapController::new();

    let err = controller
        .begin_session(&mut mesh, viewport(), CapOptions::default(), START)
        .err()
        .expect("Fehler erwartet");
    match err.downcast_ref::<CapError>() {
        Some(CapError::SelectionTooLarge) => {}
        other => panic!("SelectionTooLarge erwartet, bekam {other:?}"),
    }
    assert_eq!(counts(&mesh), before);
}

#[test]
fn test_default_drag_produces_tapered_cap() {
    let (mut mesh, _) = center_selected_grid();
    let mut controller = CapController::new();
    let mut tool = controller
        .begin_session(&mut mesh, viewport(), CapOptions::default(), START)
        .unwrap();

    // 100 px Drag = 1.0 Welt-Einheiten entlang +Z
    let status = controller
        .handle_event(
            &mut tool,
            &mut mesh,
            ModalEvent::PointerMoved {
                region_px: START + Vec2::new(100.0, 0.0),
            },
        )
        .unwrap();
    assert_eq!(status, ModalStatus::RunningModal);

    assert_eq!(tool.loops().len(), 6);
    let mut prev_z = 0.0f32;
    for (i, loop_verts) in tool.loops().iter().enumerate() {
        let mut sum = Vec3::ZERO;
        for &v in loop_verts {
            sum += mesh.vert(v).unwrap().co;
        }
        let centroid = sum / loop_verts.len() as f32;
        assert!(centroid.z > prev_z, "Loop {i} nicht oberhalb des Vorgängers");
        assert!(centroid.z <= 1.0 + 1e-5);
        prev_z = centroid.z;
    }
    assert!((prev_z - 1.0).abs() < 1e-5, "Spitze nicht am Drag-Ziel");

    // Live-Anzeigen sind gesetzt
    assert!(tool.feedback.header_text.is_some());
    assert!(tool.feedback.guide.is_some());
    assert!(!tool.feedback.preview_triangles.is_empty());
}

#[test]
fn test_confirm_removes_origin_and_clears_feedback() {
    let (mut mesh, center) = center_selected_grid();
    let before = counts(&mesh);
    let mut controller = CapController::new();
    let mut tool = controller
        .begin_session(&mut mesh, viewport(), CapOptions::default(), START)
        .unwrap();

    controller
        .handle_event(
            &mut tool,
            &mut mesh,
            ModalEvent::PointerMoved {
                region_px: START + Vec2::new(60.0, 0.0),
            },
        )
        .unwrap();
    let status = controller
        .handle_event(&mut tool, &mut mesh, ModalEvent::LeftMouse)
        .unwrap();

    assert_eq!(status, ModalStatus::Finished);
    assert!(mesh.face(center).is_none(), "Ursprungsfläche lebt noch");
    // Extrusion: +4 Vertices, +5 Flächen; 5 Schnitte: je +4 Vertices und
    // +4 Flächen; Commit: −1 Ursprungsfläche
    assert_eq!(mesh.vert_count(), before.0 + 24);
    assert_eq!(mesh.face_count(), before.2 + 24);
    assert!(tool.feedback.status_text.is_none());
    assert!(tool.feedback.header_text.is_none());
}

#[test]
fn test_cancel_after_growth_restores_exact_counts() {
    let (mut mesh, center) = center_selected_grid();
    mesh.set_active_face(Some(center));
    let before = counts(&mesh);
    let mut controller = CapController::new();
    let mut tool = controller
        .begin_session(&mut mesh, viewport(), CapOptions::default(), START)
        .unwrap();

    controller
        .handle_event(
            &mut tool,
            &mut mesh,
            ModalEvent::PointerMoved {
                region_px: START + Vec2::new(80.0, 0.0),
            },
        )
        .unwrap();
    for _ in 0..3 {
        controller
            .handle_event(&mut tool, &mut mesh, ModalEvent::WheelUp)
            .unwrap();
    }
    assert_eq!(tool.segment_count(), 8);

    let status = controller
        .handle_event(&mut tool, &mut mesh, ModalEvent::Escape)
        .unwrap();

    assert_eq!(status, ModalStatus::Cancelled);
    assert_eq!(counts(&mesh), before, "Revert stellt Zählungen nicht her");

    let origin = mesh.face(center).unwrap();
    assert!(origin.select);
    assert!(!origin.hide);
    assert_eq!(mesh.active_face(), Some(center));
    assert!(tool.feedback.status_text.is_none());
}

#[test]
fn test_numeric_entry_sets_segment_count() {
    let (mut mesh, _) = center_selected_grid();
    let mut controller = CapController::new();
    let mut tool = controller
        .begin_session(&mut mesh, viewport(), CapOptions::default(), START)
        .unwrap();

    controller
        .handle_event(&mut tool, &mut mesh, key(ModalKey::Digit(1)))
        .unwrap();
    controller
        .handle_event(&mut tool, &mut mesh, key(ModalKey::Digit(2)))
        .unwrap();
    assert_eq!(tool.numeric_buffer(), "12");

    controller
        .handle_event(&mut tool, &mut mesh, key(ModalKey::Enter))
        .unwrap();

    assert_eq!(tool.segment_count(), 12);
    assert_eq!(tool.loops().len(), 13);
    assert!(tool.numeric_buffer().is_empty());
}

#[test]
fn test_wheel_down_stops_at_floor() {
    let (mut mesh, _) = center_selected_grid();
    let mut controller = CapController::new();
    let mut tool = controller
        .begin_session(&mut mesh, viewport(), CapOptions::default(), START)
        .unwrap();

    // Per Zahleneingabe auf die Untergrenze
    controller
        .handle_event(&mut tool, &mut mesh, key(ModalKey::Digit(1)))
        .unwrap();
    controller
        .handle_event(&mut tool, &mut mesh, key(ModalKey::Enter))
        .unwrap();
    assert_eq!(tool.segment_count(), 1);

    controller
        .handle_event(&mut tool, &mut mesh, ModalEvent::WheelDown)
        .unwrap();
    assert_eq!(tool.segment_count(), 1, "Untergrenze wurde unterschritten");
}

#[test]
fn test_reset_restores_defaults() {
    let (mut mesh, _) = center_selected_grid();
    let mut controller = CapController::new();
    let mut tool = controller
        .begin_session(&mut mesh, viewport(), CapOptions::default(), START)
        .unwrap();

    controller
        .handle_event(&mut tool, &mut mesh, key(ModalKey::ArrowUp))
        .unwrap();
    controller
        .handle_event(&mut tool, &mut mesh, key(ModalKey::KeyI))
        .unwrap();
    controller
        .handle_event(&mut tool, &mut mesh, ModalEvent::WheelUp)
        .unwrap();
    assert_ne!(tool.options().scale_fac, CapOptions::default().scale_fac);
    assert_eq!(tool.segment_count(), 6);

    controller
        .handle_event(&mut tool, &mut mesh, key(ModalKey::KeyR))
        .unwrap();

    let defaults = CapOptions::default();
    assert_eq!(tool.options().scale_fac, defaults.scale_fac);
    assert!(!tool.options().invert);
    assert_eq!(tool.segment_count(), defaults.segment_count);
    assert_eq!(tool.loops().len(), (defaults.segment_count + 1) as usize);
}

#[test]
fn test_terminated_session_rejects_events() {
    let (mut mesh, _) = center_selected_grid();
    let mut controller = CapController::new();
    let mut tool = controller
        .begin_session(&mut mesh, viewport(), CapOptions::default(), START)
        .unwrap();

    controller
        .handle_event(&mut tool, &mut mesh, ModalEvent::LeftMouse)
        .unwrap();

    let result = controller.handle_event(&mut tool, &mut mesh, ModalEvent::WheelUp);
    assert!(result.is_err(), "beendete Session nahm ein Event an");
}

#[test]
fn test_command_log_records_session_history() {
    let (mut mesh, _) = center_selected_grid();
    let mut controller = CapController::new();
    let mut tool = controller
        .begin_session(&mut mesh, viewport(), CapOptions::default(), START)
        .unwrap();

    controller
        .handle_event(&mut tool, &mut mesh, ModalEvent::WheelUp)
        .unwrap();
    controller
        .handle_event(&mut tool, &mut mesh, ModalEvent::Escape)
        .unwrap();

    let entries = tool.command_log.entries();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0], polycap_editor::CapCommand::AddSegment);
    assert_eq!(entries[1], polycap_editor::CapCommand::Cancel);
}
