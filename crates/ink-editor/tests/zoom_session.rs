//! Integration tests: writing and erasing through the magnifier
//! (ink-editor ↔ ink-core geometry).

use ink_core::config::InkConfig;
use ink_core::model::Rect;
use ink_editor::input::InputEvent;
use ink_editor::surface::{DrawingSurface, ToolMode};
use ink_editor::tools::ToolKind;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// 1200×1600 page seen through a 400×600 viewport; magnifier placed by a
/// touch at (600, 800), so its 120×120 target spans (540..660, 740..860).
fn magnifier() -> DrawingSurface {
    init_logging();
    let mut surface = DrawingSurface::new(InkConfig::default(), 400.0, 600.0);
    surface.handle_canvas_event(&InputEvent::PanBegin);
    surface.handle_canvas_event(&InputEvent::pan_update(-400.0, -500.0));
    surface.handle_canvas_event(&InputEvent::PanEnd);
    surface.handle_canvas_event(&InputEvent::pointer_down(200.0, 300.0, 0));
    surface.handle_canvas_event(&InputEvent::pointer_up(200.0, 300.0));
    surface.on_mode_change(ToolMode::Magnifier);
    surface
}

fn write(surface: &mut DrawingSurface, pts: &[(f32, f32)]) -> usize {
    let mut applied = 0;
    for (i, &(x, y)) in pts.iter().enumerate() {
        let t = 1000 + i as u64 * 16;
        let event = if i == 0 {
            InputEvent::pointer_down(x, y, t).with_stylus(0.5)
        } else {
            InputEvent::pointer_move(x, y, t).with_stylus(0.5)
        };
        applied += surface.handle_zoom_event(&event);
    }
    let (x, y) = pts[pts.len() - 1];
    applied + surface.handle_zoom_event(&InputEvent::pointer_up(x, y))
}

#[test]
fn magnifier_targets_last_touch() {
    let surface = magnifier();
    let view = surface.zoom().view().expect("magnifier is active");
    assert_eq!(view.rect, Rect::new(540.0, 740.0, 120.0, 120.0));
}

#[test]
fn zoom_writing_lands_inside_target() {
    let mut surface = magnifier();
    let applied = write(
        &mut surface,
        &[(40.0, 60.0), (120.0, 90.0), (200.0, 140.0), (280.0, 150.0), (330.0, 200.0)],
    );
    assert_eq!(applied, 1);

    let stroke = &surface.strokes()[0];
    let rect = surface.zoom().view().map(|v| v.rect).unwrap();
    for p in &stroke.points {
        assert!(rect.contains(p.x, p.y), "{p:?} outside {rect:?}");
        assert_eq!(p.pressure, Some(0.5));
        assert!(p.t.is_some());
    }
}

#[test]
fn committed_zoom_stroke_displays_where_it_was_drawn() {
    let mut surface = magnifier();
    let drawn = [(40.0, 60.0), (120.0, 90.0), (200.0, 140.0), (330.0, 200.0)];
    write(&mut surface, &drawn);

    let shown = surface.zoom_display_strokes();
    assert_eq!(shown.len(), 1);
    for (p, &(x, y)) in shown[0].points.iter().zip(&drawn) {
        assert!((p.x - x).abs() < 1e-2 && (p.y - y).abs() < 1e-2, "{p:?} vs ({x}, {y})");
    }
    assert!((shown[0].width - surface.config().stroke_style.width).abs() < 1e-4);
}

#[test]
fn touches_past_the_padding_snap_to_the_edge() {
    let mut surface = magnifier();
    write(&mut surface, &[(-50.0, 180.0), (400.0, 180.0)]);
    let stroke = &surface.strokes()[0];
    assert_eq!(stroke.points[0].x, 540.0);
    assert_eq!(stroke.points[1].x, 660.0);
}

#[test]
fn zoom_eraser_splits_page_stroke() {
    let mut surface = magnifier();
    write(
        &mut surface,
        &[(20.0, 180.0), (100.0, 180.0), (180.0, 180.0), (260.0, 180.0), (340.0, 180.0)],
    );
    assert_eq!(surface.strokes().len(), 1);

    surface.set_zoom_tool(ToolKind::Eraser);
    surface.handle_zoom_event(&InputEvent::pointer_down(180.0, 180.0, 2000));
    surface.handle_zoom_event(&InputEvent::pointer_up(180.0, 180.0));

    let lens: Vec<usize> = surface.strokes().iter().map(|s| s.len()).collect();
    assert_eq!(lens, vec![2, 2]);
}

#[test]
fn clear_area_leaves_outside_strokes() {
    init_logging();
    let mut surface = DrawingSurface::new(InkConfig::default(), 400.0, 600.0);
    for y in [20.0, 300.0] {
        surface.handle_canvas_event(&InputEvent::pointer_down(20.0, y, 0));
        surface.handle_canvas_event(&InputEvent::pointer_move(120.0, y, 16));
        surface.handle_canvas_event(&InputEvent::pointer_up(120.0, y));
    }
    surface.on_mode_change(ToolMode::Magnifier);
    // Last touch was (20, 300): the target spans (0..120, 240..360).
    assert_eq!(surface.clear_zoom_area(), 1);
    assert_eq!(surface.strokes().len(), 1);
    assert_eq!(surface.strokes()[0].points[0].y, 20.0);
}

#[test]
fn select_new_area_then_touch_moves_target() {
    let mut surface = magnifier();
    surface.select_new_zoom_area();
    surface.handle_canvas_event(&InputEvent::pointer_down(10.0, 10.0, 0));
    surface.handle_canvas_event(&InputEvent::pointer_up(10.0, 10.0));
    // Viewport (10, 10) is canvas (410, 510) under the scroll offset.
    let rect = surface.zoom().view().map(|v| v.rect).unwrap();
    assert_eq!(rect, Rect::new(350.0, 450.0, 120.0, 120.0));
    assert!(surface.strokes().is_empty());
}

#[test]
fn target_drag_from_main_canvas() {
    let mut surface = magnifier();
    // Target centre (600, 800) is viewport (200, 300).
    surface.handle_canvas_event(&InputEvent::pointer_down(200.0, 300.0, 0));
    surface.handle_canvas_event(&InputEvent::pointer_move(150.0, 250.0, 16));
    surface.handle_canvas_event(&InputEvent::pointer_up(150.0, 250.0));
    let rect = surface.zoom().view().map(|v| v.rect).unwrap();
    assert_eq!(rect, Rect::new(490.0, 690.0, 120.0, 120.0));
}

#[test]
fn pan_over_window_discards_half_written_stroke() {
    let mut surface = magnifier();
    surface.handle_zoom_event(&InputEvent::pointer_down(40.0, 60.0, 0).with_stylus(0.5));
    surface.handle_zoom_event(&InputEvent::pointer_move(200.0, 200.0, 16).with_stylus(0.5));
    assert!(surface.live_preview().is_some());

    surface.handle_zoom_event(&InputEvent::PanBegin);
    surface.handle_zoom_event(&InputEvent::pan_update(-30.0, -10.0));
    assert_eq!(surface.handle_zoom_event(&InputEvent::pointer_up(200.0, 200.0)), 0);
    surface.handle_zoom_event(&InputEvent::PanEnd);

    assert!(surface.strokes().is_empty());
    assert!(surface.live_preview().is_none());
}
