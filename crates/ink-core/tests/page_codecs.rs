//! Integration tests: page records through the JSON, MessagePack and legacy
//! path codecs.

use ink_core::format::{LegacyPath, import_legacy};
use ink_core::model::*;
use pretty_assertions::assert_eq;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn fixture() -> PageDocument {
    PageDocument::from_json(include_str!("fixtures/page.json")).expect("fixture should decode")
}

// ─── JSON ───────────────────────────────────────────────────────────────

#[test]
fn fixture_loads_and_drops_broken_stroke() {
    init_logging();
    let page = fixture();
    let ids: Vec<&str> = page.strokes.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["stroke_1", "zoom-stroke_2", "stroke_3"]);
    assert_eq!(page.background_id.as_deref(), Some("bg_grid_5mm"));
}

#[test]
fn fixture_keeps_point_metadata() {
    let page = fixture();
    let first = &page.strokes[0];
    assert_eq!(first.points[1].t, Some(1016));
    assert_eq!(first.points[1].pressure, Some(0.55));
    assert_eq!(page.strokes[1].points[0].t, None);
    assert_eq!(page.strokes[1].opacity, 1.0);
    assert_eq!(page.strokes[2].tool, StrokeTool::Highlighter);
}

#[test]
fn json_roundtrip_is_lossless() {
    let page = fixture();
    let json = page.to_json().unwrap();
    assert_eq!(PageDocument::from_json(&json).unwrap(), page);

    let pretty = page.to_json_pretty().unwrap();
    assert_eq!(PageDocument::from_json(&pretty).unwrap(), page);
}

// ─── MessagePack ────────────────────────────────────────────────────────

#[test]
fn msgpack_roundtrip_is_lossless() {
    let page = fixture();
    let bytes = page.to_msgpack().unwrap();
    let back = PageDocument::from_msgpack(&bytes).unwrap();
    assert_eq!(back, page);
}

#[test]
fn msgpack_is_smaller_than_json() {
    let page = fixture();
    assert!(page.to_msgpack().unwrap().len() < page.to_json().unwrap().len());
}

#[test]
fn cross_codec_agrees() {
    let page = fixture();
    let via_json = PageDocument::from_json(&page.to_json().unwrap()).unwrap();
    let via_msgpack = PageDocument::from_msgpack(&page.to_msgpack().unwrap()).unwrap();
    assert_eq!(via_json, via_msgpack);
}

// ─── Legacy paths ───────────────────────────────────────────────────────

#[test]
fn legacy_export_then_import_keeps_geometry() {
    init_logging();
    let page = fixture();
    let legacy: Vec<LegacyPath> = page.strokes.iter().map(LegacyPath::from_stroke).collect();
    let imported = import_legacy(&legacy, StrokeStyle::default());

    assert_eq!(imported.strokes.len(), page.strokes.len());
    for (orig, back) in page.strokes.iter().zip(&imported.strokes) {
        assert_eq!(back.len(), orig.len());
        for (a, b) in orig.points.iter().zip(&back.points) {
            assert!((a.x - b.x).abs() <= 0.05 && (a.y - b.y).abs() <= 0.05);
        }
        assert_eq!(back.color.to_hex(), orig.color.to_hex());
        assert_ne!(back.id, orig.id);
    }
}

#[test]
fn legacy_records_decode_from_json() {
    let records: Vec<LegacyPath> =
        serde_json::from_str(r##"[{"path":"M1.0,1.0 L2.0,2.0","color":"#000000"}]"##).unwrap();
    let page = import_legacy(&records, StrokeStyle::default());
    assert_eq!(page.strokes.len(), 1);
    assert_eq!(page.strokes[0].width, StrokeStyle::default().width);
    assert!(page.strokes[0].id.as_str().starts_with("stroke_"));
}
