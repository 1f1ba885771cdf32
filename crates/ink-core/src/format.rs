//! Page codecs for the storage layer.
//!
//! JSON is the record format pages are exchanged in; MessagePack (named
//! fields) is the compact form used for local snapshots. Both sanitize on
//! load, so a page that decodes never holds an unrenderable stroke.
//!
//! Legacy records predate per-point data and store each stroke as an SVG
//! path string plus a color; [`LegacyPath`] converts them.

use crate::error::{InkError, Result};
use crate::id::StrokeId;
use crate::model::{Color, PageDocument, Stroke, StrokeStyle};
use crate::path::{parse_path, points_to_path};
use serde::{Deserialize, Serialize};

impl PageDocument {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Decode and sanitize a JSON page record.
    pub fn from_json(json: &str) -> Result<Self> {
        let mut page: PageDocument = serde_json::from_str(json)?;
        page.sanitize();
        Ok(page)
    }

    pub fn to_msgpack(&self) -> Result<Vec<u8>> {
        Ok(rmp_serde::to_vec_named(self)?)
    }

    /// Decode and sanitize a MessagePack page snapshot.
    pub fn from_msgpack(bytes: &[u8]) -> Result<Self> {
        let mut page: PageDocument = rmp_serde::from_slice(bytes)?;
        page.sanitize();
        Ok(page)
    }
}

// ─── Legacy records ──────────────────────────────────────────────────────

/// A stroke as older records store it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyPath {
    pub path: String,
    pub color: String,
}

impl LegacyPath {
    pub fn from_stroke(stroke: &Stroke) -> Self {
        Self {
            path: points_to_path(&stroke.points),
            color: stroke.color.to_hex(),
        }
    }

    /// Convert into a stroke with a fresh id. `style` supplies everything
    /// the record does not carry; an unreadable color falls back to it.
    pub fn into_stroke(&self, style: StrokeStyle) -> Result<Stroke> {
        let points = parse_path(&self.path)?;
        if points.is_empty() {
            return Err(InkError::PathData("legacy path has no points".into()));
        }
        let color = Color::from_hex(&self.color).unwrap_or_else(|| {
            log::warn!("unreadable legacy color {:?}; using {}", self.color, style.color.to_hex());
            style.color
        });
        Ok(Stroke::from_points(
            StrokeId::generate(),
            points,
            StrokeStyle { color, ..style },
        ))
    }
}

/// Import a list of legacy records. Records that fail to parse are
/// skipped with a warning rather than failing the whole page.
pub fn import_legacy(paths: &[LegacyPath], style: StrokeStyle) -> PageDocument {
    let strokes = paths
        .iter()
        .filter_map(|legacy| match legacy.into_stroke(style) {
            Ok(stroke) => Some(stroke),
            Err(e) => {
                log::warn!("skipping legacy path: {e}");
                None
            }
        })
        .collect();
    let mut page = PageDocument {
        strokes,
        background_id: None,
    };
    page.sanitize();
    page
}
