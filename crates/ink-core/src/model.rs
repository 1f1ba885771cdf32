//! Core data model for handwritten pages.
//!
//! A page is a flat, ordered list of [`Stroke`]s drawn over an optional
//! background image. Every stroke is an ordered point sequence plus style
//! attributes. Points carry no coordinate-space tag of their own: page
//! strokes are always in canvas space, and the [`crate::geometry`] module
//! wraps points in `CanvasPoint` / `ZoomPoint` when crossing spaces.

use crate::id::StrokeId;
use serde::{Deserialize, Serialize};

// ─── Colors ──────────────────────────────────────────────────────────────

/// RGBA color. Stored as 4 × f32 [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl Color {
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#RGB`, `#RGBA`, `#RRGGBB` or `#RRGGBBAA` (leading `#` optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let bytes = hex.as_bytes();

        let channels: Vec<u8> = match bytes.len() {
            3 | 4 => bytes
                .iter()
                .map(|&c| hex_val(c).map(|v| v * 17))
                .collect::<Option<_>>()?,
            6 | 8 => bytes
                .chunks(2)
                .map(|pair| Some(hex_val(pair[0])? << 4 | hex_val(pair[1])?))
                .collect::<Option<_>>()?,
            _ => return None,
        };

        let unit = |v: u8| v as f32 / 255.0;
        Some(Self::rgba(
            unit(channels[0]),
            unit(channels[1]),
            unit(channels[2]),
            channels.get(3).copied().map_or(1.0, unit),
        ))
    }

    /// Emit as `#RRGGBB`, or `#RRGGBBAA` when not fully opaque.
    pub fn to_hex(&self) -> String {
        let byte = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        let (r, g, b, a) = (byte(self.r), byte(self.g), byte(self.b), byte(self.a));
        if a == 255 {
            format!("#{r:02X}{g:02X}{b:02X}")
        } else {
            format!("#{r:02X}{g:02X}{b:02X}{a:02X}")
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

// ─── Point ───────────────────────────────────────────────────────────────

/// One sampled position of a stroke.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
    /// Sample timestamp in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub t: Option<u64>,
    /// Stylus pressure, 0.0 .. 1.0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressure: Option<f32>,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            t: None,
            pressure: None,
        }
    }

    pub fn with_time(mut self, t: u64) -> Self {
        self.t = Some(t);
        self
    }

    pub fn with_pressure(mut self, pressure: f32) -> Self {
        self.pressure = Some(pressure.clamp(0.0, 1.0));
        self
    }

    /// Same sample metadata, new coordinates.
    pub fn moved_to(self, x: f32, y: f32) -> Self {
        Self { x, y, ..self }
    }

    pub fn distance(&self, other: &Point) -> f32 {
        self.distance_to(other.x, other.y)
    }

    pub fn distance_to(&self, x: f32, y: f32) -> f32 {
        let dx = self.x - x;
        let dy = self.y - y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

// ─── Rect ────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle. Used for the magnified target region and for
/// resize-handle hit areas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A `width × height` rectangle whose center is `(cx, cy)`.
    pub fn centered_at(cx: f32, cy: f32, width: f32, height: f32) -> Self {
        Self::new(cx - width / 2.0, cy - height / 2.0, width, height)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Inclusive on all four edges.
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px <= self.right() && py >= self.y && py <= self.bottom()
    }

    /// AABB overlap test. Inclusive like `contains`, so a zero-height
    /// rect still overlaps whatever it touches.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x <= other.right()
            && self.right() >= other.x
            && self.y <= other.bottom()
            && self.bottom() >= other.y
    }

    /// Finite coordinates and a strictly positive size.
    pub fn is_valid(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0
    }
}

// ─── Stroke ──────────────────────────────────────────────────────────────

/// The instrument a stroke was drawn with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeTool {
    #[default]
    Pen,
    Pencil,
    Highlighter,
    Eraser,
}

/// Style shared by every stroke a tool produces.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrokeStyle {
    pub width: f32,
    pub color: Color,
    pub opacity: f32,
    pub tool: StrokeTool,
}

/// Narrowest width a stroke may be opened with.
pub const MIN_STROKE_WIDTH: f32 = 0.1;

impl StrokeStyle {
    /// Width floored at [`MIN_STROKE_WIDTH`], opacity clamped to [0, 1].
    pub fn normalized(self) -> Self {
        let width = if self.width.is_finite() {
            self.width.max(MIN_STROKE_WIDTH)
        } else {
            Self::default().width
        };
        let opacity = if self.opacity.is_finite() {
            self.opacity.clamp(0.0, 1.0)
        } else {
            1.0
        };
        Self {
            width,
            opacity,
            ..self
        }
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            width: 2.0,
            color: Color::BLACK,
            opacity: 1.0,
            tool: StrokeTool::Pen,
        }
    }
}

/// One continuous freehand mark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub id: StrokeId,
    pub points: Vec<Point>,
    pub width: f32,
    pub color: Color,
    #[serde(default = "full_opacity")]
    pub opacity: f32,
    #[serde(default)]
    pub tool: StrokeTool,
}

fn full_opacity() -> f32 {
    1.0
}

impl Stroke {
    /// Open a stroke at its first sample.
    pub fn begin(id: StrokeId, first: Point, style: StrokeStyle) -> Self {
        let style = style.normalized();
        Self {
            id,
            points: vec![first],
            width: style.width,
            color: style.color,
            opacity: style.opacity,
            tool: style.tool,
        }
    }

    /// Build a stroke from an existing point list.
    pub fn from_points(id: StrokeId, points: Vec<Point>, style: StrokeStyle) -> Self {
        let style = style.normalized();
        Self {
            id,
            points,
            width: style.width,
            color: style.color,
            opacity: style.opacity,
            tool: style.tool,
        }
    }

    pub fn style(&self) -> StrokeStyle {
        StrokeStyle {
            width: self.width,
            color: self.color,
            opacity: self.opacity,
            tool: self.tool,
        }
    }

    /// Same style and a new id, with the given points. Used for the
    /// pieces an erase leaves behind.
    pub fn fragment(&self, points: Vec<Point>) -> Self {
        Self {
            id: self.id.derive(),
            points,
            ..self.clone()
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Total polyline length.
    pub fn path_length(&self) -> f32 {
        self.points.windows(2).map(|w| w[0].distance(&w[1])).sum()
    }

    /// At least one point, finite coordinates, positive width and an
    /// opacity in [0, 1].
    pub fn is_valid(&self) -> bool {
        !self.points.is_empty()
            && self.points.iter().all(Point::is_finite)
            && self.width.is_finite()
            && self.width > 0.0
            && (0.0..=1.0).contains(&self.opacity)
    }

    /// Whether any vertex lies inside `rect` (edges inclusive).
    pub fn touches_rect(&self, rect: &Rect) -> bool {
        self.bounds().is_some_and(|b| b.intersects(rect))
            && self.points.iter().any(|p| rect.contains(p.x, p.y))
    }

    /// Axis-aligned bounds of the vertices.
    pub fn bounds(&self) -> Option<Rect> {
        let first = self.points.first()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for p in &self.points[1..] {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        Some(Rect::new(min_x, min_y, max_x - min_x, max_y - min_y))
    }
}

// ─── Page ────────────────────────────────────────────────────────────────

/// Serializable form of one page, as exchanged with the storage layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDocument {
    #[serde(default)]
    pub strokes: Vec<Stroke>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_id: Option<String>,
}

impl PageDocument {
    /// Drop strokes that cannot be rendered (no points, non-finite
    /// coordinates, bad width/opacity). Returns how many were dropped.
    pub fn sanitize(&mut self) -> usize {
        let before = self.strokes.len();
        self.strokes.retain(|s| {
            let ok = s.is_valid();
            if !ok {
                log::warn!("dropping invalid stroke {} from page record", s.id);
            }
            ok
        });
        before - self.strokes.len()
    }
}
