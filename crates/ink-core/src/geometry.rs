//! Mapping between the zoom viewport and the page canvas.
//!
//! The zoom window shows a fixed-size viewport that magnifies a *target
//! rectangle* of the canvas. Every function here is pure: the same inputs
//! always produce the same outputs, and nothing reads component state.
//!
//! Coordinate spaces are kept apart by the [`CanvasPoint`] and [`ZoomPoint`]
//! wrappers. The two directions are exact inverses inside the target
//! rectangle, with one intentional asymmetry: zoom → canvas *clamps* (a touch
//! past the drawing area snaps to its edge), canvas → zoom *filters* (a point
//! outside the rectangle is simply not visible).
//!
//! Divisors are guarded with a minimum of one unit, and non-finite results
//! are reported as "not mapped" (`None`) so NaN never reaches rendering.

use crate::model::{Point, Rect, Stroke};
use serde::{Deserialize, Serialize};

/// Smallest divisor used for any viewport or rectangle extent.
const MIN_EXTENT: f32 = 1.0;

// ─── Space-tagged points ─────────────────────────────────────────────────

/// A point in page canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasPoint(pub Point);

/// A point in zoom-viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomPoint(pub Point);

impl CanvasPoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self(Point::new(x, y))
    }

    pub fn x(&self) -> f32 {
        self.0.x
    }

    pub fn y(&self) -> f32 {
        self.0.y
    }

    pub fn into_inner(self) -> Point {
        self.0
    }
}

impl ZoomPoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self(Point::new(x, y))
    }

    pub fn x(&self) -> f32 {
        self.0.x
    }

    pub fn y(&self) -> f32 {
        self.0.y
    }

    pub fn into_inner(self) -> Point {
        self.0
    }
}

// ─── Point mapping ───────────────────────────────────────────────────────

fn inner_extent(size: f32, pad: f32) -> f32 {
    // f32::max ignores a NaN operand, so NaN sizes fall back to the minimum.
    (size - 2.0 * pad).max(MIN_EXTENT)
}

/// Map a touch in the zoom viewport to the canvas point it stands for.
///
/// `(zx, zy)` is normalized over the inner drawing area (the viewport minus
/// `pad_x` / `pad_y` on each side), clamped to `[0, 1]` on both axes, then
/// scaled and offset into `rect`. Returns `None` only for non-finite input.
#[allow(clippy::too_many_arguments)]
pub fn map_point_to_canvas(
    zx: f32,
    zy: f32,
    viewport_w: f32,
    viewport_h: f32,
    rect: &Rect,
    pad_x: f32,
    pad_y: f32,
) -> Option<CanvasPoint> {
    let u = ((zx - pad_x) / inner_extent(viewport_w, pad_x)).clamp(0.0, 1.0);
    let v = ((zy - pad_y) / inner_extent(viewport_h, pad_y)).clamp(0.0, 1.0);

    let x = rect.x + u * rect.width;
    let y = rect.y + v * rect.height;
    (x.is_finite() && y.is_finite()).then(|| CanvasPoint::new(x, y))
}

/// Map a canvas point into the zoom viewport.
///
/// Returns `None` when `(cx, cy)` lies outside `rect` (edges count as
/// inside): the point is not visible in this magnified view.
#[allow(clippy::too_many_arguments)]
pub fn map_point_to_zoom(
    cx: f32,
    cy: f32,
    viewport_w: f32,
    viewport_h: f32,
    rect: &Rect,
    pad_x: f32,
    pad_y: f32,
) -> Option<ZoomPoint> {
    if !rect.contains(cx, cy) {
        return None;
    }

    let u = (cx - rect.x) / rect.width.max(MIN_EXTENT);
    let v = (cy - rect.y) / rect.height.max(MIN_EXTENT);

    let x = pad_x + u * inner_extent(viewport_w, pad_x);
    let y = pad_y + v * inner_extent(viewport_h, pad_y);
    (x.is_finite() && y.is_finite()).then(|| ZoomPoint::new(x, y))
}

// ─── Width scaling ───────────────────────────────────────────────────────

fn scale_factors(viewport_w: f32, viewport_h: f32, rect: &Rect) -> (f32, f32) {
    (
        rect.width / viewport_w.max(MIN_EXTENT),
        rect.height / viewport_h.max(MIN_EXTENT),
    )
}

/// Width a zoom-viewport stroke should have on the canvas.
///
/// With `scale_to_target` the width is multiplied by the mean of the
/// horizontal and vertical scale factors; otherwise it is returned as is.
pub fn scale_stroke_width(
    width: f32,
    viewport_w: f32,
    viewport_h: f32,
    rect: &Rect,
    scale_to_target: bool,
) -> f32 {
    if !scale_to_target {
        return width;
    }
    let (sx, sy) = scale_factors(viewport_w, viewport_h, rect);
    let scaled = width * 0.5 * (sx + sy);
    if scaled.is_finite() && scaled > 0.0 {
        scaled
    } else {
        width
    }
}

/// Inverse of [`scale_stroke_width`]: width a canvas stroke is displayed
/// with inside the zoom viewport.
pub fn scale_stroke_width_to_zoom(
    width: f32,
    viewport_w: f32,
    viewport_h: f32,
    rect: &Rect,
    scale_to_target: bool,
) -> f32 {
    if !scale_to_target {
        return width;
    }
    let (sx, sy) = scale_factors(viewport_w, viewport_h, rect);
    let scaled = width * 2.0 / (sx + sy);
    if scaled.is_finite() && scaled > 0.0 {
        scaled
    } else {
        width
    }
}

// ─── Zoom view ───────────────────────────────────────────────────────────

/// Every parameter of one zoom-viewport ↔ canvas mapping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomView {
    pub viewport_w: f32,
    pub viewport_h: f32,
    pub pad_x: f32,
    pub pad_y: f32,
    /// Target rectangle, in canvas space.
    pub rect: Rect,
    pub scale_stroke_to_target: bool,
}

impl ZoomView {
    /// Zoom → canvas, keeping the sample's timestamp and pressure.
    pub fn to_canvas(&self, p: ZoomPoint) -> Option<CanvasPoint> {
        let mapped = map_point_to_canvas(
            p.x(),
            p.y(),
            self.viewport_w,
            self.viewport_h,
            &self.rect,
            self.pad_x,
            self.pad_y,
        )?;
        Some(CanvasPoint(p.0.moved_to(mapped.x(), mapped.y())))
    }

    /// Canvas → zoom, keeping the sample's timestamp and pressure.
    pub fn to_zoom(&self, p: CanvasPoint) -> Option<ZoomPoint> {
        let mapped = map_point_to_zoom(
            p.x(),
            p.y(),
            self.viewport_w,
            self.viewport_h,
            &self.rect,
            self.pad_x,
            self.pad_y,
        )?;
        Some(ZoomPoint(p.0.moved_to(mapped.x(), mapped.y())))
    }

    pub fn width_to_canvas(&self, width: f32) -> f32 {
        scale_stroke_width(
            width,
            self.viewport_w,
            self.viewport_h,
            &self.rect,
            self.scale_stroke_to_target,
        )
    }

    pub fn width_to_zoom(&self, width: f32) -> f32 {
        scale_stroke_width_to_zoom(
            width,
            self.viewport_w,
            self.viewport_h,
            &self.rect,
            self.scale_stroke_to_target,
        )
    }

    /// Mean magnification of the viewport over the target rectangle.
    pub fn zoom_factor(&self) -> f32 {
        let (sx, sy) = scale_factors(self.viewport_w, self.viewport_h, &self.rect);
        let factor = 2.0 / (sx + sy);
        if factor.is_finite() { factor } else { 1.0 }
    }

    /// The drawable area inside the viewport, in zoom space.
    pub fn drawing_area(&self) -> Rect {
        Rect::new(
            self.pad_x,
            self.pad_y,
            inner_extent(self.viewport_w, self.pad_x),
            inner_extent(self.viewport_h, self.pad_y),
        )
    }
}

// ─── Stroke mapping ──────────────────────────────────────────────────────

/// Which way a stroke crosses between spaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformDirection {
    ZoomToCanvas,
    CanvasToZoom,
}

/// Map every point of `stroke` through `view`.
///
/// Canvas → zoom drops points outside the target rectangle and returns
/// `None` when none survive: a stroke that misses the rectangle must not
/// appear in the zoom viewport. Zoom → canvas clamps, so it only returns
/// `None` when every point was non-finite.
pub fn transform_stroke(
    stroke: &Stroke,
    direction: TransformDirection,
    view: &ZoomView,
) -> Option<Stroke> {
    let (points, width): (Vec<Point>, f32) = match direction {
        TransformDirection::ZoomToCanvas => (
            stroke
                .points
                .iter()
                .filter_map(|p| view.to_canvas(ZoomPoint(*p)).map(CanvasPoint::into_inner))
                .collect(),
            view.width_to_canvas(stroke.width),
        ),
        TransformDirection::CanvasToZoom => (
            stroke
                .points
                .iter()
                .filter_map(|p| view.to_zoom(CanvasPoint(*p)).map(ZoomPoint::into_inner))
                .collect(),
            view.width_to_zoom(stroke.width),
        ),
    };

    if points.is_empty() {
        return None;
    }
    Some(Stroke {
        points,
        width,
        ..stroke.clone()
    })
}

/// Zoom-space display copies of every canvas stroke that has at least one
/// point inside the target rectangle. Recomputed from the source on every
/// call; the result is never written back.
pub fn derive_display_strokes(source: &[Stroke], view: &ZoomView) -> Vec<Stroke> {
    source
        .iter()
        .filter(|s| s.touches_rect(&view.rect))
        .filter_map(|s| transform_stroke(s, TransformDirection::CanvasToZoom, view))
        .collect()
}

// ─── Target rectangle helpers ────────────────────────────────────────────

/// Pull `rect` fully inside a `canvas_w × canvas_h` canvas.
///
/// Position is clamped first, then the size is trimmed to whatever room is
/// left. A non-positive or non-finite canvas size leaves `rect` untouched.
pub fn clamp_rect_to_canvas(rect: Rect, canvas_w: f32, canvas_h: f32) -> Rect {
    let canvas_ok =
        canvas_w.is_finite() && canvas_h.is_finite() && canvas_w > 0.0 && canvas_h > 0.0;
    if !canvas_ok {
        return rect;
    }

    let x = rect.x.min(canvas_w - rect.width).max(0.0);
    let y = rect.y.min(canvas_h - rect.height).max(0.0);
    Rect {
        x,
        y,
        width: rect.width.min(canvas_w - x),
        height: rect.height.min(canvas_h - y),
    }
}

/// Position of a resize handle on the target rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandlePosition {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    TopCenter,
    BottomCenter,
    LeftCenter,
    RightCenter,
}

impl HandlePosition {
    pub fn is_corner(self) -> bool {
        matches!(
            self,
            Self::TopLeft | Self::TopRight | Self::BottomLeft | Self::BottomRight
        )
    }
}

/// Eight `handle_size` squares centred on the corners and edge midpoints
/// of `rect`. Corners come first.
pub fn resize_handles(rect: &Rect, handle_size: f32) -> [(HandlePosition, Rect); 8] {
    let half = handle_size / 2.0;
    let square = |cx: f32, cy: f32| Rect::new(cx - half, cy - half, handle_size, handle_size);
    let (mid_x, mid_y) = rect.center();
    [
        (HandlePosition::TopLeft, square(rect.x, rect.y)),
        (HandlePosition::TopRight, square(rect.right(), rect.y)),
        (HandlePosition::BottomLeft, square(rect.x, rect.bottom())),
        (HandlePosition::BottomRight, square(rect.right(), rect.bottom())),
        (HandlePosition::TopCenter, square(mid_x, rect.y)),
        (HandlePosition::BottomCenter, square(mid_x, rect.bottom())),
        (HandlePosition::LeftCenter, square(rect.x, mid_y)),
        (HandlePosition::RightCenter, square(rect.right(), mid_y)),
    ]
}

/// First handle whose square contains `(px, py)`.
pub fn hit_handle(rect: &Rect, handle_size: f32, px: f32, py: f32) -> Option<HandlePosition> {
    resize_handles(rect, handle_size)
        .into_iter()
        .find(|(_, r)| r.contains(px, py))
        .map(|(pos, _)| pos)
}
