//! Target rectangle controller: the canvas region the zoom window magnifies.
//!
//! ```text
//!            down on corner handle
//!   Idle ───────────────────────────▶ Resizing(corner)
//!    │  ▲                                   │
//!    │  └──────────── up / cancel ──────────┘
//!    │ down inside body
//!    ▼
//!  Dragging ─── up / cancel ──▶ Idle
//! ```
//!
//! After every change the rectangle lies fully on the canvas.

use ink_core::config::ZoomConfig;
use ink_core::geometry::{HandlePosition, clamp_rect_to_canvas, hit_handle, resize_handles};
use ink_core::model::Rect;

/// A corner the rectangle can be resized from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    pub fn from_handle(handle: HandlePosition) -> Option<Self> {
        match handle {
            HandlePosition::TopLeft => Some(Self::TopLeft),
            HandlePosition::TopRight => Some(Self::TopRight),
            HandlePosition::BottomLeft => Some(Self::BottomLeft),
            HandlePosition::BottomRight => Some(Self::BottomRight),
            _ => None,
        }
    }

    fn moves_left(self) -> bool {
        matches!(self, Self::TopLeft | Self::BottomLeft)
    }

    fn moves_top(self) -> bool {
        matches!(self, Self::TopLeft | Self::TopRight)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TargetState {
    #[default]
    Idle,
    Dragging,
    Resizing(Corner),
}

pub struct TargetRectController {
    rect: Rect,
    state: TargetState,
    canvas_w: f32,
    canvas_h: f32,
    min_size: f32,
    handle_size: f32,
    /// Last pointer position of the current drag or resize.
    last: Option<(f32, f32)>,
}

impl TargetRectController {
    /// `rect` grows to at least `min_size` on each side before it is
    /// clamped onto the canvas.
    pub fn new(rect: Rect, canvas_w: f32, canvas_h: f32, config: &ZoomConfig) -> Self {
        let mut controller = Self {
            rect,
            state: TargetState::Idle,
            canvas_w,
            canvas_h,
            min_size: config.min_size,
            handle_size: config.handle_size,
            last: None,
        };
        controller.rect = controller.fit(rect);
        controller
    }

    fn fit(&self, rect: Rect) -> Rect {
        let floored = Rect {
            width: rect.width.max(self.min_size),
            height: rect.height.max(self.min_size),
            ..rect
        };
        clamp_rect_to_canvas(floored, self.canvas_w, self.canvas_h)
    }

    /// A rectangle of the configured initial size, centred on the canvas.
    pub fn centered(canvas_w: f32, canvas_h: f32, config: &ZoomConfig) -> Self {
        let rect = Rect::centered_at(
            canvas_w / 2.0,
            canvas_h / 2.0,
            config.initial_width,
            config.initial_height,
        );
        Self::new(rect, canvas_w, canvas_h, config)
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn state(&self) -> TargetState {
        self.state
    }

    pub fn is_interacting(&self) -> bool {
        self.state != TargetState::Idle
    }

    pub fn handles(&self) -> [(HandlePosition, Rect); 8] {
        resize_handles(&self.rect, self.handle_size)
    }

    fn grab_at(&self, x: f32, y: f32) -> TargetState {
        if let Some(corner) =
            hit_handle(&self.rect, self.handle_size, x, y).and_then(Corner::from_handle)
        {
            TargetState::Resizing(corner)
        } else if self.rect.contains(x, y) {
            TargetState::Dragging
        } else {
            TargetState::Idle
        }
    }

    // ─── Pointer input ───────────────────────────────────────────────────

    /// Returns whether the touch grabbed the rectangle.
    pub fn pointer_down(&mut self, x: f32, y: f32) -> bool {
        self.state = self.grab_at(x, y);
        self.last = self.is_interacting().then_some((x, y));
        log::trace!("target: down at ({x:.1}, {y:.1}) -> {:?}", self.state);
        self.is_interacting()
    }

    /// Returns whether the move was consumed.
    pub fn pointer_move(&mut self, x: f32, y: f32) -> bool {
        let Some((lx, ly)) = self.last else {
            return false;
        };
        let (dx, dy) = (x - lx, y - ly);
        match self.state {
            TargetState::Idle => return false,
            TargetState::Dragging => self.drag_by(dx, dy),
            TargetState::Resizing(corner) => self.resize_by(corner, dx, dy),
        }
        self.last = Some((x, y));
        true
    }

    /// Touch up or cancel: back to `Idle` immediately.
    pub fn pointer_up(&mut self) {
        if self.is_interacting() {
            log::debug!("target: settled at {:?}", self.rect);
        }
        self.state = TargetState::Idle;
        self.last = None;
    }

    // ─── Geometry ────────────────────────────────────────────────────────

    pub fn drag_by(&mut self, dx: f32, dy: f32) {
        let moved = Rect {
            x: self.rect.x + dx,
            y: self.rect.y + dy,
            ..self.rect
        };
        self.rect = clamp_rect_to_canvas(moved, self.canvas_w, self.canvas_h);
    }

    /// Move the two edges adjacent to `corner` by `(dx, dy)`. The opposite
    /// edges stay put, the size never drops below the minimum, and moved
    /// edges stop at the canvas border.
    pub fn resize_by(&mut self, corner: Corner, dx: f32, dy: f32) {
        let r = self.rect;
        let (mut left, mut top, mut right, mut bottom) = (r.x, r.y, r.right(), r.bottom());

        if corner.moves_left() {
            left = (left + dx).max(0.0).min(right - self.min_size);
        } else {
            right = (right + dx).min(self.canvas_w).max(left + self.min_size);
        }
        if corner.moves_top() {
            top = (top + dy).max(0.0).min(bottom - self.min_size);
        } else {
            bottom = (bottom + dy).min(self.canvas_h).max(top + self.min_size);
        }

        let resized = Rect::new(left, top, right - left, bottom - top);
        self.rect = clamp_rect_to_canvas(resized, self.canvas_w, self.canvas_h);
    }

    pub fn set_rect(&mut self, rect: Rect) {
        if rect.is_valid() {
            self.rect = self.fit(rect);
        }
    }

    /// Re-centre on `(x, y)`, keeping the size.
    pub fn center_on(&mut self, x: f32, y: f32) {
        if !(x.is_finite() && y.is_finite()) {
            return;
        }
        let moved = Rect::centered_at(x, y, self.rect.width, self.rect.height);
        self.rect = clamp_rect_to_canvas(moved, self.canvas_w, self.canvas_h);
    }

    /// Ignored when the size is not positive and finite.
    pub fn set_canvas_size(&mut self, canvas_w: f32, canvas_h: f32) {
        if !(canvas_w.is_finite() && canvas_h.is_finite() && canvas_w > 0.0 && canvas_h > 0.0) {
            return;
        }
        self.canvas_w = canvas_w;
        self.canvas_h = canvas_h;
        self.rect = clamp_rect_to_canvas(self.rect, canvas_w, canvas_h);
    }

    pub fn canvas_size(&self) -> (f32, f32) {
        (self.canvas_w, self.canvas_h)
    }
}
