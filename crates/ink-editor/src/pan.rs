//! Two-finger panning of a small viewport over a large page.
//!
//! The scroll offset always stays in `[0, max(0, canvas - viewport)]` on
//! each axis. A pan gesture reports cumulative translation; the controller
//! subtracts it from the offset captured at `begin()`, so consecutive
//! gestures continue from wherever the previous one stopped.

use ink_core::config::ScrollbarConfig;

/// Something that mirrors the scroll position, like a pair of scrollbars.
pub trait ScrollIndicator {
    fn scroll_changed(&mut self, scroll_x: f32, scroll_y: f32);

    /// Canvas or viewport size changed. Followed by `scroll_changed`.
    fn sizes_changed(&mut self, _canvas_w: f32, _canvas_h: f32, _viewport_w: f32, _viewport_h: f32) {}
}

/// No indicator attached.
impl ScrollIndicator for () {
    fn scroll_changed(&mut self, _scroll_x: f32, _scroll_y: f32) {}
}

fn max_scroll(canvas: f32, viewport: f32) -> f32 {
    let m = canvas - viewport;
    if m.is_finite() { m.max(0.0) } else { 0.0 }
}

fn clamp_scroll(value: f32, max: f32) -> f32 {
    if value.is_finite() { value.clamp(0.0, max) } else { 0.0 }
}

// ─── Pan controller ──────────────────────────────────────────────────────

pub struct PanController<I: ScrollIndicator = Scrollbars> {
    scroll_x: f32,
    scroll_y: f32,
    /// Offset captured when the current gesture began.
    baseline: (f32, f32),
    panning: bool,
    canvas_w: f32,
    canvas_h: f32,
    viewport_w: f32,
    viewport_h: f32,
    indicator: I,
}

impl<I: ScrollIndicator> PanController<I> {
    pub fn new(canvas_w: f32, canvas_h: f32, viewport_w: f32, viewport_h: f32, indicator: I) -> Self {
        Self {
            scroll_x: 0.0,
            scroll_y: 0.0,
            baseline: (0.0, 0.0),
            panning: false,
            canvas_w,
            canvas_h,
            viewport_w,
            viewport_h,
            indicator,
        }
    }

    pub fn scroll(&self) -> (f32, f32) {
        (self.scroll_x, self.scroll_y)
    }

    pub fn max_scroll(&self) -> (f32, f32) {
        (
            max_scroll(self.canvas_w, self.viewport_w),
            max_scroll(self.canvas_h, self.viewport_h),
        )
    }

    pub fn is_panning(&self) -> bool {
        self.panning
    }

    pub fn indicator(&self) -> &I {
        &self.indicator
    }

    /// Start a gesture from the current offset.
    pub fn begin(&mut self) {
        self.baseline = (self.scroll_x, self.scroll_y);
        self.panning = true;
        log::trace!("pan: begin at {:?}", self.baseline);
    }

    /// Apply the gesture's cumulative translation. Ignored outside a gesture.
    pub fn update(&mut self, translation_x: f32, translation_y: f32) {
        if !self.panning {
            return;
        }
        let (bx, by) = self.baseline;
        self.apply(bx - translation_x, by - translation_y);
    }

    pub fn end(&mut self) {
        if self.panning {
            self.panning = false;
            self.baseline = (self.scroll_x, self.scroll_y);
            log::debug!("pan: settled at ({:.1}, {:.1})", self.scroll_x, self.scroll_y);
        }
    }

    /// Set the offset from outside a gesture, e.g. a scrollbar drag.
    pub fn set_scroll(&mut self, scroll_x: f32, scroll_y: f32) {
        self.apply(scroll_x, scroll_y);
        if !self.panning {
            self.baseline = (self.scroll_x, self.scroll_y);
        }
    }

    fn apply(&mut self, scroll_x: f32, scroll_y: f32) {
        let (mx, my) = self.max_scroll();
        self.scroll_x = clamp_scroll(scroll_x, mx);
        self.scroll_y = clamp_scroll(scroll_y, my);
        self.indicator.scroll_changed(self.scroll_x, self.scroll_y);
    }

    /// Viewport touch → canvas coordinates.
    pub fn viewport_to_canvas(&self, x: f32, y: f32) -> (f32, f32) {
        (x + self.scroll_x, y + self.scroll_y)
    }

    /// Ignored when any size is not positive and finite.
    pub fn set_sizes(&mut self, canvas_w: f32, canvas_h: f32, viewport_w: f32, viewport_h: f32) {
        let ok = [canvas_w, canvas_h, viewport_w, viewport_h]
            .iter()
            .all(|v| v.is_finite() && *v > 0.0);
        if !ok {
            return;
        }
        self.canvas_w = canvas_w;
        self.canvas_h = canvas_h;
        self.viewport_w = viewport_w;
        self.viewport_h = viewport_h;
        self.indicator.sizes_changed(canvas_w, canvas_h, viewport_w, viewport_h);
        self.set_scroll(self.scroll_x, self.scroll_y);
    }

    /// Back to the top-left corner, ending any gesture.
    pub fn reset(&mut self) {
        self.panning = false;
        self.set_scroll(0.0, 0.0);
    }
}

// ─── Scrollbars ──────────────────────────────────────────────────────────

/// One scrollbar: a fixed-size thumb on a fixed-length track, mapped
/// linearly onto the scroll range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollbarAxis {
    pub track: f32,
    pub thumb: f32,
    pub content: f32,
    pub viewport: f32,
}

impl ScrollbarAxis {
    fn travel(&self) -> f32 {
        (self.track - self.thumb).max(0.0)
    }

    pub fn max_scroll(&self) -> f32 {
        max_scroll(self.content, self.viewport)
    }

    /// Thumb offset along the track for a scroll offset.
    pub fn thumb_position(&self, offset: f32) -> f32 {
        let max = self.max_scroll();
        if max <= 0.0 {
            return 0.0;
        }
        (offset / max * self.travel()).clamp(0.0, self.travel())
    }

    /// Scroll offset for a thumb position.
    pub fn offset_for_thumb(&self, position: f32) -> f32 {
        let travel = self.travel();
        if travel <= 0.0 {
            return 0.0;
        }
        (position.clamp(0.0, travel) / travel * self.max_scroll()).max(0.0)
    }
}

/// Horizontal and vertical scrollbars kept in step with the pan controller.
#[derive(Debug, Clone, PartialEq)]
pub struct Scrollbars {
    pub horizontal: ScrollbarAxis,
    pub vertical: ScrollbarAxis,
    thumb_x: f32,
    thumb_y: f32,
}

impl Scrollbars {
    pub fn new(
        canvas_w: f32,
        canvas_h: f32,
        viewport_w: f32,
        viewport_h: f32,
        config: &ScrollbarConfig,
    ) -> Self {
        Self {
            horizontal: ScrollbarAxis {
                track: config.horizontal_track,
                thumb: config.thumb_size,
                content: canvas_w,
                viewport: viewport_w,
            },
            vertical: ScrollbarAxis {
                track: config.vertical_track,
                thumb: config.thumb_size,
                content: canvas_h,
                viewport: viewport_h,
            },
            thumb_x: 0.0,
            thumb_y: 0.0,
        }
    }

    pub fn thumbs(&self) -> (f32, f32) {
        (self.thumb_x, self.thumb_y)
    }

}

impl ScrollIndicator for Scrollbars {
    fn scroll_changed(&mut self, scroll_x: f32, scroll_y: f32) {
        self.thumb_x = self.horizontal.thumb_position(scroll_x);
        self.thumb_y = self.vertical.thumb_position(scroll_y);
    }

    fn sizes_changed(&mut self, canvas_w: f32, canvas_h: f32, viewport_w: f32, viewport_h: f32) {
        self.horizontal.content = canvas_w;
        self.horizontal.viewport = viewport_w;
        self.vertical.content = canvas_h;
        self.vertical.viewport = viewport_h;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder(Vec<(f32, f32)>);

    impl ScrollIndicator for Recorder {
        fn scroll_changed(&mut self, scroll_x: f32, scroll_y: f32) {
            self.0.push((scroll_x, scroll_y));
        }
    }

    fn controller() -> PanController<Recorder> {
        PanController::new(1200.0, 1600.0, 400.0, 600.0, Recorder::default())
    }

    #[test]
    fn pan_subtracts_translation_and_clamps() {
        let mut pan = controller();
        pan.begin();
        pan.update(-100.0, -50.0);
        assert_eq!(pan.scroll(), (100.0, 50.0));
        pan.update(-5000.0, 300.0);
        assert_eq!(pan.scroll(), (800.0, 0.0));
        pan.end();
        assert_eq!(pan.indicator().0.len(), 2);
    }

    #[test]
    fn second_gesture_continues_from_first() {
        let mut pan = controller();
        pan.begin();
        pan.update(-100.0, -100.0);
        pan.end();
        pan.begin();
        pan.update(-20.0, 30.0);
        assert_eq!(pan.scroll(), (120.0, 70.0));
    }

    #[test]
    fn update_outside_gesture_ignored() {
        let mut pan = controller();
        pan.update(-100.0, -100.0);
        assert_eq!(pan.scroll(), (0.0, 0.0));
        assert!(pan.indicator().0.is_empty());
    }

    #[test]
    fn viewport_larger_than_canvas_never_scrolls() {
        let mut pan = PanController::new(300.0, 300.0, 400.0, 600.0, ());
        pan.set_scroll(50.0, 50.0);
        assert_eq!(pan.scroll(), (0.0, 0.0));
        assert_eq!(pan.max_scroll(), (0.0, 0.0));
    }

    #[test]
    fn viewport_touch_maps_to_canvas() {
        let mut pan = controller();
        pan.set_scroll(200.0, 300.0);
        assert_eq!(pan.viewport_to_canvas(10.0, 20.0), (210.0, 320.0));
    }

    #[test]
    fn scrollbars_follow_scroll() {
        let config = ScrollbarConfig::default();
        let bars = Scrollbars::new(1200.0, 1600.0, 400.0, 600.0, &config);
        let mut pan = PanController::new(1200.0, 1600.0, 400.0, 600.0, bars);
        pan.set_scroll(400.0, 1000.0);
        // Half of 800 on a 175 travel; all of 1000 on a 125 travel.
        assert_eq!(pan.indicator().thumbs(), (87.5, 125.0));
    }

    #[test]
    fn resize_reclamps_and_moves_thumbs() {
        let config = ScrollbarConfig::default();
        let bars = Scrollbars::new(1200.0, 1600.0, 400.0, 600.0, &config);
        let mut pan = PanController::new(1200.0, 1600.0, 400.0, 600.0, bars);
        pan.set_scroll(400.0, 500.0);

        // A wider viewport halves the horizontal range.
        pan.set_sizes(1200.0, 1600.0, 800.0, 600.0);
        assert_eq!(pan.max_scroll(), (400.0, 1000.0));
        assert_eq!(pan.scroll(), (400.0, 500.0));
        assert_eq!(pan.indicator().horizontal.viewport, 800.0);
        assert_eq!(pan.indicator().thumbs(), (175.0, 62.5));

        pan.set_sizes(1200.0, 1600.0, 1000.0, 600.0);
        assert_eq!(pan.scroll(), (200.0, 500.0));
        assert_eq!(pan.indicator().thumbs(), (175.0, 62.5));

        pan.set_sizes(0.0, 1600.0, 1000.0, 600.0);
        assert_eq!(pan.max_scroll(), (200.0, 1000.0));
    }

    #[test]
    fn thumb_and_offset_are_inverse() {
        let axis = ScrollbarAxis {
            track: 200.0,
            thumb: 25.0,
            content: 1200.0,
            viewport: 400.0,
        };
        assert_eq!(axis.thumb_position(800.0), 175.0);
        assert_eq!(axis.offset_for_thumb(87.5), 400.0);
        assert_eq!(axis.offset_for_thumb(-10.0), 0.0);
        assert_eq!(axis.offset_for_thumb(500.0), 800.0);
    }
}
