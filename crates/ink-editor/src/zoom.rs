//! Zoom window: a magnified drawing surface over a target rectangle of
//! the page.
//!
//! The window never owns strokes. It reads the page to derive zoom-space
//! display copies, and everything drawn or erased in the window comes back
//! as canvas-space `StrokeMutation`s for the page engine to apply.

use crate::input::InputEvent;
use crate::page::StrokeMutation;
use crate::target::TargetRectController;
use crate::tools::{EraserTool, PenTool, Tool, ToolKind};
use ink_core::config::ZoomConfig;
use ink_core::erase::DEFAULT_ERASE_THRESHOLD;
use ink_core::geometry::{
    TransformDirection, ZoomPoint, ZoomView, derive_display_strokes, transform_stroke,
};
use ink_core::model::{Stroke, StrokeStyle};
use ink_core::simplify::SimplifyOptions;

pub struct ZoomWindow {
    config: ZoomConfig,
    canvas_w: f32,
    canvas_h: f32,
    /// Present while the window is active.
    target: Option<TargetRectController>,
    tool: ToolKind,
    /// Works in zoom space.
    pen: PenTool,
    eraser: EraserTool,
    /// Eraser reach in zoom space.
    erase_threshold: f32,
    /// Next canvas touch places the target rectangle.
    placing_area: bool,
}

impl ZoomWindow {
    pub fn new(config: ZoomConfig, canvas_w: f32, canvas_h: f32) -> Self {
        Self {
            config,
            canvas_w,
            canvas_h,
            target: None,
            tool: ToolKind::Pen,
            pen: PenTool::default().with_id_prefix("zoom-stroke"),
            eraser: EraserTool::default(),
            erase_threshold: DEFAULT_ERASE_THRESHOLD,
            placing_area: false,
        }
    }

    pub fn with_simplify(mut self, options: SimplifyOptions) -> Self {
        self.pen = self.pen.with_simplify(options);
        self
    }

    pub fn is_active(&self) -> bool {
        self.target.is_some()
    }

    pub fn config(&self) -> &ZoomConfig {
        &self.config
    }

    /// Open the window with a fresh target rectangle, centred on the canvas
    /// or on `last_touch` when one is known.
    pub fn activate(&mut self, last_touch: Option<(f32, f32)>) {
        let mut target = TargetRectController::centered(self.canvas_w, self.canvas_h, &self.config);
        if let Some((x, y)) = last_touch {
            target.center_on(x, y);
        }
        log::debug!("zoom: activated over {:?}", target.rect());
        self.target = Some(target);
        self.placing_area = false;
    }

    pub fn deactivate(&mut self) {
        if self.target.take().is_some() {
            log::debug!("zoom: deactivated");
        }
        self.pen.cancel();
        self.eraser.cancel();
        self.placing_area = false;
    }

    pub fn target(&self) -> Option<&TargetRectController> {
        self.target.as_ref()
    }

    /// The current mapping, while active.
    pub fn view(&self) -> Option<ZoomView> {
        let target = self.target.as_ref()?;
        Some(ZoomView {
            viewport_w: self.config.viewport_width,
            viewport_h: self.config.viewport_height,
            pad_x: self.config.pad_x,
            pad_y: self.config.pad_y,
            rect: target.rect(),
            scale_stroke_to_target: self.config.scale_stroke_to_target,
        })
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    /// Switch between drawing and erasing inside the window.
    pub fn set_tool(&mut self, tool: ToolKind) {
        if self.tool != tool {
            self.pen.cancel();
            self.eraser.cancel();
            self.tool = tool;
        }
    }

    pub fn set_style(&mut self, style: StrokeStyle) {
        self.pen.set_style(style);
    }

    pub fn set_pencil_only(&mut self, pencil_only: bool) {
        self.pen.set_pencil_only(pencil_only);
    }

    pub fn set_erase_threshold(&mut self, threshold: f32) {
        self.erase_threshold = threshold;
    }

    pub fn set_canvas_size(&mut self, canvas_w: f32, canvas_h: f32) {
        if !(canvas_w.is_finite() && canvas_h.is_finite() && canvas_w > 0.0 && canvas_h > 0.0) {
            return;
        }
        self.canvas_w = canvas_w;
        self.canvas_h = canvas_h;
        if let Some(target) = self.target.as_mut() {
            target.set_canvas_size(canvas_w, canvas_h);
        }
    }

    /// Whether a zoom-space gesture is in progress.
    pub fn is_capturing(&self) -> bool {
        self.pen.is_active() || self.eraser.is_active()
    }

    pub fn cancel(&mut self) {
        self.pen.cancel();
        self.eraser.cancel();
        if let Some(target) = self.target.as_mut() {
            target.pointer_up();
        }
    }

    // ─── Rendering ───────────────────────────────────────────────────────

    /// Zoom-space copies of every page stroke visible in the window.
    /// Empty while inactive.
    pub fn display_strokes(&self, strokes: &[Stroke]) -> Vec<Stroke> {
        self.view()
            .map(|view| derive_display_strokes(strokes, &view))
            .unwrap_or_default()
    }

    /// The stroke being drawn in the window, mapped onto the canvas.
    pub fn live_preview(&self) -> Option<Stroke> {
        let view = self.view()?;
        transform_stroke(self.pen.current()?, TransformDirection::ZoomToCanvas, &view)
    }

    // ─── Input ───────────────────────────────────────────────────────────

    /// Handle an event from the zoom viewport (zoom-space coordinates).
    /// Returns canvas-space mutations. A pan beginning in the window drops
    /// the stroke or erase in progress.
    pub fn handle_zoom_event(&mut self, event: &InputEvent, strokes: &[Stroke]) -> Vec<StrokeMutation> {
        let Some(view) = self.view() else {
            return vec![];
        };
        if event.is_pan() {
            if matches!(event, InputEvent::PanBegin) && self.is_capturing() {
                log::debug!("zoom: pan takes over the window");
                self.pen.cancel();
                self.eraser.cancel();
            }
            return vec![];
        }
        match self.tool {
            ToolKind::Pen => self
                .pen
                .handle(event, strokes)
                .into_iter()
                .filter_map(|m| Self::mutation_to_canvas(m, &view))
                .collect(),
            ToolKind::Eraser => self.erase(event, strokes, &view),
        }
    }

    fn mutation_to_canvas(mutation: StrokeMutation, view: &ZoomView) -> Option<StrokeMutation> {
        match mutation {
            StrokeMutation::Add(stroke) => {
                match transform_stroke(&stroke, TransformDirection::ZoomToCanvas, view) {
                    Some(mapped) => Some(StrokeMutation::Add(mapped)),
                    None => {
                        log::debug!("zoom: {} did not map onto the canvas", stroke.id);
                        None
                    }
                }
            }
            other => Some(other),
        }
    }

    /// Eraser samples are mapped onto the canvas, and the reach is divided
    /// by the magnification so it covers on the page what it visibly covers
    /// in the window.
    fn erase(&mut self, event: &InputEvent, strokes: &[Stroke], view: &ZoomView) -> Vec<StrokeMutation> {
        let event = match event.position() {
            Some((zx, zy)) => match view.to_canvas(ZoomPoint::new(zx, zy)) {
                Some(canvas) => event.with_position(canvas.x(), canvas.y()),
                None => {
                    self.eraser.cancel();
                    return vec![];
                }
            },
            None => event.clone(),
        };
        self.eraser.set_threshold(self.erase_threshold / view.zoom_factor());
        self.eraser.handle(&event, strokes)
    }

    /// Handle a main-canvas touch aimed at the target rectangle (canvas
    /// coordinates). Returns whether the window consumed it.
    pub fn handle_target_event(&mut self, event: &InputEvent) -> bool {
        let placing = self.placing_area;
        let Some(target) = self.target.as_mut() else {
            return false;
        };
        match event {
            InputEvent::PointerDown { x, y, .. } if placing => {
                target.center_on(*x, *y);
                self.placing_area = false;
                log::debug!("zoom: area placed at {:?}", target.rect());
                true
            }
            InputEvent::PointerDown { x, y, .. } => target.pointer_down(*x, *y),
            InputEvent::PointerMove { x, y, .. } => target.pointer_move(*x, *y),
            InputEvent::PointerUp { .. } | InputEvent::PointerCancel => {
                let was = target.is_interacting();
                target.pointer_up();
                was
            }
            _ => false,
        }
    }

    /// Whether the next canvas touch will place the target rectangle.
    pub fn is_placing_area(&self) -> bool {
        self.placing_area
    }

    /// Drop any rectangle gesture and let the next canvas touch re-centre
    /// the rectangle. Strokes are untouched.
    pub fn select_new_area(&mut self) {
        if let Some(target) = self.target.as_mut() {
            target.pointer_up();
            self.placing_area = true;
            log::debug!("zoom: waiting for a new area");
        }
    }

    /// Remove every stroke with at least one point inside the target
    /// rectangle.
    pub fn clear_area(&self, strokes: &[Stroke]) -> Vec<StrokeMutation> {
        let Some(target) = self.target.as_ref() else {
            return vec![];
        };
        let rect = target.rect();
        strokes
            .iter()
            .filter(|s| s.touches_rect(&rect))
            .map(|s| StrokeMutation::Remove { id: s.id })
            .collect()
    }
}
