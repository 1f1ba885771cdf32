//! Drawing surface: the page, its tools and controllers behind one input
//! entry point.
//!
//! Every touch sequence belongs to exactly one of drawing, erasing, moving
//! the target rectangle or panning. The owner is chosen on touch-down (or
//! on `PanBegin`) and keeps the sequence until it ends. A two-finger pan
//! takes over from whatever was in progress, discarding a half-drawn
//! stroke.

use crate::input::InputEvent;
use crate::page::{PageEngine, PageStore, StrokeMutation};
use crate::pan::{PanController, Scrollbars};
use crate::tools::{EraserTool, PenTool, Tool, ToolKind};
use crate::zoom::ZoomWindow;
use ink_core::config::InkConfig;
use ink_core::error::{InkError, Result};
use ink_core::model::{Stroke, StrokeStyle, StrokeTool};

/// The tool picked in the host's toolbar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ToolMode {
    #[default]
    Pen,
    Pencil,
    Highlighter,
    Eraser,
    Magnifier,
}

impl ToolMode {
    /// Style strokes drawn in this mode get, derived from the base style.
    pub fn stroke_style(self, base: StrokeStyle) -> StrokeStyle {
        match self {
            Self::Pencil => StrokeStyle {
                tool: StrokeTool::Pencil,
                ..base
            },
            Self::Highlighter => StrokeStyle {
                tool: StrokeTool::Highlighter,
                width: base.width * 4.0,
                opacity: 0.4,
                ..base
            },
            Self::Pen | Self::Eraser | Self::Magnifier => StrokeStyle {
                tool: StrokeTool::Pen,
                ..base
            },
        }
    }
}

/// Which controller owns the current touch sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Gesture {
    #[default]
    None,
    Draw,
    Erase,
    Target,
    Pan,
}

/// Horizontal or vertical scrollbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

pub struct DrawingSurface {
    config: InkConfig,
    page: PageEngine,
    page_id: Option<String>,
    mode: ToolMode,
    pen: PenTool,
    eraser: EraserTool,
    pan: PanController<Scrollbars>,
    zoom: ZoomWindow,
    gesture: Gesture,
    /// Last canvas-space touch, used to place the magnifier.
    last_touch: Option<(f32, f32)>,
}

impl DrawingSurface {
    pub fn new(config: InkConfig, viewport_w: f32, viewport_h: f32) -> Self {
        let (canvas_w, canvas_h) = (config.canvas_width, config.canvas_height);
        let simplify = config.simplify_options();

        let mut pen = PenTool::new(ToolMode::Pen.stroke_style(config.stroke_style)).with_simplify(simplify);
        pen.set_pencil_only(config.pencil_only_draw);

        let mut zoom = ZoomWindow::new(config.zoom, canvas_w, canvas_h).with_simplify(simplify);
        zoom.set_style(ToolMode::Pen.stroke_style(config.stroke_style));
        zoom.set_pencil_only(config.pencil_only_draw);
        zoom.set_erase_threshold(config.erase_threshold);

        let bars = Scrollbars::new(canvas_w, canvas_h, viewport_w, viewport_h, &config.scrollbars);
        let pan = PanController::new(canvas_w, canvas_h, viewport_w, viewport_h, bars);

        Self {
            eraser: EraserTool::new(config.erase_threshold),
            config,
            page: PageEngine::new(),
            page_id: None,
            mode: ToolMode::Pen,
            pen,
            pan,
            zoom,
            gesture: Gesture::None,
            last_touch: None,
        }
    }

    pub fn config(&self) -> &InkConfig {
        &self.config
    }

    pub fn page(&self) -> &PageEngine {
        &self.page
    }

    pub fn page_id(&self) -> Option<&str> {
        self.page_id.as_deref()
    }

    pub fn strokes(&self) -> &[Stroke] {
        self.page.strokes()
    }

    pub fn mode(&self) -> ToolMode {
        self.mode
    }

    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    pub fn zoom(&self) -> &ZoomWindow {
        &self.zoom
    }

    pub fn pan(&self) -> &PanController<Scrollbars> {
        &self.pan
    }

    /// The view onto the page was resized, e.g. on rotation.
    pub fn set_viewport_size(&mut self, viewport_w: f32, viewport_h: f32) {
        let (canvas_w, canvas_h) = (self.config.canvas_width, self.config.canvas_height);
        self.pan.set_sizes(canvas_w, canvas_h, viewport_w, viewport_h);
    }

    // ─── Tool mode ───────────────────────────────────────────────────────

    /// Switch tools. Anything in progress is dropped; the magnifier opens
    /// on entering `Magnifier` and closes on leaving it.
    pub fn on_mode_change(&mut self, mode: ToolMode) {
        if mode == self.mode {
            return;
        }
        log::debug!("surface: mode {:?} -> {mode:?}", self.mode);
        self.cancel_gesture();

        let style = mode.stroke_style(self.config.stroke_style);
        self.pen.set_style(style);
        self.zoom.set_style(style);

        if mode == ToolMode::Magnifier {
            self.zoom.activate(self.last_touch);
        } else {
            self.zoom.deactivate();
        }
        self.mode = mode;
    }

    /// Draw or erase inside the magnifier.
    pub fn set_zoom_tool(&mut self, tool: ToolKind) {
        self.zoom.set_tool(tool);
    }

    pub fn set_stroke_style(&mut self, style: StrokeStyle) {
        self.config.stroke_style = style;
        let style = self.mode.stroke_style(style);
        self.pen.set_style(style);
        self.zoom.set_style(style);
    }

    fn cancel_gesture(&mut self) {
        self.pen.cancel();
        self.eraser.cancel();
        self.zoom.cancel();
        self.gesture = Gesture::None;
    }

    // ─── Input ───────────────────────────────────────────────────────────

    /// Handle an event from the main canvas view (viewport coordinates).
    /// Returns how many page mutations were applied.
    pub fn handle_canvas_event(&mut self, event: &InputEvent) -> usize {
        match event {
            InputEvent::PanBegin => {
                if matches!(self.gesture, Gesture::Draw | Gesture::Erase | Gesture::Target) {
                    log::debug!("surface: pan takes over from {:?}", self.gesture);
                }
                self.cancel_gesture();
                self.gesture = Gesture::Pan;
                self.pan.begin();
                0
            }
            InputEvent::PanUpdate {
                translation_x,
                translation_y,
            } => {
                if self.gesture == Gesture::Pan {
                    self.pan.update(*translation_x, *translation_y);
                }
                0
            }
            InputEvent::PanEnd => {
                self.pan.end();
                if self.gesture == Gesture::Pan {
                    self.gesture = Gesture::None;
                }
                0
            }
            _ => self.handle_pointer(event),
        }
    }

    fn handle_pointer(&mut self, event: &InputEvent) -> usize {
        if self.gesture == Gesture::Pan {
            return 0;
        }
        let event = match event.position() {
            Some((vx, vy)) => {
                let (cx, cy) = self.pan.viewport_to_canvas(vx, vy);
                event.with_position(cx, cy)
            }
            None => event.clone(),
        };

        if let InputEvent::PointerDown { x, y, .. } = &event {
            self.last_touch = Some((*x, *y));
            self.gesture = self.gesture_for_down(&event);
        }

        let mutations = match self.gesture {
            Gesture::Draw => self.pen.handle(&event, self.page.strokes()),
            Gesture::Erase => self.eraser.handle(&event, self.page.strokes()),
            Gesture::Target => {
                // The down event was already delivered while picking the owner.
                if !matches!(event, InputEvent::PointerDown { .. }) {
                    self.zoom.handle_target_event(&event);
                }
                vec![]
            }
            Gesture::None | Gesture::Pan => vec![],
        };

        if matches!(event, InputEvent::PointerUp { .. } | InputEvent::PointerCancel) {
            self.gesture = Gesture::None;
        }
        self.apply(mutations)
    }

    fn gesture_for_down(&mut self, event: &InputEvent) -> Gesture {
        match self.mode {
            ToolMode::Magnifier => {
                if self.zoom.handle_target_event(event) {
                    Gesture::Target
                } else {
                    Gesture::None
                }
            }
            ToolMode::Eraser => Gesture::Erase,
            ToolMode::Pen | ToolMode::Pencil | ToolMode::Highlighter => Gesture::Draw,
        }
    }

    /// Handle an event from the magnifier viewport (zoom coordinates).
    /// Returns how many page mutations were applied.
    pub fn handle_zoom_event(&mut self, event: &InputEvent) -> usize {
        if self.mode != ToolMode::Magnifier {
            return 0;
        }
        let mutations = self.zoom.handle_zoom_event(event, self.page.strokes());
        self.apply(mutations)
    }

    fn apply(&mut self, mutations: Vec<StrokeMutation>) -> usize {
        if mutations.is_empty() {
            return 0;
        }
        self.page.apply_all(mutations)
    }

    /// Scroll from a scrollbar thumb drag.
    pub fn drag_scrollbar(&mut self, axis: Axis, thumb_position: f32) {
        let bars = self.pan.indicator();
        let (sx, sy) = self.pan.scroll();
        let target = match axis {
            Axis::Horizontal => (bars.horizontal.offset_for_thumb(thumb_position), sy),
            Axis::Vertical => (sx, bars.vertical.offset_for_thumb(thumb_position)),
        };
        self.pan.set_scroll(target.0, target.1);
    }

    // ─── Rendering ───────────────────────────────────────────────────────

    /// The stroke being drawn right now, in canvas space, from either the
    /// main pen or the magnifier.
    pub fn live_preview(&self) -> Option<Stroke> {
        self.pen.current().cloned().or_else(|| self.zoom.live_preview())
    }

    /// Zoom-space copies of the strokes under the magnifier.
    pub fn zoom_display_strokes(&self) -> Vec<Stroke> {
        self.zoom.display_strokes(self.page.strokes())
    }

    // ─── Magnifier actions ───────────────────────────────────────────────

    /// Remove every stroke touching the target rectangle.
    pub fn clear_zoom_area(&mut self) -> usize {
        let mutations = self.zoom.clear_area(self.page.strokes());
        log::debug!("surface: clearing {} stroke(s) under the magnifier", mutations.len());
        self.apply(mutations)
    }

    pub fn select_new_zoom_area(&mut self) {
        self.zoom.select_new_area();
    }

    // ─── Page lifecycle ──────────────────────────────────────────────────

    /// Load `page_id`, resetting every piece of transient state.
    pub fn load_page(&mut self, store: &dyn PageStore, page_id: &str) -> Result<()> {
        self.cancel_gesture();
        self.pan.reset();
        self.last_touch = None;
        if self.zoom.is_active() {
            self.zoom.activate(None);
        }
        self.page.load(store, page_id)?;
        self.page_id = Some(page_id.to_string());
        log::debug!("surface: page {page_id} ready");
        Ok(())
    }

    /// Flush the page to `store`. On failure the page stays dirty.
    pub fn save_page(&mut self, store: &mut dyn PageStore) -> Result<()> {
        let Some(page_id) = self.page_id.clone() else {
            let err = InkError::Store("no page loaded".into());
            log::error!("surface: save failed: {err}");
            return Err(err);
        };
        self.page.save(store, &page_id).inspect_err(|e| {
            log::error!("surface: saving page {page_id} failed: {e}");
        })
    }
}
