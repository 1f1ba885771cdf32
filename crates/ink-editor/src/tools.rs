//! Tool system for page interactions.
//!
//! Each tool translates input events into `StrokeMutation`s that the
//! [`PageEngine`](crate::page::PageEngine) applies. Tools work in the space
//! of the surface that fed them events and never convert coordinates; the
//! zoom window maps a zoom-space tool's output onto the canvas itself.
//!
//! | Tool | Down | Move | Up |
//! |------|------|------|----|
//! | **Pen** | open stroke | append point | simplify, commit or discard |
//! | **Eraser** | erase | erase | stop |

use crate::input::{InputEvent, PointerKind};
use crate::page::StrokeMutation;
use ink_core::erase::{DEFAULT_ERASE_THRESHOLD, split_stroke};
use ink_core::id::StrokeId;
use ink_core::model::*;
use ink_core::simplify::{SimplifyOptions, simplify_committed};

/// The active tool determines how input events are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    Pen,
    Eraser,
}

/// Trait for tools that handle input and produce mutations.
pub trait Tool {
    fn kind(&self) -> ToolKind;

    /// Handle an input event against the current page strokes, returning
    /// zero or more mutations.
    fn handle(&mut self, event: &InputEvent, strokes: &[Stroke]) -> Vec<StrokeMutation>;

    /// Drop any gesture in progress without producing mutations.
    fn cancel(&mut self);

    /// Whether a gesture is in progress.
    fn is_active(&self) -> bool;
}

// ─── Pen Tool ────────────────────────────────────────────────────────────

pub struct PenTool {
    style: StrokeStyle,
    simplify: SimplifyOptions,
    /// Ignore finger touches; only stylus contact starts a stroke.
    pencil_only: bool,
    /// Prefix for generated stroke ids.
    id_prefix: &'static str,
    current: Option<Stroke>,
}

impl Default for PenTool {
    fn default() -> Self {
        Self::new(StrokeStyle::default())
    }
}

impl PenTool {
    pub fn new(style: StrokeStyle) -> Self {
        Self {
            style,
            simplify: SimplifyOptions::default(),
            pencil_only: false,
            id_prefix: "stroke",
            current: None,
        }
    }

    pub fn with_simplify(mut self, options: SimplifyOptions) -> Self {
        self.simplify = options;
        self
    }

    pub fn with_id_prefix(mut self, prefix: &'static str) -> Self {
        self.id_prefix = prefix;
        self
    }

    pub fn set_pencil_only(&mut self, pencil_only: bool) {
        self.pencil_only = pencil_only;
    }

    /// Applies to the next stroke; one in progress keeps its style.
    pub fn set_style(&mut self, style: StrokeStyle) {
        self.style = style;
    }

    pub fn style(&self) -> StrokeStyle {
        self.style
    }

    /// The stroke being drawn, for live preview.
    pub fn current(&self) -> Option<&Stroke> {
        self.current.as_ref()
    }

    fn begin(&mut self, event: &InputEvent) {
        if self.pencil_only && event.pointer_kind() != Some(PointerKind::Stylus) {
            log::trace!("pen: ignoring non-stylus contact");
            return;
        }
        let Some(first) = event.sample() else {
            return;
        };
        if !first.is_finite() {
            return;
        }
        let id = StrokeId::with_prefix(self.id_prefix);
        log::trace!("pen: open {id} at ({:.1}, {:.1})", first.x, first.y);
        self.current = Some(Stroke::begin(id, first, self.style));
    }

    fn extend(&mut self, event: &InputEvent) {
        let (Some(stroke), Some(p)) = (self.current.as_mut(), event.sample()) else {
            return;
        };
        if p.is_finite() {
            log::trace!("pen: {} += ({:.1}, {:.1})", stroke.id, p.x, p.y);
            stroke.points.push(p);
        }
    }

    fn finish(&mut self) -> Vec<StrokeMutation> {
        let Some(stroke) = self.current.take() else {
            return vec![];
        };
        if stroke.len() < 2 || stroke.path_length() == 0.0 {
            log::debug!("pen: discarding degenerate stroke {} ({} points)", stroke.id, stroke.len());
            return vec![];
        }
        let stroke = simplify_committed(stroke, &self.simplify);
        log::debug!("pen: commit {} ({} points)", stroke.id, stroke.len());
        vec![StrokeMutation::Add(stroke)]
    }
}

impl Tool for PenTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Pen
    }

    fn handle(&mut self, event: &InputEvent, _strokes: &[Stroke]) -> Vec<StrokeMutation> {
        match event {
            InputEvent::PointerDown { .. } => {
                // A second contact restarts rather than joining strokes.
                self.cancel();
                self.begin(event);
                vec![]
            }
            InputEvent::PointerMove { .. } => {
                self.extend(event);
                vec![]
            }
            InputEvent::PointerUp { .. } => self.finish(),
            InputEvent::PointerCancel => {
                self.cancel();
                vec![]
            }
            _ => vec![],
        }
    }

    fn cancel(&mut self) {
        if let Some(stroke) = self.current.take() {
            log::debug!("pen: cancelled {} ({} points)", stroke.id, stroke.len());
        }
    }

    fn is_active(&self) -> bool {
        self.current.is_some()
    }
}

// ─── Eraser Tool ─────────────────────────────────────────────────────────

pub struct EraserTool {
    threshold: f32,
    erasing: bool,
}

impl Default for EraserTool {
    fn default() -> Self {
        Self::new(DEFAULT_ERASE_THRESHOLD)
    }
}

impl EraserTool {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            erasing: false,
        }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn set_threshold(&mut self, threshold: f32) {
        self.threshold = threshold;
    }

    /// Mutations for one eraser sample at `(x, y)` with an explicit reach.
    /// Strokes the eraser misses produce nothing.
    pub fn erase_with(strokes: &[Stroke], x: f32, y: f32, threshold: f32) -> Vec<StrokeMutation> {
        if !(x.is_finite() && y.is_finite()) {
            return vec![];
        }
        strokes
            .iter()
            .filter_map(|stroke| {
                let pieces = split_stroke(stroke, x, y, threshold)?;
                Some(if pieces.is_empty() {
                    StrokeMutation::Remove { id: stroke.id }
                } else {
                    StrokeMutation::Replace {
                        id: stroke.id,
                        with: pieces,
                    }
                })
            })
            .collect()
    }

    pub fn erase(&self, strokes: &[Stroke], x: f32, y: f32) -> Vec<StrokeMutation> {
        Self::erase_with(strokes, x, y, self.threshold)
    }
}

impl Tool for EraserTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Eraser
    }

    fn handle(&mut self, event: &InputEvent, strokes: &[Stroke]) -> Vec<StrokeMutation> {
        match event {
            InputEvent::PointerDown { x, y, .. } => {
                self.erasing = true;
                self.erase(strokes, *x, *y)
            }
            InputEvent::PointerMove { x, y, .. } if self.erasing => self.erase(strokes, *x, *y),
            InputEvent::PointerUp { .. } | InputEvent::PointerCancel => {
                self.erasing = false;
                vec![]
            }
            _ => vec![],
        }
    }

    fn cancel(&mut self) {
        self.erasing = false;
    }

    fn is_active(&self) -> bool {
        self.erasing
    }
}
