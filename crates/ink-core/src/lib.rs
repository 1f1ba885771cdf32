pub mod config;
pub mod erase;
pub mod error;
pub mod format;
pub mod geometry;
pub mod id;
pub mod model;
pub mod path;
pub mod simplify;

pub use config::{InkConfig, ScrollbarConfig, ZoomConfig};
pub use erase::{DEFAULT_ERASE_THRESHOLD, split_stroke};
pub use error::{InkError, Result};
pub use format::{LegacyPath, import_legacy};
pub use geometry::{
    CanvasPoint, HandlePosition, TransformDirection, ZoomPoint, ZoomView, clamp_rect_to_canvas,
    derive_display_strokes, transform_stroke,
};
pub use id::StrokeId;
pub use model::*;
pub use simplify::{SimplifyOptions, SimplifyPreset, simplify_committed};
