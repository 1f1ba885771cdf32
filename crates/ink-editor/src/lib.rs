pub mod input;
pub mod page;
pub mod pan;
pub mod surface;
pub mod target;
pub mod tools;
pub mod zoom;

pub use input::{InputEvent, PointerKind};
pub use page::{MemoryPageStore, PageEngine, PageStore, StrokeMutation};
pub use pan::{PanController, ScrollIndicator, ScrollbarAxis, Scrollbars};
pub use surface::{DrawingSurface, ToolMode};
pub use target::{Corner, TargetRectController, TargetState};
pub use tools::{EraserTool, PenTool, Tool, ToolKind};
pub use zoom::ZoomWindow;
