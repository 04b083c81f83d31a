use serde::{Deserialize, Serialize};

use crate::core::{Point, Viewport};
use crate::interaction::InteractionMode;

/// Read-only state snapshot passed to plugin hooks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PluginContext {
    pub viewport: Viewport,
    pub interaction_mode: InteractionMode,
    pub scroll_offset: f64,
    pub max_scroll_offset: f64,
    pub zoom_scale: f64,
    pub dragging: bool,
    pub drag_x: f64,
}

/// Event stream exposed to plugins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PluginEvent {
    /// A long press confirmed a drag selection.
    SelectionStarted,
    /// A frame resolved drag locks: first lock's screen x and the locked
    /// points in series order.
    SelectionChanged { x: f64, points: Vec<Point> },
    SelectionEnded,
    Scrolled { scroll_offset: f64 },
    Zoomed { factor: f64, zoom_scale: f64 },
    LayoutMeasured { column_width: f64, row_height: f64 },
    Rendered { command_count: usize },
}

/// Extension hook interface for bounded custom logic.
///
/// Plugins observe events and read graph context without mutating graph
/// internals directly.
pub trait GraphPlugin: Send {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: &PluginEvent, context: PluginContext);
}
