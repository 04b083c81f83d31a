use crate::core::Point;

use super::plugins::{GraphPlugin, PluginContext, PluginEvent};

type StartCallback = Box<dyn FnMut() + Send>;
type EndCallback = Box<dyn FnMut() + Send>;
type SelectionCallback = Box<dyn FnMut(f64, &[Point]) + Send>;

/// Plugin forwarding selection events to plain closures.
///
/// `on_selection` runs for every frame rendered while a drag holds at least
/// one lock.
pub struct SelectionCallbacks {
    id: String,
    on_start: Option<StartCallback>,
    on_end: Option<EndCallback>,
    on_selection: Option<SelectionCallback>,
}

impl SelectionCallbacks {
    pub const DEFAULT_ID: &'static str = "selection-callbacks";

    #[must_use]
    pub fn new() -> Self {
        Self::with_id(Self::DEFAULT_ID)
    }

    #[must_use]
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            on_start: None,
            on_end: None,
            on_selection: None,
        }
    }

    #[must_use]
    pub fn on_selection_start(mut self, callback: impl FnMut() + Send + 'static) -> Self {
        self.on_start = Some(Box::new(callback));
        self
    }

    #[must_use]
    pub fn on_selection_end(mut self, callback: impl FnMut() + Send + 'static) -> Self {
        self.on_end = Some(Box::new(callback));
        self
    }

    #[must_use]
    pub fn on_selection(mut self, callback: impl FnMut(f64, &[Point]) + Send + 'static) -> Self {
        self.on_selection = Some(Box::new(callback));
        self
    }
}

impl Default for SelectionCallbacks {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphPlugin for SelectionCallbacks {
    fn id(&self) -> &str {
        &self.id
    }

    fn on_event(&mut self, event: &PluginEvent, _context: PluginContext) {
        match event {
            PluginEvent::SelectionStarted => {
                if let Some(callback) = &mut self.on_start {
                    callback();
                }
            }
            PluginEvent::SelectionEnded => {
                if let Some(callback) = &mut self.on_end {
                    callback();
                }
            }
            PluginEvent::SelectionChanged { x, points } => {
                if let Some(callback) = &mut self.on_selection {
                    callback(*x, points);
                }
            }
            _ => {}
        }
    }
}
