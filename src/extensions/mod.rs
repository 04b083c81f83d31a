mod plugins;
mod selection;

pub use plugins::{GraphPlugin, PluginContext, PluginEvent};
pub use selection::SelectionCallbacks;
