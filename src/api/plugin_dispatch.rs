use crate::core::Viewport;
use crate::extensions::{GraphPlugin, PluginContext, PluginEvent};
use crate::interaction::InteractionState;
use crate::render::Renderer;

use super::LineGraph;

pub(super) fn plugin_context(viewport: Viewport, interaction: &InteractionState) -> PluginContext {
    PluginContext {
        viewport,
        interaction_mode: interaction.mode(),
        scroll_offset: interaction.scroll_offset(),
        max_scroll_offset: interaction.max_scroll_offset(),
        zoom_scale: interaction.zoom_scale(),
        dragging: interaction.is_dragging(),
        drag_x: interaction.drag_x(),
    }
}

pub(super) fn dispatch_plugin_event(
    plugins: &mut [Box<dyn GraphPlugin>],
    event: &PluginEvent,
    context: PluginContext,
) {
    for plugin in plugins {
        plugin.on_event(event, context);
    }
}

impl<R: Renderer> LineGraph<R> {
    pub(super) fn plugin_context(&self) -> PluginContext {
        plugin_context(self.config.viewport, &self.interaction)
    }

    pub(super) fn emit_plugin_event(&mut self, event: &PluginEvent) {
        let context = self.plugin_context();
        dispatch_plugin_event(&mut self.plugins, event, context);
    }
}
