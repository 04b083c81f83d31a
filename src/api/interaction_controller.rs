use std::time::Duration;

use tracing::warn;

use crate::core::{Offset, Viewport};
use crate::error::GraphResult;
use crate::extensions::{GraphPlugin, PluginEvent};
use crate::interaction::{
    DragPhase, GestureInput, GestureSink, GestureStreamError, InteractionMode, InteractionState,
    ZoomPhase,
};
use crate::render::Renderer;

use super::LineGraph;
use super::plugin_dispatch::{dispatch_plugin_event, plugin_context};

/// Applies recognized gestures to the interaction state and forwards them to
/// plugins.
struct GraphGestureSink<'a> {
    viewport: Viewport,
    interaction: &'a mut InteractionState,
    plugins: &'a mut [Box<dyn GraphPlugin>],
}

impl GraphGestureSink<'_> {
    fn emit(&mut self, event: PluginEvent) {
        let context = plugin_context(self.viewport, &*self.interaction);
        dispatch_plugin_event(&mut *self.plugins, &event, context);
    }
}

impl GestureSink for GraphGestureSink<'_> {
    fn on_scroll(&mut self, delta_x: f64) {
        let scroll_offset = self.interaction.scroll_by(delta_x);
        self.emit(PluginEvent::Scrolled { scroll_offset });
    }

    fn on_zoom(&mut self, factor: f64) {
        match self.interaction.apply_zoom(factor) {
            Ok(zoom_scale) => self.emit(PluginEvent::Zoomed { factor, zoom_scale }),
            Err(err) => warn!(error = %err, factor, "ignoring zoom change"),
        }
    }

    fn on_drag_start(&mut self, position: Offset) {
        self.interaction.begin_drag(position.x);
        self.emit(PluginEvent::SelectionStarted);
    }

    fn on_drag(&mut self, position: Offset, _delta: Offset) {
        self.interaction.update_drag(position.x);
    }

    fn on_drag_end(&mut self) {
        self.interaction.end_drag();
        self.emit(PluginEvent::SelectionEnded);
    }
}

impl<R: Renderer> LineGraph<R> {
    #[must_use]
    pub fn interaction_mode(&self) -> InteractionMode {
        self.interaction.mode()
    }

    /// Feeds one pointer batch, clock tick or cancellation to the recognizer.
    pub fn handle_gesture_input(&mut self, input: GestureInput) {
        let mut sink = GraphGestureSink {
            viewport: self.config.viewport,
            interaction: &mut self.interaction,
            plugins: &mut self.plugins,
        };
        self.recognizer.process(input, &mut sink);
        self.sync_interaction_mode();
    }

    /// Drives the recognizer from a fallible input stream.
    ///
    /// An active selection is ended before this returns, including when the
    /// stream yields an error.
    pub fn run_gesture_stream<I>(&mut self, inputs: I) -> GraphResult<()>
    where
        I: IntoIterator<Item = Result<GestureInput, GestureStreamError>>,
    {
        let mut sink = GraphGestureSink {
            viewport: self.config.viewport,
            interaction: &mut self.interaction,
            plugins: &mut self.plugins,
        };
        let result = self.recognizer.run(inputs, &mut sink);
        self.sync_interaction_mode();
        result
    }

    /// Abandons the current gesture, ending an active selection.
    pub fn cancel_gesture(&mut self) {
        self.handle_gesture_input(GestureInput::Cancel);
    }

    /// Instant a host should send `GestureInput::Tick` at, if a long press is
    /// pending.
    #[must_use]
    pub fn next_gesture_deadline(&self) -> Option<Duration> {
        self.recognizer.next_deadline()
    }

    /// Scrolls as if the finger moved `delta_x` device pixels.
    pub fn scroll_by(&mut self, delta_x: f64) -> f64 {
        let scroll_offset = self.interaction.scroll_by(delta_x);
        self.emit_plugin_event(&PluginEvent::Scrolled { scroll_offset });
        scroll_offset
    }

    /// Multiplies the zoom scale by `factor`.
    pub fn zoom_by(&mut self, factor: f64) -> GraphResult<f64> {
        let zoom_scale = self.interaction.apply_zoom(factor)?;
        self.emit_plugin_event(&PluginEvent::Zoomed { factor, zoom_scale });
        Ok(zoom_scale)
    }

    pub fn set_zoom_scale(&mut self, zoom_scale: f64) -> GraphResult<()> {
        self.interaction.set_zoom_scale(zoom_scale)
    }

    fn sync_interaction_mode(&mut self) {
        let mode = if self.interaction.is_dragging() {
            InteractionMode::Selecting
        } else if self.recognizer.zoom_phase() == ZoomPhase::Zooming {
            InteractionMode::Zooming
        } else if self.recognizer.drag_phase() == DragPhase::Panning {
            InteractionMode::Panning
        } else {
            InteractionMode::Idle
        };
        self.interaction.set_mode(mode);
    }
}
