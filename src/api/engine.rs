use tracing::debug;

use crate::core::{AxisScale, Density, Viewport};
use crate::error::GraphResult;
use crate::extensions::GraphPlugin;
use crate::interaction::{GestureConfig, GestureRecognizer, InteractionState};
use crate::render::Renderer;

use super::render_frame_builder::{PlotFrame, build_plot_frame, plot_axis_scales};
use super::validation::validate_plot;
use super::{GraphConfig, Plot, PluginEvent};

#[cfg(feature = "cairo-backend")]
use crate::render::CairoContextRenderer;

/// Main orchestration facade consumed by host applications.
///
/// `LineGraph` owns the plot, the cross-frame interaction state, the gesture
/// recognizer, registered plugins and the renderer every frame is sent to.
pub struct LineGraph<R: Renderer> {
    pub(super) renderer: R,
    pub(super) config: GraphConfig,
    pub(super) density: Density,
    pub(super) plot: Plot,
    pub(super) interaction: InteractionState,
    pub(super) recognizer: GestureRecognizer,
    pub(super) plugins: Vec<Box<dyn GraphPlugin>>,
}

impl<R: Renderer> LineGraph<R> {
    pub fn new(renderer: R, config: GraphConfig, plot: Plot) -> GraphResult<Self> {
        let config = config.validate()?;
        validate_plot(&plot)?;
        let density = config.density()?;
        let recognizer = GestureRecognizer::new(gesture_config(&plot, config)?)?;
        debug!(
            width = config.viewport.width,
            height = config.viewport.height,
            density = density.factor(),
            series = plot.series.len(),
            "line graph created"
        );
        Ok(Self {
            renderer,
            config,
            density,
            plot,
            interaction: InteractionState::default(),
            recognizer,
            plugins: Vec::new(),
        })
    }

    #[must_use]
    pub fn config(&self) -> GraphConfig {
        self.config
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.config.viewport
    }

    /// Resizes the surface. The scroll offset is re-clamped on the next frame.
    pub fn set_viewport(&mut self, viewport: Viewport) -> GraphResult<()> {
        self.config.viewport = viewport.ensure_valid()?;
        Ok(())
    }

    #[must_use]
    pub fn density(&self) -> Density {
        self.density
    }

    #[must_use]
    pub fn plot(&self) -> &Plot {
        &self.plot
    }

    /// Replaces the plot. Scroll, zoom and measured sizes carry over.
    pub fn set_plot(&mut self, plot: Plot) -> GraphResult<()> {
        validate_plot(&plot)?;
        self.recognizer.set_config(gesture_config(&plot, self.config)?)?;
        self.plot = plot;
        Ok(())
    }

    #[must_use]
    pub fn interaction_state(&self) -> &InteractionState {
        &self.interaction
    }

    /// Axis scales of the current data.
    pub fn axis_scales(&self) -> GraphResult<(AxisScale, AxisScale)> {
        plot_axis_scales(&self.plot)
    }

    /// Builds the current frame without handing it to the renderer.
    pub fn build_frame(&mut self) -> GraphResult<PlotFrame> {
        build_plot_frame(
            &self.plot,
            &mut self.interaction,
            self.config.viewport,
            self.density,
        )
    }

    /// Builds the current frame, sends it to the renderer and notifies plugins.
    pub fn render(&mut self) -> GraphResult<PlotFrame> {
        let plot_frame = self.build_frame()?;
        self.renderer.render(&plot_frame.frame)?;
        self.finish_render(&plot_frame);
        Ok(plot_frame)
    }

    /// Renders the frame into an external cairo context. The renderer
    /// validates the frame before drawing.
    #[cfg(feature = "cairo-backend")]
    pub fn render_on_cairo_context(&mut self, context: &cairo::Context) -> GraphResult<PlotFrame>
    where
        R: CairoContextRenderer,
    {
        let plot_frame = self.build_frame()?;
        self.renderer
            .render_on_cairo_context(context, &plot_frame.frame)?;
        self.finish_render(&plot_frame);
        Ok(plot_frame)
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    fn finish_render(&mut self, plot_frame: &PlotFrame) {
        if let Some(selection) = &plot_frame.selection {
            self.emit_plugin_event(&PluginEvent::SelectionChanged {
                x: selection.x,
                points: selection.points.clone(),
            });
        }
        let command_count = plot_frame.frame.commands.len();
        self.emit_plugin_event(&PluginEvent::Rendered { command_count });
        debug!(command_count, "frame rendered");
    }
}

fn gesture_config(plot: &Plot, config: GraphConfig) -> GraphResult<GestureConfig> {
    Ok(GestureConfig {
        zoom_enabled: plot.zoom_enabled,
        drag_enabled: plot.selection.enabled,
        detection_timeout: plot.selection.detection_timeout,
        touch_slop_px: config.touch_slop_px()?,
    })
}
