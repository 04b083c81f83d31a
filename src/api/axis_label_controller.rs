use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{AxisScale, Rect};
use crate::error::GraphResult;
use crate::render::Renderer;

use super::axis_layout::{
    AxisLayout, LabelSize, layout_x_labels, layout_y_labels, measure_column_width,
    measure_row_height, validate_label_sizes,
};
use super::render_frame_builder::resolve_plot_transform;
use super::{LineGraph, PluginEvent};

/// Label texts produced by the first layout pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisLabelTexts {
    pub x_scale: AxisScale,
    pub y_scale: AxisScale,
    pub x_labels: Vec<String>,
    pub y_labels: Vec<String>,
}

impl<R: Renderer> LineGraph<R> {
    /// First layout pass: the label strings the host has to measure.
    pub fn axis_labels(&self) -> GraphResult<AxisLabelTexts> {
        let (x_scale, y_scale) = self.axis_scales()?;
        Ok(AxisLabelTexts {
            x_scale,
            y_scale,
            x_labels: self.plot.x_axis.label_texts(x_scale),
            y_labels: self.plot.y_axis.label_texts(y_scale),
        })
    }

    /// Second layout pass: stores the measured column width and row height,
    /// then places every label with the transform the next frame will use.
    ///
    /// `x_sizes` and `y_sizes` are the measured sizes of the labels returned
    /// by [`LineGraph::axis_labels`], in device pixels.
    pub fn layout_axes(
        &mut self,
        x_sizes: &[LabelSize],
        y_sizes: &[LabelSize],
    ) -> GraphResult<AxisLayout> {
        validate_label_sizes("x-axis", x_sizes)?;
        validate_label_sizes("y-axis", y_sizes)?;

        let density = self.density;
        let x_axis = &self.plot.x_axis;
        let y_axis = &self.plot.y_axis;
        let x_padding_top = density.to_px(x_axis.padding_top);
        let y_padding_start = density.to_px(y_axis.padding_start);

        let column_width = measure_column_width(
            y_sizes,
            y_padding_start,
            density.to_px(y_axis.padding_end),
        );
        let row_height = measure_row_height(
            x_sizes,
            x_padding_top,
            density.to_px(x_axis.padding_bottom),
        );
        self.interaction
            .set_measured_sizes(column_width, row_height)?;
        debug!(column_width, row_height, "axis labels measured");

        let (x_scale, y_scale) = self.axis_scales()?;
        let viewport = self.config.viewport;
        let transform = resolve_plot_transform(
            &self.plot,
            &mut self.interaction,
            viewport,
            density,
            x_scale,
            y_scale,
        );

        let width = viewport.width_px();
        let height = viewport.height_px();
        let row_top = height - row_height;
        let y_labels = layout_y_labels(
            y_sizes,
            y_padding_start,
            height,
            density.to_px(self.plot.padding_top),
            row_height,
        );
        let x_labels = layout_x_labels(
            x_sizes,
            transform.x_start - transform.scroll_offset,
            transform.x_label_spacing(x_scale),
            row_top + x_padding_top,
        );
        let x_clip = Rect::new(
            column_width,
            row_top,
            width - density.to_px(self.plot.padding_end),
            height,
        );

        self.emit_plugin_event(&PluginEvent::LayoutMeasured {
            column_width,
            row_height,
        });

        Ok(AxisLayout {
            column_width,
            row_height,
            x_labels,
            y_labels,
            x_clip,
        })
    }
}
