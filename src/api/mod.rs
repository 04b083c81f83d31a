mod axis_label_controller;
mod axis_label_format;
mod axis_layout;
mod engine;
mod engine_config;
mod interaction_controller;
mod plot;
mod plugin_dispatch;
mod plugin_registry;
mod render_frame_builder;
mod series_style;
mod validation;

pub use axis_label_controller::AxisLabelTexts;
pub use axis_label_format::{
    AxisLabelRenderer, AxisLabels, FnAxisLabels, default_x_axis_labels, default_y_axis_labels,
    format_axis_value,
};
pub use axis_layout::{
    AxisLayout, GLOBAL_Y_SCALE, LabelPlacement, LabelSize, layout_x_labels, layout_y_labels,
    measure_column_width, measure_row_height,
};
pub use engine::LineGraph;
pub use engine_config::GraphConfig;
pub use plot::{MAX_AXIS_STEPS, Plot, Selection, Series, XAxis, YAxis};
pub use render_frame_builder::{
    DragLock, PlotFrame, SelectionSnapshot, build_plot_frame, plot_axis_scales,
};
pub use series_style::{
    Connection, ConnectionDraw, Grid, GridDraw, Highlight, HighlightDraw, Intersection,
    IntersectionDraw, Underline, UnderlineDraw,
};

pub use crate::extensions::{GraphPlugin, PluginContext, PluginEvent};
