use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::{AxisScale, Point};
use crate::interaction::DEFAULT_DETECTION_TIMEOUT;
use crate::render::Color;

use super::axis_label_format::{
    AxisLabelRenderer, AxisLabels, default_x_axis_labels, default_y_axis_labels,
};
use super::series_style::{
    Connection, ConnectionDraw, GridDraw, HighlightDraw, Intersection, IntersectionDraw,
    UnderlineDraw,
};

/// One line of the graph: ordered points plus its draw routines.
///
/// Points must be sorted by x (non-decreasing). A routine set to `None` skips
/// that stage for this series.
#[derive(Debug, Clone)]
pub struct Series {
    pub points: Vec<Point>,
    pub connection: Option<Arc<dyn ConnectionDraw>>,
    pub intersection: Option<Arc<dyn IntersectionDraw>>,
    pub highlight: Option<Arc<dyn HighlightDraw>>,
    pub underline: Option<Arc<dyn UnderlineDraw>>,
}

impl Series {
    /// Series drawn with the default connection and intersection and no
    /// highlight or underline.
    #[must_use]
    pub fn new(points: impl Into<Vec<Point>>) -> Self {
        Self {
            points: points.into(),
            connection: Some(Arc::new(Connection::default())),
            intersection: Some(Arc::new(Intersection::default())),
            highlight: None,
            underline: None,
        }
    }

    #[must_use]
    pub fn with_connection(mut self, connection: impl ConnectionDraw + 'static) -> Self {
        self.connection = Some(Arc::new(connection));
        self
    }

    #[must_use]
    pub fn without_connection(mut self) -> Self {
        self.connection = None;
        self
    }

    #[must_use]
    pub fn with_intersection(mut self, intersection: impl IntersectionDraw + 'static) -> Self {
        self.intersection = Some(Arc::new(intersection));
        self
    }

    #[must_use]
    pub fn without_intersection(mut self) -> Self {
        self.intersection = None;
        self
    }

    #[must_use]
    pub fn with_highlight(mut self, highlight: impl HighlightDraw + 'static) -> Self {
        self.highlight = Some(Arc::new(highlight));
        self
    }

    #[must_use]
    pub fn with_underline(mut self, underline: impl UnderlineDraw + 'static) -> Self {
        self.underline = Some(Arc::new(underline));
        self
    }
}

/// Upper bound on `XAxis::steps` and `YAxis::steps`.
pub const MAX_AXIS_STEPS: u32 = 10_000;

/// Horizontal axis configuration. Lengths are logical pixels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct XAxis {
    /// Pixels between two consecutive x units at zoom 1.
    pub step_size: f64,
    pub steps: u32,
    /// Data distance represented by one `step_size`.
    pub unit: f64,
    pub padding_top: f64,
    pub padding_bottom: f64,
    pub round_to_int: bool,
    #[serde(skip)]
    pub labels: AxisLabels,
}

impl Default for XAxis {
    fn default() -> Self {
        Self {
            step_size: 20.0,
            steps: 10,
            unit: 1.0,
            padding_top: 8.0,
            padding_bottom: 8.0,
            round_to_int: true,
            labels: AxisLabels::Default,
        }
    }
}

impl XAxis {
    #[must_use]
    pub fn with_step_size(mut self, step_size: f64) -> Self {
        self.step_size = step_size;
        self
    }

    #[must_use]
    pub fn with_steps(mut self, steps: u32) -> Self {
        self.steps = steps;
        self
    }

    #[must_use]
    pub fn with_unit(mut self, unit: f64) -> Self {
        self.unit = unit;
        self
    }

    #[must_use]
    pub fn with_round_to_int(mut self, round_to_int: bool) -> Self {
        self.round_to_int = round_to_int;
        self
    }

    #[must_use]
    pub fn with_labels(mut self, renderer: impl AxisLabelRenderer + 'static) -> Self {
        self.labels = AxisLabels::custom(renderer);
        self
    }

    #[must_use]
    pub fn label_texts(&self, scale: AxisScale) -> Vec<String> {
        match &self.labels {
            AxisLabels::Default => default_x_axis_labels(self.steps, scale),
            AxisLabels::Custom(renderer) => {
                renderer.labels(scale.min, scale.step_interval, scale.max)
            }
        }
    }
}

/// Vertical axis configuration. Lengths are logical pixels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YAxis {
    pub steps: u32,
    pub round_to_int: bool,
    pub padding_start: f64,
    pub padding_end: f64,
    #[serde(skip)]
    pub labels: AxisLabels,
}

impl Default for YAxis {
    fn default() -> Self {
        Self {
            steps: 5,
            round_to_int: true,
            padding_start: 16.0,
            padding_end: 8.0,
            labels: AxisLabels::Default,
        }
    }
}

impl YAxis {
    #[must_use]
    pub fn with_steps(mut self, steps: u32) -> Self {
        self.steps = steps;
        self
    }

    #[must_use]
    pub fn with_round_to_int(mut self, round_to_int: bool) -> Self {
        self.round_to_int = round_to_int;
        self
    }

    #[must_use]
    pub fn with_labels(mut self, renderer: impl AxisLabelRenderer + 'static) -> Self {
        self.labels = AxisLabels::custom(renderer);
        self
    }

    #[must_use]
    pub fn label_texts(&self, scale: AxisScale) -> Vec<String> {
        match &self.labels {
            AxisLabels::Default => default_y_axis_labels(self.steps, scale),
            AxisLabels::Custom(renderer) => {
                renderer.labels(scale.min, scale.step_interval, scale.max)
            }
        }
    }
}

/// Long-press drag selection configuration.
#[derive(Debug, Clone)]
pub struct Selection {
    pub enabled: bool,
    /// Vertical guide drawn at the selected x. `None` draws no guide.
    pub highlight: Option<Arc<dyn ConnectionDraw>>,
    pub detection_timeout: Duration,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            enabled: true,
            highlight: Some(Arc::new(Connection::selection_guide())),
            detection_timeout: DEFAULT_DETECTION_TIMEOUT,
        }
    }
}

impl Selection {
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_highlight(mut self, highlight: impl ConnectionDraw + 'static) -> Self {
        self.highlight = Some(Arc::new(highlight));
        self
    }

    #[must_use]
    pub fn without_highlight(mut self) -> Self {
        self.highlight = None;
        self
    }

    #[must_use]
    pub fn with_detection_timeout(mut self, detection_timeout: Duration) -> Self {
        self.detection_timeout = detection_timeout;
        self
    }
}

/// Complete description of what the graph draws.
#[derive(Debug, Clone)]
pub struct Plot {
    pub series: Vec<Series>,
    pub grid: Option<Arc<dyn GridDraw>>,
    pub selection: Selection,
    pub x_axis: XAxis,
    pub y_axis: YAxis,
    pub zoom_enabled: bool,
    pub padding_top: f64,
    pub padding_end: f64,
    /// Gap between the Y-label column and the first point.
    pub horizontal_extra_space: f64,
    pub background: Color,
}

impl Plot {
    #[must_use]
    pub fn new(series: impl Into<Vec<Series>>) -> Self {
        Self {
            series: series.into(),
            grid: None,
            selection: Selection::default(),
            x_axis: XAxis::default(),
            y_axis: YAxis::default(),
            zoom_enabled: true,
            padding_top: 16.0,
            padding_end: 0.0,
            horizontal_extra_space: 6.0,
            background: Color::WHITE,
        }
    }

    #[must_use]
    pub fn with_grid(mut self, grid: impl GridDraw + 'static) -> Self {
        self.grid = Some(Arc::new(grid));
        self
    }

    #[must_use]
    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    #[must_use]
    pub fn with_x_axis(mut self, x_axis: XAxis) -> Self {
        self.x_axis = x_axis;
        self
    }

    #[must_use]
    pub fn with_y_axis(mut self, y_axis: YAxis) -> Self {
        self.y_axis = y_axis;
        self
    }

    #[must_use]
    pub fn with_zoom_enabled(mut self, zoom_enabled: bool) -> Self {
        self.zoom_enabled = zoom_enabled;
        self
    }

    #[must_use]
    pub fn with_padding_top(mut self, padding_top: f64) -> Self {
        self.padding_top = padding_top;
        self
    }

    #[must_use]
    pub fn with_padding_end(mut self, padding_end: f64) -> Self {
        self.padding_end = padding_end;
        self
    }

    #[must_use]
    pub fn with_horizontal_extra_space(mut self, horizontal_extra_space: f64) -> Self {
        self.horizontal_extra_space = horizontal_extra_space;
        self
    }

    #[must_use]
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    /// Every point of every series, in series order.
    #[must_use]
    pub fn flattened_points(&self) -> Vec<Point> {
        self.series
            .iter()
            .flat_map(|series| series.points.iter().copied())
            .collect()
    }
}
