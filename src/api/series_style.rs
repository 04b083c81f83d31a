//! Pluggable draw routines attached to a series, the grid and the selection.
//!
//! Each capability is a trait with a default implementation struct. A plot
//! stores them as `Option<Arc<dyn ...>>`: `None` skips that drawing stage.
//! Sizes on the default structs are logical pixels; dash intervals are device
//! pixels.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::{Offset, Point, Rect};
use crate::render::{Color, DashPattern, DrawStyle, Path, RenderFrame, StrokeCap};

/// Draws the segment between two adjacent points (also used for the
/// selection guide line).
pub trait ConnectionDraw: fmt::Debug + Send + Sync {
    fn draw(&self, frame: &mut RenderFrame, start: Offset, end: Offset);
}

/// Draws the marker of one point.
pub trait IntersectionDraw: fmt::Debug + Send + Sync {
    fn draw(&self, frame: &mut RenderFrame, center: Offset, point: Point);
}

/// Draws the marker of the point captured by the active drag selection.
pub trait HighlightDraw: fmt::Debug + Send + Sync {
    fn draw(&self, frame: &mut RenderFrame, center: Offset);
}

/// Draws the closed area between the series and the baseline.
pub trait UnderlineDraw: fmt::Debug + Send + Sync {
    fn draw(&self, frame: &mut RenderFrame, path: Path);
}

/// Draws the grid into `region`.
///
/// `x_step` is the pixel distance per x unit, `y_step` per y unit.
pub trait GridDraw: fmt::Debug + Send + Sync {
    fn draw(&self, frame: &mut RenderFrame, region: Rect, x_step: f64, y_step: f64);
}

/// Straight line segment. Default: blue, 3 px wide, butt cap, solid, opaque.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub color: Color,
    pub stroke_width: f64,
    pub cap: StrokeCap,
    pub dash: Option<DashPattern>,
    pub alpha: f64,
}

impl Default for Connection {
    fn default() -> Self {
        Self {
            color: Color::BLUE,
            stroke_width: 3.0,
            cap: StrokeCap::Butt,
            dash: None,
            alpha: 1.0,
        }
    }
}

impl Connection {
    /// Red dashed 2 px line used as the default selection guide.
    #[must_use]
    pub fn selection_guide() -> Self {
        Self {
            color: Color::RED,
            stroke_width: 2.0,
            dash: Some(DashPattern::new([40.0, 20.0])),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    #[must_use]
    pub fn with_stroke_width(mut self, stroke_width: f64) -> Self {
        self.stroke_width = stroke_width;
        self
    }

    #[must_use]
    pub fn with_dash(mut self, dash: DashPattern) -> Self {
        self.dash = Some(dash);
        self
    }
}

impl ConnectionDraw for Connection {
    fn draw(&self, frame: &mut RenderFrame, start: Offset, end: Offset) {
        let width = frame.to_px(self.stroke_width);
        frame.draw_line(
            self.color,
            start,
            end,
            width,
            self.cap,
            self.dash.clone(),
            self.alpha,
        );
    }
}

/// Circle marker. Default: blue, radius 6, alpha 0.1, filled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Intersection {
    pub color: Color,
    pub radius: f64,
    pub alpha: f64,
    pub style: DrawStyle,
}

impl Default for Intersection {
    fn default() -> Self {
        Self {
            color: Color::BLUE,
            radius: 6.0,
            alpha: 0.1,
            style: DrawStyle::Fill,
        }
    }
}

impl IntersectionDraw for Intersection {
    fn draw(&self, frame: &mut RenderFrame, center: Offset, _point: Point) {
        draw_marker(frame, self.color, self.radius, center, self.alpha, self.style);
    }
}

/// Circle marker for the selected point. Default: black, radius 6, alpha 0.1,
/// filled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Highlight {
    pub color: Color,
    pub radius: f64,
    pub alpha: f64,
    pub style: DrawStyle,
}

impl Default for Highlight {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            radius: 6.0,
            alpha: 0.1,
            style: DrawStyle::Fill,
        }
    }
}

impl HighlightDraw for Highlight {
    fn draw(&self, frame: &mut RenderFrame, center: Offset) {
        draw_marker(frame, self.color, self.radius, center, self.alpha, self.style);
    }
}

/// Area fill. Default: blue, alpha 0.1, filled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Underline {
    pub color: Color,
    pub alpha: f64,
    pub style: DrawStyle,
}

impl Default for Underline {
    fn default() -> Self {
        Self {
            color: Color::BLUE,
            alpha: 0.1,
            style: DrawStyle::Fill,
        }
    }
}

impl UnderlineDraw for Underline {
    fn draw(&self, frame: &mut RenderFrame, path: Path) {
        let style = scale_style(frame, self.style);
        frame.draw_path(path, self.color, style, self.alpha);
    }
}

/// Horizontal grid lines evenly spread from the bottom to the top of the
/// region. Default: 5 lines, 1 px wide.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    pub color: Color,
    pub steps: u32,
    pub line_width: f64,
}

impl Grid {
    #[must_use]
    pub fn new(color: Color) -> Self {
        Self {
            color,
            steps: 5,
            line_width: 1.0,
        }
    }

    #[must_use]
    pub fn with_steps(mut self, steps: u32) -> Self {
        self.steps = steps;
        self
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(Color::LIGHT_GRAY)
    }
}

impl GridDraw for Grid {
    fn draw(&self, frame: &mut RenderFrame, region: Rect, _x_step: f64, _y_step: f64) {
        let divisor = if self.steps > 1 { self.steps - 1 } else { 1 };
        let offset = region.height() / f64::from(divisor);
        let width = frame.to_px(self.line_width);
        for step in 0..self.steps {
            let y = region.bottom - f64::from(step) * offset;
            frame.draw_line(
                self.color,
                Offset::new(region.left, y),
                Offset::new(region.right, y),
                width,
                StrokeCap::Butt,
                None,
                1.0,
            );
        }
    }
}

fn draw_marker(
    frame: &mut RenderFrame,
    color: Color,
    radius: f64,
    center: Offset,
    alpha: f64,
    style: DrawStyle,
) {
    let radius = frame.to_px(radius);
    let style = scale_style(frame, style);
    frame.draw_circle(color, radius, center, alpha, style);
}

fn scale_style(frame: &RenderFrame, style: DrawStyle) -> DrawStyle {
    match style {
        DrawStyle::Fill => DrawStyle::Fill,
        DrawStyle::Stroke { width } => DrawStyle::Stroke {
            width: frame.to_px(width),
        },
    }
}
