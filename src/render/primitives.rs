use serde::{Deserialize, Serialize};

use crate::core::Offset;
use crate::error::{GraphError, GraphResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const BLUE: Self = Self::rgb(0.0, 0.0, 1.0);
    pub const RED: Self = Self::rgb(1.0, 0.0, 0.0);
    pub const LIGHT_GRAY: Self = Self::rgb(0.8, 0.8, 0.8);

    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    pub fn validate(self) -> GraphResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(GraphError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

/// Treatment applied to the ends of a stroked line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StrokeCap {
    #[default]
    Butt,
    Round,
    Square,
}

/// On/off dash intervals in device pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashPattern {
    pub intervals: Vec<f64>,
    pub phase: f64,
}

impl DashPattern {
    #[must_use]
    pub fn new(intervals: impl Into<Vec<f64>>) -> Self {
        Self {
            intervals: intervals.into(),
            phase: 0.0,
        }
    }

    pub fn validate(&self) -> GraphResult<()> {
        if self.intervals.len() < 2 || self.intervals.len() % 2 != 0 {
            return Err(GraphError::InvalidData(
                "dash pattern needs an even number (>= 2) of intervals".to_owned(),
            ));
        }
        if self
            .intervals
            .iter()
            .any(|interval| !interval.is_finite() || *interval < 0.0)
        {
            return Err(GraphError::InvalidData(
                "dash intervals must be finite and >= 0".to_owned(),
            ));
        }
        if !self.phase.is_finite() {
            return Err(GraphError::InvalidData(
                "dash phase must be finite".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Whether a closed shape is filled or stroked.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum DrawStyle {
    #[default]
    Fill,
    Stroke {
        width: f64,
    },
}

impl DrawStyle {
    fn validate(self) -> GraphResult<()> {
        match self {
            Self::Fill => Ok(()),
            Self::Stroke { width } if width.is_finite() && width > 0.0 => Ok(()),
            Self::Stroke { .. } => Err(GraphError::InvalidData(
                "stroke width must be finite and > 0".to_owned(),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathVerb {
    MoveTo(Offset),
    LineTo(Offset),
    Close,
}

/// Polyline path in device pixels.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Path {
    pub verbs: Vec<PathVerb>,
}

impl Path {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        self.verbs.push(PathVerb::MoveTo(Offset::new(x, y)));
    }

    pub fn line_to(&mut self, x: f64, y: f64) {
        self.verbs.push(PathVerb::LineTo(Offset::new(x, y)));
    }

    pub fn close(&mut self) {
        self.verbs.push(PathVerb::Close);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.verbs.is_empty()
    }

    fn validate(&self) -> GraphResult<()> {
        let finite = self.verbs.iter().all(|verb| match verb {
            PathVerb::MoveTo(point) | PathVerb::LineTo(point) => point.is_finite(),
            PathVerb::Close => true,
        });
        if !finite {
            return Err(GraphError::InvalidData(
                "path coordinates must be finite".to_owned(),
            ));
        }
        Ok(())
    }
}

/// One backend-agnostic draw operation in device pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    Line {
        color: Color,
        start: Offset,
        end: Offset,
        width: f64,
        cap: StrokeCap,
        dash: Option<DashPattern>,
        alpha: f64,
    },
    Path {
        path: Path,
        color: Color,
        style: DrawStyle,
        alpha: f64,
    },
    Circle {
        color: Color,
        radius: f64,
        center: Offset,
        alpha: f64,
        style: DrawStyle,
    },
    /// Solid rectangle fill, used to mask the axis-label margins.
    Rect {
        color: Color,
        origin: Offset,
        width: f64,
        height: f64,
    },
}

impl DrawCommand {
    pub fn validate(&self) -> GraphResult<()> {
        match self {
            Self::Line {
                color,
                start,
                end,
                width,
                dash,
                alpha,
                ..
            } => {
                if !start.is_finite() || !end.is_finite() {
                    return Err(GraphError::InvalidData(
                        "line coordinates must be finite".to_owned(),
                    ));
                }
                if !width.is_finite() || *width <= 0.0 {
                    return Err(GraphError::InvalidData(
                        "line stroke width must be finite and > 0".to_owned(),
                    ));
                }
                if let Some(dash) = dash {
                    dash.validate()?;
                }
                validate_alpha(*alpha)?;
                color.validate()
            }
            Self::Path {
                path,
                color,
                style,
                alpha,
            } => {
                path.validate()?;
                style.validate()?;
                validate_alpha(*alpha)?;
                color.validate()
            }
            Self::Circle {
                color,
                radius,
                center,
                alpha,
                style,
            } => {
                if !center.is_finite() {
                    return Err(GraphError::InvalidData(
                        "circle center must be finite".to_owned(),
                    ));
                }
                if !radius.is_finite() || *radius < 0.0 {
                    return Err(GraphError::InvalidData(
                        "circle radius must be finite and >= 0".to_owned(),
                    ));
                }
                style.validate()?;
                validate_alpha(*alpha)?;
                color.validate()
            }
            Self::Rect {
                color,
                origin,
                width,
                height,
            } => {
                if !origin.is_finite() || !width.is_finite() || !height.is_finite() {
                    return Err(GraphError::InvalidData(
                        "rect geometry must be finite".to_owned(),
                    ));
                }
                if *width < 0.0 || *height < 0.0 {
                    return Err(GraphError::InvalidData(
                        "rect size must be >= 0".to_owned(),
                    ));
                }
                color.validate()
            }
        }
    }
}

fn validate_alpha(alpha: f64) -> GraphResult<()> {
    if !alpha.is_finite() || !(0.0..=1.0).contains(&alpha) {
        return Err(GraphError::InvalidData(
            "alpha must be finite and in [0, 1]".to_owned(),
        ));
    }
    Ok(())
}
