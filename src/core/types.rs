use serde::{Deserialize, Serialize};

use crate::error::{GraphError, GraphResult};

/// Drawing surface size in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    pub fn ensure_valid(self) -> GraphResult<Self> {
        if !self.is_valid() {
            return Err(GraphError::InvalidViewport {
                width: self.width,
                height: self.height,
            });
        }
        Ok(self)
    }

    #[must_use]
    pub fn width_px(self) -> f64 {
        f64::from(self.width)
    }

    #[must_use]
    pub fn height_px(self) -> f64 {
        f64::from(self.height)
    }
}

/// One sample of a series in data space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// A position in screen space (device pixels, origin top-left).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Offset {
    pub x: f64,
    pub y: f64,
}

impl Offset {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl std::ops::Sub for Offset {
    type Output = Offset;

    fn sub(self, rhs: Self) -> Self::Output {
        Offset::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::Add for Offset {
    type Output = Offset;

    fn add(self, rhs: Self) -> Self::Output {
        Offset::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// Axis-aligned rectangle given by its edges, in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    #[must_use]
    pub const fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    #[must_use]
    pub fn width(self) -> f64 {
        self.right - self.left
    }

    #[must_use]
    pub fn height(self) -> f64 {
        self.bottom - self.top
    }
}

/// Device pixels per logical pixel.
///
/// Plot dimensions (paddings, stroke widths, radii, step sizes) are logical
/// and converted with this factor at layout and render time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Density(f64);

impl Density {
    pub const ONE: Self = Self(1.0);

    pub fn new(factor: f64) -> GraphResult<Self> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(GraphError::InvalidData(
                "density must be finite and > 0".to_owned(),
            ));
        }
        Ok(Self(factor))
    }

    #[must_use]
    pub fn factor(self) -> f64 {
        self.0
    }

    #[must_use]
    pub fn to_px(self, logical: f64) -> f64 {
        logical * self.0
    }
}

impl Default for Density {
    fn default() -> Self {
        Self::ONE
    }
}
