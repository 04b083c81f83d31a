use serde::{Deserialize, Serialize};

use crate::core::Rect;
use crate::error::{GraphError, GraphResult};

/// Vertical stretch applied to Y-label spacing.
pub const GLOBAL_Y_SCALE: f64 = 1.0;

/// Measured size of one label element, device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LabelSize {
    pub width: f64,
    pub height: f64,
}

impl LabelSize {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    fn is_valid(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width >= 0.0 && self.height >= 0.0
    }
}

/// Top-left corner of a label element in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabelPlacement {
    pub x: f64,
    pub y: f64,
}

/// Result of the second layout pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisLayout {
    pub column_width: f64,
    pub row_height: f64,
    pub x_labels: Vec<LabelPlacement>,
    pub y_labels: Vec<LabelPlacement>,
    /// Area X labels are visible in; the host clips the label row to it.
    pub x_clip: Rect,
}

pub(super) fn validate_label_sizes(axis: &str, sizes: &[LabelSize]) -> GraphResult<()> {
    if let Some(index) = sizes.iter().position(|size| !size.is_valid()) {
        return Err(GraphError::InvalidData(format!(
            "{axis} label {index} size must be finite and >= 0"
        )));
    }
    Ok(())
}

/// Widest label plus both horizontal paddings.
#[must_use]
pub fn measure_column_width(sizes: &[LabelSize], padding_start: f64, padding_end: f64) -> f64 {
    sizes.iter().map(|size| size.width).fold(0.0, f64::max) + padding_start + padding_end
}

/// Tallest label plus both vertical paddings.
#[must_use]
pub fn measure_row_height(sizes: &[LabelSize], padding_top: f64, padding_bottom: f64) -> f64 {
    sizes.iter().map(|size| size.height).fold(0.0, f64::max) + padding_top + padding_bottom
}

/// Places Y labels bottom-up, each vertically centred on its anchor.
///
/// The first anchor is `view_height - padding_bottom`; anchors are spread
/// evenly up to `padding_top`.
#[must_use]
pub fn layout_y_labels(
    sizes: &[LabelSize],
    x: f64,
    view_height: f64,
    padding_top: f64,
    padding_bottom: f64,
) -> Vec<LabelPlacement> {
    let bottom = view_height - padding_bottom;
    let available = bottom - padding_top;
    let intervals = sizes.len().saturating_sub(1).max(1) as f64;
    let spacing = available / intervals * GLOBAL_Y_SCALE;

    let mut anchor = bottom;
    sizes
        .iter()
        .map(|size| {
            let placement = LabelPlacement {
                x,
                y: anchor - size.height / 2.0,
            };
            anchor -= spacing;
            placement
        })
        .collect()
}

/// Places X labels left to right, each horizontally centred on its anchor.
#[must_use]
pub fn layout_x_labels(sizes: &[LabelSize], start: f64, spacing: f64, y: f64) -> Vec<LabelPlacement> {
    let mut anchor = start;
    sizes
        .iter()
        .map(|size| {
            let placement = LabelPlacement {
                x: anchor - size.width / 2.0,
                y,
            };
            anchor += spacing;
            placement
        })
        .collect()
}
