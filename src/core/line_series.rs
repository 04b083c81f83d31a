use serde::{Deserialize, Serialize};

use crate::core::scale::{AxisScale, guard_denominator};
use crate::core::{Offset, Point};

/// Frame-constant mapping from data space to screen space.
///
/// One value is built per render pass and shared by the point projection,
/// the drag-lock test and the axis-label layout so labels and geometry stay
/// pixel-aligned.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotTransform {
    pub min_x: f64,
    pub min_y: f64,
    /// Horizontal pixels per x step (`step_size_px * zoom_scale`).
    pub x_pixel_step: f64,
    pub x_unit: f64,
    /// Left edge of the plotted content before scrolling.
    pub x_start: f64,
    pub scroll_offset: f64,
    /// Screen y of the baseline (`min_y`).
    pub y_bottom: f64,
    /// Vertical pixels per data unit.
    pub y_pixel_step: f64,
}

impl PlotTransform {
    /// Derives the vertical pixel step so the labelled Y range fills
    /// `plot_height`.
    #[must_use]
    pub fn y_pixel_step_for(plot_height: f64, y_scale: AxisScale, y_steps: u32) -> f64 {
        plot_height / guard_denominator(y_scale.range_in_steps(y_steps))
    }

    #[must_use]
    pub fn screen_x(&self, x: f64) -> f64 {
        (x - self.min_x) * self.x_pixel_step / self.x_unit + self.x_start - self.scroll_offset
    }

    #[must_use]
    pub fn screen_y(&self, y: f64) -> f64 {
        self.y_bottom - (y - self.min_y) * self.y_pixel_step
    }

    #[must_use]
    pub fn project(&self, point: Point) -> Offset {
        Offset::new(self.screen_x(point.x), self.screen_y(point.y))
    }

    /// Screen x of `x` with no scroll applied.
    #[must_use]
    pub fn content_x(&self, x: f64) -> f64 {
        (x - self.min_x) * self.x_pixel_step / self.x_unit + self.x_start
    }

    /// Horizontal pixels between two adjacent X-axis labels.
    #[must_use]
    pub fn x_label_spacing(&self, x_scale: AxisScale) -> f64 {
        self.x_pixel_step * x_scale.step_interval / self.x_unit
    }

    /// Half of the pixel step: the capture radius of a drag lock.
    #[must_use]
    pub fn drag_lock_radius(&self) -> f64 {
        self.x_pixel_step / 2.0
    }

    #[must_use]
    pub fn with_scroll_offset(mut self, scroll_offset: f64) -> Self {
        self.scroll_offset = scroll_offset;
        self
    }
}

/// Projects a series into screen offsets, preserving point order.
#[must_use]
pub fn project_points(points: &[Point], transform: &PlotTransform) -> Vec<Offset> {
    #[cfg(feature = "parallel-projection")]
    {
        use rayon::prelude::*;

        points
            .par_iter()
            .map(|point| transform.project(*point))
            .collect()
    }

    #[cfg(not(feature = "parallel-projection"))]
    {
        points
            .iter()
            .map(|point| transform.project(*point))
            .collect()
    }
}

/// Returns `true` when `drag_x` lies within `radius` of `offset.x` (inclusive).
#[must_use]
pub fn is_drag_locked(drag_x: f64, offset: Offset, radius: f64) -> bool {
    (offset.x - radius..=offset.x + radius).contains(&drag_x)
}

/// Index of the point captured by a drag at `drag_x`.
///
/// When several points qualify the last one in point order wins.
#[must_use]
pub fn locate_drag_lock(offsets: &[Offset], drag_x: f64, radius: f64) -> Option<usize> {
    offsets
        .iter()
        .rposition(|offset| is_drag_locked(drag_x, *offset, radius))
}
