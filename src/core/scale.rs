use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::types::Point;
use crate::error::{GraphError, GraphResult};

/// Range and label cadence computed for one axis from the current data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisScale {
    pub min: f64,
    pub max: f64,
    pub step_interval: f64,
}

impl AxisScale {
    #[must_use]
    pub fn range(self) -> f64 {
        self.max - self.min
    }

    /// Data span covered by `steps` fence-post labels starting at `min`.
    #[must_use]
    pub fn range_in_steps(self, steps: u32) -> f64 {
        self.step_interval * f64::from(fence_post_divisor(steps))
    }

    /// Label values `min + i * step_interval` for `i in 0..steps`.
    pub fn values(self, steps: u32) -> impl Iterator<Item = f64> {
        (0..steps).map(move |step| self.min + f64::from(step) * self.step_interval)
    }
}

/// Which end of the data the axis is computed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisKind {
    /// Horizontal axis: the range is split into `steps` intervals.
    X,
    /// Vertical axis: `steps` labels span the range, so `steps - 1` intervals.
    Y,
}

/// Computes the X-axis scale: `(max - min) / steps`.
pub fn x_axis_scale(points: &[Point], steps: u32, round_to_int: bool) -> GraphResult<AxisScale> {
    axis_scale(points, AxisKind::X, steps, round_to_int)
}

/// Computes the Y-axis scale: `(max - min) / max(steps - 1, 1)`.
pub fn y_axis_scale(points: &[Point], steps: u32, round_to_int: bool) -> GraphResult<AxisScale> {
    axis_scale(points, AxisKind::Y, steps, round_to_int)
}

pub fn axis_scale(
    points: &[Point],
    kind: AxisKind,
    steps: u32,
    round_to_int: bool,
) -> GraphResult<AxisScale> {
    let component = |point: &Point| match kind {
        AxisKind::X => point.x,
        AxisKind::Y => point.y,
    };

    let min = points.iter().map(|p| OrderedFloat(component(p))).min();
    let max = points.iter().map(|p| OrderedFloat(component(p))).max();
    let (Some(OrderedFloat(min)), Some(OrderedFloat(max))) = (min, max) else {
        return Err(GraphError::InvalidData(
            "axis scale requires at least one point".to_owned(),
        ));
    };
    if !min.is_finite() || !max.is_finite() {
        return Err(GraphError::InvalidData(
            "axis scale requires finite point values".to_owned(),
        ));
    }

    let divisor = match kind {
        AxisKind::X => steps.max(1),
        AxisKind::Y => fence_post_divisor(steps),
    };
    let interval = (max - min) / f64::from(divisor);
    let step_interval = if round_to_int {
        interval.ceil()
    } else {
        interval
    };

    Ok(AxisScale {
        min,
        max,
        step_interval,
    })
}

fn fence_post_divisor(steps: u32) -> u32 {
    if steps > 1 { steps - 1 } else { 1 }
}

/// Returns `value` when strictly positive, otherwise 1.
///
/// Used for every denominator derived from a scale so a flat series
/// (`min == max`) or a single step never divides by zero.
#[must_use]
pub fn guard_denominator(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::{AxisKind, axis_scale, guard_denominator};
    use crate::core::Point;

    #[test]
    fn single_step_y_axis_uses_unit_divisor() {
        let points = [Point::new(0.0, 2.0), Point::new(1.0, 9.0)];
        let scale = axis_scale(&points, AxisKind::Y, 1, false).expect("scale");
        assert_eq!(scale.step_interval, 7.0);
    }

    #[test]
    fn zero_steps_x_axis_does_not_divide_by_zero() {
        let points = [Point::new(0.0, 0.0), Point::new(4.0, 0.0)];
        let scale = axis_scale(&points, AxisKind::X, 0, false).expect("scale");
        assert_eq!(scale.step_interval, 4.0);
    }

    #[test]
    fn guard_replaces_zero_and_nan() {
        assert_eq!(guard_denominator(0.0), 1.0);
        assert_eq!(guard_denominator(f64::NAN), 1.0);
        assert_eq!(guard_denominator(0.25), 0.25);
    }
}
