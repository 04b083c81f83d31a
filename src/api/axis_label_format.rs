use std::fmt;
use std::sync::Arc;

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::core::AxisScale;

/// Produces the label texts of one axis from its computed scale.
///
/// `min` is the first label value, `step_interval` the data distance between
/// adjacent labels and `max` the largest data value on the axis.
pub trait AxisLabelRenderer: fmt::Debug + Send + Sync {
    fn labels(&self, min: f64, step_interval: f64, max: f64) -> Vec<String>;
}

/// Label source of an axis: the built-in renderer or a custom one.
#[derive(Debug, Clone, Default)]
pub enum AxisLabels {
    #[default]
    Default,
    Custom(Arc<dyn AxisLabelRenderer>),
}

impl AxisLabels {
    #[must_use]
    pub fn custom(renderer: impl AxisLabelRenderer + 'static) -> Self {
        Self::Custom(Arc::new(renderer))
    }
}

/// Adapter turning a closure into an [`AxisLabelRenderer`].
pub struct FnAxisLabels<F>(pub F);

impl<F> fmt::Debug for FnAxisLabels<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnAxisLabels")
    }
}

impl<F> AxisLabelRenderer for FnAxisLabels<F>
where
    F: Fn(f64, f64, f64) -> Vec<String> + Send + Sync,
{
    fn labels(&self, min: f64, step_interval: f64, max: f64) -> Vec<String> {
        (self.0)(min, step_interval, max)
    }
}

/// Formats a value with at most one fractional digit and no trailing zero.
///
/// Ties round half to even: `2.25` renders as `"2.2"`, `12.0` as `"12"`.
#[must_use]
pub fn format_axis_value(value: f64) -> String {
    match Decimal::from_f64(value) {
        Some(decimal) => decimal
            .round_dp_with_strategy(1, RoundingStrategy::MidpointNearestEven)
            .normalize()
            .to_string(),
        None => format!("{value:.1}"),
    }
}

/// Default X labels: one per interval, stopping after the first value past `max`.
#[must_use]
pub fn default_x_axis_labels(steps: u32, scale: AxisScale) -> Vec<String> {
    let mut labels = Vec::new();
    for value in scale.values(steps) {
        labels.push(format_axis_value(value));
        if value > scale.max {
            break;
        }
    }
    labels
}

/// Default Y labels: exactly `steps` values starting at `min`.
#[must_use]
pub fn default_y_axis_labels(steps: u32, scale: AxisScale) -> Vec<String> {
    scale.values(steps).map(format_axis_value).collect()
}
