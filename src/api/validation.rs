use crate::error::{GraphError, GraphResult};
use crate::render::Color;

use super::plot::{MAX_AXIS_STEPS, Plot, Series, XAxis, YAxis};

/// Checks structural and numeric plot invariants before a frame is built.
pub(super) fn validate_plot(plot: &Plot) -> GraphResult<()> {
    if plot.series.is_empty() {
        return Err(GraphError::InvalidPlot(
            "plot must contain at least one series".to_owned(),
        ));
    }
    for (index, series) in plot.series.iter().enumerate() {
        validate_series(index, series)?;
    }

    validate_x_axis(&plot.x_axis)?;
    validate_y_axis(&plot.y_axis)?;

    for (name, value) in [
        ("padding_top", plot.padding_top),
        ("padding_end", plot.padding_end),
        ("horizontal_extra_space", plot.horizontal_extra_space),
    ] {
        validate_length(name, value)?;
    }
    validate_color("background", plot.background)
}

fn validate_series(index: usize, series: &Series) -> GraphResult<()> {
    if series.points.is_empty() {
        return Err(GraphError::InvalidPlot(format!(
            "series {index} must contain at least one point"
        )));
    }
    if let Some(position) = series.points.iter().position(|point| !point.is_finite()) {
        return Err(GraphError::InvalidData(format!(
            "series {index} point {position} must have finite coordinates"
        )));
    }
    if let Some(position) = series
        .points
        .windows(2)
        .position(|pair| pair[1].x < pair[0].x)
    {
        return Err(GraphError::InvalidPlot(format!(
            "series {index} must be sorted by x: point {} lies left of point {position}",
            position + 1
        )));
    }
    Ok(())
}

fn validate_x_axis(axis: &XAxis) -> GraphResult<()> {
    validate_steps("x-axis steps", axis.steps)?;
    for (name, value) in [("x-axis step_size", axis.step_size), ("x-axis unit", axis.unit)] {
        if !value.is_finite() || value <= 0.0 {
            return Err(GraphError::InvalidData(format!(
                "{name} must be finite and > 0"
            )));
        }
    }
    validate_length("x-axis padding_top", axis.padding_top)?;
    validate_length("x-axis padding_bottom", axis.padding_bottom)
}

fn validate_y_axis(axis: &YAxis) -> GraphResult<()> {
    validate_steps("y-axis steps", axis.steps)?;
    validate_length("y-axis padding_start", axis.padding_start)?;
    validate_length("y-axis padding_end", axis.padding_end)
}

fn validate_steps(name: &str, steps: u32) -> GraphResult<()> {
    if steps > MAX_AXIS_STEPS {
        return Err(GraphError::InvalidData(format!(
            "{name} must be <= {MAX_AXIS_STEPS}, got {steps}"
        )));
    }
    Ok(())
}

fn validate_length(name: &str, value: f64) -> GraphResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(GraphError::InvalidData(format!(
            "{name} must be finite and >= 0"
        )));
    }
    Ok(())
}

fn validate_color(name: &str, color: Color) -> GraphResult<()> {
    color
        .validate()
        .map_err(|err| GraphError::InvalidData(format!("{name}: {err}")))
}
