use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{
    AxisScale, Density, Offset, PlotTransform, Point, Rect, Viewport, is_drag_locked,
    locate_drag_lock, project_points, x_axis_scale, y_axis_scale,
};
use crate::error::GraphResult;
use crate::interaction::InteractionState;
use crate::render::{Path, RenderFrame};

use super::plot::Plot;
use super::validation::validate_plot;

/// Point of one series captured by the active drag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragLock {
    pub point_index: usize,
    pub point: Point,
    pub offset: Offset,
}

/// Selection reported for a frame: the first lock's screen x and the locked
/// points in series order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionSnapshot {
    pub x: f64,
    pub points: Vec<Point>,
}

/// Everything one render pass produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotFrame {
    pub frame: RenderFrame,
    pub transform: PlotTransform,
    pub x_scale: AxisScale,
    pub y_scale: AxisScale,
    /// Grid region: data extent between the first point and the right padding.
    pub plot_region: Rect,
    /// Drag locks keyed by series index, in series order.
    pub drag_locks: IndexMap<usize, DragLock>,
    /// Present only while dragging with at least one lock.
    pub selection: Option<SelectionSnapshot>,
}

/// Computes both axis scales from the flattened points of `plot`.
pub fn plot_axis_scales(plot: &Plot) -> GraphResult<(AxisScale, AxisScale)> {
    let points = plot.flattened_points();
    let x_scale = x_axis_scale(&points, plot.x_axis.steps, plot.x_axis.round_to_int)?;
    let y_scale = y_axis_scale(&points, plot.y_axis.steps, plot.y_axis.round_to_int)?;
    Ok((x_scale, y_scale))
}

/// Builds the frame transform, recording the scroll bound for this frame and
/// clamping the scroll offset into it.
pub(super) fn resolve_plot_transform(
    plot: &Plot,
    interaction: &mut InteractionState,
    viewport: Viewport,
    density: Density,
    x_scale: AxisScale,
    y_scale: AxisScale,
) -> PlotTransform {
    let width = viewport.width_px();
    let height = viewport.height_px();
    let y_bottom = height - interaction.row_height();
    let plot_height = y_bottom - density.to_px(plot.padding_top);

    let unscrolled = PlotTransform {
        min_x: x_scale.min,
        min_y: y_scale.min,
        x_pixel_step: density.to_px(plot.x_axis.step_size) * interaction.zoom_scale(),
        x_unit: plot.x_axis.unit,
        x_start: interaction.column_width() + density.to_px(plot.horizontal_extra_space),
        scroll_offset: 0.0,
        y_bottom,
        y_pixel_step: PlotTransform::y_pixel_step_for(plot_height, y_scale, plot.y_axis.steps),
    };

    let content_right = unscrolled.content_x(x_scale.max) + density.to_px(plot.padding_end);
    let max_scroll_offset = (content_right - width).max(0.0);
    let previous = interaction.scroll_offset();
    let scroll_offset = interaction.clamp_scroll(max_scroll_offset);
    if scroll_offset != previous {
        debug!(previous, scroll_offset, max_scroll_offset, "scroll offset clamped");
    }
    unscrolled.with_scroll_offset(scroll_offset)
}

/// Runs one render pass of `plot` into a fresh frame.
///
/// The only state written is the scroll bound (and the clamped offset).
pub fn build_plot_frame(
    plot: &Plot,
    interaction: &mut InteractionState,
    viewport: Viewport,
    density: Density,
) -> GraphResult<PlotFrame> {
    let viewport = viewport.ensure_valid()?;
    validate_plot(plot)?;
    let (x_scale, y_scale) = plot_axis_scales(plot)?;
    let transform = resolve_plot_transform(plot, interaction, viewport, density, x_scale, y_scale);

    let width = viewport.width_px();
    let height = viewport.height_px();
    let column_width = interaction.column_width();
    let padding_end = density.to_px(plot.padding_end);
    let plot_right = width - padding_end;
    let y_bottom = transform.y_bottom;

    let mut frame = RenderFrame::new(viewport, density);

    let plot_region = Rect::new(
        transform.x_start,
        y_bottom - y_scale.range() * transform.y_pixel_step,
        plot_right,
        y_bottom,
    );
    if let Some(grid) = &plot.grid {
        grid.draw(
            &mut frame,
            plot_region,
            transform.x_pixel_step / transform.x_unit,
            transform.y_pixel_step,
        );
    }

    let dragging = interaction.is_dragging();
    let drag_x = interaction.drag_x();
    let radius = transform.drag_lock_radius();
    let mut drag_locks = IndexMap::new();

    for (series_index, series) in plot.series.iter().enumerate() {
        let offsets = project_points(&series.points, &transform);

        if let Some(underline) = &series.underline {
            underline.draw(&mut frame, underline_path(&offsets, y_bottom));
        }

        for (index, offset) in offsets.iter().enumerate() {
            if let (Some(connection), Some(next)) = (&series.connection, offsets.get(index + 1)) {
                connection.draw(&mut frame, *offset, *next);
            }
            if dragging && is_drag_locked(drag_x, *offset, radius) {
                continue;
            }
            if let Some(intersection) = &series.intersection {
                intersection.draw(&mut frame, *offset, series.points[index]);
            }
        }

        if dragging {
            if let Some(point_index) = locate_drag_lock(&offsets, drag_x, radius) {
                let lock = DragLock {
                    point_index,
                    point: series.points[point_index],
                    offset: offsets[point_index],
                };
                trace!(series_index, point_index, x = lock.offset.x, "drag lock");
                drag_locks.insert(series_index, lock);
            }
        }
    }

    frame.draw_rect(plot.background, Offset::ZERO, column_width, height);
    frame.draw_rect(
        plot.background,
        Offset::new(plot_right, 0.0),
        padding_end,
        height,
    );

    let in_bounds = |x: f64| (column_width..=plot_right).contains(&x);
    let mut selection = None;
    if dragging {
        if let Some((_, first)) = drag_locks.first() {
            let x = first.offset.x;
            if let (Some(guide), true) = (&plot.selection.highlight, in_bounds(x)) {
                guide.draw(&mut frame, Offset::new(x, y_bottom), Offset::new(x, 0.0));
            }
            for (series_index, lock) in &drag_locks {
                if !in_bounds(lock.offset.x) {
                    continue;
                }
                if let Some(highlight) = &plot.series[*series_index].highlight {
                    highlight.draw(&mut frame, lock.offset);
                }
            }
            selection = Some(SelectionSnapshot {
                x,
                points: drag_locks.values().map(|lock| lock.point).collect(),
            });
        }
    }

    debug!(
        series = plot.series.len(),
        commands = frame.commands.len(),
        scroll_offset = transform.scroll_offset,
        locks = drag_locks.len(),
        "plot frame built"
    );

    Ok(PlotFrame {
        frame,
        transform,
        x_scale,
        y_scale,
        plot_region,
        drag_locks,
        selection,
    })
}

/// Closed area under the series: down to the baseline at both ends.
fn underline_path(offsets: &[Offset], baseline: f64) -> Path {
    let mut path = Path::new();
    let (Some(first), Some(last)) = (offsets.first(), offsets.last()) else {
        return path;
    };
    path.move_to(first.x, baseline);
    for offset in offsets {
        path.line_to(offset.x, offset.y);
    }
    path.line_to(last.x, baseline);
    path.line_to(first.x, baseline);
    path
}
