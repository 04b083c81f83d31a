pub mod line_series;
pub mod scale;
pub mod types;

pub use line_series::{PlotTransform, is_drag_locked, locate_drag_lock, project_points};
pub use scale::{AxisKind, AxisScale, axis_scale, guard_denominator, x_axis_scale, y_axis_scale};
pub use types::{Density, Offset, Point, Rect, Viewport};
