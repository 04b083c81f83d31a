mod gesture;
mod pointer;
mod timer;

pub use gesture::{
    DEFAULT_DETECTION_TIMEOUT, DEFAULT_TOUCH_SLOP_PX, DragPhase, DragSession, GestureConfig,
    GestureRecognizer, GestureSink, ZoomPhase,
};
pub use pointer::{GestureInput, GestureStreamError, PointerChange, PointerEvent, PointerId};
pub use timer::CancellableTimer;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{GraphError, GraphResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InteractionMode {
    #[default]
    Idle,
    Panning,
    Zooming,
    Selecting,
}

/// Cross-frame mutable context of one graph instance.
///
/// Only the gesture path and the label-measurement path write to it; the
/// render pass reads it and re-clamps the scroll offset against the bound it
/// derives for the frame. Every other value is recomputed per frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InteractionState {
    mode: InteractionMode,
    scroll_offset: f64,
    max_scroll_offset: f64,
    zoom_scale: f64,
    drag_x: f64,
    dragging: bool,
    column_width: f64,
    row_height: f64,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self {
            mode: InteractionMode::Idle,
            scroll_offset: 0.0,
            max_scroll_offset: 0.0,
            zoom_scale: 1.0,
            drag_x: 0.0,
            dragging: false,
            column_width: 0.0,
            row_height: 0.0,
        }
    }
}

impl InteractionState {
    #[must_use]
    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: InteractionMode) {
        self.mode = mode;
    }

    #[must_use]
    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    #[must_use]
    pub fn max_scroll_offset(&self) -> f64 {
        self.max_scroll_offset
    }

    #[must_use]
    pub fn zoom_scale(&self) -> f64 {
        self.zoom_scale
    }

    #[must_use]
    pub fn drag_x(&self) -> f64 {
        self.drag_x
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    #[must_use]
    pub fn column_width(&self) -> f64 {
        self.column_width
    }

    #[must_use]
    pub fn row_height(&self) -> f64 {
        self.row_height
    }

    /// Applies a finger movement of `delta` pixels.
    ///
    /// Moving the content right (positive delta) reveals earlier data, so the
    /// offset decreases. The result is clamped to `[0, max_scroll_offset]`.
    pub fn scroll_by(&mut self, delta: f64) -> f64 {
        if delta.is_finite() {
            self.scroll_offset = (self.scroll_offset - delta).clamp(0.0, self.max_scroll_offset);
        }
        trace!(delta, scroll_offset = self.scroll_offset, "scroll");
        self.scroll_offset
    }

    /// Multiplies the zoom scale by `factor`.
    ///
    /// A factor that would underflow the scale to zero or overflow it is
    /// rejected and the scale is left unchanged.
    pub fn apply_zoom(&mut self, factor: f64) -> GraphResult<f64> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(GraphError::InvalidData(
                "zoom factor must be finite and > 0".to_owned(),
            ));
        }
        let next = self.zoom_scale * factor;
        if !next.is_finite() || next <= 0.0 {
            return Err(GraphError::InvalidData(format!(
                "zoom factor {factor} takes zoom scale {} out of range",
                self.zoom_scale
            )));
        }
        self.zoom_scale = next;
        trace!(factor, zoom_scale = self.zoom_scale, "zoom");
        Ok(self.zoom_scale)
    }

    pub fn set_zoom_scale(&mut self, zoom_scale: f64) -> GraphResult<()> {
        if !zoom_scale.is_finite() || zoom_scale <= 0.0 {
            return Err(GraphError::InvalidData(
                "zoom scale must be finite and > 0".to_owned(),
            ));
        }
        self.zoom_scale = zoom_scale;
        Ok(())
    }

    pub fn begin_drag(&mut self, x: f64) {
        self.drag_x = x;
        self.dragging = true;
        self.mode = InteractionMode::Selecting;
    }

    pub fn update_drag(&mut self, x: f64) {
        self.drag_x = x;
    }

    pub fn end_drag(&mut self) {
        self.dragging = false;
        self.mode = InteractionMode::Idle;
    }

    /// Stores the measured Y-label column width and X-label row height.
    pub fn set_measured_sizes(&mut self, column_width: f64, row_height: f64) -> GraphResult<()> {
        for (name, value) in [("column width", column_width), ("row height", row_height)] {
            if !value.is_finite() || value < 0.0 {
                return Err(GraphError::InvalidData(format!(
                    "measured {name} must be finite and >= 0"
                )));
            }
        }
        self.column_width = column_width;
        self.row_height = row_height;
        Ok(())
    }

    /// Records this frame's scroll bound and clamps the offset into it.
    pub fn clamp_scroll(&mut self, max_scroll_offset: f64) -> f64 {
        self.max_scroll_offset = max_scroll_offset.max(0.0);
        self.scroll_offset = self.scroll_offset.clamp(0.0, self.max_scroll_offset);
        self.scroll_offset
    }
}

#[cfg(test)]
mod tests {
    use super::{InteractionMode, InteractionState};

    #[test]
    fn scroll_is_clamped_to_bounds() {
        let mut state = InteractionState::default();
        state.clamp_scroll(50.0);
        assert_eq!(state.scroll_by(-80.0), 50.0);
        assert_eq!(state.scroll_by(20.0), 30.0);
        assert_eq!(state.scroll_by(100.0), 0.0);
    }

    #[test]
    fn shrinking_bound_pulls_offset_back() {
        let mut state = InteractionState::default();
        state.clamp_scroll(100.0);
        state.scroll_by(-90.0);
        assert_eq!(state.clamp_scroll(40.0), 40.0);
        assert_eq!(state.clamp_scroll(-5.0), 0.0);
        assert_eq!(state.max_scroll_offset(), 0.0);
    }

    #[test]
    fn zoom_rejects_non_positive_factor() {
        let mut state = InteractionState::default();
        assert!(state.apply_zoom(0.0).is_err());
        assert!(state.apply_zoom(f64::INFINITY).is_err());
        assert_eq!(state.apply_zoom(2.0).expect("zoom"), 2.0);
    }

    #[test]
    fn zoom_keeps_scale_when_product_leaves_range() {
        let mut state = InteractionState::default();
        state.apply_zoom(1e-200).expect("zoom");
        assert!(state.apply_zoom(1e-200).is_err());
        assert_eq!(state.zoom_scale(), 1e-200);

        let mut state = InteractionState::default();
        state.apply_zoom(1e200).expect("zoom");
        assert!(state.apply_zoom(1e200).is_err());
        assert_eq!(state.zoom_scale(), 1e200);
    }

    #[test]
    fn drag_lifecycle_tracks_mode() {
        let mut state = InteractionState::default();
        state.begin_drag(12.0);
        assert!(state.is_dragging());
        assert_eq!(state.mode(), InteractionMode::Selecting);
        state.update_drag(30.0);
        assert_eq!(state.drag_x(), 30.0);
        state.end_drag();
        assert!(!state.is_dragging());
        assert_eq!(state.mode(), InteractionMode::Idle);
    }
}
