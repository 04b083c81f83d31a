use std::time::Duration;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, trace, warn};

use crate::core::Offset;
use crate::error::{GraphError, GraphResult};

use super::pointer::{GestureInput, GestureStreamError, PointerEvent, PointerId};
use super::timer::CancellableTimer;

/// Long-press time before a touch becomes a drag selection.
pub const DEFAULT_DETECTION_TIMEOUT: Duration = Duration::from_millis(100);

/// Movement (device px) below which pan/zoom motion counts as jitter.
pub const DEFAULT_TOUCH_SLOP_PX: f64 = 8.0;

/// Recognizer tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GestureConfig {
    pub zoom_enabled: bool,
    pub drag_enabled: bool,
    pub detection_timeout: Duration,
    pub touch_slop_px: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            zoom_enabled: true,
            drag_enabled: true,
            detection_timeout: DEFAULT_DETECTION_TIMEOUT,
            touch_slop_px: DEFAULT_TOUCH_SLOP_PX,
        }
    }
}

impl GestureConfig {
    pub fn validate(self) -> GraphResult<Self> {
        if !self.touch_slop_px.is_finite() || self.touch_slop_px < 0.0 {
            return Err(GraphError::InvalidData(
                "touch slop must be finite and >= 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoomPhase {
    Idle,
    /// Two pointers down, accumulating scale below the slop threshold.
    Tracking,
    Zooming,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DragPhase {
    Idle,
    /// First pointer down, long-press timer armed.
    Waiting,
    /// Horizontal movement beat the long-press timer.
    Panning,
    Dragging,
}

/// Receiver of recognized gestures.
pub trait GestureSink {
    /// Horizontal finger movement in device pixels (positive = rightwards).
    fn on_scroll(&mut self, _delta_x: f64) {}
    /// Multiplicative zoom change for one event.
    fn on_zoom(&mut self, _factor: f64) {}
    fn on_drag_start(&mut self, _position: Offset) {}
    fn on_drag(&mut self, _position: Offset, _delta: Offset) {}
    fn on_drag_end(&mut self) {}
}

/// Pan / pinch-zoom / long-press-drag arbitration over a pointer stream.
///
/// Two independent machines run per gesture instance (first down until the
/// last pointer lifts). The zoom machine owns every instance that ever had two
/// pointers down at once; the drag machine only runs for single-pointer
/// instances.
#[derive(Debug, Clone)]
pub struct GestureRecognizer {
    config: GestureConfig,
    pointers: IndexMap<PointerId, Offset>,
    now: Duration,
    zoom: ZoomPhase,
    accumulated_zoom: f64,
    drag: DragPhase,
    primary: Option<PointerId>,
    down_position: Offset,
    last_position: Offset,
    multi_touch: bool,
    timer: CancellableTimer,
}

impl GestureRecognizer {
    pub fn new(config: GestureConfig) -> GraphResult<Self> {
        Ok(Self {
            config: config.validate()?,
            pointers: IndexMap::new(),
            now: Duration::ZERO,
            zoom: ZoomPhase::Idle,
            accumulated_zoom: 1.0,
            drag: DragPhase::Idle,
            primary: None,
            down_position: Offset::ZERO,
            last_position: Offset::ZERO,
            multi_touch: false,
            timer: CancellableTimer::default(),
        })
    }

    #[must_use]
    pub fn config(&self) -> GestureConfig {
        self.config
    }

    /// Replaces the tuning. Takes effect for the next gesture instance, except
    /// that disabling zoom stops an ongoing zoom and disabling drag cancels a
    /// pending long press. A drag already in progress runs to its end.
    pub fn set_config(&mut self, config: GestureConfig) -> GraphResult<()> {
        self.config = config.validate()?;
        if !config.zoom_enabled {
            self.zoom = ZoomPhase::Idle;
        }
        if !config.drag_enabled && self.timer.cancel() {
            debug!("pending long press cancelled by config change");
        }
        Ok(())
    }

    #[must_use]
    pub fn zoom_phase(&self) -> ZoomPhase {
        self.zoom
    }

    #[must_use]
    pub fn drag_phase(&self) -> DragPhase {
        self.drag
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag == DragPhase::Dragging
    }

    #[must_use]
    pub fn active_pointers(&self) -> usize {
        self.pointers.len()
    }

    /// Instant at which a pending long-press resolves, if any.
    ///
    /// Hosts without a steady event flow schedule a `GestureInput::Tick` for
    /// this instant.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timer.deadline()
    }

    pub fn process<S: GestureSink + ?Sized>(&mut self, input: GestureInput, sink: &mut S) {
        match input {
            GestureInput::Pointer(event) => {
                self.advance_clock(event.uptime, sink);
                self.handle_pointer_event(&event, sink);
            }
            GestureInput::Tick(now) => self.advance_clock(now, sink),
            GestureInput::Cancel => self.cancel(sink),
        }
    }

    /// Drives the recognizer from a fallible stream until it ends.
    ///
    /// Whatever way the loop is left, an active drag is ended (exactly once)
    /// before control returns; an `Err` item is then surfaced as
    /// `GraphError::GestureStream`.
    pub fn run<I, S>(&mut self, inputs: I, sink: &mut S) -> GraphResult<()>
    where
        I: IntoIterator<Item = Result<GestureInput, GestureStreamError>>,
        S: GestureSink + ?Sized,
    {
        let mut session = DragSession::new(self, sink);
        for input in inputs {
            match input {
                Ok(input) => session.process(input),
                Err(err) => {
                    warn!(error = %err, "gesture stream aborted");
                    return Err(GraphError::GestureStream(err.reason));
                }
            }
        }
        Ok(())
    }

    /// Abandons the current gesture instance, ending an active drag.
    pub fn cancel<S: GestureSink + ?Sized>(&mut self, sink: &mut S) {
        if self.drag == DragPhase::Dragging {
            self.finish_drag(sink);
        }
        if self.timer.cancel() {
            debug!("drag candidate cancelled");
        }
        self.drag = DragPhase::Idle;
        self.zoom = ZoomPhase::Idle;
        self.pointers.clear();
        self.primary = None;
        self.multi_touch = false;
    }

    fn advance_clock<S: GestureSink + ?Sized>(&mut self, now: Duration, sink: &mut S) {
        if now > self.now {
            self.now = now;
        }
        if self.drag == DragPhase::Waiting && self.timer.take_if_expired(self.now) {
            self.drag = DragPhase::Dragging;
            debug!(
                x = self.last_position.x,
                y = self.last_position.y,
                "drag confirmed"
            );
            sink.on_drag_start(self.last_position);
        }
    }

    fn handle_pointer_event<S: GestureSink + ?Sized>(&mut self, event: &PointerEvent, sink: &mut S) {
        let previous: PointerSnapshot = self
            .pointers
            .iter()
            .map(|(id, position)| (*id, *position))
            .collect();
        let mut first_down = None;
        let mut primary_move = None;
        let mut primary_up = false;

        for change in &event.changes {
            let tracked = self.pointers.contains_key(&change.id);
            match (change.pressed, tracked) {
                (true, false) => {
                    self.pointers.insert(change.id, change.position);
                    if first_down.is_none() {
                        first_down = Some((change.id, change.position));
                    }
                }
                (true, true) => {
                    self.pointers.insert(change.id, change.position);
                    if self.primary == Some(change.id) {
                        primary_move = Some(change.position);
                    }
                }
                (false, true) => {
                    self.pointers.shift_remove(&change.id);
                    if self.primary == Some(change.id) {
                        primary_up = true;
                    }
                }
                (false, false) => {}
            }
        }

        if previous.is_empty() {
            if let Some((id, position)) = first_down {
                self.begin_instance(id, position);
            }
        }

        let consumed = event.any_consumed();
        self.update_zoom(&previous, consumed, sink);
        self.update_drag(primary_move, primary_up, consumed, sink);

        if self.pointers.is_empty() && self.primary.is_some() {
            self.end_instance();
        }
    }

    fn begin_instance(&mut self, id: PointerId, position: Offset) {
        self.primary = Some(id);
        self.down_position = position;
        self.last_position = position;
        self.multi_touch = false;
        self.accumulated_zoom = 1.0;
        self.drag = DragPhase::Waiting;
        if self.config.drag_enabled {
            self.timer.arm(self.now, self.config.detection_timeout);
        }
        debug!(x = position.x, y = position.y, "gesture started");
    }

    fn end_instance(&mut self) {
        if self.timer.cancel() {
            debug!("drag candidate cancelled");
        }
        if self.drag == DragPhase::Waiting {
            self.drag = DragPhase::Idle;
        }
        self.primary = None;
        self.multi_touch = false;
        trace!("gesture ended");
    }

    fn update_zoom<S: GestureSink + ?Sized>(
        &mut self,
        previous: &[(PointerId, Offset)],
        consumed: bool,
        sink: &mut S,
    ) {
        if self.pointers.len() < 2 {
            if self.zoom != ZoomPhase::Idle {
                debug!("zoom ended");
                self.zoom = ZoomPhase::Idle;
            }
            return;
        }

        if !self.multi_touch {
            self.multi_touch = true;
            if matches!(self.drag, DragPhase::Waiting | DragPhase::Panning) {
                self.timer.cancel();
                self.drag = DragPhase::Idle;
                debug!("single-pointer gesture bypassed by multi-touch");
            }
        }

        if !self.config.zoom_enabled || self.drag == DragPhase::Dragging {
            return;
        }
        if self.zoom == ZoomPhase::Idle {
            self.zoom = ZoomPhase::Tracking;
            self.accumulated_zoom = 1.0;
            debug!("zoom tracking");
        }
        if consumed {
            return;
        }

        let Some((previous_size, current_size)) = centroid_sizes(previous, &self.pointers) else {
            return;
        };
        if previous_size <= 0.0 {
            return;
        }
        let change = current_size / previous_size;

        match self.zoom {
            ZoomPhase::Tracking => {
                self.accumulated_zoom *= change;
                let motion = (1.0 - self.accumulated_zoom).abs() * previous_size;
                if motion > self.config.touch_slop_px {
                    self.zoom = ZoomPhase::Zooming;
                    debug!(accumulated = self.accumulated_zoom, "zoom past slop");
                }
            }
            ZoomPhase::Zooming => {
                if change != 1.0 {
                    sink.on_zoom(change);
                }
            }
            ZoomPhase::Idle => {}
        }
    }

    fn update_drag<S: GestureSink + ?Sized>(
        &mut self,
        primary_move: Option<Offset>,
        primary_up: bool,
        consumed: bool,
        sink: &mut S,
    ) {
        match self.drag {
            DragPhase::Idle => {}
            DragPhase::Waiting => {
                if primary_up || consumed {
                    self.timer.cancel();
                    self.drag = DragPhase::Idle;
                    debug!(primary_up, consumed, "drag candidate cancelled");
                    return;
                }
                if let Some(position) = primary_move {
                    self.last_position = position;
                    let travelled = position.x - self.down_position.x;
                    if travelled.abs() > self.config.touch_slop_px {
                        self.timer.cancel();
                        self.drag = DragPhase::Panning;
                        debug!(travelled, "pan started");
                        sink.on_scroll(travelled - self.config.touch_slop_px.copysign(travelled));
                    }
                }
            }
            DragPhase::Panning => {
                if let Some(position) = primary_move {
                    let delta_x = position.x - self.last_position.x;
                    self.last_position = position;
                    if delta_x != 0.0 {
                        sink.on_scroll(delta_x);
                    }
                }
                if primary_up {
                    self.drag = DragPhase::Idle;
                    debug!("pan ended");
                }
            }
            DragPhase::Dragging => {
                if consumed {
                    self.finish_drag(sink);
                    return;
                }
                if let Some(position) = primary_move {
                    let delta = position - self.last_position;
                    self.last_position = position;
                    sink.on_drag(position, delta);
                }
                if primary_up {
                    self.finish_drag(sink);
                }
            }
        }
    }

    fn finish_drag<S: GestureSink + ?Sized>(&mut self, sink: &mut S) {
        self.drag = DragPhase::Idle;
        debug!("drag ended");
        sink.on_drag_end();
    }
}

/// Scoped "drag active" acquisition over a recognizer and its sink.
///
/// Dropping the session cancels the gesture instance, which ends an active
/// drag. This covers early returns, `?` propagation and unwinding alike.
pub struct DragSession<'a, S: GestureSink + ?Sized> {
    recognizer: &'a mut GestureRecognizer,
    sink: &'a mut S,
}

impl<'a, S: GestureSink + ?Sized> DragSession<'a, S> {
    pub fn new(recognizer: &'a mut GestureRecognizer, sink: &'a mut S) -> Self {
        Self { recognizer, sink }
    }

    pub fn process(&mut self, input: GestureInput) {
        self.recognizer.process(input, &mut *self.sink);
    }

    #[must_use]
    pub fn recognizer(&self) -> &GestureRecognizer {
        self.recognizer
    }
}

impl<S: GestureSink + ?Sized> Drop for DragSession<'_, S> {
    fn drop(&mut self) {
        self.recognizer.cancel(&mut *self.sink);
    }
}

/// Mean distance to the centroid, before and after, over pointers present in
/// both snapshots.
/// Tracked pointer positions captured before a batch is applied.
type PointerSnapshot = SmallVec<[(PointerId, Offset); 4]>;

fn centroid_sizes(
    previous: &[(PointerId, Offset)],
    current: &IndexMap<PointerId, Offset>,
) -> Option<(f64, f64)> {
    let pairs: SmallVec<[(Offset, Offset); 4]> = current
        .iter()
        .filter_map(|(id, now)| {
            previous
                .iter()
                .find(|(before_id, _)| before_id == id)
                .map(|(_, before)| (*before, *now))
        })
        .collect();
    if pairs.len() < 2 {
        return None;
    }

    let before: SmallVec<[Offset; 4]> = pairs.iter().map(|(before, _)| *before).collect();
    let after: SmallVec<[Offset; 4]> = pairs.iter().map(|(_, after)| *after).collect();
    Some((centroid_size(&before), centroid_size(&after)))
}

fn centroid_size(points: &[Offset]) -> f64 {
    let count = points.len() as f64;
    let sum = points
        .iter()
        .fold(Offset::ZERO, |acc, point| acc + *point);
    let centroid = Offset::new(sum.x / count, sum.y / count);
    points
        .iter()
        .map(|point| point.distance(centroid))
        .sum::<f64>()
        / count
}
