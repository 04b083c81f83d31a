use std::time::Duration;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

use crate::core::Offset;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PointerId(pub u64);

/// State of one pointer within an event batch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerChange {
    pub id: PointerId,
    pub position: Offset,
    pub pressed: bool,
    /// Set when another handler already consumed this position change.
    pub consumed: bool,
}

impl PointerChange {
    #[must_use]
    pub fn pressed(id: u64, x: f64, y: f64) -> Self {
        Self {
            id: PointerId(id),
            position: Offset::new(x, y),
            pressed: true,
            consumed: false,
        }
    }

    #[must_use]
    pub fn released(id: u64, x: f64, y: f64) -> Self {
        Self {
            pressed: false,
            ..Self::pressed(id, x, y)
        }
    }

    #[must_use]
    pub fn consumed(mut self) -> Self {
        self.consumed = true;
        self
    }
}

/// One batch of pointer changes delivered at `uptime`.
///
/// Batches usually carry one or two pointers, hence the inline storage.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerEvent {
    pub uptime: Duration,
    pub changes: SmallVec<[PointerChange; 2]>,
}

impl PointerEvent {
    #[must_use]
    pub fn new(uptime: Duration, changes: impl IntoIterator<Item = PointerChange>) -> Self {
        Self {
            uptime,
            changes: changes.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn single(uptime: Duration, change: PointerChange) -> Self {
        Self::new(uptime, [change])
    }

    #[must_use]
    pub fn change(&self, id: PointerId) -> Option<&PointerChange> {
        self.changes.iter().find(|change| change.id == id)
    }

    #[must_use]
    pub fn any_consumed(&self) -> bool {
        self.changes.iter().any(|change| change.consumed)
    }
}

/// Input accepted by the gesture recognizer.
#[derive(Debug, Clone, PartialEq)]
pub enum GestureInput {
    Pointer(PointerEvent),
    /// Clock advance with no pointer activity; lets a pending long-press fire.
    Tick(Duration),
    /// The host cancelled the whole gesture (e.g. a parent took the touch).
    Cancel,
}

impl From<PointerEvent> for GestureInput {
    fn from(event: PointerEvent) -> Self {
        Self::Pointer(event)
    }
}

/// Abnormal end of a pointer event stream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct GestureStreamError {
    pub reason: String,
}

impl GestureStreamError {
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}
