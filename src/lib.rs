//! line-graph-rs: interactive line-graph engine.
//!
//! The crate turns numeric series plus a plot configuration into ordered,
//! backend-agnostic draw commands, and raw multi-pointer input into pan,
//! pinch-zoom and long-press selection. Text measurement and label widgets
//! stay with the host, which talks to the engine through a two-pass label
//! layout protocol.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{GraphConfig, LineGraph, Plot, PlotFrame, Series};
pub use error::{GraphError, GraphResult};
