use std::time::Duration;

use line_graph::api::{
    GraphConfig, LineGraph, MAX_AXIS_STEPS, Plot, Selection, Series, XAxis, YAxis,
};
use line_graph::core::{Point, Viewport};
use line_graph::interaction::{GestureInput, PointerChange, PointerEvent};
use line_graph::render::{Color, NullRenderer};
use line_graph::{GraphError, GraphResult};

fn build(plot: Plot) -> GraphResult<LineGraph<NullRenderer>> {
    LineGraph::new(
        NullRenderer::default(),
        GraphConfig::new(Viewport::new(320, 240)),
        plot,
    )
}

fn valid_series() -> Series {
    Series::new(vec![Point::new(0.0, 1.0), Point::new(1.0, 3.0)])
}

#[test]
fn plot_defaults_match_documented_values() {
    let plot = Plot::new(vec![valid_series()]);
    assert!(plot.zoom_enabled);
    assert_eq!(plot.padding_top, 16.0);
    assert_eq!(plot.padding_end, 0.0);
    assert_eq!(plot.horizontal_extra_space, 6.0);
    assert_eq!(plot.background, Color::WHITE);
    assert!(plot.grid.is_none());

    assert!(plot.selection.enabled);
    assert!(plot.selection.highlight.is_some());
    assert_eq!(plot.selection.detection_timeout, Duration::from_millis(100));

    assert_eq!(plot.x_axis.step_size, 20.0);
    assert_eq!(plot.x_axis.steps, 10);
    assert_eq!(plot.x_axis.unit, 1.0);
    assert_eq!(plot.x_axis.padding_top, 8.0);
    assert_eq!(plot.x_axis.padding_bottom, 8.0);
    assert!(plot.x_axis.round_to_int);

    assert_eq!(plot.y_axis.steps, 5);
    assert!(plot.y_axis.round_to_int);
    assert_eq!(plot.y_axis.padding_start, 16.0);
    assert_eq!(plot.y_axis.padding_end, 8.0);

    let series = &plot.series[0];
    assert!(series.connection.is_some());
    assert!(series.intersection.is_some());
    assert!(series.highlight.is_none());
    assert!(series.underline.is_none());
}

#[test]
fn plot_without_series_is_rejected() {
    let err = build(Plot::new(Vec::new())).err().expect("no series");
    assert!(matches!(err, GraphError::InvalidPlot(_)));
}

#[test]
fn empty_series_is_rejected() {
    let plot = Plot::new(vec![valid_series(), Series::new(Vec::new())]);
    let err = build(plot).err().expect("empty series");
    assert!(matches!(err, GraphError::InvalidPlot(message) if message.contains("series 1")));
}

#[test]
fn unsorted_series_is_rejected() {
    let plot = Plot::new(vec![Series::new(vec![
        Point::new(0.0, 0.0),
        Point::new(2.0, 0.0),
        Point::new(1.0, 0.0),
    ])]);
    let err = build(plot).err().expect("unsorted");
    assert!(matches!(err, GraphError::InvalidPlot(_)));
}

#[test]
fn repeated_x_values_are_accepted() {
    let plot = Plot::new(vec![Series::new(vec![
        Point::new(1.0, 0.0),
        Point::new(1.0, 5.0),
    ])]);
    assert!(build(plot).is_ok());
}

#[test]
fn non_finite_points_are_rejected() {
    let plot = Plot::new(vec![Series::new(vec![Point::new(0.0, f64::NAN)])]);
    let err = build(plot).err().expect("nan");
    assert!(matches!(err, GraphError::InvalidData(_)));
}

#[test]
fn non_positive_unit_is_rejected() {
    let plot = Plot::new(vec![valid_series()]).with_x_axis(XAxis::default().with_unit(0.0));
    let err = build(plot).err().expect("unit");
    assert!(matches!(err, GraphError::InvalidData(_)));
}

#[test]
fn oversized_step_counts_are_rejected() {
    let plot = Plot::new(vec![valid_series()]).with_x_axis(XAxis::default().with_steps(u32::MAX));
    let err = build(plot).err().expect("x steps");
    assert!(matches!(err, GraphError::InvalidData(message) if message.contains("x-axis steps")));

    let plot = Plot::new(vec![valid_series()]).with_y_axis(YAxis::default().with_steps(u32::MAX));
    assert!(matches!(build(plot).err(), Some(GraphError::InvalidData(_))));

    let plot = Plot::new(vec![valid_series()])
        .with_x_axis(XAxis::default().with_steps(MAX_AXIS_STEPS))
        .with_y_axis(YAxis::default().with_steps(MAX_AXIS_STEPS));
    let graph = build(plot).expect("graph init");
    let labels = graph.axis_labels().expect("labels");
    assert_eq!(labels.y_labels.len(), MAX_AXIS_STEPS as usize);
    assert!(labels.x_labels.len() <= MAX_AXIS_STEPS as usize);
}

#[test]
fn zero_viewport_is_rejected() {
    let result = LineGraph::new(
        NullRenderer::default(),
        GraphConfig::new(Viewport::new(0, 240)),
        Plot::new(vec![valid_series()]),
    );
    assert!(matches!(
        result.err(),
        Some(GraphError::InvalidViewport {
            width: 0,
            height: 240
        })
    ));
}

#[test]
fn invalid_density_is_rejected() {
    let config = GraphConfig::new(Viewport::new(320, 240)).with_density(0.0);
    assert!(config.validate().is_err());
}

#[test]
fn set_plot_keeps_previous_plot_on_error() {
    let mut graph = build(Plot::new(vec![valid_series()])).expect("graph init");
    assert!(graph.set_plot(Plot::new(Vec::new())).is_err());
    assert_eq!(graph.plot().series.len(), 1);
}

#[test]
fn set_plot_applies_selection_settings_to_gestures() {
    let mut graph = build(Plot::new(vec![valid_series()])).expect("graph init");
    graph
        .set_plot(Plot::new(vec![valid_series()]).with_selection(Selection::disabled()))
        .expect("set plot");
    graph.handle_gesture_input(
        PointerEvent::single(Duration::ZERO, PointerChange::pressed(1, 40.0, 40.0)).into(),
    );
    graph.handle_gesture_input(GestureInput::Tick(Duration::from_secs(1)));
    assert!(!graph.interaction_state().is_dragging());
}

#[test]
fn config_json_round_trip_and_defaults() {
    let config = GraphConfig::new(Viewport::new(640, 480))
        .with_density(2.5)
        .with_touch_slop(4.0);
    let json = config.to_json_pretty().expect("serialize");
    let restored = GraphConfig::from_json_str(&json).expect("parse");
    assert_eq!(restored, config);

    let minimal =
        GraphConfig::from_json_str(r#"{"viewport":{"width":100,"height":50}}"#).expect("parse");
    assert_eq!(minimal.density, 1.0);
    assert_eq!(minimal.touch_slop, 8.0);
    assert_eq!(minimal.touch_slop_px().expect("slop"), 8.0);

    assert!(GraphConfig::from_json_str(r#"{"viewport":{"width":0,"height":50}}"#).is_err());
    assert!(GraphConfig::from_json_str("not json").is_err());
}

#[test]
fn axis_config_serializes_without_label_renderer() {
    let axis = XAxis::default().with_steps(7);
    let json = serde_json::to_string(&axis).expect("serialize");
    assert!(!json.contains("labels"));
    let restored: XAxis = serde_json::from_str(&json).expect("parse");
    assert_eq!(restored.steps, 7);
}

#[test]
fn graph_is_send() {
    fn assert_send<T: Send>() {}
    assert_send::<LineGraph<NullRenderer>>();
}
