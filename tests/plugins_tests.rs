use std::sync::{Arc, Mutex};
use std::time::Duration;

use line_graph::GraphError;
use line_graph::api::{GraphConfig, LabelSize, LineGraph, Plot, Series};
use line_graph::core::{Point, Viewport};
use line_graph::extensions::{GraphPlugin, PluginContext, PluginEvent, SelectionCallbacks};
use line_graph::interaction::{GestureInput, InteractionMode, PointerChange, PointerEvent};
use line_graph::render::NullRenderer;

struct RecordingPlugin {
    id: String,
    events: Arc<Mutex<Vec<(PluginEvent, PluginContext)>>>,
}

impl RecordingPlugin {
    fn new(id: impl Into<String>, events: Arc<Mutex<Vec<(PluginEvent, PluginContext)>>>) -> Self {
        Self {
            id: id.into(),
            events,
        }
    }
}

impl GraphPlugin for RecordingPlugin {
    fn id(&self) -> &str {
        &self.id
    }

    fn on_event(&mut self, event: &PluginEvent, context: PluginContext) {
        self.events
            .lock()
            .expect("lock")
            .push((event.clone(), context));
    }
}

fn event_kind(event: &PluginEvent) -> &'static str {
    match event {
        PluginEvent::SelectionStarted => "selection_start",
        PluginEvent::SelectionChanged { .. } => "selection",
        PluginEvent::SelectionEnded => "selection_end",
        PluginEvent::Scrolled { .. } => "scroll",
        PluginEvent::Zoomed { .. } => "zoom",
        PluginEvent::LayoutMeasured { .. } => "layout",
        PluginEvent::Rendered { .. } => "rendered",
    }
}

fn graph() -> LineGraph<NullRenderer> {
    let points: Vec<Point> = (0..24).map(|i| Point::new(i as f64, i as f64)).collect();
    let plot = Plot::new(vec![Series::new(points)]).with_horizontal_extra_space(5.0);
    let config = GraphConfig::new(Viewport::new(200, 300));
    LineGraph::new(NullRenderer::default(), config, plot).expect("graph init")
}

#[test]
fn plugin_receives_deterministic_event_sequence() {
    let mut graph = graph();
    let events = Arc::new(Mutex::new(Vec::new()));
    graph
        .register_plugin(Box::new(RecordingPlugin::new("recorder", Arc::clone(&events))))
        .expect("register plugin");

    graph
        .layout_axes(&[LabelSize::new(10.0, 10.0)], &[LabelSize::new(10.0, 10.0)])
        .expect("layout");
    graph.render().expect("render");
    graph.scroll_by(-40.0);
    graph.zoom_by(2.0).expect("zoom");
    graph.handle_gesture_input(
        PointerEvent::single(Duration::ZERO, PointerChange::pressed(1, 65.0, 50.0)).into(),
    );
    graph.handle_gesture_input(GestureInput::Tick(Duration::from_millis(100)));
    graph.render().expect("render");
    graph.handle_gesture_input(
        PointerEvent::single(
            Duration::from_millis(150),
            PointerChange::released(1, 65.0, 50.0),
        )
        .into(),
    );

    let events = events.lock().expect("lock");
    let kinds: Vec<_> = events.iter().map(|(event, _)| event_kind(event)).collect();
    assert_eq!(
        kinds,
        vec![
            "layout",
            "rendered",
            "scroll",
            "zoom",
            "selection_start",
            "selection",
            "rendered",
            "selection_end",
        ]
    );

    let (scroll_event, scroll_context) = &events[2];
    assert_eq!(*scroll_event, PluginEvent::Scrolled { scroll_offset: 40.0 });
    assert_eq!(scroll_context.scroll_offset, 40.0);

    let (_, start_context) = &events[4];
    assert!(start_context.dragging);
    assert_eq!(start_context.drag_x, 65.0);
    assert_eq!(start_context.zoom_scale, 2.0);

    let (_, end_context) = &events[7];
    assert!(!end_context.dragging);
    assert_eq!(end_context.interaction_mode, InteractionMode::Idle);
}

#[test]
fn duplicate_and_empty_ids_are_rejected() {
    let mut graph = graph();
    graph
        .register_plugin(Box::new(SelectionCallbacks::new()))
        .expect("register");
    let err = graph
        .register_plugin(Box::new(SelectionCallbacks::new()))
        .expect_err("duplicate");
    assert!(matches!(err, GraphError::InvalidData(_)));
    assert!(
        graph
            .register_plugin(Box::new(SelectionCallbacks::with_id("")))
            .is_err()
    );
    assert_eq!(graph.plugin_count(), 1);
}

#[test]
fn plugins_can_be_unregistered() {
    let mut graph = graph();
    graph
        .register_plugin(Box::new(SelectionCallbacks::with_id("a")))
        .expect("register");
    assert!(graph.has_plugin("a"));
    assert!(graph.unregister_plugin("a"));
    assert!(!graph.unregister_plugin("a"));
    assert_eq!(graph.plugin_count(), 0);
}
