use line_graph::api::{
    Grid, GraphConfig, Highlight, LineGraph, Plot, Selection, Series, Underline, YAxis,
};
use line_graph::core::{Offset, Point, Rect, Viewport};
use line_graph::render::{Color, DrawCommand, NullRenderer, PathVerb};

fn graph(plot: Plot, width: u32, height: u32) -> LineGraph<NullRenderer> {
    let config = GraphConfig::new(Viewport::new(width, height));
    LineGraph::new(NullRenderer::default(), config, plot).expect("graph init")
}

fn three_points() -> Series {
    Series::new(vec![
        Point::new(0.0, 0.0),
        Point::new(1.0, 10.0),
        Point::new(2.0, 20.0),
    ])
}

fn kind(command: &DrawCommand) -> &'static str {
    match command {
        DrawCommand::Line { .. } => "line",
        DrawCommand::Path { .. } => "path",
        DrawCommand::Circle { .. } => "circle",
        DrawCommand::Rect { .. } => "rect",
    }
}

fn circle_centers(commands: &[DrawCommand]) -> Vec<Offset> {
    commands
        .iter()
        .filter_map(|command| match command {
            DrawCommand::Circle { center, .. } => Some(*center),
            _ => None,
        })
        .collect()
}

#[test]
fn draws_connections_markers_then_masks() {
    let plot = Plot::new(vec![three_points()])
        .with_padding_top(0.0)
        .with_horizontal_extra_space(5.0);
    let mut graph = graph(plot, 400, 300);

    let plot_frame = graph.render().expect("render");
    let commands = &plot_frame.frame.commands;
    let kinds: Vec<_> = commands.iter().map(kind).collect();
    assert_eq!(
        kinds,
        vec!["line", "circle", "line", "circle", "circle", "rect", "rect"]
    );

    assert_eq!(
        circle_centers(commands),
        vec![
            Offset::new(5.0, 300.0),
            Offset::new(25.0, 150.0),
            Offset::new(45.0, 0.0),
        ]
    );
    match &commands[0] {
        DrawCommand::Line {
            start, end, width, ..
        } => {
            assert_eq!(*start, Offset::new(5.0, 300.0));
            assert_eq!(*end, Offset::new(25.0, 150.0));
            assert_eq!(*width, 3.0);
        }
        other => panic!("expected connection line, got {other:?}"),
    }
    assert_eq!(
        commands[6],
        DrawCommand::Rect {
            color: Color::WHITE,
            origin: Offset::new(400.0, 0.0),
            width: 0.0,
            height: 300.0,
        }
    );
    assert_eq!(graph.renderer().frames_rendered, 1);
    assert_eq!(graph.renderer().last_command_count, 7);
}

#[test]
fn missing_routines_skip_their_stage() {
    let series = three_points().without_connection().without_intersection();
    let mut graph = graph(Plot::new(vec![series]), 400, 300);
    let plot_frame = graph.build_frame().expect("frame");
    let kinds: Vec<_> = plot_frame.frame.commands.iter().map(kind).collect();
    assert_eq!(kinds, vec!["rect", "rect"]);
}

#[test]
fn grid_and_underline_are_drawn_first() {
    let series = three_points().with_underline(Underline::default());
    let plot = Plot::new(vec![series])
        .with_grid(Grid::new(Color::LIGHT_GRAY).with_steps(3))
        .with_padding_top(0.0)
        .with_horizontal_extra_space(5.0);
    let mut graph = graph(plot, 400, 300);

    let plot_frame = graph.build_frame().expect("frame");
    assert_eq!(plot_frame.plot_region, Rect::new(5.0, 0.0, 400.0, 300.0));

    let commands = &plot_frame.frame.commands;
    let kinds: Vec<_> = commands.iter().take(4).map(kind).collect();
    assert_eq!(kinds, vec!["line", "line", "line", "path"]);

    let grid_rows: Vec<f64> = commands
        .iter()
        .take(3)
        .filter_map(|command| match command {
            DrawCommand::Line { start, .. } => Some(start.y),
            _ => None,
        })
        .collect();
    assert_eq!(grid_rows, vec![300.0, 150.0, 0.0]);

    match &commands[3] {
        DrawCommand::Path { path, alpha, .. } => {
            assert_eq!(path.verbs.first(), Some(&PathVerb::MoveTo(Offset::new(5.0, 300.0))));
            assert_eq!(path.verbs.last(), Some(&PathVerb::LineTo(Offset::new(5.0, 300.0))));
            assert_eq!(path.verbs.len(), 6);
            assert_eq!(*alpha, 0.1);
        }
        other => panic!("expected underline path, got {other:?}"),
    }
}

#[test]
fn density_scales_logical_dimensions() {
    let plot = Plot::new(vec![three_points()])
        .with_padding_top(0.0)
        .with_horizontal_extra_space(5.0);
    let config = GraphConfig::new(Viewport::new(400, 300)).with_density(2.0);
    let mut graph = LineGraph::new(NullRenderer::default(), config, plot).expect("graph init");

    let plot_frame = graph.build_frame().expect("frame");
    assert_eq!(plot_frame.transform.x_pixel_step, 40.0);
    assert_eq!(plot_frame.transform.x_start, 10.0);
    match &plot_frame.frame.commands[1] {
        DrawCommand::Circle { radius, .. } => assert_eq!(*radius, 12.0),
        other => panic!("expected marker, got {other:?}"),
    }
}

#[test]
fn background_color_fills_masks() {
    let background = Color::rgb(0.1, 0.1, 0.1);
    let plot = Plot::new(vec![three_points()])
        .with_background(background)
        .with_padding_end(12.0)
        .with_selection(Selection::disabled());
    let mut graph = graph(plot, 400, 300);

    let plot_frame = graph.build_frame().expect("frame");
    let masks: Vec<_> = plot_frame
        .frame
        .commands
        .iter()
        .filter_map(|command| match command {
            DrawCommand::Rect {
                color,
                origin,
                width,
                ..
            } => Some((*color, *origin, *width)),
            _ => None,
        })
        .collect();
    assert_eq!(
        masks,
        vec![
            (background, Offset::new(0.0, 0.0), 0.0),
            (background, Offset::new(388.0, 0.0), 12.0),
        ]
    );
}

#[test]
fn highlight_is_not_drawn_without_drag() {
    let series = three_points().with_highlight(Highlight::default());
    let mut graph = graph(Plot::new(vec![series]), 400, 300);
    let plot_frame = graph.build_frame().expect("frame");
    assert_eq!(circle_centers(&plot_frame.frame.commands).len(), 3);
    assert!(plot_frame.drag_locks.is_empty());
    assert!(plot_frame.selection.is_none());
}

#[test]
fn degenerate_scales_render_finite_frames() {
    let underlined = |points: Vec<Point>| Series::new(points).with_underline(Underline::default());
    let cases = [
        (
            "single point",
            underlined(vec![Point::new(4.0, 7.0)]),
            YAxis::default(),
            "7",
        ),
        (
            "flat series",
            underlined(vec![
                Point::new(0.0, 3.0),
                Point::new(1.0, 3.0),
                Point::new(2.0, 3.0),
            ]),
            YAxis::default(),
            "3",
        ),
        (
            "one y step",
            three_points().with_underline(Underline::default()),
            YAxis::default().with_steps(1),
            "0",
        ),
    ];

    for (name, series, y_axis, min_label) in cases {
        let plot = Plot::new(vec![series])
            .with_y_axis(y_axis)
            .with_grid(Grid::default());
        let mut graph = graph(plot, 300, 200);

        let plot_frame = graph.build_frame().expect(name);
        plot_frame.frame.validate().expect(name);
        assert!(plot_frame.transform.y_pixel_step.is_finite(), "{name}");
        assert!(plot_frame.transform.y_pixel_step > 0.0, "{name}");

        let labels = graph.axis_labels().expect(name);
        assert!(!labels.y_labels.is_empty(), "{name}");
        assert!(
            labels.y_labels.iter().all(|label| label == min_label),
            "{name}: {:?}",
            labels.y_labels
        );
        graph.render().expect(name);
    }
}

#[test]
fn frame_serializes_to_json() {
    let mut graph = graph(Plot::new(vec![three_points()]), 400, 300);
    let plot_frame = graph.build_frame().expect("frame");
    let json = plot_frame.frame.to_json_pretty().expect("json");
    assert!(json.contains("\"commands\""));
    assert!(json.contains("Circle"));
}
