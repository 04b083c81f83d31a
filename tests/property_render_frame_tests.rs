use std::time::Duration;

use line_graph::api::{GraphConfig, LineGraph, Plot, Series, XAxis};
use line_graph::core::{Point, Viewport, project_points};
use line_graph::interaction::{GestureInput, PointerChange, PointerEvent};
use line_graph::render::NullRenderer;
use proptest::prelude::*;

fn sorted_points(mut xs: Vec<f64>, ys: &[f64]) -> Vec<Point> {
    xs.sort_by(f64::total_cmp);
    xs.into_iter()
        .zip(ys.iter().copied())
        .map(|(x, y)| Point::new(x, y))
        .collect()
}

fn graph(plot: Plot, width: u32) -> LineGraph<NullRenderer> {
    let config = GraphConfig::new(Viewport::new(width, 400));
    LineGraph::new(NullRenderer::default(), config, plot).expect("graph init")
}

proptest! {
    #[test]
    fn screen_x_is_monotonic_in_data_x(
        xs in proptest::collection::vec(-1_000.0f64..1_000.0, 2..64),
        ys in proptest::collection::vec(-500.0f64..500.0, 64),
        step_size in 1.0f64..80.0,
        zoom in 0.1f64..8.0,
    ) {
        let points = sorted_points(xs, &ys);
        let plot = Plot::new(vec![Series::new(points.clone())])
            .with_x_axis(XAxis::default().with_step_size(step_size));
        let mut graph = graph(plot, 640);
        graph.set_zoom_scale(zoom).expect("zoom");

        let plot_frame = graph.build_frame().expect("frame");
        let offsets = project_points(&points, &plot_frame.transform);
        for pair in offsets.windows(2) {
            prop_assert!(pair[0].x <= pair[1].x);
        }
    }

    #[test]
    fn max_scroll_aligns_last_point_with_right_edge(
        count in 2usize..200,
        width in 50u32..2_000,
        padding_end in 0.0f64..40.0,
        unit in 0.25f64..4.0,
    ) {
        let points: Vec<Point> = (0..count).map(|i| Point::new(i as f64, (i % 7) as f64)).collect();
        let plot = Plot::new(vec![Series::new(points)])
            .with_padding_end(padding_end)
            .with_x_axis(XAxis::default().with_unit(unit));
        let mut graph = graph(plot, width);

        graph.build_frame().expect("frame");
        let max_scroll = graph.interaction_state().max_scroll_offset();
        prop_assert!(max_scroll >= 0.0);

        graph.scroll_by(-1.0e9);
        let plot_frame = graph.build_frame().expect("frame");
        let last_x = plot_frame.transform.screen_x((count - 1) as f64);
        let right_edge = f64::from(width) - padding_end;
        if max_scroll > 0.0 {
            prop_assert!((last_x - right_edge).abs() < 1e-6);
        } else {
            prop_assert!(last_x <= right_edge + 1e-6);
        }
    }

    #[test]
    fn rendering_is_idempotent(
        xs in proptest::collection::vec(0.0f64..500.0, 1..40),
        ys in proptest::collection::vec(-50.0f64..50.0, 40),
        scroll in 0.0f64..500.0,
    ) {
        let plot = Plot::new(vec![Series::new(sorted_points(xs, &ys))]);
        let mut graph = graph(plot, 300);
        graph.build_frame().expect("frame");
        graph.scroll_by(-scroll);

        let first = graph.render().expect("render");
        let second = graph.render().expect("render");
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(graph.renderer().frames_rendered, 2);
    }

    #[test]
    fn drag_over_a_point_locks_that_point(
        count in 2usize..30,
        target in 0usize..30,
    ) {
        let target = target % count;
        let points: Vec<Point> = (0..count).map(|i| Point::new(i as f64, 1.0)).collect();
        let plot = Plot::new(vec![Series::new(points)]).with_horizontal_extra_space(5.0);
        let mut graph = graph(plot, 800);

        let x = 5.0 + 20.0 * target as f64;
        graph.handle_gesture_input(
            PointerEvent::single(Duration::ZERO, PointerChange::pressed(1, x, 10.0)).into(),
        );
        graph.handle_gesture_input(GestureInput::Tick(Duration::from_millis(100)));

        let plot_frame = graph.build_frame().expect("frame");
        let lock = plot_frame.drag_locks.get(&0).expect("lock");
        prop_assert_eq!(lock.point_index, target);
        let selection = plot_frame.selection.expect("selection");
        prop_assert_eq!(selection.x, x);
    }

    #[test]
    fn zoom_accumulates_as_product(factors in proptest::collection::vec(0.5f64..2.0, 1..32)) {
        let plot = Plot::new(vec![Series::new(vec![Point::new(0.0, 0.0)])]);
        let mut graph = graph(plot, 300);
        let mut expected = 1.0;
        for factor in &factors {
            expected *= factor;
            graph.zoom_by(*factor).expect("zoom");
        }
        prop_assert_eq!(graph.interaction_state().zoom_scale(), expected);
    }
}
