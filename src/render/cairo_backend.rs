use cairo::{Context, Format, ImageSurface, LineCap};
use std::f64::consts::TAU;

use crate::error::{GraphError, GraphResult};
use crate::render::{
    Color, DashPattern, DrawCommand, DrawStyle, Path, PathVerb, RenderFrame, Renderer, StrokeCap,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub lines_drawn: usize,
    pub paths_drawn: usize,
    pub circles_drawn: usize,
    pub rects_drawn: usize,
}

/// Optional extension trait for renderers that can draw into an external Cairo
/// context (for example a GTK `DrawingArea` callback).
///
/// Implementations validate `frame` before drawing it.
pub trait CairoContextRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> GraphResult<()>;
}

/// Cairo renderer backend.
///
/// This renderer supports two modes:
/// - offscreen image-surface rendering through `Renderer::render`
/// - in-place rendering on an external Cairo context through
///   `CairoContextRenderer`
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    clear_color: Color,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> GraphResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(GraphError::InvalidData(
                "cairo surface size must be > 0".to_owned(),
            ));
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        Ok(Self {
            surface,
            clear_color: Color::WHITE,
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    #[must_use]
    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    pub fn set_clear_color(&mut self, color: Color) -> GraphResult<()> {
        color.validate()?;
        self.clear_color = color;
        Ok(())
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    fn render_with_context(&mut self, context: &Context, frame: &RenderFrame) -> GraphResult<()> {
        frame.validate()?;

        apply_color(context, self.clear_color, 1.0);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;

        let mut stats = CairoRenderStats::default();

        for command in &frame.commands {
            match command {
                DrawCommand::Line {
                    color,
                    start,
                    end,
                    width,
                    cap,
                    dash,
                    alpha,
                } => {
                    apply_color(context, *color, *alpha);
                    context.set_line_width(*width);
                    context.set_line_cap(map_cap(*cap));
                    apply_dash(context, dash.as_ref());
                    context.move_to(start.x, start.y);
                    context.line_to(end.x, end.y);
                    context
                        .stroke()
                        .map_err(|err| map_backend_error("failed to stroke line", err))?;
                    apply_dash(context, None);
                    stats.lines_drawn += 1;
                }
                DrawCommand::Path {
                    path,
                    color,
                    style,
                    alpha,
                } => {
                    append_path(context, path);
                    apply_color(context, *color, *alpha);
                    finish_shape(context, *style)?;
                    stats.paths_drawn += 1;
                }
                DrawCommand::Circle {
                    color,
                    radius,
                    center,
                    alpha,
                    style,
                } => {
                    context.new_path();
                    context.arc(center.x, center.y, *radius, 0.0, TAU);
                    apply_color(context, *color, *alpha);
                    finish_shape(context, *style)?;
                    stats.circles_drawn += 1;
                }
                DrawCommand::Rect {
                    color,
                    origin,
                    width,
                    height,
                } => {
                    context.rectangle(origin.x, origin.y, *width, *height);
                    apply_color(context, *color, 1.0);
                    context
                        .fill()
                        .map_err(|err| map_backend_error("failed to fill rectangle", err))?;
                    stats.rects_drawn += 1;
                }
            }
        }

        self.last_stats = stats;
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> GraphResult<()> {
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        self.render_with_context(&context, frame)
    }
}

impl CairoContextRenderer for CairoRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> GraphResult<()> {
        self.render_with_context(context, frame)
    }
}

fn apply_color(context: &Context, color: Color, alpha: f64) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha * alpha);
}

fn apply_dash(context: &Context, dash: Option<&DashPattern>) {
    match dash {
        Some(dash) => context.set_dash(&dash.intervals, dash.phase),
        None => context.set_dash(&[], 0.0),
    }
}

fn map_cap(cap: StrokeCap) -> LineCap {
    match cap {
        StrokeCap::Butt => LineCap::Butt,
        StrokeCap::Round => LineCap::Round,
        StrokeCap::Square => LineCap::Square,
    }
}

fn append_path(context: &Context, path: &Path) {
    context.new_path();
    for verb in &path.verbs {
        match verb {
            PathVerb::MoveTo(point) => context.move_to(point.x, point.y),
            PathVerb::LineTo(point) => context.line_to(point.x, point.y),
            PathVerb::Close => context.close_path(),
        }
    }
}

fn finish_shape(context: &Context, style: DrawStyle) -> GraphResult<()> {
    match style {
        DrawStyle::Fill => context
            .fill()
            .map_err(|err| map_backend_error("failed to fill shape", err)),
        DrawStyle::Stroke { width } => {
            context.set_line_width(width);
            context
                .stroke()
                .map_err(|err| map_backend_error("failed to stroke shape", err))
        }
    }
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> GraphError {
    GraphError::InvalidData(format!("{prefix}: {err}"))
}
