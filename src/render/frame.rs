use serde::{Deserialize, Serialize};

use crate::core::{Density, Offset, Viewport};
use crate::error::{GraphError, GraphResult};
use crate::render::{Color, DashPattern, DrawCommand, DrawStyle, Path, StrokeCap};

/// Backend-agnostic scene for one graph draw pass.
///
/// Commands are kept in paint order (back to front); backends must execute
/// them sequentially.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub density: Density,
    pub commands: Vec<DrawCommand>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport, density: Density) -> Self {
        Self {
            viewport,
            density,
            commands: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_command(mut self, command: DrawCommand) -> Self {
        self.commands.push(command);
        self
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    /// Converts a logical length to device pixels for this frame.
    #[must_use]
    pub fn to_px(&self, logical: f64) -> f64 {
        self.density.to_px(logical)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn draw_line(
        &mut self,
        color: Color,
        start: Offset,
        end: Offset,
        width: f64,
        cap: StrokeCap,
        dash: Option<DashPattern>,
        alpha: f64,
    ) {
        self.push(DrawCommand::Line {
            color,
            start,
            end,
            width,
            cap,
            dash,
            alpha,
        });
    }

    pub fn draw_path(&mut self, path: Path, color: Color, style: DrawStyle, alpha: f64) {
        self.push(DrawCommand::Path {
            path,
            color,
            style,
            alpha,
        });
    }

    pub fn draw_circle(
        &mut self,
        color: Color,
        radius: f64,
        center: Offset,
        alpha: f64,
        style: DrawStyle,
    ) {
        self.push(DrawCommand::Circle {
            color,
            radius,
            center,
            alpha,
            style,
        });
    }

    pub fn draw_rect(&mut self, color: Color, origin: Offset, width: f64, height: f64) {
        self.push(DrawCommand::Rect {
            color,
            origin,
            width,
            height,
        });
    }

    pub fn validate(&self) -> GraphResult<()> {
        if !self.viewport.is_valid() {
            return Err(GraphError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        for command in &self.commands {
            command.validate()?;
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn to_json_pretty(&self) -> GraphResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            GraphError::InvalidData(format!("failed to serialize render frame: {e}"))
        })
    }
}
