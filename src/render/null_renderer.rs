use crate::error::GraphResult;
use crate::render::{RenderFrame, Renderer};

/// No-op renderer used by tests and headless usage.
///
/// It still validates frame content and keeps the last frame so tests can
/// inspect the exact command sequence a real backend would receive.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub last_command_count: usize,
    pub frames_rendered: usize,
    pub last_frame: Option<RenderFrame>,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> GraphResult<()> {
        frame.validate()?;
        self.last_command_count = frame.commands.len();
        self.frames_rendered += 1;
        self.last_frame = Some(frame.clone());
        Ok(())
    }
}
