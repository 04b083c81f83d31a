use serde::{Deserialize, Serialize};

use crate::core::{Density, Viewport};
use crate::error::{GraphError, GraphResult};
use crate::interaction::DEFAULT_TOUCH_SLOP_PX;

/// Public graph bootstrap configuration.
///
/// This type is serializable so host applications can persist/load the
/// surface setup without inventing their own ad-hoc format.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GraphConfig {
    pub viewport: Viewport,
    /// Device pixels per logical pixel.
    #[serde(default = "default_density")]
    pub density: f64,
    /// Pan/zoom jitter threshold in logical pixels.
    #[serde(default = "default_touch_slop")]
    pub touch_slop: f64,
}

impl GraphConfig {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            density: default_density(),
            touch_slop: default_touch_slop(),
        }
    }

    #[must_use]
    pub fn with_density(mut self, density: f64) -> Self {
        self.density = density;
        self
    }

    #[must_use]
    pub fn with_touch_slop(mut self, touch_slop: f64) -> Self {
        self.touch_slop = touch_slop;
        self
    }

    pub fn validate(self) -> GraphResult<Self> {
        self.viewport.ensure_valid()?;
        Density::new(self.density)?;
        if !self.touch_slop.is_finite() || self.touch_slop < 0.0 {
            return Err(GraphError::InvalidData(
                "touch slop must be finite and >= 0".to_owned(),
            ));
        }
        Ok(self)
    }

    pub fn density(self) -> GraphResult<Density> {
        Density::new(self.density)
    }

    /// Touch slop converted to device pixels.
    pub fn touch_slop_px(self) -> GraphResult<f64> {
        Ok(self.density()?.to_px(self.touch_slop))
    }

    pub fn to_json_pretty(self) -> GraphResult<String> {
        serde_json::to_string_pretty(&self)
            .map_err(|e| GraphError::InvalidData(format!("failed to serialize config: {e}")))
    }

    pub fn from_json_str(input: &str) -> GraphResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| GraphError::InvalidData(format!("failed to parse config json: {e}")))?;
        config.validate()
    }
}

fn default_density() -> f64 {
    1.0
}

fn default_touch_slop() -> f64 {
    DEFAULT_TOUCH_SLOP_PX
}
