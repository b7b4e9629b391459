use std::fs;
use std::path::Path;

use crate::error::ConfigError;
use crate::geometry::GridGeometry;
use crate::render::{RenderStyle, Renderer};

/// Renderer settings as read from a JSON file. Missing fields keep their
/// defaults, so `{}` is a valid config for a 10x10 board of 50px cells.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub geometry: GridGeometry,
    pub style: RenderStyle,
}

impl RenderConfig {
    pub fn from_json(json: &str) -> Result<RenderConfig, ConfigError> {
        let config: RenderConfig = serde_json::from_str(json)?;
        config.validate()
    }

    pub fn load(path: &Path) -> Result<RenderConfig, ConfigError> {
        log::debug!("Loading config from {}", path.display());
        let json = fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        RenderConfig::from_json(&json)
    }

    pub fn validate(self) -> Result<RenderConfig, ConfigError> {
        self.geometry.validate()?;
        Ok(self)
    }

    pub fn renderer(&self) -> Renderer {
        Renderer::new(self.geometry, self.style.clone())
    }
}
