use fluids_camera::{CameraConfig, CameraError};
use fluids_input::KeymapConfig;
use fluids_render::Viewport;
use fluids_scene::{SceneConfig, SceneError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Errors from loading a session config or building a frame loop from it.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid scene: {0}")]
    Scene(#[from] SceneError),
    #[error("invalid camera: {0}")]
    Camera(#[from] CameraError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Fluids".to_string(),
            width: 500,
            height: 500,
            vsync: true,
        }
    }
}

impl WindowConfig {
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    /// Upper bound on one frame's delta in seconds; `null` disables it.
    pub max_delta: Option<f32>,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            max_delta: Some(0.1),
        }
    }
}

/// Everything a run needs, as one YAML document. Missing sections take defaults.
///
/// ```yaml
/// window: { title: Fluids, width: 800, height: 600 }
/// camera: { position: [0.0, 0.0, 4.0], fov: 1.2 }
/// keymap: planar
/// scene: { kind: cube_grid, n: 4 }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub keymap: KeymapConfig,
    pub scene: SceneConfig,
    pub clock: ClockConfig,
}

impl SessionConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: SessionConfig = serde_yaml::from_str(yaml)?;
        tracing::debug!(scene = config.scene.name(), "session config parsed");
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&text)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }
}
