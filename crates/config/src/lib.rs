//! Scene configuration: the host-side description a frame state is built from.
//!
//! Files are JSON (`.json`) or YAML (`.yaml`, `.yml`). Every field has a
//! default, so a partial file only overrides what it names:
//!
//! ```yaml
//! camera:
//!   eye: [0.0, 1.8, 0.0]
//!   target: [0.0, 1.8, -1.0]
//!   fov_degrees: 70.0
//! view_distance: 800.0
//! ```
//!
//! Validation happens here, on the producer side. The transform stage itself
//! never checks its inputs.

use glam::{Mat4, Vec3};
use horizon_common::{FrameParams, FrameState};
use horizon_kernel::DISTANCE_SCALE;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Errors from loading or validating a scene configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("unsupported config format: {0:?} (expected .json, .yaml or .yml)")]
    UnsupportedFormat(String),
    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Camera placement and projection parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Camera position in world space.
    pub eye: Vec3,
    /// Point the camera is looking at.
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    /// Width / height.
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 1.8, 0.0),
            target: Vec3::new(0.0, 1.8, -1.0),
            up: Vec3::Y,
            fov_degrees: 60.0,
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 10_000.0,
        }
    }
}

impl CameraConfig {
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_degrees.to_radians(), self.aspect, self.near, self.far)
    }
}

/// Everything needed to build one frame's uniform block.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub camera: CameraConfig,
    pub player_origin: Vec3,
    pub view_distance: f32,
    /// Elapsed simulation time in seconds.
    pub time: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            camera: CameraConfig::default(),
            player_origin: Vec3::ZERO,
            view_distance: 1000.0,
            time: 0.0,
        }
    }
}

impl SceneConfig {
    /// Load and validate a scene file, choosing the format by extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let parse: fn(&str) -> Result<Self, ConfigError> = match ext.as_str() {
            "json" => Self::from_json_str,
            "yaml" | "yml" => Self::from_yaml_str,
            _ => return Err(ConfigError::UnsupportedFormat(ext)),
        };
        let config = parse(&std::fs::read_to_string(path)?)?;
        tracing::info!(path = %path.display(), "loaded scene config");
        Ok(config)
    }

    /// Parse and validate JSON.
    pub fn from_json_str(data: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(data)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate YAML.
    pub fn from_yaml_str(data: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(data)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the camera describes an invertible view and projection.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let cam = &self.camera;
        for (field, v) in [
            ("camera.eye", cam.eye),
            ("camera.target", cam.target),
            ("camera.up", cam.up),
        ] {
            if !v.is_finite() {
                return Err(invalid(field, format!("must be finite, got {v}")));
            }
        }
        if !cam.near.is_finite() || cam.near <= 0.0 {
            return Err(invalid("camera.near", format!("must be finite and > 0, got {}", cam.near)));
        }
        if !cam.far.is_finite() || cam.far <= cam.near {
            return Err(invalid(
                "camera.far",
                format!("must be finite and > near ({}), got {}", cam.near, cam.far),
            ));
        }
        if !cam.fov_degrees.is_finite() || cam.fov_degrees <= 0.0 || cam.fov_degrees >= 180.0
        {
            return Err(invalid(
                "camera.fov_degrees",
                format!("must be in (0, 180), got {}", cam.fov_degrees),
            ));
        }
        if !cam.aspect.is_finite() || cam.aspect <= 0.0 {
            return Err(invalid("camera.aspect", format!("must be finite and > 0, got {}", cam.aspect)));
        }
        if cam.eye == cam.target {
            return Err(invalid("camera.target", "must differ from eye".into()));
        }
        if cam.up.cross(cam.target - cam.eye).length_squared() == 0.0 {
            return Err(invalid("camera.up", "must not be parallel to the view direction".into()));
        }

        // Corners of the unit cube end up sqrt(3) * DISTANCE_SCALE away.
        let sky_reach = DISTANCE_SCALE * 3.0_f32.sqrt();
        if cam.far < sky_reach {
            tracing::warn!(
                far = cam.far,
                sky_reach,
                "far plane is closer than the sky; parts of it will be clipped"
            );
        }
        Ok(())
    }

    /// Build the uniform block for one frame.
    pub fn to_frame_state(&self) -> FrameState {
        FrameState::new(FrameParams {
            view: self.camera.view_matrix(),
            projection: self.camera.projection_matrix(),
            camera_origin: self.camera.eye,
            player_origin: self.player_origin,
            view_distance: self.view_distance,
            time: self.time,
        })
    }
}

fn invalid(field: &'static str, reason: String) -> ConfigError {
    ConfigError::Invalid { field, reason }
}
