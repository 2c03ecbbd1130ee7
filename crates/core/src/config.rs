//! Tunable constants for the camera and the hex gradient.
//!
//! Every field has a default, so a partial JSON object such as
//! `{"camera": {"zoom_step": 0.1}}` is a valid config.

use crate::error::RenderError;
use serde::{Deserialize, Serialize};

/// Pan and zoom steps applied by [`Camera`](crate::camera::Camera).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// World units panned per update while a direction key is held.
    pub scroll_offset: f32,
    /// Zoom level change per scroll notch.
    pub zoom_step: f32,
    /// Zoom level before any scroll input.
    pub initial_zoom: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            scroll_offset: 0.05,
            zoom_step: 0.07,
            initial_zoom: 0.7,
        }
    }
}

/// Top-level render configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub camera: CameraConfig,
    /// Per-vertex RGB increment that produces the radial hex gradient.
    pub hex_gradient_step: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            camera: CameraConfig::default(),
            hex_gradient_step: 0.015,
        }
    }
}

impl RenderConfig {
    /// Parses a config from a JSON string, filling missing fields with defaults.
    pub fn from_json(json: &str) -> Result<Self, RenderError> {
        serde_json::from_str(json).map_err(|e| RenderError::InvalidConfig(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_constants() {
        let cfg = RenderConfig::default();
        assert_eq!(cfg.camera.scroll_offset, 0.05);
        assert_eq!(cfg.camera.zoom_step, 0.07);
        assert_eq!(cfg.camera.initial_zoom, 0.7);
        assert_eq!(cfg.hex_gradient_step, 0.015);
    }

    #[test]
    fn empty_object_yields_defaults() {
        let cfg = RenderConfig::from_json("{}").unwrap();
        assert_eq!(cfg, RenderConfig::default());
    }

    #[test]
    fn partial_camera_object_keeps_other_defaults() {
        let cfg = RenderConfig::from_json(r#"{"camera": {"zoom_step": 0.1}}"#).unwrap();
        assert_eq!(cfg.camera.zoom_step, 0.1);
        assert_eq!(cfg.camera.scroll_offset, 0.05);
        assert_eq!(cfg.hex_gradient_step, 0.015);
    }

    #[test]
    fn json_round_trip() {
        let original = RenderConfig {
            camera: CameraConfig {
                scroll_offset: 0.5,
                zoom_step: 0.25,
                initial_zoom: 1.0,
            },
            hex_gradient_step: 0.0,
        };
        let json = serde_json::to_string(&original).unwrap();
        assert_eq!(RenderConfig::from_json(&json).unwrap(), original);
    }

    #[test]
    fn malformed_json_is_invalid_config() {
        let result = RenderConfig::from_json("{camera:");
        assert!(matches!(result, Err(RenderError::InvalidConfig(_))));
    }
}
