use serde::{Deserialize, Serialize};

/// Camera projection and control parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraOptions {
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
    /// Starting zoom offset (negative = pulled back from the origin).
    pub initial_zoom: f32,
    /// Degrees of rotation per pixel of drag.
    pub rotate_speed: f32,
    /// World units of pan per pixel of drag.
    pub pan_speed: f32,
    /// Zoom units per wheel notch.
    pub zoom_speed: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: 45.0,
            znear: 0.1,
            zfar: 100.0,
            initial_zoom: -8.0,
            rotate_speed: 0.5,
            pan_speed: 0.01,
            zoom_speed: 0.5,
        }
    }
}
