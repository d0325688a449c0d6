use serde::{Deserialize, Serialize};

/// Scene colors and overlay sizes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisplayOptions {
    /// Framebuffer clear color (RGBA).
    pub background: [f32; 4],
    /// Uniform color applied to every point in the cloud.
    pub point_color: [f32; 3],
    /// Length of each axis overlay segment in world units.
    pub axis_length: f32,
    /// Full extents of a cube spawned by middle-click.
    pub spawn_cube_size: [f32; 3],
    /// Color of a cube spawned by middle-click.
    pub spawn_cube_color: [f32; 3],
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            background: [0.1, 0.1, 0.1, 1.0],
            point_color: [1.0, 1.0, 0.0],
            axis_length: 10.0,
            spawn_cube_size: [2.0, 2.0, 2.0],
            spawn_cube_color: [0.0, 1.0, 1.0],
        }
    }
}
