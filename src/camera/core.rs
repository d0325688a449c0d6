//! Camera state and view-projection math.

use glam::{Mat4, Vec3};

use crate::options::CameraOptions;

/// Free camera defined by two rotation angles, a pan offset, and a zoom
/// distance along the view axis.
///
/// All values are unbounded: the camera flies freely and no clamping or
/// angle wrapping is applied anywhere.
pub struct Camera {
    /// Rotation about the X axis in degrees.
    pub rotation_x: f32,
    /// Rotation about the Y axis in degrees.
    pub rotation_y: f32,
    /// Horizontal pan offset in world units.
    pub pan_x: f32,
    /// Vertical pan offset in world units.
    pub pan_y: f32,
    /// Z translation of the scene; negative values pull the camera back.
    pub zoom: f32,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

impl Camera {
    /// Create a camera from projection options at the given viewport size.
    #[must_use]
    pub fn new(options: &CameraOptions, width: u32, height: u32) -> Self {
        let mut camera = Self {
            rotation_x: 0.0,
            rotation_y: 0.0,
            pan_x: 0.0,
            pan_y: 0.0,
            zoom: options.initial_zoom,
            aspect: 1.0,
            fovy: options.fovy,
            znear: options.znear,
            zfar: options.zfar,
        };
        camera.set_viewport(width, height);
        camera
    }

    /// Update the aspect ratio for a new viewport size.
    ///
    /// Zero dimensions are floored to 1, so a degenerate resize can never
    /// produce a division by zero or a NaN matrix.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        let width = width.max(1);
        let height = height.max(1);
        self.aspect = width as f32 / height as f32;
    }

    /// Build the view matrix: pan/zoom translation, then rotation about X,
    /// then rotation about Y.
    ///
    /// The scene is static and the camera moves through it; this composed
    /// transform is applied uniformly to everything drawn.
    #[must_use]
    pub fn build_view(&self) -> Mat4 {
        Mat4::from_translation(Vec3::new(self.pan_x, self.pan_y, self.zoom))
            * Mat4::from_rotation_x(self.rotation_x.to_radians())
            * Mat4::from_rotation_y(self.rotation_y.to_radians())
    }

    /// Build the combined view-projection matrix.
    #[must_use]
    pub fn build_matrix(&self) -> Mat4 {
        // perspective_rh already uses [0,1] depth range (wgpu/Vulkan
        // convention)
        let proj = Mat4::perspective_rh(
            self.fovy.to_radians(),
            self.aspect,
            self.znear,
            self.zfar,
        );
        proj * self.build_view()
    }
}

/// GPU uniform buffer holding the view-projection matrix.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    /// Combined view-projection matrix.
    pub view_proj: [[f32; 4]; 4],
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraUniform {
    /// Create a new camera uniform with identity view-projection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
        }
    }

    /// Update the matrix from the given camera's current state.
    pub fn update_view_proj(&mut self, camera: &Camera) {
        self.view_proj = camera.build_matrix().to_cols_array_2d();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_camera() -> Camera {
        Camera::new(&CameraOptions::default(), 800, 600)
    }

    #[test]
    fn starts_pulled_back() {
        let camera = test_camera();
        assert_eq!(camera.zoom, -8.0);
        assert_eq!(camera.rotation_x, 0.0);
        assert_eq!(camera.rotation_y, 0.0);
    }

    #[test]
    fn zero_height_viewport_floors_to_one() {
        let mut camera = test_camera();
        camera.set_viewport(800, 0);
        assert_eq!(camera.aspect, 800.0);
    }

    #[test]
    fn zero_width_viewport_floors_to_one() {
        let mut camera = test_camera();
        camera.set_viewport(0, 600);
        assert_eq!(camera.aspect, 1.0 / 600.0);
    }

    #[test]
    fn view_matrix_is_finite_for_extreme_state() {
        let mut camera = test_camera();
        camera.rotation_x = 1e6;
        camera.rotation_y = -73_000.0;
        camera.pan_x = 4e8;
        camera.zoom = -1e9;
        let matrix = camera.build_matrix();
        assert!(matrix.to_cols_array().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn identity_state_view_is_pure_zoom_translation() {
        let camera = test_camera();
        let view = camera.build_view();
        let expected = Mat4::from_translation(Vec3::new(0.0, 0.0, -8.0));
        assert_eq!(view.to_cols_array(), expected.to_cols_array());
    }

    #[test]
    fn rotation_applied_x_before_y() {
        let mut camera = test_camera();
        camera.zoom = 0.0;
        camera.rotation_x = 30.0;
        camera.rotation_y = 45.0;
        let expected = Mat4::from_rotation_x(30.0_f32.to_radians())
            * Mat4::from_rotation_y(45.0_f32.to_radians());
        assert_eq!(
            camera.build_view().to_cols_array(),
            expected.to_cols_array()
        );
    }
}
