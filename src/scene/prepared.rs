//! CPU-ready frame data, decoupled from wgpu.
//!
//! `PreparedFrame` is the bridge between [`SceneBuffers`](super::SceneBuffers)
//! and the GPU renderers: instance records and vertex arrays laid out exactly
//! as they are uploaded, plus the buffer-write and draw-call counts the frame
//! will cost. Keeping this step pure makes the batching guarantees testable
//! without a graphics device.

use glam::{Mat4, Vec3};

use super::{CubeInstance, SceneBuffers};
use crate::options::DisplayOptions;

/// Per-instance GPU record for the wireframe cube pass.
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CubeInstanceRaw {
    /// Model matrix transforming the ±1 unit wireframe cube.
    pub model: [[f32; 4]; 4],
    /// Wireframe color (RGB).
    pub color: [f32; 3],
    /// Padding for 16-byte attribute alignment.
    pub _pad: f32,
}

/// Vertex for the axis overlay (position + color line list).
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineVertex {
    /// World-space position.
    pub position: [f32; 3],
    /// Line color (RGB).
    pub color: [f32; 3],
}

/// Build the model matrix for one cube instance.
///
/// Order is fixed: translate to `position`, rotate about world X, then Y,
/// then Z, then scale by half the full extents (the unit mesh spans ±1).
/// The rotations are about fixed world axes, not object-local ones, so the
/// X-Y-Z order is part of the visual contract and must not be reordered.
#[must_use]
pub fn cube_model_matrix(cube: &CubeInstance) -> Mat4 {
    Mat4::from_translation(cube.position)
        * Mat4::from_rotation_x(cube.rotation.x.to_radians())
        * Mat4::from_rotation_y(cube.rotation.y.to_radians())
        * Mat4::from_rotation_z(cube.rotation.z.to_radians())
        * Mat4::from_scale(cube.size * 0.5)
}

/// The six vertices of the axis overlay: X red, Y green, Z blue, each a
/// segment from the origin of the given length.
#[must_use]
pub fn axis_vertices(length: f32) -> [LineVertex; 6] {
    let segment = |end: Vec3, color: [f32; 3]| {
        [
            LineVertex {
                position: [0.0, 0.0, 0.0],
                color,
            },
            LineVertex {
                position: end.to_array(),
                color,
            },
        ]
    };
    let [x0, x1] = segment(Vec3::X * length, [1.0, 0.0, 0.0]);
    let [y0, y1] = segment(Vec3::Y * length, [0.0, 1.0, 0.0]);
    let [z0, z1] = segment(Vec3::Z * length, [0.0, 0.0, 1.0]);
    [x0, x1, y0, y1, z0, z1]
}

/// Everything the GPU pass needs for one frame, in upload-ready layout.
pub struct PreparedFrame {
    /// One record per cube, in render order.
    pub cube_instances: Vec<CubeInstanceRaw>,
    /// The whole point cloud as raw vertex positions.
    pub point_vertices: Vec<[f32; 3]>,
    /// Scene generation this frame was built from.
    pub generation: u64,
}

impl PreparedFrame {
    /// Build the frame plan from the current scene state.
    #[must_use]
    pub fn build(scene: &SceneBuffers) -> Self {
        let cube_instances = scene
            .cubes()
            .iter()
            .map(|cube| CubeInstanceRaw {
                model: cube_model_matrix(cube).to_cols_array_2d(),
                color: cube.color,
                _pad: 0.0,
            })
            .collect();

        let point_vertices =
            scene.points().iter().map(|p| p.to_array()).collect();

        Self {
            cube_instances,
            point_vertices,
            generation: scene.generation(),
        }
    }

    /// Number of GPU buffer writes this frame costs: one per non-empty
    /// collection. Empty collections cost nothing.
    #[must_use]
    pub fn upload_count(&self) -> usize {
        usize::from(!self.cube_instances.is_empty())
            + usize::from(!self.point_vertices.is_empty())
    }

    /// Number of draw calls this frame issues: the axis overlay always,
    /// plus one instanced draw for all cubes and one batched draw for all
    /// points when present. Never a function of instance or point count.
    #[must_use]
    pub fn draw_call_count(&self) -> usize {
        1 + usize::from(!self.cube_instances.is_empty())
            + usize::from(!self.point_vertices.is_empty())
    }

    /// Clear color for the pass, from display options.
    #[must_use]
    pub fn clear_color(display: &DisplayOptions) -> wgpu::Color {
        wgpu::Color {
            r: f64::from(display.background[0]),
            g: f64::from(display.background[1]),
            b: f64::from(display.background[2]),
            a: f64::from(display.background[3]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene_with_points(n: usize) -> SceneBuffers {
        let mut scene = SceneBuffers::new();
        scene.set_points(
            (0..n).map(|i| Vec3::splat(i as f32)).collect(),
        );
        scene
    }

    #[test]
    fn empty_scene_draws_only_axes() {
        let frame = PreparedFrame::build(&SceneBuffers::new());
        assert_eq!(frame.upload_count(), 0);
        assert_eq!(frame.draw_call_count(), 1);
    }

    #[test]
    fn point_batching_is_constant_in_n() {
        for n in [1, 2, 100, 10_000] {
            let frame = PreparedFrame::build(&scene_with_points(n));
            assert_eq!(frame.point_vertices.len(), n);
            assert_eq!(frame.upload_count(), 1);
            assert_eq!(frame.draw_call_count(), 2);
        }
    }

    #[test]
    fn empty_point_cloud_issues_no_point_draws() {
        let frame = PreparedFrame::build(&scene_with_points(0));
        assert!(frame.point_vertices.is_empty());
        assert_eq!(frame.upload_count(), 0);
        assert_eq!(frame.draw_call_count(), 1);
    }

    #[test]
    fn cubes_collapse_into_one_instanced_draw() {
        let mut scene = SceneBuffers::new();
        let positions: Vec<Vec3> =
            (0..50).map(|i| Vec3::splat(i as f32)).collect();
        let sizes = vec![Vec3::splat(2.0); 50];
        let rotations = vec![Vec3::ZERO; 50];
        let colors = vec![[0.0, 1.0, 1.0]; 50];
        scene
            .set_cubes(&positions, &sizes, &rotations, &colors)
            .unwrap();

        let frame = PreparedFrame::build(&scene);
        assert_eq!(frame.cube_instances.len(), 50);
        assert_eq!(frame.upload_count(), 1);
        assert_eq!(frame.draw_call_count(), 2);
    }

    #[test]
    fn model_matrix_translates_and_halves_extents() {
        let cube = CubeInstance {
            position: Vec3::new(3.0, -2.0, 1.0),
            size: Vec3::new(2.0, 4.0, 6.0),
            rotation: Vec3::ZERO,
            color: [1.0, 1.0, 1.0],
        };
        let model = cube_model_matrix(&cube);

        // The +1 unit corner lands at position + size/2.
        let corner = model.transform_point3(Vec3::ONE);
        assert_eq!(corner, Vec3::new(4.0, 0.0, 4.0));
    }

    #[test]
    fn model_matrix_rotation_order_is_x_then_y_then_z() {
        let cube = CubeInstance {
            position: Vec3::ZERO,
            size: Vec3::splat(2.0),
            rotation: Vec3::new(90.0, 90.0, 0.0),
            color: [1.0, 1.0, 1.0],
        };
        let model = cube_model_matrix(&cube);
        let expected = Mat4::from_rotation_x(90.0_f32.to_radians())
            * Mat4::from_rotation_y(90.0_f32.to_radians());

        let v = Vec3::new(1.0, 0.0, 0.0);
        let got = model.transform_point3(v);
        let want = expected.transform_point3(v);
        assert!((got - want).length() < 1e-5);

        // The reversed order would land elsewhere.
        let reversed = Mat4::from_rotation_y(90.0_f32.to_radians())
            * Mat4::from_rotation_x(90.0_f32.to_radians());
        assert!((got - reversed.transform_point3(v)).length() > 0.5);
    }

    #[test]
    fn axis_overlay_is_three_rgb_segments() {
        let verts = axis_vertices(10.0);
        assert_eq!(verts.len(), 6);
        assert_eq!(verts[1].position, [10.0, 0.0, 0.0]);
        assert_eq!(verts[1].color, [1.0, 0.0, 0.0]);
        assert_eq!(verts[3].position, [0.0, 10.0, 0.0]);
        assert_eq!(verts[3].color, [0.0, 1.0, 0.0]);
        assert_eq!(verts[5].position, [0.0, 0.0, 10.0]);
        assert_eq!(verts[5].color, [0.0, 0.0, 1.0]);
        for v in verts.iter().step_by(2) {
            assert_eq!(v.position, [0.0, 0.0, 0.0]);
        }
    }
}
