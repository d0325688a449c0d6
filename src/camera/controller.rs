//! Drag state machine and the camera's GPU uniform binding.

use glam::Vec2;
use wgpu::util::DeviceExt;

use crate::camera::core::{Camera, CameraUniform};
use crate::options::CameraOptions;

/// What a pointer drag manipulates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragKind {
    /// Primary-button drag: rotate the scene.
    Rotate,
    /// Secondary-button drag: pan the scene.
    Pan,
}

/// Pointer state for an active drag.
struct DragState {
    kind: DragKind,
    last_pos: Vec2,
}

/// Owns the camera and translates drag/wheel input into camera mutations.
///
/// One `update_drag` call accumulates exactly one delta contribution, so a
/// sequence of moves sums in order. No value is ever clamped.
pub struct CameraController {
    /// The camera being driven.
    pub camera: Camera,
    drag: Option<DragState>,
    rotate_speed: f32,
    pan_speed: f32,
    zoom_speed: f32,
}

impl CameraController {
    /// Create a controller with the given options at the given viewport size.
    #[must_use]
    pub fn new(options: &CameraOptions, width: u32, height: u32) -> Self {
        Self {
            camera: Camera::new(options, width, height),
            drag: None,
            rotate_speed: options.rotate_speed,
            pan_speed: options.pan_speed,
            zoom_speed: options.zoom_speed,
        }
    }

    /// Begin a drag of the given kind at the given pointer position.
    ///
    /// A drag already in progress is replaced; its accumulated effect on the
    /// camera is kept.
    pub fn begin_drag(&mut self, kind: DragKind, pos: Vec2) {
        self.drag = Some(DragState {
            kind,
            last_pos: pos,
        });
    }

    /// Feed a pointer position into the active drag, if any.
    ///
    /// Rotate drags add `rotate_speed * delta.y` to `rotation_x` and
    /// `rotate_speed * delta.x` to `rotation_y`. Pan drags add
    /// `pan_speed * delta.x` to `pan_x` and subtract `pan_speed * delta.y`
    /// from `pan_y` (screen Y grows downward, world Y upward).
    pub fn update_drag(&mut self, pos: Vec2) {
        let Some(drag) = self.drag.as_mut() else {
            return;
        };
        let delta = pos - drag.last_pos;
        drag.last_pos = pos;

        match drag.kind {
            DragKind::Rotate => {
                self.camera.rotation_x += delta.y * self.rotate_speed;
                self.camera.rotation_y += delta.x * self.rotate_speed;
            }
            DragKind::Pan => {
                self.camera.pan_x += delta.x * self.pan_speed;
                self.camera.pan_y -= delta.y * self.pan_speed;
            }
        }
    }

    /// End the active drag. Further pointer moves are ignored until the next
    /// `begin_drag`.
    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    /// Whether a drag is currently active.
    #[must_use]
    pub fn dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Apply a wheel zoom of `notches` standard wheel steps.
    pub fn apply_zoom(&mut self, notches: f32) {
        self.camera.zoom += notches * self.zoom_speed;
    }

    /// Update the camera aspect ratio for a new viewport size.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.set_viewport(width, height);
    }
}

/// GPU-side camera binding: uniform buffer, layout, and bind group.
pub struct CameraGpu {
    uniform: CameraUniform,
    buffer: wgpu::Buffer,
    /// Bind group layout shared by every pipeline in the crate.
    pub layout: wgpu::BindGroupLayout,
    /// Bind group set at slot 0 of every render pass.
    pub bind_group: wgpu::BindGroup,
}

impl CameraGpu {
    /// Allocate the uniform buffer and bind group.
    #[must_use]
    pub fn new(device: &wgpu::Device) -> Self {
        let uniform = CameraUniform::new();

        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Camera Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
            label: Some("Camera Bind Group"),
        });

        Self {
            uniform,
            buffer,
            layout,
            bind_group,
        }
    }

    /// Rebuild the view-projection matrix and upload it to the GPU.
    pub fn update(&mut self, queue: &wgpu::Queue, camera: &Camera) {
        self.uniform.update_view_proj(camera);
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[self.uniform]));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> CameraController {
        CameraController::new(&CameraOptions::default(), 800, 600)
    }

    #[test]
    fn rotate_drag_accumulates_half_deltas_in_order() {
        let mut c = controller();
        c.begin_drag(DragKind::Rotate, Vec2::new(100.0, 100.0));
        c.update_drag(Vec2::new(100.0, 110.0)); // dy = +10
        c.update_drag(Vec2::new(100.0, 106.0)); // dy = -4
        assert_eq!(c.camera.rotation_x, 3.0);
        assert_eq!(c.camera.rotation_y, 0.0);
    }

    #[test]
    fn rotate_drag_horizontal_moves_rotation_y() {
        let mut c = controller();
        c.begin_drag(DragKind::Rotate, Vec2::ZERO);
        c.update_drag(Vec2::new(20.0, 0.0));
        assert_eq!(c.camera.rotation_y, 10.0);
        assert_eq!(c.camera.rotation_x, 0.0);
    }

    #[test]
    fn pan_drag_inverts_y() {
        let mut c = controller();
        c.begin_drag(DragKind::Pan, Vec2::ZERO);
        c.update_drag(Vec2::new(100.0, 50.0));
        assert_eq!(c.camera.pan_x, 1.0);
        assert_eq!(c.camera.pan_y, -0.5);
    }

    #[test]
    fn moves_without_active_drag_are_ignored() {
        let mut c = controller();
        c.update_drag(Vec2::new(500.0, 500.0));
        assert_eq!(c.camera.rotation_x, 0.0);
        assert_eq!(c.camera.pan_x, 0.0);

        c.begin_drag(DragKind::Rotate, Vec2::ZERO);
        c.end_drag();
        c.update_drag(Vec2::new(500.0, 500.0));
        assert_eq!(c.camera.rotation_x, 0.0);
    }

    #[test]
    fn zoom_is_order_independent() {
        let mut a = controller();
        a.apply_zoom(3.0);
        a.apply_zoom(-1.0);

        let mut b = controller();
        b.apply_zoom(-1.0);
        b.apply_zoom(3.0);

        assert_eq!(a.camera.zoom, b.camera.zoom);
        assert_eq!(a.camera.zoom, -8.0 + 0.5 * 2.0);
    }

    #[test]
    fn rotation_is_unclamped() {
        let mut c = controller();
        c.begin_drag(DragKind::Rotate, Vec2::ZERO);
        for _ in 0..100 {
            c.update_drag(Vec2::new(0.0, 100.0));
            c.begin_drag(DragKind::Rotate, Vec2::ZERO);
        }
        assert_eq!(c.camera.rotation_x, 5000.0);
    }

    #[test]
    fn begin_drag_resets_reference_position() {
        let mut c = controller();
        c.begin_drag(DragKind::Rotate, Vec2::new(0.0, 0.0));
        c.update_drag(Vec2::new(0.0, 10.0));
        // New drag from a far-away position must not produce a jump.
        c.begin_drag(DragKind::Rotate, Vec2::new(900.0, 900.0));
        c.update_drag(Vec2::new(900.0, 902.0));
        assert_eq!(c.camera.rotation_x, 0.5 * 10.0 + 0.5 * 2.0);
    }
}
