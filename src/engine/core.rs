//! Engine construction, command execution, and the per-frame draw pass.

use glam::Vec3;

use super::command::ViewerCommand;
use crate::camera::{CameraController, CameraGpu};
use crate::error::CubeviewError;
use crate::gpu::{DepthTarget, RenderContext};
use crate::input::{InputEvent, InputProcessor};
use crate::options::Options;
use crate::renderer::{AxisRenderer, CubeRenderer, PointRenderer};
use crate::scene::producer::SceneProducer;
use crate::scene::{PreparedFrame, SceneBuffers};
use crate::util::FrameTiming;

/// The viewer engine.
///
/// Owns every piece of viewer state (GPU context, camera, scene buffers,
/// renderers, input translation, frame timing) as one explicit instance;
/// there are no process-wide singletons. The host event loop feeds it input
/// events and redraw ticks; a scene producer feeds it buffer replacements.
pub struct ViewerEngine {
    context: RenderContext,
    depth: DepthTarget,
    camera: CameraController,
    camera_gpu: CameraGpu,
    scene: SceneBuffers,
    axes: AxisRenderer,
    cubes: CubeRenderer,
    points: PointRenderer,
    input: InputProcessor,
    producer: Option<SceneProducer>,
    frame_timing: FrameTiming,
    options: Options,
    uploaded_generation: Option<u64>,
}

impl ViewerEngine {
    /// Create an engine with default options.
    ///
    /// # Errors
    ///
    /// Returns [`CubeviewError::InvalidViewport`] for a zero initial
    /// dimension, or [`CubeviewError::Gpu`] if wgpu initialization fails.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        initial_size: (u32, u32),
    ) -> Result<Self, CubeviewError> {
        Self::new_with_options(window, initial_size, Options::default()).await
    }

    /// Create an engine with the given options.
    ///
    /// # Errors
    ///
    /// Returns [`CubeviewError::InvalidViewport`] for a zero initial
    /// dimension, or [`CubeviewError::Gpu`] if wgpu initialization fails.
    pub async fn new_with_options(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        initial_size: (u32, u32),
        options: Options,
    ) -> Result<Self, CubeviewError> {
        let (width, height) = initial_size;
        if width == 0 || height == 0 {
            // No previous surface size to fall back to here.
            return Err(CubeviewError::InvalidViewport { width, height });
        }

        let context = RenderContext::new(window, initial_size).await?;
        let depth = DepthTarget::new(&context.device, width, height);

        let camera = CameraController::new(&options.camera, width, height);
        let camera_gpu = CameraGpu::new(&context.device);

        let axes = AxisRenderer::new(
            &context,
            &camera_gpu.layout,
            options.display.axis_length,
        );
        let cubes = CubeRenderer::new(&context, &camera_gpu.layout);
        let points = PointRenderer::new(
            &context,
            &camera_gpu.layout,
            options.display.point_color,
        );

        log::info!("viewer engine initialized at {width}x{height}");

        Ok(Self {
            context,
            depth,
            camera,
            camera_gpu,
            scene: SceneBuffers::new(),
            axes,
            cubes,
            points,
            input: InputProcessor::new(),
            producer: None,
            frame_timing: FrameTiming::new(0.0),
            options,
            uploaded_generation: None,
        })
    }

    /// The options this engine was built with.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Read-only access to the scene buffers.
    #[must_use]
    pub fn scene(&self) -> &SceneBuffers {
        &self.scene
    }

    /// The camera controller (for programmatic camera moves).
    pub fn camera_mut(&mut self) -> &mut CameraController {
        &mut self.camera
    }

    /// Attach a background scene producer; its updates are drained by
    /// [`apply_pending_scene`](Self::apply_pending_scene). The producer is
    /// shut down and joined when the engine drops or a new one is attached.
    pub fn attach_producer(&mut self, producer: SceneProducer) {
        self.producer = Some(producer);
    }

    /// Feed a raw input event through the processor and execute the
    /// resulting command, if any.
    pub fn handle_input(&mut self, event: InputEvent) {
        if let Some(command) = self.input.handle_event(event) {
            self.execute(command);
        }
    }

    /// Execute a viewer command.
    pub fn execute(&mut self, command: ViewerCommand) {
        match command {
            ViewerCommand::BeginDrag { kind, pos } => {
                self.camera.begin_drag(kind, pos);
            }
            ViewerCommand::Drag { pos } => self.camera.update_drag(pos),
            ViewerCommand::EndDrag => self.camera.end_drag(),
            ViewerCommand::Zoom { delta } => self.camera.apply_zoom(delta),
            ViewerCommand::SpawnCube => {
                let display = &self.options.display;
                self.scene.spawn_cube_at_origin(
                    Vec3::from(display.spawn_cube_size),
                    display.spawn_cube_color,
                );
            }
        }
    }

    /// Replace all cubes from four parallel attribute sequences.
    ///
    /// # Errors
    ///
    /// Returns [`CubeviewError::ShapeMismatch`] if the sequences have
    /// unequal lengths; the previous buffers are untouched.
    pub fn set_cubes(
        &mut self,
        positions: &[Vec3],
        sizes: &[Vec3],
        rotations: &[Vec3],
        colors: &[[f32; 3]],
    ) -> Result<(), CubeviewError> {
        self.scene.set_cubes(positions, sizes, rotations, colors)
    }

    /// Replace the point cloud.
    pub fn set_points(&mut self, points: Vec<Vec3>) {
        self.scene.set_points(points);
    }

    /// Spawn a cube at the origin with the configured size and color.
    pub fn spawn_cube(&mut self) {
        self.execute(ViewerCommand::SpawnCube);
    }

    /// Reconfigure the redraw interval to `1/fps` seconds (0 = unlimited).
    /// Retargeting an active limiter is idempotent.
    pub fn set_frame_rate(&mut self, fps: f64) {
        self.frame_timing.set_target_fps(fps);
    }

    /// Whether enough time has passed since the last frame to render again.
    #[must_use]
    pub fn should_render(&self) -> bool {
        self.frame_timing.should_render()
    }

    /// Smoothed frames per second.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.frame_timing.fps()
    }

    /// Duration of the most recent frame, in milliseconds.
    #[must_use]
    pub fn frame_time_ms(&self) -> f32 {
        self.frame_timing.frame_time_ms()
    }

    /// Drain the attached producer, installing its latest update. A
    /// replacement completed before this call is fully visible to the next
    /// draw pass; partial updates are impossible by construction.
    pub fn apply_pending_scene(&mut self) {
        let Some(producer) = self.producer.as_mut() else {
            return;
        };
        if let Some(update) = producer.try_recv() {
            self.scene.replace_cubes(update.cubes);
            self.scene.set_points(update.points);
        }
    }

    /// Handle a viewport resize. Zero dimensions are clamped to 1, width
    /// treated exactly like height, so a degenerate resize never produces
    /// a division by zero.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            log::warn!("degenerate resize {width}x{height}, clamping to 1");
        }
        let width = width.max(1);
        let height = height.max(1);

        self.context.resize(width, height);
        self.depth = DepthTarget::new(&self.context.device, width, height);
        self.camera.resize(width, height);
    }

    /// Render one frame.
    ///
    /// Uploads changed scene buffers, updates the camera uniform, then
    /// records one pass: clear, axis overlay, all cubes in one instanced
    /// draw, all points in one batched draw.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] from swapchain acquisition; `Lost`
    /// and `Outdated` are recoverable by calling
    /// [`resize`](Self::resize) and rendering again.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        // Skip re-uploads for frames where the scene did not change.
        if self.uploaded_generation != Some(self.scene.generation()) {
            let frame = PreparedFrame::build(&self.scene);
            self.cubes.prepare(&self.context, &frame);
            self.points.prepare(&self.context, &frame);
            self.uploaded_generation = Some(frame.generation);
        }

        self.camera_gpu
            .update(&self.context.queue, &self.camera.camera);

        let surface_texture = self.context.get_next_frame()?;
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self.context.create_encoder();
        {
            let mut render_pass =
                encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Scene Render Pass"),
                    color_attachments: &[Some(
                        wgpu::RenderPassColorAttachment {
                            view: &view,
                            resolve_target: None,
                            ops: wgpu::Operations {
                                load: wgpu::LoadOp::Clear(
                                    PreparedFrame::clear_color(
                                        &self.options.display,
                                    ),
                                ),
                                store: wgpu::StoreOp::Store,
                            },
                            depth_slice: None,
                        },
                    )],
                    depth_stencil_attachment: Some(
                        wgpu::RenderPassDepthStencilAttachment {
                            view: &self.depth.view,
                            depth_ops: Some(wgpu::Operations {
                                load: wgpu::LoadOp::Clear(1.0),
                                store: wgpu::StoreOp::Store,
                            }),
                            stencil_ops: None,
                        },
                    ),
                    ..Default::default()
                });

            self.axes.draw(&mut render_pass, &self.camera_gpu.bind_group);
            self.cubes
                .draw(&mut render_pass, &self.camera_gpu.bind_group);
            self.points
                .draw(&mut render_pass, &self.camera_gpu.bind_group);
        }

        self.context.submit(encoder);
        surface_texture.present();

        self.frame_timing.end_frame();
        Ok(())
    }
}

impl Drop for ViewerEngine {
    fn drop(&mut self) {
        // Stop the producer before the GPU context goes away.
        if let Some(mut producer) = self.producer.take() {
            producer.shutdown();
        }
        log::info!("viewer engine shut down");
    }
}
