//! Standalone visualization window backed by winit.
//!
//! ```no_run
//! # use cubeview::Viewer;
//! Viewer::builder()
//!     .with_title("Cubes")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::{
    error::CubeviewError, options::Options, scene::producer::SceneProducer,
    InputEvent, MouseButton, ViewerEngine,
};

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    options: Option<Options>,
    title: String,
    frame_rate: Option<f64>,
    producer: Option<SceneProducer>,
}

impl ViewerBuilder {
    /// Create a builder with sensible defaults (title "Cubeview", default
    /// options, uncapped frame rate, no producer).
    fn new() -> Self {
        Self {
            options: None,
            title: "Cubeview".into(),
            frame_rate: None,
            producer: None,
        }
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Cap redraws at `fps` frames per second (0 = unlimited).
    #[must_use]
    pub const fn with_frame_rate(mut self, fps: f64) -> Self {
        self.frame_rate = Some(fps);
        self
    }

    /// Attach a background scene producer; the engine drains it once per
    /// frame and shuts it down when the window closes.
    #[must_use]
    pub fn with_producer(mut self, producer: SceneProducer) -> Self {
        self.producer = Some(producer);
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            options: self.options,
            title: self.title,
            frame_rate: self.frame_rate,
            producer: self.producer,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A standalone window that displays the cube-and-point scene.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    options: Option<Options>,
    title: String,
    frame_rate: Option<f64>,
    producer: Option<SceneProducer>,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed.
    ///
    /// # Errors
    ///
    /// Returns [`CubeviewError::Viewer`] if the event loop cannot be
    /// created or exits with an error.
    pub fn run(self) -> Result<(), CubeviewError> {
        let event_loop = EventLoop::new()
            .map_err(|e| CubeviewError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = ViewerApp {
            window: None,
            engine: None,
            options: self.options,
            title: self.title,
            frame_rate: self.frame_rate,
            producer: self.producer,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| CubeviewError::Viewer(e.to_string()))
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

/// Internal winit application handler.
struct ViewerApp {
    window: Option<Arc<Window>>,
    engine: Option<ViewerEngine>,
    options: Option<Options>,
    title: String,
    frame_rate: Option<f64>,
    producer: Option<SceneProducer>,
}

/// Clamp the window inner size to a usable wgpu surface size.
fn viewport_size(inner: winit::dpi::PhysicalSize<u32>) -> (u32, u32) {
    (inner.width.max(1), inner.height.max(1))
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let monitor = event_loop
            .primary_monitor()
            .or_else(|| event_loop.available_monitors().next());
        let attrs = if let Some(mon) = &monitor {
            let mon_size = mon.size();
            let scale = mon.scale_factor();
            let logical_w = (mon_size.width as f64 / scale * 0.75) as u32;
            let logical_h = (mon_size.height as f64 / scale * 0.75) as u32;
            Window::default_attributes()
                .with_title(&self.title)
                .with_inner_size(winit::dpi::LogicalSize::new(
                    logical_w, logical_h,
                ))
        } else {
            Window::default_attributes().with_title(&self.title)
        };

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let (vp_w, vp_h) = viewport_size(window.inner_size());
        let options = self.options.take().unwrap_or_default();

        let engine_result = pollster::block_on(
            ViewerEngine::new_with_options(
                window.clone(),
                (vp_w, vp_h),
                options,
            ),
        );

        let mut engine = match engine_result {
            Ok(e) => e,
            Err(e) => {
                log::error!("Failed to initialize engine: {e}");
                event_loop.exit();
                return;
            }
        };

        if let Some(fps) = self.frame_rate {
            engine.set_frame_rate(fps);
        }
        if let Some(producer) = self.producer.take() {
            engine.attach_producer(producer);
        }

        window.request_redraw();
        self.window = Some(window);
        self.engine = Some(engine);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            // Dropping the engine joins the producer thread.
            self.engine = None;
            event_loop.exit();
            return;
        }

        // Guard: both window and engine must be initialised.
        if self.window.is_none() || self.engine.is_none() {
            return;
        }

        match event {
            WindowEvent::Resized(event_size) => {
                let (vp_w, vp_h) = viewport_size(event_size);
                if let Some(engine) = &mut self.engine {
                    engine.resize(vp_w, vp_h);
                }
            }

            WindowEvent::RedrawRequested => {
                if let (Some(window), Some(engine)) =
                    (&self.window, &mut self.engine)
                {
                    if engine.should_render() {
                        engine.apply_pending_scene();
                        match engine.render() {
                            Ok(()) => {}
                            Err(
                                wgpu::SurfaceError::Outdated
                                | wgpu::SurfaceError::Lost,
                            ) => {
                                let inner = window.inner_size();
                                let (vp_w, vp_h) = viewport_size(inner);
                                engine.resize(vp_w, vp_h);
                            }
                            Err(e) => {
                                log::error!("render error: {e:?}");
                            }
                        }
                    }
                    window.request_redraw();
                }
            }

            WindowEvent::MouseInput { button, state, .. } => {
                let pressed = state == ElementState::Pressed;
                if let Some(engine) = &mut self.engine {
                    engine.handle_input(InputEvent::MouseButton {
                        button: MouseButton::from(button),
                        pressed,
                    });
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                if let Some(engine) = &mut self.engine {
                    engine.handle_input(InputEvent::CursorMoved {
                        x: position.x as f32,
                        y: position.y as f32,
                    });
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let scroll_delta = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.01,
                };
                if let Some(engine) = &mut self.engine {
                    engine.handle_input(InputEvent::Scroll {
                        delta: scroll_delta,
                    });
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => (),
        }
    }
}
