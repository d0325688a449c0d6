//! Free camera: unbounded rotation/pan/zoom state, view-projection math,
//! drag state machine, and the GPU uniform binding.

pub mod controller;
pub mod core;

pub use controller::{CameraController, CameraGpu, DragKind};
pub use core::{Camera, CameraUniform};
