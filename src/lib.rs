// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]
// Graphics math: float casts and comparisons are intentional
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::float_cmp)]
// Pedantic/nursery allowances
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::default_trait_access)]
#![allow(clippy::suboptimal_flops)]

//! Interactive 3D viewer for wireframe cubes and point clouds, built on wgpu.
//!
//! Cubeview renders a scene of colored wireframe cube instances and a
//! batched point cloud under a free orbit/pan/zoom camera:
//!
//! - drag with the left mouse button to rotate,
//! - drag with the right button to pan,
//! - scroll to zoom,
//! - middle-click to drop a new cube at the origin.
//!
//! # Key entry points
//!
//! - [`engine::ViewerEngine`] - the rendering engine owning all viewer state
//! - [`scene::SceneBuffers`] - the cube and point collections
//! - [`options::Options`] - runtime configuration (camera, display)
//! - [`Viewer`] - standalone winit window (`viewer` feature)
//!
//! # Architecture
//!
//! A scene producer (for example [`scene::producer::SceneProducer`], which
//! runs on a background thread and hands frames over via a lock-free triple
//! buffer) replaces the cube and point buffers wholesale at its own cadence.
//! Each frame the engine uploads changed buffers to the GPU and issues one
//! batched draw per primitive family: the axis overlay, all cube instances
//! in a single indexed draw, and the whole point cloud in a single draw.

pub mod camera;
pub mod engine;
pub mod error;
pub mod gpu;
pub mod input;
pub mod options;
pub mod renderer;
pub mod scene;
pub mod util;

#[cfg(feature = "viewer")]
mod viewer;

pub use engine::{ViewerCommand, ViewerEngine};
pub use error::CubeviewError;
pub use input::{InputEvent, MouseButton};
pub use scene::{CubeInstance, SceneBuffers};
#[cfg(feature = "viewer")]
pub use viewer::{Viewer, ViewerBuilder};
