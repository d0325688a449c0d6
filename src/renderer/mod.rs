//! GPU renderers: one per primitive family, one draw call each.
//!
//! Each renderer owns its pipeline and buffers, takes its CPU-side data
//! from a [`PreparedFrame`](crate::scene::PreparedFrame), and early-returns
//! from `draw` when it has nothing to show so empty collections never issue
//! degenerate draw calls.

pub mod axes;
pub mod cubes;
pub mod points;

pub use axes::AxisRenderer;
pub use cubes::CubeRenderer;
pub use points::PointRenderer;
