//! Crate-level error types.

use std::fmt;

use crate::gpu::render_context::RenderContextError;

/// Errors produced by the cubeview crate.
#[derive(Debug)]
pub enum CubeviewError {
    /// GPU context initialization failure.
    Gpu(RenderContextError),
    /// Cube attribute sequences of unequal length passed to `set_cubes`.
    ShapeMismatch {
        /// Number of positions supplied.
        positions: usize,
        /// Number of sizes supplied.
        sizes: usize,
        /// Number of rotations supplied.
        rotations: usize,
        /// Number of colors supplied.
        colors: usize,
    },
    /// Viewport with a zero dimension where no fallback size exists.
    InvalidViewport {
        /// Requested width in pixels.
        width: u32,
        /// Requested height in pixels.
        height: u32,
    },
    /// Failed to spawn a background thread.
    ThreadSpawn(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// Viewer event-loop failure.
    Viewer(String),
}

impl fmt::Display for CubeviewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpu(e) => write!(f, "GPU error: {e}"),
            Self::ShapeMismatch {
                positions,
                sizes,
                rotations,
                colors,
            } => {
                write!(
                    f,
                    "cube attribute lengths differ: {positions} positions, \
                     {sizes} sizes, {rotations} rotations, {colors} colors"
                )
            }
            Self::InvalidViewport { width, height } => {
                write!(f, "invalid viewport size {width}x{height}")
            }
            Self::ThreadSpawn(e) => {
                write!(f, "failed to spawn thread: {e}")
            }
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Viewer(msg) => write!(f, "viewer error: {msg}"),
        }
    }
}

impl std::error::Error for CubeviewError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Gpu(e) => Some(e),
            Self::Io(e) | Self::ThreadSpawn(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RenderContextError> for CubeviewError {
    fn from(e: RenderContextError) -> Self {
        Self::Gpu(e)
    }
}

impl From<std::io::Error> for CubeviewError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
