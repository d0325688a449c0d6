//! The engine's complete interactive vocabulary.
//!
//! Every user-facing operation — whether triggered by a mouse gesture or a
//! programmatic call — is represented as a `ViewerCommand`. Consumers
//! construct commands and pass them to
//! [`ViewerEngine::execute`](super::ViewerEngine::execute).

use glam::Vec2;

use crate::camera::DragKind;

/// A discrete or parameterized operation the engine can perform.
///
/// The engine never cares *how* a command was triggered — mouse, GUI, or
/// API all look identical:
///
/// ```ignore
/// engine.execute(ViewerCommand::Zoom { delta: 1.0 });
/// engine.execute(ViewerCommand::SpawnCube);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewerCommand {
    /// Begin a camera drag of the given kind at the given pointer position.
    BeginDrag {
        /// Rotate or pan.
        kind: DragKind,
        /// Pointer position in physical pixels.
        pos: Vec2,
    },

    /// Feed a pointer position into the active camera drag.
    Drag {
        /// Pointer position in physical pixels.
        pos: Vec2,
    },

    /// End the active camera drag.
    EndDrag,

    /// Zoom the camera by a number of wheel notches.
    Zoom {
        /// Scroll amount in notches (positive = zoom in).
        delta: f32,
    },

    /// Spawn a new cube at the origin.
    SpawnCube,
}
