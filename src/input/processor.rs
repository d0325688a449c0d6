//! Converts raw platform events into engine commands.
//!
//! The `InputProcessor` owns the transient pointer state (cursor position,
//! which button holds the active drag). It is the only thing that sits
//! between raw window events and the engine's
//! [`execute`](crate::ViewerEngine::execute) method.

use glam::Vec2;

use super::event::{InputEvent, MouseButton};
use crate::camera::DragKind;
use crate::engine::command::ViewerCommand;

/// Converts raw window events into [`ViewerCommand`]s.
///
/// Left drags rotate, right drags pan, the wheel zooms, and a middle-button
/// press spawns a cube. Only one drag is active at a time; a second camera
/// button pressed mid-drag is ignored until the first is released.
pub struct InputProcessor {
    cursor: Vec2,
    active_button: Option<MouseButton>,
}

impl InputProcessor {
    /// Create a new processor with no active drag.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cursor: Vec2::ZERO,
            active_button: None,
        }
    }

    /// Current cursor position in physical pixels.
    #[must_use]
    pub fn cursor(&self) -> Vec2 {
        self.cursor
    }

    /// Process a raw input event and return zero or one commands.
    pub fn handle_event(&mut self, event: InputEvent) -> Option<ViewerCommand> {
        match event {
            InputEvent::CursorMoved { x, y } => {
                self.cursor = Vec2::new(x, y);
                self.active_button
                    .map(|_| ViewerCommand::Drag { pos: self.cursor })
            }
            InputEvent::MouseButton { button, pressed } => {
                self.handle_mouse_button(button, pressed)
            }
            InputEvent::Scroll { delta } => Some(ViewerCommand::Zoom { delta }),
        }
    }

    fn handle_mouse_button(
        &mut self,
        button: MouseButton,
        pressed: bool,
    ) -> Option<ViewerCommand> {
        let kind = match button {
            MouseButton::Left => DragKind::Rotate,
            MouseButton::Right => DragKind::Pan,
            MouseButton::Middle => {
                // Spawn on press; the middle button never drags.
                return pressed.then_some(ViewerCommand::SpawnCube);
            }
        };

        if pressed {
            if self.active_button.is_some() {
                return None;
            }
            self.active_button = Some(button);
            return Some(ViewerCommand::BeginDrag {
                kind,
                pos: self.cursor,
            });
        }

        if self.active_button == Some(button) {
            self.active_button = None;
            return Some(ViewerCommand::EndDrag);
        }
        None
    }
}

impl Default for InputProcessor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(button: MouseButton) -> InputEvent {
        InputEvent::MouseButton {
            button,
            pressed: true,
        }
    }

    fn release(button: MouseButton) -> InputEvent {
        InputEvent::MouseButton {
            button,
            pressed: false,
        }
    }

    fn moved(x: f32, y: f32) -> InputEvent {
        InputEvent::CursorMoved { x, y }
    }

    #[test]
    fn left_drag_produces_rotate_commands() {
        let mut p = InputProcessor::new();
        let _ = p.handle_event(moved(10.0, 20.0));

        assert_eq!(
            p.handle_event(press(MouseButton::Left)),
            Some(ViewerCommand::BeginDrag {
                kind: DragKind::Rotate,
                pos: Vec2::new(10.0, 20.0),
            })
        );
        assert_eq!(
            p.handle_event(moved(15.0, 25.0)),
            Some(ViewerCommand::Drag {
                pos: Vec2::new(15.0, 25.0),
            })
        );
        assert_eq!(
            p.handle_event(release(MouseButton::Left)),
            Some(ViewerCommand::EndDrag)
        );
    }

    #[test]
    fn right_drag_produces_pan_commands() {
        let mut p = InputProcessor::new();
        assert_eq!(
            p.handle_event(press(MouseButton::Right)),
            Some(ViewerCommand::BeginDrag {
                kind: DragKind::Pan,
                pos: Vec2::ZERO,
            })
        );
    }

    #[test]
    fn moves_without_a_held_button_produce_nothing() {
        let mut p = InputProcessor::new();
        assert_eq!(p.handle_event(moved(100.0, 100.0)), None);
    }

    #[test]
    fn cursor_tracks_the_latest_move() {
        let mut p = InputProcessor::new();
        assert_eq!(p.cursor(), Vec2::ZERO);
        let _ = p.handle_event(moved(12.0, 34.0));
        let _ = p.handle_event(moved(56.0, 78.0));
        assert_eq!(p.cursor(), Vec2::new(56.0, 78.0));

        // A drag started now anchors at the tracked position.
        assert_eq!(
            p.handle_event(press(MouseButton::Left)),
            Some(ViewerCommand::BeginDrag {
                kind: DragKind::Rotate,
                pos: Vec2::new(56.0, 78.0),
            })
        );
    }

    #[test]
    fn middle_click_spawns_on_press_only() {
        let mut p = InputProcessor::new();
        assert_eq!(
            p.handle_event(press(MouseButton::Middle)),
            Some(ViewerCommand::SpawnCube)
        );
        assert_eq!(p.handle_event(release(MouseButton::Middle)), None);
        // Middle never starts a drag.
        assert_eq!(p.handle_event(moved(5.0, 5.0)), None);
    }

    #[test]
    fn second_camera_button_is_ignored_mid_drag() {
        let mut p = InputProcessor::new();
        let _ = p.handle_event(press(MouseButton::Left));
        assert_eq!(p.handle_event(press(MouseButton::Right)), None);
        // Releasing the non-active button must not end the drag.
        assert_eq!(p.handle_event(release(MouseButton::Right)), None);
        assert_eq!(
            p.handle_event(release(MouseButton::Left)),
            Some(ViewerCommand::EndDrag)
        );
    }

    #[test]
    fn wheel_maps_straight_to_zoom() {
        let mut p = InputProcessor::new();
        assert_eq!(
            p.handle_event(InputEvent::Scroll { delta: -2.0 }),
            Some(ViewerCommand::Zoom { delta: -2.0 })
        );
    }
}
