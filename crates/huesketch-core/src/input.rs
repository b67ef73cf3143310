//! Input normalization for mouse and touch events.
//!
//! Hosts feed raw [`InputEvent`]s in; [`InputState`] turns them into a
//! single [`PointerEvent`] stream so every control handles mouse and touch
//! identically.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Raw mouse event, position relative to the receiving element.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum MouseEvent {
    Down { position: Point, button: MouseButton },
    Move { position: Point },
    Up { position: Point, button: MouseButton },
}

/// Touch lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TouchPhase {
    Start,
    Move,
    End,
    Cancel,
}

/// Raw touch event carrying every active touch point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TouchEvent {
    pub phase: TouchPhase,
    /// Active touches, first one drives the pointer. Empty on the final end.
    pub touches: Vec<Point>,
}

/// Anything a host can deliver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum InputEvent {
    Mouse(MouseEvent),
    Touch(TouchEvent),
}

/// Unified pointer event consumed by controls and the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { position: Point },
    Move { position: Point },
    Up { position: Point },
}

impl PointerEvent {
    pub fn position(&self) -> Point {
        match *self {
            PointerEvent::Down { position }
            | PointerEvent::Move { position }
            | PointerEvent::Up { position } => position,
        }
    }
}

/// Tracks pointer position and press state across events.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Last known pointer position.
    pub pointer_position: Point,
    /// Position before the last event, for delta calculations.
    pub previous_pointer_position: Point,
    /// Whether the primary button / first touch is down.
    pressed: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the primary pointer is currently down.
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    fn moved_to(&mut self, position: Point) {
        self.previous_pointer_position = self.pointer_position;
        self.pointer_position = position;
    }

    /// Normalize a raw event. Returns `None` for events that carry no
    /// pointer meaning (non-primary buttons, empty touch moves).
    pub fn translate(&mut self, event: &InputEvent) -> Option<PointerEvent> {
        match event {
            InputEvent::Mouse(mouse) => self.translate_mouse(mouse),
            InputEvent::Touch(touch) => self.translate_touch(touch),
        }
    }

    fn translate_mouse(&mut self, event: &MouseEvent) -> Option<PointerEvent> {
        match *event {
            MouseEvent::Down { position, button } => {
                self.moved_to(position);
                if button != MouseButton::Left {
                    return None;
                }
                self.pressed = true;
                Some(PointerEvent::Down { position })
            }
            MouseEvent::Move { position } => {
                self.moved_to(position);
                Some(PointerEvent::Move { position })
            }
            MouseEvent::Up { position, button } => {
                self.moved_to(position);
                if button != MouseButton::Left {
                    return None;
                }
                self.pressed = false;
                Some(PointerEvent::Up { position })
            }
        }
    }

    fn translate_touch(&mut self, event: &TouchEvent) -> Option<PointerEvent> {
        let first = event.touches.first().copied();
        match event.phase {
            TouchPhase::Start => {
                let position = first?;
                self.moved_to(position);
                if self.pressed {
                    // Additional finger: the first touch keeps driving.
                    return Some(PointerEvent::Move { position });
                }
                self.pressed = true;
                Some(PointerEvent::Down { position })
            }
            TouchPhase::Move => {
                let position = first?;
                self.moved_to(position);
                Some(PointerEvent::Move { position })
            }
            TouchPhase::End | TouchPhase::Cancel => {
                if let Some(position) = first {
                    self.moved_to(position);
                }
                self.pressed = false;
                Some(PointerEvent::Up {
                    position: self.pointer_position,
                })
            }
        }
    }

    /// Pointer movement caused by the last event.
    pub fn pointer_delta(&self) -> Vec2 {
        self.pointer_position - self.previous_pointer_position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mouse_left_button() {
        let mut input = InputState::new();
        let down = input.translate(&InputEvent::Mouse(MouseEvent::Down {
            position: Point::new(10.0, 20.0),
            button: MouseButton::Left,
        }));
        assert_eq!(
            down,
            Some(PointerEvent::Down {
                position: Point::new(10.0, 20.0)
            })
        );
        assert!(input.is_pressed());

        let up = input.translate(&InputEvent::Mouse(MouseEvent::Up {
            position: Point::new(12.0, 20.0),
            button: MouseButton::Left,
        }));
        assert!(matches!(up, Some(PointerEvent::Up { .. })));
        assert!(!input.is_pressed());
    }

    #[test]
    fn test_mouse_other_buttons_ignored() {
        let mut input = InputState::new();
        let down = input.translate(&InputEvent::Mouse(MouseEvent::Down {
            position: Point::new(10.0, 20.0),
            button: MouseButton::Right,
        }));
        assert!(down.is_none());
        assert!(!input.is_pressed());
        assert_eq!(input.pointer_position, Point::new(10.0, 20.0));
    }

    #[test]
    fn test_touch_uses_first_point() {
        let mut input = InputState::new();
        let down = input.translate(&InputEvent::Touch(TouchEvent {
            phase: TouchPhase::Start,
            touches: vec![Point::new(5.0, 5.0), Point::new(90.0, 90.0)],
        }));
        assert_eq!(down.map(|e| e.position()), Some(Point::new(5.0, 5.0)));

        let second = input.translate(&InputEvent::Touch(TouchEvent {
            phase: TouchPhase::Start,
            touches: vec![Point::new(6.0, 5.0), Point::new(90.0, 90.0)],
        }));
        assert!(matches!(second, Some(PointerEvent::Move { .. })));
    }

    #[test]
    fn test_touch_end_without_points_uses_last_position() {
        let mut input = InputState::new();
        input.translate(&InputEvent::Touch(TouchEvent {
            phase: TouchPhase::Start,
            touches: vec![Point::new(5.0, 5.0)],
        }));
        input.translate(&InputEvent::Touch(TouchEvent {
            phase: TouchPhase::Move,
            touches: vec![Point::new(40.0, 30.0)],
        }));
        let up = input.translate(&InputEvent::Touch(TouchEvent {
            phase: TouchPhase::End,
            touches: vec![],
        }));
        assert_eq!(
            up,
            Some(PointerEvent::Up {
                position: Point::new(40.0, 30.0)
            })
        );
        assert!(!input.is_pressed());
    }

    #[test]
    fn test_empty_touch_move_ignored() {
        let mut input = InputState::new();
        let event = input.translate(&InputEvent::Touch(TouchEvent {
            phase: TouchPhase::Move,
            touches: vec![],
        }));
        assert!(event.is_none());
    }

    #[test]
    fn test_pointer_delta() {
        let mut input = InputState::new();
        input.translate(&InputEvent::Mouse(MouseEvent::Move {
            position: Point::new(100.0, 100.0),
        }));
        input.translate(&InputEvent::Mouse(MouseEvent::Move {
            position: Point::new(150.0, 120.0),
        }));
        let delta = input.pointer_delta();
        assert!((delta.x - 50.0).abs() < f64::EPSILON);
        assert!((delta.y - 20.0).abs() < f64::EPSILON);
    }
}
