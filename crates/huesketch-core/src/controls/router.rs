//! Routes pointer events to the picker controls and applies their output to
//! a session.

use super::{
    CaptureToken, ControlId, DragControl, LinearSliderController, PickerSurfaceController,
    PointerCapture, SurfaceSample,
};
use crate::input::PointerEvent;
use crate::session::ColorPickerSession;
use kurbo::{Point, Size};

/// Output of whichever control handled an event.
#[derive(Debug, Clone, Copy)]
enum ControlValue {
    Tone(SurfaceSample),
    Hue(u16),
    Alpha(u16),
}

impl ControlValue {
    fn apply(self, session: &mut ColorPickerSession) {
        match self {
            ControlValue::Tone(sample) => {
                session.set_saturation_level(sample.saturation.into(), sample.level.into())
            }
            ControlValue::Hue(hue) => session.set_hue(hue.into()),
            ControlValue::Alpha(alpha) => session.set_alpha(alpha.into()),
        }
    }
}

/// The surface, hue slider and alpha slider of one picker.
///
/// Presses go to a named control. Moves and releases go to whichever
/// control holds the capture token, wherever the pointer is. Releasing
/// always commits the current color; there is no cancel path.
#[derive(Debug)]
pub struct PickerControls {
    pub surface: PickerSurfaceController,
    pub hue: LinearSliderController,
    pub alpha: LinearSliderController,
    capture: PointerCapture,
    token: Option<CaptureToken>,
}

impl Default for PickerControls {
    fn default() -> Self {
        Self::new(Size::ZERO, 0.0)
    }
}

impl PickerControls {
    /// Controls for a surface of `surface` size and sliders `track_length` long.
    pub fn new(surface: Size, track_length: f64) -> Self {
        Self {
            surface: PickerSurfaceController::new(surface),
            hue: LinearSliderController::hue(track_length),
            alpha: LinearSliderController::alpha(track_length),
            capture: PointerCapture::new(),
            token: None,
        }
    }

    /// Control currently owning the pointer.
    pub fn owner(&self) -> Option<ControlId> {
        self.capture.owner()
    }

    /// Start a drag on `target` at `position` (relative to that control).
    /// Ignored while another control owns the pointer.
    pub fn press(
        &mut self,
        target: ControlId,
        position: Point,
        session: &mut ColorPickerSession,
    ) -> bool {
        if self.capture.is_captured() {
            return false;
        }

        let value = match target {
            ControlId::Surface => self.surface.press(position).map(ControlValue::Tone),
            ControlId::Hue => self.hue.press(position).map(ControlValue::Hue),
            ControlId::Alpha => self.alpha.press(position).map(ControlValue::Alpha),
        };
        let Some(value) = value else {
            return false;
        };
        value.apply(session);

        log::debug!("Drag started on {:?}", target);
        self.token = self.capture.acquire(target, position);
        true
    }

    /// Continue the current drag. No-op without an owner.
    pub fn pointer_move(&mut self, position: Point, session: &mut ColorPickerSession) -> bool {
        let Some(owner) = self.owner() else {
            return false;
        };

        let value = match owner {
            ControlId::Surface => self.surface.drag(position).map(ControlValue::Tone),
            ControlId::Hue => self.hue.drag(position).map(ControlValue::Hue),
            ControlId::Alpha => self.alpha.drag(position).map(ControlValue::Alpha),
        };
        match value {
            Some(value) => {
                value.apply(session);
                true
            }
            None => false,
        }
    }

    /// End the current drag and commit. Returns whether a commit happened.
    pub fn release(&mut self, session: &mut ColorPickerSession) -> bool {
        let Some(token) = self.token.take() else {
            return false;
        };
        let owner = self.capture.release(token);

        let ended = match owner {
            ControlId::Surface => self.surface.release(),
            ControlId::Hue => self.hue.release(),
            ControlId::Alpha => self.alpha.release(),
        };
        log::debug!("Drag ended on {:?}", owner);
        if ended {
            session.commit_current_color();
        }
        ended
    }

    /// Dispatch a unified pointer event. `target` names the control under
    /// the pointer and only matters for presses.
    pub fn handle(
        &mut self,
        target: Option<ControlId>,
        event: PointerEvent,
        session: &mut ColorPickerSession,
    ) -> bool {
        match event {
            PointerEvent::Down { position } => match target {
                Some(target) => self.press(target, position, session),
                None => false,
            },
            PointerEvent::Move { position } => self.pointer_move(position, session),
            PointerEvent::Up { .. } => self.release(session),
        }
    }

    /// Keyboard step on a slider. The surface has no discrete steps.
    pub fn step(&mut self, target: ControlId, delta: i32, session: &mut ColorPickerSession) -> bool {
        if self.capture.is_captured() {
            return false;
        }
        let color = session.color();
        match target {
            ControlId::Hue => session.set_hue(self.hue.step(color.hue(), delta).into()),
            ControlId::Alpha => {
                session.set_alpha(self.alpha.step(color.alpha().into(), delta).into())
            }
            ControlId::Surface => return false,
        }
        true
    }

    /// Key released on a slider: commits like a drag release.
    pub fn step_released(&mut self, session: &mut ColorPickerSession) -> bool {
        if self.capture.is_captured() {
            return false;
        }
        session.commit_current_color();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::ColorModel;

    fn setup() -> (PickerControls, ColorPickerSession) {
        (
            PickerControls::new(Size::new(200.0, 100.0), 360.0),
            ColorPickerSession::new(ColorModel::Hsb, 12),
        )
    }

    #[test]
    fn test_surface_drag_commits_once() {
        let (mut controls, mut session) = setup();
        assert!(controls.press(ControlId::Surface, Point::new(200.0, 0.0), &mut session));
        assert_eq!(controls.owner(), Some(ControlId::Surface));
        assert_eq!(session.color().saturation(), 100);
        assert_eq!(session.color().level(), 100);

        controls.pointer_move(Point::new(100.0, 50.0), &mut session);
        assert_eq!(session.color().saturation(), 50);
        assert!(session.recent().is_empty());

        assert!(controls.release(&mut session));
        assert_eq!(session.recent().len(), 1);
        assert!(!controls.release(&mut session));
        assert_eq!(session.recent().len(), 1);
        assert_eq!(controls.owner(), None);
    }

    #[test]
    fn test_moves_follow_capture_owner() {
        let (mut controls, mut session) = setup();
        controls.press(ControlId::Hue, Point::new(90.0, 5.0), &mut session);
        assert_eq!(session.color().hue(), 90);

        // A second press elsewhere is ignored while the hue slider owns the drag.
        assert!(!controls.press(ControlId::Surface, Point::new(0.0, 0.0), &mut session));
        controls.pointer_move(Point::new(720.0, 400.0), &mut session);
        assert_eq!(session.color().hue(), 360);
        assert!(!controls.surface.drag_state().active);
    }

    #[test]
    fn test_release_outside_still_commits() {
        let (mut controls, mut session) = setup();
        let event = PointerEvent::Down {
            position: Point::new(180.0, 0.0),
        };
        controls.handle(Some(ControlId::Alpha), event, &mut session);
        assert_eq!(session.color().alpha(), 50);

        let up = PointerEvent::Up {
            position: Point::new(-900.0, -900.0),
        };
        assert!(controls.handle(None, up, &mut session));
        assert_eq!(session.recent(), [session.hex()]);
    }

    #[test]
    fn test_idle_events_are_noops() {
        let (mut controls, mut session) = setup();
        let before = session.color();
        assert!(!controls.pointer_move(Point::new(10.0, 10.0), &mut session));
        assert!(!controls.release(&mut session));
        assert!(!controls.handle(
            None,
            PointerEvent::Down {
                position: Point::ZERO
            },
            &mut session
        ));
        assert_eq!(session.color(), before);
        assert!(session.recent().is_empty());
    }

    #[test]
    fn test_unmeasured_surface_does_not_capture() {
        let mut controls = PickerControls::default();
        let mut session = ColorPickerSession::new(ColorModel::Hsb, 12);
        assert!(!controls.press(ControlId::Surface, Point::new(5.0, 5.0), &mut session));
        assert_eq!(controls.owner(), None);
        assert!(!controls.release(&mut session));
    }

    #[test]
    fn test_keyboard_steps_commit_on_release() {
        let (mut controls, mut session) = setup();
        session.set_alpha(99);
        assert!(controls.step(ControlId::Alpha, 5, &mut session));
        assert_eq!(session.color().alpha(), 100);
        assert!(!controls.step(ControlId::Surface, 1, &mut session));
        assert!(session.recent().is_empty());

        assert!(controls.step_released(&mut session));
        assert_eq!(session.recent().len(), 1);
    }

    #[test]
    fn test_alpha_then_recent_resets_alpha() {
        let (mut controls, mut session) = setup();
        controls.press(ControlId::Alpha, Point::new(180.0, 0.0), &mut session);
        controls.release(&mut session);
        assert_eq!(session.color().alpha(), 50);

        let hex = session.recent()[0].clone();
        session.select_recent(&hex).unwrap();
        assert_eq!(session.color().alpha(), 100);
    }
}
