//! Pointer-driven picker controls.
//!
//! Each control is a small `Idle` / `Dragging` state machine that maps
//! pointer positions to color components:
//! - [`PickerSurfaceController`]: 2D plane, saturation x level
//! - [`LinearSliderController`]: 1D track, hue or alpha
//!
//! [`PickerControls`] owns one of each plus the [`PointerCapture`] that
//! guarantees a single control receives moves and releases during a drag.

mod router;
mod slider;
mod surface;

pub use router::PickerControls;
pub use slider::LinearSliderController;
pub use surface::{PickerSurfaceController, SurfaceSample};

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Identifies a control for routing and capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ControlId {
    Surface,
    Hue,
    Alpha,
}

/// Interaction state of a control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControlState {
    #[default]
    Idle,
    Dragging,
}

/// Drag bookkeeping owned by the control that is capturing the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DragState {
    pub active: bool,
    /// Where the drag started, relative to the control.
    pub pointer_origin: Point,
}

impl DragState {
    pub(crate) fn begin(&mut self, origin: Point) {
        self.active = true;
        self.pointer_origin = origin;
    }

    /// Ends the drag. Returns whether a drag was actually active.
    pub(crate) fn end(&mut self) -> bool {
        std::mem::replace(&mut self.active, false)
    }
}

/// Common press / move / release contract for drag controls.
pub trait DragControl {
    /// Value emitted on press and on every move while dragging.
    type Value;

    /// Start a drag. Emits the value under `position` immediately, or
    /// `None` if the control cannot map positions yet (unmeasured).
    fn press(&mut self, position: Point) -> Option<Self::Value>;

    /// Continue a drag. `None` while idle or unmeasured.
    fn drag(&mut self, position: Point) -> Option<Self::Value>;

    /// End a drag. Returns `true` when a commit should fire; idle
    /// releases return `false`.
    fn release(&mut self) -> bool;

    fn drag_state(&self) -> &DragState;

    fn state(&self) -> ControlState {
        if self.drag_state().active {
            ControlState::Dragging
        } else {
            ControlState::Idle
        }
    }
}

/// Proof of exclusive pointer ownership. Not clonable: exactly one exists
/// per drag and it must be handed back to [`PointerCapture::release`].
#[derive(Debug)]
pub struct CaptureToken {
    owner: ControlId,
    origin: Point,
}

impl CaptureToken {
    pub fn owner(&self) -> ControlId {
        self.owner
    }

    pub fn origin(&self) -> Point {
        self.origin
    }
}

/// Exclusive pointer capture. At most one control holds it at a time.
#[derive(Debug, Clone, Default)]
pub struct PointerCapture {
    owner: Option<ControlId>,
}

impl PointerCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the capture for `owner`. `None` if another drag holds it.
    pub fn acquire(&mut self, owner: ControlId, origin: Point) -> Option<CaptureToken> {
        if self.owner.is_some() {
            return None;
        }
        self.owner = Some(owner);
        Some(CaptureToken { owner, origin })
    }

    /// Hand the capture back.
    pub fn release(&mut self, token: CaptureToken) -> ControlId {
        debug_assert_eq!(self.owner, Some(token.owner));
        self.owner = None;
        token.owner
    }

    pub fn owner(&self) -> Option<ControlId> {
        self.owner
    }

    pub fn is_captured(&self) -> bool {
        self.owner.is_some()
    }
}
