//! Two-axis saturation x level picker surface.

use super::{DragControl, DragState};
use crate::color::MAX_PERCENT;
use kurbo::{Point, Size};

/// Saturation and brightness/lightness picked from the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceSample {
    pub saturation: u8,
    pub level: u8,
}

/// Maps positions inside a `width x height` region to a [`SurfaceSample`].
///
/// x grows saturation left to right, y shrinks level top to bottom (top
/// edge is full brightness/lightness). Positions outside the region clamp
/// to the nearest edge so a drag may leave the visual bounds.
#[derive(Debug, Clone, Default)]
pub struct PickerSurfaceController {
    size: Size,
    drag: DragState,
}

impl PickerSurfaceController {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            drag: DragState::default(),
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Update the measured region. A drag in progress keeps going.
    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    /// Whether the region has a usable, non-zero area.
    pub fn is_measured(&self) -> bool {
        self.size.width.is_finite()
            && self.size.height.is_finite()
            && self.size.width > 0.0
            && self.size.height > 0.0
    }

    /// Sample under `position`, `None` while unmeasured.
    pub fn sample_at(&self, position: Point) -> Option<SurfaceSample> {
        if !self.is_measured() {
            return None;
        }
        let Size { width, height } = self.size;
        let x = position.x.clamp(0.0, width);
        let y = position.y.clamp(0.0, height);

        let max = f64::from(MAX_PERCENT);
        Some(SurfaceSample {
            saturation: (x / width * max).round() as u8,
            level: ((1.0 - y / height) * max).round() as u8,
        })
    }

    /// Where the cursor for `sample` sits. Exact inverse of [`sample_at`]
    /// on the integer grid.
    ///
    /// [`sample_at`]: Self::sample_at
    pub fn position_for(&self, sample: SurfaceSample) -> Point {
        let max = f64::from(MAX_PERCENT);
        let s = f64::from(sample.saturation.min(MAX_PERCENT)) / max;
        let l = f64::from(sample.level.min(MAX_PERCENT)) / max;
        Point::new(s * self.size.width, (1.0 - l) * self.size.height)
    }
}

impl DragControl for PickerSurfaceController {
    type Value = SurfaceSample;

    fn press(&mut self, position: Point) -> Option<SurfaceSample> {
        let sample = self.sample_at(position);
        if sample.is_none() {
            log::debug!("Ignoring press on unmeasured picker surface");
            return None;
        }
        self.drag.begin(position);
        sample
    }

    fn drag(&mut self, position: Point) -> Option<SurfaceSample> {
        if !self.drag.active {
            return None;
        }
        self.sample_at(position)
    }

    fn release(&mut self) -> bool {
        self.drag.end()
    }

    fn drag_state(&self) -> &DragState {
        &self.drag
    }
}
