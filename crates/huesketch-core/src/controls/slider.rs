//! One-axis slider over a bounded integer channel.

use super::{DragControl, DragState};
use crate::color::{MAX_HUE, MAX_PERCENT};
use kurbo::Point;

/// Maps an offset along a horizontal track of length `length` to a value
/// in `[min, max]`. Offsets outside the track clamp to its ends.
#[derive(Debug, Clone)]
pub struct LinearSliderController {
    min: u16,
    max: u16,
    length: f64,
    drag: DragState,
}

impl LinearSliderController {
    /// Slider over `[min, max]`; the bounds are swapped if given reversed.
    pub fn new(min: u16, max: u16, length: f64) -> Self {
        Self {
            min: min.min(max),
            max: max.max(min),
            length,
            drag: DragState::default(),
        }
    }

    /// Hue slider, 0-360.
    pub fn hue(length: f64) -> Self {
        Self::new(0, MAX_HUE, length)
    }

    /// Alpha slider, 0-100.
    pub fn alpha(length: f64) -> Self {
        Self::new(0, u16::from(MAX_PERCENT), length)
    }

    pub fn min(&self) -> u16 {
        self.min
    }

    pub fn max(&self) -> u16 {
        self.max
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn set_length(&mut self, length: f64) {
        self.length = length;
    }

    pub fn is_measured(&self) -> bool {
        self.length.is_finite() && self.length > 0.0
    }

    /// Value at `offset` along the track, `None` while unmeasured.
    pub fn value_at(&self, offset: f64) -> Option<u16> {
        if !self.is_measured() {
            return None;
        }
        let clamped = offset.clamp(0.0, self.length);
        let span = f64::from(self.max - self.min);
        Some((clamped / self.length * span).round() as u16 + self.min)
    }

    /// Handle offset for `value`, the inverse of [`value_at`].
    ///
    /// [`value_at`]: Self::value_at
    pub fn offset_for(&self, value: u16) -> f64 {
        if self.max == self.min {
            return 0.0;
        }
        let value = value.clamp(self.min, self.max);
        f64::from(value - self.min) / f64::from(self.max - self.min) * self.length
    }

    /// Discrete step (keyboard nudge) from `current`, clamped to range.
    pub fn step(&self, current: u16, delta: i32) -> u16 {
        (i32::from(current) + delta).clamp(i32::from(self.min), i32::from(self.max)) as u16
    }
}

impl DragControl for LinearSliderController {
    type Value = u16;

    fn press(&mut self, position: Point) -> Option<u16> {
        let value = self.value_at(position.x);
        if value.is_none() {
            log::debug!("Ignoring press on unmeasured slider");
            return None;
        }
        self.drag.begin(position);
        value
    }

    fn drag(&mut self, position: Point) -> Option<u16> {
        if !self.drag.active {
            return None;
        }
        self.value_at(position.x)
    }

    fn release(&mut self) -> bool {
        self.drag.end()
    }

    fn drag_state(&self) -> &DragState {
        &self.drag
    }
}
