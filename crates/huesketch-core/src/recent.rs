//! Bounded most-recent-first history of committed colors.

use crate::color::{parse_hex, Color, ColorError, ColorModel};

/// Default history size: three swatch rows of 6, 5 and 6.
pub const DEFAULT_RECENT_CAPACITY: usize = 17;

/// Ordered, de-duplicated list of opaque hex colors, newest first.
///
/// Only [`commit`](Self::commit) mutates it; the oldest entry is evicted
/// once `capacity` is exceeded. Never persisted.
#[derive(Debug, Clone)]
pub struct RecentColorsStore {
    colors: Vec<String>,
    capacity: usize,
}

impl Default for RecentColorsStore {
    fn default() -> Self {
        Self::new(DEFAULT_RECENT_CAPACITY)
    }
}

impl RecentColorsStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            colors: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Snapshot for rendering, newest first.
    pub fn list(&self) -> &[String] {
        &self.colors
    }

    pub fn contains(&self, hex: &str) -> bool {
        let hex = hex.to_ascii_lowercase();
        self.colors.iter().any(|c| *c == hex)
    }

    /// Move `hex` to the front, dropping any older copy and evicting past
    /// capacity. Returns whether the visible list changed.
    pub fn commit(&mut self, hex: &str) -> bool {
        let hex = hex.to_ascii_lowercase();
        if self.colors.first() == Some(&hex) {
            return false;
        }

        self.colors.retain(|c| *c != hex);
        self.colors.insert(0, hex);
        self.colors.truncate(self.capacity);
        true
    }

    /// Decode a recent entry back into a full color. Alpha always comes
    /// back as 100: history holds opaque RGB only.
    pub fn select(&self, hex: &str, model: ColorModel) -> Result<Color, ColorError> {
        let rgb = parse_hex(hex)?;
        Ok(Color::from_rgb(model, rgb))
    }
}
