//! Color picker session: the current color, its published string and the
//! recent colors history.

use crate::color::{derive_color_string, parse_hex, Color, ColorError, ColorModel, Rgb};
use crate::config::{ConfigError, PickerConfig, DEFAULT_INITIAL_RGB};
use crate::recent::RecentColorsStore;
use std::fmt;

/// Receives the published color string on every change.
pub type ColorListener = Box<dyn FnMut(&str)>;
/// Receives the recent colors list whenever it changes.
pub type RecentListener = Box<dyn FnMut(&[String])>;

/// Holds one [`Color`] and one [`RecentColorsStore`].
///
/// Every setter clamps, then synchronously republishes the color string
/// derived from the current fields. There is no cached output that could
/// drift from the color itself.
pub struct ColorPickerSession {
    model: ColorModel,
    color: Color,
    recent: RecentColorsStore,
    on_color: Option<ColorListener>,
    on_recent: Option<RecentListener>,
}

impl fmt::Debug for ColorPickerSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColorPickerSession")
            .field("model", &self.model)
            .field("color", &self.color)
            .field("recent", &self.recent)
            .finish_non_exhaustive()
    }
}

impl ColorPickerSession {
    /// New session starting on the default blue.
    pub fn new(model: ColorModel, recent_capacity: usize) -> Self {
        Self::with_color(
            model,
            recent_capacity,
            Color::from_rgb(model, DEFAULT_INITIAL_RGB),
        )
    }

    pub fn with_color(model: ColorModel, recent_capacity: usize, color: Color) -> Self {
        Self {
            model,
            color,
            recent: RecentColorsStore::new(recent_capacity),
            on_color: None,
            on_recent: None,
        }
    }

    pub fn from_config(config: &PickerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let rgb = parse_hex(&config.initial_color)?;
        Ok(Self::with_color(
            config.model,
            config.recent_capacity,
            Color::from_rgb(config.model, rgb),
        ))
    }

    /// Register the output color listener, replacing any previous one.
    pub fn subscribe(&mut self, listener: impl FnMut(&str) + 'static) {
        self.on_color = Some(Box::new(listener));
    }

    /// Register the recent colors listener, replacing any previous one.
    pub fn subscribe_recent(&mut self, listener: impl FnMut(&[String]) + 'static) {
        self.on_recent = Some(Box::new(listener));
    }

    pub fn model(&self) -> ColorModel {
        self.model
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn rgb(&self) -> Rgb {
        self.color.to_rgb(self.model)
    }

    /// Alpha-stripped hex of the current color.
    pub fn hex(&self) -> String {
        self.rgb().to_hex()
    }

    /// The published string: hex when opaque, rgba otherwise.
    pub fn color_string(&self) -> String {
        derive_color_string(self.model, &self.color)
    }

    pub fn recent(&self) -> &[String] {
        self.recent.list()
    }

    pub fn recent_store(&self) -> &RecentColorsStore {
        &self.recent
    }

    fn publish(&mut self) {
        let output = self.color_string();
        if let Some(listener) = self.on_color.as_mut() {
            listener(&output);
        }
    }

    pub fn set_hue(&mut self, hue: i32) {
        self.color.set_hue(hue);
        self.publish();
    }

    /// Set saturation and brightness (HSB) or lightness (HSL) together, as
    /// the picker surface produces them.
    pub fn set_saturation_level(&mut self, saturation: i32, level: i32) {
        self.color.set_saturation(saturation);
        self.color.set_level(level);
        self.publish();
    }

    pub fn set_alpha(&mut self, alpha: i32) {
        self.color.set_alpha(alpha);
        self.publish();
    }

    /// Push the current hex (alpha stripped) into the history.
    pub fn commit_current_color(&mut self) -> bool {
        let hex = self.hex();
        let changed = self.recent.commit(&hex);
        log::debug!("Committed {} to recent colors (changed: {})", hex, changed);
        if changed {
            if let Some(listener) = self.on_recent.as_mut() {
                listener(self.recent.list());
            }
        }
        changed
    }

    /// Restore a recent color. Alpha resets to fully opaque. A malformed
    /// entry leaves the session untouched.
    pub fn select_recent(&mut self, hex: &str) -> Result<(), ColorError> {
        match self.recent.select(hex, self.model) {
            Ok(color) => {
                self.color = color;
                self.publish();
                Ok(())
            }
            Err(e) => {
                log::warn!("Ignoring recent color selection: {}", e);
                Err(e)
            }
        }
    }
}

impl Default for ColorPickerSession {
    fn default() -> Self {
        let config = PickerConfig::default();
        Self::new(config.model, config.recent_capacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recording(session: &mut ColorPickerSession) -> Rc<RefCell<Vec<String>>> {
        let published = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&published);
        session.subscribe(move |s| sink.borrow_mut().push(s.to_string()));
        published
    }

    #[test]
    fn test_starts_on_default_blue() {
        let session = ColorPickerSession::default();
        // #3b82f6 decodes to whole-number HSB, which lands one step off in blue.
        assert_eq!(session.color(), Color::opaque(217, 76, 96));
        assert_eq!(session.hex(), "#3b82f5");
        assert_eq!(session.color_string(), session.hex());
        assert!(session.recent().is_empty());
    }

    #[test]
    fn test_setters_clamp_and_publish() {
        let mut session = ColorPickerSession::with_color(ColorModel::Hsb, 12, Color::default());
        let published = recording(&mut session);

        session.set_hue(500);
        session.set_saturation_level(150, -3);
        session.set_alpha(50);

        assert_eq!(session.color().hue(), 360);
        assert_eq!(session.color().saturation(), 100);
        assert_eq!(session.color().level(), 0);
        assert_eq!(
            *published.borrow(),
            vec!["#000000", "#000000", "rgba(0, 0, 0, 0.5)"]
        );
    }

    #[test]
    fn test_published_matches_state() {
        let mut session = ColorPickerSession::new(ColorModel::Hsl, 12);
        let published = recording(&mut session);
        session.set_hue(120);
        session.set_saturation_level(100, 50);
        assert_eq!(published.borrow().last().cloned(), Some(session.color_string()));
        assert_eq!(session.color_string(), "#00ff00");
    }

    #[test]
    fn test_commit_strips_alpha() {
        let mut session = ColorPickerSession::new(ColorModel::Hsb, 12);
        session.set_hue(0);
        session.set_saturation_level(100, 100);
        session.set_alpha(50);
        assert!(session.commit_current_color());
        assert_eq!(session.recent(), ["#ff0000"]);
    }

    #[test]
    fn test_select_recent_resets_alpha() {
        let mut session = ColorPickerSession::new(ColorModel::Hsb, 12);
        session.set_hue(0);
        session.set_saturation_level(100, 100);
        session.set_alpha(50);
        session.commit_current_color();

        session.set_hue(200);
        session.select_recent("#ff0000").unwrap();
        assert_eq!(session.color().alpha(), 100);
        assert_eq!(session.color().hue(), 0);
        assert_eq!(session.color_string(), "#ff0000");
    }

    #[test]
    fn test_malformed_recent_fails_closed() {
        let mut session = ColorPickerSession::new(ColorModel::Hsb, 12);
        session.set_alpha(40);
        let before = session.color();
        let published = recording(&mut session);

        assert!(session.select_recent("#12").is_err());
        assert_eq!(session.color(), before);
        assert!(published.borrow().is_empty());
    }

    #[test]
    fn test_recent_listener_fires_on_change_only() {
        let mut session = ColorPickerSession::new(ColorModel::Hsb, 12);
        let renders = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&renders);
        session.subscribe_recent(move |list| {
            assert!(!list.is_empty());
            *sink.borrow_mut() += 1;
        });

        session.commit_current_color();
        session.commit_current_color();
        assert_eq!(*renders.borrow(), 1);
    }

    #[test]
    fn test_from_config() {
        let config = PickerConfig {
            model: ColorModel::Hsl,
            recent_capacity: 4,
            initial_color: "#ff0000".to_string(),
            ..PickerConfig::default()
        };
        let session = ColorPickerSession::from_config(&config).unwrap();
        assert_eq!(session.model(), ColorModel::Hsl);
        assert_eq!(session.color().level(), 50);
        assert_eq!(session.recent_store().capacity(), 4);
    }

    #[test]
    fn test_hsl_round_trip_within_one() {
        let mut session = ColorPickerSession::new(ColorModel::Hsl, 12);
        session.set_hue(211);
        session.set_saturation_level(67, 41);
        let before = session.color();
        session.commit_current_color();
        let hex = session.recent()[0].clone();
        session.select_recent(&hex).unwrap();
        let after = session.color();
        assert!(before.hue().abs_diff(after.hue()) <= 1);
        assert!(before.saturation().abs_diff(after.saturation()) <= 1);
        assert!(before.level().abs_diff(after.level()) <= 1);
    }
}
