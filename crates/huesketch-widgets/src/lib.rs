//! egui widgets for the HueSketch color picker and drawing canvas.
//!
//! This crate draws and drives the state that lives in `huesketch-core`:
//!
//! - **Picker**: saturation/level plane, hue and alpha sliders, preview
//! - **Colors**: swatches, checkerboard, recent color rows
//! - **Canvas**: freehand drawing surface

pub mod canvas;
pub mod colors;
pub mod picker;

pub use canvas::DrawingCanvas;
pub use colors::{
    checkerboard, parse_color32, recent_rows, to_color32, ColorSwatch, ColorSwatchStyle,
    RecentSwatches, RECENT_ROW_PATTERN,
};
pub use picker::{panel_frame, pointer_phase, ColorPickerPanel, PickerResponse, PointerPhase};

/// Standard sizing constants used across widgets.
pub mod sizing {
    /// Small swatch size
    pub const SMALL: f32 = 20.0;
    /// Recent color swatch size
    pub const SWATCH: f32 = 24.0;
    /// Picker plane width, also the slider track length
    pub const PICKER_WIDTH: f32 = 240.0;
    /// Picker plane height
    pub const PLANE_HEIGHT: f32 = 160.0;
    /// Slider track height
    pub const TRACK_HEIGHT: f32 = 14.0;
    /// Standard corner radius
    pub const CORNER_RADIUS: u8 = 4;
    /// Panel corner radius
    pub const PANEL_RADIUS: u8 = 8;
}

/// Standard colors used across widgets.
pub mod theme {
    use egui::Color32;

    /// Text color (dark gray)
    pub const TEXT: Color32 = Color32::from_rgb(60, 60, 60);
    /// Muted text color
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(120, 120, 120);
    /// Border color
    pub const BORDER: Color32 = Color32::from_rgb(220, 220, 220);
    /// Selection/active color (blue)
    pub const ACCENT: Color32 = Color32::from_rgb(59, 130, 246);
    /// Light checkerboard cell
    pub const CHECKER_LIGHT: Color32 = Color32::from_gray(255);
    /// Dark checkerboard cell
    pub const CHECKER_DARK: Color32 = Color32::from_gray(204);
    /// Canvas background
    pub const CANVAS_BG: Color32 = Color32::WHITE;
    /// Panel background
    pub const PANEL_BG: Color32 = Color32::from_rgba_premultiplied(250, 250, 252, 250);
}
