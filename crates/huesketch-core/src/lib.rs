//! HueSketch Core Library
//!
//! Platform-agnostic color model, picker state machines and freehand drawing
//! surface. No rendering or windowing here; hosts feed pointer events in and
//! read colors and strokes out.

pub mod color;
pub mod config;
pub mod controls;
pub mod drawing;
pub mod input;
pub mod recent;
pub mod session;

pub use color::{derive_color_string, parse_color_string, parse_hex, Color, ColorError, ColorModel, Rgb, Rgba};
pub use config::{ConfigError, PickerConfig};
pub use controls::{ControlId, DragControl, LinearSliderController, PickerControls, PickerSurfaceController, PointerCapture};
pub use drawing::{DrawingSurface, Stroke, StrokeId};
pub use input::{InputEvent, InputState, PointerEvent};
pub use recent::RecentColorsStore;
pub use session::ColorPickerSession;
