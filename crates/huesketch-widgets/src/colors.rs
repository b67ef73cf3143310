//! Color swatches, checkerboard backing and recent color rows.

use egui::{vec2, Color32, CornerRadius, CursorIcon, Painter, Rect, Sense, Stroke, StrokeKind, Ui, Vec2};
use huesketch_core::{parse_color_string, Rgb};

use crate::{sizing, theme};

/// Recent colors are laid out in rows of this many swatches, repeating.
pub const RECENT_ROW_PATTERN: [usize; 3] = [6, 5, 6];

/// Checkerboard cell size behind translucent colors.
const CHECKER_CELL: f32 = 6.0;

/// Opaque egui color from an RGB triple.
pub fn to_color32(rgb: Rgb) -> Color32 {
    Color32::from_rgb(rgb.r, rgb.g, rgb.b)
}

/// Parse any published color string (`#rrggbb`, `#rgb`, `rgba(...)`).
pub fn parse_color32(color: &str) -> Option<Color32> {
    let [r, g, b, a] = parse_color_string(color).ok()?.to_rgba8();
    Some(Color32::from_rgba_unmultiplied(r, g, b, a))
}

/// Split `colors` into rows following [`RECENT_ROW_PATTERN`].
pub fn recent_rows<T>(colors: &[T]) -> Vec<&[T]> {
    let mut rows = Vec::new();
    let mut rest = colors;
    for &width in RECENT_ROW_PATTERN.iter().cycle() {
        if rest.is_empty() {
            break;
        }
        let (row, tail) = rest.split_at(width.min(rest.len()));
        rows.push(row);
        rest = tail;
    }
    rows
}

/// Paint a light/dark checkerboard clipped to `rect`.
pub fn checkerboard(painter: &Painter, rect: Rect) {
    painter.rect_filled(rect, CornerRadius::ZERO, theme::CHECKER_LIGHT);

    let cols = (rect.width() / CHECKER_CELL).ceil() as usize;
    let rows = (rect.height() / CHECKER_CELL).ceil() as usize;
    for row in 0..rows {
        for col in (row % 2..cols).step_by(2) {
            let min = rect.min + vec2(col as f32 * CHECKER_CELL, row as f32 * CHECKER_CELL);
            let cell = Rect::from_min_size(min, Vec2::splat(CHECKER_CELL)).intersect(rect);
            painter.rect_filled(cell, CornerRadius::ZERO, theme::CHECKER_DARK);
        }
    }
}

/// Style for color swatches.
#[derive(Clone)]
pub struct ColorSwatchStyle {
    /// Size of the swatch
    pub size: Vec2,
    /// Whether to show as circle (true) or rounded rect (false)
    pub circular: bool,
}

impl Default for ColorSwatchStyle {
    fn default() -> Self {
        Self {
            size: vec2(sizing::SWATCH, sizing::SWATCH),
            circular: false,
        }
    }
}

impl ColorSwatchStyle {
    /// Small circular swatch
    pub fn small() -> Self {
        Self {
            size: vec2(sizing::SMALL, sizing::SMALL),
            circular: true,
        }
    }

    /// Wide preview swatch
    pub fn preview(width: f32) -> Self {
        Self {
            size: vec2(width, 32.0),
            circular: false,
        }
    }
}

/// A clickable color swatch. Translucent colors sit on a checkerboard.
pub struct ColorSwatch<'a> {
    color: Color32,
    tooltip: &'a str,
    selected: bool,
    style: ColorSwatchStyle,
}

impl<'a> ColorSwatch<'a> {
    /// Create a new color swatch.
    pub fn new(color: Color32, tooltip: &'a str) -> Self {
        Self {
            color,
            tooltip,
            selected: false,
            style: ColorSwatchStyle::default(),
        }
    }

    /// Set whether this swatch is selected.
    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    /// Set the style.
    pub fn style(mut self, style: ColorSwatchStyle) -> Self {
        self.style = style;
        self
    }

    /// Show the swatch and return (clicked, rect).
    pub fn show(self, ui: &mut Ui) -> (bool, Rect) {
        let (rect, response) = ui.allocate_exact_size(self.style.size, Sense::click());

        if ui.is_rect_visible(rect) {
            let painter = ui.painter();
            if self.style.circular {
                let center = rect.center();
                let radius = rect.width().min(rect.height()) / 2.0;
                painter.circle_filled(center, radius, self.color);
                painter.circle_stroke(center, radius, Stroke::new(1.0, theme::BORDER));
                if self.selected {
                    painter.circle_stroke(center, radius - 3.0, Stroke::new(2.0, Color32::from_gray(30)));
                }
            } else {
                let radius = CornerRadius::same(sizing::CORNER_RADIUS);
                if self.color.a() < u8::MAX {
                    checkerboard(&painter.with_clip_rect(rect), rect);
                }
                painter.rect_filled(rect, radius, self.color);
                let border = if self.selected {
                    Stroke::new(2.0, theme::ACCENT)
                } else {
                    Stroke::new(1.0, theme::BORDER)
                };
                painter.rect_stroke(rect, radius, border, StrokeKind::Inside);
            }
        }

        let clicked = response.clicked();
        if !self.tooltip.is_empty() {
            response
                .on_hover_text(self.tooltip)
                .on_hover_cursor(CursorIcon::PointingHand);
        }
        (clicked, rect)
    }
}

/// Rows of recently committed colors.
pub struct RecentSwatches<'a> {
    colors: &'a [String],
    current: Option<&'a str>,
}

impl<'a> RecentSwatches<'a> {
    pub fn new(colors: &'a [String]) -> Self {
        Self {
            colors,
            current: None,
        }
    }

    /// Highlight the swatch matching `hex`.
    pub fn current(mut self, hex: &'a str) -> Self {
        self.current = Some(hex);
        self
    }

    /// Show the rows and return the hex of a clicked swatch.
    pub fn show(self, ui: &mut Ui) -> Option<String> {
        if self.colors.is_empty() {
            ui.label(
                egui::RichText::new("No recent colors")
                    .size(11.0)
                    .color(theme::TEXT_MUTED),
            );
            return None;
        }

        let mut picked = None;
        ui.vertical(|ui| {
            ui.spacing_mut().item_spacing = vec2(4.0, 4.0);
            for row in recent_rows(self.colors) {
                ui.horizontal(|ui| {
                    for hex in row {
                        let Some(color) = parse_color32(hex) else {
                            log::warn!("Skipping unreadable recent color {}", hex);
                            continue;
                        };
                        let selected = self.current == Some(hex.as_str());
                        let (clicked, _) = ColorSwatch::new(color, hex).selected(selected).show(ui);
                        if clicked {
                            picked = Some(hex.clone());
                        }
                    }
                });
            }
        });
        picked
    }
}
