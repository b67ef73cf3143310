//! Freehand drawing canvas.

use egui::{vec2, Color32, CornerRadius, CursorIcon, Pos2, Rect, Response, Sense, Shape, Stroke, StrokeKind, Ui, Vec2};
use huesketch_core::drawing::{DrawingSurface, Stroke as PenStroke};
use huesketch_core::PointerEvent;
use kurbo::Point;

use crate::theme;

/// Stroke color when a stored color string no longer parses.
const FALLBACK_INK: Color32 = Color32::from_gray(60);

fn to_screen(rect: Rect, point: Point) -> Pos2 {
    rect.min + vec2(point.x as f32, point.y as f32)
}

fn to_local(rect: Rect, pos: Pos2) -> Point {
    let offset = pos - rect.min;
    Point::new(f64::from(offset.x), f64::from(offset.y))
}

fn ink(stroke: &PenStroke) -> Color32 {
    match stroke.paint() {
        Ok(color) => {
            let [r, g, b, a] = color.to_rgba8().to_u8_array();
            Color32::from_rgba_unmultiplied(r, g, b, a)
        }
        Err(e) => {
            log::warn!("Stroke {} has unreadable color: {}", stroke.id(), e);
            FALLBACK_INK
        }
    }
}

/// Shapes for one stroke: connected segments plus round end caps.
fn stroke_shapes(rect: Rect, stroke: &PenStroke) -> Vec<Shape> {
    let color = ink(stroke);
    let width = stroke.width as f32;
    let points: Vec<Pos2> = stroke.points.iter().map(|p| to_screen(rect, *p)).collect();

    let mut shapes = Vec::new();
    if points.len() > 1 {
        shapes.push(Shape::line(points.clone(), Stroke::new(width, color)));
    }
    // Joints and caps are filled circles so the line reads round.
    for point in &points {
        shapes.push(Shape::circle_filled(*point, width / 2.0, color));
    }
    shapes
}

/// Paints a [`DrawingSurface`] and feeds it pointer input.
pub struct DrawingCanvas<'a> {
    surface: &'a mut DrawingSurface,
    color: &'a str,
    size: Option<Vec2>,
}

impl<'a> DrawingCanvas<'a> {
    /// New strokes take `color`, the picker's published color string.
    pub fn new(surface: &'a mut DrawingSurface, color: &'a str) -> Self {
        Self {
            surface,
            color,
            size: None,
        }
    }

    /// Fixed size. Defaults to all available space.
    pub fn size(mut self, size: Vec2) -> Self {
        self.size = Some(size);
        self
    }

    pub fn show(self, ui: &mut Ui) -> Response {
        let size = self.size.unwrap_or_else(|| ui.available_size());
        let (rect, response) = ui.allocate_exact_size(size, Sense::drag());

        let pointer = response.interact_pointer_pos();
        if response.drag_started() {
            if let Some(pos) = pointer {
                self.surface.handle(
                    PointerEvent::Down {
                        position: to_local(rect, pos),
                    },
                    self.color,
                );
            }
        } else if response.dragged() && self.surface.is_drawing() {
            match pointer {
                Some(pos) if rect.contains(pos) => {
                    self.surface.handle(
                        PointerEvent::Move {
                            position: to_local(rect, pos),
                        },
                        self.color,
                    );
                }
                _ => self.surface.pointer_leave(),
            }
        }
        if response.drag_stopped() {
            let position = pointer.map(|pos| to_local(rect, pos)).unwrap_or_default();
            self.surface.handle(PointerEvent::Up { position }, self.color);
        }

        if ui.is_rect_visible(rect) {
            let painter = ui.painter_at(rect);
            painter.rect_filled(rect, CornerRadius::ZERO, theme::CANVAS_BG);
            for stroke in self.surface.paint_order() {
                painter.extend(stroke_shapes(rect, stroke));
            }
            painter.rect_stroke(rect, CornerRadius::ZERO, Stroke::new(1.0, theme::BORDER), StrokeKind::Inside);

            if !self.surface.has_started() {
                painter.text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    "Draw here",
                    egui::FontId::proportional(14.0),
                    theme::TEXT_MUTED,
                );
            }
        }

        response.on_hover_cursor(CursorIcon::Crosshair)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stroke_shapes() {
        let rect = Rect::from_min_size(Pos2::new(10.0, 20.0), vec2(100.0, 100.0));
        let mut stroke = PenStroke::new(Point::new(0.0, 0.0), "#ff0000", 4.0);
        assert_eq!(stroke_shapes(rect, &stroke).len(), 1);

        stroke.add_point(Point::new(5.0, 5.0));
        let shapes = stroke_shapes(rect, &stroke);
        assert_eq!(shapes.len(), 3);
        let Shape::Circle(cap) = &shapes[1] else {
            panic!("expected a cap circle");
        };
        assert_eq!(cap.center, Pos2::new(10.0, 20.0));
        assert_eq!(cap.radius, 2.0);
        assert_eq!(cap.fill, Color32::from_rgb(255, 0, 0));
    }

    #[test]
    fn test_unreadable_color_falls_back() {
        let stroke = PenStroke::new(Point::ZERO, "not a color", 2.0);
        assert_eq!(ink(&stroke), FALLBACK_INK);
    }

    #[test]
    fn test_translucent_ink() {
        let stroke = PenStroke::new(Point::ZERO, "rgba(0, 0, 255, 0.5)", 2.0);
        assert_eq!(ink(&stroke), Color32::from_rgba_unmultiplied(0, 0, 255, 128));
    }

    #[test]
    fn test_canvas_headless_frame() {
        let mut surface = DrawingSurface::default();
        let ctx = egui::Context::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                DrawingCanvas::new(&mut surface, "#000000")
                    .size(vec2(200.0, 120.0))
                    .show(ui);
            });
        });
        assert!(!surface.has_started());
        assert!(surface.strokes().is_empty());
    }
}
