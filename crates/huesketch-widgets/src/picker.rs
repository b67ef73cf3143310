//! Color picker panel.
//!
//! The widgets here own no color state. Each frame they measure themselves,
//! translate egui pointer responses into press / move / release calls on
//! [`PickerControls`] and paint from the [`ColorPickerSession`].

use egui::{
    vec2, Color32, CornerRadius, CursorIcon, EventFilter, Frame, Key, Margin, Mesh, Pos2, Rect,
    Response, Sense, Shape, Stroke, StrokeKind, Ui, Vec2,
};
use huesketch_core::color::hsb_to_rgb;
use huesketch_core::controls::SurfaceSample;
use huesketch_core::{ColorModel, ColorPickerSession, ControlId, PickerControls};
use kurbo::{Point, Size};

use crate::colors::{checkerboard, parse_color32, to_color32, ColorSwatch, ColorSwatchStyle, RecentSwatches};
use crate::{sizing, theme};

/// Grid resolution used to sample the plane gradient.
const PLANE_STEPS: usize = 16;
/// Segments in the hue and alpha track gradients.
const TRACK_STEPS: usize = 36;
const HANDLE_RADIUS: f32 = 8.0;
/// Keyboard step with and without shift held.
const FINE_STEP: i32 = 1;
const COARSE_STEP: i32 = 10;

/// What a control's pointer interaction amounts to this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Press,
    Move,
    Release,
}

/// Derive the phase from whether the control already owns the drag and
/// whether egui still reports the button held on it.
pub fn pointer_phase(dragging: bool, down_on: bool) -> Option<PointerPhase> {
    match (dragging, down_on) {
        (false, true) => Some(PointerPhase::Press),
        (true, true) => Some(PointerPhase::Move),
        (true, false) => Some(PointerPhase::Release),
        (false, false) => None,
    }
}

/// Outcome of one frame of the picker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PickerResponse {
    /// The output color changed.
    pub changed: bool,
    /// A drag or key release committed the color to the recent list.
    pub committed: bool,
}

/// Create the standard picker panel frame with shadow.
pub fn panel_frame() -> Frame {
    Frame::new()
        .fill(theme::PANEL_BG)
        .corner_radius(CornerRadius::same(sizing::PANEL_RADIUS))
        .stroke(Stroke::new(1.0, theme::BORDER))
        .shadow(egui::epaint::Shadow {
            spread: 0,
            blur: 8,
            offset: [0, 2],
            color: Color32::from_black_alpha(15),
        })
        .inner_margin(Margin::same(10))
}

fn section_label(ui: &mut Ui, text: &str) {
    ui.label(egui::RichText::new(text).size(10.0).color(theme::TEXT_MUTED));
}

fn to_local(rect: Rect, pos: Pos2) -> Point {
    let offset = pos - rect.min;
    Point::new(f64::from(offset.x), f64::from(offset.y))
}

/// Horizontal strip whose color at `t` (0 left, 1 right) is `color_at(t)`.
fn gradient_strip(rect: Rect, steps: usize, color_at: impl Fn(f32) -> Color32) -> Mesh {
    let mut mesh = Mesh::default();
    for i in 0..=steps {
        let t = i as f32 / steps as f32;
        let x = rect.left() + t * rect.width();
        let color = color_at(t);
        mesh.colored_vertex(Pos2::new(x, rect.top()), color);
        mesh.colored_vertex(Pos2::new(x, rect.bottom()), color);
    }
    for i in 0..steps as u32 {
        let top = 2 * i;
        mesh.add_triangle(top, top + 1, top + 2);
        mesh.add_triangle(top + 1, top + 3, top + 2);
    }
    mesh
}

/// Saturation x level plane for `hue`, sampled through the session's model.
fn plane_mesh(rect: Rect, model: ColorModel, hue: u16) -> Mesh {
    let mut mesh = Mesh::default();
    for row in 0..=PLANE_STEPS {
        for col in 0..=PLANE_STEPS {
            let tx = col as f32 / PLANE_STEPS as f32;
            let ty = row as f32 / PLANE_STEPS as f32;
            let saturation = (tx * 100.0).round() as u8;
            let level = ((1.0 - ty) * 100.0).round() as u8;
            let pos = rect.min + vec2(tx * rect.width(), ty * rect.height());
            mesh.colored_vertex(pos, to_color32(model.to_rgb(hue, saturation, level)));
        }
    }

    let stride = (PLANE_STEPS + 1) as u32;
    for row in 0..PLANE_STEPS as u32 {
        for col in 0..PLANE_STEPS as u32 {
            let i = row * stride + col;
            mesh.add_triangle(i, i + 1, i + stride);
            mesh.add_triangle(i + 1, i + stride + 1, i + stride);
        }
    }
    mesh
}

fn handle(ui: &Ui, center: Pos2, fill: Color32) {
    let painter = ui.painter();
    painter.circle_filled(center, HANDLE_RADIUS, fill);
    painter.circle_stroke(center, HANDLE_RADIUS, Stroke::new(2.0, Color32::WHITE));
    painter.circle_stroke(center, HANDLE_RADIUS + 1.0, Stroke::new(1.0, Color32::from_black_alpha(80)));
}

/// Saturation/level plane, hue and alpha sliders, preview and recent colors.
pub struct ColorPickerPanel<'a> {
    session: &'a mut ColorPickerSession,
    controls: &'a mut PickerControls,
    width: f32,
    result: PickerResponse,
}

impl<'a> ColorPickerPanel<'a> {
    pub fn new(session: &'a mut ColorPickerSession, controls: &'a mut PickerControls) -> Self {
        Self {
            session,
            controls,
            width: sizing::PICKER_WIDTH,
            result: PickerResponse::default(),
        }
    }

    /// Plane width and slider track length.
    pub fn width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    pub fn show(mut self, ui: &mut Ui) -> PickerResponse {
        let width = f64::from(self.width);
        self.controls
            .surface
            .set_size(Size::new(width, f64::from(sizing::PLANE_HEIGHT)));
        self.controls.hue.set_length(width);
        self.controls.alpha.set_length(width);

        ui.vertical(|ui| {
            ui.spacing_mut().item_spacing = vec2(0.0, 8.0);
            self.plane(ui);
            section_label(ui, "Hue");
            self.hue_slider(ui);
            section_label(ui, "Opacity");
            self.alpha_slider(ui);
            self.preview(ui);
            section_label(ui, "Recent");
            self.recent(ui);
        });
        self.result
    }

    /// Feed this frame's pointer state for `id` into the controls.
    fn drive(&mut self, id: ControlId, rect: Rect, response: &Response) {
        let dragging = self.controls.owner() == Some(id);
        let Some(phase) = pointer_phase(dragging, response.is_pointer_button_down_on()) else {
            return;
        };

        let (latest, moved) = response
            .ctx
            .input(|i| (i.pointer.latest_pos(), i.pointer.delta() != Vec2::ZERO));
        let local = response.interact_pointer_pos().or(latest).map(|pos| to_local(rect, pos));

        match phase {
            PointerPhase::Press => {
                if let Some(position) = local {
                    self.result.changed |= self.controls.press(id, position, self.session);
                    response.request_focus();
                }
            }
            PointerPhase::Move => {
                if let Some(position) = local.filter(|_| moved) {
                    self.result.changed |= self.controls.pointer_move(position, self.session);
                }
            }
            PointerPhase::Release => {
                self.result.committed |= self.controls.release(self.session);
            }
        }
    }

    /// Arrow keys nudge a focused slider; releasing the key commits.
    fn keyboard(&mut self, id: ControlId, response: &Response) {
        if !response.has_focus() {
            return;
        }
        response.ctx.memory_mut(|m| {
            m.set_focus_lock_filter(
                response.id,
                EventFilter {
                    horizontal_arrows: true,
                    vertical_arrows: true,
                    ..Default::default()
                },
            );
        });

        let (delta, released) = response.ctx.input(|i| {
            let step = if i.modifiers.shift { COARSE_STEP } else { FINE_STEP };
            let mut delta = 0;
            if i.key_pressed(Key::ArrowRight) || i.key_pressed(Key::ArrowUp) {
                delta += step;
            }
            if i.key_pressed(Key::ArrowLeft) || i.key_pressed(Key::ArrowDown) {
                delta -= step;
            }
            let released = [Key::ArrowLeft, Key::ArrowRight, Key::ArrowUp, Key::ArrowDown]
                .into_iter()
                .any(|key| i.key_released(key));
            (delta, released)
        });

        if delta != 0 {
            self.result.changed |= self.controls.step(id, delta, self.session);
        }
        if released {
            self.result.committed |= self.controls.step_released(self.session);
        }
    }

    fn plane(&mut self, ui: &mut Ui) {
        let size = vec2(self.width, sizing::PLANE_HEIGHT);
        let (rect, response) = ui.allocate_exact_size(size, Sense::click_and_drag());
        self.drive(ControlId::Surface, rect, &response);

        if ui.is_rect_visible(rect) {
            let color = self.session.color();
            let model = self.session.model();
            ui.painter()
                .add(Shape::mesh(plane_mesh(rect, model, color.hue())));
            ui.painter().rect_stroke(
                rect,
                CornerRadius::ZERO,
                Stroke::new(1.0, theme::BORDER),
                StrokeKind::Outside,
            );

            let cursor = self.controls.surface.position_for(SurfaceSample {
                saturation: color.saturation(),
                level: color.level(),
            });
            let center = rect.min + vec2(cursor.x as f32, cursor.y as f32);
            handle(ui, center, to_color32(self.session.rgb()));
        }

        response
            .on_hover_text(format!("Saturation / {}", self.session.model().level_name()))
            .on_hover_cursor(CursorIcon::Crosshair);
    }

    /// A slider track of the panel width with room for its handle.
    fn track(&self, ui: &mut Ui) -> (Rect, Rect, Response) {
        let size = vec2(self.width, HANDLE_RADIUS * 2.0 + 2.0);
        let (rect, response) = ui.allocate_exact_size(size, Sense::click_and_drag());
        let track = Rect::from_center_size(rect.center(), vec2(self.width, sizing::TRACK_HEIGHT));
        (rect, track, response)
    }

    fn hue_slider(&mut self, ui: &mut Ui) {
        let (rect, track, response) = self.track(ui);
        self.drive(ControlId::Hue, rect, &response);
        self.keyboard(ControlId::Hue, &response);

        if ui.is_rect_visible(rect) {
            let mesh = gradient_strip(track, TRACK_STEPS, |t| {
                to_color32(hsb_to_rgb((t * 360.0).round() as u16, 100, 100))
            });
            ui.painter().add(Shape::mesh(mesh));

            let hue = self.session.color().hue();
            let x = track.left() + self.controls.hue.offset_for(hue) as f32;
            handle(ui, Pos2::new(x, track.center().y), to_color32(hsb_to_rgb(hue, 100, 100)));
        }
        response.on_hover_cursor(CursorIcon::PointingHand);
    }

    fn alpha_slider(&mut self, ui: &mut Ui) {
        let (rect, track, response) = self.track(ui);
        self.drive(ControlId::Alpha, rect, &response);
        self.keyboard(ControlId::Alpha, &response);

        if ui.is_rect_visible(rect) {
            let rgb = self.session.rgb();
            checkerboard(&ui.painter().with_clip_rect(track), track);
            let mesh = gradient_strip(track, TRACK_STEPS, |t| {
                Color32::from_rgba_unmultiplied(rgb.r, rgb.g, rgb.b, (t * 255.0).round() as u8)
            });
            ui.painter().add(Shape::mesh(mesh));

            let alpha = self.session.color().alpha();
            let x = track.left() + self.controls.alpha.offset_for(alpha.into()) as f32;
            let fill = parse_color32(&self.session.color_string()).unwrap_or(to_color32(rgb));
            handle(ui, Pos2::new(x, track.center().y), fill);
        }
        response.on_hover_cursor(CursorIcon::PointingHand);
    }

    fn preview(&mut self, ui: &mut Ui) {
        let output = self.session.color_string();
        ui.horizontal(|ui| {
            let fill = parse_color32(&output).unwrap_or(Color32::TRANSPARENT);
            ColorSwatch::new(fill, "")
                .style(ColorSwatchStyle::preview(48.0))
                .show(ui);
            ui.label(egui::RichText::new(&output).monospace().color(theme::TEXT));
        });
    }

    fn recent(&mut self, ui: &mut Ui) {
        let current = self.session.hex();
        let picked = RecentSwatches::new(self.session.recent())
            .current(&current)
            .show(ui);
        if let Some(hex) = picked {
            self.result.changed |= self.session.select_recent(&hex).is_ok();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_phase() {
        assert_eq!(pointer_phase(false, true), Some(PointerPhase::Press));
        assert_eq!(pointer_phase(true, true), Some(PointerPhase::Move));
        assert_eq!(pointer_phase(true, false), Some(PointerPhase::Release));
        assert_eq!(pointer_phase(false, false), None);
    }

    #[test]
    fn test_plane_mesh_corners() {
        let rect = Rect::from_min_size(Pos2::ZERO, vec2(160.0, 160.0));
        let mesh = plane_mesh(rect, ColorModel::Hsb, 0);
        let stride = PLANE_STEPS + 1;
        assert_eq!(mesh.vertices.len(), stride * stride);
        // top-left white, top-right pure red, bottom row black
        assert_eq!(mesh.vertices[0].color, Color32::WHITE);
        assert_eq!(mesh.vertices[PLANE_STEPS].color, Color32::from_rgb(255, 0, 0));
        assert_eq!(mesh.vertices[stride * PLANE_STEPS].color, Color32::BLACK);
    }

    #[test]
    fn test_hsl_plane_midline() {
        let rect = Rect::from_min_size(Pos2::ZERO, vec2(160.0, 160.0));
        let mesh = plane_mesh(rect, ColorModel::Hsl, 120);
        let stride = PLANE_STEPS + 1;
        let mid_right = stride * (PLANE_STEPS / 2) + PLANE_STEPS;
        assert_eq!(mesh.vertices[mid_right].color, Color32::from_rgb(0, 255, 0));
        assert_eq!(mesh.vertices[0].color, Color32::WHITE);
    }

    #[test]
    fn test_gradient_strip_ends() {
        let rect = Rect::from_min_size(Pos2::ZERO, vec2(100.0, 10.0));
        let mesh = gradient_strip(rect, 4, |t| Color32::from_gray((t * 255.0) as u8));
        assert_eq!(mesh.vertices.len(), 10);
        assert_eq!(mesh.indices.len(), 4 * 6);
        assert_eq!(mesh.vertices[0].color, Color32::from_gray(0));
        assert_eq!(mesh.vertices[9].color, Color32::from_gray(255));
        assert_eq!(mesh.vertices[9].pos, Pos2::new(100.0, 10.0));
    }

    #[test]
    fn test_panel_headless_frame() {
        let mut session = ColorPickerSession::new(ColorModel::Hsb, 17);
        session.commit_current_color();
        let mut controls = PickerControls::default();
        let ctx = egui::Context::default();

        let mut result = PickerResponse::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                result = ColorPickerPanel::new(&mut session, &mut controls).show(ui);
            });
        });

        // No input: nothing changes, but the controls are now measured.
        assert_eq!(result, PickerResponse::default());
        assert!(controls.surface.is_measured());
        assert!((controls.hue.length() - f64::from(sizing::PICKER_WIDTH)).abs() < f64::EPSILON);
        assert_eq!(session.recent().len(), 1);
    }
}
