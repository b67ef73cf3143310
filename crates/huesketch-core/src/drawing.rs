//! Freehand drawing surface fed by the picker's output color.

use crate::color::{parse_color_string, ColorError};
use crate::config::{PickerConfig, DEFAULT_STROKE_WIDTH};
use crate::input::PointerEvent;
use kurbo::{BezPath, Cap, Join, Point, Rect};
use peniko::Color;
use std::fmt;
use uuid::Uuid;

/// Unique identifier for strokes.
pub type StrokeId = Uuid;

/// One freehand stroke: connected segments in a single color and width.
#[derive(Debug, Clone)]
pub struct Stroke {
    id: StrokeId,
    /// Points in the order they were sampled.
    pub points: Vec<Point>,
    /// Color string read when the stroke started.
    pub color: String,
    pub width: f64,
}

impl Stroke {
    pub fn new(start: Point, color: impl Into<String>, width: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            points: vec![start],
            color: color.into(),
            width,
        }
    }

    pub fn id(&self) -> StrokeId {
        self.id
    }

    pub fn add_point(&mut self, point: Point) {
        self.points.push(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Path through every sampled point. A single sample becomes a
    /// zero-length segment so round caps still paint a dot.
    pub fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        let Some(&first) = self.points.first() else {
            return path;
        };

        path.move_to(first);
        if self.points.len() == 1 {
            path.line_to(first);
        }
        for point in self.points.iter().skip(1) {
            path.line_to(*point);
        }
        path
    }

    /// Round joins and caps at the stroke width.
    pub fn style(&self) -> kurbo::Stroke {
        kurbo::Stroke::new(self.width)
            .with_join(Join::Round)
            .with_caps(Cap::Round)
    }

    /// Paint color decoded from the stroke's color string.
    pub fn paint(&self) -> Result<Color, ColorError> {
        let [r, g, b, a] = parse_color_string(&self.color)?.to_rgba8();
        Ok(Color::from_rgba8(r, g, b, a))
    }

    /// Bounds of the sampled points, not including the stroke width.
    pub fn bounds(&self) -> Rect {
        let Some(&first) = self.points.first() else {
            return Rect::ZERO;
        };
        self.points
            .iter()
            .skip(1)
            .fold(Rect::from_points(first, first), |bounds, p| {
                bounds.union_pt(*p)
            })
    }
}

/// Accumulates strokes from pointer samples.
///
/// The color is read once at stroke start; changing the picker mid-stroke
/// only affects later strokes.
pub struct DrawingSurface {
    strokes: Vec<Stroke>,
    active: Option<Stroke>,
    stroke_width: f64,
    started: bool,
    on_first_stroke: Option<Box<dyn FnMut()>>,
}

impl fmt::Debug for DrawingSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DrawingSurface")
            .field("strokes", &self.strokes.len())
            .field("active", &self.active)
            .field("stroke_width", &self.stroke_width)
            .field("started", &self.started)
            .finish_non_exhaustive()
    }
}

impl Default for DrawingSurface {
    fn default() -> Self {
        Self::new(DEFAULT_STROKE_WIDTH)
    }
}

impl DrawingSurface {
    pub fn new(stroke_width: f64) -> Self {
        Self {
            strokes: Vec::new(),
            active: None,
            stroke_width,
            started: false,
            on_first_stroke: None,
        }
    }

    pub fn from_config(config: &PickerConfig) -> Self {
        Self::new(config.stroke_width)
    }

    /// Called once, on the first stroke this surface ever starts.
    pub fn on_first_stroke(&mut self, listener: impl FnMut() + 'static) {
        self.on_first_stroke = Some(Box::new(listener));
    }

    pub fn stroke_width(&self) -> f64 {
        self.stroke_width
    }

    pub fn set_stroke_width(&mut self, width: f64) {
        self.stroke_width = width;
    }

    /// Whether any stroke has ever started.
    pub fn has_started(&self) -> bool {
        self.started
    }

    pub fn is_drawing(&self) -> bool {
        self.active.is_some()
    }

    /// Finished strokes, oldest first.
    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn active_stroke(&self) -> Option<&Stroke> {
        self.active.as_ref()
    }

    /// Start a stroke at `position` in `color`. Ends any stroke in progress.
    pub fn begin_stroke(&mut self, position: Point, color: &str) {
        self.end_stroke();
        self.active = Some(Stroke::new(position, color, self.stroke_width));

        if !self.started {
            self.started = true;
            log::info!("First stroke started");
            if let Some(listener) = self.on_first_stroke.as_mut() {
                listener();
            }
        }
    }

    /// Append a sample to the active stroke. No-op when not drawing.
    pub fn extend_stroke(&mut self, position: Point) -> bool {
        match self.active.as_mut() {
            Some(stroke) => {
                stroke.add_point(position);
                true
            }
            None => false,
        }
    }

    /// Finish the active stroke, returning it once stored.
    pub fn end_stroke(&mut self) -> Option<&Stroke> {
        let stroke = self.active.take()?;
        self.strokes.push(stroke);
        self.strokes.last()
    }

    /// Pointer left the surface: the stroke ends there.
    pub fn pointer_leave(&mut self) {
        self.end_stroke();
    }

    /// Drive the surface from a unified pointer event.
    pub fn handle(&mut self, event: PointerEvent, color: &str) {
        match event {
            PointerEvent::Down { position } => self.begin_stroke(position, color),
            PointerEvent::Move { position } => {
                self.extend_stroke(position);
            }
            PointerEvent::Up { .. } => {
                self.end_stroke();
            }
        }
    }

    /// Finished strokes plus the one in progress, in paint order.
    pub fn paint_order(&self) -> impl Iterator<Item = &Stroke> {
        self.strokes.iter().chain(self.active.iter())
    }
}
