use egui::{Painter, Rect, Shape};

use crate::stroke::Stroke;
use crate::theme::Theme;

/// Paints the canvas background and strokes
#[derive(Debug, Default)]
pub struct Renderer {
    theme: Theme,
}

impl Renderer {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    /// Renders the strokes in z-order, then the unfinished stroke on top
    pub fn render(
        &self,
        painter: &Painter,
        rect: Rect,
        strokes: &[Stroke],
        preview: Option<&Stroke>,
    ) {
        painter.rect_filled(rect, 0.0, self.theme.canvas_color());

        let clipped = painter.with_clip_rect(rect);
        for stroke in strokes.iter().chain(preview) {
            if let Some(shape) = self.stroke_shape(stroke) {
                clipped.add(shape);
            }
        }
    }

    /// Erase strokes are painted in the canvas colour
    pub fn stroke_shape(&self, stroke: &Stroke) -> Option<Shape> {
        let color = if stroke.is_erase() {
            self.theme.canvas_color()
        } else {
            stroke.color()
        };

        match stroke.points() {
            [] => None,
            [point] => Some(Shape::circle_filled(*point, stroke.width() / 2.0, color)),
            points => Some(Shape::line(
                points.to_vec(),
                egui::Stroke::new(stroke.width(), color),
            )),
        }
    }
}
