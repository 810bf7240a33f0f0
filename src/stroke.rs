use egui::{Color32, Pos2};
use serde::{Deserialize, Serialize};

/// Rendering metadata shared by every point of a stroke
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    pub color: Color32,
    pub width: f32,
    /// `false` for strokes drawn in erase mode
    pub draw_mode: bool,
}

impl StrokeStyle {
    pub fn new(color: Color32, width: f32) -> Self {
        Self {
            color,
            width,
            draw_mode: true,
        }
    }

    pub fn erasing(self) -> Self {
        Self {
            draw_mode: false,
            ..self
        }
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::new(Color32::WHITE, 1.0)
    }
}

// Immutable stroke, as stored in the document
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    points: Vec<Pos2>,
    style: StrokeStyle,
}

impl Stroke {
    pub fn new(style: StrokeStyle, points: Vec<Pos2>) -> Self {
        Self { points, style }
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn style(&self) -> StrokeStyle {
        self.style
    }

    pub fn color(&self) -> Color32 {
        self.style.color
    }

    pub fn width(&self) -> f32 {
        self.style.width
    }

    pub fn is_erase(&self) -> bool {
        !self.style.draw_mode
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub(crate) fn push(&mut self, point: Pos2) {
        self.points.push(point);
    }
}

// Stroke under construction while the pointer is held down
pub struct MutableStroke {
    points: Vec<Pos2>,
    style: StrokeStyle,
}

impl MutableStroke {
    pub fn new(style: StrokeStyle) -> Self {
        Self {
            points: Vec::new(),
            style,
        }
    }

    // Consecutive duplicates add nothing to the path
    pub fn add_point(&mut self, point: Pos2) {
        if self.points.last() != Some(&point) {
            self.points.push(point);
        }
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn to_stroke(&self) -> Stroke {
        Stroke::new(self.style, self.points.clone())
    }

    pub fn into_stroke(self) -> Stroke {
        Stroke::new(self.style, self.points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mutable_stroke_skips_repeated_points() {
        let mut stroke = MutableStroke::new(StrokeStyle::default());
        stroke.add_point(Pos2::new(1.0, 1.0));
        stroke.add_point(Pos2::new(1.0, 1.0));
        stroke.add_point(Pos2::new(2.0, 1.0));

        assert_eq!(stroke.points().len(), 2);
        assert_eq!(stroke.into_stroke().points()[1], Pos2::new(2.0, 1.0));
    }

    #[test]
    fn test_erasing_style_keeps_color_and_width() {
        let style = StrokeStyle::new(Color32::BLACK, 4.0).erasing();
        assert!(!style.draw_mode);
        assert_eq!(style.color, Color32::BLACK);
        assert_eq!(style.width, 4.0);
    }
}
