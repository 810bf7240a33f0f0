use egui::Color32;
use serde::{Deserialize, Serialize};

/// The two mutually exclusive colour schemes of the canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Theme {
    /// White ink on a black canvas
    #[default]
    Dark,
    /// Black ink on a white canvas
    Light,
}

impl Theme {
    pub fn stroke_color(self) -> Color32 {
        match self {
            Theme::Dark => Color32::WHITE,
            Theme::Light => Color32::BLACK,
        }
    }

    pub fn canvas_color(self) -> Color32 {
        match self {
            Theme::Dark => Color32::BLACK,
            Theme::Light => Color32::WHITE,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Theme::Dark => "Dark",
            Theme::Light => "Light",
        }
    }
}
