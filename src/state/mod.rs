mod in_flight;

pub use in_flight::{InFlightGuard, InFlightToken};

use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::stroke::StrokeStyle;
use crate::theme::Theme;

/// UI state the auto-correct cycle depends on
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppState {
    pub theme: Theme,
    pub erase_mode: bool,
    #[serde(skip)]
    pub in_flight: InFlightGuard,
}

impl AppState {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            ..Self::default()
        }
    }

    /// Style given to strokes loaded from a table
    pub fn decoded_style(&self, config: &AppConfig) -> StrokeStyle {
        StrokeStyle::new(self.theme.stroke_color(), config.stroke_width)
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_busy()
    }
}
