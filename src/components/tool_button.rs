use eframe::egui;

/// Square icon button with a selected state, used in the toolbar
pub struct ToolButton {
    pub icon: &'static str,
    pub tooltip: &'static str,
    pub selected: bool,
    pub enabled: bool,
}

impl ToolButton {
    pub fn new(icon: &'static str, tooltip: &'static str) -> Self {
        Self {
            icon,
            tooltip,
            selected: false,
            enabled: true,
        }
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn show(&self, ui: &mut egui::Ui) -> egui::Response {
        let button_size = egui::vec2(32.0, 32.0);
        let sense = if self.enabled {
            egui::Sense::click()
        } else {
            egui::Sense::hover()
        };
        let (rect, response) = ui.allocate_exact_size(button_size, sense);

        if ui.is_rect_visible(rect) {
            let bg_color = if self.selected {
                egui::Color32::WHITE
            } else if response.hovered() && self.enabled {
                egui::Color32::from_gray(40)
            } else {
                egui::Color32::TRANSPARENT
            };
            ui.painter().rect_filled(rect, 16.0, bg_color);

            let text_color = if self.selected {
                egui::Color32::BLACK
            } else if self.enabled {
                egui::Color32::WHITE
            } else {
                egui::Color32::from_gray(90)
            };
            ui.painter().text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                self.icon,
                egui::FontId::proportional(20.0),
                text_color,
            );
        }

        response.on_hover_text(self.tooltip)
    }
}
