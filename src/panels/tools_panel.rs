use crate::SketchApp;
use crate::components::ToolButton;
use crate::theme::Theme;

/// Toolbar along the top: draw/erase, history, auto-correct and theme
pub fn tools_panel(app: &mut SketchApp, ctx: &egui::Context) {
    egui::TopBottomPanel::top("tools_panel").show(ctx, |ui| {
        let enabled = !app.is_busy();

        ui.horizontal(|ui| {
            let erase_mode = app.state().erase_mode;
            if ToolButton::new("✏", "Draw")
                .selected(!erase_mode)
                .enabled(enabled)
                .show(ui)
                .clicked()
            {
                app.set_erase_mode(false);
            }
            if ToolButton::new("⌫", "Erase")
                .selected(erase_mode)
                .enabled(enabled)
                .show(ui)
                .clicked()
            {
                app.set_erase_mode(true);
            }

            ui.separator();

            let can_undo = enabled && app.document().can_undo();
            let can_redo = enabled && app.document().can_redo();
            if ToolButton::new("↩", "Undo").enabled(can_undo).show(ui).clicked() {
                app.undo();
            }
            if ToolButton::new("↪", "Redo").enabled(can_redo).show(ui).clicked() {
                app.redo();
            }
            if ToolButton::new("🗑", "Clear").enabled(enabled).show(ui).clicked() {
                app.clear();
            }
            if ToolButton::new("↺", "Reset canvas and history")
                .enabled(enabled)
                .show(ui)
                .clicked()
            {
                app.reset();
            }

            ui.separator();

            if ToolButton::new("✨", "Auto-correct")
                .enabled(enabled)
                .show(ui)
                .clicked()
            {
                app.start_auto_correct(ui.ctx());
            }

            if let Some(status) = app.status() {
                ui.label(status);
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let theme = app.theme();
                if ToolButton::new("🌙", "Dark canvas")
                    .selected(theme == Theme::Dark)
                    .enabled(enabled)
                    .show(ui)
                    .clicked()
                {
                    app.set_theme(Theme::Dark);
                }
                if ToolButton::new("☀", "Light canvas")
                    .selected(theme == Theme::Light)
                    .enabled(enabled)
                    .show(ui)
                    .clicked()
                {
                    app.set_theme(Theme::Light);
                }
            });
        });
    });
}
