use crate::SketchApp;

pub fn central_panel(app: &mut SketchApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let available_size = ui.available_size();
        let (response, painter) =
            ui.allocate_painter(available_size, egui::Sense::click_and_drag());
        let canvas_rect = response.rect;

        app.handle_canvas_input(&response);

        let preview = app.tool().preview();
        app.renderer().render(
            &painter,
            canvas_rect,
            app.document().strokes(),
            preview.as_ref(),
        );

        if app.is_busy() {
            loading_overlay(app, ui, canvas_rect);
        }
    });
}

fn loading_overlay(app: &SketchApp, ui: &mut egui::Ui, rect: egui::Rect) {
    ui.painter()
        .rect_filled(rect, 0.0, egui::Color32::from_black_alpha(76));
    ui.put(
        egui::Rect::from_center_size(rect.center(), egui::vec2(64.0, 64.0)),
        egui::Spinner::new().size(48.0),
    );

    if let Some(elapsed) = app.state().in_flight.elapsed() {
        ui.painter().text(
            rect.center() + egui::vec2(0.0, 48.0),
            egui::Align2::CENTER_TOP,
            format!("{:.1}s", elapsed.as_secs_f32()),
            egui::FontId::proportional(14.0),
            egui::Color32::WHITE,
        );
    }
}
