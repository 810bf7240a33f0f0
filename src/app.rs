use std::sync::Arc;

use crate::config::AppConfig;
use crate::document::{Document, DrawingSurface};
use crate::error::RoundTripError;
use crate::file_handler::FileHandler;
use crate::panels;
use crate::renderer::Renderer;
use crate::round_trip::{self, RoundTripJob};
use crate::state::AppState;
use crate::theme::Theme;
use crate::tools::DrawStrokeTool;
use crate::transport::{HttpStrokeService, StrokeService};

const IMPORT_WAITING: &str = "Dropped files will load after auto-correct";

/// We derive Deserialize/Serialize so we can persist app state on shutdown.
#[derive(serde::Deserialize, serde::Serialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct SketchApp {
    document: Document,
    state: AppState,

    #[serde(skip)]
    config: AppConfig,
    #[serde(skip)]
    service: Option<Arc<dyn StrokeService>>,
    #[serde(skip)]
    renderer: Renderer,
    #[serde(skip)]
    tool: DrawStrokeTool,
    #[serde(skip)]
    file_handler: FileHandler,
    #[serde(skip)]
    job: Option<RoundTripJob>,
    #[serde(skip)]
    status: Option<String>,
}

impl Default for SketchApp {
    fn default() -> Self {
        Self {
            document: Document::default(),
            state: AppState::default(),
            config: AppConfig::default(),
            service: None,
            renderer: Renderer::default(),
            tool: DrawStrokeTool::new(),
            file_handler: FileHandler::new(),
            job: None,
            status: None,
        }
    }
}

impl SketchApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        let restored: Self = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();

        let service = HttpStrokeService::new(&config);
        log::info!("Auto-correct service at {}", service.url());
        restored.with_service(config, Arc::new(service))
    }

    /// Builds an app around an existing document, talking to `service`
    pub fn with_service(mut self, config: AppConfig, service: Arc<dyn StrokeService>) -> Self {
        self.config = config;
        self.service = Some(service);
        self.apply_theme();
        self
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn theme(&self) -> Theme {
        self.state.theme
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn is_busy(&self) -> bool {
        self.job.is_some()
    }

    pub(crate) fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub(crate) fn tool(&self) -> &DrawStrokeTool {
        &self.tool
    }

    fn apply_theme(&mut self) {
        let theme = self.state.theme;
        self.renderer.set_theme(theme);
        self.document
            .set_brush(theme.stroke_color(), self.config.stroke_width);
        self.document.set_erase_mode(self.state.erase_mode);
    }

    pub fn set_erase_mode(&mut self, erase: bool) {
        self.state.erase_mode = erase;
        self.document.set_erase_mode(erase);
    }

    /// Switching theme wipes the canvas, since the old ink may not be
    /// visible on the new background
    pub fn set_theme(&mut self, theme: Theme) {
        if theme == self.state.theme {
            return;
        }
        log::info!("Switching to {} theme", theme.label());
        self.state.theme = theme;
        self.reset();
        self.apply_theme();
    }

    pub fn undo(&mut self) {
        if !self.document.undo() {
            log::debug!("Nothing to undo");
        }
    }

    pub fn redo(&mut self) {
        if !self.document.redo() {
            log::debug!("Nothing to redo");
        }
    }

    pub fn clear(&mut self) {
        self.tool.cancel();
        self.document.clear();
    }

    pub fn reset(&mut self) {
        self.tool.cancel();
        self.document.reset();
    }

    /// Starts the auto-correct cycle in the background.
    pub fn start_auto_correct(&mut self, ctx: &egui::Context) {
        let Some(service) = self.service.clone() else {
            log::error!("No auto-correct service configured");
            return;
        };
        let ctx = ctx.clone();
        let spawned = RoundTripJob::spawn(
            &self.state.in_flight,
            self.document.strokes(),
            service,
            self.state.decoded_style(&self.config),
            self.config.decode_policy,
            move || ctx.request_repaint(),
        );

        match spawned {
            Ok(job) => {
                self.tool.cancel();
                self.status = Some("Auto-correcting...".to_owned());
                self.job = Some(job);
            }
            Err(RoundTripError::Nothing) => {
                log::info!("No paths found to export");
            }
            Err(err) => self.report(err),
        }
    }

    /// Applies the result of a finished cycle. Returns true once the job is done.
    pub fn poll_auto_correct(&mut self) -> bool {
        let Some(job) = self.job.as_mut() else {
            return false;
        };
        let Some(result) = job.poll() else {
            return false;
        };
        // Dropping the job releases the in-flight guard
        self.job = None;

        match result {
            Ok(decoded) => {
                let count = round_trip::apply(decoded, &mut self.document);
                self.status = Some(format!("Loaded {} strokes", count));
            }
            Err(err) => self.report(err),
        }
        true
    }

    fn report(&mut self, err: RoundTripError) {
        log::error!("Auto-correct failed: {}", err);
        self.status = Some(format!("Auto-correct failed: {}", err));
    }

    /// Pointer handling for the canvas area
    pub(crate) fn handle_canvas_input(&mut self, response: &egui::Response) {
        if self.is_busy() {
            return;
        }
        let pointer = response.interact_pointer_pos();

        if response.is_pointer_button_down_on() || response.dragged() {
            if !self.tool.is_drawing() {
                // egui reports a drag only once the pointer has left the click
                // radius, so the stroke starts where the button went down
                let origin = response.ctx.input(|i| i.pointer.press_origin()).or(pointer);
                if let Some(origin) = origin {
                    self.tool.on_pointer_down(origin, &self.document);
                }
            }
            if let Some(pos) = pointer {
                self.tool.on_pointer_move(pos);
            }
        }

        let released = response.drag_stopped()
            || response.clicked()
            || (self.tool.is_drawing() && !response.ctx.input(|i| i.pointer.any_down()));
        if released {
            if let Some(pos) = pointer {
                if self.tool.is_drawing() {
                    self.tool.on_pointer_move(pos);
                } else {
                    // A click without movement leaves a dot
                    self.tool.on_pointer_down(pos, &self.document);
                }
            }
            if let Some(command) = self.tool.on_pointer_up() {
                self.document.execute(command);
            }
        }
    }

    /// Imports dropped stroke tables. Drops that arrive during an
    /// auto-correct are kept until it has finished.
    pub fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        if !self.file_handler.check_for_dropped_files(ctx) {
            return;
        }
        if self.is_busy() {
            let pending = self.file_handler.pending_count();
            if self.status.as_deref() != Some(IMPORT_WAITING) {
                log::info!("{} dropped files wait for auto-correct to finish", pending);
                self.status = Some(IMPORT_WAITING.to_owned());
            }
            return;
        }
        let style = self.state.decoded_style(&self.config);
        if let Some(decoded) = self
            .file_handler
            .process_dropped_files(&style, self.config.decode_policy)
        {
            self.tool.cancel();
            let count = round_trip::apply(decoded, &mut self.document);
            self.status = Some(format!("Imported {} strokes", count));
        }
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        if self.is_busy() {
            return;
        }
        let (undo, redo) = ctx.input(|i| {
            let command = i.modifiers.command;
            (
                command && !i.modifiers.shift && i.key_pressed(egui::Key::Z),
                command
                    && (i.key_pressed(egui::Key::Y)
                        || (i.modifiers.shift && i.key_pressed(egui::Key::Z))),
            )
        });
        if undo {
            self.undo();
        }
        if redo {
            self.redo();
        }
    }
}

impl eframe::App for SketchApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, self);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_auto_correct();
        self.handle_dropped_files(ctx);
        self.handle_shortcuts(ctx);

        panels::tools_panel(self, ctx);
        panels::central_panel(self, ctx);

        self.file_handler.preview_files_being_dropped(ctx);

        if self.is_busy() {
            // Keep the elapsed time in the overlay ticking
            ctx.request_repaint_after(std::time::Duration::from_millis(250));
        }
    }
}
