use std::path::Path;

use egui::DroppedFile;

use crate::codec::{self, DecodePolicy, DecodedStrokes};
use crate::stroke::StrokeStyle;

/// Loads stroke tables from files dropped on the window
#[derive(Default)]
pub struct FileHandler {
    dropped_files: Vec<DroppedFile>,
}

impl FileHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects newly dropped files from the UI context.
    /// Returns true if there is anything to process.
    ///
    /// egui only reports a drop for one frame, so files stay queued here
    /// until `process_dropped_files` drains them.
    pub fn check_for_dropped_files(&mut self, ctx: &egui::Context) -> bool {
        ctx.input(|i| {
            self.dropped_files.extend(i.raw.dropped_files.iter().cloned());
        });
        !self.dropped_files.is_empty()
    }

    pub fn pending_count(&self) -> usize {
        self.dropped_files.len()
    }

    /// Decodes the dropped CSV files. The last one that decodes wins.
    pub fn process_dropped_files(
        &mut self,
        style: &StrokeStyle,
        policy: DecodePolicy,
    ) -> Option<DecodedStrokes> {
        let mut loaded = None;
        for file in self.dropped_files.drain(..) {
            let file_name = display_name(&file);
            if !is_csv_file(&file) {
                log::warn!("Dropped file is not a supported type: {}", file_name);
                continue;
            }

            let text = match read_text(&file) {
                Ok(text) => text,
                Err(err) => {
                    log::error!("Failed to read {}: {}", file_name, err);
                    continue;
                }
            };

            match codec::decode_strokes(&text, style, policy) {
                Ok(decoded) => {
                    log::info!("Loaded {} strokes from {}", decoded.len(), file_name);
                    loaded = Some(decoded);
                }
                Err(err) => log::error!("Failed to decode {}: {}", file_name, err),
            }
        }
        loaded
    }

    /// Dims the window while files are dragged over it
    pub fn preview_files_being_dropped(&self, ctx: &egui::Context) {
        use egui::{Align2, Color32, Id, LayerId, Order, TextStyle};

        if ctx.input(|i| i.raw.hovered_files.is_empty()) {
            return;
        }

        let painter =
            ctx.layer_painter(LayerId::new(Order::Foreground, Id::new("file_drop_target")));
        let screen_rect = ctx.screen_rect();
        painter.rect_filled(screen_rect, 0.0, Color32::from_black_alpha(192));
        painter.text(
            screen_rect.center(),
            Align2::CENTER_CENTER,
            "Drop a stroke table (.csv) to load it",
            TextStyle::Heading.resolve(&ctx.style()),
            Color32::WHITE,
        );
    }
}

fn display_name(file: &DroppedFile) -> String {
    if let Some(path) = &file.path {
        path.display().to_string()
    } else if !file.name.is_empty() {
        file.name.clone()
    } else {
        "unknown".to_owned()
    }
}

/// Check if a file is CSV based on MIME type or extension
pub fn is_csv_file(file: &DroppedFile) -> bool {
    if file.mime.starts_with("text/csv") {
        return true;
    }
    let name = file
        .path
        .as_deref()
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.name.clone());
    Path::new(&name)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

fn read_text(file: &DroppedFile) -> std::io::Result<String> {
    if let Some(bytes) = &file.bytes {
        return String::from_utf8(bytes.to_vec())
            .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidData, err));
    }
    match &file.path {
        Some(path) => std::fs::read_to_string(path),
        None => Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "dropped file has no accessible data",
        )),
    }
}
