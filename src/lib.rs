#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod codec;
pub mod command;
pub mod components;
pub mod config;
pub mod document;
pub mod error;
pub mod file_handler;
pub mod panels;
pub mod renderer;
pub mod round_trip;
pub mod state;
pub mod stroke;
pub mod theme;
pub mod tools;
pub mod transport;

pub use app::SketchApp;
pub use codec::{DecodePolicy, DecodedStrokes};
pub use command::{Command, CommandHistory};
pub use config::AppConfig;
pub use document::{Document, DrawingSurface};
pub use error::{CodecError, ConfigError, RoundTripError, TransportError};
pub use renderer::Renderer;
pub use state::{AppState, InFlightGuard};
pub use stroke::{Stroke, StrokeStyle};
pub use theme::Theme;
pub use transport::{HttpStrokeService, StrokeService};
