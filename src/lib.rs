#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod config;
pub mod error;
pub mod file_handler;
pub mod image;
pub mod input;
pub mod renderer;
pub mod scene;
pub mod sticker;
pub mod store;
pub mod suggestion;

pub use app::StickerApp;
pub use config::SuggestionConfig;
pub use error::SuggestionError;
pub use crate::image::{ImageLoadError, SceneImage};
pub use input::{GestureInterpreter, GestureSession, TouchEvent, TouchPhase};
pub use renderer::{FrameCapture, RenderOutcome, Renderer, Surface};
pub use scene::SceneController;
pub use sticker::Sticker;
pub use store::{GroupDelta, StickerStore};
pub use suggestion::{SuggestionService, parse_suggestions};
