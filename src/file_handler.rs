use eframe::egui;

use crate::image::{ImageLoadError, SceneImage};

/// Turns files dropped onto the window into base images
#[derive(Debug, Default)]
pub struct FileHandler {
    dropped_files: Vec<egui::DroppedFile>,
}

impl FileHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pick up newly dropped files from the UI context.
    /// Returns true if there is something to process
    pub fn check_for_dropped_files(&mut self, ctx: &egui::Context) -> bool {
        ctx.input(|i| {
            if !i.raw.dropped_files.is_empty() {
                self.dropped_files = i.raw.dropped_files.clone();
            }
        });
        !self.dropped_files.is_empty()
    }

    /// Decode the dropped files, returning the last one that is a valid image
    pub fn take_image(&mut self) -> Option<SceneImage> {
        let mut loaded = None;
        for file in self.dropped_files.drain(..) {
            let file_name = display_name(&file);
            if !is_image_file(&file) {
                log::warn!("Dropped file is not a supported type: {}", file_name);
                continue;
            }

            match decode(&file) {
                Ok(image) => {
                    log::info!("Loaded {} ({}x{})", file_name, image.width(), image.height());
                    loaded = Some(image);
                }
                Err(err) => log::error!("Failed to load {}: {}", file_name, err),
            }
        }
        loaded
    }

    /// Show an overlay while files are dragged over the window
    pub fn preview_files_being_dropped(&self, ctx: &egui::Context) {
        use egui::{Align2, Color32, FontId, Id, LayerId, Order};

        if ctx.input(|i| i.raw.hovered_files.is_empty()) {
            return;
        }

        let painter = ctx.layer_painter(LayerId::new(Order::Foreground, Id::new("file_drop_target")));
        let screen_rect = ctx.screen_rect();
        painter.rect_filled(screen_rect, 0.0, Color32::from_black_alpha(192));
        painter.text(
            screen_rect.center(),
            Align2::CENTER_CENTER,
            "Drop a photo to start",
            FontId::proportional(24.0),
            Color32::WHITE,
        );
    }
}

fn display_name(file: &egui::DroppedFile) -> String {
    if let Some(path) = &file.path {
        path.display().to_string()
    } else if !file.name.is_empty() {
        file.name.clone()
    } else {
        "unknown".to_owned()
    }
}

/// Check if a file is an image based on MIME type or extension
fn is_image_file(file: &egui::DroppedFile) -> bool {
    if !file.mime.is_empty() {
        file.mime.starts_with("image/")
    } else if let Some(ext) = file.path.as_ref().and_then(|path| path.extension()) {
        let ext = ext.to_string_lossy().to_lowercase();
        matches!(ext.as_str(), "png" | "jpg" | "jpeg" | "gif" | "webp" | "bmp")
    } else {
        // Let the decoder decide
        file.bytes.is_some()
    }
}

fn decode(file: &egui::DroppedFile) -> Result<SceneImage, ImageLoadError> {
    if let Some(bytes) = &file.bytes {
        SceneImage::from_bytes(bytes)
    } else if let Some(path) = &file.path {
        SceneImage::open(path)
    } else {
        Err(ImageLoadError::Empty)
    }
}
