#![warn(clippy::all, rust_2018_idioms)]

use std::path::PathBuf;

use sticker_scene::{SceneImage, StickerApp};

fn main() -> eframe::Result {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    // Optional photo to start with
    let initial_image = std::env::args_os().nth(1).map(PathBuf::from).and_then(|path| {
        SceneImage::open(&path)
            .inspect_err(|err| log::error!("{}", err))
            .ok()
    });

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Sticker Scene")
            .with_inner_size([480.0, 720.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };
    eframe::run_native(
        "Sticker Scene",
        native_options,
        Box::new(|cc| Ok(Box::new(StickerApp::new(cc, initial_image)))),
    )
}
