use std::sync::Arc;

use eframe::egui;

use crate::config::SuggestionConfig;
use crate::file_handler::FileHandler;
use crate::image::SceneImage;
use crate::input::TouchTracker;
use crate::renderer::{BASE_IMAGE_SCALE_DIVISOR, PainterSurface, RenderScheduler, TextureCache};
use crate::scene::SceneController;
use crate::suggestion::OpenAiVisionService;

/// Canvas size used before a photo is loaded
const PLACEHOLDER_CANVAS: egui::Vec2 = egui::vec2(320.0, 240.0);

pub struct StickerApp {
    scene: SceneController,
    touches: TouchTracker,
    textures: TextureCache,
    files: FileHandler,
}

impl StickerApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, initial_image: Option<SceneImage>) -> Self {
        let scheduler = RenderScheduler::new();
        scheduler.attach(&cc.egui_ctx);

        let mut scene = SceneController::new(scheduler);
        match SuggestionConfig::from_env().and_then(OpenAiVisionService::new) {
            Ok(service) => scene = scene.with_service(Arc::new(service)),
            Err(err) => log::warn!("sticker suggestions disabled: {}", err),
        }

        if let Some(image) = initial_image {
            scene.load_image(image);
        }

        Self {
            scene,
            touches: TouchTracker::new(),
            textures: TextureCache::default(),
            files: FileHandler::new(),
        }
    }

    fn canvas_size(&self) -> egui::Vec2 {
        self.scene
            .image()
            .map(|image| image.size() / BASE_IMAGE_SCALE_DIVISOR)
            .unwrap_or(PLACEHOLDER_CANVAS)
    }

    fn canvas(&mut self, ui: &mut egui::Ui) {
        // Claim drags so the touch never scrolls or zooms anything else
        let (response, painter) = ui.allocate_painter(self.canvas_size(), egui::Sense::drag());
        let rect = response.rect;

        let events = ui.ctx().input(|i| i.events.clone());
        for event in self.touches.process_events(&events, rect) {
            self.scene.handle_touch(&event);
        }

        let scheduler = self.scene.scheduler();
        if let Some(reason) = scheduler.pending_reason() {
            log::debug!("redrawing scene after {:?} (generation {})", reason, scheduler.generation());
        }

        let painter = painter.with_clip_rect(rect);
        let mut surface = PainterSurface::new(&painter, rect, &mut self.textures);
        if self.scene.render(Some(&mut surface)).is_skipped() {
            painter.rect_filled(rect, 0.0, egui::Color32::from_gray(230));
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                "Drop a photo here",
                egui::FontId::proportional(16.0),
                egui::Color32::from_gray(90),
            );
        }
    }

    fn suggestion_buttons(&mut self, ui: &mut egui::Ui) {
        if self.scene.is_fetching_suggestions() {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Looking for stickers…");
            });
        }

        let mut chosen = None;
        ui.horizontal_wrapped(|ui| {
            for glyph in self.scene.suggestions() {
                let button = egui::Button::new(egui::RichText::new(glyph.as_str()).size(28.0));
                if ui.add(button).clicked() {
                    chosen = Some(glyph.clone());
                }
            }
        });

        if let Some(glyph) = chosen {
            self.scene.add_sticker(&glyph);
        }
    }
}

impl eframe::App for StickerApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.textures.begin_frame();
        self.scene.poll_suggestions();

        if self.files.check_for_dropped_files(ctx) {
            if let Some(image) = self.files.take_image() {
                self.scene.load_image(image);
            }
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Take a Picture :)");
            ui.label(format!("{} stickers", self.scene.store().len()));
            ui.separator();

            self.canvas(ui);
            ui.separator();
            self.suggestion_buttons(ui);
        });

        self.files.preview_files_being_dropped(ctx);
    }
}
