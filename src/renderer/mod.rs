use egui::{FontFamily, FontId, Pos2, Rect};

mod capture;
mod painter;
mod scheduler;
mod texture_cache;

pub use capture::{FrameCapture, GlyphRun};
pub use painter::PainterSurface;
pub use scheduler::{ChangeReason, RenderScheduler};
pub use texture_cache::TextureCache;

use crate::image::SceneImage;
use crate::sticker::Sticker;

/// The base image is drawn at 1/9 of its native width and height
pub const BASE_IMAGE_SCALE_DIVISOR: f32 = 9.0;

/// Font family every sticker glyph is drawn with
pub const STICKER_FONT_FAMILY: FontFamily = FontFamily::Proportional;

/// A 2D drawing target for the scene
pub trait Surface {
    /// Erase everything on the surface
    fn clear(&mut self);

    /// Draw `image` stretched into `dest` (surface coordinates)
    fn draw_image_scaled(&mut self, image: &SceneImage, dest: Rect);

    /// Font used by subsequent [`Surface::fill_text`] calls
    fn set_font(&mut self, font: FontId);

    /// Draw `text` with its baseline-left corner at `pos`
    fn fill_text(&mut self, text: &str, pos: Pos2);
}

/// Where the base image lands on the surface
pub fn base_image_rect(image: &SceneImage) -> Rect {
    Rect::from_min_size(Pos2::ZERO, image.size() / BASE_IMAGE_SCALE_DIVISOR)
}

/// Font a sticker of the given size is drawn with
pub fn sticker_font(size: f32) -> FontId {
    FontId::new(size, STICKER_FONT_FAMILY)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NoSurface,
    NoImage,
}

/// Result of a render pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    Drawn { stickers: usize },
    /// Nothing was cleared or drawn
    Skipped(SkipReason),
}

impl RenderOutcome {
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped(_))
    }
}

/// Full-redraw render pipeline
#[derive(Debug, Default)]
pub struct Renderer {
    scheduler: RenderScheduler,
}

impl Renderer {
    pub fn new(scheduler: RenderScheduler) -> Self {
        Self { scheduler }
    }

    pub fn scheduler(&self) -> &RenderScheduler {
        &self.scheduler
    }

    /// Clear the surface, draw the scaled base image, then every sticker in order.
    ///
    /// Both the surface and the image must be present, otherwise the surface is
    /// left untouched.
    pub fn render(
        &self,
        image: Option<&SceneImage>,
        stickers: &[Sticker],
        surface: Option<&mut dyn Surface>,
    ) -> RenderOutcome {
        let Some(surface) = surface else {
            return RenderOutcome::Skipped(SkipReason::NoSurface);
        };
        let Some(image) = image else {
            return RenderOutcome::Skipped(SkipReason::NoImage);
        };

        surface.clear();
        surface.draw_image_scaled(image, base_image_rect(image));
        for sticker in stickers {
            surface.set_font(sticker_font(sticker.size()));
            surface.fill_text(sticker.glyph(), sticker.position());
        }

        self.scheduler.mark_rendered();
        RenderOutcome::Drawn {
            stickers: stickers.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sticker::{DEFAULT_STICKER_POSITION, DEFAULT_STICKER_SIZE};
    use ::image::{Rgba, RgbaImage};
    use egui::pos2;

    fn solid_image(width: u32, height: u32) -> SceneImage {
        SceneImage::from_rgba(RgbaImage::from_pixel(width, height, Rgba([10, 200, 30, 255]))).unwrap()
    }

    #[test]
    fn test_base_image_rect_is_ninth_scale() {
        let rect = base_image_rect(&solid_image(900, 450));
        assert_eq!(rect.min, Pos2::ZERO);
        assert_eq!(rect.width(), 100.0);
        assert_eq!(rect.height(), 50.0);
    }

    #[test]
    fn test_skips_without_image() {
        let renderer = Renderer::default();
        let mut capture = FrameCapture::new(10, 10);
        capture.fill_text("leftover", pos2(1.0, 1.0));

        let outcome = renderer.render(None, &[], Some(&mut capture));
        assert_eq!(outcome, RenderOutcome::Skipped(SkipReason::NoImage));
        // Not cleared
        assert_eq!(capture.glyphs().len(), 1);
    }

    #[test]
    fn test_skips_without_surface() {
        let renderer = Renderer::default();
        let image = solid_image(9, 9);
        let outcome = renderer.render(Some(&image), &[], None);
        assert_eq!(outcome, RenderOutcome::Skipped(SkipReason::NoSurface));
    }

    #[test]
    fn test_stickers_drawn_in_order() {
        let renderer = Renderer::default();
        let image = solid_image(90, 90);
        let stickers = vec![
            Sticker::new("🕶️", DEFAULT_STICKER_POSITION, DEFAULT_STICKER_SIZE),
            Sticker::new("👒", pos2(5.0, 6.0), 12.0),
        ];
        let mut capture = FrameCapture::new(20, 20);

        let outcome = renderer.render(Some(&image), &stickers, Some(&mut capture));
        assert_eq!(outcome, RenderOutcome::Drawn { stickers: 2 });

        let glyphs = capture.glyphs();
        assert_eq!(glyphs.len(), 2);
        assert_eq!(glyphs[0].text, "🕶️");
        assert_eq!(glyphs[0].font, sticker_font(DEFAULT_STICKER_SIZE));
        assert_eq!(glyphs[1].text, "👒");
        assert_eq!(glyphs[1].position, pos2(5.0, 6.0));
    }

    #[test]
    fn test_render_marks_scheduler_clean() {
        let scheduler = RenderScheduler::new();
        let renderer = Renderer::new(scheduler.clone());
        scheduler.notify_changed(ChangeReason::ImageLoaded);

        let image = solid_image(9, 9);
        let mut capture = FrameCapture::new(1, 1);
        renderer.render(Some(&image), &[], Some(&mut capture));
        assert!(!scheduler.is_pending());
    }
}
