use egui::{FontId, Pos2, Rect};
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

use super::Surface;
use crate::image::SceneImage;

/// A glyph drawn onto a [`FrameCapture`]
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphRun {
    pub text: String,
    pub position: Pos2,
    pub font: FontId,
}

/// Offscreen surface for comparing render output.
///
/// The raster layer is composited pixel for pixel; text is recorded as an
/// ordered list of glyph runs instead of being rasterized.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameCapture {
    pixels: RgbaImage,
    glyphs: Vec<GlyphRun>,
    font: FontId,
}

impl FrameCapture {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: RgbaImage::new(width, height),
            glyphs: Vec::new(),
            font: FontId::default(),
        }
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn glyphs(&self) -> &[GlyphRun] {
        &self.glyphs
    }
}

impl Surface for FrameCapture {
    fn clear(&mut self) {
        for pixel in self.pixels.pixels_mut() {
            *pixel = Rgba([0, 0, 0, 0]);
        }
        self.glyphs.clear();
    }

    fn draw_image_scaled(&mut self, image: &SceneImage, dest: Rect) {
        let width = dest.width().round().max(1.0) as u32;
        let height = dest.height().round().max(1.0) as u32;
        let scaled = imageops::resize(image.pixels(), width, height, FilterType::Nearest);
        imageops::overlay(
            &mut self.pixels,
            &scaled,
            dest.min.x.round() as i64,
            dest.min.y.round() as i64,
        );
    }

    fn set_font(&mut self, font: FontId) {
        self.font = font;
    }

    fn fill_text(&mut self, text: &str, pos: Pos2) {
        self.glyphs.push(GlyphRun {
            text: text.to_owned(),
            position: pos,
            font: self.font.clone(),
        });
    }
}
