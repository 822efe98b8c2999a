use egui::{Align2, Color32, FontId, Painter, Pos2, Rect};

use super::{Surface, TextureCache};
use crate::image::SceneImage;

/// Draws the scene through an egui painter into the canvas rect
pub struct PainterSurface<'a> {
    painter: &'a Painter,
    canvas: Rect,
    textures: &'a mut TextureCache,
    font: FontId,
    background: Color32,
    text_color: Color32,
}

impl<'a> PainterSurface<'a> {
    pub fn new(painter: &'a Painter, canvas: Rect, textures: &'a mut TextureCache) -> Self {
        Self {
            painter,
            canvas,
            textures,
            font: FontId::default(),
            background: Color32::WHITE,
            text_color: Color32::BLACK,
        }
    }

    /// Surface coordinates to screen coordinates
    fn to_screen(&self, pos: Pos2) -> Pos2 {
        self.canvas.min + pos.to_vec2()
    }
}

impl Surface for PainterSurface<'_> {
    fn clear(&mut self) {
        self.painter.rect_filled(self.canvas, 0.0, self.background);
    }

    fn draw_image_scaled(&mut self, image: &SceneImage, dest: Rect) {
        let texture = self.textures.get_or_load(self.painter.ctx(), image);
        let screen_rect = dest.translate(self.canvas.min.to_vec2());
        self.painter.image(
            texture.id(),
            screen_rect,
            Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)),
            Color32::WHITE,
        );
    }

    fn set_font(&mut self, font: FontId) {
        self.font = font;
    }

    fn fill_text(&mut self, text: &str, pos: Pos2) {
        self.painter.text(
            self.to_screen(pos),
            Align2::LEFT_BOTTOM,
            text,
            self.font.clone(),
            self.text_color,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::Renderer;
    use crate::sticker::Sticker;
    use ::image::{Rgba, RgbaImage};
    use egui::{Context, LayerId, RawInput, Shape, pos2, vec2};

    fn paint(
        ctx: &Context,
        textures: &mut TextureCache,
        canvas: Rect,
        image: &SceneImage,
        stickers: &[Sticker],
    ) -> Vec<Shape> {
        let output = ctx.run(RawInput::default(), |ctx| {
            let painter = ctx.layer_painter(LayerId::background());
            let mut surface = PainterSurface::new(&painter, canvas, &mut *textures);
            Renderer::default().render(Some(image), stickers, Some(&mut surface));
        });
        output.shapes.into_iter().map(|clipped| clipped.shape).collect()
    }

    #[test]
    fn test_scene_lands_at_canvas_origin() {
        let ctx = Context::default();
        let mut textures = TextureCache::default();
        let canvas = Rect::from_min_size(pos2(30.0, 20.0), vec2(200.0, 200.0));
        let image = SceneImage::from_rgba(RgbaImage::from_pixel(90, 180, Rgba([1, 2, 3, 255]))).unwrap();
        let stickers = vec![
            Sticker::new("a", pos2(50.0, 50.0), 40.0),
            Sticker::new("b", pos2(5.0, 60.0), 12.0),
        ];

        let shapes = paint(&ctx, &mut textures, canvas, &image, &stickers);
        assert_eq!(shapes.len(), 4);

        // Cleared first
        match &shapes[0] {
            Shape::Rect(rect) => assert_eq!(rect.rect, canvas),
            other => panic!("expected the clear rect, got {:?}", other),
        }

        // Base image at 1/9 scale, offset by the canvas origin
        assert_eq!(
            shapes[1].visual_bounding_rect(),
            Rect::from_min_size(pos2(30.0, 20.0), vec2(10.0, 20.0))
        );

        // Glyphs in store order, bottom-left corner at canvas origin + position
        let texts: Vec<_> = shapes[2..]
            .iter()
            .map(|shape| match shape {
                Shape::Text(text) => text,
                other => panic!("expected a glyph, got {:?}", other),
            })
            .collect();
        for (text, sticker) in texts.iter().zip(&stickers) {
            let expected = canvas.min + sticker.position().to_vec2();
            assert_eq!(text.galley.text(), sticker.glyph());
            assert_eq!(text.pos.x, expected.x);
            assert!((text.pos.y + text.galley.size().y - expected.y).abs() < 1e-3);
        }
        assert_eq!(textures.len(), 1);
    }

    #[test]
    fn test_repeated_paint_is_identical() {
        let ctx = Context::default();
        let mut textures = TextureCache::default();
        let canvas = Rect::from_min_size(pos2(12.0, 7.0), vec2(64.0, 64.0));
        let image = SceneImage::from_rgba(RgbaImage::from_pixel(270, 180, Rgba([200, 120, 40, 255]))).unwrap();
        let stickers = vec![
            Sticker::new("x", pos2(4.5, -2.25), 40.0),
            Sticker::new("y", pos2(50.0, 50.0), 10.0),
        ];

        let first = paint(&ctx, &mut textures, canvas, &image, &stickers);
        let second = paint(&ctx, &mut textures, canvas, &image, &stickers);
        assert!(!first.is_empty());
        assert_eq!(first, second);
    }
}
