use egui::{Pos2, Vec2};

/// Smallest size a sticker can be scaled down to
pub const MIN_STICKER_SIZE: f32 = 10.0;

/// Where a freshly added sticker is placed on the canvas
pub const DEFAULT_STICKER_POSITION: Pos2 = Pos2::new(50.0, 50.0);

/// Font size a freshly added sticker starts with
pub const DEFAULT_STICKER_SIZE: f32 = 40.0;

/// A placed emoji glyph on the canvas
#[derive(Debug, Clone, PartialEq)]
pub struct Sticker {
    glyph: String,
    position: Pos2,
    size: f32,
}

impl Sticker {
    /// Create a sticker, clamping `size` to the minimum
    pub fn new(glyph: impl Into<String>, position: Pos2, size: f32) -> Self {
        Self {
            glyph: glyph.into(),
            position,
            size: clamp_size(size),
        }
    }

    pub fn glyph(&self) -> &str {
        &self.glyph
    }

    /// Anchor point in canvas coordinates
    pub fn position(&self) -> Pos2 {
        self.position
    }

    /// Font size the glyph is drawn with
    pub fn size(&self) -> f32 {
        self.size
    }

    pub(crate) fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }

    pub(crate) fn scale(&mut self, factor: f32) {
        self.size = clamp_size(self.size * factor);
    }
}

fn clamp_size(size: f32) -> f32 {
    // NaN falls through to the floor as well
    if size >= MIN_STICKER_SIZE {
        size
    } else {
        MIN_STICKER_SIZE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_clamps_size() {
        let sticker = Sticker::new("🌵", DEFAULT_STICKER_POSITION, 2.0);
        assert_eq!(sticker.size(), MIN_STICKER_SIZE);

        let sticker = Sticker::new("🌵", DEFAULT_STICKER_POSITION, f32::NAN);
        assert_eq!(sticker.size(), MIN_STICKER_SIZE);
    }

    #[test]
    fn test_scale_respects_floor() {
        let mut sticker = Sticker::new("🍸", DEFAULT_STICKER_POSITION, DEFAULT_STICKER_SIZE);
        sticker.scale(0.1);
        assert_eq!(sticker.size(), MIN_STICKER_SIZE);

        sticker.scale(3.0);
        assert_eq!(sticker.size(), 30.0);
    }

    #[test]
    fn test_translate_moves_anchor() {
        let mut sticker = Sticker::new("👒", Pos2::new(1.0, 2.0), DEFAULT_STICKER_SIZE);
        sticker.translate(Vec2::new(4.0, -2.0));
        assert_eq!(sticker.position(), Pos2::new(5.0, 0.0));
        assert_eq!(sticker.size(), DEFAULT_STICKER_SIZE);
    }
}
