use egui::{Pos2, Vec2};

use crate::renderer::{ChangeReason, RenderScheduler};
use crate::sticker::Sticker;

/// A transform applied identically to every sticker in the store
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GroupDelta {
    pub translate: Option<Vec2>,
    pub scale: Option<f32>,
}

impl GroupDelta {
    pub fn translate(delta: Vec2) -> Self {
        Self {
            translate: Some(delta),
            scale: None,
        }
    }

    pub fn scale(factor: f32) -> Self {
        Self {
            translate: None,
            scale: Some(factor),
        }
    }

    /// True if applying this delta cannot change any sticker
    pub fn is_identity(&self) -> bool {
        self.translate.is_none_or(|d| d == Vec2::ZERO) && self.scale.is_none_or(|f| f == 1.0)
    }
}

/// Ordered, append-only collection of placed stickers
#[derive(Debug, Default)]
pub struct StickerStore {
    stickers: Vec<Sticker>,
    scheduler: RenderScheduler,
}

impl StickerStore {
    pub fn new(scheduler: RenderScheduler) -> Self {
        Self {
            stickers: Vec::new(),
            scheduler,
        }
    }

    /// Add a sticker on top of the others
    pub fn append(&mut self, glyph: impl Into<String>, position: Pos2, size: f32) {
        let sticker = Sticker::new(glyph, position, size);
        log::debug!("appending sticker {:?} at {:?}", sticker.glyph(), position);
        self.stickers.push(sticker);
        self.scheduler.notify_changed(ChangeReason::StickersChanged);
    }

    /// Translate and/or scale every sticker in place
    pub fn apply_group_delta(&mut self, delta: GroupDelta) {
        if self.stickers.is_empty() || delta.is_identity() {
            return;
        }

        for sticker in &mut self.stickers {
            if let Some(offset) = delta.translate {
                sticker.translate(offset);
            }
            if let Some(factor) = delta.scale {
                sticker.scale(factor);
            }
        }
        self.scheduler.notify_changed(ChangeReason::StickersChanged);
    }

    /// Stickers in draw order
    pub fn snapshot(&self) -> &[Sticker] {
        &self.stickers
    }

    pub fn len(&self) -> usize {
        self.stickers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stickers.is_empty()
    }
}
