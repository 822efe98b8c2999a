use std::collections::HashMap;

use egui::{ColorImage, Context, TextureHandle, TextureOptions};
use uuid::Uuid;

use crate::image::SceneImage;

/// Keeps GPU textures for base images so they are uploaded once, not every frame
pub struct TextureCache {
    textures: HashMap<Uuid, TextureHandle>,
    /// Frame each texture was last drawn in
    last_used: HashMap<Uuid, u64>,
    current_frame: u64,
    max_cache_size: usize,
}

impl Default for TextureCache {
    fn default() -> Self {
        // A new capture replaces the old one, keep one spare for the swap
        Self::new(2)
    }
}

impl TextureCache {
    pub fn new(max_cache_size: usize) -> Self {
        Self {
            textures: HashMap::new(),
            last_used: HashMap::new(),
            current_frame: 0,
            max_cache_size: max_cache_size.max(1),
        }
    }

    /// Should be called at the start of each frame
    pub fn begin_frame(&mut self) {
        self.current_frame += 1;
    }

    /// Texture for `image`, uploading it on first use
    pub fn get_or_load(&mut self, ctx: &Context, image: &SceneImage) -> TextureHandle {
        let key = image.id();
        self.last_used.insert(key, self.current_frame);
        if let Some(handle) = self.textures.get(&key) {
            return handle.clone();
        }

        log::info!("🖼️ uploading base image texture {}: {}x{}", key, image.width(), image.height());
        let pixels = image.pixels();
        let color_image = ColorImage::from_rgba_unmultiplied(
            [pixels.width() as usize, pixels.height() as usize],
            pixels.as_raw(),
        );
        let handle = ctx.load_texture(format!("scene_image_{}", key), color_image, TextureOptions::LINEAR);
        self.textures.insert(key, handle.clone());
        self.prune();
        handle
    }

    fn prune(&mut self) {
        if self.textures.len() <= self.max_cache_size {
            return;
        }

        let mut entries: Vec<(Uuid, u64)> = self.last_used.iter().map(|(k, v)| (*k, *v)).collect();
        // Oldest first
        entries.sort_by_key(|(_, frame)| *frame);

        let to_remove = entries.len() - self.max_cache_size;
        for (key, _) in entries.iter().take(to_remove) {
            self.textures.remove(key);
            self.last_used.remove(key);
        }
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    #[cfg(test)]
    fn contains(&self, image: &SceneImage) -> bool {
        self.textures.contains_key(&image.id())
    }
}
