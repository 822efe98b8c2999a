use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use base64::Engine;
use egui::Vec2;
use image::{ImageFormat, RgbaImage};
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur while acquiring the base image
#[derive(Error, Debug)]
pub enum ImageLoadError {
    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("Failed to read image file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Image has no pixels")]
    Empty,
}

/// Shared handle to an immutable base image
pub type SceneImageRef = Arc<SceneImage>;

/// The decoded photograph drawn under the stickers.
///
/// Immutable once constructed. When decoded from an encoded file the original
/// bytes are kept so the suggestion request can send them unchanged.
#[derive(Clone)]
pub struct SceneImage {
    id: Uuid,
    pixels: RgbaImage,
    source: Option<(ImageFormat, Vec<u8>)>,
}

impl std::fmt::Debug for SceneImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneImage")
            .field("id", &self.id)
            .field("width", &self.pixels.width())
            .field("height", &self.pixels.height())
            .field("source_format", &self.source.as_ref().map(|(format, _)| format))
            .finish()
    }
}

impl SceneImage {
    /// Wrap an already-decoded raster
    pub fn from_rgba(pixels: RgbaImage) -> Result<Self, ImageLoadError> {
        if pixels.width() == 0 || pixels.height() == 0 {
            return Err(ImageLoadError::Empty);
        }
        Ok(Self {
            id: Uuid::new_v4(),
            pixels,
            source: None,
        })
    }

    /// Decode an encoded image (png, jpeg, ...) from memory
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ImageLoadError> {
        let format = image::guess_format(bytes)?;
        let decoded = image::load_from_memory_with_format(bytes, format)?;
        log::debug!(
            "decoded {:?} image: {}x{}",
            format,
            decoded.width(),
            decoded.height()
        );

        let mut image = Self::from_rgba(decoded.to_rgba8())?;
        image.source = Some((format, bytes.to_vec()));
        Ok(image)
    }

    /// Read and decode an image file
    pub fn open(path: &Path) -> Result<Self, ImageLoadError> {
        let bytes = std::fs::read(path).map_err(|source| ImageLoadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_bytes(&bytes)
    }

    pub fn into_ref(self) -> SceneImageRef {
        Arc::new(self)
    }

    /// Unique id, used as the texture cache key
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Native size in pixels
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width() as f32, self.height() as f32)
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Encode the image as a `data:` URI.
    ///
    /// The original encoded bytes are used when available; otherwise the raster
    /// is encoded as PNG.
    pub fn to_data_uri(&self) -> Result<String, ImageLoadError> {
        let (mime, bytes) = match &self.source {
            Some((format, bytes)) => (format.to_mime_type(), bytes.clone()),
            None => {
                let mut cursor = Cursor::new(Vec::new());
                self.pixels.write_to(&mut cursor, ImageFormat::Png)?;
                (ImageFormat::Png.to_mime_type(), cursor.into_inner())
            }
        };
        let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
        Ok(format!("data:{};base64,{}", mime, encoded))
    }
}
