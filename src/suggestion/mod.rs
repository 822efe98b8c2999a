use crate::error::SuggestionError;
use crate::image::SceneImage;

mod openai;

pub use openai::OpenAiVisionService;

/// Instruction sent with every photo to the vision service
pub const SUGGESTION_INSTRUCTION: &str = "Return a few emoji of an items that can be added to the scene \
depicted in the photo, separated by comma. For example, if you see a face, you return '🕶️,👒'. \
when you see a desk, you can return'🍸,🖊️,🪴'";

/// Category name the service sometimes returns instead of an emoji
pub const FALSE_POSITIVE_TOKEN: &str = "face";

/// Split a comma-separated suggestion payload into glyphs.
///
/// Tokens are trimmed; empty tokens and [`FALSE_POSITIVE_TOKEN`] are dropped.
pub fn parse_suggestions(payload: &str) -> Vec<String> {
    payload
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty() && *token != FALSE_POSITIVE_TOKEN)
        .map(str::to_owned)
        .collect()
}

/// One outbound request to the vision service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionRequest {
    pub instruction: String,
    /// The photo as a `data:` URI
    pub image_data_uri: String,
}

impl SuggestionRequest {
    pub fn for_image(image: &SceneImage) -> Result<Self, SuggestionError> {
        Ok(Self {
            instruction: SUGGESTION_INSTRUCTION.to_owned(),
            image_data_uri: image.to_data_uri()?,
        })
    }
}

/// A service that looks at a photo and answers with a comma-separated emoji list.
///
/// Calls block; the scene controller runs them on a worker thread.
pub trait SuggestionService: Send + Sync {
    fn suggest(&self, request: &SuggestionRequest) -> Result<String, SuggestionError>;
}
