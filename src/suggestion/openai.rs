//! OpenAI-compatible chat-completions client for sticker suggestions.

use serde::{Deserialize, Serialize};

use super::{SuggestionRequest, SuggestionService};
use crate::config::SuggestionConfig;
use crate::error::SuggestionError;

const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Sends the photo and instruction to `/chat/completions` and returns the reply text
pub struct OpenAiVisionService {
    http: reqwest::blocking::Client,
    config: SuggestionConfig,
}

impl std::fmt::Debug for OpenAiVisionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiVisionService")
            .field("model", &self.config.model)
            .field("base_url", &self.config.base_url)
            .finish()
    }
}

impl OpenAiVisionService {
    pub fn new(config: SuggestionConfig) -> Result<Self, SuggestionError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(std::time::Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| SuggestionError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, config })
    }
}

impl SuggestionService for OpenAiVisionService {
    fn suggest(&self, request: &SuggestionRequest) -> Result<String, SuggestionError> {
        let url = format!("{}/chat/completions", self.config.base_url);
        let body = build_request_body(&self.config.model, request);
        log::info!("requesting sticker suggestions from {} ({})", url, self.config.model);

        let response = self
            .http
            .post(url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .map_err(|e| SuggestionError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .map_err(|e| SuggestionError::Request(e.to_string()))?;
        if status != 200 {
            return Err(SuggestionError::Response { status, body: text });
        }
        parse_response(&text)
    }
}

// Wire types

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: Vec<ContentPart<'a>>,
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart<'a> {
    Text { text: &'a str },
    ImageUrl { image_url: ImageUrl<'a> },
}

#[derive(Serialize)]
struct ImageUrl<'a> {
    url: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

fn build_request_body<'a>(model: &'a str, request: &'a SuggestionRequest) -> ChatRequest<'a> {
    ChatRequest {
        model,
        messages: vec![ChatMessage {
            role: "user",
            content: vec![
                ContentPart::Text {
                    text: &request.instruction,
                },
                ContentPart::ImageUrl {
                    image_url: ImageUrl {
                        url: &request.image_data_uri,
                    },
                },
            ],
        }],
    }
}

/// Pull the first choice's text out of a chat-completions response body
fn parse_response(body: &str) -> Result<String, SuggestionError> {
    let response: ChatResponse = serde_json::from_str(body)?;
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or(SuggestionError::EmptyResponse)
}
