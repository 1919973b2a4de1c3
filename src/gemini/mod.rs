//! Gemini API client for Nexus
//!
//! This module implements the adapter layer between the CLI and the Gemini
//! `generateContent` endpoint: four independent operations (chat with web
//! search, image generation, image analysis, speech synthesis), each a
//! single network round trip with no retries. Failures surface directly to
//! the caller.

use crate::config::GeminiConfig;
use crate::error::{NexusError, Result};
use reqwest::Client;
use std::time::Duration;

pub mod data_uri;
pub mod types;

use types::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, ImageConfig, Part,
    SpeechGenerationConfig, Tool, ROLE_MODEL, ROLE_USER,
};

/// Environment variable holding the Gemini API key
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Fallback reply text when the service returns no text
pub const NO_RESPONSE_FALLBACK: &str = "No response received.";

/// Fallback analysis text when the service returns no text
pub const ANALYSIS_FALLBACK: &str = "Could not analyze image.";

/// Default title for a citation missing its title
const CITATION_TITLE_FALLBACK: &str = "Source";

/// Placeholder URI for a citation missing its URI
const CITATION_URI_FALLBACK: &str = "#";

/// One exchange turn in a chat session
#[derive(Debug, Clone)]
pub struct ChatTurn {
    pub role: Role,
    pub text: String,
}

impl ChatTurn {
    /// A turn spoken by the user
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    /// A turn spoken by the model
    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            text: text.into(),
        }
    }
}

/// Who spoke a chat turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Model,
}

impl Role {
    /// Wire-format role name
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => ROLE_USER,
            Role::Model => ROLE_MODEL,
        }
    }
}

/// A web source backing a model reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Citation {
    pub title: String,
    pub uri: String,
}

/// Result of a chat exchange: reply text plus grounding citations
#[derive(Debug, Clone)]
pub struct ChatReply {
    pub text: String,
    pub citations: Vec<Citation>,
}

/// Supported aspect ratios for image generation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AspectRatio {
    #[default]
    Square,
    Portrait3x4,
    Landscape4x3,
    Portrait9x16,
    Landscape16x9,
}

impl AspectRatio {
    /// The literal ratio string sent on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Square => "1:1",
            AspectRatio::Portrait3x4 => "3:4",
            AspectRatio::Landscape4x3 => "4:3",
            AspectRatio::Portrait9x16 => "9:16",
            AspectRatio::Landscape16x9 => "16:9",
        }
    }
}

impl std::str::FromStr for AspectRatio {
    type Err = NexusError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "1:1" => Ok(AspectRatio::Square),
            "3:4" => Ok(AspectRatio::Portrait3x4),
            "4:3" => Ok(AspectRatio::Landscape4x3),
            "9:16" => Ok(AspectRatio::Portrait9x16),
            "16:9" => Ok(AspectRatio::Landscape16x9),
            other => Err(NexusError::Config(format!(
                "unsupported aspect ratio '{}' (expected 1:1, 3:4, 4:3, 9:16, or 16:9)",
                other
            ))),
        }
    }
}

impl std::fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Gemini API client
///
/// Holds a single HTTP client with a request timeout. The API key is read
/// from the `GEMINI_API_KEY` environment variable; the endpoint base is
/// configurable so tests can point the client at a mock server.
///
/// # Examples
///
/// ```no_run
/// use nexus::config::GeminiConfig;
/// use nexus::gemini::GeminiClient;
///
/// # async fn example() -> nexus::error::Result<()> {
/// let client = GeminiClient::new(GeminiConfig::default())?;
/// let reply = client.chat("Hello!", &[]).await?;
/// println!("{}", reply.text);
/// # Ok(())
/// # }
/// ```
pub struct GeminiClient {
    client: Client,
    config: GeminiConfig,
    api_key: String,
}

impl GeminiClient {
    /// Create a client, reading the API key from the environment
    ///
    /// # Errors
    ///
    /// Returns a missing-credentials error when `GEMINI_API_KEY` is unset
    /// or empty, or a provider error when the HTTP client cannot be built.
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let api_key = std::env::var(API_KEY_ENV)
            .ok()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| NexusError::MissingCredentials(API_KEY_ENV.to_string()))?;
        Self::new_with_key(config, api_key)
    }

    /// Create a client with an explicit API key
    ///
    /// Primarily useful for tests, where mutating the process environment
    /// is undesirable.
    pub fn new_with_key(config: GeminiConfig, api_key: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("nexus/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| NexusError::Api(format!("Failed to create HTTP client: {}", e)))?;

        tracing::debug!(
            "Initialized Gemini client: api_base={}, chat_model={}",
            config.api_base,
            config.chat_model
        );

        Ok(Self {
            client,
            config,
            api_key: api_key.into(),
        })
    }

    /// Build the `generateContent` endpoint URL for a model
    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.api_base.trim_end_matches('/'),
            model
        )
    }

    /// Send one `generateContent` request and parse the response
    ///
    /// Exactly one attempt is made; any transport failure or non-success
    /// status is an error carrying the status and body text.
    async fn generate(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let url = self.endpoint(model);
        tracing::debug!(
            "Sending generateContent request: model={}, {} content blocks",
            model,
            request.contents.len()
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Gemini request failed: {}", e);
                NexusError::Api(format!("Gemini request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Gemini returned error {}: {}", status, error_text);
            return Err(NexusError::Api(format!(
                "Gemini returned error {}: {}",
                status, error_text
            ))
            .into());
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Gemini response: {}", e);
            NexusError::Api(format!("Failed to parse Gemini response: {}", e))
        })?;

        Ok(parsed)
    }

    /// Converse with web-search grounding
    ///
    /// Sends the full prior turn sequence plus the new user message, with
    /// the Google Search tool enabled. Empty reply text falls back to a
    /// fixed placeholder; citations are extracted from grounding metadata,
    /// keeping only chunks that carry a web source.
    ///
    /// # Arguments
    ///
    /// * `message` - The new user message
    /// * `prior_turns` - Ordered prior turns of the session
    pub async fn chat(&self, message: &str, prior_turns: &[ChatTurn]) -> Result<ChatReply> {
        let mut contents: Vec<Content> = prior_turns
            .iter()
            .map(|turn| Content::with_role(turn.role.as_str(), turn.text.clone()))
            .collect();
        contents.push(Content::user_text(message));

        let request = GenerateContentRequest {
            contents,
            tools: Some(vec![Tool::google_search()]),
            generation_config: None,
        };

        let response = self.generate(&self.config.chat_model, &request).await?;

        let text = response
            .text()
            .unwrap_or_else(|| NO_RESPONSE_FALLBACK.to_string());
        let citations = extract_citations(&response);

        tracing::debug!(
            "Chat reply: {} chars, {} citations",
            text.len(),
            citations.len()
        );

        Ok(ChatReply { text, citations })
    }

    /// Generate an image from a text prompt
    ///
    /// Scans the response parts in order and returns the first inline image
    /// payload as a `data:image/png;base64,...` URI.
    ///
    /// # Errors
    ///
    /// Fails hard when no part carries inline data; there is no partial
    /// result for this operation.
    pub async fn generate_image(&self, prompt: &str, aspect_ratio: AspectRatio) -> Result<String> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: None,
                parts: vec![Part::text(prompt)],
            }],
            tools: None,
            generation_config: Some(GenerationConfig {
                image_config: Some(ImageConfig {
                    aspect_ratio: aspect_ratio.as_str().to_string(),
                }),
                ..Default::default()
            }),
        };

        let response = self.generate(&self.config.image_model, &request).await?;

        for part in response.parts() {
            if let Some(inline) = &part.inline_data {
                return Ok(data_uri::build("image/png", &inline.data));
            }
        }

        Err(NexusError::Api("no image data found in response".to_string()).into())
    }

    /// Analyze an image with a text prompt
    ///
    /// Sends the image as inline data followed by the prompt, without
    /// search augmentation. The caller supplies the image's actual MIME
    /// type; empty reply text falls back to a fixed placeholder.
    ///
    /// # Arguments
    ///
    /// * `image_base64` - Base64-encoded image bytes (no data-URI prefix)
    /// * `mime_type` - MIME type of the image bytes
    /// * `prompt` - The analysis question
    pub async fn analyze_image(
        &self,
        image_base64: &str,
        mime_type: &str,
        prompt: &str,
    ) -> Result<String> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: None,
                parts: vec![
                    Part::inline_data(mime_type, image_base64),
                    Part::text(prompt),
                ],
            }],
            tools: None,
            generation_config: None,
        };

        let response = self.generate(&self.config.chat_model, &request).await?;

        Ok(response
            .text()
            .unwrap_or_else(|| ANALYSIS_FALLBACK.to_string()))
    }

    /// Synthesize speech for a text, returning the base64 PCM payload
    ///
    /// The text is wrapped in a fixed speaking instruction and the named
    /// prebuilt voice is selected. The returned payload is raw 16-bit
    /// little-endian PCM at 24 kHz, base64-encoded; decode it with
    /// [`crate::audio::decode_pcm`].
    ///
    /// # Errors
    ///
    /// Fails hard when the first content part carries no inline audio.
    pub async fn synthesize_speech(&self, text: &str, voice: &str) -> Result<String> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: None,
                parts: vec![Part::text(format!("Say clearly: {}", text))],
            }],
            tools: None,
            generation_config: Some(GenerationConfig {
                response_modalities: Some(vec!["AUDIO".to_string()]),
                speech_config: Some(SpeechGenerationConfig::prebuilt_voice(voice)),
                ..Default::default()
            }),
        };

        let response = self.generate(&self.config.speech_model, &request).await?;

        response
            .parts()
            .first()
            .and_then(|part| part.inline_data.as_ref())
            .map(|inline| inline.data.clone())
            .ok_or_else(|| NexusError::Api("Audio generation failed".to_string()).into())
    }
}

/// Extract citations from a response's grounding metadata
///
/// Only chunks that include a web source are kept. A missing title becomes
/// "Source" and a missing URI becomes "#", so callers never see a
/// half-formed citation.
fn extract_citations(response: &GenerateContentResponse) -> Vec<Citation> {
    response
        .grounding_chunks()
        .iter()
        .filter_map(|chunk| chunk.web.as_ref())
        .map(|web| Citation {
            title: web
                .title
                .clone()
                .unwrap_or_else(|| CITATION_TITLE_FALLBACK.to_string()),
            uri: web
                .uri
                .clone()
                .unwrap_or_else(|| CITATION_URI_FALLBACK.to_string()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_aspect_ratio_default_is_square() {
        assert_eq!(AspectRatio::default(), AspectRatio::Square);
        assert_eq!(AspectRatio::default().as_str(), "1:1");
    }

    #[test]
    fn test_aspect_ratio_parse_all_variants() {
        for ratio in ["1:1", "3:4", "4:3", "9:16", "16:9"] {
            let parsed: AspectRatio = ratio.parse().unwrap();
            assert_eq!(parsed.to_string(), ratio);
        }
    }

    #[test]
    fn test_aspect_ratio_parse_rejects_unknown() {
        assert!("2:1".parse::<AspectRatio>().is_err());
        assert!("square".parse::<AspectRatio>().is_err());
    }

    #[test]
    fn test_role_wire_names() {
        assert_eq!(Role::User.as_str(), "user");
        assert_eq!(Role::Model.as_str(), "model");
    }

    #[test]
    fn test_chat_turn_constructors() {
        let turn = ChatTurn::user("hi");
        assert_eq!(turn.role, Role::User);
        assert_eq!(turn.text, "hi");

        let turn = ChatTurn::model("hello");
        assert_eq!(turn.role, Role::Model);
    }

    #[test]
    fn test_endpoint_building() {
        let mut config = GeminiConfig::default();
        config.api_base = "http://localhost:9000/".to_string();
        let client = GeminiClient::new_with_key(config, "test-key").unwrap();
        assert_eq!(
            client.endpoint("gemini-3-flash-preview"),
            "http://localhost:9000/v1beta/models/gemini-3-flash-preview:generateContent"
        );
    }

    #[test]
    fn test_extract_citations_keeps_only_web_chunks() {
        let body = json!({
            "candidates": [{
                "content": { "parts": [{"text": "answer"}] },
                "groundingMetadata": {
                    "groundingChunks": [
                        {"web": {"title": "Wikipedia", "uri": "https://en.wikipedia.org/x"}},
                        {"retrievedContext": {"uri": "internal://doc"}}
                    ]
                }
            }]
        });
        let response: GenerateContentResponse = serde_json::from_value(body).unwrap();
        let citations = extract_citations(&response);
        assert_eq!(citations.len(), 1);
        assert_eq!(
            citations[0],
            Citation {
                title: "Wikipedia".to_string(),
                uri: "https://en.wikipedia.org/x".to_string(),
            }
        );
    }

    #[test]
    fn test_extract_citations_applies_fallbacks() {
        let body = json!({
            "candidates": [{
                "content": { "parts": [{"text": "answer"}] },
                "groundingMetadata": {
                    "groundingChunks": [{"web": {}}]
                }
            }]
        });
        let response: GenerateContentResponse = serde_json::from_value(body).unwrap();
        let citations = extract_citations(&response);
        assert_eq!(citations.len(), 1);
        assert_eq!(citations[0].title, "Source");
        assert_eq!(citations[0].uri, "#");
    }

    #[test]
    fn test_extract_citations_empty_for_ungrounded_reply() {
        let body = json!({
            "candidates": [{ "content": { "parts": [{"text": "answer"}] } }]
        });
        let response: GenerateContentResponse = serde_json::from_value(body).unwrap();
        assert!(extract_citations(&response).is_empty());
    }

    #[test]
    fn test_new_with_key_does_not_touch_env() {
        let client = GeminiClient::new_with_key(GeminiConfig::default(), "k").unwrap();
        assert_eq!(client.api_key, "k");
    }
}
