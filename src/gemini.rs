use crate::config::Config;
use crate::error::GenerationError;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

pub const TEMPERATURE: f64 = 0.7;
pub const TOP_P: f64 = 0.9;
pub const MAX_OUTPUT_TOKENS: u32 = 2000;
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

///docs: https://ai.google.dev/api/generate-content#method:-models.generatecontent
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
	pub contents: Vec<Content>,
	pub generation_config: GenerationConfig,
}
impl GenerateContentRequest {
	pub fn new(prompt: &str) -> Self {
		Self {
			contents: vec![Content {
				parts: vec![Part { text: prompt.to_string() }],
			}],
			generation_config: GenerationConfig::default(),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
	pub temperature: f64,
	pub top_p: f64,
	pub max_output_tokens: u32,
}
impl Default for GenerationConfig {
	fn default() -> Self {
		Self {
			temperature: TEMPERATURE,
			top_p: TOP_P,
			max_output_tokens: MAX_OUTPUT_TOKENS,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
	pub parts: Vec<Part>,
}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
	#[serde(default)]
	pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct Response {
	#[serde(default)]
	candidates: Option<Vec<Candidate>>,
}
#[derive(Debug, Deserialize)]
struct Candidate {
	content: Content,
}
impl Response {
	/// Text of the first part of the first candidate.
	pub fn text(&self) -> Result<&str, GenerationError> {
		let candidate = self.candidates.as_ref().and_then(|c| c.first()).ok_or(GenerationError::EmptyCandidates)?;
		let part = candidate
			.content
			.parts
			.first()
			.ok_or_else(|| GenerationError::ResponseParseFailure(serde::de::Error::custom("candidate content has no parts")))?;
		Ok(&part.text)
	}
}

/// Parses a 2xx body and pulls out the generated text.
pub fn extract_text(body: &str) -> Result<String, GenerationError> {
	let response: Response = serde_json::from_str(body).map_err(GenerationError::ResponseParseFailure)?;
	response.text().map(str::to_string)
}

/// One outbound call to the generation API. Returns the raw body of a successful response.
pub trait Transport {
	fn send(&self, request: &GenerateContentRequest) -> Result<String, GenerationError>;
}

impl<T: Transport + ?Sized> Transport for &T {
	fn send(&self, request: &GenerateContentRequest) -> Result<String, GenerationError> {
		(**self).send(request)
	}
}

pub struct HttpTransport {
	client: Client,
	endpoint: Url,
}
impl HttpTransport {
	pub fn new(config: &Config) -> Result<Self, GenerationError> {
		let mut headers = HeaderMap::new();
		headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
		let client = Client::builder()
			.default_headers(headers)
			.timeout(REQUEST_TIMEOUT)
			.build()
			.map_err(|e| GenerationError::TransportFailure(format!("Failed to build http client: {e}")))?;
		Ok(Self {
			client,
			endpoint: config.endpoint(),
		})
	}
}

impl Transport for HttpTransport {
	fn send(&self, request: &GenerateContentRequest) -> Result<String, GenerationError> {
		let response = self
			.client
			.post(self.endpoint.clone())
			.json(request)
			.send()
			.map_err(|e| GenerationError::TransportFailure(e.without_url().to_string()))?;

		let status = response.status();
		let body = response
			.text()
			.map_err(|e| GenerationError::TransportFailure(format!("Failed to read response body: {}", e.without_url())))?;
		debug!(status = status.as_u16(), body_len = body.len());

		if status.is_client_error() || status.is_server_error() {
			warn!(status = status.as_u16(), %body, "generation api returned an error status");
			return Err(GenerationError::ApiStatusFailure { status: status.as_u16(), body });
		}
		Ok(body)
	}
}
