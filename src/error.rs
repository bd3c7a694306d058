use serde_json::json;
use thiserror::Error;

/// Every way a reply generation can fail. Returned to the caller, never swallowed.
#[derive(Debug, Error)]
pub enum GenerationError {
	#[error("Invalid tone specified: {tone:?}. Allowed values: {}", crate::mail::available_tones().join(", "))]
	InvalidTone { tone: String },

	#[error("Invalid request: {0}")]
	InvalidRequest(String),

	/// Network error or timeout talking to the generation API
	#[error("Transport failure: {0}")]
	TransportFailure(String),

	#[error("API returned status {status}: {body}")]
	ApiStatusFailure { status: u16, body: String },

	#[error("No candidates found in the response")]
	EmptyCandidates,

	#[error("Error processing API response: {0}")]
	ResponseParseFailure(#[source] serde_json::Error),

	#[error("Failed after {attempts} attempts: {last}")]
	RetryExhausted {
		attempts: u32,
		#[source]
		last: Box<GenerationError>,
	},

	#[error("Interrupted while waiting to retry")]
	InterruptedDuringRetry,
}

impl GenerationError {
	/// Transport and status failures may succeed on a second try; nothing else will.
	pub fn is_retryable(&self) -> bool {
		matches!(self, Self::TransportFailure(_) | Self::ApiStatusFailure { .. })
	}

	/// Bad input, as opposed to an upstream or system failure.
	pub fn is_client_error(&self) -> bool {
		matches!(self, Self::InvalidTone { .. } | Self::InvalidRequest(_))
	}

	/// `{"error": .., "message": ..}` body for the HTTP boundary.
	pub fn to_response_body(&self) -> serde_json::Value {
		let summary = match self.is_client_error() {
			true => "Email generation failed",
			false => "Internal server error",
		};
		json!({
			"error": summary,
			"message": self.to_string(),
		})
	}
}

#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("{0} environment variable not set")]
	MissingVar(&'static str),

	#[error("Invalid generation API url {url:?}: {source}")]
	InvalidUrl {
		url: String,
		#[source]
		source: url::ParseError,
	},
}
