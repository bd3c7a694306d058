//! The reply pipeline: validate, build prompt, call the model with retry, clean up the output.

pub mod postprocess;
pub mod prompt;
pub mod retry;

pub use postprocess::post_process;
pub use prompt::build_prompt;
pub use retry::{run_with_retry, CancelToken, RetryPolicy};

use crate::config::Config;
use crate::error::GenerationError;
use crate::gemini::{self, GenerateContentRequest, HttpTransport, Transport};
use crate::mail::GenerationRequest;
use tracing::{debug, error, info, instrument};

/// Holds only read-only state, so one instance can serve any number of requests.
pub struct EmailGenerator<T: Transport> {
	transport: T,
	default_signature: String,
	retry: RetryPolicy,
}

impl EmailGenerator<HttpTransport> {
	pub fn new(config: &Config) -> Result<Self, GenerationError> {
		Ok(Self::with_transport(HttpTransport::new(config)?, config.default_signature.clone()))
	}
}

impl<T: Transport> EmailGenerator<T> {
	pub fn with_transport(transport: T, default_signature: impl Into<String>) -> Self {
		Self {
			transport,
			default_signature: default_signature.into(),
			retry: RetryPolicy::default(),
		}
	}

	pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
		self.retry = retry;
		self
	}

	pub fn generate_reply(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
		self.generate_reply_with_cancel(request, &CancelToken::new())
	}

	#[instrument(skip_all, fields(tone = request.tone.as_deref().unwrap_or("")))]
	pub fn generate_reply_with_cancel(&self, request: &GenerationRequest, cancel: &CancelToken) -> Result<String, GenerationError> {
		request.validate()?;

		let prompt = build_prompt(request);
		debug!(prompt_len = prompt.len());
		let envelope = GenerateContentRequest::new(&prompt);

		let raw = run_with_retry(&self.retry, cancel, |_| self.attempt(&envelope)).map_err(|e| {
			error!(error = %e, "email generation failed");
			e
		})?;
		info!(reply_len = raw.len(), "email generated");

		Ok(post_process(&raw, request, &self.default_signature))
	}

	fn attempt(&self, envelope: &GenerateContentRequest) -> Result<String, GenerationError> {
		let body = self.transport.send(envelope)?;
		gemini::extract_text(&body)
	}
}
