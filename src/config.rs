use crate::error::ConfigError;
use reqwest::Url;

pub const API_URL_VAR: &str = "GEMINI_API_URL";
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";
pub const SIGNATURE_VAR: &str = "EMAIL_DEFAULT_SIGNATURE";

/// Process-wide settings, set once at startup and shared read-only by every generation.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
	pub api_url: Url,
	pub api_key: String,
	/// Appended to replies that ask for a signature. Empty means none.
	pub default_signature: String,
}

impl Config {
	pub fn new(api_url: &str, api_key: impl Into<String>, default_signature: impl Into<String>) -> Result<Self, ConfigError> {
		let api_url = Url::parse(api_url).map_err(|source| ConfigError::InvalidUrl {
			url: api_url.to_string(),
			source,
		})?;
		Ok(Self {
			api_url,
			api_key: api_key.into(),
			default_signature: default_signature.into(),
		})
	}

	pub fn from_env() -> Result<Self, ConfigError> {
		let api_url = std::env::var(API_URL_VAR).map_err(|_| ConfigError::MissingVar(API_URL_VAR))?;
		let api_key = std::env::var(API_KEY_VAR).map_err(|_| ConfigError::MissingVar(API_KEY_VAR))?;
		let signature = std::env::var(SIGNATURE_VAR).unwrap_or_default();
		Self::new(&api_url, api_key, signature)
	}

	/// Endpoint with the api key as the `key` query parameter.
	pub fn endpoint(&self) -> Url {
		let mut url = self.api_url.clone();
		url.query_pairs_mut().append_pair("key", &self.api_key);
		url
	}
}

impl std::fmt::Debug for Config {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Config")
			.field("api_url", &self.api_url.as_str())
			.field("api_key", &"<redacted>")
			.field("default_signature", &self.default_signature)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const URL: &str = "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent";

	#[test]
	fn endpoint_carries_key() {
		let config = Config::new(URL, "secret", "").unwrap();
		assert_eq!(config.endpoint().as_str(), format!("{URL}?key=secret"));
	}

	#[test]
	fn endpoint_keeps_existing_query() {
		let config = Config::new("http://localhost:8080/generate?alt=json", "k", "").unwrap();
		assert_eq!(config.endpoint().as_str(), "http://localhost:8080/generate?alt=json&key=k");
	}

	#[test]
	fn rejects_relative_url() {
		match Config::new("not a url", "k", "") {
			Err(ConfigError::InvalidUrl { url: bad, source }) => {
				assert_eq!(bad, "not a url");
				assert_eq!(source, url::ParseError::RelativeUrlWithoutBase);
			}
			other => panic!("expected InvalidUrl, got {other:?}"),
		}
	}

	#[test]
	fn debug_hides_key() {
		let config = Config::new(URL, "secret", "Best, Bot").unwrap();
		let dbg = format!("{config:?}");
		assert!(!dbg.contains("secret"));
		assert!(dbg.contains("Best, Bot"));
	}
}
