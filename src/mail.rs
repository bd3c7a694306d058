use crate::error::GenerationError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const MIN_CONTENT_CHARS: usize = 2;
pub const MAX_NAME_CHARS: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
	Professional,
	Friendly,
	Apologetic,
	Enthusiastic,
	Neutral,
}
impl Tone {
	pub const ALL: [Tone; 5] = [Tone::Professional, Tone::Friendly, Tone::Apologetic, Tone::Enthusiastic, Tone::Neutral];

	pub fn as_str(&self) -> &'static str {
		match self {
			Tone::Professional => "professional",
			Tone::Friendly => "friendly",
			Tone::Apologetic => "apologetic",
			Tone::Enthusiastic => "enthusiastic",
			Tone::Neutral => "neutral",
		}
	}
}
impl FromStr for Tone {
	type Err = GenerationError;

	/// Case-insensitive exact match, no trimming.
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Tone::ALL
			.into_iter()
			.find(|t| t.as_str().eq_ignore_ascii_case(s))
			.ok_or_else(|| GenerationError::InvalidTone { tone: s.to_string() })
	}
}
impl std::fmt::Display for Tone {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.as_str())
	}
}

pub fn available_tones() -> Vec<&'static str> {
	Tone::ALL.iter().map(|t| t.as_str()).collect()
}

fn yes() -> bool {
	true
}

/// An email to reply to, plus how the reply should look.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
	#[serde(alias = "emailContent")]
	pub content: String,
	#[serde(default)]
	pub tone: Option<String>,
	#[serde(default)]
	pub sender_name: Option<String>,
	#[serde(default)]
	pub recipient_name: Option<String>,
	#[serde(default = "yes")]
	pub include_signature: bool,
	#[serde(default = "yes")]
	pub formal_greeting: bool,
	/// Target word count. Advisory, the model is only asked to aim for it.
	#[serde(default)]
	pub desired_length: Option<u32>,
}
impl GenerationRequest {
	pub fn new<S: Into<String>>(content: S) -> Self {
		Self {
			content: content.into(),
			tone: None,
			sender_name: None,
			recipient_name: None,
			include_signature: true,
			formal_greeting: true,
			desired_length: None,
		}
	}

	/// Rejects a tone outside [`Tone::ALL`]. Absent or empty tone is fine.
	pub fn validate(&self) -> Result<(), GenerationError> {
		match non_empty(&self.tone) {
			Some(tone) => tone.parse::<Tone>().map(|_| ()),
			None => Ok(()),
		}
	}

	/// Field bounds the HTTP boundary enforces before handing the request over.
	pub fn check_bounds(&self) -> Result<(), GenerationError> {
		if self.content.trim().is_empty() {
			return Err(GenerationError::InvalidRequest("Email content cannot be blank".to_string()));
		}
		if self.content.chars().count() < MIN_CONTENT_CHARS {
			return Err(GenerationError::InvalidRequest(format!("Email content must be at least {MIN_CONTENT_CHARS} characters")));
		}
		for (field, value) in [("Sender name", &self.sender_name), ("Recipient name", &self.recipient_name)] {
			if value.as_ref().is_some_and(|v| v.chars().count() > MAX_NAME_CHARS) {
				return Err(GenerationError::InvalidRequest(format!("{field} must be less than {MAX_NAME_CHARS} characters")));
			}
		}
		if self.desired_length == Some(0) {
			return Err(GenerationError::InvalidRequest("Desired length must be a positive number of words".to_string()));
		}
		Ok(())
	}
}

pub(crate) fn non_empty(field: &Option<String>) -> Option<&str> {
	field.as_deref().filter(|s| !s.is_empty())
}
