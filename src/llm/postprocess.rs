use crate::mail::GenerationRequest;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
	static ref TRIPLE_ASTERISK: Regex = Regex::new(r"\*\*\*.*?\*\*\*").unwrap();
	// also eats legitimate bracketed text such as citations
	static ref SQUARE_BRACKETS: Regex = Regex::new(r"\[.*?\]").unwrap();
}

/// Turns raw model output into the final reply.
///
/// The signature goes on first, so the strip passes below apply to it as well.
pub fn post_process(raw: &str, request: &GenerationRequest, signature: &str) -> String {
	let mut email = raw.to_string();
	if request.include_signature && !signature.is_empty() {
		email.push_str("\n\n");
		email.push_str(signature);
	}
	let email = strip_emphasis(&email);
	let email = strip_brackets(&email);
	email.trim().to_string()
}

/// Drops `***...***` spans, delimiters included. Does not cross lines.
pub fn strip_emphasis(text: &str) -> String {
	TRIPLE_ASTERISK.replace_all(text, "").into_owned()
}

/// Drops `[...]` spans, brackets included. Does not cross lines.
pub fn strip_brackets(text: &str) -> String {
	SQUARE_BRACKETS.replace_all(text, "").into_owned()
}
