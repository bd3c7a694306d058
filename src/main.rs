use anyhow::{Context, Result};
use email_writer::{available_tones, CancelToken, Config, EmailGenerator, GenerationError, GenerationRequest};
use std::io::Read;
use tracing::info;
use tracing_subscriber::EnvFilter;

pub static TMP_DIR: &str = "/tmp/email_writer";

/// Usage:
///   email_writer tones
///   email_writer [request.json]   (reads stdin when no file is given)
fn main() -> Result<()> {
	std::fs::create_dir_all(TMP_DIR).with_context(|| format!("Failed to create {TMP_DIR}"))?;
	let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(TMP_DIR, "email_writer.log"));
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
		.with_writer(writer)
		.with_ansi(false)
		.init();

	let arg = std::env::args().nth(1);
	if arg.as_deref() == Some("tones") {
		println!("{}", serde_json::json!({ "tones": available_tones() }));
		return Ok(());
	}

	let raw = match arg.as_deref() {
		Some(path) if path != "-" => std::fs::read_to_string(path).with_context(|| format!("Failed to read request from {path}"))?,
		_ => {
			let mut s = String::new();
			std::io::stdin().read_to_string(&mut s).context("Failed to read request from stdin")?;
			s
		}
	};
	let request: GenerationRequest = serde_json::from_str(&raw).context("Request is not a valid email request")?;

	let config = Config::from_env()?;
	info!(?config);
	let generator = EmailGenerator::new(&config)?;

	let cancel = CancelToken::new();
	let on_interrupt = cancel.clone();
	ctrlc::set_handler(move || on_interrupt.cancel()).context("Failed to install Ctrl+C handler")?;

	let result = request.check_bounds().and_then(|_| generator.generate_reply_with_cancel(&request, &cancel));
	match render(result) {
		Ok(reply) => {
			println!("{reply}");
			Ok(())
		}
		Err(body) => {
			eprintln!("{body}");
			drop(guard);
			std::process::exit(1);
		}
	}
}

/// Reply text, or the error body the HTTP boundary would send back.
fn render(result: Result<String, GenerationError>) -> Result<String, String> {
	result.map_err(|e| e.to_response_body().to_string())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn render_passes_reply_through() {
		assert_eq!(render(Ok("Hello.".to_string())), Ok("Hello.".to_string()));
	}

	#[test]
	fn render_reports_error_once_as_body() {
		let body = render(Err(GenerationError::EmptyCandidates)).unwrap_err();
		let value: serde_json::Value = serde_json::from_str(&body).unwrap();
		assert_eq!(value["error"], "Internal server error");
		assert_eq!(value["message"], "No candidates found in the response");
		assert_eq!(body.matches("No candidates found").count(), 1);
	}
}
