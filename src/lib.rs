pub mod config;
pub mod error;
pub mod gemini;
pub mod llm;
pub mod mail;

pub use config::Config;
pub use error::{ConfigError, GenerationError};
pub use gemini::{HttpTransport, Transport};
pub use llm::{CancelToken, EmailGenerator, RetryPolicy};
pub use mail::{available_tones, GenerationRequest, Tone};
