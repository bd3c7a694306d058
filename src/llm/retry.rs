use crate::error::GenerationError;
use std::sync::{Arc, Condvar, Mutex};
use std::time::Duration;
use tracing::{info, warn};

pub const MAX_RETRIES: u32 = 3;
pub const RETRY_DELAY: Duration = Duration::from_millis(1000);

/// Fixed-delay retry: no backoff growth, no jitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
	/// Attempts after the first one.
	pub max_retries: u32,
	pub delay: Duration,
}
impl Default for RetryPolicy {
	fn default() -> Self {
		Self {
			max_retries: MAX_RETRIES,
			delay: RETRY_DELAY,
		}
	}
}
impl RetryPolicy {
	pub fn total_attempts(&self) -> u32 {
		self.max_retries.saturating_add(1)
	}
}

/// Cancellation flag that can also be waited on with a timeout.
///
/// Clones share the flag, so one copy can be handed to a signal handler.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
	inner: Arc<(Mutex<bool>, Condvar)>,
}
impl CancelToken {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn cancel(&self) {
		let (flag, cvar) = &*self.inner;
		*flag.lock().unwrap_or_else(|poisoned| poisoned.into_inner()) = true;
		cvar.notify_all();
	}

	pub fn is_cancelled(&self) -> bool {
		*self.inner.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
	}

	/// Sleeps for `timeout` unless cancelled first. Returns `true` if cancelled.
	pub fn wait_timeout(&self, timeout: Duration) -> bool {
		let (flag, cvar) = &*self.inner;
		let guard = flag.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
		match cvar.wait_timeout_while(guard, timeout, |cancelled| !*cancelled) {
			Ok((cancelled, _)) => *cancelled,
			Err(poisoned) => *poisoned.into_inner().0,
		}
	}
}

/// Runs `attempt` until it succeeds, fails with a non-retryable error, or the policy is used up.
///
/// `attempt` receives the zero-based attempt number.
pub fn run_with_retry<T, F>(policy: &RetryPolicy, cancel: &CancelToken, mut attempt: F) -> Result<T, GenerationError>
where
	F: FnMut(u32) -> Result<T, GenerationError>,
{
	let mut n = 0;
	loop {
		if cancel.is_cancelled() {
			return Err(GenerationError::InterruptedDuringRetry);
		}
		let err = match attempt(n) {
			Ok(v) => return Ok(v),
			Err(e) if !e.is_retryable() => return Err(e),
			Err(e) => e,
		};
		warn!(attempt = n + 1, error = %err, "generation attempt failed");

		if n >= policy.max_retries {
			return Err(GenerationError::RetryExhausted {
				attempts: policy.total_attempts(),
				last: Box::new(err),
			});
		}
		n += 1;
		info!("Retrying attempt {}/{}", n, policy.max_retries);
		if cancel.wait_timeout(policy.delay) {
			return Err(GenerationError::InterruptedDuringRetry);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::time::Instant;

	fn quick() -> RetryPolicy {
		RetryPolicy {
			max_retries: 3,
			delay: Duration::ZERO,
		}
	}

	fn unavailable() -> GenerationError {
		GenerationError::ApiStatusFailure {
			status: 503,
			body: "overloaded".into(),
		}
	}

	#[test]
	fn default_policy() {
		let p = RetryPolicy::default();
		assert_eq!(p.max_retries, 3);
		assert_eq!(p.total_attempts(), 4);
		assert_eq!(p.delay, Duration::from_millis(1000));
	}

	#[test]
	fn total_attempts_saturates() {
		let p = RetryPolicy {
			max_retries: u32::MAX,
			delay: Duration::ZERO,
		};
		assert_eq!(p.total_attempts(), u32::MAX);
	}

	#[test]
	fn succeeds_after_failures() {
		let mut calls = 0;
		let r = run_with_retry(&quick(), &CancelToken::new(), |n| {
			assert_eq!(n, calls);
			calls += 1;
			if calls < 3 {
				Err(unavailable())
			} else {
				Ok("done")
			}
		});
		assert_eq!(r.unwrap(), "done");
		assert_eq!(calls, 3);
	}

	#[test]
	fn exhausts_after_four_attempts() {
		let mut calls = 0;
		let r: Result<(), _> = run_with_retry(&quick(), &CancelToken::new(), |_| {
			calls += 1;
			Err(GenerationError::TransportFailure("connection refused".into()))
		});
		assert_eq!(calls, 4);
		match r {
			Err(GenerationError::RetryExhausted { attempts, last }) => {
				assert_eq!(attempts, 4);
				assert!(matches!(*last, GenerationError::TransportFailure(_)));
			}
			other => panic!("expected RetryExhausted, got {other:?}"),
		}
	}

	#[test]
	fn non_retryable_stops_immediately() {
		let mut calls = 0;
		let r: Result<(), _> = run_with_retry(&quick(), &CancelToken::new(), |_| {
			calls += 1;
			Err(GenerationError::EmptyCandidates)
		});
		assert_eq!(calls, 1);
		assert!(matches!(r, Err(GenerationError::EmptyCandidates)));
	}

	#[test]
	fn zero_retries_means_one_attempt() {
		let policy = RetryPolicy {
			max_retries: 0,
			delay: Duration::ZERO,
		};
		let mut calls = 0;
		let r: Result<(), _> = run_with_retry(&policy, &CancelToken::new(), |_| {
			calls += 1;
			Err(unavailable())
		});
		assert_eq!(calls, 1);
		assert!(matches!(r, Err(GenerationError::RetryExhausted { attempts: 1, .. })));
	}

	#[test]
	fn cancel_interrupts_the_wait() {
		let policy = RetryPolicy {
			max_retries: 3,
			delay: Duration::from_secs(30),
		};
		let cancel = CancelToken::new();
		let mut canceller = None;

		let started = Instant::now();
		let mut calls = 0;
		let r: Result<(), _> = run_with_retry(&policy, &cancel, |_| {
			calls += 1;
			let remote = cancel.clone();
			canceller = Some(std::thread::spawn(move || {
				std::thread::sleep(Duration::from_millis(50));
				remote.cancel();
			}));
			Err(unavailable())
		});
		canceller.expect("attempted once").join().unwrap();

		assert!(matches!(r, Err(GenerationError::InterruptedDuringRetry)));
		assert_eq!(calls, 1);
		assert!(started.elapsed() < Duration::from_secs(10));
	}

	#[test]
	fn already_cancelled_makes_no_attempt() {
		let cancel = CancelToken::new();
		cancel.cancel();
		let mut calls = 0;
		let r: Result<(), _> = run_with_retry(&quick(), &cancel, |_| {
			calls += 1;
			Ok(())
		});
		assert_eq!(calls, 0);
		assert!(matches!(r, Err(GenerationError::InterruptedDuringRetry)));
	}

	#[test]
	fn wait_without_cancel_times_out() {
		let cancel = CancelToken::new();
		assert!(!cancel.wait_timeout(Duration::from_millis(5)));
		cancel.cancel();
		assert!(cancel.is_cancelled());
		assert!(cancel.wait_timeout(Duration::from_secs(30)));
	}
}
