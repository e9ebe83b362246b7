use crate::utils::error::ApiError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Retry knobs, embedded in the client configuration.
///
/// `max_attempts` counts the initial attempt; `max_elapsed_ms` caps the
/// whole operation including backoff sleeps. Whichever cap trips first
/// turns the next retry into a fatal failure.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RetrySettings {
    pub max_attempts: u32,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
    pub max_elapsed_ms: u64,
    pub jitter_pct: u8,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_attempts: 4,
            base_delay_ms: 1000,
            max_delay_ms: 30_000,
            max_elapsed_ms: 15_000,
            jitter_pct: 20,
        }
    }
}

/// Outcome of evaluating one failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Sleep for the given delay, then attempt again.
    Backoff(Duration),
    /// Stop; the last error is surfaced to the caller unchanged.
    Fatal,
}

/// Exponential backoff delay for the given retry number (0-indexed),
/// capped at `max_delay_ms`, with uniform jitter applied from the
/// caller-supplied random bits.
pub fn backoff_delay(settings: &RetrySettings, retry_count: u32, rng_bits: u64) -> Duration {
    let multiplier = 2_u64.saturating_pow(retry_count);
    let exp_ms = settings.base_delay_ms.saturating_mul(multiplier);
    let capped = Duration::from_millis(exp_ms.min(settings.max_delay_ms));
    apply_jitter(capped, settings.jitter_pct, rng_bits)
}

/// Uniform jitter in `[delay - pct%, delay + pct%]`.
fn apply_jitter(delay: Duration, jitter_pct: u8, rng_bits: u64) -> Duration {
    if jitter_pct == 0 || delay.is_zero() {
        return delay;
    }
    let delay_ns = delay.as_nanos() as u64;
    let jitter_ns = delay_ns.saturating_mul(jitter_pct as u64) / 100;
    if jitter_ns == 0 {
        return delay;
    }
    let span = jitter_ns.saturating_mul(2);
    let offset = rng_bits % span.saturating_add(1);
    if offset < jitter_ns {
        Duration::from_nanos(delay_ns.saturating_sub(jitter_ns - offset))
    } else {
        Duration::from_nanos(delay_ns.saturating_add(offset - jitter_ns))
    }
}

/// Decide whether a failed attempt is retried.
///
/// `attempts_made` is the number of attempts already executed (>= 1);
/// `elapsed` is simulated wall-clock supplied by the executor, which keeps
/// this function pure and lets tests drive time directly. A retry-after
/// hint from the service is authoritative and is not capped by
/// `max_delay_ms`.
pub fn evaluate(
    settings: &RetrySettings,
    error: &ApiError,
    idempotent: bool,
    attempts_made: u32,
    elapsed: Duration,
    rng_bits: u64,
) -> RetryDecision {
    if !error.is_retryable() {
        return RetryDecision::Fatal;
    }
    if !idempotent && !error.is_retryable_for_mutation() {
        return RetryDecision::Fatal;
    }
    if attempts_made >= settings.max_attempts {
        return RetryDecision::Fatal;
    }

    let delay = match error.retry_after() {
        Some(hint) => hint,
        None => backoff_delay(settings, attempts_made.saturating_sub(1), rng_bits),
    };

    if elapsed + delay > Duration::from_millis(settings.max_elapsed_ms) {
        return RetryDecision::Fatal;
    }

    RetryDecision::Backoff(delay)
}

/// Per-operation random source for jitter, seeded fresh for every logical
/// operation (xorshift64*; the bits feed `apply_jitter`).
#[derive(Debug)]
pub(crate) struct OpRng(u64);

impl OpRng {
    pub(crate) fn seeded() -> Self {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.subsec_nanos() as u64 ^ d.as_secs())
            .unwrap_or(0x9E37_79B9_7F4A_7C15);
        Self(nanos | 1)
    }

    pub(crate) fn next_bits(&mut self) -> u64 {
        // xorshift64* step
        let mut x = self.0;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.0 = x;
        x.wrapping_mul(0x2545_F491_4F6C_DD1D)
    }
}
