use std::time::Duration;

use crate::domain::errors::AppError;

/// Bounds for automatic retries of an aggregation cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { max_attempts: 3, base_delay_ms: 1_000 }
    }
}

impl RetryPolicy {
    /// Delay before retry number `attempt` (1-based): `2^(attempt-1) * base`.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(20);
        Duration::from_millis(self.base_delay_ms.saturating_mul(1u64 << exponent))
    }
}

/// What the controller does after a failed fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum RetryDecision {
    Retry { attempt: u32, delay: Duration },
    Exhausted,
    /// Cancellation or a non-retryable error; nothing is scheduled.
    GiveUp,
}

/// Per-cycle retry bookkeeping. Created when a cycle starts, dropped on success or exhaustion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryState {
    policy: RetryPolicy,
    attempt_count: u32,
}

impl RetryState {
    pub fn new(policy: RetryPolicy) -> Self {
        Self { policy, attempt_count: 0 }
    }

    pub fn attempt_count(&self) -> u32 {
        self.attempt_count
    }

    pub fn max_attempts(&self) -> u32 {
        self.policy.max_attempts
    }

    pub fn on_failure(&mut self, error: &AppError) -> RetryDecision {
        if !error.is_retryable() {
            return RetryDecision::GiveUp;
        }
        if self.attempt_count >= self.policy.max_attempts {
            return RetryDecision::Exhausted;
        }
        self.attempt_count += 1;
        RetryDecision::Retry {
            attempt: self.attempt_count,
            delay: self.policy.delay_for(self.attempt_count),
        }
    }

    pub fn reset(&mut self) {
        self.attempt_count = 0;
    }
}

/// Observable phase of a fetch cycle.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FetchPhase {
    #[default]
    Idle,
    Fetching { attempt: u32, max_attempts: u32 },
    Failed { attempt: u32, error: AppError },
    Retrying { attempt: u32, max_attempts: u32, delay: Duration },
    Success,
    Exhausted(AppError),
    Cancelled,
}

impl FetchPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, FetchPhase::Success | FetchPhase::Exhausted(_) | FetchPhase::Cancelled)
    }

    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            FetchPhase::Fetching { .. } | FetchPhase::Failed { .. } | FetchPhase::Retrying { .. }
        )
    }

    /// "attempt N of M" text while retrying.
    pub fn retry_indicator(&self) -> Option<String> {
        match self {
            FetchPhase::Retrying { attempt, max_attempts, .. } => {
                Some(format!("Retrying (attempt {attempt} of {max_attempts})"))
            }
            FetchPhase::Fetching { attempt, max_attempts } if *attempt > 0 => {
                Some(format!("Retrying (attempt {attempt} of {max_attempts})"))
            }
            _ => None,
        }
    }

    /// Error the banner should display; cancellation never shows.
    pub fn banner_error(&self) -> Option<&AppError> {
        match self {
            FetchPhase::Exhausted(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timeout() -> AppError {
        AppError::NetworkTimeout { after_ms: 30_000 }
    }

    #[test]
    fn delays_double() {
        let policy = RetryPolicy::default();
        let delays: Vec<u64> = (1..=3).map(|a| policy.delay_for(a).as_millis() as u64).collect();
        assert_eq!(delays, vec![1_000, 2_000, 4_000]);
    }

    #[test]
    fn exhausts_after_max_attempts() {
        let mut state = RetryState::new(RetryPolicy::default());
        for expected in 1..=3 {
            match state.on_failure(&timeout()) {
                RetryDecision::Retry { attempt, .. } => assert_eq!(attempt, expected),
                other => panic!("unexpected {other:?}"),
            }
        }
        assert_eq!(state.on_failure(&timeout()), RetryDecision::Exhausted);
    }

    #[test]
    fn cancellation_gives_up_without_counting() {
        let mut state = RetryState::new(RetryPolicy::default());
        assert_eq!(state.on_failure(&AppError::Cancelled), RetryDecision::GiveUp);
        assert_eq!(state.attempt_count(), 0);
    }

    #[test]
    fn banner_only_when_exhausted() {
        assert!(FetchPhase::Cancelled.banner_error().is_none());
        assert!(FetchPhase::Failed { attempt: 0, error: timeout() }.banner_error().is_none());
        assert_eq!(FetchPhase::Exhausted(timeout()).banner_error(), Some(&timeout()));
    }

    #[test]
    fn indicator_text() {
        let phase = FetchPhase::Retrying {
            attempt: 2,
            max_attempts: 3,
            delay: Duration::from_millis(2_000),
        };
        assert_eq!(phase.retry_indicator().as_deref(), Some("Retrying (attempt 2 of 3)"));
    }

    #[test]
    fn retry_fetch_keeps_attempt_total() {
        let retry = FetchPhase::Fetching { attempt: 3, max_attempts: 3 };
        assert_eq!(retry.retry_indicator().as_deref(), Some("Retrying (attempt 3 of 3)"));
        assert!(FetchPhase::Fetching { attempt: 0, max_attempts: 3 }.retry_indicator().is_none());
    }
}
