use std::future::Future;

use crate::domain::{
    cancellation::CancellationToken,
    errors::{AppError, AppResult},
    logging::{LogComponent, get_logger},
    retry::{FetchPhase, RetryDecision, RetryPolicy, RetryState},
};
use crate::infrastructure::scheduler::Scheduler;
use crate::{log_error, log_warn};

/// Drives one fetch cycle with exponential backoff.
///
/// Every phase change is reported to the observer. Retries are strictly
/// sequential and the backoff sleep is bound to the cycle's token, so a
/// cancelled view never sees another attempt or an error banner.
pub struct RetryController<Sch> {
    policy: RetryPolicy,
    scheduler: Sch,
}

impl<Sch: Scheduler> RetryController<Sch> {
    pub fn new(policy: RetryPolicy, scheduler: Sch) -> Self {
        Self { policy, scheduler }
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// `operation` receives the retry number (0 for the initial fetch).
    pub async fn run<T, F, Fut>(
        &self,
        token: &CancellationToken,
        mut operation: F,
        mut observe: impl FnMut(FetchPhase),
    ) -> AppResult<T>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = AppResult<T>>,
    {
        let mut state = RetryState::new(self.policy);

        loop {
            if token.is_cancelled() {
                return Self::cancelled(&mut observe);
            }

            let attempt = state.attempt_count();
            observe(FetchPhase::Fetching { attempt, max_attempts: state.max_attempts() });

            let error = match operation(attempt).await {
                Ok(value) => {
                    observe(FetchPhase::Success);
                    return Ok(value);
                }
                Err(error) => error,
            };

            if error.is_cancelled() || token.is_cancelled() {
                return Self::cancelled(&mut observe);
            }

            observe(FetchPhase::Failed { attempt, error: error.clone() });

            match state.on_failure(&error) {
                RetryDecision::Retry { attempt, delay } => {
                    log_warn!(
                        LogComponent::Application("RetryController"),
                        "Attempt failed ({error}); retry {attempt}/{} in {}ms",
                        state.max_attempts(),
                        delay.as_millis()
                    );
                    observe(FetchPhase::Retrying { attempt, max_attempts: state.max_attempts(), delay });
                    if token.run(self.scheduler.sleep(delay)).await.is_err() {
                        return Self::cancelled(&mut observe);
                    }
                }
                RetryDecision::Exhausted | RetryDecision::GiveUp => {
                    log_error!(
                        LogComponent::Application("RetryController"),
                        "Giving up after {} retries: {error}",
                        state.attempt_count()
                    );
                    observe(FetchPhase::Exhausted(error.clone()));
                    return Err(error);
                }
            }
        }
    }

    fn cancelled<T>(observe: &mut impl FnMut(FetchPhase)) -> AppResult<T> {
        get_logger().debug(LogComponent::Application("RetryController"), "Cycle cancelled");
        observe(FetchPhase::Cancelled);
        Err(AppError::Cancelled)
    }
}
