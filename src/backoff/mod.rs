// Copyright 2025 dentsusoken
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Bounded retry with exponential backoff on top of suppressed invocation.
//!
//! Each attempt runs through [`invoke_suppressed`]. A failed attempt `n`
//! that is not the last is followed by a delay of `backoff_unit * 2^n`, so
//! with the default one-second unit the delays run 2s, 4s, 8s and so on.
//! Intermediate failures are logged at the policy's failure level and never
//! propagate; the final outcome is returned as a [`RetryOutcome`].

mod sleeper;

#[cfg(test)]
pub use sleeper::MockSleeper;
pub use sleeper::{Sleeper, ThreadSleeper};

use crate::config::RetrySettings;
use crate::error::{QuietError, Result};
use crate::history::ErrorHost;
use crate::invoke::{OperationResult, invoke_suppressed};
use log::{Level, debug, log};
use std::fmt;
use std::time::Duration;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 4;
pub const DEFAULT_BACKOFF_UNIT: Duration = Duration::from_secs(1);

/// Position within a bounded sequence of attempts. `current` never exceeds `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttemptState {
    current: u32,
    max: u32,
}

impl AttemptState {
    pub fn new(max: u32) -> Result<Self> {
        if max == 0 {
            return Err(QuietError::InvalidConfig(
                "max_attempts must be at least 1".to_string(),
            ));
        }
        Ok(Self { current: 1, max })
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn is_final(&self) -> bool {
        self.current >= self.max
    }

    /// Moves to the next attempt. Returns false when already on the last one.
    pub fn advance(&mut self) -> bool {
        if self.is_final() {
            return false;
        }
        self.current += 1;
        true
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    backoff_unit: Duration,
    max_delay: Option<Duration>,
    failure_level: Level,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32) -> Result<Self> {
        AttemptState::new(max_attempts)?;
        Ok(Self {
            max_attempts,
            backoff_unit: DEFAULT_BACKOFF_UNIT,
            max_delay: None,
            failure_level: Level::Warn,
        })
    }

    pub fn from_config(settings: &RetrySettings) -> Result<Self> {
        let policy = Self::new(settings.max_attempts)?
            .with_backoff_unit(Duration::from_millis(settings.backoff_unit_ms))
            .with_failure_level(settings.failure_level()?);

        Ok(match settings.max_delay_ms {
            Some(ms) => policy.with_max_delay(Duration::from_millis(ms)),
            None => policy,
        })
    }

    pub fn with_backoff_unit(mut self, unit: Duration) -> Self {
        self.backoff_unit = unit;
        self
    }

    pub fn with_max_delay(mut self, cap: Duration) -> Self {
        self.max_delay = Some(cap);
        self
    }

    pub fn with_failure_level(mut self, level: Level) -> Self {
        self.failure_level = level;
        self
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn backoff_unit(&self) -> Duration {
        self.backoff_unit
    }

    pub fn max_delay(&self) -> Option<Duration> {
        self.max_delay
    }

    pub fn failure_level(&self) -> Level {
        self.failure_level
    }

    /// Delay inserted after failed attempt `attempt`, before the next one starts.
    pub fn delay_before_next(&self, attempt: u32) -> Duration {
        let factor = 2u32.checked_pow(attempt).unwrap_or(u32::MAX);
        let delay = self.backoff_unit.saturating_mul(factor);
        match self.max_delay {
            Some(cap) => delay.min(cap),
            None => delay,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            backoff_unit: DEFAULT_BACKOFF_UNIT,
            max_delay: None,
            failure_level: Level::Warn,
        }
    }
}

/// Final outcome of a retried operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryOutcome<T> {
    Succeeded { value: T, attempts: u32 },
    Failed { attempts: u32 },
}

impl<T> RetryOutcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, RetryOutcome::Succeeded { .. })
    }

    pub fn attempts(&self) -> u32 {
        match self {
            RetryOutcome::Succeeded { attempts, .. } | RetryOutcome::Failed { attempts } => {
                *attempts
            }
        }
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            RetryOutcome::Succeeded { value, .. } => Some(value),
            RetryOutcome::Failed { .. } => None,
        }
    }

    /// Integer status in the 0 = success, negative = failure convention.
    pub fn status_code(&self) -> i32 {
        if self.is_success() { 0 } else { -1 }
    }

    pub fn into_result(self) -> Result<T> {
        match self {
            RetryOutcome::Succeeded { value, .. } => Ok(value),
            RetryOutcome::Failed { attempts } => Err(QuietError::RetriesExhausted { attempts }),
        }
    }
}

/// Runs operations under a [`RetryPolicy`], sleeping through a [`Sleeper`].
#[derive(Debug, Clone)]
pub struct Retrier<S = ThreadSleeper> {
    policy: RetryPolicy,
    sleeper: S,
}

impl Retrier<ThreadSleeper> {
    pub fn new(policy: RetryPolicy) -> Self {
        Self::with_sleeper(policy, ThreadSleeper)
    }
}

impl Default for Retrier<ThreadSleeper> {
    fn default() -> Self {
        Self::new(RetryPolicy::default())
    }
}

impl<S: Sleeper> Retrier<S> {
    pub fn with_sleeper(policy: RetryPolicy, sleeper: S) -> Self {
        Self { policy, sleeper }
    }

    /// Invokes `operation` until it succeeds or the attempt budget is spent.
    pub fn run<T, E, F>(&self, host: &ErrorHost, mut operation: F) -> RetryOutcome<T>
    where
        F: FnMut(&ErrorHost) -> std::result::Result<T, E>,
        E: fmt::Display,
    {
        let level = self.policy.failure_level;
        let mut state = AttemptState {
            current: 1,
            max: self.policy.max_attempts,
        };

        loop {
            let attempt = state.current();
            match invoke_suppressed(host, &mut operation) {
                OperationResult::Success(value) => {
                    debug!("Operation succeeded on attempt {attempt} of {}", state.max());
                    return RetryOutcome::Succeeded {
                        value,
                        attempts: attempt,
                    };
                }
                OperationResult::Failure => {
                    let reason = last_error_message(host);
                    if state.is_final() {
                        log!(
                            level,
                            "Operation failed on attempt {attempt} of {}: {reason}. Giving up.",
                            state.max()
                        );
                        return RetryOutcome::Failed { attempts: attempt };
                    }

                    let delay = self.policy.delay_before_next(attempt);
                    log!(
                        level,
                        "Attempt {attempt} of {} failed: {reason}. Retrying in {delay:?}.",
                        state.max()
                    );
                    self.sleeper.sleep(delay);
                    state.advance();
                }
            }
        }
    }
}

fn last_error_message(host: &ErrorHost) -> String {
    host.capture_last_error()
        .record()
        .map(|record| record.to_string())
        .unwrap_or_else(|| "unknown error".to_string())
}

/// Retries `operation` up to `max_attempts` times with the default backoff.
pub fn invoke_with_retry<T, E, F>(
    host: &ErrorHost,
    max_attempts: u32,
    operation: F,
) -> Result<RetryOutcome<T>>
where
    F: FnMut(&ErrorHost) -> std::result::Result<T, E>,
    E: fmt::Display,
{
    let retrier = Retrier::new(RetryPolicy::new(max_attempts)?);
    Ok(retrier.run(host, operation))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::ErrorDisplay;
    use mockall::Sequence;
    use mockall::predicate::eq;
    use std::cell::Cell;

    fn quiet_sleeper() -> MockSleeper {
        let mut sleeper = MockSleeper::new();
        sleeper.expect_sleep().return_const(());
        sleeper
    }

    #[test]
    fn test_attempt_state_rejects_zero() {
        assert!(matches!(
            AttemptState::new(0),
            Err(QuietError::InvalidConfig(_))
        ));
        assert!(RetryPolicy::new(0).is_err());
    }

    #[test]
    fn test_attempt_state_advances_to_max() {
        let mut state = AttemptState::new(2).unwrap();
        assert_eq!(state.current(), 1);
        assert!(!state.is_final());

        assert!(state.advance());
        assert_eq!(state.current(), 2);
        assert!(state.is_final());

        assert!(!state.advance());
        assert_eq!(state.current(), 2);
    }

    #[test]
    fn test_delay_doubles_per_attempt() {
        let policy = RetryPolicy::new(5).unwrap();
        let delays: Vec<u64> = (1..=4)
            .map(|n| policy.delay_before_next(n).as_secs())
            .collect();
        assert_eq!(delays, vec![2, 4, 8, 16]);
    }

    #[test]
    fn test_delay_respects_unit_and_cap() {
        let policy = RetryPolicy::new(10)
            .unwrap()
            .with_backoff_unit(Duration::from_millis(10))
            .with_max_delay(Duration::from_millis(50));

        assert_eq!(policy.delay_before_next(1), Duration::from_millis(20));
        assert_eq!(policy.delay_before_next(2), Duration::from_millis(40));
        assert_eq!(policy.delay_before_next(3), Duration::from_millis(50));
    }

    #[test]
    fn test_delay_saturates_for_huge_attempt() {
        let policy = RetryPolicy::default();
        assert_eq!(
            policy.delay_before_next(64),
            Duration::from_secs(1).saturating_mul(u32::MAX)
        );
    }

    #[test]
    fn test_always_failing_runs_exactly_max_attempts() {
        let host = ErrorHost::new();
        let calls = Cell::new(0u32);
        let retrier = Retrier::with_sleeper(RetryPolicy::new(4).unwrap(), quiet_sleeper());

        let outcome = retrier.run(&host, |_| {
            calls.set(calls.get() + 1);
            Err::<(), _>("still broken")
        });

        assert_eq!(outcome, RetryOutcome::Failed { attempts: 4 });
        assert_eq!(calls.get(), 4);
        assert_eq!(outcome.status_code(), -1);
    }

    #[test]
    fn test_fails_twice_then_succeeds_with_backoff_sequence() {
        let host = ErrorHost::new();
        let calls = Cell::new(0u32);

        let mut sleeper = MockSleeper::new();
        let mut seq = Sequence::new();
        sleeper
            .expect_sleep()
            .with(eq(Duration::from_secs(2)))
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        sleeper
            .expect_sleep()
            .with(eq(Duration::from_secs(4)))
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());

        let retrier = Retrier::with_sleeper(RetryPolicy::new(3).unwrap(), sleeper);
        let outcome = retrier.run(&host, |_| {
            calls.set(calls.get() + 1);
            if calls.get() < 3 {
                Err("not yet")
            } else {
                Ok(42)
            }
        });

        assert_eq!(
            outcome,
            RetryOutcome::Succeeded {
                value: 42,
                attempts: 3
            }
        );
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn test_single_attempt_failure_never_sleeps() {
        let host = ErrorHost::new();
        let mut sleeper = MockSleeper::new();
        sleeper.expect_sleep().never();

        let retrier = Retrier::with_sleeper(RetryPolicy::new(1).unwrap(), sleeper);
        let outcome = retrier.run(&host, |_| Err::<(), _>("once"));

        assert!(!outcome.is_success());
        assert_eq!(outcome.attempts(), 1);
    }

    #[test]
    fn test_first_attempt_success_never_sleeps() {
        let host = ErrorHost::new();
        let mut sleeper = MockSleeper::new();
        sleeper.expect_sleep().never();

        let retrier = Retrier::with_sleeper(RetryPolicy::default(), sleeper);
        let outcome = retrier.run(&host, |_| Ok::<_, String>("ready"));

        assert_eq!(outcome.value(), Some(&"ready"));
        assert_eq!(outcome.attempts(), 1);
        assert_eq!(outcome.status_code(), 0);
    }

    #[test]
    fn test_recorded_error_triggers_retry() {
        let host = ErrorHost::new();
        let calls = Cell::new(0u32);
        let retrier = Retrier::with_sleeper(RetryPolicy::new(3).unwrap(), quiet_sleeper());

        let outcome = retrier.run(&host, |h| {
            calls.set(calls.get() + 1);
            if calls.get() == 1 {
                h.record("transient");
            }
            Ok::<_, String>(calls.get())
        });

        assert_eq!(outcome.value(), Some(&2));
    }

    #[test]
    fn test_display_restored_after_exhaustion() {
        let host = ErrorHost::new();
        let retrier = Retrier::with_sleeper(RetryPolicy::new(2).unwrap(), quiet_sleeper());

        retrier.run(&host, |_| Err::<(), _>("nope"));

        assert_eq!(host.display(), ErrorDisplay::Continue);
        assert_eq!(host.len(), 2);
    }

    #[test]
    fn test_into_result_maps_exhaustion() {
        let failed: RetryOutcome<()> = RetryOutcome::Failed { attempts: 3 };
        assert!(matches!(
            failed.into_result(),
            Err(QuietError::RetriesExhausted { attempts: 3 })
        ));

        let ok = RetryOutcome::Succeeded {
            value: "v",
            attempts: 1,
        };
        assert_eq!(ok.into_result().unwrap(), "v");
    }

    #[test]
    fn test_from_config_applies_settings() {
        let settings = RetrySettings {
            max_attempts: 6,
            backoff_unit_ms: 250,
            max_delay_ms: Some(1_000),
            failure_level: "debug".to_string(),
        };
        let policy = RetryPolicy::from_config(&settings).unwrap();

        assert_eq!(policy.max_attempts(), 6);
        assert_eq!(policy.backoff_unit(), Duration::from_millis(250));
        assert_eq!(policy.max_delay(), Some(Duration::from_secs(1)));
        assert_eq!(policy.failure_level(), Level::Debug);
    }

    #[test]
    fn test_invoke_with_retry_rejects_zero_attempts() {
        let host = ErrorHost::new();
        let result = invoke_with_retry(&host, 0, |_| Ok::<_, String>(()));
        assert!(matches!(result, Err(QuietError::InvalidConfig(_))));
    }

    #[test]
    fn test_invoke_with_retry_first_try() {
        let host = ErrorHost::new();
        let outcome = invoke_with_retry(&host, 3, |_| Ok::<_, String>(5)).unwrap();
        assert_eq!(outcome.into_result().unwrap(), 5);
    }
}
