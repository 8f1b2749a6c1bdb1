use super::SignalSource;
use crate::error::{GuardError, Result};
use crate::types::config::RetryPolicy;
use crate::types::signals::{ActivityCounters, LanguageEdge};
use chrono::{DateTime, Utc};
use std::thread;

/// Runs `op` until it succeeds, fails with a non-transient error, or the
/// attempt budget is spent. The pause doubles after every failed attempt.
pub fn with_retries<T, F>(policy: &RetryPolicy, what: &str, mut op: F) -> Result<T>
where
    F: FnMut() -> Result<T>,
{
    let attempts = policy.attempts.max(1);
    let mut delay = policy.backoff;
    let mut attempt = 1;
    loop {
        match op() {
            Ok(value) => return Ok(value),
            Err(err) if !err.is_transient() => return Err(err),
            Err(err) if attempt >= attempts => {
                tracing::error!(what, attempts, error = %err, "retries exhausted");
                return Err(GuardError::RetriesExhausted {
                    attempts,
                    last: err.to_string(),
                });
            }
            Err(err) => {
                tracing::warn!(what, attempt, error = %err, "transient failure, retrying");
                if !delay.is_zero() {
                    thread::sleep(delay);
                }
                delay = delay.saturating_mul(2);
                attempt += 1;
            }
        }
    }
}

/// Wraps a source so every fetch goes through [`with_retries`].
pub struct RetryingSource<S> {
    inner: S,
    policy: RetryPolicy,
}

impl<S: SignalSource> RetryingSource<S> {
    pub fn new(inner: S, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }
}

impl<S: SignalSource> SignalSource for RetryingSource<S> {
    fn account_created_at(&self, user: &str) -> Result<Option<DateTime<Utc>>> {
        with_retries(&self.policy, "account creation date", || {
            self.inner.account_created_at(user)
        })
    }

    fn language_edges(&self, user: &str) -> Result<Vec<LanguageEdge>> {
        with_retries(&self.policy, "language edges", || {
            self.inner.language_edges(user)
        })
    }

    fn activity_counters(&self, user: &str) -> Result<ActivityCounters> {
        with_retries(&self.policy, "activity counters", || {
            self.inner.activity_counters(user)
        })
    }

    fn is_privileged_member(&self, user: &str) -> Result<bool> {
        with_retries(&self.policy, "membership", || {
            self.inner.is_privileged_member(user)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::time::Duration;

    fn policy(attempts: u32) -> RetryPolicy {
        RetryPolicy {
            attempts,
            backoff: Duration::ZERO,
        }
    }

    #[test]
    fn succeeds_after_transient_failures() {
        let calls = Cell::new(0);
        let value = with_retries(&policy(3), "test", || {
            calls.set(calls.get() + 1);
            if calls.get() < 3 {
                Err(GuardError::Transport("timeout".to_string()))
            } else {
                Ok(7)
            }
        })
        .expect("third attempt should succeed");
        assert_eq!(value, 7);
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn stops_after_attempt_budget() {
        let calls = Cell::new(0);
        let err = with_retries(&policy(3), "test", || -> Result<()> {
            calls.set(calls.get() + 1);
            Err(GuardError::Transport("timeout".to_string()))
        })
        .expect_err("every attempt fails");
        assert_eq!(calls.get(), 3);
        assert!(matches!(
            err,
            GuardError::RetriesExhausted { attempts: 3, .. }
        ));
    }

    #[test]
    fn does_not_retry_permanent_errors() {
        let calls = Cell::new(0);
        let err = with_retries(&policy(5), "test", || -> Result<()> {
            calls.set(calls.get() + 1);
            Err(GuardError::UserNotFound("ghost".to_string()))
        })
        .expect_err("lookup fails");
        assert_eq!(calls.get(), 1);
        assert!(matches!(err, GuardError::UserNotFound(_)));
    }

    struct FlakySource {
        failures_left: Cell<u32>,
    }

    impl SignalSource for FlakySource {
        fn account_created_at(&self, _user: &str) -> Result<Option<DateTime<Utc>>> {
            Ok(None)
        }

        fn language_edges(&self, _user: &str) -> Result<Vec<LanguageEdge>> {
            Ok(Vec::new())
        }

        fn activity_counters(&self, _user: &str) -> Result<ActivityCounters> {
            if self.failures_left.get() > 0 {
                self.failures_left.set(self.failures_left.get() - 1);
                return Err(GuardError::Transport("rate limited".to_string()));
            }
            Ok(ActivityCounters {
                total_commits: 1,
                ..ActivityCounters::default()
            })
        }

        fn is_privileged_member(&self, _user: &str) -> Result<bool> {
            Ok(false)
        }
    }

    #[test]
    fn retrying_source_recovers_from_flaky_upstream() {
        let source = RetryingSource::new(
            FlakySource {
                failures_left: Cell::new(2),
            },
            policy(3),
        );
        let counters = source
            .activity_counters("alice")
            .expect("third attempt should succeed");
        assert_eq!(counters.total_commits, 1);
    }
}
