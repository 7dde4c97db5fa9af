use std::{future::Future, time::Duration};

use crate::ClientError;

/// Attempts made by [`crate::Client::delete_budget`].
pub const DELETE_ATTEMPTS: u32 = 3;
/// Extra attempts made by the retrying budget create and update calls.
pub const MUTATION_RETRIES: u32 = 2;
pub const DEFAULT_BACKOFF_STEP: Duration = Duration::from_millis(1_000);

/// How a failed attempt is retried.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RetryPolicy {
    /// Retries 5xx answers only, sleeping `step * attempt` before the next
    /// attempt.
    ServerErrorBackoff { max_attempts: u32, step: Duration },
    /// Retries timeouts and network failures at once, up to `max_retries`
    /// extra attempts.
    ImmediateOnTransport { max_retries: u32 },
}

impl RetryPolicy {
    pub fn max_attempts(&self) -> u32 {
        match *self {
            Self::ServerErrorBackoff { max_attempts, .. } => max_attempts,
            Self::ImmediateOnTransport { max_retries } => max_retries.saturating_add(1),
        }
    }

    /// Delay before the next attempt, or `None` when `err` from attempt
    /// `attempt` (1-based) must be surfaced.
    pub fn next_delay(&self, attempt: u32, err: &ClientError) -> Option<Duration> {
        match *self {
            Self::ServerErrorBackoff { max_attempts, step } => {
                (err.is_server_error() && attempt < max_attempts).then(|| step * attempt)
            }
            Self::ImmediateOnTransport { max_retries } => {
                (err.is_transport() && attempt <= max_retries).then_some(Duration::ZERO)
            }
        }
    }

    /// Runs `op` until it succeeds or the policy gives up. `op` receives the
    /// 1-based attempt number.
    pub async fn run<T, F, Fut>(&self, label: &str, mut op: F) -> Result<T, ClientError>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, ClientError>>,
    {
        let max_attempts = self.max_attempts();
        let mut last_error = None;

        for attempt in 1..=max_attempts {
            let err = match op(attempt).await {
                Ok(value) => return Ok(value),
                Err(err) => err,
            };
            match self.next_delay(attempt, &err) {
                Some(delay) => {
                    tracing::warn!(
                        "{label}: attempt {attempt}/{max_attempts} failed ({err}), retrying in {}ms",
                        delay.as_millis()
                    );
                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                    last_error = Some(err);
                }
                None => return Err(err),
            }
        }

        Err(last_error.unwrap_or_else(|| {
            ClientError::Unknown(format!("{label}: exhausted retries"))
        }))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicU32, Ordering},
    };

    use tokio::time::Instant;

    use super::*;

    fn rejected(status: u16) -> ClientError {
        ClientError::RemoteRejected {
            status,
            message: "nope".to_string(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn backoff_grows_linearly() {
        let policy = RetryPolicy::ServerErrorBackoff {
            max_attempts: 3,
            step: DEFAULT_BACKOFF_STEP,
        };
        let started = Instant::now();
        let res = policy
            .run("delete", |attempt| async move {
                if attempt < 3 { Err(rejected(503)) } else { Ok(attempt) }
            })
            .await;

        assert_eq!(res.unwrap(), 3);
        assert_eq!(started.elapsed(), Duration::from_millis(3_000));
    }

    #[tokio::test(start_paused = true)]
    async fn backoff_surfaces_last_server_error() {
        let policy = RetryPolicy::ServerErrorBackoff {
            max_attempts: 2,
            step: DEFAULT_BACKOFF_STEP,
        };
        let res: Result<(), _> = policy
            .run("delete", |attempt| async move { Err(rejected(500 + attempt as u16)) })
            .await;
        assert!(matches!(res, Err(ClientError::RemoteRejected { status: 502, .. })));
    }

    #[tokio::test(start_paused = true)]
    async fn backoff_stops_on_client_errors() {
        let calls = Arc::new(AtomicU32::new(0));
        let policy = RetryPolicy::ServerErrorBackoff {
            max_attempts: 3,
            step: DEFAULT_BACKOFF_STEP,
        };
        for err in [ClientError::NotFound, ClientError::SessionExpired, rejected(409)] {
            calls.store(0, Ordering::SeqCst);
            let mut err = Some(err);
            let res: Result<(), _> = policy
                .run("delete", |_| {
                    calls.fetch_add(1, Ordering::SeqCst);
                    let err = err.take().unwrap_or(ClientError::TimedOut);
                    async move { Err(err) }
                })
                .await;
            assert!(res.is_err());
            assert_eq!(calls.load(Ordering::SeqCst), 1);
        }
    }

    #[tokio::test]
    async fn zero_attempts_reports_exhaustion() {
        let policy = RetryPolicy::ServerErrorBackoff {
            max_attempts: 0,
            step: DEFAULT_BACKOFF_STEP,
        };
        let res: Result<(), _> = policy.run("delete", |_| async { Ok(()) }).await;
        assert!(matches!(res, Err(ClientError::Unknown(msg)) if msg.contains("exhausted")));
    }

    #[tokio::test(start_paused = true)]
    async fn transport_failures_retry_immediately() {
        let policy = RetryPolicy::ImmediateOnTransport {
            max_retries: MUTATION_RETRIES,
        };
        let started = Instant::now();
        let res = policy
            .run("create", |attempt| async move {
                match attempt {
                    1 => Err(ClientError::TimedOut),
                    2 => Err(ClientError::Unreachable("refused".to_string())),
                    _ => Ok("created"),
                }
            })
            .await;
        assert_eq!(res.unwrap(), "created");
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[test]
    fn transport_policy_ignores_rejections() {
        let policy = RetryPolicy::ImmediateOnTransport { max_retries: 2 };
        assert_eq!(policy.max_attempts(), 3);
        assert_eq!(policy.next_delay(1, &rejected(400)), None);
        assert_eq!(policy.next_delay(1, &rejected(503)), None);
        assert_eq!(policy.next_delay(2, &ClientError::TimedOut), Some(Duration::ZERO));
        assert_eq!(policy.next_delay(3, &ClientError::TimedOut), None);
    }
}
