use std::future::Future;
use std::time::Duration;
use tracing::{info, warn};

/// Backoff policy for connection attempts
#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
    /// Attempts after the first one
    pub max_retries: u32,
    pub initial_delay: Duration,
    /// Upper bound for a single wait
    pub max_delay: Duration,
    pub backoff_multiplier: f64,
    /// Scale each wait to a random 50-100% of its nominal value
    pub use_jitter: bool,
}

impl RetryConfig {
    /// 3 retries from 100ms, doubling up to 5s, with jitter
    pub fn new() -> Self {
        Self::default()
    }

    /// Preset for connecting at process start, when the database may still be booting
    ///
    /// 5 retries starting at 500ms, capped at 5s between attempts.
    pub fn startup() -> Self {
        Self::default()
            .with_max_retries(5)
            .with_initial_delay(Duration::from_millis(500))
    }

    pub fn with_backoff_multiplier(mut self, multiplier: f64) -> Self {
        self.backoff_multiplier = multiplier;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    pub fn without_jitter(mut self) -> Self {
        self.use_jitter = false;
        self
    }

    /// Nominal wait before retry number `retry` (0-based), before jitter
    pub fn nominal_delay(&self, retry: u32) -> Duration {
        let factor = self.backoff_multiplier.max(1.0).powi(retry.min(i32::MAX as u32) as i32);
        let nanos = (self.initial_delay.as_nanos() as f64 * factor).min(self.max_delay.as_nanos() as f64);
        Duration::from_nanos(nanos as u64).min(self.max_delay)
    }

    fn delay(&self, retry: u32) -> Duration {
        let nominal = self.nominal_delay(retry);
        if self.use_jitter {
            nominal.mul_f64(jitter_factor())
        } else {
            nominal
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(5),
            backoff_multiplier: 2.0,
            use_jitter: true,
        }
    }
}

/// Pseudo-random factor in `[0.5, 1.0)`
fn jitter_factor() -> f64 {
    use std::collections::hash_map::RandomState;
    use std::hash::BuildHasher;

    let sample = RandomState::new().hash_one(std::time::SystemTime::now()) % 500;
    0.5 + sample as f64 / 1000.0
}

/// Run `operation` until it succeeds or the retries in `config` are spent
///
/// `target` names what is being attempted in the logs (e.g. "MongoDB").
/// The last error is returned unchanged.
///
/// # Example
/// ```ignore
/// use database::common::{RetryConfig, retry_with_backoff};
///
/// let client = retry_with_backoff("MongoDB", || connect_from_config(&config), &RetryConfig::startup()).await?;
/// ```
pub async fn retry_with_backoff<F, Fut, T, E>(
    target: &str,
    mut operation: F,
    config: &RetryConfig,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut retries = 0;

    loop {
        match operation().await {
            Ok(value) => {
                if retries > 0 {
                    info!(target_name = target, retries, "Connected after retrying");
                }
                return Ok(value);
            }
            Err(e) if retries >= config.max_retries => {
                warn!(target_name = target, attempts = retries + 1, error = %e, "Giving up");
                return Err(e);
            }
            Err(e) => {
                let wait = config.delay(retries);
                retries += 1;
                warn!(
                    target_name = target,
                    attempt = retries,
                    max_retries = config.max_retries,
                    error = %e,
                    "Attempt failed, retrying in {:?}",
                    wait
                );
                tokio::time::sleep(wait).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn quick() -> RetryConfig {
        RetryConfig::new()
            .with_initial_delay(Duration::from_millis(5))
            .without_jitter()
    }

    #[tokio::test]
    async fn test_first_success_is_not_retried() {
        let calls = AtomicU32::new(0);

        let result = retry_with_backoff(
            "test",
            || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok::<_, String>("up")
            },
            &quick(),
        )
        .await;

        assert_eq!(result, Ok("up"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_recovers_after_transient_failures() {
        let calls = AtomicU32::new(0);

        let result = retry_with_backoff(
            "test",
            || async {
                match calls.fetch_add(1, Ordering::SeqCst) {
                    0 | 1 => Err("refused".to_string()),
                    _ => Ok("up"),
                }
            },
            &quick(),
        )
        .await;

        assert_eq!(result, Ok("up"));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_returns_last_error_when_retries_run_out() {
        let calls = AtomicU32::new(0);

        let result = retry_with_backoff(
            "test",
            || async {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                Err::<(), _>(format!("refused #{n}"))
            },
            &quick().with_max_retries(2),
        )
        .await;

        assert_eq!(result, Err("refused #2".to_string()));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_nominal_delay_grows_and_is_capped() {
        let config = RetryConfig::new()
            .with_initial_delay(Duration::from_millis(100))
            .with_max_delay(Duration::from_millis(350));

        assert_eq!(config.nominal_delay(0), Duration::from_millis(100));
        assert_eq!(config.nominal_delay(1), Duration::from_millis(200));
        assert_eq!(config.nominal_delay(2), Duration::from_millis(350));
        assert_eq!(config.nominal_delay(40), Duration::from_millis(350));
    }

    #[test]
    fn test_jitter_stays_within_half_to_full() {
        let config = RetryConfig::new().with_initial_delay(Duration::from_secs(1));
        for _ in 0..20 {
            let wait = config.delay(0);
            assert!(wait >= Duration::from_millis(500), "{wait:?}");
            assert!(wait <= Duration::from_secs(1), "{wait:?}");
        }
    }

    #[test]
    fn test_startup_preset() {
        let config = RetryConfig::startup();
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.initial_delay, Duration::from_millis(500));
        assert_eq!(config.max_delay, Duration::from_secs(5));
        assert!(config.use_jitter);
    }
}
