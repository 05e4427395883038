//! Minimum-interval spacing for calls into rate-limited upstream services.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;
use tokio::time::sleep;
use tracing::{debug, instrument};

/// Minimum spacing between successive PubMed E-utilities calls.
///
/// NCBI allows 3 requests/second without an API key; 350ms keeps a margin
/// under that even when clock resolution is coarse.
pub const PUBMED_MIN_INTERVAL: Duration = Duration::from_millis(350);

/// Upstream services that share the limiter's last-call map.
///
/// Only PubMed is actually throttled; PubChem's PUG REST quota regime is
/// per-IP volume based and does not need inter-call spacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    PubMed,
}

/// Enforces a minimum interval between consecutive calls per service.
///
/// `acquire` holds the internal lock across the sleep, so two concurrent
/// callers can never both observe a stale timestamp and proceed within the
/// same window. Callers serialize in lock-acquisition order; no fairness
/// beyond that is guaranteed.
#[derive(Clone)]
pub struct RateLimiter {
    last_call: Arc<Mutex<HashMap<Service, Instant>>>,
    min_interval: Duration,
}

impl RateLimiter {
    /// Create a limiter with the given minimum inter-call spacing.
    pub fn new(min_interval: Duration) -> Self {
        Self {
            last_call: Arc::new(Mutex::new(HashMap::new())),
            min_interval,
        }
    }

    /// Limiter with the default PubMed spacing.
    pub fn pubmed_default() -> Self {
        Self::new(PUBMED_MIN_INTERVAL)
    }

    /// The configured minimum spacing.
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Block until at least `min_interval` has elapsed since the previous
    /// acquire for `service`, then record the current time as the new
    /// last-call timestamp.
    #[instrument(skip(self))]
    pub async fn acquire(&self, service: Service) {
        let mut last_call = self.last_call.lock().await;

        if let Some(previous) = last_call.get(&service) {
            let elapsed = previous.elapsed();
            if elapsed < self.min_interval {
                let wait = self.min_interval - elapsed;
                debug!(wait_ms = wait.as_millis() as u64, "Waiting for rate limit");
                sleep(wait).await;
            }
        }

        last_call.insert(service, Instant::now());
    }
}
