//! Simulated strategy: the local stand-in for an analysis backend.
//!
//! `submit` validates, waits the configured delay, then either fails with
//! [`ReportError::ServiceUnavailable`] (with the configured probability) or
//! synthesizes a record from [`crate::templates`], persists it into the
//! [`ReportStore`] and returns it. Reads go straight to the store.
//!
//! Store access is synchronous file I/O, so it runs on tokio's blocking pool.
//!
//! The delay and the random source are injected so tests run instantly and
//! deterministically.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use cro_config::{ConfigError, SimulationConfig};
use cro_core::validate::{check_report_id, parse_report_url};
use cro_core::{ReportError, ReportRecord};
use cro_store::{Durability, ReportStore};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::AnalysisGateway;
use crate::templates;

const UNAVAILABLE_MESSAGE: &str = "Analysis service temporarily unavailable. Please try again.";
const CLEAR_FAILED_MESSAGE: &str = "Report history could not be deleted.";

/// Artificial processing time.
#[async_trait]
pub trait Delay: Send + Sync {
    async fn wait(&self, duration: Duration);
}

/// Real delay on the tokio timer.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioDelay;

#[async_trait]
impl Delay for TokioDelay {
    async fn wait(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Returns immediately.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoDelay;

#[async_trait]
impl Delay for NoDelay {
    async fn wait(&self, _duration: Duration) {}
}

pub struct SimulatedGateway {
    store: Arc<ReportStore>,
    config: SimulationConfig,
    delay: Box<dyn Delay>,
    rng: Mutex<StdRng>,
}

impl std::fmt::Debug for SimulatedGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulatedGateway")
            .field("store", &self.store)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl SimulatedGateway {
    /// Gateway with a real timer and an OS-seeded random source.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if a probability or confidence
    /// bound is outside `[0, 1]` or the bounds are inverted.
    pub fn new(store: Arc<ReportStore>, config: SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            store,
            config,
            delay: Box::new(TokioDelay),
            rng: Mutex::new(StdRng::from_os_rng()),
        })
    }

    #[must_use]
    pub fn with_delay(mut self, delay: impl Delay + 'static) -> Self {
        self.delay = Box::new(delay);
        self
    }

    /// Replace the random source with a seeded one.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    #[must_use]
    pub fn store(&self) -> &Arc<ReportStore> {
        &self.store
    }

    /// Draw the failure roll and the confidence score in one lock.
    fn roll(&self) -> (bool, f64) {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        let fails = rng.random::<f64>() < self.config.failure_probability;
        let span = self.config.confidence_max - self.config.confidence_min;
        let confidence = span.mul_add(rng.random::<f64>(), self.config.confidence_min);
        drop(rng);
        (fails, confidence)
    }

    /// Run `op` against the store on the blocking pool.
    async fn with_store<T, F>(&self, op: F) -> Result<T, ReportError>
    where
        F: FnOnce(&ReportStore) -> T + Send + 'static,
        T: Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || op(&store))
            .await
            .map_err(|error| {
                tracing::warn!(%error, "report store task did not complete");
                ReportError::ServiceUnavailable(UNAVAILABLE_MESSAGE.into())
            })
    }
}

#[async_trait]
impl AnalysisGateway for SimulatedGateway {
    async fn submit(&self, url: &str) -> Result<ReportRecord, ReportError> {
        let url = parse_report_url(url)?;

        self.delay.wait(self.config.delay()).await;

        let (fails, confidence) = self.roll();
        if fails {
            tracing::info!(url = %url, "simulated analysis backend failed");
            return Err(ReportError::ServiceUnavailable(UNAVAILABLE_MESSAGE.into()));
        }

        let insights = templates::insights_for(&url);
        let record = self
            .with_store(move |store| {
                let created_at = store.stamp(Utc::now());
                let record =
                    ReportRecord::new(url.as_str(), created_at, Some(confidence), insights)?;
                if !store.insert(&record).is_durable() {
                    tracing::debug!(id = %record.id, "report returned without being persisted");
                }
                Ok::<_, ReportError>(record)
            })
            .await??;

        tracing::info!(id = %record.id, url = %record.url, confidence, "simulated report created");
        Ok(record)
    }

    async fn fetch_recent(&self) -> Result<Vec<ReportRecord>, ReportError> {
        self.with_store(ReportStore::list).await
    }

    async fn fetch_by_id(&self, id: &str) -> Result<ReportRecord, ReportError> {
        let id = check_report_id(id)?.to_string();
        let lookup = id.clone();
        self.with_store(move |store| store.get(&lookup))
            .await?
            .ok_or_else(|| ReportError::not_found(id))
    }

    async fn clear_history(&self) -> Result<usize, ReportError> {
        let (cleared, durability) = self
            .with_store(|store| (store.len(), store.clear()))
            .await?;
        if durability == Durability::NonDurable {
            return Err(ReportError::ServiceUnavailable(CLEAR_FAILED_MESSAGE.into()));
        }
        tracing::info!(cleared, "report history cleared");
        Ok(cleared)
    }

    fn name(&self) -> &'static str {
        "simulated"
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use cro_core::report::keys;
    use cro_store::MemorySlot;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[derive(Clone, Default)]
    struct CountingDelay(Arc<AtomicUsize>);

    #[async_trait]
    impl Delay for CountingDelay {
        async fn wait(&self, _duration: Duration) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn config(failure_probability: f64) -> SimulationConfig {
        SimulationConfig {
            delay_ms: 3000,
            failure_probability,
            ..SimulationConfig::default()
        }
    }

    fn gateway(failure_probability: f64) -> SimulatedGateway {
        SimulatedGateway::new(Arc::new(ReportStore::in_memory(5)), config(failure_probability))
            .expect("valid simulation config")
            .with_delay(NoDelay)
            .with_seed(7)
    }

    #[tokio::test]
    async fn invalid_url_fails_before_delay_and_store() {
        let delay = CountingDelay::default();
        let gw = gateway(0.0).with_delay(delay.clone());

        for bad in ["", "   ", "ftp://example.com/file", "example.com/no-scheme"] {
            let err = gw.submit(bad).await.unwrap_err();
            assert!(matches!(err, ReportError::Validation(_)), "{bad:?}");
        }
        assert_eq!(delay.0.load(Ordering::SeqCst), 0);
        assert!(gw.store().is_empty());
    }

    #[tokio::test]
    async fn valid_submit_waits_once_and_persists() {
        let delay = CountingDelay::default();
        let gw = gateway(0.0).with_delay(delay.clone());

        let record = gw.submit("https://shop.example.com/item").await.unwrap();
        assert_eq!(delay.0.load(Ordering::SeqCst), 1);
        assert_eq!(gw.store().list(), vec![record.clone()]);
        assert_eq!(record.url, "https://shop.example.com/item");
        assert!(record.insights.contains_key(keys::IMPROVEMENTS));
    }

    #[tokio::test]
    async fn certain_failure_is_service_unavailable_and_stores_nothing() {
        let gw = gateway(1.0);
        let err = gw.submit("https://example.com").await.unwrap_err();
        assert!(matches!(err, ReportError::ServiceUnavailable(_)));
        assert!(err.is_retryable());
        assert!(gw.store().is_empty());
    }

    #[tokio::test]
    async fn confidence_is_drawn_from_configured_range() {
        let gw = gateway(0.0);
        for _ in 0..20 {
            let record = gw.submit("https://example.com/p").await.unwrap();
            let c = record.confidence.unwrap();
            assert!((0.70..=0.95).contains(&c), "{c}");
        }
    }

    #[tokio::test]
    async fn repeated_submissions_are_distinct_records() {
        let gw = gateway(0.0);
        let a = gw.submit("https://example.com/p").await.unwrap();
        let b = gw.submit("https://example.com/p").await.unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(a.insights, b.insights);
        assert!(b.created_at >= a.created_at);

        let recent = gw.fetch_recent().await.unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].id, b.id);
    }

    #[tokio::test]
    async fn history_is_bounded_by_store_capacity() {
        let gw = gateway(0.0);
        let mut ids = HashSet::new();
        for _ in 0..8 {
            ids.insert(gw.submit("https://example.com/p").await.unwrap().id);
        }
        assert_eq!(ids.len(), 8);
        assert_eq!(gw.fetch_recent().await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn fetch_by_id_finds_stored_and_reports_missing() {
        let gw = gateway(0.0);
        let record = gw.submit("https://example.com/p").await.unwrap();

        assert_eq!(gw.fetch_by_id(&record.id).await.unwrap(), record);
        assert_eq!(
            gw.fetch_by_id("rpt-000000000000").await.unwrap_err(),
            ReportError::not_found("rpt-000000000000")
        );
        assert!(matches!(
            gw.fetch_by_id(" ").await.unwrap_err(),
            ReportError::Validation(_)
        ));
    }

    #[tokio::test]
    async fn same_seed_same_outcomes() {
        let a = gateway(0.5);
        let b = gateway(0.5);
        for _ in 0..10 {
            let ra = a.submit("https://example.com").await.map(|r| r.confidence);
            let rb = b.submit("https://example.com").await.map(|r| r.confidence);
            assert_eq!(ra, rb);
        }
    }

    #[rstest]
    #[case::probability_above_one(1.5, 0.7, 0.95, "simulation.failure_probability")]
    #[case::negative_minimum(0.1, -0.1, 0.95, "simulation.confidence_min")]
    #[case::maximum_above_one(0.1, 0.7, 1.2, "simulation.confidence_max")]
    #[case::inverted_bounds(0.1, 0.9, 0.8, "simulation.confidence_min")]
    fn out_of_range_config_is_rejected_at_construction(
        #[case] failure_probability: f64,
        #[case] confidence_min: f64,
        #[case] confidence_max: f64,
        #[case] expected_field: &str,
    ) {
        let config = SimulationConfig {
            failure_probability,
            confidence_min,
            confidence_max,
            ..SimulationConfig::default()
        };
        let err = SimulatedGateway::new(Arc::new(ReportStore::in_memory(5)), config).unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidValue { ref field, .. } if field == expected_field),
            "{err:?}"
        );
    }

    #[tokio::test]
    async fn clear_history_empties_store_and_counts_records() {
        let gw = gateway(0.0);
        for _ in 0..3 {
            gw.submit("https://example.com/p").await.unwrap();
        }

        assert_eq!(gw.clear_history().await.unwrap(), 3);
        assert!(gw.fetch_recent().await.unwrap().is_empty());
        assert_eq!(gw.clear_history().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn clear_history_surfaces_failed_delete() {
        let slot = Arc::new(MemorySlot::new());
        let store = Arc::new(ReportStore::new(Arc::clone(&slot), 5));
        let gw = SimulatedGateway::new(Arc::clone(&store), config(0.0))
            .unwrap()
            .with_delay(NoDelay);
        gw.submit("https://example.com/p").await.unwrap();

        slot.set_fail_writes(true);
        let err = gw.clear_history().await.unwrap_err();
        assert_eq!(err, ReportError::ServiceUnavailable(CLEAR_FAILED_MESSAGE.into()));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn concurrent_submits_persist_through_blocking_pool() {
        let gw = Arc::new(gateway(0.0));
        let tasks: Vec<_> = (0..4)
            .map(|i| {
                let gw = Arc::clone(&gw);
                tokio::spawn(async move { gw.submit(&format!("https://example.com/{i}")).await })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let recent = gw.fetch_recent().await.unwrap();
        assert_eq!(recent.len(), 4);
        assert!(recent.windows(2).all(|w| w[0].created_at >= w[1].created_at));
    }
}
