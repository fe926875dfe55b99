//! # cro-gateway
//!
//! The analysis gateway: the one capability that produces new report records
//! and retrieves existing ones.
//!
//! Two interchangeable strategies implement [`AnalysisGateway`]:
//! - [`RemoteGateway`] delegates every operation to the analysis service over
//!   HTTP and keeps nothing locally.
//! - [`SimulatedGateway`] validates, waits an artificial delay, occasionally
//!   fails, and otherwise synthesizes a record and persists it into a
//!   [`cro_store::ReportStore`].
//!
//! The strategy is chosen once, at configuration time, by
//! [`gateway_from_config`]. Callers only ever see `dyn AnalysisGateway`.

mod error;
mod http;
pub mod remote;
pub mod simulated;
pub mod templates;

pub use error::GatewayError;
pub use remote::RemoteGateway;
pub use simulated::{Delay, NoDelay, SimulatedGateway, TokioDelay};

use std::sync::Arc;

use async_trait::async_trait;
use cro_config::CroConfig;
use cro_core::{ReportError, ReportRecord};
use cro_store::ReportStore;

/// Produce and retrieve report records.
///
/// Every operation is one asynchronous unit of work that suspends only at its
/// I/O boundary. There is no cancellation: a caller that loses interest simply
/// drops the future's result.
#[async_trait]
pub trait AnalysisGateway: Send + Sync {
    /// Analyze `url` and return the new record.
    ///
    /// Not idempotent: every call yields a distinct record with a new ID.
    ///
    /// # Errors
    ///
    /// [`ReportError::Validation`] for an empty or non-`http(s)` URL, raised
    /// before any work starts. Otherwise [`ReportError::Transport`],
    /// [`ReportError::Remote`] or [`ReportError::ServiceUnavailable`]
    /// depending on the strategy.
    async fn submit(&self, url: &str) -> Result<ReportRecord, ReportError>;

    /// Recent records, newest first, at most `MAX_REPORTS` long.
    ///
    /// # Errors
    ///
    /// [`ReportError::Transport`] or [`ReportError::Remote`] (remote strategy).
    async fn fetch_recent(&self) -> Result<Vec<ReportRecord>, ReportError>;

    /// One record by ID.
    ///
    /// # Errors
    ///
    /// [`ReportError::NotFound`] if the strategy does not know `id`;
    /// [`ReportError::Validation`] for a blank ID; transport/remote errors for
    /// the remote strategy.
    async fn fetch_by_id(&self, id: &str) -> Result<ReportRecord, ReportError>;

    /// Delete every retained record and return how many were removed.
    ///
    /// # Errors
    ///
    /// [`ReportError::Validation`] for the remote strategy, which owns no
    /// local history; [`ReportError::ServiceUnavailable`] if the local
    /// history could not be deleted.
    async fn clear_history(&self) -> Result<usize, ReportError>;

    /// Strategy name for diagnostics (`"remote"` or `"simulated"`).
    fn name(&self) -> &'static str;
}

/// Select and build the gateway described by `config`.
///
/// A non-empty `remote.base_url` selects [`RemoteGateway`]; otherwise a
/// [`SimulatedGateway`] over the file-backed store at `store.path` is built.
///
/// # Errors
///
/// Returns [`GatewayError`] if the configuration is invalid or the HTTP
/// client cannot be built.
pub fn gateway_from_config(config: &CroConfig) -> Result<Box<dyn AnalysisGateway>, GatewayError> {
    config.validate()?;

    if config.remote.is_configured() {
        tracing::debug!(base_url = %config.remote.normalized_base_url(), "using remote analysis gateway");
        let gateway = RemoteGateway::from_config(&config.remote, config.store.max_reports)?;
        return Ok(Box::new(gateway));
    }

    let slot_path = config.store.slot_path();
    tracing::debug!(slot = %slot_path.display(), "no backend configured; using simulated analysis gateway");
    let store = Arc::new(ReportStore::open_file(slot_path, config.store.max_reports));
    Ok(Box::new(SimulatedGateway::new(store, config.simulation.clone())?))
}
