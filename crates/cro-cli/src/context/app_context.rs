use anyhow::Context;
use cro_config::CroConfig;
use cro_gateway::AnalysisGateway;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub config: CroConfig,
    pub gateway: Box<dyn AnalysisGateway>,
}

impl AppContext {
    /// Build the configured gateway.
    pub fn init(config: CroConfig) -> anyhow::Result<Self> {
        let gateway = cro_gateway::gateway_from_config(&config)
            .context("failed to initialize analysis gateway")?;
        tracing::debug!(strategy = gateway.name(), "analysis gateway ready");
        Ok(Self { config, gateway })
    }

    #[must_use]
    pub const fn max_reports(&self) -> usize {
        self.config.store.max_reports
    }
}
