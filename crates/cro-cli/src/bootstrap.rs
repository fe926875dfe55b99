use anyhow::Context;
use cro_config::CroConfig;

/// Load `.env` (searching parent directories), then the layered config.
pub fn load_config() -> anyhow::Result<CroConfig> {
    CroConfig::load_with_dotenv().context("failed to load cro configuration")
}
