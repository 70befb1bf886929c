use anyhow::Context;
use whatif_config::WhatIfConfig;

/// Load `.env` (if any) and the layered configuration.
pub fn load_config() -> anyhow::Result<WhatIfConfig> {
    WhatIfConfig::load_with_dotenv().context("failed to load whatif configuration")
}
