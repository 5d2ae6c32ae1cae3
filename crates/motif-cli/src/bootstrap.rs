use anyhow::Context;
use motif_config::MotifConfig;

/// Load layered configuration, picking up a `.env` in the working directory.
pub fn load_config() -> anyhow::Result<MotifConfig> {
    MotifConfig::load_with_dotenv().context("failed to load motif configuration")
}
