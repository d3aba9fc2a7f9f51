use anyhow::Context;

/// Load `.env` (if any) and the layered configuration.
pub fn load_config() -> anyhow::Result<gt_config::GhostConfig> {
    dotenvy::dotenv().ok();
    let config = gt_config::GhostConfig::load().context("failed to load configuration")?;
    config.gemini.validate().context("invalid [gemini] configuration")?;
    Ok(config)
}
