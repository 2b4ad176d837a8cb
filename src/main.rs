use anyhow::{Result, anyhow};

use aviary::{AppConfig, LoggingConfig, init_logging};

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    aviary::run(AppConfig::default()).map_err(|e| {
        log::error!("startup failed: {e}");
        anyhow!("aviary could not start: {e}")
    })
}
