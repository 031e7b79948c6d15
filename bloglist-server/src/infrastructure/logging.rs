use anyhow::{Result, anyhow};
use tracing_subscriber::{EnvFilter, fmt};

/// Инициализирует глобальный subscriber.
///
/// `RUST_LOG` имеет приоритет над `level`; к `level` добавляются директивы,
/// приглушающие болтливые зависимости.
pub(crate) fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directives(level)))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .compact()
        .try_init()
        .map_err(|e| anyhow!("failed to init logging: {e}"))?;

    Ok(())
}

fn default_directives(level: &str) -> String {
    let level = level.trim();
    let level = if level.is_empty() { "info" } else { level };
    format!("{level},sqlx=warn,hyper=warn")
}
