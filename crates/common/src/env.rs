//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use tracing::warn;

/// Warn when the static assets directory is missing. Pages still render
/// without it, only the stylesheet 404s.
pub async fn ensure_env(static_dir: &str) -> anyhow::Result<()> {
    match tokio::fs::metadata(static_dir).await {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(anyhow::anyhow!("{static_dir} exists but is not a directory")),
        Err(_) => {
            warn!(%static_dir, "static assets directory not found; stylesheet will 404");
            Ok(())
        }
    }
}
