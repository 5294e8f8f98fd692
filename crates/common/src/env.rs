//! Environment/runtime helpers
//!
//! Sanity checks to ensure the on-disk locations the service writes to exist at startup.

use std::path::Path;

use tracing::{info, warn};

/// Extract the file path from a `sqlite:` URL; `None` for in-memory databases.
pub fn sqlite_file_path(url: &str) -> Option<&str> {
    let rest = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next().unwrap_or(rest);
    if path.is_empty() || path == ":memory:" {
        return None;
    }
    Some(path)
}

/// Ensure the parent directory of a file-backed SQLite database exists.
pub async fn ensure_db_dir(database_url: &str) -> anyhow::Result<()> {
    let Some(path) = sqlite_file_path(database_url) else {
        warn!(%database_url, "in-memory database configured; records are lost on shutdown");
        return Ok(());
    };
    let Some(parent) = Path::new(path).parent() else { return Ok(()) };
    if parent.as_os_str().is_empty() {
        return Ok(());
    }
    tokio::fs::create_dir_all(parent)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", parent.display()))?;
    info!(dir = %parent.display(), "database directory ready");
    Ok(())
}
