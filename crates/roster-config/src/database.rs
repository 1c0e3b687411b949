//! Database location configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Path to the libSQL database file. Empty means "use the per-user
    /// data directory default".
    #[serde(default)]
    pub path: String,
}

impl DatabaseConfig {
    /// Check whether an explicit database path was configured.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.path.is_empty()
    }

    /// Resolve the effective database path.
    ///
    /// Explicit configuration wins; otherwise falls back to
    /// `<data_dir>/roster/roster.db`, and finally to `./roster.db` on
    /// platforms with no data directory.
    #[must_use]
    pub fn resolve_path(&self) -> PathBuf {
        if self.is_configured() {
            return PathBuf::from(&self.path);
        }
        dirs::data_dir()
            .map_or_else(|| PathBuf::from("roster.db"), |d| d.join("roster").join("roster.db"))
    }
}
