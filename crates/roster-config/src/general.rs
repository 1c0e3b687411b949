//! General application configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Whether commands emit JSON instead of plain text by default.
    /// The `--json` CLI flag overrides this per invocation.
    #[serde(default)]
    pub json: bool,
}
