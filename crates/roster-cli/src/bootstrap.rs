use std::path::PathBuf;

use anyhow::Context;
use roster_config::RosterConfig;
use roster_db::service::RosterService;

use crate::cli::GlobalFlags;

pub fn load_config() -> anyhow::Result<RosterConfig> {
    RosterConfig::load_with_dotenv().context("failed to load configuration")
}

/// Open the service over the configured store. `--db` beats config; the
/// default lands in the per-user data directory. `--attach` opens without
/// migrating, for stores whose schema is owned by another deployment.
pub async fn open_service(
    flags: &GlobalFlags,
    config: &RosterConfig,
) -> anyhow::Result<RosterService> {
    let path = flags
        .db
        .clone()
        .map_or_else(|| config.database.resolve_path(), PathBuf::from);

    if path.to_str() != Some(":memory:")
        && let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty())
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create database directory {}", parent.display()))?;
    }

    let path = path
        .to_str()
        .context("database path is not valid UTF-8")?;

    tracing::debug!("opening database at {path} (attach={})", flags.attach);
    let service = if flags.attach {
        RosterService::attach_local(path).await
    } else {
        RosterService::new_local(path).await
    };
    service.with_context(|| format!("failed to open database at {path}"))
}
