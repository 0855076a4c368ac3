use super::sync_ui::SyncUI;
use crate::output::Output;
use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use serde_json::json;
use tracker_config::PathManager;
use tracker_models::MediaKind;

pub async fn run_sync(
    kind: MediaKind,
    username: Option<String>,
    source_name: &str,
    output: &Output,
) -> Result<()> {
    tracing::debug!("Sync command started");

    let paths = PathManager::default();
    let config = super::load_config(&paths)?;

    let username = username
        .or_else(|| config.anilist.as_ref().and_then(|a| a.default_username.clone()))
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| eyre!("No username given. Pass --username or set anilist.default_username in the config"))?;

    let orchestrator = super::orchestrator(&config, &paths, source_name)?;

    let ui = SyncUI::new(output.is_human() && !output.is_quiet());
    ui.set_message(format!("Syncing {} list for {} from {}...", kind, username, source_name));
    let result = orchestrator.sync_media_kind(kind, &username).await;
    ui.finish();

    let report = result.wrap_err("Sync operation failed")?;

    if output.is_human() {
        output.success(format!(
            "Sync completed: {} {} items synced for {} in {:.2?}",
            report.items_synced, report.kind, report.username, report.duration
        ));
    } else {
        output.json(&json!({
            "success": true,
            "source": report.source,
            "kind": report.kind,
            "username": report.username,
            "items_synced": report.items_synced,
            "duration_seconds": report.duration.as_secs_f64(),
        }));
    }

    Ok(())
}
