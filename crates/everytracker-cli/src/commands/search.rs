use super::sync_ui::SyncUI;
use crate::output::{styled_table, Output};
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use comfy_table::Cell;
use tracker_config::PathManager;
use tracker_models::MediaKind;

pub async fn run_search(
    kind: MediaKind,
    query: &str,
    limit: Option<u32>,
    source_name: &str,
    output: &Output,
) -> Result<()> {
    let paths = PathManager::default();
    let config = super::load_config(&paths)?;
    let limit = limit
        .or_else(|| config.anilist.as_ref().map(|a| a.search_limit))
        .unwrap_or(tracker_server::DEFAULT_SEARCH_COUNT);

    let orchestrator = super::orchestrator(&config, &paths, source_name)?;

    let ui = SyncUI::new(output.is_human() && !output.is_quiet());
    ui.set_message(format!("Searching {} for \"{}\"...", source_name, query));
    let result = orchestrator.search_media_kind(kind, query, limit).await;
    ui.finish();

    let results = result.wrap_err("Search failed")?;

    if !output.is_human() {
        output.json(&results);
        return Ok(());
    }

    if results.is_empty() {
        output.warn(format!("No {} found for \"{}\"", kind, query));
        return Ok(());
    }

    let mut table = styled_table(&["ID", "Title", "Unit"]);
    for result in &results {
        table.add_row(vec![
            Cell::new(result.external_id),
            Cell::new(&result.title),
            Cell::new(result.progress_unit),
        ]);
    }
    output.table(&table);
    Ok(())
}
