use crate::output::{styled_table, Output};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{Cell, Color};
use tracker_config::PathManager;
use tracker_core::Reconciler;
use tracker_models::{MediaKind, MediaStatus, StoredRecord};

fn status_color(status: MediaStatus) -> Color {
    match status {
        MediaStatus::Watching | MediaStatus::Reading => Color::Green,
        MediaStatus::Completed => Color::Blue,
        MediaStatus::Dropped => Color::Red,
        MediaStatus::Paused => Color::Yellow,
        MediaStatus::PlanToWatch | MediaStatus::PlanToRead => Color::Reset,
    }
}

/// "5/12 ep", or "5/? ep" when the total is unknown
fn progress_label(stored: &StoredRecord) -> String {
    let record = &stored.record;
    let total = if record.progress_total == 0 {
        "?".to_string()
    } else {
        record.progress_total.to_string()
    };
    format!("{}/{} {}", record.progress_current, total, record.progress_unit)
}

pub fn run_list(kind: MediaKind, output: &Output) -> Result<()> {
    let paths = PathManager::default();
    let config = super::load_config(&paths)?;
    let reconciler = Reconciler::new(super::open_store(&config, &paths)?);

    let records = reconciler
        .list_media_kind(kind)
        .map_err(|e| eyre!("Failed to list {}: {}", kind, e))?;

    if !output.is_human() {
        output.json(&records);
        return Ok(());
    }

    if records.is_empty() {
        output.info(format!("No {} tracked yet. Run 'everytracker sync {}' to import a list.", kind, kind));
        return Ok(());
    }

    let mut table = styled_table(&["ID", "Title", "Status", "Progress", "Updated"]);
    for stored in &records {
        table.add_row(vec![
            Cell::new(stored.record.external_id),
            Cell::new(&stored.record.title),
            Cell::new(stored.record.status).fg(status_color(stored.record.status)),
            Cell::new(progress_label(stored)),
            Cell::new(stored.updated_at.format("%Y-%m-%d %H:%M")),
        ]);
    }
    output.table(&table);
    output.info(format!("{} {} tracked", records.len(), kind));
    Ok(())
}
