use crate::output::{styled_table, Output};
use crate::ConfigCommands;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::Cell;
use owo_colors::OwoColorize;
use serde_json::json;
use tracker_config::{Config, PathManager};

pub fn run_config(cmd: ConfigCommands, output: &Output) -> Result<()> {
    let paths = PathManager::default();
    match cmd {
        ConfigCommands::Show => show_config(&paths, output),
        ConfigCommands::Init { force } => init_config(&paths, force, output),
        ConfigCommands::Path => {
            let config_file = paths.config_file();
            if output.is_human() {
                println!("{}", config_file.display());
            } else {
                output.json(&json!({ "config_file": config_file }));
            }
            Ok(())
        }
    }
}

fn check_mark(enabled: bool) -> String {
    if enabled {
        "✓".green().to_string()
    } else {
        "✗".red().to_string()
    }
}

fn show_config(paths: &PathManager, output: &Output) -> Result<()> {
    let config_file = paths.config_file();
    let config = super::load_config(paths)?;

    if !output.is_human() {
        output.json(&json!({
            "config_file": config_file,
            "config_file_exists": config_file.exists(),
            "database": config.database_path(paths),
            "config": config,
        }));
        return Ok(());
    }

    if !config_file.exists() {
        output.warn(format!(
            "Configuration file not found at {}; showing defaults. Run 'everytracker config init' to create it.",
            config_file.display()
        ));
    }

    let mut server_table = styled_table(&["Server", ""]);
    server_table.add_row(vec![Cell::new("Config File"), Cell::new(config_file.display())]);
    server_table.add_row(vec![Cell::new("Host"), Cell::new(&config.server.host)]);
    server_table.add_row(vec![Cell::new("Port"), Cell::new(config.server.port)]);
    server_table.add_row(vec![
        Cell::new("Database"),
        Cell::new(config.database_path(paths).display()),
    ]);
    output.table(&server_table);

    let mut anilist_table = styled_table(&["AniList", ""]);
    match &config.anilist {
        Some(anilist) => {
            anilist_table.add_row(vec![Cell::new("Enabled"), Cell::new(check_mark(anilist.enabled))]);
            anilist_table.add_row(vec![Cell::new("API URL"), Cell::new(&anilist.api_url)]);
            anilist_table.add_row(vec![
                Cell::new("Default Username"),
                Cell::new(anilist.default_username.as_deref().unwrap_or("(not set)")),
            ]);
            anilist_table.add_row(vec![Cell::new("Search Limit"), Cell::new(anilist.search_limit)]);
        }
        None => {
            anilist_table.add_row(vec![Cell::new("Enabled"), Cell::new(check_mark(false))]);
        }
    }
    output.table(&anilist_table);
    Ok(())
}

fn init_config(paths: &PathManager, force: bool, output: &Output) -> Result<()> {
    let config_file = paths.config_file();
    if config_file.exists() && !force {
        return Err(eyre!(
            "Configuration file already exists at {} (use --force to overwrite)",
            config_file.display()
        ));
    }

    paths
        .ensure_directories()
        .map_err(|e| eyre!("Failed to create directories: {}", e))?;
    Config::default()
        .save_to_file(&config_file)
        .map_err(|e| eyre!("Failed to save config to {}: {}", config_file.display(), e))?;

    output.success(format!("Wrote default configuration to {}", config_file.display()));
    Ok(())
}
