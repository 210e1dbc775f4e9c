//! `load`: read a whole data root in parallel and summarize it.

use std::io::Write;
use std::path::PathBuf;

use phud_engine::loader::{LoadReport, LoaderOptions, LoaderSession};
use tracing::info;

use super::{load_config, resolve_root};
use crate::error::CliError;
use crate::ui;

pub fn handle_load_command(
    dir: Option<PathBuf>,
    workers: Option<usize>,
    no_validate: bool,
    json: bool,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let cfg = load_config()?;
    let root = resolve_root(dir, &cfg)?;
    let workers = workers.unwrap_or(cfg.workers);
    if workers == 0 {
        return Err(CliError::InvalidInput("--workers must be >=1".into()));
    }

    let session = LoaderSession::new(LoaderOptions {
        workers,
        require_valid_root: cfg.require_valid_root && !no_validate,
    })
    .on_file_count(|n| info!(files = n, "history files found"))
    .on_progress(|path| info!(file = %path.display(), "history file merged"));
    let report = session.load(&root)?;

    ui::display_failures(err, &report.failures)?;
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&summary(&report))?)?;
    } else {
        write_text(&report, out)?;
    }
    Ok(())
}

fn summary(report: &LoadReport) -> serde_json::Value {
    let site = &report.site;
    let failures: Vec<_> = report
        .failures
        .iter()
        .map(|f| serde_json::json!({ "path": f.path, "reason": f.reason }))
        .collect();
    serde_json::json!({
        "site": site.name(),
        "hero": site.hero(),
        "files": report.parsed_files,
        "cashGames": site.cash_games().len(),
        "tournaments": site.tournaments().len(),
        "hands": site.hand_count(),
        "players": site.player_count(),
        "failures": failures,
    })
}

fn write_text(report: &LoadReport, out: &mut dyn Write) -> std::io::Result<()> {
    let site = &report.site;
    if site.is_empty() {
        writeln!(out, "No game detected")?;
    }
    writeln!(
        out,
        "Loaded {} files: {} cash games, {} tournaments, {} hands, {} players",
        report.parsed_files,
        site.cash_games().len(),
        site.tournaments().len(),
        site.hand_count(),
        site.player_count()
    )?;
    if let Some(hero) = site.hero() {
        writeln!(out, "Hero: {}", hero)?;
    }
    Ok(())
}
