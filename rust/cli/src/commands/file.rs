//! `file`: parse one history file and describe its game.

use std::io::Write;
use std::path::Path;

use phud_engine::game::Game;
use phud_engine::hand::to_sqlite_date;
use phud_engine::loader::reload_file;

use crate::error::CliError;
use crate::ui;

pub fn handle_file_command(
    path: &Path,
    json: bool,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if !path.is_file() {
        return Err(CliError::InvalidInput(format!(
            "'{}' is not a file",
            path.display()
        )));
    }
    let parse = reload_file(path)?;
    if let Some(fault) = &parse.fault {
        ui::display_fault(err, path, fault)?;
    }

    if json {
        let value = serde_json::json!({
            "site": parse.site,
            "fault": parse.fault.as_ref().map(|f| f.to_string()),
        });
        writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
        return Ok(());
    }

    let site = &parse.site;
    if site.is_empty() {
        writeln!(out, "No game detected in {}", path.display())?;
        return Ok(());
    }
    for cash in site.cash_games() {
        write_game(out, "Cash game", cash.game())?;
        writeln!(out, "  blinds: {}/{}", cash.small_blind(), cash.big_blind())?;
    }
    for tournament in site.tournaments() {
        write_game(out, "Tournament", tournament.game())?;
        writeln!(out, "  buy-in: {}", tournament.buy_in())?;
    }
    writeln!(out, "Players: {}", site.player_count())?;
    if let Some(hero) = site.hero() {
        writeln!(out, "Hero: {}", hero)?;
    }
    Ok(())
}

fn write_game(out: &mut dyn Write, label: &str, game: &Game) -> std::io::Result<()> {
    writeln!(
        out,
        "{} '{}' ({} {}, {}, {}-max) started {}: {} hands",
        label,
        game.name(),
        game.variant().as_str(),
        game.limit().as_str(),
        if game.is_real_money() { "real money" } else { "play money" },
        game.max_seats(),
        to_sqlite_date(&game.start_date()),
        game.hands().len()
    )
}
