//! `hands`: one JSON object per hand, in file order.

use std::io::Write;
use std::path::Path;

use phud_engine::game::Game;
use phud_engine::hand::Hand;
use phud_engine::loader::reload_file;

use crate::error::CliError;
use crate::ui;

pub fn handle_hands_command(
    path: &Path,
    player: Option<&str>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let parse = reload_file(path)?;
    if let Some(fault) = &parse.fault {
        ui::display_fault(err, path, fault)?;
    }

    let games = parse
        .site
        .cash_games()
        .iter()
        .map(|g| g.game())
        .chain(parse.site.tournaments().iter().map(|t| t.game()));
    for game in games {
        write_hands(out, game, player)?;
    }
    Ok(())
}

fn write_hands(out: &mut dyn Write, game: &Game, player: Option<&str>) -> Result<(), CliError> {
    match player {
        Some(name) => {
            for hand in game.hands_involving(name) {
                write_hand(out, hand)?;
            }
        }
        None => {
            for hand in game.hands() {
                write_hand(out, hand)?;
            }
        }
    }
    Ok(())
}

fn write_hand(out: &mut dyn Write, hand: &Hand) -> Result<(), CliError> {
    writeln!(out, "{}", serde_json::to_string(hand)?)?;
    Ok(())
}
