//! # phud CLI Library
//!
//! Command-line front end for the `phud_engine` hand history reader. It loads
//! a Winamax data root or a single history file and reports what was found;
//! all parsing lives in the engine.
//!
//! ## Main Entry Point
//!
//! The primary entry point is the [`run`] function, which parses command-line arguments
//! and executes the appropriate subcommand.
//!
//! ```no_run
//! use std::io;
//! let args = vec!["phud", "load", "--dir", "/home/me/Winamax Poker/accounts/me"];
//! let code = phud_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `load`: Load every hand history of a data root
//! - `file`: Parse one hand history file
//! - `hands`: Print the hands of one file as JSON lines
//! - `validate`: Check the layout of a data root
//! - `cfg`: Display the resolved configuration

use clap::Parser;
use std::io::Write;
pub mod cli;
mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod logging;
pub mod ui;

use cli::{Commands, PhudCli};
use commands::{
    handle_cfg_command, handle_file_command, handle_hands_command, handle_load_command,
    handle_validate_command,
};

pub use error::CliError;

/// Parses `args` and runs the chosen subcommand.
///
/// Returns `0` on success and `2` on any error; errors are written to `err`.
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match PhudCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => return report_usage_error(e, out, err),
    };

    let result = match cli.cmd {
        Commands::Load {
            dir,
            workers,
            no_validate,
            json,
        } => handle_load_command(dir, workers, no_validate, json, out, err),
        Commands::File { path, json } => handle_file_command(&path, json, out, err),
        Commands::Hands { path, player } => {
            handle_hands_command(&path, player.as_deref(), out, err)
        }
        Commands::Validate { dir } => handle_validate_command(dir, out),
        Commands::Cfg => handle_cfg_command(out),
    };

    if let Err(e) = &result {
        let _ = ui::write_error(err, &e.to_string());
    }
    exit_code::of(&result)
}

fn report_usage_error(e: clap::Error, out: &mut dyn Write, err: &mut dyn Write) -> i32 {
    use clap::error::ErrorKind;

    // Help and version go to stdout with a zero exit code
    if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
        return match write!(out, "{}", e) {
            Ok(()) => exit_code::SUCCESS,
            Err(_) => exit_code::ERROR,
        };
    }

    let _ = write_usage(&e, err);
    exit_code::ERROR
}

fn write_usage(e: &clap::Error, err: &mut dyn Write) -> std::io::Result<()> {
    writeln!(err, "{}", e)?;
    writeln!(err)?;
    writeln!(err, "phud: Winamax hand history reader")?;
    writeln!(err, "Usage: phud <command> [options]\n")?;
    writeln!(err, "Commands:")?;
    for c in Commands::NAMES {
        writeln!(err, "  {}", c)?;
    }
    writeln!(err, "\nFor full help, run: phud --help")
}
