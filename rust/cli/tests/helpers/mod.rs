//! Shared helpers for the CLI integration tests.
//!
//! - `run_cli` runs `phud_cli::run` in-process and captures its streams.
//! - `EnvGuard` sets `PHUD_*` variables and restores them on drop; tests
//!   using it must be `#[serial]`.
//! - `DataRoot` builds a Winamax data root in a temp directory.
#![allow(dead_code)]

use std::fs::{create_dir_all, write};
use std::path::{Path, PathBuf};

use tempfile::TempDir;

pub const PHUD_VARS: [&str; 5] = [
    "PHUD_CONFIG",
    "PHUD_HISTORY_DIR",
    "PHUD_WORKERS",
    "PHUD_STRICT_ROOT",
    "PHUD_LOG",
];

#[derive(Debug)]
pub struct CliResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

pub fn run_cli(args: &[&str]) -> CliResult {
    let mut argv = vec!["phud"];
    argv.extend_from_slice(args);
    let mut out = Vec::new();
    let mut err = Vec::new();
    let exit_code = phud_cli::run(argv, &mut out, &mut err);
    CliResult {
        exit_code,
        stdout: String::from_utf8_lossy(&out).into_owned(),
        stderr: String::from_utf8_lossy(&err).into_owned(),
    }
}

/// Clears every `PHUD_*` variable, then applies `pairs`.
pub struct EnvGuard {
    restores: Vec<(String, Option<String>)>,
}

impl EnvGuard {
    pub fn apply(pairs: &[(&str, &str)]) -> Self {
        let mut restores = Vec::new();
        for key in PHUD_VARS {
            restores.push((key.to_string(), std::env::var(key).ok()));
            unsafe {
                std::env::remove_var(key);
            }
        }
        for (key, value) in pairs {
            if !PHUD_VARS.contains(key) {
                restores.push((key.to_string(), std::env::var(key).ok()));
            }
            unsafe {
                std::env::set_var(key, value);
            }
        }
        EnvGuard { restores }
    }

    pub fn clean() -> Self {
        Self::apply(&[])
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, previous) in self.restores.iter().rev() {
            unsafe {
                match previous {
                    Some(val) => std::env::set_var(key, val),
                    None => std::env::remove_var(key),
                }
            }
        }
    }
}

pub fn cash_hand(table: &str, hand_id: &str) -> String {
    format!(
        "Winamax Poker - CashGame - HandId: #{hand_id} - Holdem no limit (0.01€/0.02€) - 2014/11/01 21:24:02 UTC\n\
         Table: '{table}' 6-max (real money) Seat #1 is the button\n\
         Seat 1: Villain (2€)\n\
         Seat 2: Hero (2€)\n\
         *** ANTE/BLINDS ***\n\
         Villain posts small blind 0.01€\n\
         Hero posts big blind 0.02€\n\
         Dealt to Hero [Ah Kd]\n\
         *** PRE-FLOP ***\n\
         Villain folds\n\
         Hero collected 0.03€ from pot\n\
         *** SUMMARY ***\n\
         Total pot 0.03€ | No rake\n\
         Seat 2: Hero won 0.03€\n\n"
    )
}

pub fn cash_file_name(table: &str) -> String {
    format!("20141101_{table}_real_holdem_no-limit.txt")
}

pub struct DataRoot {
    dir: TempDir,
}

impl DataRoot {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("temp dir");
        create_dir_all(dir.path().join("history")).expect("history dir");
        create_dir_all(dir.path().join("data/buddy")).expect("buddy dir");
        create_dir_all(dir.path().join("data/players")).expect("players dir");
        let root = Self { dir };
        root.add_history_file("hero_winamax_positioning_file.dat", "");
        root.add_history_file("20141101_Sit(1)_real_holdem_no-limit_summary.txt", "");
        root
    }

    /// Only a `history` directory, which strict validation rejects.
    pub fn bare() -> Self {
        let dir = TempDir::new().expect("temp dir");
        create_dir_all(dir.path().join("history")).expect("history dir");
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn path_str(&self) -> String {
        self.dir.path().to_string_lossy().into_owned()
    }

    pub fn add_history_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join("history").join(name);
        write(&path, content).expect("write history file");
        path
    }

    /// Adds one single-hand cash game file per table.
    pub fn with_tables(self, tables: &[&str]) -> Self {
        for (i, table) in tables.iter().enumerate() {
            self.add_history_file(&cash_file_name(table), &cash_hand(table, &format!("{i}-1-1")));
        }
        self
    }
}
