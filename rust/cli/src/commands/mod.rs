//! Command handler modules for the phud CLI.
//!
//! Each command is implemented in its own module file with a consistent pattern:
//!
//! - Public handler function: `pub fn handle_COMMAND_command(...) -> Result<(), CliError>`
//! - Output streams (`&mut dyn Write`) passed as parameters
//! - Errors propagated via the `CliError` enum

mod cfg;
mod file;
mod hands;
mod load;
mod validate;

pub use cfg::handle_cfg_command;
pub use file::handle_file_command;
pub use hands::handle_hands_command;
pub use load::handle_load_command;
pub use validate::handle_validate_command;

use std::path::PathBuf;

use crate::config::{self, Config};
use crate::error::CliError;

fn load_config() -> Result<Config, CliError> {
    config::load().map_err(|e| CliError::Config(format!("Invalid configuration: {}", e)))
}

/// `--dir` when given, else the configured history directory.
fn resolve_root(dir: Option<PathBuf>, cfg: &Config) -> Result<PathBuf, CliError> {
    dir.or_else(|| cfg.history_dir.clone()).ok_or_else(|| {
        CliError::InvalidInput(format!(
            "no data root: pass --dir or set {}",
            config::HISTORY_DIR_ENV
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_dir_wins_over_config() {
        let cfg = Config {
            history_dir: Some(PathBuf::from("/configured")),
            ..Config::default()
        };
        assert_eq!(
            resolve_root(Some(PathBuf::from("/flag")), &cfg).unwrap(),
            PathBuf::from("/flag")
        );
        assert_eq!(resolve_root(None, &cfg).unwrap(), PathBuf::from("/configured"));
    }

    #[test]
    fn missing_dir_is_invalid_input() {
        let err = resolve_root(None, &Config::default()).unwrap_err();
        assert!(matches!(err, CliError::InvalidInput(_)));
    }
}
