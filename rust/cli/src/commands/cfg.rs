//! Configuration command handler.
//!
//! Prints the resolved configuration with the source of each value
//! (default, configuration file or environment).
//!
//! # Example Output
//!
//! ```json
//! {
//!   "workers": {
//!     "value": 8,
//!     "source": "default"
//!   },
//!   ...
//! }
//! ```

use crate::config;
use crate::error::CliError;
use std::io::Write;

pub fn handle_cfg_command(out: &mut dyn Write) -> Result<(), CliError> {
    let resolved = config::load_with_sources()
        .map_err(|e| CliError::Config(format!("Invalid configuration: {}", e)))?;

    let config::ConfigResolved { config, sources } = resolved;
    let display = serde_json::json!({
        "history_dir": {
            "value": config.history_dir,
            "source": sources.history_dir,
        },
        "workers": {
            "value": config.workers,
            "source": sources.workers,
        },
        "require_valid_root": {
            "value": config.require_valid_root,
            "source": sources.require_valid_root,
        },
        "log_filter": {
            "value": config.log_filter,
            "source": sources.log_filter,
        }
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
