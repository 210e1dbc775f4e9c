use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

pub const CONFIG_ENV: &str = "PHUD_CONFIG";
pub const HISTORY_DIR_ENV: &str = "PHUD_HISTORY_DIR";
pub const WORKERS_ENV: &str = "PHUD_WORKERS";
pub const STRICT_ROOT_ENV: &str = "PHUD_STRICT_ROOT";
pub const LOG_ENV: &str = "PHUD_LOG";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Winamax data root used when a command gets no `--dir`.
    pub history_dir: Option<PathBuf>,
    pub workers: usize,
    pub require_valid_root: bool,
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset.
    pub log_filter: String,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub history_dir: ValueSource,
    pub workers: ValueSource,
    pub require_valid_root: ValueSource,
    pub log_filter: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            history_dir: ValueSource::Default,
            workers: ValueSource::Default,
            require_valid_root: ValueSource::Default,
            log_filter: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            history_dir: None,
            workers: std::thread::available_parallelism().map_or(1, |n| n.get()),
            require_valid_root: true,
            log_filter: "warn".into(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read {}: {}", CONFIG_ENV, e),
            ConfigError::Parse(e) => write!(f, "cannot parse {}: {}", CONFIG_ENV, e),
            ConfigError::Invalid(msg) => f.write_str(msg),
        }
    }
}

pub fn load() -> Result<Config, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

/// Defaults, then the TOML file named by `PHUD_CONFIG`, then `PHUD_*`
/// variables. Empty variables are ignored.
pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var(CONFIG_ENV)
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.history_dir {
            cfg.history_dir = Some(v);
            sources.history_dir = ValueSource::File;
        }
        if let Some(v) = f.workers {
            cfg.workers = v;
            sources.workers = ValueSource::File;
        }
        if let Some(v) = f.require_valid_root {
            cfg.require_valid_root = v;
            sources.require_valid_root = ValueSource::File;
        }
        if let Some(v) = f.log_filter {
            cfg.log_filter = v;
            sources.log_filter = ValueSource::File;
        }
    }

    if let Ok(dir) = std::env::var(HISTORY_DIR_ENV)
        && !dir.is_empty()
    {
        cfg.history_dir = Some(PathBuf::from(dir));
        sources.history_dir = ValueSource::Env;
    }
    if let Ok(workers) = std::env::var(WORKERS_ENV)
        && !workers.is_empty()
    {
        cfg.workers = workers
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid workers".into()))?;
        sources.workers = ValueSource::Env;
    }
    if let Ok(strict) = std::env::var(STRICT_ROOT_ENV)
        && !strict.is_empty()
    {
        cfg.require_valid_root = parse_bool(&strict)
            .ok_or_else(|| ConfigError::Invalid("Invalid strict root flag".into()))?;
        sources.require_valid_root = ValueSource::Env;
    }
    if let Ok(filter) = std::env::var(LOG_ENV)
        && !filter.is_empty()
    {
        cfg.log_filter = filter;
        sources.log_filter = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    history_dir: Option<PathBuf>,
    #[serde(default)]
    workers: Option<usize>,
    #[serde(default)]
    require_valid_root: Option<bool>,
    #[serde(default)]
    log_filter: Option<String>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.workers == 0 {
        return Err(ConfigError::Invalid(
            "workers must be >=1".into(),
        ));
    }
    if cfg.log_filter.trim().is_empty() {
        return Err(ConfigError::Invalid(
            "log_filter must not be empty".into(),
        ));
    }
    Ok(())
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}
