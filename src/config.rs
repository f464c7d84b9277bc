use std::path::PathBuf;

use log::LevelFilter;

pub static DEFAULT_PROMPT: &str = "sexpr=> ";
pub static DEFAULT_HISTORY_FILE: &str = "sexpr.history";

/// Config holds the settings for an interactive session.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub prompt: String,
    /// history_file is where line history is loaded from and saved to; `None` disables history.
    pub history_file: Option<PathBuf>,
    pub log_level: LevelFilter,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.into(),
            history_file: Some(PathBuf::from(DEFAULT_HISTORY_FILE)),
            log_level: LevelFilter::Warn,
        }
    }
}

impl Config {
    /// log_level_for maps a count of `-v` flags onto a level, starting from warnings.
    pub fn log_level_for(verbosity: u8) -> LevelFilter {
        match verbosity {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}
