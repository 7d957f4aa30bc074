use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::{MoodlineError, Result};

/// Environment variable holding the log filter (`RUST_LOG` syntax)
pub const LOG_ENV: &str = "MOODLINE_LOG";

/// Default log file path (~/.moodline.log)
pub fn default_log_path() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(".moodline.log"))
        .ok_or(MoodlineError::NoHomeDirectory)
}

/// Initialise file logging.
///
/// The terminal belongs to the TUI, so events go to `path` instead of
/// stderr. The filter comes from `MOODLINE_LOG` and defaults to `info`.
pub fn init_logging(path: &Path) -> Result<()> {
    let env_filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    let file = OpenOptions::new().create(true).append(true).open(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| MoodlineError::Logging(e.to_string()))
}
