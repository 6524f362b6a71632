use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_QR_PREFIX: &str = "192";
/// How long in-flight connections may keep running once shutdown begins.
pub const GRACE_PERIOD: Duration = Duration::from_secs(5);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("directory '{0}' does not exist")]
    MissingDirectory(PathBuf),
    #[error("'{0}' is not a directory")]
    NotADirectory(PathBuf),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Root of the shared file tree.
    pub directory: PathBuf,
    /// Address prefixes a QR code is printed for.
    pub qr_prefixes: Vec<String>,
    /// `None` keeps the share running until it is interrupted.
    pub timeout: Option<Duration>,
    pub grace_period: Duration,
    pub no_banner: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            directory: PathBuf::from("."),
            qr_prefixes: vec![DEFAULT_QR_PREFIX.to_string()],
            timeout: None,
            grace_period: GRACE_PERIOD,
            no_banner: false,
        }
    }
}

impl Config {
    /// Sets the auto-shutdown delay. A zero duration disables it.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout.filter(|t| !t.is_zero());
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.directory.exists() {
            return Err(ConfigError::MissingDirectory(self.directory.clone()));
        }
        if !self.directory.is_dir() {
            return Err(ConfigError::NotADirectory(self.directory.clone()));
        }
        Ok(())
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
