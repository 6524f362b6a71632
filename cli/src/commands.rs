pub mod share;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use webshare_common::config::{self, Config};
use webshare_common::network::prefix;

#[derive(Parser)]
#[command(name = "webshare")]
#[command(about = "Share a directory over HTTP and print a QR code to reach it.")]
pub struct CommandLine {
    /// Port to listen on
    #[arg(short = 'p', long, default_value_t = config::DEFAULT_PORT)]
    pub port: u16,

    /// Directory to share
    #[arg(short = 'd', long, default_value = ".")]
    pub directory: PathBuf,

    /// Comma or space separated IP address prefixes to print a QR code for
    #[arg(short = 'q', long = "qr", default_value = config::DEFAULT_QR_PREFIX)]
    pub qr_prefix: String,

    /// Stop sharing after this long, e.g. "30s", "5m" or "1h 30m"
    #[arg(short = 't', long, value_parser = humantime::parse_duration)]
    pub timeout: Option<Duration>,

    /// Do not print the banner
    #[arg(long)]
    pub no_banner: bool,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn to_config(&self) -> Config {
        Config {
            port: self.port,
            directory: self.directory.clone(),
            qr_prefixes: prefix::parse_prefixes(&self.qr_prefix),
            timeout: None,
            grace_period: config::GRACE_PERIOD,
            no_banner: self.no_banner,
        }
        .with_timeout(self.timeout)
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
