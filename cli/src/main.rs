mod commands;
mod terminal;

use commands::{CommandLine, share};
use terminal::{logging, print};
use webshare_common::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init_logging();

    let cfg: Config = commands.to_config();
    print::banner(cfg.no_banner);

    share::share(&cfg).await
}
