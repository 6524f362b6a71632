use anyhow::Context;
use colored::*;
use tracing::warn;

use crate::terminal::{colors, print, qr::TerminalQr};
use webshare_common::config::Config;
use webshare_common::network::interface::{self, SystemInterfaces};
use webshare_core::lifecycle::{self, ShareSession, StopOutcome};
use webshare_core::selection::{self, SelectionOutcome};

pub async fn share(cfg: &Config) -> anyhow::Result<()> {
    cfg.validate()?;

    print::header("reachable addresses");
    let candidates = interface::enumerate_ipv4(&SystemInterfaces)
        .context("failed to enumerate network interfaces")?;

    let mut presenter = TerminalQr::stdout();
    let outcome = selection::select_and_present(&candidates, &cfg.qr_prefixes, cfg.port, &mut presenter)?;
    if outcome == SelectionOutcome::Nothing {
        warn!(
            "No address matches {:?} and no public address was found, skipping QR code",
            cfg.qr_prefixes
        );
    }

    let session = ShareSession::from_config(cfg).await?;
    let local_addr = session.local_addr()?;

    print::header("sharing");
    print::aligned_line("Directory", cfg.directory.display().to_string());
    print::aligned_line("Listening", local_addr.to_string().color(colors::ACCENT));
    if let Some(timeout) = cfg.timeout {
        print::aligned_line("Expires", humantime::format_duration(timeout).to_string());
    }

    let outcome: StopOutcome = session.run(lifecycle::termination_signal()).await?;
    print::header(match outcome {
        StopOutcome::Graceful => "share closed",
        StopOutcome::Forced => "share closed forcefully",
    });
    print::end_of_program();

    Ok(())
}
