//! # Address Selection
//!
//! Decides which of the host's IPv4 addresses is worth turning into a QR code.
//!
//! Every candidate is logged with its public/private mark. A candidate whose text starts
//! with one of the configured prefixes is presented right away. When no candidate matched
//! any prefix, the first public address is presented instead, so a usable link still shows
//! up on hosts that only have a public interface.
//!
//! Presentation happens once per matching candidate, not once per run: a host with two
//! interfaces that both match prints two codes.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr};

use tracing::info;
use webshare_common::network::prefix;
use webshare_common::network::range;

/// Renders a URL for a peer device to pick up.
pub trait Presenter {
    /// Presents `url`, e.g. by drawing it as a QR code.
    ///
    /// # Arguments
    /// * `url` - A full `http://<address>:<port>` link.
    fn present(&mut self, url: &str) -> anyhow::Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Private,
    Public,
}

impl Visibility {
    pub fn of(addr: Ipv4Addr) -> Self {
        if range::is_private(IpAddr::V4(addr)) {
            Visibility::Private
        } else {
            Visibility::Public
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Visibility::Private => write!(f, "private"),
            Visibility::Public => write!(f, "public"),
        }
    }
}

/// What was handed to the [`Presenter`] during a selection pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// Neither a prefix match nor a public address was found.
    Nothing,
    /// URLs of every candidate that matched a prefix, in enumeration order.
    PrefixMatch(Vec<String>),
    /// URL of the first public candidate.
    PublicFallback(String),
}

pub fn share_url(addr: Ipv4Addr, port: u16) -> String {
    format!("http://{addr}:{port}")
}

/// Logs every candidate and presents the selected ones.
///
/// # Arguments
/// * `candidates` - Addresses in enumeration order.
/// * `prefixes` - Parsed prefix patterns, tried in order for each candidate.
/// * `port` - Port the share listens on.
/// * `presenter` - Receives each selected URL.
pub fn select_and_present(
    candidates: &[Ipv4Addr],
    prefixes: &[String],
    port: u16,
    presenter: &mut dyn Presenter,
) -> anyhow::Result<SelectionOutcome> {
    let mut presented: Vec<String> = Vec::new();
    let mut fallback: Option<String> = None;

    for &addr in candidates {
        let visibility = Visibility::of(addr);
        let link: String = share_url(addr, port);
        info!("{link} [{visibility}]");

        if prefix::first_match(&addr.to_string(), prefixes).is_some() {
            presenter.present(&link)?;
            presented.push(link.clone());
        }

        if visibility == Visibility::Public && fallback.is_none() {
            fallback = Some(link);
        }
    }

    if !presented.is_empty() {
        return Ok(SelectionOutcome::PrefixMatch(presented));
    }

    match fallback {
        Some(link) => {
            presenter.present(&link)?;
            Ok(SelectionOutcome::PublicFallback(link))
        }
        None => Ok(SelectionOutcome::Nothing),
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
