use std::net::Ipv4Addr;

use webshare_common::network::interface::{self, SystemInterfaces};
use webshare_common::network::prefix::parse_prefixes;
use webshare_core::selection::{self, Presenter, SelectionOutcome};

#[derive(Default)]
struct RecordingPresenter {
    urls: Vec<String>,
}

impl Presenter for RecordingPresenter {
    fn present(&mut self, url: &str) -> anyhow::Result<()> {
        self.urls.push(url.to_string());
        Ok(())
    }
}

/// Runs selection over this machine's real interfaces.
#[test]
fn loopback_prefix_selects_local_interface() {
    let candidates = match interface::enumerate_ipv4(&SystemInterfaces) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Skipping: could not enumerate interfaces: {e}");
            return;
        }
    };
    if !candidates.contains(&Ipv4Addr::LOCALHOST) {
        eprintln!("Skipping: no IPv4 loopback address on this host");
        return;
    }

    let mut presenter = RecordingPresenter::default();
    let outcome =
        selection::select_and_present(&candidates, &parse_prefixes("127."), 3000, &mut presenter).unwrap();

    assert!(presenter.urls.contains(&"http://127.0.0.1:3000".to_string()));
    assert!(matches!(outcome, SelectionOutcome::PrefixMatch(_)));
}

#[test]
fn unmatched_prefix_falls_back_or_presents_nothing() {
    let Ok(candidates) = interface::enumerate_ipv4(&SystemInterfaces) else {
        eprintln!("Skipping: could not enumerate interfaces");
        return;
    };

    let mut presenter = RecordingPresenter::default();
    let outcome =
        selection::select_and_present(&candidates, &parse_prefixes("no-such-prefix"), 3000, &mut presenter)
            .unwrap();

    match outcome {
        SelectionOutcome::PublicFallback(url) => assert_eq!(presenter.urls, vec![url]),
        SelectionOutcome::Nothing => assert!(presenter.urls.is_empty()),
        SelectionOutcome::PrefixMatch(urls) => panic!("nothing should match, got {urls:?}"),
    }
}
