//! Shared building blocks for `webshare`.
//!
//! * **[`config`]**: The runtime configuration assembled by the CLI.
//! * **[`network`]**: Address classification, interface enumeration and prefix parsing.

pub mod config;
pub mod network;
