//! # Webshare Core
//!
//! * **[`selection`]**: Chooses which local address gets a QR code.
//! * **[`server`]**: The directory-serving router and its access log.
//! * **[`lifecycle`]**: Runs a share until it times out or is interrupted, then drains it.

pub mod error;
pub mod lifecycle;
pub mod selection;
pub mod server;

pub use error::ShareError;
