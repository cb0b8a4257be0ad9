//! ddbot - A client for DingTalk custom robot webhooks.
//!
//! Messages are pushed to a group chat through one HTTP endpoint. Every request
//! URL carries a millisecond timestamp and an HMAC-SHA256 signature derived
//! from the robot's secret.
//!
//! # Architecture
//!
//! - [`robot::Message`]: the six message kinds, validated when built
//! - [`robot::signature`]: request signing
//! - [`robot::RobotClient`]: async client on reqwest
//! - `robot::blocking::RobotClient`: blocking client (feature `blocking`, on by default)
//!
//! Both clients share payload construction, signing and response handling.
//!
//! # Example
//!
//! ```no_run
//! use ddbot::core::config::RobotConfig;
//! use ddbot::robot::{Mentions, RobotClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     ddbot::setup_logging();
//!
//!     let client = RobotClient::with_config(RobotConfig::from_env()?)?;
//!     client.text("Build finished", Mentions::all()).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod errors;
pub mod robot;

pub use crate::core::{RobotConfig, SendResult};
pub use errors::{RobotError, TransportError};

// Key types must be shareable across threads and tasks.
const _: () = {
    const fn assert_send_sync<T: Send + Sync>() {}
    let _ = assert_send_sync::<robot::RobotClient>;
    let _ = assert_send_sync::<robot::Message>;
    let _ = assert_send_sync::<RobotError>;
};

/// Configure structured JSON logging for applications using the robot clients.
///
/// The library itself only emits `tracing` events; call this once at startup
/// to see them. The filter is read from `RUST_LOG` and defaults to `info`.
/// Calling it again after a subscriber is installed is a no-op.
///
/// # Example
///
/// ```
/// ddbot::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
