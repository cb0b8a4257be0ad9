//! All robot-webhook functionality

#[cfg(feature = "blocking")]
pub mod blocking;
pub mod client;
pub mod message;
mod request;
pub mod response;
pub mod signature;

// Re-export main types for convenience
pub use client::RobotClient;
pub use message::{ActionButton, ButtonOrientation, FeedLink, Mentions, Message};
pub use signature::{current_timestamp_millis, sign, signed_url};
