use url::Url;

use crate::core::config::RobotConfig;
use crate::errors::RobotError;
use crate::robot::message::Message;
use crate::robot::signature::signed_url;

/// A signed URL plus the serialized body, ready for either transport.
#[derive(Debug, Clone)]
pub(crate) struct PreparedRequest {
    pub url: Url,
    pub body: Vec<u8>,
    pub timestamp: i64,
}

impl PreparedRequest {
    pub fn new(config: &RobotConfig, message: &Message, timestamp: i64) -> Result<Self, RobotError> {
        Ok(Self {
            url: signed_url(config, timestamp)?,
            body: message.to_body()?,
            timestamp,
        })
    }
}
