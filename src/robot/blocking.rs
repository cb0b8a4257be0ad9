//! Blocking robot client.
//!
//! Same messages, signing and response handling as [`crate::robot::RobotClient`];
//! only the HTTP call differs. Must not be used from inside an async runtime
//! (wrap calls in `spawn_blocking` there).

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, error, warn};

use crate::core::config::RobotConfig;
use crate::core::models::SendResult;
use crate::errors::{RobotError, TransportError};
use crate::robot::message::{ActionButton, ButtonOrientation, FeedLink, Mentions, Message};
use crate::robot::request::PreparedRequest;
use crate::robot::response::interpret;
use crate::robot::signature::current_timestamp_millis;

/// Thread-blocking client for one robot.
#[derive(Debug, Clone)]
pub struct RobotClient {
    config: RobotConfig,
    http: Client,
}

impl RobotClient {
    /// Client with the default endpoint and timeout.
    ///
    /// Never fails: if the tuned HTTP client cannot be built, a default one is
    /// used. The configured timeout is applied to every request either way.
    #[must_use]
    pub fn new(access_token: impl Into<String>, secret: impl Into<String>) -> Self {
        let config = RobotConfig::new(access_token, secret);
        let http = build_http_client(&config).unwrap_or_else(|e| {
            warn!("Falling back to default HTTP client: {}", e);
            Client::new()
        });
        Self::from_parts(config, http)
    }

    /// # Errors
    ///
    /// [`TransportError::Build`] if the HTTP client cannot be created.
    pub fn with_config(config: RobotConfig) -> Result<Self, RobotError> {
        let http = build_http_client(&config)?;
        Ok(Self::from_parts(config, http))
    }

    fn from_parts(config: RobotConfig, http: Client) -> Self {
        if config.secret.is_empty() {
            warn!("Robot client created with an empty secret; requests will fail signature checks");
        }
        Self { config, http }
    }

    #[must_use]
    pub fn config(&self) -> &RobotConfig {
        &self.config
    }

    /// Sign and post a prebuilt message, blocking until the response arrives.
    ///
    /// # Errors
    ///
    /// [`RobotError::Transport`] on network failure, timeout, non-2xx status or
    /// an undecodable body; [`RobotError::Remote`] when `errcode != 0`.
    pub fn send(&self, message: &Message) -> Result<SendResult, RobotError> {
        let request = PreparedRequest::new(&self.config, message, current_timestamp_millis())?;
        debug!(
            msgtype = message.msgtype(),
            timestamp = request.timestamp,
            "Sending robot message"
        );

        let response = self
            .http
            .post(request.url)
            .header(CONTENT_TYPE, "application/json")
            .timeout(self.config.timeout)
            .body(request.body)
            .send()
            .map_err(|e| {
                error!("Robot request failed: {}", e);
                TransportError::from(e)
            })?;

        let status = response.status().as_u16();
        let body = response.text().map_err(|e| {
            error!("Failed to read robot response: {}", e);
            TransportError::from(e)
        })?;

        interpret(status, &body)
    }

    /// # Errors
    ///
    /// See [`Message::text`] and [`RobotClient::send`].
    pub fn text(&self, content: &str, mentions: Mentions) -> Result<SendResult, RobotError> {
        self.send(&Message::text(content, mentions)?)
    }

    /// # Errors
    ///
    /// See [`Message::link`] and [`RobotClient::send`].
    pub fn link(
        &self,
        title: &str,
        text: &str,
        message_url: &str,
        pic_url: Option<&str>,
    ) -> Result<SendResult, RobotError> {
        self.send(&Message::link(title, text, message_url, pic_url)?)
    }

    /// # Errors
    ///
    /// See [`Message::markdown`] and [`RobotClient::send`].
    pub fn markdown(
        &self,
        title: &str,
        text: &str,
        mentions: Mentions,
    ) -> Result<SendResult, RobotError> {
        self.send(&Message::markdown(title, text, mentions)?)
    }

    /// # Errors
    ///
    /// See [`Message::whole_action_card`] and [`RobotClient::send`].
    pub fn whole_action_card(
        &self,
        title: &str,
        text: &str,
        single_title: &str,
        single_url: &str,
    ) -> Result<SendResult, RobotError> {
        self.send(&Message::whole_action_card(
            title,
            text,
            single_title,
            single_url,
        )?)
    }

    /// # Errors
    ///
    /// See [`Message::separated_action_card`] and [`RobotClient::send`].
    pub fn separated_action_card(
        &self,
        title: &str,
        text: &str,
        buttons: Vec<ActionButton>,
        orientation: ButtonOrientation,
    ) -> Result<SendResult, RobotError> {
        self.send(&Message::separated_action_card(
            title,
            text,
            buttons,
            orientation,
        )?)
    }

    /// # Errors
    ///
    /// See [`Message::feed_card`] and [`RobotClient::send`].
    pub fn feed_card(&self, links: Vec<FeedLink>) -> Result<SendResult, RobotError> {
        self.send(&Message::feed_card(links)?)
    }
}

fn build_http_client(config: &RobotConfig) -> Result<Client, TransportError> {
    Client::builder()
        .timeout(config.timeout)
        .connect_timeout(config.timeout)
        .build()
        .map_err(|e| TransportError::Build(e.to_string()))
}
