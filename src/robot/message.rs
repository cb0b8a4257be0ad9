//! Robot message kinds and their wire format.
//!
//! Every [`Message`] is validated when it is built, so a value of this type
//! always serializes to a body the robot endpoint accepts for its `msgtype`.

use serde::{Serialize, Serializer};

use crate::errors::RobotError;

/// Minimum number of buttons for an independent-jump action card.
pub const MIN_SEPARATED_BUTTONS: usize = 2;

/// Who to @-mention in a text or markdown message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Mentions {
    at_mobiles: Vec<String>,
    is_at_all: bool,
}

impl Mentions {
    /// No one is mentioned.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Mention everyone in the group.
    #[must_use]
    pub fn all() -> Self {
        Self {
            at_mobiles: Vec::new(),
            is_at_all: true,
        }
    }

    /// Mention the members registered with these mobile numbers.
    #[must_use]
    pub fn mobiles<I, S>(mobiles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            at_mobiles: mobiles.into_iter().map(Into::into).collect(),
            is_at_all: false,
        }
    }

    #[must_use]
    pub fn with_mobile(mut self, mobile: impl Into<String>) -> Self {
        self.at_mobiles.push(mobile.into());
        self
    }

    #[must_use]
    pub fn with_all(mut self, is_at_all: bool) -> Self {
        self.is_at_all = is_at_all;
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.at_mobiles.is_empty() && !self.is_at_all
    }

    #[must_use]
    pub fn at_mobiles(&self) -> &[String] {
        &self.at_mobiles
    }

    #[must_use]
    pub fn is_at_all(&self) -> bool {
        self.is_at_all
    }

    fn validate(&self) -> Result<(), RobotError> {
        for mobile in &self.at_mobiles {
            require("at mobile", mobile)?;
        }
        Ok(())
    }
}

/// Layout of the buttons on an independent-jump action card.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ButtonOrientation {
    #[default]
    Vertical,
    Horizontal,
}

impl ButtonOrientation {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ButtonOrientation::Vertical => "0",
            ButtonOrientation::Horizontal => "1",
        }
    }
}

impl Serialize for ButtonOrientation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One button of an independent-jump action card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionButton {
    title: String,
    #[serde(rename = "actionURL")]
    action_url: String,
}

impl ActionButton {
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn action_url(&self) -> &str {
        &self.action_url
    }

    #[must_use]
    pub fn new(title: impl Into<String>, action_url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            action_url: action_url.into(),
        }
    }
}

impl<T: Into<String>, U: Into<String>> From<(T, U)> for ActionButton {
    fn from((title, action_url): (T, U)) -> Self {
        Self::new(title, action_url)
    }
}

/// One entry of a feed card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedLink {
    title: String,
    #[serde(rename = "messageURL")]
    message_url: String,
    #[serde(rename = "picURL")]
    pic_url: String,
}

impl FeedLink {
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn message_url(&self) -> &str {
        &self.message_url
    }

    #[must_use]
    pub fn pic_url(&self) -> &str {
        &self.pic_url
    }

    #[must_use]
    pub fn new(
        title: impl Into<String>,
        message_url: impl Into<String>,
        pic_url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            message_url: message_url.into(),
            pic_url: pic_url.into(),
        }
    }
}

impl<T, U, V> From<(T, U, V)> for FeedLink
where
    T: Into<String>,
    U: Into<String>,
    V: Into<String>,
{
    fn from((title, message_url, pic_url): (T, U, V)) -> Self {
        Self::new(title, message_url, pic_url)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextBody {
    content: String,
}

impl TextBody {
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkBody {
    title: String,
    text: String,
    message_url: String,
    pic_url: String,
}

impl LinkBody {
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn message_url(&self) -> &str {
        &self.message_url
    }

    #[must_use]
    pub fn pic_url(&self) -> &str {
        &self.pic_url
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkdownBody {
    title: String,
    text: String,
}

impl MarkdownBody {
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WholeActionCardBody {
    title: String,
    text: String,
    #[serde(rename = "singleTitle")]
    single_title: String,
    #[serde(rename = "singleURL")]
    single_url: String,
}

impl WholeActionCardBody {
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn single_title(&self) -> &str {
        &self.single_title
    }

    #[must_use]
    pub fn single_url(&self) -> &str {
        &self.single_url
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeparatedActionCardBody {
    title: String,
    text: String,
    #[serde(rename = "btnOrientation")]
    btn_orientation: ButtonOrientation,
    btns: Vec<ActionButton>,
}

impl SeparatedActionCardBody {
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn btn_orientation(&self) -> ButtonOrientation {
        self.btn_orientation
    }

    #[must_use]
    pub fn btns(&self) -> &[ActionButton] {
        &self.btns
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedCardBody {
    links: Vec<FeedLink>,
}

impl FeedCardBody {
    #[must_use]
    pub fn links(&self) -> &[FeedLink] {
        &self.links
    }
}

/// A robot message. Build one with the constructor for its kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    Text { text: TextBody, at: Mentions },
    Link(LinkBody),
    Markdown { markdown: MarkdownBody, at: Mentions },
    WholeActionCard(WholeActionCardBody),
    SeparatedActionCard(SeparatedActionCardBody),
    FeedCard(FeedCardBody),
}

impl Message {
    /// # Errors
    ///
    /// [`RobotError::Validation`] if `content` is blank or a mentioned mobile is blank.
    pub fn text(content: impl Into<String>, mentions: Mentions) -> Result<Self, RobotError> {
        let content = content.into();
        require("text content", &content)?;
        mentions.validate()?;
        Ok(Message::Text {
            text: TextBody { content },
            at: mentions,
        })
    }

    /// A link card. Without a picture the card is rendered text-only.
    ///
    /// # Errors
    ///
    /// [`RobotError::Validation`] if the title, text or target URL is blank.
    pub fn link(
        title: impl Into<String>,
        text: impl Into<String>,
        message_url: impl Into<String>,
        pic_url: Option<&str>,
    ) -> Result<Self, RobotError> {
        let body = LinkBody {
            title: title.into(),
            text: text.into(),
            message_url: message_url.into(),
            pic_url: pic_url.unwrap_or_default().to_string(),
        };
        require("link title", &body.title)?;
        require("link text", &body.text)?;
        require("link message URL", &body.message_url)?;
        Ok(Message::Link(body))
    }

    /// # Errors
    ///
    /// [`RobotError::Validation`] if the title or text is blank.
    pub fn markdown(
        title: impl Into<String>,
        text: impl Into<String>,
        mentions: Mentions,
    ) -> Result<Self, RobotError> {
        let markdown = MarkdownBody {
            title: title.into(),
            text: text.into(),
        };
        require("markdown title", &markdown.title)?;
        require("markdown text", &markdown.text)?;
        mentions.validate()?;
        Ok(Message::Markdown {
            markdown,
            at: mentions,
        })
    }

    /// An action card where the whole card jumps to `single_url`.
    ///
    /// # Errors
    ///
    /// [`RobotError::Validation`] if any field is blank.
    pub fn whole_action_card(
        title: impl Into<String>,
        text: impl Into<String>,
        single_title: impl Into<String>,
        single_url: impl Into<String>,
    ) -> Result<Self, RobotError> {
        let body = WholeActionCardBody {
            title: title.into(),
            text: text.into(),
            single_title: single_title.into(),
            single_url: single_url.into(),
        };
        require("action card title", &body.title)?;
        require("action card text", &body.text)?;
        require("action card button title", &body.single_title)?;
        require("action card button URL", &body.single_url)?;
        Ok(Message::WholeActionCard(body))
    }

    /// An action card with independently tappable buttons, in the given order.
    ///
    /// # Errors
    ///
    /// [`RobotError::Validation`] if the title or text is blank, fewer than
    /// [`MIN_SEPARATED_BUTTONS`] buttons are given, or a button has a blank
    /// title or URL.
    pub fn separated_action_card(
        title: impl Into<String>,
        text: impl Into<String>,
        buttons: Vec<ActionButton>,
        orientation: ButtonOrientation,
    ) -> Result<Self, RobotError> {
        let body = SeparatedActionCardBody {
            title: title.into(),
            text: text.into(),
            btn_orientation: orientation,
            btns: buttons,
        };
        require("action card title", &body.title)?;
        require("action card text", &body.text)?;
        if body.btns.len() < MIN_SEPARATED_BUTTONS {
            return Err(RobotError::Validation(format!(
                "separated action card needs at least {MIN_SEPARATED_BUTTONS} buttons, got {}",
                body.btns.len()
            )));
        }
        for button in &body.btns {
            require("button title", &button.title)?;
            require("button URL", &button.action_url)?;
        }
        Ok(Message::SeparatedActionCard(body))
    }

    /// # Errors
    ///
    /// [`RobotError::Validation`] if `links` is empty or a link has a blank
    /// title or target URL. The picture URL may be empty.
    pub fn feed_card(links: Vec<FeedLink>) -> Result<Self, RobotError> {
        if links.is_empty() {
            return Err(RobotError::Validation(
                "feed card needs at least one link".to_string(),
            ));
        }
        for link in &links {
            require("feed link title", &link.title)?;
            require("feed link message URL", &link.message_url)?;
        }
        Ok(Message::FeedCard(FeedCardBody { links }))
    }

    /// The `msgtype` discriminator sent on the wire.
    #[must_use]
    pub fn msgtype(&self) -> &'static str {
        match self {
            Message::Text { .. } => "text",
            Message::Link(_) => "link",
            Message::Markdown { .. } => "markdown",
            Message::WholeActionCard(_) | Message::SeparatedActionCard(_) => "actionCard",
            Message::FeedCard(_) => "feedCard",
        }
    }

    /// Serialized request body, exactly as both clients send it.
    ///
    /// # Errors
    ///
    /// [`RobotError::Validation`] if the message cannot be serialized.
    pub fn to_body(&self) -> Result<Vec<u8>, RobotError> {
        serde_json::to_vec(self)
            .map_err(|e| RobotError::Validation(format!("failed to serialize message: {e}")))
    }

    fn envelope(&self) -> Envelope<'_> {
        let mut envelope = Envelope {
            msgtype: self.msgtype(),
            text: None,
            link: None,
            markdown: None,
            action_card: None,
            feed_card: None,
            at: None,
        };
        match self {
            Message::Text { text, at } => {
                envelope.text = Some(text);
                envelope.at = Some(at);
            }
            Message::Link(body) => envelope.link = Some(body),
            Message::Markdown { markdown, at } => {
                envelope.markdown = Some(markdown);
                // Plain markdown keeps the minimal shape; `at` only travels when used.
                if !at.is_empty() {
                    envelope.at = Some(at);
                }
            }
            Message::WholeActionCard(body) => {
                envelope.action_card = Some(ActionCardRef::Whole(body));
            }
            Message::SeparatedActionCard(body) => {
                envelope.action_card = Some(ActionCardRef::Separated(body));
            }
            Message::FeedCard(body) => envelope.feed_card = Some(body),
        }
        envelope
    }
}

impl Serialize for Message {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.envelope().serialize(serializer)
    }
}

#[derive(Serialize)]
struct Envelope<'a> {
    msgtype: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a TextBody>,
    #[serde(skip_serializing_if = "Option::is_none")]
    link: Option<&'a LinkBody>,
    #[serde(skip_serializing_if = "Option::is_none")]
    markdown: Option<&'a MarkdownBody>,
    #[serde(rename = "actionCard", skip_serializing_if = "Option::is_none")]
    action_card: Option<ActionCardRef<'a>>,
    #[serde(rename = "feedCard", skip_serializing_if = "Option::is_none")]
    feed_card: Option<&'a FeedCardBody>,
    #[serde(skip_serializing_if = "Option::is_none")]
    at: Option<&'a Mentions>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum ActionCardRef<'a> {
    Whole(&'a WholeActionCardBody),
    Separated(&'a SeparatedActionCardBody),
}

fn require(field: &str, value: &str) -> Result<(), RobotError> {
    if value.trim().is_empty() {
        return Err(RobotError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}
