use thiserror::Error;

/// Remote error code returned when the signature (or keyword/IP policy) check fails.
pub const ERRCODE_SIGNATURE_REJECTED: i64 = 310_000;

#[derive(Debug, Error)]
pub enum RobotError {
    #[error("Invalid message: {0}")]
    Validation(String),

    #[error("Failed to deliver robot message: {0}")]
    Transport(#[from] TransportError),

    #[error("Robot API error {code}: {message}")]
    Remote { code: i64, message: String },

    #[error("Invalid robot configuration: {0}")]
    Config(String),
}

impl RobotError {
    /// True when the remote rejected the request's signature or security policy.
    #[must_use]
    pub fn is_signature_rejected(&self) -> bool {
        matches!(self, RobotError::Remote { code, .. } if *code == ERRCODE_SIGNATURE_REJECTED)
    }

    /// The remote `errcode`, if this error came from the robot API itself.
    #[must_use]
    pub fn remote_code(&self) -> Option<i64> {
        match self {
            RobotError::Remote { code, .. } => Some(*code),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Failed to build HTTP client: {0}")]
    Build(String),

    #[error("Failed to send HTTP request: {0}")]
    Request(String),

    #[error("HTTP request timed out: {0}")]
    Timeout(String),

    #[error("Unexpected HTTP status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode robot response: {body}")]
    Decode { body: String },
}

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            TransportError::Timeout(error.to_string())
        } else if error.is_builder() {
            TransportError::Build(error.to_string())
        } else {
            TransportError::Request(error.to_string())
        }
    }
}

impl From<reqwest::Error> for RobotError {
    fn from(error: reqwest::Error) -> Self {
        RobotError::Transport(error.into())
    }
}

pub type Result<T, E = RobotError> = std::result::Result<T, E>;
