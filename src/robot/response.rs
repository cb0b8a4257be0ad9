//! Turns a raw HTTP reply from the robot endpoint into a typed outcome.
//!
//! Both clients funnel their responses through [`interpret`], so blocking and
//! async sends classify failures the same way.

use tracing::{error, info, warn};

use crate::core::models::SendResult;
use crate::errors::{RobotError, TransportError};

/// Longest response body kept inside an error.
const MAX_ERROR_BODY: usize = 512;

/// Classify a response: non-2xx and undecodable bodies are transport failures,
/// a non-zero `errcode` is a remote rejection.
///
/// # Errors
///
/// [`TransportError::Status`], [`TransportError::Decode`] or [`RobotError::Remote`].
pub fn interpret(status: u16, body: &str) -> Result<SendResult, RobotError> {
    if !(200..300).contains(&status) {
        error!(status, "Robot endpoint returned non-success status");
        return Err(TransportError::Status {
            status,
            body: truncate(body),
        }
        .into());
    }

    let result: SendResult = serde_json::from_str(body).map_err(|e| {
        error!("Failed to parse robot response: {}", e);
        TransportError::Decode {
            body: truncate(body),
        }
    })?;

    if result.is_success() {
        info!(errmsg = %result.errmsg, "Robot message accepted");
        Ok(result)
    } else {
        warn!(
            errcode = result.errcode,
            errmsg = %result.errmsg,
            "Robot message rejected"
        );
        Err(RobotError::Remote {
            code: result.errcode,
            message: result.errmsg,
        })
    }
}

fn truncate(body: &str) -> String {
    if body.len() <= MAX_ERROR_BODY {
        return body.to_string();
    }
    let mut end = MAX_ERROR_BODY;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…", &body[..end])
}
