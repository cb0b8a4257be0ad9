use serde::{Deserialize, Serialize};

/// Body returned by the robot endpoint. `errcode == 0` means the message was accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendResult {
    pub errcode: i64,
    #[serde(default)]
    pub errmsg: String,
}

impl SendResult {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.errcode == 0
    }
}
