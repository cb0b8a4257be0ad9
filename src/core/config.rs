use std::env;
use std::fmt;
use std::time::Duration;

use crate::errors::RobotError;

/// Webhook endpoint of the DingTalk custom robot.
pub const DEFAULT_BASE_URL: &str = "https://oapi.dingtalk.com/robot/send";

/// Transport timeout applied when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Credentials and transport settings for one robot.
///
/// `Debug` output redacts the signing secret.
#[derive(Clone)]
pub struct RobotConfig {
    pub access_token: String,
    pub secret: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl RobotConfig {
    #[must_use]
    pub fn new(access_token: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            secret: secret.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Point the client at a different endpoint, e.g. a proxy or a test server.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Reads `DDBOT_ACCESS_TOKEN` and `DDBOT_SECRET`, plus the optional
    /// `DDBOT_TIMEOUT_SECS` and `DDBOT_BASE_URL`.
    ///
    /// # Errors
    ///
    /// Returns [`RobotError::Config`] when a required variable is missing or
    /// the timeout is not a whole number of seconds.
    pub fn from_env() -> Result<Self, RobotError> {
        let mut config = Self::new(
            env::var("DDBOT_ACCESS_TOKEN")
                .map_err(|e| RobotError::Config(format!("DDBOT_ACCESS_TOKEN: {e}")))?,
            env::var("DDBOT_SECRET")
                .map_err(|e| RobotError::Config(format!("DDBOT_SECRET: {e}")))?,
        );

        if let Ok(raw) = env::var("DDBOT_TIMEOUT_SECS") {
            let secs = raw
                .trim()
                .parse::<u64>()
                .map_err(|e| RobotError::Config(format!("DDBOT_TIMEOUT_SECS: {e}")))?;
            config.timeout = Duration::from_secs(secs);
        }

        if let Ok(base_url) = env::var("DDBOT_BASE_URL") {
            config.base_url = base_url;
        }

        Ok(config)
    }
}

impl fmt::Debug for RobotConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RobotConfig")
            .field("access_token", &self.access_token)
            .field("secret", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_defaults() {
        let config = RobotConfig::new("token", "secret");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(20));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = RobotConfig::new("token", "SEC-very-secret");
        let rendered = format!("{config:?}");
        assert!(rendered.contains("token"));
        assert!(!rendered.contains("SEC-very-secret"));
    }

    #[test]
    fn test_builders_override_defaults() {
        let config = RobotConfig::new("t", "s")
            .with_timeout(Duration::from_millis(250))
            .with_base_url("http://127.0.0.1:9/robot/send");
        assert_eq!(config.timeout, Duration::from_millis(250));
        assert_eq!(config.base_url, "http://127.0.0.1:9/robot/send");
    }

    const ENV_VARS: [&str; 4] = [
        "DDBOT_ACCESS_TOKEN",
        "DDBOT_SECRET",
        "DDBOT_TIMEOUT_SECS",
        "DDBOT_BASE_URL",
    ];

    /// Restores a clean `DDBOT_*` environment when dropped, even if an assertion fails.
    struct EnvGuard;

    impl EnvGuard {
        fn set(vars: &[(&str, &str)]) -> Self {
            clear_env();
            for (key, value) in vars {
                // SAFETY: this is the only test in the crate that touches DDBOT_* variables.
                unsafe { env::set_var(key, value) };
            }
            EnvGuard
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            clear_env();
        }
    }

    fn clear_env() {
        for key in ENV_VARS {
            // SAFETY: see EnvGuard::set.
            unsafe { env::remove_var(key) };
        }
    }

    // All env cases run in one test so they cannot race each other.
    #[test]
    fn test_from_env() {
        {
            let _guard = EnvGuard::set(&[
                ("DDBOT_ACCESS_TOKEN", "env-token"),
                ("DDBOT_SECRET", "env-secret"),
                ("DDBOT_TIMEOUT_SECS", " 5 "),
                ("DDBOT_BASE_URL", "http://127.0.0.1:8080/robot/send"),
            ]);
            let config = RobotConfig::from_env().unwrap();
            assert_eq!(config.access_token, "env-token");
            assert_eq!(config.secret, "env-secret");
            assert_eq!(config.timeout, Duration::from_secs(5));
            assert_eq!(config.base_url, "http://127.0.0.1:8080/robot/send");
        }

        {
            let _guard = EnvGuard::set(&[("DDBOT_ACCESS_TOKEN", "t"), ("DDBOT_SECRET", "s")]);
            let config = RobotConfig::from_env().unwrap();
            assert_eq!(config.timeout, DEFAULT_TIMEOUT);
            assert_eq!(config.base_url, DEFAULT_BASE_URL);
        }

        {
            let _guard = EnvGuard::set(&[("DDBOT_SECRET", "s")]);
            match RobotConfig::from_env() {
                Err(RobotError::Config(msg)) => assert!(msg.contains("DDBOT_ACCESS_TOKEN")),
                other => panic!("Unexpected result: {other:?}"),
            }
        }

        {
            let _guard = EnvGuard::set(&[("DDBOT_ACCESS_TOKEN", "t")]);
            match RobotConfig::from_env() {
                Err(RobotError::Config(msg)) => assert!(msg.contains("DDBOT_SECRET")),
                other => panic!("Unexpected result: {other:?}"),
            }
        }

        {
            let _guard = EnvGuard::set(&[
                ("DDBOT_ACCESS_TOKEN", "t"),
                ("DDBOT_SECRET", "s"),
                ("DDBOT_TIMEOUT_SECS", "abc"),
            ]);
            match RobotConfig::from_env() {
                Err(RobotError::Config(msg)) => assert!(msg.contains("DDBOT_TIMEOUT_SECS")),
                other => panic!("Unexpected result: {other:?}"),
            }
        }
    }
}
