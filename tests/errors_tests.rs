use ddbot::errors::{RobotError, TransportError};
use std::error::Error;

#[test]
fn test_robot_error_implements_error_trait() {
    // Verify RobotError implements the Error trait
    fn assert_error<T: Error>(_: &T) {}

    let error = RobotError::Validation("test error".to_string());
    assert_error(&error);
}

#[test]
fn test_robot_error_display() {
    let error = RobotError::Validation("text content must not be empty".to_string());
    assert_eq!(
        format!("{error}"),
        "Invalid message: text content must not be empty"
    );

    let error = RobotError::Remote {
        code: 300_001,
        message: "token invalid".to_string(),
    };
    assert_eq!(format!("{error}"), "Robot API error 300001: token invalid");

    let error = RobotError::from(TransportError::Status {
        status: 503,
        body: "busy".to_string(),
    });
    assert_eq!(
        format!("{error}"),
        "Failed to deliver robot message: Unexpected HTTP status 503: busy"
    );
}

#[test]
fn test_transport_error_is_the_source() {
    let error = RobotError::from(TransportError::Timeout("deadline".to_string()));
    let source = error.source().expect("transport errors expose their cause");
    assert_eq!(source.to_string(), "HTTP request timed out: deadline");
}

#[test]
fn test_remote_code_accessors() {
    let rejected = RobotError::Remote {
        code: 310_000,
        message: "sign not match".to_string(),
    };
    assert!(rejected.is_signature_rejected());
    assert_eq!(rejected.remote_code(), Some(310_000));

    let local = RobotError::Validation("nope".to_string());
    assert!(!local.is_signature_rejected());
    assert_eq!(local.remote_code(), None);
}

#[test]
fn test_robot_error_from_conversions() {
    // We can't easily build a reqwest::Error directly, but we can verify
    // that the From<reqwest::Error> conversions exist
    #[allow(unused)]
    #[allow(clippy::items_after_statements)]
    fn _check_reqwest_conversion(err: reqwest::Error) -> RobotError {
        RobotError::from(err)
    }

    #[allow(unused)]
    #[allow(clippy::items_after_statements)]
    fn _check_transport_conversion(err: reqwest::Error) -> TransportError {
        TransportError::from(err)
    }
}
