//! Tests for session lifecycle
//!
//! These tests verify:
//! - disconnect() is idempotent and safe before connect()
//! - Commands are refused while not authenticated
//! - Reconnecting replaces the previous connection

use rosapi::auth::LoginState;
use rosapi::{Config, RosError, Session};

use crate::common::{done, MockDevice};

#[test]
fn test_disconnect_before_connect() {
    let mut session = Session::new(Config::default());
    session.disconnect();
    session.disconnect();
    assert_eq!(session.state(), LoginState::Disconnected);
}

#[test]
fn test_disconnect_twice() {
    let device = MockDevice::spawn(vec![vec![done()]]);

    let mut session = Session::open(device.config()).unwrap();
    assert!(session.is_authenticated());

    session.disconnect();
    session.disconnect();
    assert!(!session.is_authenticated());
    assert_eq!(session.auth_method(), None);
}

#[test]
fn test_execute_before_connect() {
    let mut session = Session::new(Config::default());
    let result = session.execute("/user/print", Vec::<(&str, &str)>::new());
    assert!(matches!(result, Err(RosError::NotConnected)));
}

#[test]
fn test_execute_after_disconnect() {
    let device = MockDevice::spawn(vec![vec![done()]]);

    let mut session = Session::open(device.config()).unwrap();
    session.disconnect();

    let result = session.execute("/user/print", Vec::<(&str, &str)>::new());
    assert!(matches!(result, Err(RosError::NotConnected)));
}

#[test]
fn test_reconnect_opens_fresh_connection() {
    let device = MockDevice::spawn(vec![vec![done()], vec![done()]]);

    let mut session = Session::open(device.config()).unwrap();
    session.connect().unwrap();
    assert!(session.is_authenticated());

    assert_eq!(device.next().conn, 0);
    assert_eq!(device.next().conn, 1);
}

#[test]
fn test_invalid_config_is_rejected_before_connecting() {
    let config = Config::builder().host("").build();
    let mut session = Session::new(config);

    let result = session.connect();
    assert!(matches!(result, Err(RosError::Config(_))));
    assert_eq!(session.state(), LoginState::Disconnected);
}

#[test]
fn test_drop_closes_connection() {
    let device = MockDevice::spawn(vec![vec![done()], vec![done()]]);

    {
        let _session = Session::open(device.config()).unwrap();
    }

    // The device only accepts the second connection once the first closed
    let session = Session::open(device.config()).unwrap();
    assert!(session.is_authenticated());
}
