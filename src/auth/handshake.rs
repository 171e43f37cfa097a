//! Login state machine
//!
//! ```text
//!                 connect()            plain_login() /
//! Disconnected ─────────────► Connected ──────────────► LoginSent(m)
//!      ▲                                challenge_login()     │
//!      │ reset()                                    !done     │  !trap / error
//!      │                               ┌──────────────────────┴─────────┐
//!      │                               ▼                                ▼
//!      └──────────────────────── Authenticated(m)                    Failed
//! ```
//!
//! A failed plain login poisons the socket, so the `Auto` flow resets to
//! `Disconnected` and opens a second connection for the challenge attempt.

use crate::config::{Config, LoginMethod};
use crate::error::{Result, RosError};
use crate::network::Connection;
use crate::protocol::{Command, Record, Reply};

use super::challenge::challenge_response;

/// Handshake variant actually used
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMethod {
    /// `/login =name= =password=`
    Plain,

    /// `/login` then `/login =name= =response=`
    Challenge,
}

/// Login progress of one session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginState {
    Disconnected,
    Connected,
    LoginSent(AuthMethod),
    Authenticated(AuthMethod),
    Failed,
}

/// Result of one login attempt that did not hit a transport error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Authenticated,

    /// The device refused; carries its reason
    Rejected(String),
}

/// Drives the login handshake for one session
pub struct Handshake<'a> {
    config: &'a Config,
    state: LoginState,
}

impl<'a> Handshake<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            state: LoginState::Disconnected,
        }
    }

    pub fn state(&self) -> LoginState {
        self.state
    }

    fn transition(&mut self, next: LoginState) {
        tracing::trace!("Login state {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    /// Run the configured login flow to completion
    ///
    /// On success the returned connection is authenticated. On failure
    /// every socket opened along the way has been shut down.
    pub fn run(&mut self) -> Result<Connection> {
        match self.config.login_method {
            LoginMethod::Plain => self.single(AuthMethod::Plain),
            LoginMethod::Challenge => self.single(AuthMethod::Challenge),
            LoginMethod::Auto => self.auto(),
        }
    }

    /// Plain first; on any failure, challenge-response on a fresh socket
    fn auto(&mut self) -> Result<Connection> {
        let mut conn = self.connect()?;
        match self.plain_login(&mut conn) {
            Ok(Outcome::Authenticated) => return Ok(conn),
            Ok(Outcome::Rejected(reason)) => {
                tracing::warn!(
                    "Plain login to {} rejected ({}), retrying with challenge-response",
                    conn.peer_addr(),
                    reason
                );
            }
            Err(e) => {
                tracing::warn!(
                    "Plain login to {} failed ({}), retrying with challenge-response",
                    conn.peer_addr(),
                    e
                );
            }
        }
        conn.shutdown();
        self.reset();

        let mut conn = self.connect()?;
        let outcome = self.challenge_login(&mut conn);
        Self::settle(conn, outcome)
    }

    fn single(&mut self, method: AuthMethod) -> Result<Connection> {
        let mut conn = self.connect()?;
        let outcome = match method {
            AuthMethod::Plain => self.plain_login(&mut conn),
            AuthMethod::Challenge => self.challenge_login(&mut conn),
        };
        Self::settle(conn, outcome)
    }

    /// Keep the connection on success, close it otherwise
    fn settle(mut conn: Connection, outcome: Result<Outcome>) -> Result<Connection> {
        match outcome {
            Ok(Outcome::Authenticated) => Ok(conn),
            Ok(Outcome::Rejected(reason)) => {
                conn.shutdown();
                Err(RosError::AuthenticationFailed(reason))
            }
            Err(e) => {
                conn.shutdown();
                Err(e)
            }
        }
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Disconnected → Connected
    pub fn connect(&mut self) -> Result<Connection> {
        match Connection::open(self.config) {
            Ok(conn) => {
                self.transition(LoginState::Connected);
                Ok(conn)
            }
            Err(e) => {
                self.transition(LoginState::Failed);
                Err(e)
            }
        }
    }

    /// Back to Disconnected after the caller dropped the connection
    pub fn reset(&mut self) {
        self.transition(LoginState::Disconnected);
    }

    /// Connected → LoginSent(Plain) → Authenticated | Failed
    ///
    /// Pre-6.43 firmware ignores the password and answers `!done =ret=`;
    /// that challenge is answered on the same socket.
    pub fn plain_login(&mut self, conn: &mut Connection) -> Result<Outcome> {
        self.expect_connected()?;
        let command = Command::new("/login")
            .attribute("name", &self.config.username)
            .attribute("password", &self.config.password);

        self.transition(LoginState::LoginSent(AuthMethod::Plain));
        let reply = self.exchange(conn, &command)?;

        match reply {
            Reply::Done(record) => match record.get("ret") {
                Some(challenge) => {
                    tracing::debug!("Device answered plain login with a challenge");
                    let challenge = challenge.to_string();
                    self.respond(conn, &challenge)
                }
                None => {
                    self.transition(LoginState::Authenticated(AuthMethod::Plain));
                    Ok(Outcome::Authenticated)
                }
            },
            other => Ok(self.reject(other)),
        }
    }

    /// Connected → LoginSent(Challenge) → Authenticated | Failed
    pub fn challenge_login(&mut self, conn: &mut Connection) -> Result<Outcome> {
        self.expect_connected()?;
        self.transition(LoginState::LoginSent(AuthMethod::Challenge));
        let reply = self.exchange(conn, &Command::new("/login"))?;

        match reply {
            Reply::Done(record) => match record.get("ret") {
                Some(challenge) => {
                    let challenge = challenge.to_string();
                    self.respond(conn, &challenge)
                }
                None => {
                    self.transition(LoginState::Failed);
                    Ok(Outcome::Rejected("device offered no login challenge".to_string()))
                }
            },
            other => Ok(self.reject(other)),
        }
    }

    /// Send `=response=` for a challenge and read the verdict
    fn respond(&mut self, conn: &mut Connection, challenge: &str) -> Result<Outcome> {
        self.transition(LoginState::LoginSent(AuthMethod::Challenge));
        let response = match challenge_response(&self.config.password, challenge) {
            Ok(response) => response,
            Err(e) => {
                self.transition(LoginState::Failed);
                return Ok(Outcome::Rejected(e.to_string()));
            }
        };

        let command = Command::new("/login")
            .attribute("name", &self.config.username)
            .attribute("response", &response);

        match self.exchange(conn, &command)? {
            Reply::Done(_) => {
                self.transition(LoginState::Authenticated(AuthMethod::Challenge));
                Ok(Outcome::Authenticated)
            }
            other => Ok(self.reject(other)),
        }
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn expect_connected(&self) -> Result<()> {
        if self.state == LoginState::Connected {
            Ok(())
        } else {
            Err(RosError::AuthenticationFailed(format!(
                "login attempted in state {:?}",
                self.state
            )))
        }
    }

    /// Send one login sentence and read the single reply to it
    fn exchange(&mut self, conn: &mut Connection, command: &Command) -> Result<Reply> {
        let result = conn.send(command).and_then(|_| conn.receive());
        if result.is_err() {
            self.transition(LoginState::Failed);
        }
        result
    }

    fn reject(&mut self, reply: Reply) -> Outcome {
        self.transition(LoginState::Failed);
        let reason = match reply {
            Reply::Trap(record) => trap_message(&record),
            Reply::Fatal(reason) => reason,
            other => format!("unexpected {} reply to /login", other.tag()),
        };
        Outcome::Rejected(reason)
    }
}

fn trap_message(record: &Record) -> String {
    record
        .get("message")
        .unwrap_or("login rejected")
        .to_string()
}
