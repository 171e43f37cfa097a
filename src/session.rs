//! Session Module
//!
//! The caller-facing API: connect, execute commands, disconnect.
//!
//! ## Responsibilities
//! - Own the one TCP connection of a session
//! - Refuse commands until the login handshake succeeded
//! - Drop the connection on any transport or framing error
//! - Keep the connection after a `!trap`, skipping the rest of the trapped
//!   reply before the next command goes out

use crate::auth::{AuthMethod, Handshake, LoginState};
use crate::config::Config;
use crate::error::{Result, RosError};
use crate::network::Connection;
use crate::protocol::{Command, Record, Reply};

/// An API session with one device
///
/// ## Concurrency Model
///
/// The protocol is strictly request/response over one socket, so every call
/// takes `&mut self`: one outstanding command per session. Callers needing
/// parallelism open several sessions, each with its own login.
pub struct Session {
    /// Connection parameters and credentials
    config: Config,

    /// Open, authenticated connection (None once disconnected)
    conn: Option<Connection>,

    /// Login progress
    state: LoginState,

    /// The last reply ended at a `!trap` whose `!done` is still unread
    trap_pending: bool,
}

impl Session {
    /// Create a disconnected session
    pub fn new(config: Config) -> Self {
        Self {
            config,
            conn: None,
            state: LoginState::Disconnected,
            trap_pending: false,
        }
    }

    /// Create a session and log in
    pub fn open(config: Config) -> Result<Self> {
        let mut session = Self::new(config);
        session.connect()?;
        Ok(session)
    }

    /// Open the TCP connection and authenticate
    ///
    /// Any previous connection is closed first. On failure the session is
    /// left disconnected with no socket open.
    pub fn connect(&mut self) -> Result<()> {
        self.config.validate()?;
        self.disconnect();

        tracing::debug!(
            "Logging in to {} as {} ({:?})",
            self.config.address(),
            self.config.username,
            self.config.login_method
        );

        let mut handshake = Handshake::new(&self.config);
        let result = handshake.run();
        self.state = handshake.state();

        match result {
            Ok(conn) => {
                tracing::info!("Authenticated to {} via {:?}", conn.peer_addr(), self.auth_method());
                self.conn = Some(conn);
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Login to {} failed: {}", self.config.address(), e);
                self.state = LoginState::Disconnected;
                Err(e)
            }
        }
    }

    /// Execute a command with `key=value` parameters
    ///
    /// Keys starting with `?` are queries; see [`Command::with_params`] for
    /// how keys are turned into words. Returns the `!re` rows in arrival
    /// order.
    pub fn execute<I, K, V>(&mut self, path: &str, params: I) -> Result<Vec<Record>>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.execute_command(&Command::with_params(path, params))
    }

    /// Execute a prepared command
    pub fn execute_command(&mut self, command: &Command) -> Result<Vec<Record>> {
        if !self.is_authenticated() {
            return Err(RosError::NotConnected);
        }
        let conn = self.conn.as_mut().ok_or(RosError::NotConnected)?;

        let result = run_command(conn, command, &mut self.trap_pending);
        if let Err(ref e) = result {
            if e.is_fatal() {
                tracing::warn!("Dropping session to {} after error: {}", conn.peer_addr(), e);
                self.disconnect();
            }
        }
        result
    }

    /// Close the connection if open
    ///
    /// Idempotent and infallible; safe before or after a failed login.
    pub fn disconnect(&mut self) {
        if let Some(mut conn) = self.conn.take() {
            conn.shutdown();
        }
        self.state = LoginState::Disconnected;
        self.trap_pending = false;
    }

    pub fn is_authenticated(&self) -> bool {
        self.conn.is_some() && matches!(self.state, LoginState::Authenticated(_))
    }

    pub fn state(&self) -> LoginState {
        self.state
    }

    /// Which handshake succeeded, if any
    pub fn auth_method(&self) -> Option<AuthMethod> {
        match self.state {
            LoginState::Authenticated(method) => Some(method),
            _ => None,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("address", &self.config.address())
            .field("peer", &self.conn.as_ref().map(Connection::peer_addr))
            .field("state", &self.state)
            .finish()
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.disconnect();
    }
}

/// Send one command and collect its reply
///
/// A `!trap` is returned as soon as it arrives. The device still owes the
/// `!done` that closes the trapped reply; it is read off before the next
/// command is sent.
fn run_command(
    conn: &mut Connection,
    command: &Command,
    trap_pending: &mut bool,
) -> Result<Vec<Record>> {
    if *trap_pending {
        finish_trapped(conn)?;
        *trap_pending = false;
    }

    conn.send(command)?;

    let mut records = Vec::new();
    loop {
        match conn.receive()? {
            Reply::Re(record) => records.push(record),
            Reply::Empty => {}
            Reply::Done(_) => return Ok(records),
            Reply::Trap(record) => {
                tracing::debug!("{} trapped: {:?}", command.path(), record.get("message"));
                *trap_pending = true;
                return Err(Reply::trap_error(&record));
            }
            Reply::Fatal(reason) => return Err(RosError::RemoteFatal(reason)),
        }
    }
}

/// Discard what is left of a trapped reply, up to and including its `!done`
fn finish_trapped(conn: &mut Connection) -> Result<()> {
    loop {
        match conn.receive()? {
            Reply::Done(_) => return Ok(()),
            Reply::Fatal(reason) => return Err(RosError::RemoteFatal(reason)),
            other => tracing::trace!("Skipping {} after trap", other.tag()),
        }
    }
}
