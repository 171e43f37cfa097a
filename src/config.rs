//! Configuration for rosapi
//!
//! Connection parameters for one device, with sensible defaults.
//! Credentials always travel inside a [`Config`]; nothing is read from
//! globals.

use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{Result, RosError};

/// Default port of the binary API service
pub const DEFAULT_PORT: u16 = 8728;

/// Main configuration for a device session
#[derive(Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Device Address
    // -------------------------------------------------------------------------
    /// Hostname or IP address of the device
    pub host: String,

    /// TCP port of the API service
    pub port: u16,

    // -------------------------------------------------------------------------
    // Credentials
    // -------------------------------------------------------------------------
    pub username: String,

    /// Never printed by `Debug`
    pub password: String,

    /// Which login handshake(s) to attempt
    pub login_method: LoginMethod,

    // -------------------------------------------------------------------------
    // Network Configuration
    // -------------------------------------------------------------------------
    /// TCP connect timeout (milliseconds)
    pub connect_timeout_ms: u64,

    /// Socket read timeout (milliseconds)
    pub read_timeout_ms: u64,

    /// Socket write timeout (milliseconds)
    pub write_timeout_ms: u64,

    /// Largest word accepted from the device (bytes)
    pub max_word_len: usize,
}

/// Login handshake selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginMethod {
    /// Plain credentials first, then challenge-response on a fresh connection
    #[default]
    Auto,

    /// Plain credentials only (firmware 6.43 and later)
    Plain,

    /// MD5 challenge-response only (legacy firmware)
    Challenge,
}

impl std::str::FromStr for LoginMethod {
    type Err = RosError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(LoginMethod::Auto),
            "plain" => Ok(LoginMethod::Plain),
            "challenge" => Ok(LoginMethod::Challenge),
            other => Err(RosError::Config(format!("unknown login method: {}", other))),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "192.168.88.1".to_string(),
            port: DEFAULT_PORT,
            username: "admin".to_string(),
            password: String::new(),
            login_method: LoginMethod::Auto,
            connect_timeout_ms: 3000,
            read_timeout_ms: 3000,
            write_timeout_ms: 3000,
            max_word_len: 16 * 1024 * 1024, // 16 MB
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("login_method", &self.login_method)
            .field("connect_timeout_ms", &self.connect_timeout_ms)
            .field("read_timeout_ms", &self.read_timeout_ms)
            .field("write_timeout_ms", &self.write_timeout_ms)
            .field("max_word_len", &self.max_word_len)
            .finish()
    }
}

/// Device profile as stored on disk or posted by a web endpoint
#[derive(Debug, Deserialize)]
struct DeviceProfile {
    ip: String,
    #[serde(default)]
    port: Option<u16>,
    username: String,
    password: String,
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Parse a JSON device profile: `{"ip", "port", "username", "password"}`
    ///
    /// A missing `port` falls back to [`DEFAULT_PORT`].
    pub fn from_json_str(json: &str) -> Result<Self> {
        let profile: DeviceProfile = serde_json::from_str(json)?;
        let config = Config {
            host: profile.ip,
            port: profile.port.unwrap_or(DEFAULT_PORT),
            username: profile.username,
            password: profile.password,
            ..Config::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON device profile from a file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| {
            RosError::Config(format!("cannot read profile {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&json)
    }

    /// Reject configurations that cannot possibly connect
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(RosError::Config("host must not be empty".to_string()));
        }
        if self.port == 0 {
            return Err(RosError::Config("port must not be zero".to_string()));
        }
        if self.username.is_empty() {
            return Err(RosError::Config("username must not be empty".to_string()));
        }
        if self.max_word_len == 0 {
            return Err(RosError::Config("max_word_len must not be zero".to_string()));
        }
        Ok(())
    }

    /// `host:port` as used for address resolution
    pub fn address(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            // bare IPv6 literal
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }

    /// A timeout of zero disables it
    pub fn connect_timeout(&self) -> Option<Duration> {
        millis(self.connect_timeout_ms)
    }

    pub fn read_timeout(&self) -> Option<Duration> {
        millis(self.read_timeout_ms)
    }

    pub fn write_timeout(&self) -> Option<Duration> {
        millis(self.write_timeout_ms)
    }
}

fn millis(ms: u64) -> Option<Duration> {
    (ms > 0).then(|| Duration::from_millis(ms))
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the device host (name or IP address)
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    /// Set the API port
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Set the login user name
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.config.username = username.into();
        self
    }

    /// Set the login password
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.config.password = password.into();
        self
    }

    /// Set the login handshake selection
    pub fn login_method(mut self, method: LoginMethod) -> Self {
        self.config.login_method = method;
        self
    }

    /// Set the connect timeout (in milliseconds)
    pub fn connect_timeout_ms(mut self, ms: u64) -> Self {
        self.config.connect_timeout_ms = ms;
        self
    }

    /// Set the read timeout (in milliseconds)
    pub fn read_timeout_ms(mut self, ms: u64) -> Self {
        self.config.read_timeout_ms = ms;
        self
    }

    /// Set the write timeout (in milliseconds)
    pub fn write_timeout_ms(mut self, ms: u64) -> Self {
        self.config.write_timeout_ms = ms;
        self
    }

    /// Set the largest word accepted from the device (in bytes)
    pub fn max_word_len(mut self, len: usize) -> Self {
        self.config.max_word_len = len;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
