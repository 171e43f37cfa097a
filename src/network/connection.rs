//! Connection Handler
//!
//! Buffered TCP stream to one device.

use std::io::{BufReader, BufWriter};
use std::net::{Shutdown, SocketAddr, TcpStream, ToSocketAddrs};

use crate::config::Config;
use crate::error::{Result, RosError};
use crate::protocol::{read_sentence, write_sentence, Command, Reply};

/// A single TCP connection to the device
pub struct Connection {
    /// TCP stream reader (buffered for efficiency)
    reader: BufReader<TcpStream>,

    /// TCP stream writer (buffered for efficiency)
    writer: BufWriter<TcpStream>,

    /// Bound on incoming word size
    max_word_len: usize,

    /// Peer address for logging
    peer_addr: String,
}

impl Connection {
    /// Open a connection to the device named by `config`
    ///
    /// Every resolved address is tried in turn with the configured connect
    /// timeout; the last failure is reported.
    pub fn open(config: &Config) -> Result<Self> {
        let addr = config.address();
        let addrs: Vec<SocketAddr> = addr
            .to_socket_addrs()
            .map_err(|e| RosError::Connect {
                addr: addr.clone(),
                source: e,
            })?
            .collect();

        let mut last_err = None;
        for sock_addr in &addrs {
            let attempt = match config.connect_timeout() {
                Some(timeout) => TcpStream::connect_timeout(sock_addr, timeout),
                None => TcpStream::connect(sock_addr),
            };
            match attempt {
                Ok(stream) => return Self::from_stream(stream, config),
                Err(e) => {
                    tracing::debug!("Connect to {} failed: {}", sock_addr, e);
                    last_err = Some(e);
                }
            }
        }

        let source = last_err.unwrap_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, "no addresses resolved")
        });
        Err(RosError::Connect { addr, source })
    }

    /// Wrap an established stream, applying the configured timeouts
    pub fn from_stream(stream: TcpStream, config: &Config) -> Result<Self> {
        // Get peer address for logging before we split the stream
        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        // Disable Nagle's algorithm; sentences are small and latency bound
        stream.set_nodelay(true)?;
        stream.set_read_timeout(config.read_timeout())?;
        stream.set_write_timeout(config.write_timeout())?;

        // Clone stream for separate read/write handles
        let read_stream = stream.try_clone()?;
        let write_stream = stream;

        tracing::debug!("Connected to {}", peer_addr);

        Ok(Self {
            reader: BufReader::new(read_stream),
            writer: BufWriter::new(write_stream),
            max_word_len: config.max_word_len,
            peer_addr,
        })
    }

    /// Send a command sentence
    pub fn send(&mut self, command: &Command) -> Result<()> {
        tracing::trace!("-> {} {:?}", self.peer_addr, command.redacted());
        write_sentence(&mut self.writer, command.to_words())
    }

    /// Receive and decode one reply sentence
    ///
    /// A closed stream surfaces as `ConnectionClosed`, never as an empty reply.
    pub fn receive(&mut self) -> Result<Reply> {
        let sentence = read_sentence(&mut self.reader, self.max_word_len)?;
        let reply = Reply::from_sentence(&sentence)?;
        tracing::trace!("<- {} {:?}", self.peer_addr, reply.tag());
        Ok(reply)
    }

    /// Close both directions; errors are ignored since the peer may be gone
    pub fn shutdown(&mut self) {
        let stream = self.reader.get_ref();
        if let Err(e) = stream.shutdown(Shutdown::Both) {
            tracing::trace!("Shutdown of {} reported: {}", self.peer_addr, e);
        }
        tracing::debug!("Disconnected from {}", self.peer_addr);
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }
}
