//! A low-level TCP table client.
//!
//! This client is blocking and line-at-a-time, so it's mostly used as a
//! testing utility and by the bundled REPL.

use anyhow::{Error, bail};
use std::{
    io::BufReader,
    net::{SocketAddr, TcpStream},
    thread,
    time::Duration,
};

use super::{messages::Command, utils};
use crate::game::entities::{Chips, Side, Username};

/// Default timeout for reading from the server.
pub const READ_TIMEOUT: Duration = Duration::from_secs(10);

/// Default timeout for writing to the server.
pub const WRITE_TIMEOUT: Duration = Duration::from_secs(1);

pub struct Client {
    reader: BufReader<TcpStream>,
    stream: TcpStream,
}

impl Client {
    /// Connect to a table server.
    ///
    /// Tries three times with growing timeouts (100ms, 500ms, 1s) to ride
    /// out a server that's still starting up.
    ///
    /// # Errors
    ///
    /// Returns an error if no attempt succeeds.
    pub fn connect(addr: &SocketAddr) -> Result<Self, Error> {
        let mut connect_timeouts = vec![
            Duration::from_secs(1),
            Duration::from_millis(500),
            Duration::from_millis(100),
        ];
        while let Some(connect_timeout) = connect_timeouts.pop() {
            match TcpStream::connect_timeout(addr, connect_timeout) {
                Ok(stream) => {
                    stream.set_read_timeout(Some(READ_TIMEOUT))?;
                    stream.set_write_timeout(Some(WRITE_TIMEOUT))?;
                    let reader = BufReader::new(stream.try_clone()?);
                    return Ok(Self { reader, stream });
                }
                _ => thread::sleep(connect_timeout),
            }
        }
        bail!("couldn't connect to {addr}")
    }

    /// Send a raw line and wait for the single response line.
    pub fn send_line(&mut self, line: &str) -> Result<String, Error> {
        utils::write_line(&mut self.stream, line)?;
        self.recv()
    }

    pub fn send(&mut self, command: &Command) -> Result<String, Error> {
        self.send_line(&command.to_string())
    }

    pub fn recv(&mut self) -> Result<String, Error> {
        match utils::read_line(&mut self.reader) {
            Ok(Some(line)) => Ok(line),
            Ok(None) => bail!("server closed the connection"),
            Err(error) => bail!(error),
        }
    }

    pub fn login(&mut self, username: &Username, balance: Chips) -> Result<String, Error> {
        self.send(&Command::Login {
            username: username.clone(),
            balance,
        })
    }

    pub fn bet(&mut self, amount: Chips, username: &Username) -> Result<String, Error> {
        self.send(&Command::Bet {
            amount,
            username: username.clone(),
        })
    }

    pub fn deal(&mut self, side: Side, username: &Username) -> Result<String, Error> {
        self.send(&Command::Deal {
            side,
            username: username.clone(),
        })
    }

    /// Ask the server to shut down. The server never answers `exit`, so
    /// this only writes.
    pub fn exit(mut self) -> Result<(), Error> {
        utils::write_line(&mut self.stream, &Command::Exit.to_string())?;
        Ok(())
    }
}
