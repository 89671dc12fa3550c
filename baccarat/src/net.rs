//! Networking layer for client-server communication.
//!
//! Clients speak a newline-delimited text protocol of `|` separated fields.
//! The server runs on `tokio` with one session per connection.

/// Blocking TCP client for talking to a table server.
pub mod client;

/// Errors raised while parsing command lines.
pub mod errors;

/// Commands and responses of the text protocol.
pub mod messages;

/// Async TCP server with a bounded number of concurrent sessions.
pub mod server;

/// Per-connection command interpreter.
pub mod session;

/// Line framing for sync and async streams.
pub mod utils;
