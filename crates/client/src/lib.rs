//! MetaTrader 4 client.
//!
//! Talks to an expert advisor running inside a MetaTrader 4 terminal over a
//! ZeroMQ `REQ` socket. Every call is one JSON request and one JSON reply;
//! the caller's thread blocks until the reply arrives or a timeout elapses.

pub mod account;
pub mod client;
pub mod config;
pub mod error;
pub mod orders;
pub mod protocol;
pub mod symbol;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use client::Mt4Client;
pub use config::{ClientConfig, ConfigError};
pub use error::{Mt4Error, RemoteError};
pub use orders::{ModifyOrder, NewOrder};
pub use protocol::{Action, Command};
pub use transport::ZmqTransport;

