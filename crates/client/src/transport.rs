use std::time::Duration;

use mt4client_core::{Transport, TransportError, TransportOp};
use tokio::runtime::{Builder, Runtime};
use tokio::time::timeout;
use tracing::{debug, info, warn};
use zeromq::{ReqSocket, Socket, SocketRecv, SocketSend, ZmqMessage};

use crate::config::ClientConfig;

/// Blocking ZeroMQ `REQ` transport.
///
/// The socket is driven by a private current-thread Tokio runtime, so every
/// call runs on the caller's thread. Do not use it from inside another Tokio
/// runtime; wrap it in `spawn_blocking` instead.
///
/// A `REQ` socket that timed out is still waiting for its reply and would
/// refuse the next send. It is therefore dropped, and a fresh socket is
/// connected before the next request. The timed-out request is not re-sent.
pub struct ZmqTransport {
    socket: Option<ReqSocket>,
    runtime: Runtime,
    address: String,
    request_timeout: Duration,
    response_timeout: Duration,
    closed: bool,
}

impl ZmqTransport {
    /// Connect to the terminal at `config.address`.
    pub fn connect(config: &ClientConfig) -> Result<Self, TransportError> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| TransportError::Socket(format!("Failed to start runtime: {e}")))?;

        let mut transport = Self {
            socket: None,
            runtime,
            address: config.address.clone(),
            request_timeout: config.request_timeout(),
            response_timeout: config.response_timeout(),
            closed: false,
        };
        transport.open_socket()?;
        info!(address = %transport.address, "Connected to MT4 terminal");
        Ok(transport)
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    fn open_socket(&mut self) -> Result<(), TransportError> {
        let address = self.address.clone();
        let limit = self.request_timeout;
        let socket = self.runtime.block_on(async move {
            let mut socket = ReqSocket::new();
            match timeout(limit, socket.connect(&address)).await {
                Ok(Ok(())) => Ok(socket),
                Ok(Err(e)) => Err(TransportError::Connect(format!("{address}: {e}"))),
                Err(_) => Err(TransportError::Connect(format!(
                    "{address}: no listener after {}ms",
                    limit.as_millis()
                ))),
            }
        })?;
        self.socket = Some(socket);
        Ok(())
    }

    /// Drop the current socket inside the runtime so its background tasks
    /// shut down cleanly.
    fn discard_socket(&mut self) {
        let _guard = self.runtime.enter();
        self.socket = None;
    }
}

impl Transport for ZmqTransport {
    fn send(&mut self, request: &[u8]) -> Result<(), TransportError> {
        if self.closed {
            return Err(TransportError::Closed);
        }
        if self.socket.is_none() {
            warn!(address = %self.address, "Reconnecting after a failed exchange");
            self.open_socket()?;
        }
        let Some(socket) = self.socket.as_mut() else {
            return Err(TransportError::Closed);
        };

        let limit = self.request_timeout;
        let message = ZmqMessage::from(request.to_vec());
        let outcome = self
            .runtime
            .block_on(async move { timeout(limit, socket.send(message)).await });
        match outcome {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => {
                self.discard_socket();
                Err(TransportError::Socket(e.to_string()))
            }
            Err(_) => {
                self.discard_socket();
                Err(TransportError::Timeout {
                    op: TransportOp::Send,
                    after: limit,
                })
            }
        }
    }

    fn recv(&mut self) -> Result<Vec<u8>, TransportError> {
        if self.closed {
            return Err(TransportError::Closed);
        }
        let Some(socket) = self.socket.as_mut() else {
            return Err(TransportError::Socket("No request in flight".to_string()));
        };

        let limit = self.response_timeout;
        let outcome = self
            .runtime
            .block_on(async move { timeout(limit, socket.recv()).await });
        match outcome {
            Ok(Ok(message)) => {
                let mut body = Vec::new();
                for frame in message.into_vec() {
                    body.extend_from_slice(&frame);
                }
                Ok(body)
            }
            Ok(Err(e)) => {
                self.discard_socket();
                Err(TransportError::Socket(e.to_string()))
            }
            Err(_) => {
                self.discard_socket();
                Err(TransportError::Timeout {
                    op: TransportOp::Receive,
                    after: limit,
                })
            }
        }
    }

    fn close(&mut self) {
        if self.closed {
            return;
        }
        self.discard_socket();
        self.closed = true;
        debug!(address = %self.address, "ZeroMQ socket closed");
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}

impl Drop for ZmqTransport {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::Mt4Client;
    use crate::error::Mt4Error;
    use std::sync::mpsc;
    use std::thread;
    use zeromq::RepSocket;

    /// Bind a `REP` socket on an ephemeral port in its own thread and answer
    /// the first `replies.len()` requests in order. `None` leaves that request
    /// unanswered. The socket stays bound briefly after the last request so a
    /// silent peer shows up as a timeout rather than a disconnect. Returns the
    /// endpoint and a handle yielding the requests it saw.
    fn spawn_rep(replies: Vec<Option<&'static str>>) -> (String, thread::JoinHandle<Vec<String>>) {
        let (tx, rx) = mpsc::channel();
        let handle = thread::spawn(move || {
            let runtime = Builder::new_current_thread().enable_all().build().unwrap();
            runtime.block_on(async move {
                let mut rep = RepSocket::new();
                let endpoint = rep.bind("tcp://127.0.0.1:0").await.unwrap();
                tx.send(endpoint.to_string()).unwrap();
                let mut seen = Vec::new();
                for reply in replies {
                    let request = rep.recv().await.unwrap();
                    seen.push(String::try_from(request).unwrap());
                    if let Some(body) = reply {
                        rep.send(ZmqMessage::from(body.to_string())).await.unwrap();
                    }
                }
                tokio::time::sleep(Duration::from_millis(500)).await;
                seen
            })
        });
        (rx.recv().unwrap(), handle)
    }

    fn config(address: String, response_timeout_ms: u64) -> ClientConfig {
        ClientConfig {
            address,
            request_timeout_ms: 2_000,
            response_timeout_ms,
            ..ClientConfig::default()
        }
    }

    #[test]
    fn test_loopback_exchange() {
        let (address, server) = spawn_rep(vec![Some(r#"{"response": ["EURUSD", "GBPUSD"]}"#)]);
        let mut transport = ZmqTransport::connect(&config(address, 2_000)).unwrap();

        transport.send(br#"{"action":"GET_SYMBOLS"}"#).unwrap();
        let body = transport.recv().unwrap();
        assert_eq!(body, br#"{"response": ["EURUSD", "GBPUSD"]}"#);

        transport.close();
        assert!(transport.is_closed());
        assert!(matches!(transport.send(b"{}"), Err(TransportError::Closed)));
        assert_eq!(server.join().unwrap(), vec![r#"{"action":"GET_SYMBOLS"}"#]);
    }

    #[test]
    fn test_receive_timeout_drops_socket() {
        let (address, server) = spawn_rep(vec![None]);
        let mut transport = ZmqTransport::connect(&config(address, 100)).unwrap();

        transport.send(br#"{"action":"GET_ORDERS"}"#).unwrap();
        let err = transport.recv().unwrap_err();
        assert!(matches!(
            err,
            TransportError::Timeout {
                op: TransportOp::Receive,
                ..
            }
        ));
        assert!(transport.socket.is_none());
        assert!(!transport.is_closed());
        server.join().unwrap();
    }

    #[test]
    fn test_client_reconnects_after_silent_terminal() {
        let (address, server) = spawn_rep(vec![
            Some(
                r#"{"response": {"login": 1, "trade_mode": 0, "name": "Demo", "server": "Demo-1", "currency": "USD", "company": "Broker"}}"#,
            ),
            None,
            Some(r#"{"response": ["EURUSD"]}"#),
        ]);
        let mut client = Mt4Client::connect(&config(address, 300)).unwrap();

        let account = client.account().unwrap();
        assert_eq!(account.login, 1);
        assert_eq!(account.currency, "USD");

        let err = client.orders().unwrap_err();
        assert!(matches!(
            err,
            Mt4Error::Transport(TransportError::Timeout {
                op: TransportOp::Receive,
                ..
            })
        ));

        assert_eq!(client.symbol_names().unwrap(), vec!["EURUSD"]);
        client.shutdown();
        assert_eq!(
            server.join().unwrap(),
            vec![
                r#"{"action":"GET_ACCOUNT_INFO"}"#,
                r#"{"action":"GET_ORDERS"}"#,
                r#"{"action":"GET_SYMBOLS"}"#,
            ]
        );
    }
}
