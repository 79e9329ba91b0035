use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use mt4client_core::{Transport, TransportError, TransportOp};
use serde_json::Value;

use crate::client::Mt4Client;

/// What the scripted terminal does with the next request.
pub enum Reply {
    Body(Vec<u8>),
    Timeout,
}

#[derive(Default)]
struct Script {
    replies: VecDeque<Reply>,
    requests: Vec<Value>,
    closed: usize,
}

/// In-memory transport that answers from a queue of canned replies and
/// records every request it was given.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    script: Rc<RefCell<Script>>,
    closed: bool,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, body: impl Into<String>) -> Self {
        self.push(Reply::Body(body.into().into_bytes()))
    }

    pub fn reply_json(self, body: Value) -> Self {
        self.reply(body.to_string())
    }

    pub fn push(self, reply: Reply) -> Self {
        self.script.borrow_mut().replies.push_back(reply);
        self
    }

    /// Requests sent so far, decoded.
    pub fn requests(&self) -> Vec<Value> {
        self.script.borrow().requests.clone()
    }

    pub fn close_count(&self) -> usize {
        self.script.borrow().closed
    }

    /// A client over a handle to this script.
    pub fn client(&self) -> Mt4Client<ScriptedTransport> {
        Mt4Client::with_transport(self.clone())
    }
}

impl Transport for ScriptedTransport {
    fn send(&mut self, request: &[u8]) -> Result<(), TransportError> {
        if self.closed {
            return Err(TransportError::Closed);
        }
        let request = serde_json::from_slice(request)
            .map_err(|e| TransportError::Socket(format!("request is not JSON: {e}")))?;
        self.script.borrow_mut().requests.push(request);
        Ok(())
    }

    fn recv(&mut self) -> Result<Vec<u8>, TransportError> {
        if self.closed {
            return Err(TransportError::Closed);
        }
        match self.script.borrow_mut().replies.pop_front() {
            Some(Reply::Body(body)) => Ok(body),
            Some(Reply::Timeout) => Err(TransportError::Timeout {
                op: TransportOp::Receive,
                after: Duration::from_millis(10_000),
            }),
            None => Err(TransportError::Socket("no scripted reply left".to_string())),
        }
    }

    fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            self.script.borrow_mut().closed += 1;
        }
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}
