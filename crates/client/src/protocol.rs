//! Request and response envelopes.
//!
//! A request is a flat JSON object whose first key is `action`:
//!
//! ```json
//! {"action": "GET_SYMBOL_TICK", "symbol": "EURUSD"}
//! ```
//!
//! A reply carries either error fields or a `response` payload, plus an
//! optional `warning`:
//!
//! ```json
//! {"response": {"time": 1591012800, "bid": 1.1121, ...}}
//! {"error_code": 4106, "error_code_description": "unknown symbol", "error_message": "..."}
//! ```

use mt4client_core::ErrorCode;
use serde_json::{Map, Value};
use std::fmt;
use tracing::warn;

use crate::error::{Mt4Error, RemoteError};

const ACTION: &str = "action";
const ERROR_CODE: &str = "error_code";
const ERROR_CODE_DESCRIPTION: &str = "error_code_description";
const ERROR_MESSAGE: &str = "error_message";
const WARNING: &str = "warning";
const RESPONSE: &str = "response";

/// Commands understood by the terminal-side listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    GetAccountInfo,
    GetAccountInfoInteger,
    GetAccountInfoDouble,
    GetSymbolInfo,
    GetSymbolMarketInfo,
    GetSymbolInfoInteger,
    GetSymbolTick,
    GetOrder,
    GetOrders,
    GetHistoricalOrders,
    GetSymbols,
    GetOhlcv,
    GetSignals,
    GetSignalInfo,
    DoOrderSend,
    DoOrderClose,
    DoOrderDelete,
    DoOrderModify,
    RunIndicator,
}

impl Action {
    pub const fn as_str(self) -> &'static str {
        match self {
            Action::GetAccountInfo => "GET_ACCOUNT_INFO",
            Action::GetAccountInfoInteger => "GET_ACCOUNT_INFO_INTEGER",
            Action::GetAccountInfoDouble => "GET_ACCOUNT_INFO_DOUBLE",
            Action::GetSymbolInfo => "GET_SYMBOL_INFO",
            Action::GetSymbolMarketInfo => "GET_SYMBOL_MARKET_INFO",
            Action::GetSymbolInfoInteger => "GET_SYMBOL_INFO_INTEGER",
            Action::GetSymbolTick => "GET_SYMBOL_TICK",
            Action::GetOrder => "GET_ORDER",
            Action::GetOrders => "GET_ORDERS",
            Action::GetHistoricalOrders => "GET_HISTORICAL_ORDERS",
            Action::GetSymbols => "GET_SYMBOLS",
            Action::GetOhlcv => "GET_OHLCV",
            Action::GetSignals => "GET_SIGNALS",
            Action::GetSignalInfo => "GET_SIGNAL_INFO",
            Action::DoOrderSend => "DO_ORDER_SEND",
            Action::DoOrderClose => "DO_ORDER_CLOSE",
            Action::DoOrderDelete => "DO_ORDER_DELETE",
            Action::DoOrderModify => "DO_ORDER_MODIFY",
            Action::RunIndicator => "RUN_INDICATOR",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One request to the terminal.
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    action: Action,
    arguments: Map<String, Value>,
}

impl Command {
    pub fn new(action: Action) -> Self {
        Self {
            action,
            arguments: Map::new(),
        }
    }

    /// Add an argument. Later values replace earlier ones with the same key;
    /// a key named `action` is dropped.
    pub fn arg(mut self, key: &str, value: impl Into<Value>) -> Self {
        if key != ACTION {
            self.arguments.insert(key.to_string(), value.into());
        }
        self
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn arguments(&self) -> &Map<String, Value> {
        &self.arguments
    }

    /// Serialize to the wire form, `action` first.
    pub fn encode(&self) -> Vec<u8> {
        let mut object = Map::with_capacity(self.arguments.len() + 1);
        object.insert(ACTION.to_string(), Value::from(self.action.as_str()));
        for (key, value) in &self.arguments {
            object.insert(key.clone(), value.clone());
        }
        Value::Object(object).to_string().into_bytes()
    }
}

/// A decoded reply, not yet judged.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    fields: Map<String, Value>,
}

impl Envelope {
    /// Parse a reply body. Anything other than a JSON object is rejected.
    pub fn decode(body: &[u8]) -> Result<Self, Mt4Error> {
        if body.is_empty() {
            return Err(Mt4Error::MalformedResponse("empty response body".to_string()));
        }
        let text = std::str::from_utf8(body)
            .map_err(|e| Mt4Error::MalformedResponse(format!("response is not UTF-8: {e}")))?;
        let value: Value = serde_json::from_str(text)
            .map_err(|e| Mt4Error::MalformedResponse(format!("response is not JSON: {e}")))?;
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(Mt4Error::MalformedResponse(format!(
                "expected a JSON object, got {}",
                type_name(&other)
            ))),
        }
    }

    /// Whether any error key is present, even with a `null` value.
    pub fn is_error(&self) -> bool {
        [ERROR_CODE, ERROR_CODE_DESCRIPTION, ERROR_MESSAGE]
            .iter()
            .any(|key| self.fields.contains_key(*key))
    }

    pub fn warning(&self) -> Option<String> {
        self.fields.get(WARNING).and_then(text)
    }

    /// Log any warning, then return the payload or the mapped error.
    /// A missing payload is returned as `null`.
    pub fn into_result(mut self) -> Result<Value, Mt4Error> {
        if let Some(warning) = self.warning() {
            warn!(%warning, "Terminal returned a warning");
        }
        if self.is_error() {
            return Err(self.remote_error().into());
        }
        Ok(self.fields.remove(RESPONSE).unwrap_or(Value::Null))
    }

    fn remote_error(&self) -> RemoteError {
        let code = match self.fields.get(ERROR_CODE).and_then(code_id) {
            Some(id) => ErrorCode::resolve(id),
            None => ErrorCode::Unknown,
        };
        RemoteError::new(
            code,
            self.fields.get(ERROR_CODE_DESCRIPTION).and_then(text),
            self.fields.get(ERROR_MESSAGE).and_then(text),
        )
    }
}

/// Integer error id. Whole floats and numeric strings are accepted too.
fn code_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;
    use tracing_test::traced_test;

    #[test]
    fn test_encode_puts_action_first() {
        let command = Command::new(Action::GetSymbolInfoInteger)
            .arg("symbol", "EURUSD")
            .arg("property_id", 0);
        assert_eq!(
            String::from_utf8(command.encode()).unwrap(),
            r#"{"action":"GET_SYMBOL_INFO_INTEGER","symbol":"EURUSD","property_id":0}"#
        );
    }

    #[test]
    fn test_encode_ignores_action_argument() {
        let command = Command::new(Action::GetOrders).arg("action", "DO_ORDER_CLOSE");
        assert!(command.arguments().is_empty());
        assert_eq!(
            String::from_utf8(command.encode()).unwrap(),
            r#"{"action":"GET_ORDERS"}"#
        );
    }

    #[test]
    fn test_encode_mixed_values() {
        let command = Command::new(Action::RunIndicator)
            .arg("indicator", "iRSI")
            .arg("argv", json!(["EURUSD", 60, 14, 0, 0]))
            .arg("timeout", 5000)
            .arg("price", Value::Null)
            .arg("close_if_opened", true);
        let decoded: Value = serde_json::from_slice(&command.encode()).unwrap();
        assert_eq!(decoded["argv"][0], json!("EURUSD"));
        assert_eq!(decoded["price"], Value::Null);
        assert_eq!(decoded["close_if_opened"], json!(true));
    }

    #[rstest]
    #[case(b"".as_slice())]
    #[case(b"   ".as_slice())]
    #[case(b"\xff\xfe".as_slice())]
    #[case(b"{\"response\":".as_slice())]
    #[case(b"[1, 2]".as_slice())]
    #[case(b"null".as_slice())]
    fn test_decode_rejects_malformed(#[case] body: &[u8]) {
        let err = Envelope::decode(body).unwrap_err();
        assert!(matches!(err, Mt4Error::MalformedResponse(_)), "{err:?}");
    }

    #[test]
    fn test_missing_response_is_null() {
        let envelope = Envelope::decode(b"{}").unwrap();
        assert_eq!(envelope.into_result().unwrap(), Value::Null);
    }

    #[test]
    fn test_warning_does_not_change_outcome() {
        let envelope = Envelope::decode(br#"{"warning": "slow", "response": 7}"#).unwrap();
        assert_eq!(envelope.warning().as_deref(), Some("slow"));
        assert_eq!(envelope.into_result().unwrap(), json!(7));
    }

    #[test]
    #[traced_test]
    fn test_warning_logged_alongside_error() {
        let envelope =
            Envelope::decode(br#"{"warning": "stale quote", "error_code": 138}"#).unwrap();
        let err = envelope.into_result().unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::Requote));
        assert!(logs_contain("stale quote"));
    }

    #[rstest]
    #[case(json!({"error_code": 4106}))]
    #[case(json!({"error_code_description": "unknown symbol"}))]
    #[case(json!({"error_message": "boom"}))]
    #[case(json!({"error_message": null}))]
    #[case(json!({"error_code": 2, "response": {"ticket": 1}}))]
    fn test_any_error_key_fails(#[case] body: Value) {
        let envelope = Envelope::decode(body.to_string().as_bytes()).unwrap();
        assert!(envelope.is_error());
        assert!(matches!(envelope.into_result(), Err(Mt4Error::Remote(_))));
    }

    #[rstest]
    #[case(json!(4108), ErrorCode::InvalidTicket)]
    #[case(json!(0), ErrorCode::NoError)]
    #[case(json!(65536), ErrorCode::UserErrorFirst)]
    #[case(json!(99999), ErrorCode::Unknown)]
    #[case(json!("4108"), ErrorCode::InvalidTicket)]
    #[case(json!(4108.0), ErrorCode::InvalidTicket)]
    #[case(json!("ticket"), ErrorCode::Unknown)]
    #[case(json!(1.5), ErrorCode::Unknown)]
    #[case(Value::Null, ErrorCode::Unknown)]
    fn test_error_code_resolution(#[case] code: Value, #[case] expected: ErrorCode) {
        let body = json!({"error_code": code}).to_string();
        let err = Envelope::decode(body.as_bytes()).unwrap().into_result().unwrap_err();
        assert_eq!(err.code(), Some(expected));
    }
}
