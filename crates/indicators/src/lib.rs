//! Argument lists for the terminal's built-in indicator functions.
//!
//! Each constructor returns an [`Indicator`]: the MQL4 function name plus its
//! arguments in MQL4 order (symbol, timeframe in minutes, parameters, shift).
//! The client sends both in a `RUN_INDICATOR` request and the terminal
//! evaluates the function on its own price history.

pub mod bill_williams;
pub mod lines;
pub mod oscillators;
pub mod trend;
pub mod volumes;

pub use bill_williams::*;
pub use lines::*;
pub use oscillators::*;
pub use trend::*;
pub use volumes::*;

use mt4client_core::Timeframe;
use serde::Serialize;
use serde_json::Value;

/// A ready-to-run indicator call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Indicator {
    name: &'static str,
    argv: Vec<Value>,
}

impl Indicator {
    /// MQL4 function name, e.g. `iRSI`.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn argv(&self) -> &[Value] {
        &self.argv
    }

    pub fn into_parts(self) -> (&'static str, Vec<Value>) {
        (self.name, self.argv)
    }
}

/// Accumulates arguments after the leading `(symbol, timeframe)` pair.
pub(crate) struct Args(Vec<Value>);

impl Args {
    pub(crate) fn new(symbol: &str, timeframe: Timeframe) -> Self {
        Self(vec![Value::from(symbol), Value::from(timeframe.minutes())])
    }

    pub(crate) fn int(mut self, value: impl Into<i64>) -> Self {
        self.0.push(Value::from(value.into()));
        self
    }

    pub(crate) fn float(mut self, value: f64) -> Self {
        self.0.push(Value::from(value));
        self
    }

    pub(crate) fn finish(self, name: &'static str) -> Indicator {
        Indicator { name, argv: self.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_leading_arguments() {
        let ind = Args::new("EURUSD", Timeframe::H1).int(14).float(0.5).finish("iTest");
        assert_eq!(ind.name(), "iTest");
        assert_eq!(ind.argv(), &[json!("EURUSD"), json!(60), json!(14), json!(0.5)]);
    }
}
