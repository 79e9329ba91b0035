//! One-property symbol getters. Each is a single round trip.

use chrono::{DateTime, Utc};
use mt4client_core::{
    DayOfWeek, SymbolCalcMode, SymbolInfoInteger, SymbolSwapMode, SymbolTradeExecution,
    SymbolTradeMode, Transport,
};

use crate::client::{enum_from_id, Mt4Client};
use crate::error::Mt4Error;

fn timestamp(seconds: i64) -> Result<DateTime<Utc>, Mt4Error> {
    DateTime::from_timestamp(seconds, 0)
        .ok_or_else(|| Mt4Error::MalformedResponse(format!("timestamp out of range: {seconds}")))
}

impl<T: Transport> Mt4Client<T> {
    /// Whether the symbol is in Market Watch.
    pub fn symbol_is_selected(&mut self, symbol: &str) -> Result<bool, Mt4Error> {
        Ok(self.symbol_info_integer(symbol, SymbolInfoInteger::Select)? == 1)
    }

    pub fn symbol_is_visible(&mut self, symbol: &str) -> Result<bool, Mt4Error> {
        Ok(self.symbol_info_integer(symbol, SymbolInfoInteger::Visible)? == 1)
    }

    /// Time of the last quote.
    pub fn symbol_time(&mut self, symbol: &str) -> Result<DateTime<Utc>, Mt4Error> {
        timestamp(self.symbol_info_integer(symbol, SymbolInfoInteger::Time)?)
    }

    /// Current spread in points.
    pub fn symbol_spread(&mut self, symbol: &str) -> Result<i64, Mt4Error> {
        self.symbol_info_integer(symbol, SymbolInfoInteger::Spread)
    }

    pub fn symbol_is_spread_float(&mut self, symbol: &str) -> Result<bool, Mt4Error> {
        Ok(self.symbol_info_integer(symbol, SymbolInfoInteger::SpreadFloat)? == 1)
    }

    pub fn symbol_calc_mode(&mut self, symbol: &str) -> Result<SymbolCalcMode, Mt4Error> {
        enum_from_id(self.symbol_info_integer(symbol, SymbolInfoInteger::TradeCalcMode)?)
    }

    pub fn symbol_trade_mode(&mut self, symbol: &str) -> Result<SymbolTradeMode, Mt4Error> {
        enum_from_id(self.symbol_info_integer(symbol, SymbolInfoInteger::TradeMode)?)
    }

    /// When trading in the symbol begins; `None` if unrestricted.
    pub fn symbol_start_time(&mut self, symbol: &str) -> Result<Option<DateTime<Utc>>, Mt4Error> {
        match self.symbol_info_integer(symbol, SymbolInfoInteger::StartTime)? {
            0 => Ok(None),
            seconds => timestamp(seconds).map(Some),
        }
    }

    /// When trading in the symbol ends; `None` if unrestricted.
    pub fn symbol_expiration_time(
        &mut self,
        symbol: &str,
    ) -> Result<Option<DateTime<Utc>>, Mt4Error> {
        match self.symbol_info_integer(symbol, SymbolInfoInteger::ExpirationTime)? {
            0 => Ok(None),
            seconds => timestamp(seconds).map(Some),
        }
    }

    pub fn symbol_trade_execution(
        &mut self,
        symbol: &str,
    ) -> Result<SymbolTradeExecution, Mt4Error> {
        enum_from_id(self.symbol_info_integer(symbol, SymbolInfoInteger::TradeExecutionMode)?)
    }

    pub fn symbol_swap_mode(&mut self, symbol: &str) -> Result<SymbolSwapMode, Mt4Error> {
        enum_from_id(self.symbol_info_integer(symbol, SymbolInfoInteger::SwapMode)?)
    }

    /// Day on which a triple swap is charged.
    pub fn symbol_swap_rollover_3days(&mut self, symbol: &str) -> Result<DayOfWeek, Mt4Error> {
        enum_from_id(self.symbol_info_integer(symbol, SymbolInfoInteger::SwapRollover3Days)?)
    }
}

#[cfg(test)]
mod tests {
    use crate::testing::ScriptedTransport;
    use mt4client_core::{DayOfWeek, SymbolTradeMode};
    use serde_json::json;

    #[test]
    fn test_boolean_getters_compare_with_one() {
        let script = ScriptedTransport::new()
            .reply_json(json!({"response": 0}))
            .reply_json(json!({"response": 1}));
        let mut client = script.client();
        assert!(!client.symbol_is_visible("XAUUSD").unwrap());
        assert!(client.symbol_is_spread_float("XAUUSD").unwrap());
        assert_eq!(script.requests()[0]["property_id"], json!(76));
        assert_eq!(script.requests()[1]["property_id"], json!(41));
    }

    #[test]
    fn test_enum_getters() {
        let script = ScriptedTransport::new()
            .reply_json(json!({"response": 2}))
            .reply_json(json!({"response": 3}));
        let mut client = script.client();
        assert_eq!(client.symbol_trade_mode("EURUSD").unwrap(), SymbolTradeMode::Full);
        assert_eq!(
            client.symbol_swap_rollover_3days("EURUSD").unwrap(),
            DayOfWeek::Wednesday
        );
    }

    #[test]
    fn test_time_getters() {
        let script = ScriptedTransport::new()
            .reply_json(json!({"response": 1591012800}))
            .reply_json(json!({"response": 0}));
        let mut client = script.client();
        assert_eq!(client.symbol_time("EURUSD").unwrap().timestamp(), 1591012800);
        assert_eq!(client.symbol_expiration_time("EURUSD").unwrap(), None);
    }
}
