//! One-property account getters. Each is a single round trip.

use mt4client_core::{AccountInfoDouble, AccountInfoInteger, AccountStopoutMode, Transport};

use crate::client::{enum_from_id, Mt4Client};
use crate::error::Mt4Error;

impl<T: Transport> Mt4Client<T> {
    pub fn account_leverage(&mut self) -> Result<i64, Mt4Error> {
        self.account_info_integer(AccountInfoInteger::Leverage)
    }

    /// Maximum number of pending orders allowed; 0 means unlimited.
    pub fn account_limit_orders(&mut self) -> Result<i64, Mt4Error> {
        self.account_info_integer(AccountInfoInteger::LimitOrders)
    }

    pub fn account_margin_stopout_mode(&mut self) -> Result<AccountStopoutMode, Mt4Error> {
        enum_from_id(self.account_info_integer(AccountInfoInteger::MarginStopoutMode)?)
    }

    pub fn account_trade_allowed(&mut self) -> Result<bool, Mt4Error> {
        Ok(self.account_info_integer(AccountInfoInteger::TradeAllowed)? == 1)
    }

    /// Whether expert advisors may trade on this account.
    pub fn account_trade_expert_allowed(&mut self) -> Result<bool, Mt4Error> {
        Ok(self.account_info_integer(AccountInfoInteger::TradeExpert)? == 1)
    }

    pub fn account_balance(&mut self) -> Result<f64, Mt4Error> {
        self.account_info_double(AccountInfoDouble::Balance)
    }

    pub fn account_credit(&mut self) -> Result<f64, Mt4Error> {
        self.account_info_double(AccountInfoDouble::Credit)
    }

    pub fn account_profit(&mut self) -> Result<f64, Mt4Error> {
        self.account_info_double(AccountInfoDouble::Profit)
    }

    pub fn account_equity(&mut self) -> Result<f64, Mt4Error> {
        self.account_info_double(AccountInfoDouble::Equity)
    }

    pub fn account_margin(&mut self) -> Result<f64, Mt4Error> {
        self.account_info_double(AccountInfoDouble::Margin)
    }

    pub fn account_margin_free(&mut self) -> Result<f64, Mt4Error> {
        self.account_info_double(AccountInfoDouble::MarginFree)
    }

    /// Equity to margin ratio, in percent.
    pub fn account_margin_level(&mut self) -> Result<f64, Mt4Error> {
        self.account_info_double(AccountInfoDouble::MarginLevel)
    }

    /// Margin call level, in percent or money depending on
    /// [`account_margin_stopout_mode`](Self::account_margin_stopout_mode).
    pub fn account_margin_call_level(&mut self) -> Result<f64, Mt4Error> {
        self.account_info_double(AccountInfoDouble::MarginCallLevel)
    }

    pub fn account_margin_stopout_level(&mut self) -> Result<f64, Mt4Error> {
        self.account_info_double(AccountInfoDouble::MarginStopoutLevel)
    }
}

#[cfg(test)]
mod tests {
    use crate::testing::ScriptedTransport;
    use mt4client_core::AccountStopoutMode;
    use serde_json::json;

    #[test]
    fn test_integer_getters() {
        let script = ScriptedTransport::new()
            .reply_json(json!({"response": 500}))
            .reply_json(json!({"response": 1}))
            .reply_json(json!({"response": 0}));
        let mut client = script.client();

        assert_eq!(client.account_leverage().unwrap(), 500);
        assert_eq!(
            client.account_margin_stopout_mode().unwrap(),
            AccountStopoutMode::Money
        );
        assert!(!client.account_trade_expert_allowed().unwrap());

        let ids: Vec<_> = script.requests().iter().map(|r| r["property_id"].clone()).collect();
        assert_eq!(ids, vec![json!(35), json!(44), json!(34)]);
        assert_eq!(script.requests()[0]["action"], json!("GET_ACCOUNT_INFO_INTEGER"));
    }

    #[test]
    fn test_double_getters() {
        let script = ScriptedTransport::new()
            .reply_json(json!({"response": 10250.75}))
            .reply_json(json!({"response": 50.0}));
        let mut client = script.client();

        assert_eq!(client.account_equity().unwrap(), 10250.75);
        assert_eq!(client.account_margin_stopout_level().unwrap(), 50.0);
        assert_eq!(
            script.requests()[1],
            json!({"action": "GET_ACCOUNT_INFO_DOUBLE", "property_id": 46})
        );
    }

    #[test]
    fn test_unknown_stopout_mode_is_malformed() {
        let script = ScriptedTransport::new().reply_json(json!({"response": 9}));
        let mut client = script.client();
        assert!(matches!(
            client.account_margin_stopout_mode(),
            Err(crate::Mt4Error::MalformedResponse(_))
        ));
    }
}
