use std::collections::HashMap;
use std::time::Duration;

use mt4client_core::*;
use mt4client_indicators::Indicator;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{info, trace};

use crate::config::ClientConfig;
use crate::error::Mt4Error;
use crate::orders::{ModifyOrder, NewOrder};
use crate::protocol::{Action, Command, Envelope};
use crate::transport::ZmqTransport;

/// Client for one MetaTrader 4 terminal.
///
/// Every method performs exactly one request/reply exchange and blocks until
/// the reply arrives or the transport times out. Methods take `&mut self`,
/// so a client never has two requests in flight; share it between threads
/// behind a `Mutex`.
///
/// Once [`shutdown`](Self::shutdown) has been called (or the client is
/// dropped) the transport is closed and every call fails with
/// [`Mt4Error::Shutdown`].
pub struct Mt4Client<T: Transport = ZmqTransport> {
    transport: Option<T>,
    indicator_timeout: Duration,
}

impl Mt4Client<ZmqTransport> {
    /// Connect over ZeroMQ using `config`.
    pub fn connect(config: &ClientConfig) -> Result<Self, Mt4Error> {
        let transport = ZmqTransport::connect(config)?;
        Ok(Self::with_transport(transport).with_indicator_timeout(config.indicator_timeout()))
    }
}

impl<T: Transport> Mt4Client<T> {
    pub fn with_transport(transport: T) -> Self {
        Self {
            transport: Some(transport),
            indicator_timeout: ClientConfig::default().indicator_timeout(),
        }
    }

    /// Chart-loading timeout used by [`run_indicator`](Self::run_indicator).
    pub fn with_indicator_timeout(mut self, timeout: Duration) -> Self {
        self.indicator_timeout = timeout;
        self
    }

    pub fn is_open(&self) -> bool {
        self.transport.is_some()
    }

    /// Close the transport. Calling it again does nothing.
    pub fn shutdown(&mut self) {
        if let Some(mut transport) = self.transport.take() {
            transport.close();
            info!("MT4 client shut down");
        }
    }

    /// Send `command` and return the `response` payload, or `null` when the
    /// reply has none.
    pub fn call(&mut self, command: Command) -> Result<Value, Mt4Error> {
        let transport = self.transport.as_mut().ok_or(Mt4Error::Shutdown)?;

        let request = command.encode();
        trace!(
            action = %command.action(),
            request = %String::from_utf8_lossy(&request),
            "Sending request"
        );
        transport.send(&request)?;

        let body = transport.recv()?;
        if body.is_empty() {
            trace!(action = %command.action(), "Response is empty");
        } else {
            trace!(
                action = %command.action(),
                response = %String::from_utf8_lossy(&body),
                "Received response"
            );
        }

        Envelope::decode(&body)?.into_result()
    }

    /// Like [`call`](Self::call), decoding the payload into `R`.
    pub fn call_as<R: DeserializeOwned>(&mut self, command: Command) -> Result<R, Mt4Error> {
        let payload = self.call(command)?;
        Ok(serde_json::from_value(payload)?)
    }

    // -----------------------------------------------------------------------
    // Account
    // -----------------------------------------------------------------------

    pub fn account(&mut self) -> Result<Account, Mt4Error> {
        self.call_as(Command::new(Action::GetAccountInfo))
    }

    pub fn account_info_integer(&mut self, property: AccountInfoInteger) -> Result<i64, Mt4Error> {
        self.call_as(Command::new(Action::GetAccountInfoInteger).arg("property_id", property.id()))
    }

    pub fn account_info_double(&mut self, property: AccountInfoDouble) -> Result<f64, Mt4Error> {
        self.call_as(Command::new(Action::GetAccountInfoDouble).arg("property_id", property.id()))
    }

    // -----------------------------------------------------------------------
    // Symbols
    // -----------------------------------------------------------------------

    /// Names of every symbol the terminal knows, including hidden ones.
    pub fn symbol_names(&mut self) -> Result<Vec<String>, Mt4Error> {
        self.call_as(Command::new(Action::GetSymbols))
    }

    /// Symbol specifications keyed by name. Unknown names are absent from
    /// the map. An empty `names` returns an empty map without a request.
    pub fn symbols<S: AsRef<str>>(
        &mut self,
        names: &[S],
    ) -> Result<HashMap<String, Symbol>, Mt4Error> {
        if names.is_empty() {
            return Ok(HashMap::new());
        }
        self.call_as(Command::new(Action::GetSymbolInfo).arg("names", name_list(names)))
    }

    pub fn symbol(&mut self, name: &str) -> Result<Option<Symbol>, Mt4Error> {
        Ok(self.symbols(&[name])?.remove(name))
    }

    pub fn symbol_tick(&mut self, symbol: &str) -> Result<SymbolTick, Mt4Error> {
        self.call_as(Command::new(Action::GetSymbolTick).arg("symbol", symbol))
    }

    pub fn symbol_info_integer(
        &mut self,
        symbol: &str,
        property: SymbolInfoInteger,
    ) -> Result<i64, Mt4Error> {
        self.call_as(
            Command::new(Action::GetSymbolInfoInteger)
                .arg("symbol", symbol)
                .arg("property_id", property.id()),
        )
    }

    // -----------------------------------------------------------------------
    // Signals
    // -----------------------------------------------------------------------

    pub fn signal_names(&mut self) -> Result<Vec<String>, Mt4Error> {
        self.call_as(Command::new(Action::GetSignals))
    }

    pub fn signals<S: AsRef<str>>(
        &mut self,
        names: &[S],
    ) -> Result<HashMap<String, Signal>, Mt4Error> {
        if names.is_empty() {
            return Ok(HashMap::new());
        }
        self.call_as(Command::new(Action::GetSignalInfo).arg("names", name_list(names)))
    }

    pub fn signal(&mut self, name: &str) -> Result<Option<Signal>, Mt4Error> {
        Ok(self.signals(&[name])?.remove(name))
    }

    // -----------------------------------------------------------------------
    // Market data
    // -----------------------------------------------------------------------

    /// The last `limit` bars of `symbol`, oldest first. `timeout` bounds how
    /// long the terminal waits for the broker to deliver history; standard
    /// timeframes are much more likely to be served.
    pub fn ohlcv(
        &mut self,
        symbol: &str,
        timeframe: Timeframe,
        limit: u32,
        timeout: Duration,
    ) -> Result<Vec<Ohlcv>, Mt4Error> {
        self.call_as(
            Command::new(Action::GetOhlcv)
                .arg("symbol", symbol)
                .arg("timeframe", timeframe.minutes())
                .arg("limit", limit)
                .arg("timeout", millis(timeout)),
        )
    }

    /// Evaluate a built-in indicator with the client's indicator timeout.
    pub fn run_indicator(&mut self, indicator: &Indicator) -> Result<f64, Mt4Error> {
        let timeout = self.indicator_timeout;
        self.run_indicator_with_timeout(indicator, timeout)
    }

    pub fn run_indicator_with_timeout(
        &mut self,
        indicator: &Indicator,
        timeout: Duration,
    ) -> Result<f64, Mt4Error> {
        self.call_as(
            Command::new(Action::RunIndicator)
                .arg("indicator", indicator.name())
                .arg("argv", indicator.argv().to_vec())
                .arg("timeout", millis(timeout)),
        )
    }

    // -----------------------------------------------------------------------
    // Orders
    // -----------------------------------------------------------------------

    /// Open and pending orders from the Trade tab.
    pub fn orders(&mut self) -> Result<Vec<Order>, Mt4Error> {
        self.call_as(Command::new(Action::GetOrders))
    }

    /// Closed and deleted orders from the Account History tab.
    pub fn orders_historical(&mut self) -> Result<Vec<Order>, Mt4Error> {
        self.call_as(Command::new(Action::GetHistoricalOrders))
    }

    pub fn order(&mut self, ticket: Ticket) -> Result<Order, Mt4Error> {
        self.call_as(Command::new(Action::GetOrder).arg("ticket", ticket))
    }

    pub fn order_send(&mut self, order: NewOrder) -> Result<Order, Mt4Error> {
        self.call_as(order.into_command())
    }

    pub fn order_modify(&mut self, modify: ModifyOrder) -> Result<Order, Mt4Error> {
        self.call_as(modify.into_command())
    }

    /// Close an open order at market price.
    pub fn order_close(&mut self, ticket: Ticket) -> Result<(), Mt4Error> {
        self.call(Command::new(Action::DoOrderClose).arg("ticket", ticket))?;
        Ok(())
    }

    /// Delete a pending order. If the order has already been filled it is
    /// closed at market when `close_if_opened` is set; otherwise the terminal
    /// answers with `ERR_INVALID_TICKET`.
    pub fn order_delete(&mut self, ticket: Ticket, close_if_opened: bool) -> Result<(), Mt4Error> {
        self.call(
            Command::new(Action::DoOrderDelete)
                .arg("ticket", ticket)
                .arg("close_if_opened", close_if_opened),
        )?;
        Ok(())
    }
}

impl<T: Transport> Drop for Mt4Client<T> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn name_list<S: AsRef<str>>(names: &[S]) -> Vec<Value> {
    names.iter().map(|n| Value::from(n.as_ref())).collect()
}

/// Map an integer property value onto one of the MQL4 enumerations.
pub(crate) fn enum_from_id<E>(id: i64) -> Result<E, Mt4Error>
where
    E: TryFrom<i32, Error = UnknownVariant>,
{
    let id = i32::try_from(id)
        .map_err(|_| Mt4Error::MalformedResponse(format!("property id out of range: {id}")))?;
    E::try_from(id).map_err(|e| Mt4Error::MalformedResponse(e.to_string()))
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
