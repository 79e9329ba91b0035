use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::{AccountTradeMode, OrderType};

/// Terminal-assigned order identifier.
pub type Ticket = i32;

fn from_unix(seconds: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(seconds, 0)
}

// ---------------------------------------------------------------------------
// Account
// ---------------------------------------------------------------------------

/// Static account details. Live figures (balance, equity, margin) are
/// queried per property through the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub login: i64,
    pub trade_mode: AccountTradeMode,
    pub name: String,
    pub server: String,
    pub currency: String,
    pub company: String,
}

// ---------------------------------------------------------------------------
// Symbols & market data
// ---------------------------------------------------------------------------

/// Contract specification of a market symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Symbol {
    pub name: String,
    /// Minimum price increment.
    pub point: f64,
    pub digits: i32,
    pub volume_min: f64,
    pub volume_step: f64,
    pub volume_max: f64,
    pub trade_contract_size: f64,
    pub trade_tick_value: f64,
    pub trade_tick_size: f64,
    /// Minimal distance of stops from the current price, in points.
    pub trade_stops_level: i32,
    /// Distance inside which orders are frozen, in points.
    pub trade_freeze_level: i32,
}

impl Symbol {
    /// Convert a distance in points to a price distance.
    pub fn points_to_price(&self, points: i32) -> f64 {
        f64::from(points) * self.point
    }
}

/// Latest prices of a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SymbolTick {
    /// Unix seconds of the last price update.
    pub time: i64,
    pub bid: f64,
    pub ask: f64,
    pub last: f64,
    pub volume: i64,
}

impl SymbolTick {
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        from_unix(self.time)
    }

    pub fn spread(&self) -> f64 {
        self.ask - self.bid
    }
}

/// A single bar of price history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ohlcv {
    /// Unix seconds of the bar open.
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub tick_volume: i64,
}

impl Ohlcv {
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        from_unix(self.time)
    }
}

// ---------------------------------------------------------------------------
// Orders
// ---------------------------------------------------------------------------

/// A pending, open, or closed order as reported by the terminal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub ticket: Ticket,
    pub magic_number: i32,
    pub symbol: String,
    pub order_type: OrderType,
    pub lots: f64,
    pub open_price: f64,
    pub close_price: f64,
    /// Terminal-formatted times; empty when not applicable.
    #[serde(default)]
    pub open_time: String,
    #[serde(default)]
    pub close_time: String,
    #[serde(default)]
    pub expiration: String,
    pub sl: f64,
    pub tp: f64,
    pub profit: f64,
    pub commission: f64,
    pub swap: f64,
    #[serde(default)]
    pub comment: String,
}

impl Order {
    pub fn is_pending(&self) -> bool {
        self.order_type.is_pending()
    }
}

// ---------------------------------------------------------------------------
// Signals
// ---------------------------------------------------------------------------

/// A trading signal from the MQL5 signals service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub author_login: String,
    pub broker: String,
    pub broker_server: String,
    pub name: String,
    pub currency: String,
    pub date_published: i64,
    pub date_started: i64,
    pub id: i64,
    pub leverage: i32,
    pub pips: i32,
    pub rating: i32,
    pub subscribers: i32,
    pub trades: i32,
    pub trade_mode: i32,
    pub balance: f64,
    pub equity: f64,
    pub gain: f64,
    pub max_drawdown: f64,
    pub price: f64,
    pub roi: f64,
}

impl Signal {
    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        from_unix(self.date_published)
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        from_unix(self.date_started)
    }
}
