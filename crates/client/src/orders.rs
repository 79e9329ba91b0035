//! Validated requests for opening and modifying orders.
//!
//! Both requests are built in stages: the mandatory fields are set first, in
//! a fixed order enforced by the types, then any optional fields, then
//! `build()`.
//!
//! ```no_run
//! # use mt4client::NewOrder;
//! # use mt4client_core::OrderType;
//! let order = NewOrder::builder()
//!     .symbol("EURUSD")
//!     .order_type(OrderType::BuyLimit)
//!     .lots(0.1)
//!     .price(1.0850)
//!     .sl_points(200)
//!     .build()?;
//! # Ok::<(), mt4client::Mt4Error>(())
//! ```

use mt4client_core::{Order, OrderType, Ticket};
use serde_json::Value;

use crate::error::Mt4Error;
use crate::protocol::{Action, Command};

// ---------------------------------------------------------------------------
// New order
// ---------------------------------------------------------------------------

/// A request to open a market order or place a pending one.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    symbol: String,
    order_type: OrderType,
    lots: f64,
    price: Option<f64>,
    slippage: Option<i32>,
    sl: Option<f64>,
    tp: Option<f64>,
    sl_points: Option<i32>,
    tp_points: Option<i32>,
    comment: String,
}

impl NewOrder {
    pub fn builder() -> NewOrderBuilder {
        NewOrderBuilder
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn order_type(&self) -> OrderType {
        self.order_type
    }

    pub fn lots(&self) -> f64 {
        self.lots
    }

    pub fn price(&self) -> Option<f64> {
        self.price
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub(crate) fn into_command(self) -> Command {
        Command::new(Action::DoOrderSend)
            .arg("symbol", self.symbol)
            .arg("order_type", self.order_type.name())
            .arg("lots", self.lots)
            .arg("price", self.price)
            .arg("slippage", self.slippage)
            .arg("sl", self.sl)
            .arg("tp", self.tp)
            .arg("sl_points", self.sl_points)
            .arg("tp_points", self.tp_points)
            .arg("comment", Value::from(self.comment))
    }
}

/// First stage: the symbol.
#[derive(Debug, Clone, Copy, Default)]
pub struct NewOrderBuilder;

impl NewOrderBuilder {
    pub fn symbol(self, symbol: impl Into<String>) -> NewOrderTypeStep {
        NewOrderTypeStep {
            symbol: symbol.into(),
        }
    }
}

/// Second stage: the order type.
#[derive(Debug, Clone)]
pub struct NewOrderTypeStep {
    symbol: String,
}

impl NewOrderTypeStep {
    pub fn order_type(self, order_type: OrderType) -> NewOrderLotsStep {
        NewOrderLotsStep {
            symbol: self.symbol,
            order_type,
        }
    }
}

/// Third stage: the volume.
#[derive(Debug, Clone)]
pub struct NewOrderLotsStep {
    symbol: String,
    order_type: OrderType,
}

impl NewOrderLotsStep {
    pub fn lots(self, lots: f64) -> NewOrderOptions {
        NewOrderOptions {
            order: NewOrder {
                symbol: self.symbol,
                order_type: self.order_type,
                lots,
                price: None,
                slippage: None,
                sl: None,
                tp: None,
                sl_points: None,
                tp_points: None,
                comment: String::new(),
            },
        }
    }
}

/// Final stage: optional fields and validation.
#[derive(Debug, Clone)]
pub struct NewOrderOptions {
    order: NewOrder,
}

impl NewOrderOptions {
    /// Open price. Required for pending orders; for market orders the
    /// terminal uses the current quote when unset.
    pub fn price(mut self, price: f64) -> Self {
        self.order.price = Some(price);
        self
    }

    /// Maximum price deviation in points.
    pub fn slippage(mut self, points: i32) -> Self {
        self.order.slippage = Some(points);
        self
    }

    /// Absolute stop-loss price.
    pub fn sl(mut self, price: f64) -> Self {
        self.order.sl = Some(price);
        self
    }

    /// Absolute take-profit price.
    pub fn tp(mut self, price: f64) -> Self {
        self.order.tp = Some(price);
        self
    }

    /// Stop-loss as a distance in points from the open price.
    pub fn sl_points(mut self, points: i32) -> Self {
        self.order.sl_points = Some(points);
        self
    }

    /// Take-profit as a distance in points from the open price.
    pub fn tp_points(mut self, points: i32) -> Self {
        self.order.tp_points = Some(points);
        self
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.order.comment = comment.into();
        self
    }

    /// Rejects non-trading order types and pending orders without a price.
    pub fn build(self) -> Result<NewOrder, Mt4Error> {
        let order = self.order;
        if !order.order_type.is_buy() && !order.order_type.is_sell() {
            return Err(Mt4Error::InvalidArgument(format!(
                "Invalid order type: {}",
                order.order_type.name()
            )));
        }
        if order.order_type.is_pending() && order.price.is_none() {
            return Err(Mt4Error::InvalidArgument(
                "Pending orders must specify a price".to_string(),
            ));
        }
        Ok(order)
    }
}

// ---------------------------------------------------------------------------
// Modify order
// ---------------------------------------------------------------------------

/// A request to change the price or stops of an existing order.
#[derive(Debug, Clone, PartialEq)]
pub struct ModifyOrder {
    ticket: Ticket,
    price: Option<f64>,
    sl: Option<f64>,
    tp: Option<f64>,
    sl_points: i32,
    tp_points: i32,
}

impl ModifyOrder {
    pub fn builder() -> ModifyOrderBuilder {
        ModifyOrderBuilder
    }

    pub fn ticket(&self) -> Ticket {
        self.ticket
    }

    pub(crate) fn into_command(self) -> Command {
        Command::new(Action::DoOrderModify)
            .arg("ticket", self.ticket)
            .arg("price", self.price)
            .arg("sl", self.sl)
            .arg("tp", self.tp)
            .arg("sl_points", self.sl_points)
            .arg("tp_points", self.tp_points)
    }
}

/// First stage: which order.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModifyOrderBuilder;

impl ModifyOrderBuilder {
    pub fn ticket(self, ticket: Ticket) -> ModifyOrderOptions {
        ModifyOrderOptions {
            order: ModifyOrder {
                ticket,
                price: None,
                sl: None,
                tp: None,
                sl_points: 0,
                tp_points: 0,
            },
        }
    }

    pub fn order(self, order: &Order) -> ModifyOrderOptions {
        self.ticket(order.ticket)
    }
}

#[derive(Debug, Clone)]
pub struct ModifyOrderOptions {
    order: ModifyOrder,
}

impl ModifyOrderOptions {
    /// New open price (pending orders only).
    pub fn price(mut self, price: f64) -> Self {
        self.order.price = Some(price);
        self
    }

    pub fn sl(mut self, price: f64) -> Self {
        self.order.sl = Some(price);
        self
    }

    pub fn tp(mut self, price: f64) -> Self {
        self.order.tp = Some(price);
        self
    }

    pub fn sl_points(mut self, points: i32) -> Self {
        self.order.sl_points = points;
        self
    }

    pub fn tp_points(mut self, points: i32) -> Self {
        self.order.tp_points = points;
        self
    }

    pub fn build(self) -> ModifyOrder {
        self.order
    }
}
