use serde::{Deserialize, Serialize};
use std::fmt;

/// Returned when a numeric id has no matching variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} id: {id}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub id: i64,
}

/// Declares an MQL4 enumeration whose wire form is its integer id.
///
/// Each variant is written as `Variant = id => "MQL_CONSTANT_NAME"`. The
/// generated type serializes to and from the id, displays as the constant
/// name, and exposes `ALL`, `id()`, `name()` and `from_id()`.
#[macro_export]
macro_rules! mql_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $id:literal => $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize)]
        #[serde(try_from = "i32", into = "i32")]
        $vis enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            /// The id the terminal uses for this value.
            pub const fn id(self) -> i32 {
                match self {
                    $($name::$variant => $id,)+
                }
            }

            /// The MQL4 constant name.
            pub const fn name(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }

            pub fn from_id(id: i32) -> Option<Self> {
                match id {
                    $($id => Some($name::$variant),)+
                    _ => None,
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.name())
            }
        }

        impl ::std::convert::TryFrom<i32> for $name {
            type Error = $crate::enums::UnknownVariant;

            fn try_from(id: i32) -> Result<Self, Self::Error> {
                Self::from_id(id).ok_or($crate::enums::UnknownVariant {
                    kind: stringify!($name),
                    id: i64::from(id),
                })
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> i32 {
                value.id()
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Orders
// ---------------------------------------------------------------------------

/// The order types available in MetaTrader 4.
///
/// Decoded from the numeric id the terminal reports on an order, but sent by
/// symbolic name (`"OP_BUYLIMIT"`) in new-order requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32")]
pub enum OrderType {
    #[serde(rename = "OP_BUY")]
    Buy,
    #[serde(rename = "OP_SELL")]
    Sell,
    #[serde(rename = "OP_BUYLIMIT")]
    BuyLimit,
    #[serde(rename = "OP_BUYSTOP")]
    BuyStop,
    #[serde(rename = "OP_SELLLIMIT")]
    SellLimit,
    #[serde(rename = "OP_SELLSTOP")]
    SellStop,
    // Account-history entries only; never valid for a new order.
    #[serde(rename = "OP_BALANCE")]
    Balance,
    #[serde(rename = "OP_CREDIT")]
    Credit,
    #[serde(rename = "OP_REBATE")]
    Rebate,
}

impl OrderType {
    pub const ALL: &'static [OrderType] = &[
        OrderType::Buy,
        OrderType::Sell,
        OrderType::BuyLimit,
        OrderType::BuyStop,
        OrderType::SellLimit,
        OrderType::SellStop,
        OrderType::Balance,
        OrderType::Credit,
        OrderType::Rebate,
    ];

    pub const fn id(self) -> i32 {
        match self {
            OrderType::Buy => 0,
            OrderType::Sell => 1,
            OrderType::BuyLimit => 2,
            OrderType::BuyStop => 3,
            OrderType::SellLimit => 4,
            OrderType::SellStop => 5,
            OrderType::Balance => 6,
            OrderType::Credit => 7,
            OrderType::Rebate => 8,
        }
    }

    /// The MQL4 constant name, which is also the request wire form.
    pub const fn name(self) -> &'static str {
        match self {
            OrderType::Buy => "OP_BUY",
            OrderType::Sell => "OP_SELL",
            OrderType::BuyLimit => "OP_BUYLIMIT",
            OrderType::BuyStop => "OP_BUYSTOP",
            OrderType::SellLimit => "OP_SELLLIMIT",
            OrderType::SellStop => "OP_SELLSTOP",
            OrderType::Balance => "OP_BALANCE",
            OrderType::Credit => "OP_CREDIT",
            OrderType::Rebate => "OP_REBATE",
        }
    }

    pub fn from_id(id: i32) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.id() == id)
    }

    pub fn is_buy(self) -> bool {
        matches!(self, OrderType::Buy | OrderType::BuyLimit | OrderType::BuyStop)
    }

    pub fn is_sell(self) -> bool {
        matches!(
            self,
            OrderType::Sell | OrderType::SellLimit | OrderType::SellStop
        )
    }

    pub fn is_market(self) -> bool {
        matches!(self, OrderType::Buy | OrderType::Sell)
    }

    /// Limit and stop orders, which wait for a target price.
    pub fn is_pending(self) -> bool {
        matches!(
            self,
            OrderType::BuyLimit | OrderType::BuyStop | OrderType::SellLimit | OrderType::SellStop
        )
    }
}

impl TryFrom<i32> for OrderType {
    type Error = UnknownVariant;

    fn try_from(id: i32) -> Result<Self, Self::Error> {
        Self::from_id(id).ok_or(UnknownVariant {
            kind: "OrderType",
            id: i64::from(id),
        })
    }
}

/// Terminal-style labels, as shown in the Trade and History tabs.
impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            OrderType::Buy => "MARKET-BUY",
            OrderType::Sell => "MARKET-SELL",
            OrderType::BuyLimit => "LIMIT-BUY",
            OrderType::BuyStop => "STOP-BUY",
            OrderType::SellLimit => "LIMIT-SELL",
            OrderType::SellStop => "STOP-SELL",
            OrderType::Balance => "BALANCE",
            OrderType::Credit => "CREDIT",
            OrderType::Rebate => "REBATE",
        };
        f.write_str(label)
    }
}

// ---------------------------------------------------------------------------
// Account
// ---------------------------------------------------------------------------

mql_enum! {
    /// Account type.
    pub enum AccountTradeMode {
        Demo = 0 => "ACCOUNT_TRADE_MODE_DEMO",
        Contest = 1 => "ACCOUNT_TRADE_MODE_CONTEST",
        Real = 2 => "ACCOUNT_TRADE_MODE_REAL",
    }
}

mql_enum! {
    /// How the stop-out level is expressed.
    pub enum AccountStopoutMode {
        Percent = 0 => "ACCOUNT_STOPOUT_MODE_PERCENT",
        Money = 1 => "ACCOUNT_STOPOUT_MODE_MONEY",
    }
}

mql_enum! {
    /// Integer account properties for `AccountInfoInteger()`.
    pub enum AccountInfoInteger {
        Login = 0 => "ACCOUNT_LOGIN",
        TradeMode = 32 => "ACCOUNT_TRADE_MODE",
        Leverage = 35 => "ACCOUNT_LEVERAGE",
        LimitOrders = 47 => "ACCOUNT_LIMIT_ORDERS",
        MarginStopoutMode = 44 => "ACCOUNT_MARGIN_SO_MODE",
        TradeAllowed = 33 => "ACCOUNT_TRADE_ALLOWED",
        TradeExpert = 34 => "ACCOUNT_TRADE_EXPERT",
    }
}

mql_enum! {
    /// Double account properties for `AccountInfoDouble()`.
    pub enum AccountInfoDouble {
        Balance = 37 => "ACCOUNT_BALANCE",
        Credit = 38 => "ACCOUNT_CREDIT",
        Profit = 39 => "ACCOUNT_PROFIT",
        Equity = 40 => "ACCOUNT_EQUITY",
        Margin = 41 => "ACCOUNT_MARGIN",
        MarginFree = 42 => "ACCOUNT_MARGIN_FREE",
        MarginLevel = 43 => "ACCOUNT_MARGIN_LEVEL",
        MarginCallLevel = 45 => "ACCOUNT_MARGIN_SO_CALL",
        MarginStopoutLevel = 46 => "ACCOUNT_MARGIN_SO_SO",
        /// Deprecated by the terminal.
        MarginInitial = 48 => "ACCOUNT_MARGIN_INITIAL",
        /// Deprecated by the terminal.
        MarginMaintenance = 49 => "ACCOUNT_MARGIN_MAINTENANCE",
        /// Deprecated by the terminal.
        Assets = 50 => "ACCOUNT_ASSETS",
        /// Deprecated by the terminal.
        Liabilities = 51 => "ACCOUNT_LIABILITIES",
        /// Deprecated by the terminal.
        CommissionBlocked = 52 => "ACCOUNT_COMMISSION_BLOCKED",
    }
}

// ---------------------------------------------------------------------------
// Symbol
// ---------------------------------------------------------------------------

mql_enum! {
    /// Integer symbol properties for `SymbolInfoInteger()`.
    ///
    /// Variants marked MQL5-only are accepted by the terminal but always
    /// report zero under MQL4.
    pub enum SymbolInfoInteger {
        Select = 0 => "SYMBOL_SELECT",
        Visible = 76 => "SYMBOL_VISIBLE",
        /// MQL5 only.
        SessionDeals = 56 => "SYMBOL_SESSION_DEALS",
        /// MQL5 only.
        SessionBuyOrders = 60 => "SYMBOL_SESSION_BUY_ORDERS",
        /// MQL5 only.
        SessionSellOrders = 62 => "SYMBOL_SESSION_SELL_ORDERS",
        /// MQL5 only.
        Volume = 10 => "SYMBOL_VOLUME",
        /// MQL5 only.
        VolumeHigh = 11 => "SYMBOL_VOLUMEHIGH",
        /// MQL5 only.
        VolumeLow = 12 => "SYMBOL_VOLUMELOW",
        Time = 15 => "SYMBOL_TIME",
        Digits = 17 => "SYMBOL_DIGITS",
        SpreadFloat = 41 => "SYMBOL_SPREAD_FLOAT",
        Spread = 18 => "SYMBOL_SPREAD",
        TradeCalcMode = 29 => "SYMBOL_TRADE_CALC_MODE",
        TradeMode = 30 => "SYMBOL_TRADE_MODE",
        StartTime = 51 => "SYMBOL_START_TIME",
        ExpirationTime = 52 => "SYMBOL_EXPIRATION_TIME",
        TradeStopsLevel = 31 => "SYMBOL_TRADE_STOPS_LEVEL",
        TradeFreezeLevel = 32 => "SYMBOL_TRADE_FREEZE_LEVEL",
        TradeExecutionMode = 33 => "SYMBOL_TRADE_EXEMODE",
        SwapMode = 37 => "SYMBOL_SWAP_MODE",
        SwapRollover3Days = 40 => "SYMBOL_SWAP_ROLLOVER3DAYS",
        /// MQL5 only.
        ExpirationMode = 49 => "SYMBOL_EXPIRATION_MODE",
        /// MQL5 only.
        FillingMode = 50 => "SYMBOL_FILLING_MODE",
        /// MQL5 only.
        OrderMode = 71 => "SYMBOL_ORDER_MODE",
    }
}

mql_enum! {
    /// Margin calculation method.
    pub enum SymbolCalcMode {
        Forex = 0 => "SYMBOL_CALC_MODE_FOREX",
        Cfd = 1 => "SYMBOL_CALC_MODE_CFD",
        Futures = 2 => "SYMBOL_CALC_MODE_FUTURES",
        CfdIndex = 3 => "SYMBOL_CALC_MODE_CFDINDEX",
    }
}

mql_enum! {
    pub enum SymbolTradeMode {
        Disabled = 0 => "SYMBOL_TRADE_MODE_DISABLED",
        /// MQL5 only.
        LongOnly = 3 => "SYMBOL_TRADE_MODE_LONGONLY",
        /// MQL5 only.
        ShortOnly = 4 => "SYMBOL_TRADE_MODE_SHORTONLY",
        CloseOnly = 1 => "SYMBOL_TRADE_MODE_CLOSEONLY",
        Full = 2 => "SYMBOL_TRADE_MODE_FULL",
    }
}

mql_enum! {
    pub enum SymbolTradeExecution {
        Request = 0 => "SYMBOL_TRADE_EXECUTION_REQUEST",
        Instant = 1 => "SYMBOL_TRADE_EXECUTION_INSTANT",
        Market = 2 => "SYMBOL_TRADE_EXECUTION_MARKET",
        /// MQL5 only.
        Exchange = 3 => "SYMBOL_TRADE_EXECUTION_EXCHANGE",
    }
}

mql_enum! {
    /// Unit in which swaps are charged.
    pub enum SymbolSwapMode {
        Points = 0 => "SYMBOL_SWAP_MODE_POINTS",
        CurrencySymbol = 1 => "SYMBOL_SWAP_MODE_CURRENCY_SYMBOL",
        InterestCurrent = 2 => "SYMBOL_SWAP_MODE_INTEREST_CURRENT",
        CurrencyMargin = 3 => "SYMBOL_SWAP_MODE_CURRENCY_MARGIN",
    }
}

mql_enum! {
    pub enum DayOfWeek {
        Sunday = 0 => "SUNDAY",
        Monday = 1 => "MONDAY",
        Tuesday = 2 => "TUESDAY",
        Wednesday = 3 => "WEDNESDAY",
        Thursday = 4 => "THURSDAY",
        Friday = 5 => "FRIDAY",
        Saturday = 6 => "SATURDAY",
    }
}

// ---------------------------------------------------------------------------
// Indicator inputs
// ---------------------------------------------------------------------------

mql_enum! {
    /// Price series an indicator is calculated on.
    pub enum AppliedPrice {
        Close = 0 => "PRICE_CLOSE",
        Open = 1 => "PRICE_OPEN",
        High = 2 => "PRICE_HIGH",
        Low = 3 => "PRICE_LOW",
        Median = 4 => "PRICE_MEDIAN",
        Typical = 5 => "PRICE_TYPICAL",
        Weighted = 6 => "PRICE_WEIGHTED",
    }
}

mql_enum! {
    /// Moving-average method.
    pub enum SmoothingMethod {
        Sma = 0 => "MODE_SMA",
        Ema = 1 => "MODE_EMA",
        Smma = 2 => "MODE_SMMA",
        Lwma = 3 => "MODE_LWMA",
    }
}

mql_enum! {
    /// Price field used by the stochastic oscillator.
    pub enum PriceField {
        LowHigh = 0 => "STO_LOWHIGH",
        CloseClose = 1 => "STO_CLOSECLOSE",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(OrderType::BuyLimit)]
    #[case(OrderType::BuyStop)]
    #[case(OrderType::SellLimit)]
    #[case(OrderType::SellStop)]
    fn test_pending_types(#[case] order_type: OrderType) {
        assert!(order_type.is_pending());
        assert!(!order_type.is_market());
        assert!(order_type.is_buy() ^ order_type.is_sell());
    }

    #[rstest]
    #[case(OrderType::Balance)]
    #[case(OrderType::Credit)]
    #[case(OrderType::Rebate)]
    fn test_history_only_types_are_neither_buy_nor_sell(#[case] order_type: OrderType) {
        assert!(!order_type.is_buy());
        assert!(!order_type.is_sell());
        assert!(!order_type.is_pending());
    }

    #[test]
    fn test_order_type_wire_forms() {
        // requests carry the constant name, responses carry the id
        assert_eq!(
            serde_json::to_value(OrderType::SellStop).unwrap(),
            serde_json::json!("OP_SELLSTOP")
        );
        let decoded: OrderType = serde_json::from_value(serde_json::json!(2)).unwrap();
        assert_eq!(decoded, OrderType::BuyLimit);
        assert!(serde_json::from_value::<OrderType>(serde_json::json!(9)).is_err());
        assert_eq!(OrderType::Buy.to_string(), "MARKET-BUY");
    }

    #[test]
    fn test_mql_enum_round_trips_ids() {
        for mode in SymbolTradeMode::ALL {
            assert_eq!(SymbolTradeMode::from_id(mode.id()), Some(*mode));
        }
        assert_eq!(
            serde_json::to_value(AccountInfoInteger::Leverage).unwrap(),
            serde_json::json!(35)
        );
        let mode: AccountTradeMode = serde_json::from_value(serde_json::json!(2)).unwrap();
        assert_eq!(mode, AccountTradeMode::Real);
        assert_eq!(mode.to_string(), "ACCOUNT_TRADE_MODE_REAL");
    }

    #[test]
    fn test_unknown_id_is_rejected() {
        let err = AccountStopoutMode::try_from(7).unwrap_err();
        assert_eq!(err.kind, "AccountStopoutMode");
        assert_eq!(err.id, 7);
        assert!(serde_json::from_value::<AccountTradeMode>(serde_json::json!(5)).is_err());
    }
}
