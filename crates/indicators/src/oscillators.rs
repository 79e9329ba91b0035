use mt4client_core::{AppliedPrice, PriceField, SmoothingMethod, Timeframe};

use crate::lines::{MacdLine, RviLine, StochasticLine};
use crate::{Args, Indicator};

/// Average True Range.
pub fn atr(symbol: &str, timeframe: Timeframe, period: i32, shift: i32) -> Indicator {
    Args::new(symbol, timeframe).int(period).int(shift).finish("iATR")
}

pub fn bears_power(
    symbol: &str,
    timeframe: Timeframe,
    period: i32,
    price: AppliedPrice,
    shift: i32,
) -> Indicator {
    Args::new(symbol, timeframe)
        .int(period)
        .int(price.id())
        .int(shift)
        .finish("iBearsPower")
}

pub fn bulls_power(
    symbol: &str,
    timeframe: Timeframe,
    period: i32,
    price: AppliedPrice,
    shift: i32,
) -> Indicator {
    Args::new(symbol, timeframe)
        .int(period)
        .int(price.id())
        .int(shift)
        .finish("iBullsPower")
}

/// Commodity Channel Index.
pub fn cci(
    symbol: &str,
    timeframe: Timeframe,
    period: i32,
    price: AppliedPrice,
    shift: i32,
) -> Indicator {
    Args::new(symbol, timeframe)
        .int(period)
        .int(price.id())
        .int(shift)
        .finish("iCCI")
}

pub fn demarker(symbol: &str, timeframe: Timeframe, period: i32, shift: i32) -> Indicator {
    Args::new(symbol, timeframe)
        .int(period)
        .int(shift)
        .finish("iDeMarker")
}

/// Force Index.
pub fn force(
    symbol: &str,
    timeframe: Timeframe,
    period: i32,
    method: SmoothingMethod,
    price: AppliedPrice,
    shift: i32,
) -> Indicator {
    Args::new(symbol, timeframe)
        .int(period)
        .int(method.id())
        .int(price.id())
        .int(shift)
        .finish("iForce")
}

/// Parameters shared by MACD and OsMA.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MacdParams {
    pub fast_ema: i32,
    pub slow_ema: i32,
    pub signal: i32,
    pub price: AppliedPrice,
}

impl Default for MacdParams {
    fn default() -> Self {
        Self {
            fast_ema: 12,
            slow_ema: 26,
            signal: 9,
            price: AppliedPrice::Close,
        }
    }
}

impl MacdParams {
    fn push(self, args: Args) -> Args {
        args.int(self.fast_ema)
            .int(self.slow_ema)
            .int(self.signal)
            .int(self.price.id())
    }
}

/// Moving Average Convergence/Divergence.
pub fn macd(
    symbol: &str,
    timeframe: Timeframe,
    params: MacdParams,
    line: MacdLine,
    shift: i32,
) -> Indicator {
    params
        .push(Args::new(symbol, timeframe))
        .int(line.id())
        .int(shift)
        .finish("iMACD")
}

/// Moving Average of Oscillator (MACD histogram).
pub fn osma(symbol: &str, timeframe: Timeframe, params: MacdParams, shift: i32) -> Indicator {
    params
        .push(Args::new(symbol, timeframe))
        .int(shift)
        .finish("iOsMA")
}

pub fn momentum(
    symbol: &str,
    timeframe: Timeframe,
    period: i32,
    price: AppliedPrice,
    shift: i32,
) -> Indicator {
    Args::new(symbol, timeframe)
        .int(period)
        .int(price.id())
        .int(shift)
        .finish("iMomentum")
}

/// Relative Strength Index.
pub fn rsi(
    symbol: &str,
    timeframe: Timeframe,
    period: i32,
    price: AppliedPrice,
    shift: i32,
) -> Indicator {
    Args::new(symbol, timeframe)
        .int(period)
        .int(price.id())
        .int(shift)
        .finish("iRSI")
}

/// Relative Vigor Index.
pub fn rvi(symbol: &str, timeframe: Timeframe, period: i32, line: RviLine, shift: i32) -> Indicator {
    Args::new(symbol, timeframe)
        .int(period)
        .int(line.id())
        .int(shift)
        .finish("iRVI")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StochasticParams {
    pub k_period: i32,
    pub d_period: i32,
    pub slowing: i32,
    pub method: SmoothingMethod,
    pub price_field: PriceField,
}

impl Default for StochasticParams {
    fn default() -> Self {
        Self {
            k_period: 5,
            d_period: 3,
            slowing: 3,
            method: SmoothingMethod::Sma,
            price_field: PriceField::LowHigh,
        }
    }
}

/// Stochastic oscillator.
pub fn stochastic(
    symbol: &str,
    timeframe: Timeframe,
    params: StochasticParams,
    line: StochasticLine,
    shift: i32,
) -> Indicator {
    Args::new(symbol, timeframe)
        .int(params.k_period)
        .int(params.d_period)
        .int(params.slowing)
        .int(params.method.id())
        .int(params.price_field.id())
        .int(line.id())
        .int(shift)
        .finish("iStochastic")
}

/// Williams' Percent Range.
pub fn wpr(symbol: &str, timeframe: Timeframe, period: i32, shift: i32) -> Indicator {
    Args::new(symbol, timeframe).int(period).int(shift).finish("iWPR")
}
