use mt4client_core::{AppliedPrice, SmoothingMethod, Timeframe};

use crate::lines::{AdxLine, BandsLine, IchimokuLine, UpperLowerLine};
use crate::{Args, Indicator};

/// Average Directional Movement Index.
pub fn adx(
    symbol: &str,
    timeframe: Timeframe,
    period: i32,
    price: AppliedPrice,
    line: AdxLine,
    shift: i32,
) -> Indicator {
    Args::new(symbol, timeframe)
        .int(period)
        .int(price.id())
        .int(line.id())
        .int(shift)
        .finish("iADX")
}

/// Parameters for Bollinger Bands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandsParams {
    pub period: i32,
    /// Band width in standard deviations.
    pub deviation: f64,
    pub bands_shift: i32,
    pub price: AppliedPrice,
}

impl Default for BandsParams {
    fn default() -> Self {
        Self {
            period: 20,
            deviation: 2.0,
            bands_shift: 0,
            price: AppliedPrice::Close,
        }
    }
}

/// Bollinger Bands.
pub fn bands(
    symbol: &str,
    timeframe: Timeframe,
    params: BandsParams,
    line: BandsLine,
    shift: i32,
) -> Indicator {
    Args::new(symbol, timeframe)
        .int(params.period)
        .float(params.deviation)
        .int(params.bands_shift)
        .int(params.price.id())
        .int(line.id())
        .int(shift)
        .finish("iBands")
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvelopesParams {
    pub ma_period: i32,
    pub ma_method: SmoothingMethod,
    pub ma_shift: i32,
    pub price: AppliedPrice,
    /// Percent distance of the bands from the average.
    pub deviation: f64,
}

impl Default for EnvelopesParams {
    fn default() -> Self {
        Self {
            ma_period: 14,
            ma_method: SmoothingMethod::Sma,
            ma_shift: 0,
            price: AppliedPrice::Close,
            deviation: 0.1,
        }
    }
}

/// Envelopes around a moving average.
pub fn envelopes(
    symbol: &str,
    timeframe: Timeframe,
    params: EnvelopesParams,
    line: UpperLowerLine,
    shift: i32,
) -> Indicator {
    Args::new(symbol, timeframe)
        .int(params.ma_period)
        .int(params.ma_method.id())
        .int(params.ma_shift)
        .int(params.price.id())
        .float(params.deviation)
        .int(line.id())
        .int(shift)
        .finish("iEnvelopes")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IchimokuParams {
    pub tenkan_sen: i32,
    pub kijun_sen: i32,
    pub senkou_span_b: i32,
}

impl Default for IchimokuParams {
    fn default() -> Self {
        Self {
            tenkan_sen: 9,
            kijun_sen: 26,
            senkou_span_b: 52,
        }
    }
}

/// Ichimoku Kinko Hyo.
pub fn ichimoku(
    symbol: &str,
    timeframe: Timeframe,
    params: IchimokuParams,
    line: IchimokuLine,
    shift: i32,
) -> Indicator {
    Args::new(symbol, timeframe)
        .int(params.tenkan_sen)
        .int(params.kijun_sen)
        .int(params.senkou_span_b)
        .int(line.id())
        .int(shift)
        .finish("iIchimoku")
}

/// Moving average.
pub fn ma(
    symbol: &str,
    timeframe: Timeframe,
    period: i32,
    ma_shift: i32,
    method: SmoothingMethod,
    price: AppliedPrice,
    shift: i32,
) -> Indicator {
    Args::new(symbol, timeframe)
        .int(period)
        .int(ma_shift)
        .int(method.id())
        .int(price.id())
        .int(shift)
        .finish("iMA")
}

/// Parabolic Stop and Reverse.
pub fn sar(symbol: &str, timeframe: Timeframe, step: f64, maximum: f64, shift: i32) -> Indicator {
    Args::new(symbol, timeframe)
        .float(step)
        .float(maximum)
        .int(shift)
        .finish("iSAR")
}

/// Standard deviation.
pub fn std_dev(
    symbol: &str,
    timeframe: Timeframe,
    period: i32,
    ma_shift: i32,
    method: SmoothingMethod,
    price: AppliedPrice,
    shift: i32,
) -> Indicator {
    Args::new(symbol, timeframe)
        .int(period)
        .int(ma_shift)
        .int(method.id())
        .int(price.id())
        .int(shift)
        .finish("iStdDev")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bands_argument_order() {
        let ind = bands("EURUSD", Timeframe::H1, BandsParams::default(), BandsLine::Upper, 0);
        assert_eq!(ind.name(), "iBands");
        assert_eq!(
            ind.argv(),
            &[
                json!("EURUSD"),
                json!(60),
                json!(20),
                json!(2.0),
                json!(0),
                json!(0),
                json!(1),
                json!(0)
            ]
        );
    }

    #[test]
    fn test_ma_encodes_method_and_price_ids() {
        let ind = ma(
            "GBPUSD",
            Timeframe::D1,
            50,
            0,
            SmoothingMethod::Ema,
            AppliedPrice::Typical,
            1,
        );
        assert_eq!(ind.name(), "iMA");
        assert_eq!(
            ind.argv(),
            &[json!("GBPUSD"), json!(1440), json!(50), json!(0), json!(1), json!(5), json!(1)]
        );
    }

    #[test]
    fn test_sar_keeps_float_parameters() {
        let ind = sar("USDJPY", Timeframe::M15, 0.02, 0.2, 0);
        assert_eq!(ind.argv()[2], json!(0.02));
        assert_eq!(ind.argv()[3], json!(0.2));
    }

    #[test]
    fn test_ichimoku_defaults() {
        let ind = ichimoku(
            "EURUSD",
            Timeframe::H4,
            IchimokuParams::default(),
            IchimokuLine::KijunSen,
            0,
        );
        assert_eq!(&ind.argv()[2..], &[json!(9), json!(26), json!(52), json!(2), json!(0)]);
    }
}
