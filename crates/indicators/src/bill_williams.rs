//! Bill Williams' indicators.

use mt4client_core::{AppliedPrice, SmoothingMethod, Timeframe};

use crate::lines::{AlligatorLine, UpperLowerLine};
use crate::{Args, Indicator};

/// Accelerator/Decelerator oscillator.
pub fn accelerator(symbol: &str, timeframe: Timeframe, shift: i32) -> Indicator {
    Args::new(symbol, timeframe).int(shift).finish("iAC")
}

/// Awesome oscillator.
pub fn awesome(symbol: &str, timeframe: Timeframe, shift: i32) -> Indicator {
    Args::new(symbol, timeframe).int(shift).finish("iAO")
}

/// Parameters shared by Alligator and Gator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlligatorParams {
    pub jaw_period: i32,
    pub jaw_shift: i32,
    pub teeth_period: i32,
    pub teeth_shift: i32,
    pub lips_period: i32,
    pub lips_shift: i32,
    pub method: SmoothingMethod,
    pub price: AppliedPrice,
}

impl Default for AlligatorParams {
    fn default() -> Self {
        Self {
            jaw_period: 13,
            jaw_shift: 8,
            teeth_period: 8,
            teeth_shift: 5,
            lips_period: 5,
            lips_shift: 3,
            method: SmoothingMethod::Smma,
            price: AppliedPrice::Median,
        }
    }
}

impl AlligatorParams {
    fn push(self, args: Args) -> Args {
        args.int(self.jaw_period)
            .int(self.jaw_shift)
            .int(self.teeth_period)
            .int(self.teeth_shift)
            .int(self.lips_period)
            .int(self.lips_shift)
            .int(self.method.id())
            .int(self.price.id())
    }
}

pub fn alligator(
    symbol: &str,
    timeframe: Timeframe,
    params: AlligatorParams,
    line: AlligatorLine,
    shift: i32,
) -> Indicator {
    params
        .push(Args::new(symbol, timeframe))
        .int(line.id())
        .int(shift)
        .finish("iAlligator")
}

/// Gator oscillator; `Upper` reads the jaw/teeth histogram, `Lower` the
/// teeth/lips one.
pub fn gator(
    symbol: &str,
    timeframe: Timeframe,
    params: AlligatorParams,
    line: UpperLowerLine,
    shift: i32,
) -> Indicator {
    params
        .push(Args::new(symbol, timeframe))
        .int(line.id())
        .int(shift)
        .finish("iGator")
}

pub fn fractals(symbol: &str, timeframe: Timeframe, line: UpperLowerLine, shift: i32) -> Indicator {
    Args::new(symbol, timeframe)
        .int(line.id())
        .int(shift)
        .finish("iFractals")
}

/// Market Facilitation Index.
pub fn market_facilitation_index(symbol: &str, timeframe: Timeframe, shift: i32) -> Indicator {
    Args::new(symbol, timeframe).int(shift).finish("iBWMFI")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_alligator_defaults() {
        let ind = alligator(
            "EURUSD",
            Timeframe::H1,
            AlligatorParams::default(),
            AlligatorLine::GatorTeeth,
            0,
        );
        assert_eq!(ind.name(), "iAlligator");
        assert_eq!(
            &ind.argv()[2..],
            &[
                json!(13),
                json!(8),
                json!(8),
                json!(5),
                json!(5),
                json!(3),
                json!(2),
                json!(4),
                json!(2),
                json!(0)
            ]
        );
    }

    #[test]
    fn test_gator_uses_upper_lower_selector() {
        let ind = gator(
            "EURUSD",
            Timeframe::H1,
            AlligatorParams::default(),
            UpperLowerLine::Lower,
            1,
        );
        assert_eq!(ind.name(), "iGator");
        assert_eq!(ind.argv()[10], json!(2));
        assert_eq!(ind.argv()[11], json!(1));
    }

    #[test]
    fn test_fractals_arguments() {
        let ind = fractals("EURUSD", Timeframe::D1, UpperLowerLine::Upper, 2);
        assert_eq!(ind.argv(), &[json!("EURUSD"), json!(1440), json!(1), json!(2)]);
    }
}
