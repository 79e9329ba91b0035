use mt4client_core::{AppliedPrice, Timeframe};

use crate::{Args, Indicator};

/// Accumulation/Distribution.
pub fn accumulation_distribution(symbol: &str, timeframe: Timeframe, shift: i32) -> Indicator {
    Args::new(symbol, timeframe).int(shift).finish("iAD")
}

/// Money Flow Index.
pub fn mfi(symbol: &str, timeframe: Timeframe, period: i32, shift: i32) -> Indicator {
    Args::new(symbol, timeframe).int(period).int(shift).finish("iMFI")
}

/// On Balance Volume.
pub fn obv(symbol: &str, timeframe: Timeframe, price: AppliedPrice, shift: i32) -> Indicator {
    Args::new(symbol, timeframe)
        .int(price.id())
        .int(shift)
        .finish("iOBV")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_obv_arguments() {
        let ind = obv("EURUSD", Timeframe::M1, AppliedPrice::Weighted, 3);
        assert_eq!(ind.name(), "iOBV");
        assert_eq!(ind.argv(), &[json!("EURUSD"), json!(1), json!(6), json!(3)]);
    }

    #[test]
    fn test_ad_takes_only_shift() {
        let ind = accumulation_distribution("EURUSD", Timeframe::Current, 0);
        assert_eq!(ind.argv(), &[json!("EURUSD"), json!(0), json!(0)]);
    }
}
