use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::enums::UnknownVariant;

static TIMEFRAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(\d+)([mhdwn]+)$").expect("timeframe pattern is valid")
});

/// Chart period, expressed on the wire as a number of minutes.
///
/// Standard periods are the ones every broker serves history for; the
/// non-standard ones only work where the broker builds them (offline charts).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum Timeframe {
    /// The timeframe of the chart the listener is attached to.
    Current,
    M1,
    M5,
    M15,
    M30,
    H1,
    H4,
    D1,
    W1,
    MN1,
    M2,
    M3,
    M4,
    M6,
    M10,
    M12,
    M20,
    H2,
    H3,
    H6,
    H8,
    H12,
}

impl Timeframe {
    pub const STANDARD: &'static [Timeframe] = &[
        Timeframe::Current,
        Timeframe::M1,
        Timeframe::M5,
        Timeframe::M15,
        Timeframe::M30,
        Timeframe::H1,
        Timeframe::H4,
        Timeframe::D1,
        Timeframe::W1,
        Timeframe::MN1,
    ];

    pub const NON_STANDARD: &'static [Timeframe] = &[
        Timeframe::M2,
        Timeframe::M3,
        Timeframe::M4,
        Timeframe::M6,
        Timeframe::M10,
        Timeframe::M12,
        Timeframe::M20,
        Timeframe::H2,
        Timeframe::H3,
        Timeframe::H6,
        Timeframe::H8,
        Timeframe::H12,
    ];

    pub const fn minutes(self) -> i32 {
        match self {
            Timeframe::Current => 0,
            Timeframe::M1 => 1,
            Timeframe::M5 => 5,
            Timeframe::M15 => 15,
            Timeframe::M30 => 30,
            Timeframe::H1 => 60,
            Timeframe::H4 => 240,
            Timeframe::D1 => 1440,
            Timeframe::W1 => 10080,
            Timeframe::MN1 => 43200,
            Timeframe::M2 => 2,
            Timeframe::M3 => 3,
            Timeframe::M4 => 4,
            Timeframe::M6 => 6,
            Timeframe::M10 => 10,
            Timeframe::M12 => 12,
            Timeframe::M20 => 20,
            Timeframe::H2 => 120,
            Timeframe::H3 => 180,
            Timeframe::H6 => 360,
            Timeframe::H8 => 480,
            Timeframe::H12 => 720,
        }
    }

    /// MQL4 constant name, e.g. `PERIOD_H4`.
    pub const fn name(self) -> &'static str {
        match self {
            Timeframe::Current => "PERIOD_CURRENT",
            Timeframe::M1 => "PERIOD_M1",
            Timeframe::M5 => "PERIOD_M5",
            Timeframe::M15 => "PERIOD_M15",
            Timeframe::M30 => "PERIOD_M30",
            Timeframe::H1 => "PERIOD_H1",
            Timeframe::H4 => "PERIOD_H4",
            Timeframe::D1 => "PERIOD_D1",
            Timeframe::W1 => "PERIOD_W1",
            Timeframe::MN1 => "PERIOD_MN1",
            Timeframe::M2 => "PERIOD_M2",
            Timeframe::M3 => "PERIOD_M3",
            Timeframe::M4 => "PERIOD_M4",
            Timeframe::M6 => "PERIOD_M6",
            Timeframe::M10 => "PERIOD_M10",
            Timeframe::M12 => "PERIOD_M12",
            Timeframe::M20 => "PERIOD_M20",
            Timeframe::H2 => "PERIOD_H2",
            Timeframe::H3 => "PERIOD_H3",
            Timeframe::H6 => "PERIOD_H6",
            Timeframe::H8 => "PERIOD_H8",
            Timeframe::H12 => "PERIOD_H12",
        }
    }

    pub fn is_standard(self) -> bool {
        Self::STANDARD.contains(&self)
    }

    pub fn all() -> impl Iterator<Item = Timeframe> {
        Self::STANDARD.iter().chain(Self::NON_STANDARD).copied()
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().find(|tf| tf.name() == name)
    }

    pub fn from_minutes(minutes: i32) -> Option<Self> {
        Self::all().find(|tf| tf.minutes() == minutes)
    }

    /// Parse shorthand such as `"5m"`, `"4H"`, `"1d"`, `"1w"` or `"1mn"`.
    ///
    /// Surrounding whitespace and leading zeros in the count are ignored, so
    /// `" 05m "` is M5. Returns `None` for periods the terminal has no
    /// constant for.
    pub fn parse(text: &str) -> Option<Self> {
        let caps = TIMEFRAME_PATTERN.captures(text.trim())?;
        let name = format!(
            "PERIOD_{}{}",
            caps[2].to_ascii_uppercase(),
            caps[1].trim_start_matches('0')
        );
        Self::from_name(&name)
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Timeframe {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Timeframe::parse(s).ok_or_else(|| format!("unrecognized timeframe: {s}"))
    }
}

impl TryFrom<i32> for Timeframe {
    type Error = UnknownVariant;

    fn try_from(minutes: i32) -> Result<Self, Self::Error> {
        Self::from_minutes(minutes).ok_or(UnknownVariant {
            kind: "Timeframe",
            id: i64::from(minutes),
        })
    }
}

impl From<Timeframe> for i32 {
    fn from(tf: Timeframe) -> i32 {
        tf.minutes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1m", Timeframe::M1)]
    #[case("5m", Timeframe::M5)]
    #[case("4H", Timeframe::H4)]
    #[case("12h", Timeframe::H12)]
    #[case("1d", Timeframe::D1)]
    #[case("1W", Timeframe::W1)]
    #[case("1mn", Timeframe::MN1)]
    #[case("20M", Timeframe::M20)]
    #[case(" 05m ", Timeframe::M5)]
    fn test_parse_shorthand(#[case] text: &str, #[case] expected: Timeframe) {
        assert_eq!(Timeframe::parse(text), Some(expected));
        assert_eq!(text.parse::<Timeframe>(), Ok(expected));
    }

    #[rstest]
    #[case("7m")]
    #[case("2d")]
    #[case("h1")]
    #[case("")]
    #[case("1x")]
    fn test_parse_rejects_unknown(#[case] text: &str) {
        assert_eq!(Timeframe::parse(text), None);
    }

    #[test]
    fn test_standard_split() {
        assert!(Timeframe::H4.is_standard());
        assert!(!Timeframe::H3.is_standard());
        assert_eq!(Timeframe::all().count(), 22);
    }

    #[test]
    fn test_wire_form_is_minutes() {
        assert_eq!(serde_json::to_value(Timeframe::D1).unwrap(), serde_json::json!(1440));
        let tf: Timeframe = serde_json::from_value(serde_json::json!(240)).unwrap();
        assert_eq!(tf, Timeframe::H4);
    }
}
