//! [`Percent`]-related definitions.

use std::{fmt, str::FromStr};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Floating-point percentage within `0..=100`.
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[serde(into = "Decimal", try_from = "Decimal")]
pub struct Percent(Decimal);

impl Percent {
    /// Creates a new [`Percent`] by checking the provided value is within
    /// `0..=100`.
    #[must_use]
    pub fn new(val: Decimal) -> Option<Self> {
        (Decimal::ZERO..=Decimal::ONE_HUNDRED)
            .contains(&val)
            .then_some(Self(val))
    }

    /// Returns the inner value of this [`Percent`].
    #[must_use]
    pub const fn value(self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0.normalize())
    }
}

impl FromStr for Percent {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s.trim_end_matches('%'))
            .ok()
            .and_then(Self::new)
            .ok_or("invalid percent value")
    }
}

impl TryFrom<Decimal> for Percent {
    type Error = &'static str;

    fn try_from(val: Decimal) -> Result<Self, Self::Error> {
        Self::new(val).ok_or("percent must be within `0..=100`")
    }
}

impl From<Percent> for Decimal {
    fn from(percent: Percent) -> Self {
        percent.0
    }
}

#[cfg(test)]
mod spec {
    use rust_decimal::Decimal;

    use super::Percent;

    #[test]
    fn bounds() {
        assert!(Percent::new(Decimal::ZERO).is_some());
        assert!(Percent::new(Decimal::ONE_HUNDRED).is_some());
        assert!(Percent::new(Decimal::NEGATIVE_ONE).is_none());
        assert!(Percent::new(Decimal::new(10001, 2)).is_none());
    }

    #[test]
    fn from_str() {
        assert_eq!(
            "61.5".parse::<Percent>().unwrap().value(),
            Decimal::new(615, 1),
        );
        assert_eq!(
            "57%".parse::<Percent>().unwrap().value(),
            Decimal::new(57, 0),
        );
        assert!("abc".parse::<Percent>().is_err());
        assert!("101".parse::<Percent>().is_err());
    }

    #[test]
    fn displays_normalized() {
        assert_eq!("62.50".parse::<Percent>().unwrap().to_string(), "62.5%");
    }

    #[test]
    fn deserializes_from_number() {
        let p: Percent = serde_json::from_str("58.5").unwrap();
        assert_eq!(p.to_string(), "58.5%");
        assert!(serde_json::from_str::<Percent>("120").is_err());
    }
}
