//! [`Money`]-related definitions.

use std::{
    fmt::{self, Write as _},
    str::FromStr,
};

use rust_decimal::Decimal;

use crate::define_kind;

/// Amount of money in some [`Currency`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Money {
    /// Amount of this [`Money`].
    pub amount: Decimal,

    /// [`Currency`] of this amount.
    pub currency: Currency,
}

impl Money {
    /// Creates a new [`Money`] amount in US dollars.
    ///
    /// The remote inventory reports every price in [`Currency::Usd`].
    #[must_use]
    pub const fn usd(amount: Decimal) -> Self {
        Self {
            amount,
            currency: Currency::Usd,
        }
    }
}

/// Renders the amount for humans: currency symbol, thousands separated, and
/// cents only when the amount is not whole (`$12,345`, `$1,250.50`).
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { amount, currency } = self;

        let amount = amount.round_dp(2);
        let digits = if amount.is_integer() {
            amount.abs().trunc().to_string()
        } else {
            format!("{:.2}", amount.abs())
        };
        let (whole, cents) = match digits.split_once('.') {
            Some((whole, cents)) => (whole, Some(cents)),
            None => (digits.as_str(), None),
        };

        if amount.is_sign_negative() && !amount.is_zero() {
            f.write_char('-')?;
        }
        f.write_str(currency.symbol())?;
        for (n, digit) in whole.chars().enumerate() {
            if n > 0 && (whole.len() - n) % 3 == 0 {
                f.write_char(',')?;
            }
            f.write_char(digit)?;
        }
        if let Some(cents) = cents {
            write!(f, ".{cents}")?;
        }
        Ok(())
    }
}

/// Parses the `{amount}{currency}` form, e.g. `1250.50USD`.
impl FromStr for Money {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() < 4 {
            return Err("too short");
        }

        let (amount, currency) = s.split_at(s.len() - 3);
        let amount = Decimal::from_str(amount).map_err(|_| "invalid amount")?;
        let currency =
            Currency::from_str(currency).map_err(|_| "invalid currency")?;

        Ok(Self { amount, currency })
    }
}

define_kind! {
    #[doc = "Currency of a [`Money`] amount."]
    enum Currency {
        #[doc = "US Dollar."]
        Usd = "USD",

        #[doc = "Euro."]
        Eur = "EUR",

        #[doc = "Indian Rupee."]
        Inr = "INR",
    }
}

impl Currency {
    /// Returns the symbol prefixing amounts in this [`Currency`].
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Usd => "$",
            Self::Eur => "€",
            Self::Inr => "₹",
        }
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use rust_decimal::Decimal;

    use super::{Currency, Money};

    fn decimal(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn from_str() {
        assert_eq!(
            Money::from_str("1250.50USD").unwrap(),
            Money {
                amount: decimal("1250.50"),
                currency: Currency::Usd,
            },
        );
        assert_eq!(
            Money::from_str("99EUR").unwrap(),
            Money {
                amount: decimal("99"),
                currency: Currency::Eur,
            },
        );

        assert!(Money::from_str("123.45").is_err());
        assert!(Money::from_str("123.45Us").is_err());
        assert!(Money::from_str("123.45Usdollar").is_err());
    }

    #[test]
    fn groups_thousands() {
        assert_eq!(Money::usd(decimal("1234567")).to_string(), "$1,234,567");
        assert_eq!(Money::usd(decimal("12345.5")).to_string(), "$12,345.50");
        assert_eq!(Money::usd(decimal("999")).to_string(), "$999");
        assert_eq!(Money::usd(decimal("1000")).to_string(), "$1,000");
    }

    #[test]
    fn hides_zero_cents() {
        assert_eq!(Money::usd(decimal("123.00")).to_string(), "$123");
        assert_eq!(Money::usd(decimal("123.004")).to_string(), "$123");
        assert_eq!(Money::usd(decimal("0.5")).to_string(), "$0.50");
    }

    #[test]
    fn keeps_sign_and_symbol() {
        assert_eq!(Money::usd(decimal("-4500")).to_string(), "-$4,500");
        assert_eq!(
            Money {
                amount: decimal("2500"),
                currency: Currency::Inr,
            }
            .to_string(),
            "₹2,500",
        );
    }
}
