//! Fixed-point transaction amount with 2 decimal places.
//!
//! Uses `rust_decimal` internally so that field `54` is always rendered
//! from an exact decimal value, never from a binary float.

use crate::error::{PixError, Result};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A strictly positive amount in reais, kept at exactly 2 decimal places.
///
/// Inputs with more precision are rounded half away from zero.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use pix_brcode::Amount;
///
/// let amount = Amount::from_str("9.999").unwrap();
/// assert_eq!(amount.to_string(), "10.00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Amount(Decimal);

impl Amount {
    /// The number of decimal places to maintain.
    pub const SCALE: u32 = 2;

    /// Longest rendering accepted by the EMV amount field.
    pub const MAX_RENDERED_LEN: usize = 13;

    /// Creates an amount from a `Decimal`, rounding to 2 decimal places.
    ///
    /// Fails if the rounded value is zero or negative, or if it does not
    /// fit in 13 characters.
    pub fn new(value: Decimal) -> Result<Self> {
        let mut rounded =
            value.round_dp_with_strategy(Self::SCALE, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(Self::SCALE);

        if rounded.is_sign_negative() || rounded.is_zero() {
            return Err(PixError::InvalidAmount(format!(
                "{} must be greater than zero",
                value
            )));
        }

        let amount = Amount(rounded);
        let rendered = amount.to_string();
        if rendered.len() > Self::MAX_RENDERED_LEN {
            return Err(PixError::InvalidAmount(format!(
                "{} exceeds {} characters",
                rendered,
                Self::MAX_RENDERED_LEN
            )));
        }

        Ok(amount)
    }

    /// Creates an amount from a float, as handed over by a JSON checkout form.
    pub fn from_f64(value: f64) -> Result<Self> {
        if !value.is_finite() {
            return Err(PixError::InvalidAmount(format!("{} is not finite", value)));
        }
        let decimal = Decimal::from_f64(value)
            .ok_or_else(|| PixError::InvalidAmount(format!("{} is out of range", value)))?;
        Self::new(decimal)
    }

    /// Returns the underlying decimal value.
    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl FromStr for Amount {
    type Err = PixError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        let decimal = Decimal::from_str(trimmed)
            .map_err(|e| PixError::InvalidAmount(format!("{:?}: {}", trimmed, e)))?;
        Amount::new(decimal)
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = PixError;

    fn try_from(value: Decimal) -> std::result::Result<Self, Self::Error> {
        Amount::new(value)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Amount::from_str(&s).map_err(serde::de::Error::custom)
    }
}
