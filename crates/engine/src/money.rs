use std::{fmt, str::FromStr};

use crate::{EngineError, ResultEngine};

/// Non-negative money amount represented as **integer cents**.
///
/// Every expense amount goes through this type so that sums computed by the
/// store are exact and a grand total always reconciles with its subtotals.
///
/// # Examples
///
/// ```rust
/// use engine::Amount;
///
/// let amount = Amount::from_minor(12_34).unwrap();
/// assert_eq!(amount.minor(), 1234);
/// assert_eq!(amount.to_string(), "12.34");
/// ```
///
/// A single amount is capped at [`Amount::MAX_MINOR`] cents, so summing every
/// row of the expense table stays far from `i64` overflow.
///
/// Parsing from user input (accepts `.` or `,` as decimal separator; rejects >
/// 2 decimals, negative values and values above the cap):
///
/// ```rust
/// use engine::Amount;
///
/// assert_eq!("10".parse::<Amount>().unwrap().minor(), 1000);
/// assert_eq!("10,5".parse::<Amount>().unwrap().minor(), 1050);
/// assert!("12.345".parse::<Amount>().is_err());
/// assert!("-1".parse::<Amount>().is_err());
/// assert!("100000000000.01".parse::<Amount>().is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Amount(i64);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    /// Largest accepted single amount: 100 000 000 000.00 in major units.
    pub const MAX_MINOR: i64 = 10_000_000_000_000;

    /// Creates an amount from integer cents.
    pub fn from_minor(cents: i64) -> ResultEngine<Self> {
        if cents > Self::MAX_MINOR {
            return Err(EngineError::InvalidInput("amount too large".to_string()));
        }
        Self::total_from_minor(cents)
    }

    /// Creates an aggregate amount (a sum of stored amounts), which may exceed
    /// [`Amount::MAX_MINOR`].
    pub(crate) fn total_from_minor(cents: i64) -> ResultEngine<Self> {
        if cents < 0 {
            return Err(EngineError::InvalidInput(
                "amount must be >= 0".to_string(),
            ));
        }
        Ok(Self(cents))
    }

    /// Creates an amount from a decimal number as sent by JSON clients.
    ///
    /// The float is rendered with its shortest round-trip representation and
    /// then parsed, so `100.5` becomes `10050` cents and `0.125` is rejected.
    pub fn from_major(value: f64) -> ResultEngine<Self> {
        if !value.is_finite() {
            return Err(EngineError::InvalidInput(
                "amount must be a finite number".to_string(),
            ));
        }
        format!("{value}").parse()
    }

    /// Returns the raw value in cents.
    #[must_use]
    pub const fn minor(self) -> i64 {
        self.0
    }

    /// Returns the value in major units (e.g. rupees, euros).
    #[must_use]
    pub fn to_major(self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Checked addition (returns `None` on overflow).
    #[must_use]
    pub fn checked_add(self, rhs: Amount) -> Option<Amount> {
        self.0.checked_add(rhs.0).map(Amount)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl From<Amount> for i64 {
    fn from(value: Amount) -> Self {
        value.0
    }
}

impl FromStr for Amount {
    type Err = EngineError;

    /// Parses a decimal string into cents.
    ///
    /// Accepts `.` or `,` as decimal separator and an optional leading `+`.
    ///
    /// Validation rules:
    /// - max 2 fractional digits (rejects `12.345`)
    /// - rejects negative, empty and invalid strings
    /// - rejects values above [`Amount::MAX_MINOR`]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let empty = || EngineError::InvalidInput("empty amount".to_string());
        let invalid = || EngineError::InvalidInput("invalid amount".to_string());
        let overflow = || EngineError::InvalidInput("amount too large".to_string());

        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(empty());
        }
        if trimmed.starts_with('-') {
            return Err(EngineError::InvalidInput(
                "amount must be >= 0".to_string(),
            ));
        }

        let rest = trimmed.strip_prefix('+').unwrap_or(trimmed).trim();
        if rest.is_empty() {
            return Err(empty());
        }

        let rest = rest.replace(',', ".");
        let mut parts = rest.split('.');
        let units_str = parts.next().ok_or_else(invalid)?;
        let cents_str = parts.next();

        if parts.next().is_some() {
            return Err(invalid());
        }

        if units_str.is_empty() || !units_str.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        let units: i64 = units_str.parse().map_err(|_| overflow())?;

        let cents: i64 = match cents_str {
            None | Some("") => 0,
            Some(frac) => {
                if !frac.chars().all(|c| c.is_ascii_digit()) {
                    return Err(invalid());
                }
                match frac.len() {
                    1 => frac.parse::<i64>().map_err(|_| invalid())? * 10,
                    2 => frac.parse::<i64>().map_err(|_| invalid())?,
                    _ => {
                        return Err(EngineError::InvalidInput(
                            "too many decimals".to_string(),
                        ));
                    }
                }
            }
        };

        let total = units
            .checked_mul(100)
            .and_then(|v| v.checked_add(cents))
            .ok_or_else(overflow)?;
        Self::from_minor(total)
    }
}
