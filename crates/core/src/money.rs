//! EUR amounts in integral cents.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, AddAssign};
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_object::ValueObject;

/// A non-negative EUR amount stored in cents.
///
/// Serialized as a decimal JSON number (`125.5`). Deserializes from a number
/// or from a string in either German (`"1.234,56"`) or plain (`"1234.56"`)
/// notation.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "MoneyRepr", into = "f64")]
pub struct Money(u64);

impl ValueObject for Money {}

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    pub const fn cents(self) -> u64 {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Euro value as a float, for ratios and JSON output only.
    pub fn as_euros(self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Convert a float euro amount, rounding to the nearest cent.
    pub fn from_euros(euros: f64) -> Result<Self, DomainError> {
        if !euros.is_finite() {
            return Err(DomainError::invalid_amount("amount must be a finite number"));
        }
        if euros < 0.0 {
            return Err(DomainError::invalid_amount("amount must not be negative"));
        }
        let cents = (euros * 100.0).round();
        if cents > u64::MAX as f64 {
            return Err(DomainError::invalid_amount("amount out of range"));
        }
        Ok(Self(cents as u64))
    }

    pub fn saturating_sub(self, other: Money) -> Money {
        Money(self.0.saturating_sub(other.0))
    }

    /// `self` as a percentage of `whole`; 0 when `whole` is zero.
    pub fn percent_of(self, whole: Money) -> f64 {
        if whole.is_zero() {
            return 0.0;
        }
        self.0 as f64 * 100.0 / whole.0 as f64
    }

    /// Split into `(percent %, remainder)`, rounding the first part half-up to
    /// the cent. The two parts always add up to `self`.
    pub fn split_percent(self, percent: u8) -> (Money, Money) {
        let percent = u128::from(percent.min(100));
        let first = (u128::from(self.0) * percent + 50) / 100;
        // first <= self.0 because percent <= 100
        let first = first as u64;
        (Money(first), Money(self.0 - first))
    }
}

impl Add for Money {
    type Output = Money;

    /// Saturates at `u64::MAX` cents.
    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        *self = *self + rhs;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.copied().sum()
    }
}

/// German locale: `.` groups thousands, `,` separates cents.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let euros = (self.0 / 100).to_string();
        let cents = self.0 % 100;

        let mut grouped = String::with_capacity(euros.len() + euros.len() / 3);
        for (i, ch) in euros.chars().enumerate() {
            if i > 0 && (euros.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(ch);
        }

        write!(f, "{grouped},{cents:02} €")
    }
}

impl FromStr for Money {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().trim_end_matches('€').trim();
        if s.is_empty() {
            return Err(DomainError::invalid_amount("amount is empty"));
        }
        if s.starts_with('-') {
            return Err(DomainError::invalid_amount("amount must not be negative"));
        }

        // With a comma present the input is German notation and dots are
        // thousands separators; otherwise a single dot is the decimal point.
        let (int_part, frac_part) = if s.contains(',') {
            let mut parts = s.splitn(2, ',');
            let int_part = parts.next().unwrap_or_default().replace('.', "");
            (int_part, parts.next().unwrap_or_default().to_string())
        } else {
            let mut parts = s.splitn(2, '.');
            let int_part = parts.next().unwrap_or_default().to_string();
            (int_part, parts.next().unwrap_or_default().to_string())
        };

        let int_part = if int_part.is_empty() { "0".to_string() } else { int_part };
        if !int_part.chars().all(|c| c.is_ascii_digit())
            || !frac_part.chars().all(|c| c.is_ascii_digit())
        {
            return Err(DomainError::invalid_amount(format!("not a number: {s:?}")));
        }
        if frac_part.len() > 2 {
            return Err(DomainError::invalid_amount(
                "at most two decimal places are allowed",
            ));
        }

        let euros: u64 = int_part
            .parse()
            .map_err(|_| DomainError::invalid_amount("amount out of range"))?;
        let cents: u64 = match frac_part.len() {
            0 => 0,
            1 => frac_part.parse::<u64>().unwrap_or(0) * 10,
            _ => frac_part.parse::<u64>().unwrap_or(0),
        };

        euros
            .checked_mul(100)
            .and_then(|c| c.checked_add(cents))
            .map(Money)
            .ok_or_else(|| DomainError::invalid_amount("amount out of range"))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MoneyRepr {
    Number(f64),
    Text(String),
}

impl TryFrom<MoneyRepr> for Money {
    type Error = DomainError;

    fn try_from(value: MoneyRepr) -> Result<Self, Self::Error> {
        match value {
            MoneyRepr::Number(n) => Money::from_euros(n),
            MoneyRepr::Text(s) => s.parse(),
        }
    }
}

impl From<Money> for f64 {
    fn from(value: Money) -> Self {
        value.as_euros()
    }
}
