//! Fixed-point ZEC amounts for payment requests.
//!
//! Amounts are stored as non-negative zatoshi counts and rendered the way
//! wallets expect them in a `zcash:` URI: a plain decimal with trailing
//! fractional zeros trimmed. Parsing is deliberately lenient about
//! surrounding text ("0.002 ZEC" is fine) because the value usually comes
//! straight out of a free-text input field.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;


/// The number of zatoshis in one ZEC.
pub const COIN: i64 = 100_000_000;

/// The maximum zatoshi amount: 21 million ZEC.
pub const MAX_MONEY: i64 = 21_000_000 * COIN;

/// A non-negative amount of ZEC, counted in zatoshis.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64")]
#[serde(into = "i64")]
pub struct Zec(i64);

impl Zec {
    /// Creates a [`Zec`] amount from a zatoshi count.
    ///
    /// # Panics
    ///
    /// If `zatoshis` is negative or above [`MAX_MONEY`]. Only use this
    /// constructor for protocol constants; parse untrusted values with
    /// [`Zec::from_zatoshis`] instead.
    pub const fn new(zatoshis: i64) -> Zec {
        assert!(zatoshis >= 0 && zatoshis <= MAX_MONEY);
        Zec(zatoshis)
    }

    /// Creates a [`Zec`] amount from a zatoshi count, checking the valid
    /// monetary range.
    pub fn from_zatoshis(zatoshis: i64) -> Result<Zec, AmountError> {
        if (0..=MAX_MONEY).contains(&zatoshis) {
            Ok(Zec(zatoshis))
        } else {
            Err(AmountError::OutOfRange { zatoshis })
        }
    }

    /// Returns the number of zatoshis in this amount.
    pub fn zatoshis(&self) -> i64 {
        self.0
    }

    /// Returns true for the zero amount.
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Zec {
    /// Renders the amount as a decimal ZEC value.
    ///
    /// Trailing fractional zeros are trimmed, but a non-zero fraction
    /// always keeps at least one digit; whole amounts render with no
    /// fractional part at all.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / COIN;
        let fraction = self.0 % COIN;

        if fraction == 0 {
            write!(f, "{whole}")
        } else {
            let fraction = format!("{fraction:08}");
            write!(f, "{whole}.{}", fraction.trim_end_matches('0'))
        }
    }
}

impl fmt::Debug for Zec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Zec").field(&self.to_string()).finish()
    }
}

impl FromStr for Zec {
    type Err = AmountError;

    /// Parses a decimal ZEC value out of free text.
    ///
    /// Everything except digits and `.` is stripped first, so currency
    /// suffixes and stray whitespace are tolerated. At most 8 fractional
    /// digits are accepted; zatoshis are exact, never rounded.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let filtered: String = s
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '.')
            .collect();
        if filtered.is_empty() {
            return Err(AmountError::Unparseable);
        }

        let mut parts = filtered.splitn(2, '.');
        let whole = parts.next().unwrap_or_default();
        let fraction = parts.next().unwrap_or_default();
        if fraction.contains('.') {
            return Err(AmountError::Unparseable);
        }
        if fraction.len() > 8 {
            return Err(AmountError::TooPrecise);
        }

        let whole: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| AmountError::Unparseable)?
        };
        let fraction: i64 = if fraction.is_empty() {
            0
        } else {
            format!("{fraction:0<8}")
                .parse()
                .map_err(|_| AmountError::Unparseable)?
        };

        let zatoshis = whole
            .checked_mul(COIN)
            .and_then(|whole| whole.checked_add(fraction))
            .ok_or(AmountError::Unparseable)?;

        Zec::from_zatoshis(zatoshis)
    }
}

impl TryFrom<i64> for Zec {
    type Error = AmountError;

    fn try_from(zatoshis: i64) -> Result<Self, Self::Error> {
        Zec::from_zatoshis(zatoshis)
    }
}

impl From<Zec> for i64 {
    fn from(amount: Zec) -> Self {
        amount.zatoshis()
    }
}

/// Errors from parsing or validating ZEC amounts.
#[derive(Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum AmountError {
    /// The input was not a decimal number.
    #[error("amount could not be parsed as a decimal ZEC value")]
    Unparseable,

    /// More fractional digits than a zatoshi can represent.
    #[error("amounts are limited to 8 fractional digits")]
    TooPrecise,

    /// The zatoshi count is outside the valid monetary range.
    #[error("amount of {zatoshis} zatoshis is outside the valid range")]
    OutOfRange {
        /// The out-of-range zatoshi count.
        zatoshis: i64,
    },
}
