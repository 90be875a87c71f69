//! Rewrites a grammar-checked value into its canonical form.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::values::Rational;

/// How a value is rewritten once its grammar has matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Conversion {
    /// Keep the value as is.
    ValidateOnly,

    /// Replace every occurrence of the separator with a single space, e.g.
    /// `8,8,8` -> `8 8 8`.
    ReplaceSeparator(char),

    /// `39 54 20` -> `39/1 54/1 20/1`
    IntegersToRationals,

    /// `39,54,20` -> `39 54 20` -> `39/1 54/1 20/1`
    SeparatedIntegersToRationals(char),

    /// `2.5 23 3.4` -> `5/2 23/1 17/5`
    DecimalsToRationals,

    /// `2.5,23,3.4` -> `2.5 23 3.4` -> `5/2 23/1 17/5`
    SeparatedDecimalsToRationals(char),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum ConvertError {
    #[error("gcd of {0} and {1} is zero")]
    ZeroGcd(u64, u64),

    #[error("decimal {0:?} does not fit in a rational")]
    Overflow(String),
}

static INTEGER_TOKEN: LazyLock<Regex> =
    // Safe unwrap
    LazyLock::new(|| Regex::new("[0-9]+").unwrap());

static DECIMAL_TOKEN: LazyLock<Regex> =
    // Safe unwrap
    LazyLock::new(|| Regex::new(r"[0-9]+(?:\.[0-9]+)?").unwrap());

impl Conversion {
    pub(crate) fn apply(self, value: &mut String) -> Result<(), ConvertError> {
        use Conversion::*;

        match self {
            ValidateOnly => {}
            ReplaceSeparator(sep) => *value = replace_separator(value, sep),
            IntegersToRationals => *value = integers_to_rationals(value),
            SeparatedIntegersToRationals(sep) => {
                *value = integers_to_rationals(&replace_separator(value, sep))
            }
            DecimalsToRationals => *value = decimals_to_rationals(value)?,
            SeparatedDecimalsToRationals(sep) => {
                *value = decimals_to_rationals(&replace_separator(value, sep))?
            }
        }
        tracing::debug!(conversion = ?self, value = value.as_str(), "converted");
        Ok(())
    }
}

fn replace_separator(value: &str, sep: char) -> String {
    value.replace(sep, " ")
}

fn integers_to_rationals(value: &str) -> String {
    INTEGER_TOKEN
        .find_iter(value)
        .map(|m| format!("{}/1", m.as_str()))
        .collect::<Vec<_>>()
        .join(" ")
}

fn decimals_to_rationals(value: &str) -> Result<String, ConvertError> {
    let tokens = DECIMAL_TOKEN
        .find_iter(value)
        .map(|m| {
            let token = m.as_str();
            if token.contains('.') {
                decimal_to_fraction(token).map(|r| r.to_string())
            } else {
                Ok(format!("{token}/1"))
            }
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(tokens.join(" "))
}

/// Convert a decimal string such as `2.5` into a reduced fraction (`5/2`).
///
/// `decimal` must be `[0-9]+\.[0-9]+`; integer and fraction digits are
/// parsed separately so no floating point is involved.
pub(crate) fn decimal_to_fraction(decimal: &str) -> Result<Rational<u64>, ConvertError> {
    let overflow = || ConvertError::Overflow(decimal.to_owned());

    let (int_part, frac_part) = decimal.split_once('.').unwrap_or((decimal, ""));
    let int_part: u64 = int_part.parse().map_err(|_| overflow())?;
    let (frac, den) = if frac_part.is_empty() {
        (0, 1)
    } else {
        let frac: u64 = frac_part.parse().map_err(|_| overflow())?;
        let digits = u32::try_from(frac_part.len()).map_err(|_| overflow())?;
        (frac, 10u64.checked_pow(digits).ok_or_else(overflow)?)
    };

    let num = int_part
        .checked_mul(den)
        .and_then(|x| x.checked_add(frac))
        .ok_or_else(overflow)?;

    let g = gcd(num, den);
    if g == 0 {
        return Err(ConvertError::ZeroGcd(num, den));
    }
    Ok(Rational(num / g, den / g))
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}
