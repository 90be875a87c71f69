//! Typed views of canonical value strings.

use std::{fmt::Display, num::ParseIntError, str::FromStr};

use chrono::{NaiveDate, NaiveDateTime};
#[cfg(feature = "json_dump")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type URational = Rational<u32>;

/// A `numerator/denominator` pair, the on-disk encoding Exif uses for
/// non-integer values.
#[cfg_attr(feature = "json_dump", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Hash)]
pub struct Rational<T>(pub T, pub T);

impl<T> Rational<T>
where
    T: Copy + Into<f64>,
{
    pub fn as_float(&self) -> f64 {
        std::convert::Into::<f64>::into(self.0) / std::convert::Into::<f64>::into(self.1)
    }
}

impl<T> From<(T, T)> for Rational<T>
where
    T: Copy,
{
    fn from(value: (T, T)) -> Self {
        Self(value.0, value.1)
    }
}

impl<T> From<Rational<T>> for (T, T)
where
    T: Copy,
{
    fn from(value: Rational<T>) -> Self {
        (value.0, value.1)
    }
}

impl<T: Display> Display for Rational<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.0, self.1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseValueError {
    #[error("not a rational: {0:?}")]
    NotRational(String),

    #[error("invalid number; {0}")]
    InvalidNumber(#[from] ParseIntError),

    #[error("invalid date/time: {0:?}")]
    InvalidDateTime(String),
}

impl<T> FromStr for Rational<T>
where
    T: FromStr<Err = ParseIntError>,
{
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (n, d) = s
            .split_once('/')
            .ok_or_else(|| ParseValueError::NotRational(s.to_owned()))?;
        Ok(Rational(n.parse()?, d.parse()?))
    }
}

/// Parse a canonical, whitespace separated list of rationals such as
/// `"39/1 54/1 20/1"`.
pub fn parse_rationals(s: &str) -> Result<Vec<URational>, ParseValueError> {
    let rationals = s
        .split_whitespace()
        .map(str::parse::<URational>)
        .collect::<Result<Vec<_>, _>>()?;
    if rationals.is_empty() {
        return Err(ParseValueError::NotRational(s.to_owned()));
    }
    Ok(rationals)
}

/// A canonical Exif date (`GPSDateStamp`) or date-time (`DateTimeOriginal`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateValue {
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

pub fn parse_date_time(s: &str) -> Result<DateValue, ParseValueError> {
    if let Ok(t) = NaiveDateTime::parse_from_str(s, "%Y:%m:%d %H:%M:%S") {
        return Ok(DateValue::DateTime(t));
    }
    NaiveDate::parse_from_str(s, "%Y:%m:%d")
        .map(DateValue::Date)
        .map_err(|_| ParseValueError::InvalidDateTime(s.to_owned()))
}
