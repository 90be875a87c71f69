//! exif-formatter validates Exif property values and rewrites them into the
//! canonical representation stored in image files, e.g. `2.8` becomes the
//! rational `14/5` and `8,8,8` becomes `8 8 8`.
//!
//! Everything is table driven: a registry maps friendly property names
//! (`GPSLatitude`) to canonical tags (`Exif.GPSInfo.GPSLatitude`), each
//! property lists the value syntaxes it accepts, and enumerated tags list
//! their legal codes.
//!
//! ## Key Features
//!
//! - Pure and synchronous: no I/O, no global mutable state. A [`Formatter`]
//!   is cheap to clone and can be shared between threads.
//!
//! - Strict stage ordering: an unknown or read-only property is reported
//!   before a malformed value, and a malformed value is never reported as
//!   out of range.
//!
//! - Two lookup styles: exact property names with registry permissions
//!   ([`FormatterConfig::accessor`], the default), or case-insensitive names
//!   with vendor maker-note tags protected ([`FormatterConfig::codec`]).
//!
//! ## Usage
//!
//! ```rust
//! use exif_formatter::*;
//!
//! fn main() -> Result<()> {
//!     let f = Formatter::new();
//!
//!     assert_eq!(f.format("FNumber", "3")?, "3/1");
//!     assert_eq!(f.format("FNumber", "3.0")?, "3/1");
//!     assert_eq!(f.format("BitsPerSample", "8,8,8")?, "8 8 8");
//!     assert_eq!(f.format("GPSTimeStamp", "12:30:45")?, "12/1 30/1 45/1");
//!     f.validate("GPSLatitudeRef", "N")?;
//!
//!     let err = f.validate("GPSLatitudeRef", "Q").unwrap_err();
//!     assert_eq!(err.status(), Status::OutOfRange);
//!
//!     let err = f.validate("HwMnoteFaceCount", "2").unwrap_err();
//!     assert_eq!(err.status(), Status::UnsupportedProperty);
//!     assert_eq!(err.reason(), Some(Reason::ReadOnly));
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Introspection
//!
//! ```rust
//! use exif_formatter::*;
//!
//! let f = Formatter::with_config(FormatterConfig::codec());
//! let info = f.describe("orientation").unwrap();
//! assert_eq!(info.tag, "Exif.Image.Orientation");
//! assert_eq!(info.values[5].description, "right, top");
//! assert_eq!(describe_value(info.tag, "6"), Some("right, top"));
//! ```
//!
//! ## Storing Values
//!
//! [`ExifMetadata`] formats every value before it reaches a [`TagStore`],
//! see its documentation for an example.

pub use error::{Error, Reason, Status};
pub type Result<T> = std::result::Result<T, Error>;

pub use convert::Conversion;
pub use formatter::{Formatter, FormatterConfig, PropertyInfo, WritePolicy};
pub use grammar::Grammar;
pub use range::{describe_value, range_rule, validate_value_range, RangeRule, TagDetails};
pub use rules::{format_rules, FormatRule};
pub use store::{ExifMetadata, MemoryStore, TagStore};
pub use tags::{NameLookup, Permission, Property, TagRegistry};
pub use values::{parse_date_time, parse_rationals, DateValue, ParseValueError, Rational, URational};

mod convert;
mod error;
mod formatter;
mod grammar;
mod range;
mod rules;
mod store;
mod tags;
mod values;

#[cfg(test)]
mod testkit;
