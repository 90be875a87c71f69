//! Canonical-value storage keyed by tag, with every write going through a
//! [`Formatter`] first.

use std::collections::BTreeMap;

use crate::{
    error::{Error, Reason},
    formatter::Formatter,
    tags::Property,
    values::{parse_date_time, parse_rationals, DateValue, URational},
};

/// A container of canonical tag values, e.g. the IFD entries of an image.
///
/// Implementors only store and retrieve strings; validation happens in
/// [`ExifMetadata`] before [`TagStore::set`] is called.
pub trait TagStore {
    fn get(&self, tag: &str) -> Option<&str>;

    fn set(&mut self, tag: &str, value: String);

    fn remove(&mut self, tag: &str) -> Option<String>;

    /// All `(tag, value)` pairs currently stored.
    fn entries(&self) -> Box<dyn Iterator<Item = (&str, &str)> + '_>;
}

/// An in-memory [`TagStore`], ordered by tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl TagStore for MemoryStore {
    fn get(&self, tag: &str) -> Option<&str> {
        self.values.get(tag).map(String::as_str)
    }

    fn set(&mut self, tag: &str, value: String) {
        self.values.insert(tag.to_owned(), value);
    }

    fn remove(&mut self, tag: &str) -> Option<String> {
        self.values.remove(tag)
    }

    fn entries(&self) -> Box<dyn Iterator<Item = (&str, &str)> + '_> {
        Box::new(
            self.values
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str())),
        )
    }
}

/// Property-name based access to a [`TagStore`].
///
/// ```rust
/// use exif_formatter::{ExifMetadata, URational};
///
/// let mut meta = ExifMetadata::new();
/// meta.set_value("GPSLatitude", "39,54,20").unwrap();
/// assert_eq!(meta.get_value("GPSLatitude"), Some("39/1 54/1 20/1"));
///
/// let dms = meta.get_rationals("GPSLatitude").unwrap();
/// assert_eq!(dms[0], URational::from((39, 1)));
///
/// // rejected values never reach the store
/// meta.set_value("GPSLatitudeRef", "Q").unwrap_err();
/// assert_eq!(meta.get_value("GPSLatitudeRef"), None);
/// ```
#[derive(Debug, Clone)]
pub struct ExifMetadata<S = MemoryStore> {
    formatter: Formatter,
    store: S,
}

impl ExifMetadata<MemoryStore> {
    pub fn new() -> Self {
        Self::with_store(Formatter::new(), MemoryStore::new())
    }
}

impl Default for ExifMetadata<MemoryStore> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: TagStore> ExifMetadata<S> {
    pub fn with_store(formatter: Formatter, store: S) -> Self {
        Self { formatter, store }
    }

    pub fn formatter(&self) -> &Formatter {
        &self.formatter
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Format `value` and store the canonical form under the property's
    /// tag. The store is left untouched if formatting fails.
    #[tracing::instrument(skip(self))]
    pub fn set_value(&mut self, name: &str, value: &str) -> crate::Result<()> {
        let value = self.formatter.format(name, value)?;
        let tag = self
            .formatter
            .canonical_tag(name)
            .ok_or_else(|| Error::unsupported(name, Reason::UnknownProperty))?;
        self.store.set(tag, value);
        Ok(())
    }

    /// The stored canonical value. Read-only properties can be read too.
    pub fn get_value(&self, name: &str) -> Option<&str> {
        let tag = self.formatter.canonical_tag(name)?;
        self.store.get(tag)
    }

    /// Remove a stored value; like [`ExifMetadata::set_value`], this needs
    /// write access to the property.
    pub fn remove_value(&mut self, name: &str) -> crate::Result<Option<String>> {
        if !self.formatter.is_key_supported(name) {
            return Err(Error::unsupported(name, Reason::UnknownProperty));
        }
        if !self.formatter.is_modify_allowed(name) {
            return Err(Error::unsupported(name, Reason::ReadOnly));
        }
        Ok(self
            .formatter
            .canonical_tag(name)
            .and_then(|tag| self.store.remove(tag)))
    }

    /// Stored values of registered properties. Entries under unknown tags
    /// are skipped.
    pub fn entries(&self) -> impl Iterator<Item = (&'static Property, &str)> + '_ {
        let registry = *self.formatter.registry();
        self.store
            .entries()
            .filter_map(move |(tag, value)| registry.property_by_tag(tag).map(|p| (p, value)))
    }

    /// The stored value as a list of rationals, `None` if absent or not
    /// rational-valued (e.g. `BitsPerSample`).
    pub fn get_rationals(&self, name: &str) -> Option<Vec<URational>> {
        let value = self.get_value(name)?;
        parse_rationals(value)
            .inspect_err(|e| tracing::debug!(name, error = %e, "not rational"))
            .ok()
    }

    pub fn get_date_time(&self, name: &str) -> Option<DateValue> {
        parse_date_time(self.get_value(name)?).ok()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::{error::Status, formatter::FormatterConfig};

    #[test]
    fn set_and_get() {
        let mut meta = ExifMetadata::new();
        meta.set_value("FNumber", "2.8").unwrap();
        meta.set_value("BitsPerSample", "8,8,8").unwrap();
        meta.set_value("Orientation", "6").unwrap();

        assert_eq!(meta.get_value("FNumber"), Some("14/5"));
        assert_eq!(meta.get_value("BitsPerSample"), Some("8 8 8"));
        assert_eq!(meta.store().get("Exif.Image.Orientation"), Some("6"));
        assert_eq!(meta.store().len(), 3);

        let r = meta.get_rationals("FNumber").unwrap();
        assert_eq!(r, vec![URational::from((14, 5))]);
        assert_eq!(r[0].as_float(), 2.8);
        assert!(meta.get_rationals("BitsPerSample").is_none());
        assert!(meta.get_rationals("Make").is_none());

        // overwrite
        meta.set_value("FNumber", "4").unwrap();
        assert_eq!(meta.get_value("FNumber"), Some("4/1"));
    }

    #[test]
    fn rejected_writes() {
        let mut meta = ExifMetadata::new();

        let err = meta.set_value("GPSLatitudeRef", "Q").unwrap_err();
        assert_eq!(err.status(), Status::OutOfRange);

        let err = meta.set_value("HwMnoteFaceCount", "2").unwrap_err();
        assert_eq!(err.status(), Status::UnsupportedProperty);

        meta.set_value("NoSuchTag", "1").unwrap_err();
        meta.set_value("FNumber", "f/2.8").unwrap_err();

        assert!(meta.store().is_empty());
    }

    #[test]
    fn read_only_values_are_readable() {
        let mut store = MemoryStore::new();
        store.set("Exif.Huawei.FaceCount", "2".to_owned());
        let mut meta = ExifMetadata::with_store(Formatter::new(), store);

        assert_eq!(meta.get_value("HwMnoteFaceCount"), Some("2"));
        let err = meta.remove_value("HwMnoteFaceCount").unwrap_err();
        assert_eq!(err.reason(), Some(Reason::ReadOnly));
        assert_eq!(meta.get_value("HwMnoteFaceCount"), Some("2"));
    }

    #[test]
    fn remove() {
        let mut meta = ExifMetadata::new();
        meta.set_value("Make", "Huawei").unwrap();
        assert_eq!(meta.remove_value("Make").unwrap().as_deref(), Some("Huawei"));
        assert_eq!(meta.remove_value("Make").unwrap(), None);

        let err = meta.remove_value("NoSuchTag").unwrap_err();
        assert_eq!(err.reason(), Some(Reason::UnknownProperty));
    }

    #[test]
    fn entries() {
        let mut store = MemoryStore::new();
        store.set("Exif.Unknown.Tag", "1".to_owned());
        let mut meta = ExifMetadata::with_store(Formatter::new(), store);
        meta.set_value("Model", "P60").unwrap();
        meta.set_value("GPSDateStamp", "2022:06:02").unwrap();

        let entries: Vec<_> = meta.entries().map(|(p, v)| (p.name, v)).collect();
        assert_eq!(entries, [("GPSDateStamp", "2022:06:02"), ("Model", "P60")]);

        assert_eq!(
            meta.get_date_time("GPSDateStamp"),
            Some(DateValue::Date(NaiveDate::from_ymd_opt(2022, 6, 2).unwrap()))
        );
        assert_eq!(meta.into_store().len(), 3);
    }

    #[test]
    fn codec_names() {
        let mut meta =
            ExifMetadata::with_store(Formatter::with_config(FormatterConfig::codec()), MemoryStore::new());
        meta.set_value("gpslatitude", "39 54 20").unwrap();
        assert_eq!(meta.get_value("GPSLatitude"), Some("39/1 54/1 20/1"));
        assert_eq!(
            meta.store().get("Exif.GPSInfo.GPSLatitude"),
            Some("39/1 54/1 20/1")
        );
    }
}
