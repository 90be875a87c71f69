use std::fmt::Display;

#[cfg(feature = "json_dump")]
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Reason, Status},
    range::{self, TagDetails},
    rules,
    tags::{NameLookup, Permission, Property, TagRegistry},
};

/// Decides which registered properties may be written.
#[cfg_attr(feature = "json_dump", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WritePolicy {
    /// Use the permission column of the registry.
    #[default]
    Permission,

    /// Every `Exif.Huawei*` tag is protected, except
    /// `Exif.Huawei.CaptureMode`; everything else is writable.
    VendorProtected,
}

const VENDOR_TAG_PREFIX: &str = "Exif.Huawei";
const VENDOR_WRITABLE_TAG: &str = "Exif.Huawei.CaptureMode";

impl WritePolicy {
    fn allows(self, property: &Property) -> bool {
        match self {
            WritePolicy::Permission => property.permission.is_writable(),
            WritePolicy::VendorProtected => {
                !property.tag.starts_with(VENDOR_TAG_PREFIX) || property.tag == VENDOR_WRITABLE_TAG
            }
        }
    }
}

/// Configures a [`Formatter`].
///
/// Two presets are provided: [`FormatterConfig::accessor`] (the default)
/// matches names exactly and honors registry permissions, while
/// [`FormatterConfig::codec`] matches names case-insensitively and protects
/// vendor maker-note tags.
#[cfg_attr(feature = "json_dump", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FormatterConfig {
    pub lookup: NameLookup,
    pub write_policy: WritePolicy,
}

impl FormatterConfig {
    pub const fn accessor() -> Self {
        Self {
            lookup: NameLookup::Exact,
            write_policy: WritePolicy::Permission,
        }
    }

    pub const fn codec() -> Self {
        Self {
            lookup: NameLookup::CaseInsensitive,
            write_policy: WritePolicy::VendorProtected,
        }
    }

    pub const fn with_lookup(mut self, lookup: NameLookup) -> Self {
        self.lookup = lookup;
        self
    }

    pub const fn with_write_policy(mut self, write_policy: WritePolicy) -> Self {
        self.write_policy = write_policy;
        self
    }
}

/// What [`Formatter::describe`] knows about a property.
#[cfg_attr(feature = "json_dump", derive(Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyInfo {
    pub name: &'static str,
    pub tag: &'static str,
    pub permission: Permission,

    /// Whether the formatter's [`WritePolicy`] lets this property be
    /// written. May differ from `permission`.
    pub writable: bool,

    /// Number of accepted value syntaxes, 0 if any value is accepted.
    pub format_rules: usize,

    /// Legal codes, empty if the tag is not enumerated.
    pub values: &'static [TagDetails],
}

impl Display for PropertyInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} => {} ({})",
            self.name,
            self.tag,
            if self.writable { "rw" } else { "ro" }
        )
    }
}

/// Validates Exif property values and rewrites them into their canonical
/// form.
///
/// A value goes through four stages, in order, and the first failing stage
/// decides the error:
///
/// 1. the property name must be registered ([`Reason::UnknownProperty`]);
/// 2. the property must be writable ([`Reason::ReadOnly`]);
/// 3. the value must match one of the property's grammars, and is then
///    rewritten by that grammar's conversion ([`Reason::InvalidFormat`]);
/// 4. the rewritten value must be a legal code if the tag is enumerated
///    ([`Error::OutOfRange`]).
///
/// ```rust
/// use exif_formatter::{Formatter, Status};
///
/// let f = Formatter::new();
/// assert_eq!(f.format("FNumber", "2.8").unwrap(), "14/5");
/// assert_eq!(f.format("GPSLatitude", "39,54,20").unwrap(), "39/1 54/1 20/1");
/// assert_eq!(f.status("GPSLatitudeRef", "Q"), Status::OutOfRange);
/// assert_eq!(f.status("HwMnoteFaceCount", "2"), Status::UnsupportedProperty);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Formatter {
    config: FormatterConfig,
    registry: TagRegistry,
}

impl Formatter {
    /// Create a formatter with the [`FormatterConfig::accessor`] preset.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: FormatterConfig) -> Self {
        Self {
            config,
            registry: TagRegistry::new(config.lookup),
        }
    }

    pub fn config(&self) -> FormatterConfig {
        self.config
    }

    pub fn registry(&self) -> &TagRegistry {
        &self.registry
    }

    pub fn is_key_supported(&self, name: &str) -> bool {
        self.registry.is_key_supported(name)
    }

    /// Returns true if `name` is registered and writable under this
    /// formatter's [`WritePolicy`].
    pub fn is_modify_allowed(&self, name: &str) -> bool {
        self.registry
            .property(name)
            .is_some_and(|p| self.config.write_policy.allows(p))
    }

    pub fn canonical_tag(&self, name: &str) -> Option<&'static str> {
        self.registry.canonical_tag(name)
    }

    /// Validate `value` and return its canonical form.
    #[tracing::instrument(skip(self))]
    pub fn format(&self, name: &str, value: &str) -> crate::Result<String> {
        let property = self.writable_property(name)?;

        let mut value = value.to_owned();
        // errors are reported against the name the caller used
        apply_format_rules(property, &mut value).map_err(|e| e.with_key(name))?;
        range::validate_value_range(property.tag, &value).map_err(|e| e.with_key(name))?;

        tracing::debug!(tag = property.tag, value = value.as_str(), "formatted");
        Ok(value)
    }

    /// Like [`Formatter::format`], but discards the canonical value.
    pub fn validate(&self, name: &str, value: &str) -> crate::Result<()> {
        self.format(name, value).map(|_| ())
    }

    pub fn status(&self, name: &str, value: &str) -> Status {
        Status::from(&self.validate(name, value))
    }

    /// Check `value` against the canonical `tag`'s enumerated codes only.
    pub fn validate_value_range(&self, tag: &str, value: &str) -> crate::Result<()> {
        range::validate_value_range(tag, value)
    }

    /// A lightweight syntax check for a handful of image geometry and GPS
    /// properties. Nothing is rewritten, permissions and range tables are
    /// not consulted, and names without such a check pass.
    pub fn check_format_only(&self, name: &str, value: &str) -> crate::Result<()> {
        let Some(property) = self.registry.property(name) else {
            return Ok(());
        };
        let grammars = rules::format_only_grammars(property.name);
        if grammars.is_empty() || grammars.iter().any(|g| g.matches(value)) {
            Ok(())
        } else {
            tracing::debug!(name, value, "format check failed");
            Err(Error::unsupported(name, Reason::InvalidFormat))
        }
    }

    pub fn describe(&self, name: &str) -> Option<PropertyInfo> {
        let p = self.registry.property(name)?;
        Some(PropertyInfo {
            name: p.name,
            tag: p.tag,
            permission: p.permission,
            writable: self.config.write_policy.allows(p),
            format_rules: rules::format_rules(p.name).len(),
            values: range::range_rule(p.tag).map(|r| r.details).unwrap_or_default(),
        })
    }

    fn writable_property(&self, name: &str) -> crate::Result<&'static Property> {
        let Some(property) = self.registry.property(name) else {
            tracing::debug!(name, "unknown property");
            return Err(Error::unsupported(name, Reason::UnknownProperty));
        };
        if !self.config.write_policy.allows(property) {
            tracing::debug!(name, tag = property.tag, "property is read-only");
            return Err(Error::unsupported(name, Reason::ReadOnly));
        }
        Ok(property)
    }
}

/// Try the property's rules in order and rewrite `value` with the first
/// one whose grammar matches.
fn apply_format_rules(property: &Property, value: &mut String) -> crate::Result<()> {
    let rules = rules::format_rules(property.name);
    if rules.is_empty() {
        return Ok(());
    }

    let Some(rule) = rules.iter().find(|r| r.grammar.matches(value)) else {
        tracing::debug!(name = property.name, "no grammar matched");
        return Err(Error::unsupported(property.name, Reason::InvalidFormat));
    };
    tracing::debug!(name = property.name, grammar = ?rule.grammar, "grammar matched");

    rule.conversion.apply(value).map_err(|e| {
        tracing::debug!(name = property.name, error = %e, "conversion failed");
        Error::unsupported(property.name, Reason::InvalidFormat)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::random_value;
    use rand::Rng;
    use test_case::case;

    #[case("FNumber", "3", "3/1")]
    #[case("FNumber", "3.0", "3/1")]
    #[case("FNumber", "5/2", "5/2")]
    #[case("FNumber", "2.05", "41/20")]
    #[case("ExposureTime", "0.0", "0/1")]
    #[case("GPSLatitudeRef", "N", "N")]
    #[case("Orientation", "6", "6")]
    #[case("BitsPerSample", "8,8,8", "8 8 8")]
    #[case("BitsPerSample", "8 8 8", "8 8 8")]
    #[case("GPSLatitude", "39,54,20", "39/1 54/1 20/1")]
    #[case("GPSLatitude", "39 54 20", "39/1 54/1 20/1")]
    #[case("GPSLatitude", "39/1 54/1 41/2", "39/1 54/1 41/2")]
    #[case("GPSTimeStamp", "12:30:45", "12/1 30/1 45/1")]
    #[case("GPSDateStamp", "2022:06:02", "2022:06:02")]
    #[case("DateTimeOriginal", "2022:06:02 15:51:34", "2022:06:02 15:51:34")]
    #[case("DateTime", "2022:06:02", "2022:06:02")]
    #[case("YCbCrCoefficients", "0.299,0.587,0.114", "299/1000 587/1000 57/500")]
    #[case("GPSVersionID", "2.2.0.0", "2 2 0 0")]
    #[case("DNGVersion", "1,4,0,0", "1 4 0 0")]
    #[case("DefaultCropSize", "153,207", "153 207")]
    #[case("LensSpecification", "1.5 3 1 2", "3/2 3/1 1/1 2/1")]
    #[case("LensSpecification", "1,3,1,2", "1/1 3/1 1/1 2/1")]
    #[case("Make", "any text at all", "any text at all")]
    #[case("HwMnoteCaptureMode", "1", "1")]
    fn format_ok(name: &str, value: &str, expect: &str) {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        let f = Formatter::new();
        assert_eq!(f.format(name, value).unwrap(), expect);
    }

    #[case("FNumber", "-3", Reason::InvalidFormat)]
    #[case("FNumber", "", Reason::InvalidFormat)]
    #[case("FNumber", "5/0", Reason::InvalidFormat)]
    #[case("FNumber", "1.00000000000000000000001", Reason::InvalidFormat)]
    #[case("GPSLatitude", "39,0,20", Reason::InvalidFormat)]
    #[case("GPSVersionID", "2x2x0x0", Reason::InvalidFormat)]
    #[case("DateTime", "2022-06-02", Reason::InvalidFormat)]
    #[case("GPSLatitudeRef", "North", Reason::InvalidRangeValue)]
    #[case("HwMnoteFaceCount", "2", Reason::ReadOnly)]
    #[case("NoSuchTag", "1", Reason::UnknownProperty)]
    #[case("fnumber", "3", Reason::UnknownProperty)]
    fn format_unsupported(name: &str, value: &str, reason: Reason) {
        let err = Formatter::new().format(name, value).unwrap_err();
        assert_eq!(err.status(), Status::UnsupportedProperty);
        assert_eq!(err.reason(), Some(reason), "{err}");
    }

    #[test]
    fn unsupported_statuses_are_conflated() {
        // Unknown, read-only and malformed all report the same status code;
        // only `Error::reason` tells them apart.
        let f = Formatter::new();
        let unknown = f.validate("NoSuchTag", "3").unwrap_err();
        let read_only = f.validate("HwMnoteFaceCount", "3").unwrap_err();
        let malformed = f.validate("FNumber", "three").unwrap_err();

        assert_eq!(unknown.status(), read_only.status());
        assert_eq!(unknown.status(), malformed.status());
        assert_ne!(unknown.reason(), malformed.reason());
    }

    #[case("GPSLatitudeRef", "Q")]
    #[case("Orientation", "9")]
    #[case("WhiteBalance", "2")]
    #[case("GPSSpeedRef", "X")]
    fn format_out_of_range(name: &str, value: &str) {
        let f = Formatter::new();
        assert_eq!(f.status(name, value), Status::OutOfRange);
        assert_eq!(f.status(name, value).code(), 2);
    }

    #[test]
    fn validate_scenarios() {
        let f = Formatter::new();
        assert_eq!(f.status("FNumber", "3"), Status::Success);
        assert_eq!(f.status("GPSLatitudeRef", "N"), Status::Success);
        assert_eq!(f.status("HwMnoteFaceCount", "2"), Status::UnsupportedProperty);
        assert_eq!(f.status("HwMnoteFaceCount", "2").code(), 1);

        let value = String::from("8,8,8");
        f.validate("BitsPerSample", &value).unwrap();
        assert_eq!(value, "8,8,8");
    }

    #[test]
    fn format_is_idempotent() {
        let f = Formatter::new();
        let samples = [
            ("FNumber", "2.5"),
            ("FNumber", "3"),
            ("BitsPerSample", "8,8,8"),
            ("GPSLatitude", "39,54,20"),
            ("GPSTimeStamp", "12:30:45"),
            ("YCbCrCoefficients", "0.299,0.587,0.114"),
            ("GPSVersionID", "2.2.0.0"),
            ("DNGVersion", "1,4,0,0"),
            ("DefaultCropSize", "153,207"),
            ("LensSpecification", "1.5,3.5,1.8,2.8"),
            ("DateTimeOriginal", "2022:06:02 15:51:34"),
            ("Orientation", "1"),
        ];
        for (name, value) in samples {
            let once = f.format(name, value).unwrap();
            let twice = f.format(name, &once).unwrap();
            assert_eq!(once, twice, "{name} {value:?}");
        }
    }

    #[test]
    fn out_of_range_needs_a_code() {
        // Only a well-formed code of an enumerated tag may be out of range;
        // anything malformed is unsupported.
        let f = Formatter::new();
        let mut rng = rand::thread_rng();
        let names: Vec<_> = f.registry().properties().map(|p| p.name).collect();

        for _ in 0..5000 {
            let name = names[rng.gen_range(0..names.len())];
            let value = random_value(&mut rng);
            let Err(err) = f.format(name, &value) else {
                continue;
            };
            if err.status() == Status::OutOfRange {
                let tag = f.canonical_tag(name).unwrap();
                assert!(range::range_rule(tag).is_some(), "{name} {value:?}");
                assert!(range::parse_code(&value).is_ok(), "{name} {value:?}");
            }
        }
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let f = Formatter::new();
        let mut rng = rand::thread_rng();
        for _ in 0..1000 {
            let name = random_value(&mut rng);
            if f.is_key_supported(&name) {
                continue;
            }
            assert_eq!(f.status(&name, "1"), Status::UnsupportedProperty);
        }
    }

    #[test]
    fn codec_preset() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        let f = Formatter::with_config(FormatterConfig::codec());
        assert_eq!(f.format("fnumber", "3").unwrap(), "3/1");
        assert_eq!(f.format("GPSLATITUDEREF", "N").unwrap(), "N");
        assert_eq!(f.canonical_tag("bitspersample"), Some("Exif.Image.BitsPerSample"));

        assert!(f.is_modify_allowed("HwMnoteCaptureMode"));
        assert!(!f.is_modify_allowed("HwMnoteFaceCount"));
        assert!(!f.is_modify_allowed("HwMnoteSceneFoodConf"));
        assert!(!f.is_modify_allowed("HwMnoteFaceRect"));
        assert!(f.is_modify_allowed("Make"));

        let err = f.format("hwmnotefacecount", "2").unwrap_err();
        assert_eq!(err.reason(), Some(Reason::ReadOnly));
    }

    #[test]
    fn custom_config() {
        let config = FormatterConfig::accessor().with_lookup(NameLookup::CaseInsensitive);
        let f = Formatter::with_config(config);
        assert_eq!(f.config().write_policy, WritePolicy::Permission);
        assert_eq!(f.format("fnumber", "3").unwrap(), "3/1");
        assert!(!f.is_modify_allowed("hwmnotefacecount"));

        let config = FormatterConfig::codec().with_write_policy(WritePolicy::Permission);
        assert_eq!(config.lookup, NameLookup::CaseInsensitive);
        assert_eq!(FormatterConfig::default(), FormatterConfig::accessor());
    }

    #[case("BitsPerSample", "8,8,8", true)]
    #[case("BitsPerSample", "8 8 8", false)]
    #[case("ImageWidth", "4032", true)]
    #[case("ImageLength", "40.5", false)]
    #[case("GPSLatitude", "39,54", true)]
    #[case("GPSLatitude", "39.5,54,20.25", true)]
    #[case("GPSLongitude", "116 23 27", false)]
    #[case("FNumber", "not checked", true)]
    fn format_only(name: &str, value: &str, ok: bool) {
        let res = Formatter::new().check_format_only(name, value);
        assert_eq!(res.is_ok(), ok, "{name} {value:?}");
    }

    #[case("bitspersample", "8 8 8", false)]
    #[case("BITSPERSAMPLE", "8,8,8", true)]
    #[case("imagewidth", "40.5", false)]
    #[case("gpslongitude", "116,23,27", true)]
    fn format_only_codec(name: &str, value: &str, ok: bool) {
        let f = Formatter::with_config(FormatterConfig::codec());
        let res = f.check_format_only(name, value);
        assert_eq!(res.is_ok(), ok, "{name} {value:?}");
        if !ok {
            assert_eq!(res.unwrap_err().reason(), Some(Reason::InvalidFormat));
        }
    }

    #[test]
    fn unicode_blanks_are_rejected() {
        let f = Formatter::new();
        for (name, value) in [
            ("BitsPerSample", "8\u{3000}8\u{a0}8"),
            ("GPSLatitude", "39/1\u{2003}54/1\u{2003}20/1"),
            ("DateTimeOriginal", "2022:06:02\u{a0}15:51:34"),
        ] {
            let err = f.format(name, value).unwrap_err();
            assert_eq!(err.reason(), Some(Reason::InvalidFormat), "{name} {value:?}");
        }
    }

    #[test]
    fn errors_carry_the_requested_name() {
        let f = Formatter::with_config(FormatterConfig::codec());
        assert_eq!(
            f.format("GPSLatitudeRef", "Q").unwrap_err(),
            Error::out_of_range("GPSLatitudeRef", "Q")
        );
        assert_eq!(
            f.format("gpslatituderef", "North").unwrap_err(),
            Error::unsupported("gpslatituderef", Reason::InvalidRangeValue)
        );
        assert_eq!(
            f.format("fnumber", "x").unwrap_err(),
            Error::unsupported("fnumber", Reason::InvalidFormat)
        );
    }

    #[test]
    fn describe() {
        let f = Formatter::new();

        let info = f.describe("GPSLatitudeRef").unwrap();
        assert_eq!(info.tag, "Exif.GPSInfo.GPSLatitudeRef");
        assert!(info.writable);
        assert_eq!(info.format_rules, 0);
        let labels: Vec<_> = info.values.iter().map(|d| d.description).collect();
        assert_eq!(labels, ["North", "South"]);

        let info = f.describe("LensSpecification").unwrap();
        assert_eq!(info.format_rules, 5);
        assert!(info.values.is_empty());

        let info = f.describe("HwMnoteFaceCount").unwrap();
        assert_eq!(info.permission, Permission::ReadOnly);
        assert!(!info.writable);
        assert_eq!(info.to_string(), "HwMnoteFaceCount => Exif.Huawei.FaceCount (ro)");

        assert!(f.describe("NoSuchTag").is_none());
    }

    #[cfg(feature = "json_dump")]
    #[test]
    fn json_dump() {
        let config = FormatterConfig::codec();
        let s = serde_json::to_string(&config).unwrap();
        assert_eq!(
            s,
            r#"{"lookup":"CaseInsensitive","write_policy":"VendorProtected"}"#
        );
        assert_eq!(serde_json::from_str::<FormatterConfig>(&s).unwrap(), config);

        let info = Formatter::new().describe("WhiteBalance").unwrap();
        let v = serde_json::to_value(info).unwrap();
        assert_eq!(v["tag"], "Exif.Photo.WhiteBalance");
        assert_eq!(v["permission"], "ReadWrite");
        assert_eq!(v["values"][1]["description"], "Manual");
    }

    #[test]
    fn formatter_is_shareable() {
        fn assert_send_sync<T: Send + Sync + Clone>() {}
        assert_send_sync::<Formatter>();

        let f = Formatter::new();
        std::thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| assert_eq!(f.format("FNumber", "2.5").unwrap(), "5/2"));
            }
        });
    }
}
