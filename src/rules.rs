//! Per-property format rules: which grammars a value may be written in and
//! how each one is rewritten to the canonical form.

use std::{collections::HashMap, sync::LazyLock};

use crate::{convert::Conversion, grammar::Grammar};

/// A grammar paired with the conversion applied once it matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FormatRule {
    pub grammar: Grammar,
    pub conversion: Conversion,
}

const fn rule(grammar: Grammar, conversion: Conversion) -> FormatRule {
    FormatRule {
        grammar,
        conversion,
    }
}

use Conversion::*;

const DOUBLE_INT_WITH_BLANK: FormatRule = rule(Grammar::TwoIntBlank, ValidateOnly);
const DOUBLE_INT_WITH_COMMA: FormatRule = rule(Grammar::TwoIntComma, ReplaceSeparator(','));
const TRIPLE_INT_WITH_BLANK: FormatRule = rule(Grammar::ThreeIntBlank, ValidateOnly);
const TRIPLE_INT_WITH_COMMA: FormatRule = rule(Grammar::ThreeIntComma, ReplaceSeparator(','));
const FOUR_INT_WITH_BLANK: FormatRule = rule(Grammar::FourIntBlank, ValidateOnly);
const FOUR_INT_WITH_COMMA: FormatRule = rule(Grammar::FourIntComma, ReplaceSeparator(','));
const FOUR_INT_WITH_DOT: FormatRule = rule(Grammar::FourIntDot, ReplaceSeparator('.'));

const ONE_RATIONAL: FormatRule = rule(Grammar::OneRational, ValidateOnly);
const ONE_INT_TO_RATIONAL: FormatRule = rule(Grammar::OneInt, IntegersToRationals);
const ONE_DECIMAL_TO_RATIONAL: FormatRule = rule(Grammar::OneDecimal, DecimalsToRationals);

const TRIPLE_RATIONAL_WITH_BLANK: FormatRule = rule(Grammar::ThreeRationalBlank, ValidateOnly);
const TRIPLE_INT_TO_RATIONAL_WITH_BLANK: FormatRule =
    rule(Grammar::ThreeNonZeroIntBlank, IntegersToRationals);
const TRIPLE_INT_TO_RATIONAL_WITH_COMMA: FormatRule = rule(
    Grammar::ThreeNonZeroIntComma,
    SeparatedIntegersToRationals(','),
);
const TRIPLE_INT_TO_RATIONAL_WITH_COLON: FormatRule = rule(
    Grammar::ThreeNonZeroIntColon,
    SeparatedIntegersToRationals(':'),
);
const TRIPLE_DECIMAL_TO_RATIONAL_WITH_BLANK: FormatRule =
    rule(Grammar::ThreeDecimalBlank, DecimalsToRationals);
const TRIPLE_DECIMAL_TO_RATIONAL_WITH_COMMA: FormatRule = rule(
    Grammar::ThreeDecimalComma,
    SeparatedDecimalsToRationals(','),
);

const FOUR_RATIONAL_WITH_BLANK: FormatRule = rule(Grammar::FourRationalBlank, ValidateOnly);
const FOUR_INT_TO_RATIONAL_WITH_BLANK: FormatRule =
    rule(Grammar::FourIntBlank, IntegersToRationals);
const FOUR_INT_TO_RATIONAL_WITH_COMMA: FormatRule = rule(
    Grammar::FourNonZeroIntComma,
    SeparatedIntegersToRationals(','),
);
const FOUR_DECIMAL_TO_RATIONAL_WITH_BLANK: FormatRule =
    rule(Grammar::FourDecimalBlank, DecimalsToRationals);
const FOUR_DECIMAL_TO_RATIONAL_WITH_COMMA: FormatRule = rule(
    Grammar::FourDecimalComma,
    SeparatedDecimalsToRationals(','),
);

const DATE_TIME: FormatRule = rule(Grammar::DateTime, ValidateOnly);
const DATE: FormatRule = rule(Grammar::Date, ValidateOnly);

const SINGLE_RATIONAL: &[FormatRule] =
    &[ONE_RATIONAL, ONE_INT_TO_RATIONAL, ONE_DECIMAL_TO_RATIONAL];

const GPS_COORDINATE: &[FormatRule] = &[
    TRIPLE_RATIONAL_WITH_BLANK,
    TRIPLE_INT_TO_RATIONAL_WITH_BLANK,
    TRIPLE_INT_TO_RATIONAL_WITH_COMMA,
];

const DATE_OR_DATE_TIME: &[FormatRule] = &[DATE_TIME, DATE];

static FORMAT_RULES: &[(&str, &[FormatRule])] = &[
    ("BitsPerSample", &[TRIPLE_INT_WITH_BLANK, TRIPLE_INT_WITH_COMMA]),
    ("CompressedBitsPerPixel", SINGLE_RATIONAL),
    ("GPSLatitude", GPS_COORDINATE),
    ("GPSLongitude", GPS_COORDINATE),
    ("GPSDestLatitude", GPS_COORDINATE),
    ("GPSDestLongitude", GPS_COORDINATE),
    ("ApertureValue", SINGLE_RATIONAL),
    ("ExposureBiasValue", SINGLE_RATIONAL),
    ("ExposureTime", SINGLE_RATIONAL),
    ("FNumber", SINGLE_RATIONAL),
    ("FocalLength", SINGLE_RATIONAL),
    ("XResolution", SINGLE_RATIONAL),
    ("YResolution", SINGLE_RATIONAL),
    ("WhitePoint", SINGLE_RATIONAL),
    ("PrimaryChromaticities", SINGLE_RATIONAL),
    ("ReferenceBlackWhite", SINGLE_RATIONAL),
    ("ShutterSpeedValue", SINGLE_RATIONAL),
    ("BrightnessValue", SINGLE_RATIONAL),
    ("MaxApertureValue", SINGLE_RATIONAL),
    ("SubjectDistance", SINGLE_RATIONAL),
    ("FlashEnergy", SINGLE_RATIONAL),
    ("FocalPlaneXResolution", SINGLE_RATIONAL),
    ("FocalPlaneYResolution", SINGLE_RATIONAL),
    ("ExposureIndex", SINGLE_RATIONAL),
    ("DigitalZoomRatio", SINGLE_RATIONAL),
    ("GPSAltitude", SINGLE_RATIONAL),
    ("GPSDOP", SINGLE_RATIONAL),
    ("GPSSpeed", SINGLE_RATIONAL),
    ("GPSTrack", SINGLE_RATIONAL),
    ("GPSImgDirection", SINGLE_RATIONAL),
    ("GPSDestBearing", SINGLE_RATIONAL),
    ("GPSDestDistance", SINGLE_RATIONAL),
    ("Gamma", SINGLE_RATIONAL),
    ("GPSHPositioningError", SINGLE_RATIONAL),
    ("DateTimeOriginal", DATE_OR_DATE_TIME),
    ("DateTime", DATE_OR_DATE_TIME),
    (
        "GPSTimeStamp",
        &[
            TRIPLE_RATIONAL_WITH_BLANK,
            TRIPLE_INT_TO_RATIONAL_WITH_BLANK,
            TRIPLE_INT_TO_RATIONAL_WITH_COLON,
        ],
    ),
    ("GPSDateStamp", &[DATE]),
    (
        "YCbCrCoefficients",
        &[
            TRIPLE_RATIONAL_WITH_BLANK,
            TRIPLE_INT_TO_RATIONAL_WITH_BLANK,
            TRIPLE_INT_TO_RATIONAL_WITH_COMMA,
            TRIPLE_DECIMAL_TO_RATIONAL_WITH_BLANK,
            TRIPLE_DECIMAL_TO_RATIONAL_WITH_COMMA,
        ],
    ),
    ("GPSVersionID", &[FOUR_INT_WITH_BLANK, FOUR_INT_WITH_DOT]),
    ("DNGVersion", &[FOUR_INT_WITH_BLANK, FOUR_INT_WITH_COMMA]),
    ("DefaultCropSize", &[DOUBLE_INT_WITH_BLANK, DOUBLE_INT_WITH_COMMA]),
    (
        "LensSpecification",
        &[
            FOUR_RATIONAL_WITH_BLANK,
            FOUR_INT_TO_RATIONAL_WITH_BLANK,
            FOUR_INT_TO_RATIONAL_WITH_COMMA,
            FOUR_DECIMAL_TO_RATIONAL_WITH_BLANK,
            FOUR_DECIMAL_TO_RATIONAL_WITH_COMMA,
        ],
    ),
];

/// Grammars accepted by [`Formatter::check_format_only`](crate::Formatter::check_format_only).
/// Nothing is rewritten here, so only the grammars are listed.
static FORMAT_ONLY_RULES: &[(&str, &[Grammar])] = &[
    ("BitsPerSample", &[Grammar::ThreeIntComma]),
    ("ImageLength", &[Grammar::OneInt]),
    ("ImageWidth", &[Grammar::OneInt]),
    (
        "GPSLatitude",
        &[
            Grammar::TwoIntComma,
            Grammar::ThreeIntComma,
            Grammar::ThreeDecimalComma,
        ],
    ),
    (
        "GPSLongitude",
        &[
            Grammar::TwoIntComma,
            Grammar::ThreeIntComma,
            Grammar::ThreeDecimalComma,
        ],
    ),
];

static FORMAT_RULE_INDEX: LazyLock<HashMap<&'static str, &'static [FormatRule]>> =
    LazyLock::new(|| FORMAT_RULES.iter().copied().collect());

/// The format rules of a property, in the order they are tried. Empty if
/// the property's values are not constrained.
pub fn format_rules(name: &str) -> &'static [FormatRule] {
    FORMAT_RULE_INDEX.get(name).copied().unwrap_or_default()
}

pub(crate) fn format_only_grammars(name: &str) -> &'static [Grammar] {
    FORMAT_ONLY_RULES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, g)| *g)
        .unwrap_or_default()
}
