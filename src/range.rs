//! Enumerated value sets for tags whose values are codes, see
//! https://exiftool.org/TagNames/EXIF.html

use std::sync::LazyLock;

use regex::Regex;
#[cfg(feature = "json_dump")]
use serde::Serialize;

use crate::error::{Error, Reason};

/// A legal code and its human readable meaning.
#[cfg_attr(feature = "json_dump", derive(Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TagDetails {
    pub code: i64,
    pub description: &'static str,
}

/// The allowed codes of one canonical tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeRule {
    pub tag: &'static str,
    pub details: &'static [TagDetails],
}

const fn d(code: i64, description: &'static str) -> TagDetails {
    TagDetails { code, description }
}

/// Letter codes are stored as their ASCII value.
const fn c(code: u8, description: &'static str) -> TagDetails {
    TagDetails {
        code: code as i64,
        description,
    }
}

const ORIENTATION: &[TagDetails] = &[
    d(1, "top, left"),
    d(2, "top, right"),
    d(3, "bottom, right"),
    d(4, "bottom, left"),
    d(5, "left, top"),
    d(6, "right, top"),
    d(7, "right, bottom"),
    d(8, "left, bottom"),
];

const GPS_LATITUDE_REF: &[TagDetails] = &[c(b'N', "North"), c(b'S', "South")];

const GPS_LONGITUDE_REF: &[TagDetails] = &[c(b'E', "East"), c(b'W', "West")];

const WHITE_BALANCE: &[TagDetails] = &[d(0, "Auto"), d(1, "Manual")];

const FLASH: &[TagDetails] = &[
    d(0x00, "No flash"),
    d(0x01, "Fired"),
    d(0x05, "Fired, return light not detected"),
    d(0x07, "Fired, return light detected"),
    d(0x08, "Yes, did not fire"),
    d(0x09, "Yes, compulsory"),
    d(0x0d, "Yes, compulsory, return light not detected"),
    d(0x0f, "Yes, compulsory, return light detected"),
    d(0x10, "No, compulsory"),
    d(0x14, "No, did not fire, return light not detected"),
    d(0x18, "No, auto"),
    d(0x19, "Yes, auto"),
    d(0x1d, "Yes, auto, return light not detected"),
    d(0x1f, "Yes, auto, return light detected"),
    d(0x20, "No flash function"),
    d(0x20, "No, no flash function"),
    d(0x41, "Yes, red-eye reduction"),
    d(0x45, "Yes, red-eye reduction, return light not detected"),
    d(0x47, "Yes, red-eye reduction, return light detected"),
    d(0x49, "Yes, compulsory, red-eye reduction"),
    d(0x4d, "Yes, compulsory, red-eye reduction, return light not detected"),
    d(0x4f, "Yes, compulsory, red-eye reduction, return light detected"),
    d(0x50, "No, red-eye reduction"),
    d(0x58, "No, auto, red-eye reduction"),
    d(0x59, "Yes, auto, red-eye reduction"),
    d(0x5d, "Yes, auto, red-eye reduction, return light not detected"),
    d(0x5f, "Yes, auto, red-eye reduction, return light detected"),
];

const COLOR_SPACE: &[TagDetails] = &[d(1, "sRGB"), d(2, "Adobe RGB"), d(0xffff, "Uncalibrated")];

const LIGHT_SOURCE: &[TagDetails] = &[
    d(0, "Unknown"),
    d(1, "Daylight"),
    d(2, "Fluorescent"),
    d(3, "Tungsten (incandescent light)"),
    d(4, "Flash"),
    d(9, "Fine weather"),
    d(10, "Cloudy weather"),
    d(11, "Shade"),
    d(12, "Daylight fluorescent (D 5700 - 7100K)"),
    d(13, "Day white fluorescent (N 4600 - 5400K)"),
    d(14, "Cool white fluorescent (W 3900 - 4500K)"),
    d(15, "White fluorescent (WW 3200 - 3700K)"),
    d(17, "Standard light A"),
    d(18, "Standard light B"),
    d(19, "Standard light C"),
    d(20, "D55"),
    d(21, "D65"),
    d(22, "D75"),
    d(23, "D50"),
    d(24, "ISO studio tungsten"),
    d(255, "Other light source"),
];

const METERING_MODE: &[TagDetails] = &[
    d(0, "Unknown"),
    d(1, "Average"),
    d(2, "Center weighted average"),
    d(3, "Spot"),
    d(4, "Multi-spot"),
    d(5, "Multi-segment"),
    d(6, "Partial"),
    d(255, "Other"),
];

const SCENE_TYPE: &[TagDetails] = &[d(1, "Directly photographed")];

const COMPRESSION: &[TagDetails] = &[
    d(1, "Uncompressed"),
    d(2, "CCITT RLE"),
    d(3, "T4/Group 3 Fax"),
    d(4, "T6/Group 4 Fax"),
    d(5, "LZW"),
    d(6, "JPEG (old-style)"),
    d(7, "JPEG"),
    d(8, "Adobe Deflate"),
    d(9, "JBIG B&W"),
    d(10, "JBIG Color"),
    d(32766, "Next 2-bits RLE"),
    d(32767, "Sony ARW Compressed"),
    d(32769, "Epson ERF Compressed"),
    d(32770, "Samsung SRW Compressed"),
    d(32771, "CCITT RLE 1-word"),
    d(32773, "PackBits (Macintosh RLE)"),
    d(32809, "Thunderscan RLE"),
    d(32895, "IT8 CT Padding"),
    d(32896, "IT8 Linework RLE"),
    d(32897, "IT8 Monochrome Picture"),
    d(32898, "IT8 Binary Lineart"),
    d(32908, "Pixar Film (10-bits LZW)"),
    d(32909, "Pixar Log (11-bits ZIP)"),
    d(32946, "Pixar Deflate"),
    d(32947, "Kodak DCS Encoding"),
    d(34661, "ISO JBIG"),
    d(34676, "SGI Log Luminance RLE"),
    d(34677, "SGI Log 24-bits packed"),
    d(34712, "Leadtools JPEG 2000"),
    d(34713, "Nikon NEF Compressed"),
    d(34892, "JPEG (lossy)"),
    d(52546, "JPEG XL"),
    d(65000, "Kodak DCR Compressed"),
    d(65535, "Pentax PEF Compressed"),
];

const PHOTOMETRIC_INTERPRETATION: &[TagDetails] = &[
    d(0, "White Is Zero"),
    d(1, "Black Is Zero"),
    d(2, "RGB"),
    d(3, "RGB Palette"),
    d(4, "Transparency Mask"),
    d(5, "CMYK"),
    d(6, "YCbCr"),
    d(8, "CIELab"),
    d(9, "ICCLab"),
    d(10, "ITULab"),
    d(32803, "Color Filter Array"),
    d(32844, "Pixar LogL"),
    d(32845, "Pixar LogLuv"),
    d(34892, "Linear Raw"),
    d(51177, "Depth Map"),
    d(52527, "Photometric Mask"),
];

const PLANAR_CONFIGURATION: &[TagDetails] = &[d(1, "Chunky"), d(2, "Planar")];

const RESOLUTION_UNIT: &[TagDetails] = &[d(1, "none"), d(2, "inch"), d(3, "cm")];

const YCBCR_POSITIONING: &[TagDetails] = &[d(1, "Centered"), d(2, "Co-sited")];

const EXPOSURE_PROGRAM: &[TagDetails] = &[
    d(0, "Not defined"),
    d(1, "Manual"),
    d(2, "Auto"),
    d(3, "Aperture priority"),
    d(4, "Shutter priority"),
    d(5, "Creative program"),
    d(6, "Action program"),
    d(7, "Portrait mode"),
    d(8, "Landscape mode"),
];

const SENSING_METHOD: &[TagDetails] = &[
    d(0, "Undefined"),
    d(1, "Monochrome area"),
    d(2, "One-chip color area"),
    d(3, "Two-chip color area"),
    d(4, "Three-chip color area"),
    d(5, "Color sequential area"),
    d(6, "Monochrome linear"),
    d(7, "Trilinear sensor"),
    d(8, "Color sequential linear"),
];

const CUSTOM_RENDERED: &[TagDetails] = &[d(0, "Normal process"), d(1, "Custom process")];

const EXPOSURE_MODE: &[TagDetails] = &[d(0, "Auto"), d(1, "Manual"), d(2, "Auto bracket")];

const SCENE_CAPTURE_TYPE: &[TagDetails] = &[
    d(0, "Standard"),
    d(1, "Landscape"),
    d(2, "Portrait"),
    d(3, "Night scene"),
];

const GAIN_CONTROL: &[TagDetails] = &[
    d(0, "None"),
    d(1, "Low gain up"),
    d(2, "High gain up"),
    d(3, "Low gain down"),
    d(4, "High gain down"),
];

const CONTRAST: &[TagDetails] = &[d(0, "Normal"), d(1, "Soft"), d(2, "Hard")];

const SATURATION: &[TagDetails] = &[d(0, "Normal"), d(1, "Low"), d(2, "High")];

const SUBJECT_DISTANCE_RANGE: &[TagDetails] = &[
    d(0, "Unknown"),
    d(1, "Macro"),
    d(2, "Close view"),
    d(3, "Distant view"),
];

const GPS_ALTITUDE_REF: &[TagDetails] = &[d(0, "Above sea level"), d(1, "Below sea level")];

const NEW_SUBFILE_TYPE: &[TagDetails] = &[
    d(0, "Primary image"),
    d(1, "Thumbnail/Preview image"),
    d(2, "Primary image, Multi page file"),
    d(3, "Thumbnail/Preview image, Multi page file"),
    d(4, "Primary image, Transparency mask"),
    d(5, "Thumbnail/Preview image, Transparency mask"),
    d(6, "Primary image, Multi page file, Transparency mask"),
    d(7, "Thumbnail/Preview image, Multi page file, Transparency mask"),
    d(8, "Primary image, Depth map"),
    d(9, "Thumbnail/Preview image, Depth map"),
    d(16, "Enhanced image"),
    d(65537, "Thumbnail/Preview image, Alternative"),
    d(65540, "Primary image, Semantic mask"),
];

const SUBFILE_TYPE: &[TagDetails] = &[
    d(1, "Full-resolution image data"),
    d(2, "Reduced-resolution image data"),
    d(3, "A single page of a multi-page image"),
];

const GPS_STATUS: &[TagDetails] = &[
    c(b'A', "Measurement in progress"),
    c(b'V', "Measurement interrupted"),
];

const GPS_MEASURE_MODE: &[TagDetails] = &[
    d(2, "2-dimensional measurement"),
    d(3, "3-dimensional measurement"),
];

const GPS_SPEED_REF: &[TagDetails] = &[c(b'K', "km/h"), c(b'M', "mph"), c(b'N', "knots")];

const GPS_IMG_DIRECTION_REF: &[TagDetails] = &[
    c(b'T', "True direction"),
    c(b'M', "Magnetic direction"),
];

const GPS_DEST_DISTANCE_REF: &[TagDetails] = &[
    c(b'K', "km"),
    c(b'M', "miles"),
    c(b'N', "nautical miles"),
];

const GPS_DIFFERENTIAL: &[TagDetails] = &[d(0, "Without correction"), d(1, "Correction applied")];

const COMPOSITE_IMAGE: &[TagDetails] = &[
    d(0, "Unknown"),
    d(1, "NonComposite"),
    d(2, "GeneralComposite"),
    d(3, "CompositeCapturedWhenShooting"),
];

const fn range(tag: &'static str, details: &'static [TagDetails]) -> RangeRule {
    RangeRule { tag, details }
}

static RANGE_RULES: &[RangeRule] = &[
    range("Exif.Image.Orientation", ORIENTATION),
    range("Exif.GPSInfo.GPSLatitudeRef", GPS_LATITUDE_REF),
    range("Exif.GPSInfo.GPSLongitudeRef", GPS_LONGITUDE_REF),
    range("Exif.Photo.WhiteBalance", WHITE_BALANCE),
    range("Exif.Photo.Flash", FLASH),
    range("Exif.Photo.ColorSpace", COLOR_SPACE),
    range("Exif.Photo.LightSource", LIGHT_SOURCE),
    range("Exif.Photo.MeteringMode", METERING_MODE),
    range("Exif.Photo.SceneType", SCENE_TYPE),
    range("Exif.Image.Compression", COMPRESSION),
    range("Exif.Image.PhotometricInterpretation", PHOTOMETRIC_INTERPRETATION),
    range("Exif.Image.PlanarConfiguration", PLANAR_CONFIGURATION),
    range("Exif.Image.ResolutionUnit", RESOLUTION_UNIT),
    range("Exif.Image.YCbCrPositioning", YCBCR_POSITIONING),
    range("Exif.Photo.ExposureProgram", EXPOSURE_PROGRAM),
    range("Exif.Photo.SensingMethod", SENSING_METHOD),
    range("Exif.Photo.CustomRendered", CUSTOM_RENDERED),
    range("Exif.Photo.ExposureMode", EXPOSURE_MODE),
    range("Exif.Photo.SceneCaptureType", SCENE_CAPTURE_TYPE),
    range("Exif.Photo.GainControl", GAIN_CONTROL),
    range("Exif.Photo.Contrast", CONTRAST),
    range("Exif.Photo.Saturation", SATURATION),
    range("Exif.Photo.Sharpness", CONTRAST),
    range("Exif.Photo.SubjectDistanceRange", SUBJECT_DISTANCE_RANGE),
    range("Exif.Photo.FocalPlaneResolutionUnit", RESOLUTION_UNIT),
    range("Exif.GPSInfo.GPSAltitudeRef", GPS_ALTITUDE_REF),
    range("Exif.Image.NewSubfileType", NEW_SUBFILE_TYPE),
    range("Exif.Image.SubfileType", SUBFILE_TYPE),
    range("Exif.GPSInfo.GPSStatus", GPS_STATUS),
    range("Exif.GPSInfo.GPSMeasureMode", GPS_MEASURE_MODE),
    range("Exif.GPSInfo.GPSSpeedRef", GPS_SPEED_REF),
    range("Exif.GPSInfo.GPSImgDirectionRef", GPS_IMG_DIRECTION_REF),
    range("Exif.GPSInfo.GPSDestDistanceRef", GPS_DEST_DISTANCE_REF),
    range("Exif.GPSInfo.GPSDifferential", GPS_DIFFERENTIAL),
    range("Exif.Photo.CompositeImage", COMPOSITE_IMAGE),
];

/// The range rule of a canonical tag, if its values are enumerated.
pub fn range_rule(tag: &str) -> Option<&'static RangeRule> {
    RANGE_RULES.iter().find(|r| r.tag == tag)
}

/// Why a value can't be turned into a code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CodeError {
    /// Neither a decimal integer nor a single ASCII letter.
    NotACode,
    /// A decimal integer that doesn't fit in an `i64`.
    TooLarge,
}

static INTEGER: LazyLock<Regex> =
    // Safe unwrap
    LazyLock::new(|| Regex::new("^[0-9]+$").unwrap());

static LETTER: LazyLock<Regex> =
    // Safe unwrap
    LazyLock::new(|| Regex::new("^[a-zA-Z]$").unwrap());

/// Interpret `value` as a code: a decimal integer, or a single letter
/// standing for its ASCII value (`N` is 78).
pub(crate) fn parse_code(value: &str) -> Result<i64, CodeError> {
    if INTEGER.is_match(value) {
        value.parse().map_err(|_| CodeError::TooLarge)
    } else if LETTER.is_match(value) {
        Ok(i64::from(value.as_bytes()[0]))
    } else {
        Err(CodeError::NotACode)
    }
}

/// Check `value` against the allowed codes of the canonical `tag`.
///
/// Tags without a range rule accept anything. A value that can't be read
/// as a code is [`Error::Unsupported`] with [`Reason::InvalidRangeValue`];
/// a readable code outside the set is [`Error::OutOfRange`].
pub fn validate_value_range(tag: &str, value: &str) -> crate::Result<()> {
    let Some(rule) = range_rule(tag) else {
        return Ok(());
    };

    let code = parse_code(value).map_err(|e| {
        tracing::debug!(tag, value, error = ?e, "not a range value");
        Error::unsupported(tag, Reason::InvalidRangeValue)
    })?;

    if rule.details.iter().any(|d| d.code == code) {
        Ok(())
    } else {
        tracing::debug!(tag, code, "value out of range");
        Err(Error::out_of_range(tag, value))
    }
}

/// The description of a legal `value` of `tag`, e.g. `"North"` for
/// `("Exif.GPSInfo.GPSLatitudeRef", "N")`.
pub fn describe_value(tag: &str, value: &str) -> Option<&'static str> {
    let code = parse_code(value).ok()?;
    range_rule(tag)?
        .details
        .iter()
        .find(|d| d.code == code)
        .map(|d| d.description)
}
