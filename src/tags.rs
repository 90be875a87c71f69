//! The registry of writable Exif properties: friendly name, canonical tag
//! and permission. Tag names follow the `Group.Subgroup.Name` scheme of
//! https://exiv2.org/tags.html

use std::{collections::HashMap, fmt::Display, sync::LazyLock};

#[cfg(feature = "json_dump")]
use serde::{Deserialize, Serialize};

#[cfg_attr(feature = "json_dump", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    ReadOnly,
    ReadWrite,
}

impl Permission {
    pub const fn is_writable(self) -> bool {
        matches!(self, Permission::ReadWrite)
    }
}

/// One row of the registry.
#[cfg_attr(feature = "json_dump", derive(Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Property {
    /// Friendly name, e.g. `GPSLatitude`.
    pub name: &'static str,

    /// Canonical tag, e.g. `Exif.GPSInfo.GPSLatitude`.
    pub tag: &'static str,

    pub permission: Permission,
}

impl Display for Property {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.tag)
    }
}

const fn rw(name: &'static str, tag: &'static str) -> Property {
    Property {
        name,
        tag,
        permission: Permission::ReadWrite,
    }
}

const fn ro(name: &'static str, tag: &'static str) -> Property {
    Property {
        name,
        tag,
        permission: Permission::ReadOnly,
    }
}

static PROPERTIES: &[Property] = &[
    rw("BitsPerSample", "Exif.Image.BitsPerSample"),
    rw("Orientation", "Exif.Image.Orientation"),
    rw("ImageLength", "Exif.Image.ImageLength"),
    rw("ImageWidth", "Exif.Image.ImageWidth"),
    rw("GPSLatitude", "Exif.GPSInfo.GPSLatitude"),
    rw("GPSLongitude", "Exif.GPSInfo.GPSLongitude"),
    rw("GPSLatitudeRef", "Exif.GPSInfo.GPSLatitudeRef"),
    rw("GPSLongitudeRef", "Exif.GPSInfo.GPSLongitudeRef"),
    rw("DateTimeOriginal", "Exif.Photo.DateTimeOriginal"),
    rw("ExposureTime", "Exif.Photo.ExposureTime"),
    rw("FNumber", "Exif.Photo.FNumber"),
    rw("ISOSpeed", "Exif.Photo.ISOSpeed"),
    rw("ISOSpeedRatings", "Exif.Photo.ISOSpeedRatings"),
    rw("SceneType", "Exif.Photo.SceneType"),
    rw("DateTime", "Exif.Image.DateTime"),
    rw("GPSTimeStamp", "Exif.GPSInfo.GPSTimeStamp"),
    rw("GPSDateStamp", "Exif.GPSInfo.GPSDateStamp"),
    rw("ImageDescription", "Exif.Image.ImageDescription"),
    rw("Make", "Exif.Image.Make"),
    rw("Model", "Exif.Image.Model"),
    rw("SensitivityType", "Exif.Photo.SensitivityType"),
    rw("StandardOutputSensitivity", "Exif.Photo.StandardOutputSensitivity"),
    rw("RecommendedExposureIndex", "Exif.Photo.RecommendedExposureIndex"),
    rw("ApertureValue", "Exif.Photo.ApertureValue"),
    rw("ExposureBiasValue", "Exif.Photo.ExposureBiasValue"),
    rw("MeteringMode", "Exif.Photo.MeteringMode"),
    rw("LightSource", "Exif.Photo.LightSource"),
    rw("Flash", "Exif.Photo.Flash"),
    rw("FocalLength", "Exif.Photo.FocalLength"),
    rw("UserComment", "Exif.Photo.UserComment"),
    rw("PixelXDimension", "Exif.Photo.PixelXDimension"),
    rw("PixelYDimension", "Exif.Photo.PixelYDimension"),
    rw("WhiteBalance", "Exif.Photo.WhiteBalance"),
    rw("FocalLengthIn35mmFilm", "Exif.Photo.FocalLengthIn35mmFilm"),
    rw("Compression", "Exif.Image.Compression"),
    rw("PhotometricInterpretation", "Exif.Image.PhotometricInterpretation"),
    rw("StripOffsets", "Exif.Image.StripOffsets"),
    rw("SamplesPerPixel", "Exif.Image.SamplesPerPixel"),
    rw("RowsPerStrip", "Exif.Image.RowsPerStrip"),
    rw("StripByteCounts", "Exif.Image.StripByteCounts"),
    rw("XResolution", "Exif.Image.XResolution"),
    rw("YResolution", "Exif.Image.YResolution"),
    rw("PlanarConfiguration", "Exif.Image.PlanarConfiguration"),
    rw("ResolutionUnit", "Exif.Image.ResolutionUnit"),
    rw("TransferFunction", "Exif.Image.TransferFunction"),
    rw("Software", "Exif.Image.Software"),
    rw("Artist", "Exif.Image.Artist"),
    rw("WhitePoint", "Exif.Image.WhitePoint"),
    rw("PrimaryChromaticities", "Exif.Image.PrimaryChromaticities"),
    rw("ReferenceBlackWhite", "Exif.Image.ReferenceBlackWhite"),
    rw("Copyright", "Exif.Image.Copyright"),
    rw("JPEGInterchangeFormat", "Exif.Image.JPEGInterchangeFormat"),
    rw("JPEGInterchangeFormatLength", "Exif.Image.JPEGInterchangeFormatLength"),
    rw("ExposureProgram", "Exif.Photo.ExposureProgram"),
    rw("SpectralSensitivity", "Exif.Image.SpectralSensitivity"),
    rw("OECF", "Exif.Image.OECF"),
    rw("ExifVersion", "Exif.Photo.ExifVersion"),
    rw("DateTimeDigitized", "Exif.Photo.DateTimeDigitized"),
    rw("ComponentsConfiguration", "Exif.Photo.ComponentsConfiguration"),
    rw("ShutterSpeedValue", "Exif.Photo.ShutterSpeedValue"),
    rw("BrightnessValue", "Exif.Photo.BrightnessValue"),
    rw("MaxApertureValue", "Exif.Image.MaxApertureValue"),
    rw("SubjectDistance", "Exif.Image.SubjectDistance"),
    rw("SubjectArea", "Exif.Photo.SubjectArea"),
    rw("MakerNote", "Exif.Photo.MakerNote"),
    rw("SubsecTime", "Exif.Photo.SubSecTime"),
    rw("SubSecTimeOriginal", "Exif.Photo.SubSecTimeOriginal"),
    rw("SubSecTimeDigitized", "Exif.Photo.SubSecTimeDigitized"),
    rw("FlashpixVersion", "Exif.Photo.FlashpixVersion"),
    rw("ColorSpace", "Exif.Photo.ColorSpace"),
    rw("RelatedSoundFile", "Exif.Photo.RelatedSoundFile"),
    rw("FlashEnergy", "Exif.Photo.FlashEnergy"),
    rw("SpatialFrequencyResponse", "Exif.Photo.SpatialFrequencyResponse"),
    rw("FocalPlaneXResolution", "Exif.Photo.FocalPlaneXResolution"),
    rw("FocalPlaneYResolution", "Exif.Photo.FocalPlaneYResolution"),
    rw("FocalPlaneResolutionUnit", "Exif.Photo.FocalPlaneResolutionUnit"),
    rw("SubjectLocation", "Exif.Photo.SubjectLocation"),
    rw("ExposureIndex", "Exif.Photo.ExposureIndex"),
    rw("SensingMethod", "Exif.Photo.SensingMethod"),
    rw("FileSource", "Exif.Photo.FileSource"),
    rw("CFAPattern", "Exif.Photo.CFAPattern"),
    rw("CustomRendered", "Exif.Photo.CustomRendered"),
    rw("ExposureMode", "Exif.Photo.ExposureMode"),
    rw("DigitalZoomRatio", "Exif.Photo.DigitalZoomRatio"),
    rw("SceneCaptureType", "Exif.Photo.SceneCaptureType"),
    rw("GainControl", "Exif.Photo.GainControl"),
    rw("Contrast", "Exif.Photo.Contrast"),
    rw("Saturation", "Exif.Photo.Saturation"),
    rw("Sharpness", "Exif.Photo.Sharpness"),
    rw("DeviceSettingDescription", "Exif.Photo.DeviceSettingDescription"),
    rw("SubjectDistanceRange", "Exif.Photo.SubjectDistanceRange"),
    rw("ImageUniqueID", "Exif.Photo.ImageUniqueID"),
    rw("GPSVersionID", "Exif.GPSInfo.GPSVersionID"),
    rw("GPSAltitudeRef", "Exif.GPSInfo.GPSAltitudeRef"),
    rw("GPSAltitude", "Exif.GPSInfo.GPSAltitude"),
    rw("GPSSatellites", "Exif.GPSInfo.GPSSatellites"),
    rw("GPSStatus", "Exif.GPSInfo.GPSStatus"),
    rw("GPSMeasureMode", "Exif.GPSInfo.GPSMeasureMode"),
    rw("GPSDOP", "Exif.GPSInfo.GPSDOP"),
    rw("GPSSpeedRef", "Exif.GPSInfo.GPSSpeedRef"),
    rw("GPSSpeed", "Exif.GPSInfo.GPSSpeed"),
    rw("GPSTrackRef", "Exif.GPSInfo.GPSTrackRef"),
    rw("GPSTrack", "Exif.GPSInfo.GPSTrack"),
    rw("GPSImgDirectionRef", "Exif.GPSInfo.GPSImgDirectionRef"),
    rw("GPSImgDirection", "Exif.GPSInfo.GPSImgDirection"),
    rw("GPSMapDatum", "Exif.GPSInfo.GPSMapDatum"),
    rw("GPSDestLatitudeRef", "Exif.GPSInfo.GPSDestLatitudeRef"),
    rw("GPSDestLatitude", "Exif.GPSInfo.GPSDestLatitude"),
    rw("GPSDestLongitudeRef", "Exif.GPSInfo.GPSDestLongitudeRef"),
    rw("GPSDestLongitude", "Exif.GPSInfo.GPSDestLongitude"),
    rw("GPSDestBearingRef", "Exif.GPSInfo.GPSDestBearingRef"),
    rw("GPSDestBearing", "Exif.GPSInfo.GPSDestBearing"),
    rw("GPSDestDistanceRef", "Exif.GPSInfo.GPSDestDistanceRef"),
    rw("GPSDestDistance", "Exif.GPSInfo.GPSDestDistance"),
    rw("GPSProcessingMethod", "Exif.GPSInfo.GPSProcessingMethod"),
    rw("GPSAreaInformation", "Exif.GPSInfo.GPSAreaInformation"),
    rw("GPSDifferential", "Exif.GPSInfo.GPSDifferential"),
    rw("YCbCrCoefficients", "Exif.Image.YCbCrCoefficients"),
    rw("YCbCrSubSampling", "Exif.Image.YCbCrSubSampling"),
    rw("YCbCrPositioning", "Exif.Image.YCbCrPositioning"),
    rw("CompressedBitsPerPixel", "Exif.Photo.CompressedBitsPerPixel"),
    rw("JPEGProc", "Exif.Image.JPEGProc"),
    rw("BodySerialNumber", "Exif.Photo.BodySerialNumber"),
    rw("CameraOwnerName", "Exif.Photo.CameraOwnerName"),
    rw("CompositeImage", "Exif.Photo.CompositeImage"),
    rw("DNGVersion", "Exif.Image.DNGVersion"),
    rw("DefaultCropSize", "Exif.Image.DefaultCropSize"),
    rw("Gamma", "Exif.Photo.Gamma"),
    rw("ISOSpeedLatitudeyyy", "Exif.Photo.ISOSpeedLatitudeyyy"),
    rw("ISOSpeedLatitudezzz", "Exif.Photo.ISOSpeedLatitudezzz"),
    rw("LensMake", "Exif.Photo.LensMake"),
    rw("LensModel", "Exif.Photo.LensModel"),
    rw("LensSerialNumber", "Exif.Photo.LensSerialNumber"),
    rw("LensSpecification", "Exif.Photo.LensSpecification"),
    rw("NewSubfileType", "Exif.Image.NewSubfileType"),
    rw("OffsetTime", "Exif.Photo.OffsetTime"),
    rw("OffsetTimeDigitized", "Exif.Photo.OffsetTimeDigitized"),
    rw("OffsetTimeOriginal", "Exif.Photo.OffsetTimeOriginal"),
    rw(
        "SourceExposureTimesOfCompositeImage",
        "Exif.Photo.SourceExposureTimesOfCompositeImage",
    ),
    rw(
        "SourceImageNumberOfCompositeImage",
        "Exif.Photo.SourceImageNumberOfCompositeImage",
    ),
    rw("SubfileType", "Exif.Image.SubfileType"),
    rw("GPSHPositioningError", "Exif.GPSInfo.GPSHPositioningError"),
    // Huawei maker notes, all read-only except the capture mode
    rw("HwMnoteCaptureMode", "Exif.Huawei.CaptureMode"),
    ro("HwMnotePhysicalAperture", "Exif.Huawei.PhysicalAperture"),
    ro("HwMnoteRollAngle", "Exif.Huawei.RollAngle"),
    ro("HwMnotePitchAngle", "Exif.Huawei.PitchAngle"),
    ro("HwMnoteSceneFoodConf", "Exif.HuaweiSi.FoodConf"),
    ro("HwMnoteSceneStageConf", "Exif.HuaweiSi.StageConf"),
    ro("HwMnoteSceneBlueSkyConf", "Exif.HuaweiSi.BlueSkyConf"),
    ro("HwMnoteSceneGreenPlantConf", "Exif.HuaweiSi.GreenPlantConf"),
    ro("HwMnoteSceneBeachConf", "Exif.HuaweiSi.BeachConf"),
    ro("HwMnoteSceneSnowConf", "Exif.HuaweiSi.SnowConf"),
    ro("HwMnoteSceneSunsetConf", "Exif.HuaweiSi.SunsetConf"),
    ro("HwMnoteSceneFlowersConf", "Exif.HuaweiSi.FlowersConf"),
    ro("HwMnoteSceneNightConf", "Exif.HuaweiSi.NightConf"),
    ro("HwMnoteSceneTextConf", "Exif.HuaweiSi.TextConf"),
    ro("HwMnoteFaceCount", "Exif.Huawei.FaceCount"),
    ro("HwMnoteFocusMode", "Exif.Huawei.FocusMode"),
    ro("HwMnoteFrontCamera", "Exif.Huawei.FrontCamera"),
    ro("HwMnoteSceneVersion", "Exif.Huawei.SceneVersion"),
    ro("HwMnoteScenePointer", "Exif.Huawei.ScenePointer"),
    ro("HwMnoteFacePointer", "Exif.Huawei.FacePointer"),
    ro("HwMnoteBurstNumber", "Exif.Huawei.BurstNumber"),
    ro("HwMnoteFaceVersion", "Exif.HuaweiFi.FaceVersion"),
    ro("HwMnoteFaceConf", "Exif.HuaweiFi.FaceConf"),
    ro("HwMnoteFaceSmileScore", "Exif.HuaweiFi.FaceSmileScore"),
    ro("HwMnoteFaceRect", "Exif.HuaweiFi.FaceRect"),
    ro("HwMnoteFaceLeyeCenter", "Exif.HuaweiFi.FaceLeyeCenter"),
    ro("HwMnoteFaceReyeCenter", "Exif.HuaweiFi.FaceReyeCenter"),
    ro("HwMnoteFaceMouthCenter", "Exif.HuaweiFi.FaceMouthCenter"),
];

static BY_NAME: LazyLock<HashMap<&'static str, &'static Property>> =
    LazyLock::new(|| PROPERTIES.iter().map(|p| (p.name, p)).collect());

static BY_TAG: LazyLock<HashMap<&'static str, &'static Property>> =
    LazyLock::new(|| PROPERTIES.iter().map(|p| (p.tag, p)).collect());

/// How property names are matched against the registry.
#[cfg_attr(feature = "json_dump", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NameLookup {
    /// `FNumber` only.
    #[default]
    Exact,

    /// `FNumber`, `fnumber`, `FNUMBER`, ... (ASCII case folding).
    CaseInsensitive,
}

/// Read-only view of the property registry.
///
/// The table itself is a process-wide constant; a `TagRegistry` only
/// carries the [`NameLookup`] mode, so it's cheap to copy around.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TagRegistry {
    lookup: NameLookup,
}

impl TagRegistry {
    pub const fn new(lookup: NameLookup) -> Self {
        Self { lookup }
    }

    pub const fn lookup(&self) -> NameLookup {
        self.lookup
    }

    pub fn property(&self, name: &str) -> Option<&'static Property> {
        match self.lookup {
            NameLookup::Exact => BY_NAME.get(name).copied(),
            NameLookup::CaseInsensitive => {
                PROPERTIES.iter().find(|p| p.name.eq_ignore_ascii_case(name))
            }
        }
    }

    /// Reverse lookup by canonical tag. Tags are always matched exactly.
    pub fn property_by_tag(&self, tag: &str) -> Option<&'static Property> {
        BY_TAG.get(tag).copied()
    }

    /// All properties, in registry order.
    pub fn properties(&self) -> impl Iterator<Item = &'static Property> {
        PROPERTIES.iter()
    }

    pub fn is_key_supported(&self, name: &str) -> bool {
        self.property(name).is_some()
    }

    /// Returns true if the property exists and is [`Permission::ReadWrite`].
    pub fn is_modify_allowed(&self, name: &str) -> bool {
        self.property(name)
            .is_some_and(|p| p.permission.is_writable())
    }

    pub fn canonical_tag(&self, name: &str) -> Option<&'static str> {
        self.property(name).map(|p| p.tag)
    }
}
