//! The asset type registry.
//!
//! A fixed table mapping numeric type codes to their canonical names, file
//! extension tags, human labels, and capability flags. Code lookups are
//! total: codes outside the table resolve to the [`UNKNOWN_CODE`] sentinel
//! row instead of failing, so readers keep working on containers written
//! with newer type codes.

use crate::error::TypeError;

/// Metadata for one registered asset type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AssetTypeInfo {
    /// Numeric type code, as stored in index records.
    pub code: i32,
    /// Canonical symbolic name.
    pub name: &'static str,
    /// Extension tag used for unpacked file names and import inference.
    pub extension: &'static str,
    /// Human-readable label, where one exists.
    pub human: Option<&'static str>,
    /// Whether assets of this type may be linked.
    pub linkable: bool,
    /// Whether assets of this type may be fetched.
    pub fetchable: bool,
    /// Whether assets of this type may be known.
    pub knowable: bool,
}

/// Code of the `UNKNOWN` sentinel row.
pub const UNKNOWN_CODE: i32 = 255;

/// Code of the `NONE` placeholder row.
pub const NONE_CODE: i32 = -2;

const fn at(
    code: i32,
    name: &'static str,
    extension: &'static str,
    human: Option<&'static str>,
    linkable: bool,
    fetchable: bool,
    knowable: bool,
) -> AssetTypeInfo {
    AssetTypeInfo {
        code,
        name,
        extension,
        human,
        linkable,
        fetchable,
        knowable,
    }
}

const UNKNOWN: AssetTypeInfo = at(UNKNOWN_CODE, "UNKNOWN", "invalid", None, false, false, false);

/// The registry, in registration order.
///
/// Order is observable: extension lookup returns the first match, and the
/// extension mapping is not guaranteed injective. The precedence is a
/// property of the format, kept as-is.
const ASSET_TYPES: &[AssetTypeInfo] = &[
    at(0, "TEXTURE", "texture", Some("texture"), true, false, true),
    at(1, "SOUND", "sound", Some("sound"), true, true, true),
    at(2, "CALLINGCARD", "callcard", Some("calling card"), true, false, false),
    at(3, "LANDMARK", "landmark", Some("landmark"), true, true, true),
    at(4, "SCRIPT", "script", Some("legacy script"), true, false, false),
    at(5, "CLOTHING", "clothing", Some("clothing"), true, true, true),
    at(6, "OBJECT", "object", Some("object"), true, false, false),
    at(7, "NOTECARD", "notecard", Some("note card"), true, false, true),
    at(8, "CATEGORY", "category", Some("folder"), true, false, false),
    at(10, "LSL_TEXT", "lsltext", Some("lsl2 script"), true, false, false),
    at(11, "LSL_BYTECODE", "lslbyte", Some("lsl bytecode"), true, false, false),
    at(12, "TEXTURE_TGA", "txtr_tga", Some("tga texture"), true, false, false),
    at(13, "BODYPART", "bodypart", Some("body part"), true, true, true),
    at(17, "SOUND_WAV", "wav", Some("sound"), true, false, false),
    at(18, "IMAGE_TGA", "tga", Some("targa image"), true, false, false),
    at(19, "IMAGE_JPEG", "jpeg", Some("jpeg image"), true, false, false),
    at(20, "ANIMATION", "animatn", Some("animation"), true, true, true),
    at(21, "GESTURE", "gesture", Some("gesture"), true, true, true),
    at(22, "SIMSTATE", "simstate", Some("simstate"), false, false, false),
    at(24, "LINK", "link", Some("sym link"), false, false, true),
    at(25, "FOLDER_LINK", "link_f", Some("sym folder link"), false, false, true),
    at(49, "MESH", "mesh", Some("mesh"), false, false, false),
    at(40, "WIDGET", "widget", Some("widget"), false, false, false),
    at(45, "PERSON", "person", Some("person"), false, false, false),
    UNKNOWN,
    at(NONE_CODE, "NONE", "-1", None, false, false, false),
];

/// Look up type metadata by code.
///
/// Total: unrecognized codes resolve to the `UNKNOWN` sentinel row.
pub fn describe(code: i32) -> &'static AssetTypeInfo {
    ASSET_TYPES
        .iter()
        .find(|ty| ty.code == code)
        .unwrap_or(&UNKNOWN)
}

/// Reverse lookup by extension tag: the first matching code in table order.
pub fn code_for_extension(ext: &str) -> Option<i32> {
    ASSET_TYPES
        .iter()
        .find(|ty| ty.extension == ext)
        .map(|ty| ty.code)
}

/// Look up a type code by canonical name.
pub fn code_named(name: &str) -> Result<i32, TypeError> {
    ASSET_TYPES
        .iter()
        .find(|ty| ty.name == name)
        .map(|ty| ty.code)
        .ok_or_else(|| TypeError::UnknownAssetType(name.to_string()))
}
