//! Media-type tables for package resources.
//!
//! Two static maps: file extension to media type (the preferred EPUB 3 core
//! media types, used when adding a file to a package) and media type to the
//! [`ResourceGroup`] a resource is filed under.

use std::fmt;

use phf::{Map, phf_map};

use crate::path::file_name;

/// Coarse grouping of package resources by media type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub enum ResourceGroup {
    Images,
    Text,
    Fonts,
    Audio,
    Video,
    Styles,
    #[cfg_attr(feature = "cli", serde(rename = "ncx"))]
    Ncx,
    #[cfg_attr(feature = "cli", serde(rename = "opf"))]
    Opf,
    Misc,
}

impl ResourceGroup {
    /// Label used for the group in package tooling.
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceGroup::Images => "Images",
            ResourceGroup::Text => "Text",
            ResourceGroup::Fonts => "Fonts",
            ResourceGroup::Audio => "Audio",
            ResourceGroup::Video => "Video",
            ResourceGroup::Styles => "Styles",
            ResourceGroup::Ncx => "ncx",
            ResourceGroup::Opf => "opf",
            ResourceGroup::Misc => "Misc",
        }
    }
}

impl fmt::Display for ResourceGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lowercase extension (with leading dot) to media type.
pub static EXTENSION_MEDIA_TYPES: Map<&'static str, &'static str> = phf_map! {
    ".bm" => "image/bmp",
    ".bmp" => "image/bmp",
    ".css" => "text/css",
    ".epub" => "application/epub+zip",
    ".gif" => "image/gif",
    ".htm" => "application/xhtml+xml",
    ".html" => "application/xhtml+xml",
    ".jpeg" => "image/jpeg",
    ".jpg" => "image/jpeg",
    ".js" => "application/javascript",
    ".m4a" => "audio/mp4",
    ".m4v" => "video/mp4",
    ".mp3" => "audio/mpeg",
    ".mp4" => "video/mp4",
    ".ncx" => "application/x-dtbncx+xml",
    ".oga" => "audio/ogg",
    ".ogg" => "audio/ogg",
    ".ogv" => "video/ogg",
    ".opf" => "application/oebps-package+xml",
    ".otf" => "font/otf",
    ".pls" => "application/pls+xml",
    ".png" => "image/png",
    ".smil" => "application/smil+xml",
    ".svg" => "image/svg+xml",
    ".tif" => "image/tiff",
    ".tiff" => "image/tiff",
    ".ttc" => "font/collection",
    ".ttf" => "font/ttf",
    ".ttml" => "application/ttml+xml",
    ".txt" => "text/plain",
    ".vtt" => "text/vtt",
    ".webm" => "video/webm",
    ".webp" => "image/webp",
    ".woff" => "font/woff",
    ".woff2" => "font/woff2",
    ".xhtml" => "application/xhtml+xml",
    ".xml" => "application/oebps-page-map+xml",
    ".xpgt" => "application/vnd.adobe-page-template+xml",
};

/// Media type to resource group, including deprecated font types and the
/// Adobe page-map variants found in older books.
pub static MEDIA_TYPE_GROUPS: Map<&'static str, ResourceGroup> = phf_map! {
    "image/jpeg" => ResourceGroup::Images,
    "image/png" => ResourceGroup::Images,
    "image/gif" => ResourceGroup::Images,
    "image/svg+xml" => ResourceGroup::Images,
    "image/bmp" => ResourceGroup::Images,
    "image/tiff" => ResourceGroup::Images,
    "image/webp" => ResourceGroup::Images,

    "text/html" => ResourceGroup::Text,
    "application/xhtml+xml" => ResourceGroup::Text,
    "application/x-dtbook+xml" => ResourceGroup::Text,

    "font/woff2" => ResourceGroup::Fonts,
    "font/woff" => ResourceGroup::Fonts,
    "font/ttf" => ResourceGroup::Fonts,
    "font/otf" => ResourceGroup::Fonts,
    "font/sfnt" => ResourceGroup::Fonts,
    "font/collection" => ResourceGroup::Fonts,
    "application/vnd.ms-opentype" => ResourceGroup::Fonts,
    // deprecated
    "application/font-sfnt" => ResourceGroup::Fonts,
    "application/font-ttf" => ResourceGroup::Fonts,
    "application/font-otf" => ResourceGroup::Fonts,
    "application/font-woff" => ResourceGroup::Fonts,
    "application/font-woff2" => ResourceGroup::Fonts,
    "application/x-font-ttf" => ResourceGroup::Fonts,
    "application/x-truetype-font" => ResourceGroup::Fonts,
    "application/x-opentype-font" => ResourceGroup::Fonts,
    "application/x-font-otf" => ResourceGroup::Fonts,
    "application/x-font-opentype" => ResourceGroup::Fonts,
    "application/x-font-truetype" => ResourceGroup::Fonts,
    "application/x-font-truetype-collection" => ResourceGroup::Fonts,

    "audio/mpeg" => ResourceGroup::Audio,
    "audio/mp3" => ResourceGroup::Audio,
    "audio/mp4" => ResourceGroup::Audio,
    "audio/ogg" => ResourceGroup::Audio,

    "video/mp4" => ResourceGroup::Video,
    "video/ogg" => ResourceGroup::Video,
    "video/webm" => ResourceGroup::Video,
    "text/vtt" => ResourceGroup::Video,
    "application/ttml+xml" => ResourceGroup::Video,

    "text/css" => ResourceGroup::Styles,

    "application/x-dtbncx+xml" => ResourceGroup::Ncx,
    "application/oebps-package+xml" => ResourceGroup::Opf,

    "application/oebps-page-map+xml" => ResourceGroup::Misc,
    "application/vnd.adobe-page-map+xml" => ResourceGroup::Misc,
    "application/vnd.adobe.page-map+xml" => ResourceGroup::Misc,
    "application/smil+xml" => ResourceGroup::Misc,
    "application/adobe-page-template+xml" => ResourceGroup::Misc,
    "application/vnd.adobe-page-template+xml" => ResourceGroup::Misc,
    "text/javascript" => ResourceGroup::Misc,
    "application/javascript" => ResourceGroup::Misc,
    "application/pls+xml" => ResourceGroup::Misc,
    "text/plain" => ResourceGroup::Misc,
};

/// Media type for an extension such as `".xhtml"`. The key must already be
/// lowercase and include the dot.
pub fn media_type_for_extension(ext: &str) -> Option<&'static str> {
    EXTENSION_MEDIA_TYPES.get(ext).copied()
}

/// Media type for a book path, judged by the extension of its file name.
///
/// The extension is matched case-insensitively (`Cover.JPG` is a JPEG), but
/// nothing else about the path is inspected.
///
/// # Examples
///
/// ```
/// use bookpath::media::media_type_for_path;
///
/// assert_eq!(media_type_for_path("OEBPS/Images/Cover.JPG"), Some("image/jpeg"));
/// assert_eq!(media_type_for_path("OEBPS/Text/README"), None);
/// ```
pub fn media_type_for_path(path: &str) -> Option<&'static str> {
    let name = file_name(path);
    let dot = name.rfind('.')?;
    let ext = name[dot..].to_ascii_lowercase();
    media_type_for_extension(&ext)
}

/// Resource group for a media type. Unknown types return `None`.
pub fn group_for_media_type(media_type: &str) -> Option<ResourceGroup> {
    MEDIA_TYPE_GROUPS.get(media_type).copied()
}
