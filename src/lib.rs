//! # bookpath
//!
//! Path arithmetic for the inside of an ebook package.
//!
//! EPUB resources are addressed by *book paths*: forward-slash paths relative
//! to the package root such as `OEBPS/Text/chapter1.xhtml`. Links between
//! resources are written relative to the directory of the linking document.
//! This crate converts between the two without touching a filesystem.
//!
//! ## Features
//!
//! - Relative hrefs between book paths, and back again
//! - `.`/`..` resolution that reports attempts to leave the package root
//! - Longest common directory of a set of book paths
//! - IRI quoting and unquoting of hrefs
//! - Extension → media type and media type → resource group tables
//!
//! ## Quick Start
//!
//! ```
//! use bookpath::{build_book_path, build_relative_path, longest_common_path};
//!
//! let href = build_relative_path("OEBPS/Text/ch1.xhtml", "OEBPS/Images/cover.jpg");
//! assert_eq!(href, "../Images/cover.jpg");
//!
//! let target = build_book_path(&href, "OEBPS/Text").unwrap();
//! assert_eq!(target, "OEBPS/Images/cover.jpg");
//!
//! let root = longest_common_path(&["OEBPS/Text/ch1.xhtml", "OEBPS/Images/cover.jpg"]);
//! assert_eq!(root, "OEBPS/");
//! ```
//!
//! ## Media types
//!
//! ```
//! use bookpath::{ResourceGroup, group_for_media_type, media_type_for_path};
//!
//! let media_type = media_type_for_path("OEBPS/Fonts/serif.woff2").unwrap();
//! assert_eq!(group_for_media_type(media_type), Some(ResourceGroup::Fonts));
//! ```

pub mod error;
pub mod iri;
pub mod media;
pub mod path;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::{Error, Result};
pub use iri::{quote_url, unquote_url};
pub use media::{
    EXTENSION_MEDIA_TYPES, MEDIA_TYPE_GROUPS, ResourceGroup, group_for_media_type,
    media_type_for_extension, media_type_for_path,
};
pub use path::{
    build_book_path, build_relative_path, file_name, href_between, is_external,
    longest_common_path, relative_path, resolve_href, resolve_segments, split_fragment,
    starting_dir,
};
