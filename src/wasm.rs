//! WASM bindings for browser-based package tooling.
//!
//! This module exposes the book-path functions to JavaScript via wasm-bindgen.

use wasm_bindgen::prelude::*;

use crate::{iri, media, path};

/// Initialize panic hook for better error messages in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "wasm")]
    console_error_panic_hook::set_once();
}

/// Collapse `.` and `..` segments. Throws if the path climbs above the root.
#[wasm_bindgen(js_name = resolveSegments)]
pub fn resolve_segments(path: &str) -> Result<String, JsValue> {
    path::resolve_segments(path).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Relative href from one book path to another.
#[wasm_bindgen(js_name = buildRelativePath)]
pub fn build_relative_path(from_file: &str, to_file: &str) -> String {
    path::build_relative_path(from_file, to_file)
}

/// Rebase a relative reference onto a start directory.
#[wasm_bindgen(js_name = buildBookPath)]
pub fn build_book_path(rel_ref: &str, start_dir: &str) -> Result<String, JsValue> {
    path::build_book_path(rel_ref, start_dir).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Longest directory shared by all given book paths.
#[wasm_bindgen(js_name = longestCommonPath)]
pub fn longest_common_path(paths: Vec<String>) -> String {
    path::longest_common_path(paths.as_slice())
}

#[wasm_bindgen(js_name = quoteUrl)]
pub fn quote_url(href: &str) -> String {
    iri::quote_url(href)
}

#[wasm_bindgen(js_name = unquoteUrl)]
pub fn unquote_url(href: &str) -> String {
    iri::unquote_url(href)
}

/// Media type for a book path by extension, or `undefined`.
#[wasm_bindgen(js_name = mediaTypeForPath)]
pub fn media_type_for_path(path: &str) -> Option<String> {
    media::media_type_for_path(path).map(str::to_string)
}
