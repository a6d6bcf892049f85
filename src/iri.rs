//! IRI quoting for hrefs written into package documents.
//!
//! Hrefs inside XHTML, OPF and NCX files are IRIs rather than URIs: non-ASCII
//! characters stay as they are and only unsafe ASCII is percent-encoded.

/// ASCII characters that are never escaped.
fn is_url_safe(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '#' | '_' | '.' | '-' | '/' | '~')
}

/// Length of a leading `scheme://` prefix, if the href has one.
fn scheme_prefix_len(href: &str) -> Option<usize> {
    let pos = href.find("://")?;
    let scheme = &href[..pos];
    let mut chars = scheme.chars();
    let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    valid.then_some(pos + 3)
}

/// Percent-encode an href as an IRI.
///
/// A leading `scheme://` is kept verbatim. Every other ASCII character
/// outside `[A-Za-z0-9#_.\-/~]` becomes `%xx` (lowercase hex); non-ASCII
/// characters pass through.
///
/// # Examples
///
/// ```
/// use bookpath::iri::quote_url;
///
/// assert_eq!(quote_url("Text/my chapter.xhtml#top"), "Text/my%20chapter.xhtml#top");
/// assert_eq!(quote_url("http://example.com/a b"), "http://example.com/a%20b");
/// assert_eq!(quote_url("Text/café.xhtml"), "Text/café.xhtml");
/// ```
pub fn quote_url(href: &str) -> String {
    let (prefix, rest) = match scheme_prefix_len(href) {
        Some(len) => href.split_at(len),
        None => ("", href),
    };

    let mut out = String::with_capacity(href.len());
    out.push_str(prefix);
    for c in rest.chars() {
        if c.is_ascii() && !is_url_safe(c) {
            out.push_str(&format!("%{:02x}", c as u8));
        } else {
            out.push(c);
        }
    }
    out
}

/// Decode percent-escapes in an href.
///
/// Escapes that decode to invalid UTF-8 become U+FFFD, so decoding never
/// fails.
pub fn unquote_url(href: &str) -> String {
    percent_encoding::percent_decode_str(href)
        .decode_utf8_lossy()
        .into_owned()
}
