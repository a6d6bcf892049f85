//! Book-path algebra.
//!
//! A *book path* is a forward-slash path identifying an entry inside the
//! virtual package tree of an ebook, e.g. `OEBPS/Text/chapter1.xhtml`. Book
//! paths never start with `/`; the empty string denotes the package root.
//!
//! Everything here is a pure function over strings. Nothing touches the
//! filesystem, and segment comparison is exact (case-sensitive, no Unicode
//! normalization).
//!
//! ```
//! use bookpath::path::{build_book_path, build_relative_path};
//!
//! assert_eq!(
//!     build_relative_path("OEBPS/Text/book1/chapter1.xhtml", "OEBPS/Text/book2/chapter1.xhtml"),
//!     "../book2/chapter1.xhtml"
//! );
//! assert_eq!(
//!     build_book_path("../Images/cover.jpg", "OEBPS/Text").unwrap(),
//!     "OEBPS/Images/cover.jpg"
//! );
//! ```

use crate::error::{Error, Result};
use crate::iri::{quote_url, unquote_url};

// ============================================================================
// Segment Utilities
// ============================================================================

/// Split a path into segments after stripping trailing slashes.
///
/// An empty path yields no segments rather than a single empty one.
fn segments(path: &str) -> Vec<&str> {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        Vec::new()
    } else {
        trimmed.split('/').collect()
    }
}

/// Directory containing a file book path.
///
/// Drops the last `/`-delimited segment. A path without `/` lives in the
/// package root, so the result is `""`.
///
/// # Examples
///
/// ```
/// use bookpath::path::starting_dir;
///
/// assert_eq!(starting_dir("OEBPS/Text/chapter1.xhtml"), "OEBPS/Text");
/// assert_eq!(starting_dir("content.opf"), "");
/// ```
pub fn starting_dir(path: &str) -> String {
    match path.rfind('/') {
        Some(pos) => path[..pos].to_string(),
        None => String::new(),
    }
}

/// Final segment of a book path (the short file name).
pub fn file_name(path: &str) -> &str {
    match path.rfind('/') {
        Some(pos) => &path[pos + 1..],
        None => path,
    }
}

// ============================================================================
// Segment Resolver
// ============================================================================

/// Collapse `.` and `..` segments into a canonical book path.
///
/// `.` segments are dropped and `..` removes the previously kept segment.
/// A `..` with nothing left to remove would climb above the package root;
/// that is reported as [`Error::PathEscapesRoot`].
///
/// # Examples
///
/// ```
/// use bookpath::path::resolve_segments;
///
/// assert_eq!(resolve_segments("a/b/../../end.txt").unwrap(), "end.txt");
/// assert!(resolve_segments("../end.txt").is_err());
/// ```
pub fn resolve_segments(path: &str) -> Result<String> {
    let mut stack: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "." => {}
            ".." => {
                if stack.pop().is_none() {
                    tracing::debug!("cannot resolve {path:?}: `..` above package root");
                    return Err(Error::PathEscapesRoot {
                        path: path.to_string(),
                    });
                }
            }
            other => stack.push(other),
        }
    }

    Ok(stack.join("/"))
}

// ============================================================================
// Relative Path Builder
// ============================================================================

/// Relative reference from directory `start_dir` to book path `target`.
///
/// Trailing slashes on either side are ignored. The common leading segments
/// are dropped; each remaining segment of `start_dir` becomes `..`, followed
/// by the remaining segments of `target`. The common prefix ends at the first
/// mismatch, so equal segments further along are never shared.
///
/// An empty result means `target` is `start_dir` itself.
pub fn relative_path(target: &str, start_dir: &str) -> String {
    let target_segs = segments(target);
    let start_segs = segments(start_dir);

    let common = target_segs
        .iter()
        .zip(&start_segs)
        .take_while(|(t, s)| t == s)
        .count();

    let climb = std::iter::repeat_n("..", start_segs.len() - common);
    let descend = target_segs[common..].iter().copied();

    climb.chain(descend).collect::<Vec<_>>().join("/")
}

/// Relative href from one file to another, as a link inside `from_file`
/// pointing at `to_file` would be written.
///
/// Links resolve against the directory containing the document, so the
/// result is relative to `starting_dir(from_file)`. A file linking to itself
/// gets the empty string.
///
/// # Examples
///
/// ```
/// use bookpath::path::build_relative_path;
///
/// assert_eq!(
///     build_relative_path("OEBPS/package.opf", "OEBPS/Text/book1/chapter1.xhtml"),
///     "Text/book1/chapter1.xhtml"
/// );
/// assert_eq!(build_relative_path("hello.txt", "hello.txt"), "");
/// ```
pub fn build_relative_path(from_file: &str, to_file: &str) -> String {
    if from_file == to_file {
        return String::new();
    }
    relative_path(to_file, &starting_dir(from_file))
}

// ============================================================================
// Common Ancestor Finder
// ============================================================================

/// Longest directory shared by every path in `paths`.
///
/// A non-empty result always ends with `/`. When the paths share nothing the
/// result is exactly `""`. A single path yields its own directory plus `/`.
///
/// The caller's slice is left in its original order.
///
/// # Examples
///
/// ```
/// use bookpath::path::longest_common_path;
///
/// let paths = [
///     "OEBPS/book1/text/chapter1.xhtml",
///     "OEBPS/book1/html/chapter2.xhtml",
///     "OEBPS/book2/text/chapter3.xhtml",
/// ];
/// assert_eq!(longest_common_path(&paths), "OEBPS/");
/// ```
pub fn longest_common_path<S: AsRef<str>>(paths: &[S]) -> String {
    match paths {
        [] => String::new(),
        [only] => format!("{}/", starting_dir(only.as_ref())),
        _ => {
            let mut sorted: Vec<&str> = paths.iter().map(|p| p.as_ref()).collect();
            sorted.sort_unstable();

            // After sorting, the prefix shared by the extremes is shared by all.
            let first = sorted[0].split('/');
            let last = sorted[sorted.len() - 1].split('/');
            let shared: Vec<&str> = first
                .zip(last)
                .take_while(|(a, b)| a == b)
                .map(|(a, _)| a)
                .collect();

            if shared.is_empty() {
                String::new()
            } else {
                format!("{}/", shared.join("/"))
            }
        }
    }
}

// ============================================================================
// Path Join / Rebase
// ============================================================================

/// Rebase a relative reference onto `start_dir` and resolve it.
///
/// If `start_dir` is empty or whitespace the reference is already a book
/// path and comes back untouched, unresolved. Otherwise the two are joined
/// and passed through [`resolve_segments`].
///
/// # Examples
///
/// ```
/// use bookpath::path::build_book_path;
///
/// assert_eq!(build_book_path("image.png", "").unwrap(), "image.png");
/// assert_eq!(
///     build_book_path("../../Images/image.png", "OEBPS/Text/book1/").unwrap(),
///     "OEBPS/Images/image.png"
/// );
/// ```
pub fn build_book_path(rel_ref: &str, start_dir: &str) -> Result<String> {
    if start_dir.trim().is_empty() {
        return Ok(rel_ref.to_string());
    }
    let joined = format!("{}/{}", start_dir.trim_end_matches('/'), rel_ref);
    resolve_segments(&joined)
}

// ============================================================================
// Href Helpers
// ============================================================================

/// Split an href at the first `#` into path and fragment.
pub fn split_fragment(href: &str) -> (&str, Option<&str>) {
    match href.split_once('#') {
        Some((path, fragment)) => (path, Some(fragment)),
        None => (href, None),
    }
}

/// Whether an href carries a URI scheme (`http:`, `mailto:`, `data:`, ...).
///
/// Such hrefs point outside the package and have no book path.
pub fn is_external(href: &str) -> bool {
    let Some((scheme, _)) = href.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        _ => false,
    }
}

/// Resolve an href found inside `from_file` to the book path it targets.
///
/// Returns `Ok(None)` for external links. Fragment-only links point back
/// into `from_file`. The path part is percent-decoded before it is rebased
/// onto the directory of `from_file`; any fragment is kept as written.
///
/// # Examples
///
/// ```
/// use bookpath::path::resolve_href;
///
/// assert_eq!(
///     resolve_href("OEBPS/Text/ch1.xhtml", "../Images/my%20cover.jpg").unwrap(),
///     Some("OEBPS/Images/my cover.jpg".to_string())
/// );
/// assert_eq!(resolve_href("OEBPS/Text/ch1.xhtml", "https://example.com").unwrap(), None);
/// ```
pub fn resolve_href(from_file: &str, href: &str) -> Result<Option<String>> {
    let href = href.trim();
    if is_external(href) {
        tracing::debug!("skipping external href {href:?}");
        return Ok(None);
    }

    let (path, fragment) = split_fragment(href);
    let target = if path.is_empty() {
        from_file.to_string()
    } else {
        let path = unquote_url(path);
        let start_dir = starting_dir(from_file);
        if start_dir.is_empty() {
            resolve_segments(&path)?
        } else {
            build_book_path(&path, &start_dir)?
        }
    };

    Ok(Some(match fragment {
        Some(fragment) => format!("{target}#{fragment}"),
        None => target,
    }))
}

/// Quoted href to write inside `from_file` so that it links to `to_file`.
///
/// Inverse of [`resolve_href`]: the relative path is percent-encoded and the
/// fragment, when given, is appended after `#`.
pub fn href_between(from_file: &str, to_file: &str, fragment: Option<&str>) -> String {
    let mut href = quote_url(&build_relative_path(from_file, to_file));
    if let Some(fragment) = fragment {
        href.push('#');
        href.push_str(fragment);
    }
    href
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_segments_strips_trailing_slash() {
        assert_eq!(segments("OEBPS/Text/"), vec!["OEBPS", "Text"]);
        assert_eq!(segments("OEBPS//"), vec!["OEBPS"]);
        assert!(segments("").is_empty());
        assert!(segments("/").is_empty());
    }

    #[test]
    fn test_starting_dir() {
        assert_eq!(starting_dir("OEBPS/Text/chapter1.xhtml"), "OEBPS/Text");
        assert_eq!(starting_dir("content.opf"), "");
        assert_eq!(starting_dir(""), "");
        // Caller is expected to strip trailing slashes first
        assert_eq!(starting_dir("OEBPS/Text/"), "OEBPS/Text");
    }

    #[test]
    fn test_file_name() {
        assert_eq!(file_name("OEBPS/Text/chapter1.xhtml"), "chapter1.xhtml");
        assert_eq!(file_name("content.opf"), "content.opf");
        assert_eq!(file_name("OEBPS/"), "");
    }

    #[test]
    fn test_resolve_segments() {
        assert_eq!(resolve_segments("a/b/../../end.txt").unwrap(), "end.txt");
        assert_eq!(resolve_segments("This/is/the/../../end.txt").unwrap(), "This/end.txt");
        assert_eq!(resolve_segments("./OEBPS/./Text/c.xhtml").unwrap(), "OEBPS/Text/c.xhtml");
        assert_eq!(resolve_segments("OEBPS/..").unwrap(), "");
        assert_eq!(resolve_segments("").unwrap(), "");
    }

    #[test]
    fn test_resolve_segments_escaping_root() {
        assert_eq!(
            resolve_segments("../end.txt"),
            Err(Error::PathEscapesRoot {
                path: "../end.txt".to_string()
            })
        );
        assert!(resolve_segments("a/../../b").is_err());
    }

    #[test]
    fn test_resolve_segments_leaves_backslashes_alone() {
        assert_eq!(resolve_segments("a\\b/c").unwrap(), "a\\b/c");
    }

    #[test]
    fn test_relative_path() {
        assert_eq!(relative_path("OEBPS/Images/a.png", "OEBPS/Text"), "../Images/a.png");
        assert_eq!(relative_path("OEBPS/Text", "OEBPS/Text/"), "");
        assert_eq!(relative_path("a.xhtml", ""), "a.xhtml");
        assert_eq!(relative_path("", "OEBPS/Text"), "../..");
    }

    #[test]
    fn test_relative_path_stops_at_first_mismatch() {
        // "c" matches at index 2 but follows a mismatch, so it is not shared
        assert_eq!(relative_path("a/x/c/f.txt", "a/y/c"), "../../x/c/f.txt");
    }

    #[test]
    fn test_relative_path_is_case_sensitive() {
        assert_eq!(relative_path("oebps/a.xhtml", "OEBPS"), "../oebps/a.xhtml");
    }

    #[test]
    fn test_build_relative_path() {
        assert_eq!(build_relative_path("hello.txt", "goodbye.txt"), "goodbye.txt");
        assert_eq!(
            build_relative_path(
                "OEBPS/Text/book1/chapter1.xhtml",
                "OEBPS/Text/book2/chapter1.xhtml"
            ),
            "../book2/chapter1.xhtml"
        );
        assert_eq!(
            build_relative_path("OEBPS/package.opf", "OEBPS/Text/book1/chapter1.xhtml"),
            "Text/book1/chapter1.xhtml"
        );
        assert_eq!(build_relative_path("OEBPS/Text/c.xhtml", "OEBPS/Text/c.xhtml"), "");
    }

    #[test]
    fn test_longest_common_path() {
        let paths = vec![
            "OEBPS/book1/text/chapter1.xhtml".to_string(),
            "OEBPS/book1/html/chapter2.xhtml".to_string(),
            "OEBPS/book2/text/chapter3.xhtml".to_string(),
        ];
        assert_eq!(longest_common_path(paths.as_slice()), "OEBPS/");
    }

    #[test]
    fn test_longest_common_path_edge_cases() {
        let none: [&str; 0] = [];
        assert_eq!(longest_common_path(&none), "");
        assert_eq!(longest_common_path(&["OEBPS/Text/c.xhtml"]), "OEBPS/Text/");
        assert_eq!(longest_common_path(&["content.opf"]), "/");
        assert_eq!(longest_common_path(&["OEBPS/a.xhtml", "EPUB/b.xhtml"]), "");
        assert_eq!(
            longest_common_path(&["OEBPS/Text/a.xhtml", "OEBPS/Text/b.xhtml"]),
            "OEBPS/Text/"
        );
    }

    #[test]
    fn test_longest_common_path_keeps_caller_order() {
        let paths = ["z/b.xhtml", "z/a.xhtml", "y/c.xhtml"];
        let before = paths;
        let _ = longest_common_path(&paths);
        assert_eq!(paths, before);
    }

    #[test]
    fn test_build_book_path() {
        assert_eq!(
            build_book_path("../../Images/image.png", "OEBPS/Text/book1/").unwrap(),
            "OEBPS/Images/image.png"
        );
        assert_eq!(build_book_path("image.png", "").unwrap(), "image.png");
        assert_eq!(build_book_path("c.xhtml", "OEBPS/Text").unwrap(), "OEBPS/Text/c.xhtml");
    }

    #[test]
    fn test_build_book_path_blank_start_dir_skips_resolution() {
        assert_eq!(build_book_path("../x/./y.png", "").unwrap(), "../x/./y.png");
        assert_eq!(build_book_path("../x/./y.png", "   ").unwrap(), "../x/./y.png");
    }

    #[test]
    fn test_build_book_path_escaping_root() {
        assert!(matches!(
            build_book_path("../../../x.png", "OEBPS/Text"),
            Err(Error::PathEscapesRoot { .. })
        ));
    }

    #[test]
    fn test_split_fragment() {
        assert_eq!(split_fragment("ch1.xhtml#note-1"), ("ch1.xhtml", Some("note-1")));
        assert_eq!(split_fragment("#top"), ("", Some("top")));
        assert_eq!(split_fragment("ch1.xhtml"), ("ch1.xhtml", None));
    }

    #[test]
    fn test_is_external() {
        assert!(is_external("https://example.com"));
        assert!(is_external("mailto:user@example.com"));
        assert!(is_external("data:image/png;base64,AAAA"));
        assert!(!is_external("../Text/ch1.xhtml"));
        assert!(!is_external("#note"));
        assert!(!is_external("1:2.xhtml"));
    }

    #[test]
    fn test_resolve_href() {
        let from = "OEBPS/Text/ch1.xhtml";
        assert_eq!(
            resolve_href(from, "ch2.xhtml#s5").unwrap(),
            Some("OEBPS/Text/ch2.xhtml#s5".to_string())
        );
        assert_eq!(
            resolve_href(from, "#note-1").unwrap(),
            Some("OEBPS/Text/ch1.xhtml#note-1".to_string())
        );
        assert_eq!(
            resolve_href(from, "../Images/a%20b.png").unwrap(),
            Some("OEBPS/Images/a b.png".to_string())
        );
        assert_eq!(resolve_href(from, "mailto:x@example.com").unwrap(), None);
    }

    #[test]
    fn test_resolve_href_with_invalid_escape() {
        assert_eq!(
            resolve_href("OEBPS/Text/a.xhtml", "b%FF.xhtml").unwrap(),
            Some("OEBPS/Text/b\u{FFFD}.xhtml".to_string())
        );
    }

    #[test]
    fn test_longest_common_path_file_prefix_of_dir() {
        // `-` sorts before `/`, so the extremes are "x/y" and "x/y/z"
        assert_eq!(longest_common_path(&["x/y", "x/y-", "x/y/z"]), "x/y/");
    }

    #[test]
    fn test_resolve_href_from_root_document() {
        assert_eq!(
            resolve_href("content.opf", "./Text/ch1.xhtml").unwrap(),
            Some("Text/ch1.xhtml".to_string())
        );
        assert!(resolve_href("content.opf", "../ch1.xhtml").is_err());
    }

    #[test]
    fn test_href_between() {
        assert_eq!(
            href_between("OEBPS/Text/ch1.xhtml", "OEBPS/Images/my cover.jpg", None),
            "../Images/my%20cover.jpg"
        );
        assert_eq!(
            href_between("OEBPS/Text/ch1.xhtml", "OEBPS/Text/ch2.xhtml", Some("s1")),
            "ch2.xhtml#s1"
        );
    }

    fn segment() -> impl Strategy<Value = String> {
        "[A-Za-z0-9_]{1,6}"
    }

    fn book_path(max: usize) -> impl Strategy<Value = String> {
        prop::collection::vec(segment(), 1..max).prop_map(|segs| segs.join("/"))
    }

    proptest! {
        #[test]
        fn prop_resolve_segments_is_idempotent(path in book_path(6)) {
            let once = resolve_segments(&path).unwrap();
            prop_assert_eq!(&once, &path);
            prop_assert_eq!(resolve_segments(&once).unwrap(), once);
        }

        #[test]
        fn prop_build_relative_path_to_self_is_empty(path in book_path(6)) {
            prop_assert_eq!(build_relative_path(&path, &path), "");
        }

        #[test]
        fn prop_join_then_relativize_round_trips(
            rel in prop::collection::vec(
                prop_oneof![3 => segment(), 1 => Just(".".to_string())],
                1..5
            ).prop_map(|segs| segs.join("/")),
            dir in book_path(5),
        ) {
            let joined = build_book_path(&rel, &dir).unwrap();
            prop_assert_eq!(relative_path(&joined, &dir), resolve_segments(&rel).unwrap());
        }

        #[test]
        fn prop_relative_path_resolves_back(target in book_path(5), dir in book_path(5)) {
            prop_assume!(target != dir);
            let rel = relative_path(&target, &dir);
            prop_assert_eq!(build_book_path(&rel, &dir).unwrap(), target);
        }

        #[test]
        fn prop_longest_common_path_is_prefix_of_all(
            paths in prop::collection::vec(book_path(5), 2..6)
        ) {
            let common = longest_common_path(paths.as_slice());
            for path in &paths {
                let with_slash = format!("{path}/");
                prop_assert!(with_slash.starts_with(&common));
            }
        }
    }
}
