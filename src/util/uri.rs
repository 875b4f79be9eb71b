//! Resolution of manifest and navigation hrefs into absolute archive paths.
//!
//! Archive paths never start with `/` and always use forward slashes;
//! `/` at the start of an href denotes the root of the container.

use std::borrow::Cow;

/// The directory containing `href`, or an empty string for top-level entries.
pub(crate) fn parent(href: &str) -> &str {
    href.rfind('/').map_or("", |index| &href[..index])
}

pub(crate) fn decode(encoded: &str) -> Cow<'_, str> {
    percent_encoding::percent_decode_str(encoded).decode_utf8_lossy()
}

/// An href is remote when it starts with a scheme followed by an authority (`https://`).
pub(crate) fn is_remote(href: &str) -> bool {
    let Some((scheme, _)) = href.split_once("://") else {
        return false;
    };
    let mut chars = scheme.chars();

    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Splits `path#anchor` into its path and optional anchor.
///
/// An empty anchor (`path#`) is treated as absent.
pub(crate) fn split_anchor(href: &str) -> (&str, Option<&str>) {
    match href.split_once('#') {
        Some((path, anchor)) if !anchor.is_empty() => (path, Some(anchor)),
        Some((path, _)) => (path, None),
        None => (href, None),
    }
}

/// Resolves `href` against `directory`, returning an absolute archive path.
///
/// Remote hrefs are returned untouched. A query or fragment is carried over
/// after the resolved path.
pub(crate) fn combine<'a>(directory: &str, href: &'a str) -> Cow<'a, str> {
    if is_remote(href) {
        return Cow::Borrowed(href);
    }
    let (path, suffix) = href
        .find(['?', '#'])
        .map(|position| (&href[..position], &href[position..]))
        .unwrap_or((href, ""));

    let mut resolved = match path.strip_prefix('/') {
        Some(rooted) => normalize(rooted),
        None if directory.is_empty() => normalize(path),
        None => normalize(&format!("{directory}/{path}")),
    };
    resolved.push_str(suffix);
    Cow::Owned(resolved)
}

/// Removes `.` and empty segments and applies `..` segments.
///
/// `..` at the container root is discarded; nothing can be resolved outside the archive.
pub(crate) fn normalize(path: &str) -> String {
    let mut stack = Vec::new();

    for segment in path.split(['/', '\\']) {
        match segment {
            "" | "." => {}
            ".." => {
                stack.pop();
            }
            _ => stack.push(segment),
        }
    }
    stack.join("/")
}
