//! Helper functions for diff header parsing.

use regex::Regex;
use std::sync::LazyLock;

/// Path used by unified diffs for the missing side of an added or deleted file.
pub const DEV_NULL: &str = "/dev/null";

/// Extension reported for the `/dev/null` side of a file pair.
///
/// No dialect is ever registered for it, so the missing side of an added or
/// deleted file contributes no call sites.
pub const DEV_NULL_EXTENSION: &str = "<dev/null>";

/// Region header: `@@ -<start>[,<len>] +<start>[,<len>] @@[ section]`.
static HUNK_HEADER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^@@ -(\d+)(?:,(\d+))? \+(\d+)(?:,(\d+))? @@(.*)$")
        .expect("Invalid hunk header regex")
});

/// Parsed `@@ ... @@` region header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HunkHeader {
    pub old_start: u32,
    pub old_len: u32,
    pub new_start: u32,
    pub new_len: u32,
    /// Trailing text after the closing `@@`, usually the enclosing function.
    pub section: String,
}

/// Parse a region header line.
///
/// A missing `,<len>` means a length of one, as git writes it. Returns `None`
/// for anything that does not match the grammar.
pub(crate) fn parse_hunk_header(line: &str) -> Option<HunkHeader> {
    let caps = HUNK_HEADER_REGEX.captures(line)?;

    let number = |i: usize, default: Option<u32>| -> Option<u32> {
        match caps.get(i) {
            Some(m) => m.as_str().parse().ok(),
            None => default,
        }
    };

    Some(HunkHeader {
        old_start: number(1, None)?,
        old_len: number(2, Some(1))?,
        new_start: number(3, None)?,
        new_len: number(4, Some(1))?,
        section: caps
            .get(5)
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default(),
    })
}

/// Parse the paths from the remainder of a `diff --git ` line.
///
/// Handles:
/// - "a/path/to/file b/path/to/file" (normal)
/// - "a/path/to/file b/path/to/renamed" (rename)
/// - "old new" (`--no-prefix` output, paths without spaces)
///
/// Returns `(old_path, new_path)` without their `a/` and `b/` prefixes.
pub(crate) fn parse_diff_git_line(rest: &str) -> Option<(String, String)> {
    // Paths can contain spaces; the last " b/" separates the two sides.
    if let Some(b_pos) = rest.rfind(" b/") {
        let a_part = &rest[..b_pos];
        let b_path = &rest[b_pos + 3..];
        let a_path = a_part.strip_prefix("a/").unwrap_or(a_part);
        if a_path.is_empty() || b_path.is_empty() {
            return None;
        }
        return Some((normalize_path(a_path), normalize_path(b_path)));
    }

    let parts: Vec<&str> = rest.split_whitespace().collect();
    if let [old, new] = parts.as_slice() {
        return Some((normalize_path(old), normalize_path(new)));
    }

    None
}

/// Extract the path from the remainder of a `--- ` or `+++ ` line.
///
/// Drops a tab-separated timestamp (classic `diff -u` output) and the given
/// side prefix (`a/` or `b/`). `/dev/null` is returned verbatim.
pub(crate) fn parse_file_header_path(rest: &str, side_prefix: &str) -> Option<String> {
    let path = rest.split('\t').next().unwrap_or(rest).trim_end();

    if path.is_empty() {
        return None;
    }
    if path == DEV_NULL {
        return Some(DEV_NULL.to_string());
    }

    Some(normalize_path(path.strip_prefix(side_prefix).unwrap_or(path)))
}

/// Extension of a path including its dot (`.c`), or the base name when it
/// has none (`Makefile`, `.gitignore`). `/dev/null` maps to
/// [`DEV_NULL_EXTENSION`].
pub fn extension_of(path: &str) -> String {
    if path == DEV_NULL {
        return DEV_NULL_EXTENSION.to_string();
    }

    let base = path.rsplit('/').next().unwrap_or(path);
    match base.rfind('.') {
        Some(dot) if dot > 0 => base[dot..].to_string(),
        _ => base.to_string(),
    }
}

/// Normalize a file path to use forward slashes.
///
/// Keeps paths comparable regardless of the platform that produced the diff.
pub(crate) fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
}
