//! Line classification state machine.
//!
//! [`transition`] is a pure function from the current [`ParseState`] and one
//! line of diff text to the next state and the event the line represents.
//! It never rejects a line: anything that fits no grammar becomes
//! [`LineEvent::Unrecognized`].

use super::helpers::{HunkHeader, parse_diff_git_line, parse_file_header_path, parse_hunk_header};

/// Where the parser is within a diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseState {
    /// Before the first file, or inside a file's header block.
    #[default]
    ExpectingFileHeader,
    /// After a `+++` line or a closed hunk; the next region may start.
    ExpectingRegionHeader,
    /// Inside a hunk. The counters are the lines the region header announced
    /// for each side that have not been seen yet.
    InHunkBody { old_remaining: u32, new_remaining: u32 },
}

/// What a single line means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEvent<'a> {
    /// `diff --git a/<old> b/<new>`: a new file section starts.
    GitHeader { old_path: String, new_path: String },
    /// `--- <old>`
    OldFile(String),
    /// `+++ <new>`
    NewFile(String),
    /// `rename from <old>`
    RenameFrom(&'a str),
    /// `rename to <new>`
    RenameTo(&'a str),
    /// `@@ -a,b +c,d @@`: a new hunk opens.
    Region(HunkHeader),
    /// ` <text>`: present on both sides.
    Context(&'a str),
    /// `-<text>`
    Deleted(&'a str),
    /// `+<text>`
    Added(&'a str),
    /// `\ No newline at end of file`
    NoNewlineMarker,
    /// Recognized header noise: `index`, mode, similarity and binary lines.
    Metadata,
    /// Matches no grammar that applies in the current state.
    Unrecognized,
}

/// Result of feeding one line to the machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition<'a> {
    pub next: ParseState,
    /// The open hunk ends before `event` is applied.
    pub closes_hunk: bool,
    pub event: LineEvent<'a>,
}

const METADATA_PREFIXES: &[&str] = &[
    "index ",
    "new file mode ",
    "deleted file mode ",
    "old mode ",
    "new mode ",
    "similarity index ",
    "dissimilarity index ",
    "copy from ",
    "copy to ",
    "Binary files ",
];

/// Classify `line` given the current `state`.
pub fn transition(state: ParseState, line: &str) -> Transition<'_> {
    if let ParseState::InHunkBody {
        old_remaining,
        new_remaining,
    } = state
    {
        if let Some((event, next)) = hunk_body_line(line, old_remaining, new_remaining) {
            return Transition {
                next,
                closes_hunk: false,
                event,
            };
        }

        let (event, next) = header_line(line, ParseState::ExpectingRegionHeader);
        return Transition {
            next,
            closes_hunk: true,
            event,
        };
    }

    let (event, next) = header_line(line, state);
    Transition {
        next,
        closes_hunk: false,
        event,
    }
}

/// A line that continues the open hunk, if it is one.
///
/// `---`/`+++` lines are file headers unless the region header still owes
/// lines on that side, in which case they are content that happens to start
/// with the marker repeated.
fn hunk_body_line(
    line: &str,
    old_remaining: u32,
    new_remaining: u32,
) -> Option<(LineEvent<'_>, ParseState)> {
    let first = line.chars().next()?;

    let (event, old_remaining, new_remaining) = match first {
        ' ' => (
            LineEvent::Context(&line[1..]),
            old_remaining.saturating_sub(1),
            new_remaining.saturating_sub(1),
        ),
        '-' if !(line.starts_with("--- ") && old_remaining == 0) => (
            LineEvent::Deleted(&line[1..]),
            old_remaining.saturating_sub(1),
            new_remaining,
        ),
        '+' if !(line.starts_with("+++ ") && new_remaining == 0) => (
            LineEvent::Added(&line[1..]),
            old_remaining,
            new_remaining.saturating_sub(1),
        ),
        '\\' => (LineEvent::NoNewlineMarker, old_remaining, new_remaining),
        _ => return None,
    };

    Some((
        event,
        ParseState::InHunkBody {
            old_remaining,
            new_remaining,
        },
    ))
}

/// Classify a line outside a hunk. `fallback` is the state kept when the line
/// carries no header.
fn header_line(line: &str, fallback: ParseState) -> (LineEvent<'_>, ParseState) {
    if let Some(rest) = line.strip_prefix("diff --git ")
        && let Some((old_path, new_path)) = parse_diff_git_line(rest)
    {
        return (
            LineEvent::GitHeader { old_path, new_path },
            ParseState::ExpectingFileHeader,
        );
    }

    if let Some(rest) = line.strip_prefix("--- ")
        && let Some(path) = parse_file_header_path(rest, "a/")
    {
        return (LineEvent::OldFile(path), ParseState::ExpectingFileHeader);
    }

    if let Some(rest) = line.strip_prefix("+++ ")
        && let Some(path) = parse_file_header_path(rest, "b/")
    {
        return (LineEvent::NewFile(path), ParseState::ExpectingRegionHeader);
    }

    if let Some(header) = parse_hunk_header(line) {
        let next = ParseState::InHunkBody {
            old_remaining: header.old_len,
            new_remaining: header.new_len,
        };
        return (LineEvent::Region(header), next);
    }

    if let Some(path) = line.strip_prefix("rename from ") {
        return (LineEvent::RenameFrom(path), ParseState::ExpectingFileHeader);
    }

    if let Some(path) = line.strip_prefix("rename to ") {
        return (LineEvent::RenameTo(path), ParseState::ExpectingFileHeader);
    }

    if METADATA_PREFIXES.iter().any(|p| line.starts_with(p)) {
        return (LineEvent::Metadata, fallback);
    }

    (LineEvent::Unrecognized, fallback)
}
