//! Tests for diff parsing.

use super::helpers::{
    DEV_NULL, DEV_NULL_EXTENSION, parse_diff_git_line, parse_file_header_path, parse_hunk_header,
};
use super::{
    DiffParser, FileEntry, HunkAggregator, LineEvent, ParseState, analyze_diff, extension_of,
    transition,
};
use crate::calls::{CallCounts, DialectRegistry};
use crate::config::FilesPolicy;
use crate::stats::{DiffStats, FileStats};
use pretty_assertions::assert_eq;
use std::collections::BTreeSet;

// =========================================================================
// Helper functions
// =========================================================================

fn analyze(text: &str) -> DiffStats {
    analyze_diff("test.diff", text, &DialectRegistry::default(), FilesPolicy::NewPath)
}

fn calls(pairs: &[(&str, u64)]) -> CallCounts {
    pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

const SIMPLE_C_DIFF: &str = r#"diff --git a/foo.c b/foo.c
index 1a2b3c4..5d6e7f8 100644
--- a/foo.c
+++ b/foo.c
@@ -1,2 +1,3 @@
 int x;
-foo();
+bar();
+baz();
"#;

// =========================================================================
// End-to-end scenarios
// =========================================================================

/// One file pair, one hunk, context + deletion + two additions.
#[test]
fn test_single_c_hunk() {
    let stats = analyze(SIMPLE_C_DIFF);

    assert_eq!(stats.regions, 1);
    assert_eq!(stats.lines_added, 2);
    assert_eq!(stats.lines_deleted, 1);
    assert_eq!(stats.function_calls_before, calls(&[("foo", 1)]));
    assert_eq!(stats.function_calls_after, calls(&[("bar", 1), ("baz", 1)]));
    assert_eq!(stats.files, set(&["foo.c"]));
    assert_eq!(stats.file_extensions, set(&[".c"]));
    assert_eq!(
        stats.per_file.get("foo.c"),
        Some(&FileStats {
            regions: 1,
            lines_added: 2,
            lines_deleted: 1,
        })
    );
}

/// The same diff without a `diff --git` line gives the same result.
#[test]
fn test_plain_unified_diff_matches_git_diff() {
    let plain = r#"--- a/foo.c
+++ b/foo.c
@@ -1,2 +1,3 @@
 int x;
-foo();
+bar();
+baz();
"#;

    assert_eq!(analyze(plain), analyze(SIMPLE_C_DIFF));
}

/// A diff ending right after a hunk's last content line still contributes
/// that hunk's calls.
#[test]
fn test_last_hunk_is_flushed_at_end_of_input() {
    let diff = "--- a/a.c\n+++ b/a.c\n@@ -1 +1 @@\n-old_call();\n+new_call();";
    let stats = analyze(diff);

    assert_eq!(stats.function_calls_before, calls(&[("old_call", 1)]));
    assert_eq!(stats.function_calls_after, calls(&[("new_call", 1)]));
}

/// Every hunk of a multi-hunk file is classified, not just the last.
#[test]
fn test_multiple_hunks_and_files() {
    let diff = r#"diff --git a/src/a.c b/src/a.c
--- a/src/a.c
+++ b/src/a.c
@@ -5,3 +5,3 @@ int main(void) {
 	setup();
-	run(1);
+	run(2);
@@ -20,2 +20,3 @@ static void helper(void) {
 	log_msg("x");
+	flush();
diff --git a/lib/b.py b/lib/b.py
--- a/lib/b.py
+++ b/lib/b.py
@@ -1,1 +1,2 @@
 import os
+os.makedirs(path)
"#;
    let stats = analyze(diff);

    assert_eq!(stats.regions, 3);
    assert_eq!(stats.lines_added, 3);
    assert_eq!(stats.lines_deleted, 1);
    assert_eq!(stats.files, set(&["lib/b.py", "src/a.c"]));
    assert_eq!(stats.file_extensions, set(&[".c", ".py"]));
    assert_eq!(
        stats.function_calls_before,
        calls(&[("log_msg", 1), ("run", 1), ("setup", 1)])
    );
    assert_eq!(
        stats.function_calls_after,
        calls(&[("flush", 1), ("log_msg", 1), ("makedirs", 1), ("run", 1), ("setup", 1)])
    );
    assert_eq!(stats.per_file["src/a.c"].regions, 2);
    assert_eq!(stats.per_file["lib/b.py"].lines_added, 1);
}

/// A new file: the `/dev/null` side contributes nothing.
#[test]
fn test_new_file_from_dev_null() {
    let diff = r#"diff --git a/new.c b/new.c
new file mode 100644
index 0000000..abc1234
--- /dev/null
+++ b/new.c
@@ -0,0 +1,2 @@
+int main(void) {
+    return run();
"#;
    let stats = analyze(diff);

    assert_eq!(stats.files, set(&["new.c"]));
    assert_eq!(stats.file_extensions, set(&[".c"]));
    assert_eq!(stats.lines_added, 2);
    assert!(stats.function_calls_before.is_empty());
    assert_eq!(stats.function_calls_after, calls(&[("run", 1)]));
}

/// A deleted file is recorded under its old path.
#[test]
fn test_deleted_file_to_dev_null() {
    let diff = r#"diff --git a/gone.py b/gone.py
deleted file mode 100644
index abc1234..0000000
--- a/gone.py
+++ /dev/null
@@ -1,2 +0,0 @@
-import os
-os.remove(path)
"#;
    let stats = analyze(diff);

    assert_eq!(stats.files, set(&["gone.py"]));
    assert_eq!(stats.file_extensions, set(&[".py"]));
    assert_eq!(stats.lines_deleted, 2);
    assert_eq!(stats.function_calls_before, calls(&[("remove", 1)]));
    assert!(stats.function_calls_after.is_empty());
}

const RENAME_DIFF: &str = r#"diff --git a/old.py b/new.py
similarity index 90%
rename from old.py
rename to new.py
index 1111111..2222222 100644
--- a/old.py
+++ b/new.py
@@ -1,1 +1,1 @@
-print(a)
+log(a)
"#;

/// Renames are attributed to the new path by default.
#[test]
fn test_rename_records_new_path() {
    let stats = analyze(RENAME_DIFF);

    assert_eq!(stats.files, set(&["new.py"]));
    assert_eq!(stats.file_extensions, set(&[".py"]));
    assert_eq!(stats.function_calls_before, calls(&[("print", 1)]));
    assert_eq!(stats.function_calls_after, calls(&[("log", 1)]));
    assert!(stats.per_file.contains_key("new.py"));
}

/// With the both-paths policy a rename records old and new path.
#[test]
fn test_rename_records_both_paths_when_configured() {
    let stats = analyze_diff(
        "rename.diff",
        RENAME_DIFF,
        &DialectRegistry::default(),
        FilesPolicy::BothPaths,
    );

    assert_eq!(stats.files, set(&["new.py", "old.py"]));
    assert_eq!(stats.regions, 1);
}

/// A pure rename has no `---`/`+++` pair and no hunks.
#[test]
fn test_pure_rename_without_hunks() {
    let diff = r#"diff --git a/docs/a.txt b/docs/b.txt
similarity index 100%
rename from docs/a.txt
rename to docs/b.txt
"#;
    let stats = analyze(diff);

    assert_eq!(stats.files, set(&["docs/b.txt"]));
    assert_eq!(stats.file_extensions, set(&[".txt"]));
    assert_eq!(stats.regions, 0);
}

/// The before side is classified with the old extension, the after side
/// with the new one.
#[test]
fn test_rename_with_extension_change_uses_both_dialects() {
    let diff = r#"diff --git a/tool.c b/tool.py
--- a/tool.c
+++ b/tool.py
@@ -1 +1 @@
-int run(void) { go(); }
+def run(): go()
"#;
    let stats = analyze(diff);

    assert_eq!(stats.function_calls_before, calls(&[("go", 1)]));
    assert_eq!(stats.function_calls_after, calls(&[("go", 1)]));
    assert_eq!(stats.files, set(&["tool.py"]));
}

/// Deleted content that starts with `--` is not mistaken for a header while
/// the region header still owes old lines.
#[test]
fn test_triple_dash_content_inside_hunk() {
    let diff = r#"--- a/q.sql
+++ b/q.sql
@@ -1,2 +1,1 @@
--- a comment
-select 1;
+select 2;
"#;
    let stats = analyze(diff);

    assert_eq!(stats.files, set(&["q.sql"]));
    assert_eq!(stats.lines_deleted, 2);
    assert_eq!(stats.lines_added, 1);
}

/// Once a hunk is exhausted, `---` starts the next file pair.
#[test]
fn test_consecutive_plain_file_sections() {
    let diff = r#"--- a/one.c
+++ b/one.c
@@ -1 +1 @@
-a();
+b();
--- a/two.c
+++ b/two.c
@@ -1 +1 @@
-c();
+d();
"#;
    let stats = analyze(diff);

    assert_eq!(stats.files, set(&["one.c", "two.c"]));
    assert_eq!(stats.regions, 2);
    assert_eq!(stats.function_calls_before, calls(&[("a", 1), ("c", 1)]));
    assert_eq!(stats.function_calls_after, calls(&[("b", 1), ("d", 1)]));
}

/// Timestamps after a tab are not part of the path.
#[test]
fn test_classic_diff_headers_with_timestamps() {
    let diff = "--- main.c\t2020-01-01 10:00:00.000000000 +0000\n\
                +++ main.c\t2020-01-02 10:00:00.000000000 +0000\n\
                @@ -1 +1 @@\n\
                -puts(\"a\");\n\
                +printf(\"b\");\n";
    let stats = analyze(diff);

    assert_eq!(stats.files, set(&["main.c"]));
    assert_eq!(stats.function_calls_after, calls(&[("printf", 1)]));
}

/// `\ No newline at end of file` does not end the hunk.
#[test]
fn test_no_newline_marker_keeps_hunk_open() {
    let diff = r#"--- a/x.py
+++ b/x.py
@@ -1 +1 @@
-foo()
\ No newline at end of file
+bar()
\ No newline at end of file
"#;
    let stats = analyze(diff);

    assert_eq!(stats.lines_deleted, 1);
    assert_eq!(stats.lines_added, 1);
    assert_eq!(stats.function_calls_before, calls(&[("foo", 1)]));
    assert_eq!(stats.function_calls_after, calls(&[("bar", 1)]));
}

/// A line with no leading marker closes the hunk; later `+` lines outside a
/// hunk are not counted.
#[test]
fn test_unmarked_line_closes_hunk() {
    let diff = "--- a/x.c\n+++ b/x.c\n@@ -1,1 +1,2 @@\n a();\n\n+b();\n";
    let stats = analyze(diff);

    assert_eq!(stats.regions, 1);
    assert_eq!(stats.lines_added, 0);
    assert_eq!(stats.function_calls_after, calls(&[("a", 1)]));
}

/// Lines and regions still count when the extension has no dialect.
#[test]
fn test_unsupported_dialect_counts_lines_only() {
    let diff = r#"diff --git a/Makefile b/Makefile
--- a/Makefile
+++ b/Makefile
@@ -1 +1,2 @@
 all:
+	$(CC) -o app main.c
"#;
    let stats = analyze(diff);

    assert_eq!(stats.files, set(&["Makefile"]));
    assert_eq!(stats.file_extensions, set(&["Makefile"]));
    assert_eq!(stats.regions, 1);
    assert_eq!(stats.lines_added, 1);
    assert!(stats.function_calls_before.is_empty());
    assert!(stats.function_calls_after.is_empty());
}

/// A malformed region header is not a region.
#[test]
fn test_malformed_region_header_is_ignored() {
    let diff = "--- a/x.c\n+++ b/x.c\n@@ -x,1 +1 @@\n+a();\n";
    let stats = analyze(diff);

    assert_eq!(stats.regions, 0);
    assert_eq!(stats.lines_added, 0);
    assert_eq!(stats.files, set(&["x.c"]));
}

/// Hunks without any file header belong to the source itself.
#[test]
fn test_headerless_hunk_uses_source_name() {
    let stats = analyze_diff(
        "snippet.c",
        "@@ -1 +1 @@\n-a();\n+b();\n",
        &DialectRegistry::default(),
        FilesPolicy::NewPath,
    );

    assert_eq!(stats.files, set(&["snippet.c"]));
    assert_eq!(stats.regions, 1);
    assert_eq!(stats.function_calls_after, calls(&[("b", 1)]));
}

/// Hunks before the first header keep their own entry; a later `---` does
/// not adopt them.
#[test]
fn test_headerless_hunk_then_file_header() {
    let diff = "@@ -1 +1 @@\n-a();\n+b();\n--- a/x.c\n+++ b/x.c\n@@ -1 +1 @@\n-c();\n+d();\n";
    let stats = analyze_diff(
        "src.diff",
        diff,
        &DialectRegistry::default(),
        FilesPolicy::NewPath,
    );

    assert_eq!(stats.files, set(&["src.diff", "x.c"]));
    assert_eq!(stats.regions, 2);
    assert!(stats.per_file.keys().all(|path| stats.files.contains(path)));
    assert_eq!(
        stats.per_file["x.c"],
        FileStats {
            regions: 1,
            lines_added: 1,
            lines_deleted: 1,
        }
    );
    assert_eq!(stats.function_calls_after, calls(&[("b", 1), ("d", 1)]));
}

#[test]
fn test_headerless_hunk_then_new_file_header_only() {
    let diff = "@@ -1 +1 @@\n-a();\n+b();\n+++ b/y.c\n@@ -1 +1 @@\n-c();\n+d();\n";
    let stats = analyze_diff(
        "src.diff",
        diff,
        &DialectRegistry::default(),
        FilesPolicy::NewPath,
    );

    assert_eq!(stats.files, set(&["src.diff", "y.c"]));
    assert!(stats.per_file.keys().all(|path| stats.files.contains(path)));
}

#[test]
fn test_empty_input() {
    assert!(analyze("").is_empty());
}

/// Mode-only changes still list the file.
#[test]
fn test_mode_change_only() {
    let diff = "diff --git a/run.sh b/run.sh\nold mode 100644\nnew mode 100755\n";
    let stats = analyze(diff);

    assert_eq!(stats.files, set(&["run.sh"]));
    assert_eq!(stats.regions, 0);
}

/// Two independent parsers over the same text merge to exactly double.
#[test]
fn test_independent_parsers_double_counts() {
    let registry = DialectRegistry::default();
    let one = analyze_diff("a", SIMPLE_C_DIFF, &registry, FilesPolicy::NewPath);
    let two = analyze_diff("b", SIMPLE_C_DIFF, &registry, FilesPolicy::NewPath);
    let merged = one.clone().merged(two);

    assert_eq!(merged.files, one.files);
    assert_eq!(merged.regions, 2);
    assert_eq!(merged.lines_added, 4);
    assert_eq!(merged.lines_deleted, 2);
    assert_eq!(merged.function_calls_before, calls(&[("foo", 2)]));
    assert_eq!(merged.function_calls_after, calls(&[("bar", 2), ("baz", 2)]));
}

/// CRLF line endings parse like LF.
#[test]
fn test_crlf_line_endings() {
    let crlf = SIMPLE_C_DIFF.replace('\n', "\r\n");
    assert_eq!(analyze(&crlf), analyze(SIMPLE_C_DIFF));
}

// =========================================================================
// State machine
// =========================================================================

#[test]
fn test_transition_git_header() {
    let step = transition(ParseState::ExpectingFileHeader, "diff --git a/x.c b/y.c");

    assert_eq!(step.next, ParseState::ExpectingFileHeader);
    assert!(!step.closes_hunk);
    assert_eq!(
        step.event,
        LineEvent::GitHeader {
            old_path: "x.c".to_string(),
            new_path: "y.c".to_string(),
        }
    );
}

#[test]
fn test_transition_new_file_then_region() {
    let step = transition(ParseState::ExpectingFileHeader, "+++ b/y.c");
    assert_eq!(step.next, ParseState::ExpectingRegionHeader);
    assert_eq!(step.event, LineEvent::NewFile("y.c".to_string()));

    let step = transition(step.next, "@@ -3,2 +3,4 @@ fn f()");
    assert_eq!(
        step.next,
        ParseState::InHunkBody {
            old_remaining: 2,
            new_remaining: 4,
        }
    );
    assert!(matches!(step.event, LineEvent::Region(_)));
}

#[test]
fn test_transition_body_lines_track_remaining_counts() {
    let state = ParseState::InHunkBody {
        old_remaining: 2,
        new_remaining: 2,
    };

    let step = transition(state, " same");
    assert_eq!(step.event, LineEvent::Context("same"));
    let step = transition(step.next, "-gone");
    assert_eq!(step.event, LineEvent::Deleted("gone"));
    let step = transition(step.next, "+here");
    assert_eq!(step.event, LineEvent::Added("here"));
    assert_eq!(
        step.next,
        ParseState::InHunkBody {
            old_remaining: 0,
            new_remaining: 0,
        }
    );
}

#[test]
fn test_transition_region_inside_hunk_closes_it() {
    let state = ParseState::InHunkBody {
        old_remaining: 0,
        new_remaining: 0,
    };
    let step = transition(state, "@@ -10 +10 @@");

    assert!(step.closes_hunk);
    assert!(matches!(step.event, LineEvent::Region(_)));
}

#[test]
fn test_transition_triple_plus_depends_on_remaining_lines() {
    let owed = ParseState::InHunkBody {
        old_remaining: 0,
        new_remaining: 1,
    };
    let step = transition(owed, "+++ b/x");
    assert!(!step.closes_hunk);
    assert_eq!(step.event, LineEvent::Added("++ b/x"));

    let done = ParseState::InHunkBody {
        old_remaining: 0,
        new_remaining: 0,
    };
    let step = transition(done, "+++ b/x");
    assert!(step.closes_hunk);
    assert_eq!(step.event, LineEvent::NewFile("x".to_string()));
}

#[test]
fn test_transition_unrecognized_after_hunk() {
    let state = ParseState::InHunkBody {
        old_remaining: 1,
        new_remaining: 1,
    };
    let step = transition(state, "garbage");

    assert!(step.closes_hunk);
    assert_eq!(step.event, LineEvent::Unrecognized);
    assert_eq!(step.next, ParseState::ExpectingRegionHeader);
}

#[test]
fn test_transition_metadata_keeps_state() {
    let step = transition(ParseState::ExpectingFileHeader, "index abc..def 100644");
    assert_eq!(step.event, LineEvent::Metadata);
    assert_eq!(step.next, ParseState::ExpectingFileHeader);
}

#[test]
fn test_content_lines_outside_hunk_are_unrecognized() {
    let step = transition(ParseState::ExpectingRegionHeader, "+stray");
    assert_eq!(step.event, LineEvent::Unrecognized);
    assert_eq!(step.next, ParseState::ExpectingRegionHeader);
}

#[test]
fn test_parser_state_follows_lines() {
    let registry = DialectRegistry::default();
    let mut parser = DiffParser::new("t", &registry, FilesPolicy::NewPath);
    assert_eq!(parser.state(), ParseState::ExpectingFileHeader);

    parser.feed_line("--- a/t.c");
    parser.feed_line("+++ b/t.c");
    assert_eq!(parser.state(), ParseState::ExpectingRegionHeader);

    parser.feed_line("@@ -1 +1 @@");
    assert!(matches!(parser.state(), ParseState::InHunkBody { .. }));

    let stats = parser.finish();
    assert_eq!(stats.regions, 1);
}

// =========================================================================
// Hunk aggregator
// =========================================================================

#[test]
fn test_aggregator_buffers_and_reset() {
    let registry = DialectRegistry::default();
    let mut hunks = HunkAggregator::new();
    assert!(hunks.close(&registry, ".c", ".c").is_none());

    hunks.open(parse_hunk_header("@@ -1,2 +1,2 @@").unwrap());
    hunks.push_context("a();");
    hunks.push_deleted("b();");
    hunks.push_added("c();");
    assert_eq!(hunks.before(), "a();\nb();\n");
    assert_eq!(hunks.after(), "a();\nc();\n");

    let found = hunks.close(&registry, ".c", ".c").unwrap();
    assert_eq!(found.before, calls(&[("a", 1), ("b", 1)]));
    assert_eq!(found.after, calls(&[("a", 1), ("c", 1)]));
    assert!(found.unsupported.is_empty());
    assert!(!hunks.is_open());
    assert_eq!(hunks.before(), "");
    assert_eq!(hunks.after(), "");
}

#[test]
fn test_aggregator_reports_unsupported_extensions() {
    let registry = DialectRegistry::default();
    let mut hunks = HunkAggregator::new();

    hunks.open(parse_hunk_header("@@ -1 +1 @@").unwrap());
    hunks.push_added("f();");
    let found = hunks.close(&registry, ".rs", ".rs").unwrap();

    assert!(found.after.is_empty());
    assert_eq!(found.unsupported, vec![".rs".to_string()]);
}

// =========================================================================
// Header helpers
// =========================================================================

#[test]
fn test_parse_hunk_header_variants() {
    let h = parse_hunk_header("@@ -10,2 +11,3 @@ fn existing_function() {").unwrap();
    assert_eq!((h.old_start, h.old_len, h.new_start, h.new_len), (10, 2, 11, 3));
    assert_eq!(h.section, "fn existing_function() {");

    let h = parse_hunk_header("@@ -5 +6 @@").unwrap();
    assert_eq!((h.old_start, h.old_len, h.new_start, h.new_len), (5, 1, 6, 1));
    assert_eq!(h.section, "");

    let h = parse_hunk_header("@@ -0,0 +1,3 @@").unwrap();
    assert_eq!((h.old_len, h.new_len), (0, 3));

    assert!(parse_hunk_header("@@ invalid @@").is_none());
    assert!(parse_hunk_header("@@ -1,2 +1,2").is_none());
    assert!(parse_hunk_header("@@ -99999999999,1 +1 @@").is_none());
    assert!(parse_hunk_header("not a hunk").is_none());
}

#[test]
fn test_parse_diff_git_line() {
    assert_eq!(
        parse_diff_git_line("a/src/lib.rs b/src/lib.rs"),
        Some(("src/lib.rs".to_string(), "src/lib.rs".to_string()))
    );
    assert_eq!(
        parse_diff_git_line("a/my file.txt b/my file.txt"),
        Some(("my file.txt".to_string(), "my file.txt".to_string()))
    );
    assert_eq!(
        parse_diff_git_line("old.c new.c"),
        Some(("old.c".to_string(), "new.c".to_string()))
    );
    assert_eq!(parse_diff_git_line("single"), None);
}

#[test]
fn test_parse_file_header_path() {
    assert_eq!(parse_file_header_path("a/x/y.c", "a/"), Some("x/y.c".to_string()));
    assert_eq!(parse_file_header_path("/dev/null", "a/"), Some(DEV_NULL.to_string()));
    assert_eq!(
        parse_file_header_path("b/z.py\t2020-01-01", "b/"),
        Some("z.py".to_string())
    );
    assert_eq!(parse_file_header_path("win\\path.c", "b/"), Some("win/path.c".to_string()));
    assert_eq!(parse_file_header_path("", "a/"), None);
}

#[test]
fn test_extension_of() {
    assert_eq!(extension_of("src/foo.c"), ".c");
    assert_eq!(extension_of("archive.tar.gz"), ".gz");
    assert_eq!(extension_of("build/Makefile"), "Makefile");
    assert_eq!(extension_of(".gitignore"), ".gitignore");
    assert_eq!(extension_of("dir.d/README"), "README");
    assert_eq!(extension_of(DEV_NULL), DEV_NULL_EXTENSION);
}

#[test]
fn test_file_entry_paths() {
    let added = FileEntry::new(DEV_NULL, "n.c");
    assert!(added.is_added());
    assert_eq!(added.canonical_path(), "n.c");
    assert_eq!(added.before_extension(), DEV_NULL_EXTENSION);
    assert_eq!(added.recorded_paths(FilesPolicy::BothPaths), vec!["n.c"]);

    let deleted = FileEntry::new("d.py", DEV_NULL);
    assert!(deleted.is_deleted());
    assert_eq!(deleted.canonical_path(), "d.py");
    assert_eq!(deleted.recorded_paths(FilesPolicy::NewPath), vec!["d.py"]);

    let renamed = FileEntry::new("a.c", "b.c");
    assert_eq!(renamed.recorded_paths(FilesPolicy::NewPath), vec!["b.c"]);
    assert_eq!(renamed.recorded_paths(FilesPolicy::BothPaths), vec!["a.c", "b.c"]);
}
