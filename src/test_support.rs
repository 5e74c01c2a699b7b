//! Shared fixtures for tests.

use std::path::Path;
use tempfile::TempDir;

/// A diff touching one C file: calls `foo` before, `bar` and `baz` after.
pub(crate) const C_DIFF: &str = r#"diff --git a/foo.c b/foo.c
index 1a2b3c4..5d6e7f8 100644
--- a/foo.c
+++ b/foo.c
@@ -1,2 +1,3 @@
 int x;
-foo();
+bar();
+baz();
"#;

/// A renamed Python file with two hunks.
pub(crate) const PY_DIFF: &str = r#"diff --git a/old.py b/new.py
similarity index 80%
rename from old.py
rename to new.py
--- a/old.py
+++ b/new.py
@@ -1,2 +1,2 @@
 import os
-os.remove(path)
+os.unlink(path)
@@ -10 +10,2 @@ def main():
     main()
+    cleanup(path)
"#;

/// A diff for an extension with no dialect.
pub(crate) const RUST_DIFF: &str = r#"diff --git a/src/lib.rs b/src/lib.rs
--- a/src/lib.rs
+++ b/src/lib.rs
@@ -1 +1 @@
-fn old() { a(); }
+fn new() { b(); }
"#;

/// Create a temporary directory holding the given `(file name, contents)` pairs.
pub(crate) fn create_diff_dir(files: &[(&str, &str)]) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    for (name, contents) in files {
        write_file(temp_dir.path(), name, contents);
    }
    temp_dir
}

pub(crate) fn write_file(dir: &Path, name: &str, contents: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, contents)
        .unwrap_or_else(|e| panic!("failed to write {}: {}", path.display(), e));
}
