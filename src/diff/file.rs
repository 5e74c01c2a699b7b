//! The file pair a diff section describes.

use super::helpers::{DEV_NULL, extension_of, normalize_path};
use crate::config::FilesPolicy;

/// Old and new path of the file currently being parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub old_path: String,
    pub new_path: String,
    /// A `+++` line was seen; a following `---` starts a new section.
    pub(super) has_new_header: bool,
    /// Built from a `diff --git`, `---` or `+++` line rather than synthesized
    /// for hunks that arrived before any file header.
    pub(super) from_header: bool,
}

impl FileEntry {
    pub fn new(old_path: impl Into<String>, new_path: impl Into<String>) -> Self {
        Self {
            old_path: old_path.into(),
            new_path: new_path.into(),
            has_new_header: false,
            from_header: true,
        }
    }

    /// Entry for hunks that appear without any file header.
    pub fn headerless(source_name: &str) -> Self {
        let path = normalize_path(source_name);
        Self {
            from_header: false,
            ..Self::new(path.clone(), path)
        }
    }

    pub fn is_added(&self) -> bool {
        self.old_path == DEV_NULL
    }

    pub fn is_deleted(&self) -> bool {
        self.new_path == DEV_NULL
    }

    /// The post-change identity, or the pre-change path for a deletion.
    pub fn canonical_path(&self) -> &str {
        if self.is_deleted() {
            &self.old_path
        } else {
            &self.new_path
        }
    }

    /// Extension selecting the dialect for the pre-change side.
    pub fn before_extension(&self) -> String {
        extension_of(&self.old_path)
    }

    /// Extension selecting the dialect for the post-change side.
    pub fn after_extension(&self) -> String {
        extension_of(&self.new_path)
    }

    /// Paths this entry contributes to the `files` set.
    pub fn recorded_paths(&self, policy: FilesPolicy) -> Vec<&str> {
        match policy {
            FilesPolicy::NewPath => vec![self.canonical_path()],
            FilesPolicy::BothPaths => {
                let mut paths: Vec<&str> = [self.old_path.as_str(), self.new_path.as_str()]
                    .into_iter()
                    .filter(|p| *p != DEV_NULL)
                    .collect();
                paths.dedup();
                if paths.is_empty() {
                    paths.push(self.canonical_path());
                }
                paths
            }
        }
    }
}
