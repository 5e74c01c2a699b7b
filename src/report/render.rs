//! Text and JSON renderers for a merged result.

use crate::calls::CallCounts;
use crate::error::{DiffStatsError, Result};
use crate::stats::DiffStats;
use std::fmt::Write;

const INDENT: &str = "    ";

/// Output format of the report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Format {
    #[default]
    Text,
    Json,
}

pub fn render(stats: &DiffStats, format: Format) -> Result<String> {
    match format {
        Format::Text => Ok(render_text(stats)),
        Format::Json => render_json(stats),
    }
}

/// Plain-text report: file list, counters, then the two call tables.
///
/// Every collection is ordered, so equal results render identically.
pub fn render_text(stats: &DiffStats) -> String {
    let mut out = String::new();

    out.push_str("Files:\n");
    for file in &stats.files {
        let _ = writeln!(out, "{INDENT}-{file}");
    }

    out.push_str("Extensions:\n");
    for ext in &stats.file_extensions {
        let _ = writeln!(out, "{INDENT}-{ext}");
    }

    let _ = writeln!(out, "Regions : {}", stats.regions);
    let _ = writeln!(out, "LA : {}", stats.lines_added);
    let _ = writeln!(out, "LD : {}", stats.lines_deleted);

    write_calls(&mut out, "Function calls before", &stats.function_calls_before);
    write_calls(&mut out, "Function calls after", &stats.function_calls_after);

    if !stats.per_file.is_empty() {
        out.push_str("Per file:\n");
        for (path, file) in &stats.per_file {
            let _ = writeln!(
                out,
                "{INDENT}{path} : {} region(s), +{} -{}",
                file.regions, file.lines_added, file.lines_deleted
            );
        }
    }

    out
}

fn write_calls(out: &mut String, title: &str, calls: &CallCounts) {
    let _ = writeln!(out, "{title}:");
    for (name, count) in calls {
        let _ = writeln!(out, "{INDENT}{name} : {count}");
    }
}

/// Pretty-printed JSON with the field names of [`DiffStats`].
pub fn render_json(stats: &DiffStats) -> Result<String> {
    serde_json::to_string_pretty(stats)
        .map_err(|e| DiffStatsError::RenderError(format!("failed to serialize result: {}", e)))
}
