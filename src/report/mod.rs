//! Rendering of a [`DiffStats`](crate::stats::DiffStats) for humans or tools.

mod render;


pub use render::{Format, render, render_json, render_text};
