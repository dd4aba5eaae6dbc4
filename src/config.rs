// treenotes/src/config.rs
//! Run settings and the built-in notes table.

use std::path::PathBuf;

use crate::{
    extract::LineCommentMode,
    notes::{NoteTable, SIDECAR_FILE},
    tree_view::RenderOptions,
};

pub const DEFAULT_ROOT: &str = "./";
pub const DEFAULT_OUTPUT: &str = "./docs/PROJECT_STRUCTURE.md";

/// Notes every run starts with. Keys are relative to the walk root; directory
/// keys end in `/`. CLI and `--notes` entries override these.
pub const DEFAULT_NOTES: &[(&str, &str)] = &[
    ("docs/", "Generated and hand-written documentation"),
    ("docs/PROJECT_STRUCTURE.md", "This file: annotated project tree"),
    (SIDECAR_FILE, "Directory notes for the project tree"),
    (".gitkeep", "Placeholder so git tracks an empty folder"),
];

#[derive(Clone, Debug)]
pub struct RunConfig {
    pub root: PathBuf,
    pub output: PathBuf,
    pub sidecar_name: String,
    pub manual: NoteTable,
    pub render: RenderOptions,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_ROOT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            sidecar_name: SIDECAR_FILE.to_string(),
            manual: NoteTable::from_pairs(DEFAULT_NOTES.iter().copied()),
            render: RenderOptions::default(),
        }
    }
}

impl RunConfig {
    pub fn legacy_line_comments(&mut self) {
        self.render.line_mode = LineCommentMode::FirstMatch;
    }
}
