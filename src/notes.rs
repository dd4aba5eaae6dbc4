// treenotes/src/notes.rs
//! Path-keyed description tables.
//!
//! Keys are relative to the walk root, slash-separated; directory keys end in
//! `/`. Two tables feed the renderer: the manual table (operator overrides)
//! and the directory table loaded from the sidecar file at the root.

use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fs, path::Path};

use crate::extract::{self, LineCommentMode};

pub const SIDECAR_FILE: &str = "dir_comments.json";

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct NoteTable(BTreeMap<String, String>);

impl NoteTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut t = Self::new();
        for (k, v) in pairs {
            t.insert(k.as_ref(), v);
        }
        t
    }

    pub fn insert(&mut self, path: &str, note: impl Into<String>) {
        self.0.insert(normalize_key(path), note.into());
    }

    /// Later tables win on key collisions.
    pub fn merge(&mut self, other: NoteTable) {
        for (k, v) in other.0 {
            self.0.insert(normalize_key(&k), v);
        }
    }

    /// Non-empty note for `path`. Blank values count as missing.
    pub fn get(&self, path: &str) -> Option<&str> {
        self.0
            .get(path)
            .map(String::as_str)
            .filter(|s| !s.trim().is_empty())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parse a JSON object of `path -> note`.
    pub fn from_json_str(s: &str) -> serde_json::Result<Self> {
        let raw: NoteTable = serde_json::from_str(s)?;
        let mut t = Self::new();
        t.merge(raw);
        Ok(t)
    }

    /// Load a notes file the operator asked for. Errors are the caller's.
    pub fn load_json(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading notes file {}", path.display()))?;
        Self::from_json_str(&text)
            .with_context(|| format!("parsing notes file {}", path.display()))
    }

    /// Directory table from `<root>/<name>`. Missing file is an empty table;
    /// a broken one is logged and also yields an empty table.
    pub fn load_sidecar(root: &Path, name: &str) -> Self {
        let path = root.join(name);
        if !path.is_file() {
            return Self::new();
        }
        match Self::load_json(&path) {
            Ok(t) => t,
            Err(e) => {
                warn!("ignoring directory notes: {:#}", e);
                Self::new()
            }
        }
    }
}

/// The two lookup sources handed to the renderer.
#[derive(Clone, Debug, Default)]
pub struct NoteSources {
    pub manual: NoteTable,
    pub directory: NoteTable,
}

impl NoteSources {
    pub fn new(manual: NoteTable, directory: NoteTable) -> Self {
        Self { manual, directory }
    }

    /// Directory note: manual first, then the sidecar table. `rel_dir` has no
    /// trailing slash; it is added here.
    pub fn dir_note(&self, rel_dir: &str) -> Option<&str> {
        let key = format!("{}/", rel_dir.trim_end_matches('/'));
        self.manual.get(&key).or_else(|| self.directory.get(&key))
    }

    /// File note: the file's own leading comment, else the manual table.
    pub fn file_note(&self, abs: &Path, rel: &str, mode: LineCommentMode) -> Option<String> {
        extract::file_comment(abs, mode).or_else(|| self.manual.get(rel).map(str::to_string))
    }
}

fn normalize_key(path: &str) -> String {
    let p = path.replace('\\', "/");
    p.strip_prefix("./").unwrap_or(p.as_str()).to_string()
}

/* ===================================== Tests ===================================== */
