// treenotes/src/syntax.rs
//! Comment-syntax registry: file extension -> leading-comment grammar.
//!
//! The table is built once per process and never mutated afterwards.

use std::{
    collections::HashMap,
    path::Path,
    sync::OnceLock,
};

/// How the leading comment of a file is written.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommentGrammar {
    /// Python-style header: a contiguous run of `#` lines from the top.
    PrefixLine(&'static str),
    /// Generic single-symbol line comment (`//`, `#`, `--`).
    SymmetricLine(&'static str),
    /// Bounded block such as `<!-- ... -->` or `/* ... */`.
    DelimitedBlock {
        open: &'static str,
        close: &'static str,
    },
}

impl CommentGrammar {
    /// Build a grammar from a raw symbol set. One symbol is a line grammar,
    /// two are a block; anything else is unrecognized.
    pub fn from_symbols(symbols: &[&'static str]) -> Option<Self> {
        match *symbols {
            [sym] if !sym.is_empty() => Some(CommentGrammar::SymmetricLine(sym)),
            [open, close] if !open.is_empty() && !close.is_empty() => {
                Some(CommentGrammar::DelimitedBlock { open, close })
            }
            _ => None,
        }
    }

    pub fn symbols(&self) -> Vec<&'static str> {
        match *self {
            CommentGrammar::PrefixLine(s) | CommentGrammar::SymmetricLine(s) => vec![s],
            CommentGrammar::DelimitedBlock { open, close } => vec![open, close],
        }
    }
}

/// Raw symbol sets per extension group. Python headers are promoted to
/// `PrefixLine` after classification.
const SYMBOL_TABLE: &[(&[&str], &[&str])] = &[
    (&["py", "do", "json", "txt", "sh", "toml", "yaml", "yml", "rb", "r"], &["#"]),
    (&["js", "ts", "rs", "go", "java", "kt", "swift"], &["//"]),
    (&["sql", "lua", "hs"], &["--"]),
    (&["md", "html", "htm", "xml", "svg"], &["<!--", "-->"]),
    (&["h", "css"], &["/*", "*/"]),
    // mixed line + block syntax: no grammar, C files rely on manual notes
    (&["c"], &["//", "/*", "*/"]),
];

static REGISTRY: OnceLock<HashMap<&'static str, CommentGrammar>> = OnceLock::new();

fn registry() -> &'static HashMap<&'static str, CommentGrammar> {
    REGISTRY.get_or_init(|| {
        let mut m = HashMap::new();
        for (exts, symbols) in SYMBOL_TABLE {
            let Some(grammar) = CommentGrammar::from_symbols(symbols) else { continue };
            for &ext in exts.iter() {
                m.insert(ext, grammar);
            }
        }
        m.insert("py", CommentGrammar::PrefixLine("#"));
        m
    })
}

/// Grammar for a bare extension (no dot), case-insensitive.
pub fn grammar_for_ext(ext: &str) -> Option<CommentGrammar> {
    let ext = ext.trim_start_matches('.').to_ascii_lowercase();
    registry().get(ext.as_str()).copied()
}

/// Grammar for a path, keyed on its extension.
pub fn grammar_for_path(path: &Path) -> Option<CommentGrammar> {
    path.extension()
        .and_then(|e| e.to_str())
        .and_then(grammar_for_ext)
}

/* ===================================== Tests ===================================== */
