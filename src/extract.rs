// treenotes/src/extract.rs
//! Leading-comment extraction.
//!
//! Only the head of a file is inspected: at most `HEAD_BYTES` bytes and the
//! first `HEAD_LINES` lines of that window.

use log::{debug, warn};
use std::{
    fs::File,
    io::{self, Read},
    path::Path,
};

use crate::syntax::{self, CommentGrammar};

pub const HEAD_BYTES: u64 = 2048;
pub const HEAD_LINES: usize = 20;

/// How single-symbol line grammars collect their comment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineCommentMode {
    /// Contiguous run of comment lines starting at line 1.
    #[default]
    Contiguous,
    /// Older behavior for `SymmetricLine` files: first commented line anywhere
    /// in the window, alone. `PrefixLine` ignores this setting.
    FirstMatch,
}

/// Read the head window of a file. Invalid UTF-8 is dropped, not replaced.
pub fn read_head(path: &Path) -> io::Result<String> {
    let f = File::open(path)?;
    let mut buf = Vec::with_capacity(HEAD_BYTES as usize);
    f.take(HEAD_BYTES).read_to_end(&mut buf)?;
    Ok(String::from_utf8_lossy(&buf).replace('\u{FFFD}', ""))
}

/// Apply `grammar` to the head of `content`.
pub fn extract_comment(content: &str, grammar: CommentGrammar, mode: LineCommentMode) -> Option<String> {
    let lines: Vec<&str> = content.lines().take(HEAD_LINES).collect();
    let found = match grammar {
        CommentGrammar::PrefixLine(sym) => contiguous_run(&lines, sym),
        CommentGrammar::SymmetricLine(sym) => match mode {
            LineCommentMode::Contiguous => contiguous_run(&lines, sym),
            LineCommentMode::FirstMatch => first_match(&lines, sym),
        },
        CommentGrammar::DelimitedBlock { open, close } => delimited_block(&lines, open, close),
    };
    found.filter(|c| !c.is_empty())
}

/// Automatic comment for a file on disk, or `None` when the extension has no
/// grammar, nothing was found, or the file could not be read.
pub fn file_comment(path: &Path, mode: LineCommentMode) -> Option<String> {
    let grammar = syntax::grammar_for_path(path)?;
    match read_head(path) {
        Ok(head) => extract_comment(&head, grammar, mode),
        Err(e) => {
            warn!("could not read {}: {}", path.display(), e);
            None
        }
    }
}

/* ----------------------------- grammars ----------------------------- */

fn contiguous_run(lines: &[&str], sym: &str) -> Option<String> {
    let segments: Vec<&str> = lines
        .iter()
        .map(|l| l.trim())
        .map_while(|t| t.strip_prefix(sym))
        .map(str::trim)
        .collect();
    if segments.iter().all(|s| s.is_empty()) {
        return None;
    }
    Some(segments.join("\n"))
}

fn first_match(lines: &[&str], sym: &str) -> Option<String> {
    lines
        .iter()
        .find_map(|l| l.trim().strip_prefix(sym))
        .map(|rest| rest.trim().to_string())
}

fn delimited_block(lines: &[&str], open: &str, close: &str) -> Option<String> {
    let mut parts: Vec<&str> = Vec::new();
    let mut opened = false;

    for line in lines {
        if !opened {
            let Some((_, after)) = line.split_once(open) else { continue };
            if let Some((inner, _)) = after.split_once(close) {
                return Some(inner.trim().to_string());
            }
            opened = true;
            push_trimmed(&mut parts, after);
        } else if let Some((before, _)) = line.split_once(close) {
            push_trimmed(&mut parts, before);
            return Some(parts.join("\n").trim().to_string());
        } else {
            parts.push(line.trim());
        }
    }

    if opened {
        debug!("unterminated `{}` block in head window", open);
    }
    None
}

// Delimiter lines contribute nothing when the remainder is blank.
fn push_trimmed<'a>(parts: &mut Vec<&'a str>, s: &'a str) {
    let t = s.trim();
    if !t.is_empty() {
        parts.push(t);
    }
}

/* ===================================== Tests ===================================== */
