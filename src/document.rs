// treenotes/src/document.rs

use anyhow::{Context, Result};
use std::{fs, path::Path};

pub const TITLE: &str = "# Project File Structure";

/// Full Markdown document for a rendered tree.
pub fn compose(lines: &[String]) -> String {
    let mut doc = String::with_capacity(lines.iter().map(|l| l.len() + 1).sum::<usize>() + 64);
    doc.push_str(TITLE);
    doc.push_str("\n\n```text\n");
    for l in lines {
        doc.push_str(l);
        doc.push('\n');
    }
    doc.push_str("```\n");
    doc
}

/// Write the document in one pass, creating parent dirs first.
pub fn write_document(lines: &[String], output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    fs::write(output_path, compose(lines))
        .with_context(|| format!("writing {}", output_path.display()))
}

/* ===================================== Tests ===================================== */
