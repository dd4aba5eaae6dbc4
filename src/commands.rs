// treenotes/src/commands.rs

use anyhow::{anyhow, bail, Context, Result};
use log::info;
use std::{env, path::PathBuf};

use crate::{
    config::RunConfig,
    document,
    notes::{NoteSources, NoteTable},
    tree_view,
};

#[derive(Debug)]
enum Command {
    Tree(RunConfig),
    Help,
}

pub fn run_cli() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    match parse_args(&args)? {
        Command::Tree(cfg) => generate(&cfg),
        Command::Help => {
            print_help();
            Ok(())
        }
    }
}

/// Render the tree for `cfg.root` and write it to `cfg.output`.
pub fn generate(cfg: &RunConfig) -> Result<()> {
    let directory = NoteTable::load_sidecar(&cfg.root, &cfg.sidecar_name);
    info!(
        "{} manual notes, {} directory notes",
        cfg.manual.len(),
        directory.len()
    );
    let notes = NoteSources::new(cfg.manual.clone(), directory);

    let lines = tree_view::render_tree(&cfg.root, &notes, &cfg.render)
        .context("building project tree")?;
    document::write_document(&lines, &cfg.output)?;
    println!("Project structure written to {}", cfg.output.display());
    Ok(())
}

fn parse_args(args: &[String]) -> Result<Command> {
    let mut cfg = RunConfig::default();
    let mut cli_notes = NoteTable::new();
    let mut positional: Vec<&str> = Vec::new();

    for arg in args {
        let a = arg.trim();
        match a {
            "help" | "-h" | "--help" => return Ok(Command::Help),
            "--legacy-line-comments" => cfg.legacy_line_comments(),
            _ if a.starts_with("--") => apply_flag(&mut cfg, &mut cli_notes, a)?,
            _ => positional.push(a),
        }
    }

    // `tree` is the subcommand only when a root follows it; alone it is a root
    if positional.len() > 1 && positional[0] == "tree" {
        positional.remove(0);
    }
    match positional.as_slice() {
        [] => {}
        [root] => cfg.root = PathBuf::from(root),
        [_, extra, ..] => bail!("unexpected argument `{}` (see `treenotes help`)", extra),
    }

    cfg.manual.merge(cli_notes);
    Ok(Command::Tree(cfg))
}

fn apply_flag(cfg: &mut RunConfig, cli_notes: &mut NoteTable, flag: &str) -> Result<()> {
    let (key, val) = flag
        .split_once('=')
        .ok_or_else(|| anyhow!("flag `{}` needs a value (`{}=...`)", flag, flag))?;
    match key {
        "--out" => cfg.output = PathBuf::from(val),
        "--notes" => {
            let file = NoteTable::load_json(&PathBuf::from(val))?;
            cfg.manual.merge(file);
        }
        "--note" => {
            let (path, desc) = val
                .split_once('=')
                .ok_or_else(|| anyhow!("--note expects PATH=DESCRIPTION, got `{}`", val))?;
            cli_notes.insert(path, desc);
        }
        "--exclude" => cfg.render.exclude_patterns.push(val.to_string()),
        "--width" => {
            cfg.render.column_width = val
                .parse::<usize>()
                .with_context(|| format!("--width expects a number, got `{}`", val))?;
        }
        "--sidecar" => cfg.sidecar_name = val.to_string(),
        _ => bail!("unknown flag `{}` (see `treenotes help`)", key),
    }
    Ok(())
}

fn print_help() {
    println!(
r#"
treenotes: annotated project tree

USAGE:
    treenotes [tree] [ROOT] [FLAGS]
                          # Write ROOT's tree (default ./) to docs/PROJECT_STRUCTURE.md
    treenotes help        # Show this message

A lone `tree` is read as ROOT; use `treenotes tree tree` for the subcommand form.

FLAGS:
    --out=PATH            # Output document (parent dirs are created)
    --notes=FILE.json     # Extra manual notes: {{"path/file": "note", "dir/": "note"}}
    --note=PATH=DESC      # One manual note; repeatable, wins over --notes
    --exclude=PATTERN     # Gitignore-style pattern to hide; repeatable
    --width=N             # Column where notes start (default 20)
    --sidecar=NAME        # Directory-notes file at ROOT (default dir_comments.json)
    --legacy-line-comments
                          # `//`-style files: take the first commented line anywhere
                          # in the head instead of the leading run

Files get their leading comment; manual notes fill in when there is none.
Directories use manual notes, then the sidecar file. `.git` is never shown.
Set RUST_LOG=debug for walk details.
"#    );
}

/* ===================================== Tests ===================================== */
