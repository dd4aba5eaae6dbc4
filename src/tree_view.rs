// treenotes/src/tree_view.rs

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use log::{debug, warn};
use std::{
    collections::BTreeSet,
    fs, io,
    path::{Path, PathBuf},
};

use crate::{
    error::TreeError,
    extract::LineCommentMode,
    notes::NoteSources,
    util,
};

pub const BRANCH: &str = "├── ";
pub const LAST_BRANCH: &str = "└── ";
pub const PIPE: &str = "│   ";
pub const BLANK: &str = "    ";

pub const DEFAULT_COLUMN_WIDTH: usize = 20;
pub const DEFAULT_EXCLUDED: &[&str] = &[".git"];

#[derive(Clone, Debug)]
pub struct RenderOptions {
    /// Names (without the directory `/`) are padded to this many columns before ` # note`.
    pub column_width: usize,
    pub line_mode: LineCommentMode,
    /// Exact relative paths never shown.
    pub excluded: BTreeSet<String>,
    /// Gitignore-style patterns, matched against relative paths.
    pub exclude_patterns: Vec<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            column_width: DEFAULT_COLUMN_WIDTH,
            line_mode: LineCommentMode::default(),
            excluded: DEFAULT_EXCLUDED.iter().map(|s| s.to_string()).collect(),
            exclude_patterns: Vec::new(),
        }
    }
}

/// One node as it is about to be printed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreeEntry {
    pub name: String,
    pub is_dir: bool,
    /// Accumulated `│   ` / four-space prefix from the ancestors.
    pub prefix: String,
    pub is_last: bool,
    pub comment: Option<String>,
}

impl TreeEntry {
    pub fn label(&self) -> String {
        if self.is_dir { format!("{}/", self.name) } else { self.name.clone() }
    }

    pub fn render(&self, column_width: usize) -> String {
        let branch = if self.is_last { LAST_BRANCH } else { BRANCH };
        let label = self.label();
        let mut line = format!("{}{}{}", self.prefix, branch, label);
        if let Some(c) = &self.comment {
            line.push_str(&" ".repeat(util::pad_to(&self.name, column_width)));
            line.push_str(" # ");
            line.push_str(&util::flatten_newlines(c));
        }
        line
    }

    /// Prefix handed to this entry's children.
    pub fn child_prefix(&self) -> String {
        format!("{}{}", self.prefix, if self.is_last { BLANK } else { PIPE })
    }
}

/// Render the annotated tree under `root`, root line first.
pub fn render_tree(root: &Path, notes: &NoteSources, opts: &RenderOptions) -> Result<Vec<String>, TreeError> {
    if !root.exists() {
        return Err(TreeError::RootNotFound(root.to_path_buf()));
    }
    let root = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());
    if !root.is_dir() {
        return Err(TreeError::RootNotDir(root));
    }

    let walker = Walker {
        root: &root,
        notes,
        opts,
        exclusions: Exclusions::build(&root, opts)?,
    };
    let top = walker
        .children(&root)
        .map_err(|source| TreeError::ReadRoot { path: root.clone(), source })?;

    let mut lines = vec![format!("{}/", util::root_name(&root))];
    walker.walk(top, "", &mut lines);
    Ok(lines)
}

/* ----------------------------- walk ----------------------------- */

struct Child {
    name: String,
    path: PathBuf,
    rel: String,
    is_dir: bool,
    // symlinked dirs are listed but not entered
    descend: bool,
}

struct Walker<'a> {
    root: &'a Path,
    notes: &'a NoteSources,
    opts: &'a RenderOptions,
    exclusions: Exclusions,
}

impl Walker<'_> {
    fn walk(&self, children: Vec<Child>, prefix: &str, out: &mut Vec<String>) {
        let total = children.len();
        for (i, child) in children.into_iter().enumerate() {
            let comment = if child.is_dir {
                self.notes.dir_note(&child.rel).map(str::to_string)
            } else {
                self.notes.file_note(&child.path, &child.rel, self.opts.line_mode)
            };
            let entry = TreeEntry {
                name: child.name,
                is_dir: child.is_dir,
                prefix: prefix.to_string(),
                is_last: i + 1 == total,
                comment,
            };
            out.push(entry.render(self.opts.column_width));

            if !(child.is_dir && child.descend) {
                continue;
            }
            match self.children(&child.path) {
                Ok(kids) => self.walk(kids, &entry.child_prefix(), out),
                Err(e) => warn!("could not list {}: {}", child.path.display(), e),
            }
        }
    }

    /// Visible children of `dir`: excluded paths removed, directories first,
    /// then case-insensitive by name.
    fn children(&self, dir: &Path) -> io::Result<Vec<Child>> {
        debug!("listing {}", dir.display());
        let mut items = Vec::new();
        for dent in fs::read_dir(dir)? {
            let dent = match dent {
                Ok(d) => d,
                Err(e) => {
                    warn!("skipping entry in {}: {}", dir.display(), e);
                    continue;
                }
            };
            let path = dent.path();
            let name = dent.file_name().to_string_lossy().into_owned();
            let is_dir = path.is_dir();
            let is_link = dent.file_type().map(|t| t.is_symlink()).unwrap_or(false);
            let rel = util::normalize_rel(self.root, &path);

            if self.exclusions.is_excluded(&rel, is_dir) {
                continue;
            }
            items.push(Child { name, path, rel, is_dir, descend: is_dir && !is_link });
        }

        items.sort_by(|a, b| {
            (!a.is_dir, a.name.to_lowercase(), &a.name).cmp(&(!b.is_dir, b.name.to_lowercase(), &b.name))
        });
        Ok(items)
    }
}

struct Exclusions {
    paths: BTreeSet<String>,
    patterns: Option<Gitignore>,
}

impl Exclusions {
    fn build(root: &Path, opts: &RenderOptions) -> Result<Self, TreeError> {
        let patterns = if opts.exclude_patterns.is_empty() {
            None
        } else {
            let mut gb = GitignoreBuilder::new(root);
            for pat in &opts.exclude_patterns {
                gb.add_line(None, pat)
                    .map_err(|source| TreeError::BadPattern { pattern: pat.clone(), source })?;
            }
            let gi = gb.build().map_err(|source| TreeError::BadPattern {
                pattern: opts.exclude_patterns.join(", "),
                source,
            })?;
            Some(gi)
        };
        Ok(Self { paths: opts.excluded.clone(), patterns })
    }

    fn is_excluded(&self, rel: &str, is_dir: bool) -> bool {
        if self.paths.contains(rel) {
            return true;
        }
        self.patterns
            .as_ref()
            .is_some_and(|gi| gi.matched(Path::new(rel), is_dir).is_ignore())
    }
}

/* ===================================== Tests ===================================== */

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notes::NoteTable;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str, body: &str) {
        let p = root.join(rel);
        if let Some(parent) = p.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(p, body).unwrap();
    }

    fn render(root: &Path, notes: &NoteSources) -> Vec<String> {
        render_tree(root, notes, &RenderOptions::default()).unwrap()
    }

    /// Strip padding so assertions don't depend on column math.
    fn squash(line: &str) -> String {
        line.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn readme_example_tree() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "a.py", "# first\n# second\nimport os\n");
        fs::create_dir(tmp.path().join("b")).unwrap();

        let notes = NoteSources::new(NoteTable::from_pairs([("b/", "desc")]), NoteTable::new());
        let lines = render(tmp.path(), &notes);

        assert_eq!(lines.len(), 3);
        assert!(lines[0].ends_with('/'));
        // directories sort ahead of files
        assert_eq!(squash(&lines[1]), "├── b/ # desc");
        assert_eq!(squash(&lines[2]), "└── a.py # first second");
    }

    #[test]
    fn padding_aligns_notes() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "main.py", "# entry\n");
        let lines = render(tmp.path(), &NoteSources::default());
        assert_eq!(lines[1], format!("└── main.py{} # entry", " ".repeat(13)));
    }

    #[test]
    fn directory_padding_measured_on_name() {
        let e = TreeEntry {
            name: "b".into(),
            is_dir: true,
            prefix: String::new(),
            is_last: true,
            comment: Some("desc".into()),
        };
        assert_eq!(e.render(20), format!("└── b/{} # desc", " ".repeat(19)));
    }

    #[test]
    fn entries_without_notes_have_no_separator() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "data.bin", "\0\0");
        let lines = render(tmp.path(), &NoteSources::default());
        assert_eq!(lines[1], "└── data.bin");
    }

    #[test]
    fn dirs_first_then_case_insensitive() {
        let tmp = TempDir::new().unwrap();
        for f in ["b.txt", "A.txt", "c.txt"] {
            touch(tmp.path(), f, "");
        }
        for d in ["zeta", "Alpha"] {
            fs::create_dir(tmp.path().join(d)).unwrap();
        }
        let lines = render(tmp.path(), &NoteSources::default());
        let names: Vec<String> = lines[1..].iter().map(|l| squash(l)).collect();
        assert_eq!(
            names,
            vec!["├── Alpha/", "├── zeta/", "├── A.txt", "├── b.txt", "└── c.txt"]
        );
    }

    #[test]
    fn prefixes_follow_last_sibling() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "first/inner.txt", "");
        touch(tmp.path(), "second/deep/leaf.txt", "");

        let lines = render(tmp.path(), &NoteSources::default());
        assert_eq!(
            &lines[1..],
            &[
                "├── first/",
                "│   └── inner.txt",
                "└── second/",
                "    └── deep/",
                "        └── leaf.txt",
            ]
        );
    }

    #[test]
    fn git_dir_excluded_and_last_computed_after_filter() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), ".git/HEAD", "ref: refs/heads/main\n");
        fs::create_dir(tmp.path().join("src")).unwrap();

        let lines = render(tmp.path(), &NoteSources::default());
        assert_eq!(&lines[1..], &["└── src/"]);
        assert!(lines.iter().all(|l| !l.contains(".git")));
    }

    #[test]
    fn nested_git_is_only_excluded_at_root_path() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "vendor/.git/HEAD", "");
        let lines = render(tmp.path(), &NoteSources::default());
        assert!(lines.iter().any(|l| l.contains(".git/")));
    }

    #[test]
    fn pattern_exclusions_apply_at_depth() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "src/cache.pyc", "");
        touch(tmp.path(), "src/keep.py", "");
        touch(tmp.path(), "build/out.txt", "");

        let opts = RenderOptions {
            exclude_patterns: vec!["*.pyc".into(), "build/".into()],
            ..Default::default()
        };
        let lines = render_tree(tmp.path(), &NoteSources::default(), &opts).unwrap();
        let all = lines.join("\n");
        assert!(all.contains("keep.py"));
        assert!(!all.contains("cache.pyc"));
        assert!(!all.contains("build"));
    }

    #[test]
    fn directories_ignore_file_contents_and_use_tables() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "docs/guide.md", "<!-- user guide -->\n");
        touch(tmp.path(), "lib/x.py", "");

        let notes = NoteSources::new(
            NoteTable::from_pairs([("docs/", "manual docs")]),
            NoteTable::from_pairs([("docs/", "sidecar docs"), ("lib/", "library")]),
        );
        let lines: Vec<String> = render(tmp.path(), &notes).iter().map(|l| squash(l)).collect();
        assert_eq!(lines[1], "├── docs/ # manual docs");
        assert_eq!(lines[2], "│ └── guide.md # user guide");
        assert_eq!(lines[3], "└── lib/ # library");
        assert_eq!(lines[4], "└── x.py");
    }

    #[test]
    fn manual_file_note_is_flattened() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "src/main.py", "print('hi')\n");
        let notes = NoteSources::new(
            NoteTable::from_pairs([("src/main.py", "entry\npoint")]),
            NoteTable::new(),
        );
        let lines = render(tmp.path(), &notes);
        assert_eq!(squash(&lines[2]), "└── main.py # entry point");
    }

    #[test]
    fn missing_root_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let err = render_tree(&tmp.path().join("nope"), &NoteSources::default(), &RenderOptions::default())
            .unwrap_err();
        assert!(matches!(err, TreeError::RootNotFound(_)));
    }

    #[test]
    fn file_root_is_rejected() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "f.txt", "");
        let err = render_tree(&tmp.path().join("f.txt"), &NoteSources::default(), &RenderOptions::default())
            .unwrap_err();
        assert!(matches!(err, TreeError::RootNotDir(_)));
    }

    #[test]
    fn entry_render_long_names_keep_one_space() {
        let e = TreeEntry {
            name: "a_really_long_file_name.txt".into(),
            is_dir: false,
            prefix: PIPE.into(),
            is_last: false,
            comment: Some("x".into()),
        };
        assert_eq!(e.render(20), "│   ├── a_really_long_file_name.txt # x");
        assert_eq!(e.child_prefix(), format!("{PIPE}{PIPE}"));
    }
}
