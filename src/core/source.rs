//! Pager content sources — a text file or a directory listing.
//!
//! Directory listings go through the [`ignore`] crate so `.gitignore` rules
//! and hidden-file filtering behave the way they do in other tools.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use unicode_width::UnicodeWidthStr;

use super::error::SourceError;

/// Tabs are expanded so every line's column count is its display width.
const TAB: &str = "    ";

/// Knobs for directory listings.
#[derive(Debug, Clone)]
pub struct ListingConfig {
    /// Maximum depth to descend (1 = immediate children only).
    pub max_depth: usize,
    pub show_hidden: bool,
    pub respect_gitignore: bool,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            max_depth: 3,
            show_hidden: false,
            respect_gitignore: true,
        }
    }
}

/// Where the pager's lines come from.
#[derive(Debug, Clone)]
pub enum ContentSource {
    File(PathBuf),
    Directory { root: PathBuf, listing: ListingConfig },
}

/// Loaded content plus a fingerprint used to detect mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Content {
    pub lines: Vec<String>,
    pub fingerprint: u64,
}

impl Content {
    pub fn new(lines: Vec<String>) -> Self {
        let fingerprint = fingerprint(&lines);
        Self { lines, fingerprint }
    }

    /// Widest line, in terminal columns (wide glyphs count twice).
    pub fn width(&self) -> usize {
        self.lines.iter().map(|l| l.width()).max().unwrap_or(0)
    }
}

impl ContentSource {
    /// Pick a source kind from what `path` is on disk.
    pub fn detect(path: &Path, listing: ListingConfig) -> Self {
        if path.is_dir() {
            ContentSource::Directory {
                root: path.to_path_buf(),
                listing,
            }
        } else {
            ContentSource::File(path.to_path_buf())
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            ContentSource::File(path) => path,
            ContentSource::Directory { root, .. } => root,
        }
    }

    pub fn load(&self) -> Result<Content, SourceError> {
        let lines = match self {
            ContentSource::File(path) => read_file_lines(path)?,
            ContentSource::Directory { root, listing } => list_directory(root, listing)?,
        };
        Ok(Content::new(lines))
    }
}

fn read_file_lines(path: &Path) -> Result<Vec<String>, SourceError> {
    let bytes = std::fs::read(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    // Binary or mis-encoded files still page; bad sequences become U+FFFD.
    let text = String::from_utf8_lossy(&bytes);
    Ok(text.lines().map(|l| l.replace('\t', TAB)).collect())
}

/// Render a directory as an indented listing, directories suffixed with `/`.
fn list_directory(root: &Path, listing: &ListingConfig) -> Result<Vec<String>, SourceError> {
    let walker = WalkBuilder::new(root)
        .max_depth(Some(listing.max_depth))
        .hidden(!listing.show_hidden)
        .git_ignore(listing.respect_gitignore)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    let mut lines = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|source| SourceError::Walk {
            path: root.to_path_buf(),
            source,
        })?;
        // The walker yields the root itself first.
        if entry.depth() == 0 {
            lines.push(format!("{}/", root.display()));
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
        let indent = "  ".repeat(entry.depth());
        if is_dir {
            lines.push(format!("{indent}{name}/"));
        } else {
            lines.push(format!("{indent}{name}"));
        }
    }
    Ok(lines)
}

fn fingerprint(lines: &[String]) -> u64 {
    let mut hasher = DefaultHasher::new();
    lines.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_lines_expand_tabs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "a\tb\nsecond line\n").unwrap();

        let content = ContentSource::File(path).load().unwrap();
        assert_eq!(content.lines, vec!["a    b".to_string(), "second line".to_string()]);
        assert_eq!(content.width(), 11);
    }

    #[test]
    fn width_counts_display_columns() {
        let content = Content::new(vec!["漢".repeat(30), "ascii".into()]);
        assert_eq!(content.width(), 60);
    }

    #[test]
    fn fingerprint_changes_with_content() {
        let a = Content::new(vec!["x".into()]);
        let b = Content::new(vec!["x".into()]);
        let c = Content::new(vec!["x".into(), "y".into()]);
        assert_eq!(a.fingerprint, b.fingerprint);
        assert_ne!(a.fingerprint, c.fingerprint);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = ContentSource::File(dir.path().join("nope.txt"));
        assert!(matches!(source.load(), Err(SourceError::Io { .. })));
    }

    #[test]
    fn directory_listing_is_indented_and_sorted() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        std::fs::write(dir.path().join("sub").join("inner.rs"), "").unwrap();
        std::fs::write(dir.path().join("a.txt"), "").unwrap();
        std::fs::write(dir.path().join(".hidden"), "").unwrap();

        let source = ContentSource::detect(dir.path(), ListingConfig::default());
        let lines = source.load().unwrap().lines;

        assert_eq!(lines.len(), 4);
        assert!(lines[0].ends_with('/'));
        assert_eq!(lines[1], "  a.txt");
        assert_eq!(lines[2], "  sub/");
        assert_eq!(lines[3], "    inner.rs");
    }

    #[test]
    fn listing_depth_is_respected() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        std::fs::write(dir.path().join("sub").join("inner.rs"), "").unwrap();

        let listing = ListingConfig {
            max_depth: 1,
            ..ListingConfig::default()
        };
        let lines = ContentSource::detect(dir.path(), listing).load().unwrap().lines;
        assert_eq!(lines.len(), 2);
    }
}
