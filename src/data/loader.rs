// ============================================================
// Layer 4 — Text Line Loader
// ============================================================
// Reads one or more plain-text files and returns their lines
// in order, as if the files were concatenated.
//
//   texts_a.txt  ─┐
//   texts_b.txt  ─┼─►  line 0, line 1, ..., line N
//   texts_c.txt  ─┘
//
// Unlike a document corpus, a line corpus is positional: line
// i of the texts must meet line i of the targets. Skipping an
// unreadable file would silently shift every later pair, so a
// missing file is an error, not a warning.
//
// Reference: Rust Book §9 (Error Handling)
//            Rust Book §12 (Reading a File)

use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::data::vocab::split_lines;
use crate::domain::traits::LineSource;

/// Loads lines from a list of text files.
/// Implements the LineSource trait from Layer 3.
#[derive(Debug, Clone)]
pub struct TextLineLoader {
    files: Vec<PathBuf>,
}

impl TextLineLoader {
    pub fn new<I, P>(files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self { files: files.into_iter().map(Into::into).collect() }
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }
}

impl LineSource for TextLineLoader {
    fn load_lines(&self) -> Result<Vec<String>> {
        let mut lines = Vec::new();

        for path in &self.files {
            let file_lines = read_lines(path)?;
            tracing::debug!("Read {} lines from '{}'", file_lines.len(), path.display());
            lines.extend(file_lines);
        }

        Ok(lines)
    }
}

fn read_lines(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Cannot read line file '{}'", path.display()))?;
    Ok(split_lines(&text))
}
