//! File access used by a session.
//!
//! The core never touches the filesystem directly; it reads and writes whole line
//! buffers through a [`FileSystem`]. [`DiskFs`] is the real one, [`MemoryFs`] keeps
//! files in memory and is handy for tests and benchmarks.

use crate::error::{ConfigError, ParseResult};
use crate::expand::expand_env;
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

pub trait FileSystem {
    /// Read a file as a list of lines without terminators
    fn read_lines(&self, path: &Path) -> ParseResult<Vec<String>>;

    /// Write `lines`, each followed by `\n`
    fn write_lines(&self, path: &Path, lines: &[String]) -> ParseResult<()>;

    /// Turn a path as written in a config file into a usable path
    fn expand_path(&self, raw: &str) -> PathBuf {
        PathBuf::from(expand_env(raw))
    }
}

fn join_lines(lines: &[String]) -> String {
    let mut content = String::with_capacity(lines.iter().map(|l| l.len() + 1).sum());
    for line in lines {
        content.push_str(line);
        content.push('\n');
    }
    content
}

/// The local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct DiskFs;

impl DiskFs {
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for DiskFs {
    fn read_lines(&self, path: &Path) -> ParseResult<Vec<String>> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::io(path.display().to_string(), e.to_string()))?;
        Ok(content.lines().map(str::to_string).collect())
    }

    fn write_lines(&self, path: &Path, lines: &[String]) -> ParseResult<()> {
        std::fs::write(path, join_lines(lines))
            .map_err(|e| ConfigError::io(path.display().to_string(), e.to_string()))
    }
}

/// In-memory files. Clones share the same storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryFs {
    files: Rc<RefCell<HashMap<PathBuf, String>>>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create or replace a file
    pub fn insert(&self, path: impl Into<PathBuf>, content: impl Into<String>) {
        self.files.borrow_mut().insert(path.into(), content.into());
    }

    /// Builder-style [`insert`](Self::insert)
    pub fn with_file(self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.insert(path, content);
        self
    }

    /// Current content of a file
    pub fn content(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files.borrow().get(path.as_ref()).cloned()
    }
}

impl FileSystem for MemoryFs {
    fn read_lines(&self, path: &Path) -> ParseResult<Vec<String>> {
        self.files
            .borrow()
            .get(path)
            .map(|content| content.lines().map(str::to_string).collect())
            .ok_or_else(|| ConfigError::io(path.display().to_string(), "no such file"))
    }

    fn write_lines(&self, path: &Path, lines: &[String]) -> ParseResult<()> {
        self.insert(path, join_lines(lines));
        Ok(())
    }
}
