use crate::error::{ConfigError, ParseResult};
use crate::fs::FileSystem;
use std::path::{Component, Path, PathBuf};

/// Index of a file in its [`SourceGraph`]. The root file is always `FileId(0)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(pub usize);

impl FileId {
    pub const ROOT: FileId = FileId(0);
}

/// One loaded file and its editable line buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub lines: Vec<String>,
    modified: bool,
}

impl SourceFile {
    pub fn new(path: impl Into<PathBuf>, lines: Vec<String>) -> Self {
        Self {
            path: path.into(),
            lines,
            modified: false,
        }
    }

    /// Replace the text of line `index`
    pub fn replace_line(&mut self, index: usize, text: String) {
        self.lines[index] = text;
        self.modified = true;
    }

    /// Insert a line before `index` (or at the end when `index == len`)
    pub fn insert_line(&mut self, index: usize, text: String) {
        self.lines.insert(index, text);
        self.modified = true;
    }

    pub fn push_line(&mut self, text: String) {
        self.lines.push(text);
        self.modified = true;
    }

    /// Whether the buffer changed since load or last save
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Write the buffer out and clear the modified flag
    pub fn save(&mut self, fs: &dyn FileSystem) -> ParseResult<()> {
        fs.write_lines(&self.path, &self.lines)?;
        self.modified = false;
        log::info!("saved {} ({} lines)", self.path.display(), self.lines.len());
        Ok(())
    }
}

/// Every file reached from the root through `source` directives, in discovery order
#[derive(Debug, Clone, Default)]
pub struct SourceGraph {
    files: Vec<SourceFile>,
}

impl SourceGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, file: SourceFile) -> FileId {
        self.files.push(file);
        FileId(self.files.len() - 1)
    }

    pub fn get(&self, id: FileId) -> Option<&SourceFile> {
        self.files.get(id.0)
    }

    pub fn get_mut(&mut self, id: FileId) -> Option<&mut SourceFile> {
        self.files.get_mut(id.0)
    }

    pub fn root(&self) -> Option<&SourceFile> {
        self.files.first()
    }

    pub fn root_mut(&mut self) -> Option<&mut SourceFile> {
        self.files.first_mut()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut SourceFile> {
        self.files.iter_mut()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FileId, &SourceFile)> {
        self.files.iter().enumerate().map(|(i, f)| (FileId(i), f))
    }

    pub fn files(&self) -> &[SourceFile] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Find a loaded file by path
    pub fn find(&self, path: &Path) -> Option<FileId> {
        self.files.iter().position(|f| f.path == path).map(FileId)
    }
}

/// Resolves `source` paths and bounds how deep includes may nest
pub struct SourceResolver {
    /// Directories of the files currently being loaded, innermost last
    loading_stack: Vec<PathBuf>,

    /// Maximum recursion depth
    max_depth: usize,
}

impl SourceResolver {
    pub fn new(max_depth: usize) -> Self {
        Self {
            loading_stack: Vec::new(),
            max_depth,
        }
    }

    /// Resolve a raw `source` value relative to the including file's directory
    pub fn resolve_path(&self, fs: &dyn FileSystem, raw: &str) -> PathBuf {
        let path = fs.expand_path(raw.trim());
        let path = match self.loading_stack.last() {
            Some(dir) if !path.is_absolute() => dir.join(path),
            _ => path,
        };
        path.components()
            .filter(|c| !matches!(c, Component::CurDir))
            .collect()
    }

    /// Begin loading a file (checks depth)
    pub fn begin_load(&mut self, path: &Path, base_dir: Option<&Path>) -> ParseResult<()> {
        if self.loading_stack.len() >= self.max_depth {
            return Err(ConfigError::source_depth(
                path.display().to_string(),
                self.max_depth,
            ));
        }

        let dir = base_dir
            .map(Path::to_path_buf)
            .or_else(|| path.parent().map(Path::to_path_buf))
            .unwrap_or_default();
        self.loading_stack.push(dir);
        Ok(())
    }

    /// End loading a file
    pub fn end_load(&mut self) {
        self.loading_stack.pop();
    }

    pub fn depth(&self) -> usize {
        self.loading_stack.len()
    }
}
