use crate::coder::{LooseCoder, ValueCoder};
use crate::directives::{Bezier, Binding, Env, Exec, Monitor, Setting, Variable};
use crate::document::Document;
use crate::error::{ConfigError, ParseResult};
use crate::fs::{DiskFs, FileSystem};
use crate::loader::Loader;
use crate::locator::{self, Location};
use crate::sources::{FileId, SourceFile, SourceGraph};
use crate::synthesizer::{self, INDENT};
use crate::types::Value;
use std::path::{Path, PathBuf};

/// Where Hyprland looks for its configuration
pub const DEFAULT_CONFIG_PATH: &str = "$HOME/.config/hypr/hyprland.conf";

/// Characters that would turn a written line into a brace, a comment or several lines
const LINE_BREAKERS: &[char] = &['{', '}', '#', '\n', '\r'];

/// Reject text the loader would not read back as the same single line
fn check_line(text: &str) -> ParseResult<()> {
    if text.contains(LINE_BREAKERS) {
        return Err(ConfigError::invalid_value(
            text,
            "text without '{', '}', '#' or line breaks",
        ));
    }
    Ok(())
}

/// Session options
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Write a file back to disk as soon as one of its lines changes
    pub autosave: bool,

    /// Base directory for resolving the root file's relative `source` paths
    /// (defaults to the root file's directory)
    pub base_dir: Option<PathBuf>,

    /// How deep `source` directives may nest before loading fails
    pub max_source_depth: usize,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            autosave: false,
            base_dir: None,
            max_source_depth: 50,
        }
    }
}

/// Anything [`Session::new_option`] can add to a configuration
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Setting(Setting),
    Bind(Binding),
    Env(Env),
    Bezier(Bezier),
    Monitor(Monitor),
    Variable(Variable),
    Exec(Exec),
}

macro_rules! impl_record_from {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for Record {
                fn from(value: $ty) -> Self {
                    Record::$variant(value)
                }
            }
        )*
    };
}

impl_record_from!(
    Setting(Setting),
    Bind(Binding),
    Env(Env),
    Bezier(Bezier),
    Monitor(Monitor),
    Variable(Variable),
    Exec(Exec),
);

/// A loaded configuration: the parsed document plus the editable source files it
/// came from.
///
/// Reads are answered from the document. Writes edit the line buffers in place,
/// re-locating the affected line from the current text every time, and are flushed
/// to disk immediately when `autosave` is set or later through [`save_all`](Self::save_all).
pub struct Session {
    root: PathBuf,
    options: SessionOptions,
    fs: Box<dyn FileSystem>,
    coder: Box<dyn ValueCoder>,
    graph: SourceGraph,
    document: Document,
}

impl Session {
    /// Load a configuration from disk with default options
    pub fn load(path: impl AsRef<Path>) -> ParseResult<Self> {
        Self::load_with_options(path, SessionOptions::default())
    }

    /// Load [`DEFAULT_CONFIG_PATH`]
    pub fn load_default() -> ParseResult<Self> {
        Self::load(DEFAULT_CONFIG_PATH)
    }

    /// Load a configuration from disk with custom options
    pub fn load_with_options(path: impl AsRef<Path>, options: SessionOptions) -> ParseResult<Self> {
        Self::load_with(path, options, DiskFs::new(), LooseCoder::new())
    }

    /// Load through a custom file system and value coder
    pub fn load_with(
        path: impl AsRef<Path>,
        options: SessionOptions,
        fs: impl FileSystem + 'static,
        coder: impl ValueCoder + 'static,
    ) -> ParseResult<Self> {
        let root = fs.expand_path(&path.as_ref().to_string_lossy());
        let mut session = Self {
            root,
            options,
            fs: Box::new(fs),
            coder: Box::new(coder),
            graph: SourceGraph::new(),
            document: Document::new(),
        };
        session.reload()?;
        Ok(session)
    }

    /// Re-read the root file and everything it sources, replacing the document and
    /// all line buffers. Unsaved edits are discarded.
    pub fn reload(&mut self) -> ParseResult<()> {
        let (graph, document) = Loader::new(
            self.fs.as_ref(),
            self.coder.as_ref(),
            self.options.max_source_depth,
        )
        .load(&self.root, self.options.base_dir.as_deref())?;

        self.graph = graph;
        self.document = document;
        Ok(())
    }

    pub fn root_path(&self) -> &Path {
        &self.root
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    pub fn set_autosave(&mut self, autosave: bool) {
        self.options.autosave = autosave;
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn graph(&self) -> &SourceGraph {
        &self.graph
    }

    pub fn files(&self) -> &[SourceFile] {
        self.graph.files()
    }

    pub fn file(&self, id: FileId) -> Option<&SourceFile> {
        self.graph.get(id)
    }

    /// Look up a setting by its full path
    pub fn get_option(&self, path: &str) -> Option<&Setting> {
        self.document.setting(path)
    }

    /// Look up a setting's value by its full path
    pub fn get_value(&self, path: &str) -> Option<&Value> {
        self.document.value(path)
    }

    /// Find the line currently owning `path` (a setting or a section)
    pub fn locate(&self, path: &str) -> ParseResult<Option<Location>> {
        locator::locate_path(&self.graph, path)
    }

    /// Change an existing setting and rewrite its line.
    ///
    /// Returns `Ok(false)` without touching anything when `path` is not a known
    /// setting. If the line cannot be found in the files the setting is appended to
    /// the root file instead. A value whose text contains a brace, `#` or a line
    /// break is rejected with [`ConfigError::InvalidValue`] and nothing changes.
    pub fn set_option(&mut self, path: &str, value: impl Into<Value>) -> ParseResult<bool> {
        if !self.document.contains(path) {
            return Ok(false);
        }
        let value = value.into();
        check_line(&self.coder.encode(&value))?;

        let Some(setting) = self.document.setting_mut(path) else {
            return Ok(false);
        };
        setting.value = value;
        let text = format!(
            "{}{}",
            INDENT.repeat(setting.depth()),
            setting.format_with(self.coder.as_ref())
        );

        let file = match locator::locate_path(&self.graph, path)? {
            Some(location) => {
                self.file_mut(location.file)?.replace_line(location.line, text);
                location.file
            }
            None => {
                log::warn!("'{}' not found in any file, appending to root", path);
                self.root_mut()?.push_line(text);
                FileId::ROOT
            }
        };

        self.persist(&[file])?;
        Ok(true)
    }

    /// Add any kind of record
    pub fn new_option(&mut self, record: impl Into<Record>) -> ParseResult<()> {
        match record.into() {
            Record::Setting(setting) => self.new_setting(setting),
            Record::Bind(bind) => self.new_bind(bind),
            Record::Env(env) => self.new_env(env),
            Record::Bezier(bezier) => self.new_bezier(bezier),
            Record::Monitor(monitor) => self.new_monitor(monitor),
            Record::Variable(variable) => self.new_variable(variable),
            Record::Exec(exec) => self.new_exec(exec),
        }
    }

    /// Add a setting as the first child of its section, creating missing sections.
    ///
    /// A setting that already exists is updated through [`set_option`](Self::set_option).
    pub fn new_setting(&mut self, setting: Setting) -> ParseResult<()> {
        if self.document.contains(&setting.path) {
            let Setting { path, value } = setting;
            return self.set_option(&path, value).map(|_| ());
        }

        let line = setting.format_with(self.coder.as_ref());
        check_line(&line)?;

        let sections: Vec<String> = setting.sections().into_iter().map(str::to_string).collect();
        let text = format!("{}{}", INDENT.repeat(setting.depth()), line);

        let mut touched = Vec::new();
        let parent = if sections.is_empty() {
            None
        } else {
            match locator::locate(&self.graph, &sections)? {
                Some(location) => Some(location),
                None => {
                    touched = synthesizer::ensure_sections(&mut self.graph, &sections)?;
                    locator::locate(&self.graph, &sections)?
                }
            }
        };

        match parent {
            Some(location) => {
                self.file_mut(location.file)?.insert_line(location.line + 1, text);
                touched.push(location.file);
            }
            None => {
                self.root_mut()?.push_line(text);
                touched.push(FileId::ROOT);
            }
        }

        log::debug!("added setting '{}'", setting.path);
        self.document.insert_setting(setting);
        self.persist(&touched)
    }

    /// Add a key binding after the first `bind` line
    pub fn new_bind(&mut self, bind: Binding) -> ParseResult<()> {
        self.insert_at_anchor("bind", bind.to_string())?;
        self.document.push_bind(bind);
        Ok(())
    }

    /// Add an env entry after the first `env` line
    pub fn new_env(&mut self, env: Env) -> ParseResult<()> {
        self.insert_at_anchor("env", env.to_string())?;
        self.document.insert_env(env);
        Ok(())
    }

    /// Add a bezier curve after the first bezier inside `animations`
    pub fn new_bezier(&mut self, bezier: Bezier) -> ParseResult<()> {
        self.insert_at_anchor("animations:bezier", bezier.to_string())?;
        self.document.insert_bezier(bezier);
        Ok(())
    }

    /// Add a monitor after the first `monitor` line
    pub fn new_monitor(&mut self, monitor: Monitor) -> ParseResult<()> {
        self.insert_at_anchor("monitor", monitor.to_string())?;
        self.document.push_monitor(monitor);
        Ok(())
    }

    /// Add an exec entry after the first line of the same keyword
    pub fn new_exec(&mut self, exec: Exec) -> ParseResult<()> {
        self.insert_at_anchor(exec.keyword(), exec.to_string())?;
        self.document.push_exec(exec);
        Ok(())
    }

    /// Append a variable definition to the root file
    pub fn new_variable(&mut self, variable: Variable) -> ParseResult<()> {
        let line = variable.to_string();
        check_line(&line)?;
        self.root_mut()?.push_line(line);
        self.document.push_variable(variable);
        self.persist(&[FileId::ROOT])
    }

    fn insert_at_anchor(&mut self, anchor: &str, line: String) -> ParseResult<()> {
        check_line(&line)?;
        let file = match locator::locate_path(&self.graph, anchor)? {
            Some(location) => {
                let depth = anchor.matches(':').count();
                let text = format!("{}{}", INDENT.repeat(depth), line);
                self.file_mut(location.file)?.insert_line(location.line + 1, text);
                location.file
            }
            None => {
                log::debug!("no '{}' anchor, appending to root", anchor);
                self.root_mut()?.push_line(line);
                FileId::ROOT
            }
        };
        self.persist(&[file])
    }

    /// Write one file to disk
    pub fn save(&mut self, id: FileId) -> ParseResult<()> {
        let fs = self.fs.as_ref();
        self.graph
            .get_mut(id)
            .ok_or_else(|| ConfigError::custom(format!("no file with id {}", id.0)))?
            .save(fs)
    }

    /// Write every file to disk
    pub fn save_all(&mut self) -> ParseResult<()> {
        let fs = self.fs.as_ref();
        for file in self.graph.iter_mut() {
            file.save(fs)?;
        }
        Ok(())
    }

    /// Files with unsaved changes
    pub fn modified_files(&self) -> Vec<&Path> {
        self.graph
            .files()
            .iter()
            .filter(|f| f.is_modified())
            .map(|f| f.path.as_path())
            .collect()
    }

    fn persist(&mut self, files: &[FileId]) -> ParseResult<()> {
        if !self.options.autosave {
            return Ok(());
        }
        let mut saved = Vec::with_capacity(files.len());
        for &id in files {
            if !saved.contains(&id) {
                self.save(id)?;
                saved.push(id);
            }
        }
        Ok(())
    }

    fn file_mut(&mut self, id: FileId) -> ParseResult<&mut SourceFile> {
        self.graph
            .get_mut(id)
            .ok_or_else(|| ConfigError::custom(format!("no file with id {}", id.0)))
    }

    fn root_mut(&mut self) -> ParseResult<&mut SourceFile> {
        self.file_mut(FileId::ROOT)
    }
}
