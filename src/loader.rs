use crate::coder::ValueCoder;
use crate::directives;
use crate::document::Document;
use crate::error::{ConfigError, ParseResult};
use crate::fs::FileSystem;
use crate::line::{self, LineEvent, LineKind};
use crate::sources::{FileId, SourceFile, SourceGraph, SourceResolver};
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};

/// Forward-only load pass: reads the root file and every file it sources, feeding
/// each line through the classifier into the document model.
pub(crate) struct Loader<'a> {
    fs: &'a dyn FileSystem,
    coder: &'a dyn ValueCoder,
    resolver: SourceResolver,
    graph: SourceGraph,
    document: Document,
}

impl<'a> Loader<'a> {
    pub(crate) fn new(fs: &'a dyn FileSystem, coder: &'a dyn ValueCoder, max_depth: usize) -> Self {
        Self {
            fs,
            coder,
            resolver: SourceResolver::new(max_depth),
            graph: SourceGraph::new(),
            document: Document::new(),
        }
    }

    /// Load `root` and everything it sources
    pub(crate) fn load(
        mut self,
        root: &Path,
        base_dir: Option<&Path>,
    ) -> ParseResult<(SourceGraph, Document)> {
        self.load_file(root.to_path_buf(), base_dir)?;
        log::debug!(
            "loaded {} file(s), {} record(s) from {}",
            self.graph.len(),
            self.document.len(),
            root.display()
        );
        Ok((self.graph, self.document))
    }

    fn load_file(&mut self, path: PathBuf, base_dir: Option<&Path>) -> ParseResult<FileId> {
        self.resolver.begin_load(&path, base_dir)?;
        let result = self.read_and_parse(path);
        self.resolver.end_load();
        result
    }

    fn read_and_parse(&mut self, path: PathBuf) -> ParseResult<FileId> {
        // One buffer per path, however many times it is sourced
        let (id, lines) = match self.graph.find(&path) {
            Some(id) => {
                log::debug!("{} already loaded, parsing it again", path.display());
                let lines = self.graph.get(id).map(|f| f.lines.clone()).unwrap_or_default();
                (id, lines)
            }
            None => {
                let lines = self.fs.read_lines(&path)?;
                log::debug!("reading {} ({} lines)", path.display(), lines.len());
                let id = self.graph.push(SourceFile::new(path.clone(), lines.clone()));
                (id, lines)
            }
        };

        let failure = line::walk(&path, &lines, |event| match self.handle(event) {
            Ok(()) => ControlFlow::Continue(()),
            Err(err) if err.is_fatal() => ControlFlow::Break(err),
            Err(err) => {
                log::warn!("{}:{}: skipping line: {}", path.display(), event.index + 1, err);
                ControlFlow::Continue(())
            }
        })?;

        match failure {
            Some(err) => Err(err),
            None => Ok(id),
        }
    }

    fn handle(&mut self, event: &LineEvent<'_>) -> ParseResult<()> {
        let text = event.text;
        let doc = &mut self.document;

        match event.kind {
            LineKind::BlankOrComment | LineKind::SectionOpen | LineKind::SectionClose => {}
            LineKind::Setting => {
                let setting = directives::parse_setting(text, event.sections, self.coder)?;
                doc.insert_setting(setting);
            }
            LineKind::Variable => doc.push_variable(directives::parse_variable(text)?),
            LineKind::Monitor => doc.push_monitor(directives::parse_monitor(text)?),
            LineKind::Bind => doc.push_bind(directives::parse_bind(text)?),
            LineKind::Bezier => {
                doc.insert_bezier(directives::parse_bezier(text)?);
            }
            LineKind::Env => {
                doc.insert_env(directives::parse_env(text)?);
            }
            LineKind::Exec => doc.push_exec(directives::parse_exec(text)?),
            LineKind::WindowRule | LineKind::LayerRule => doc.count_ignored_rule(),
            LineKind::Source => {
                let raw = directives::parse_source(text)?;
                if raw.trim().is_empty() {
                    return Err(ConfigError::malformed("source", text, "empty path"));
                }
                let path = self.resolver.resolve_path(self.fs, raw);
                self.load_file(path, None)?;
            }
        }

        Ok(())
    }
}
