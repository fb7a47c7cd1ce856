//! Line classifier and section tracker.
//!
//! There is no parse tree. Every pass over a file (the initial load as well as each
//! path lookup during mutation) goes through [`walk`], so both see exactly the same
//! classification and the same section nesting.

use crate::error::{ConfigError, ParseResult};
use std::ops::ControlFlow;
use std::path::Path;

/// The syntactic kind of one physical line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    BlankOrComment,
    SectionOpen,
    SectionClose,
    Variable,
    Monitor,
    Source,
    Exec,
    Env,
    Setting,
    Bind,
    Bezier,
    WindowRule,
    LayerRule,
}

/// Directive keywords, matched by prefix in this order. First match wins.
const DIRECTIVE_KEYWORDS: &[(&str, LineKind)] = &[
    ("monitor", LineKind::Monitor),
    ("source", LineKind::Source),
    ("exec", LineKind::Exec),
    ("env", LineKind::Env),
    ("bind", LineKind::Bind),
    ("bezier", LineKind::Bezier),
    ("windowrule", LineKind::WindowRule),
    ("layerrule", LineKind::LayerRule),
];

/// Strip a trailing `#` comment, trim, and pad the first `=` with single spaces.
///
/// Returns an empty string for blank and comment-only lines.
pub fn normalize(raw: &str) -> String {
    let line = raw.split('#').next().unwrap_or("").trim();

    match line.split_once('=') {
        Some((key, value)) => format!("{} = {}", key.trim(), value.trim()),
        None => line.to_string(),
    }
}

/// Classify an already normalized line
pub fn classify(line: &str) -> LineKind {
    if line.is_empty() {
        LineKind::BlankOrComment
    } else if line.contains('{') {
        LineKind::SectionOpen
    } else if line.contains('}') {
        LineKind::SectionClose
    } else if line.starts_with('$') {
        LineKind::Variable
    } else {
        DIRECTIVE_KEYWORDS
            .iter()
            .find(|(keyword, _)| line.starts_with(keyword))
            .map(|(_, kind)| *kind)
            .unwrap_or(LineKind::Setting)
    }
}

/// The name a section-open line introduces (text left of `{`)
pub fn section_name(line: &str) -> &str {
    line.split('{').next().unwrap_or("").trim()
}

/// The key of a `key = value` line, or the whole line if it has no `=`
pub fn key_of(line: &str) -> &str {
    line.split_once(" = ").map_or(line, |(key, _)| key)
}

/// Stack of currently open section names
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionStack {
    names: Vec<String>,
}

impl SectionStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a section event for one normalized line.
    ///
    /// An open pushes its name; a close pops once per `}` on the line. Other kinds
    /// leave the stack alone. Popping past the bottom is an error and leaves the
    /// stack untouched.
    pub fn apply(&mut self, kind: LineKind, line: &str) -> Result<(), String> {
        match kind {
            LineKind::SectionOpen => {
                self.names.push(section_name(line).to_string());
                Ok(())
            }
            LineKind::SectionClose => {
                let count = line.matches('}').count();
                if count > self.names.len() {
                    return Err(format!(
                        "closing {} section(s) with only {} open",
                        count,
                        self.names.len()
                    ));
                }
                self.names.truncate(self.names.len() - count);
                Ok(())
            }
            _ => Ok(()),
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn depth(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Fully qualified key for a setting named `key` at the current depth
    pub fn qualify(&self, key: &str) -> String {
        if self.names.is_empty() {
            key.to_string()
        } else {
            format!("{}:{}", self.names.join(":"), key)
        }
    }
}

/// One non-blank line as seen by a [`walk`] visitor
#[derive(Debug)]
pub struct LineEvent<'a> {
    /// Zero-based index in the file's line buffer
    pub index: usize,
    pub kind: LineKind,
    /// The normalized text
    pub text: &'a str,
    /// Section stack after this line's own open/close has been applied
    pub sections: &'a SectionStack,
}

/// Walk `lines`, tracking section nesting and handing every non-blank line to `visit`.
///
/// The visitor can stop the walk early by returning `ControlFlow::Break`, whose value is
/// returned. An unmatched `}` aborts the walk with a structural error naming `origin`.
pub fn walk<S, B, F>(origin: &Path, lines: &[S], mut visit: F) -> ParseResult<Option<B>>
where
    S: AsRef<str>,
    F: FnMut(&LineEvent<'_>) -> ControlFlow<B>,
{
    let mut sections = SectionStack::new();

    for (index, raw) in lines.iter().enumerate() {
        let text = normalize(raw.as_ref());
        let kind = classify(&text);
        if kind == LineKind::BlankOrComment {
            continue;
        }

        sections
            .apply(kind, &text)
            .map_err(|message| {
                ConfigError::structural(origin.display().to_string(), index + 1, message)
            })?;

        let event = LineEvent {
            index,
            kind,
            text: &text,
            sections: &sections,
        };
        if let ControlFlow::Break(found) = visit(&event) {
            return Ok(Some(found));
        }
    }

    if !sections.is_empty() {
        log::warn!(
            "{}: {} section(s) left open at end of file",
            origin.display(),
            sections.depth()
        );
    }

    Ok(None)
}
