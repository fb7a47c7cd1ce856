//! Path locator: finds the physical line that owns a colon-separated path.
//!
//! Nothing is cached between calls. Each lookup replays [`line::walk`] over the
//! current buffers, so it stays correct after any number of insertions.

use crate::error::ParseResult;
use crate::line::{self, LineKind};
use crate::sources::{FileId, SourceGraph};
use std::ops::ControlFlow;

/// A line in the source graph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub file: FileId,
    /// Zero-based index in that file's line buffer
    pub line: usize,
}

/// Split a colon-separated option path into its segments
pub fn split_path(path: &str) -> Vec<&str> {
    path.split(':').collect()
}

fn matches<S: AsRef<str>>(stack: &[String], leaf: Option<&str>, target: &[S]) -> bool {
    let len = stack.len() + usize::from(leaf.is_some());
    len == target.len()
        && stack
            .iter()
            .map(String::as_str)
            .chain(leaf)
            .zip(target)
            .all(|(have, want)| have == AsRef::<str>::as_ref(want))
}

/// Find the line owning `target` (section names, optionally ending in a key).
///
/// A section path resolves to its opening line; a key path resolves to the line
/// declaring that key. Files are searched in graph order and the first match wins.
/// An empty target never matches.
pub fn locate<S: AsRef<str>>(graph: &SourceGraph, target: &[S]) -> ParseResult<Option<Location>> {
    if target.is_empty() {
        return Ok(None);
    }

    for (id, file) in graph.iter() {
        let found = line::walk(&file.path, &file.lines, |event| {
            let hit = match event.kind {
                LineKind::SectionOpen => matches(event.sections.names(), None, target),
                LineKind::SectionClose => false,
                _ => matches(event.sections.names(), Some(line::key_of(event.text)), target),
            };
            if hit {
                ControlFlow::Break(event.index)
            } else {
                ControlFlow::Continue(())
            }
        })?;

        if let Some(index) = found {
            log::debug!(
                "located '{}' at {}:{}",
                target.iter().map(AsRef::<str>::as_ref).collect::<Vec<&str>>().join(":"),
                file.path.display(),
                index + 1
            );
            return Ok(Some(Location { file: id, line: index }));
        }
    }

    Ok(None)
}

/// [`locate`] for a colon-separated path string
pub fn locate_path(graph: &SourceGraph, path: &str) -> ParseResult<Option<Location>> {
    locate(graph, &split_path(path))
}
