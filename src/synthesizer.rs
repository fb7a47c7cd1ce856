use crate::error::{ConfigError, ParseResult};
use crate::locator::locate;
use crate::sources::{FileId, SourceGraph};

/// Indentation for one nesting level
pub const INDENT: &str = "    ";

/// Make sure every prefix of `segments` exists as a section, creating the missing ones.
///
/// A missing section is inserted as an empty `name {` / `}` pair right after its
/// parent's opening line. A missing top-level section is appended to the root file.
/// When a parent cannot be found the segment is skipped and later segments will not
/// find their parents either; that is logged, not reported.
///
/// Returns the files whose buffers changed, in the order they were first touched.
pub fn ensure_sections<S: AsRef<str>>(
    graph: &mut SourceGraph,
    segments: &[S],
) -> ParseResult<Vec<FileId>> {
    let mut touched = Vec::new();

    for (depth, segment) in segments.iter().enumerate() {
        let segment: &str = segment.as_ref();
        if locate(graph, &segments[..=depth])?.is_some() {
            continue;
        }

        let indent = INDENT.repeat(depth);
        let open = format!("{}{} {{", indent, segment);
        let close = format!("{}}}", indent);

        let file = if depth == 0 {
            let root = graph
                .root_mut()
                .ok_or_else(|| ConfigError::custom("source graph has no root file"))?;
            root.push_line(open);
            root.push_line(close);
            FileId::ROOT
        } else {
            let Some(parent) = locate(graph, &segments[..depth])? else {
                log::warn!("cannot create section '{}': parent section is missing", segment);
                continue;
            };
            let file = graph
                .get_mut(parent.file)
                .ok_or_else(|| ConfigError::custom("located file is not in the source graph"))?;
            file.insert_line(parent.line + 1, open);
            file.insert_line(parent.line + 2, close);
            parent.file
        };

        log::debug!("created section '{}' at depth {}", segment, depth);
        if !touched.contains(&file) {
            touched.push(file);
        }
    }

    Ok(touched)
}
