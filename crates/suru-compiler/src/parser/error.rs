//! Syntax error records and rendering.

use annotate_snippets::{AnnotationKind, Level, Renderer, Snippet};
use serde::Serialize;

/// A syntax error at a 1-based source position.
///
/// The parser collects these while recovering; it never aborts on the first
/// error. The `Display` form is the plain `Line L:C: MESSAGE` layout the
/// `run` pipeline prints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyntaxError {
    pub line: u32,
    pub column: u32,
    pub message: String,
}

impl SyntaxError {
    pub fn new(line: u32, column: u32, message: impl Into<String>) -> SyntaxError {
        SyntaxError {
            line,
            column,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Line {}:{}: {}", self.line, self.column, self.message)
    }
}

impl std::error::Error for SyntaxError {}

/// Render syntax errors using annotate-snippets for nice diagnostic output.
pub fn render_errors(source: &str, errors: &[SyntaxError], path: Option<&str>) -> String {
    if errors.is_empty() {
        return String::new();
    }

    let renderer = Renderer::plain();
    let mut output = String::new();

    for (i, err) in errors.iter().enumerate() {
        let start = offset_of(source, err.line, err.column);
        // Zero-width spans render poorly; extend to at least one byte.
        let end = (start + 1).min(source.len()).max(start);

        let mut snippet = Snippet::source(source)
            .line_start(1)
            .annotation(AnnotationKind::Primary.span(start..end).label(&err.message));
        if let Some(p) = path {
            snippet = snippet.path(p);
        }

        let report = [Level::ERROR.primary_title(&err.message).element(snippet)];

        if i > 0 {
            output.push('\n');
        }
        output.push_str(&renderer.render(&report).to_string());
    }

    output
}

/// Byte offset of a 1-based line/column position, clamped to the source.
fn offset_of(source: &str, line: u32, column: u32) -> usize {
    let mut remaining_lines = line.saturating_sub(1);
    let mut offset = 0;
    for (i, b) in source.bytes().enumerate() {
        if remaining_lines == 0 {
            break;
        }
        if b == b'\n' {
            remaining_lines -= 1;
            offset = i + 1;
        }
    }
    let line_rest = &source[offset..];
    let line_len = line_rest.find('\n').unwrap_or(line_rest.len());
    offset + (column.saturating_sub(1) as usize).min(line_len)
}
