use alloc::string::String;

/// Detached copy of where a failure happened, kept only for rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParserPosition {
    pub current_line: String,
    pub line: usize,
    pub column: usize,
}

/// A failed parse. `error` is the text of the deepest failing primitive,
/// `label` names the construct that was being attempted.
///
/// Displays as:
///
/// ```text
/// Line:0 Col:1 Error parsing AB
/// A|C
///  ^Unexpected '|'
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "Line:{} Col:{} Error parsing {label}\n{}\n{}^{error}",
    .position.line,
    .position.column,
    .position.current_line,
    padding(.position.column)
)]
pub struct ParseError {
    pub label: String,
    pub error: String,
    pub position: ParserPosition,
}

fn padding(column: usize) -> String {
    " ".repeat(column)
}

impl ParseError {
    pub fn new(label: impl Into<String>, error: impl Into<String>, position: ParserPosition) -> Self {
        Self {
            label: label.into(),
            error: error.into(),
            position,
        }
    }

    /// Keeps the text and position, swaps the label.
    pub fn relabel(self, label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..self
        }
    }
}
