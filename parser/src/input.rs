use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::error::{ParseError, ParserPosition};

/// Text reported by [`InputState::current_line`] once every line is consumed.
pub const END_OF_FILE: &str = "end of file";

/// Line and column of the next token, both zero based.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    pub fn next_column(&self) -> Self {
        Self {
            line: self.line,
            column: self.column + 1,
        }
    }

    pub fn next_line(&self) -> Self {
        Self {
            line: self.line + 1,
            column: 0,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ParserOptions {
    /// How many [`lazy`](crate::parser::lazy) parsers may be nested inside
    /// each other before the run fails. `None` disables the check.
    pub max_nest_level: Option<u32>,
}

impl Default for ParserOptions {
    fn default() -> Self {
        ParserOptions {
            max_nest_level: Some(100),
        }
    }
}

/// Immutable view of the source text and the position of the next token.
///
/// Reading never mutates a state: [`next_token`](Self::next_token) hands back
/// a fresh one. Cloning is cheap, the lines are shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputState {
    lines: Arc<[Vec<char>]>,
    position: Position,
    nest_level: u32,
    options: ParserOptions,
}

impl InputState {
    /// Splits `text` on `\r\n` / `\n`. Empty text has no lines at all.
    pub fn new(text: &str) -> Self {
        Self::with_options(text, ParserOptions::default())
    }

    pub fn with_options(text: &str, options: ParserOptions) -> Self {
        let lines: Vec<Vec<char>> = if text.is_empty() {
            Vec::new()
        } else {
            text.split('\n')
                .map(|line| line.strip_suffix('\r').unwrap_or(line).chars().collect())
                .collect()
        };
        Self {
            lines: lines.into(),
            position: Position::default(),
            nest_level: 0,
            options,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Reads one token. Past the last line this is `None` and the state is
    /// returned unchanged. The end of every line, the last one included,
    /// reads as a single `'\n'`.
    pub fn next_token(&self) -> (Self, Option<char>) {
        let Position { line, column } = self.position;
        match self.lines.get(line) {
            None => (self.clone(), None),
            Some(current) => match current.get(column) {
                Some(&c) => (self.at(self.position.next_column()), Some(c)),
                None => (self.at(self.position.next_line()), Some('\n')),
            },
        }
    }

    /// The line holding the next token, for diagnostics only.
    pub fn current_line(&self) -> String {
        match self.lines.get(self.position.line) {
            Some(line) => line.iter().collect(),
            None => String::from(END_OF_FILE),
        }
    }

    pub fn is_end(&self) -> bool {
        self.position.line >= self.lines.len()
    }

    pub fn to_parser_position(&self) -> ParserPosition {
        ParserPosition {
            current_line: self.current_line(),
            line: self.position.line,
            column: self.position.column,
        }
    }

    pub fn error_at(&self, label: &str, error: impl Into<String>) -> ParseError {
        ParseError::new(label, error, self.to_parser_position())
    }

    /// Enters one more level of nesting, failing once the configured limit is
    /// reached.
    pub fn nest(&self, label: &str) -> Result<Self, ParseError> {
        if Some(self.nest_level) == self.options().max_nest_level {
            log::debug!(
                "{}: exceeded nest level {} at Line:{} Col:{}",
                label,
                self.nest_level,
                self.position.line,
                self.position.column
            );
            Err(self.error_at(label, "Exceeded nest level"))
        } else {
            Ok(Self {
                nest_level: self.nest_level + 1,
                ..self.clone()
            })
        }
    }

    /// Same input and position, at the nesting depth of `outer`.
    pub fn leave(self, outer: &InputState) -> Self {
        Self {
            nest_level: outer.nest_level,
            ..self
        }
    }

    fn at(&self, position: Position) -> Self {
        Self {
            position,
            ..self.clone()
        }
    }
}

impl From<&str> for InputState {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}
