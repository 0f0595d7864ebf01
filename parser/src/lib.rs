#![cfg_attr(not(feature = "std"), no_std)]

//! Labeled parser combinators over an immutable, line/column tracking input.
//!
//! A [`Parser`] is a value: a shared parse function plus a label. Combinators
//! take parsers and return new ones without touching any input. Running a
//! parser threads an [`InputState`] through it and yields either the value
//! with the remaining input, or a [`ParseError`] carrying the label, the
//! message of the primitive that failed and where it failed.

extern crate alloc;

pub use paste;

pub use crate::error::{ParseError, ParserPosition};
pub use crate::input::{InputState, ParserOptions, Position, END_OF_FILE};
pub use crate::parser::{
    and_then, apply, between, bind, choice, choice_furthest, end_of_input, keep_left,
    keep_right, lazy, lift2, many, many1, map, opt, or_else, return_p, run, run_on_input,
    run_with_options, satisfy, sep_by, sep_by1, sequence, set_label, trace, ParseResult, Parser,
};

pub mod error;
pub mod input;
pub mod parser;
