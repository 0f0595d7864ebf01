#![cfg_attr(not(feature = "std"), no_std)]

//! Character-level parsers and entry points built on
//! [`lite_combinator_core`]: characters, strings, whitespace, integers and
//! floats, plus whole-input parsing and rendering of results.

extern crate alloc;

#[cfg(test)]
#[macro_use]
extern crate assert_float_eq;

pub use lite_combinator_core::*;

pub use crate::chars::{
    any_of, digit_char, hex_digit_char, many_chars, many_chars1, pchar, pstring, spaces, spaces1,
    whitespace_char,
};
pub use crate::numbers::{pfloat, pint, pinteger, puint};
#[cfg(feature = "std")]
pub use crate::parse::print_result;
pub use crate::parse::{format_result, parse_complete, parse_complete_with_options};

pub mod chars;
pub mod numbers;

mod parse;
