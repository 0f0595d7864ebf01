use alloc::format;
use alloc::string::{String, ToString};
use core::fmt::Debug;

use lite_combinator_core::{
    end_of_input, keep_left, run_with_options, ParseError, ParseResult, Parser, ParserOptions,
};

use crate::chars::spaces;

/// Runs `parser` over the whole of `text`. Trailing whitespace is allowed,
/// anything else left over is an error.
pub fn parse_complete<T: 'static>(parser: &Parser<T>, text: &str) -> Result<T, ParseError> {
    parse_complete_with_options(parser, text, Default::default())
}

pub fn parse_complete_with_options<T: 'static>(
    parser: &Parser<T>,
    text: &str,
    options: ParserOptions,
) -> Result<T, ParseError> {
    let complete = keep_left(keep_left(parser.clone(), spaces()), end_of_input());
    run_with_options(&complete, text, options).map(|(value, _)| value)
}

/// The value alone on success, the caret diagram on failure.
pub fn format_result<T: Debug>(result: &ParseResult<T>) -> String {
    match result {
        Ok((value, _)) => format!("{:?}", value),
        Err(err) => err.to_string(),
    }
}

#[cfg(feature = "std")]
pub fn print_result<T: Debug>(result: &ParseResult<T>) {
    println!("{}", format_result(result));
}
