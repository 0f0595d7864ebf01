use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use lite_combinator_core::{choice, literals, many, many1, map, satisfy, sequence, set_label, Parser};

literals! {
    pub digit_char("digit") => '0' ..= '9';
    pub hex_digit_char("hex digit") => '0' ..= '9' | 'a' ..= 'f' | 'A' ..= 'F';
}

/// Matches exactly `c`. The label is the character itself.
pub fn pchar(c: char) -> Parser<char> {
    satisfy(move |x| x == c, c.to_string())
}

/// Any one of `chars`. When none matches, the failure of the last one is
/// reported under the label `anyOf [...]`.
pub fn any_of(chars: &[char]) -> Parser<char> {
    let label = format!("anyOf {:?}", chars);
    set_label(choice(chars.iter().copied().map(pchar)), label)
}

pub fn whitespace_char() -> Parser<char> {
    satisfy(char::is_whitespace, "whitespace")
}

pub fn many_chars(parser: Parser<char>) -> Parser<String> {
    map(many(parser), |chars| chars.into_iter().collect())
}

pub fn many_chars1(parser: Parser<char>) -> Parser<String> {
    map(many1(parser), |chars| chars.into_iter().collect())
}

/// Matches `text` character by character, labeled with `text`.
pub fn pstring(text: &str) -> Parser<String> {
    let chars = sequence(text.chars().map(pchar));
    set_label(map(chars, |chars| chars.into_iter().collect()), text)
}

/// Zero or more whitespace characters, virtual newlines included.
pub fn spaces() -> Parser<Vec<char>> {
    many(whitespace_char())
}

pub fn spaces1() -> Parser<Vec<char>> {
    many1(whitespace_char())
}
