use alloc::format;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use crate::error::ParseError;
use crate::input::{InputState, ParserOptions, Position};

pub type ParseResult<T> = Result<(T, InputState), ParseError>;

type ParseFn<T> = Arc<dyn Fn(&InputState) -> ParseResult<T> + Send + Sync>;

pub const UNKNOWN_LABEL: &str = "unknown";
pub const END_OF_INPUT_LABEL: &str = "end of input";
pub const NO_MORE_INPUT: &str = "No more input";

/// A labeled parse function.
///
/// Built once, run any number of times against any number of inputs, from
/// any thread. Cloning shares the function.
pub struct Parser<T> {
    parse: ParseFn<T>,
    label: String,
}

impl<T> Clone for Parser<T> {
    fn clone(&self) -> Self {
        Parser {
            parse: Arc::clone(&self.parse),
            label: self.label.clone(),
        }
    }
}

impl<T> fmt::Debug for Parser<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parser").field("label", &self.label).finish()
    }
}

impl<T> Parser<T> {
    pub fn new<F>(label: impl Into<String>, parse: F) -> Self
    where
        F: Fn(&InputState) -> ParseResult<T> + Send + Sync + 'static,
    {
        Parser {
            parse: Arc::new(parse),
            label: label.into(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn parse(&self, input: &InputState) -> ParseResult<T> {
        (self.parse)(input)
    }
}

impl<T: 'static> Parser<T> {
    pub fn map<U: 'static, F: Fn(T) -> U + Send + Sync + 'static>(self, f: F) -> Parser<U> {
        map(self, f)
    }

    pub fn bind<U: 'static, F: Fn(T) -> Parser<U> + Send + Sync + 'static>(
        self,
        f: F,
    ) -> Parser<U> {
        bind(self, f)
    }

    pub fn and_then<U: 'static>(self, other: Parser<U>) -> Parser<(T, U)> {
        and_then(self, other)
    }

    pub fn or_else(self, other: Parser<T>) -> Parser<T> {
        or_else(self, other)
    }

    pub fn keep_left<U: 'static>(self, other: Parser<U>) -> Parser<T> {
        keep_left(self, other)
    }

    pub fn keep_right<U: 'static>(self, other: Parser<U>) -> Parser<U> {
        keep_right(self, other)
    }

    pub fn set_label(self, label: impl Into<String>) -> Parser<T> {
        set_label(self, label)
    }
}

fn token_error(input: &InputState, label: &str, token: Option<char>) -> ParseError {
    match token {
        None => input.error_at(label, NO_MORE_INPUT),
        Some(c) => input.error_at(label, format!("Unexpected '{}'", c)),
    }
}

/// Reads one token and accepts it if `predicate` holds. Every other parser is
/// built on top of this one.
pub fn satisfy<P>(predicate: P, label: impl Into<String>) -> Parser<char>
where
    P: Fn(char) -> bool + Send + Sync + 'static,
{
    let label = label.into();
    Parser::new(label.clone(), move |input| match input.next_token() {
        (remaining, Some(c)) if predicate(c) => Ok((c, remaining)),
        (_, token) => Err(token_error(input, &label, token)),
    })
}

/// Succeeds with `()` only once every line, the virtual newline of the last
/// one included, is consumed.
pub fn end_of_input() -> Parser<()> {
    Parser::new(END_OF_INPUT_LABEL, |input| match input.next_token() {
        (_, None) => Ok(((), input.clone())),
        (_, token) => Err(token_error(input, END_OF_INPUT_LABEL, token)),
    })
}

pub fn return_p<T: Clone + Send + Sync + 'static>(value: T) -> Parser<T> {
    Parser::new(UNKNOWN_LABEL, move |input| Ok((value.clone(), input.clone())))
}

pub fn map<T, U, F>(parser: Parser<T>, f: F) -> Parser<U>
where
    T: 'static,
    U: 'static,
    F: Fn(T) -> U + Send + Sync + 'static,
{
    let label = parser.label.clone();
    Parser::new(label, move |input| {
        let (value, remaining) = parser.parse(input)?;
        Ok((f(value), remaining))
    })
}

/// Runs `parser`, feeds its value to `f` and runs the resulting parser on the
/// remaining input.
pub fn bind<T, U, F>(parser: Parser<T>, f: F) -> Parser<U>
where
    T: 'static,
    U: 'static,
    F: Fn(T) -> Parser<U> + Send + Sync + 'static,
{
    Parser::new(UNKNOWN_LABEL, move |input| {
        let (value, remaining) = parser.parse(input)?;
        f(value).parse(&remaining)
    })
}

pub fn and_then<T: 'static, U: 'static>(first: Parser<T>, second: Parser<U>) -> Parser<(T, U)> {
    let label = format!("{} andThen {}", first.label, second.label);
    Parser::new(label, move |input| {
        let (a, remaining) = first.parse(input)?;
        let (b, remaining) = second.parse(&remaining)?;
        Ok(((a, b), remaining))
    })
}

/// Tries `first`; if it fails, runs `second` on the same input.
pub fn or_else<T: 'static>(first: Parser<T>, second: Parser<T>) -> Parser<T> {
    let label = format!("{} orElse {}", first.label, second.label);
    Parser::new(label, move |input| {
        first.parse(input).or_else(|_| second.parse(input))
    })
}

fn no_alternative<T: 'static>() -> Parser<T> {
    Parser::new("choice", |input| {
        let (_, token) = input.next_token();
        Err(token_error(input, "choice", token))
    })
}

/// First success wins. When every alternative fails, the last one's failure is
/// reported. An empty list fails like a character that never matches.
pub fn choice<T: 'static>(parsers: impl IntoIterator<Item = Parser<T>>) -> Parser<T> {
    parsers
        .into_iter()
        .reduce(or_else)
        .unwrap_or_else(no_alternative)
}

/// Like [`choice`], but when every alternative fails the failure that got the
/// furthest into the input is reported. Ties go to the later alternative.
pub fn choice_furthest<T: 'static>(parsers: impl IntoIterator<Item = Parser<T>>) -> Parser<T> {
    let parsers: Vec<Parser<T>> = parsers.into_iter().collect();
    let label = parsers
        .iter()
        .map(Parser::label)
        .collect::<Vec<_>>()
        .join(" orElse ");
    Parser::new(label.clone(), move |input| {
        let mut furthest: Option<ParseError> = None;
        for parser in &parsers {
            match parser.parse(input) {
                Ok(result) => return Ok(result),
                Err(err) => {
                    let reach = (err.position.line, err.position.column);
                    if furthest
                        .as_ref()
                        .map_or(true, |f| reach >= (f.position.line, f.position.column))
                    {
                        furthest = Some(err);
                    }
                }
            }
        }
        Err(furthest.unwrap_or_else(|| token_error(input, &label, input.next_token().1)))
    })
}

fn repeat<T>(parser: &Parser<T>, mut input: InputState, mut values: Vec<T>) -> (Vec<T>, InputState) {
    while let Ok((value, remaining)) = parser.parse(&input) {
        // a success that consumed nothing would repeat forever
        if remaining.position() == input.position() {
            break;
        }
        values.push(value);
        input = remaining;
    }
    (values, input)
}

/// Zero or more. Never fails.
pub fn many<T: 'static>(parser: Parser<T>) -> Parser<Vec<T>> {
    let label = format!("many {}", parser.label);
    Parser::new(label, move |input| {
        Ok(repeat(&parser, input.clone(), Vec::new()))
    })
}

/// One or more. Fails with `parser`'s own failure when nothing matches.
pub fn many1<T: 'static>(parser: Parser<T>) -> Parser<Vec<T>> {
    let label = format!("many1 {}", parser.label);
    Parser::new(label, move |input| {
        let (first, remaining) = parser.parse(input)?;
        Ok(repeat(&parser, remaining, vec![first]))
    })
}

pub fn opt<T: 'static>(parser: Parser<T>) -> Parser<Option<T>> {
    let label = format!("opt {}", parser.label);
    Parser::new(label, move |input| match parser.parse(input) {
        Ok((value, remaining)) => Ok((Some(value), remaining)),
        Err(_) => Ok((None, input.clone())),
    })
}

/// Runs every parser in order, stopping at the first failure.
pub fn sequence<T: 'static>(parsers: impl IntoIterator<Item = Parser<T>>) -> Parser<Vec<T>> {
    let parsers: Vec<Parser<T>> = parsers.into_iter().collect();
    Parser::new("sequence", move |input| {
        let mut values = Vec::with_capacity(parsers.len());
        let mut input = input.clone();
        for parser in &parsers {
            let (value, remaining) = parser.parse(&input)?;
            values.push(value);
            input = remaining;
        }
        Ok((values, input))
    })
}

/// Renames `parser`. Failures get the new label; their text and position are
/// kept.
pub fn set_label<T: 'static>(parser: Parser<T>, label: impl Into<String>) -> Parser<T> {
    let label = label.into();
    Parser::new(label.clone(), move |input| {
        parser.parse(input).map_err(|err| err.relabel(label.as_str()))
    })
}

pub fn keep_left<T: 'static, U: 'static>(first: Parser<T>, second: Parser<U>) -> Parser<T> {
    map(and_then(first, second), |(a, _)| a)
}

pub fn keep_right<T: 'static, U: 'static>(first: Parser<T>, second: Parser<U>) -> Parser<U> {
    map(and_then(first, second), |(_, b)| b)
}

pub fn between<A: 'static, T: 'static, B: 'static>(
    open: Parser<A>,
    parser: Parser<T>,
    close: Parser<B>,
) -> Parser<T> {
    keep_right(open, keep_left(parser, close))
}

/// One or more `parser` separated by `separator`.
pub fn sep_by1<T: 'static, S: 'static>(parser: Parser<T>, separator: Parser<S>) -> Parser<Vec<T>> {
    let rest = many(keep_right(separator, parser.clone()));
    map(and_then(parser, rest), |(first, rest)| {
        let mut values = Vec::with_capacity(rest.len() + 1);
        values.push(first);
        values.extend(rest);
        values
    })
}

/// Zero or more `parser` separated by `separator`. Never fails.
pub fn sep_by<T: 'static, S: 'static>(parser: Parser<T>, separator: Parser<S>) -> Parser<Vec<T>> {
    map(opt(sep_by1(parser, separator)), Option::unwrap_or_default)
}

/// Applies the function parsed by `fp` to the value parsed by `xp`.
pub fn apply<F, T, U>(fp: Parser<F>, xp: Parser<T>) -> Parser<U>
where
    F: Fn(T) -> U + 'static,
    T: 'static,
    U: 'static,
{
    map(and_then(fp, xp), |(f, x)| f(x))
}

pub fn lift2<A, B, U, F>(f: F, first: Parser<A>, second: Parser<B>) -> Parser<U>
where
    A: 'static,
    B: 'static,
    U: 'static,
    F: Fn(A, B) -> U + Send + Sync + 'static,
{
    map(and_then(first, second), move |(a, b)| f(a, b))
}

/// Defers building the parser to run time, so a grammar can refer to itself.
///
/// Each run counts as one level of nesting, see
/// [`ParserOptions::max_nest_level`].
pub fn lazy<T, F>(build: F) -> Parser<T>
where
    T: 'static,
    F: Fn() -> Parser<T> + Send + Sync + 'static,
{
    Parser::new("lazy", move |input| {
        let nested = input.nest("lazy")?;
        let (value, remaining) = build().parse(&nested)?;
        Ok((value, remaining.leave(input)))
    })
}

/// Logs entry and outcome of `parser` at debug level.
pub fn trace<T: fmt::Debug + 'static>(parser: Parser<T>) -> Parser<T> {
    let label = parser.label.clone();
    Parser::new(label.clone(), move |input| {
        let Position { line, column } = input.position();
        log::debug!("{}: Starting at Line:{} Col:{}", label, line, column);
        let result = parser.parse(input);
        match &result {
            Ok((value, _)) => log::debug!("{}: Success {:?}", label, value),
            Err(err) => log::debug!("{}: Failure {}", label, err.error),
        }
        result
    })
}

pub fn run_on_input<T>(parser: &Parser<T>, input: &InputState) -> ParseResult<T> {
    let Position { line, column } = input.position();
    log::trace!("running {} at Line:{} Col:{}", parser.label, line, column);
    parser.parse(input)
}

pub fn run<T>(parser: &Parser<T>, text: &str) -> ParseResult<T> {
    run_on_input(parser, &InputState::new(text))
}

pub fn run_with_options<T>(parser: &Parser<T>, text: &str, options: ParserOptions) -> ParseResult<T> {
    run_on_input(parser, &InputState::with_options(text, options))
}

/// Declares single-character parsers by the characters they accept.
///
/// ```
/// lite_combinator_core::literals! {
///     pub vowel("vowel") => 'a' | 'e' | 'i' | 'o' | 'u';
///     pub octal_digit("octal digit") => '0' ..= '7';
/// }
///
/// let (c, _) = lite_combinator_core::run(&vowel(), "ex").unwrap();
/// assert_eq!(c, 'e');
/// ```
#[macro_export]
macro_rules! literals {
    (
        $(
            $( #[ $attr:meta ] )*
            $vis:vis $name:ident ( $label:expr ) => $($($value:literal)..=+)|+;
        )*
    ) => {
        $(
            $crate::literals!{
                IMPL
                $( #[ $attr ] )*
                $vis $name ( $label ) => $($($value)..=+)|+
            }
        )*
    };
    (
        IMPL
        $( #[ $attr:meta ] )*
        $vis:vis $name:ident ( $label:expr ) => $($($value:literal)..=+)|+
    ) => (
        $crate::paste::paste! {
            fn [< $name _predicate >](c: char) -> bool {
                match c {
                    $($($value)..=+)|+ => true,
                    _ => false
                }
            }

            $( #[ $attr ] )*
            $vis fn $name() -> $crate::parser::Parser<char> {
                $crate::parser::satisfy([< $name _predicate >], $label)
            }
        }
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParserPosition;
    use alloc::string::ToString;

    fn pchar(c: char) -> Parser<char> {
        satisfy(move |x| x == c, c.to_string())
    }

    fn pstr(s: &'static str) -> Parser<Vec<char>> {
        set_label(sequence(s.chars().map(pchar)), s)
    }

    fn at(line: usize, column: usize, current_line: &str) -> ParserPosition {
        ParserPosition {
            current_line: current_line.into(),
            line,
            column,
        }
    }

    crate::literals! {
        digit("digit") => '0' ..= '9';
        sign("sign") => '+' | '-';
    }

    #[test]
    fn satisfy_accepts_and_advances() {
        let (c, rest) = run(&pchar('A'), "ABC").unwrap();
        assert_eq!(c, 'A');
        assert_eq!(rest.position(), Position::new(0, 1));
    }

    #[test]
    fn satisfy_reports_unexpected_before_advance() {
        assert_eq!(
            run(&pchar('A'), "ZBC"),
            Err(ParseError::new("A", "Unexpected 'Z'", at(0, 0, "ZBC")))
        );
    }

    #[test]
    fn satisfy_reports_no_more_input() {
        assert_eq!(
            run(&pchar('A'), ""),
            Err(ParseError::new("A", NO_MORE_INPUT, at(0, 0, "end of file")))
        );
    }

    #[test]
    fn satisfy_sees_virtual_newline() {
        let (c, rest) = run(&keep_right(pchar('a'), pchar('\n')), "a").unwrap();
        assert_eq!(c, '\n');
        assert_eq!(rest.position(), Position::new(1, 0));
    }

    #[test]
    fn and_then_sequences() {
        let parser = and_then(pchar('A'), pchar('B'));
        assert_eq!(parser.label(), "A andThen B");
        let (value, rest) = run(&parser, "AB").unwrap();
        assert_eq!(value, ('A', 'B'));
        assert_eq!(rest.position(), Position::new(0, 2));
    }

    #[test]
    fn and_then_propagates_second_failure() {
        assert_eq!(
            run(&and_then(pchar('A'), pchar('B')), "AZ"),
            Err(ParseError::new("B", "Unexpected 'Z'", at(0, 1, "AZ")))
        );
    }

    #[test]
    fn or_else_backtracks() {
        let parser = or_else(pstr("A-1"), pstr("A-2"));
        assert_eq!(parser.label(), "A-1 orElse A-2");
        let (value, rest) = run(&parser, "A-2").unwrap();
        assert_eq!(value, vec!['A', '-', '2']);
        assert_eq!(rest.position(), Position::new(0, 3));
    }

    #[test]
    fn or_else_matches_second_alone_on_failure() {
        let first = pstr("AB");
        let second = pstr("AC");
        for text in &["AC", "AD", "", "B"] {
            assert_eq!(
                run(&or_else(first.clone(), second.clone()), text),
                run(&second, text)
            );
        }
    }

    #[test]
    fn choice_reports_last_failure() {
        let parser = choice(vec![pchar('a'), pchar('b'), pstr("cd").map(|_| 'c')]);
        assert_eq!(parser.label(), "a orElse b orElse cd");
        assert_eq!(run(&parser, "b").unwrap().0, 'b');
        assert_eq!(
            run(&parser, "ce"),
            Err(ParseError::new("cd", "Unexpected 'e'", at(0, 1, "ce")))
        );
    }

    #[test]
    fn choice_of_nothing_fails() {
        let parser: Parser<char> = choice(Vec::new());
        assert_eq!(
            run(&parser, "x"),
            Err(ParseError::new("choice", "Unexpected 'x'", at(0, 0, "x")))
        );
    }

    #[test]
    fn choice_furthest_reports_deepest_failure() {
        let parser = choice_furthest(vec![pstr("abc"), pstr("x")]);
        assert_eq!(
            run(&parser, "abd"),
            Err(ParseError::new("abc", "Unexpected 'd'", at(0, 2, "abd")))
        );
        assert_eq!(run(&parser, "x").unwrap().0, vec!['x']);
    }

    #[test]
    fn choice_furthest_tie_goes_to_later() {
        let parser = choice_furthest(vec![pstr("ab"), pstr("ac")]);
        assert_eq!(parser.label(), "ab orElse ac");
        assert_eq!(
            run(&parser, "ad"),
            Err(ParseError::new("ac", "Unexpected 'd'", at(0, 1, "ad")))
        );
    }

    #[test]
    fn many_collects_and_never_fails() {
        let (values, rest) = run(&many(digit()), "12a").unwrap();
        assert_eq!(values, vec!['1', '2']);
        assert_eq!(rest.position(), Position::new(0, 2));

        let (values, rest) = run(&many(digit()), "ABC").unwrap();
        assert!(values.is_empty());
        assert_eq!(rest.position(), Position::new(0, 0));
    }

    #[test]
    fn many_stops_without_progress() {
        let (values, rest) = run(&many(opt(digit())), "1x").unwrap();
        assert_eq!(values, vec![Some('1')]);
        assert_eq!(rest.position(), Position::new(0, 1));
    }

    #[test]
    fn many1_propagates_failure() {
        assert_eq!(
            run(&many1(digit()), "ABC"),
            Err(ParseError::new("digit", "Unexpected 'A'", at(0, 0, "ABC")))
        );
        assert_eq!(run(&many1(digit()), "42").unwrap().0, vec!['4', '2']);
    }

    #[test]
    fn opt_keeps_state_on_failure() {
        let input = InputState::new("-1");
        let (value, rest) = run_on_input(&opt(sign()), &input).unwrap();
        assert_eq!(value, Some('-'));
        assert_eq!(rest.position(), Position::new(0, 1));

        let (value, rest) = run_on_input(&opt(sign()), &rest).unwrap();
        assert_eq!(value, None);
        assert_eq!(rest.position(), Position::new(0, 1));
    }

    #[test]
    fn sequence_short_circuits() {
        assert_eq!(
            run(&sequence(vec![pchar('a'), pchar('b'), pchar('c')]), "abX"),
            Err(ParseError::new("c", "Unexpected 'X'", at(0, 2, "abX")))
        );
    }

    #[test]
    fn set_label_rewrites_only_label() {
        let digits = set_label(choice("0123456789".chars().map(pchar)), "digit");
        assert_eq!(
            run(&digits, "|ABC"),
            Err(ParseError::new("digit", "Unexpected '|'", at(0, 0, "|ABC")))
        );
        assert_eq!(run(&digits, "7").unwrap().0, '7');
    }

    #[test]
    fn bind_threads_state() {
        let repeated = bind(digit(), pchar);
        assert_eq!(repeated.label(), UNKNOWN_LABEL);
        assert_eq!(run(&repeated, "33").unwrap().0, '3');
        assert_eq!(
            run(&repeated, "34"),
            Err(ParseError::new("3", "Unexpected '4'", at(0, 1, "34")))
        );
    }

    #[test]
    fn return_p_consumes_nothing() {
        let (value, rest) = run(&return_p(7), "abc").unwrap();
        assert_eq!(value, 7);
        assert_eq!(rest.position(), Position::new(0, 0));
    }

    #[test]
    fn between_and_sep_by() {
        let list = between(pchar('['), sep_by(digit(), pchar(',')), pchar(']'));
        assert_eq!(run(&list, "[1,2,3]").unwrap().0, vec!['1', '2', '3']);
        assert_eq!(run(&list, "[]").unwrap().0, Vec::<char>::new());
        assert_eq!(
            run(&list, "[1,2"),
            Err(ParseError::new("]", "Unexpected '\n'", at(0, 4, "[1,2")))
        );
    }

    #[test]
    fn sep_by1_requires_one() {
        assert_eq!(
            run(&sep_by1(digit(), pchar(';')), ";"),
            Err(ParseError::new("digit", "Unexpected ';'", at(0, 0, ";")))
        );
        let (values, rest) = run(&sep_by1(digit(), pchar(';')), "1;2;").unwrap();
        assert_eq!(values, vec!['1', '2']);
        assert_eq!(rest.position(), Position::new(0, 3));
    }

    #[test]
    fn apply_and_lift2_combine_values() {
        let value = |c: char| c.to_digit(10).unwrap();
        let add = lift2(move |a, b| value(a) + value(b), digit(), digit());
        assert_eq!(run(&add, "34").unwrap().0, 7);

        let double = apply(return_p(|x: u32| x * 2), digit().map(value));
        assert_eq!(run(&double, "4").unwrap().0, 8);
    }

    #[test]
    fn end_of_input_after_virtual_newline() {
        let parser = keep_left(keep_left(pchar('a'), pchar('\n')), end_of_input());
        assert_eq!(run(&parser, "a").unwrap().0, 'a');
        assert_eq!(
            run(&keep_left(pchar('a'), end_of_input()), "ab"),
            Err(ParseError::new(END_OF_INPUT_LABEL, "Unexpected 'b'", at(0, 1, "ab")))
        );
    }

    fn nested() -> Parser<usize> {
        or_else(
            between(pchar('('), lazy(nested), pchar(')')).map(|depth| depth + 1),
            return_p(0),
        )
    }

    #[test]
    fn lazy_allows_recursion() {
        let (depth, rest) = run(&nested(), "((()))").unwrap();
        assert_eq!(depth, 3);
        assert_eq!(rest.position(), Position::new(0, 6));
    }

    #[test]
    fn lazy_respects_nest_level() {
        let options = ParserOptions {
            max_nest_level: Some(2),
        };
        let parser = keep_left(lazy(nested), end_of_input());
        assert!(run_with_options(&parser, "(())\n", options).is_err());
        assert_eq!(
            run_with_options(&lazy(nested), "((", options),
            Ok((0, InputState::with_options("((", options)))
        );
        assert_eq!(
            run_with_options(&keep_left(lazy(nested), pchar('\n')), "()", options)
                .unwrap()
                .0,
            1
        );
    }

    #[test]
    fn trace_passes_result_through() {
        let parser = trace(pchar('A'));
        assert_eq!(parser.label(), "A");
        assert_eq!(run(&parser, "A").unwrap().0, 'A');
        assert!(run(&parser, "B").is_err());
    }

    #[cfg(feature = "std")]
    mod capture {
        use std::string::{String, ToString};
        use std::sync::{Mutex, Once};
        use std::vec::Vec;

        struct Capture(Mutex<Vec<(log::Level, String)>>);

        impl log::Log for Capture {
            fn enabled(&self, _metadata: &log::Metadata<'_>) -> bool {
                true
            }

            fn log(&self, record: &log::Record<'_>) {
                if let Ok(mut records) = self.0.lock() {
                    records.push((record.level(), record.args().to_string()));
                }
            }

            fn flush(&self) {}
        }

        static LOGGER: Capture = Capture(Mutex::new(Vec::new()));
        static INIT: Once = Once::new();

        pub(super) fn install() {
            INIT.call_once(|| {
                log::set_logger(&LOGGER).unwrap();
                log::set_max_level(log::LevelFilter::Trace);
            });
        }

        /// Records mentioning `needle`; other tests log concurrently.
        pub(super) fn records_with(needle: &str) -> Vec<(log::Level, String)> {
            LOGGER
                .0
                .lock()
                .unwrap()
                .iter()
                .filter(|(_, message)| message.contains(needle))
                .cloned()
                .collect()
        }
    }

    #[cfg(feature = "std")]
    #[test]
    fn trace_logs_start_and_outcome() {
        use log::Level;

        capture::install();
        let parser = trace(satisfy(|c| c == 'Q', "traced Q"));
        assert_eq!(run(&parser, "Q").unwrap().0, 'Q');
        assert!(run(&parser, "x").is_err());

        let strings = |records: &[(Level, &str)]| -> Vec<(Level, String)> {
            records.iter().map(|(l, m)| (*l, m.to_string())).collect()
        };
        assert_eq!(
            capture::records_with("traced Q"),
            strings(&[
                (Level::Trace, "running traced Q at Line:0 Col:0"),
                (Level::Debug, "traced Q: Starting at Line:0 Col:0"),
                (Level::Debug, "traced Q: Success 'Q'"),
                (Level::Trace, "running traced Q at Line:0 Col:0"),
                (Level::Debug, "traced Q: Starting at Line:0 Col:0"),
                (Level::Debug, "traced Q: Failure Unexpected 'x'"),
            ])
        );
    }

    #[cfg(feature = "std")]
    #[test]
    fn shared_across_threads() {
        let parser = many1(digit());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let parser = parser.clone();
                std::thread::spawn(move || run(&parser, &format!("{}{}x", i, i)).map(|(v, _)| v))
            })
            .collect();
        for (i, handle) in handles.into_iter().enumerate() {
            let digit = core::char::from_digit(i as u32, 10).unwrap();
            assert_eq!(handle.join().unwrap(), Ok(vec![digit, digit]));
        }
    }

    #[test]
    fn running_twice_gives_same_result() {
        let parser = and_then(many(digit()), opt(sign()));
        assert_eq!(run(&parser, "12+"), run(&parser, "12+"));
    }
}
