use alloc::string::String;

use lite_combinator_core::{and_then, map, opt, set_label, Parser};
use num_traits::{PrimInt, WrappingAdd, WrappingMul, WrappingSub};

use crate::chars::{digit_char, many_chars1, pchar};

/// `n` as any primitive integer, `i8` and `u8` included.
fn small<N: PrimInt>(n: u8) -> N {
    (0..n).fold(N::zero(), |acc, _| acc + N::one())
}

/// Value of a run of ASCII digits. Overflow wraps.
fn digits_value<N>(digits: &str) -> N
where
    N: PrimInt + WrappingAdd + WrappingMul,
{
    let ten: N = small(10);
    digits.bytes().fold(N::zero(), |acc, b| {
        acc.wrapping_mul(&ten).wrapping_add(&small(b - b'0'))
    })
}

fn digits() -> Parser<String> {
    many_chars1(digit_char())
}

/// An optional `-` followed by digits, labeled `integer`.
pub fn pinteger<N>() -> Parser<N>
where
    N: PrimInt + WrappingAdd + WrappingMul + WrappingSub + 'static,
{
    let parser = and_then(opt(pchar('-')), digits());
    let value = map(parser, |(sign, digits)| {
        let magnitude: N = digits_value(&digits);
        match sign {
            Some(_) => N::zero().wrapping_sub(&magnitude),
            None => magnitude,
        }
    });
    set_label(value, "integer")
}

pub fn pint() -> Parser<i64> {
    pinteger()
}

pub fn puint() -> Parser<u64> {
    set_label(map(digits(), |digits| digits_value(&digits)), "unsigned integer")
}

/// `-`, digits, `.`, digits; no exponent. Labeled `float`.
pub fn pfloat() -> Parser<f64> {
    let parser = and_then(and_then(and_then(opt(pchar('-')), digits()), pchar('.')), digits());
    let value = map(parser, |(((sign, whole), _), fraction)| {
        let numerator = whole
            .bytes()
            .chain(fraction.bytes())
            .fold(0f64, |acc, b| acc * 10.0 + f64::from(b - b'0'));
        let scale = fraction.bytes().fold(1f64, |acc, _| acc * 10.0);
        let magnitude = numerator / scale;
        match sign {
            Some(_) => -magnitude,
            None => magnitude,
        }
    });
    set_label(value, "float")
}
