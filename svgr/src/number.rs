//! Numeric literals of path data.
//!
//! Numbers need no separator when the boundary is unambiguous: a sign after a
//! digit run or a second decimal point starts the next number, so `10-20` is
//! `10`, `-20` and `.2.3` is `0.2`, `0.3`.

use nom::{
    IResult,
    branch::alt,
    character::complete::{char, digit0, digit1, one_of},
    combinator::{map_res, opt, recognize},
    sequence::{pair, tuple},
};

fn sign(input: &str) -> IResult<&str, char> {
    one_of("+-")(input)
}

///`1`, `1.`, `1.5` or `.5`. A decimal point is only taken once, so scanning
///stops in front of a second one.
fn mantissa(input: &str) -> IResult<&str, &str> {
    alt((
	recognize(pair(digit1, opt(pair(char('.'), digit0)))),
	recognize(pair(char('.'), digit1)),
    ))(input)
}

///`e5`, `E-3`. Not consumed unless at least one digit follows.
fn exponent(input: &str) -> IResult<&str, &str> {
    recognize(tuple((one_of("eE"), opt(sign), digit1)))(input)
}

///Recognizes the longest number at the start of `input`.
///Literals outside the range of `f64` are rejected.
pub fn number(input: &str) -> IResult<&str, f64> {
    map_res(
	recognize(tuple((opt(sign), mantissa, opt(exponent)))),
	|s: &str| s.parse::<f64>().ok().filter(|n| n.is_finite()).ok_or(()),
    )(input)
}

///Returns `true` if `c` can start a number.
pub fn starts_number(c: char) -> bool {
    c.is_ascii_digit() || c == '.' || c == '+' || c == '-'
}
