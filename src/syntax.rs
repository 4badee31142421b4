//! Shared pieces of the CSS functional notations: body extraction, the
//! component tokenizer and the numeric clamps every format reuses.

use lexical_parse_float::FromLexical;
use winnow::{
    ascii::{multispace0, multispace1},
    combinator::{alt, separated},
    prelude::*,
    token::take_while,
};

use crate::error::ComponentError;

/// Returns the text between the first `(` and the closing `)`.
pub fn function_body(s: &str) -> Result<&str, ComponentError> {
    let (_, rest) = s.split_once('(').ok_or(ComponentError::MissingParens)?;
    rest.strip_suffix(')').ok_or(ComponentError::MissingParens)
}

/// True when the body has a `/ <number>` alpha clause.
pub fn has_alpha_clause(s: &str) -> bool {
    s.match_indices('/').any(|(i, _)| {
        s[i + 1..]
            .trim_start()
            .starts_with(|c: char| c.is_ascii_digit() || c == '.')
    })
}

fn component<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(1.., |c: char| !c.is_whitespace() && c != ',').parse_next(input)
}

fn separator(input: &mut &str) -> ModalResult<()> {
    alt(((multispace0, ',', multispace0).void(), multispace1.void())).parse_next(input)
}

/// Splits a component list. Commas and whitespace are both accepted as
/// separators so the legacy and modern grammars go through the same path.
pub fn components(s: &str) -> Result<Vec<&str>, ComponentError> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(Vec::new());
    }
    separated(1.., component, separator)
        .parse(s)
        .map_err(|_| ComponentError::Malformed(s.to_owned()))
}

/// Arguments of a color function, already split into the three channel
/// tokens and a parsed alpha.
#[derive(Debug, PartialEq)]
pub struct Arguments<'a> {
    pub channels: [&'a str; 3],
    pub alpha: f64,
}

/// Parses `name(c1 c2 c3 / alpha)`. With `legacy_alpha`, a fourth
/// comma-separated component (`rgba(1, 2, 3, 0.5)`) is read as alpha.
/// Other trailing components are ignored.
pub fn arguments(s: &str, legacy_alpha: bool) -> Result<Arguments<'_>, ComponentError> {
    let body = function_body(s)?;
    let (main, alpha_clause) = match body.split_once('/') {
        Some((main, alpha)) => (main, Some(alpha.trim())),
        None => (body, None),
    };

    let parts = components(main)?;
    let comma_separated = main.contains(',');
    let (channels, alpha_token) = match (parts.as_slice(), alpha_clause) {
        ([c1, c2, c3, alpha, ..], None) if legacy_alpha && comma_separated => {
            ([*c1, *c2, *c3], Some(*alpha))
        }
        ([c1, c2, c3, ..], alpha) => ([*c1, *c2, *c3], alpha),
        _ => {
            return Err(ComponentError::ComponentCount {
                expected: 3,
                found: parts.len(),
            });
        }
    };

    let alpha = match alpha_token {
        Some(token) => alpha_value(number(token)?),
        None => 1.,
    };

    Ok(Arguments { channels, alpha })
}

/// A numeric token, remembering whether it carried a `%` unit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CssNum {
    Num(f64),
    Percent(f64),
}

fn float(token: &str) -> Result<f64, ComponentError> {
    f64::from_lexical(token.as_bytes())
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| ComponentError::InvalidNumber(token.to_owned()))
}

pub fn number(token: &str) -> Result<CssNum, ComponentError> {
    match token.strip_suffix('%') {
        Some(n) => float(n).map(CssNum::Percent),
        None => float(token).map(CssNum::Num),
    }
}

/// Hue token: a bare number with an optional `deg` unit.
pub fn angle(token: &str) -> Result<f64, ComponentError> {
    float(token.strip_suffix("deg").unwrap_or(token))
}

pub fn unit(x: f64) -> f64 {
    x.clamp(0., 1.)
}

/// Percentage clamped to [0, 100] and mapped to [0, 1].
pub fn percent_to_unit(p: f64) -> f64 {
    p.clamp(0., 100.) / 100.
}

/// Unit interval to an 8-bit channel. NaN maps to 0.
pub fn unit_to_byte(x: f64) -> u8 {
    (unit(x) * 255.).round() as u8
}

/// Integer channel: truncated, then clamped to [0, 255].
pub fn byte(n: f64) -> u8 {
    n.trunc().clamp(0., 255.) as u8
}

/// Degrees normalized to [0, 360).
pub fn normalize_degrees(h: f64) -> f64 {
    let h = h.rem_euclid(360.);
    if h >= 360. { 0. } else { h }
}

pub fn alpha_value(n: CssNum) -> f64 {
    match n {
        CssNum::Num(a) => unit(a),
        CssNum::Percent(p) => percent_to_unit(p),
    }
}
