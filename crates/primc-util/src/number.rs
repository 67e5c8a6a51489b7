//! Hand-rolled parsing for the restricted numeric literal grammar.
//!
//! Integers are `-?[0-9]+`, decimals are `-?[0-9]+\.[0-9]*`. No
//! exponents, no radix prefixes, no underscores. The lexer guarantees the
//! shape in the common path; these functions re-validate so they are total
//! on arbitrary strings.

use crate::error::{NumberError, NumberResult};

/// Parse a signed 64-bit integer literal.
///
/// # Examples
///
/// ```
/// use primc_util::number::parse_int;
///
/// assert_eq!(parse_int("42"), Ok(42));
/// assert_eq!(parse_int("-7"), Ok(-7));
/// assert!(parse_int("").is_err());
/// assert!(parse_int("-").is_err());
/// assert!(parse_int("4x2").is_err());
/// ```
pub fn parse_int(s: &str) -> NumberResult<i64> {
    if s.is_empty() {
        return Err(NumberError::Empty);
    }

    let (neg, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };
    if digits.is_empty() {
        return Err(NumberError::NoDigits);
    }

    let mut n: i64 = 0;
    for c in digits.chars() {
        let d = c.to_digit(10).ok_or(NumberError::InvalidChar(c))?;
        n = n
            .checked_mul(10)
            .and_then(|n| n.checked_add(d as i64))
            .ok_or(NumberError::Overflow)?;
    }

    Ok(if neg { -n } else { n })
}

/// Parse a 64-bit decimal literal.
///
/// The fractional part may be empty (`3.` is valid); the integer part may
/// not (`.5` is rejected).
///
/// # Examples
///
/// ```
/// use primc_util::number::parse_float;
///
/// assert_eq!(parse_float("3.25"), Ok(3.25));
/// assert_eq!(parse_float("10."), Ok(10.0));
/// assert_eq!(parse_float("-1.5"), Ok(-1.5));
/// assert!(parse_float(".5").is_err());
/// ```
pub fn parse_float(s: &str) -> NumberResult<f64> {
    if s.is_empty() {
        return Err(NumberError::Empty);
    }
    if s.starts_with('.') {
        return Err(NumberError::LeadingDot);
    }

    let (neg, rest) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };
    if rest.is_empty() {
        return Err(NumberError::NoDigits);
    }
    if rest.starts_with('.') {
        return Err(NumberError::LeadingDot);
    }

    let (int_part, frac_part) = match rest.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (rest, None),
    };

    let mut value: f64 = 0.0;
    for c in int_part.chars() {
        let d = c.to_digit(10).ok_or(NumberError::InvalidChar(c))?;
        value = value * 10.0 + d as f64;
    }

    if let Some(frac) = frac_part {
        // Accumulate right to left so each digit is divided exactly once
        // per place value.
        let mut fraction: f64 = 0.0;
        for c in frac.chars().rev() {
            let d = c.to_digit(10).ok_or(NumberError::InvalidChar(c))?;
            fraction = fraction / 10.0 + d as f64;
        }
        value += fraction / 10.0;
    }

    Ok(if neg { -value } else { value })
}
