//! Dimension expression evaluation
//!
//! A piece's width and height are small arithmetic expressions over its
//! single-letter field keys ("A+2*B"). Substitution is per character:
//! letters resolve case-insensitively to the piece's field values, and a
//! letter with no matching field resolves to 0. Digits, `+ - * / ( ) .`
//! and whitespace pass through; any other character invalidates the whole
//! expression.
//!
//! The substituted string — by then pure digits and operators — is handed
//! to an arithmetic-only expression parser, never to a general-purpose
//! evaluator.
//!
//! Every failure mode (empty input, unexpected characters, parse errors,
//! non-finite results such as division by zero) evaluates to 0.0.
//! Operators edit expressions live; a half-typed expression must degrade,
//! not error.

use shared::models::box_template::Piece;
use tracing::debug;

/// Evaluate a dimension expression against a piece's fields.
///
/// Never fails: any malformed or non-finite outcome is 0.0.
pub fn evaluate(expression: &str, piece: &Piece) -> f64 {
    let Some(substituted) = substitute(expression, piece) else {
        debug!(expression, "dimension expression contains unsupported characters");
        return 0.0;
    };
    if substituted.trim().is_empty() {
        return 0.0;
    }
    match meval::eval_str(&substituted) {
        Ok(value) if value.is_finite() => value,
        // NaN / infinity, e.g. division by zero
        Ok(_) => 0.0,
        Err(err) => {
            debug!(expression, %err, "dimension expression failed to evaluate");
            0.0
        }
    }
}

/// Evaluate a piece's width and height expressions, in millimeters
pub fn piece_dimensions(piece: &Piece) -> (f64, f64) {
    (
        evaluate(&piece.width_expression, piece),
        evaluate(&piece.height_expression, piece),
    )
}

/// Substitute field keys with their numeric values.
///
/// Returns None when the expression contains a character outside the
/// arithmetic alphabet. Substituted values are parenthesized so negative
/// field values keep their sign in context.
fn substitute(expression: &str, piece: &Piece) -> Option<String> {
    let mut out = String::with_capacity(expression.len() + 8);
    for ch in expression.chars() {
        match ch {
            c if c.is_ascii_alphabetic() => {
                let value = piece.field_value(c).unwrap_or(0.0);
                out.push('(');
                out.push_str(&value.to_string());
                out.push(')');
            }
            c if c.is_ascii_digit() => out.push(c),
            '+' | '-' | '*' | '/' | '(' | ')' | '.' => out.push(ch),
            c if c.is_whitespace() => out.push(c),
            _ => return None,
        }
    }
    Some(out)
}
