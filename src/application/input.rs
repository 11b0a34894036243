//! Input coercion: user text to typed sequences
//!
//! Accepts list-literal text such as `[1, 2, None, 'x']`. A token equal to the
//! configured absent token (case-insensitive, unquoted) becomes `None`.
//! Anything that cannot be typed is rejected here, before a builder runs.

use std::fmt::Display;
use std::str::FromStr;

use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult};

/// Parse a sequence of optional text payloads.
#[instrument(level = "debug")]
pub fn parse_values(text: &str, absent_token: &str) -> ApplicationResult<Vec<Option<String>>> {
    let values: Vec<Option<String>> = split_tokens(text)?
        .into_iter()
        .map(|raw| classify(&raw, absent_token))
        .collect();
    debug!("parsed {} values", values.len());
    Ok(values)
}

/// Parse a sequence of optional keys of type `K`.
///
/// Every present token must parse as `K`; the first failure is reported with
/// its position.
#[instrument(level = "debug")]
pub fn parse_keys<K>(text: &str, absent_token: &str) -> ApplicationResult<Vec<Option<K>>>
where
    K: FromStr,
    K::Err: Display,
{
    parse_values(text, absent_token)?
        .into_iter()
        .enumerate()
        .map(|(position, value)| match value {
            None => Ok(None),
            Some(token) => token
                .parse::<K>()
                .map(Some)
                .map_err(|e| ApplicationError::InvalidToken {
                    position,
                    token,
                    reason: e.to_string(),
                }),
        })
        .collect()
}

/// Strip one pair of surrounding brackets or parentheses.
fn strip_brackets(s: &str) -> &str {
    let s = s.trim();
    for (open, close) in [('[', ']'), ('(', ')')] {
        if let Some(inner) = s.strip_prefix(open).and_then(|r| r.strip_suffix(close)) {
            return inner;
        }
    }
    s
}

/// Split on commas outside quotes.
///
/// `'a,b'` stays one token. A single trailing comma is allowed, as in
/// `[1, 2,]`; any other empty token is an error.
fn split_tokens(text: &str) -> ApplicationResult<Vec<String>> {
    let inner = strip_brackets(text);
    if inner.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_single_quote = false;
    let mut in_double_quote = false;

    for c in inner.chars() {
        match c {
            '\'' if !in_double_quote => {
                in_single_quote = !in_single_quote;
                current.push(c);
            }
            '"' if !in_single_quote => {
                in_double_quote = !in_double_quote;
                current.push(c);
            }
            ',' if !in_single_quote && !in_double_quote => {
                tokens.push(std::mem::take(&mut current).trim().to_string());
            }
            _ => current.push(c),
        }
    }
    if in_single_quote || in_double_quote {
        return Err(ApplicationError::InvalidToken {
            position: tokens.len(),
            token: current.trim().to_string(),
            reason: "unterminated quote".into(),
        });
    }
    let last = current.trim().to_string();
    if !(last.is_empty() && !tokens.is_empty()) {
        tokens.push(last);
    }

    if let Some(position) = tokens.iter().position(|t| t.is_empty()) {
        return Err(ApplicationError::InvalidToken {
            position,
            token: String::new(),
            reason: "empty token".into(),
        });
    }
    Ok(tokens)
}

fn classify(raw: &str, absent_token: &str) -> Option<String> {
    for quote in ['\'', '"'] {
        if raw.len() >= 2 && raw.starts_with(quote) && raw.ends_with(quote) {
            return Some(raw[1..raw.len() - 1].to_string());
        }
    }
    if raw.eq_ignore_ascii_case(absent_token) {
        None
    } else {
        Some(raw.to_string())
    }
}
