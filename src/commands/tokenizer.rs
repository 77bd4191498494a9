//! Tokenizer for command lines.
//!
//! Splits a line into whitespace-separated tokens, with support for
//! backtick-quoted spans:
//! - `` `hello world` `` → `hello world`
//! - a span opened by two or more backticks closes only on a run of the same length
//! - an unclosed run is just part of an ordinary token: `` `foo `` → `` `foo ``

use crate::error::{Result, RouteError};

/// Splits a line into tokens.
pub fn split(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut rest = line;

    loop {
        rest = rest.trim_start();
        if rest.is_empty() {
            break;
        }

        if let Some((span, after)) = quoted_span(rest) {
            tokens.push(span.to_string());
            rest = after;
            continue;
        }

        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        tokens.push(rest[..end].to_string());
        rest = &rest[end..];
    }

    tokens
}

/// Splits a line into a command name and its arguments.
pub fn tokenize(line: &str) -> Result<(String, Vec<String>)> {
    let mut tokens = split(line).into_iter();
    let name = tokens.next().ok_or(RouteError::NoCommand)?;
    Ok((name, tokens.collect()))
}

/// Matches a backtick span at the start of `input`.
///
/// Returns the span contents and the input after the closing run, or `None`
/// if `input` doesn't start with backticks or the run is never closed.
fn quoted_span(input: &str) -> Option<(&str, &str)> {
    let run = input.len() - input.trim_start_matches('`').len();
    if run == 0 {
        return None;
    }

    let fence = &input[..run];
    let body = &input[run..];
    let close = body.find(fence)?;

    Some((&body[..close], &body[close + run..]))
}
