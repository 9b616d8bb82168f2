//! Restricted literal grammar for the right hand side of `KEY = VALUE` lines.
//!
//! Values are tried as an integer, a float, a quoted string and a parenthesised or
//! bracketed list, in that order. Anything else is kept verbatim as a string, which is
//! the common case for free-text fields.

use crate::value::Value;

/// interprets trimmed value text, falling back to the text itself
pub fn interpret(text: &str) -> Value {
    let text = text.trim();
    parse_literal(text).unwrap_or_else(|| Value::Str(text.to_string()))
}

fn parse_literal(text: &str) -> Option<Value> {
    if let Some(i) = parse_int(text) {
        return Some(Value::Int(i));
    }
    if let Some(x) = parse_float(text) {
        return Some(Value::Float(x));
    }
    if let Some(s) = parse_quoted(text) {
        return Some(Value::Str(s.to_string()));
    }
    parse_list(text)
}

fn split_sign(text: &str) -> &str {
    text.strip_prefix(['+', '-']).unwrap_or(text)
}

fn parse_int(text: &str) -> Option<i64> {
    let digits = split_sign(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    // "007" is not an integer literal
    if digits.len() > 1 && digits.starts_with('0') {
        return None;
    }
    text.parse().ok()
}

fn parse_float(text: &str) -> Option<f64> {
    let body = split_sign(text);
    let (mantissa, exponent) = match body.find(['e', 'E']) {
        Some(pos) => (&body[..pos], Some(&body[pos + 1..])),
        None => (body, None),
    };

    let (whole, frac) = match mantissa.split_once('.') {
        Some((whole, frac)) => (whole, Some(frac)),
        None => (mantissa, None),
    };
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(whole) || !frac.map_or(true, all_digits) {
        return None;
    }
    if whole.is_empty() && frac.map_or(true, str::is_empty) {
        return None;
    }
    if frac.is_none() && exponent.is_none() {
        return None;
    }
    if let Some(exp) = exponent {
        let exp_digits = split_sign(exp);
        if exp_digits.is_empty() || !all_digits(exp_digits) {
            return None;
        }
    }
    text.parse().ok()
}

fn parse_quoted(text: &str) -> Option<&str> {
    for quote in ['"', '\''] {
        if text.len() >= 2 && text.starts_with(quote) && text.ends_with(quote) {
            let inner = &text[1..text.len() - 1];
            if !inner.contains(quote) {
                return Some(inner);
            }
        }
    }
    None
}

fn parse_list(text: &str) -> Option<Value> {
    let inner = text
        .strip_prefix('(')
        .and_then(|t| t.strip_suffix(')'))
        .map(|inner| (inner, true))
        .or_else(|| {
            text.strip_prefix('[')
                .and_then(|t| t.strip_suffix(']'))
                .map(|inner| (inner, false))
        });
    let (inner, is_tuple) = inner?;

    let parts = split_elements(inner)?;
    let trailing_comma = inner.trim_end().ends_with(',');
    let mut items = Vec::with_capacity(parts.len());
    for (i, part) in parts.iter().enumerate() {
        let part = part.trim();
        if part.is_empty() {
            // only an empty list or a single trailing comma may leave an empty slot
            if i == parts.len() - 1 && (trailing_comma || parts.len() == 1) {
                continue;
            }
            return None;
        }
        items.push(parse_literal(part)?);
    }

    // (x) is just x
    if is_tuple && items.len() == 1 && !trailing_comma {
        return items.pop();
    }
    Some(Value::List(items))
}

/// splits on top level commas, `None` when brackets or quotes are unbalanced
fn split_elements(inner: &str) -> Option<Vec<&str>> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;

    for (pos, c) in inner.char_indices() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None => match c {
                '"' | '\'' => quote = Some(c),
                '(' | '[' => depth += 1,
                ')' | ']' => depth = depth.checked_sub(1)?,
                ',' if depth == 0 => {
                    parts.push(&inner[start..pos]);
                    start = pos + 1;
                }
                _ => {}
            },
        }
    }
    if quote.is_some() || depth != 0 {
        return None;
    }
    parts.push(&inner[start..]);
    Some(parts)
}
