//! Escape sequences inside string literals.
//!
//! Recognized: `\\`, `\'`, `\"`, `` \` ``, `\n`, `\r`, `\t`, `\b`, `\xHH` and
//! `\uHHHH` (surrogate pairs combine into one character).

use std::fmt::Write;

/// Malformed escape, `offset` relative to the literal body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EscapeError {
    pub offset: usize,
    pub sequence: String,
}

/// Decodes the body of a string literal (quotes already stripped).
pub fn unescape(body: &str) -> Result<String, EscapeError> {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.char_indices().peekable();

    while let Some((offset, ch)) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }

        let invalid = |end: usize| EscapeError {
            offset,
            sequence: body[offset..end.min(body.len())].to_string(),
        };

        let Some((_, kind)) = chars.next() else {
            return Err(invalid(body.len()));
        };

        match kind {
            '\\' | '\'' | '"' | '`' => out.push(kind),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'b' => out.push('\u{8}'),
            'x' => {
                let code = hex_at(body, offset + 2, 2).ok_or_else(|| invalid(offset + 4))?;
                skip(&mut chars, 2);
                // Two hex digits never exceed U+00FF.
                out.push(char::from_u32(code).ok_or_else(|| invalid(offset + 4))?);
            }
            'u' => {
                let high = hex_at(body, offset + 2, 4).ok_or_else(|| invalid(offset + 6))?;
                skip(&mut chars, 4);

                let code = match high {
                    0xD800..=0xDBFF => {
                        let low = body
                            .get(offset + 6..offset + 8)
                            .filter(|s| *s == "\\u")
                            .and_then(|_| hex_at(body, offset + 8, 4))
                            .filter(|low| (0xDC00..=0xDFFF).contains(low))
                            .ok_or_else(|| invalid(offset + 6))?;
                        skip(&mut chars, 6);
                        0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00)
                    }
                    0xDC00..=0xDFFF => return Err(invalid(offset + 6)),
                    _ => high,
                };
                out.push(char::from_u32(code).ok_or_else(|| invalid(offset + 6))?);
            }
            other => return Err(invalid(offset + 1 + other.len_utf8())),
        }
    }

    Ok(out)
}

/// Encodes `value` as a single-quoted literal that [`unescape`] reverses.
pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{8}' => out.push_str("\\b"),
            c if c.is_control() => {
                write!(out, "\\x{:02X}", c as u32).expect("String write never fails");
            }
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

fn hex_at(body: &str, start: usize, len: usize) -> Option<u32> {
    let digits = body.get(start..start + len)?;
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(digits, 16).ok()
}

fn skip(chars: &mut impl Iterator<Item = (usize, char)>, n: usize) {
    for _ in 0..n {
        chars.next();
    }
}
