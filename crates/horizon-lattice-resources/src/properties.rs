//! `.properties` language file parsing.
//!
//! Supports the usual subset of the format:
//!
//! - `key=value`, `key: value`, and `key value` separators
//! - `#` and `!` comment lines
//! - trailing-backslash line continuations
//! - `\t`, `\n`, `\r`, `\f`, `\uXXXX` escapes; any other escaped character
//!   stands for itself (so `\=` and `\:` can appear in keys)
//!
//! Input is expected to be UTF-8. A later duplicate key overwrites an
//! earlier one.

use std::collections::HashMap;

use crate::error::{Error, Result};

/// Parses a properties document into a key/value map.
pub fn parse_properties(input: &str) -> Result<HashMap<String, String>> {
    let mut entries = HashMap::new();
    let mut lines = input.lines().enumerate();

    while let Some((index, line)) = lines.next() {
        let first_line = index + 1;
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
            continue;
        }

        // Join continuation lines into one logical line.
        let mut logical = String::from(trimmed);
        while ends_with_continuation(&logical) {
            logical.pop();
            match lines.next() {
                Some((_, next)) => logical.push_str(next.trim_start()),
                None => break,
            }
        }

        let (key, value) = split_entry(&logical);
        let key = unescape(key, first_line)?;
        let value = unescape(value, first_line)?;
        entries.insert(key, value);
    }

    Ok(entries)
}

/// True when the line ends in an odd number of backslashes.
fn ends_with_continuation(line: &str) -> bool {
    line.bytes().rev().take_while(|&b| b == b'\\').count() % 2 == 1
}

/// Splits a logical line at the first unescaped separator.
fn split_entry(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();

    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' | ' ' | '\t' | '\x0c' => {
                key_end = i;
                break;
            }
            _ => {}
        }
    }

    let key = &line[..key_end];
    let rest = line[key_end..].trim_start_matches([' ', '\t', '\x0c']);
    let rest = rest
        .strip_prefix(['=', ':'])
        .map(|r| r.trim_start_matches([' ', '\t', '\x0c']))
        .unwrap_or(rest);

    (key, rest)
}

fn unescape(raw: &str, line: usize) -> Result<String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\x0c'),
            Some('u') => {
                let unit = utf16_unit(&mut chars, line)?;
                let decoded = if (0xD800..=0xDBFF).contains(&unit) {
                    // A high surrogate only decodes together with the `\uXXXX` low half.
                    let mut rest = chars.clone();
                    let low = match (rest.next(), rest.next()) {
                        (Some('\\'), Some('u')) => utf16_unit(&mut rest, line)
                            .ok()
                            .filter(|low| (0xDC00..=0xDFFF).contains(low)),
                        _ => None,
                    };
                    chars = rest;
                    low.and_then(|low| {
                        char::from_u32(0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00))
                    })
                } else {
                    char::from_u32(unit)
                };
                let decoded = decoded.ok_or_else(|| {
                    Error::properties(line, format!("unpaired surrogate '\\u{:04X}'", unit))
                })?;
                out.push(decoded);
            }
            Some(other) => out.push(other),
            None => {}
        }
    }

    Ok(out)
}

/// Reads the four hex digits of a `\uXXXX` escape.
fn utf16_unit(chars: &mut std::str::Chars<'_>, line: usize) -> Result<u32> {
    let hex: String = chars.by_ref().take(4).collect();
    if hex.chars().count() != 4 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(Error::properties(line, format!("malformed \\u escape '\\u{}'", hex)));
    }
    u32::from_str_radix(&hex, 16)
        .map_err(|e| Error::properties(line, format!("malformed \\u escape '\\u{}': {}", hex, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separators_and_comments() {
        let props = parse_properties(
            "# comment\n\
             ! another\n\
             greeting=Hello {0}\n\
             title : Main Menu\n\
             spaced   value here\n\
             empty=\n",
        )
        .unwrap();

        assert_eq!(props["greeting"], "Hello {0}");
        assert_eq!(props["title"], "Main Menu");
        assert_eq!(props["spaced"], "value here");
        assert_eq!(props["empty"], "");
        assert_eq!(props.len(), 4);
    }

    #[test]
    fn continuation_lines() {
        let props = parse_properties("long=first \\\n    second\nnext=x").unwrap();
        assert_eq!(props["long"], "first second");
        assert_eq!(props["next"], "x");
    }

    #[test]
    fn escaped_backslash_is_not_continuation() {
        let props = parse_properties("path=C:\\\\\nnext=x").unwrap();
        assert_eq!(props["path"], "C:\\");
        assert_eq!(props["next"], "x");
    }

    #[test]
    fn escapes() {
        let props = parse_properties("a\\=b=c\\td\nuni=\\u4F60\\u597D").unwrap();
        assert_eq!(props["a=b"], "c\td");
        assert_eq!(props["uni"], "你好");
    }

    #[test]
    fn utf8_values_pass_through() {
        let props = parse_properties("greeting=你好，{0}").unwrap();
        assert_eq!(props["greeting"], "你好，{0}");
    }

    #[test]
    fn surrogate_pairs_decode_to_one_char() {
        let props = parse_properties("emoji=\\uD83D\\uDE00!\nplain=Hi").unwrap();
        assert_eq!(props["emoji"], "\u{1F600}!");
        assert_eq!(props["plain"], "Hi");
    }

    #[test]
    fn unpaired_surrogates_are_rejected() {
        let err = parse_properties("lone=\\uD83D").unwrap_err();
        assert!(matches!(err, Error::Properties { line: 1, .. }));
        assert!(parse_properties("swapped=\\uDE00\\uD83D").is_err());
        assert!(parse_properties("broken=\\uD83Dx").is_err());
    }

    #[test]
    fn malformed_unicode_escape() {
        let err = parse_properties("ok=1\nbad=\\u12").unwrap_err();
        assert!(matches!(err, Error::Properties { line: 2, .. }));
    }

    #[test]
    fn later_duplicate_wins() {
        let props = parse_properties("k=1\nk=2").unwrap();
        assert_eq!(props["k"], "2");
    }
}
