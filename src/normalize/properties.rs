//! `.properties` parsing and canonical serialization
//!
//! Parsing follows the usual `.properties` conventions:
//! - natural lines end at `\n`, `\r` or `\r\n`; leading whitespace is skipped
//! - lines starting with `#` or `!` are comments
//! - an odd number of trailing backslashes joins the next line
//! - the key ends at the first unescaped `=`, `:` or whitespace
//! - `\uXXXX`, `\t`, `\n`, `\r`, `\f` escapes are decoded; `\c` is `c`
//!
//! Each natural line is read as UTF-8, or as ISO-8859-1 when that line is not
//! valid UTF-8, so bytes in one line never change how another decodes. The
//! canonical form is always UTF-8 and sorted by key, so line order, comments
//! and whitespace never reach the hash.

use crate::error::PropertiesError;
use std::collections::btree_map;
use std::collections::{BTreeMap, BTreeSet};

/// Parsed key=value content. Later duplicates replace earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    entries: BTreeMap<String, String>,
}

impl Properties {
    /// Parse raw bytes. Fails on a malformed `\uXXXX` escape anywhere.
    pub fn parse(bytes: &[u8]) -> Result<Self, PropertiesError> {
        let lines: Vec<Vec<char>> = natural_lines(bytes).into_iter().map(decode_line).collect();

        let mut entries = BTreeMap::new();
        for line in logical_lines(&lines) {
            let (key, value) = split_entry(&line)?;
            entries.insert(key, value);
        }
        Ok(Self { entries })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in ascending key order
    pub fn iter(&self) -> btree_map::Iter<'_, String, String> {
        self.entries.iter()
    }

    /// Serialize the entries whose key is not in `ignored_keys`.
    ///
    /// Each entry is written as `len(key) || key || len(value) || value`,
    /// lengths as big-endian u64 byte counts of the UTF-8 encoding.
    pub fn canonical_bytes(&self, ignored_keys: &BTreeSet<String>) -> Vec<u8> {
        let mut out = Vec::new();
        for (key, value) in self
            .entries
            .iter()
            .filter(|(key, _)| !ignored_keys.contains(key.as_str()))
        {
            out.extend_from_slice(&(key.len() as u64).to_be_bytes());
            out.extend_from_slice(key.as_bytes());
            out.extend_from_slice(&(value.len() as u64).to_be_bytes());
            out.extend_from_slice(value.as_bytes());
        }
        out
    }
}

/// Parse `bytes` and return the canonical form without `ignored_keys`.
pub fn canonicalize(
    bytes: &[u8],
    ignored_keys: &BTreeSet<String>,
) -> Result<Vec<u8>, PropertiesError> {
    Ok(Properties::parse(bytes)?.canonical_bytes(ignored_keys))
}

fn decode_line(bytes: &[u8]) -> Vec<char> {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.chars().collect(),
        // ISO-8859-1: each byte is the code point of the same value
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\u{000C}')
}

/// A key=value line after comment removal and continuation joining.
struct LogicalLine {
    chars: Vec<char>,
    /// 1-based number of the first natural line
    line: usize,
}

/// Split raw bytes at `\n`, `\r` or `\r\n`. Both terminators are single
/// bytes in UTF-8 and ISO-8859-1 alike, so splitting precedes decoding.
fn natural_lines(bytes: &[u8]) -> Vec<&[u8]> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                lines.push(&bytes[start..i]);
                i += 1;
                start = i;
            }
            b'\r' => {
                lines.push(&bytes[start..i]);
                i += 1;
                if i < bytes.len() && bytes[i] == b'\n' {
                    i += 1;
                }
                start = i;
            }
            _ => i += 1,
        }
    }
    if start < bytes.len() {
        lines.push(&bytes[start..]);
    }
    lines
}

fn skip_leading_whitespace(line: &[char]) -> &[char] {
    let start = line
        .iter()
        .position(|&c| !is_whitespace(c))
        .unwrap_or(line.len());
    &line[start..]
}

fn ends_with_continuation(line: &[char]) -> bool {
    let trailing = line.iter().rev().take_while(|&&c| c == '\\').count();
    trailing % 2 == 1
}

fn logical_lines(natural: &[Vec<char>]) -> Vec<LogicalLine> {
    let mut logical = Vec::new();
    let mut index = 0;

    while index < natural.len() {
        let line_number = index + 1;
        let mut current = skip_leading_whitespace(&natural[index]);
        index += 1;

        if current.is_empty() || current[0] == '#' || current[0] == '!' {
            continue;
        }

        let mut buf = Vec::with_capacity(current.len());
        loop {
            if !ends_with_continuation(current) {
                buf.extend_from_slice(current);
                break;
            }
            buf.extend_from_slice(&current[..current.len() - 1]);
            match natural.get(index) {
                Some(next) => {
                    current = skip_leading_whitespace(next);
                    index += 1;
                }
                // Trailing backslash at end of input is dropped
                None => break,
            }
        }

        logical.push(LogicalLine {
            chars: buf,
            line: line_number,
        });
    }

    logical
}

fn split_entry(line: &LogicalLine) -> Result<(String, String), PropertiesError> {
    let chars = &line.chars;
    let limit = chars.len();
    let mut key_len = 0;
    let mut value_start = limit;
    let mut has_separator = false;
    let mut preceding_backslash = false;

    while key_len < limit {
        let c = chars[key_len];
        if !preceding_backslash {
            if c == '=' || c == ':' {
                value_start = key_len + 1;
                has_separator = true;
                break;
            }
            if is_whitespace(c) {
                value_start = key_len + 1;
                break;
            }
        }
        preceding_backslash = c == '\\' && !preceding_backslash;
        key_len += 1;
    }

    while value_start < limit {
        let c = chars[value_start];
        if !is_whitespace(c) {
            if !has_separator && (c == '=' || c == ':') {
                has_separator = true;
            } else {
                break;
            }
        }
        value_start += 1;
    }

    let key = unescape(&chars[..key_len], line.line)?;
    let value = unescape(&chars[value_start..], line.line)?;
    Ok((key, value))
}

fn unescape(chars: &[char], line: usize) -> Result<String, PropertiesError> {
    // \uXXXX yields UTF-16 code units; surrogate pairs are recombined at the end
    let mut units: Vec<u16> = Vec::with_capacity(chars.len());
    let mut buf = [0u16; 2];
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        i += 1;
        if c != '\\' {
            units.extend_from_slice(c.encode_utf16(&mut buf));
            continue;
        }
        let Some(&escaped) = chars.get(i) else {
            break;
        };
        i += 1;
        let decoded = match escaped {
            'u' => {
                let digits = chars
                    .get(i..i + 4)
                    .ok_or(PropertiesError::MalformedUnicodeEscape { line })?;
                let mut unit: u16 = 0;
                for digit in digits {
                    let value = digit
                        .to_digit(16)
                        .ok_or(PropertiesError::MalformedUnicodeEscape { line })?;
                    unit = (unit << 4) | value as u16;
                }
                i += 4;
                units.push(unit);
                continue;
            }
            't' => '\t',
            'r' => '\r',
            'n' => '\n',
            'f' => '\u{000C}',
            other => other,
        };
        units.extend_from_slice(decoded.encode_utf16(&mut buf));
    }

    Ok(String::from_utf16_lossy(&units))
}
