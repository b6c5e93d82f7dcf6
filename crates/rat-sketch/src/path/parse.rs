//! Tokenizer, parser and serializer for SVG path data.
//!
//! ## Rust Lesson #23: Iterating over bytes
//!
//! Path data is pure ASCII, so the scanner walks `as_bytes()` with an index
//! instead of decoding chars. Anything outside ASCII is reported as an
//! unexpected character at its byte offset.

use crate::error::PathError;

/// One path command with its arguments.
///
/// `key` keeps the letter's case: uppercase is absolute, lowercase relative.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub key: char,
    pub data: Vec<f64>,
}

impl Segment {
    pub fn new(key: char, data: Vec<f64>) -> Self {
        Self { key, data }
    }

    /// Check that `data` holds exactly the arguments `key` takes.
    pub fn check(&self) -> Result<(), PathError> {
        let expected = arity(self.key).ok_or(PathError::UnknownCommand(self.key))?;
        if self.data.len() == expected {
            Ok(())
        } else {
            Err(PathError::WrongArity { command: self.key, expected, found: self.data.len() })
        }
    }
}

/// A lexical token of path data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token {
    Command(char),
    Number(f64),
}

/// Number of arguments a command takes, or `None` for non-commands.
pub fn arity(command: char) -> Option<usize> {
    match command.to_ascii_uppercase() {
        'A' => Some(7),
        'C' => Some(6),
        'H' | 'V' => Some(1),
        'L' | 'M' | 'T' => Some(2),
        'Q' | 'S' => Some(4),
        'Z' => Some(0),
        _ => None,
    }
}

/// Split path data into commands and numbers.
///
/// Spaces, tabs, CR, LF and commas separate tokens. A number can also end
/// where the next sign or decimal point starts: `10-20` is two numbers, as
/// is `.5.6`.
pub fn tokenize(d: &str) -> Result<Vec<Token>, PathError> {
    let bytes = d.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        match b {
            b' ' | b'\t' | b'\r' | b'\n' | b',' => i += 1,
            _ if b.is_ascii_alphabetic() => {
                let ch = b as char;
                if arity(ch).is_none() {
                    return Err(PathError::UnknownCommand(ch));
                }
                tokens.push(Token::Command(ch));
                i += 1;
            }
            _ => {
                let Some(end) = scan_number(bytes, i) else {
                    return Err(unexpected_character(d, i));
                };
                let text = &d[i..end];
                let value = text.parse::<f64>().map_err(|_| unexpected_character(d, i))?;
                tokens.push(Token::Number(value));
                i = end;
            }
        }
    }

    Ok(tokens)
}

fn unexpected_character(d: &str, offset: usize) -> PathError {
    let ch = d[offset..].chars().next().unwrap_or('\u{fffd}');
    PathError::UnexpectedCharacter { ch, offset }
}

/// Match `([-+]?[0-9]+(\.[0-9]*)?|[-+]?\.[0-9]+)([eE][-+]?[0-9]+)?` at
/// `start`, returning the end offset.
fn scan_number(bytes: &[u8], start: usize) -> Option<usize> {
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut i = start;
    if matches!(bytes.get(i), Some(b'-' | b'+')) {
        i += 1;
    }

    if bytes.get(i).is_some_and(u8::is_ascii_digit) {
        i = digits_from(i);
        if bytes.get(i) == Some(&b'.') {
            i = digits_from(i + 1);
        }
    } else if bytes.get(i) == Some(&b'.') && bytes.get(i + 1).is_some_and(u8::is_ascii_digit) {
        i = digits_from(i + 1);
    } else {
        return None;
    }

    // The exponent only belongs to the number when digits follow it.
    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(b'-' | b'+')) {
            j += 1;
        }
        if bytes.get(j).is_some_and(u8::is_ascii_digit) {
            i = digits_from(j);
        }
    }

    Some(i)
}

/// Parse path data into segments.
///
/// Repeated argument groups reuse the last command, except that extra pairs
/// after a moveto are linetos. Data that doesn't start with a moveto gets an
/// implicit `M 0 0`. Blank input yields no segments.
pub fn parse_path(d: &str) -> Result<Vec<Segment>, PathError> {
    let tokens = tokenize(d)?;
    let mut segments = Vec::new();

    let mut mode = match tokens.first() {
        None => return Ok(segments),
        Some(Token::Command(c @ ('M' | 'm'))) => *c,
        Some(_) => {
            segments.push(Segment::new('M', vec![0.0, 0.0]));
            'L'
        }
    };

    let mut index = 0;
    while index < tokens.len() {
        let command = match tokens[index] {
            Token::Command(c) => {
                index += 1;
                mode = c;
                c
            }
            Token::Number(_) => mode,
        };
        let count = arity(command).ok_or(PathError::UnknownCommand(command))?;

        if count == 0 {
            segments.push(Segment::new(command, Vec::new()));
            if let Some(Token::Number(_)) = tokens.get(index) {
                return Err(PathError::UnexpectedNumber { command });
            }
            continue;
        }

        let Some(args) = tokens.get(index..index + count) else {
            return Err(PathError::EndedShort { command });
        };
        let data = args
            .iter()
            .map(|token| match *token {
                Token::Number(n) => Ok(n),
                Token::Command(found) => Err(PathError::ExpectedNumber { command, found }),
            })
            .collect::<Result<Vec<_>, _>>()?;

        segments.push(Segment::new(command, data));
        index += count;
        mode = match command {
            'M' => 'L',
            'm' => 'l',
            other => other,
        };
    }

    Ok(segments)
}

/// Write segments back out as path data.
///
/// Cubic commands put a comma after each control point (`C 1 2, 3 4, 5 6`),
/// smooth cubics and quadratics after their first point.
pub fn serialize(segments: &[Segment]) -> String {
    let mut tokens: Vec<String> = Vec::new();
    for segment in segments {
        tokens.push(segment.key.to_string());
        let d = &segment.data;
        match segment.key {
            'C' | 'c' if d.len() == 6 => tokens.extend([
                d[0].to_string(),
                format!("{},", d[1]),
                d[2].to_string(),
                format!("{},", d[3]),
                d[4].to_string(),
                d[5].to_string(),
            ]),
            'S' | 's' | 'Q' | 'q' if d.len() == 4 => tokens.extend([
                d[0].to_string(),
                format!("{},", d[1]),
                d[2].to_string(),
                d[3].to_string(),
            ]),
            _ => tokens.extend(d.iter().map(f64::to_string)),
        }
    }
    tokens.join(" ")
}

// ============================================================================
// TESTS
// ============================================================================
