//! Tokenizer for calculator input.

use std::fmt;

use crate::error::CalcError;

/// Byte range of a token in the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    Percent,
    LParen,
    RParen,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Ident(ref s) => f.write_str(s),
            Self::Plus => f.write_str("+"),
            Self::Minus => f.write_str("-"),
            Self::Star => f.write_str("*"),
            Self::Slash => f.write_str("/"),
            Self::Caret => f.write_str("^"),
            Self::Percent => f.write_str("%"),
            Self::LParen => f.write_str("("),
            Self::RParen => f.write_str(")"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

/// Split `input` into tokens. Whitespace is skipped.
///
/// Keypad glyphs are accepted alongside ASCII: `×`, `÷`, `−`, `π` and `√`.
pub fn tokenize(input: &str) -> Result<Vec<Token>, CalcError> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some(&(start, ch)) = chars.peek() {
        if ch.is_whitespace() {
            chars.next();
            continue;
        }

        let single = match ch {
            '+' => Some(TokenKind::Plus),
            '-' | '−' => Some(TokenKind::Minus),
            '*' | '×' => Some(TokenKind::Star),
            '/' | '÷' => Some(TokenKind::Slash),
            '^' => Some(TokenKind::Caret),
            '%' => Some(TokenKind::Percent),
            '(' => Some(TokenKind::LParen),
            ')' => Some(TokenKind::RParen),
            'π' => Some(TokenKind::Ident("pi".to_owned())),
            '√' => Some(TokenKind::Ident("sqrt".to_owned())),
            _ => None,
        };
        if let Some(kind) = single {
            chars.next();
            tokens.push(Token { kind, span: Span { start, end: start + ch.len_utf8() } });
            continue;
        }

        if ch.is_ascii_digit() || ch == '.' {
            let end = scan_number(input, start);
            let text = &input[start..end];
            let value = text
                .parse::<f64>()
                .map_err(|_| CalcError::InvalidNumber { text: text.to_owned(), at: start })?;
            tokens.push(Token { kind: TokenKind::Number(value), span: Span { start, end } });
            while chars.peek().is_some_and(|&(i, _)| i < end) {
                chars.next();
            }
            continue;
        }

        if ch.is_alphabetic() {
            let mut end = start;
            while let Some(&(i, c)) = chars.peek() {
                if !c.is_alphanumeric() || c == 'π' {
                    break;
                }
                end = i + c.len_utf8();
                chars.next();
            }
            let name = input[start..end].to_lowercase();
            tokens.push(Token { kind: TokenKind::Ident(name), span: Span { start, end } });
            continue;
        }

        return Err(CalcError::UnexpectedChar { ch, at: start });
    }

    Ok(tokens)
}

/// End offset of the number literal starting at `start`.
///
/// An `e` only belongs to the literal when digits follow it, so `2*e`
/// still reads the constant.
fn scan_number(input: &str, start: usize) -> usize {
    let bytes = input.as_bytes();
    let mut i = start;
    while i < bytes.len() && (bytes[i].is_ascii_digit() || bytes[i] == b'.') {
        i += 1;
    }
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        if j < bytes.len() && bytes[j].is_ascii_digit() {
            while j < bytes.len() && bytes[j].is_ascii_digit() {
                j += 1;
            }
            i = j;
        }
    }
    i
}
