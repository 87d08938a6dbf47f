use crate::error::CompileError;

#[derive(Debug, Clone, PartialEq)]
pub(super) enum TokenKind {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret,
    Comma,
    OpenParen,
    CloseParen,
}

impl TokenKind {
    pub(super) fn describe(&self) -> String {
        match self {
            Self::Number(value) => value.to_string(),
            Self::Ident(name) => name.clone(),
            Self::Plus => "+".into(),
            Self::Minus => "-".into(),
            Self::Star => "*".into(),
            Self::Slash => "/".into(),
            Self::Percent => "%".into(),
            Self::Caret => "^".into(),
            Self::Comma => ",".into(),
            Self::OpenParen => "(".into(),
            Self::CloseParen => ")".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(super) struct Token {
    pub(super) kind: TokenKind,
    /// Byte offset into the source.
    pub(super) pos: usize,
}

pub(super) fn tokenize(source: &str) -> Result<Vec<Token>, CompileError> {
    let mut tokens = Vec::new();
    let mut chars = source.char_indices().peekable();

    while let Some(&(pos, ch)) = chars.peek() {
        if ch.is_whitespace() {
            chars.next();
            continue;
        }

        if ch.is_ascii_digit() || ch == '.' {
            let end = scan_number(source, pos);
            let text = &source[pos..end];
            let value: f64 = text
                .parse()
                .map_err(|_| CompileError::UnexpectedToken {
                    found: text.to_string(),
                    pos,
                })?;
            tokens.push(Token {
                kind: TokenKind::Number(value),
                pos,
            });
            while chars.peek().is_some_and(|&(next, _)| next < end) {
                chars.next();
            }
            continue;
        }

        if ch.is_alphabetic() || ch == '_' {
            let mut end = pos;
            while let Some(&(next, c)) = chars.peek() {
                if c.is_alphanumeric() || c == '_' {
                    end = next + c.len_utf8();
                    chars.next();
                } else {
                    break;
                }
            }
            tokens.push(Token {
                kind: TokenKind::Ident(source[pos..end].to_string()),
                pos,
            });
            continue;
        }

        let kind = match ch {
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '%' => TokenKind::Percent,
            '^' => TokenKind::Caret,
            ',' => TokenKind::Comma,
            '(' => TokenKind::OpenParen,
            ')' => TokenKind::CloseParen,
            _ => return Err(CompileError::UnexpectedChar { ch, pos }),
        };
        tokens.push(Token { kind, pos });
        chars.next();
    }

    Ok(tokens)
}

/// End offset of the number literal starting at `start`.
fn scan_number(source: &str, start: usize) -> usize {
    let bytes = source.as_bytes();
    let mut end = start;
    let digits = |end: &mut usize| {
        while *end < bytes.len() && bytes[*end].is_ascii_digit() {
            *end += 1;
        }
    };
    digits(&mut end);
    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        digits(&mut end);
    }
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp = end + 1;
        if exp < bytes.len() && (bytes[exp] == b'+' || bytes[exp] == b'-') {
            exp += 1;
        }
        if exp < bytes.len() && bytes[exp].is_ascii_digit() {
            end = exp;
            digits(&mut end);
        }
    }
    end
}
