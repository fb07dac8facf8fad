//! A hand-written tokenizer for TIP source text.
//!
//! Tokens carry byte-offset spans so that [`crate::ParseError`] can point
//! back into the original source, the way the reference front end threads
//! spans through its own token stream.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Ident(String),
    Int(i64),
    // keywords
    KwVar,
    KwIf,
    KwElse,
    KwWhile,
    KwReturn,
    KwOutput,
    KwInput,
    KwAlloc,
    KwNull,
    // punctuation
    LBrace,
    RBrace,
    LParen,
    RParen,
    Comma,
    Semi,
    Dot,
    Colon,
    Eq,
    EqEq,
    Gt,
    Plus,
    Minus,
    Star,
    Slash,
    Amp,
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Ident(s) => write!(f, "identifier `{s}`"),
            TokenKind::Int(n) => write!(f, "integer `{n}`"),
            TokenKind::KwVar => write!(f, "`var`"),
            TokenKind::KwIf => write!(f, "`if`"),
            TokenKind::KwElse => write!(f, "`else`"),
            TokenKind::KwWhile => write!(f, "`while`"),
            TokenKind::KwReturn => write!(f, "`return`"),
            TokenKind::KwOutput => write!(f, "`output`"),
            TokenKind::KwInput => write!(f, "`input`"),
            TokenKind::KwAlloc => write!(f, "`alloc`"),
            TokenKind::KwNull => write!(f, "`null`"),
            TokenKind::LBrace => write!(f, "`{{`"),
            TokenKind::RBrace => write!(f, "`}}`"),
            TokenKind::LParen => write!(f, "`(`"),
            TokenKind::RParen => write!(f, "`)`"),
            TokenKind::Comma => write!(f, "`,`"),
            TokenKind::Semi => write!(f, "`;`"),
            TokenKind::Dot => write!(f, "`.`"),
            TokenKind::Colon => write!(f, "`:`"),
            TokenKind::Eq => write!(f, "`=`"),
            TokenKind::EqEq => write!(f, "`==`"),
            TokenKind::Gt => write!(f, "`>`"),
            TokenKind::Plus => write!(f, "`+`"),
            TokenKind::Minus => write!(f, "`-`"),
            TokenKind::Star => write!(f, "`*`"),
            TokenKind::Slash => write!(f, "`/`"),
            TokenKind::Amp => write!(f, "`&`"),
            TokenKind::Eof => write!(f, "end of input"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

#[derive(Debug, thiserror::Error)]
#[error("lex error at byte {}: {message}", span.start)]
pub struct LexError {
    pub span: Span,
    pub message: String,
}

pub fn tokenize(src: &str) -> Result<Vec<Token>, LexError> {
    let bytes = src.as_bytes();
    let mut pos = 0usize;
    let mut tokens = Vec::new();

    while pos < bytes.len() {
        let c = bytes[pos] as char;

        if c.is_whitespace() {
            pos += 1;
            continue;
        }

        if c == '/' && bytes.get(pos + 1) == Some(&b'/') {
            while pos < bytes.len() && bytes[pos] != b'\n' {
                pos += 1;
            }
            continue;
        }

        let start = pos;

        if c.is_ascii_digit() {
            while pos < bytes.len() && (bytes[pos] as char).is_ascii_digit() {
                pos += 1;
            }
            let text = &src[start..pos];
            let value = text.parse::<i64>().map_err(|e| LexError {
                span: Span::new(start, pos),
                message: format!("invalid integer literal `{text}`: {e}"),
            })?;
            tokens.push(Token { kind: TokenKind::Int(value), span: Span::new(start, pos) });
            continue;
        }

        if c.is_ascii_alphabetic() || c == '_' {
            while pos < bytes.len() && {
                let ch = bytes[pos] as char;
                ch.is_ascii_alphanumeric() || ch == '_'
            } {
                pos += 1;
            }
            let text = &src[start..pos];
            let kind = match text {
                "var" => TokenKind::KwVar,
                "if" => TokenKind::KwIf,
                "else" => TokenKind::KwElse,
                "while" => TokenKind::KwWhile,
                "return" => TokenKind::KwReturn,
                "output" => TokenKind::KwOutput,
                "input" => TokenKind::KwInput,
                "alloc" => TokenKind::KwAlloc,
                "null" => TokenKind::KwNull,
                _ => TokenKind::Ident(text.to_string()),
            };
            tokens.push(Token { kind, span: Span::new(start, pos) });
            continue;
        }

        macro_rules! single {
            ($kind:expr) => {{
                pos += 1;
                tokens.push(Token { kind: $kind, span: Span::new(start, pos) });
            }};
        }

        match c {
            '{' => single!(TokenKind::LBrace),
            '}' => single!(TokenKind::RBrace),
            '(' => single!(TokenKind::LParen),
            ')' => single!(TokenKind::RParen),
            ',' => single!(TokenKind::Comma),
            ';' => single!(TokenKind::Semi),
            '.' => single!(TokenKind::Dot),
            ':' => single!(TokenKind::Colon),
            '>' => single!(TokenKind::Gt),
            '+' => single!(TokenKind::Plus),
            '-' => single!(TokenKind::Minus),
            '*' => single!(TokenKind::Star),
            '/' => single!(TokenKind::Slash),
            '&' => single!(TokenKind::Amp),
            '=' => {
                if bytes.get(pos + 1) == Some(&b'=') {
                    pos += 2;
                    tokens.push(Token { kind: TokenKind::EqEq, span: Span::new(start, pos) });
                } else {
                    single!(TokenKind::Eq)
                }
            }
            other => {
                return Err(LexError {
                    span: Span::new(start, start + 1),
                    message: format!("unexpected character `{other}`"),
                })
            }
        }
    }

    let eof = tokens.last().map_or(0, |t| t.span.end);
    tokens.push(Token { kind: TokenKind::Eof, span: Span::new(eof, eof) });
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenizes_keywords_and_punctuation() {
        let toks = tokenize("main(){ var x; x = input; return x; }").unwrap();
        let kinds: Vec<_> = toks.into_iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Ident("main".into()),
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::LBrace,
                TokenKind::KwVar,
                TokenKind::Ident("x".into()),
                TokenKind::Semi,
                TokenKind::Ident("x".into()),
                TokenKind::Eq,
                TokenKind::KwInput,
                TokenKind::Semi,
                TokenKind::KwReturn,
                TokenKind::Ident("x".into()),
                TokenKind::Semi,
                TokenKind::RBrace,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn skips_line_comments() {
        let toks = tokenize("// hello\n42").unwrap();
        assert_eq!(toks[0].kind, TokenKind::Int(42));
    }

    #[test]
    fn distinguishes_eq_and_eqeq() {
        let toks = tokenize("= ==").unwrap();
        assert_eq!(toks[0].kind, TokenKind::Eq);
        assert_eq!(toks[1].kind, TokenKind::EqEq);
    }

    #[test]
    fn rejects_unknown_character() {
        assert!(tokenize("x = 1 $ 2;").is_err());
    }
}
