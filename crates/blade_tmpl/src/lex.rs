//! Splits template text into text runs and action tokens.

use std::fmt;

const LEFT_DELIM: &str = "{{";
const RIGHT_DELIM: &str = "}}";
const RIGHT_TRIM: &str = "-}}";

/// Token classification.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TokenKind {
    /// Literal text outside actions.
    Text(String),
    /// `{{`
    LeftDelim,
    /// `}}`
    RightDelim,
    /// A bare word: keyword or function name.
    Ident(String),
    /// `.A.B`
    Field(Vec<String>),
    /// `$`, `$name`, `$.A.B`
    Variable { name: String, fields: Vec<String> },
    /// `.`
    Dot,
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Nil,
    LParen,
    RParen,
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Text(_) => write!(f, "text"),
            TokenKind::LeftDelim => write!(f, "{LEFT_DELIM}"),
            TokenKind::RightDelim => write!(f, "{RIGHT_DELIM}"),
            TokenKind::Ident(name) => write!(f, "{name:?}"),
            TokenKind::Field(path) => write!(f, "<.{}>", path.join(".")),
            TokenKind::Variable { name, fields } if fields.is_empty() => write!(f, "<{name}>"),
            TokenKind::Variable { name, fields } => write!(f, "<{name}.{}>", fields.join(".")),
            TokenKind::Dot => write!(f, "<.>"),
            TokenKind::Str(s) => write!(f, "{s:?}"),
            TokenKind::Int(i) => write!(f, "{i}"),
            TokenKind::Float(x) => write!(f, "{x}"),
            TokenKind::Bool(b) => write!(f, "{b}"),
            TokenKind::Nil => write!(f, "nil"),
            TokenKind::LParen => write!(f, "("),
            TokenKind::RParen => write!(f, ")"),
            TokenKind::Eof => write!(f, "EOF"),
        }
    }
}

/// A token and the line it starts on.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Token {
    pub kind: TokenKind,
    pub line: usize,
}

/// A lexing or parsing failure, before it is attached to a template name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SyntaxError {
    pub line: usize,
    pub message: String,
}

impl SyntaxError {
    pub(crate) fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

/// Lexes template text. The returned vector always ends with [`TokenKind::Eof`].
pub(crate) fn lex(source: &str) -> Result<Vec<Token>, SyntaxError> {
    let mut lexer = Lexer {
        source,
        pos: 0,
        line: 1,
        trim_next_text: false,
        tokens: Vec::new(),
    };
    lexer.lex_all()?;
    Ok(lexer.tokens)
}

fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

fn is_ident_start(c: char) -> bool {
    c == '_' || c.is_alphabetic()
}

fn is_ident_char(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}

/// `{{- ` trims the text before the action.
fn has_left_trim(after_delim: &str) -> bool {
    let mut chars = after_delim.chars();
    chars.next() == Some('-') && chars.next().is_some_and(is_space)
}

/// Length of a ` -}}` right delimiter at the start of `rest`, if present.
fn right_trim_len(rest: &str) -> Option<usize> {
    let spaces = rest.len() - rest.trim_start_matches(is_space).len();
    (spaces > 0 && rest[spaces..].starts_with(RIGHT_TRIM)).then_some(spaces + RIGHT_TRIM.len())
}

/// Length of the identifier at the start of `s`.
fn ident_len(s: &str) -> usize {
    s.char_indices()
        .find(|&(_, c)| !is_ident_char(c))
        .map_or(s.len(), |(i, _)| i)
}

/// Scans `.A.B...` at the start of `s`. Returns the segments and bytes consumed.
fn scan_fields(s: &str) -> (Vec<String>, usize) {
    let mut fields = Vec::new();
    let mut consumed = 0;
    loop {
        let rest = &s[consumed..];
        let mut chars = rest.chars();
        if chars.next() != Some('.') || !chars.next().is_some_and(is_ident_start) {
            break;
        }
        let len = ident_len(&rest[1..]);
        fields.push(rest[1..1 + len].to_string());
        consumed += 1 + len;
    }
    (fields, consumed)
}

struct Lexer<'a> {
    source: &'a str,
    pos: usize,
    line: usize,
    /// Set by a ` -}}` delimiter: the next text run loses its leading spaces.
    trim_next_text: bool,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    fn lex_all(&mut self) -> Result<(), SyntaxError> {
        loop {
            let rest = self.rest();
            let Some(offset) = rest.find(LEFT_DELIM) else {
                self.push_text(rest.len(), false);
                self.push(TokenKind::Eof, self.line);
                return Ok(());
            };
            let trim_left = has_left_trim(&rest[offset + LEFT_DELIM.len()..]);
            self.push_text(offset, trim_left);
            self.advance(LEFT_DELIM.len());
            if trim_left {
                self.advance(1);
            }
            if self.rest().trim_start_matches(is_space).starts_with("/*") {
                self.lex_comment()?;
            } else {
                self.lex_action()?;
            }
        }
    }

    fn rest(&self) -> &'a str {
        &self.source[self.pos..]
    }

    /// Moves forward `n` bytes, counting newlines.
    fn advance(&mut self, n: usize) {
        let skipped = &self.source[self.pos..self.pos + n];
        self.line += skipped.bytes().filter(|&b| b == b'\n').count();
        self.pos += n;
    }

    fn push(&mut self, kind: TokenKind, line: usize) {
        self.tokens.push(Token { kind, line });
    }

    fn error(&self, message: impl Into<String>) -> SyntaxError {
        SyntaxError::new(self.line, message)
    }

    /// Emits the next `len` bytes as text, applying pending trim markers.
    fn push_text(&mut self, len: usize, trim_end: bool) {
        let line = self.line;
        let start = self.pos;
        self.advance(len);
        let source = self.source;
        let mut text = &source[start..start + len];
        if std::mem::take(&mut self.trim_next_text) {
            text = text.trim_start_matches(is_space);
        }
        if trim_end {
            text = text.trim_end_matches(is_space);
        }
        if !text.is_empty() {
            self.push(TokenKind::Text(text.to_string()), line);
        }
    }

    fn lex_comment(&mut self) -> Result<(), SyntaxError> {
        let leading = self.rest().len() - self.rest().trim_start_matches(is_space).len();
        self.advance(leading + 2);
        let Some(close) = self.rest().find("*/") else {
            return Err(self.error("unclosed comment"));
        };
        self.advance(close + 2);
        if self.rest().starts_with(RIGHT_DELIM) {
            self.advance(RIGHT_DELIM.len());
        } else if let Some(len) = right_trim_len(self.rest()) {
            self.advance(len);
            self.trim_next_text = true;
        } else {
            return Err(self.error("comment ends before closing delimiter"));
        }
        Ok(())
    }

    fn lex_action(&mut self) -> Result<(), SyntaxError> {
        self.push(TokenKind::LeftDelim, self.line);
        loop {
            let rest = self.rest();
            let Some(c) = rest.chars().next() else {
                return Err(self.error("unclosed action"));
            };
            if let Some(len) = right_trim_len(rest) {
                self.advance(len);
                self.push(TokenKind::RightDelim, self.line);
                self.trim_next_text = true;
                return Ok(());
            }
            if rest.starts_with(RIGHT_DELIM) {
                self.advance(RIGHT_DELIM.len());
                self.push(TokenKind::RightDelim, self.line);
                return Ok(());
            }
            let line = self.line;
            match c {
                c if is_space(c) => self.advance(c.len_utf8()),
                '(' => {
                    self.advance(1);
                    self.push(TokenKind::LParen, line);
                }
                ')' => {
                    self.advance(1);
                    self.push(TokenKind::RParen, line);
                }
                '"' => self.lex_quote()?,
                '`' => self.lex_raw_quote()?,
                '.' => {
                    let next = rest[1..].chars().next();
                    if next.is_some_and(is_ident_start) {
                        let (fields, len) = scan_fields(rest);
                        self.advance(len);
                        self.push(TokenKind::Field(fields), line);
                    } else if next.is_some_and(|n| n.is_ascii_digit()) {
                        self.lex_number()?;
                    } else {
                        self.advance(1);
                        self.push(TokenKind::Dot, line);
                    }
                }
                '$' => {
                    let name_len = ident_len(&rest[1..]);
                    let name = rest[..1 + name_len].to_string();
                    let (fields, fields_len) = scan_fields(&rest[1 + name_len..]);
                    self.advance(1 + name_len + fields_len);
                    self.push(TokenKind::Variable { name, fields }, line);
                }
                '-' | '+' | '0'..='9' => self.lex_number()?,
                c if is_ident_start(c) => {
                    let len = ident_len(rest);
                    let word = &rest[..len];
                    let kind = match word {
                        "true" => TokenKind::Bool(true),
                        "false" => TokenKind::Bool(false),
                        "nil" => TokenKind::Nil,
                        _ => TokenKind::Ident(word.to_string()),
                    };
                    self.advance(len);
                    self.push(kind, line);
                }
                other => return Err(self.error(format!("unexpected {other:?} in action"))),
            }
        }
    }

    fn lex_number(&mut self) -> Result<(), SyntaxError> {
        let rest = self.rest();
        let bytes = rest.as_bytes();
        let mut len = 0;
        let mut is_float = false;
        if matches!(bytes.first(), Some(b'-' | b'+')) {
            len += 1;
        }
        let digits_start = len;
        while len < bytes.len() && bytes[len].is_ascii_digit() {
            len += 1;
        }
        if len < bytes.len() && bytes[len] == b'.' {
            is_float = true;
            len += 1;
            while len < bytes.len() && bytes[len].is_ascii_digit() {
                len += 1;
            }
        }
        let has_digits = rest[digits_start..len].bytes().any(|b| b.is_ascii_digit());
        if has_digits && len < bytes.len() && matches!(bytes[len], b'e' | b'E') {
            is_float = true;
            len += 1;
            if len < bytes.len() && matches!(bytes[len], b'-' | b'+') {
                len += 1;
            }
            while len < bytes.len() && bytes[len].is_ascii_digit() {
                len += 1;
            }
        }
        let text = &rest[..len];
        let trailing_junk = rest[len..].chars().next().is_some_and(is_ident_char);
        if !has_digits || trailing_junk {
            let end = len + ident_len(&rest[len..]);
            return Err(self.error(format!("bad number syntax: {:?}", &rest[..end.max(1)])));
        }
        let kind = if is_float {
            text.parse::<f64>()
                .map(TokenKind::Float)
                .map_err(|_| self.error(format!("bad number syntax: {text:?}")))?
        } else {
            text.parse::<i64>()
                .map(TokenKind::Int)
                .map_err(|_| self.error(format!("number out of range: {text}")))?
        };
        let line = self.line;
        self.advance(len);
        self.push(kind, line);
        Ok(())
    }

    fn lex_quote(&mut self) -> Result<(), SyntaxError> {
        let line = self.line;
        let mut value = String::new();
        let mut chars = self.rest().char_indices().skip(1);
        let end = loop {
            match chars.next() {
                None | Some((_, '\n')) => return Err(self.error("unterminated quoted string")),
                Some((i, '"')) => break i + 1,
                Some((_, '\\')) => match chars.next() {
                    Some((_, 'n')) => value.push('\n'),
                    Some((_, 't')) => value.push('\t'),
                    Some((_, 'r')) => value.push('\r'),
                    Some((_, '\\')) => value.push('\\'),
                    Some((_, '"')) => value.push('"'),
                    Some((_, other)) => {
                        return Err(self.error(format!("invalid escape sequence \\{other}")))
                    }
                    None => return Err(self.error("unterminated quoted string")),
                },
                Some((_, c)) => value.push(c),
            }
        };
        self.advance(end);
        self.push(TokenKind::Str(value), line);
        Ok(())
    }

    fn lex_raw_quote(&mut self) -> Result<(), SyntaxError> {
        let line = self.line;
        let Some(close) = self.rest()[1..].find('`') else {
            return Err(self.error("unterminated raw quoted string"));
        };
        let value = self.rest()[1..1 + close].to_string();
        self.advance(close + 2);
        self.push(TokenKind::Str(value), line);
        Ok(())
    }
}
