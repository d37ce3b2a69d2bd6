//! Tokenizer for dsql statements.
//!
//! Words are classified case-insensitively against fixed sets of keywords,
//! type names, constraints and word operators; the lexeme keeps its original
//! casing. Quoted strings keep their quotes here; the parser strips them.
//! Classification is total: any character that starts no known token becomes
//! a one-character [`TokenKind::Unknown`], which the parser reports.

use std::fmt;
use std::iter::Peekable;
use std::str::CharIndices;

/// Lexical class of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// A statement or clause keyword (`select`, `from`, `and`, ...).
    Keyword,
    /// A table or attribute name.
    Identifier,
    /// `*`
    Wildcard,
    /// An attribute type name (`string`, `numberset`, ...).
    Type,
    /// A key or index constraint (`hash`, `range`, ...).
    Constraint,
    /// A quoted string literal.
    String,
    /// A numeric literal.
    Number,
    /// A comparison operator (`=`, `<`, `<=`, `>`, `>=`, `like`).
    Operator,
    /// `,`
    Comma,
    /// `;`
    Semicolon,
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// End of input.
    EndOfInput,
    /// Anything else.
    Unknown,
}

impl TokenKind {
    /// Human-readable name used in error messages.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Keyword => "Keyword",
            Self::Identifier => "Identifier",
            Self::Wildcard => "Wildcard",
            Self::Type => "Type",
            Self::Constraint => "Constraint",
            Self::String => "String",
            Self::Number => "Number",
            Self::Operator => "Operator",
            Self::Comma => "','",
            Self::Semicolon => "';'",
            Self::LeftParen => "'('",
            Self::RightParen => "')'",
            Self::EndOfInput => "EOF",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A classified lexeme and its byte offset in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Lexeme {
    kind: TokenKind,
    text: String,
    offset: usize,
}

/// Classify a bare word. `word` must already be lowercased.
fn classify_word(word: &str) -> TokenKind {
    match word {
        "select" | "insert" | "update" | "delete" | "drop" | "create" | "from" | "where"
        | "set" | "limit" | "order" | "by" | "asc" | "desc" | "into" | "values" | "table"
        | "with" | "and" | "or" | "between" => TokenKind::Keyword,
        "string" | "number" | "stringset" | "numberset" | "binary" | "binaryset" => {
            TokenKind::Type
        }
        "hash" | "range" | "index" | "all" | "projection" => TokenKind::Constraint,
        "like" => TokenKind::Operator,
        _ => TokenKind::Identifier,
    }
}

/// Returns `true` if `c` can start a word.
fn is_word_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

/// Returns `true` if `c` can continue a word.
fn is_word_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Single pass over the source producing lexemes.
struct Scanner<'a> {
    src: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> Scanner<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            chars: src.char_indices().peekable(),
        }
    }

    fn scan_all(mut self) -> Vec<Lexeme> {
        let mut out = Vec::new();
        loop {
            let lexeme = self.next_lexeme();
            let done = lexeme.kind == TokenKind::EndOfInput;
            out.push(lexeme);
            if done {
                return out;
            }
        }
    }

    fn skip_whitespace(&mut self) {
        while self.chars.peek().is_some_and(|(_, c)| c.is_whitespace()) {
            self.chars.next();
        }
    }

    /// Byte offset of the next unread character.
    fn pos(&mut self) -> usize {
        self.chars.peek().map_or(self.src.len(), |&(i, _)| i)
    }

    fn lexeme(&mut self, kind: TokenKind, start: usize) -> Lexeme {
        let end = self.pos();
        Lexeme {
            kind,
            text: self.src[start..end].to_owned(),
            offset: start,
        }
    }

    fn next_lexeme(&mut self) -> Lexeme {
        self.skip_whitespace();

        let Some(&(start, ch)) = self.chars.peek() else {
            return Lexeme {
                kind: TokenKind::EndOfInput,
                text: String::new(),
                offset: self.src.len(),
            };
        };

        match ch {
            '*' | ',' | ';' | '(' | ')' | '=' => {
                self.chars.next();
                let kind = match ch {
                    '*' => TokenKind::Wildcard,
                    ',' => TokenKind::Comma,
                    ';' => TokenKind::Semicolon,
                    '(' => TokenKind::LeftParen,
                    ')' => TokenKind::RightParen,
                    _ => TokenKind::Operator,
                };
                self.lexeme(kind, start)
            }
            '<' | '>' => {
                self.chars.next();
                if self.chars.peek().is_some_and(|&(_, c)| c == '=') {
                    self.chars.next();
                }
                self.lexeme(TokenKind::Operator, start)
            }
            '"' | '\'' => self.read_string(start, ch),
            '-' => {
                self.chars.next();
                if self.chars.peek().is_some_and(|(_, c)| c.is_ascii_digit()) {
                    self.read_number(start)
                } else {
                    self.lexeme(TokenKind::Unknown, start)
                }
            }
            c if c.is_ascii_digit() => self.read_number(start),
            c if is_word_start(c) => self.read_word(start),
            _ => {
                self.chars.next();
                self.lexeme(TokenKind::Unknown, start)
            }
        }
    }

    fn eat_digits(&mut self) -> bool {
        let mut any = false;
        while self.chars.peek().is_some_and(|(_, c)| c.is_ascii_digit()) {
            self.chars.next();
            any = true;
        }
        any
    }

    /// Digits with an optional fraction and exponent. A sign, when present,
    /// has already been consumed.
    fn read_number(&mut self, start: usize) -> Lexeme {
        self.eat_digits();

        let mut lookahead = self.chars.clone();
        if lookahead.next().is_some_and(|(_, c)| c == '.')
            && lookahead.peek().is_some_and(|(_, c)| c.is_ascii_digit())
        {
            self.chars.next();
            self.eat_digits();
        }

        let mut lookahead = self.chars.clone();
        if lookahead.next().is_some_and(|(_, c)| c == 'e' || c == 'E') {
            if lookahead.peek().is_some_and(|&(_, c)| c == '+' || c == '-') {
                lookahead.next();
            }
            if lookahead.peek().is_some_and(|(_, c)| c.is_ascii_digit()) {
                self.chars = lookahead;
                self.eat_digits();
            }
        }

        self.lexeme(TokenKind::Number, start)
    }

    /// A string quoted with `quote`. A backslash escapes the next character.
    /// An unterminated string swallows the rest of the input as `Unknown`.
    fn read_string(&mut self, start: usize, quote: char) -> Lexeme {
        self.chars.next(); // opening quote
        let mut escaped = false;
        while let Some((_, c)) = self.chars.next() {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == quote {
                return self.lexeme(TokenKind::String, start);
            }
        }
        self.lexeme(TokenKind::Unknown, start)
    }

    fn read_word(&mut self, start: usize) -> Lexeme {
        while self.chars.peek().is_some_and(|&(_, c)| is_word_continue(c)) {
            self.chars.next();
        }
        let end = self.pos();
        let kind = classify_word(&self.src[start..end].to_lowercase());
        self.lexeme(kind, start)
    }
}

/// Token stream over a statement with one token of lookahead.
///
/// [`Lexer::next`] consumes a token and makes it current; [`Lexer::text`]
/// returns the current lexeme. [`Lexer::peek`] and [`Lexer::peek_text`]
/// inspect the upcoming token without consuming it. Once the end of input is
/// reached every further call yields [`TokenKind::EndOfInput`].
#[derive(Debug, Clone)]
pub struct Lexer {
    lexemes: Vec<Lexeme>,
    /// Index of the next token to hand out.
    pos: usize,
    /// Index of the current token, if any has been consumed.
    current: Option<usize>,
}

impl Lexer {
    /// Tokenize `source`.
    #[must_use]
    pub fn new(source: &str) -> Self {
        let lexemes = Scanner::new(source).scan_all();
        tracing::trace!(
            tokens = ?lexemes.iter().map(|l| l.kind).collect::<Vec<_>>(),
            "tokenized statement"
        );
        Self {
            lexemes,
            pos: 0,
            current: None,
        }
    }

    /// Index of the end-of-input lexeme, always the last one.
    fn last(&self) -> usize {
        self.lexemes.len() - 1
    }

    /// Consume the next token and return its kind.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> TokenKind {
        let idx = self.pos.min(self.last());
        self.current = Some(idx);
        if self.pos < self.last() {
            self.pos += 1;
        }
        self.lexemes[idx].kind
    }

    /// Kind of the token [`Lexer::next`] would return.
    #[must_use]
    pub fn peek(&self) -> TokenKind {
        self.lexemes[self.pos.min(self.last())].kind
    }

    /// Lexeme of the token [`Lexer::next`] would return.
    #[must_use]
    pub fn peek_text(&self) -> &str {
        &self.lexemes[self.pos.min(self.last())].text
    }

    /// Lexeme of the current token; empty before the first `next`.
    #[must_use]
    pub fn text(&self) -> &str {
        self.current.map_or("", |i| self.lexemes[i].text.as_str())
    }

    /// Byte offset of the current token in the source.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.current.map_or(0, |i| self.lexemes[i].offset)
    }

    /// All token kinds, including the trailing end of input.
    #[must_use]
    pub fn kinds(&self) -> Vec<TokenKind> {
        self.lexemes.iter().map(|l| l.kind).collect()
    }
}
