use std::fmt::{self, Display, Formatter};

use cursor::{Line, SourceRange};
use errors::Location;

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Verbatim source text. For string literals, the text between the quotes.
    pub lexeme: String,
    /// Byte offset of the first character of the token.
    pub position: usize,
    /// Byte length of the whole token, quotes included.
    pub length: usize,
    /// Line the token ends on.
    pub line: Line,
}

impl Token {
    pub fn new(kind: TokenKind, range: &SourceRange) -> Self {
        Self::with_lexeme(kind, range.lexeme(), range)
    }

    pub fn with_lexeme(kind: TokenKind, lexeme: &str, range: &SourceRange) -> Self {
        Self {
            kind,
            lexeme: lexeme.to_string(),
            position: range.position(),
            length: range.length(),
            line: range.line(),
        }
    }

    pub fn eof(position: usize, line: Line) -> Self {
        Self { kind: TokenKind::EndOfFile, lexeme: String::new(), position, length: 0, line }
    }

    /// Where a diagnostic about this token points.
    pub fn location(&self) -> Location {
        match self.kind {
            TokenKind::EndOfFile => Location::AtEnd,
            _ => Location::At(self.lexeme.clone()),
        }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.lexeme)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
    // Single-character tokens.
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    Comma,
    Dot,
    Minus,
    Plus,
    Semicolon,
    Slash,
    Star,

    // One or two character tokens.
    Bang,
    BangEqual,
    Equal,
    EqualEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,

    // Literals.
    Identifier,
    #[strum(serialize = "STRING")]
    Str,
    Number,

    // Keywords.
    And,
    Class,
    Else,
    False,
    Fun,
    For,
    If,
    Nil,
    Or,
    Print,
    Return,
    Super,
    This,
    True,
    Var,
    While,

    EndOfFile,
}

impl TokenKind {
    pub fn keyword(text: &str) -> Option<Self> {
        use TokenKind::*;
        Some(match text {
            "and" => And,
            "class" => Class,
            "else" => Else,
            "false" => False,
            "for" => For,
            "fun" => Fun,
            "if" => If,
            "null" => Nil,
            "or" => Or,
            "print" => Print,
            "return" => Return,
            "super" => Super,
            "this" => This,
            "true" => True,
            "var" => Var,
            "while" => While,
            _ => return None,
        })
    }
}
