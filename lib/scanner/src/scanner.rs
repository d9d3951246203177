use cursor::{Cursor, SourceRange};
use errors::{Diagnostic, Diagnostics};
use log::trace;

pub mod token;
pub use token::{Token, TokenKind};
use TokenKind::*;

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum ScanError {
    #[error("Unexpected character.")]
    UnexpectedCharacter,
    #[error("Unterminated string.")]
    UnterminatedString,
    #[error("Unterminated comment.")]
    UnterminatedComment,
}

pub struct Scanner<'a> {
    start: Cursor<'a>,
    current: Cursor<'a>,
    tokens: Vec<Token>,
    diagnostics: Diagnostics,
}

/// Scans `source`, returning the tokens only if no lexical error occurred.
pub fn tokenize(source: &str) -> Result<Vec<Token>, Diagnostics> {
    let (tokens, diagnostics) = Scanner::new(source).scan_tokens();
    if diagnostics.is_empty() {
        Ok(tokens)
    } else {
        Err(diagnostics)
    }
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        let cursor = Cursor::new(source);
        Self {
            start: cursor.clone(),
            current: cursor,
            tokens: Vec::new(),
            diagnostics: Diagnostics::default(),
        }
    }

    /// Scans the whole source. Lexical errors never stop the scan: the offending
    /// input is skipped and reported, so the token list is always complete up to
    /// the trailing `EndOfFile`.
    pub fn scan_tokens(mut self) -> (Vec<Token>, Diagnostics) {
        loop {
            self.start = self.current.clone();
            let Some(c) = self.current.next() else { break };

            match c {
                '(' => self.add_token(LeftParen),
                ')' => self.add_token(RightParen),
                '{' => self.add_token(LeftBrace),
                '}' => self.add_token(RightBrace),
                ',' => self.add_token(Comma),
                '.' => self.add_token(Dot),
                '-' => self.add_token(Minus),
                '+' => self.add_token(Plus),
                ';' => self.add_token(Semicolon),
                '*' => self.add_token(Star),

                '!' => self.add_either('=', BangEqual, Bang),
                '=' => self.add_either('=', EqualEqual, Equal),
                '<' => self.add_either('=', LessEqual, Less),
                '>' => self.add_either('=', GreaterEqual, Greater),

                '/' => {
                    if self.current.next_if_eq('/') {
                        self.current.skip_until('\n');
                    } else if self.current.next_if_eq('*') {
                        self.block_comment();
                    } else {
                        self.add_token(Slash)
                    }
                }
                '#' => self.current.skip_until('\n'),

                // Line counting happens in the cursor
                ' ' | '\r' | '\t' | '\n' => (),

                '"' => self.string(),
                d if d.is_ascii_digit() => self.number(),
                a if is_alpha(a) => self.identifier(),

                _ => self.error(ScanError::UnexpectedCharacter),
            }
        }

        self.tokens.push(Token::eof(self.current.offset(), self.current.line()));
        (self.tokens, self.diagnostics)
    }

    fn add_token(&mut self, kind: TokenKind) {
        let range = SourceRange::new(self.start.clone(), self.current.clone());
        let token = Token::new(kind, &range);
        trace!("Scanned {:?}", token);
        self.tokens.push(token);
    }

    fn add_either(&mut self, second: char, matched: TokenKind, single: TokenKind) {
        if self.current.next_if_eq(second) {
            self.add_token(matched)
        } else {
            self.add_token(single)
        }
    }

    fn error(&mut self, error: ScanError) {
        trace!("Scan error at {:?}: {error}", self.current);
        self.diagnostics.push(Diagnostic::new(self.current.line(), error));
    }

    fn string(&mut self) {
        loop {
            match self.current.next() {
                Some('"') => break,
                Some(_) => (),
                None => return self.error(ScanError::UnterminatedString),
            }
        }

        let range = SourceRange::new(self.start.clone(), self.current.clone());
        let quoted = range.lexeme();
        let token = Token::with_lexeme(Str, &quoted[1..quoted.len() - 1], &range);
        trace!("Scanned {:?}", token);
        self.tokens.push(token);
    }

    fn number(&mut self) {
        self.digits();

        if self.current.peek() == Some('.')
            && self.current.peek_next().is_some_and(|c| c.is_ascii_digit())
        {
            self.current.next();
            self.digits();
        }

        self.add_token(Number)
    }

    fn digits(&mut self) {
        while self.current.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.current.next();
        }
    }

    fn identifier(&mut self) {
        while self.current.peek().is_some_and(|c| is_alpha(c) || c.is_ascii_digit()) {
            self.current.next();
        }

        let text = self.start.slice_until(&self.current);
        self.add_token(TokenKind::keyword(text).unwrap_or(Identifier))
    }

    fn block_comment(&mut self) {
        loop {
            match (self.current.peek(), self.current.peek_next()) {
                (Some('*'), Some('/')) => {
                    self.current.next();
                    self.current.next();
                    return;
                }
                (Some(_), _) => {
                    self.current.next();
                }
                (None, _) => return self.error(ScanError::UnterminatedComment),
            }
        }
    }
}

fn is_alpha(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}
