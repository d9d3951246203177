mod expr;
pub use expr::Expr;

use errors::{Diagnostic, Diagnostics};
use log::{debug, trace};
use scanner::{Token, TokenKind};

use TokenKind::*;

#[derive(Debug)]
pub struct ParserError {
    error: ParserErrorType,
    token: Token,
}

impl From<ParserError> for Diagnostic {
    fn from(error: ParserError) -> Self {
        Diagnostic::at(error.token.line, error.token.location(), error.error)
    }
}

impl ParserError {
    fn new(error: ParserErrorType, token: Token) -> Self {
        Self { token, error }
    }
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum ParserErrorType {
    #[error("Expect expression.")]
    ExpectedExpression,
    #[error("Expect ')' after expression.")]
    MissingRightParen,
    #[error("Expect end of expression.")]
    ExpectedEndOfExpression,
}

type Result<T> = std::result::Result<T, ParserError>;

/// Parses a complete token sequence into a single expression.
pub fn parse(tokens: Vec<Token>) -> std::result::Result<Expr, Diagnostics> {
    Parser::new(tokens).parse()
}

/// Recursive-descent parser over a token sequence.
///
/// Every grouping and unary operator costs a few stack frames, so nesting
/// depth is bounded by the thread's stack. A few hundred levels fit in the
/// 2 MiB default of spawned threads; deeper input overflows the stack.
#[derive(Debug)]
pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
}

impl Parser {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map(|t| t.kind) != Some(EndOfFile) {
            let eof = match tokens.last() {
                Some(last) => Token::eof(last.position + last.length, last.line),
                None => Token::eof(0, errors::Line(1)),
            };
            tokens.push(eof);
        }
        Self { tokens, current: 0 }
    }

    pub fn parse(mut self) -> std::result::Result<Expr, Diagnostics> {
        let result = self.expression().and_then(|expr| {
            self.consume(EndOfFile, ParserErrorType::ExpectedEndOfExpression)?;
            Ok(expr)
        });

        match result {
            Ok(expr) => {
                debug!("Parsed {expr}");
                Ok(expr)
            }
            Err(e) => {
                trace!("Hit error: {:?}, syncing...", e);
                self.synchronize();
                Err(Diagnostic::from(e).into())
            }
        }
    }

    fn expression(&mut self) -> Result<Expr> {
        self.equality()
    }

    fn equality(&mut self) -> Result<Expr> {
        let mut expr = self.comparison()?;

        while let BangEqual | EqualEqual = self.peek().kind {
            let operator = self.advance();
            let right = Box::new(self.comparison()?);
            expr = Expr::Binary { left: Box::new(expr), operator, right }
        }
        Ok(expr)
    }

    fn comparison(&mut self) -> Result<Expr> {
        let mut expr = self.addition()?;

        while let Greater | GreaterEqual | Less | LessEqual = self.peek().kind {
            let operator = self.advance();
            let right = Box::new(self.addition()?);
            expr = Expr::Binary { left: Box::new(expr), operator, right }
        }
        Ok(expr)
    }

    fn addition(&mut self) -> Result<Expr> {
        let mut expr = self.multiplication()?;

        while let Minus | Plus = self.peek().kind {
            let operator = self.advance();
            let right = Box::new(self.multiplication()?);
            expr = Expr::Binary { left: Box::new(expr), operator, right }
        }
        Ok(expr)
    }

    fn multiplication(&mut self) -> Result<Expr> {
        let mut expr = self.unary()?;

        while let Slash | Star = self.peek().kind {
            let operator = self.advance();
            let right = Box::new(self.unary()?);
            expr = Expr::Binary { left: Box::new(expr), operator, right }
        }
        Ok(expr)
    }

    fn unary(&mut self) -> Result<Expr> {
        if let Bang | Minus = self.peek().kind {
            let operator = self.advance();
            let right = Box::new(self.unary()?);
            return Ok(Expr::Unary { operator, right });
        }
        self.primary()
    }

    fn primary(&mut self) -> Result<Expr> {
        match self.peek().kind {
            False | True | Number | Str => Ok(Expr::Literal(self.advance())),
            LeftParen => {
                self.advance();
                let expr = self.expression()?;

                self.consume(RightParen, ParserErrorType::MissingRightParen)?;

                Ok(Expr::Grouping(Box::new(expr)))
            }
            _ => Err(ParserError::new(ParserErrorType::ExpectedExpression, self.peek().clone())),
        }
    }

    fn consume(&mut self, kind: TokenKind, error_type: ParserErrorType) -> Result<Token> {
        if self.peek().kind == kind {
            Ok(self.advance())
        } else {
            Err(ParserError::new(error_type, self.peek().clone()))
        }
    }

    /// Discards tokens until the start of what could be the next statement.
    fn synchronize(&mut self) {
        while !self.is_at_end() {
            let token = self.advance();
            trace!("Syncing... skipped {:?}", token);
            if token.kind == Semicolon {
                return;
            }

            if let Class | Fun | Var | For | If | While | Print | Return = self.peek().kind {
                return;
            }
        }
    }
}

// Helpers
impl Parser {
    fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    /// Never moves past the trailing `EndOfFile`.
    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if !self.is_at_end() {
            self.current += 1;
        }
        token
    }

    fn is_at_end(&self) -> bool {
        self.peek().kind == EndOfFile
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use scanner::tokenize;

    use super::*;

    fn parse_source(source: &str) -> std::result::Result<Expr, Diagnostics> {
        parse(tokenize(source).unwrap())
    }

    fn ast(source: &str) -> String {
        parse_source(source).unwrap().to_string()
    }

    fn error(source: &str) -> String {
        parse_source(source).unwrap_err().to_string()
    }

    #[test]
    fn literals() {
        assert_eq!(ast("123"), "123");
        assert_eq!(ast("4.5"), "4.5");
        assert_eq!(ast("\"hi there\""), "\"hi there\"");
        assert_eq!(ast("true"), "true");
        assert_eq!(ast("false"), "false");
    }

    #[test]
    fn precedence() {
        assert_eq!(ast("1 + 2 * 3"), "(+ 1 (* 2 3))");
        assert_eq!(ast("(1 + 2) * 3"), "(* (group (+ 1 2)) 3)");
        assert_eq!(ast("1 < 2 == 3 >= 4"), "(== (< 1 2) (>= 3 4))");
        assert_eq!(ast("-1 + (2 * 3)"), "(+ (- 1) (group (* 2 3)))");
        assert_eq!(ast("1 + 2 > 3 / 4 - 5"), "(> (+ 1 2) (- (/ 3 4) 5))");
        assert_eq!(ast("!true != false"), "(!= (! true) false)");
    }

    #[test]
    fn left_associativity() {
        assert_eq!(ast("1 - 2 - 3"), "(- (- 1 2) 3)");
        assert_eq!(ast("8 / 4 / 2"), "(/ (/ 8 4) 2)");
        assert_eq!(ast("1 == 2 == 3"), "(== (== 1 2) 3)");
    }

    #[test]
    fn nested_unary() {
        assert_eq!(ast("!!true"), "(! (! true))");
        assert_eq!(ast("--1"), "(- (- 1))");
        assert_eq!(ast("-(-1)"), "(- (group (- 1)))");
    }

    #[test]
    fn binary_keeps_operator_token() {
        let expr = parse_source("1 +\n 2").unwrap();
        let Expr::Binary { operator, .. } = &expr else { panic!("expected binary, got {expr:?}") };
        assert_eq!((operator.kind, operator.position, operator.line), (Plus, 2, errors::Line(1)));
    }

    #[test]
    fn deep_nesting() {
        let depth = 100;
        let source = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
        let expected = format!("{}1{}", "(group ".repeat(depth), ")".repeat(depth));
        assert_eq!(ast(&source), expected);

        let unclosed = format!("{}1", "(".repeat(depth));
        assert_eq!(error(&unclosed), "[line 1] Error at end: Expect ')' after expression.");
    }

    #[test]
    fn missing_right_paren() {
        assert_eq!(error("(1 + 2"), "[line 1] Error at end: Expect ')' after expression.");
        assert_eq!(error("(1 2)"), "[line 1] Error at '2': Expect ')' after expression.");
    }

    #[test]
    fn expected_expression() {
        assert_eq!(error(""), "[line 1] Error at end: Expect expression.");
        assert_eq!(error("1 +"), "[line 1] Error at end: Expect expression.");
        assert_eq!(error("1 +\n\n*"), "[line 3] Error at '*': Expect expression.");
        assert_eq!(error("null"), "[line 1] Error at 'null': Expect expression.");
        assert_eq!(error("foo"), "[line 1] Error at 'foo': Expect expression.");
        assert_eq!(error("()"), "[line 1] Error at ')': Expect expression.");
    }

    #[test]
    fn trailing_tokens() {
        assert_eq!(error("1 2"), "[line 1] Error at '2': Expect end of expression.");
        assert_eq!(error("(1))"), "[line 1] Error at ')': Expect end of expression.");
        assert_eq!(error("1;"), "[line 1] Error at ';': Expect end of expression.");
    }

    #[test]
    fn single_error_per_input() {
        let errors = parse_source("(1 + ) * (").unwrap_err();
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn synchronize_stops_after_semicolon() {
        let mut parser = Parser::new(tokenize("(1 + ; 2").unwrap());
        assert!(parser.expression().is_err());
        parser.synchronize();
        assert_eq!(parser.peek().kind, Number);
        assert_eq!(parser.peek().lexeme, "2");
    }

    #[test]
    fn synchronize_stops_before_statement_keyword() {
        let mut parser = Parser::new(tokenize("1 + + 2 print 3").unwrap());
        assert!(parser.expression().is_err());
        parser.synchronize();
        assert_eq!(parser.peek().kind, Print);

        let mut parser = Parser::new(tokenize("* 1 2").unwrap());
        assert!(parser.expression().is_err());
        parser.synchronize();
        assert!(parser.is_at_end());
    }

    #[test]
    fn missing_end_of_file_is_tolerated() {
        let mut tokens = tokenize("1 +").unwrap();
        tokens.pop();
        assert_eq!(
            Parser::new(tokens).parse().unwrap_err().to_string(),
            "[line 1] Error at end: Expect expression."
        );
        assert_eq!(
            Parser::new(Vec::new()).parse().unwrap_err().to_string(),
            "[line 1] Error at end: Expect expression."
        );
    }
}
