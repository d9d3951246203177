use std::fmt::{self, Display, Formatter};

use scanner::{Token, TokenKind};

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Binary { left: Box<Expr>, operator: Token, right: Box<Expr> },
    Grouping(Box<Expr>),
    Unary { operator: Token, right: Box<Expr> },
    Literal(Token),
}

/// Renders the tree in prefix form, e.g. `(+ 1 (group (* 2 3)))`.
impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Binary { left, operator, right } => {
                write!(f, "({} {} {})", operator.lexeme, left, right)
            }
            Expr::Grouping(expression) => {
                write!(f, "(group {})", expression)
            }
            Expr::Unary { operator, right } => {
                write!(f, "({} {})", operator.lexeme, right)
            }
            Expr::Literal(token) if token.kind == TokenKind::Str => {
                write!(f, "\"{}\"", token.lexeme)
            }
            Expr::Literal(token) => {
                write!(f, "{}", token.lexeme)
            }
        }
    }
}
