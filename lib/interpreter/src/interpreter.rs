use errors::{Diagnostic, Diagnostics};
use log::trace;
use parser::Expr;
use scanner::{Token, TokenKind};

mod value;
pub use value::Value;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RuntimeErrorType {
    #[error("Invalid literal.")]
    InvalidLiteral,
    #[error("Operand must be a number.")]
    UnaryMinusOnNonNumber(Value),
    #[error("Operand must be a boolean.")]
    UnaryNotOnNonBoolean(Value),
    #[error("Invalid unary operator.")]
    InvalidUnaryOperator,
    #[error("Invalid string concatenation.")]
    InvalidConcatenation(Value, Value),
    #[error("Operands must be numbers.")]
    BinaryOpOnNonNumbers(Value, Value),
    #[error("Invalid binary operator.")]
    InvalidBinaryOperator,
}

/// An evaluation failure, located at the operator or literal that caused it.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("{error}")]
pub struct RuntimeError {
    pub error: RuntimeErrorType,
    pub token: Token,
}

impl RuntimeError {
    fn new(error: RuntimeErrorType, token: &Token) -> Self {
        Self { error, token: token.clone() }
    }
}

impl From<RuntimeError> for Diagnostic {
    fn from(e: RuntimeError) -> Self {
        Diagnostic::at(e.token.line, e.token.location(), e.error)
    }
}

/// Runs the whole pipeline on one self-contained input.
pub fn run_source(source: &str) -> Result<Value, Diagnostics> {
    let tokens = scanner::tokenize(source)?;
    let expr = parser::parse(tokens)?;
    Interpreter::new().evaluate(&expr).map_err(|e| Diagnostic::from(e).into())
}

#[derive(Debug, Default)]
pub struct Interpreter;

impl Interpreter {
    pub fn new() -> Self {
        Self
    }

    /// Evaluates `expr` children first; the first failure aborts the whole walk.
    pub fn evaluate(&self, expr: &Expr) -> Result<Value, RuntimeError> {
        let value = match expr {
            Expr::Literal(token) => Self::literal(token)?,

            Expr::Grouping(inner) => self.evaluate(inner)?,

            Expr::Unary { operator, right } => {
                let right = self.evaluate(right)?;
                Self::unary(operator, right)?
            }

            Expr::Binary { left, operator, right } => {
                let left = self.evaluate(left)?;
                let right = self.evaluate(right)?;
                Self::binary(operator, left, right)?
            }
        };

        trace!("{expr} => {value} ({})", value.type_name());
        Ok(value)
    }

    fn literal(token: &Token) -> Result<Value, RuntimeError> {
        match token.kind {
            TokenKind::Number => token
                .lexeme
                .parse::<f64>()
                .map(Value::from)
                .map_err(|_| RuntimeError::new(RuntimeErrorType::InvalidLiteral, token)),
            TokenKind::Str => Ok(token.lexeme.as_str().into()),
            TokenKind::True => Ok(true.into()),
            TokenKind::False => Ok(false.into()),
            _ => Err(RuntimeError::new(RuntimeErrorType::InvalidLiteral, token)),
        }
    }

    fn unary(operator: &Token, right: Value) -> Result<Value, RuntimeError> {
        use RuntimeErrorType::*;
        let result: Result<Value, RuntimeErrorType> = match (operator.kind, right) {
            (TokenKind::Minus, Value::Number(n)) => Ok((-n).into()),
            (TokenKind::Minus, v) => Err(UnaryMinusOnNonNumber(v)),
            (TokenKind::Bang, Value::Bool(b)) => Ok((!b).into()),
            (TokenKind::Bang, v) => Err(UnaryNotOnNonBoolean(v)),
            _ => Err(InvalidUnaryOperator),
        };
        result.map_err(|e| RuntimeError::new(e, operator))
    }

    /// Text on either side turns the operation into a concatenation, whatever
    /// the operator. Otherwise both operands must be numbers.
    fn binary(operator: &Token, left: Value, right: Value) -> Result<Value, RuntimeError> {
        use RuntimeErrorType::*;
        let result: Result<Value, RuntimeErrorType> = match (&left, &right) {
            (Value::Str(l), r) => match r.as_concat_text() {
                Some(r) => Ok(format!("{l}{r}").into()),
                None => Err(InvalidConcatenation(left.clone(), right.clone())),
            },
            (l, Value::Str(r)) => match l.as_concat_text() {
                Some(l) => Ok(format!("{l}{r}").into()),
                None => Err(InvalidConcatenation(left.clone(), right.clone())),
            },
            (Value::Number(l), Value::Number(r)) => Self::numeric(operator.kind, *l, *r),
            _ => Err(BinaryOpOnNonNumbers(left.clone(), right.clone())),
        };
        result.map_err(|e| RuntimeError::new(e, operator))
    }

    fn numeric(operator: TokenKind, l: f64, r: f64) -> Result<Value, RuntimeErrorType> {
        use TokenKind::*;
        Ok(match operator {
            Plus => (l + r).into(),
            Minus => (l - r).into(),
            Star => (l * r).into(),
            Slash => (l / r).into(),

            Greater => unordered(l, r, |l, r| l > r).into(),
            GreaterEqual => unordered(l, r, |l, r| l >= r).into(),
            Less => unordered(l, r, |l, r| l < r).into(),
            LessEqual => unordered(l, r, |l, r| l <= r).into(),
            EqualEqual => unordered(l, r, |l, r| l == r).into(),

            _ => return Err(RuntimeErrorType::InvalidBinaryOperator),
        })
    }
}

/// Comparison that holds whenever either side is NaN.
fn unordered(l: f64, r: f64, ordered: impl Fn(f64, f64) -> bool) -> bool {
    l.is_nan() || r.is_nan() || ordered(l, r)
}
