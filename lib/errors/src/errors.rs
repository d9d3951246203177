use std::fmt::{self, Display, Formatter};

use itertools::Itertools;

pub use cursor::Line;

/// Where on its line a diagnostic points.
#[derive(Clone, Debug, PartialEq)]
pub enum Location {
    /// Lexical errors have no token to point at.
    Unspecified,
    AtEnd,
    At(String),
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Location::Unspecified => Ok(()),
            Location::AtEnd => write!(f, " at end"),
            Location::At(lexeme) => write!(f, " at '{lexeme}'"),
        }
    }
}

#[derive(thiserror::Error, Clone, Debug, PartialEq)]
#[error("[line {line}] Error{location}: {message}")]
pub struct Diagnostic {
    pub line: Line,
    pub location: Location,
    pub message: String,
}

impl Diagnostic {
    pub fn new(line: Line, message: impl ToString) -> Self {
        Self { line, location: Location::Unspecified, message: message.to_string() }
    }

    pub fn at(line: Line, location: Location, message: impl ToString) -> Self {
        Self { line, location, message: message.to_string() }
    }
}

/// Every diagnostic a stage produced, in the order they were reported.
#[derive(
    thiserror::Error,
    Clone,
    Debug,
    Default,
    PartialEq,
    derive_more::Deref,
    derive_more::DerefMut,
    derive_more::From,
)]
pub struct Diagnostics(pub Vec<Diagnostic>);

impl From<Diagnostic> for Diagnostics {
    fn from(d: Diagnostic) -> Self {
        Self(vec![d])
    }
}

impl Display for Diagnostics {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.0.iter().join("\n"))
    }
}
