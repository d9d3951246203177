use scanner::{Token, TokenKind};

/// Tokens of every input the prompt has seen, oldest first.
///
/// Inputs are appended as they arrive and never removed. Only the trailing
/// `EndOfFile` of the previous input is dropped, so the buffer reads as one
/// continuous stream.
#[derive(Debug, Default)]
pub struct TokenHistory {
    tokens: Vec<Token>,
}

impl TokenHistory {
    pub fn extend(&mut self, tokens: impl IntoIterator<Item = Token>) {
        if self.tokens.last().is_some_and(|t| t.kind == TokenKind::EndOfFile) {
            self.tokens.pop();
        }
        self.tokens.extend(tokens);
        log::debug!("Token history now holds {} tokens", self.tokens.len());
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }
}
