use crate::lexer::Token;
use ordo_common::{SourceId, Span};
use std::ops::Range;

/// Token cursor with lookahead and span bookkeeping for the
/// hand-written parser.
///
/// Tokens are paired with their byte ranges so every error and AST node
/// carries an accurate source location.
pub(crate) struct TokenStream<'t> {
    tokens: &'t [(Token, Range<usize>)],
    pos: usize,
    source: SourceId,
}

impl<'t> TokenStream<'t> {
    pub fn new(tokens: &'t [(Token, Range<usize>)], source: SourceId) -> Self {
        Self {
            tokens,
            pos: 0,
            source,
        }
    }

    pub fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(token, _)| token)
    }

    pub fn advance(&mut self) -> Option<&Token> {
        let token = self.tokens.get(self.pos).map(|(token, _)| token);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// Whether the current token has the same discriminant as `expected`.
    pub fn check(&self, expected: &Token) -> bool {
        matches!(self.peek(), Some(t) if std::mem::discriminant(t) == std::mem::discriminant(expected))
    }

    /// Consume `expected` or fail with an "expected …" error. `what` is
    /// the token's display form for the message.
    pub fn expect(
        &mut self,
        expected: Token,
        what: &'static str,
    ) -> Result<(), crate::ParseError> {
        if self.check(&expected) {
            self.advance();
            Ok(())
        } else {
            Err(crate::ParseError::expected(
                what,
                self.peek(),
                self.current_span(),
            ))
        }
    }

    pub fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Span from the token at position `start` through the last consumed
    /// token.
    pub fn span_from(&self, start: usize) -> Span {
        let Some((_, first)) = self.tokens.get(start) else {
            return self.current_span();
        };
        let end = if self.pos > start {
            self.tokens[self.pos - 1].1.end
        } else {
            first.end
        };
        Span::new(self.source, first.start as u32, end as u32)
    }

    /// Span of the current token, or an empty span past the final token
    /// at end of input.
    pub fn current_span(&self) -> Span {
        match self.tokens.get(self.pos) {
            Some((_, range)) => Span::new(self.source, range.start as u32, range.end as u32),
            None => {
                let end = self.tokens.last().map(|(_, range)| range.end).unwrap_or(0);
                Span::point(self.source, end as u32)
            }
        }
    }
}
