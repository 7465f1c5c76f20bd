use crate::lexer::Token;
use miette::{Diagnostic, SourceSpan};
use ordo_common::Span;
use thiserror::Error;

/// Errors produced while lexing or parsing constant-file syntax.
///
/// Every variant is fatal to the file being parsed; there is no error
/// recovery.
#[derive(Debug, Clone, Error, Diagnostic)]
pub enum ParseError {
    #[error("unrecognized token")]
    UnrecognizedToken {
        #[label("not a valid token")]
        span: SourceSpan,
    },

    #[error("expected {expected}, found {found}")]
    ExpectedToken {
        expected: &'static str,
        found: String,
        #[label("expected {expected}")]
        span: SourceSpan,
    },

    #[error("unexpected token {found} {context}")]
    UnexpectedToken {
        found: String,
        context: &'static str,
        #[label("not valid here")]
        span: SourceSpan,
    },

    #[error("unexpected end of input {context}")]
    UnexpectedEof {
        context: String,
        #[label("input ends here")]
        span: SourceSpan,
    },

    #[error("integer literal out of range")]
    #[diagnostic(help("integer constants must fit in a signed 64-bit value"))]
    IntOutOfRange {
        #[label("does not fit in 64 bits")]
        span: SourceSpan,
    },

    #[error("float literal out of range")]
    #[diagnostic(help("float constants must be finite 64-bit values"))]
    FloatOutOfRange {
        #[label("not a finite 64-bit float")]
        span: SourceSpan,
    },
}

impl ParseError {
    /// A specific token (or token class) was required at this position.
    pub(crate) fn expected(expected: &'static str, found: Option<&Token>, span: Span) -> Self {
        match found {
            Some(token) => ParseError::ExpectedToken {
                expected,
                found: token.to_string(),
                span: span.into(),
            },
            None => ParseError::UnexpectedEof {
                context: format!("(expected {expected})"),
                span: span.into(),
            },
        }
    }

    /// No parse rule accepts this token in the current context.
    pub(crate) fn unexpected(found: Option<&Token>, context: &'static str, span: Span) -> Self {
        match found {
            Some(token) => ParseError::UnexpectedToken {
                found: token.to_string(),
                context,
                span: span.into(),
            },
            None => ParseError::UnexpectedEof {
                context: context.to_string(),
                span: span.into(),
            },
        }
    }
}
