use miette::{Diagnostic, SourceSpan};
use smol_str::SmolStr;
use thiserror::Error;

/// Result type for block resolution.
pub type Result<T> = std::result::Result<T, EvalError>;

/// Errors raised while resolving a constant block.
///
/// Every variant is a construction-time failure that aborts resolution
/// of its block; a block that resolves cannot fail afterwards.
#[derive(Debug, Clone, Error, Diagnostic)]
pub enum EvalError {
    /// An expression names a binding not yet resolved in its block.
    #[error("undefined reference to `{name}`")]
    #[diagnostic(help(
        "a binding can only reference names resolved earlier in its own block"
    ))]
    UndefinedReference {
        name: SmolStr,
        #[label("not resolved at this point")]
        span: SourceSpan,
    },

    /// A block with zero bindings was resolved.
    #[error("constant block has no bindings")]
    EmptyBlock,

    /// A name was bound twice in one block. Resolved constants are
    /// immutable, so the second binding is rejected outright.
    #[error("`{name}` is already bound in this block")]
    Rebind {
        name: SmolStr,
        #[label("second binding of `{name}`")]
        span: SourceSpan,
    },

    #[error("invalid shift: {reason}")]
    InvalidShift {
        reason: &'static str,
        #[label("{reason}")]
        span: SourceSpan,
    },

    #[error("division by zero in constant expression")]
    DivisionByZero {
        #[label("divisor is zero")]
        span: SourceSpan,
    },

    #[error("constant arithmetic overflowed")]
    Overflow {
        #[label("value does not fit in 64 bits")]
        span: SourceSpan,
    },
}
