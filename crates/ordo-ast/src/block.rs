use crate::expr::Expr;
use ordo_common::{Span, Symbol};

/// The right-hand side of a binding line.
#[derive(Debug, Clone)]
pub enum BindingValue {
    /// Explicit constant expression: `b = ord * 20`
    Expr(Expr),

    /// Bare name with no expression: the binding takes the counter
    /// value as-is.
    Repeat,
}

/// One `name = expr` line (or bare-name repeat line) of a block.
#[derive(Debug, Clone)]
pub struct BindingDef {
    pub name: Symbol,
    pub value: BindingValue,
    pub span: Span,
}

/// An ordered group of bindings sharing one counter scope.
#[derive(Debug, Clone)]
pub struct BlockDef {
    pub bindings: Vec<BindingDef>,
    pub span: Span,
}
