use ordo_common::{Span, Symbol};

/// Binary operators available in constant expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Shl,
    Shr,
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg, // -x
}

/// A numeric literal.
///
/// The integer/float split is load-bearing: one float literal anywhere in
/// an expression promotes the whole expression to the float domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Literal {
    Int(i64),
    Float(f64),
}

/// A constant expression.
#[derive(Debug, Clone)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub enum ExprKind {
    /// A literal value
    Literal(Literal),

    /// The block's ordinal counter (`ord`)
    Ord,

    /// Reference to a binding resolved earlier in the same block
    Ident(Symbol),

    /// Binary operation: a + b
    Binary {
        op: BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },

    /// Unary operation: -x
    Unary { op: UnaryOp, operand: Box<Expr> },
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }
}
