use crate::counter::Ordinal;
use crate::error::{EvalError, Result};
use crate::value::Value;
use indexmap::IndexMap;
use ordo_ast::{BinOp, BindingDef, BindingValue, BlockDef, Expr, ExprKind, Literal, UnaryOp};
use ordo_common::{Span, Symbol, SymbolInterner};
use rustc_hash::FxHashMap;
use smol_str::SmolStr;

/// One resolved binding: the constant's value and the counter value its
/// line consumed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedBinding {
    pub value: Value,
    pub ord: i64,
}

/// Immutable result of resolving one block.
///
/// Bindings iterate in declaration order. No mutator is exposed; once
/// constructed, the mapping is fixed for the life of the value.
#[derive(Debug, Clone)]
pub struct ResolvedBlock {
    bindings: IndexMap<SmolStr, ResolvedBinding>,
}

impl ResolvedBlock {
    pub fn get(&self, name: &str) -> Option<&ResolvedBinding> {
        self.bindings.get(name)
    }

    /// The resolved value of `name`, if bound.
    pub fn value(&self, name: &str) -> Option<Value> {
        self.bindings.get(name).map(|binding| binding.value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SmolStr, &ResolvedBinding)> {
        self.bindings.iter()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Numeric domain of one expression, fixed before evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Domain {
    Int,
    Float,
}

/// Resolve a parsed block into its name → value mapping.
///
/// Single eager pass in declaration order: each binding is evaluated
/// with the current counter value and with earlier bindings of the same
/// block in scope, then the counter advances. Resolution consults
/// nothing outside the block, so identical blocks always produce
/// identical sequences.
pub fn evaluate_block(block: &BlockDef, interner: &SymbolInterner) -> Result<ResolvedBlock> {
    if block.bindings.is_empty() {
        return Err(EvalError::EmptyBlock);
    }

    let mut ctx = EvalContext {
        interner,
        ord: Ordinal::new(),
        resolved: IndexMap::new(),
        by_symbol: FxHashMap::default(),
    };
    for binding in &block.bindings {
        ctx.bind(binding)?;
    }
    Ok(ResolvedBlock {
        bindings: ctx.resolved,
    })
}

struct EvalContext<'a> {
    interner: &'a SymbolInterner,
    ord: Ordinal,
    resolved: IndexMap<SmolStr, ResolvedBinding>,
    by_symbol: FxHashMap<Symbol, Value>,
}

impl EvalContext<'_> {
    fn bind(&mut self, binding: &BindingDef) -> Result<()> {
        if self.by_symbol.contains_key(&binding.name) {
            return Err(EvalError::Rebind {
                name: self.interner.resolve(binding.name),
                span: binding.span.into(),
            });
        }

        let value = match &binding.value {
            BindingValue::Repeat => Value::Int(self.ord.value()),
            BindingValue::Expr(expr) => self.eval(expr)?,
        };

        self.by_symbol.insert(binding.name, value);
        self.resolved.insert(
            self.interner.resolve(binding.name),
            ResolvedBinding {
                value,
                ord: self.ord.value(),
            },
        );
        // The counter advances for every line, used or not
        self.ord.advance();
        Ok(())
    }

    fn eval(&self, expr: &Expr) -> Result<Value> {
        match self.domain(expr)? {
            Domain::Int => self.eval_int(expr).map(Value::Int),
            Domain::Float => self.eval_float(expr).map(Value::Float),
        }
    }

    /// One float literal or float-valued reference anywhere promotes the
    /// whole expression, not just the subtree containing it.
    fn domain(&self, expr: &Expr) -> Result<Domain> {
        Ok(match &expr.kind {
            ExprKind::Literal(Literal::Int(_)) | ExprKind::Ord => Domain::Int,
            ExprKind::Literal(Literal::Float(_)) => Domain::Float,
            ExprKind::Ident(sym) => match self.lookup(*sym, expr.span)? {
                Value::Int(_) => Domain::Int,
                Value::Float(_) => Domain::Float,
            },
            ExprKind::Unary { operand, .. } => self.domain(operand)?,
            ExprKind::Binary { lhs, rhs, .. } => {
                if self.domain(lhs)? == Domain::Float || self.domain(rhs)? == Domain::Float {
                    Domain::Float
                } else {
                    Domain::Int
                }
            }
        })
    }

    fn lookup(&self, sym: Symbol, span: Span) -> Result<Value> {
        self.by_symbol
            .get(&sym)
            .copied()
            .ok_or_else(|| EvalError::UndefinedReference {
                name: self.interner.resolve(sym),
                span: span.into(),
            })
    }

    fn eval_int(&self, expr: &Expr) -> Result<i64> {
        match &expr.kind {
            ExprKind::Literal(Literal::Int(value)) => Ok(*value),
            ExprKind::Literal(Literal::Float(_)) => {
                unreachable!("float literal in integer-domain expression")
            }
            ExprKind::Ord => Ok(self.ord.value()),
            ExprKind::Ident(sym) => match self.lookup(*sym, expr.span)? {
                Value::Int(value) => Ok(value),
                Value::Float(_) => unreachable!("float binding in integer-domain expression"),
            },
            ExprKind::Unary {
                op: UnaryOp::Neg,
                operand,
            } => {
                let value = self.eval_int(operand)?;
                value.checked_neg().ok_or(EvalError::Overflow {
                    span: expr.span.into(),
                })
            }
            ExprKind::Binary { op, lhs, rhs } => {
                let l = self.eval_int(lhs)?;
                let r = self.eval_int(rhs)?;
                apply_int(*op, l, r, expr.span, rhs.span)
            }
        }
    }

    fn eval_float(&self, expr: &Expr) -> Result<f64> {
        match &expr.kind {
            ExprKind::Literal(Literal::Int(value)) => Ok(*value as f64),
            ExprKind::Literal(Literal::Float(value)) => Ok(*value),
            ExprKind::Ord => Ok(self.ord.value() as f64),
            ExprKind::Ident(sym) => Ok(self.lookup(*sym, expr.span)?.as_f64()),
            ExprKind::Unary {
                op: UnaryOp::Neg,
                operand,
            } => Ok(-self.eval_float(operand)?),
            ExprKind::Binary { op, lhs, rhs } => {
                let l = self.eval_float(lhs)?;
                let r = self.eval_float(rhs)?;
                let value = match op {
                    BinOp::Add => l + r,
                    BinOp::Sub => l - r,
                    BinOp::Mul => l * r,
                    BinOp::Div => {
                        if r == 0.0 {
                            return Err(EvalError::DivisionByZero {
                                span: rhs.span.into(),
                            });
                        }
                        l / r
                    }
                    BinOp::Rem => {
                        if r == 0.0 {
                            return Err(EvalError::DivisionByZero {
                                span: rhs.span.into(),
                            });
                        }
                        l % r
                    }
                    BinOp::Shl | BinOp::Shr => {
                        return Err(EvalError::InvalidShift {
                            reason: "shift requires integer operands",
                            span: expr.span.into(),
                        });
                    }
                };
                if !value.is_finite() {
                    return Err(EvalError::Overflow {
                        span: expr.span.into(),
                    });
                }
                Ok(value)
            }
        }
    }
}

fn apply_int(op: BinOp, l: i64, r: i64, span: Span, rhs_span: Span) -> Result<i64> {
    let overflow = || EvalError::Overflow { span: span.into() };
    match op {
        BinOp::Add => l.checked_add(r).ok_or_else(overflow),
        BinOp::Sub => l.checked_sub(r).ok_or_else(overflow),
        BinOp::Mul => l.checked_mul(r).ok_or_else(overflow),
        BinOp::Div => {
            if r == 0 {
                return Err(EvalError::DivisionByZero {
                    span: rhs_span.into(),
                });
            }
            l.checked_div(r).ok_or_else(overflow)
        }
        BinOp::Rem => {
            if r == 0 {
                return Err(EvalError::DivisionByZero {
                    span: rhs_span.into(),
                });
            }
            l.checked_rem(r).ok_or_else(overflow)
        }
        BinOp::Shl | BinOp::Shr => {
            if r < 0 {
                return Err(EvalError::InvalidShift {
                    reason: "negative shift count",
                    span: rhs_span.into(),
                });
            }
            let count = u32::try_from(r)
                .ok()
                .filter(|&count| count < 64)
                .ok_or(EvalError::InvalidShift {
                    reason: "shift count out of range",
                    span: rhs_span.into(),
                })?;
            match op {
                BinOp::Shl => {
                    let shifted = l << count;
                    // Shifting back recovers the operand only when no
                    // significant bits were lost
                    if shifted >> count != l {
                        return Err(overflow());
                    }
                    Ok(shifted)
                }
                _ => Ok(l >> count),
            }
        }
    }
}
