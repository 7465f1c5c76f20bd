use crate::error::EvalError;
use crate::eval::{evaluate_block, ResolvedBlock};
use miette::Diagnostic;
use ordo_ast::{BindingDef, BindingValue, BlockDef};
use ordo_common::{SourceMap, Span, SymbolInterner};
use ordo_parser::ParseError;
use smol_str::SmolStr;
use thiserror::Error;

/// Failure while constructing a block from builder entries.
#[derive(Debug, Clone, Error, Diagnostic)]
pub enum BlockError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Eval(#[from] EvalError),
}

enum Entry {
    Expr { name: SmolStr, source: String },
    Repeat { name: SmolStr },
}

/// Collects binding specifications and resolves them in one pass.
///
/// The embedding program pushes `(name, expression-source)` pairs and
/// repeat markers in declaration order, then calls
/// [`resolve`](Self::resolve). Parsing and evaluation both happen there,
/// so malformed input surfaces at the single construction point, and the
/// result is an immutable [`ResolvedBlock`] with no way back to a
/// mutable state.
#[derive(Default)]
pub struct BlockBuilder {
    entries: Vec<Entry>,
}

impl BlockBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a binding with an explicit expression source.
    pub fn push(&mut self, name: impl Into<SmolStr>, source: impl Into<String>) -> &mut Self {
        self.entries.push(Entry::Expr {
            name: name.into(),
            source: source.into(),
        });
        self
    }

    /// Add a repeat-marker binding: it takes the counter value as-is.
    pub fn push_repeat(&mut self, name: impl Into<SmolStr>) -> &mut Self {
        self.entries.push(Entry::Repeat { name: name.into() });
        self
    }

    /// Parse and evaluate the collected bindings.
    pub fn resolve(self) -> Result<ResolvedBlock, BlockError> {
        if self.entries.is_empty() {
            return Err(EvalError::EmptyBlock.into());
        }

        // Each expression source is registered as its own input, so
        // error spans point into the string the caller supplied
        let interner = SymbolInterner::new();
        let sources = SourceMap::new();

        let mut bindings = Vec::with_capacity(self.entries.len());
        for entry in &self.entries {
            let binding = match entry {
                Entry::Expr { name, source } => {
                    let id = sources.add(name.as_str(), source.clone());
                    let expr = ordo_parser::parse_expr_source(source, id, &interner)?;
                    BindingDef {
                        name: interner.intern(name),
                        span: expr.span,
                        value: BindingValue::Expr(expr),
                    }
                }
                Entry::Repeat { name } => {
                    let id = sources.add(name.as_str(), String::new());
                    BindingDef {
                        name: interner.intern(name),
                        span: Span::point(id, 0),
                        value: BindingValue::Repeat,
                    }
                }
            };
            bindings.push(binding);
        }

        let span = bindings[0].span;
        let block = BlockDef { bindings, span };
        Ok(evaluate_block(&block, &interner)?)
    }
}
