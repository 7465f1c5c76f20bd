mod span;
mod symbol;
mod source;

pub use span::Span;
pub use symbol::{Symbol, SymbolInterner};
pub use source::{SourceFile, SourceId, SourceMap};
