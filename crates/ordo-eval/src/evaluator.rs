use crate::eval::{evaluate_block, ResolvedBlock};
use miette::{Report, Result};
use ordo_ast::BlockDef;
use ordo_common::{SourceFile, SourceId, SourceMap, SymbolInterner};
use std::path::Path;

/// Evaluation session: owns the source registry and symbol interner and
/// runs constant files through the parse → resolve pipeline.
pub struct Evaluator {
    sources: SourceMap,
    interner: SymbolInterner,
}

impl Evaluator {
    pub fn new() -> Self {
        Self {
            sources: SourceMap::new(),
            interner: SymbolInterner::new(),
        }
    }

    /// Parse a constant file without resolving it.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<Vec<BlockDef>> {
        let (name, content) = read_file(path.as_ref())?;
        self.parse_source(name, content)
    }

    /// Parse and resolve every block of a constant file.
    pub fn eval_file(&self, path: impl AsRef<Path>) -> Result<Vec<ResolvedBlock>> {
        let (name, content) = read_file(path.as_ref())?;
        self.eval_source(name, content)
    }

    /// Parse in-memory content registered under `name`.
    pub fn parse_source(&self, name: impl Into<String>, content: String) -> Result<Vec<BlockDef>> {
        let id = self.sources.add(name, content);
        let file = self.source(id)?;
        ordo_parser::parse_file(&file.content, id, &self.interner)
            .map_err(|err| Report::new(err).with_source_code(file.named_source()))
    }

    /// Parse and resolve in-memory content registered under `name`.
    pub fn eval_source(
        &self,
        name: impl Into<String>,
        content: String,
    ) -> Result<Vec<ResolvedBlock>> {
        let id = self.sources.add(name, content);
        let file = self.source(id)?;
        let blocks = ordo_parser::parse_file(&file.content, id, &self.interner)
            .map_err(|err| Report::new(err).with_source_code(file.named_source()))?;

        let mut resolved = Vec::with_capacity(blocks.len());
        for block in &blocks {
            let outcome = evaluate_block(block, &self.interner)
                .map_err(|err| Report::new(err).with_source_code(file.named_source()))?;
            resolved.push(outcome);
        }
        Ok(resolved)
    }

    pub fn interner(&self) -> &SymbolInterner {
        &self.interner
    }

    fn source(&self, id: SourceId) -> Result<SourceFile> {
        self.sources
            .get(id)
            .ok_or_else(|| miette::miette!("source not registered"))
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

fn read_file(path: &Path) -> Result<(String, String)> {
    let content = std::fs::read_to_string(path)
        .map_err(|err| miette::miette!("failed to read {}: {}", path.display(), err))?;
    Ok((path.display().to_string(), content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn eval_file_resolves_every_block() {
        let mut file = NamedTempFile::with_suffix(".ordo").unwrap();
        writeln!(
            file,
            "const {{\n    a\n    b\n}}\nconst {{\n    c = ord\n}}"
        )
        .unwrap();

        let evaluator = Evaluator::new();
        let blocks = evaluator.eval_file(file.path()).unwrap();

        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].value("b"), Some(Value::Int(1)));
        assert_eq!(blocks[1].value("c"), Some(Value::Int(0)));
    }

    #[test]
    fn parse_file_returns_syntax_only() {
        let mut file = NamedTempFile::with_suffix(".ordo").unwrap();
        writeln!(file, "const {{\n    a = 1\n    b = 2\n}}").unwrap();

        let evaluator = Evaluator::new();
        let blocks = evaluator.parse_file(file.path()).unwrap();

        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].bindings.len(), 2);
    }

    #[test]
    fn missing_file_reports_an_error() {
        let evaluator = Evaluator::new();
        assert!(evaluator.eval_file("does-not-exist.ordo").is_err());
    }

    #[test]
    fn eval_source_surfaces_resolution_errors() {
        let evaluator = Evaluator::new();
        let err = evaluator
            .eval_source("inline", "const { a = missing }".to_string())
            .expect_err("should fail");
        assert!(err.to_string().contains("undefined reference"));
    }
}
