use crate::error::ParseError;
use crate::lexer::Token;
use crate::stream::TokenStream;
use logos::Logos;
use ordo_ast::{BindingDef, BindingValue, BlockDef, Expr};
use ordo_common::{SourceId, Span, SymbolInterner};
use std::ops::Range;

/// Parse a whole constant file into its blocks.
pub fn parse_file(
    content: &str,
    source: SourceId,
    interner: &SymbolInterner,
) -> Result<Vec<BlockDef>, ParseError> {
    let tokens = lex(content, source)?;
    let mut parser = Parser {
        stream: TokenStream::new(&tokens, source),
        interner,
    };
    parser.parse_unit()
}

/// Parse a single expression, requiring the whole input to be consumed.
///
/// This is the entry point for expression sources supplied through the
/// block-builder API rather than read from a file.
pub fn parse_expr_source(
    content: &str,
    source: SourceId,
    interner: &SymbolInterner,
) -> Result<Expr, ParseError> {
    let tokens = lex(content, source)?;
    let mut parser = Parser {
        stream: TokenStream::new(&tokens, source),
        interner,
    };
    let expr = parser.parse_expr()?;
    if parser.stream.peek().is_some() {
        return Err(ParseError::unexpected(
            parser.stream.peek(),
            "after expression",
            parser.stream.current_span(),
        ));
    }
    Ok(expr)
}

fn lex(content: &str, source: SourceId) -> Result<Vec<(Token, Range<usize>)>, ParseError> {
    let mut tokens = Vec::new();
    for (result, range) in Token::lexer(content).spanned() {
        match result {
            Ok(token) => tokens.push((token, range)),
            Err(()) => {
                return Err(ParseError::UnrecognizedToken {
                    span: Span::new(source, range.start as u32, range.end as u32).into(),
                });
            }
        }
    }
    Ok(tokens)
}

pub(crate) struct Parser<'t, 'i> {
    pub(crate) stream: TokenStream<'t>,
    pub(crate) interner: &'i SymbolInterner,
}

impl Parser<'_, '_> {
    fn parse_unit(&mut self) -> Result<Vec<BlockDef>, ParseError> {
        let mut blocks = Vec::new();
        while !self.stream.at_end() {
            blocks.push(self.parse_block()?);
        }
        if blocks.is_empty() {
            return Err(ParseError::expected(
                "`const`",
                None,
                self.stream.current_span(),
            ));
        }
        Ok(blocks)
    }

    fn parse_block(&mut self) -> Result<BlockDef, ParseError> {
        let start = self.stream.pos();
        self.stream.expect(Token::Const, "`const`")?;
        self.stream.expect(Token::LBrace, "`{`")?;

        // An empty block parses; the evaluator rejects it when resolving.
        let mut bindings = Vec::new();
        while !self.stream.check(&Token::RBrace) {
            if self.stream.at_end() {
                return Err(ParseError::expected(
                    "`}`",
                    None,
                    self.stream.current_span(),
                ));
            }
            bindings.push(self.parse_binding()?);
        }
        self.stream.expect(Token::RBrace, "`}`")?;

        Ok(BlockDef {
            bindings,
            span: self.stream.span_from(start),
        })
    }

    fn parse_binding(&mut self) -> Result<BindingDef, ParseError> {
        let start = self.stream.pos();
        let name_span = self.stream.current_span();
        let name = match self.stream.advance() {
            Some(Token::Ident(text)) => self.interner.intern(text),
            found => return Err(ParseError::expected("a binding name", found, name_span)),
        };

        let value = if self.stream.check(&Token::Eq) {
            self.stream.advance();
            BindingValue::Expr(self.parse_expr()?)
        } else {
            // Bare name: repeat marker, the binding takes the counter as-is
            BindingValue::Repeat
        };

        Ok(BindingDef {
            name,
            value,
            span: self.stream.span_from(start),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ordo_ast::{BinOp, ExprKind, Literal, UnaryOp};
    use ordo_common::SourceMap;

    fn parse_blocks(src: &str) -> (Vec<BlockDef>, SymbolInterner) {
        let interner = SymbolInterner::new();
        let sources = SourceMap::new();
        let id = sources.add("test.ordo", src.to_string());
        let blocks = parse_file(src, id, &interner).expect("parse failed");
        (blocks, interner)
    }

    fn parse_failure(src: &str) -> ParseError {
        let interner = SymbolInterner::new();
        let sources = SourceMap::new();
        let id = sources.add("test.ordo", src.to_string());
        parse_file(src, id, &interner).expect_err("parse should fail")
    }

    fn expr(src: &str) -> Expr {
        let interner = SymbolInterner::new();
        let sources = SourceMap::new();
        let id = sources.add("expr", src.to_string());
        parse_expr_source(src, id, &interner).expect("expression should parse")
    }

    #[test]
    fn parses_block_with_expressions_and_repeat_marker() {
        let src = "const {\n    a = ord - 1\n    b = ord * 20\n    c\n}\n";
        let (blocks, interner) = parse_blocks(src);

        assert_eq!(blocks.len(), 1);
        let block = &blocks[0];
        assert_eq!(block.bindings.len(), 3);

        let names: Vec<_> = block
            .bindings
            .iter()
            .map(|b| interner.resolve(b.name))
            .collect();
        assert_eq!(names, ["a", "b", "c"]);

        assert!(matches!(block.bindings[0].value, BindingValue::Expr(_)));
        assert!(matches!(block.bindings[2].value, BindingValue::Repeat));
    }

    #[test]
    fn parses_multiple_blocks() {
        let src = "const { a = 1 }\nconst { b = 2 }";
        let (blocks, _) = parse_blocks(src);
        assert_eq!(blocks.len(), 2);
    }

    #[test]
    fn skips_comments() {
        let src = "// leading comment\nconst {\n    a = 1 // trailing\n}";
        let (blocks, _) = parse_blocks(src);
        assert_eq!(blocks[0].bindings.len(), 1);
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        let parsed = expr("1 + 2 * 3");
        let ExprKind::Binary { op, rhs, .. } = &parsed.kind else {
            panic!("expected binary expression");
        };
        assert_eq!(*op, BinOp::Add);
        assert!(matches!(
            rhs.kind,
            ExprKind::Binary { op: BinOp::Mul, .. }
        ));
    }

    #[test]
    fn shift_binds_at_multiplicative_strength() {
        let parsed = expr("2 << ord + 1");
        let ExprKind::Binary { op, lhs, .. } = &parsed.kind else {
            panic!("expected binary expression");
        };
        assert_eq!(*op, BinOp::Add);
        assert!(matches!(
            lhs.kind,
            ExprKind::Binary { op: BinOp::Shl, .. }
        ));
    }

    #[test]
    fn parentheses_override_precedence() {
        let parsed = expr("(1 + 2) * 3");
        let ExprKind::Binary { op, lhs, .. } = &parsed.kind else {
            panic!("expected binary expression");
        };
        assert_eq!(*op, BinOp::Mul);
        assert!(matches!(
            lhs.kind,
            ExprKind::Binary { op: BinOp::Add, .. }
        ));
    }

    #[test]
    fn unary_minus_parses() {
        let parsed = expr("-1");
        let ExprKind::Unary { op, operand } = &parsed.kind else {
            panic!("expected unary expression");
        };
        assert_eq!(*op, UnaryOp::Neg);
        assert!(matches!(
            operand.kind,
            ExprKind::Literal(Literal::Int(1))
        ));
    }

    #[test]
    fn integer_literal_radixes_decode() {
        for (src, expected) in [
            ("0x10", 16),
            ("0o17", 15),
            ("0b101", 5),
            ("1_000", 1000),
        ] {
            let parsed = expr(src);
            assert!(
                matches!(parsed.kind, ExprKind::Literal(Literal::Int(v)) if v == expected),
                "{src} should decode to {expected}"
            );
        }
    }

    #[test]
    fn float_literal_decodes() {
        let parsed = expr("3.25");
        assert!(matches!(
            parsed.kind,
            ExprKind::Literal(Literal::Float(v)) if v == 3.25
        ));
    }

    #[test]
    fn oversized_integer_literal_is_rejected() {
        let err = parse_failure("const { a = 99999999999999999999 }");
        assert!(matches!(err, ParseError::IntOutOfRange { .. }));
    }

    #[test]
    fn unclosed_block_is_rejected() {
        let err = parse_failure("const { a = 1");
        assert!(matches!(err, ParseError::UnexpectedEof { .. }));
    }

    #[test]
    fn missing_expression_is_rejected() {
        let err = parse_failure("const { a = }");
        assert!(matches!(err, ParseError::UnexpectedToken { .. }));
    }

    #[test]
    fn stray_character_is_rejected() {
        let err = parse_failure("const { a = $1 }");
        assert!(matches!(err, ParseError::UnrecognizedToken { .. }));
    }

    #[test]
    fn empty_file_is_rejected() {
        let err = parse_failure("// nothing here\n");
        assert!(matches!(err, ParseError::UnexpectedEof { .. }));
    }

    #[test]
    fn expression_source_rejects_trailing_tokens() {
        let interner = SymbolInterner::new();
        let sources = SourceMap::new();
        let id = sources.add("expr", "1 + 2 3".to_string());
        let err = parse_expr_source("1 + 2 3", id, &interner).expect_err("should fail");
        assert!(matches!(err, ParseError::UnexpectedToken { .. }));
    }
}
