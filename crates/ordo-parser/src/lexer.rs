use logos::Logos;
use smol_str::SmolStr;
use std::fmt;

/// Lexical tokens of the constant-file syntax.
///
/// Numeric literals keep their raw text; the parser decodes them so that
/// out-of-range values report with an accurate span.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
#[logos(skip r"//[^\n]*")]
pub enum Token {
    /// Keyword `const`, opens a block
    #[token("const")]
    Const,

    /// Keyword `ord`, the block-scoped counter
    #[token("ord")]
    Ord,

    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("=")]
    Eq,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("<<")]
    Shl,
    #[token(">>")]
    Shr,

    /// Integer literal: decimal, `0x`, `0o`, or `0b`, with optional `_`
    /// separators
    #[regex(r"[0-9][0-9_]*", |lex| SmolStr::new(lex.slice()))]
    #[regex(r"0[xX][0-9a-fA-F_]+", |lex| SmolStr::new(lex.slice()))]
    #[regex(r"0[oO][0-7_]+", |lex| SmolStr::new(lex.slice()))]
    #[regex(r"0[bB][01_]+", |lex| SmolStr::new(lex.slice()))]
    IntLit(SmolStr),

    /// Float literal with a mandatory decimal point
    #[regex(r"[0-9][0-9_]*\.[0-9_]+([eE][+-]?[0-9]+)?", |lex| SmolStr::new(lex.slice()))]
    FloatLit(SmolStr),

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", |lex| SmolStr::new(lex.slice()))]
    Ident(SmolStr),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Const => write!(f, "`const`"),
            Token::Ord => write!(f, "`ord`"),
            Token::LBrace => write!(f, "`{{`"),
            Token::RBrace => write!(f, "`}}`"),
            Token::LParen => write!(f, "`(`"),
            Token::RParen => write!(f, "`)`"),
            Token::Eq => write!(f, "`=`"),
            Token::Plus => write!(f, "`+`"),
            Token::Minus => write!(f, "`-`"),
            Token::Star => write!(f, "`*`"),
            Token::Slash => write!(f, "`/`"),
            Token::Percent => write!(f, "`%`"),
            Token::Shl => write!(f, "`<<`"),
            Token::Shr => write!(f, "`>>`"),
            Token::IntLit(text) | Token::FloatLit(text) | Token::Ident(text) => {
                write!(f, "`{text}`")
            }
        }
    }
}
