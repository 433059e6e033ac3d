//! Lexer for embedded template expressions using logos
//!
//! Logos provides extremely fast lexing via compile-time DFA generation.

use logos::Logos;

/// Token types for the expression mini-language inside `{{…}}`
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n]+")] // Skip whitespace
pub enum Token<'src> {
    // Literals
    #[token("true")]
    True,
    #[token("false")]
    False,

    // No dash in identifiers: `a-b` must lex as subtraction. Dashed
    // parameter keys never reach the lexer — the substitution engine
    // resolves them by direct map lookup first.
    #[regex(r"[a-zA-Z_$][a-zA-Z0-9_$]*", |lex| lex.slice())]
    Ident(&'src str),

    #[regex(r#""([^"\\]|\\.)*""#, |lex| {
        let s = lex.slice();
        &s[1..s.len()-1]  // Strip quotes
    })]
    String(&'src str),

    #[regex(r"'([^'\\]|\\.)*'", |lex| {
        let s = lex.slice();
        &s[1..s.len()-1]  // Strip quotes
    })]
    SingleQuoteString(&'src str),

    #[regex(r"[0-9]+(\.[0-9]+)?", |lex| lex.slice().parse::<f64>().ok())]
    Number(f64),

    // Operators (longest first is handled by logos, listed for clarity)
    #[token("===")]
    StrictEq,
    #[token("!==")]
    StrictNotEq,
    #[token("==")]
    LooseEq,
    #[token("!=")]
    LooseNotEq,
    #[token(">=")]
    Gte,
    #[token("<=")]
    Lte,
    #[token(">")]
    Gt,
    #[token("<")]
    Lt,
    #[token("&&")]
    And,
    #[token("||")]
    Or,
    #[token("!")]
    Bang,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("?")]
    Question,
    #[token(":")]
    Colon,
    #[token(".")]
    Dot,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
}

/// Lex an expression into tokens. The first unlexable character aborts the
/// whole expression — the caller falls back to emitting the literal text.
pub fn lex(source: &str) -> Result<Vec<Token<'_>>, usize> {
    let mut tokens = Vec::new();
    for (result, span) in Token::lexer(source).spanned() {
        match result {
            Ok(token) => tokens.push(token),
            Err(_) => return Err(span.start),
        }
    }
    Ok(tokens)
}
