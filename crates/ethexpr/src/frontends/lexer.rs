//! Tokenizer for the expression grammar, built on logos.

use std::fmt;
use std::ops::Range;

use logos::Logos;

use crate::error::ParseError;

/// Raw token kinds. Text is recovered from the source span.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Token {
    // === Literals ===
    /// `0x` followed by hex digits
    #[regex(r"0[xX][0-9a-fA-F]+")]
    Hex,
    /// `<digits>e<digits>`
    #[regex(r"[0-9]+[eE][0-9]+")]
    Scientific,
    /// Decimal digits
    #[regex(r"[0-9]+")]
    Decimal,
    /// Single-quoted string, quotes included
    #[regex(r"'[^']*'")]
    Str,

    // === Names ===
    /// Identifier, unit suffix or boolean word
    #[regex(r"[A-Za-z_$][A-Za-z0-9_$]*")]
    Ident,

    // === Delimiters ===
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `,`
    #[token(",")]
    Comma,
    /// `.`
    #[token(".")]
    Dot,

    // === Operators ===
    /// `+`
    #[token("+")]
    Plus,
    /// `-` (subtraction or negation)
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `!`
    #[token("!")]
    Bang,
    /// `&&`
    #[token("&&")]
    AndAnd,
    /// `||`
    #[token("||")]
    OrOr,
    /// `==`
    #[token("==")]
    EqEq,
    /// `!=`
    #[token("!=")]
    NotEq,
    /// `<=`
    #[token("<=")]
    LtEq,
    /// `>=`
    #[token(">=")]
    GtEq,
    /// `<`
    #[token("<")]
    Lt,
    /// `>`
    #[token(">")]
    Gt,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Token::Hex => "hex literal",
            Token::Scientific => "scientific literal",
            Token::Decimal => "number",
            Token::Str => "string",
            Token::Ident => "identifier",
            Token::LParen => "`(`",
            Token::RParen => "`)`",
            Token::LBracket => "`[`",
            Token::RBracket => "`]`",
            Token::Comma => "`,`",
            Token::Dot => "`.`",
            Token::Plus => "`+`",
            Token::Minus => "`-`",
            Token::Star => "`*`",
            Token::Slash => "`/`",
            Token::Bang => "`!`",
            Token::AndAnd => "`&&`",
            Token::OrOr => "`||`",
            Token::EqEq => "`==`",
            Token::NotEq => "`!=`",
            Token::LtEq => "`<=`",
            Token::GtEq => "`>=`",
            Token::Lt => "`<`",
            Token::Gt => "`>`",
        };
        f.write_str(s)
    }
}

/// A token with its byte span in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spanned {
    /// Token kind
    pub token: Token,
    /// Byte range in the source
    pub span: Range<usize>,
}

/// Tokenize `source`, failing on the first unrecognized character.
pub fn lex(source: &str) -> Result<Vec<Spanned>, ParseError> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer(source);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        match result {
            Ok(Token::Ident) => {
                let span = reclaim_ether(&mut tokens, source, &span).unwrap_or(span);
                tokens.push(Spanned {
                    token: Token::Ident,
                    span,
                });
            }
            Ok(token) => tokens.push(Spanned { token, span }),
            Err(()) => {
                let text = &source[span.clone()];
                return Err(ParseError::new(format!("unexpected character `{}`", text))
                    .at_offset(source, span.start));
            }
        }
    }

    Ok(tokens)
}

/// In `0x1ether` the hex pattern swallows the `e` of the unit, leaving
/// `0x1e` followed by `ther`. Hand the `e` back when that happens; the
/// returned span covers the whole `ether`.
fn reclaim_ether(
    tokens: &mut [Spanned],
    source: &str,
    ident: &Range<usize>,
) -> Option<Range<usize>> {
    let prev = tokens.last_mut()?;
    let glued = prev.token == Token::Hex
        && prev.span.end == ident.start
        && prev.span.len() > "0xe".len()
        && source[prev.span.clone()].ends_with('e')
        && &source[ident.clone()] == "ther";
    if !glued {
        return None;
    }
    prev.span.end -= 1;
    Some(prev.span.end..ident.end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<Token> {
        lex(source).unwrap().into_iter().map(|t| t.token).collect()
    }

    #[test]
    fn test_numbers() {
        assert_eq!(
            kinds("12 0x1F 1e18"),
            vec![Token::Decimal, Token::Hex, Token::Scientific]
        );
    }

    #[test]
    fn test_unit_suffix_is_ident() {
        assert_eq!(kinds("3 wei"), vec![Token::Decimal, Token::Ident]);
    }

    #[test]
    fn test_operators_prefer_longest() {
        assert_eq!(
            kinds("a<=b != !c"),
            vec![
                Token::Ident,
                Token::LtEq,
                Token::Ident,
                Token::NotEq,
                Token::Bang,
                Token::Ident
            ]
        );
    }

    #[test]
    fn test_spans() {
        let tokens = lex("obj.sum('x')").unwrap();
        assert_eq!(tokens[0].span, 0..3);
        assert_eq!(tokens[4].token, Token::Str);
        assert_eq!(tokens[4].span, 8..11);
    }

    #[test]
    fn test_glued_units() {
        let tokens = lex("0x1ether").unwrap();
        assert_eq!(tokens[0].token, Token::Hex);
        assert_eq!(tokens[0].span, 0..3);
        assert_eq!(tokens[1].token, Token::Ident);
        assert_eq!(tokens[1].span, 3..8);

        assert_eq!(kinds("1ether"), vec![Token::Decimal, Token::Ident]);
        assert_eq!(kinds("0x1gwei"), vec![Token::Hex, Token::Ident]);
    }

    #[test]
    fn test_glued_ether_keeps_hex_digits() {
        // `0xeether` is 0xe ether
        let tokens = lex("0xeether").unwrap();
        assert_eq!(tokens[0].span, 0..3);
        assert_eq!(tokens[1].span, 3..8);

        // Nothing is handed back when the hex literal would be left empty,
        // or when the pieces are not adjacent
        assert_eq!(lex("0xether").unwrap()[0].span, 0..3);
        assert_eq!(lex("0x1e ther").unwrap()[0].span, 0..4);
    }

    #[test]
    fn test_identifier_charset() {
        assert_eq!(kinds("$a _b c9"), vec![Token::Ident; 3]);
    }

    #[test]
    fn test_unexpected_character() {
        let err = lex("1 # 2").unwrap_err();
        assert!(err.message.contains('#'));
        assert_eq!(err.location.unwrap().column, 3);
    }

    #[test]
    fn test_unterminated_string() {
        assert!(lex("'abc").is_err());
    }
}
