//! Recursive-descent parser over the token stream. The grammar is small
//! and fixed, so hand-written descent functions are a better fit than a
//! general parser-combinator DSL.
//!
//! ```text
//! regex         := alternation
//! alternation   := concatenation ( '|' concatenation )*
//! concatenation := quantified*
//! quantified    := atom ( '*' | '+' | '?' | '{m,n}' )?
//! atom          := char | '.' | charset | anchor | '(' alternation ')' | boundary
//! ```

use crate::ast::{Node, QuantifierKind};
use crate::error::CompileError;
use crate::lexer::{Lexer, Token};

/// Parses a full pattern, returning the AST root. Group numbers are
/// assigned left-paren-first, so the highest index observed in the tree is
/// the total capturing-group count (see `Node::max_group_index`).
pub fn parse(pattern: &[u8]) -> Result<Node, CompileError> {
    let mut parser = Parser {
        lexer: Lexer::new(pattern),
        group_counter: 0,
    };
    let root = parser.alternation()?;
    match parser.lexer.advance() {
        Token::Eof { .. } => Ok(root),
        unexpected => Err(CompileError::new(
            "unexpected trailing token, likely an unmatched ')'",
            unexpected.position(),
        )),
    }
}

struct Parser<'a> {
    lexer: Lexer<'a>,
    group_counter: u32,
}

impl<'a> Parser<'a> {
    fn alternation(&mut self) -> Result<Node, CompileError> {
        let mut branches = vec![self.concatenation()?];
        while matches!(self.lexer.peek(), Token::Pipe { .. }) {
            self.lexer.advance();
            branches.push(self.concatenation()?);
        }
        Ok(Node::alternation(branches))
    }

    fn concatenation(&mut self) -> Result<Node, CompileError> {
        let mut parts = vec![];
        loop {
            match self.lexer.peek() {
                Token::Eof { .. } | Token::Pipe { .. } | Token::RParen { .. } => break,
                Token::Error { message, position } => {
                    return Err(CompileError::new(message.clone(), *position));
                }
                _ => parts.push(self.quantified()?),
            }
        }
        Ok(Node::sequence(parts))
    }

    fn quantified(&mut self) -> Result<Node, CompileError> {
        let body = self.atom()?;
        let kind = match self.lexer.peek() {
            Token::Star { .. } => Some(QuantifierKind::ZeroOrMore),
            Token::Plus { .. } => Some(QuantifierKind::OneOrMore),
            Token::Question { .. } => Some(QuantifierKind::ZeroOrOne),
            Token::Counted { min, max, .. } => Some(QuantifierKind::Range {
                min: *min,
                max: *max,
            }),
            _ => None,
        };
        let Some(kind) = kind else {
            return Ok(body);
        };
        self.lexer.advance();
        Ok(Node::Quantifier {
            kind,
            greedy: true,
            body: Box::new(body),
        })
    }

    fn atom(&mut self) -> Result<Node, CompileError> {
        match self.lexer.advance() {
            Token::Char { byte, .. } => Ok(Node::Char(byte)),
            Token::Dot { .. } => Ok(Node::Dot),
            Token::Charset { set, .. } => Ok(Node::Charset(set)),
            Token::AnchorStart { .. } => Ok(Node::AnchorStart),
            Token::AnchorEnd { .. } => Ok(Node::AnchorEnd),
            Token::WordBoundary { .. } => Ok(Node::WordBoundary),
            Token::NotWordBoundary { .. } => Ok(Node::NotWordBoundary),
            Token::LParen { .. } => {
                self.group_counter += 1;
                let index = self.group_counter;
                let body = self.alternation()?;
                match self.lexer.advance() {
                    Token::RParen { .. } => Ok(Node::Group {
                        index,
                        body: Box::new(body),
                    }),
                    unexpected => Err(CompileError::new(
                        "expected closing ')'",
                        unexpected.position(),
                    )),
                }
            }
            Token::Error { message, position } => Err(CompileError::new(message, position)),
            unexpected => Err(CompileError::new(
                "unexpected token, possibly a dangling quantifier",
                unexpected.position(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::QuantifierKind;

    #[test]
    fn empty_pattern_is_empty_sequence() {
        let ast = parse(b"").unwrap();
        assert_eq!(ast, Node::Sequence(vec![]));
    }

    #[test]
    fn single_atom_is_not_wrapped_in_sequence() {
        let ast = parse(b"a").unwrap();
        assert_eq!(ast, Node::Char(b'a'));
    }

    #[test]
    fn concatenation_and_alternation_precedence() {
        let ast = parse(b"ab|c").unwrap();
        match ast {
            Node::Alternation(branches) => {
                assert_eq!(branches.len(), 2);
                assert_eq!(
                    branches[0],
                    Node::Sequence(vec![Node::Char(b'a'), Node::Char(b'b')])
                );
                assert_eq!(branches[1], Node::Char(b'c'));
            }
            other => panic!("expected alternation, got {other:?}"),
        }
    }

    #[test]
    fn groups_are_numbered_in_open_paren_order() {
        let ast = parse(b"(a(b))(c)").unwrap();
        assert_eq!(ast.max_group_index(), 3);
        let Node::Sequence(top) = ast else {
            panic!("expected top-level sequence");
        };
        let Node::Group { index: 1, body } = &top[0] else {
            panic!("expected group 1 first");
        };
        let Node::Sequence(inner) = body.as_ref() else {
            panic!("expected sequence inside group 1");
        };
        assert!(matches!(inner[1], Node::Group { index: 2, .. }));
        assert!(matches!(top[1], Node::Group { index: 3, .. }));
    }

    #[test]
    fn quantifier_wraps_preceding_atom_only() {
        let ast = parse(b"ab*").unwrap();
        let Node::Sequence(parts) = ast else {
            panic!("expected sequence");
        };
        assert_eq!(parts[0], Node::Char(b'a'));
        assert!(matches!(
            parts[1],
            Node::Quantifier {
                kind: QuantifierKind::ZeroOrMore,
                ..
            }
        ));
    }

    #[test]
    fn unmatched_close_paren_is_an_error() {
        assert!(parse(b"a)").is_err());
    }

    #[test]
    fn unclosed_group_is_an_error() {
        assert!(parse(b"(a").is_err());
    }

    #[test]
    fn dangling_quantifier_is_an_error() {
        assert!(parse(b"*a").is_err());
    }

    #[test]
    fn unterminated_charset_propagates_as_parse_error() {
        assert!(parse(b"[abc").is_err());
    }
}
