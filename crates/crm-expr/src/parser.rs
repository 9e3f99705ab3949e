//! Recursive-descent parser for `«formula» / «counter-pattern»`.
//!
//! `not > and > or` precedence, matching the EBNF in §4.2:
//!
//! ```text
//! expr      := formula ("/" counter-pat)?
//! formula   := disjunct ("or" disjunct)*    | ε
//! disjunct  := conjunct ("and" conjunct)*
//! conjunct  := "not"? atom
//! atom      := ident | "(" formula ")"
//! counter-pat := "(" item ("," item)* ")"
//! item      := "Z" | "NZ" | "-"
//! ```

use logos::Logos;

use crate::ast::{CounterPattern, Formula, PatternItem, TransitionExpr};
use crate::error::ExprParseError;
use crate::lexer::Token;

/// Parse a full transition expression against a declared counter arity.
///
/// The shorthand form (no `/ (...)` clause) expands to an all-wildcard
/// pattern of the given arity, per §3.
pub fn parse_transition_expr(
    src: &str,
    arity: usize,
) -> Result<TransitionExpr<String>, ExprParseError> {
    let (formula_src, pattern_src) = match src.find('/') {
        Some(idx) => (&src[..idx], Some(&src[idx + 1..])),
        None => (src, None),
    };

    let formula = parse_formula(formula_src)?;
    let pattern = match pattern_src {
        Some(p) => parse_pattern(p, arity)?,
        None => CounterPattern::all_wildcard(arity),
    };

    Ok(TransitionExpr { formula, pattern })
}

/// Parse just the `formula` half, in isolation (used by tests and by
/// anything that wants to validate a formula against a not-yet-fixed
/// arity).
pub fn parse_formula(src: &str) -> Result<Formula<String>, ExprParseError> {
    let trimmed = src.trim();
    if trimmed.is_empty() {
        return Ok(Formula::Empty);
    }

    let tokens: Vec<(Token<'_>, std::ops::Range<usize>)> = Token::lexer(trimmed)
        .spanned()
        .map(|(tok, span)| {
            tok.map(|t| (t, span.clone())).map_err(|_| {
                ExprParseError::UnexpectedToken {
                    src: trimmed.to_string(),
                    found: trimmed[span.clone()].to_string(),
                    pos: span.start,
                }
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut parser = FormulaParser {
        src: trimmed,
        tokens: &tokens,
        pos: 0,
    };
    let formula = parser.parse_or()?;
    if parser.pos != parser.tokens.len() {
        return Err(ExprParseError::TrailingTokens {
            src: trimmed.to_string(),
        });
    }
    Ok(formula)
}

struct FormulaParser<'a> {
    src: &'a str,
    tokens: &'a [(Token<'a>, std::ops::Range<usize>)],
    pos: usize,
}

impl<'a> FormulaParser<'a> {
    fn peek(&self) -> Option<Token<'a>> {
        self.tokens.get(self.pos).map(|(t, _)| *t)
    }

    fn bump(&mut self) -> Token<'a> {
        let tok = self.tokens[self.pos].0;
        self.pos += 1;
        tok
    }

    fn parse_or(&mut self) -> Result<Formula<String>, ExprParseError> {
        let mut lhs = self.parse_and()?;
        while matches!(self.peek(), Some(Token::Or)) {
            self.bump();
            let rhs = self.parse_and()?;
            lhs = Formula::Or(Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn parse_and(&mut self) -> Result<Formula<String>, ExprParseError> {
        let mut lhs = self.parse_unary()?;
        while matches!(self.peek(), Some(Token::And)) {
            self.bump();
            let rhs = self.parse_unary()?;
            lhs = Formula::And(Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn parse_unary(&mut self) -> Result<Formula<String>, ExprParseError> {
        if matches!(self.peek(), Some(Token::Not)) {
            self.bump();
            let inner = self.parse_unary()?;
            return Ok(Formula::Not(Box::new(inner)));
        }
        self.parse_atom()
    }

    fn parse_atom(&mut self) -> Result<Formula<String>, ExprParseError> {
        match self.peek() {
            Some(Token::Ident(name)) => {
                self.bump();
                Ok(Formula::Atom(name.to_string()))
            }
            Some(Token::LParen) => {
                self.bump();
                if matches!(self.peek(), Some(Token::RParen)) {
                    self.bump();
                    return Ok(Formula::Empty);
                }
                let inner = self.parse_or()?;
                match self.peek() {
                    Some(Token::RParen) => {
                        self.bump();
                        Ok(inner)
                    }
                    Some(other) => Err(ExprParseError::UnexpectedToken {
                        src: self.src.to_string(),
                        found: format!("{other:?}"),
                        pos: self.tokens[self.pos].1.start,
                    }),
                    None => Err(ExprParseError::UnexpectedEnd {
                        src: self.src.to_string(),
                    }),
                }
            }
            Some(other) => Err(ExprParseError::UnexpectedToken {
                src: self.src.to_string(),
                found: format!("{other:?}"),
                pos: self.tokens[self.pos].1.start,
            }),
            None => Err(ExprParseError::UnexpectedEnd {
                src: self.src.to_string(),
            }),
        }
    }
}

/// Parse just the `counter-pattern` half, e.g. `"(Z, -, NZ)"`.
pub fn parse_pattern(src: &str, arity: usize) -> Result<CounterPattern, ExprParseError> {
    let trimmed = src.trim();
    let inner = trimmed
        .strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
        .ok_or_else(|| ExprParseError::MalformedPattern {
            pattern: trimmed.to_string(),
        })?;

    let items = inner
        .split(',')
        .map(|item| match item.trim() {
            "Z" => Ok(PatternItem::Zero),
            "NZ" => Ok(PatternItem::NonZero),
            "-" => Ok(PatternItem::Wildcard),
            other => Err(ExprParseError::UnknownPatternItem {
                pattern: trimmed.to_string(),
                item: other.to_string(),
            }),
        })
        .collect::<Result<Vec<_>, _>>()?;

    if items.len() != arity {
        return Err(ExprParseError::PatternArityMismatch {
            pattern: trimmed.to_string(),
            expected: arity,
            found: items.len(),
        });
    }

    Ok(CounterPattern(items))
}
