//! Boolean query evaluation.
//!
//! A query is a whitespace-separated sequence of terms and the operators
//! `AND`, `OR` and `NOT` (matched case-insensitively). `NOT` binds tighter than
//! `AND`, which binds tighter than `OR`; operators of equal precedence
//! associate to the left. There is no grouping syntax.
//!
//! Evaluation runs in two phases: the infix tokens are rewritten to postfix
//! order with the shunting-yard algorithm, then the postfix sequence is reduced
//! on a value stack of posting sets.

use crate::error::MalformedQuery;
use crate::index::{DocSet, InvertedIndex, Universe};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    And,
    Or,
    Not,
}

impl Operator {
    pub fn parse(token: &str) -> Option<Self> {
        if token.eq_ignore_ascii_case("and") {
            Some(Operator::And)
        } else if token.eq_ignore_ascii_case("or") {
            Some(Operator::Or)
        } else if token.eq_ignore_ascii_case("not") {
            Some(Operator::Not)
        } else {
            None
        }
    }

    pub fn precedence(self) -> u8 {
        match self {
            Operator::Not => 3,
            Operator::And => 2,
            Operator::Or => 1,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Operator::And => "AND",
            Operator::Or => "OR",
            Operator::Not => "NOT",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryToken {
    Term(String),
    Op(Operator),
}

impl fmt::Display for QueryToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryToken::Term(t) => f.write_str(t),
            QueryToken::Op(op) => fmt::Display::fmt(op, f),
        }
    }
}

/// Split a query into terms and operators. Terms keep their original
/// spelling; they are normalized at lookup time.
fn lex(query: &str) -> Result<Vec<QueryToken>, MalformedQuery> {
    let tokens: Vec<QueryToken> = query
        .split_whitespace()
        .map(|raw| match Operator::parse(raw) {
            Some(op) => QueryToken::Op(op),
            None => QueryToken::Term(raw.to_string()),
        })
        .collect();

    // NOT only ever negates the term written right after it.
    for (i, token) in tokens.iter().enumerate() {
        if *token == QueryToken::Op(Operator::Not) && !matches!(tokens.get(i + 1), Some(QueryToken::Term(_))) {
            return Err(MalformedQuery::NotWithoutTerm);
        }
    }
    Ok(tokens)
}

fn to_postfix(tokens: Vec<QueryToken>) -> Vec<QueryToken> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut operators: Vec<Operator> = Vec::new();
    for token in tokens {
        match token {
            QueryToken::Op(op) => {
                while let Some(&top) = operators.last() {
                    if top.precedence() < op.precedence() {
                        break;
                    }
                    output.push(QueryToken::Op(top));
                    operators.pop();
                }
                operators.push(op);
            }
            term => output.push(term),
        }
    }
    while let Some(op) = operators.pop() {
        output.push(QueryToken::Op(op));
    }
    output
}

/// Parse a query into postfix order.
pub fn parse(query: &str) -> Result<Vec<QueryToken>, MalformedQuery> {
    let postfix = to_postfix(lex(query)?);
    tracing::trace!(query, postfix_len = postfix.len(), "parsed query");
    Ok(postfix)
}

/// Stack value: a term is kept unresolved so NOT can see it.
enum Operand<'q> {
    Term(&'q str),
    Set(DocSet),
}

impl Operand<'_> {
    fn resolve(self, index: &InvertedIndex) -> DocSet {
        match self {
            Operand::Term(term) => index.postings(term),
            Operand::Set(set) => set,
        }
    }
}

/// Evaluate a postfix token sequence produced by [`parse`].
pub fn evaluate_postfix(
    index: &InvertedIndex,
    universe: &Universe,
    postfix: &[QueryToken],
) -> Result<DocSet, MalformedQuery> {
    let mut stack: Vec<Operand<'_>> = Vec::new();
    for token in postfix {
        match token {
            QueryToken::Term(term) => stack.push(Operand::Term(term.as_str())),
            QueryToken::Op(Operator::Not) => match stack.pop() {
                Some(Operand::Term(term)) => {
                    let hits = index.get(term);
                    let complement = universe
                        .iter()
                        .filter(|id| hits.map_or(true, |h| !h.contains(*id)))
                        .cloned()
                        .collect();
                    stack.push(Operand::Set(complement));
                }
                Some(Operand::Set(_)) => return Err(MalformedQuery::NotWithoutTerm),
                None => return Err(MalformedQuery::MissingOperand { operator: Operator::Not }),
            },
            QueryToken::Op(op) => {
                let (right, left) = match (stack.pop(), stack.pop()) {
                    (Some(right), Some(left)) => (right.resolve(index), left.resolve(index)),
                    _ => return Err(MalformedQuery::MissingOperand { operator: *op }),
                };
                let combined: DocSet = if *op == Operator::And {
                    left.intersection(&right).cloned().collect()
                } else {
                    left.union(&right).cloned().collect()
                };
                stack.push(Operand::Set(combined));
            }
        }
    }

    match stack.len() {
        0 => Ok(DocSet::new()),
        1 => Ok(stack.pop().map(|v| v.resolve(index)).unwrap_or_default()),
        count => Err(MalformedQuery::UnconsumedOperands { count }),
    }
}

/// Evaluate a Boolean query against an index.
///
/// Unknown terms match nothing. An empty or whitespace-only query matches
/// nothing. A query that does not reduce to a single value is rejected.
pub fn evaluate(index: &InvertedIndex, universe: &Universe, query: &str) -> Result<DocSet, MalformedQuery> {
    let postfix = parse(query)?;
    evaluate_postfix(index, universe, &postfix)
}
