use crate::query::Operator;
use thiserror::Error;

/// A query that cannot be reduced to a single result set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedQuery {
    #[error("malformed query: `{operator}` is missing an operand")]
    MissingOperand { operator: Operator },
    #[error("malformed query: `NOT` must be followed by a term")]
    NotWithoutTerm,
    #[error("malformed query: {count} operands are not joined by an operator")]
    UnconsumedOperands { count: usize },
}

/// A document collection that cannot be indexed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectionError {
    #[error("invalid document format on line {line}: '{text}'. Expected 'docID: Document text.'")]
    InvalidLine { line: usize, text: String },
    #[error("duplicate document id '{0}'")]
    DuplicateId(String),
    #[error("no valid documents found")]
    Empty,
}
