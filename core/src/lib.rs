//! Boolean retrieval over a small in-memory document collection.
//!
//! Documents are tokenized into lowercase terms and gathered into an
//! [`InvertedIndex`]. Queries combine terms with `AND`, `OR` and `NOT` and are
//! answered with set operations over posting sets.

pub mod collection;
pub mod error;
pub mod index;
pub mod query;
pub mod tokenizer;

pub use collection::{load_documents, parse_documents, Collection, Hit, DEFAULT_QUERY, SAMPLE_DOCUMENTS};
pub use error::{CollectionError, MalformedQuery};
pub use index::{build_index, universe, DocId, DocSet, Documents, InvertedIndex, Universe};
pub use query::{evaluate, evaluate_postfix, parse, Operator, QueryToken};
