use crate::tokenizer::{normalize_term, tokenize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

pub type DocId = String;

/// A document collection: caller-chosen id -> raw text.
pub type Documents = BTreeMap<DocId, String>;

/// Set of document ids; ordered so results render lexicographically.
pub type DocSet = BTreeSet<DocId>;

/// Every document id known to an index. NOT is a complement against this set.
pub type Universe = DocSet;

/// Term -> posting set. Read-only once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvertedIndex {
    postings: HashMap<String, DocSet>,
}

impl InvertedIndex {
    pub fn new() -> Self { Self::default() }

    /// Posting set for `term`, looked up case-insensitively. `None` when no
    /// document contains the term.
    pub fn get(&self, term: &str) -> Option<&DocSet> {
        self.postings.get(&normalize_term(term))
    }

    /// Posting set for `term`, empty when the term is unknown.
    pub fn postings(&self, term: &str) -> DocSet {
        self.get(term).cloned().unwrap_or_default()
    }

    pub fn contains_term(&self, term: &str) -> bool {
        self.get(term).is_some()
    }

    pub fn num_terms(&self) -> usize { self.postings.len() }

    pub fn is_empty(&self) -> bool { self.postings.is_empty() }

    /// Terms with their postings, sorted by term.
    pub fn terms(&self) -> impl Iterator<Item = (&str, &DocSet)> {
        let mut entries: Vec<_> = self.postings.iter().map(|(t, ids)| (t.as_str(), ids)).collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        entries.into_iter()
    }

    fn insert(&mut self, term: String, doc_id: &str) {
        self.postings.entry(term).or_default().insert(doc_id.to_string());
    }
}

/// Build an inverted index from a document collection.
pub fn build_index(docs: &Documents) -> InvertedIndex {
    let mut index = InvertedIndex::new();
    for (doc_id, text) in docs {
        for term in tokenize(text) {
            index.insert(term, doc_id);
        }
    }
    tracing::debug!(num_docs = docs.len(), num_terms = index.num_terms(), "built inverted index");
    index
}

/// The set of ids in a document collection.
pub fn universe(docs: &Documents) -> Universe {
    docs.keys().cloned().collect()
}
