//! Document collections: where documents come from and how query results
//! are handed back with their text.

use crate::error::{CollectionError, MalformedQuery};
use crate::index::{build_index, universe, DocId, Documents, InvertedIndex, Universe};
use crate::query::evaluate;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

pub const SAMPLE_DOCUMENTS: &str = "\
doc1: Information retrieval systems use Boolean queries to find documents.
doc2: Boolean retrieval is fundamental to search engines.
doc3: Modern search engines use advanced algorithms beyond simple Boolean queries.
doc4: Data mining techniques are used for more complex search tasks.";

pub const DEFAULT_QUERY: &str = "Boolean AND retrieval";

/// Parse form text with one `id: text` document per line.
///
/// The id ends at the first `:`; both sides are trimmed. Blank lines are skipped.
pub fn parse_documents(input: &str) -> Result<Documents, CollectionError> {
    let mut docs = Documents::new();
    for (n, line) in input.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let (id, text) = line
            .split_once(':')
            .ok_or_else(|| CollectionError::InvalidLine { line: n + 1, text: line.to_string() })?;
        insert_unique(&mut docs, id.trim().to_string(), text.trim().to_string())?;
    }
    if docs.is_empty() {
        return Err(CollectionError::Empty);
    }
    Ok(docs)
}

fn insert_unique(docs: &mut Documents, id: DocId, text: String) -> Result<(), CollectionError> {
    if docs.contains_key(&id) {
        return Err(CollectionError::DuplicateId(id));
    }
    docs.insert(id, text);
    Ok(())
}

/// Load documents from disk.
///
/// A file is read as form text (see [`parse_documents`]). A directory
/// contributes one document per regular file, keyed by file name.
pub fn load_documents<P: AsRef<Path>>(path: P) -> Result<Documents> {
    let path = path.as_ref();
    if path.is_dir() {
        let mut docs = Documents::new();
        let entries = WalkDir::new(path)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !e.file_name().to_string_lossy().starts_with('.'));
        for entry in entries {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let id = entry.file_name().to_string_lossy().into_owned();
            let text = fs::read_to_string(entry.path())
                .with_context(|| format!("reading {}", entry.path().display()))?;
            insert_unique(&mut docs, id, text)?;
        }
        if docs.is_empty() {
            return Err(CollectionError::Empty.into());
        }
        tracing::debug!(dir = %path.display(), num_docs = docs.len(), "loaded documents from directory");
        Ok(docs)
    } else {
        let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        Ok(parse_documents(&text)?)
    }
}

/// A matching document with its text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hit {
    pub doc_id: DocId,
    pub text: String,
}

/// Documents together with the index and universe built from them.
#[derive(Debug, Clone)]
pub struct Collection {
    docs: Documents,
    index: InvertedIndex,
    universe: Universe,
}

impl Collection {
    pub fn new(docs: Documents) -> Result<Self, CollectionError> {
        if docs.is_empty() {
            return Err(CollectionError::Empty);
        }
        let index = build_index(&docs);
        let universe = universe(&docs);
        Ok(Self { docs, index, universe })
    }

    pub fn sample() -> Result<Self, CollectionError> {
        Self::new(parse_documents(SAMPLE_DOCUMENTS)?)
    }

    pub fn documents(&self) -> &Documents { &self.docs }
    pub fn index(&self) -> &InvertedIndex { &self.index }
    pub fn universe(&self) -> &Universe { &self.universe }
    pub fn len(&self) -> usize { self.docs.len() }
    pub fn is_empty(&self) -> bool { self.docs.is_empty() }

    pub fn text(&self, doc_id: &str) -> Option<&str> {
        self.docs.get(doc_id).map(String::as_str)
    }

    /// Evaluate `query` and return matching documents ordered by id.
    pub fn search(&self, query: &str) -> Result<Vec<Hit>, MalformedQuery> {
        let ids = evaluate(&self.index, &self.universe, query)?;
        Ok(ids
            .into_iter()
            .filter_map(|doc_id| {
                let text = self.docs.get(&doc_id)?.clone();
                Some(Hit { doc_id, text })
            })
            .collect())
    }
}
