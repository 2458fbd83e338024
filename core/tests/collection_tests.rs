use retrieval_core::{load_documents, Collection, CollectionError};
use std::fs;
use tempfile::tempdir;

#[test]
fn loads_form_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("docs.txt");
    fs::write(&path, "doc1: cats and dogs\ndoc2: cats only\n").unwrap();

    let docs = load_documents(&path).unwrap();
    assert_eq!(docs.len(), 2);
    assert_eq!(docs["doc2"], "cats only");
}

#[test]
fn loads_directory_keyed_by_file_name() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("one.txt"), "Rust systems programming").unwrap();
    fs::write(dir.path().join("two.txt"), "Learning rust").unwrap();
    fs::write(dir.path().join(".hidden"), "ignored").unwrap();

    let collection = Collection::new(load_documents(dir.path()).unwrap()).unwrap();
    assert_eq!(collection.len(), 2);
    let hits = collection.search("rust AND NOT learning").unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].doc_id, "one.txt");
    assert_eq!(hits[0].text, "Rust systems programming");
}

#[test]
fn empty_directory_is_an_error() {
    let dir = tempdir().unwrap();
    let err = load_documents(dir.path()).unwrap_err();
    assert_eq!(err.downcast_ref::<CollectionError>(), Some(&CollectionError::Empty));
}

#[test]
fn missing_file_is_an_error() {
    let dir = tempdir().unwrap();
    assert!(load_documents(dir.path().join("nope.txt")).is_err());
}
