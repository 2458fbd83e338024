use proptest::prelude::*;
use retrieval_core::{build_index, evaluate, universe, DocSet, Documents, MalformedQuery, Operator};

fn docs(pairs: &[(&str, &str)]) -> Documents {
    pairs.iter().map(|(id, text)| (id.to_string(), text.to_string())).collect()
}

fn set(ids: &[&str]) -> DocSet {
    ids.iter().map(|s| s.to_string()).collect()
}

fn run(collection: &Documents, query: &str) -> Result<DocSet, MalformedQuery> {
    evaluate(&build_index(collection), &universe(collection), query)
}

#[test]
fn and_is_evaluated_before_or() {
    // a -> {1}, b -> {1, 2}, c -> {2}
    let d = docs(&[("1", "a b"), ("2", "b c")]);
    assert_eq!(run(&d, "a OR b AND c").unwrap(), set(&["1", "2"]));
    assert_eq!(run(&d, "c AND b OR a").unwrap(), set(&["1", "2"]));
    assert_eq!(run(&d, "a AND b OR c").unwrap(), set(&["1", "2"]));
    assert_eq!(run(&d, "a AND c OR a AND b").unwrap(), set(&["1"]));
}

#[test]
fn not_is_evaluated_before_and() {
    let d = docs(&[("1", "a b"), ("2", "b c"), ("3", "c")]);
    assert_eq!(run(&d, "NOT a AND b").unwrap(), set(&["2"]));
    assert_eq!(run(&d, "b AND NOT c").unwrap(), set(&["1"]));
    assert_eq!(run(&d, "NOT b OR a").unwrap(), set(&["1", "3"]));
}

#[test]
fn operators_and_terms_ignore_case() {
    let d = docs(&[("doc1", "Cats and Dogs"), ("doc2", "cats only")]);
    assert_eq!(run(&d, "CATS and DOGS").unwrap(), set(&["doc1"]));
    assert_eq!(run(&d, "not Dogs").unwrap(), set(&["doc2"]));
}

#[test]
fn empty_collection_matches_nothing() {
    let d = Documents::new();
    assert!(build_index(&d).is_empty());
    assert!(universe(&d).is_empty());
    for query in ["cats", "cats AND dogs", "cats OR dogs", "NOT cats", ""] {
        assert!(run(&d, query).unwrap().is_empty(), "query {query:?}");
    }
}

#[test]
fn malformed_queries_are_rejected() {
    let d = docs(&[("doc1", "cats and dogs")]);
    assert_eq!(run(&d, "AND cats"), Err(MalformedQuery::MissingOperand { operator: Operator::And }));
    assert_eq!(run(&d, "cats OR OR dogs"), Err(MalformedQuery::MissingOperand { operator: Operator::Or }));
    assert_eq!(run(&d, "cats NOT"), Err(MalformedQuery::NotWithoutTerm));
    assert_eq!(run(&d, "cats NOT dogs"), Err(MalformedQuery::UnconsumedOperands { count: 2 }));
}

#[test]
fn malformed_query_message_is_descriptive() {
    let err = run(&docs(&[("doc1", "cats")]), "AND cats").unwrap_err();
    assert_eq!(err.to_string(), "malformed query: `AND` is missing an operand");
}

fn word() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["alpha", "beta", "gamma", "delta", "omega"]).prop_map(String::from)
}

fn collection() -> impl Strategy<Value = Documents> {
    prop::collection::btree_map("[a-z]{1,4}", prop::collection::vec(word(), 0..6).prop_map(|w| w.join(" ")), 0..8)
}

proptest! {
    #[test]
    fn prop_index_is_deterministic(d in collection()) {
        let reversed: Vec<_> = d.iter().rev().map(|(k, v)| (k.clone(), v.clone())).collect();
        let rebuilt: Documents = reversed.into_iter().collect();
        prop_assert_eq!(build_index(&d), build_index(&rebuilt));
    }

    #[test]
    fn prop_not_is_complement(d in collection(), t in prop::sample::select(vec!["alpha", "beta", "zeta"])) {
        let index = build_index(&d);
        let all = universe(&d);
        let expected: DocSet = all.difference(&index.postings(t)).cloned().collect();
        prop_assert_eq!(evaluate(&index, &all, &format!("NOT {t}")).unwrap(), expected);
    }

    #[test]
    fn prop_and_commutes(d in collection(), a in word(), b in word()) {
        let index = build_index(&d);
        let all = universe(&d);
        let ab = evaluate(&index, &all, &format!("{a} AND {b}")).unwrap();
        let ba = evaluate(&index, &all, &format!("{b} AND {a}")).unwrap();
        prop_assert_eq!(&ab, &ba);
        prop_assert_eq!(ab, evaluate(&index, &all, &format!("{a} AND {b}")).unwrap());
    }

    #[test]
    fn prop_absent_terms_have_no_postings(d in collection()) {
        let index = build_index(&d);
        prop_assert!(index.postings("zeta").is_empty());
        prop_assert!(evaluate(&index, &universe(&d), "zeta").unwrap().is_empty());
    }
}
