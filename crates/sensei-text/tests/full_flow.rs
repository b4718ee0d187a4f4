use std::path::PathBuf;

use sensei_core::corpus::Corpus;
use sensei_core::traits::RuleIndex;
use sensei_text::TfIdfIndex;

fn standards_dir() -> PathBuf {
    // crates/sensei-text -> crates -> repo root
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).ancestors().nth(2).unwrap().to_path_buf();
    root.join("standards")
}

#[test]
fn tfidf_full_flow() {
    let dir = standards_dir();
    let corpus = Corpus::load(&dir).expect("load sample corpus");
    eprintln!("TF-IDF: indexing {} rules from {}", corpus.len(), dir.display());
    let index = TfIdfIndex::build(corpus.chunks());
    assert_eq!(index.len(), corpus.len());
    assert!(index.vocabulary_len() > 0);

    for q in ["naming identifiers", "exceptions error handling", "http status codes"] {
        let results = index.query(q, 5).expect("query");
        eprintln!("q='{}' -> {} hits", q, results.len());
        assert!(!results.is_empty(), "sample corpus should cover '{q}'");
        assert!(results.len() <= 5);
        assert!(results.windows(2).all(|w| w[0].score >= w[1].score));
    }
}
