use std::fs;
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

use sensei_core::corpus::{Corpus, CorpusHandle};
use sensei_core::error::Error;

fn write(dir: &TempDir, name: &str, content: &str) {
    fs::write(dir.path().join(name), content).unwrap();
}

#[test]
fn load_single_document() {
    let tmp = TempDir::new().unwrap();
    write(&tmp, "naming.md", "# Naming\n\nRule ID: NAM-1\nAvoid abbreviations in identifiers.\n");

    let corpus = Corpus::load(tmp.path()).expect("load");

    assert_eq!(corpus.len(), 1);
    let chunk = &corpus.chunks()[0];
    assert_eq!(chunk.rule_id, "NAM-1");
    assert_eq!(chunk.doc_name, "naming.md");
    assert_eq!(chunk.text, "Avoid abbreviations in identifiers.");
}

#[test]
fn every_loaded_chunk_has_text() {
    let tmp = TempDir::new().unwrap();
    write(&tmp, "a.md", "Rule ID: A-1\n\nRule ID: A-2\nreal body\nRule ID: A-3\n   \n");
    write(&tmp, "b.md", "Rule ID: B-1\nScope: python\nanother body\n");

    let corpus = Corpus::load(tmp.path()).expect("load");

    let ids: Vec<&str> = corpus.chunks().iter().map(|c| c.rule_id.as_str()).collect();
    assert_eq!(ids, vec!["A-2", "B-1"]);
    assert!(corpus.chunks().iter().all(|c| !c.text.is_empty()));
}

#[test]
fn only_top_level_markdown_documents_are_read() {
    let tmp = TempDir::new().unwrap();
    write(&tmp, "notes.txt", "Rule ID: TXT-1\nignored\n");
    write(&tmp, "rules.md", "Rule ID: MD-1\nkept\n");
    fs::create_dir(tmp.path().join("nested")).unwrap();
    fs::write(tmp.path().join("nested/more.md"), "Rule ID: MD-2\nstale draft\n").unwrap();

    let corpus = Corpus::load(tmp.path()).expect("load");

    let ids: Vec<&str> = corpus.chunks().iter().map(|c| c.rule_id.as_str()).collect();
    assert_eq!(ids, vec!["MD-1"]);
}

#[test]
fn nested_copies_do_not_collide_with_top_level_rules() {
    let tmp = TempDir::new().unwrap();
    write(&tmp, "general_style.md", "Rule ID: GEN-1\ncurrent\n");
    fs::create_dir(tmp.path().join("archive")).unwrap();
    fs::write(tmp.path().join("archive/general_style.md"), "Rule ID: GEN-1\nold\n").unwrap();

    let corpus = Corpus::load(tmp.path()).expect("archived copies are not read");

    assert_eq!(corpus.len(), 1);
    assert_eq!(corpus.chunks()[0].text, "current");
}

#[test]
fn missing_directory_is_corpus_not_found() {
    let tmp = TempDir::new().unwrap();
    let err = Corpus::load(&tmp.path().join("nope")).unwrap_err();
    assert!(matches!(err, Error::CorpusNotFound(_)));
}

#[test]
fn directory_without_rules_is_corpus_empty() {
    let tmp = TempDir::new().unwrap();
    write(&tmp, "intro.md", "# Intro\n\nNo rules in here.\n");
    let err = Corpus::load(tmp.path()).unwrap_err();
    assert!(matches!(err, Error::CorpusEmpty(_)));
}

#[test]
fn duplicate_rule_ids_fail_the_load() {
    let tmp = TempDir::new().unwrap();
    write(&tmp, "a.md", "Rule ID: DUP-1\nfirst\n");
    write(&tmp, "b.md", "Rule ID: DUP-1\nsecond\n");
    let err = Corpus::load(tmp.path()).unwrap_err();
    match err {
        Error::DuplicateRuleId { rule_id, first_doc, second_doc } => {
            assert_eq!(rule_id, "DUP-1");
            assert_eq!(first_doc, "a.md");
            assert_eq!(second_doc, "b.md");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn all_languages_rules_are_scoped_to_unknown_languages() {
    let tmp = TempDir::new().unwrap();
    write(
        &tmp,
        "mixed.md",
        "Rule ID: G-1\nScope: all-languages\nglobal\n\nRule ID: P-1\nScope: python\npython only\n",
    );
    let corpus = Corpus::load(tmp.path()).expect("load");

    let cobol: Vec<String> = corpus.scoped_to("cobol").into_iter().map(|c| c.rule_id).collect();
    assert_eq!(cobol, vec!["G-1"]);
    let python: Vec<String> = corpus.scoped_to("Python").into_iter().map(|c| c.rule_id).collect();
    assert_eq!(python, vec!["G-1", "P-1"]);
}

#[test]
fn handle_loads_once_across_threads() {
    let tmp = TempDir::new().unwrap();
    write(&tmp, "a.md", "Rule ID: A-1\nbody\n");
    let handle = Arc::new(CorpusHandle::new(tmp.path()));
    assert!(!handle.is_loaded());

    let addrs: Vec<usize> = (0..4)
        .map(|_| {
            let handle = Arc::clone(&handle);
            thread::spawn(move || handle.get().map(|c| c as *const Corpus as usize).unwrap())
        })
        .collect::<Vec<_>>()
        .into_iter()
        .map(|t| t.join().unwrap())
        .collect();

    assert!(handle.is_loaded());
    assert!(addrs.windows(2).all(|w| w[0] == w[1]));

    // Later edits on disk are not observed: the corpus is read once.
    write(&tmp, "b.md", "Rule ID: B-1\nbody\n");
    assert_eq!(handle.get().unwrap().len(), 1);
}

#[test]
fn handle_reports_load_failures() {
    let tmp = TempDir::new().unwrap();
    let handle = CorpusHandle::new(tmp.path().join("missing"));
    assert!(matches!(handle.get(), Err(Error::CorpusNotFound(_))));
    assert!(!handle.is_loaded());
}
