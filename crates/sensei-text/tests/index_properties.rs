use proptest::prelude::*;

use sensei_core::traits::RuleIndex;
use sensei_core::types::RuleChunk;
use sensei_text::TfIdfIndex;

const WORDS: &[&str] = &[
    "naming", "function", "error", "exception", "comment", "docstring", "route", "status",
    "promise", "async", "import", "module", "variable", "constant", "duplicate", "smell",
];

fn text_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(WORDS), 1..8).prop_map(|words| words.join(" "))
}

fn chunks_strategy() -> impl Strategy<Value = Vec<RuleChunk>> {
    prop::collection::vec(text_strategy(), 1..12).prop_map(|texts| {
        texts
            .into_iter()
            .enumerate()
            .map(|(i, text)| RuleChunk {
                rule_id: format!("R-{i}"),
                scope: "all-languages".to_string(),
                doc_name: "gen.md".to_string(),
                section_title: "Generated".to_string(),
                text,
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn results_come_from_the_indexed_set(chunks in chunks_strategy(), query in text_strategy(), top_k in 0usize..6) {
        let index = TfIdfIndex::build(&chunks);
        let results = index.query(&query, top_k).unwrap();

        for r in &results {
            prop_assert!(chunks.contains(&r.chunk));
            prop_assert!(r.score > 0.0);
            prop_assert!(r.score <= 1.0 + 1e-5);
        }
        if top_k > 0 {
            prop_assert!(results.len() <= top_k);
        }
        prop_assert!(results.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn querying_is_deterministic(chunks in chunks_strategy(), query in text_strategy()) {
        let index = TfIdfIndex::build(&chunks);
        let first = index.query(&query, 0).unwrap();
        let second = TfIdfIndex::build(&chunks).query(&query, 0).unwrap();
        prop_assert_eq!(first, second);
    }
}
