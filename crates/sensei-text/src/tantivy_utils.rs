use tantivy::tokenizer::{
    Language, LowerCaser, RemoveLongFilter, SimpleTokenizer, Stemmer, StopWordFilter, TextAnalyzer, TokenStream,
};

/// Terms shorter than this are dropped after analysis.
const MIN_TERM_CHARS: usize = 2;

const STOP_WORDS: &[&str] = &[
    "a","about","above","after","again","against","all","also","am","an","and","any","are","as","at",
    "be","because","been","before","being","below","between","both","but","by",
    "can","could","did","do","does","doing","down","during","each","few","for","from","further",
    "had","has","have","having","he","her","here","hers","herself","him","himself","his","how",
    "i","if","in","into","is","it","its","itself","just","may","me","might","more","most","must","my","myself",
    "no","nor","not","now","of","off","on","once","only","or","other","our","ours","ourselves","out","over","own",
    "same","shall","she","should","so","some","such","than","that","the","their","theirs","them","themselves",
    "then","there","these","they","this","those","through","to","too","under","until","up","very",
    "was","we","were","what","when","where","which","while","who","whom","whose","why","will","with","would",
    "you","your","yours","yourself","yourselves",
];

/// Lowercased, stopword-free, stemmed word terms.
#[derive(Clone)]
pub struct TermAnalyzer {
    analyzer: TextAnalyzer,
}

impl Default for TermAnalyzer {
    fn default() -> Self {
        let analyzer = TextAnalyzer::builder(SimpleTokenizer::default())
            .filter(RemoveLongFilter::limit(40))
            .filter(LowerCaser)
            .filter(StopWordFilter::remove(STOP_WORDS.iter().map(|s| (*s).to_string())))
            .filter(Stemmer::new(Language::English))
            .build();
        Self { analyzer }
    }
}

impl TermAnalyzer {
    pub fn terms(&self, text: &str) -> Vec<String> {
        let mut analyzer = self.analyzer.clone();
        let mut stream = analyzer.token_stream(text);
        let mut out = Vec::new();
        while stream.advance() {
            let term = &stream.token().text;
            if term.chars().count() >= MIN_TERM_CHARS {
                out.push(term.clone());
            }
        }
        out
    }
}
