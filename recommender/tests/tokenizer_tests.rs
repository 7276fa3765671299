use recommender::tokenizer::{tokenize, Tokenizer, TokenizerConfig};

#[test]
fn it_normalizes_case_and_unicode() {
    let words = tokenize("AMÉLIE ﬁlm at the Café");
    // NFKC folds the "ﬁ" ligature, lowercasing keeps the accent
    assert!(words.contains(&"film".to_string()));
    assert!(words.contains(&"amélie".to_string()));
    assert!(words.contains(&"café".to_string()));
}

#[test]
fn it_filters_stopwords() {
    let words = tokenize("The quick brown fox and the lazy dog");
    assert!(!words.contains(&"the".to_string()));
    assert!(!words.contains(&"and".to_string()));
    assert_eq!(words, vec!["quick", "brown", "fox", "lazy", "dog"]);
}

#[test]
fn it_keeps_years_and_builds_bigrams_over_fields() {
    let grams = Tokenizer::default().analyze("Titanic 1997");
    assert_eq!(grams, vec!["titanic", "1997", "titanic 1997"]);
}

#[test]
fn unigram_only_config() {
    let t = Tokenizer::new(TokenizerConfig { ngram_range: (1, 1), ..TokenizerConfig::default() }).unwrap();
    assert_eq!(t.analyze("space survival"), vec!["space", "survival"]);
    let t = Tokenizer::new(TokenizerConfig { ngram_range: (2, 2), ..TokenizerConfig::default() }).unwrap();
    assert_eq!(t.analyze("space survival drama"), vec!["space survival", "survival drama"]);
}
