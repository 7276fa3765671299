use crate::error::ConfigError;
use lazy_static::lazy_static;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use unicode_normalization::UnicodeNormalization;
use std::collections::HashSet;

lazy_static! {
    static ref RE: Regex = Regex::new(r"(?u)\b\w\w+\b").expect("valid regex");
    static ref STEMMER: Stemmer = Stemmer::create(Algorithm::English);
    static ref ENGLISH_STOPWORDS: HashSet<&'static str> = {
        let words: &[&str] = &[
            "a","about","above","across","after","afterwards","again","against","all","almost","alone","along","already","also","although","always","am","among","amongst","amoungst","amount","an","and","another","any","anyhow","anyone","anything","anyway","anywhere","are","around","as","at",
            "back","be","became","because","become","becomes","becoming","been","before","beforehand","behind","being","below","beside","besides","between","beyond","bill","both","bottom","but","by",
            "call","can","cannot","cant","co","con","could","couldnt","cry",
            "de","describe","detail","do","done","down","due","during",
            "each","eg","eight","either","eleven","else","elsewhere","empty","enough","etc","even","ever","every","everyone","everything","everywhere","except",
            "few","fifteen","fifty","fill","find","fire","first","five","for","former","formerly","forty","found","four","from","front","full","further",
            "get","give","go",
            "had","has","hasnt","have","he","hence","her","here","hereafter","hereby","herein","hereupon","hers","herself","him","himself","his","how","however","hundred",
            "i","ie","if","in","inc","indeed","interest","into","is","it","its","itself",
            "keep","last","latter","latterly","least","less","ltd",
            "made","many","may","me","meanwhile","might","mill","mine","more","moreover","most","mostly","move","much","must","my","myself",
            "name","namely","neither","never","nevertheless","next","nine","no","nobody","none","noone","nor","not","nothing","now","nowhere",
            "of","off","often","on","once","one","only","onto","or","other","others","otherwise","our","ours","ourselves","out","over","own",
            "part","per","perhaps","please","put","rather","re",
            "same","see","seem","seemed","seeming","seems","serious","several","she","should","show","side","since","sincere","six","sixty","so","some","somehow","someone","something","sometime","sometimes","somewhere","still","such","system",
            "take","ten","than","that","the","their","them","themselves","then","thence","there","thereafter","thereby","therefore","therein","thereupon","these","they","thick","thin","third","this","those","though","three","through","throughout","thru","thus","to","together","too","top","toward","towards","twelve","twenty","two",
            "un","under","until","up","upon","us",
            "very","via",
            "was","we","well","were","what","whatever","when","whence","whenever","where","whereafter","whereas","whereby","wherein","whereupon","wherever","whether","which","while","whither","who","whoever","whole","whom","whose","why","will","with","within","without","would",
            "yet","you","your","yours","yourself","yourselves"
        ];
        words.iter().copied().collect()
    };
}

/// Which stop words are removed before n-grams are assembled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopWords {
    English,
    None,
    Custom(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizerConfig {
    /// Inclusive (min, max) n-gram lengths.
    pub ngram_range: (usize, usize),
    pub stop_words: StopWords,
    /// Reduce every word to its English stem before n-grams are formed.
    pub stem: bool,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self { ngram_range: (1, 2), stop_words: StopWords::English, stem: false }
    }
}

#[derive(Debug, Clone)]
enum StopSet {
    English,
    None,
    Custom(HashSet<String>),
}

impl StopSet {
    fn contains(&self, token: &str) -> bool {
        match self {
            StopSet::English => ENGLISH_STOPWORDS.contains(token),
            StopSet::None => false,
            StopSet::Custom(words) => words.contains(token),
        }
    }
}

/// Text analyzer shared by vocabulary fitting and query transformation.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    min_n: usize,
    max_n: usize,
    stop_words: StopSet,
    stem: bool,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self { min_n: 1, max_n: 2, stop_words: StopSet::English, stem: false }
    }
}

impl Tokenizer {
    pub fn new(config: TokenizerConfig) -> Result<Self, ConfigError> {
        let (min_n, max_n) = config.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(ConfigError::NgramRange { min: min_n, max: max_n });
        }
        let stop_words = match config.stop_words {
            StopWords::English => StopSet::English,
            StopWords::None => StopSet::None,
            StopWords::Custom(words) => {
                StopSet::Custom(words.into_iter().map(|w| w.to_lowercase()).collect())
            }
        };
        Ok(Self { min_n, max_n, stop_words, stem: config.stem })
    }

    /// NFKC-normalized, lowercased words with stop words removed (and stemmed if configured).
    pub fn words(&self, text: &str) -> Vec<String> {
        let normalized = text.nfkc().collect::<String>().to_lowercase();
        let mut words = Vec::new();
        for mat in RE.find_iter(&normalized) {
            let token = mat.as_str();
            if self.stop_words.contains(token) { continue; }
            if self.stem {
                words.push(STEMMER.stem(token).into_owned());
            } else {
                words.push(token.to_string());
            }
        }
        words
    }

    /// Every n-gram in the configured range, shortest n first, each in text order.
    pub fn analyze(&self, text: &str) -> Vec<String> {
        let words = self.words(text);
        let mut grams = Vec::new();
        for n in self.min_n..=self.max_n {
            if n == 1 {
                grams.extend(words.iter().cloned());
                continue;
            }
            for window in words.windows(n) {
                grams.push(window.join(" "));
            }
        }
        grams
    }
}

/// Unigrams of `text` under the default English analyzer.
pub fn tokenize(text: &str) -> Vec<String> {
    Tokenizer::default().words(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_tokenize() {
        let t = tokenize("The Matrix, a hacker's story!");
        assert_eq!(t, vec!["matrix", "hacker", "story"]);
    }

    #[test]
    fn bigrams_join_surviving_neighbours() {
        let grams = Tokenizer::default().analyze("a thief who steals secrets");
        assert_eq!(grams, vec!["thief", "steals", "secrets", "thief steals", "steals secrets"]);
    }

    #[test]
    fn single_characters_are_dropped() {
        assert!(tokenize("x y z").is_empty());
        assert_eq!(tokenize("Sci-Fi|Thriller 2010"), vec!["sci", "fi", "thriller", "2010"]);
    }

    #[test]
    fn stemming_is_opt_in() {
        let cfg = TokenizerConfig { stem: true, ..TokenizerConfig::default() };
        let t = Tokenizer::new(cfg).unwrap();
        assert_eq!(t.words("running dreams"), vec!["run", "dream"]);
    }

    #[test]
    fn custom_stop_words_replace_the_builtin_list() {
        let cfg = TokenizerConfig {
            ngram_range: (1, 1),
            stop_words: StopWords::Custom(vec!["Movie".into()]),
            stem: false,
        };
        let t = Tokenizer::new(cfg).unwrap();
        assert_eq!(t.analyze("the movie"), vec!["the"]);
    }

    #[test]
    fn english_list_matches_the_classic_set() {
        assert_eq!(ENGLISH_STOPWORDS.len(), 318);
        assert!(tokenize("show me the serious system on top").is_empty());
        assert_eq!(tokenize("didn just ve"), vec!["didn", "just", "ve"]);
    }

    #[test]
    fn rejects_bad_ngram_range() {
        let cfg = TokenizerConfig { ngram_range: (2, 1), ..TokenizerConfig::default() };
        assert!(matches!(Tokenizer::new(cfg), Err(ConfigError::NgramRange { min: 2, max: 1 })));
        let cfg = TokenizerConfig { ngram_range: (0, 1), ..TokenizerConfig::default() };
        assert!(Tokenizer::new(cfg).is_err());
    }
}
