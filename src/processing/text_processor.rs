//! Text cleaning and canonical lemma extraction

use crate::processing::lemmatizer::Lemmatizer;
use regex::Regex;
use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

/// Deduplicated, ordered set of lemmas extracted from one text
pub type LemmaSet = BTreeSet<String>;

/// Cleans raw text and reduces it to a canonical set of lemmas
pub struct TextNormalizer {
    lemmatizer: Arc<dyn Lemmatizer>,
    stop_words: HashSet<&'static str>,
    strip_regex: Regex,
    min_token_chars: usize,
}

impl TextNormalizer {
    pub fn new(lemmatizer: Arc<dyn Lemmatizer>) -> Self {
        // Keep letters, digits, whitespace and the symbols that make up
        // tokens like "C++", "C#" and "Node.js"
        let strip_regex = Regex::new(r"[^\p{L}\p{N}\s+#.\-]").expect("Invalid strip regex");

        Self {
            lemmatizer,
            stop_words: english_stop_words(),
            strip_regex,
            min_token_chars: 3,
        }
    }

    pub fn with_min_token_chars(mut self, min_token_chars: usize) -> Self {
        self.min_token_chars = min_token_chars;
        self
    }

    /// Strip disallowed characters, lowercase and trim
    pub fn clean_text(&self, text: &str) -> String {
        self.strip_regex
            .replace_all(text, "")
            .to_lowercase()
            .trim()
            .to_string()
    }

    /// Split cleaned text into surface tokens, dropping punctuation-only tokens.
    ///
    /// Trailing `.`/`-` and leading `-` are trimmed. A leading `.` stays, as in
    /// ".net", and so does a trailing `+` or `#`.
    pub fn tokenize(&self, cleaned: &str) -> Vec<String> {
        cleaned
            .split_whitespace()
            .map(|raw| {
                raw.trim_end_matches(|c: char| c == '.' || c == '-')
                    .trim_start_matches('-')
            })
            .filter(|token| token.chars().any(|c| c.is_alphanumeric()))
            .map(str::to_string)
            .collect()
    }

    /// Canonical lemma set of `text`. Empty or unparseable input gives an empty set.
    pub fn lemmas(&self, text: &str) -> LemmaSet {
        let cleaned = self.clean_text(text);
        if cleaned.is_empty() {
            return LemmaSet::new();
        }

        self.tokenize(&cleaned)
            .into_iter()
            .filter(|token| token.chars().count() >= self.min_token_chars)
            .filter(|token| !self.is_stop_word(token))
            .map(|token| self.lemmatizer.lemma(&token))
            .filter(|lemma| !lemma.is_empty())
            .collect()
    }

    pub fn is_stop_word(&self, token: &str) -> bool {
        self.stop_words.contains(token)
    }
}

/// Common English function words. Domain nouns such as "work", "team" and
/// "system" are not stop words.
pub fn english_stop_words() -> HashSet<&'static str> {
    [
        "a", "about", "above", "after", "again", "against", "all", "also", "am", "an",
        "and", "any", "are", "as", "at", "be", "because", "been", "before", "being",
        "below", "between", "both", "but", "by", "can", "cannot", "could", "did", "do",
        "does", "doing", "down", "during", "each", "either", "else", "etc", "ever",
        "every", "few", "for", "from", "further", "had", "has", "have", "having", "he",
        "her", "here", "hers", "herself", "him", "himself", "his", "how", "however", "i",
        "if", "in", "into", "is", "it", "its", "itself", "just", "least", "less", "may",
        "me", "might", "more", "most", "much", "must", "my", "myself", "neither", "no",
        "nor", "not", "now", "of", "off", "often", "on", "once", "only", "or", "other",
        "others", "our", "ours", "ourselves", "out", "over", "own", "per", "perhaps",
        "please", "quite", "rather", "same", "several", "she", "should", "since", "so",
        "some", "such", "than", "that", "the", "their", "theirs", "them", "themselves",
        "then", "there", "therefore", "these", "they", "this", "those", "though",
        "through", "thus", "to", "too", "under", "until", "up", "upon", "us", "very",
        "via", "was", "we", "well", "were", "what", "whatever", "when", "whenever",
        "where", "whereas", "whether", "which", "while", "who", "whom", "whose", "why",
        "will", "with", "within", "without", "would", "yet", "you", "your", "yours",
        "yourself", "yourselves",
    ]
    .into_iter()
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::lemmatizer::RuleLemmatizer;

    fn normalizer() -> TextNormalizer {
        TextNormalizer::new(Arc::new(RuleLemmatizer::new()))
    }

    fn set(items: &[&str]) -> LemmaSet {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_text_cleaning() {
        let normalizer = normalizer();
        let cleaned = normalizer.clean_text("  Loves C++, C# & Node.js!! (React)  ");
        assert_eq!(cleaned, "loves c++ c#  node.js react");
    }

    #[test]
    fn test_tokenization_trims_sentence_punctuation() {
        let normalizer = normalizer();
        let tokens = normalizer.tokenize("python. developer. -- c++ node.js. - .net");
        assert_eq!(tokens, vec!["python", "developer", "c++", "node.js", ".net"]);
    }

    #[test]
    fn test_lemmas_filter_and_deduplicate() {
        let normalizer = normalizer();
        let lemmas = normalizer.lemmas(
            "Python, Flask, AWS. Python, Flask, AWS. Backend Developer. Backend Developer. Built APIs with the team",
        );

        assert_eq!(
            lemmas,
            set(&["api", "aws", "backend", "build", "developer", "flask", "python", "team"])
        );
    }

    #[test]
    fn test_short_tokens_and_stop_words_dropped() {
        let normalizer = normalizer();
        let lemmas = normalizer.lemmas("AI and ML to go with the R language");
        assert_eq!(lemmas, set(&["language"]));
    }

    #[test]
    fn test_symbol_tokens_survive() {
        let normalizer = normalizer();
        let lemmas = normalizer.lemmas("Senior C++ / F# / C# engineer, Node.js and .NET.");
        assert!(lemmas.contains("c++"));
        assert!(lemmas.contains(".net"));
        assert!(!lemmas.contains("net"));
        assert!(lemmas.contains("node.js"));
        // Two characters is below the token length floor
        assert!(!lemmas.contains("c#"));
        assert!(!lemmas.contains("f#"));
        assert!(lemmas.contains("engineer"));
        assert!(lemmas.contains("senior"));
    }

    #[test]
    fn test_empty_and_junk_input() {
        let normalizer = normalizer();
        assert!(normalizer.lemmas("").is_empty());
        assert!(normalizer.lemmas("   \n\t ").is_empty());
        assert!(normalizer.lemmas("!!! ??? ... ---").is_empty());
    }

    #[test]
    fn test_min_token_chars_is_configurable() {
        let normalizer = normalizer().with_min_token_chars(2);
        let lemmas = normalizer.lemmas("AI engineer");
        assert!(lemmas.contains("ai"));
    }
}
