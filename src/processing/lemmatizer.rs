//! Rule-based English lemmatization
//!
//! Reduces inflected word forms to a dictionary base form ("analyzing" ->
//! "analyze", "technologies" -> "technology"). The rules cover the regular
//! English inflections; an irregular-form table handles the common verbs and
//! nouns that don't follow them. Tokens that contain anything other than
//! letters ("c++", "node.js", "python3") are returned unchanged.

use std::collections::{HashMap, HashSet};

/// Lemmatization capability of the language model
pub trait Lemmatizer: Send + Sync {
    /// Base form of a single lowercase token
    fn lemma(&self, token: &str) -> String;

    /// Lemmatize a whitespace-separated token stream
    fn lemmatize(&self, text: &str) -> Vec<String> {
        text.split_whitespace()
            .map(|token| self.lemma(&token.to_lowercase()))
            .collect()
    }
}

pub struct RuleLemmatizer {
    irregular: HashMap<&'static str, &'static str>,
    invariant: HashSet<&'static str>,
}

impl Default for RuleLemmatizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Lemmatizer for RuleLemmatizer {
    fn lemma(&self, token: &str) -> String {
        let word = token.to_lowercase();

        if word.is_empty() || !word.chars().all(|c| c.is_alphabetic()) {
            return word;
        }

        if let Some(base) = self.irregular.get(word.as_str()) {
            return base.to_string();
        }

        if self.invariant.contains(word.as_str()) || word.chars().count() <= 3 || !word.is_ascii() {
            return word;
        }

        if let Some(base) = Self::strip_plural(&word) {
            return base;
        }

        if let Some(base) = Self::strip_verbal(&word) {
            return base;
        }

        word
    }
}

impl RuleLemmatizer {
    pub fn new() -> Self {
        let irregular = [
            ("ran", "run"), ("built", "build"), ("led", "lead"), ("wrote", "write"),
            ("written", "write"), ("writing", "write"), ("taught", "teach"),
            ("bought", "buy"), ("made", "make"), ("making", "make"), ("began", "begin"),
            ("begun", "begin"), ("grew", "grow"), ("grown", "grow"), ("knew", "know"),
            ("known", "know"), ("thought", "think"), ("brought", "bring"), ("sold", "sell"),
            ("held", "hold"), ("won", "win"), ("met", "meet"), ("spent", "spend"),
            ("sent", "send"), ("took", "take"), ("taken", "take"), ("gave", "give"),
            ("given", "give"), ("using", "use"), ("used", "use"), ("uses", "use"),
            ("children", "child"), ("people", "person"), ("men", "man"), ("women", "woman"),
            ("analyses", "analysis"), ("caches", "cache"), ("changed", "change"),
            ("changing", "change"), ("changes", "change"), ("agreed", "agree"),
            ("better", "good"), ("best", "good"), ("drove", "drive"), ("driven", "drive"),
            ("chose", "choose"), ("chosen", "choose"), ("paid", "pay"), ("found", "find"),
            ("understood", "understand"), ("oversaw", "oversee"), ("overseen", "oversee"),
        ]
        .into_iter()
        .collect();

        let invariant = [
            "kubernetes", "analytics", "statistics", "physics", "economics", "mathematics",
            "logistics", "ethics", "graphics", "electronics", "robotics", "genomics",
            "news", "series", "species", "redis", "postgres", "jenkins", "pandas", "windows",
            "macos", "devops", "mlops", "always", "perhaps", "during", "nothing", "something",
            "anything", "everything", "bias", "canvas", "atlas", "alias", "thus", "data",
        ]
        .into_iter()
        .collect();

        Self {
            irregular,
            invariant,
        }
    }

    fn strip_plural(word: &str) -> Option<String> {
        let len = word.len();

        if word.ends_with("ies") && len > 4 {
            return Some(format!("{}y", &word[..len - 3]));
        }

        if word.ends_with("sses")
            || word.ends_with("xes")
            || word.ends_with("ches")
            || word.ends_with("shes")
            || word.ends_with("zzes")
        {
            return Some(word[..len - 2].to_string());
        }

        if word.ends_with('s')
            && !word.ends_with("ss")
            && !word.ends_with("us")
            && !word.ends_with("is")
        {
            return Some(word[..len - 1].to_string());
        }

        None
    }

    fn strip_verbal(word: &str) -> Option<String> {
        let len = word.len();

        if word.ends_with("ied") && len > 4 {
            return Some(format!("{}y", &word[..len - 3]));
        }

        let stem = if word.ends_with("ing") {
            &word[..len - 3]
        } else if word.ends_with("ed") && !word.ends_with("eed") {
            &word[..len - 2]
        } else {
            return None;
        };

        if stem.len() < 3 || !Self::has_vowel(stem) {
            return None;
        }

        Some(Self::repair_stem(stem))
    }

    /// Undo consonant doubling or restore the silent "e" lost to a suffix
    fn repair_stem(stem: &str) -> String {
        let chars: Vec<char> = stem.chars().collect();
        let n = chars.len();
        let last = chars[n - 1];

        if last == chars[n - 2] && Self::is_consonant(&chars, n - 1) && !"lsz".contains(last) {
            return chars[..n - 1].iter().collect();
        }

        const E_ENDINGS: [&str; 19] = [
            "at", "bl", "iz", "yz", "ag", "ov", "iv", "rv", "lv", "rg", "rc", "uc", "dg",
            "nc", "ur", "rs", "quir", "eas", "ens",
        ];

        let consonant_ut = stem.ends_with("ut") && n >= 3 && Self::is_consonant(&chars, n - 3);

        if E_ENDINGS.iter().any(|ending| stem.ends_with(ending))
            || consonant_ut
            || (Self::measure(&chars) == 1 && Self::ends_cvc(&chars))
        {
            return format!("{}e", stem);
        }

        stem.to_string()
    }

    fn has_vowel(stem: &str) -> bool {
        let chars: Vec<char> = stem.chars().collect();
        (0..chars.len()).any(|i| !Self::is_consonant(&chars, i))
    }

    fn is_consonant(chars: &[char], i: usize) -> bool {
        match chars[i] {
            'a' | 'e' | 'i' | 'o' | 'u' => false,
            'y' => i == 0 || !Self::is_consonant(chars, i - 1),
            _ => true,
        }
    }

    /// Number of vowel-consonant sequences in the stem
    fn measure(chars: &[char]) -> usize {
        let mut m = 0;
        let mut prev_vowel = false;
        for i in 0..chars.len() {
            let consonant = Self::is_consonant(chars, i);
            if consonant && prev_vowel {
                m += 1;
            }
            prev_vowel = !consonant;
        }
        m
    }

    fn ends_cvc(chars: &[char]) -> bool {
        let n = chars.len();
        n >= 3
            && Self::is_consonant(chars, n - 3)
            && !Self::is_consonant(chars, n - 2)
            && Self::is_consonant(chars, n - 1)
            && !"wxy".contains(chars[n - 1])
    }
}
