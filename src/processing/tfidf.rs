//! Lexical TF-IDF scorer for deployments without an embedding model

use crate::input::{Job, Profile};
use crate::processing::analyzer::{ScoreBreakdown, Scorer};
use crate::processing::combiner::round_to_tenth;
use crate::processing::document::{JobTextBuilder, ProfileTextBuilder};
use crate::processing::text_processor::english_stop_words;
use log::debug;
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Cosine similarity of TF-IDF vectors fitted on the two-document corpus
/// {profile, job}, scaled to 0-100.
pub struct TfIdfScorer {
    token_regex: Regex,
    stop_words: HashSet<&'static str>,
    score_ceiling: f32,
}

impl Default for TfIdfScorer {
    fn default() -> Self {
        Self::new(0.98)
    }
}

impl TfIdfScorer {
    pub fn new(score_ceiling: f32) -> Self {
        Self {
            token_regex: Regex::new(r"\b\w\w+\b").expect("Invalid token regex"),
            stop_words: english_stop_words(),
            score_ceiling,
        }
    }

    /// Cosine similarity in [0, 1] of the two texts' TF-IDF vectors
    pub fn similarity(&self, left: &str, right: &str) -> f32 {
        let left_counts = self.term_counts(left);
        let right_counts = self.term_counts(right);
        if left_counts.is_empty() || right_counts.is_empty() {
            return 0.0;
        }

        let left_vector = Self::weigh(&left_counts, &right_counts);
        let right_vector = Self::weigh(&right_counts, &left_counts);

        // Both vectors are L2-normalized, so the dot product is the cosine
        left_vector
            .iter()
            .filter_map(|(term, weight)| right_vector.get(term).map(|other| weight * other))
            .sum::<f32>()
            .clamp(0.0, 1.0)
    }

    fn term_counts(&self, text: &str) -> BTreeMap<String, usize> {
        let lowered = text.to_lowercase();
        let mut counts = BTreeMap::new();
        for token in self.token_regex.find_iter(&lowered) {
            let term = token.as_str();
            if self.stop_words.contains(term) {
                continue;
            }
            *counts.entry(term.to_string()).or_insert(0) += 1;
        }
        counts
    }

    /// Smoothed IDF over a two-document corpus, then L2 normalization
    fn weigh(
        counts: &BTreeMap<String, usize>,
        other: &BTreeMap<String, usize>,
    ) -> BTreeMap<String, f32> {
        let documents = 2.0_f32;
        let mut weights: BTreeMap<String, f32> = counts
            .iter()
            .map(|(term, &count)| {
                let document_frequency = if other.contains_key(term) { 2.0 } else { 1.0 };
                let idf = ((1.0 + documents) / (1.0 + document_frequency)).ln() + 1.0;
                (term.clone(), count as f32 * idf)
            })
            .collect();

        let norm = weights.values().map(|w| w * w).sum::<f32>().sqrt();
        if norm > 0.0 {
            for weight in weights.values_mut() {
                *weight /= norm;
            }
        }
        weights
    }
}

impl Scorer for TfIdfScorer {
    fn name(&self) -> &'static str {
        "tf-idf"
    }

    fn evaluate(&self, profile: &Profile, job: &Job) -> ScoreBreakdown {
        let profile_text = ProfileTextBuilder::corpus_text(profile);
        let job_text = JobTextBuilder::corpus_text(job);

        if profile_text.trim().is_empty() || job_text.trim().is_empty() {
            return ScoreBreakdown::default();
        }

        let similarity = self.similarity(&profile_text, &job_text);
        let value = round_to_tenth(similarity * 100.0).min(round_to_tenth(self.score_ceiling * 100.0));
        debug!("TF-IDF cosine={:.4} score={:.1}", similarity, value);

        let profile_terms: BTreeSet<String> = self.term_counts(&profile_text).into_keys().collect();
        let (matched_keywords, missing_keywords): (Vec<String>, Vec<String>) = self
            .term_counts(&job_text)
            .into_keys()
            .partition(|term| profile_terms.contains(term));

        ScoreBreakdown {
            value,
            keyword: None,
            semantic: None,
            lexical: Some(similarity),
            degraded: false,
            matched_keywords,
            missing_keywords,
        }
    }
}
