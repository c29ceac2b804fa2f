//! Containment-based keyword overlap between a profile and a job

use crate::config::{ProcessingConfig, ScoringConfig};
use crate::input::{Job, Profile};
use crate::processing::document::{JobTextBuilder, ProfileTextBuilder};
use crate::processing::lemmatizer::Lemmatizer;
use crate::processing::text_processor::{LemmaSet, TextNormalizer};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Result of one overlap computation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeywordCoverage {
    /// Share of job lemmas found in the profile
    pub containment: f32,
    /// Containment after the coverage curve, in [0, 1]
    pub score: f32,
    pub matched: Vec<String>,
    pub missing: Vec<String>,
}

pub struct KeywordOverlapScorer {
    normalizer: TextNormalizer,
    coverage_curve: f32,
}

impl KeywordOverlapScorer {
    pub fn new(lemmatizer: Arc<dyn Lemmatizer>) -> Self {
        Self::from_config(
            lemmatizer,
            &ProcessingConfig::default(),
            &ScoringConfig::default(),
        )
    }

    pub fn from_config(
        lemmatizer: Arc<dyn Lemmatizer>,
        processing: &ProcessingConfig,
        scoring: &ScoringConfig,
    ) -> Self {
        Self {
            normalizer: TextNormalizer::new(lemmatizer)
                .with_min_token_chars(processing.min_token_chars),
            coverage_curve: scoring.coverage_curve,
        }
    }

    /// Curved overlap score in [0, 1]
    pub fn overlap(&self, profile: &Profile, job: &Job) -> f32 {
        self.coverage(profile, job).score
    }

    /// Full coverage detail: which job lemmas the profile covers and which it lacks
    pub fn coverage(&self, profile: &Profile, job: &Job) -> KeywordCoverage {
        let job_lemmas = self.normalizer.lemmas(&JobTextBuilder::core_text(job));
        if job_lemmas.is_empty() {
            return KeywordCoverage::default();
        }

        let profile_lemmas = self.normalizer.lemmas(&ProfileTextBuilder::build(profile));

        let (matched, missing): (Vec<String>, Vec<String>) = job_lemmas
            .iter()
            .cloned()
            .partition(|lemma| profile_lemmas.contains(lemma));

        let containment = Self::containment(&job_lemmas, &profile_lemmas);

        KeywordCoverage {
            containment,
            score: (containment * self.coverage_curve).clamp(0.0, 1.0),
            matched,
            missing,
        }
    }

    /// |required ∩ offered| / |required|, or 0.0 when nothing is required
    pub fn containment(required: &LemmaSet, offered: &LemmaSet) -> f32 {
        if required.is_empty() {
            return 0.0;
        }
        let shared = required.intersection(offered).count();
        shared as f32 / required.len() as f32
    }
}
