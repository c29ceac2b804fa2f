//! Embedding-based semantic similarity between a profile and a job

use crate::config::{ProcessingConfig, ScoringConfig};
use crate::input::{Job, Profile};
use crate::processing::document::{JobTextBuilder, ProfileTextBuilder};
use crate::processing::embeddings::{cosine_similarity, EmbeddingProvider};
use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SemanticSimilarity {
    /// Cosine similarity of the two document vectors
    pub raw: f32,
    /// Raw similarity rescaled above the baseline, in [0, 1]
    pub score: f32,
    /// No embedding model was loaded, so `raw` was forced to 0
    pub degraded: bool,
}

pub struct SemanticSimilarityScorer {
    embeddings: EmbeddingProvider,
    max_chars: usize,
    baseline: f32,
    gain: f32,
}

impl SemanticSimilarityScorer {
    pub fn new(embeddings: EmbeddingProvider) -> Self {
        Self::from_config(
            embeddings,
            &ProcessingConfig::default(),
            &ScoringConfig::default(),
        )
    }

    pub fn from_config(
        embeddings: EmbeddingProvider,
        processing: &ProcessingConfig,
        scoring: &ScoringConfig,
    ) -> Self {
        Self {
            embeddings,
            max_chars: processing.max_embedding_chars,
            baseline: scoring.semantic_baseline,
            gain: scoring.semantic_gain,
        }
    }

    /// Normalized semantic score in [0, 1]
    pub fn semantic(&self, profile: &Profile, job: &Job) -> f32 {
        self.similarity(profile, job).score
    }

    pub fn similarity(&self, profile: &Profile, job: &Job) -> SemanticSimilarity {
        let profile_text = ProfileTextBuilder::build(profile);
        let job_text = JobTextBuilder::vector_text(job);

        let raw = match &self.embeddings {
            EmbeddingProvider::Unavailable => {
                return SemanticSimilarity {
                    raw: 0.0,
                    score: 0.0,
                    degraded: true,
                };
            }
            EmbeddingProvider::Real(embedder) => {
                if profile_text.trim().is_empty() || job_text.trim().is_empty() {
                    0.0
                } else {
                    let profile_vector = embedder.embed(&truncate_chars(&profile_text, self.max_chars));
                    let job_vector = embedder.embed(&truncate_chars(&job_text, self.max_chars));
                    cosine_similarity(&profile_vector, &job_vector)
                }
            }
        };

        let score = self.normalize(raw);
        debug!("Semantic similarity raw={:.4} normalized={:.4}", raw, score);

        SemanticSimilarity {
            raw,
            score,
            degraded: false,
        }
    }

    /// Collapse everything below the baseline to 0 and stretch the rest over [0, 1]
    pub fn normalize(&self, raw: f32) -> f32 {
        if !raw.is_finite() {
            return 0.0;
        }
        ((raw - self.baseline) * self.gain).clamp(0.0, 1.0)
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
