//! Fusion of keyword and semantic sub-scores into the final match score

use crate::config::ScoringConfig;

/// Weighted combination with a low-coverage penalty and a high-coverage floor.
///
/// `combine` is total: sub-scores are clamped into [0, 1] (NaN counts as 0)
/// and the result always lies in [0, ceiling * 100], rounded to one decimal.
#[derive(Debug, Clone)]
pub struct ScoreCombiner {
    config: ScoringConfig,
}

impl Default for ScoreCombiner {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}

impl ScoreCombiner {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn combine(&self, keyword_score: f32, semantic_score: f32) -> f32 {
        let c = &self.config;
        let keyword = unit(keyword_score);
        let semantic = unit(semantic_score);

        let mut combined = keyword * c.keyword_weight + semantic * c.semantic_weight;

        // Semantic similarity without keyword support is treated as embedding noise
        if keyword < c.penalty_threshold {
            combined *= c.penalty_multiplier;
        }

        if keyword > c.boost_threshold {
            combined = combined.max(c.boost_floor);
        }

        round_to_tenth(combined.clamp(0.0, c.score_ceiling) * 100.0)
    }

    /// Upper bound of `combine`, on the 0-100 scale
    pub fn ceiling(&self) -> f32 {
        round_to_tenth(self.config.score_ceiling * 100.0)
    }
}

fn unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

pub fn round_to_tenth(value: f32) -> f32 {
    (value * 10.0).round() / 10.0
}
