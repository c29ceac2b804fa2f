//! Match report combining the score breakdown with an optional explanation

use crate::llm::analyzer::Explanation;
use crate::processing::analyzer::ScoreBreakdown;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchReport {
    pub job_title: String,

    /// Final score and its components
    pub breakdown: ScoreBreakdown,

    /// Present only when an explanation was requested
    pub explanation: Option<Explanation>,

    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub scorer: String,
    pub embedding_model: Option<String>,
    pub generation_model: Option<String>,
    pub processing_time_ms: u64,
    pub version: String,
}

/// Coarse reading of a score for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchBand {
    Strong,
    Good,
    Partial,
    Weak,
}

impl MatchReport {
    pub fn new(
        job_title: String,
        breakdown: ScoreBreakdown,
        explanation: Option<Explanation>,
        metadata: ReportMetadata,
    ) -> Self {
        Self {
            job_title,
            breakdown,
            explanation,
            metadata,
        }
    }

    pub fn score(&self) -> f32 {
        self.breakdown.value
    }

    pub fn band(&self) -> MatchBand {
        MatchBand::from_score(self.score())
    }
}

impl ReportMetadata {
    pub fn new(
        scorer: &str,
        embedding_model: Option<String>,
        generation_model: Option<String>,
        processing_time_ms: u64,
    ) -> Self {
        Self {
            generated_at: Utc::now(),
            scorer: scorer.to_string(),
            embedding_model,
            generation_model,
            processing_time_ms,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl MatchBand {
    pub fn from_score(score: f32) -> Self {
        if score >= 85.0 {
            MatchBand::Strong
        } else if score >= 60.0 {
            MatchBand::Good
        } else if score >= 30.0 {
            MatchBand::Partial
        } else {
            MatchBand::Weak
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MatchBand::Strong => "STRONG MATCH",
            MatchBand::Good => "GOOD MATCH",
            MatchBand::Partial => "PARTIAL MATCH",
            MatchBand::Weak => "WEAK MATCH",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_boundaries() {
        assert_eq!(MatchBand::from_score(98.0), MatchBand::Strong);
        assert_eq!(MatchBand::from_score(85.0), MatchBand::Strong);
        assert_eq!(MatchBand::from_score(84.9), MatchBand::Good);
        assert_eq!(MatchBand::from_score(30.0), MatchBand::Partial);
        assert_eq!(MatchBand::from_score(0.0), MatchBand::Weak);
    }

    #[test]
    fn test_report_serializes() {
        let breakdown = ScoreBreakdown {
            value: 42.5,
            ..ScoreBreakdown::default()
        };
        let metadata = ReportMetadata::new("tf-idf", None, None, 3);
        let report = MatchReport::new("Data Analyst".to_string(), breakdown, None, metadata);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["breakdown"]["value"], 42.5);
        assert_eq!(json["metadata"]["scorer"], "tf-idf");
        assert!(json["explanation"].is_null());
        assert_eq!(report.band(), MatchBand::Partial);
    }
}
