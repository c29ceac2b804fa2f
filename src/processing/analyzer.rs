//! Scoring strategies and the engine that runs the configured one

use crate::config::{Config, ScorerKind};
use crate::error::Result;
use crate::input::{Job, Profile};
use crate::llm::analyzer::ExplanationRequester;
use crate::output::report::{MatchReport, ReportMetadata};
use crate::processing::combiner::ScoreCombiner;
use crate::processing::embeddings::LanguageModel;
use crate::processing::keyword_matcher::KeywordOverlapScorer;
use crate::processing::semantic::SemanticSimilarityScorer;
use crate::processing::tfidf::TfIdfScorer;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

/// A strategy that turns a profile and a job into a 0-98 relevance score
pub trait Scorer: Send + Sync {
    fn name(&self) -> &'static str;

    fn evaluate(&self, profile: &Profile, job: &Job) -> ScoreBreakdown;

    fn score(&self, profile: &Profile, job: &Job) -> f32 {
        self.evaluate(profile, job).value
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Final score in [0.0, 98.0], one decimal place
    pub value: f32,
    /// Keyword sub-score in [0, 1], when the strategy has one
    pub keyword: Option<f32>,
    /// Semantic sub-score in [0, 1], when the strategy has one
    pub semantic: Option<f32>,
    /// Term-weighted lexical similarity in [0, 1], for TF-IDF scoring
    #[serde(default)]
    pub lexical: Option<f32>,
    /// Scored without embeddings
    pub degraded: bool,
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
}

/// Lemma containment combined with embedding similarity
pub struct KeywordSemanticScorer {
    keywords: KeywordOverlapScorer,
    semantic: SemanticSimilarityScorer,
    combiner: ScoreCombiner,
}

impl KeywordSemanticScorer {
    pub fn new(model: &LanguageModel) -> Self {
        Self::from_config(model, &Config::default())
    }

    pub fn from_config(model: &LanguageModel, config: &Config) -> Self {
        Self {
            keywords: KeywordOverlapScorer::from_config(
                model.lemmatizer.clone(),
                &config.processing,
                &config.scoring,
            ),
            semantic: SemanticSimilarityScorer::from_config(
                model.embeddings.clone(),
                &config.processing,
                &config.scoring,
            ),
            combiner: ScoreCombiner::new(config.scoring.clone()),
        }
    }
}

impl Scorer for KeywordSemanticScorer {
    fn name(&self) -> &'static str {
        "keyword-semantic"
    }

    fn evaluate(&self, profile: &Profile, job: &Job) -> ScoreBreakdown {
        let coverage = self.keywords.coverage(profile, job);
        let similarity = self.semantic.similarity(profile, job);
        let value = self.combiner.combine(coverage.score, similarity.score);

        debug!(
            "keyword={:.3} (containment {:.3}) semantic={:.3} (raw {:.3}) final={:.1}",
            coverage.score, coverage.containment, similarity.score, similarity.raw, value
        );

        ScoreBreakdown {
            value,
            keyword: Some(coverage.score),
            semantic: Some(similarity.score),
            lexical: None,
            degraded: similarity.degraded,
            matched_keywords: coverage.matched,
            missing_keywords: coverage.missing,
        }
    }
}

/// Owns the shared language model, one selected scorer, and the explanation path
pub struct MatchEngine {
    model: Arc<LanguageModel>,
    scorer: Box<dyn Scorer>,
    explainer: ExplanationRequester,
}

impl MatchEngine {
    pub fn new(model: Arc<LanguageModel>, scorer: Box<dyn Scorer>) -> Self {
        Self {
            model,
            scorer,
            explainer: ExplanationRequester::disabled(),
        }
    }

    /// Load the language model once and build the configured scorer and explainer
    pub fn from_config(config: &Config) -> Result<Self> {
        let model = match config.models.scorer {
            ScorerKind::KeywordSemantic => LanguageModel::load(config),
            // TF-IDF never touches embeddings
            ScorerKind::TfIdf => LanguageModel::offline(),
        };
        let model = Arc::new(model);

        let scorer = Self::build_scorer(config.models.scorer, &model, config);
        info!("Using {} scorer", scorer.name());

        let explainer = ExplanationRequester::from_config(&config.explanation)?;

        Ok(Self::new(model, scorer).with_explainer(explainer))
    }

    pub fn build_scorer(kind: ScorerKind, model: &LanguageModel, config: &Config) -> Box<dyn Scorer> {
        match kind {
            ScorerKind::KeywordSemantic => {
                if !model.embeddings.is_available() {
                    warn!("Keyword-semantic scorer running without embeddings");
                }
                Box::new(KeywordSemanticScorer::from_config(model, config))
            }
            ScorerKind::TfIdf => Box::new(TfIdfScorer::new(config.scoring.score_ceiling)),
        }
    }

    pub fn with_explainer(mut self, explainer: ExplanationRequester) -> Self {
        self.explainer = explainer;
        self
    }

    pub fn scorer_name(&self) -> &'static str {
        self.scorer.name()
    }

    pub fn score(&self, profile: &Profile, job: &Job) -> f32 {
        self.scorer.score(profile, job)
    }

    pub fn evaluate(&self, profile: &Profile, job: &Job) -> ScoreBreakdown {
        self.scorer.evaluate(profile, job)
    }

    /// Score, optionally explain, and package everything into a report
    pub async fn analyze(&self, profile: &Profile, job: &Job, explain: bool) -> MatchReport {
        let start_time = Instant::now();

        let breakdown = self.evaluate(profile, job);

        let explanation = if explain {
            Some(self.explainer.explain(profile, job, breakdown.value).await)
        } else {
            None
        };

        let metadata = ReportMetadata::new(
            self.scorer.name(),
            self.model.embeddings.model_name().map(str::to_string),
            self.explainer.model_name().map(str::to_string),
            start_time.elapsed().as_millis() as u64,
        );

        MatchReport::new(job.title.clone(), breakdown, explanation, metadata)
    }
}
