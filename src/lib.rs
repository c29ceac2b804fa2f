//! Candidate profile / job posting match scoring

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod llm;
pub mod output;
pub mod processing;

pub use config::Config;
pub use error::{MatcherError, Result};
pub use input::{Education, Experience, Job, Profile};
pub use llm::analyzer::{Explanation, ExplanationRequester};
pub use processing::analyzer::{KeywordSemanticScorer, MatchEngine, ScoreBreakdown, Scorer};
pub use processing::embeddings::{EmbeddingProvider, LanguageModel};
pub use processing::tfidf::TfIdfScorer;
