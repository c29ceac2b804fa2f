//! Embedding provider backed by Model2Vec static models

use crate::config::Config;
use crate::error::{MatcherError, Result};
use crate::processing::lemmatizer::{Lemmatizer, RuleLemmatizer};
use log::{info, warn};
use model2vec_rs::model::StaticModel;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

/// Produces document-level vectors for text
pub trait Embedder: Send + Sync {
    fn embed(&self, text: &str) -> Vec<f32>;

    fn model_name(&self) -> &str;
}

pub struct Model2VecEmbedder {
    model: StaticModel,
    model_name: String,
}

impl Model2VecEmbedder {
    /// Load a model from a local directory or a HuggingFace repo id
    pub fn load(model_path: &Path) -> Result<Self> {
        let start_time = Instant::now();
        info!("Loading Model2Vec embedding model from: {}", model_path.display());

        let model = StaticModel::from_pretrained(model_path, None, None, None)
            .map_err(|e| MatcherError::Embedding(format!("Failed to load model: {}", e)))?;

        info!("Model loaded in {:.2?}", start_time.elapsed());

        Ok(Self {
            model,
            model_name: model_path.to_string_lossy().to_string(),
        })
    }
}

impl Embedder for Model2VecEmbedder {
    fn embed(&self, text: &str) -> Vec<f32> {
        // No token cap: callers bound input length in characters before embedding
        self.model
            .encode_with_args(&[text.to_string()], None, 1)
            .into_iter()
            .next()
            .unwrap_or_default()
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}

/// Whether real vectors are available. Scorers match on this instead of
/// probing the model at runtime.
#[derive(Clone)]
pub enum EmbeddingProvider {
    Real(Arc<dyn Embedder>),
    Unavailable,
}

impl EmbeddingProvider {
    pub fn is_available(&self) -> bool {
        matches!(self, EmbeddingProvider::Real(_))
    }

    pub fn model_name(&self) -> Option<&str> {
        match self {
            EmbeddingProvider::Real(embedder) => Some(embedder.model_name()),
            EmbeddingProvider::Unavailable => None,
        }
    }
}

/// Shared read-only language resources handed to every scorer
pub struct LanguageModel {
    pub lemmatizer: Arc<dyn Lemmatizer>,
    pub embeddings: EmbeddingProvider,
}

impl LanguageModel {
    /// Load the configured embedding model. A model that fails to load leaves
    /// the provider `Unavailable` so scoring keeps working on keywords alone.
    pub fn load(config: &Config) -> Self {
        let source = config.embedding_model_source();
        let embeddings = match Model2VecEmbedder::load(&source) {
            Ok(embedder) => EmbeddingProvider::Real(Arc::new(embedder)),
            Err(e) => {
                warn!(
                    "Embedding model unavailable, semantic scores will be 0: {}",
                    e
                );
                EmbeddingProvider::Unavailable
            }
        };

        Self {
            lemmatizer: Arc::new(RuleLemmatizer::new()),
            embeddings,
        }
    }

    /// Lemmatizer only, no vectors
    pub fn offline() -> Self {
        Self {
            lemmatizer: Arc::new(RuleLemmatizer::new()),
            embeddings: EmbeddingProvider::Unavailable,
        }
    }

    pub fn with_embedder(embedder: Arc<dyn Embedder>) -> Self {
        Self {
            lemmatizer: Arc::new(RuleLemmatizer::new()),
            embeddings: EmbeddingProvider::Real(embedder),
        }
    }
}

/// Cosine similarity of two vectors. Mismatched, empty or zero vectors give 0.0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    let score = dot_product / (norm_a * norm_b);
    if score.is_finite() {
        score
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedEmbedder;

    impl Embedder for FixedEmbedder {
        fn embed(&self, _text: &str) -> Vec<f32> {
            vec![1.0, 0.0]
        }

        fn model_name(&self) -> &str {
            "fixed"
        }
    }

    #[test]
    fn test_cosine_similarity() {
        assert!((cosine_similarity(&[1.0, 2.0], &[2.0, 4.0]) - 1.0).abs() < 1e-6);
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-6);
        assert!((cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_similarity_degenerate_vectors() {
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
        assert_eq!(cosine_similarity(&[1.0, 2.0], &[1.0]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
    }

    #[test]
    fn test_provider_variants() {
        let offline = LanguageModel::offline();
        assert!(!offline.embeddings.is_available());
        assert!(offline.embeddings.model_name().is_none());

        let real = LanguageModel::with_embedder(Arc::new(FixedEmbedder));
        assert!(real.embeddings.is_available());
        assert_eq!(real.embeddings.model_name(), Some("fixed"));
    }

    #[test]
    fn test_missing_model_degrades() {
        // A local model directory without tokenizer/model/config files
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("empty-model")).unwrap();

        let mut config = Config::default();
        config.models.models_dir = dir.path().to_path_buf();
        config.models.embedding_model = "empty-model".to_string();

        let model = LanguageModel::load(&config);
        assert!(!model.embeddings.is_available());
    }
}
