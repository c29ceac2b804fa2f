//! Configuration management for the job matcher

use crate::error::{MatcherError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub models: ModelConfig,
    pub processing: ProcessingConfig,
    pub scoring: ScoringConfig,
    pub explanation: ExplanationConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// HuggingFace repo id, or a directory name under `models_dir`
    pub embedding_model: String,
    pub models_dir: PathBuf,
    pub scorer: ScorerKind,
}

/// Deployment-time choice of scoring strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScorerKind {
    KeywordSemantic,
    TfIdf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingConfig {
    /// Texts are cut to this many characters before embedding
    pub max_embedding_chars: usize,
    /// Tokens shorter than this never become lemmas
    pub min_token_chars: usize,
}

/// Heuristic tuning values for the keyword + semantic scorer.
///
/// None of these have a recorded derivation. The defaults reproduce the
/// production behaviour exactly and should be recalibrated against labelled
/// match data before anyone changes them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub keyword_weight: f32,
    pub semantic_weight: f32,
    pub coverage_curve: f32,
    pub penalty_threshold: f32,
    pub penalty_multiplier: f32,
    pub boost_threshold: f32,
    pub boost_floor: f32,
    pub score_ceiling: f32,
    pub semantic_baseline: f32,
    pub semantic_gain: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplanationConfig {
    pub provider: GenerationProvider,
    pub model: String,
    /// Name of the environment variable holding the API key
    pub api_key_env: String,
    pub endpoint: String,
    pub timeout_secs: u64,
    pub max_prompt_chars: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationProvider {
    Gemini,
    Disabled,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            keyword_weight: 0.65,
            semantic_weight: 0.35,
            coverage_curve: 1.6,
            penalty_threshold: 0.2,
            penalty_multiplier: 0.4,
            boost_threshold: 0.8,
            boost_floor: 0.85,
            score_ceiling: 0.98,
            semantic_baseline: 0.6,
            semantic_gain: 2.5,
        }
    }
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            max_embedding_chars: 100_000,
            min_token_chars: 3,
        }
    }
}

impl Default for ExplanationConfig {
    fn default() -> Self {
        Self {
            provider: GenerationProvider::Gemini,
            model: "gemini-2.5-flash".to_string(),
            api_key_env: "GEMINI_API_KEY".to_string(),
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            timeout_secs: 12,
            max_prompt_chars: 2000,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let models_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".job-matcher")
            .join("models");

        Self {
            models: ModelConfig {
                embedding_model: "minishlab/potion-base-8M".to_string(),
                models_dir,
                scorer: ScorerKind::KeywordSemantic,
            },
            processing: ProcessingConfig::default(),
            scoring: ScoringConfig::default(),
            explanation: ExplanationConfig::default(),
            output: OutputConfig {
                format: OutputFormat::Console,
                color_output: true,
            },
        }
    }
}

impl Config {
    /// Load from `path`, or from the default location (created on first use)
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(explicit) => Self::load_from(explicit)?,
            None => {
                let config_path = Self::config_path();
                if config_path.exists() {
                    Self::load_from(&config_path)?
                } else {
                    let config = Self::default();
                    config.save_to(&config_path)?;
                    config
                }
            }
        };

        config.validate()?;
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| {
            MatcherError::Configuration(format!("Failed to parse {}: {}", path.display(), e))
        })
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            MatcherError::Configuration(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("job-matcher")
            .join("config.toml")
    }

    /// Resolve the embedding model to a local directory when one exists,
    /// otherwise hand the repo id through for a hub download
    pub fn embedding_model_source(&self) -> PathBuf {
        let local_path = self.models.models_dir.join(&self.models.embedding_model);
        if local_path.exists() {
            local_path
        } else {
            PathBuf::from(&self.models.embedding_model)
        }
    }

    pub fn validate(&self) -> Result<()> {
        let s = &self.scoring;
        let all = [
            ("keyword_weight", s.keyword_weight),
            ("semantic_weight", s.semantic_weight),
            ("coverage_curve", s.coverage_curve),
            ("penalty_threshold", s.penalty_threshold),
            ("penalty_multiplier", s.penalty_multiplier),
            ("boost_threshold", s.boost_threshold),
            ("boost_floor", s.boost_floor),
            ("score_ceiling", s.score_ceiling),
            ("semantic_baseline", s.semantic_baseline),
            ("semantic_gain", s.semantic_gain),
        ];

        for (name, value) in all {
            if !value.is_finite() || value < 0.0 {
                return Err(MatcherError::Configuration(format!(
                    "scoring.{} must be a finite non-negative number, got {}",
                    name, value
                )));
            }
        }

        let unit_interval = [
            ("penalty_threshold", s.penalty_threshold),
            ("penalty_multiplier", s.penalty_multiplier),
            ("boost_threshold", s.boost_threshold),
            ("boost_floor", s.boost_floor),
            ("score_ceiling", s.score_ceiling),
            ("semantic_baseline", s.semantic_baseline),
        ];

        for (name, value) in unit_interval {
            if value > 1.0 {
                return Err(MatcherError::Configuration(format!(
                    "scoring.{} must lie in [0, 1], got {}",
                    name, value
                )));
            }
        }

        if self.explanation.timeout_secs == 0 {
            return Err(MatcherError::Configuration(
                "explanation.timeout_secs must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constants() {
        let config = Config::default();
        assert_eq!(config.scoring.keyword_weight, 0.65);
        assert_eq!(config.scoring.semantic_weight, 0.35);
        assert_eq!(config.scoring.coverage_curve, 1.6);
        assert_eq!(config.scoring.score_ceiling, 0.98);
        assert_eq!(config.processing.max_embedding_chars, 100_000);
        assert_eq!(config.models.scorer, ScorerKind::KeywordSemantic);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_toml_round_trip_keeps_scorer_choice() {
        let mut config = Config::default();
        config.models.scorer = ScorerKind::TfIdf;
        config.explanation.provider = GenerationProvider::Disabled;

        let text = toml::to_string_pretty(&config).unwrap();
        assert!(text.contains("scorer = \"tf-idf\""));
        assert!(text.contains("provider = \"disabled\""));

        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed.models.scorer, ScorerKind::TfIdf);
        assert_eq!(parsed.explanation.provider, GenerationProvider::Disabled);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.scoring.keyword_weight = -0.1;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.scoring.boost_floor = 1.5;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.scoring.semantic_gain = f32::NAN;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.explanation.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_and_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.explanation.timeout_secs = 15;
        config.save_to(&path).unwrap();

        let loaded = Config::load(Some(&path)).unwrap();
        assert_eq!(loaded.explanation.timeout_secs, 15);
    }
}
