//! Natural-language explanations of a match score

use crate::config::ExplanationConfig;
use crate::error::{MatcherError, Result};
use crate::input::{Job, Profile};
use crate::llm::client::{GeminiClient, TextGenerator};
use crate::llm::prompts::PromptTemplates;
use crate::processing::document::{JobTextBuilder, ProfileTextBuilder};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Explanation {
    pub strengths: Vec<String>,
    pub missing: Vec<String>,
    pub verdict: String,
}

impl Explanation {
    /// Returned whenever no usable explanation could be produced
    pub fn fallback() -> Self {
        Self {
            strengths: vec!["Unable to analyze".to_string()],
            missing: vec!["Unable to analyze".to_string()],
            verdict: "AI service unavailable.".to_string(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        *self == Self::fallback()
    }
}

/// Builds the prompt, calls the text generator under a timeout, and repairs
/// or replaces whatever comes back. Never fails.
pub struct ExplanationRequester {
    generator: Option<Arc<dyn TextGenerator>>,
    prompts: PromptTemplates,
    timeout: Duration,
    max_prompt_chars: usize,
}

impl ExplanationRequester {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        let defaults = ExplanationConfig::default();
        Self {
            generator: Some(generator),
            prompts: PromptTemplates::default(),
            timeout: Duration::from_secs(defaults.timeout_secs),
            max_prompt_chars: defaults.max_prompt_chars,
        }
    }

    /// Every request answers with the fallback
    pub fn disabled() -> Self {
        let defaults = ExplanationConfig::default();
        Self {
            generator: None,
            prompts: PromptTemplates::default(),
            timeout: Duration::from_secs(defaults.timeout_secs),
            max_prompt_chars: defaults.max_prompt_chars,
        }
    }

    pub fn from_config(config: &ExplanationConfig) -> Result<Self> {
        let requester = match GeminiClient::from_config(config)? {
            Some(client) => Self::new(Arc::new(client)),
            None => Self::disabled(),
        };

        Ok(requester
            .with_timeout(Duration::from_secs(config.timeout_secs))
            .with_max_prompt_chars(config.max_prompt_chars))
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_prompt_chars(mut self, max_prompt_chars: usize) -> Self {
        self.max_prompt_chars = max_prompt_chars;
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.generator.is_some()
    }

    pub fn model_name(&self) -> Option<&str> {
        self.generator.as_ref().map(|generator| generator.model_name())
    }

    pub async fn explain(&self, profile: &Profile, job: &Job, score: f32) -> Explanation {
        self.explain_until(profile, job, score, std::future::pending::<()>())
            .await
    }

    /// Like `explain`, but gives up with the fallback as soon as `cancel` completes
    pub async fn explain_until<F>(
        &self,
        profile: &Profile,
        job: &Job,
        score: f32,
        cancel: F,
    ) -> Explanation
    where
        F: Future<Output = ()>,
    {
        let system_prompt = self.prompts.render_system(score);
        // Flat field aggregates, so education and employers reach the prompt unweighted
        let user_prompt = self.prompts.render_user(
            &ProfileTextBuilder::corpus_text(profile),
            &JobTextBuilder::corpus_text(job),
            self.max_prompt_chars,
        );

        let outcome = tokio::select! {
            result = self.request(&system_prompt, &user_prompt) => result,
            _ = cancel => Err(MatcherError::Cancelled),
        };

        match outcome {
            Ok(raw) => Self::parse_response(&raw).unwrap_or_else(|| {
                warn!("Explanation response was not valid JSON, using fallback");
                debug!("Unparseable explanation: {}", raw);
                Explanation::fallback()
            }),
            Err(e) => {
                warn!("Explanation unavailable: {}", e);
                Explanation::fallback()
            }
        }
    }

    async fn request(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        let generator = self.generator.as_ref().ok_or_else(|| {
            MatcherError::Generation("No text generator configured".to_string())
        })?;

        tokio::time::timeout(self.timeout, generator.generate_text(system_prompt, user_prompt))
            .await
            .map_err(|_| MatcherError::Timeout(self.timeout.as_secs()))?
    }

    /// Parse a generator response, tolerating code fences and chatter around the JSON
    pub fn parse_response(raw: &str) -> Option<Explanation> {
        let cleaned = strip_code_fences(raw);
        if let Ok(explanation) = serde_json::from_str::<Explanation>(&cleaned) {
            return Some(explanation);
        }

        let start = cleaned.find('{')?;
        let end = cleaned.rfind('}')?;
        if end <= start {
            return None;
        }
        serde_json::from_str(&cleaned[start..=end]).ok()
    }
}

/// Remove markdown fence markers such as "```json" and "```"
pub fn strip_code_fences(raw: &str) -> String {
    raw.replace("```json", "")
        .replace("```JSON", "")
        .replace("```", "")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Education, Experience};
    use async_trait::async_trait;

    struct CannedGenerator(String);

    #[async_trait]
    impl TextGenerator for CannedGenerator {
        async fn generate_text(&self, _system: &str, _user: &str) -> Result<String> {
            Ok(self.0.clone())
        }

        fn model_name(&self) -> &str {
            "canned"
        }
    }

    struct FailingGenerator;

    #[async_trait]
    impl TextGenerator for FailingGenerator {
        async fn generate_text(&self, _system: &str, _user: &str) -> Result<String> {
            Err(MatcherError::Network("connection refused".to_string()))
        }

        fn model_name(&self) -> &str {
            "failing"
        }
    }

    /// Records the user prompt it was sent
    #[derive(Default)]
    struct RecordingGenerator {
        user_prompt: std::sync::Mutex<String>,
    }

    #[async_trait]
    impl TextGenerator for RecordingGenerator {
        async fn generate_text(&self, _system: &str, user: &str) -> Result<String> {
            *self.user_prompt.lock().unwrap() = user.to_string();
            Ok(r#"{"strengths": [], "missing": [], "verdict": "ok"}"#.to_string())
        }

        fn model_name(&self) -> &str {
            "recording"
        }
    }

    struct SlowGenerator;

    #[async_trait]
    impl TextGenerator for SlowGenerator {
        async fn generate_text(&self, _system: &str, _user: &str) -> Result<String> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok("{}".to_string())
        }

        fn model_name(&self) -> &str {
            "slow"
        }
    }

    fn profile() -> Profile {
        Profile::default().with_skills(["Python"])
    }

    fn job() -> Job {
        Job::new("Python Developer")
    }

    #[test]
    fn test_strip_code_fences() {
        assert_eq!(strip_code_fences("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
        assert_eq!(strip_code_fences("```\n{}\n```"), "{}");
        assert_eq!(strip_code_fences("  {}  "), "{}");
    }

    #[test]
    fn test_parse_response_variants() {
        let plain = r#"{"strengths": ["Python"], "missing": ["Docker"], "verdict": "Solid."}"#;
        let parsed = ExplanationRequester::parse_response(plain).unwrap();
        assert_eq!(parsed.strengths, vec!["Python"]);
        assert_eq!(parsed.verdict, "Solid.");

        let chatty = format!("Here is the analysis:\n```json\n{}\n```\nHope it helps!", plain);
        assert_eq!(ExplanationRequester::parse_response(&chatty), Some(parsed));

        assert!(ExplanationRequester::parse_response("not json at all").is_none());
        assert!(ExplanationRequester::parse_response(r#"{"verdict": "partial"}"#).is_none());
    }

    #[tokio::test]
    async fn test_fenced_response_is_parsed() {
        let generator = CannedGenerator(
            "```json\n{\"strengths\": [\"Python\"], \"missing\": [\"AWS\"], \"verdict\": \"Good fit.\"}\n```"
                .to_string(),
        );
        let requester = ExplanationRequester::new(Arc::new(generator));

        let explanation = requester.explain(&profile(), &job(), 85.0).await;
        assert_eq!(explanation.missing, vec!["AWS"]);
        assert!(!explanation.is_fallback());
    }

    #[tokio::test]
    async fn test_generator_error_falls_back() {
        let requester = ExplanationRequester::new(Arc::new(FailingGenerator));
        let explanation = requester.explain(&profile(), &job(), 10.0).await;
        assert_eq!(explanation, Explanation::fallback());
    }

    #[tokio::test]
    async fn test_garbage_response_falls_back() {
        let requester = ExplanationRequester::new(Arc::new(CannedGenerator("Sure!".to_string())));
        let explanation = requester.explain(&profile(), &job(), 10.0).await;
        assert!(explanation.is_fallback());
    }

    #[tokio::test]
    async fn test_timeout_falls_back() {
        let requester = ExplanationRequester::new(Arc::new(SlowGenerator))
            .with_timeout(Duration::from_millis(50));
        let explanation = requester.explain(&profile(), &job(), 50.0).await;
        assert_eq!(explanation, Explanation::fallback());
    }

    #[tokio::test]
    async fn test_cancellation_falls_back() {
        let requester = ExplanationRequester::new(Arc::new(SlowGenerator));
        let explanation = requester
            .explain_until(&profile(), &job(), 50.0, async {})
            .await;
        assert_eq!(explanation, Explanation::fallback());
    }

    #[tokio::test]
    async fn test_disabled_requester() {
        let requester = ExplanationRequester::disabled();
        assert!(!requester.is_enabled());
        assert!(requester.model_name().is_none());
        assert!(requester.explain(&profile(), &job(), 0.0).await.is_fallback());
    }

    #[tokio::test]
    async fn test_prompt_carries_flat_profile_and_job_fields() {
        let generator = Arc::new(RecordingGenerator::default());
        let requester = ExplanationRequester::new(generator.clone());

        let profile = Profile::default()
            .with_skills(["Python", "Flask"])
            .with_experience(Experience::new("Backend Developer").at("Acme"))
            .with_education(Education::new("BSc Computer Science", "MIT"));
        let job = Job::new("Python Developer")
            .with_description("Build APIs")
            .with_tags(["Python", "AWS"]);

        requester.explain(&profile, &job, 70.0).await;

        let prompt = generator.user_prompt.lock().unwrap().clone();
        assert!(prompt.contains("BSc Computer Science in MIT"));
        assert!(prompt.contains("Backend Developer at Acme"));
        assert!(prompt.contains("Python Developer Build APIs Python AWS"));
        assert_eq!(prompt.matches("Flask").count(), 1);
    }
}
