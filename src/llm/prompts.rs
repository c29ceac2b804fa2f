//! Prompt templates for match explanations

use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug, Clone)]
pub struct PromptTemplates {
    pub system: String,
    pub user: String,
}

impl Default for PromptTemplates {
    fn default() -> Self {
        Self {
            system: SYSTEM_TEMPLATE.to_string(),
            user: USER_TEMPLATE.to_string(),
        }
    }
}

impl PromptTemplates {
    /// System instruction with the numeric score embedded
    pub fn render_system(&self, score: f32) -> String {
        let score = format!("{:.1}", score);
        fill_template(&self.system, &[("{score}", score.as_str())])
    }

    /// Candidate and job texts, each cut to `max_chars` graphemes
    pub fn render_user(&self, profile_text: &str, job_text: &str, max_chars: usize) -> String {
        let profile = truncate_graphemes(profile_text, max_chars);
        let job = truncate_graphemes(job_text, max_chars);
        fill_template(
            &self.user,
            &[("{profile}", profile.as_str()), ("{job}", job.as_str())],
        )
    }
}

/// Substitute placeholders in a single left-to-right pass. Inserted values
/// are never scanned again, so placeholder-looking text inside them stays literal.
fn fill_template(template: &str, slots: &[(&str, &str)]) -> String {
    let mut rendered = String::with_capacity(template.len());
    let mut rest = template;

    while let Some((start, placeholder, value)) = slots
        .iter()
        .filter_map(|&(placeholder, value)| {
            rest.find(placeholder).map(|start| (start, placeholder, value))
        })
        .min_by_key(|&(start, ..)| start)
    {
        rendered.push_str(&rest[..start]);
        rendered.push_str(value);
        rest = &rest[start + placeholder.len()..];
    }

    rendered.push_str(rest);
    rendered
}

fn truncate_graphemes(text: &str, max_chars: usize) -> String {
    text.graphemes(true).take(max_chars).collect()
}

const SYSTEM_TEMPLATE: &str = r#"You are an expert ATS (Applicant Tracking System) scanner.
Compare the candidate profile and the job description.
The calculated match score is {score}/100.

Provide a JSON response with:
- "strengths": List of anywhere between 1 to 4 matching skills or experiences (if score is high, then more points here).
- "missing": List of anywhere between 1 to 4 key requirements missing from the profile (if score is low, then more points here).
- "verdict": A 1-sentence summary of why this score was given.

Do not include markdown formatting. Return raw JSON."#;

const USER_TEMPLATE: &str = "CANDIDATE PROFILE:\n{profile}\n\nJOB DESCRIPTION:\n{job}";
