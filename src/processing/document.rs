//! Weighted text views of profiles and jobs
//!
//! Each scorer looks at a record through a purpose-built text. Repetition is
//! how fields get weight: skills and titles are emitted several times so they
//! dominate the keyword and embedding signal over free-text descriptions.

use crate::input::{Job, Profile};

const PART_SEPARATOR: &str = ". ";

/// Builds the profile text shared by the keyword and semantic paths
pub struct ProfileTextBuilder;

/// Builds the two job texts: a strict core for keywords and a richer one for vectors
pub struct JobTextBuilder;

impl ProfileTextBuilder {
    /// Skills three times, each experience title twice followed by its
    /// description, then the summary.
    pub fn build(profile: &Profile) -> String {
        let mut parts: Vec<String> = Vec::new();

        let skills = join_present(&profile.skills, " ");
        if !skills.is_empty() {
            for _ in 0..3 {
                parts.push(skills.clone());
            }
        }

        for experience in &profile.experiences {
            if let Some(title) = present(&experience.title) {
                parts.push(title.to_string());
                parts.push(title.to_string());
            }
            if let Some(description) = experience.description.as_deref().and_then(present) {
                parts.push(description.to_string());
            }
        }

        if let Some(summary) = profile.summary.as_deref().and_then(present) {
            parts.push(summary.to_string());
        }

        parts.join(PART_SEPARATOR)
    }

    /// Flat, unweighted aggregate used by the TF-IDF scorer
    pub fn corpus_text(profile: &Profile) -> String {
        let mut parts: Vec<String> = Vec::new();

        if let Some(summary) = profile.summary.as_deref().and_then(present) {
            parts.push(summary.to_string());
        }

        let skills = join_present(&profile.skills, " ");
        if !skills.is_empty() {
            parts.push(skills);
        }

        for experience in &profile.experiences {
            match experience.company.as_deref().and_then(present) {
                Some(company) => parts.push(format!("{} at {}", experience.title.trim(), company)),
                None => parts.push(experience.title.trim().to_string()),
            }
            if let Some(description) = experience.description.as_deref().and_then(present) {
                parts.push(description.to_string());
            }
        }

        for education in &profile.educations {
            parts.push(format!(
                "{} in {}",
                education.degree.trim(),
                education.institution.trim()
            ));
        }

        parts.join(" ").trim().to_string()
    }
}

impl JobTextBuilder {
    /// Title twice plus the tags once. The description is left out so
    /// generic prose never reaches strict keyword matching.
    pub fn core_text(job: &Job) -> String {
        let mut parts: Vec<String> = Vec::new();

        if let Some(title) = present(&job.title) {
            parts.push(title.to_string());
            parts.push(title.to_string());
        }

        let tags = join_present(&job.tags, " ");
        if !tags.is_empty() {
            parts.push(tags);
        }

        parts.join(PART_SEPARATOR)
    }

    /// Title twice, tags twice, then the full description
    pub fn vector_text(job: &Job) -> String {
        let mut parts: Vec<String> = Vec::new();

        if let Some(title) = present(&job.title) {
            parts.push(title.to_string());
            parts.push(title.to_string());
        }

        let tags = join_present(&job.tags, " ");
        if !tags.is_empty() {
            parts.push(tags.clone());
            parts.push(tags);
        }

        if let Some(description) = job.description.as_deref().and_then(present) {
            parts.push(description.to_string());
        }

        parts.join(PART_SEPARATOR)
    }

    /// Flat aggregate used by the TF-IDF scorer
    pub fn corpus_text(job: &Job) -> String {
        let mut parts: Vec<&str> = Vec::new();

        if let Some(title) = present(&job.title) {
            parts.push(title);
        }
        if let Some(description) = job.description.as_deref().and_then(present) {
            parts.push(description);
        }

        let tags = join_present(&job.tags, " ");
        let mut text = parts.join(" ");
        if !tags.is_empty() {
            if !text.is_empty() {
                text.push(' ');
            }
            text.push_str(&tags);
        }
        text
    }
}

fn present(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

fn join_present(items: &[String], separator: &str) -> String {
    items
        .iter()
        .filter_map(|item| present(item))
        .collect::<Vec<_>>()
        .join(separator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Education, Experience};

    #[test]
    fn test_profile_text_weighting() {
        let profile = Profile::default()
            .with_skills(["Python", "Flask"])
            .with_experience(Experience::new("Backend Developer").described("Built APIs"))
            .with_summary("Pragmatic engineer");

        assert_eq!(
            ProfileTextBuilder::build(&profile),
            "Python Flask. Python Flask. Python Flask. Backend Developer. Backend Developer. Built APIs. Pragmatic engineer"
        );
    }

    #[test]
    fn test_absent_fields_add_no_separators() {
        let profile = Profile::default().with_experience(Experience::new("Nurse"));
        assert_eq!(ProfileTextBuilder::build(&profile), "Nurse. Nurse");

        let empty = Profile::default().with_skills(["  ", ""]).with_summary("   ");
        assert_eq!(ProfileTextBuilder::build(&empty), "");
    }

    #[test]
    fn test_job_core_text_excludes_description() {
        let job = Job::new("Python Developer")
            .with_tags(["Python", "Flask"])
            .with_description("We are a fast-paced company");

        assert_eq!(
            JobTextBuilder::core_text(&job),
            "Python Developer. Python Developer. Python Flask"
        );
    }

    #[test]
    fn test_job_vector_text() {
        let job = Job::new("SEO Specialist")
            .with_tags(["SEO", "SEM"])
            .with_description("Grow organic traffic");

        assert_eq!(
            JobTextBuilder::vector_text(&job),
            "SEO Specialist. SEO Specialist. SEO SEM. SEO SEM. Grow organic traffic"
        );
    }

    #[test]
    fn test_empty_job_texts() {
        let job = Job::new("").with_description("");
        assert_eq!(JobTextBuilder::core_text(&job), "");
        assert_eq!(JobTextBuilder::vector_text(&job), "");
        assert_eq!(JobTextBuilder::corpus_text(&job), "");
    }

    #[test]
    fn test_corpus_texts() {
        let profile = Profile::default()
            .with_summary("Data person")
            .with_skills(["SQL", "Python"])
            .with_experience(Experience::new("Analyst").at("Acme").described("Reports"))
            .with_education(Education::new("BSc Statistics", "State University"));

        assert_eq!(
            ProfileTextBuilder::corpus_text(&profile),
            "Data person SQL Python Analyst at Acme Reports BSc Statistics in State University"
        );

        let job = Job::new("Data Analyst")
            .with_description("Build dashboards")
            .with_tags(["SQL,Tableau"]);
        assert_eq!(
            JobTextBuilder::corpus_text(&job),
            "Data Analyst Build dashboards SQL Tableau"
        );
    }
}
