//! Profile and job records consumed by the scoring engine

use serde::{Deserialize, Deserializer, Serialize};

/// A candidate profile as supplied by the persistence layer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub experiences: Vec<Experience>,
    #[serde(default)]
    pub educations: Vec<Education>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub title: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Education {
    pub degree: String,
    pub institution: String,
}

/// A job posting. Tags are always stored split, even when the source
/// record holds them as one comma-joined string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Job {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "deserialize_tags")]
    pub tags: Vec<String>,
}

impl Profile {
    pub fn with_skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skills = skills.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn with_experience(mut self, experience: Experience) -> Self {
        self.experiences.push(experience);
        self
    }

    pub fn with_education(mut self, education: Education) -> Self {
        self.educations.push(education);
        self
    }
}

impl Experience {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            company: None,
            description: None,
        }
    }

    pub fn at(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }

    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl Education {
    pub fn new(degree: impl Into<String>, institution: impl Into<String>) -> Self {
        Self {
            degree: degree.into(),
            institution: institution.into(),
        }
    }
}

impl Job {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            tags: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Accepts either individual tags or comma-joined tag strings
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.tags = Self::split_tags(tags);
        self
    }

    /// Split every entry on commas, trim, and drop empty pieces
    pub fn split_tags<I, S>(raw: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        raw.into_iter()
            .flat_map(|entry| {
                entry
                    .as_ref()
                    .split(',')
                    .map(|tag| tag.trim().to_string())
                    .filter(|tag| !tag.is_empty())
                    .collect::<Vec<_>>()
            })
            .collect()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TagsField {
    List(Vec<String>),
    Joined(String),
}

fn deserialize_tags<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let tags = match Option::<TagsField>::deserialize(deserializer)? {
        Some(TagsField::List(list)) => Job::split_tags(list),
        Some(TagsField::Joined(joined)) => Job::split_tags([joined]),
        None => Vec::new(),
    };
    Ok(tags)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_tags() {
        let tags = Job::split_tags(["Python, Flask,,  AWS ", "SQL"]);
        assert_eq!(tags, vec!["Python", "Flask", "AWS", "SQL"]);
    }

    #[test]
    fn test_tags_from_joined_string() {
        let job: Job = serde_json::from_str(
            r#"{"title": "SEO Specialist", "tags": "SEO, SEM ,Analytics"}"#,
        )
        .unwrap();
        assert_eq!(job.tags, vec!["SEO", "SEM", "Analytics"]);
        assert!(job.description.is_none());
    }

    #[test]
    fn test_tags_from_list_and_null() {
        let job: Job =
            serde_json::from_str(r#"{"title": "Dev", "tags": ["Rust", "Go,Zig"]}"#).unwrap();
        assert_eq!(job.tags, vec!["Rust", "Go", "Zig"]);

        let job: Job = serde_json::from_str(r#"{"title": "Dev", "tags": null}"#).unwrap();
        assert!(job.tags.is_empty());
    }

    #[test]
    fn test_profile_optional_fields_default() {
        let profile: Profile = serde_json::from_str(r#"{"summary": null}"#).unwrap();
        assert!(profile.skills.is_empty());
        assert!(profile.experiences.is_empty());
        assert!(profile.educations.is_empty());
    }
}
