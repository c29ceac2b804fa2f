//! CLI interface for the job matcher

use crate::config::{OutputFormat, ScorerKind};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "job-matcher")]
#[command(about = "Score how well a candidate profile matches a job posting")]
#[command(
    long_about = "Score candidate profiles against job postings using lemma keyword coverage and embedding similarity, with optional AI explanations"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score a profile against a job
    Score {
        /// Profile record (JSON or TOML)
        #[arg(short, long)]
        profile: PathBuf,

        /// Job record (JSON or TOML)
        #[arg(short, long)]
        job: PathBuf,

        /// Ask the text-generation service to explain the score
        #[arg(short, long)]
        explain: bool,

        /// Scoring strategy: keyword-semantic, tf-idf
        #[arg(long)]
        scorer: Option<String>,

        /// Output format: console, json
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// Show or reset configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file location
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json",
            format
        )),
    }
}

pub fn parse_scorer(scorer: &str) -> Result<ScorerKind, String> {
    match scorer.to_lowercase().as_str() {
        "keyword-semantic" | "keyword" | "semantic" => Ok(ScorerKind::KeywordSemantic),
        "tf-idf" | "tfidf" => Ok(ScorerKind::TfIdf),
        _ => Err(format!(
            "Invalid scorer: {}. Supported: keyword-semantic, tf-idf",
            scorer
        )),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_score_command_parsing() {
        let cli = Cli::parse_from([
            "job-matcher",
            "--no-color",
            "score",
            "--profile",
            "me.json",
            "--job",
            "job.toml",
            "--explain",
            "--scorer",
            "tf-idf",
        ]);

        assert!(cli.no_color);
        match cli.command {
            Commands::Score {
                profile,
                explain,
                scorer,
                ..
            } => {
                assert_eq!(profile, PathBuf::from("me.json"));
                assert!(explain);
                assert_eq!(scorer.as_deref(), Some("tf-idf"));
            }
            _ => panic!("expected score command"),
        }
    }

    #[test]
    fn test_value_parsers() {
        assert_eq!(parse_output_format("JSON"), Ok(OutputFormat::Json));
        assert!(parse_output_format("pdf").is_err());
        assert_eq!(parse_scorer("tfidf"), Ok(ScorerKind::TfIdf));
        assert!(parse_scorer("bm25").is_err());
        assert!(validate_file_extension(Path::new("job.toml"), &["json", "toml"]).is_ok());
        assert!(validate_file_extension(Path::new("job.pdf"), &["json", "toml"]).is_err());
        assert!(validate_file_extension(Path::new("job"), &["json", "toml"]).is_err());
    }
}
