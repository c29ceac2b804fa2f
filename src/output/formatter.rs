//! Console and JSON rendering of match reports

use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::report::{MatchBand, MatchReport};
use colored::{Color, Colorize};
use std::path::Path;

pub trait OutputFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Human-readable report with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str) -> String {
        if self.use_colors {
            format!("\n{} {}\n", "▓".blue().bold(), title.blue().bold())
        } else {
            format!("\n▓ {}\n", title)
        }
    }

    fn format_score_badge(&self, band: MatchBand) -> String {
        let color = match band {
            MatchBand::Strong => Color::Green,
            MatchBand::Good => Color::BrightGreen,
            MatchBand::Partial => Color::Yellow,
            MatchBand::Weak => Color::Red,
        };

        if self.use_colors {
            format!("[{}]", band.label().color(color).bold())
        } else {
            format!("[{}]", band.label())
        }
    }

    fn format_list(&self, title: &str, items: &[String], marker: &str, color: Color) -> String {
        let mut output = format!("{}:\n", title);
        if items.is_empty() {
            output.push_str("  (none)\n");
        }
        for item in items {
            output.push_str(&format!("  {} {}\n", self.colorize(marker, color), item));
        }
        output
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String> {
        let mut output = String::new();
        let breakdown = &report.breakdown;

        output.push_str(&self.format_header(&format!("MATCH REPORT: {}", report.job_title)));
        output.push_str(&format!(
            "Generated: {} | Scorer: {} | Processing time: {}ms\n",
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            report.metadata.scorer,
            report.metadata.processing_time_ms
        ));

        output.push_str(&self.format_header("Score"));
        output.push_str(&format!(
            "Match Score: {:.1}/100 {}\n",
            breakdown.value,
            self.format_score_badge(report.band())
        ));

        if let Some(keyword) = breakdown.keyword {
            output.push_str(&format!("Keyword coverage: {:.0}%\n", keyword * 100.0));
        }
        if let Some(semantic) = breakdown.semantic {
            output.push_str(&format!("Semantic similarity: {:.0}%\n", semantic * 100.0));
        }
        if let Some(lexical) = breakdown.lexical {
            output.push_str(&format!("Lexical similarity: {:.0}%\n", lexical * 100.0));
        }
        if breakdown.degraded {
            output.push_str(&self.colorize(
                "Embedding model unavailable: semantic similarity not measured\n",
                Color::Yellow,
            ));
        }

        output.push_str(&self.format_header("Keywords"));
        output.push_str(&self.format_list("Matched", &breakdown.matched_keywords, "+", Color::Green));
        output.push_str(&self.format_list("Missing", &breakdown.missing_keywords, "-", Color::Red));

        if let Some(explanation) = &report.explanation {
            output.push_str(&self.format_header("Assessment"));
            output.push_str(&self.format_list("Strengths", &explanation.strengths, "+", Color::Green));
            output.push_str(&self.format_list("Missing", &explanation.missing, "-", Color::Red));
            output.push_str(&format!(
                "Verdict: {}\n",
                self.colorize(&explanation.verdict, Color::Cyan)
            ));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

/// Formatter for the requested output format
pub fn formatter_for(format: OutputFormat, use_colors: bool) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Console => Box::new(ConsoleFormatter::new(use_colors)),
        OutputFormat::Json => Box::new(JsonFormatter::new(true)),
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::analyzer::Explanation;
    use crate::output::report::ReportMetadata;
    use crate::processing::analyzer::ScoreBreakdown;

    fn report() -> MatchReport {
        let breakdown = ScoreBreakdown {
            value: 85.0,
            keyword: Some(1.0),
            semantic: Some(0.0),
            lexical: None,
            degraded: true,
            matched_keywords: vec!["python".to_string(), "flask".to_string()],
            missing_keywords: vec![],
        };
        MatchReport::new(
            "Python Developer".to_string(),
            breakdown,
            Some(Explanation::fallback()),
            ReportMetadata::new("keyword-semantic", None, None, 7),
        )
    }

    #[test]
    fn test_console_output_without_colors() {
        let output = ConsoleFormatter::new(false).format_report(&report()).unwrap();

        assert!(output.contains("MATCH REPORT: Python Developer"));
        assert!(output.contains("Match Score: 85.0/100 [STRONG MATCH]"));
        assert!(output.contains("Keyword coverage: 100%"));
        assert!(output.contains("Embedding model unavailable"));
        assert!(output.contains("  + python"));
        assert!(output.contains("  (none)"));
        assert!(output.contains("Verdict: AI service unavailable."));
    }

    #[test]
    fn test_tfidf_breakdown_is_labelled_lexical() {
        let breakdown = ScoreBreakdown {
            value: 61.2,
            lexical: Some(0.612),
            ..ScoreBreakdown::default()
        };
        let report = MatchReport::new(
            "Data Analyst".to_string(),
            breakdown,
            None,
            ReportMetadata::new("tf-idf", None, None, 2),
        );

        let output = ConsoleFormatter::new(false).format_report(&report).unwrap();
        assert!(output.contains("Lexical similarity: 61%"));
        assert!(!output.contains("Keyword coverage"));
    }

    #[test]
    fn test_json_output_round_trips() {
        let output = JsonFormatter::new(false).format_report(&report()).unwrap();
        let parsed: MatchReport = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed.score(), 85.0);
        assert_eq!(parsed.explanation, Some(Explanation::fallback()));
    }

    #[test]
    fn test_formatter_selection_and_save() {
        assert_eq!(
            formatter_for(OutputFormat::Json, false).supports_format(),
            OutputFormat::Json
        );

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports").join("match.json");
        save_report_to_file("{}", &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");
    }
}
