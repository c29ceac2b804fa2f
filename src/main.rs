//! Job matcher CLI application

use clap::Parser;
use job_matcher::cli::{self, Cli, Commands, ConfigAction};
use job_matcher::config::Config;
use job_matcher::error::{MatcherError, Result};
use job_matcher::input::manager::RecordLoader;
use job_matcher::output::formatter::{formatter_for, save_report_to_file};
use job_matcher::processing::analyzer::MatchEngine;
use log::{error, info};
use std::path::{Path, PathBuf};
use std::process;

const RECORD_EXTENSIONS: [&str; 2] = ["json", "toml"];

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    let use_colors = config.output.color_output && !cli.no_color;
    colored::control::set_override(use_colors);

    if let Err(e) = run_command(cli.command, config, cli.config, use_colors).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(
    command: Commands,
    mut config: Config,
    config_path: Option<PathBuf>,
    use_colors: bool,
) -> Result<()> {
    match command {
        Commands::Score {
            profile,
            job,
            explain,
            scorer,
            output,
            save,
        } => {
            validate_record_path("Profile", &profile)?;
            validate_record_path("Job", &job)?;

            if let Some(scorer) = scorer {
                config.models.scorer =
                    cli::parse_scorer(&scorer).map_err(MatcherError::InvalidInput)?;
            }
            let output_format = match output {
                Some(format) => cli::parse_output_format(&format).map_err(MatcherError::InvalidInput)?,
                None => config.output.format,
            };

            let mut loader = RecordLoader::new();
            let profile = loader.load_profile(&profile).await?;
            let job = loader.load_job(&job).await?;

            info!("Scoring profile against job: {}", job.title);
            let engine = MatchEngine::from_config(&config)?;
            let report = engine.analyze(&profile, &job, explain).await;

            let rendered = formatter_for(output_format, use_colors).format_report(&report)?;
            println!("{}", rendered);

            if let Some(path) = save {
                // Saved files never carry terminal color codes
                let plain = formatter_for(output_format, false).format_report(&report)?;
                save_report_to_file(&plain, &path)?;
                info!("Report saved to {}", path.display());
            }
        }

        Commands::Config { action } => {
            let path = config_path.unwrap_or_else(Config::config_path);

            match action {
                Some(ConfigAction::Show) | None => {
                    let content = toml::to_string_pretty(&config).map_err(|e| {
                        MatcherError::Configuration(format!("Failed to serialize config: {}", e))
                    })?;
                    println!("# {}\n{}", path.display(), content);
                }

                Some(ConfigAction::Reset) => {
                    Config::default().save_to(&path)?;
                    println!("Configuration reset to defaults: {}", path.display());
                }

                Some(ConfigAction::Path) => {
                    println!("{}", path.display());
                }
            }
        }
    }

    Ok(())
}

fn validate_record_path(label: &str, path: &Path) -> Result<()> {
    cli::validate_file_extension(path, &RECORD_EXTENSIONS)
        .map_err(|e| MatcherError::InvalidInput(format!("{} file: {}", label, e)))
}
