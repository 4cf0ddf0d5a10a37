mod aggregate;
mod cli;
mod config;
mod error;
mod extract;
mod model;
mod pipeline;
mod rank;
mod report;
mod schema;
mod source;
mod types;

use crate::error::RankError;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const NO_RESULTS: i32 = 1;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> Result<i32, RankError> {
    let cli = cli::Cli::parse();
    let quiet = cli.quiet;
    init_tracing(cli.verbose, quiet);

    match cli.command {
        cli::Commands::Rank(cmd) => {
            let mut cfg = config::load_config(&cmd.config)?;
            if let Some(concurrency) = cmd.concurrency {
                if concurrency == 0 {
                    return Err(RankError::ConfigParse(
                        "--concurrency must be greater than 0".to_string(),
                    ));
                }
                cfg.search.max_concurrency = concurrency;
            }

            let format = match cmd.format {
                Some(cli::ReportFormat::Csv) => report::OutputFormat::Csv,
                Some(cli::ReportFormat::Json) => report::OutputFormat::Json,
                Some(cli::ReportFormat::Md) => report::OutputFormat::Md,
                None => cfg.output.format,
            };
            let output = cmd
                .output
                .unwrap_or_else(|| PathBuf::from(&cfg.output.path));

            let model = model::anthropic::AnthropicClient::from_env(&cfg.model)?;
            let source = source::github::GithubSource::new(&cfg.search.api_url, cmd.token);
            let today = chrono::Utc::now().date_naive();

            if !quiet {
                println!("Generating repository list from {} organization:", cmd.org);
            }
            let ranked = pipeline::Pipeline::new(&source, &model, &cfg)
                .run(&cmd.org, today)
                .await?;

            let rendered = report::render(&ranked, format)?;
            std::fs::write(&output, rendered)?;

            if !quiet {
                print!("{}", report::summary_text(&ranked.summary));
                println!("Repo list written to {}.", output.display());
            }

            if ranked.entities.is_empty() {
                eprintln!("warning: no repositories were ranked");
                Ok(exit_code::NO_RESULTS)
            } else {
                Ok(exit_code::SUCCESS)
            }
        }
        cli::Commands::Schema(cmd) => {
            let cfg = config::load_config(&cmd.config)?;
            let schema = schema::build_schema(&cfg.genai_criteria);
            println!("{}", serde_json::to_string_pretty(&schema.to_json())?);
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Check(cmd) => {
            let cfg = config::load_config(&cmd.config)?;
            let ranked = cfg
                .genai_criteria
                .iter()
                .filter(|spec| spec.is_ranked())
                .count();
            let schema = schema::build_schema(&cfg.genai_criteria);
            println!(
                "config ok: {} repo criteria, {} model criteria ({} ranked), {} required answer fields",
                cfg.repo_criteria.len(),
                cfg.genai_criteria.len(),
                ranked,
                schema.required().len()
            );
            Ok(exit_code::SUCCESS)
        }
    }
}

#[tokio::main]
async fn main() {
    match run().await {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}
