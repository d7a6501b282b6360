mod analyze;
mod cli;
mod config;
mod error;
mod input;
mod mcp;
mod report;
mod rules;
mod types;

use crate::analyze::Analyzer;
use crate::error::{AnalyzerError, Result};
use crate::types::descriptor::ToolDescriptor;
use crate::types::verdict::RiskLevel;
use clap::Parser;
use tracing_subscriber::EnvFilter;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const WARNINGS: i32 = 1;
    pub const BLOCKING: i32 = 2;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn init_tracing(verbose: u8, quiet: bool) {
    let default_level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, _) => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    // stdout is reserved for reports and the MCP channel.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_analyzer(cli: &cli::Cli) -> Result<Analyzer> {
    let loaded = match &cli.config {
        Some(path) => Some(config::load_explicit(path)?),
        None => config::load_config(&std::env::current_dir()?)?,
    };
    match loaded {
        Some(cfg) => Analyzer::from_config(&cfg),
        None => {
            tracing::info!("no config file found, using built-in policy");
            Analyzer::builtin()
        }
    }
}

fn output_format(format: &cli::ReportFormat) -> report::OutputFormat {
    match format {
        cli::ReportFormat::Text => report::OutputFormat::Text,
        cli::ReportFormat::Json => report::OutputFormat::Json,
        cli::ReportFormat::Sarif => report::OutputFormat::Sarif,
    }
}

fn level_exit_code(level: Option<RiskLevel>) -> i32 {
    match level {
        Some(RiskLevel::High) => exit_code::BLOCKING,
        Some(RiskLevel::Medium) => exit_code::WARNINGS,
        Some(RiskLevel::Low) | None => exit_code::SUCCESS,
    }
}

fn run() -> Result<i32> {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose, cli.quiet);
    let analyzer = load_analyzer(&cli)?;

    match &cli.command {
        cli::Commands::Analyze(cmd) => {
            let schema = match &cmd.schema_file {
                Some(path) => Some(std::fs::read_to_string(path)?),
                None => cmd.schema.clone(),
            };
            let tool = ToolDescriptor::new(cmd.name.clone(), cmd.description.clone(), schema);
            tool.validate()?;

            let result = analyzer.analyze_descriptor(&tool);
            let rendered = report::render(&tool, &result, output_format(&cmd.format))?;
            println!("{rendered}");
            Ok(level_exit_code(Some(result.risk_level)))
        }
        cli::Commands::Batch(cmd) => {
            let tools = input::load_descriptors(&cmd.path)?;
            let batch = analyzer.analyze_batch(&tools)?;
            let rendered = report::render_batch(&tools, &batch, output_format(&cmd.format))?;
            println!("{rendered}");
            Ok(level_exit_code(batch.highest_level()))
        }
        cli::Commands::Serve => {
            mcp::serve_stdio(&analyzer)?;
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Rules => {
            print_rules(&analyzer);
            Ok(exit_code::SUCCESS)
        }
    }
}

fn print_rules(analyzer: &Analyzer) {
    let policy = analyzer.policy();
    println!(
        "policy: high >= {}, medium >= {}, legitimate reduction {} (below medium)",
        policy.high_threshold, policy.medium_threshold, policy.legitimate_reduction
    );
    println!("rules: {} active", analyzer.rules().len());
    for compiled in analyzer.rules().iter() {
        let rule = compiled.rule;
        let weight = match rule.effect {
            rules::Effect::Add => format!("+{}", rule.weight),
            rules::Effect::Reduce => format!("-{}", policy.legitimate_reduction),
        };
        println!(
            "- {:<24} {:<20} {:>4}  {}",
            rule.id,
            rule.category.as_str(),
            weight,
            rule.label
        );
    }
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            let message = match &e {
                AnalyzerError::MissingField(_) => {
                    format!("{e} (tool name and description are required)")
                }
                _ => e.to_string(),
            };
            eprintln!("error: {message}");
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}
