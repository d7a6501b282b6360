use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "mcp-analyzer",
    version,
    about = "Heuristic risk analysis for MCP tool descriptors"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Use this config file instead of the layered lookup
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a single tool descriptor
    Analyze(AnalyzeCommand),
    /// Analyze every tool in a JSON file or directory
    Batch(BatchCommand),
    /// Run the MCP server on stdio
    Serve,
    /// Print the active rule table
    Rules,
}

#[derive(Args)]
pub struct AnalyzeCommand {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub description: String,
    /// Input schema as a JSON string
    #[arg(long, conflicts_with = "schema_file")]
    pub schema: Option<String>,
    /// Read the input schema from a file
    #[arg(long)]
    pub schema_file: Option<PathBuf>,
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: ReportFormat,
}

#[derive(Args)]
pub struct BatchCommand {
    /// JSON file (array or `{"tools": [...]}`) or directory of JSON files
    pub path: PathBuf,
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: ReportFormat,
}

#[derive(Clone, ValueEnum)]
pub enum ReportFormat {
    Text,
    Json,
    Sarif,
}
