use clap::{Args, Parser, Subcommand, ValueEnum};
use sonarflow::{PipelineKind, Schema};

#[derive(Parser)]
#[command(
    name = "sonarflow",
    version,
    about = "Pull-based streaming analysis of sonar sweeps and submarine commands",
    long_about = "Parse line-oriented puzzle input into typed event streams and run\n\
                  increase counters or position tracking over them.\n\
                  Input files conventionally use the .aoc21 extension."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run a pipeline over an input file and print its result
    Run(RunArgs),
    /// Print every message a source (or the position filter) produces
    Trace(TraceArgs),
    /// Check that every line of an input file parses
    Validate(ValidateArgs),
    /// Ask how well an input is supported
    Query(QueryArgs),
    /// List available pipelines
    Pipelines(PipelinesArgs),
}

/// Input schema names accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SchemaArg {
    Depth,
    Command,
}

impl From<SchemaArg> for Schema {
    fn from(arg: SchemaArg) -> Self {
        match arg {
            SchemaArg::Depth => Schema::Depth,
            SchemaArg::Command => Schema::Command,
        }
    }
}

#[derive(Args)]
pub struct RunArgs {
    /// Pipeline to run (depth-increases, window-increases, positions)
    #[arg(long, env = "SONARFLOW_PIPELINE")]
    pub pipeline: String,

    /// Input file path
    #[arg(long, required_unless_present = "params", conflicts_with = "params")]
    pub file: Option<String>,

    /// Source parameters as JSON, e.g. '{"path": "in.aoc21"}' or '{"inputs": ["in.aoc21"]}'
    #[arg(long)]
    pub params: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Print the full report as JSON instead of the bare result
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args)]
pub struct TraceArgs {
    /// Input file path
    #[arg(long)]
    pub file: String,

    /// Record layout of the input
    #[arg(long, value_enum)]
    pub schema: SchemaArg,

    /// Route commands through the position filter
    #[arg(long, default_value_t = false)]
    pub positions: bool,

    /// One JSON object per message
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args)]
pub struct ValidateArgs {
    /// Input file path
    #[arg(long)]
    pub file: String,

    /// Record layout of the input
    #[arg(long, value_enum)]
    pub schema: SchemaArg,

    /// Output as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args)]
pub struct QueryArgs {
    /// Query object
    #[arg(long, default_value = sonarflow::query::SUPPORT_INFO_OBJECT)]
    pub object: String,

    /// Input being scored
    #[arg(long)]
    pub input: String,

    /// Input type
    #[arg(long = "type", default_value = "file")]
    pub input_type: String,
}

#[derive(Args)]
pub struct PipelinesArgs {
    /// Output as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

/// Resolve a pipeline name against the registry.
pub fn parse_pipeline(name: &str) -> Result<PipelineKind, String> {
    PipelineKind::from_name(name).ok_or_else(|| {
        let known: Vec<&str> = PipelineKind::all().map(|p| p.name).collect();
        format!(
            "Unknown pipeline '{}'. Valid pipelines: {}",
            name,
            known.join(", ")
        )
    })
}
