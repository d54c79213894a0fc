//! Command-line interface definitions.

use clap::{ArgAction, Args, Parser, Subcommand};
use genu::kernel::config::ContextOverride;
use genu_logger::LevelFilter;
use std::path::PathBuf;

/// Composes GenU deployment units from a parameter file.
#[derive(Parser, Debug)]
#[command(name = "genu")]
#[command(version, about, long_about = None)]
pub(crate) struct Cli {
    /// More log output on stderr (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub(crate) const fn log_level(&self) -> LevelFilter {
        match (self.quiet, self.verbose) {
            (true, _) => LevelFilter::ERROR,
            (false, 0) => LevelFilter::WARN,
            (false, 1) => LevelFilter::DEBUG,
            (false, _) => LevelFilter::TRACE,
        }
    }
}

#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Resolve parameters, compose every unit and print their outputs
    Synth(SourceArgs),

    /// Print which units the parameters select, without building them
    Plan(SourceArgs),

    /// Print the fields of a resource identifier
    Arn(ArnArgs),

    /// Decode a streaming endpoint response and print its text
    Stream(StreamArgs),
}

/// Where parameters come from.
#[derive(Args, Debug)]
pub(crate) struct SourceArgs {
    /// Parameter file (TOML, JSON or YAML); defaults to `genu.*` when present
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override a parameter, e.g. `-c agentEnabled=true`
    #[arg(short = 'c', long = "context", value_name = "KEY=VALUE")]
    pub context: Vec<ContextOverride>,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ArnArgs {
    /// Identifier such as `arn:aws:bedrock-agentcore:us-east-1:123:runtime/abc`
    pub arn: String,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct StreamArgs {
    /// Captured response stream; stdin when omitted
    pub file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn context_overrides_are_parsed() {
        let cli = Cli::parse_from(["genu", "synth", "-c", "agentEnabled=true", "-c", "region=eu-west-1"]);
        let Commands::Synth(args) = cli.command else {
            panic!("expected synth");
        };
        assert_eq!(args.context.len(), 2);
        assert_eq!(args.context[0].value, serde_json::Value::Bool(true));
        assert_eq!(args.context[1].value, serde_json::Value::String("eu-west-1".to_owned()));
    }

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(Cli::parse_from(["genu", "arn", "x"]).log_level(), LevelFilter::WARN);
        assert_eq!(Cli::parse_from(["genu", "-vv", "arn", "x"]).log_level(), LevelFilter::TRACE);
        assert_eq!(Cli::parse_from(["genu", "arn", "x", "-q"]).log_level(), LevelFilter::ERROR);
    }
}
