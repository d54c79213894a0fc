use crate::cli::SourceArgs;
use anyhow::Context;
use genu::StackInput;
use genu::composition::{SynthReport, UnitPlan, select};
use genu::kernel::config::ConfigLoader;
use genu::kernel::params::resolve;
use tracing::info;

const DEFAULT_CONFIG: &str = "genu";

fn load_input(args: &SourceArgs) -> anyhow::Result<StackInput> {
    let loader = match &args.config {
        Some(path) => ConfigLoader::new().path(path),
        None => ConfigLoader::new().path(DEFAULT_CONFIG).required(false),
    };
    let input = loader
        .overrides(args.context.iter().cloned())
        .load::<StackInput>()
        .context("Failed to load parameters")?;
    Ok(input)
}

pub(super) fn synth(args: &SourceArgs) -> anyhow::Result<()> {
    let composition = genu::synth(load_input(args)?)?;
    let report = composition.report();
    info!(units = report.units.len(), "Synthesis finished");

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

pub(super) fn plan(args: &SourceArgs) -> anyhow::Result<()> {
    let config = resolve(load_input(args)?)?;
    let plan = select(&config)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        print_plan(&plan);
    }
    Ok(())
}

fn print_plan(plan: &UnitPlan) {
    let units: Vec<&str> = plan.units.names().collect();
    println!("units:              {}", display_list(&units));
    println!("inference profiles: {}", display_list(&plan.profile_regions));
    println!("video buckets:      {}", display_list(&plan.video_regions));
}

fn print_report(report: &SynthReport) {
    for unit in &report.units {
        println!("{}  [{}]  {}/{}", unit.id, unit.kind, unit.env.account, unit.env.region);
        for (key, value) in &unit.outputs {
            println!("    {key}: {value}");
        }
    }
}

fn display_list<S: AsRef<str>>(items: &[S]) -> String {
    if items.is_empty() {
        return "-".to_owned();
    }
    items.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(", ")
}
