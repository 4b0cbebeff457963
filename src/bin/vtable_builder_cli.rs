use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use env_logger::Env;
use serde::Deserialize;

use vtable_builder::model::{ClassDescriptor, MemberHandle, SelectorId};
use vtable_builder::{build_dispatch_table, BuilderConfig, FunctionRef, FunctionRegistry};

#[derive(Parser)]
#[command(name = "vtable_builder")]
#[command(about = "Builds a flat virtual dispatch table from a class-hierarchy fixture", version, author)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a dispatch table from a JSON fixture and print a summary.
    Build(BuildArgs),
}

#[derive(clap::Args)]
struct BuildArgs {
    /// Path to a fixture JSON file describing classes, call counts, and the
    /// builder config. Defaults to the bundled toy shapes hierarchy.
    #[arg(long, default_value = "demos/fixtures/shapes.json")]
    fixture: PathBuf,

    /// Print the full list of finalized selectors, not just the summary.
    #[arg(long)]
    verbose: bool,

    /// Path to a standalone JSON file holding the designations that would
    /// otherwise come from the fixture's `config` field. Overrides it
    /// wholesale, so a hierarchy fixture can be reused against different
    /// designations without editing the fixture itself.
    #[arg(long)]
    config: Option<PathBuf>,
}

/// The fixture format this binary reads. Not a general-purpose hierarchy
/// builder — a class list with ids already assigned is the simplest possible
/// stand-in for the compiler front-end that would produce one in practice.
#[derive(Deserialize)]
struct Fixture {
    config: BuilderConfig,
    classes: Vec<ClassDescriptor>,
    #[serde(default)]
    call_counts: HashMap<u32, u64>,
}

/// Resolves every member handle to a synthetic symbol name. Standing in for
/// the real function table a surrounding compiler would supply.
struct NamedFunctions;

impl FunctionRegistry for NamedFunctions {
    fn get_existing_function(&self, handle: &MemberHandle) -> Option<FunctionRef> {
        Some(FunctionRef(format!("{}::{}", handle.class_id, handle.name)))
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Build(args) => run_build(args),
    }
}

fn run_build(args: BuildArgs) -> Result<()> {
    let raw = std::fs::read_to_string(&args.fixture)
        .with_context(|| format!("reading fixture at {}", args.fixture.display()))?;
    let fixture: Fixture = serde_json::from_str(&raw)
        .with_context(|| format!("parsing fixture at {}", args.fixture.display()))?;

    let config = match &args.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading config override at {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("parsing config override at {}", path.display()))?
        }
        None => fixture.config,
    };

    let call_counts: HashMap<SelectorId, u64> = fixture
        .call_counts
        .into_iter()
        .map(|(id, count)| (SelectorId(id), count))
        .collect();

    let output = build_dispatch_table(&fixture.classes, call_counts, &config, &NamedFunctions)
        .context("building dispatch table")?;

    let live_count = output.selectors().filter(|s| s.offset.is_some()).count();
    println!(
        "{} selector(s) finalized, {} live, table length {}",
        output.selectors().count(),
        live_count,
        output.table().len()
    );

    if args.verbose {
        let mut selectors: Vec<_> = output.selectors().collect();
        selectors.sort_by_key(|s| s.id);
        for selector in selectors {
            println!(
                "  {} targets={} offset={:?} inputs={} outputs={}",
                selector.id,
                selector.target_count,
                selector.offset,
                selector.signature.inputs.len(),
                selector.signature.outputs.len(),
            );
        }
    }

    Ok(())
}
