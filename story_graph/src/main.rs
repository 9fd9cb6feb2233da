//! Story graph command line interface.
//!
//! # Usage
//!
//! ```bash
//! # Validate a manifest; exits 1 when any error-severity issue exists
//! story-graph validate content/primer.toml
//!
//! # Aggregate metrics and node type distribution
//! story-graph metrics content/primer.toml --format json
//!
//! # Laid-out flow graph for the visualizer
//! story-graph flow content/primer.toml --node-gap 60 > flow.json
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use content_model::StoryManifest;
use story_graph::{
    calculate_metrics, type_distribution, validate, FlowGraphBuilder, JsonReport, LayoutConfig,
    LayoutEngine, Reporter,
};

/// Exit status for failures outside the analysis itself (unreadable manifest, bad output).
const EXIT_OPERATIONAL_FAILURE: u8 = 2;

#[derive(Parser)]
#[command(name = "story-graph")]
#[command(version)]
#[command(about = "Validate, measure, and lay out interactive story content graphs")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format for validate and metrics
    #[arg(long, short = 'o', global = true, default_value = "text", value_enum)]
    format: OutputFormat,

    /// When to color text output
    #[arg(long, global = true, default_value = "auto", value_enum)]
    color: ColorChoice,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ColorChoice {
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    fn enabled(self) -> bool {
        match self {
            ColorChoice::Auto => std::io::stdout().is_terminal(),
            ColorChoice::Always => true,
            ColorChoice::Never => false,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run the reference, orphan, dead-end, and reachability checks
    Validate {
        /// Story manifest (.toml or .json)
        manifest: PathBuf,
    },

    /// Print graph metrics and the node type distribution
    Metrics {
        /// Story manifest (.toml or .json)
        manifest: PathBuf,
    },

    /// Emit the laid-out flow graph as JSON
    Flow {
        /// Story manifest (.toml or .json)
        manifest: PathBuf,

        /// Keep special pages such as dev tools in the graph
        #[arg(long)]
        include_special_pages: bool,

        /// Horizontal gap between nodes in a rank
        #[arg(long, default_value_t = 80.0)]
        node_gap: f64,

        /// Vertical gap between ranks
        #[arg(long, default_value_t = 120.0)]
        rank_gap: f64,
    },
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let color = cli.color.enabled();
    colored::control::set_override(color);
    let reporter = Reporter::new(color);

    let result = match cli.command {
        Commands::Validate { manifest } => cmd_validate(&manifest, cli.format, reporter),
        Commands::Metrics { manifest } => cmd_metrics(&manifest, cli.format, reporter),
        Commands::Flow {
            manifest,
            include_special_pages,
            node_gap,
            rank_gap,
        } => cmd_flow(&manifest, include_special_pages, node_gap, rank_gap),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::from(EXIT_OPERATIONAL_FAILURE)
        }
    }
}

fn load(path: &Path) -> Result<StoryManifest> {
    let manifest = StoryManifest::load(path)
        .with_context(|| format!("could not load story manifest {}", path.display()))?;
    tracing::info!(nodes = manifest.registry.len(), "building content graph");
    Ok(manifest)
}

fn cmd_validate(path: &Path, format: OutputFormat, reporter: Reporter) -> Result<u8> {
    let manifest = load(path)?;
    let report = validate(&manifest.registry, &manifest.config);

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&JsonReport::new(&report))
                .context("failed to serialize validation report")?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            println!("Found {} content nodes", manifest.registry.len());
            print!("{}", reporter.render(&report));
        }
    }

    Ok(report.exit_code())
}

fn cmd_metrics(path: &Path, format: OutputFormat, reporter: Reporter) -> Result<u8> {
    let manifest = load(path)?;
    let metrics = calculate_metrics(&manifest.registry, &manifest.config);
    let graph = FlowGraphBuilder::new(&manifest.config).build(&manifest.registry);
    let distribution = type_distribution(&graph);

    match format {
        OutputFormat::Json => {
            let types: serde_json::Map<String, serde_json::Value> = distribution
                .iter()
                .map(|(t, count)| (t.as_str().to_string(), serde_json::Value::from(*count)))
                .collect();
            let output = serde_json::json!({
                "metrics": metrics,
                "nodeTypes": types,
            });
            println!(
                "{}",
                serde_json::to_string_pretty(&output).context("failed to serialize metrics")?
            );
        }
        OutputFormat::Text => print!("{}", reporter.render_metrics(&metrics, &distribution)),
    }

    Ok(0)
}

fn cmd_flow(path: &Path, include_special_pages: bool, node_gap: f64, rank_gap: f64) -> Result<u8> {
    let manifest = load(path)?;
    let graph = FlowGraphBuilder::new(&manifest.config)
        .filter_special_pages(!include_special_pages)
        .build(&manifest.registry);

    let engine = LayoutEngine::new(LayoutConfig {
        node_gap,
        rank_gap,
        ..LayoutConfig::default()
    });
    let graph = engine.apply(graph);

    println!(
        "{}",
        serde_json::to_string_pretty(&graph).context("failed to serialize flow graph")?
    );
    Ok(0)
}
