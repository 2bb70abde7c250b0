// src/bin/jumpgraph.rs
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use jumpscare_graph::graph::chart::{self, ChartConfig};
use jumpscare_graph::graph::{io_operations, query};
use jumpscare_graph::{load_and_build, BuildConfig, MovieGraph};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "jumpgraph")]
#[command(about = "Build and query the movie jump-scare graph")]
#[command(version)]
struct Cli {
    /// Scraped dataset (overrides config and JUMPSCARE_DATASET)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// JSON build config
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Load the graph from this snapshot instead of the dataset
    #[arg(long, global = true)]
    snapshot: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the graph and print the build report
    Build {
        /// Write a snapshot of the scored graph
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Print the info panel for a node
    Describe { label: String },
    /// List the direct neighbors of a node
    Neighbors { label: String },
    /// Emit chart data as JSON
    Chart {
        #[arg(long)]
        size: Option<String>,
        #[arg(long)]
        color: Option<String>,
        #[arg(long, requires = "y")]
        x: Option<String>,
        #[arg(long, requires = "x")]
        y: Option<String>,
        /// Highlight this node and its neighbors
        #[arg(long)]
        select: Option<String>,
    },
    /// Write node-link JSON
    Export { path: PathBuf },
}

fn load_config(cli: &Cli) -> Result<BuildConfig> {
    let config = match &cli.config {
        Some(path) => BuildConfig::from_file(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => BuildConfig::default(),
    };
    let mut config = config.with_env_overrides();
    if let Some(data) = &cli.data {
        config.dataset_path = data.clone();
    }
    Ok(config)
}

fn load_graph(cli: &Cli, config: &BuildConfig) -> Result<MovieGraph> {
    if let Some(path) = &cli.snapshot {
        return io_operations::load_snapshot(path)
            .with_context(|| format!("loading snapshot {}", path.display()));
    }
    let (graph, report) = load_and_build(config)
        .with_context(|| format!("building from {}", config.dataset_path.display()))?;
    if report.has_problems() {
        tracing::warn!(
            skipped = report.records_skipped,
            issues = report.issues.len(),
            "dataset had problems"
        );
    }
    Ok(graph)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("jumpscare_graph=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    config.log_summary();

    match &cli.command {
        Commands::Build { out } => {
            let (graph, report) = load_and_build(&config)?;
            println!("{}", report);
            if let Some(path) = out {
                io_operations::save_snapshot(&graph, path)?;
            }
        }
        Commands::Describe { label } => {
            let graph = load_graph(&cli, &config)?;
            let id = query::resolve(&graph, label)?;
            if let Some(text) = query::describe(&graph, Some(&id)) {
                println!("{}", text);
            }
        }
        Commands::Neighbors { label } => {
            let graph = load_graph(&cli, &config)?;
            let id = query::resolve(&graph, label)?;
            for neighbor in query::neighbors(&graph, &id)? {
                println!("{}", neighbor);
            }
        }
        Commands::Chart {
            size,
            color,
            x,
            y,
            select,
        } => {
            let graph = load_graph(&cli, &config)?;
            let mut chart_config: ChartConfig = config.chart.clone();
            if let Some(size) = size {
                chart_config.size_field = size.clone();
            }
            if let Some(color) = color {
                chart_config.color_field = color.clone();
            }
            if let (Some(x), Some(y)) = (x, y) {
                chart_config.position = Some((x.clone(), y.clone()));
            }
            let selected = match select {
                Some(label) => Some(query::resolve(&graph, label)?),
                None => None,
            };
            let data = chart::chart_data(&graph, &chart_config, selected.as_ref());
            println!("{}", serde_json::to_string_pretty(&data)?);
        }
        Commands::Export { path } => {
            let graph = load_graph(&cli, &config)?;
            io_operations::export_json(&graph, path)?;
            tracing::info!(path = %path.display(), "exported node-link json");
        }
    }
    Ok(())
}
