use anyhow::Context;
use clap::{Parser, Subcommand};
use gene_coverage::pipeline::output::read_table;
use gene_coverage::{logging, lookup, Config, CoveragePipeline};
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "gene-coverage")]
#[command(about = "Build the gene coverage table for JUMP and associated datasets")]
#[command(version)]
struct Cli {
    /// TOML file with source locations and hashes (embedded defaults otherwise)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch all sources and write the coverage table (the default)
    Build {
        /// Output CSV path
        #[arg(long)]
        output: Option<PathBuf>,
        /// Download cache directory
        #[arg(long)]
        cache_dir: Option<PathBuf>,
    },
    /// Print the configured sources as JSON
    Sources,
    /// Report which datasets cover the given genes
    Lookup {
        /// Previously built coverage table (the configured output by default)
        #[arg(long)]
        table: Option<PathBuf>,
        /// Gene symbols, matched exactly
        #[arg(required = true)]
        genes: Vec<String>,
    },
}

fn build(mut config: Config, output: Option<PathBuf>, cache_dir: Option<PathBuf>) -> anyhow::Result<()> {
    if let Some(o) = output {
        config.output = o;
    }
    if let Some(c) = cache_dir {
        config.cache_dir = c;
    }

    let pipeline = CoveragePipeline::from_config(&config)?;
    match pipeline.run() {
        Ok(report) => {
            info!("Coverage table built in {}ms", report.duration().num_milliseconds());
            println!("\n📊 Coverage table: {}", report.output.display());
            println!("   Genes: {}", report.genes);
            println!("   Columns: Gene,{}", report.columns.join(","));
            for source in &report.sources {
                println!(
                    "   {}: {} records, {} genes, origins [{}]",
                    source.name,
                    source.records,
                    source.genes,
                    source.origins.join(", ")
                );
            }
            Ok(())
        }
        Err(e) => {
            error!("Coverage build failed: {}", e);
            Err(e.into())
        }
    }
}

/// Table read by `lookup`: the explicit path, else the configured build output.
fn lookup_table(config: &Config, table: Option<PathBuf>) -> PathBuf {
    table.unwrap_or_else(|| config.output.clone())
}

fn main() -> anyhow::Result<()> {
    let _guard = logging::init_logging();
    let cli = Cli::parse();

    let config = Config::load_or_default(cli.config.as_deref())
        .context("loading configuration")?;

    match cli.command.unwrap_or(Commands::Build { output: None, cache_dir: None }) {
        Commands::Build { output, cache_dir } => build(config, output, cache_dir)?,
        Commands::Sources => {
            println!("{}", serde_json::to_string_pretty(&config.remote_files())?);
        }
        Commands::Lookup { table, genes } => {
            let table = lookup_table(&config, table);
            let coverage = read_table(&table)
                .with_context(|| format!("reading coverage table {}", table.display()))?;
            let hits = lookup::lookup(&coverage, &genes);
            println!("{}", serde_json::to_string_pretty(&hits)?);
        }
    }
    Ok(())
}
