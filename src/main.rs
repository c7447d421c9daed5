use anyhow::{Context, Result, bail};
use clap::Parser;
use docluster::{
    AlgorithmKind, ClusterConfig, ClusterReport, Clusterer, ResultSet, Seeding, load_path,
};
use std::fs;
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::{EnvFilter, fmt};

/// Cluster documents by TF-IDF cosine similarity
#[derive(Parser)]
#[command(name = "docluster", version, about)]
struct Cli {
    /// Directory of text files, or a JSON file of documents
    #[arg(short, long)]
    input: PathBuf,

    /// Only cluster documents matching these terms
    #[arg(short, long)]
    query: Option<String>,

    /// JSON file with clustering parameters
    #[arg(long)]
    config: Option<PathBuf>,

    /// kmeans or round-robin
    #[arg(long)]
    algorithm: Option<AlgorithmKind>,

    /// Number of clusters
    #[arg(short = 'k', long)]
    clusters: Option<usize>,

    /// Iteration limit for k-means (0 runs until convergence)
    #[arg(long)]
    max_iters: Option<usize>,

    /// random or farthest-first
    #[arg(long)]
    seeding: Option<Seeding>,

    #[arg(long)]
    seed: Option<u64>,

    /// Only cluster the first N ranked documents
    #[arg(long)]
    limit: Option<usize>,

    /// Centroid terms shown per cluster
    #[arg(long, default_value_t = 5)]
    top_terms: usize,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn resolve_config(&self) -> Result<ClusterConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let raw = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config {}", path.display()))?;
                ClusterConfig::from_json(&raw)
                    .with_context(|| format!("Invalid config {}", path.display()))?
            }
            None => ClusterConfig::default(),
        };

        // Flags win over the config file
        if let Some(algorithm) = self.algorithm {
            config.algorithm = algorithm;
        }
        if let Some(clusters) = self.clusters {
            config.clusters = clusters;
        }
        if let Some(max_iters) = self.max_iters {
            config.max_iters = max_iters;
        }
        if let Some(seeding) = self.seeding {
            config.seeding = seeding;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if self.limit.is_some() {
            config.limit = self.limit;
        }

        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("docluster=info")),
        1 => EnvFilter::new("docluster=debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let start_time = Instant::now();
    let config = cli.resolve_config()?;

    // Step 1: Load corpus
    let step_start = Instant::now();
    let corpus = load_path(&cli.input)
        .with_context(|| format!("Failed to load corpus from {}", cli.input.display()))?;
    tracing::info!(
        documents = corpus.len(),
        elapsed_ms = step_start.elapsed().as_millis() as u64,
        "loaded corpus"
    );

    // Step 2: Select the result set
    let results = match &cli.query {
        Some(query) => corpus.search(query, None),
        None => corpus.all(),
    };
    if results.size() == 0 {
        bail!("No documents match the query");
    }
    tracing::info!(matches = results.size(), query = ?cli.query, "selected result set");

    // Step 3: Cluster
    let step_start = Instant::now();
    let algorithm = config.build().context("Invalid clustering parameters")?;
    let cset = algorithm
        .cluster(&results)
        .with_context(|| format!("{} failed", algorithm.description()))?;
    tracing::info!(
        elapsed_ms = step_start.elapsed().as_millis() as u64,
        "{}",
        cset.description()
    );

    // Step 4: Report
    let report = ClusterReport::build(&algorithm.description(), &cset, &results, cli.top_terms)?;
    if cli.json {
        println!("{}", report.to_json()?);
    } else {
        print!("{}", report);
    }

    tracing::info!(
        total_ms = start_time.elapsed().as_millis() as u64,
        "done"
    );
    Ok(())
}
