use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use loess::config::Config;
use loess::output::terminal;
use loess::pipeline::import::CorpusEntry;
use loess::pipeline::{explore, import};

/// Loess: exploratory cluster analysis for award-abstract corpora.
///
/// Imports a directory of award XML files into a cleaned text corpus, then
/// explores cluster structure over its TF-IDF representation.
#[derive(Parser)]
#[command(name = "loess", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sample and import a directory of award XML files
    Import {
        /// Corpus directory (falls back to LOESS_DATA_DIR)
        #[arg(long)]
        dir: Option<PathBuf>,

        /// Proportion of files to sample (falls back to LOESS_SAMPLE_PROPORTION, then 0.8)
        #[arg(long)]
        proportion: Option<f64>,

        /// Seed the sampler for a reproducible draw
        #[arg(long)]
        seed: Option<u64>,

        /// Where to write the imported corpus
        #[arg(long, default_value = "corpus.json")]
        out: PathBuf,
    },

    /// Sweep candidate cluster counts and score each with three metrics
    Sweep {
        /// Corpus file produced by `loess import`
        #[arg(long, default_value = "corpus.json")]
        corpus: PathBuf,

        /// First cluster count to try
        #[arg(long, default_value = "2")]
        start_k: usize,

        /// Last cluster count to try (inclusive)
        #[arg(long, default_value = "10")]
        end_k: usize,

        /// Random state for k-means (fixed seed = reproducible sweep)
        #[arg(long, default_value = "0")]
        seed: u64,
    },

    /// Cluster at one k and render the PCA / t-SNE / UMAP 3-D comparison
    Visualize {
        /// Corpus file produced by `loess import`
        #[arg(long, default_value = "corpus.json")]
        corpus: PathBuf,

        /// Number of clusters to color by
        #[arg(long)]
        k: usize,

        /// Random state for k-means
        #[arg(long, default_value = "0")]
        seed: u64,
    },
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("loess=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Import {
            dir,
            proportion,
            seed,
            out,
        } => {
            let dir = config.require_data_dir(dir)?;
            let proportion = proportion.unwrap_or(config.sample_proportion);

            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_os_rng(),
            };

            let entries = import::run(&dir, proportion, &mut rng)?;
            terminal::display_corpus_summary(&entries);

            let json = serde_json::to_string_pretty(&entries)?;
            fs::write(&out, json)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Corpus written to {}", out.display().to_string().bold());
        }

        Commands::Sweep {
            corpus,
            start_k,
            end_k,
            seed,
        } => {
            let entries = read_corpus(&corpus)?;
            let matrix = explore::vectorize(&entries);
            info!(
                documents = matrix.nrows(),
                features = matrix.ncols(),
                "Vectorized corpus"
            );

            let (sweep, svg) = explore::run_sweep(&matrix, start_k, end_k, seed)?;
            terminal::display_sweep(&sweep);

            let plot_path = config.plot_dir.join("sweep.svg");
            fs::write(&plot_path, svg)
                .with_context(|| format!("failed to write {}", plot_path.display()))?;
            println!("Score curves written to {}", plot_path.display().to_string().bold());
        }

        Commands::Visualize { corpus, k, seed } => {
            let entries = read_corpus(&corpus)?;
            let matrix = explore::vectorize(&entries);

            let svg = explore::run_visualize(&matrix, k, seed)?;

            let plot_path = config.plot_dir.join("clusters_3d.svg");
            fs::write(&plot_path, svg)
                .with_context(|| format!("failed to write {}", plot_path.display()))?;
            println!("3-D panels written to {}", plot_path.display().to_string().bold());
        }
    }

    Ok(())
}

fn read_corpus(path: &PathBuf) -> Result<Vec<CorpusEntry>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read corpus file {}", path.display()))?;
    let entries: Vec<CorpusEntry> =
        serde_json::from_str(&raw).with_context(|| "corpus file is not valid JSON")?;
    if entries.is_empty() {
        anyhow::bail!("Corpus file {} holds no records", path.display());
    }
    Ok(entries)
}
