use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::info;

use topk_words::logging::init_logging;
use topk_words::{BoundaryPolicy, Config, RankedEntry, ShardSpec, compute_top_k};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Boundary {
    /// Cut at raw byte offsets; split words count as two fragments
    ByteExact,
    /// Snap shard reads to word boundaries
    Whitespace,
}

impl From<Boundary> for BoundaryPolicy {
    fn from(b: Boundary) -> Self {
        match b {
            Boundary::ByteExact => BoundaryPolicy::ByteExact,
            Boundary::Whitespace => BoundaryPolicy::Whitespace,
        }
    }
}

/// Print the K most frequent words of a text file.
#[derive(Parser, Debug)]
#[command(name = "topk-words", version)]
struct Cli {
    /// Text file to count
    input: Option<PathBuf>,

    /// Newline-delimited stopword list
    #[arg(short, long)]
    stopwords: Option<PathBuf>,

    /// Number of words to report
    #[arg(short, long)]
    k: Option<usize>,

    /// Split the input into exactly this many shards
    #[arg(short = 'n', long, conflicts_with = "chunk_size")]
    shards: Option<usize>,

    /// Split the input into shards of this many bytes
    #[arg(long)]
    chunk_size: Option<u64>,

    /// Worker threads
    #[arg(short, long)]
    workers: Option<usize>,

    #[arg(long, value_enum)]
    boundary: Option<Boundary>,

    /// TOML file with defaults for the options above
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Emit JSON instead of a table
    #[arg(long)]
    json: bool,

    #[arg(long, default_value = "warn")]
    log_level: String,
}

impl Cli {
    fn into_config(self) -> anyhow::Result<(Config, bool)> {
        let mut config = match &self.config {
            Some(path) => Config::from_toml_file(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => Config::default(),
        };
        if let Some(input) = self.input {
            config.input = input;
        }
        if let Some(stopwords) = self.stopwords {
            config.stopwords = stopwords;
        }
        if let Some(k) = self.k {
            config.k = k;
        }
        if let Some(n) = self.shards {
            config.shards = ShardSpec::Count(n);
        }
        if let Some(c) = self.chunk_size {
            config.shards = ShardSpec::ChunkSize(c);
        }
        if let Some(w) = self.workers {
            config.workers = w;
        }
        if let Some(b) = self.boundary {
            config.boundary = b.into();
        }
        Ok((config, self.json))
    }
}

fn print_table(entries: &[RankedEntry]) -> io::Result<()> {
    let mut out = io::BufWriter::new(io::stdout().lock());
    writeln!(out, "{:>4}  {:<20} {:>10}", "rank", "word", "count")?;
    for (rank, entry) in entries.iter().enumerate() {
        writeln!(out, "{:>4}  {:<20} {:>10}", rank + 1, entry.word, entry.count)?;
    }
    out.flush()
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;
    let (config, json) = cli.into_config()?;

    let start = Instant::now();
    let entries = compute_top_k(&config)
        .with_context(|| format!("counting words in {}", config.input.display()))?;
    let elapsed = start.elapsed();

    if json {
        serde_json::to_writer_pretty(io::stdout().lock(), &entries)?;
        println!();
    } else {
        print_table(&entries)?;
    }
    info!(?elapsed, k = config.k, "run complete");
    eprintln!("Execution time: {:.2?}", elapsed);

    Ok(())
}
