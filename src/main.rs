use anyhow::{Context, Result};
use clap::Parser;
use htmlchunk::{Config, DirectoryProcessor, Encoding, FailurePolicy};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};

/// Extract text from every HTML file under a directory and split it into
/// token-bounded chunks. Prints a JSON object of path -> chunks.
#[derive(Debug, Parser)]
#[command(name = "htmlchunk", version, about)]
struct Cli {
    /// Directory to scan recursively
    root: PathBuf,

    /// JSON config file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Maximum tokens per chunk
    #[arg(short, long)]
    max_tokens: Option<usize>,

    /// Tokenizer encoding (cl100k_base, o200k_base, p50k_base, p50k_edit, r50k_base)
    #[arg(short, long)]
    encoding: Option<Encoding>,

    /// Case-sensitive file-name suffix to select
    #[arg(long)]
    suffix: Option<String>,

    /// Follow symbolic links while walking
    #[arg(long)]
    follow_links: bool,

    /// Skip files that fail instead of aborting the run
    #[arg(long)]
    skip_errors: bool,

    /// Write JSON here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

impl Cli {
    fn resolve_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_json_file(path)?,
            None => Config::default(),
        };

        if let Some(max_tokens) = self.max_tokens {
            config.max_tokens = max_tokens;
        }
        if let Some(encoding) = self.encoding {
            config.encoding = encoding;
        }
        if let Some(suffix) = &self.suffix {
            config.suffix = suffix.clone();
        }
        if self.follow_links {
            config.follow_links = true;
        }
        if self.skip_errors {
            config.on_error = FailurePolicy::Skip;
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = cli.resolve_config()?;
    let start = Instant::now();

    let processor = DirectoryProcessor::from_config(&config)
        .context("Failed to initialize tokenizer")?;
    let report = processor
        .process(&cli.root)
        .with_context(|| format!("Failed to process {}", cli.root.display()))?;

    let writer: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(
            File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };
    let mut writer = BufWriter::new(writer);

    let chunks = report.chunks_by_display_path();
    if cli.pretty {
        serde_json::to_writer_pretty(&mut writer, &chunks)?;
    } else {
        serde_json::to_writer(&mut writer, &chunks)?;
    }

    for skipped in &report.skipped {
        warn!(path = %skipped.path.display(), reason = %skipped.reason, "Skipped");
    }
    writeln!(writer)?;
    writer.flush()?;

    info!(
        files = report.file_count(),
        chunks = report.chunk_count(),
        skipped = report.skipped.len(),
        elapsed_secs = start.elapsed().as_secs_f64(),
        "Done"
    );

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    // Logs go to stderr so stdout carries only JSON
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .without_time()
        .init();
}
