use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use lemma_counter::{count_lemmas, run, to_json_string};

const DEFAULT_OUTPUT: &str = "output.json";

#[derive(Debug, Parser)]
#[command(name = "lemma-counter")]
#[command(about = "Process a corpus to extract lemmas.")]
struct Cli {
    /// The file path to the corpus JSON file.
    corpus_path: PathBuf,

    /// The file path to the output JSON file.
    #[arg(
        short = 'o',
        long = "output_path",
        env = "LEMMA_COUNTER_OUTPUT",
        default_value = DEFAULT_OUTPUT
    )]
    output_path: PathBuf,

    /// Print the records to stdout instead of writing the output file.
    #[arg(long, default_value_t = false)]
    stdout: bool,

    /// Do not draw the progress bar.
    #[arg(long, default_value_t = false)]
    no_progress: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let progress = progress_bar(cli.no_progress)?;

    if cli.stdout {
        let table = count_lemmas(&cli.corpus_path, &progress);
        progress.finish_and_clear();
        let table = table.with_context(|| format!("processing {}", cli.corpus_path.display()))?;
        let json = to_json_string(&table.into_records())?;
        std::io::stdout()
            .lock()
            .write_all(json.as_bytes())
            .context("writing records to stdout")?;
    } else {
        let written = run(&cli.corpus_path, &cli.output_path, &progress);
        progress.finish_and_clear();
        written.with_context(|| format!("processing {}", cli.corpus_path.display()))?;
    }

    Ok(())
}

fn progress_bar(hidden: bool) -> Result<ProgressBar> {
    if hidden {
        return Ok(ProgressBar::hidden());
    }
    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} sentences ({per_sec}, {eta})",
        )?
        .progress_chars("#>-"),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(pb)
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .init();
}
