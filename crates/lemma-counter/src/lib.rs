//! Per-lemma frequency counts for part-of-speech tagged corpora.
//!
//! The pipeline is linear: [`Corpus::load`] reads the JSON document,
//! [`aggregate`] validates every token and folds it into a [`LemmaTable`],
//! and [`write_records`] serializes the records. Any failure aborts the run
//! before output is written.
//!
//! ```no_run
//! use indicatif::ProgressBar;
//!
//! # fn main() -> Result<(), lemma_counter::Error> {
//! let written = lemma_counter::run("corpus.json", "output.json", &ProgressBar::hidden())?;
//! println!("{written} lemmas");
//! # Ok(()) }
//! ```

pub mod output;
pub mod record;
pub mod token;

use std::path::Path;
use std::time::Instant;

use indicatif::ProgressBar;
use thiserror::Error;
use tracing::info;

pub use output::{WriteError, to_json_string, write_records};
pub use record::{LemmaRecord, LemmaTable, ValidationError, aggregate, aggregate_with_progress};
pub use token::{Field, Token, TokenError};
pub use ud_corpus::{Corpus, LoadError, RawToken, Sentence};
pub use upos_types::Upos;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Write(#[from] WriteError),
}

/// Load the corpus at `corpus_path` and aggregate it into lemma records.
pub fn count_lemmas(
    corpus_path: impl AsRef<Path>,
    progress: &ProgressBar,
) -> Result<LemmaTable, Error> {
    let corpus_path = corpus_path.as_ref();
    let corpus = Corpus::load(corpus_path)?;
    // Log lines must not be drawn over the bar.
    progress.suspend(|| {
        info!(
            "loaded {} sentences ({} tokens) from {}",
            corpus.sentence_count(),
            corpus.token_count(),
            corpus_path.display()
        )
    });

    progress.set_length(corpus.sentence_count() as u64);
    let start = Instant::now();
    let table = aggregate_with_progress(&corpus, progress)?;
    progress.suspend(|| {
        info!(
            "aggregated {} tokens into {} lemmas in {} ms",
            table.token_count(),
            table.len(),
            start.elapsed().as_millis()
        )
    });
    Ok(table)
}

/// Full run: load, aggregate and write. Returns the number of records written.
pub fn run(
    corpus_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    progress: &ProgressBar,
) -> Result<usize, Error> {
    let output_path = output_path.as_ref();
    let records = count_lemmas(corpus_path, progress)?.into_records();
    write_records(output_path, &records)?;
    progress.suspend(|| info!("wrote {} lemmas to {}", records.len(), output_path.display()));
    Ok(records.len())
}
