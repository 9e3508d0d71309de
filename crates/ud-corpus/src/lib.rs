//! Load part-of-speech tagged corpora from JSON.
//!
//! A corpus is a single UTF-8 JSON document of the shape
//!
//! ```text
//! { "sentences": [ { "tokens": [ {"text", "lemma", "pos", "feats"?}, ... ] }, ... ] }
//! ```
//!
//! The loader only checks that the document has this shape. Token fields are
//! kept as raw JSON values so that validation (wrong types, empty text,
//! unknown tags and so on) can happen downstream, in input order, with full
//! knowledge of where a record sits in the corpus.
//!
//! # Example
//! ```no_run
//! use ud_corpus::Corpus;
//!
//! # fn main() -> Result<(), ud_corpus::LoadError> {
//! let corpus = Corpus::load("/path/to/corpus.json")?;
//! for (sentence, token, raw) in corpus.iter_tokens() {
//!     println!("{sentence}:{token} {:?}", raw.text_str());
//! }
//! # Ok(()) }
//! ```
//!
//! For a runnable demo, see `cargo run -p ud-corpus --example stats -- <corpus.json>`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Failure to bring a corpus into memory.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read corpus {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse corpus {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Whole corpus, in input order.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct Corpus {
    pub sentences: Vec<Sentence>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct Sentence {
    pub tokens: Vec<RawToken>,
}

/// Token record exactly as it appeared in the document.
///
/// Absent keys and explicit `null` both deserialize to `None`. Values of any
/// other JSON type are kept as-is; checking them is the caller's job.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct RawToken {
    #[serde(default)]
    pub text: Option<Value>,
    #[serde(default)]
    pub lemma: Option<Value>,
    #[serde(default)]
    pub pos: Option<Value>,
    #[serde(default)]
    pub feats: Option<Value>,
}

impl RawToken {
    /// Convenience constructor for fully populated records.
    pub fn new(text: &str, lemma: &str, pos: &str, feats: Option<&str>) -> Self {
        Self {
            text: Some(Value::from(text)),
            lemma: Some(Value::from(lemma)),
            pos: Some(Value::from(pos)),
            feats: feats.map(Value::from),
        }
    }

    /// `text` if present and a string.
    pub fn text_str(&self) -> Option<&str> {
        self.text.as_ref().and_then(Value::as_str)
    }

    pub fn lemma_str(&self) -> Option<&str> {
        self.lemma.as_ref().and_then(Value::as_str)
    }

    pub fn pos_str(&self) -> Option<&str> {
        self.pos.as_ref().and_then(Value::as_str)
    }

    pub fn feats_str(&self) -> Option<&str> {
        self.feats.as_ref().and_then(Value::as_str)
    }
}

impl Corpus {
    /// Read and parse the corpus at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let buffer = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&buffer).map_err(|source| LoadError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse a corpus held in memory.
    pub fn from_json_str(json: &str) -> Result<Self, LoadError> {
        serde_json::from_str(json).map_err(|source| LoadError::Parse {
            path: PathBuf::from("<memory>"),
            source,
        })
    }

    pub fn sentence_count(&self) -> usize {
        self.sentences.len()
    }

    /// Number of token records across all sentences.
    pub fn token_count(&self) -> usize {
        self.sentences.iter().map(|s| s.tokens.len()).sum()
    }

    /// Iterate `(sentence_index, token_index, token)` in input order.
    pub fn iter_tokens(&self) -> impl Iterator<Item = (usize, usize, &RawToken)> + '_ {
        self.sentences
            .iter()
            .enumerate()
            .flat_map(|(s_idx, sentence)| {
                sentence
                    .tokens
                    .iter()
                    .enumerate()
                    .map(move |(t_idx, token)| (s_idx, t_idx, token))
            })
    }
}
