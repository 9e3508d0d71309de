//! Shared part-of-speech types for Universal Dependencies corpora.
//!
//! The tag set is closed: seventeen upper-case tags, matched exactly and
//! case-sensitively. Anything else is rejected rather than mapped to `X`,
//! so callers can tell malformed annotations apart from genuine "other"
//! tokens.
//!
//! ```rust
//! use upos_types::Upos;
//!
//! let pos: Upos = "VERB".parse().unwrap();
//! assert_eq!(pos, Upos::Verb);
//! assert_eq!(pos.to_string(), "VERB");
//! assert!(Upos::parse("verb").is_none());
//! ```

use std::fmt;
use std::str::FromStr;

/// Universal POS tag as used by the `upos` column of UD treebanks.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum Upos {
    Adj,
    Adp,
    Adv,
    Aux,
    Cconj,
    Det,
    Intj,
    Noun,
    Num,
    Part,
    Pron,
    Propn,
    Punct,
    Sconj,
    Sym,
    Verb,
    X,
}

impl Upos {
    /// Every tag in canonical (alphabetical) order.
    pub const ALL: [Upos; 17] = [
        Upos::Adj,
        Upos::Adp,
        Upos::Adv,
        Upos::Aux,
        Upos::Cconj,
        Upos::Det,
        Upos::Intj,
        Upos::Noun,
        Upos::Num,
        Upos::Part,
        Upos::Pron,
        Upos::Propn,
        Upos::Punct,
        Upos::Sconj,
        Upos::Sym,
        Upos::Verb,
        Upos::X,
    ];

    /// Parse a tag exactly as it appears in a corpus.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "ADJ" => Some(Upos::Adj),
            "ADP" => Some(Upos::Adp),
            "ADV" => Some(Upos::Adv),
            "AUX" => Some(Upos::Aux),
            "CCONJ" => Some(Upos::Cconj),
            "DET" => Some(Upos::Det),
            "INTJ" => Some(Upos::Intj),
            "NOUN" => Some(Upos::Noun),
            "NUM" => Some(Upos::Num),
            "PART" => Some(Upos::Part),
            "PRON" => Some(Upos::Pron),
            "PROPN" => Some(Upos::Propn),
            "PUNCT" => Some(Upos::Punct),
            "SCONJ" => Some(Upos::Sconj),
            "SYM" => Some(Upos::Sym),
            "VERB" => Some(Upos::Verb),
            "X" => Some(Upos::X),
            _ => None,
        }
    }

    /// Emit the canonical upper-case tag.
    pub fn as_str(self) -> &'static str {
        match self {
            Upos::Adj => "ADJ",
            Upos::Adp => "ADP",
            Upos::Adv => "ADV",
            Upos::Aux => "AUX",
            Upos::Cconj => "CCONJ",
            Upos::Det => "DET",
            Upos::Intj => "INTJ",
            Upos::Noun => "NOUN",
            Upos::Num => "NUM",
            Upos::Part => "PART",
            Upos::Pron => "PRON",
            Upos::Propn => "PROPN",
            Upos::Punct => "PUNCT",
            Upos::Sconj => "SCONJ",
            Upos::Sym => "SYM",
            Upos::Verb => "VERB",
            Upos::X => "X",
        }
    }
}

impl fmt::Display for Upos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A tag string outside the universal set.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnknownUpos(pub String);

impl fmt::Display for UnknownUpos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown part-of-speech tag {:?}", self.0)
    }
}

impl std::error::Error for UnknownUpos {}

impl FromStr for Upos {
    type Err = UnknownUpos;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Upos::parse(s).ok_or_else(|| UnknownUpos(s.to_string()))
    }
}
