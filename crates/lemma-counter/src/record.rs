use indexmap::IndexMap;
use indicatif::ProgressBar;
use serde::{Serialize, Serializer};
use thiserror::Error;
use tracing::debug;
use ud_corpus::Corpus;
use upos_types::Upos;

use crate::token::{Token, TokenError};

/// A token that failed validation, located by 0-based indices.
#[derive(Debug, Error, Eq, PartialEq)]
#[error("invalid token at sentence {sentence}, token {token}: {source}")]
pub struct ValidationError {
    pub sentence: usize,
    pub token: usize,
    #[source]
    pub source: TokenError,
}

/// Frequency record for one lemma.
///
/// `pos` and `feats` come from the first token seen for the lemma; later
/// occurrences only bump the counters.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct LemmaRecord {
    lemma: String,
    #[serde(serialize_with = "serialize_upos")]
    pos: Upos,
    feats: Option<String>,
    count: usize,
    word_forms: IndexMap<String, usize>,
}

fn serialize_upos<S: Serializer>(pos: &Upos, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(pos.as_str())
}

impl LemmaRecord {
    /// Fresh record with `count` 1 and no word forms yet.
    pub fn new(lemma: impl Into<String>, pos: Upos, feats: Option<String>) -> Self {
        Self {
            lemma: lemma.into(),
            pos,
            feats,
            count: 1,
            word_forms: IndexMap::new(),
        }
    }

    /// Record for the first occurrence of a lemma.
    ///
    /// The creating token already accounts for `count == 1`, so only its
    /// surface form is tallied here.
    pub fn from_token(token: &Token) -> Self {
        let mut record = Self::new(token.lemma(), token.pos(), token.feats().map(str::to_string));
        record.tally_form(token.text());
        record
    }

    /// Count a further occurrence of this lemma under `form`.
    pub fn add_occurrence(&mut self, form: &str) {
        self.count += 1;
        self.tally_form(form);
    }

    fn tally_form(&mut self, form: &str) {
        self.word_forms
            .entry(form.to_string())
            .and_modify(|n| *n += 1)
            .or_insert(1);
    }

    pub fn lemma(&self) -> &str {
        &self.lemma
    }

    pub fn pos(&self) -> Upos {
        self.pos
    }

    pub fn feats(&self) -> Option<&str> {
        self.feats.as_deref()
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn word_forms(&self) -> &IndexMap<String, usize> {
        &self.word_forms
    }
}

/// Lemma records keyed by trimmed lemma, in first-insertion order.
#[derive(Debug, Default)]
pub struct LemmaTable {
    records: IndexMap<String, LemmaRecord>,
    tokens: usize,
}

impl LemmaTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a validated token into its lemma's record.
    pub fn insert(&mut self, token: Token) {
        self.tokens += 1;
        if let Some(record) = self.records.get_mut(token.lemma()) {
            if record.pos() != token.pos() {
                debug!(
                    "lemma {:?} seen as {} but keeping first tag {}",
                    token.lemma(),
                    token.pos(),
                    record.pos()
                );
            }
            record.add_occurrence(token.text());
            return;
        }
        let record = LemmaRecord::from_token(&token);
        self.records.insert(token.lemma().to_string(), record);
    }

    pub fn get(&self, lemma: &str) -> Option<&LemmaRecord> {
        self.records.get(lemma)
    }

    /// Number of distinct lemmas.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of tokens folded in so far.
    pub fn token_count(&self) -> usize {
        self.tokens
    }

    pub fn iter(&self) -> impl Iterator<Item = &LemmaRecord> + '_ {
        self.records.values()
    }

    /// Drop the keys, keeping records in first-insertion order.
    pub fn into_records(self) -> Vec<LemmaRecord> {
        self.records.into_values().collect()
    }
}

/// Validate and fold every token of `corpus`, stopping at the first invalid one.
pub fn aggregate(corpus: &Corpus) -> Result<LemmaTable, ValidationError> {
    aggregate_with_progress(corpus, &ProgressBar::hidden())
}

/// Same as [`aggregate`], ticking `progress` once per sentence.
pub fn aggregate_with_progress(
    corpus: &Corpus,
    progress: &ProgressBar,
) -> Result<LemmaTable, ValidationError> {
    let mut table = LemmaTable::new();
    for (s_idx, sentence) in corpus.sentences.iter().enumerate() {
        for (t_idx, raw) in sentence.tokens.iter().enumerate() {
            let token = Token::validate(raw).map_err(|source| ValidationError {
                sentence: s_idx,
                token: t_idx,
                source,
            })?;
            table.insert(token);
        }
        progress.inc(1);
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use ud_corpus::{RawToken, Sentence};

    use super::*;
    use crate::token::Field;

    fn corpus(sentences: Vec<Vec<RawToken>>) -> Corpus {
        Corpus {
            sentences: sentences
                .into_iter()
                .map(|tokens| Sentence { tokens })
                .collect(),
        }
    }

    fn forms(pairs: &[(&str, usize)]) -> IndexMap<String, usize> {
        pairs.iter().map(|(f, n)| (f.to_string(), *n)).collect()
    }

    #[test]
    fn add_occurrence_counts_distinct_forms() {
        let mut lemma = LemmaRecord::new("run", Upos::Verb, None);
        lemma.add_occurrence("ran");
        lemma.add_occurrence("running");
        assert_eq!(lemma.count(), 3);
        assert_eq!(lemma.word_forms(), &forms(&[("ran", 1), ("running", 1)]));
    }

    #[test]
    fn add_occurrence_counts_repeated_form() {
        let mut lemma = LemmaRecord::new("run", Upos::Verb, None);
        lemma.add_occurrence("running");
        lemma.add_occurrence("running");
        assert_eq!(lemma.count(), 3);
        assert_eq!(lemma.word_forms(), &forms(&[("running", 2)]));
    }

    #[test]
    fn from_token_does_not_double_count() {
        let token = Token::validate(&RawToken::new("runs", "run", "VERB", None)).unwrap();
        let record = LemmaRecord::from_token(&token);
        assert_eq!(record.count(), 1);
        assert_eq!(record.word_forms(), &forms(&[("runs", 1)]));
    }

    #[test]
    fn keeps_first_seen_pos_and_feats() {
        let table = aggregate(&corpus(vec![vec![
            RawToken::new("run", "run", "VERB", Some("Tense=Past")),
            RawToken::new("running", "run", "VERB", Some("Tense=PresentParticiple")),
        ]]))
        .unwrap();

        assert_eq!(table.len(), 1);
        let run = table.get("run").unwrap();
        assert_eq!(run.count(), 2);
        assert_eq!(run.word_forms(), &forms(&[("run", 1), ("running", 1)]));
        assert_eq!(run.pos(), Upos::Verb);
        assert_eq!(run.feats(), Some("Tense=Past"));
    }

    #[test]
    fn homographs_with_different_tags_share_one_record() {
        let table = aggregate(&corpus(vec![
            vec![RawToken::new("run", "run", "NOUN", Some("Number=Sing"))],
            vec![RawToken::new("ran", "run", "VERB", Some("Tense=Past"))],
        ]))
        .unwrap();

        assert_eq!(table.len(), 1);
        let run = table.get("run").unwrap();
        assert_eq!(run.pos(), Upos::Noun);
        assert_eq!(run.feats(), Some("Number=Sing"));
        assert_eq!(run.count(), 2);
    }

    #[test]
    fn groups_by_trimmed_lemma() {
        let table = aggregate(&corpus(vec![vec![
            RawToken::new("Cats", " cat", "NOUN", None),
            RawToken::new("cat", "cat ", "NOUN", None),
        ]]))
        .unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("cat").unwrap().count(), 2);
        assert_eq!(table.token_count(), 2);
    }

    #[test]
    fn counts_do_not_depend_on_token_order() {
        let tokens = [
            RawToken::new("running", "run", "VERB", None),
            RawToken::new("ran", "run", "NOUN", None),
            RawToken::new("running", "run", "VERB", Some("VerbForm=Ger")),
            RawToken::new("runs", "run", "VERB", None),
        ];
        let orders: [[usize; 4]; 4] = [[0, 1, 2, 3], [3, 2, 1, 0], [1, 3, 0, 2], [2, 0, 3, 1]];

        let mut results = orders.iter().map(|order| {
            let sentence = order.iter().map(|&i| tokens[i].clone()).collect();
            let table = aggregate(&corpus(vec![sentence])).unwrap();
            let run = table.get("run").unwrap();
            (run.count(), run.word_forms().clone())
        });
        let first = results.next().unwrap();
        assert_eq!(first.0, 4);
        for other in results {
            assert_eq!(other, first);
        }
    }

    #[test]
    fn records_come_out_in_first_seen_order() {
        let table = aggregate(&corpus(vec![
            vec![
                RawToken::new("the", "the", "DET", None),
                RawToken::new("dogs", "dog", "NOUN", None),
            ],
            vec![
                RawToken::new("a", "a", "DET", None),
                RawToken::new("dog", "dog", "NOUN", None),
                RawToken::new("barked", "bark", "VERB", None),
            ],
        ]))
        .unwrap();
        let lemmas: Vec<String> = table
            .into_records()
            .into_iter()
            .map(|r| r.lemma().to_string())
            .collect();
        assert_eq!(lemmas, vec!["the", "dog", "a", "bark"]);
    }

    #[test]
    fn empty_corpus_yields_no_records() {
        let table = aggregate(&Corpus::default()).unwrap();
        assert!(table.is_empty());
        assert!(table.into_records().is_empty());
    }

    #[test]
    fn stops_at_first_invalid_token_with_location() {
        let err = aggregate(&corpus(vec![
            vec![RawToken::new("ok", "ok", "INTJ", None)],
            vec![
                RawToken::new("fine", "fine", "ADJ", None),
                RawToken::new("", "bad", "NOUN", None),
                RawToken::new("later", "later", "WRONG", None),
            ],
        ]))
        .unwrap_err();
        assert_eq!(
            err,
            ValidationError {
                sentence: 1,
                token: 1,
                source: TokenError::Empty(Field::Text),
            }
        );
        assert!(err.to_string().contains("sentence 1, token 1"));
    }

    #[test]
    fn ticks_progress_once_per_sentence() {
        let progress = ProgressBar::hidden();
        aggregate_with_progress(
            &corpus(vec![vec![], vec![RawToken::new("x", "x", "X", None)], vec![]]),
            &progress,
        )
        .unwrap();
        assert_eq!(progress.position(), 3);
    }
}
