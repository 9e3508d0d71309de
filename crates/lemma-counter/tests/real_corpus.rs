use std::env;
use std::path::PathBuf;

use indicatif::ProgressBar;
use lemma_counter::count_lemmas;

fn corpus_path() -> Option<PathBuf> {
    env::var("LEMMA_CORPUS").ok().map(PathBuf::from)
}

#[test]
fn aggregates_real_corpus() {
    let Some(path) = corpus_path() else {
        eprintln!("skipping: LEMMA_CORPUS not set");
        return;
    };
    let table = count_lemmas(&path, &ProgressBar::hidden()).expect("aggregate corpus");

    assert!(!table.is_empty(), "no lemmas found");
    let counted: usize = table.iter().map(|r| r.count()).sum();
    assert_eq!(counted, table.token_count());
    for record in table.iter() {
        let forms: usize = record.word_forms().values().sum();
        assert_eq!(forms, record.count(), "lemma {:?}", record.lemma());
    }
}
