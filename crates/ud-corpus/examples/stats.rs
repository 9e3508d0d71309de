use std::collections::BTreeMap;
use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use ud_corpus::Corpus;
use upos_types::Upos;

fn main() -> Result<()> {
    let path = env::args()
        .nth(1)
        .map(PathBuf::from)
        .context("usage: cargo run -p ud-corpus --example stats -- <corpus.json>")?;

    let corpus =
        Corpus::load(&path).with_context(|| format!("loading corpus from {}", path.display()))?;

    let mut per_tag: BTreeMap<Upos, usize> = BTreeMap::new();
    let mut unknown_tags = 0usize;
    let mut with_feats = 0usize;

    for (_, _, raw) in corpus.iter_tokens() {
        match raw.pos_str().and_then(Upos::parse) {
            Some(pos) => *per_tag.entry(pos).or_default() += 1,
            None => unknown_tags += 1,
        }
        if raw.feats.is_some() {
            with_feats += 1;
        }
    }

    println!("Corpus       : {}", path.display());
    println!("Sentences    : {}", corpus.sentence_count());
    println!("Tokens       : {}", corpus.token_count());
    println!("With feats   : {}", with_feats);
    println!("Unknown tags : {}", unknown_tags);
    for (pos, count) in per_tag {
        println!("  {:<6} {}", pos, count);
    }

    Ok(())
}
