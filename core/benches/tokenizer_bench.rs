use criterion::{criterion_group, criterion_main, Criterion};
use lontar_core::tokenizer::preprocess;

const SAMPLE: &str = "\
Document retrieval systems rank stored documents against a free-text query. \
The corpus is tokenized ahead of time: text is normalized, lowercased, \
stripped of punctuation, filtered for stopwords, and stemmed, so that the \
query and the documents meet in the same term space. The Binary Independence \
Model then weighs each matching term by how rare it is across the corpus, \
discounting words that appear nearly everywhere and rewarding the ones that \
single a document out.";

fn bench_preprocess(c: &mut Criterion) {
    c.bench_function("preprocess_sample", |b| b.iter(|| preprocess(SAMPLE)));
}

criterion_group!(benches, bench_preprocess);
criterion_main!(benches);
