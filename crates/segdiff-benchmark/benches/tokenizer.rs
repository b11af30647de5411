use codspeed_criterion_compat::{
    BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use segdiff_benchmark::{ARTICLE, repeated};
use segdiff_tokenizer::{TextSplit, Tokenize, WikitextSplit};

fn bench_tokenize(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenize");
    let source = repeated(ARTICLE, 20);
    group.throughput(Throughput::Bytes(source.len() as u64));

    let tokenizers: [(&str, &dyn Tokenize); 2] =
        [("wikitext_split", &WikitextSplit), ("text_split", &TextSplit)];
    for (name, tokenizer) in tokenizers {
        group.bench_with_input(BenchmarkId::new(name, source.len()), &source, |b, s| {
            b.iter(|| black_box(tokenizer.tokenize(s)))
        });
    }
}

criterion_group!(benches, bench_tokenize);
criterion_main!(benches);
