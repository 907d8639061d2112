use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use knowledge_extractor::extraction::{
    extract_entities_fallback, extract_keywords_fallback, keyword_importance, summarize,
    DocumentProcessor, InMemoryDocumentLog, NlpBackend,
};

fn sample_text() -> String {
    "Artificial Intelligence is a branch of computer science that aims to create \
     intelligent machines. Machine Learning is a subset of AI that enables computers \
     to learn without being explicitly programmed. Deep Learning uses neural networks \
     to model and understand complex patterns. "
        .repeat(32)
}

fn summarizer_benchmark(c: &mut Criterion) {
    let text = sample_text();

    c.bench_function("summarize_long_text", |b| {
        b.iter(|| {
            let summary = summarize(black_box(text.as_str()), 3);
            black_box(summary.len());
        });
    });
}

fn fallback_benchmark(c: &mut Criterion) {
    let text = sample_text();

    c.bench_function("fallback_entities_and_keywords", |b| {
        b.iter(|| {
            let entities = extract_entities_fallback(black_box(text.as_str()));
            let keywords = extract_keywords_fallback(black_box(text.as_str()));
            black_box((entities.len(), keywords.len()));
        });
    });
}

fn importance_benchmark(c: &mut Criterion) {
    let text = sample_text();

    c.bench_function("keyword_importance_scan", |b| {
        b.iter(|| black_box(keyword_importance(black_box("neural networks"), &text)));
    });
}

fn processor_benchmark(c: &mut Criterion) {
    let text = sample_text();
    let processor =
        DocumentProcessor::with_log(NlpBackend::Lexical, Arc::new(InMemoryDocumentLog::new()));

    c.bench_function("process_document_lexical", |b| {
        b.iter(|| {
            let doc = processor.process(black_box(text.as_str()), "bench.txt");
            black_box(doc.keywords().len());
        });
    });
}

criterion_group!(
    text_processing,
    summarizer_benchmark,
    fallback_benchmark,
    importance_benchmark,
    processor_benchmark
);
criterion_main!(text_processing);
