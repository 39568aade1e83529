//! Benchmarks for summary normalization.
//!
//! Run with: cargo bench --bench normalize_bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use summarize_server::services::gemini::GenerateContentResponse;
use summarize_server::services::normalize_summary;
use serde_json::json;

fn bench_normalize_clean_output(c: &mut Criterion) {
    let raw = "first point\nSECOND.\n- third!";

    c.bench_function("normalize_clean_output", |b| {
        b.iter(|| normalize_summary(black_box(raw)))
    });
}

fn bench_normalize_noisy_output(c: &mut Criterion) {
    let raw = format!(
        "```\n{}\n```",
        (0..50)
            .map(|i| format!("  •  line number {} of a rambling answer", i))
            .collect::<Vec<_>>()
            .join("\n\n")
    );

    c.bench_function("normalize_noisy_output", |b| {
        b.iter(|| normalize_summary(black_box(&raw)))
    });
}

fn bench_extract_response_text(c: &mut Criterion) {
    let response: GenerateContentResponse = serde_json::from_value(json!({
        "candidates": [{
            "content": {
                "role": "model",
                "parts": [
                    {"text": "Rust is a systems language.\n"},
                    {"text": "It has no garbage collector.\n"},
                    {"text": "It is memory safe."}
                ]
            },
            "finishReason": "STOP"
        }]
    }))
    .unwrap();

    c.bench_function("extract_response_text", |b| {
        b.iter(|| black_box(&response).text())
    });
}

criterion_group!(
    benches,
    bench_normalize_clean_output,
    bench_normalize_noisy_output,
    bench_extract_response_text
);
criterion_main!(benches);
