use criterion::{black_box, criterion_group, criterion_main, Criterion};

use medgraph::retrieval::{format_path, parse_entity_list, render_chunks};
use medgraph::{ChunkRecord, PathDirection, PathRecord, PathStep};

fn parser_benchmark(c: &mut Criterion) {
    let entities: Vec<String> = (0..128).map(|i| format!("\"entity {i}\"")).collect();
    let response = format!("Here you go: [{}]", entities.join(", "));

    c.bench_function("parse_entity_list_long_response", |b| {
        b.iter(|| {
            let parsed = parse_entity_list(black_box(&response)).unwrap();
            black_box(parsed.len());
        });
    });
}

fn path_format_benchmark(c: &mut Criterion) {
    let nodes: Vec<String> = (0..64).map(|i| format!("node_{i}")).collect();
    let steps: Vec<PathStep> = (0..63)
        .map(|i| PathStep {
            rel_type: "RELATES_TO".to_string(),
            direction: if i % 2 == 0 {
                PathDirection::Outgoing
            } else {
                PathDirection::Incoming
            },
        })
        .collect();
    let path = PathRecord {
        start: nodes[0].clone(),
        steps,
        nodes,
    };

    c.bench_function("format_path_deep_alternating", |b| {
        b.iter(|| {
            let rendered = format_path(black_box(&path));
            black_box(rendered.len());
        });
    });
}

fn chunk_render_benchmark(c: &mut Criterion) {
    let chunks: Vec<ChunkRecord> = (0..8)
        .map(|i| {
            ChunkRecord::new(
                format!("doc{i}.txt"),
                "Lisinopril treats hypertension. ".repeat(16),
            )
        })
        .collect();

    c.bench_function("render_chunks_full_cap", |b| {
        b.iter(|| {
            let rendered = render_chunks(black_box(&chunks));
            black_box(rendered.len());
        });
    });
}

criterion_group!(
    benches,
    parser_benchmark,
    path_format_benchmark,
    chunk_render_benchmark
);
criterion_main!(benches);
