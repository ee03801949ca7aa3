use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use alchemist::{
    codec,
    core::evaluator::evaluate,
    recipe::{Recipe, TransformStep},
    types::{RecipeName, TransformId},
};

fn mirrored_pipeline(depth: usize) -> Vec<TransformStep> {
    let forward: Vec<TransformStep> = TransformId::ALL
        .iter()
        .cycle()
        .take(depth)
        .map(|id| TransformStep::forward(*id))
        .collect();
    let mut steps = forward.clone();
    steps.extend(forward.iter().rev().map(|s| TransformStep::inverse(s.transform)));
    steps
}

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate_mirrored");
    let base = "flag{the quick brown fox jumps over the lazy dog}".repeat(8);
    for depth in [1usize, 3, 5] {
        let steps = mirrored_pipeline(depth);
        group.bench_with_input(BenchmarkId::from_parameter(depth), &steps, |b, steps| {
            b.iter(|| {
                let eval = evaluate(Some(base.as_str()), steps);
                assert!(eval.is_complete());
            });
        });
    }
    group.finish();
}

fn bench_codec(c: &mut Criterion) {
    let mut recipe = Recipe::new(RecipeName::new("bench").expect("name"));
    recipe.base_value = Some("x".repeat(4096));
    recipe.steps = mirrored_pipeline(50);
    let bytes = codec::encode(&recipe).expect("encode");

    c.bench_function("codec_encode_100_steps", |b| {
        b.iter(|| codec::encode(&recipe).expect("encode"));
    });
    c.bench_function("codec_decode_100_steps", |b| {
        b.iter(|| codec::decode(&bytes, "bench").expect("decode"));
    });
}

criterion_group!(benches, bench_evaluate, bench_codec);
criterion_main!(benches);
