use criterion::{criterion_group, criterion_main};


criterion_group!(benches, replay_bench::register_benchmarks);
criterion_main!(benches);
