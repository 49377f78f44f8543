use criterion::{black_box, criterion_group, Criterion, Throughput};
use halfcast_core::{codec, half::f16};

// Below and above the parallel threshold.
const SIZES: [(usize, &str); 3] = [(1_000, "small"), (10_000, "medium"), (1_000_000, "large")];

pub fn basic(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("codec");
    group.warm_up_time(core::time::Duration::from_millis(500));
    group.measurement_time(core::time::Duration::from_secs(3));
    group.sample_size(50);

    for &(size, label) in &SIZES {
        let floats: Vec<f32> = (0..size).map(|i| (i % 1000) as f32 / 37.0 - 13.0).collect();
        let bytes: Vec<u8> = floats.iter().flat_map(|v| v.to_ne_bytes()).collect();
        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("encode_slice/{}", label), |b| {
            let mut out = vec![f16::ZERO; size];
            b.iter(|| codec::encode_slice(black_box(&floats), &mut out).unwrap())
        });

        group.bench_function(format!("encode_bytes/{}", label), |b| {
            let mut out = vec![0u8; size * 2];
            b.iter(|| codec::encode_bytes(black_box(&bytes), &mut out, size).unwrap())
        });

        let mut halves = vec![0u8; size * 2];
        codec::encode_bytes(&bytes, &mut halves, size).unwrap();
        group.bench_function(format!("decode_bytes/{}", label), |b| {
            let mut out = vec![0u8; size * 4];
            b.iter(|| codec::decode_bytes(black_box(&halves), &mut out, size).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, basic);
