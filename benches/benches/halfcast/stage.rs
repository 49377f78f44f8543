use criterion::{black_box, criterion_group, Criterion};
use halfcast_core::codec::Direction;
use halfcast_nn::{HalfConversion, Layer};
use halfcast_tensor::Tensor;

const SHAPES: [([usize; 4], &str); 2] = [([2, 3, 6, 4], "small"), ([32, 64, 28, 28], "large")];

pub fn basic(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("stage");
    group.warm_up_time(core::time::Duration::from_millis(500));
    group.measurement_time(core::time::Duration::from_secs(3));
    group.sample_size(50);

    for (shape, label) in SHAPES {
        let input = Tensor::randn(&shape).unwrap();
        let mut to_half = HalfConversion::with_direction(Direction::ToHalf);
        let mut half = Tensor::empty().unwrap();
        to_half.setup(&[&input], &mut [&mut half]).unwrap();

        group.bench_function(format!("to_half/{}", label), |b| {
            b.iter(|| to_half.forward(&[black_box(&input)], &mut [&mut half]).unwrap())
        });

        let mut to_float = HalfConversion::with_direction(Direction::ToFloat);
        let mut widened = Tensor::empty().unwrap();
        to_float.setup(&[&half], &mut [&mut widened]).unwrap();

        group.bench_function(format!("to_float/{}", label), |b| {
            b.iter(|| to_float.forward(&[black_box(&half)], &mut [&mut widened]).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, basic);
