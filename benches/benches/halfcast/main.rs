mod codec;
mod stage;

use criterion::criterion_main;

criterion_main!(codec::benches, stage::benches);
