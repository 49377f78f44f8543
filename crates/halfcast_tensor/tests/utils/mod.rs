use halfcast_core::error::Result;
use halfcast_tensor::{Filler, Tensor};
use rand::{rngs::StdRng, SeedableRng};

pub const NCHW: [usize; 4] = [2, 3, 6, 4];

pub fn gaussian(shape: &[usize], seed: u64) -> Result<Tensor> {
    let mut tensor = Tensor::zeros(shape)?;
    Filler::Gaussian { mean: 0.0, std: 1.0 }.fill_with_rng(&mut tensor, &mut StdRng::seed_from_u64(seed))?;
    Ok(tensor)
}
