use halfcast_core::{
    codec::{self, Direction},
    error::Result,
};
use halfcast_nn::{HalfConversion, Layer, LayerParameter};
use halfcast_tensor::{
    filler::{Filler, FillerParameter, FillerType},
    Tensor,
};
use rand::{rngs::StdRng, SeedableRng};

pub const NCHW: [usize; 4] = [2, 3, 6, 4];
pub const TOLERANCE: f32 = 1e-3;

/// Standard normal fixture, seeded so failures reproduce.
pub fn gaussian_input(shape: &[usize], seed: u64) -> Result<Tensor> {
    let mut param = FillerParameter::default();
    param.set_type(FillerType::Gaussian);

    let mut tensor = Tensor::zeros(shape)?;
    Filler::from_param(&param).fill_with_rng(&mut tensor, &mut StdRng::seed_from_u64(seed))?;
    Ok(tensor)
}

/// Input for `direction`: gaussian floats, or their half encoding.
pub fn input_for(direction: Direction, shape: &[usize], seed: u64) -> Result<Tensor> {
    let floats = gaussian_input(shape, seed)?;
    match direction {
        Direction::ToHalf => Ok(floats),
        Direction::ToFloat => {
            let halves: Vec<_> = floats.to_flatten_vec::<f32>()?.into_iter().map(codec::encode).collect();
            Tensor::from_vec(halves, shape)
        }
    }
}

pub fn conversion_param(convert_to: bool) -> LayerParameter {
    let mut param = LayerParameter::new("", "HalfConversion");
    param.mutable_half_conversion_param().set_convert_to(convert_to);
    param
}

pub fn run(direction: Direction, input: &Tensor) -> Result<Tensor> {
    let mut layer = HalfConversion::with_direction(direction);
    let mut output = Tensor::empty()?;
    layer.setup(&[input], &mut [&mut output])?;
    layer.forward(&[input], &mut [&mut output])?;
    Ok(output)
}

#[macro_export]
macro_rules! test_directions {
    ([$($case:ident),* $(,)?]) => {
        $(
            mod $case {
                use super::*;
                use paste::paste;

                paste! {
                    #[test]
                    fn to_half() -> Result<()> {
                        test_functions::[<$case _test>](Direction::ToHalf)
                    }

                    #[test]
                    fn to_float() -> Result<()> {
                        test_functions::[<$case _test>](Direction::ToFloat)
                    }
                }
            }
        )*
    };
}
