use halfcast::prelude::*;

fn main() -> Result<()> {
    env_logger::init();

    let input = Tensor::randn(&[2, 3, 6, 4])?;

    let mut net = Sequential::new();
    net.push(Box::new(HalfConversion::with_direction(Direction::ToHalf)))?;
    net.push(Box::new(HalfConversion::with_direction(Direction::ToFloat)))?;
    net.setup(&input)?;
    let output = net.forward(&input)?.to_flatten_vec::<f32>()?;

    let max_error = input
        .to_flatten_vec::<f32>()?
        .iter()
        .zip(&output)
        .map(|(a, b)| (a - b).abs())
        .fold(0.0f32, f32::max);

    if let Some(half) = net.output(0) {
        println!(
            "{:?}: {} bytes as f32, {} bytes as f16",
            input.shape(),
            input.size_in_bytes(),
            half.size_in_bytes()
        );
    }
    println!("max round-trip error: {:e}", max_error);

    Ok(())
}
