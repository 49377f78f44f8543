//! Conversion between `f32` and IEEE 754 binary16.
//!
//! Encoding rounds to nearest with ties to even. Magnitudes that round past
//! the largest finite half (65504) saturate to infinity of the same sign,
//! magnitudes below half of the smallest subnormal (2^-25) flush to a signed
//! zero, and NaN stays NaN with its sign kept. Decoding is an exact widening:
//! every half value has an `f32` counterpart.
//!
//! The byte-level helpers are the explicit reinterpretation step used by
//! tensor stages: they read `count` elements at one width from a raw byte
//! buffer and write `count` elements at the other width, after checking both
//! buffers against `count * width`.

use crate::{
    dtype::{DType, Element},
    error::{Error, Result},
};
use half::{f16, slice::HalfFloatSliceExt};
use rayon::prelude::*;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Element counts at or above this are split across the rayon pool.
pub const PARALLEL_THRESHOLD: usize = 1 << 14;
const MIN_CHUNK: usize = 4096;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    ToHalf,
    ToFloat,
}

impl Direction {
    /// `convert_to = true` narrows to half, `false` widens back to float.
    pub fn from_convert_to(convert_to: bool) -> Self {
        if convert_to {
            Self::ToHalf
        } else {
            Self::ToFloat
        }
    }

    pub fn input_dtype(&self) -> DType {
        match self {
            Self::ToHalf => DType::F32,
            Self::ToFloat => DType::F16,
        }
    }

    pub fn output_dtype(&self) -> DType {
        match self {
            Self::ToHalf => DType::F16,
            Self::ToFloat => DType::F32,
        }
    }

    pub fn inverse(&self) -> Self {
        match self {
            Self::ToHalf => Self::ToFloat,
            Self::ToFloat => Self::ToHalf,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ToHalf => "to_half",
            Self::ToFloat => "to_float",
        }
    }
}

#[inline]
pub fn encode(value: f32) -> f16 {
    f16::from_f32(value)
}

#[inline]
pub fn decode(value: f16) -> f32 {
    value.to_f32()
}

#[inline]
pub fn encode_bits(value: f32) -> u16 {
    encode(value).to_bits()
}

#[inline]
pub fn decode_bits(bits: u16) -> f32 {
    decode(f16::from_bits(bits))
}

/// Largest `|decode(encode(x)) - x|` allowed for a finite `x` inside the
/// half range: half an ulp at `x`'s binade, or half the subnormal spacing
/// for values below the normal range.
pub fn tolerance(x: f32) -> f32 {
    let magnitude = x.abs();
    if magnitude < f16::MIN_POSITIVE.to_f32() {
        return f16::MIN_POSITIVE_SUBNORMAL.to_f32() / 2.0;
    }
    let exponent = magnitude.log2().floor();
    (exponent - 11.0).exp2()
}

pub fn encode_slice(src: &[f32], dst: &mut [f16]) -> Result<()> {
    check_len(src.len(), dst.len(), DType::F16)?;

    if src.len() >= PARALLEL_THRESHOLD {
        dst.par_chunks_mut(MIN_CHUNK)
            .zip(src.par_chunks(MIN_CHUNK))
            .for_each(|(out, inp)| out.convert_from_f32_slice(inp));
    } else {
        dst.convert_from_f32_slice(src);
    }
    Ok(())
}

pub fn decode_slice(src: &[f16], dst: &mut [f32]) -> Result<()> {
    check_len(src.len(), dst.len(), DType::F32)?;

    if src.len() >= PARALLEL_THRESHOLD {
        dst.par_chunks_mut(MIN_CHUNK)
            .zip(src.par_chunks(MIN_CHUNK))
            .for_each(|(out, inp)| inp.convert_to_f32_slice(out));
    } else {
        src.convert_to_f32_slice(dst);
    }
    Ok(())
}

/// Reads `count` native-order `f32`s from `src` and writes their half
/// encodings into `dst`.
pub fn encode_bytes(src: &[u8], dst: &mut [u8], count: usize) -> Result<()> {
    convert_bytes::<f32, f16>(src, dst, count, encode)
}

/// Reads `count` native-order halves from `src` and writes the widened
/// `f32`s into `dst`.
pub fn decode_bytes(src: &[u8], dst: &mut [u8], count: usize) -> Result<()> {
    convert_bytes::<f16, f32>(src, dst, count, decode)
}

/// Runs `direction` over raw byte buffers holding `count` elements.
pub fn convert_bytes_in(direction: Direction, src: &[u8], dst: &mut [u8], count: usize) -> Result<()> {
    match direction {
        Direction::ToHalf => encode_bytes(src, dst, count),
        Direction::ToFloat => decode_bytes(src, dst, count),
    }
}

fn convert_bytes<I, O>(src: &[u8], dst: &mut [u8], count: usize, op: fn(I) -> O) -> Result<()>
where
    I: Element,
    O: Element,
{
    let in_width = I::DTYPE.size_in_bytes();
    let out_width = O::DTYPE.size_in_bytes();
    check_bytes(src.len(), count, in_width)?;
    check_bytes(dst.len(), count, out_width)?;

    let convert = |(out, inp): (&mut [u8], &[u8])| op(I::read_ne(inp)).write_ne(out);

    if count >= PARALLEL_THRESHOLD {
        dst.par_chunks_exact_mut(out_width)
            .zip(src.par_chunks_exact(in_width))
            .with_min_len(MIN_CHUNK)
            .for_each(convert);
    } else {
        dst.chunks_exact_mut(out_width).zip(src.chunks_exact(in_width)).for_each(convert);
    }
    Ok(())
}

fn check_bytes(len: usize, count: usize, width: usize) -> Result<()> {
    let expected = count
        .checked_mul(width)
        .ok_or_else(|| Error::InvalidArgument(format!("Element count {} overflows byte size", count)))?;
    if len != expected {
        return Err(Error::BufferSize { expected, got: len });
    }
    Ok(())
}

fn check_len(src: usize, dst: usize, dst_dtype: DType) -> Result<()> {
    if src != dst {
        let width = dst_dtype.size_in_bytes();
        return Err(Error::BufferSize {
            expected: src * width,
            got: dst * width,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const F16_MAX: f32 = 65504.0;

    #[test]
    fn specials_survive() {
        assert_eq!(decode(encode(f32::INFINITY)), f32::INFINITY);
        assert_eq!(decode(encode(f32::NEG_INFINITY)), f32::NEG_INFINITY);
        assert!(decode(encode(f32::NAN)).is_nan());
        assert!(decode(encode(-f32::NAN)).is_sign_negative());
        assert!(encode(f32::NAN).is_nan());
    }

    #[test]
    fn overflow_saturates_to_infinity() {
        assert_eq!(decode(encode(F16_MAX)), F16_MAX);
        // 65519 is still closer to 65504 than to the next step at 65536.
        assert_eq!(decode(encode(65519.0)), F16_MAX);
        assert_eq!(encode(65520.0), f16::INFINITY);
        assert_eq!(encode(-65520.0), f16::NEG_INFINITY);
        assert_eq!(encode(f32::MAX), f16::INFINITY);
        assert_eq!(encode(f32::MIN), f16::NEG_INFINITY);
    }

    #[test]
    fn underflow_flushes_to_signed_zero() {
        let smallest = f16::MIN_POSITIVE_SUBNORMAL.to_f32();
        assert_eq!(smallest, 2f32.powi(-24));
        assert_eq!(decode(encode(smallest)), smallest);
        assert_eq!(decode(encode(-smallest)), -smallest);

        assert_eq!(encode_bits(2f32.powi(-26)), 0x0000);
        assert_eq!(encode_bits(-2f32.powi(-26)), 0x8000);
        assert_eq!(encode_bits(f32::MIN_POSITIVE), 0x0000);
        assert_eq!(encode_bits(-f32::MIN_POSITIVE), 0x8000);
    }

    #[test]
    fn ties_round_to_even() {
        let ulp = 2f32.powi(-10);
        // halfway between 1.0 (even) and 1.0 + ulp (odd)
        assert_eq!(decode(encode(1.0 + ulp / 2.0)), 1.0);
        // halfway between 1.0 + ulp (odd) and 1.0 + 2ulp (even)
        assert_eq!(decode(encode(1.0 + 1.5 * ulp)), 1.0 + 2.0 * ulp);
        // just above the halfway point rounds up
        assert_eq!(decode(encode(1.0 + ulp / 2.0 + 2f32.powi(-20))), 1.0 + ulp);
    }

    #[test]
    fn known_bit_patterns() {
        assert_eq!(encode_bits(1.0), 0x3c00);
        assert_eq!(encode_bits(-2.0), 0xc000);
        assert_eq!(encode_bits(0.5), 0x3800);
        assert_eq!(encode_bits(F16_MAX), 0x7bff);
        assert_eq!(encode_bits(f32::INFINITY), 0x7c00);
        assert_eq!(decode_bits(0x3555), 0.333_251_95);
        assert_eq!(decode_bits(0x0001), 2f32.powi(-24));
    }

    #[test]
    fn decode_is_exact_for_every_pattern() {
        for bits in 0..=u16::MAX {
            let widened = decode_bits(bits);
            if widened.is_nan() {
                assert!(f16::from_bits(bits).is_nan());
                assert!(encode(widened).is_nan());
            } else {
                assert_eq!(encode_bits(widened), bits, "pattern {:#06x}", bits);
            }
        }
    }

    #[test]
    fn round_trip_within_tolerance() {
        let mut x = -F16_MAX;
        while x <= F16_MAX {
            let error = (decode(encode(x)) - x).abs();
            assert!(error <= tolerance(x), "x = {}, error = {}", x, error);
            x += 12.345;
        }
        for i in -2000..2000 {
            let x = i as f32 * 1.7e-3;
            assert!((decode(encode(x)) - x).abs() <= tolerance(x));
            assert!((decode(encode(x)) - x).abs() < 1e-3);
        }
    }

    #[test]
    fn slices_match_scalar_path() -> Result<()> {
        let n = PARALLEL_THRESHOLD + 17;
        let src: Vec<f32> = (0..n).map(|i| (i as f32 - n as f32 / 2.0) * 0.013).collect();

        let mut halves = vec![f16::ZERO; n];
        encode_slice(&src, &mut halves)?;
        assert!(halves.iter().zip(&src).all(|(h, &x)| h.to_bits() == encode_bits(x)));

        let mut widened = vec![0.0f32; n];
        decode_slice(&halves, &mut widened)?;
        assert!(widened.iter().zip(&halves).all(|(&w, &h)| w == decode(h)));

        assert!(encode_slice(&src, &mut halves[..10]).is_err());
        assert!(decode_slice(&halves[..10], &mut widened).is_err());

        Ok(())
    }

    #[test]
    fn bytes_round_trip() -> Result<()> {
        for n in [0usize, 5, PARALLEL_THRESHOLD + 3] {
            let values: Vec<f32> = (0..n).map(|i| (i % 97) as f32 * 0.25 - 12.0).collect();
            let src: Vec<u8> = values.iter().flat_map(|v| v.to_ne_bytes()).collect();

            let mut halves = vec![0u8; n * 2];
            convert_bytes_in(Direction::ToHalf, &src, &mut halves, n)?;
            let mut widened = vec![0u8; n * 4];
            convert_bytes_in(Direction::ToFloat, &halves, &mut widened, n)?;

            // every value here is exactly representable in half
            assert_eq!(widened, src);
        }
        Ok(())
    }

    #[test]
    fn bytes_are_bounds_checked() {
        let src = vec![0u8; 16];
        let mut dst = vec![0u8; 6];
        assert!(matches!(
            encode_bytes(&src, &mut dst, 4),
            Err(Error::BufferSize { expected: 8, got: 6 })
        ));
        assert!(matches!(
            encode_bytes(&src[..12], &mut dst, 4),
            Err(Error::BufferSize { expected: 16, got: 12 })
        ));
        assert!(matches!(
            decode_bytes(&src[..6], &mut vec![0u8; 16], 4),
            Err(Error::BufferSize { expected: 8, got: 6 })
        ));
    }

    #[test]
    fn direction_dtypes() {
        assert_eq!(Direction::from_convert_to(true), Direction::ToHalf);
        assert_eq!(Direction::from_convert_to(false), Direction::ToFloat);
        assert_eq!(Direction::ToHalf.input_dtype(), DType::F32);
        assert_eq!(Direction::ToHalf.output_dtype(), DType::F16);
        assert_eq!(Direction::ToHalf.inverse(), Direction::ToFloat);
        assert_eq!(Direction::ToFloat.output_dtype(), DType::F32);
    }
}
