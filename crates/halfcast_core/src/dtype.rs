#![allow(non_upper_case_globals)]

use half::f16;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub const float16: DType = DType::F16;
pub const float32: DType = DType::F32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DType {
    F16,
    F32,
}

impl DType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::F16 => "f16",
            Self::F32 => "f32",
        }
    }

    pub fn size_in_bytes(&self) -> usize {
        match self {
            Self::F16 => 2,
            Self::F32 => 4,
        }
    }
}

thread_local! {
    static DEFAULT_DTYPE: std::cell::Cell<DType> = const { std::cell::Cell::new(DType::F32) };
}

pub fn get_default_dtype() -> DType {
    DEFAULT_DTYPE.with(|d| d.get())
}

pub fn set_default_dtype(dtype: DType) {
    DEFAULT_DTYPE.with(|d| d.set(dtype));
}

/// A scalar type that can live in a tensor buffer.
///
/// Buffers are plain bytes in native byte order. `read_ne` and `write_ne`
/// are the only place where those bytes are reinterpreted as typed values,
/// and both expect a slice of exactly `DTYPE.size_in_bytes()` bytes.
pub trait Element: Copy + Default + Send + Sync + 'static {
    const DTYPE: DType;

    fn read_ne(bytes: &[u8]) -> Self;
    fn write_ne(self, out: &mut [u8]);
}

macro_rules! impl_element {
    ($($ty:ty => $variant:ident, $width:literal);* $(;)?) => {
        $(
            impl Element for $ty {
                const DTYPE: DType = DType::$variant;

                #[inline]
                fn read_ne(bytes: &[u8]) -> Self {
                    let mut raw = [0u8; $width];
                    raw.copy_from_slice(bytes);
                    <$ty>::from_ne_bytes(raw)
                }

                #[inline]
                fn write_ne(self, out: &mut [u8]) {
                    out.copy_from_slice(&self.to_ne_bytes());
                }
            }
        )*
    };
}

impl_element! {
    f16 => F16, 2;
    f32 => F32, 4;
}
