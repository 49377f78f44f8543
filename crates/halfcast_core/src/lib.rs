pub mod buffer;
pub mod codec;
pub mod dtype;
pub mod error;
pub mod layout;

pub use half;
