use crate::dtype::DType;
use std::fmt;

#[derive(Debug)]
pub enum Error {
    Configuration {
        message: String,
    },
    UninitializedStage {
        layer: String,
    },
    ShapeMismatch {
        expected: Vec<usize>,
        got: Vec<usize>,
        msg: String,
    },
    DTypeMismatch {
        expected: DType,
        got: DType,
    },
    BufferSize {
        expected: usize,
        got: usize,
    },
    BufferShared,
    UnsupportedBackward {
        layer: String,
    },
    InvalidArgument(String),
    InvalidShape {
        message: String,
    },
    // serde
    #[cfg(feature = "serde")]
    SerializationError(String),
    #[cfg(feature = "serde")]
    DeserializationError(String),
    //
    External {
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration { message } => write!(f, "Configuration error: {}", message),
            Self::UninitializedStage { layer } => {
                write!(f, "Uninitialized stage: {} must be configured and set up before use", layer)
            }
            Self::ShapeMismatch { expected, got, msg } => {
                write!(f, "Shape mismatch ({}): expected {:?}, got {:?}", msg, expected, got)
            }
            Self::DTypeMismatch { expected, got } => {
                write!(f, "DType mismatch: expected {:?}, got {:?}", expected, got)
            }
            Self::BufferSize { expected, got } => {
                write!(f, "Buffer size mismatch: expected {} bytes, got {} bytes", expected, got)
            }
            Self::BufferShared => write!(f, "Buffer is shared"),
            Self::UnsupportedBackward { layer } => {
                write!(f, "Backward is not supported by layer {}", layer)
            }
            Self::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            Self::InvalidShape { message } => write!(f, "Invalid shape: {}", message),
            #[cfg(feature = "serde")]
            Self::SerializationError(msg) => write!(f, "Serialization error: {}", msg),
            #[cfg(feature = "serde")]
            Self::DeserializationError(msg) => write!(f, "Deserialization error: {}", msg),
            Self::External { message } => write!(f, "External error: {}", message),
        }
    }
}

impl std::error::Error for Error {}
