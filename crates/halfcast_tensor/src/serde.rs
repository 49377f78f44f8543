use crate::{checked_count, Tensor};
use halfcast_core::{buffer::BufferManager, dtype::DType, error, layout::Layout};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::sync::Arc;

#[derive(Serialize, Deserialize)]
struct SerializedTensor {
    dtype: DType,
    layout: Layout,
    data: Vec<u8>,
}

impl Serialize for Tensor {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let serialized = SerializedTensor {
            dtype: self.dtype,
            layout: self.layout.clone(),
            data: self.as_bytes().to_vec(),
        };

        serialized.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Tensor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let serialized = SerializedTensor::deserialize(deserializer)?;

        let shape = serialized.layout.shape();
        let count = checked_count(shape).map_err(de::Error::custom)?;
        let expected = count
            .checked_mul(serialized.dtype.size_in_bytes())
            .ok_or_else(|| de::Error::custom(format!("byte size of {:?} overflows usize", shape)))?;
        if serialized.data.len() != expected {
            return Err(de::Error::custom(format!(
                "tensor data holds {} bytes, layout {:?} of {} needs {}",
                serialized.data.len(),
                shape,
                serialized.dtype.as_str(),
                expected
            )));
        }

        let mut buffer = BufferManager::create(count, serialized.dtype).map_err(de::Error::custom)?;
        Arc::get_mut(&mut buffer)
            .ok_or_else(|| de::Error::custom("freshly created buffer is shared"))?
            .as_bytes_mut()
            .copy_from_slice(&serialized.data);

        Ok(Tensor {
            buffer,
            dtype: serialized.dtype,
            layout: Layout::from_shape(shape),
        })
    }
}

impl Tensor {
    pub fn to_bytes(&self) -> error::Result<Vec<u8>> {
        let config = bincode::config::legacy();
        bincode::serde::encode_to_vec(self, config)
            .map_err(|e| error::Error::SerializationError(format!("Failed to serialize tensor: {}", e)))
    }

    pub fn from_bytes(bytes: &[u8]) -> error::Result<Self> {
        let config = bincode::config::legacy();
        bincode::serde::decode_from_slice(bytes, config)
            .map(|(value, _)| value)
            .map_err(|e| error::Error::DeserializationError(format!("Failed to deserialize tensor: {}", e)))
    }

    pub fn to_json(&self) -> error::Result<String> {
        serde_json::to_string(self)
            .map_err(|e| error::Error::SerializationError(format!("Failed to serialize tensor to JSON: {}", e)))
    }

    pub fn from_json(json: &str) -> error::Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| error::Error::DeserializationError(format!("Failed to deserialize tensor from JSON: {}", e)))
    }
}
