use halfcast_core::codec::Direction;
#[cfg(feature = "serde")]
use halfcast_core::error::{Error, Result};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HalfConversionParameter {
    /// `true` narrows `f32` to half, `false` widens half back to `f32`.
    pub convert_to: bool,
}

impl Default for HalfConversionParameter {
    fn default() -> Self {
        Self { convert_to: true }
    }
}

impl HalfConversionParameter {
    pub fn set_convert_to(&mut self, convert_to: bool) -> &mut Self {
        self.convert_to = convert_to;
        self
    }

    pub fn direction(&self) -> Direction {
        Direction::from_convert_to(self.convert_to)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LayerParameter {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub layer_type: String,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub half_conversion_param: Option<HalfConversionParameter>,
}

impl LayerParameter {
    pub fn new(name: impl Into<String>, layer_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            layer_type: layer_type.into(),
            half_conversion_param: None,
        }
    }

    pub fn mutable_half_conversion_param(&mut self) -> &mut HalfConversionParameter {
        self.half_conversion_param.get_or_insert_with(HalfConversionParameter::default)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NetParameter {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(rename = "layer"))]
    pub layers: Vec<LayerParameter>,
}

#[cfg(feature = "serde")]
impl LayerParameter {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| Error::DeserializationError(format!("Failed to parse layer parameter: {}", e)))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| Error::SerializationError(format!("Failed to serialize layer parameter: {}", e)))
    }
}

#[cfg(feature = "serde")]
impl NetParameter {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| Error::DeserializationError(format!("Failed to parse net parameter: {}", e)))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| Error::SerializationError(format!("Failed to serialize net parameter: {}", e)))
    }
}
