//! Option bundles.
//!
//! Options arrive as loosely typed [`Value`]s, either one at a time through
//! the `with_*` builders or in bulk as a [`Bundle`] of named values. The
//! [`EncodeConfig`] and [`DecodeConfig`] structs hold what the caller said;
//! nothing is validated until an encoder or decoder is constructed from
//! them.
//!
//! # Example
//!
//! ```
//! use jpegkit::{EncodeConfig, PixelFormat};
//!
//! let config = EncodeConfig::default()
//!     .with_pixel_format(PixelFormat::Bgrx)
//!     .with_quality(92)
//!     .with_dct_method("islow");
//! assert!(config.stride.is_none());
//! ```

use std::collections::BTreeMap;

use crate::{CodecError, DctMethod, Orientation, PixelFormat};

/// A loosely typed option value.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(untagged))]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
    Bundle(Bundle),
}

impl Value {
    /// Short name of the value's kind, for error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "boolean",
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Bundle(_) => "bundle",
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v.into())
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Int(v.into())
    }
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        // Values past i64::MAX become i64::MAX.
        Value::Int(i64::try_from(v).unwrap_or(i64::MAX))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::List(v)
    }
}

impl From<Bundle> for Value {
    fn from(v: Bundle) -> Self {
        Value::Bundle(v)
    }
}

impl From<PixelFormat> for Value {
    fn from(v: PixelFormat) -> Self {
        Value::Str(v.name().to_owned())
    }
}

impl From<DctMethod> for Value {
    fn from(v: DctMethod) -> Self {
        Value::Str(v.name().to_owned())
    }
}

impl From<Orientation> for Value {
    fn from(v: Orientation) -> Self {
        Value::Int(v.exif_value().into())
    }
}

/// Named option values.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(transparent))]
pub struct Bundle(BTreeMap<String, Value>);

impl Bundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an option, replacing any earlier value under the same name.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Bundle {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Bundle(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

fn unknown_option(name: &str) -> CodecError {
    CodecError::InvalidArgument(format!("unknown option `{name}`"))
}

/// Encoder options as supplied by the caller.
///
/// Every field is optional; omitted fields take their documented default
/// when the encoder is built.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize),
    serde(default, deny_unknown_fields)
)]
#[non_exhaustive]
pub struct EncodeConfig {
    /// Layout of the input pixels. Default `RGB`.
    pub pixel_format: Option<Value>,
    /// Quality 0-100, integer or float. Default 75.
    pub quality: Option<Value>,
    /// DCT algorithm selector. Default `FASTEST`.
    pub dct_method: Option<Value>,
    /// EXIF orientation tag 1-8 to record in the output. Default none.
    pub orientation: Option<Value>,
    /// Input row stride in bytes. Default tightly packed.
    pub stride: Option<Value>,
}

impl EncodeConfig {
    pub fn with_pixel_format(mut self, value: impl Into<Value>) -> Self {
        self.pixel_format = Some(value.into());
        self
    }

    pub fn with_quality(mut self, value: impl Into<Value>) -> Self {
        self.quality = Some(value.into());
        self
    }

    pub fn with_dct_method(mut self, value: impl Into<Value>) -> Self {
        self.dct_method = Some(value.into());
        self
    }

    pub fn with_orientation(mut self, value: impl Into<Value>) -> Self {
        self.orientation = Some(value.into());
        self
    }

    pub fn with_stride(mut self, value: impl Into<Value>) -> Self {
        self.stride = Some(value.into());
        self
    }
}

impl TryFrom<&Bundle> for EncodeConfig {
    type Error = CodecError;

    fn try_from(bundle: &Bundle) -> Result<Self, Self::Error> {
        let mut config = EncodeConfig::default();
        for (name, value) in bundle.iter() {
            let slot = match name {
                "pixel_format" => &mut config.pixel_format,
                "quality" => &mut config.quality,
                "dct_method" => &mut config.dct_method,
                "orientation" => &mut config.orientation,
                "stride" => &mut config.stride,
                _ => return Err(unknown_option(name)),
            };
            *slot = Some(value.clone());
        }
        Ok(config)
    }
}

/// Decoder options as supplied by the caller.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize),
    serde(default, deny_unknown_fields)
)]
#[non_exhaustive]
pub struct DecodeConfig {
    /// Layout of the output pixels. Default `RGB`.
    pub pixel_format: Option<Value>,
    /// Whether to apply the source's EXIF orientation. Default `false`.
    pub orientation: Option<Value>,
    /// Whether to list the source's EXIF fields in the metadata. Default
    /// `false`.
    pub exif_tags: Option<Value>,
}

impl DecodeConfig {
    pub fn with_pixel_format(mut self, value: impl Into<Value>) -> Self {
        self.pixel_format = Some(value.into());
        self
    }

    pub fn with_orientation(mut self, value: impl Into<Value>) -> Self {
        self.orientation = Some(value.into());
        self
    }

    pub fn with_exif_tags(mut self, value: impl Into<Value>) -> Self {
        self.exif_tags = Some(value.into());
        self
    }
}

impl TryFrom<&Bundle> for DecodeConfig {
    type Error = CodecError;

    fn try_from(bundle: &Bundle) -> Result<Self, Self::Error> {
        let mut config = DecodeConfig::default();
        for (name, value) in bundle.iter() {
            let slot = match name {
                "pixel_format" => &mut config.pixel_format,
                "orientation" => &mut config.orientation,
                "exif_tags" => &mut config.exif_tags,
                _ => return Err(unknown_option(name)),
            };
            *slot = Some(value.clone());
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn builder_pattern() {
        let config = EncodeConfig::default()
            .with_quality(85)
            .with_pixel_format(PixelFormat::Bgr)
            .with_orientation(Orientation::Rotate90);

        assert_eq!(config.quality, Some(Value::Int(85)));
        assert_eq!(config.pixel_format, Some(Value::Str("BGR".into())));
        assert_eq!(config.orientation, Some(Value::Int(6)));
        assert_eq!(config.stride, None);
    }

    #[test]
    fn from_bundle() {
        let bundle = Bundle::new()
            .with("quality", 50.5)
            .with("stride", 640usize);
        let config = EncodeConfig::try_from(&bundle).unwrap();
        assert_eq!(config.quality, Some(Value::Float(50.5)));
        assert_eq!(config.stride, Some(Value::Int(640)));
    }

    #[test]
    fn decode_bundle() {
        let bundle = Bundle::new()
            .with("orientation", true)
            .with("exif_tags", true);
        let config = DecodeConfig::try_from(&bundle).unwrap();
        let expected = DecodeConfig::default()
            .with_orientation(true)
            .with_exif_tags(true);
        assert_eq!(config, expected);
    }

    #[test]
    fn huge_usize_saturates() {
        assert_eq!(Value::from(usize::MAX), Value::Int(i64::MAX));
    }

    #[test]
    fn unknown_option_is_rejected() {
        let bundle = Bundle::new().with("qualty", 50);
        let err = EncodeConfig::try_from(&bundle).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Argument);

        // Encode-only options are unknown to the decoder.
        let bundle = Bundle::new().with("quality", 50);
        assert!(DecodeConfig::try_from(&bundle).is_err());
    }

    #[test]
    fn empty_bundle() {
        assert_eq!(
            EncodeConfig::try_from(&Bundle::new()).unwrap(),
            EncodeConfig::default()
        );
        assert_eq!(
            DecodeConfig::try_from(&Bundle::new()).unwrap(),
            DecodeConfig::default()
        );
    }

    #[test]
    fn bundle_from_iter() {
        let bundle: Bundle = [("pixel_format", "RGB"), ("dct_method", "FLOAT")]
            .into_iter()
            .collect();
        assert_eq!(bundle.len(), 2);
        assert_eq!(bundle.get("dct_method"), Some(&Value::Str("FLOAT".into())));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialize_json() {
        let config: EncodeConfig = serde_json::from_str(
            r#"{"pixel_format": "BGRX", "quality": 87.5, "orientation": 3, "stride": 1024}"#,
        )
        .unwrap();
        assert_eq!(config.pixel_format, Some(Value::Str("BGRX".into())));
        assert_eq!(config.quality, Some(Value::Float(87.5)));
        assert_eq!(config.orientation, Some(Value::Int(3)));
        assert_eq!(config.dct_method, None);

        let config: DecodeConfig = serde_json::from_str(r#"{"orientation": true}"#).unwrap();
        assert_eq!(config.orientation, Some(Value::Bool(true)));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialize_rejects_unknown_fields() {
        assert!(serde_json::from_str::<EncodeConfig>(r#"{"qualty": 50}"#).is_err());
        assert!(serde_json::from_str::<DecodeConfig>(r#"{"stride": 50}"#).is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialize_keeps_wrong_kinds_for_validation() {
        let config: EncodeConfig =
            serde_json::from_str(r#"{"orientation": [1, 2], "quality": "high"}"#).unwrap();
        assert_eq!(config.orientation.as_ref().map(Value::kind_name), Some("list"));
        assert_eq!(config.quality.as_ref().map(Value::kind_name), Some("string"));
    }
}
