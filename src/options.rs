//! Option validation.
//!
//! Turns caller-supplied [`EncodeConfig`] / [`DecodeConfig`] values into
//! validated, immutable [`EncodeOptions`] / [`DecodeOptions`]. Options are
//! checked in a fixed order (width, height, pixel format, quality, DCT
//! method, orientation, stride) and the first failure is reported.

use crate::config::Value;
use crate::limits::JPEG_MAX_DIMENSION;
use crate::{Bundle, CodecError, DecodeConfig, EncodeConfig, Orientation, PixelFormat};

/// Default encode quality.
pub const DEFAULT_QUALITY: u8 = 75;

/// DCT algorithm selector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DctMethod {
    #[default]
    Fastest,
    IntegerSlow,
    IntegerFast,
    Float,
}

impl DctMethod {
    /// Look up a selector by name, ignoring ASCII case.
    pub fn from_name(name: &str) -> Result<Self, CodecError> {
        [
            DctMethod::Fastest,
            DctMethod::IntegerSlow,
            DctMethod::IntegerFast,
            DctMethod::Float,
        ]
        .into_iter()
        .find(|m| m.name().eq_ignore_ascii_case(name))
        .ok_or_else(|| CodecError::InvalidArgument(format!("unknown dct method `{name}`")))
    }

    pub fn name(self) -> &'static str {
        match self {
            DctMethod::Fastest => "FASTEST",
            DctMethod::IntegerSlow => "ISLOW",
            DctMethod::IntegerFast => "IFAST",
            DctMethod::Float => "FLOAT",
        }
    }
}

/// Validated encoder settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodeOptions {
    width: u32,
    height: u32,
    pixel_format: PixelFormat,
    quality: u8,
    dct_method: DctMethod,
    orientation: Option<Orientation>,
    stride: usize,
}

impl EncodeOptions {
    /// Validate an encoder configuration.
    pub fn new(width: &Value, height: &Value, config: &EncodeConfig) -> Result<Self, CodecError> {
        let width = dimension("width", width)?;
        let height = dimension("height", height)?;
        let pixel_format = pixel_format(config.pixel_format.as_ref())?;
        let quality = quality(config.quality.as_ref())?;
        let dct_method = dct_method(config.dct_method.as_ref())?;
        let orientation = orientation_tag(config.orientation.as_ref())?;
        let stride = stride(config.stride.as_ref(), width, height, pixel_format)?;

        Ok(Self {
            width,
            height,
            pixel_format,
            quality,
            dct_method,
            orientation,
            stride,
        })
    }

    /// Validate a positional argument list: width, height and an optional
    /// bundle of named options.
    pub fn from_args(args: &[Value]) -> Result<Self, CodecError> {
        let config = match args {
            [_, _] => EncodeConfig::default(),
            [_, _, Value::Bundle(bundle)] => EncodeConfig::try_from(bundle)?,
            [_, _, other] => {
                return Err(CodecError::InvalidArgument(format!(
                    "expected an option bundle as third argument, got {}",
                    other.kind_name()
                )));
            }
            _ => {
                return Err(CodecError::InvalidArgument(format!(
                    "wrong number of arguments (given {}, expected 2..3)",
                    args.len()
                )));
            }
        };
        Self::new(&args[0], &args[1], &config)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel_format(&self) -> PixelFormat {
        self.pixel_format
    }

    /// Quality as an integer percentage.
    pub fn quality(&self) -> u8 {
        self.quality
    }

    pub fn dct_method(&self) -> DctMethod {
        self.dct_method
    }

    /// Orientation tag recorded in the output, if any.
    pub fn orientation(&self) -> Option<Orientation> {
        self.orientation
    }

    /// Byte distance between input rows.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Bytes in one tightly packed input row.
    pub fn row_bytes(&self) -> usize {
        self.width as usize * self.pixel_format.bytes_per_pixel()
    }
}

/// Validated decoder settings.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    pixel_format: PixelFormat,
    apply_orientation: bool,
    exif_tags: bool,
}

impl DecodeOptions {
    /// Validate a decoder configuration.
    pub fn new(config: &DecodeConfig) -> Result<Self, CodecError> {
        let pixel_format = pixel_format(config.pixel_format.as_ref())?;
        let apply_orientation = flag("orientation", config.orientation.as_ref())?;
        let exif_tags = flag("exif_tags", config.exif_tags.as_ref())?;
        Ok(Self {
            pixel_format,
            apply_orientation,
            exif_tags,
        })
    }

    /// Validate a positional argument list: at most one bundle of named
    /// options.
    pub fn from_args(args: &[Value]) -> Result<Self, CodecError> {
        match args {
            [] => Self::new(&DecodeConfig::default()),
            [Value::Bundle(bundle)] => Self::new(&DecodeConfig::try_from(bundle)?),
            [other] => Err(CodecError::InvalidArgument(format!(
                "expected an option bundle, got {}",
                other.kind_name()
            ))),
            _ => Err(CodecError::InvalidArgument(format!(
                "wrong number of arguments (given {}, expected 0..1)",
                args.len()
            ))),
        }
    }

    pub fn pixel_format(&self) -> PixelFormat {
        self.pixel_format
    }

    /// Whether the source EXIF orientation is applied to decoded pixels.
    pub fn apply_orientation(&self) -> bool {
        self.apply_orientation
    }

    /// Whether decoded metadata lists the source's EXIF fields.
    pub fn exif_tags(&self) -> bool {
        self.exif_tags
    }
}

impl TryFrom<&Bundle> for DecodeOptions {
    type Error = CodecError;

    fn try_from(bundle: &Bundle) -> Result<Self, Self::Error> {
        Self::new(&DecodeConfig::try_from(bundle)?)
    }
}

fn flag(name: &'static str, value: Option<&Value>) -> Result<bool, CodecError> {
    match value {
        None => Ok(false),
        Some(&Value::Bool(b)) => Ok(b),
        Some(_) => Err(CodecError::invalid_type(name, "a boolean")),
    }
}

fn dimension(name: &'static str, value: &Value) -> Result<u32, CodecError> {
    let v = match *value {
        Value::Int(v) => v,
        Value::Float(f) if f.is_finite() && f.fract() == 0.0 => {
            if f.abs() > f64::from(u32::MAX) {
                return Err(CodecError::out_of_range(name, format!("{f} is too large")));
            }
            f as i64
        }
        Value::Float(f) => {
            return Err(CodecError::out_of_range(
                name,
                format!("{f} is not a whole number"),
            ));
        }
        _ => return Err(CodecError::invalid_type(name, "an integer")),
    };
    if v <= 0 {
        return Err(CodecError::out_of_range(name, format!("{v} is not positive")));
    }
    if v > i64::from(JPEG_MAX_DIMENSION) {
        return Err(CodecError::out_of_range(
            name,
            format!("{v} exceeds the JPEG limit of {JPEG_MAX_DIMENSION}"),
        ));
    }
    Ok(v as u32)
}

fn pixel_format(value: Option<&Value>) -> Result<PixelFormat, CodecError> {
    match value {
        None => Ok(PixelFormat::default()),
        Some(Value::Str(name)) => PixelFormat::from_name(name),
        Some(_) => Err(CodecError::invalid_type("pixel_format", "a format name")),
    }
}

fn quality(value: Option<&Value>) -> Result<u8, CodecError> {
    match value {
        None => Ok(DEFAULT_QUALITY),
        Some(&Value::Int(q)) => match u8::try_from(q) {
            Ok(q) if q <= 100 => Ok(q),
            _ => Err(CodecError::out_of_range("quality", format!("{q} is not within 0..=100"))),
        },
        Some(&Value::Float(q)) => {
            if !q.is_finite() {
                return Err(CodecError::InvalidArgument(format!(
                    "quality must be finite, got {q}"
                )));
            }
            if !(0.0..=100.0).contains(&q) {
                return Err(CodecError::out_of_range(
                    "quality",
                    format!("{q} is not within 0..=100"),
                ));
            }
            Ok(q.trunc() as u8)
        }
        Some(_) => Err(CodecError::invalid_type("quality", "a number")),
    }
}

fn dct_method(value: Option<&Value>) -> Result<DctMethod, CodecError> {
    match value {
        None => Ok(DctMethod::default()),
        Some(Value::Str(name)) => DctMethod::from_name(name),
        Some(_) => Err(CodecError::invalid_type("dct_method", "a method name")),
    }
}

fn orientation_tag(value: Option<&Value>) -> Result<Option<Orientation>, CodecError> {
    match value {
        None => Ok(None),
        Some(&Value::Int(v)) => Orientation::try_from(v).map(Some),
        Some(_) => Err(CodecError::invalid_type("orientation", "an integer")),
    }
}

/// Largest accepted stride in bytes.
pub const MAX_STRIDE: usize = i32::MAX as usize;

fn stride(
    value: Option<&Value>,
    width: u32,
    height: u32,
    format: PixelFormat,
) -> Result<usize, CodecError> {
    let row_bytes = width as usize * format.bytes_per_pixel();
    let stride = match value {
        None => row_bytes,
        Some(&Value::Int(v)) => {
            let Some(stride) = usize::try_from(v).ok().filter(|&s| s >= row_bytes) else {
                return Err(CodecError::out_of_range(
                    "stride",
                    format!("{v} is smaller than the packed row size {row_bytes}"),
                ));
            };
            if stride > MAX_STRIDE {
                return Err(CodecError::out_of_range(
                    "stride",
                    format!("{v} exceeds the maximum of {MAX_STRIDE}"),
                ));
            }
            stride
        }
        Some(_) => return Err(CodecError::invalid_type("stride", "an integer")),
    };
    crate::stride::full_len(height as usize, stride)?;
    Ok(stride)
}
