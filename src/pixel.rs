//! Pixel format registry.
//!
//! A closed set of in-memory pixel layouts, each with a fixed channel count
//! and the color space the codec engine consumes it as. Several names alias
//! the same layout.

use crate::CodecError;

/// In-memory pixel layout of a raw buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// 8-bit R, G, B.
    #[default]
    Rgb,
    /// 8-bit B, G, R.
    Bgr,
    /// 8-bit R, G, B plus one ignored padding byte.
    Rgbx,
    /// 8-bit B, G, R plus one ignored padding byte.
    Bgrx,
    /// 8-bit Y, Cb, Cr, no chroma subsampling.
    YCbCr,
    /// 8-bit luma.
    Grayscale,
}

/// Color space a buffer is handed to the codec engine in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CodecColorSpace {
    Grayscale,
    Rgb,
    Bgr,
    Rgbx,
    Bgrx,
    YCbCr,
}

impl PixelFormat {
    /// Every accepted format name, aliases included.
    pub const ALL_NAMES: [&'static str; 11] = [
        "RGB",
        "RGB24",
        "BGR",
        "BGR24",
        "YUV444",
        "YCbCr",
        "RGBX",
        "RGB32",
        "BGRX",
        "BGR32",
        "GRAYSCALE",
    ];

    /// Look up a layout by name. Matching is case-sensitive.
    pub fn from_name(name: &str) -> Result<Self, CodecError> {
        match name {
            "RGB" | "RGB24" => Ok(PixelFormat::Rgb),
            "BGR" | "BGR24" => Ok(PixelFormat::Bgr),
            "YUV444" | "YCbCr" => Ok(PixelFormat::YCbCr),
            "RGBX" | "RGB32" => Ok(PixelFormat::Rgbx),
            "BGRX" | "BGR32" => Ok(PixelFormat::Bgrx),
            "GRAYSCALE" => Ok(PixelFormat::Grayscale),
            _ => Err(CodecError::InvalidArgument(format!(
                "unknown pixel format `{name}`"
            ))),
        }
    }

    /// Canonical name of this layout.
    pub fn name(self) -> &'static str {
        match self {
            PixelFormat::Rgb => "RGB",
            PixelFormat::Bgr => "BGR",
            PixelFormat::Rgbx => "RGBX",
            PixelFormat::Bgrx => "BGRX",
            PixelFormat::YCbCr => "YCbCr",
            PixelFormat::Grayscale => "GRAYSCALE",
        }
    }

    /// Number of channels stored per pixel, padding included.
    pub fn num_components(self) -> usize {
        match self {
            PixelFormat::Grayscale => 1,
            PixelFormat::Rgb | PixelFormat::Bgr | PixelFormat::YCbCr => 3,
            PixelFormat::Rgbx | PixelFormat::Bgrx => 4,
        }
    }

    /// Bytes per pixel. All layouts are 8 bits per channel.
    pub fn bytes_per_pixel(self) -> usize {
        self.num_components()
    }

    /// Native codec color space for this layout.
    pub fn codec_color_space(self) -> CodecColorSpace {
        match self {
            PixelFormat::Rgb => CodecColorSpace::Rgb,
            PixelFormat::Bgr => CodecColorSpace::Bgr,
            PixelFormat::Rgbx => CodecColorSpace::Rgbx,
            PixelFormat::Bgrx => CodecColorSpace::Bgrx,
            PixelFormat::YCbCr => CodecColorSpace::YCbCr,
            PixelFormat::Grayscale => CodecColorSpace::Grayscale,
        }
    }
}

impl core::fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

impl core::str::FromStr for PixelFormat {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn every_name_resolves() {
        for name in PixelFormat::ALL_NAMES {
            let format = PixelFormat::from_name(name).unwrap();
            assert!(matches!(format.bytes_per_pixel(), 1 | 3 | 4), "{name}");
        }
    }

    #[test]
    fn aliases() {
        assert_eq!(PixelFormat::from_name("RGB24").unwrap(), PixelFormat::Rgb);
        assert_eq!(PixelFormat::from_name("BGR32").unwrap(), PixelFormat::Bgrx);
        assert_eq!(
            PixelFormat::from_name("YUV444").unwrap(),
            PixelFormat::from_name("YCbCr").unwrap()
        );
    }

    #[test]
    fn canonical_name_roundtrips() {
        for name in PixelFormat::ALL_NAMES {
            let format = PixelFormat::from_name(name).unwrap();
            assert_eq!(PixelFormat::from_name(format.name()).unwrap(), format);
        }
    }

    #[test]
    fn case_sensitive() {
        let err = PixelFormat::from_name("rgb").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Argument);
        assert!(PixelFormat::from_name("ycbcr").is_err());
        assert!(PixelFormat::from_name("XBGR").is_err());
    }

    #[test]
    fn color_spaces() {
        assert_eq!(PixelFormat::Grayscale.codec_color_space(), CodecColorSpace::Grayscale);
        assert_eq!(PixelFormat::Bgrx.codec_color_space(), CodecColorSpace::Bgrx);
        assert_eq!(PixelFormat::Rgbx.bytes_per_pixel(), 4);
        assert_eq!(PixelFormat::default(), PixelFormat::Rgb);
    }
}
