use crate::constants::{MAX_QUALITY, MIN_QUALITY, OPTIMIZED_SUFFIX};
use crate::error::{CompressionError, Result};
use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, RgbImage};
use std::fmt;

/// Lossy encoder quality, stored as a whole percent (80 means 0.8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quality(u8);

impl Quality {
    pub fn new(percent: u8) -> Result<Self> {
        if !(MIN_QUALITY..=MAX_QUALITY).contains(&percent) {
            return Err(CompressionError::InvalidQuality(percent));
        }
        Ok(Self(percent))
    }

    pub fn percent(self) -> u8 {
        self.0
    }

    /// The quality on the 0.0-1.0 scale.
    pub fn as_fraction(self) -> f32 {
        f32::from(self.0) / 100.0
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.as_fraction())
    }
}

/// The single format results are re-encoded into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetFormat {
    Jpeg,
}

impl TargetFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            TargetFormat::Jpeg => "jpg",
        }
    }
}

impl fmt::Display for TargetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetFormat::Jpeg => write!(f, "JPEG"),
        }
    }
}

/// Encodes a rendered surface at a given quality.
pub trait SurfaceEncoder: Send + Sync {
    fn format(&self) -> TargetFormat;

    fn encode(&self, surface: &RgbImage, quality: Quality) -> Result<Vec<u8>>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct JpegSurfaceEncoder;

impl SurfaceEncoder for JpegSurfaceEncoder {
    fn format(&self) -> TargetFormat {
        TargetFormat::Jpeg
    }

    fn encode(&self, surface: &RgbImage, quality: Quality) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        let mut encoder = JpegEncoder::new_with_quality(&mut buffer, quality.percent());
        encoder.encode(
            surface.as_raw(),
            surface.width(),
            surface.height(),
            ExtendedColorType::Rgb8,
        )?;
        Ok(buffer)
    }
}

/// Checks once that the encoder can produce output at all.
pub fn probe_encoder(encoder: &dyn SurfaceEncoder) -> Result<()> {
    let surface = RgbImage::new(1, 1);
    let quality = Quality::new(MAX_QUALITY)?;
    match encoder.encode(&surface, quality) {
        Ok(bytes) if !bytes.is_empty() => Ok(()),
        Ok(_) => Err(CompressionError::EncodeUnsupported(format!(
            "{} encoder produced no output",
            encoder.format()
        ))),
        Err(e) => Err(CompressionError::EncodeUnsupported(format!(
            "{} encoder failed: {}",
            encoder.format(),
            e
        ))),
    }
}

/// Strips the last extension from `name`. A leading dot is part of the stem.
pub fn file_stem(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) if idx > 0 => &name[..idx],
        _ => name,
    }
}

/// Name given to a re-encoded result: `photo.png` becomes `photo-optimized.jpg`.
pub fn optimized_name(original: &str, format: TargetFormat) -> String {
    format!(
        "{}{}.{}",
        file_stem(original),
        OPTIMIZED_SUFFIX,
        format.extension()
    )
}
