use crate::constants::{
    DEFAULT_QUALITY_FLOOR, DEFAULT_QUALITY_STEP, DEFAULT_START_QUALITY, DOWNSCALE_MAX_WIDTH,
};
use crate::error::{CompressionError, Result};
use crate::formats::{optimized_name, probe_encoder, JpegSurfaceEncoder, Quality, SurfaceEncoder};
use crate::resource::{Dimensions, ImageResource};
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageReader, RgbImage};
use std::io::Cursor;
use std::sync::Arc;

/// Tunables for the compression engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Images wider than this are scaled down to exactly this width.
    pub max_width: u32,
    pub start_quality: u8,
    pub quality_step: u8,
    /// The descent stops before reaching this quality.
    pub quality_floor: u8,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_width: DOWNSCALE_MAX_WIDTH,
            start_quality: DEFAULT_START_QUALITY,
            quality_step: DEFAULT_QUALITY_STEP,
            quality_floor: DEFAULT_QUALITY_FLOOR,
        }
    }
}

impl EngineConfig {
    pub fn new(max_width: Option<u32>, start_quality: Option<u8>) -> Result<Self> {
        let config = Self {
            max_width: max_width.unwrap_or(DOWNSCALE_MAX_WIDTH),
            start_quality: start_quality.unwrap_or(DEFAULT_START_QUALITY),
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        Quality::new(self.start_quality)?;
        if self.max_width == 0 {
            return Err(CompressionError::InvalidConfig(
                "max width must be positive".to_string(),
            ));
        }
        if self.quality_step == 0 {
            return Err(CompressionError::InvalidConfig(
                "quality step must be positive".to_string(),
            ));
        }
        if self.quality_floor >= self.start_quality {
            return Err(CompressionError::InvalidConfig(format!(
                "quality floor {} must be below start quality {}",
                self.quality_floor, self.start_quality
            )));
        }
        Ok(())
    }

    /// Next quality to try after `current`, if the descent may continue.
    pub fn next_quality(&self, current: Quality) -> Option<Quality> {
        let next = current.percent().checked_sub(self.quality_step)?;
        if next > self.quality_floor {
            Quality::new(next).ok()
        } else {
            None
        }
    }

}

/// One encode of the rendered surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodingAttempt {
    pub quality: Quality,
    pub bytes: Vec<u8>,
}

impl EncodingAttempt {
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Outcome of the quality search, decided once after the search ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    RetainOriginal,
    UseReencoded {
        quality: Quality,
        dimensions: Dimensions,
    },
}

/// The per-image result record.
///
/// Built only through [`CompressionResult::retain_original`] and
/// [`CompressionResult::reencoded`], so `final_size` always equals the payload
/// length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressionResult {
    name: String,
    payload: Vec<u8>,
    original_size: u64,
    decision: Decision,
}

impl CompressionResult {
    pub fn retain_original(resource: ImageResource) -> Self {
        let original_size = resource.original_size();
        let (name, payload) = resource.into_parts();
        Self {
            name,
            payload,
            original_size,
            decision: Decision::RetainOriginal,
        }
    }

    pub fn reencoded(
        name: String,
        original_size: u64,
        attempt: EncodingAttempt,
        dimensions: Dimensions,
    ) -> Self {
        Self {
            name,
            payload: attempt.bytes,
            original_size,
            decision: Decision::UseReencoded {
                quality: attempt.quality,
                dimensions,
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn final_size(&self) -> u64 {
        self.payload.len() as u64
    }

    pub fn original_size(&self) -> u64 {
        self.original_size
    }

    pub fn decision(&self) -> Decision {
        self.decision
    }

    pub fn is_reencoded(&self) -> bool {
        matches!(self.decision, Decision::UseReencoded { .. })
    }
}

/// Decodes resource bytes, guessing the format from the content.
pub fn decode_image(resource: &ImageResource) -> Result<DynamicImage> {
    let decode_failure = |source| CompressionError::DecodeFailure {
        name: resource.name().to_string(),
        source,
    };
    ImageReader::new(Cursor::new(resource.bytes()))
        .with_guessed_format()
        .map_err(|e| decode_failure(image::ImageError::IoError(e)))?
        .decode()
        .map_err(decode_failure)
}

/// Output size for an image of `source` size. Only the width is capped.
pub fn target_dimensions(source: Dimensions, max_width: u32) -> Dimensions {
    if source.width <= max_width {
        return source;
    }
    let ratio = f64::from(max_width) / f64::from(source.width);
    let height = (f64::from(source.height) * ratio).round() as u32;
    Dimensions::new(max_width, height.max(1))
}

/// Draws the image onto an RGB surface of `target` size.
pub fn render_surface(img: &DynamicImage, target: Dimensions) -> RgbImage {
    let (width, height) = img.dimensions();
    if width == target.width && height == target.height {
        img.to_rgb8()
    } else {
        img.resize_exact(target.width, target.height, FilterType::Triangle)
            .to_rgb8()
    }
}

/// Linear quality descent: encode at the start quality and step down while
/// the result is still larger than `original_size`.
pub fn search_quality(
    surface: &RgbImage,
    original_size: u64,
    encoder: &dyn SurfaceEncoder,
    config: &EngineConfig,
) -> Result<EncodingAttempt> {
    let mut quality = Quality::new(config.start_quality)?;
    let mut attempt = EncodingAttempt {
        quality,
        bytes: encoder.encode(surface, quality)?,
    };
    tracing::debug!(quality = %quality, size = attempt.size(), "encoded");

    while attempt.size() > original_size {
        let Some(next) = config.next_quality(quality) else {
            break;
        };
        quality = next;
        attempt = EncodingAttempt {
            quality,
            bytes: encoder.encode(surface, quality)?,
        };
        tracing::debug!(quality = %quality, size = attempt.size(), "encoded");
    }

    Ok(attempt)
}

/// Picks between the original and the best attempt. Ties keep the original.
pub fn decide(
    resource: ImageResource,
    attempt: EncodingAttempt,
    dimensions: Dimensions,
    encoder: &dyn SurfaceEncoder,
) -> CompressionResult {
    if attempt.size() >= resource.original_size() {
        tracing::info!(
            name = resource.name(),
            original = resource.original_size(),
            encoded = attempt.size(),
            "re-encoding did not help, keeping original"
        );
        return CompressionResult::retain_original(resource);
    }

    let name = optimized_name(resource.name(), encoder.format());
    tracing::info!(
        name = resource.name(),
        output = %name,
        quality = %attempt.quality,
        original = resource.original_size(),
        encoded = attempt.size(),
        "re-encoded"
    );
    CompressionResult::reencoded(name, resource.original_size(), attempt, dimensions)
}

/// The compression engine. Stateless across calls and cheap to clone.
#[derive(Clone)]
pub struct Engine {
    config: EngineConfig,
    encoder: Arc<dyn SurfaceEncoder>,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .field("format", &self.encoder.format())
            .finish()
    }
}

impl Engine {
    /// Builds an engine with the JPEG encoder.
    pub fn new(config: EngineConfig) -> Result<Self> {
        Self::with_encoder(config, Arc::new(JpegSurfaceEncoder))
    }

    /// Validates `config` and probes `encoder` once.
    pub fn with_encoder(config: EngineConfig, encoder: Arc<dyn SurfaceEncoder>) -> Result<Self> {
        config.validate()?;
        probe_encoder(encoder.as_ref())?;
        Ok(Self { config, encoder })
    }

    /// Runs the whole pipeline on the calling thread.
    ///
    /// Once the bytes decode, the caller always gets a result: if the encoder
    /// rejects the surface (JPEG caps both sides at 65535 px) the original is
    /// kept.
    pub fn compress_blocking(&self, resource: ImageResource) -> Result<CompressionResult> {
        let img = decode_image(&resource)?;
        let (width, height) = img.dimensions();
        let target = target_dimensions(Dimensions::new(width, height), self.config.max_width);
        tracing::debug!(
            name = resource.name(),
            source = %Dimensions::new(width, height),
            target = %target,
            "decoded"
        );

        let surface = render_surface(&img, target);
        drop(img);

        let attempt = match search_quality(
            &surface,
            resource.original_size(),
            self.encoder.as_ref(),
            &self.config,
        ) {
            Ok(attempt) => attempt,
            Err(CompressionError::Encode(e)) => {
                tracing::warn!(
                    name = resource.name(),
                    target = %target,
                    error = %e,
                    "encoder rejected image, keeping original"
                );
                return Ok(CompressionResult::retain_original(resource));
            }
            Err(e) => return Err(e),
        };
        Ok(decide(resource, attempt, target, self.encoder.as_ref()))
    }

    /// Runs the pipeline on Tokio's blocking pool.
    pub async fn compress(&self, resource: ImageResource) -> Result<CompressionResult> {
        let engine = self.clone();
        tokio::task::spawn_blocking(move || engine.compress_blocking(resource))
            .await
            .map_err(|e| CompressionError::TaskFailed(e.to_string()))?
    }
}
