/// Widths above this are scaled down to exactly this many pixels.
pub const DOWNSCALE_MAX_WIDTH: u32 = 1600;

// Qualities are stored as whole percents so the descent 80, 70, ... 20 is exact.
pub const DEFAULT_START_QUALITY: u8 = 80;
pub const DEFAULT_QUALITY_STEP: u8 = 10;
pub const DEFAULT_QUALITY_FLOOR: u8 = 10;
pub const MIN_QUALITY: u8 = 1;
pub const MAX_QUALITY: u8 = 100;

pub const OPTIMIZED_SUFFIX: &str = "-optimized";
pub const ARCHIVE_FILE_NAME: &str = "optimized-images.zip";

pub const SUPPORTED_IMAGE_EXTENSIONS: &[&str] =
    &["jpg", "jpeg", "png", "gif", "webp", "bmp", "tiff", "tif"];

pub const SIZE_UNITS: &[&str] = &["Bytes", "KB", "MB"];
pub const SIZE_UNIT_BASE: f64 = 1024.0;

pub const PROGRESS_BAR_TEMPLATE: &str = "{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}";

// Common output message prefixes
pub const ORIGINAL_SIZE_PREFIX: &str = "📊 Original size:";
pub const COMPRESSED_SIZE_PREFIX: &str = "📈 Final size:";
pub const SAVINGS_PREFIX: &str = "🎯 Savings:";
pub const SUCCESS_PREFIX: &str = "✅";
pub const WARNING_PREFIX: &str = "⚠️ ";
pub const ERROR_PREFIX: &str = "❌";
pub const INFO_PREFIX: &str = "📋";
