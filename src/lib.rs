pub mod archive;
pub mod batch;
pub mod cli;
pub mod constants;
pub mod error;
pub mod formats;
pub mod info;
pub mod logger;
pub mod processing;
pub mod resource;
pub mod utils;

pub use archive::{archive, unique_entry_names, ArchiveBlob};
pub use batch::{
    process_batch, process_batch_with_progress, BatchItem, BatchOutcome, BatchProcessor,
    BatchSummary,
};
pub use error::{CompressionError, Result};
pub use formats::{optimized_name, JpegSurfaceEncoder, Quality, SurfaceEncoder, TargetFormat};
pub use info::{get_image_info, print_image_info, ImageInfo};
pub use processing::{
    decide, decode_image, render_surface, search_quality, target_dimensions, CompressionResult,
    Decision, EncodingAttempt, Engine, EngineConfig,
};
pub use resource::{collect_all, collect_image_files, is_image_file, Dimensions, ImageResource};
pub use utils::{format_file_size, format_savings, savings_percentage};
