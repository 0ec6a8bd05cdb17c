use crate::error::Result;
use crate::processing::{decode_image, target_dimensions, EngineConfig};
use crate::resource::{Dimensions, ImageResource};
use crate::utils::format_file_size;
use image::{GenericImageView, ImageReader};
use std::io::Cursor;
use std::path::Path;

/// What the engine would see for one file.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageInfo {
    pub name: String,
    pub file_size: u64,
    pub format: Option<image::ImageFormat>,
    pub color: image::ColorType,
    pub dimensions: Dimensions,
    pub target: Dimensions,
}

impl ImageInfo {
    pub fn will_downscale(&self) -> bool {
        self.dimensions != self.target
    }

    pub fn aspect_ratio(&self) -> f64 {
        f64::from(self.dimensions.width) / f64::from(self.dimensions.height)
    }

    pub fn megapixels(&self) -> f64 {
        f64::from(self.dimensions.width) * f64::from(self.dimensions.height) / 1_000_000.0
    }
}

pub fn get_image_info(input_path: &Path, config: &EngineConfig) -> Result<ImageInfo> {
    let resource = ImageResource::from_path(input_path)?;
    let format = ImageReader::new(Cursor::new(resource.bytes()))
        .with_guessed_format()?
        .format();
    let img = decode_image(&resource)?;
    let (width, height) = img.dimensions();
    let dimensions = Dimensions::new(width, height);

    Ok(ImageInfo {
        name: resource.name().to_string(),
        file_size: resource.original_size(),
        format,
        color: img.color(),
        dimensions,
        target: target_dimensions(dimensions, config.max_width),
    })
}

pub fn print_image_info(info: &ImageInfo) {
    println!("📋 Basic Information:");
    println!("  📁 File: {}", info.name);
    println!("  📏 Dimensions: {} pixels", info.dimensions);
    println!(
        "  📦 File size: {} ({} bytes)",
        format_file_size(info.file_size),
        info.file_size
    );
    println!("  🎨 Color type: {:?}", info.color);
    match info.format {
        Some(format) => println!("  🎭 Image format: {:?}", format),
        None => println!("  🎭 Image format: unknown"),
    }
    println!("  🔢 Megapixels: {:.2} MP", info.megapixels());
    println!("  📐 Aspect ratio: {:.2}:1", info.aspect_ratio());

    if info.will_downscale() {
        println!("  🔄 Will be downscaled to {}", info.target);
    } else {
        println!("  ✅ Kept at native resolution");
    }
}
