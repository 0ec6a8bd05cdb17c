#![allow(dead_code)]

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use img_shrink::ImageResource;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A smooth gradient, which JPEG shrinks far below its BMP size.
pub fn gradient_image(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 96])
    }))
}

pub fn encode_as(img: &DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, format).unwrap();
    buf.into_inner()
}

/// An uncompressed bitmap that re-encoding will always shrink.
pub fn bmp_resource(name: &str, width: u32, height: u32) -> ImageResource {
    ImageResource::new(name, encode_as(&gradient_image(width, height), ImageFormat::Bmp))
}

/// A 1x1 PNG, smaller than any JPEG the encoder can produce.
pub fn tiny_png_resource(name: &str) -> ImageResource {
    let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(1, 1, Rgb([0, 0, 0])));
    ImageResource::new(name, encode_as(&img, ImageFormat::Png))
}

pub fn corrupt_resource(name: &str) -> ImageResource {
    ImageResource::new(name, b"definitely not an image".to_vec())
}

pub fn create_temp_directory() -> TempDir {
    TempDir::new().unwrap()
}

pub fn write_bmp_file(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, encode_as(&gradient_image(width, height), ImageFormat::Bmp)).unwrap();
    path
}

pub fn write_file(dir: &Path, name: &str, contents: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}
