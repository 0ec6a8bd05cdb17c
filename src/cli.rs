use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "img-shrink",
    about = "Re-encode images to smaller JPEGs and bundle them into one zip",
    long_about = "img-shrink decodes each image, scales anything wider than 1600 pixels down to 1600, \
                  and re-encodes it as JPEG, lowering the quality from 0.8 in steps of 0.1 until the \
                  result is smaller than the original. Images that cannot be made smaller are kept as-is.",
    version,
    after_help = "EXAMPLES:\n  \
    img-shrink optimize photo.png scan.bmp -o ./out\n  \
    img-shrink optimize ./camera -r --zip -o ./out\n  \
    img-shrink optimize \"./shots/*.png\" --zip\n  \
    img-shrink info photo.png"
)]
pub struct Args {
    #[arg(long, global = true, help = "Only print errors")]
    pub quiet: bool,

    #[arg(short = 'v', long, global = true, help = "Log every encode attempt")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(
        about = "Optimize a batch of images",
        long_about = "Process every input concurrently and write each result to the output directory. \
                      Inputs may be files, directories or glob patterns."
    )]
    Optimize {
        #[arg(required = true, help = "Input files, directories or glob patterns")]
        inputs: Vec<String>,

        #[arg(short = 'o', long, default_value = ".", help = "Output directory")]
        output: PathBuf,

        #[arg(
            short = 'z',
            long,
            help = "Also write optimized-images.zip",
            long_help = "Bundle every result into optimized-images.zip inside the output directory."
        )]
        zip: bool,

        #[arg(short = 'r', long, help = "Process subdirectories recursively")]
        recursive: bool,

        #[arg(
            short = 'w',
            long,
            help = "Downscale threshold in pixels (default: 1600)",
            long_help = "Images wider than this are scaled down to exactly this width, keeping the aspect ratio."
        )]
        max_width: Option<u32>,

        #[arg(
            short = 'q',
            long,
            help = "Starting quality (1-100, default: 80)",
            long_help = "Quality of the first encode attempt. Each further attempt lowers it by 10."
        )]
        quality: Option<u8>,

        #[arg(
            short = 'j',
            long,
            help = "Number of worker threads (default: auto)",
            long_help = "Number of runtime worker threads. If not specified, uses number of CPU cores."
        )]
        threads: Option<usize>,
    },

    #[command(
        about = "Display image information",
        long_about = "Decode an image and show its dimensions, format, size, and whether it would be downscaled."
    )]
    Info {
        #[arg(help = "Image file path to analyze")]
        input: PathBuf,

        #[arg(short = 'w', long, help = "Downscale threshold in pixels (default: 1600)")]
        max_width: Option<u32>,
    },
}
