use anyhow::{Context, Result};
use clap::Parser;
use img_shrink::cli::{Args, Commands};
use img_shrink::constants::{
    COMPRESSED_SIZE_PREFIX, ERROR_PREFIX, INFO_PREFIX, ORIGINAL_SIZE_PREFIX,
    PROGRESS_BAR_TEMPLATE, SAVINGS_PREFIX, SUCCESS_PREFIX, WARNING_PREFIX,
};
use img_shrink::{
    archive, collect_all, format_file_size, format_savings, get_image_info, logger,
    print_image_info, status, unique_entry_names, BatchItem, BatchProcessor, Engine,
    EngineConfig, ImageResource,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

struct OptimizeRequest {
    inputs: Vec<String>,
    output: PathBuf,
    zip: bool,
    recursive: bool,
    config: EngineConfig,
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    logger::init_tracing(args.quiet, args.verbose);

    match args.command {
        Commands::Optimize {
            inputs,
            output,
            zip,
            recursive,
            max_width,
            quality,
            threads,
        } => {
            let request = OptimizeRequest {
                inputs,
                output,
                zip,
                recursive,
                config: EngineConfig::new(max_width, quality)?,
            };
            let runtime = build_runtime(threads)?;
            runtime.block_on(run_optimize(request))
        }
        Commands::Info { input, max_width } => {
            show_image_info(&input, &EngineConfig::new(max_width, None)?)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn build_runtime(threads: Option<usize>) -> Result<tokio::runtime::Runtime> {
    let worker_threads = threads.filter(|&n| n > 0).unwrap_or_else(num_cpus::get);
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .enable_all()
        .build()
        .context("Failed to build async runtime")
}

async fn run_optimize(request: OptimizeRequest) -> Result<ExitCode> {
    let start_time = Instant::now();
    let engine = Engine::new(request.config).context("Cannot start the compression engine")?;

    let files = collect_all(&request.inputs, request.recursive)?;
    if files.is_empty() {
        status!("{} No image files found in the input paths", WARNING_PREFIX);
        return Ok(ExitCode::SUCCESS);
    }
    status!("{} Found {} image files to process", INFO_PREFIX, files.len());

    let mut read_failures = 0;
    let mut resources = Vec::with_capacity(files.len());
    for path in &files {
        match ImageResource::from_path(path) {
            Ok(resource) => resources.push(resource),
            Err(e) => {
                eprintln!("{} Failed to read {:?}: {}", ERROR_PREFIX, path, e);
                read_failures += 1;
            }
        }
    }

    let progress = if logger::is_quiet() {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(resources.len() as u64)
    };
    progress.set_style(ProgressStyle::default_bar().template(PROGRESS_BAR_TEMPLATE)?);

    let processor = BatchProcessor::new(engine);
    let outcome = processor
        .submit_with_progress(resources, |item| {
            progress.set_message(item.name().to_string());
            progress.inc(1);
        })
        .await?;
    progress.finish_and_clear();

    fs::create_dir_all(&request.output)
        .with_context(|| format!("Failed to create output directory {:?}", request.output))?;

    for item in &outcome.items {
        match item {
            BatchItem::Done(result) => status!(
                "{} {}: {} → {}",
                SUCCESS_PREFIX,
                result.name(),
                format_file_size(result.original_size()),
                format_file_size(result.final_size())
            ),
            BatchItem::Failed { name, error } => {
                eprintln!("{} {}: {}", ERROR_PREFIX, name, error)
            }
        }
    }

    let summary = outcome.summary();
    let results = outcome.into_results();
    let file_names = unique_entry_names(results.iter().map(|r| r.name()));
    for (file_name, result) in file_names.iter().zip(&results) {
        write_result(&request.output, file_name, result.payload())?;
    }

    if request.zip {
        let blob = archive(&results)?;
        let archive_path = request.output.join(&blob.file_name);
        fs::write(&archive_path, &blob.bytes)
            .with_context(|| format!("Failed to write {:?}", archive_path))?;
        status!(
            "{} Archive: {:?} ({})",
            SUCCESS_PREFIX,
            archive_path,
            format_file_size(blob.bytes.len() as u64)
        );
    }

    let failed = summary.failed + read_failures;
    status!("\n📊 Batch Summary:");
    status!("  📁 Files processed: {}", summary.succeeded);
    status!("  🔄 Re-encoded: {}", summary.reencoded);
    status!(
        "  {} {}",
        ORIGINAL_SIZE_PREFIX,
        format_file_size(summary.total_original)
    );
    status!(
        "  {} {}",
        COMPRESSED_SIZE_PREFIX,
        format_file_size(summary.total_final)
    );
    status!(
        "  {} {}",
        SAVINGS_PREFIX,
        format_savings(summary.savings_percentage())
    );
    status!("  ⏱️  Total time: {:?}", start_time.elapsed());
    if failed > 0 {
        status!("  {} Failed files: {}", WARNING_PREFIX, failed);
    }

    if summary.succeeded == 0 && failed > 0 {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn write_result(output_dir: &Path, file_name: &str, payload: &[u8]) -> Result<()> {
    let path = output_dir.join(file_name);
    fs::write(&path, payload).with_context(|| format!("Failed to write {:?}", path))
}

fn show_image_info(input_path: &Path, config: &EngineConfig) -> Result<()> {
    status!("{} Getting info for: {:?}", INFO_PREFIX, input_path);
    let info = get_image_info(input_path, config)?;
    print_image_info(&info);
    Ok(())
}
