use crate::constants::ARCHIVE_FILE_NAME;
use crate::error::{CompressionError, Result};
use crate::formats::file_stem;
use crate::processing::CompressionResult;
use std::collections::HashSet;
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// A finished archive held entirely in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveBlob {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Entry names for `names`, with later duplicates renamed `stem-1.ext`, `stem-2.ext`, ...
pub fn unique_entry_names<'a, I>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut used = HashSet::new();
    let mut entries = Vec::new();

    for name in names {
        let mut candidate = name.to_string();
        let mut index = 1;
        while used.contains(&candidate) {
            let stem = file_stem(name);
            candidate = format!("{}-{}{}", stem, index, &name[stem.len()..]);
            index += 1;
        }
        used.insert(candidate.clone());
        entries.push(candidate);
    }

    entries
}

/// Writes every result as one zip entry.
///
/// Payloads are stored rather than deflated: they are already compressed images.
pub fn archive(results: &[CompressionResult]) -> Result<ArchiveBlob> {
    let names = unique_entry_names(results.iter().map(CompressionResult::name));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, result) in names.iter().zip(results) {
        zip.start_file(name.as_str(), options)?;
        zip.write_all(result.payload())
            .map_err(|e| CompressionError::ArchiveGeneration(e.to_string()))?;
    }
    let bytes = zip.finish()?.into_inner();

    tracing::info!(entries = results.len(), size = bytes.len(), "archive written");
    Ok(ArchiveBlob {
        file_name: ARCHIVE_FILE_NAME.to_string(),
        bytes,
    })
}
