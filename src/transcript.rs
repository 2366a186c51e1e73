//! Reading raw transcription or caption text for the command line.

use anyhow::{Context, Result};
use log::debug;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// Largest transcript accepted from a file or stdin
pub const MAX_TRANSCRIPT_BYTES: u64 = 1024 * 1024;

/// Read text from a file, or from stdin when no path is given
pub fn read_transcript(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => read_transcript_file(path),
        None => read_transcript_from(io::stdin().lock()),
    }
}

/// Read a transcript from any reader, rejecting input over the size limit
pub fn read_transcript_from(reader: impl Read) -> Result<String> {
    let mut text = String::new();
    reader
        .take(MAX_TRANSCRIPT_BYTES + 1)
        .read_to_string(&mut text)
        .context("Failed to read transcript text")?;

    if text.len() as u64 > MAX_TRANSCRIPT_BYTES {
        return Err(anyhow::anyhow!(
            "Transcript too large: more than {} bytes",
            MAX_TRANSCRIPT_BYTES
        ));
    }
    debug!("Read {} bytes of transcript text", text.len());
    Ok(text)
}

/// Read a transcript file, rejecting missing, oversized or non-UTF-8 files
pub fn read_transcript_file(path: &Path) -> Result<String> {
    let metadata = fs::metadata(path)
        .with_context(|| format!("Transcript file does not exist: {}", path.display()))?;

    if metadata.len() > MAX_TRANSCRIPT_BYTES {
        return Err(anyhow::anyhow!(
            "Transcript file too large: {} bytes (max {})",
            metadata.len(),
            MAX_TRANSCRIPT_BYTES
        ));
    }

    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read transcript file: {}", path.display()))?;
    debug!("Read {} bytes from {}", text.len(), path.display());
    Ok(text)
}
