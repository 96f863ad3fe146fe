//! Copy engine.
//! Writes a template stream to its destination, either byte for byte or
//! line by line with token replacement.

use log::debug;
use std::borrow::Cow;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::constants::DEFAULT_BUFFER_SIZE;
use crate::error::{Error, Result};
use crate::filter::FilterSetCollection;
use crate::line_ending::LineEnding;

/// How a destination file was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyMode {
    /// Bytes copied unchanged
    Raw,
    /// Lines rewritten through the filter set
    Filtered,
}

impl std::fmt::Display for CopyMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CopyMode::Raw => write!(f, "Copied"),
            CopyMode::Filtered => write!(f, "Filtered"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CopyEngine {
    line_ending: LineEnding,
    buffer_size: usize,
}

impl Default for CopyEngine {
    fn default() -> Self {
        Self {
            line_ending: LineEnding::native(),
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl CopyEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }

    /// Sets the raw copy chunk size. Zero falls back to the default.
    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = if buffer_size == 0 {
            DEFAULT_BUFFER_SIZE
        } else {
            buffer_size
        };
        self
    }

    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    /// Copies `src` to `dest`, replacing any regular file already there.
    ///
    /// # Arguments
    /// * `src` - Template content
    /// * `dest` - Destination path; missing parent directories are created
    /// * `filters` - Token filters; `None` or an empty collection copies raw bytes
    ///
    /// # Errors
    /// * `Error::IoError` on any read or write failure. A destination that was
    ///   partially written when the failure happened is left in place.
    pub fn copy_file<R: Read>(
        &self,
        src: R,
        dest: &Path,
        filters: Option<&FilterSetCollection>,
    ) -> Result<CopyMode> {
        remove_existing(dest)?;
        ensure_parent_dir(dest)?;

        match filters {
            Some(filters) if filters.has_filters() => {
                debug!("Filtering into {}", dest.display());
                self.copy_filtered(src, dest, filters)?;
                Ok(CopyMode::Filtered)
            }
            _ => {
                debug!("Copying into {}", dest.display());
                self.copy_raw(src, dest)?;
                Ok(CopyMode::Raw)
            }
        }
    }

    fn copy_filtered<R: Read>(
        &self,
        src: R,
        dest: &Path,
        filters: &FilterSetCollection,
    ) -> Result<()> {
        let replacer = filters.replacer()?;
        let mut reader = BufReader::new(src);
        let mut out = BufWriter::new(File::create(dest).map_err(Error::IoError)?);
        let eol = self.line_ending.as_str();
        let mut chunk = Vec::new();

        loop {
            chunk.clear();
            if reader.read_until(b'\n', &mut chunk).map_err(Error::IoError)? == 0 {
                break;
            }
            for line in split_lines(&chunk) {
                if !line.is_empty() {
                    let (text, latin1) = decode_line(line);
                    let replaced = replacer.replace(&text);
                    out.write_all(&encode_line(&replaced, latin1))
                        .map_err(Error::IoError)?;
                }
                out.write_all(eol.as_bytes()).map_err(Error::IoError)?;
            }
        }
        out.flush().map_err(Error::IoError)
    }

    fn copy_raw<R: Read>(&self, mut src: R, dest: &Path) -> Result<()> {
        let mut out = File::create(dest).map_err(Error::IoError)?;
        let mut buffer = vec![0u8; self.buffer_size];
        loop {
            let count = match src.read(&mut buffer) {
                Ok(0) => break,
                Ok(count) => count,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(Error::IoError(e)),
            };
            out.write_all(&buffer[..count]).map_err(Error::IoError)?;
        }
        out.flush().map_err(Error::IoError)
    }
}

fn remove_existing(dest: &Path) -> Result<()> {
    if dest.is_file() {
        debug!("Removing existing file {}", dest.display());
        match fs::remove_file(dest) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => return Err(Error::IoError(e)),
            _ => {}
        }
    }
    Ok(())
}

fn ensure_parent_dir(dest: &Path) -> Result<()> {
    if let Some(parent) = dest.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating directory {}", parent.display());
            fs::create_dir_all(parent).map_err(Error::IoError)?;
        }
    }
    Ok(())
}

/// Splits a chunk ending in `\n` (or at end of input) into lines.
/// `\n`, `\r\n` and a lone `\r` all end a line.
fn split_lines(chunk: &[u8]) -> impl Iterator<Item = &[u8]> {
    let chunk = chunk.strip_suffix(b"\n").unwrap_or(chunk);
    let chunk = chunk.strip_suffix(b"\r").unwrap_or(chunk);
    chunk.split(|&b| b == b'\r')
}

/// Decodes a line as UTF-8, falling back to Latin-1.
/// The flag tells whether the fallback was used.
fn decode_line(line: &[u8]) -> (Cow<'_, str>, bool) {
    match std::str::from_utf8(line) {
        Ok(text) => (Cow::Borrowed(text), false),
        Err(_) => (Cow::Owned(line.iter().map(|&b| char::from(b)).collect()), true),
    }
}

/// Encodes a line back the way it was read. Characters outside Latin-1,
/// which only replacement values can introduce, are written as UTF-8.
fn encode_line(text: &str, latin1: bool) -> Cow<'_, [u8]> {
    if !latin1 {
        return Cow::Borrowed(text.as_bytes());
    }
    let mut bytes = Vec::with_capacity(text.len());
    for c in text.chars() {
        match u8::try_from(u32::from(c)) {
            Ok(b) => bytes.push(b),
            Err(_) => bytes.extend_from_slice(c.encode_utf8(&mut [0u8; 4]).as_bytes()),
        }
    }
    Cow::Owned(bytes)
}
