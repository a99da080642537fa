//! Byte-range sharding of the input file.
//!
//! Planning only does arithmetic on the file size. Reading happens later,
//! inside the workers, each with its own file handle seeked to its own
//! offset.

use std::fs::File;
use std::io::{self, BufReader, Read, Seek, SeekFrom};
use std::path::PathBuf;

use crate::config::{BoundaryPolicy, ShardSpec};
use crate::error::{Result, TopKError};

/// A contiguous `[start, start + len)` slice of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shard {
    pub index: usize,
    pub start: u64,
    pub len: u64,
}

impl Shard {
    pub fn end(&self) -> u64 {
        self.start + self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Split `size` bytes into exactly `count` shards of `ceil(size / count)`
/// bytes. Trailing shards are clamped to what is left and may be empty.
pub fn plan(size: u64, count: usize) -> Result<Vec<Shard>> {
    if count < 1 {
        return Err(TopKError::invalid("shard count must be at least 1"));
    }
    let chunk = size.div_ceil(count as u64);
    Ok(carve(size, chunk, count))
}

/// Split `size` bytes into `size / chunk + 1` shards of `chunk` bytes, the
/// last one holding the remainder (empty when `chunk` divides `size`).
pub fn plan_by_chunk_size(size: u64, chunk: u64) -> Result<Vec<Shard>> {
    if chunk < 1 {
        return Err(TopKError::invalid("chunk size must be at least 1"));
    }
    let count = usize::try_from(size / chunk + 1)
        .map_err(|_| TopKError::invalid("chunk size yields too many shards"))?;
    Ok(carve(size, chunk, count))
}

pub fn plan_for(size: u64, spec: ShardSpec) -> Result<Vec<Shard>> {
    match spec {
        ShardSpec::Count(n) => plan(size, n),
        ShardSpec::ChunkSize(c) => plan_by_chunk_size(size, c),
    }
}

fn carve(size: u64, chunk: u64, count: usize) -> Vec<Shard> {
    (0..count)
        .map(|index| {
            let start = (index as u64).saturating_mul(chunk).min(size);
            let len = chunk.min(size - start);
            Shard { index, start, len }
        })
        .collect()
}

/// Bytes that may be part of a word. Non-ASCII bytes count as word bytes so
/// aligned reads never cut a multi-byte character.
pub(crate) fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b >= 0x80
}

/// Reads a shard's bytes from the input file by explicit offset.
#[derive(Debug, Clone)]
pub struct ShardReader {
    path: PathBuf,
    file_len: u64,
    policy: BoundaryPolicy,
}

impl ShardReader {
    pub fn new(path: impl Into<PathBuf>, file_len: u64, policy: BoundaryPolicy) -> Self {
        Self {
            path: path.into(),
            file_len,
            policy,
        }
    }

    pub fn read(&self, shard: &Shard) -> io::Result<Vec<u8>> {
        if shard.is_empty() {
            return Ok(Vec::new());
        }
        let mut file = File::open(&self.path)?;
        let mut buf = read_range(&mut file, shard.start, shard.len)?;

        if self.policy == BoundaryPolicy::Whitespace {
            if shard.start > 0 {
                let prev = read_range(&mut file, shard.start - 1, 1)?;
                if is_word_byte(prev[0]) {
                    // The straddling word belongs to the previous shard.
                    let skip = buf.iter().take_while(|&&b| is_word_byte(b)).count();
                    buf.drain(..skip);
                }
            }
            let ends_in_word = buf.last().is_some_and(|&b| is_word_byte(b));
            if ends_in_word && shard.end() < self.file_len {
                file.seek(SeekFrom::Start(shard.end()))?;
                for byte in BufReader::with_capacity(64, file).bytes() {
                    let byte = byte?;
                    if !is_word_byte(byte) {
                        break;
                    }
                    buf.push(byte);
                }
            }
        }
        Ok(buf)
    }
}

fn read_range(file: &mut File, start: u64, len: u64) -> io::Result<Vec<u8>> {
    file.seek(SeekFrom::Start(start))?;
    let mut buf = Vec::with_capacity(len as usize);
    file.take(len).read_to_end(&mut buf)?;
    if (buf.len() as u64) < len {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("expected {len} bytes at offset {start}, got {}", buf.len()),
        ));
    }
    Ok(buf)
}
