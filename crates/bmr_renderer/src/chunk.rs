//! Pixel chunks.
//!
//! The destination is treated as one flat row-major run of pixels and cut
//! into fixed-length chunks. Each chunk is rendered by one worker job.

use std::ops::Range;

/// Default number of pixels per chunk.
pub const DEFAULT_CHUNK_SIZE: usize = 256;

/// A contiguous run of destination pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk {
    /// Position of this chunk in dispatch order
    pub index: usize,
    /// Offset of the first pixel
    pub start: usize,
    /// Number of pixels
    pub len: usize,
}

impl Chunk {
    pub fn new(index: usize, start: usize, len: usize) -> Self {
        Self { index, start, len }
    }

    pub fn end(&self) -> usize {
        self.start + self.len
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end()
    }
}

/// Split `pixel_count` pixels into chunks of `chunk_size`. The last chunk
/// may be shorter. A chunk size of 0 is treated as 1.
pub fn generate_chunks(pixel_count: usize, chunk_size: usize) -> Vec<Chunk> {
    let chunk_size = chunk_size.max(1);
    (0..pixel_count)
        .step_by(chunk_size)
        .enumerate()
        .map(|(index, start)| Chunk::new(index, start, chunk_size.min(pixel_count - start)))
        .collect()
}
