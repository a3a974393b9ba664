//! Handle to an in-flight render.

use std::sync::mpsc::Receiver;

use bmr_core::ArgbImage;

use crate::chunk::Chunk;
use crate::error::{RenderError, RenderResult};

/// What a chunk job sends back: its rendered pixels, or the panic message.
pub(crate) struct ChunkMessage {
    pub chunk: Chunk,
    pub outcome: Result<Vec<u32>, String>,
}

/// A render that has been dispatched to a [`crate::WorkerPool`].
///
/// The destination image is held here until [`RenderTask::join`] collects
/// every chunk and writes back the pixels that changed.
#[must_use = "a render task does nothing unless joined"]
pub struct RenderTask {
    image: ArgbImage,
    chunks: Vec<Chunk>,
    receiver: Option<Receiver<ChunkMessage>>,
}

impl RenderTask {
    pub(crate) fn new(image: ArgbImage, chunks: Vec<Chunk>, receiver: Receiver<ChunkMessage>) -> Self {
        Self {
            image,
            chunks,
            receiver: Some(receiver),
        }
    }

    /// A task with nothing to do; joining returns `image` unchanged.
    pub(crate) fn completed(image: ArgbImage) -> Self {
        Self {
            image,
            chunks: Vec::new(),
            receiver: None,
        }
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Block until every chunk has finished and return the image.
    ///
    /// If any chunk panicked the error carries the indices of the failed
    /// chunks together with the image; those chunks keep the pixels the
    /// destination had before the render.
    pub fn join(self) -> RenderResult<ArgbImage> {
        let RenderTask {
            mut image,
            chunks,
            receiver,
        } = self;

        let mut done = vec![false; chunks.len()];
        let mut failed = Vec::new();
        let mut changed = 0usize;

        if let Some(receiver) = receiver {
            // Ends once every job has sent its result and dropped its sender
            for message in receiver.iter() {
                let chunk = message.chunk;
                done[chunk.index] = true;
                match message.outcome {
                    Ok(pixels) => {
                        let dst = &mut image.pixels_mut()[chunk.range()];
                        for (dst, src) in dst.iter_mut().zip(pixels) {
                            if *dst != src {
                                *dst = src;
                                changed += 1;
                            }
                        }
                    }
                    Err(reason) => {
                        log::warn!("Render chunk {} failed: {}", chunk.index, reason);
                        failed.push(chunk.index);
                    }
                }
            }
        }

        // A job that never reported back counts as failed too
        for (index, _) in done.iter().enumerate().filter(|(_, done)| !**done) {
            log::warn!("Render chunk {} did not report back", index);
            failed.push(index);
        }

        log::debug!(
            "Render joined: {} chunks, {} pixels changed, {} failed",
            chunks.len(),
            changed,
            failed.len()
        );

        if failed.is_empty() {
            Ok(image)
        } else {
            failed.sort_unstable();
            Err(RenderError::ChunksFailed { failed, image })
        }
    }
}

impl std::fmt::Debug for RenderTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderTask")
            .field("width", &self.image.width())
            .field("height", &self.image.height())
            .field("chunks", &self.chunks.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::generate_chunks;
    use std::sync::mpsc;

    #[test]
    fn test_completed_task() {
        let image = ArgbImage::filled(2, 2, 0xFF00FF00);
        let task = RenderTask::completed(image.clone());

        assert_eq!(task.chunk_count(), 0);
        assert_eq!(task.join().unwrap(), image);
    }

    #[test]
    fn test_join_applies_results_out_of_order() {
        let chunks = generate_chunks(6, 4);
        let (tx, rx) = mpsc::channel();
        tx.send(ChunkMessage {
            chunk: chunks[1],
            outcome: Ok(vec![2, 2]),
        })
        .unwrap();
        tx.send(ChunkMessage {
            chunk: chunks[0],
            outcome: Ok(vec![1, 1, 1, 1]),
        })
        .unwrap();
        drop(tx);

        let task = RenderTask::new(ArgbImage::new(3, 2), chunks, rx);
        let image = task.join().unwrap();
        assert_eq!(image.pixels(), &[1, 1, 1, 1, 2, 2]);
    }

    #[test]
    fn test_join_reports_failures() {
        let chunks = generate_chunks(6, 2);
        let (tx, rx) = mpsc::channel();
        tx.send(ChunkMessage {
            chunk: chunks[0],
            outcome: Ok(vec![9, 9]),
        })
        .unwrap();
        tx.send(ChunkMessage {
            chunk: chunks[2],
            outcome: Err("boom".to_string()),
        })
        .unwrap();
        // Chunk 1 never reports
        drop(tx);

        let original = ArgbImage::filled(3, 2, 5);
        let err = RenderTask::new(original, chunks, rx).join().unwrap_err();
        match err {
            RenderError::ChunksFailed { failed, image } => {
                assert_eq!(failed, vec![1, 2]);
                assert_eq!(image.pixels(), &[9, 9, 5, 5, 5, 5]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
