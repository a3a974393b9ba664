//! Worker threads for chunk rendering.

use crate::error::RenderResult;

/// A fixed-size pool of render workers.
///
/// The caller owns the pool and passes it to [`crate::render`]; nothing in
/// this crate keeps a global pool.
pub struct WorkerPool {
    pool: rayon::ThreadPool,
}

impl WorkerPool {
    /// Start a pool with `threads` workers, or rayon's default count when
    /// `threads` is 0.
    pub fn new(threads: usize) -> RenderResult<Self> {
        let mut builder =
            rayon::ThreadPoolBuilder::new().thread_name(|i| format!("bmr-render-{i}"));
        if threads > 0 {
            builder = builder.num_threads(threads);
        }
        let pool = builder.build()?;

        log::info!("Started render pool with {} threads", pool.current_num_threads());

        Ok(Self { pool })
    }

    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Queue a job. It runs even if the pool is shut down before it starts.
    pub(crate) fn spawn<F>(&self, job: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.pool.spawn(job);
    }

    /// Stop accepting work and let the workers exit once queued jobs finish.
    pub fn shutdown(self) {
        log::debug!("Shutting down render pool ({} threads)", self.threads());
        drop(self.pool);
    }
}

impl std::fmt::Debug for WorkerPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerPool")
            .field("threads", &self.threads())
            .finish()
    }
}
