//! Thread budget for matchup and ranking runs.
//!
//! A [WorkerPool] only records how many threads a caller asked for. [WorkerPool::build] turns
//! that into a [BuiltPool] which can run several batches on the same threads; a worker count of
//! 0 means "share Rayon's global pool".

use rayon::{ThreadPool, ThreadPoolBuilder};

#[derive(Debug, Clone, Copy, Default)]
pub struct WorkerPool {
    /// 0 leaves scheduling to the global pool.
    pub workers: usize,
}

impl WorkerPool {
    pub fn default_workers() -> Self {
        Self::default()
    }

    pub fn with_workers(n: usize) -> Self {
        Self { workers: n }
    }

    /// Never more threads than `jobs`; a zero-worker pool stays on the global pool.
    pub fn capped(self, jobs: usize) -> Self {
        match self.workers {
            0 => self,
            n => Self::with_workers(n.min(jobs.max(1))),
        }
    }

    /// Spawn the dedicated threads once. Falls back to the global pool if they cannot be created.
    pub fn build(&self) -> BuiltPool {
        if self.workers == 0 {
            return BuiltPool { pool: None };
        }
        match ThreadPoolBuilder::new().num_threads(self.workers).build() {
            Ok(pool) => BuiltPool { pool: Some(pool) },
            Err(err) => {
                tracing::warn!(
                    "could not build {}-thread pool ({err}); using global pool",
                    self.workers
                );
                BuiltPool { pool: None }
            }
        }
    }

    /// One-shot [build](WorkerPool::build) and install.
    pub fn install<F, R>(&self, f: F) -> R
    where
        F: FnOnce() -> R + Send,
        R: Send,
    {
        self.build().install(f)
    }
}

/// Threads reserved by [WorkerPool::build]; dropped with the value.
#[derive(Debug)]
pub struct BuiltPool {
    pool: Option<ThreadPool>,
}

impl BuiltPool {
    pub fn threads(&self) -> usize {
        match &self.pool {
            Some(pool) => pool.current_num_threads(),
            None => rayon::current_num_threads(),
        }
    }

    pub fn install<F, R>(&self, f: F) -> R
    where
        F: FnOnce() -> R + Send,
        R: Send,
    {
        match &self.pool {
            Some(pool) => pool.install(f),
            None => f(),
        }
    }
}
