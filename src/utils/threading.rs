//! # Threading Configuration
//!
//! Rayon pools for the two parallel stages (group merging and pairwise strain
//! comparison). Both collect results in a fixed order, so the thread count
//! never changes the output.

use crate::error::{ParamergeError, Result};

/// Create a configured thread pool.
pub fn build_thread_pool(n_threads: usize) -> Result<rayon::ThreadPool> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(n_threads)
        .thread_name(|i| format!("paramerge-worker-{}", i))
        .build()
        .map_err(|e| ParamergeError::config(format!("Failed to create thread pool: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_runs_on_named_workers() {
        let pool = build_thread_pool(2).unwrap();
        assert_eq!(pool.current_num_threads(), 2);
        let name = pool.install(|| std::thread::current().name().map(str::to_string));
        assert_eq!(name.as_deref().map(|n| n.starts_with("paramerge-worker-")), Some(true));
    }
}
