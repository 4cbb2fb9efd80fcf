//! Bounded, order-preserving worker pool
//!
//! A thin structured-concurrency primitive: run a list of jobs through an
//! async worker with a fixed concurrency ceiling, returning results in job
//! order regardless of completion order.

use futures::stream::{self, StreamExt, TryStreamExt};
use std::future::Future;

/// Executes `jobs` through `worker` with at most `limit` running concurrently
///
/// # Contract
///
/// - `results[i]` is the outcome of `jobs[i]` whatever the completion order
/// - Dispatch is in job-list order: job i+1 never starts while job i is
///   undispatched and a slot is free
/// - An empty job list returns immediately without invoking the worker
/// - `limit` is clamped to a minimum of 1
/// - Fail-fast: the first worker `Err` abandons remaining dispatch and is
///   returned to the caller. Callers that need best-effort batches make the
///   worker infallible and encode failure in its output value, which is how
///   the crawl orchestrator uses this pool.
///
/// # Example
///
/// ```
/// use sitecheck::crawler::run_pool;
///
/// # async fn demo() {
/// let results = run_pool(vec![1, 2, 3], 2, |n| async move {
///     Ok::<_, std::io::Error>(n * 10)
/// })
/// .await
/// .unwrap();
/// assert_eq!(results, vec![10, 20, 30]);
/// # }
/// ```
pub async fn run_pool<J, T, E, F, Fut>(
    jobs: Vec<J>,
    limit: usize,
    worker: F,
) -> Result<Vec<T>, E>
where
    F: Fn(J) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    if jobs.is_empty() {
        return Ok(Vec::new());
    }

    let limit = limit.max(1);

    stream::iter(jobs.into_iter().map(worker))
        .buffered(limit)
        .try_collect()
        .await
}
