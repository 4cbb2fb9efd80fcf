//! Crawl orchestrator
//!
//! Breadth-first, depth-bounded, deduplicated traversal from a seed URL.
//! Rounds are strictly sequential: each round takes a batch off the queue,
//! runs it through the bounded worker pool, records the results, and only
//! then expands the next frontier. The concurrency ceiling therefore bounds
//! simultaneous fetches and checker subprocesses at all times.

use crate::checker::CheckerHandle;
use crate::config::ValidateOptions;
use crate::crawler::{build_http_client, run_pool};
use crate::report::{print_page_line, PageResult, RunSummary};
use crate::urlutil::{is_crawlable, origin_of, CrawlPolicy};
use crate::validate::validate_one_url;
use crate::Result;
use std::collections::{HashSet, VecDeque};
use std::convert::Infallible;
use std::path::Path;
use url::Url;

/// One unit of crawl work: a URL at its BFS distance from the seed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub url: String,
    pub depth: u32,
}

/// Takes the next batch off the queue front
///
/// Pops up to `limit` jobs; jobs whose URL is already in the seen-set were
/// enqueued twice before being dispatched and are dropped as no-ops. Jobs
/// that survive are marked seen here, at dispatch, so every URL is
/// dispatched at most once per run.
fn next_batch(queue: &mut VecDeque<Job>, seen: &mut HashSet<String>, limit: usize) -> Vec<Job> {
    let mut batch = Vec::new();
    for _ in 0..limit.max(1) {
        let job = match queue.pop_front() {
            Some(j) => j,
            None => break,
        };
        if seen.insert(job.url.clone()) {
            batch.push(job);
        }
    }
    batch
}

/// Crawls from a seed URL, validating every reachable page within policy
///
/// Each job's worker wraps the page validator in a failure-absorbing shim:
/// fetch, parse, and checker errors become synthetic failed results, so the
/// fail-fast pool never aborts a round. Pages discovered at the maximum
/// depth are validated but not expanded.
///
/// # Arguments
///
/// * `seed` - The starting page, depth 0
/// * `options` - Depth/concurrency/origin policy and output mode
/// * `checker` - Resolved checker handle, shared by all jobs
/// * `work_dir` - Directory where fetched pages are persisted
pub async fn crawl(
    seed: &Url,
    options: &ValidateOptions,
    checker: &CheckerHandle,
    work_dir: &Path,
) -> Result<RunSummary> {
    let client = build_http_client(&options.user_agent)?;
    let seed_origin = origin_of(seed);
    let policy = CrawlPolicy {
        same_origin: options.same_origin,
        strip_query: options.strip_query,
        exclude: options.exclude.clone(),
    };

    let mut queue: VecDeque<Job> = VecDeque::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut summary = RunSummary::default();

    queue.push_back(Job {
        url: seed.to_string(),
        depth: 0,
    });

    tracing::info!(
        "Starting crawl of {} (depth {}, concurrency {})",
        seed,
        options.depth,
        options.concurrency
    );

    let mut round = 0usize;
    while !queue.is_empty() {
        let batch = next_batch(&mut queue, &mut seen, options.concurrency);
        if batch.is_empty() {
            continue;
        }
        round += 1;
        tracing::debug!("Round {}: dispatching {} jobs", round, batch.len());

        let results: Vec<PageResult> = match run_pool(batch, options.concurrency, |job| {
            let client = &client;
            async move {
                let result =
                    match validate_one_url(client, checker, &job.url, job.depth, options, work_dir)
                        .await
                    {
                        Ok(r) => r,
                        Err(e) => {
                            tracing::debug!("Page {} failed: {}", job.url, e);
                            PageResult::failed(&job.url, job.depth, e.to_string())
                        }
                    };
                Ok::<_, Infallible>(result)
            }
        })
        .await
        {
            Ok(results) => results,
            Err(never) => match never {},
        };

        for result in &results {
            summary.record(result);
            if !options.json {
                print_page_line(result);
            }

            if result.depth < options.depth {
                for link in &result.links {
                    if is_crawlable(link, &policy, &seed_origin) && !seen.contains(link) {
                        queue.push_back(Job {
                            url: link.clone(),
                            depth: result.depth + 1,
                        });
                    }
                }
            }
        }
    }

    tracing::info!(
        "Crawl complete: {} passed, {} failed over {} pages",
        summary.passed,
        summary.failed,
        summary.results.len()
    );

    Ok(summary)
}
