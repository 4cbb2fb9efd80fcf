//! Crawling: HTTP fetching, link extraction, the bounded worker pool, and
//! the crawl orchestrator

mod coordinator;
mod fetcher;
mod parser;
mod pool;

pub use coordinator::{crawl, Job};
pub use fetcher::{build_http_client, fetch_page, FetchedPage};
pub use parser::extract_links;
pub use pool::run_pool;
