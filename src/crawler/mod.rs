//! Crawl orchestration: search form submission, result-link discovery,
//! detail-page extraction and pagination.
//!
//! The main entry point is [`process_region`], which runs the whole
//! fixed sequence for one region and returns whatever records survived.
//! Failures are isolated per record; a region-level failure yields an empty
//! result set instead of an error.

mod detail;
mod links;
mod pagination;
mod search_form;

// Re-export public API
pub use detail::{split_date_time, visit_detail};
pub use links::{discover_result_links, filter_detail_links, normalize_detail_href};
pub use pagination::process_region;
pub use search_form::{submit_search, SearchStage};
