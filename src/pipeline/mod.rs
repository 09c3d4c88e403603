//! Pipeline entry points for batch operations.
//!
//! - `read_url_column`: Read the URLs to resolve from a delimited file
//! - `run_batch`: Resolve them concurrently and aggregate by domain

pub mod batch;
pub mod input;

pub use batch::{Aggregate, BatchOutcome, run_batch, write_results};
pub use input::read_url_column;
