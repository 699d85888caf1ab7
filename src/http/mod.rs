//! HTTP protocol layer module
//!
//! Response builders and the cache-defeating header step, decoupled from
//! the file-serving logic.

pub mod cache;
pub mod response;

// Re-export commonly used builders
pub use response::{build_404_response, build_405_response, build_redirect_response};
