//! Request handler module
//!
//! Turns one HTTP request into one HTTP response: method validation,
//! path resolution inside the root directory, and static file serving.

pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;
