//! HTTP protocol layer module
//!
//! Provides HTTP protocol-related base functionality, decoupled from the brochure domain.

pub mod cache;
pub mod mime;
pub mod response;

// Re-export commonly used types
pub use response::{
    build_304_response, build_cached_response, build_moved_permanently, build_rendered_response,
    CacheHeaders,
};
