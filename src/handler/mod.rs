//! Request handler module
//!
//! Bridges hyper requests onto the brochure application.

pub mod router;

// Re-export main entry point
pub use router::{finalize_response, handle_request, RequestContext};
