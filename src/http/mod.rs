//! HTTP protocol layer module
//!
//! Response-building helpers shared by the dispatcher and the server loop.

pub mod response;

// Re-export commonly used builders
pub use response::{
    build_400_response, build_404_response, build_405_response, build_500_response,
    build_ok_response, build_text_response,
};
