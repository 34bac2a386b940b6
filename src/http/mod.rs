//! HTTP protocol layer module
//!
//! Response builders shared by the request handler.

pub mod response;

pub use response::{build_500_response, json_response};
