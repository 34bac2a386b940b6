//! Request handling module

pub mod router;

pub use router::handle_request;
