//! Project discovery module
//!
//! Scans a root directory one level deep for marker files and reports the
//! port each project declares.

pub mod port;
pub mod scanner;

pub use scanner::Scanner;

use serde::Serialize;

/// A discovered project
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Project {
    /// Directory name, or "main" for the root itself
    pub name: String,
    pub port: i64,
}

impl Project {
    pub fn new(name: impl Into<String>, port: i64) -> Self {
        Self {
            name: name.into(),
            port,
        }
    }
}

/// Document served for every discovery request
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryResponse {
    /// This server's own advertised address ("host:port")
    pub main: String,
    pub root_directory: String,
    pub projects: Vec<Project>,
}
