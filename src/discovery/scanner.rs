//! One-level project scanner
//!
//! Looks for the marker file directly under the root ("main") and inside
//! each immediate subdirectory. Nothing deeper is visited.

use std::fs;
use std::path::{Path, PathBuf};

use super::port::extract_port;
use super::Project;

/// Project name reported for a marker file found directly under the root
pub const MAIN_PROJECT: &str = "main";

/// Scans a root directory for projects carrying a marker file
#[derive(Debug, Clone)]
pub struct Scanner {
    root: PathBuf,
    marker_file: String,
    default_port: i64,
}

impl Scanner {
    pub fn new(root: impl Into<PathBuf>, marker_file: impl Into<String>, default_port: i64) -> Self {
        Self {
            root: root.into(),
            marker_file: marker_file.into(),
            default_port,
        }
    }

    /// Run a fresh scan.
    ///
    /// "main" comes first when present, followed by subdirectories in
    /// directory listing order. An unreadable root yields no subprojects.
    pub fn scan(&self) -> Vec<Project> {
        let mut projects = Vec::new();

        let main_marker = self.root.join(&self.marker_file);
        if is_marker(&main_marker) {
            projects.push(Project::new(MAIN_PROJECT, self.resolve_port(&main_marker)));
        }

        let Ok(entries) = fs::read_dir(&self.root) else {
            return projects;
        };

        for entry in entries.flatten() {
            // file_type() does not follow symlinks
            let is_dir = entry.file_type().is_ok_and(|t| t.is_dir());
            if !is_dir {
                continue;
            }

            let marker = entry.path().join(&self.marker_file);
            if is_marker(&marker) {
                let name = entry.file_name().to_string_lossy().into_owned();
                projects.push(Project::new(name, self.resolve_port(&marker)));
            }
        }

        projects
    }

    fn resolve_port(&self, marker: &Path) -> i64 {
        match extract_port(marker) {
            0 => self.default_port,
            port => port,
        }
    }
}

/// A marker exists when the path resolves to something other than a directory
fn is_marker(path: &Path) -> bool {
    fs::metadata(path).is_ok_and(|m| !m.is_dir())
}
