//! Command-line arguments

use clap::Parser;

/// Serve a JSON summary of the projects found under a root directory
#[derive(Debug, Parser)]
#[command(name = "discovery-server", version, about)]
pub struct Cli {
    /// Port to listen on [default: 5000]
    pub port: Option<u16>,

    /// Address to bind [default: 0.0.0.0]
    #[arg(long)]
    pub host: Option<String>,

    /// Directory scanned for projects [default: current directory]
    #[arg(long)]
    pub root: Option<String>,

    /// Marker file name identifying a project [default: service.marker]
    #[arg(long)]
    pub marker: Option<String>,
}
