//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Rossum API command-line client
#[derive(Parser, Debug)]
#[command(name = "rossum")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// API base URL
    #[arg(long, global = true, env = "ROSSUM_API_BASE")]
    pub base_url: Option<String>,

    /// API token (takes precedence over username/password)
    #[arg(long, global = true, env = "ROSSUM_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Username for password login
    #[arg(long, global = true, env = "ROSSUM_USERNAME")]
    pub username: Option<String>,

    /// Password for password login
    #[arg(long, global = true, env = "ROSSUM_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Client configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "json")]
    pub output_format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in and print the API token
    Login,

    /// List objects of a resource (e.g. `queues`, `annotations`)
    List {
        /// Resource name
        resource: String,

        /// Filter as `key=value` (repeatable)
        #[arg(long = "filter", value_parser = parse_filter)]
        filters: Vec<(String, String)>,

        /// Ordering field, `-` prefix for descending (repeatable)
        #[arg(long)]
        ordering: Vec<String>,

        /// Related objects to embed (repeatable)
        #[arg(long)]
        sideload: Vec<String>,

        /// Content schema ids to sideload with `--sideload content`
        #[arg(long)]
        content_schema_id: Vec<String>,

        /// Stop after this many records
        #[arg(long)]
        max_records: Option<usize>,
    },

    /// Retrieve one object
    Get {
        /// Resource name
        resource: String,

        /// Object id
        id: i64,
    },

    /// Upload documents to a queue
    Upload {
        /// Target queue id
        #[arg(short, long)]
        queue: i64,

        /// Files to upload
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Wait for the upload tasks to succeed
        #[arg(long)]
        wait: bool,

        /// Give up waiting after this many seconds
        #[arg(long)]
        timeout_s: Option<u64>,
    },

    /// Export annotations of a queue
    Export {
        /// Queue id
        #[arg(short, long)]
        queue: i64,

        /// Export format: json, csv, xml or xlsx
        #[arg(short, long, default_value = "json")]
        format: String,

        /// Filter as `key=value` (repeatable)
        #[arg(long = "filter", value_parser = parse_filter)]
        filters: Vec<(String, String)>,

        /// Write the export to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the field tree of a schema
    SchemaTree {
        /// Schema id
        schema_id: i64,

        /// Include button datapoints
        #[arg(long)]
        include_buttons: bool,
    },

    /// Show the organization of the logged-in user
    OwnOrganization,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one object per line)
    Json,
    /// Indented JSON
    Pretty,
}

/// Parse a `key=value` filter argument
pub fn parse_filter(arg: &str) -> Result<(String, String), String> {
    match arg.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected key=value, got '{arg}'")),
    }
}
