//! CLI module
//!
//! Command-line interface over the API client.
//!
//! # Commands
//!
//! - `login` - Log in and print the token
//! - `list` - Print every object of a resource
//! - `get` - Print one object
//! - `upload` - Upload documents to a queue
//! - `export` - Export annotations of a queue
//! - `schema-tree` - Print the field tree of a schema
//! - `own-organization` - Show the organization of the current user

mod commands;
mod runner;

pub use commands::{parse_filter, Cli, Commands, OutputFormat};
pub use runner::{schema_tree_lines, Runner};
