//! CLI domain: parse, route and output only.

mod output;
mod parse;
mod route;

pub use output::{format_fingerprints_json, format_fingerprints_text, map_error};
pub use parse::{Cli, Commands, OutputFormat};
pub use route::RunContext;
