// Service exports
pub mod loader;
pub mod output;

pub use loader::{load_forest, load_records, parse_records, InputFormat, LoadError};
pub use output::{render, render_json, render_text, write_table, OutputError, OutputFormat};
