//! Report rendering and data export.

pub mod export;
pub mod generator;

pub use export::write_csv_file;
pub use generator::{generate_json_report, generate_markdown_report, generate_text_report};
