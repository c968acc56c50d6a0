//! Marker-driven parsing of the simulator debug log into a typed table.

pub mod parse;
pub mod table;

pub use parse::{parse_log_file, parse_log_text};
pub use table::{Row, Schema, Table};
