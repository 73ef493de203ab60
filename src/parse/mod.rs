pub mod line_parser;
pub mod line_serializer;

pub use line_parser::{parse_line, parse_string};
pub use line_serializer::{format_line, format_lines};
