// ============================================================
// CSV INFRASTRUCTURE LAYER
// ============================================================
// Tokenization, tolerant import, and export of inventory sheets

pub mod exporter;
pub mod importer;
pub mod tokenizer;

pub use exporter::{escape_csv_field, export_csv};
pub use importer::{decode_csv_bytes, parse_csv, read_csv_file};
pub use tokenizer::{parse_line, split_lines};
