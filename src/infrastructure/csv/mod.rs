// ============================================================
// CSV EXCHANGE
// ============================================================
// Spreadsheet-facing serialization of keyword records

pub mod keyword_csv;

pub use keyword_csv::{export_to_path, import, import_from_path, parse, serialize, KeywordCsvRow};
