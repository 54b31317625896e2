// ============================================================
// KEYWORD CSV CODEC
// ============================================================
// Serialize keyword records to a spreadsheet-facing CSV and parse that
// format back. Import is lenient: the file is assumed to be human-edited.

use std::path::Path;

use csv::ReaderBuilder;
use tracing::warn;

use crate::domain::error::{AppError, Result};
use crate::domain::keyword::{ArticleType, KeywordRecord, KeywordType};

const BOM: &str = "\u{feff}";
const H2_SEPARATOR: &str = " / ";
const FLAG_DONE: &str = "作成済み";
const FLAG_NOT_DONE: &str = "未作成";

/// Fixed 12-column layout. The order is part of the format.
const HEADERS: [&str; 12] = [
    "親キーワード",
    "子キーワード",
    "キーワードタイプ",
    "ターゲット",
    "検索意図",
    "記事タイプ",
    "H2構成",
    "現在順位",
    "CV貢献度",
    "記事作成状況",
    "作成日",
    "更新日",
];

/// One data row as read from the file, before any enum validation.
#[derive(Debug, Clone)]
pub struct KeywordCsvRow {
    pub parent_keyword: String,
    pub child_keyword: String,
    pub keyword_type: String,
    pub target: String,
    pub search_intent: String,
    pub article_type: String,
    pub h2_structure: Vec<String>,
    pub current_rank: Option<u32>,
    pub cv_contribution: Option<f64>,
    pub is_article_created: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// Serialize records for spreadsheet review: UTF-8 BOM, every field quoted,
/// booleans as the human-readable tokens, optional numerics as blanks.
pub fn serialize(records: &[KeywordRecord]) -> String {
    let mut out = String::from(BOM);
    out.push_str(&quoted_line(&HEADERS.map(String::from)));

    for record in records {
        let fields = [
            record.parent_keyword.clone(),
            record.child_keyword.clone(),
            record.keyword_type.as_str().to_string(),
            record.target.clone(),
            record.search_intent.clone(),
            record.article_type.as_str().to_string(),
            record.h2_structure.join(H2_SEPARATOR),
            record.current_rank.map(|r| r.to_string()).unwrap_or_default(),
            record
                .cv_contribution
                .map(|c| c.to_string())
                .unwrap_or_default(),
            if record.is_article_created {
                FLAG_DONE.to_string()
            } else {
                FLAG_NOT_DONE.to_string()
            },
            record.created_at.to_rfc3339(),
            record.updated_at.to_rfc3339(),
        ];
        out.push_str(&quoted_line(&fields));
    }

    out
}

fn quoted_line(fields: &[String; 12]) -> String {
    let quoted: Vec<String> = fields
        .iter()
        .map(|f| format!("\"{}\"", f.replace('"', "\"\"")))
        .collect();
    format!("{}\r\n", quoted.join(","))
}

/// Parse CSV text into raw rows. Never errors: unreadable rows and rows
/// with fewer than 7 fields are skipped. Keyword/article type columns stay
/// raw strings here; enum validation belongs to `import`.
pub fn parse(text: &str) -> Vec<KeywordCsvRow> {
    let text = text.strip_prefix(BOM).unwrap_or(text);

    let mut reader = ReaderBuilder::new()
        .flexible(true) // human-edited rows come in ragged
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(err) => {
                warn!(row = index + 1, error = %err, "Skipping unreadable CSV row");
                continue;
            }
        };
        if record.len() < 7 {
            warn!(
                row = index + 1,
                fields = record.len(),
                "Skipping CSV row with too few fields"
            );
            continue;
        }

        let get = |i: usize| record.get(i).unwrap_or("").trim().to_string();
        rows.push(KeywordCsvRow {
            parent_keyword: get(0),
            child_keyword: get(1),
            keyword_type: get(2),
            target: get(3),
            search_intent: get(4),
            article_type: get(5),
            h2_structure: get(6)
                .split(H2_SEPARATOR)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect(),
            current_rank: get(7).parse().ok(),
            cv_contribution: get(8).parse().ok(),
            is_article_created: get(9) == FLAG_DONE,
            created_at: get(10),
            updated_at: get(11),
        });
    }

    rows
}

/// Import CSV text as keyword records.
///
/// Layered on `parse`: short rows are already gone, but type tokens outside
/// the closed enums are rejected here rather than coerced. Imported rows
/// always get a fresh id; blank timestamp columns fall back to now.
pub fn import(text: &str) -> Result<Vec<KeywordRecord>> {
    let rows = parse(text);
    let mut records = Vec::with_capacity(rows.len());

    for row in rows {
        let keyword_type = KeywordType::parse(&row.keyword_type).ok_or_else(|| {
            AppError::ValidationError(format!(
                "Unknown keyword type '{}' for '{}'",
                row.keyword_type, row.child_keyword
            ))
        })?;
        let article_type = ArticleType::parse(&row.article_type).ok_or_else(|| {
            AppError::ValidationError(format!(
                "Unknown article type '{}' for '{}'",
                row.article_type, row.child_keyword
            ))
        })?;

        let mut record = KeywordRecord::new(
            row.parent_keyword,
            row.child_keyword,
            keyword_type,
            row.target,
            row.search_intent,
            article_type,
            row.h2_structure,
        );
        record.current_rank = row.current_rank;
        record.cv_contribution = row.cv_contribution;
        record.is_article_created = row.is_article_created;
        if let Ok(created) = row.created_at.parse() {
            record.created_at = created;
        }
        if let Ok(updated) = row.updated_at.parse() {
            record.updated_at = updated;
        }
        records.push(record);
    }

    Ok(records)
}

/// Write an export to disk. The serialized text already carries the BOM.
pub fn export_to_path(records: &[KeywordRecord], path: &Path) -> Result<()> {
    std::fs::write(path, serialize(records))
        .map_err(|e| AppError::Internal(format!("Failed to write CSV {}: {}", path.display(), e)))
}

/// Read and import a CSV file, tolerating the encodings spreadsheet apps
/// actually save: UTF-8 (with or without BOM) and Shift_JIS.
pub fn import_from_path(path: &Path) -> Result<Vec<KeywordRecord>> {
    let bytes = std::fs::read(path)
        .map_err(|e| AppError::Internal(format!("Failed to read CSV {}: {}", path.display(), e)))?;
    import(&decode(&bytes))
}

fn decode(bytes: &[u8]) -> String {
    if let Ok(text) = std::str::from_utf8(bytes) {
        return text.to_string();
    }
    let (text, _, had_errors) = encoding_rs::SHIFT_JIS.decode(bytes);
    if !had_errors {
        return text.into_owned();
    }
    String::from_utf8_lossy(bytes).to_string()
}
