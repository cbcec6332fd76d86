// ============================================================
// CSV IMPORTER
// ============================================================
// Full-document ingestion: schema validation, per-line classification,
// import report assembly. Row-level problems never abort the import.

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use super::tokenizer::{parse_line, split_lines};
use crate::domain::error::{AppError, Result};
use crate::domain::import::{ImportReport, SkippedLine};
use crate::domain::inventory::{InventoryRecord, COL_NUMERO, REQUIRED_COLUMNS};

/// Skipped-line content is truncated to this many characters for display.
const MAX_REPORTED_CONTENT: usize = 200;

/// Parse a whole CSV document into an [`ImportReport`].
///
/// Only document-level problems are fatal: an empty document, or a header
/// missing one of the required columns. Every data-line anomaly is reported
/// as a [`SkippedLine`] and processing continues, so the caller can decide
/// whether to keep the partial batch.
pub fn parse_csv(text: &str) -> Result<ImportReport> {
    if text.trim().is_empty() {
        return Err(AppError::ParseError("Arquivo CSV vazio".to_string()));
    }

    let lines = split_lines(text);
    let headers = parse_line(&lines[0]);

    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .filter(|required| !headers.iter().any(|h| h == *required))
        .copied()
        .collect();
    if !missing.is_empty() {
        return Err(AppError::ValidationError(format!(
            "Colunas obrigatórias ausentes: {}",
            missing.join(", ")
        )));
    }

    let mut items = Vec::new();
    let mut skipped_lines = Vec::new();

    for (index, line) in lines.iter().enumerate().skip(1) {
        let line_number = index + 1;

        // Zero-character lines are common in exported CSVs; they are not
        // worth reporting. Whitespace-only lines still fall through below.
        if line.is_empty() {
            continue;
        }

        let values = parse_line(line);

        if values.iter().all(|value| value.is_empty()) {
            skipped_lines.push(skipped(
                line_number,
                line,
                "Linha vazia ou sem dados válidos".to_string(),
            ));
            continue;
        }

        if values.len() != headers.len() {
            skipped_lines.push(skipped(
                line_number,
                line,
                format!(
                    "Número de colunas incorreto. Esperado: {} colunas, Encontrado: {} colunas. \
                     Verifique vírgulas extras ou campos mal formatados.",
                    headers.len(),
                    values.len()
                ),
            ));
            continue;
        }

        let record = InventoryRecord::from_fields(
            headers
                .iter()
                .map(String::as_str)
                .zip(values.iter().map(String::as_str)),
        );

        if record.numero.trim().is_empty() {
            skipped_lines.push(skipped(
                line_number,
                line,
                format!(
                    "Campo {} vazio ou ausente. Este campo é obrigatório para identificar o item.",
                    COL_NUMERO
                ),
            ));
            continue;
        }

        items.push(record);
    }

    if !skipped_lines.is_empty() {
        warn!(
            skipped = skipped_lines.len(),
            imported = items.len(),
            "CSV import dropped lines"
        );
    }
    debug!(
        total_lines = lines.len(),
        imported = items.len(),
        "CSV document parsed"
    );

    Ok(ImportReport {
        items,
        total_lines: lines.len(),
        skipped_lines,
    })
}

/// Read a CSV file, falling back to Windows-1252 when the bytes are not
/// valid UTF-8. Spreadsheet exports from older Windows setups commonly
/// carry that encoding, and the accented column names break under a
/// lossy UTF-8 read.
pub fn read_csv_file(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;
    Ok(decode_csv_bytes(&bytes))
}

/// Decode raw CSV bytes: UTF-8 when valid, Windows-1252 otherwise.
pub fn decode_csv_bytes(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => {
            let (text, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
            text.into_owned()
        }
    }
}

fn skipped(line_number: usize, content: &str, reason: String) -> SkippedLine {
    SkippedLine {
        line_number,
        content: content.chars().take(MAX_REPORTED_CONTENT).collect(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "NUMERO,DESCRIÇÃO,SALA,ESTADO DE CONSERVAÇÃO,STATUS,ETIQUETADO,OBSERVAÇÃO,RECOMENDAÇÃO";

    fn doc(rows: &[&str]) -> String {
        let mut lines = vec![HEADER.to_string()];
        lines.extend(rows.iter().map(|r| r.to_string()));
        lines.join("\n")
    }

    #[test]
    fn test_parse_accepts_simple_rows() {
        let text = doc(&[
            "1,Cadeira,Sala 1,Bom,Localizado,Sim,,",
            "2,Mesa,Sala 2,Ocioso,Migrado,Não,,",
        ]);
        let report = parse_csv(&text).unwrap();

        assert_eq!(report.items.len(), 2);
        assert_eq!(report.total_lines, 3);
        assert!(report.skipped_lines.is_empty());
        assert_eq!(report.items[0].numero, "1");
        assert_eq!(report.items[1].descricao, "Mesa");
    }

    #[test]
    fn test_empty_document_is_fatal() {
        let err = parse_csv("  \n ").unwrap_err();
        assert!(matches!(err, AppError::ParseError(_)));
    }

    #[test]
    fn test_missing_columns_are_fatal_and_named() {
        let err = parse_csv("NUMERO,DESCRIÇÃO,SALA\n1,Cadeira,Sala 1").unwrap_err();
        match err {
            AppError::ValidationError(msg) => {
                assert!(msg.contains("STATUS"));
                assert!(msg.contains("RECOMENDAÇÃO"));
                assert!(!msg.contains("SALA,"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_quoted_comma_stays_in_one_field() {
        let text = doc(&[r#""1","Cadeira, de madeira","Sala 1","Bom","Localizado","Sim","","""#]);
        let report = parse_csv(&text).unwrap();

        assert_eq!(report.items.len(), 1);
        assert_eq!(report.items[0].descricao, "Cadeira, de madeira");
    }

    #[test]
    fn test_quoted_newline_spans_one_record() {
        let text = doc(&["1,\"Mesa de\nreunião\",Sala 3,Bom,Localizado,Sim,,"]);
        let report = parse_csv(&text).unwrap();

        assert_eq!(report.total_lines, 2);
        assert_eq!(report.items.len(), 1);
        assert_eq!(report.items[0].descricao, "Mesa de\nreunião");
    }

    #[test]
    fn test_column_count_mismatch_is_skipped_with_counts() {
        let text = doc(&["1,Cadeira,Sala 1,Bom,Localizado,Sim,"]);
        let report = parse_csv(&text).unwrap();

        assert!(report.items.is_empty());
        assert_eq!(report.skipped_lines.len(), 1);
        let skip = &report.skipped_lines[0];
        assert_eq!(skip.line_number, 2);
        assert!(skip.reason.contains("8"));
        assert!(skip.reason.contains("7"));
    }

    #[test]
    fn test_blank_numero_is_skipped() {
        let text = doc(&[r#""","Mesa","Sala 2","Bom","Localizado","Sim","","""#]);
        let report = parse_csv(&text).unwrap();

        assert!(report.items.is_empty());
        assert_eq!(report.skipped_lines.len(), 1);
        assert!(report.skipped_lines[0].reason.contains("NUMERO"));
    }

    #[test]
    fn test_empty_lines_are_silently_ignored() {
        let text = doc(&["", "1,Cadeira,Sala 1,Bom,Localizado,Sim,,", ""]);
        let report = parse_csv(&text).unwrap();

        assert_eq!(report.items.len(), 1);
        assert!(report.skipped_lines.is_empty());
        assert_eq!(report.total_lines, 4);
    }

    #[test]
    fn test_whitespace_only_line_is_reported() {
        let text = doc(&["   "]);
        let report = parse_csv(&text).unwrap();

        assert!(report.items.is_empty());
        assert_eq!(report.skipped_lines.len(), 1);
        assert!(report.skipped_lines[0].reason.contains("vazia"));
    }

    #[test]
    fn test_line_accounting_invariant() {
        let text = doc(&[
            "1,Cadeira,Sala 1,Bom,Localizado,Sim,,",
            "",
            "so,uma,linha,quebrada",
            ",Mesa,Sala 2,Bom,Localizado,Sim,,",
        ]);
        let report = parse_csv(&text).unwrap();

        // one accepted, one silently blank, two skipped
        assert_eq!(report.items.len(), 1);
        assert_eq!(report.skipped_lines.len(), 2);
        assert!(report.items.len() + report.skipped_lines.len() <= report.total_lines - 1);
    }

    #[test]
    fn test_reported_content_is_truncated() {
        let long_field = "x".repeat(500);
        let text = doc(&[&format!(",{},Sala,Bom,Localizado,Sim,,", long_field)]);
        let report = parse_csv(&text).unwrap();

        assert_eq!(report.skipped_lines.len(), 1);
        assert_eq!(report.skipped_lines[0].content.chars().count(), 200);
    }

    #[test]
    fn test_header_line_number_starts_at_one() {
        let text = doc(&["", "sem,numero"]);
        let report = parse_csv(&text).unwrap();
        // the bad line is the third physical line
        assert_eq!(report.skipped_lines[0].line_number, 3);
    }

    #[test]
    fn test_decode_windows_1252_bytes() {
        // "DESCRIÇÃO" in Windows-1252: Ç = 0xC7, Ã = 0xC3
        let bytes = b"DESCRI\xC7\xC3O";
        assert_eq!(decode_csv_bytes(bytes), "DESCRIÇÃO");
    }

    #[test]
    fn test_decode_utf8_passthrough() {
        let text = "NUMERO,DESCRIÇÃO";
        assert_eq!(decode_csv_bytes(text.as_bytes()), text);
    }
}
