//! Column resolution for imported sheets.
//!
//! Sheets arrive with header spellings that drift between exports, so the
//! identifier and room columns are found by walking an ordered list of
//! candidate names instead of hardcoding one header:
//! - exact pass: header equals a candidate (case-insensitive, trimmed)
//! - partial pass: header contains a candidate
//! - fallback: the first column
//!
//! Candidates are ordered by preference; the first candidate that matches
//! any header wins.

use crate::domain::error::{AppError, Result};

/// Candidate names for the item-identifier column, most specific first.
pub const ID_COLUMN_CANDIDATES: &[&str] = &["numero", "número", "id", "etiqueta", "tag", "codigo"];

/// Candidate names for the room column.
pub const ROOM_COLUMN_CANDIDATES: &[&str] = &[
    "sala",
    "local",
    "room",
    "localizacao",
    "localização",
    "ambiente",
    "setor",
];

/// Pick one column name out of `headers` using the ordered `candidates`.
///
/// Falls back to the first column when nothing matches; errors only when
/// there are no columns at all.
pub fn resolve_column(headers: &[String], candidates: &[&str]) -> Result<String> {
    if headers.is_empty() {
        return Err(AppError::ValidationError(
            "No columns available to resolve against".to_string(),
        ));
    }

    let normalized: Vec<String> = headers
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect();

    // Exact pass
    for candidate in candidates {
        if let Some(pos) = normalized.iter().position(|h| h == candidate) {
            return Ok(headers[pos].clone());
        }
    }

    // Partial pass
    for candidate in candidates {
        if let Some(pos) = normalized.iter().position(|h| h.contains(candidate)) {
            return Ok(headers[pos].clone());
        }
    }

    Ok(headers[0].clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::inventory::REQUIRED_COLUMNS;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_exact_match_is_case_insensitive() {
        let cols = headers(&["DESCRIÇÃO", "NUMERO", "SALA"]);
        let resolved = resolve_column(&cols, ID_COLUMN_CANDIDATES).unwrap();
        assert_eq!(resolved, "NUMERO");
    }

    #[test]
    fn test_candidate_order_wins_over_header_order() {
        // "id" appears earlier in the headers, but "numero" is the
        // preferred candidate.
        let cols = headers(&["id", "numero"]);
        let resolved = resolve_column(&cols, ID_COLUMN_CANDIDATES).unwrap();
        assert_eq!(resolved, "numero");
    }

    #[test]
    fn test_partial_match_catches_decorated_headers() {
        let cols = headers(&["DESCRIÇÃO", "SALA / SETOR"]);
        let resolved = resolve_column(&cols, ROOM_COLUMN_CANDIDATES).unwrap();
        assert_eq!(resolved, "SALA / SETOR");
    }

    #[test]
    fn test_falls_back_to_first_column() {
        let cols = headers(&["PATRIMONIO", "DESCRICAO BREVE"]);
        let resolved = resolve_column(&cols, ROOM_COLUMN_CANDIDATES).unwrap();
        assert_eq!(resolved, "PATRIMONIO");
    }

    #[test]
    fn test_empty_headers_is_an_error() {
        let err = resolve_column(&[], ID_COLUMN_CANDIDATES).unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[test]
    fn test_canonical_headers_resolve_to_expected_columns() {
        let cols: Vec<String> = REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect();
        assert_eq!(
            resolve_column(&cols, ID_COLUMN_CANDIDATES).unwrap(),
            "NUMERO"
        );
        assert_eq!(
            resolve_column(&cols, ROOM_COLUMN_CANDIDATES).unwrap(),
            "SALA"
        );
    }
}
