// ============================================================
// INVENTORY RECORD TYPES
// ============================================================
// Canonical representation of one imported inventory item

use serde::{Deserialize, Serialize};

pub const COL_NUMERO: &str = "NUMERO";
pub const COL_DESCRICAO: &str = "DESCRIÇÃO";
pub const COL_SALA: &str = "SALA";
pub const COL_ESTADO: &str = "ESTADO DE CONSERVAÇÃO";
pub const COL_STATUS: &str = "STATUS";
pub const COL_ETIQUETADO: &str = "ETIQUETADO";
pub const COL_OBSERVACAO: &str = "OBSERVAÇÃO";
pub const COL_RECOMENDACAO: &str = "RECOMENDAÇÃO";

/// Column set every imported CSV must provide. The order is also the
/// column order of exported documents.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    COL_NUMERO,
    COL_DESCRICAO,
    COL_SALA,
    COL_ESTADO,
    COL_STATUS,
    COL_ETIQUETADO,
    COL_OBSERVACAO,
    COL_RECOMENDACAO,
];

/// One inventory item. All values are free text; `numero` is the natural
/// key within a batch (duplicates are possible, last write wins on update).
///
/// Serde names match the CSV column names so persisted JSON documents stay
/// interchangeable with the ones the browser UI stores.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryRecord {
    #[serde(rename = "NUMERO")]
    pub numero: String,

    #[serde(rename = "DESCRIÇÃO")]
    pub descricao: String,

    #[serde(rename = "SALA")]
    pub sala: String,

    #[serde(rename = "ESTADO DE CONSERVAÇÃO")]
    pub estado_conservacao: String,

    #[serde(rename = "STATUS")]
    pub status: String,

    #[serde(rename = "ETIQUETADO")]
    pub etiquetado: String,

    #[serde(rename = "OBSERVAÇÃO")]
    pub observacao: String,

    #[serde(rename = "RECOMENDAÇÃO")]
    pub recomendacao: String,
}

impl InventoryRecord {
    /// Build a record from header/value pairs. Unknown columns are ignored;
    /// known columns missing from the pairs stay empty.
    pub fn from_fields<'a, I>(fields: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut record = Self::default();
        for (column, value) in fields {
            record.set_field(column, value.to_string());
        }
        record
    }

    /// Look up a field value by column name (case-insensitive).
    pub fn field(&self, column: &str) -> Option<&str> {
        let column = column.trim().to_lowercase();
        let value = match column.as_str() {
            "numero" => &self.numero,
            "descrição" => &self.descricao,
            "sala" => &self.sala,
            "estado de conservação" => &self.estado_conservacao,
            "status" => &self.status,
            "etiquetado" => &self.etiquetado,
            "observação" => &self.observacao,
            "recomendação" => &self.recomendacao,
            _ => return None,
        };
        Some(value.as_str())
    }

    /// Set a field by column name (case-insensitive). Returns false when the
    /// column is not part of the fixed set.
    pub fn set_field(&mut self, column: &str, value: String) -> bool {
        let column = column.trim().to_lowercase();
        let slot = match column.as_str() {
            "numero" => &mut self.numero,
            "descrição" => &mut self.descricao,
            "sala" => &mut self.sala,
            "estado de conservação" => &mut self.estado_conservacao,
            "status" => &mut self.status,
            "etiquetado" => &mut self.etiquetado,
            "observação" => &mut self.observacao,
            "recomendação" => &mut self.recomendacao,
            _ => return false,
        };
        *slot = value;
        true
    }

    /// Field values in `REQUIRED_COLUMNS` order, for export.
    pub fn values(&self) -> [&str; 8] {
        [
            &self.numero,
            &self.descricao,
            &self.sala,
            &self.estado_conservacao,
            &self.status,
            &self.etiquetado,
            &self.observacao,
            &self.recomendacao,
        ]
    }
}

/// The verification form for one item, as presented to the operator.
/// Built by merging a parsed voice command with a looked-up record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemForm {
    pub numero: String,
    pub descricao: String,
    pub sala: String,
    pub estado: String,
    pub status: String,
    pub etiquetado: String,
    pub observacao: String,
    pub recomendacao: String,
}

impl From<&InventoryRecord> for ItemForm {
    fn from(record: &InventoryRecord) -> Self {
        Self {
            numero: record.numero.clone(),
            descricao: record.descricao.clone(),
            sala: record.sala.clone(),
            estado: record.estado_conservacao.clone(),
            status: record.status.clone(),
            etiquetado: record.etiquetado.clone(),
            observacao: record.observacao.clone(),
            recomendacao: record.recomendacao.clone(),
        }
    }
}

/// Partial update for one stored item. Absent fields keep their current
/// values; present fields win, including explicitly empty strings.
/// The identifier itself is never changed through an update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemUpdate {
    #[serde(rename = "DESCRIÇÃO", skip_serializing_if = "Option::is_none")]
    pub descricao: Option<String>,

    #[serde(rename = "SALA", skip_serializing_if = "Option::is_none")]
    pub sala: Option<String>,

    #[serde(rename = "ESTADO DE CONSERVAÇÃO", skip_serializing_if = "Option::is_none")]
    pub estado_conservacao: Option<String>,

    #[serde(rename = "STATUS", skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(rename = "ETIQUETADO", skip_serializing_if = "Option::is_none")]
    pub etiquetado: Option<String>,

    #[serde(rename = "OBSERVAÇÃO", skip_serializing_if = "Option::is_none")]
    pub observacao: Option<String>,

    #[serde(rename = "RECOMENDAÇÃO", skip_serializing_if = "Option::is_none")]
    pub recomendacao: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_access_is_case_insensitive() {
        let mut record = InventoryRecord::default();
        assert!(record.set_field("numero", "176".to_string()));
        assert!(record.set_field("Descrição", "Cadeira".to_string()));

        assert_eq!(record.field("NUMERO"), Some("176"));
        assert_eq!(record.field("descrição"), Some("Cadeira"));
        assert_eq!(record.field("INEXISTENTE"), None);
    }

    #[test]
    fn test_from_fields_ignores_unknown_columns() {
        let record = InventoryRecord::from_fields([
            ("NUMERO", "42"),
            ("SALA", "Sala 1"),
            ("COLUNA EXTRA", "ignorada"),
        ]);

        assert_eq!(record.numero, "42");
        assert_eq!(record.sala, "Sala 1");
        assert_eq!(record.descricao, "");
    }

    #[test]
    fn test_serde_names_match_columns() {
        let record = InventoryRecord::from_fields([("NUMERO", "7"), ("STATUS", "Localizado")]);
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["NUMERO"], "7");
        assert_eq!(json["STATUS"], "Localizado");
        assert_eq!(json["ESTADO DE CONSERVAÇÃO"], "");
    }

    #[test]
    fn test_values_follow_required_column_order() {
        let mut record = InventoryRecord::default();
        for (i, column) in REQUIRED_COLUMNS.iter().enumerate() {
            record.set_field(column, format!("v{}", i));
        }

        let values = record.values();
        for (i, value) in values.iter().enumerate() {
            assert_eq!(*value, format!("v{}", i));
        }
    }
}
