//! Importing inventory batches into named databases.
//!
//! Two entry points feed the same pipeline: raw CSV text posted by the
//! browser, or a published-sheet URL fetched server-side. Either way the
//! document is parsed, the accepted records become a new database, and
//! the full import report goes back to the caller so dropped lines stay
//! visible.

use serde::Serialize;
use tracing::info;

use crate::domain::database::{Database, DatabaseSummary};
use crate::domain::error::{AppError, Result};
use crate::domain::import::ImportReport;
use crate::infrastructure::csv::{decode_csv_bytes, parse_csv};
use crate::infrastructure::storage::DatabaseStore;

/// What one import produced and where it was stored.
#[derive(Debug, Serialize)]
pub struct ImportOutcome {
    pub database: DatabaseSummary,
    pub report: ImportReport,
}

pub struct ImportInventoryUseCase {
    store: DatabaseStore,
    client: reqwest::Client,
}

impl ImportInventoryUseCase {
    pub fn new(store: DatabaseStore) -> Self {
        Self {
            store,
            client: reqwest::Client::new(),
        }
    }

    /// Parse CSV text and persist the accepted records as a new database.
    pub fn import_csv(&self, name: &str, csv_text: &str) -> Result<ImportOutcome> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::ValidationError(
                "Nome da base de dados é obrigatório".to_string(),
            ));
        }

        let report = parse_csv(csv_text)?;
        let database = Database::new(name, report.items.clone());
        self.store.save(&database)?;

        info!(
            database = %database.id,
            items = report.items.len(),
            skipped = report.skipped_lines.len(),
            "inventory imported"
        );

        Ok(ImportOutcome {
            database: DatabaseSummary::from(&database),
            report,
        })
    }

    /// Download a published sheet as CSV and import it under `name`.
    pub async fn import_sheet(&self, name: &str, sheet_url: &str) -> Result<ImportOutcome> {
        let url = url::Url::parse(sheet_url)
            .map_err(|e| AppError::ValidationError(format!("URL inválida: {}", e)))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(AppError::ValidationError(format!(
                "Esquema de URL não suportado: {}",
                url.scheme()
            )));
        }

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(AppError::FetchError(format!(
                "Falha ao baixar a planilha ({})",
                response.status()
            )));
        }

        let bytes = response.bytes().await?;
        self.import_csv(name, &decode_csv_bytes(&bytes))
    }
}
