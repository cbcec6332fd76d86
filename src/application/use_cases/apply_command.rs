//! Applying voice commands and manual edits to inventory items.
//!
//! A parsed command carries only what the operator said; merging it with
//! the stored record keeps everything else untouched (last write wins per
//! field). The same merge backs manual form edits, which arrive as a
//! partial update.

use tracing::info;

use crate::domain::command::ParsedCommand;
use crate::domain::error::{AppError, Result};
use crate::domain::inventory::{InventoryRecord, ItemForm, ItemUpdate};
use crate::infrastructure::storage::DatabaseStore;

use super::find_item::find_item_position;

/// Merge a command with the looked-up record into a complete form.
///
/// The record provides the current values; fields the command mentions
/// overwrite them. With no record, the command fills a blank form.
pub fn fill_form(command: &ParsedCommand, record: Option<&InventoryRecord>) -> ItemForm {
    let mut form = record.map(ItemForm::from).unwrap_or_default();

    if let Some(numero) = &command.numero {
        form.numero = numero.clone();
    }
    if let Some(estado) = &command.estado {
        form.estado = estado.clone();
    }
    if let Some(status) = &command.status {
        form.status = status.clone();
    }
    if let Some(etiquetado) = &command.etiquetado {
        form.etiquetado = etiquetado.clone();
    }
    if let Some(observacao) = &command.observacao {
        form.observacao = observacao.clone();
    }
    if let Some(recomendacao) = &command.recomendacao {
        form.recomendacao = recomendacao.clone();
    }

    form
}

/// Overwrite the record's fields with the update's present fields.
pub fn apply_update(record: &mut InventoryRecord, update: &ItemUpdate) {
    if let Some(descricao) = &update.descricao {
        record.descricao = descricao.clone();
    }
    if let Some(sala) = &update.sala {
        record.sala = sala.clone();
    }
    if let Some(estado) = &update.estado_conservacao {
        record.estado_conservacao = estado.clone();
    }
    if let Some(status) = &update.status {
        record.status = status.clone();
    }
    if let Some(etiquetado) = &update.etiquetado {
        record.etiquetado = etiquetado.clone();
    }
    if let Some(observacao) = &update.observacao {
        record.observacao = observacao.clone();
    }
    if let Some(recomendacao) = &update.recomendacao {
        record.recomendacao = recomendacao.clone();
    }
}

/// Apply a partial update to one item of a stored database and persist
/// the result. Returns the updated record.
pub fn update_item(
    store: &DatabaseStore,
    database_id: &str,
    numero: &str,
    update: &ItemUpdate,
) -> Result<InventoryRecord> {
    let mut database = store.get(database_id)?.ok_or_else(|| {
        AppError::NotFound(format!("Base de dados {} não encontrada", database_id))
    })?;

    let position = find_item_position(&database.items, numero)?
        .ok_or_else(|| AppError::NotFound(format!("Item {} não encontrado", numero)))?;

    apply_update(&mut database.items[position], update);
    store.save(&database)?;
    info!(database = %database_id, numero = %numero, "item updated");

    Ok(database.items[position].clone())
}

/// Voice path: the spoken number selects the item, the remaining fields
/// become the update.
pub fn update_item_from_command(
    store: &DatabaseStore,
    database_id: &str,
    command: &ParsedCommand,
) -> Result<InventoryRecord> {
    let numero = command.numero.as_deref().ok_or_else(|| {
        AppError::ValidationError("Comando não contém o número do item".to_string())
    })?;

    update_item(store, database_id, numero, &ItemUpdate::from(command))
}
