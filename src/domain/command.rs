use serde::{Deserialize, Serialize};

use super::inventory::ItemUpdate;

/// Fields recognized in one spoken transcript. Every field is independently
/// optional; `None` means the speaker did not mention it, never an empty
/// string. The verbatim transcript is always carried along for display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedCommand {
    pub numero: Option<String>,
    pub estado: Option<String>,
    pub status: Option<String>,
    pub etiquetado: Option<String>,
    pub observacao: Option<String>,
    pub recomendacao: Option<String>,
    #[serde(rename = "rawText")]
    pub raw_text: String,
}

impl ParsedCommand {
    /// True when no field was recognized in the transcript.
    pub fn is_empty(&self) -> bool {
        self.numero.is_none()
            && self.estado.is_none()
            && self.status.is_none()
            && self.etiquetado.is_none()
            && self.observacao.is_none()
            && self.recomendacao.is_none()
    }
}

impl From<&ParsedCommand> for ItemUpdate {
    /// The updatable slice of a command. The spoken number selects the
    /// item and is not part of the update itself.
    fn from(command: &ParsedCommand) -> Self {
        Self {
            estado_conservacao: command.estado.clone(),
            status: command.status.clone(),
            etiquetado: command.etiquetado.clone(),
            observacao: command.observacao.clone(),
            recomendacao: command.recomendacao.clone(),
            ..Default::default()
        }
    }
}
