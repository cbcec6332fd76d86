use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::command::ParsedCommand;

static NUMERO_ANCHORED_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:(?:número|numero|item)\s+)?(\d+)\b").unwrap());

static NUMERO_RUN_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\d{3,}\b").unwrap());

static ESTADO_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bestado\s+(.+)").unwrap());

static SECTION_CUTOFF_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:observações|observacoes|observação|observacao|obs\b|recomend)").unwrap()
});

static OBSERVACAO_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:observações|observacoes|observação|observacao|obs)\b\s*(.*)").unwrap()
});

static OBSERVACAO_CUTOFF_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:estado\b|recomend)").unwrap());

static RECOMENDACAO_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\brecomend\w*\s*(.*)").unwrap());

static NEGATION_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(?:não|nao)\b").unwrap());

/// Status keywords in match order. Negated phrases come first because the
/// plain keyword is a substring of its negation.
const STATUS_KEYWORDS: &[(&str, &str)] = &[
    ("não localizado", "Não Localizado"),
    ("nao localizado", "Não Localizado"),
    ("localizado", "Localizado"),
    ("migrado", "Migrado"),
];

/// Interpret one finalized pt-BR transcript into a [`ParsedCommand`].
///
/// Every extraction rule runs independently over the same normalized text,
/// so one field never consumes input needed by another. A transcript that
/// matches nothing yields a command with only `raw_text` set.
pub fn interpret(transcript: &str) -> ParsedCommand {
    let text = normalize(transcript);

    let (estado, trailing) = match capture_estado(&text) {
        Some((estado, trailing)) => (Some(estado), trailing),
        None => (None, None),
    };

    // Spoken reports often append a description right after the state
    // without saying "observação"; that trailing text becomes the
    // observation when no explicit keyword was used.
    let observacao =
        extract_observacao(&text).or_else(|| trailing.map(|rest| capitalize(&rest)));

    ParsedCommand {
        numero: extract_numero(&text),
        estado,
        status: extract_status(&text),
        etiquetado: extract_etiquetado(&text),
        observacao,
        recomendacao: extract_recomendacao(&text),
        raw_text: transcript.to_string(),
    }
}

/// Lowercase the transcript and drop commas and periods. Recognizers
/// punctuate inconsistently, so matching runs on the stripped form.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| !matches!(c, ',' | '.'))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Item number: "número N"/"item N" (or a bare number) anchored at the
/// start of the phrase, else the first free-standing run of 3+ digits.
pub fn extract_numero(text: &str) -> Option<String> {
    if let Some(m) = NUMERO_ANCHORED_PATTERN
        .captures(text)
        .and_then(|caps| caps.get(1))
    {
        return Some(m.as_str().to_string());
    }
    NUMERO_RUN_PATTERN
        .find(text)
        .map(|m| m.as_str().to_string())
}

/// Conservation state named after the "estado" keyword.
pub fn extract_estado(text: &str) -> Option<String> {
    capture_estado(text).map(|(estado, _)| estado)
}

/// Status by keyword containment, first match wins.
pub fn extract_status(text: &str) -> Option<String> {
    STATUS_KEYWORDS
        .iter()
        .find(|(keyword, _)| text.contains(keyword))
        .map(|(_, label)| (*label).to_string())
}

/// Tag flag: mentioning the label at all answers the question, and any
/// negation word in the phrase flips it to "Não".
pub fn extract_etiquetado(text: &str) -> Option<String> {
    if !text.contains("etiqueta") {
        return None;
    }
    if NEGATION_PATTERN.is_match(text) {
        Some("Não".to_string())
    } else {
        Some("Sim".to_string())
    }
}

/// Observation named by an explicit keyword, truncated before the next
/// section keyword.
pub fn extract_observacao(text: &str) -> Option<String> {
    let capture = OBSERVACAO_PATTERN.captures(text)?.get(1)?.as_str();
    let capture = match OBSERVACAO_CUTOFF_PATTERN.find(capture) {
        Some(m) => &capture[..m.start()],
        None => capture,
    };
    let capture = capture.trim();
    if capture.is_empty() {
        None
    } else {
        Some(capitalize(capture))
    }
}

/// Recommendation: everything after the "recomend..." keyword word.
pub fn extract_recomendacao(text: &str) -> Option<String> {
    let capture = RECOMENDACAO_PATTERN
        .captures(text)?
        .get(1)?
        .as_str()
        .trim();
    if capture.is_empty() {
        None
    } else {
        Some(capitalize(capture))
    }
}

/// Capture after the "estado" keyword, truncated before the next section
/// keyword. Returns the (canonicalized) state plus any trailing text that
/// followed a recognized state word.
fn capture_estado(text: &str) -> Option<(String, Option<String>)> {
    let capture = ESTADO_PATTERN.captures(text)?.get(1)?.as_str();
    let capture = match SECTION_CUTOFF_PATTERN.find(capture) {
        Some(m) => &capture[..m.start()],
        None => capture,
    };
    let capture = capture.trim();
    if capture.is_empty() {
        return None;
    }

    let first = capture.split_whitespace().next().unwrap_or_default();
    if let Some(canonical) = canonical_estado(first) {
        let rest = capture[first.len()..].trim();
        let trailing = if rest.is_empty() {
            None
        } else {
            Some(rest.to_string())
        };
        return Some((canonical.to_string(), trailing));
    }

    // Unrecognized states are kept verbatim so the operator's wording
    // is not lost.
    Some((capitalize(capture), None))
}

fn canonical_estado(word: &str) -> Option<&'static str> {
    match word {
        "bom" => Some("Bom"),
        "irreversivel" | "irreversível" => Some("Irreversível"),
        "recuperavel" | "recuperável" => Some("Recuperável"),
        "ocioso" => Some("Ocioso"),
        _ => None,
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
