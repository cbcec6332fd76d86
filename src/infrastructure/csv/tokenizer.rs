// ============================================================
// CSV TOKENIZER
// ============================================================
// Character-level scanning: quote-aware line splitting and field
// extraction. Dialect is fixed: comma separated, double-quote escaped.

/// Split a CSV document into lines. A newline inside an open double-quote
/// run does not terminate the line, so quoted fields may span multiple
/// physical lines. A leading byte-order-mark is dropped and `\r\n`/`\r`
/// line endings are normalized before splitting.
pub fn split_lines(text: &str) -> Vec<String> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = normalized.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                current.push(ch);
                if in_quotes && chars.peek() == Some(&'"') {
                    // Escaped quote, keep both characters for the field pass
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = !in_quotes;
                }
            }
            '\n' if !in_quotes => {
                lines.push(std::mem::take(&mut current));
            }
            _ => current.push(ch),
        }
    }

    lines.push(current);
    lines
}

/// Split one line into fields. A double quote toggles quoted mode, two
/// consecutive quotes inside a quoted field emit one literal quote, and a
/// comma outside quotes ends the field. Fields are trimmed after extraction.
pub fn parse_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes && chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = !in_quotes;
                }
            }
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }

    fields.push(current.trim().to_string());
    fields
}
