//! Regex fallbacks for fields the backend did not tag.
//!
//! Every extractor reads the original message (tags included), never fails,
//! and returns `None` when nothing matches. Extractors are independent of
//! each other; only the pattern list inside one extractor is ordered.

use std::sync::LazyLock;

use regex::Regex;

/// A capitalised name: one or more title-case words, allowing Portuguese
/// particles (`da`, `de`, `do`, `das`, `dos`) between them.
const NAME: &str = r"\p{Lu}\p{L}*(?:\s+(?:d[aeo]s?\s+)?\p{Lu}\p{L}*)*";

static TICKET_ID: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"#(\d+)").ok());

static TECHNICIAN_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        // "o técnico João assumiu", "técnico Ana atribuiu", "técnico Rui foi designado"
        format!(r"(?i:t[ée]cnico)\s+({NAME})\s+(?i:assumiu|atribuiu|foi\s+designad[oa])").as_str(),
        // "Maria Silva assumiu o chamado"
        format!(r"\b({NAME})\s+(?i:assumiu\s+o\s+chamado)").as_str(),
        // "Carlos foi designado"
        format!(r"\b({NAME})\s+(?i:foi\s+designad[oa])").as_str(),
        // "atribuído ao técnico Carlos"
        format!(r"(?i:atribu[íi]d[oa]\s+(?:ao|à|a|para\s+o)\s+t[ée]cnico)\s+({NAME})").as_str(),
        // "técnico: Carlos" / "técnico Carlos" at the end of the text
        format!(r"(?i:t[ée]cnico):?\s+({NAME})\s*[.!]?\s*$").as_str(),
    ])
});

static TITLE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        // chamado #12 - Impressora quebrada
        r"(?i)chamado\s*#\d+\s*[-–—]\s*([^\[\n]+?)(?:\s+(?:foi|está|esta|recebeu|teve)\b|\s*\[|[.\n]|$)",
        // chamado "Impressora quebrada"
        r#"(?i)chamado\s*(?:#\d+\s*)?["“']([^"”']+)["”']"#,
        // chamado: Impressora quebrada
        r"(?i)chamado:\s*([^\s#\[\]][^\[\].\n]*)",
    ])
});

static STATUS: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:atualizado\s+para|alterado\s+para|mudado\s+para|status\s*:)\s*([^\[\].,;!\n]+)",
    )
    .ok()
});

static PRIORITY_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        // "prioridade ALTA", "prioridade: baixa", "prioridade alterada para média"
        r"(?i)prioridade\s*:?\s*(?:(?:alterada|definida|atualizada|mudada)\s+para\s+)?(baixa|m[ée]dia|alta)\b",
        // "de ALTA prioridade"
        r"(?i)\b(baixa|m[ée]dia|alta)\s+prioridade",
    ])
});

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .filter_map(|pattern| Regex::new(pattern).ok())
        .collect()
}

/// Try `matchers` in order and return the first value produced.
pub fn first_match<T, I, F>(text: &str, matchers: I) -> Option<T>
where
    I: IntoIterator<Item = F>,
    F: Fn(&str) -> Option<T>,
{
    matchers.into_iter().find_map(|matcher| matcher(text))
}

/// Trimmed first capture group, `None` when absent or blank.
fn capture(re: &Regex, text: &str) -> Option<String> {
    let value = re.captures(text)?.get(1)?.as_str().trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_owned())
    }
}

fn first_capture(patterns: &[Regex], text: &str) -> Option<String> {
    first_match(text, patterns.iter().map(|re| move |t: &str| capture(re, t)))
}

/// First `#<digits>` anywhere in the text.
pub fn extract_ticket_id(text: &str) -> Option<i64> {
    let caps = TICKET_ID.as_ref()?.captures(text)?;
    caps.get(1)?.as_str().parse().ok()
}

/// Technician name from assignment phrasing.
pub fn extract_technician_name(text: &str) -> Option<String> {
    first_capture(&TECHNICIAN_PATTERNS, text)
}

/// Ticket title from `chamado #n - title`, `chamado "title"` or `chamado: title`.
pub fn extract_ticket_title(text: &str) -> Option<String> {
    first_capture(&TITLE_PATTERNS, text)
}

/// Status text following `atualizado para`, `alterado para`, `mudado para` or `status:`.
///
/// Returned as captured, not normalised against the status vocabulary.
pub fn extract_status(text: &str) -> Option<String> {
    capture(STATUS.as_ref()?, text)
}

/// Priority level as `BAIXA`, `MEDIA` or `ALTA`.
///
/// `média` is folded to `MEDIA` so both spellings land on one value.
pub fn extract_priority(text: &str) -> Option<String> {
    first_capture(&PRIORITY_PATTERNS, text).map(|p| p.to_uppercase().replace('É', "E"))
}
