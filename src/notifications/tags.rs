//! Bracketed metadata tags embedded by the backend in notification text.
//!
//! The backend appends `[CHAMADO:#45]`, `[TITULO:...]` and `[TECNICO:...]`
//! to carry fields unambiguously. Keys are matched case-insensitively and a
//! value runs up to the next `]`.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

/// Tags whose values are captured.
static CAPTURED_TAG: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)\[(CHAMADO|TITULO|TECNICO):([^\]]*)\]").ok());

/// Every tag removed from the display text: the captured keys in any case,
/// plus any other upper-case `[KEY:value]` the backend emits.
static ANY_TAG: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"\[(?:(?i:CHAMADO|TITULO|TECNICO)|[A-Z][A-Z_]*):[^\]]*\]").ok()
});

/// `#<digits>`, optionally padded with whitespace.
static TICKET_REF: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^\s*#(\d+)\s*$").ok());

/// Fields carried by structured tags, plus the message with tags stripped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedTags {
    /// Numeric id from `[CHAMADO:#id]`.
    pub ticket_id: Option<i64>,
    /// Title from `[TITULO:...]`.
    pub ticket_title: Option<String>,
    /// Technician name from `[TECNICO:...]`.
    pub technician_name: Option<String>,
    /// Input with all tags removed and outer whitespace trimmed.
    pub clean_message: String,
}

/// Parse structured tags out of a raw notification message.
///
/// When a key appears more than once the last well-formed occurrence wins.
pub fn parse_tags(message: &str) -> ParsedTags {
    let mut parsed = ParsedTags {
        clean_message: strip_tags(message),
        ..ParsedTags::default()
    };

    let Some(re) = CAPTURED_TAG.as_ref() else {
        return parsed;
    };

    let mut seen = 0_usize;
    for caps in re.captures_iter(message) {
        seen = seen.saturating_add(1);
        let key = caps.get(1).map_or("", |m| m.as_str()).to_ascii_uppercase();
        let value = caps.get(2).map_or("", |m| m.as_str());
        match key.as_str() {
            "CHAMADO" => {
                if let Some(id) = parse_ticket_ref(value) {
                    parsed.ticket_id = Some(id);
                }
            }
            "TITULO" => {
                if let Some(title) = non_empty(value) {
                    parsed.ticket_title = Some(title);
                }
            }
            "TECNICO" => {
                if let Some(name) = non_empty(value) {
                    parsed.technician_name = Some(name);
                }
            }
            _ => {}
        }
    }

    if seen > 0 {
        debug!(tags = seen, "parsed structured notification tags");
    }
    parsed
}

/// Remove every recognised tag and trim the result.
pub fn strip_tags(message: &str) -> String {
    match ANY_TAG.as_ref() {
        Some(re) => re.replace_all(message, "").trim().to_owned(),
        None => message.trim().to_owned(),
    }
}

fn parse_ticket_ref(value: &str) -> Option<i64> {
    let caps = TICKET_REF.as_ref()?.captures(value)?;
    caps.get(1)?.as_str().parse().ok()
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}
