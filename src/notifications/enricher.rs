//! Composes tag parsing, fallback extraction and classification into one record.

use tracing::debug;

use super::classifier::{classify_with, rules_for, Rule};
use super::extractors::{
    extract_priority, extract_status, extract_technician_name, extract_ticket_id,
    extract_ticket_title,
};
use super::tags::parse_tags;
use super::types::{EnrichedNotification, RawNotification, Role};

/// Enrich one notification with the rule table of `role`.
pub fn enrich(raw: RawNotification, role: Role) -> EnrichedNotification {
    enrich_with(raw, rules_for(role))
}

/// Enrich a fetched list, preserving server order.
pub fn enrich_all(raws: Vec<RawNotification>, role: Role) -> Vec<EnrichedNotification> {
    let rules = rules_for(role);
    raws.into_iter().map(|raw| enrich_with(raw, rules)).collect()
}

/// Enrich with an explicit rule table.
///
/// Tag values take precedence over fallback extraction; classification
/// runs on the original text since stripping tags can remove trigger words.
pub fn enrich_with(raw: RawNotification, rules: &[Rule]) -> EnrichedNotification {
    let tags = parse_tags(&raw.message);
    let message = raw.message.as_str();

    let ticket_id = tags.ticket_id.or_else(|| extract_ticket_id(message));
    let ticket_title = tags.ticket_title.or_else(|| extract_ticket_title(message));
    let technician_name = tags
        .technician_name
        .or_else(|| extract_technician_name(message));
    let new_status = extract_status(message);
    let priority = extract_priority(message);
    let category = classify_with(rules, message);

    debug!(
        id = raw.id,
        category = %category,
        ticket_id = ?ticket_id,
        "enriched notification"
    );

    EnrichedNotification {
        category,
        clean_message: tags.clean_message,
        ticket_id,
        ticket_title,
        technician_name,
        new_status,
        priority,
        is_expanded: false,
        raw,
    }
}
