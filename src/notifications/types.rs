//! Notification records as fetched from the ticket API and as enriched locally.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Semantic category assigned to a notification by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// A ticket moved to a new status.
    StatusChange,
    /// Someone commented on a ticket.
    Comment,
    /// A technician took or was given a ticket.
    Assignment,
    /// A ticket was opened (or arrived flagged high priority).
    NewTicket,
    /// Report, statistics or SLA digest.
    Report,
    /// Anything the rules did not recognise.
    System,
}

impl Category {
    /// The complete fixed category set.
    pub const ALL: [Category; 6] = [
        Self::StatusChange,
        Self::Comment,
        Self::Assignment,
        Self::NewTicket,
        Self::Report,
        Self::System,
    ];

    /// Stable snake_case name, identical to the serialised form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::StatusChange => "status_change",
            Self::Comment => "comment",
            Self::Assignment => "assignment",
            Self::NewTicket => "new_ticket",
            Self::Report => "report",
            Self::System => "system",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Portal role of the user viewing the notifications.
///
/// Each role sees a slightly different vocabulary, so the classifier
/// keeps one rule table per role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Ticket requester.
    #[default]
    Client,
    /// Support technician.
    Technician,
    /// Help-desk manager.
    Manager,
}

impl Role {
    /// Categories this role's classifier can produce.
    pub fn categories(self) -> &'static [Category] {
        match self {
            Self::Client => &[
                Category::StatusChange,
                Category::Comment,
                Category::Assignment,
                Category::System,
            ],
            Self::Technician => &[
                Category::StatusChange,
                Category::Comment,
                Category::Assignment,
                Category::NewTicket,
                Category::System,
            ],
            Self::Manager => &Category::ALL,
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "client" | "cliente" => Ok(Self::Client),
            "technician" | "tecnico" | "técnico" => Ok(Self::Technician),
            "manager" | "gestor" => Ok(Self::Manager),
            other => Err(format!(
                "unknown role {other:?}, expected client, technician or manager"
            )),
        }
    }
}

/// A notification exactly as the ticket API returns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawNotification {
    /// Server-side notification id.
    pub id: i64,
    /// Free-text message, possibly carrying `[KEY:value]` tags.
    #[serde(alias = "mensagem")]
    pub message: String,
    /// Whether the user already read it.
    #[serde(alias = "lida", alias = "isRead", default)]
    pub is_read: bool,
    /// Creation time on the server.
    #[serde(
        alias = "dataCriacao",
        alias = "createdAt",
        deserialize_with = "deserialize_timestamp"
    )]
    pub created_at: DateTime<Utc>,
}

/// A notification plus everything derived from its message text.
///
/// Never persisted; rebuilt on every fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnrichedNotification {
    /// The record as fetched.
    #[serde(flatten)]
    pub raw: RawNotification,
    /// Semantic category.
    pub category: Category,
    /// Message with every structured tag removed, trimmed.
    pub clean_message: String,
    /// Ticket the notification refers to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket_id: Option<i64>,
    /// Ticket title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket_title: Option<String>,
    /// Technician named by the notification.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technician_name: Option<String>,
    /// Status text as captured, not normalised.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_status: Option<String>,
    /// Priority, uppercased.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    /// Local UI toggle.
    pub is_expanded: bool,
}

/// Accept RFC 3339 or the backend's offset-less `YYYY-MM-DDTHH:MM:SS[.fff]` (read as UTC).
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).ok_or_else(|| {
        serde::de::Error::custom(format!("unrecognised timestamp: {raw:?}"))
    })
}

/// Parse a server timestamp, returning `None` when no known format matches.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}
