//! Display mapping for enriched notifications.
//!
//! Icon and label depend only on the category. Detail lines appear only
//! for fields that were actually found.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::types::{Category, EnrichedNotification};

/// One optional supplementary line under the main text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailLine {
    /// Field label.
    pub label: &'static str,
    /// Rendered value.
    pub value: String,
}

/// Render-ready form of a notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationView {
    /// Notification id.
    pub id: i64,
    /// Icon name for the category.
    pub icon: &'static str,
    /// Category label.
    pub label: &'static str,
    /// Tag-free message.
    pub text: String,
    /// Supplementary lines, in a fixed order.
    pub details: Vec<DetailLine>,
    /// Relative creation time.
    pub age: String,
    /// Read flag.
    pub is_read: bool,
    /// Whether details are shown.
    pub is_expanded: bool,
}

/// Icon name for a category.
pub fn icon(category: Category) -> &'static str {
    match category {
        Category::StatusChange => "refresh",
        Category::Comment => "message",
        Category::Assignment => "user-check",
        Category::NewTicket => "ticket",
        Category::Report => "bar-chart",
        Category::System => "bell",
    }
}

/// Display label for a category.
pub fn label(category: Category) -> &'static str {
    match category {
        Category::StatusChange => "Status atualizado",
        Category::Comment => "Novo comentário",
        Category::Assignment => "Chamado atribuído",
        Category::NewTicket => "Novo chamado",
        Category::Report => "Relatório",
        Category::System => "Sistema",
    }
}

/// Build the view for a notification, measuring age against `now`.
pub fn present(notification: &EnrichedNotification, now: DateTime<Utc>) -> NotificationView {
    let mut details = Vec::new();
    if let Some(id) = notification.ticket_id {
        details.push(DetailLine {
            label: "Chamado",
            value: format!("#{id}"),
        });
    }
    let optional = [
        ("Título", &notification.ticket_title),
        ("Técnico", &notification.technician_name),
        ("Status", &notification.new_status),
        ("Prioridade", &notification.priority),
    ];
    for (name, value) in optional {
        if let Some(value) = value {
            details.push(DetailLine {
                label: name,
                value: value.clone(),
            });
        }
    }

    NotificationView {
        id: notification.raw.id,
        icon: icon(notification.category),
        label: label(notification.category),
        text: notification.clean_message.clone(),
        details,
        age: relative_age(notification.raw.created_at, now),
        is_read: notification.raw.is_read,
        is_expanded: notification.is_expanded,
    }
}

/// "agora", "há 5 min", "há 3 h", "há 2 dias", or the date after a week.
pub fn relative_age(created_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(created_at);
    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();

    if minutes < 1 {
        "agora".to_owned()
    } else if minutes < 60 {
        format!("há {minutes} min")
    } else if hours < 24 {
        format!("há {hours} h")
    } else if days == 1 {
        "há 1 dia".to_owned()
    } else if days < 7 {
        format!("há {days} dias")
    } else {
        created_at.format("%d/%m/%Y").to_string()
    }
}
