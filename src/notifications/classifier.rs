//! Keyword classifier driven by an ordered rule table per portal role.
//!
//! The backend sends no typed payload, so the category is a best-effort
//! guess from phrasing. Rules are not mutually exclusive: the first rule
//! whose predicate holds decides, and [`Category::System`] catches the rest.

use super::types::{Category, Role};

/// Keyword predicate evaluated against the lowercased message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keywords {
    /// Holds when any phrase occurs.
    Any(&'static [&'static str]),
    /// Holds when any phrase occurs as a whole word, so acronyms such as
    /// `sla` do not fire inside `legislação`.
    Word(&'static [&'static str]),
    /// Holds when every group holds.
    AllOf(&'static [Keywords]),
}

impl Keywords {
    /// Evaluate against text that is already lowercased.
    pub fn matches(&self, lower: &str) -> bool {
        match self {
            Self::Any(phrases) => phrases.iter().any(|p| lower.contains(p)),
            Self::Word(words) => words.iter().any(|w| contains_word(lower, w)),
            Self::AllOf(groups) => groups.iter().all(|g| g.matches(lower)),
        }
    }
}

/// `word` occurs in `text` with no letter or digit on either side.
fn contains_word(text: &str, word: &str) -> bool {
    text.match_indices(word).any(|(start, found)| {
        let before = text[..start].chars().next_back();
        let after = text[start.saturating_add(found.len())..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}

/// One row of a rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    /// Category assigned when the predicate holds.
    pub category: Category,
    /// Phrases that trigger the rule.
    pub predicate: Keywords,
}

const NEW_TICKET: Rule = Rule {
    category: Category::NewTicket,
    predicate: Keywords::Any(&["novo chamado", "alta prioridade"]),
};

const COMMENT: Rule = Rule {
    category: Category::Comment,
    predicate: Keywords::Any(&["comentou", "comentário"]),
};

const MANAGER_RULES: &[Rule] = &[
    NEW_TICKET,
    Rule {
        category: Category::Assignment,
        predicate: Keywords::AllOf(&[
            Keywords::Any(&["técnico"]),
            Keywords::Any(&["assumiu", "atribuído"]),
        ]),
    },
    Rule {
        category: Category::StatusChange,
        predicate: Keywords::Any(&["atualizado para"]),
    },
    COMMENT,
    Rule {
        category: Category::Report,
        predicate: Keywords::Any(&["relatório", "estatística"]),
    },
    Rule {
        category: Category::Report,
        predicate: Keywords::Word(&["sla"]),
    },
];

const TECHNICIAN_RULES: &[Rule] = &[
    NEW_TICKET,
    Rule {
        category: Category::Assignment,
        predicate: Keywords::Any(&["atribuído", "assumiu"]),
    },
    Rule {
        category: Category::StatusChange,
        predicate: Keywords::Any(&["atualizado para", "status"]),
    },
    COMMENT,
];

const CLIENT_RULES: &[Rule] = &[
    Rule {
        category: Category::Assignment,
        predicate: Keywords::Any(&["técnico", "assumiu", "atribuído"]),
    },
    Rule {
        category: Category::StatusChange,
        predicate: Keywords::Any(&["atualizado para", "status"]),
    },
    COMMENT,
];

/// Ordered rule table for a role.
pub fn rules_for(role: Role) -> &'static [Rule] {
    match role {
        Role::Client => CLIENT_RULES,
        Role::Technician => TECHNICIAN_RULES,
        Role::Manager => MANAGER_RULES,
    }
}

/// Classify with an explicit rule table. Total: falls back to `System`.
pub fn classify_with(rules: &[Rule], message: &str) -> Category {
    let lower = message.to_lowercase();
    rules
        .iter()
        .find(|rule| rule.predicate.matches(&lower))
        .map_or(Category::System, |rule| rule.category)
}

/// Classify a message with the rule table of `role`.
pub fn classify(role: Role, message: &str) -> Category {
    classify_with(rules_for(role), message)
}
