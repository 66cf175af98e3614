//! Properties that hold for every input: totality, purity, tag handling.

use chrono::Utc;
use deskwatch::notifications::classifier::classify;
use deskwatch::notifications::tags::parse_tags;
use deskwatch::notifications::{enrich, Category, RawNotification, Role};

const ROLES: [Role; 3] = [Role::Client, Role::Technician, Role::Manager];

const SAMPLES: &[&str] = &[
    "",
    " ",
    "[",
    "]]]][[[",
    "[CHAMADO:]",
    "[CHAMADO:#]",
    "#",
    "####12",
    "Chamado #7 atualizado para",
    "status:",
    "prioridade",
    "técnico assumiu",
    "😀 notificação com emoji 😀",
    "ÁÉÍÓÚ ãõç",
    "Novo chamado: [TITULO:x] [TECNICO:]",
    "\n\t\r",
];

fn raw(message: &str) -> RawNotification {
    RawNotification {
        id: 1,
        message: message.to_owned(),
        is_read: false,
        created_at: Utc::now(),
    }
}

#[test]
fn classification_is_total_and_within_role_allowlist() {
    for role in ROLES {
        for sample in SAMPLES {
            let category = classify(role, sample);
            assert!(Category::ALL.contains(&category));
            assert!(
                role.categories().contains(&category),
                "{role:?} produced {category:?} for {sample:?}"
            );
        }
    }
}

#[test]
fn enrich_is_deterministic() {
    for role in ROLES {
        for sample in SAMPLES {
            let input = raw(sample);
            assert_eq!(enrich(input.clone(), role), enrich(input, role));
        }
    }
}

#[test]
fn well_formed_ticket_tag_sets_id_and_is_stripped() {
    for id in [0_i64, 1, 45, 123, 98_765, i64::MAX] {
        let tag = format!("[CHAMADO:#{id}]");
        for message in [
            format!("{tag} Chamado atualizado para ABERTO"),
            format!("Comentário novo {tag}"),
            format!("Texto #999 antes {tag}"),
        ] {
            let e = enrich(raw(&message), Role::Manager);
            assert_eq!(e.ticket_id, Some(id), "message: {message}");
            assert!(!e.clean_message.contains(&tag));
            assert!(!e.clean_message.contains("CHAMADO:"));
        }
    }
}

#[test]
fn no_tags_and_no_hash_digits_means_no_ticket_id() {
    for message in [
        "Você tem um novo comentário no chamado.",
        "Chamado 7 atualizado",
        "Relatório 2024 disponível",
        "# sem número",
        "",
    ] {
        assert_eq!(enrich(raw(message), Role::Client).ticket_id, None);
    }
}

#[test]
fn clean_message_without_tags_is_trimmed_original() {
    for sample in SAMPLES {
        if sample.contains('[') {
            continue;
        }
        assert_eq!(parse_tags(sample).clean_message, sample.trim());
    }
}

#[test]
fn sparse_messages_still_enrich() {
    let e = enrich(raw(""), Role::Manager);
    assert_eq!(e.category, Category::System);
    assert_eq!(e.clean_message, "");
    assert_eq!(e.ticket_id, None);
    assert_eq!(e.ticket_title, None);
    assert_eq!(e.technician_name, None);
    assert_eq!(e.new_status, None);
    assert_eq!(e.priority, None);
}
