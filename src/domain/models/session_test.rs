use chrono::DateTime;

use super::ConversationSession;
use super::SessionStats;
use crate::domain::models::Role;

#[test]
fn it_appends_in_order() {
    let mut session = ConversationSession::new();
    let first = session.append(Role::User, "What is gravity?").clone();
    session.append(Role::Assistant, "Gravity is a force...");

    assert_eq!(session.len(), 2);
    assert_eq!(session.messages()[0], first);
    assert_eq!(session.messages()[0].role(), Role::User);
    assert_eq!(session.messages()[1].role(), Role::Assistant);
    assert_eq!(session.messages()[1].content(), "Gravity is a force...");
    assert!(session.messages()[0].timestamp() <= session.messages()[1].timestamp());
}

#[test]
fn it_counts_stats() {
    let mut session = ConversationSession::new();
    assert_eq!(session.stats(), SessionStats::default());

    session.append(Role::User, "one");
    session.append(Role::Assistant, "two");
    session.append(Role::User, "three");
    session.append(Role::User, "four");

    assert_eq!(
        session.stats(),
        SessionStats {
            total: 4,
            user_count: 3,
        }
    );
}

#[test]
fn it_tracks_stats_across_clears() {
    let mut session = ConversationSession::new();
    let script = [
        Some(Role::User),
        Some(Role::Assistant),
        None,
        Some(Role::Assistant),
        Some(Role::User),
        None,
        None,
        Some(Role::User),
    ];

    for step in script {
        match step {
            Some(role) => {
                session.append(role, "text");
            }
            None => session.clear(),
        }

        let stats = session.stats();
        let user_count = session
            .messages()
            .iter()
            .filter(|e| return e.role() == Role::User)
            .count();
        assert_eq!(stats.total, session.len());
        assert_eq!(stats.user_count, user_count);
    }
}

#[test]
fn it_clears_idempotently() {
    let mut session = ConversationSession::new();
    session.append(Role::User, "Hello");
    session.clear();
    session.clear();

    assert!(session.is_empty());
    assert_eq!(
        session.stats(),
        SessionStats {
            total: 0,
            user_count: 0,
        }
    );
}

#[test]
fn it_stores_error_replies_like_any_other() {
    let mut session = ConversationSession::new();
    session.append(Role::User, "Hello");
    session.append(Role::Assistant, "Error: Model not available");

    assert_eq!(session.stats().total, 2);
    assert_eq!(
        session.messages()[1].content(),
        "Error: Model not available"
    );
}

#[test]
fn it_exports_a_copy_of_messages() -> anyhow::Result<()> {
    let mut session = ConversationSession::new();
    session.append(Role::User, "What is gravity?");
    session.append(Role::Assistant, "Gravity is a force...");

    let snapshot = session.export_snapshot("llama3");
    session.clear();

    assert_eq!(snapshot.model, "llama3");
    assert_eq!(snapshot.messages.len(), 2);
    assert_eq!(snapshot.messages[0].content(), "What is gravity?");
    assert_eq!(snapshot.messages[1].role(), Role::Assistant);
    DateTime::parse_from_rfc3339(&snapshot.timestamp)?;

    return Ok(());
}

#[test]
fn it_exports_empty_sessions_as_empty_snapshots() {
    let session = ConversationSession::new();
    let snapshot = session.export_snapshot("mistral");
    assert!(snapshot.messages.is_empty());
}
