//! Edit history navigation.

use qubit_core::{History, HistoryError};
use qubit_types::Snapshot;

fn texts(snapshot: &Snapshot) -> (String, String) {
    (snapshot.alpha().to_string(), snapshot.beta().to_string())
}

fn pair(alpha: &str, beta: &str) -> (String, String) {
    (alpha.to_string(), beta.to_string())
}

#[test]
fn undo_redo_and_branch_discard() {
    let mut history = History::new();
    history.push(("a1", "b1"));
    history.push(("a2", "b2"));

    assert_eq!(texts(history.undo().unwrap()), pair("a1", "b1"));
    assert_eq!(texts(history.redo().unwrap()), pair("a2", "b2"));
    assert_eq!(texts(history.redo().unwrap()), pair("a2", "b2"));

    assert_eq!(texts(history.undo().unwrap()), pair("a1", "b1"));
    history.push(("a3", "b3"));
    assert_eq!(texts(history.redo().unwrap()), pair("a3", "b3"));

    let chain: Vec<_> = history.iter().map(texts).collect();
    assert_eq!(chain, vec![pair("a1", "b1"), pair("a3", "b3")]);
}

#[test]
fn undo_past_the_first_entry_fails() {
    let mut history = History::new();
    assert_eq!(history.undo(), Err(HistoryError::Empty));

    history.push(("a1", "b1"));
    assert_eq!(history.undo(), Err(HistoryError::NoPriorState));
    assert_eq!(texts(history.peek_current().unwrap()), pair("a1", "b1"));
}

#[test]
fn truncate_forgets_the_redo_branch() {
    let mut history = History::new();
    for i in 1..=4 {
        history.push((format!("a{i}"), format!("b{i}")));
    }
    history.undo().unwrap();
    history.undo().unwrap();

    assert_eq!(texts(history.truncate_at_current().unwrap()), pair("a1", "b1"));
    assert_eq!(history.len(), 1);
    assert!(!history.can_redo());
    assert!(!history.can_undo());
}

#[test]
fn restart_returns_to_the_first_entry() {
    let mut history = History::new();
    history.push(("1", "0"));
    history.push(("0", "1"));
    history.push(("1/sqrt(2)", "1/sqrt(2)"));

    assert_eq!(texts(history.first().unwrap()), pair("1", "0"));
    assert_eq!(history.position(), Some(2));
}

#[test]
fn long_sessions_reuse_storage() {
    let mut history = History::new();
    history.push(("0", "0"));
    for i in 0..100 {
        history.push((format!("{i}"), "x"));
        history.undo().unwrap();
    }
    assert_eq!(history.len(), 2);
    assert_eq!(texts(history.redo().unwrap()), pair("99", "x"));
}
