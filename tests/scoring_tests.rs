// tests/scoring_tests.rs
//
// Direct coverage of the grading rule, the session draw, token shape and
// the admin session store, without going through HTTP.

use std::collections::HashSet;
use std::time::Duration;

use podotest::handlers::session::{QUESTIONS_PER_SESSION, draw_question_ids};
use podotest::models::answer::{Selection, canonicalize_selection};
use podotest::models::question::{Choice, KIND_MULTI, KIND_SINGLE, Question};
use podotest::models::session::{Session, score_pct};
use podotest::utils::admin_session::AdminSessions;
use podotest::utils::token::{SESSION_TOKEN_LEN, generate_token};

fn question(kind: &str, correct: &[&str], all: &[&str]) -> Question {
    let choices: Vec<Choice> = all
        .iter()
        .map(|id| Choice {
            id: id.to_string(),
            label: format!("Choix {}", id),
            is_correct: correct.contains(id),
            feedback: None,
        })
        .collect();

    Question {
        id: 1,
        quiz_id: 1,
        kind: kind.to_string(),
        topic: "general".to_string(),
        content: "Question de test".to_string(),
        choices: serde_json::to_string(&choices).unwrap(),
    }
}

fn session_with_frozen(question_ids: &str) -> Session {
    Session {
        id: 1,
        token: "tok".to_string(),
        quiz_id: 1,
        created_at: chrono::Utc::now(),
        first_name: "Ada".to_string(),
        last_name: String::new(),
        consent: true,
        role: String::new(),
        experience: String::new(),
        shop_type: String::new(),
        question_ids: question_ids.to_string(),
    }
}

fn graded(q: &Question, selection: Selection) -> bool {
    q.grade(&canonicalize_selection(selection))
}

#[test]
fn single_kind_requires_the_exact_choice() {
    // Correct id "B" among {A, B, C, D}.
    let q = question(KIND_SINGLE, &["B"], &["A", "B", "C", "D"]);

    assert!(graded(&q, Selection::One("B".to_string())));
    assert!(!graded(&q, Selection::One("A".to_string())));
    assert!(!graded(&q, Selection::One("D".to_string())));
    // No selection at all.
    assert!(!graded(&q, Selection::One(String::new())));
    assert!(!graded(&q, Selection::Many(vec![])));
}

#[test]
fn multi_kind_is_set_equality_in_any_order() {
    // Correct ids {A, C, D}.
    let q = question(KIND_MULTI, &["A", "C", "D"], &["A", "B", "C", "D"]);

    let many = |ids: &[&str]| Selection::Many(ids.iter().map(|s| s.to_string()).collect());

    assert!(graded(&q, many(&["C", "A", "D"])));
    assert!(graded(&q, many(&["A", "C", "D"])));
    // Strict subset, superset and disjoint sets all fail.
    assert!(!graded(&q, many(&["A", "C"])));
    assert!(!graded(&q, many(&["A", "B", "C", "D"])));
    assert!(!graded(&q, many(&["B"])));
    assert!(!graded(&q, many(&[])));
}

#[test]
fn duplicate_submitted_ids_grade_like_their_set() {
    let q = question(KIND_MULTI, &["A", "C", "D"], &["A", "B", "C", "D"]);
    let sel = Selection::Many(
        ["A", "A", "D", "C", "D"].iter().map(|s| s.to_string()).collect(),
    );
    assert!(graded(&q, sel));
}

#[test]
fn canonicalize_sorts_and_deduplicates() {
    let sel = Selection::Many(vec!["D".into(), "A".into(), "D".into(), "C".into()]);
    assert_eq!(canonicalize_selection(sel), vec!["A", "C", "D"]);

    assert_eq!(
        canonicalize_selection(Selection::One("B".to_string())),
        vec!["B"]
    );
    assert!(canonicalize_selection(Selection::One(String::new())).is_empty());
}

#[test]
fn malformed_choice_blob_degrades_to_empty() {
    let mut q = question(KIND_SINGLE, &["B"], &["A", "B"]);
    q.choices = "{not json".to_string();

    assert!(q.choice_list().is_empty());
    assert!(q.correct_choice_ids().is_empty());
}

#[test]
fn frozen_list_parses_leniently() {
    // Order is preserved exactly as stored.
    let s = session_with_frozen("[7,2,9]");
    assert_eq!(s.frozen_ids(), vec![7, 2, 9]);

    // Malformed blobs mean "no frozen list", which triggers the fallback.
    let s = session_with_frozen("{broken");
    assert!(s.frozen_ids().is_empty());

    let s = session_with_frozen("");
    assert!(s.frozen_ids().is_empty());
}

#[test]
fn draw_takes_five_distinct_members() {
    let ids: Vec<i64> = (1..=11).collect();
    let drawn = draw_question_ids(&ids, QUESTIONS_PER_SESSION);

    assert_eq!(drawn.len(), 5);
    assert_eq!(drawn.iter().collect::<HashSet<_>>().len(), 5);
    assert!(drawn.iter().all(|id| ids.contains(id)));
}

#[test]
fn draw_returns_everything_when_the_bank_is_small() {
    let ids: Vec<i64> = vec![4, 8, 15];
    let drawn = draw_question_ids(&ids, QUESTIONS_PER_SESSION);

    assert_eq!(drawn.len(), 3);
    assert_eq!(
        drawn.iter().collect::<HashSet<_>>(),
        ids.iter().collect::<HashSet<_>>()
    );

    assert!(draw_question_ids(&[], QUESTIONS_PER_SESSION).is_empty());
}

#[test]
fn score_pct_rounds_and_survives_zero() {
    assert_eq!(score_pct(0, 0), 0);
    assert_eq!(score_pct(0, 5), 0);
    assert_eq!(score_pct(3, 5), 60);
    assert_eq!(score_pct(1, 3), 33);
    assert_eq!(score_pct(2, 3), 67);
    assert_eq!(score_pct(5, 5), 100);
}

#[test]
fn tokens_are_urlsafe_and_unguessable_shaped() {
    let token = generate_token(SESSION_TOKEN_LEN);
    assert_eq!(token.len(), SESSION_TOKEN_LEN);
    assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));

    // Two draws colliding would be astonishing.
    assert_ne!(generate_token(SESSION_TOKEN_LEN), token);
}

#[test]
fn admin_store_issues_validates_and_revokes() {
    let store = AdminSessions::new();
    let token = store.issue();

    assert!(store.is_valid(&token));
    assert!(!store.is_valid("someone-elses-token"));

    store.revoke(&token);
    assert!(!store.is_valid(&token));
}

#[test]
fn admin_tokens_expire() {
    let store = AdminSessions::with_ttl(Duration::from_millis(1));
    let token = store.issue();

    std::thread::sleep(Duration::from_millis(10));
    assert!(!store.is_valid(&token));
}
