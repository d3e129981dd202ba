mod common;

use common::new_api;
use workshift::constants::{DEMO_PASSWORD, DEMO_USERNAME};
use workshift::seed::seed_demo_data;
use workshift::utils::datetime::DueStatus;

#[tokio::test]
async fn test_seed_creates_demo_board() {
    let api = new_api().await;
    let board = seed_demo_data(&api).await.unwrap().expect("first seed creates a board");

    // Seeding signs in as the demo user
    assert_eq!(api.current_user().await.unwrap().username, DEMO_USERNAME);

    let view = api.get_board(board.id).await.unwrap();
    let counts: Vec<usize> = view.lists.iter().map(|l| l.cards.len()).collect();
    assert_eq!(counts, vec![3, 1, 1]);

    let todo = &view.lists[0].cards;
    assert_eq!(todo[0].due_status, DueStatus::DueSoon);
    assert_eq!(todo[1].due_status, DueStatus::Overdue);
    assert_eq!(todo[0].label_ids.len(), 1);

    let guide = &view.lists[1].cards[0];
    assert_eq!((guide.checklist_done, guide.checklist_total), (1, 3));
    assert_eq!(guide.comment_count, 1);
    assert_eq!(guide.attachment_count, 1);

    assert!(view.lists[2].cards[0].card.is_completed);

    let labels: Vec<&str> = view.labels.iter().map(|l| l.name.as_str()).filter(|n| !n.is_empty()).collect();
    assert_eq!(labels, vec!["Feature", "Urgent"]);
}

#[tokio::test]
async fn test_seed_is_idempotent() {
    let api = new_api().await;
    seed_demo_data(&api).await.unwrap();
    let rows = api.snapshot().await.unwrap().row_count();

    assert!(seed_demo_data(&api).await.unwrap().is_none());
    assert_eq!(api.snapshot().await.unwrap().row_count(), rows);

    api.logout().await;
    api.login(DEMO_USERNAME, DEMO_PASSWORD).await.unwrap();
    assert_eq!(api.list_boards().await.unwrap().len(), 1);
}
