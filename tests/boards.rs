mod common;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use common::{api_as, board_with_lists, new_api_with, register, sign_in};
use workshift::api::{ApiError, BoardRole, BoardUpdate};
use workshift::config::{Config, LabelPreset};
use workshift::utils::datetime::DueStatus;

#[tokio::test]
async fn test_create_board_with_defaults() {
    let (api, user) = api_as("ada").await;
    let board = api.create_board("  Launch  ", Some("Q3 release"), None).await.unwrap();

    assert_eq!(board.title, "Launch");
    assert_eq!(board.description.as_deref(), Some("Q3 release"));
    assert_eq!(board.background, "#0079bf");
    assert_eq!(board.owner_id, user.id);
    assert!(!board.is_starred);

    let view = api.get_board(board.id).await.unwrap();
    assert_eq!(view.role, BoardRole::Owner);

    let titles: Vec<&str> = view.lists.iter().map(|l| l.list.title.as_str()).collect();
    assert_eq!(titles, vec!["To Do", "Doing", "Done"]);
    let positions: Vec<i32> = view.lists.iter().map(|l| l.list.position).collect();
    assert_eq!(positions, vec![0, 1, 2]);

    assert_eq!(view.labels.len(), 6);
    assert_eq!(view.labels[0].color, "#61bd4f");
    assert_eq!(view.members.len(), 1);
    assert_eq!(view.members[0].user_id, user.id);
}

#[tokio::test]
async fn test_create_board_uses_configured_defaults() {
    let mut config = Config::default();
    config.boards.default_lists = vec!["Backlog".to_string(), "Shipped".to_string()];
    config.boards.default_labels = vec![LabelPreset {
        name: "Bug".to_string(),
        color: "RED".to_string(),
    }];
    config.boards.default_background = "#123".to_string();

    let api = new_api_with(config).await;
    register(&api, "ada").await;
    sign_in(&api, "ada").await;

    let board = api.create_board("Custom", None, None).await.unwrap();
    assert_eq!(board.background, "#112233");

    let view = api.get_board(board.id).await.unwrap();
    let titles: Vec<&str> = view.lists.iter().map(|l| l.list.title.as_str()).collect();
    assert_eq!(titles, vec!["Backlog", "Shipped"]);
    assert_eq!(view.labels.len(), 1);
    assert_eq!(view.labels[0].name, "Bug");
    assert_eq!(view.labels[0].color, "#eb5a46");
}

#[tokio::test]
async fn test_create_board_validation() {
    let (api, _) = api_as("ada").await;

    let err = api.create_board("   ", None, None).await.unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));

    let long_title = "x".repeat(101);
    assert!(api.create_board(&long_title, None, None).await.is_err());

    let err = api.create_board("Board", None, Some("blue-ish")).await.unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));
}

#[tokio::test]
async fn test_list_boards_starred_first_then_title() {
    let (api, _) = api_as("ada").await;
    let zeta = api.create_board("Zeta", None, None).await.unwrap();
    api.create_board("Mid", None, None).await.unwrap();
    api.create_board("Alpha", None, None).await.unwrap();

    let starred = api.toggle_star(zeta.id).await.unwrap();
    assert!(starred.is_starred);

    let titles: Vec<String> = api.list_boards().await.unwrap().into_iter().map(|b| b.title).collect();
    assert_eq!(titles, vec!["Zeta", "Alpha", "Mid"]);

    let unstarred = api.toggle_star(zeta.id).await.unwrap();
    assert!(!unstarred.is_starred);
    let titles: Vec<String> = api.list_boards().await.unwrap().into_iter().map(|b| b.title).collect();
    assert_eq!(titles, vec!["Alpha", "Mid", "Zeta"]);
}

#[tokio::test]
async fn test_list_boards_only_shows_memberships() {
    let (api, _) = api_as("ada").await;
    api.create_board("Ada's", None, None).await.unwrap();

    register(&api, "bob").await;
    sign_in(&api, "bob").await;
    assert!(api.list_boards().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_get_board_card_badges() {
    let (api, _) = api_as("ada").await;
    let (board, lists) = board_with_lists(&api, "Badges").await;
    let view = api.get_board(board.id).await.unwrap();
    let label_id = view.labels[0].id;

    let card = api.create_card(lists[0], "Busy card").await.unwrap();
    api.create_card(lists[0], "Plain card").await.unwrap();
    api.add_label_to_card(card.id, label_id).await.unwrap();
    let first = api.add_checklist_item(card.id, "One").await.unwrap();
    api.add_checklist_item(card.id, "Two").await.unwrap();
    api.toggle_checklist_item(first.id).await.unwrap();
    api.add_comment(card.id, "Looks good").await.unwrap();
    api.add_attachment(card.id, "a.txt", None, &STANDARD.encode("hello"))
        .await
        .unwrap();

    let view = api.get_board(board.id).await.unwrap();
    let cards = &view.lists[0].cards;
    assert_eq!(cards.len(), 2);

    let busy = &cards[0];
    assert_eq!(busy.card.title, "Busy card");
    assert_eq!(busy.label_ids, vec![label_id]);
    assert_eq!((busy.checklist_done, busy.checklist_total), (1, 2));
    assert_eq!(busy.comment_count, 1);
    assert_eq!(busy.attachment_count, 1);
    assert_eq!(busy.due_status, DueStatus::NoDueDate);

    let plain = &cards[1];
    assert!(plain.label_ids.is_empty());
    assert_eq!((plain.checklist_done, plain.checklist_total), (0, 0));
    assert_eq!(plain.comment_count, 0);
    assert_eq!(plain.attachment_count, 0);

    assert_eq!(view.card_ids(), vec![vec![card.id, cards[1].card.id], vec![], vec![]]);
}

#[tokio::test]
async fn test_get_board_access() {
    let (api, _) = api_as("ada").await;
    let board = api.create_board("Private", None, None).await.unwrap();

    let err = api.get_board(board.id + 100).await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound { .. }));
    assert_eq!(err.status_code(), 404);

    register(&api, "bob").await;
    sign_in(&api, "bob").await;
    let err = api.get_board(board.id).await.unwrap_err();
    assert!(matches!(err, ApiError::Forbidden(_)));
    assert_eq!(err.status_code(), 403);
}

#[tokio::test]
async fn test_update_board() {
    let (api, _) = api_as("ada").await;
    let board = api.create_board("Old", Some("Notes"), None).await.unwrap();

    let updated = api
        .update_board(
            board.id,
            BoardUpdate {
                title: Some("New".to_string()),
                background: Some("#FF0000".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.title, "New");
    assert_eq!(updated.background, "#ff0000");
    assert_eq!(updated.description.as_deref(), Some("Notes"));

    let cleared = api
        .update_board(
            board.id,
            BoardUpdate {
                description: Some(None),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(cleared.description, None);
    assert_eq!(cleared.title, "New");

    let err = api
        .update_board(
            board.id,
            BoardUpdate {
                title: Some(String::new()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));
}

#[tokio::test]
async fn test_empty_board_update_writes_nothing() {
    let (api, _) = api_as("ada").await;
    let board = api.create_board("Quiet", None, None).await.unwrap();

    let mut snapshot = api.snapshot().await.unwrap();
    snapshot.boards[0].updated_at = "2020-01-01T00:00:00Z".to_string();
    api.restore(snapshot).await.unwrap();
    sign_in(&api, "ada").await;

    let unchanged = api.update_board(board.id, BoardUpdate::default()).await.unwrap();
    assert_eq!(unchanged.title, "Quiet");
    assert_eq!(unchanged.updated_at, "2020-01-01T00:00:00Z");
    assert_eq!(api.snapshot().await.unwrap().boards[0].updated_at, "2020-01-01T00:00:00Z");

    // Access is still checked
    register(&api, "bob").await;
    sign_in(&api, "bob").await;
    let err = api.update_board(board.id, BoardUpdate::default()).await.unwrap_err();
    assert!(matches!(err, ApiError::Forbidden(_)));
}

#[tokio::test]
async fn test_update_board_requires_manager() {
    let (api, _) = api_as("ada").await;
    let board = api.create_board("Shared", None, None).await.unwrap();
    register(&api, "bob").await;
    api.add_member(board.id, "bob", BoardRole::Member).await.unwrap();

    sign_in(&api, "bob").await;
    let err = api
        .update_board(
            board.id,
            BoardUpdate {
                title: Some("Mine".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Forbidden(_)));

    // Any member may star
    assert!(api.toggle_star(board.id).await.unwrap().is_starred);
}

#[tokio::test]
async fn test_delete_board_owner_only() {
    let (api, _) = api_as("ada").await;
    let board = api.create_board("Doomed", None, None).await.unwrap();
    register(&api, "bob").await;
    api.add_member(board.id, "bob", BoardRole::Admin).await.unwrap();

    sign_in(&api, "bob").await;
    let err = api.delete_board(board.id).await.unwrap_err();
    assert!(matches!(err, ApiError::Forbidden(_)));

    sign_in(&api, "ada").await;
    let stats = api.delete_board(board.id).await.unwrap();
    assert_eq!(stats.lists, 3);
    assert_eq!(stats.labels, 6);
    assert_eq!(stats.members, 2);

    assert!(api.list_boards().await.unwrap().is_empty());
    assert!(matches!(api.get_board(board.id).await, Err(ApiError::NotFound { .. })));
}
