mod common;

use common::{api_as, board_with_lists, register, sign_in};
use workshift::api::{ApiError, BoardRole};

#[tokio::test]
async fn test_create_label_colors() {
    let (api, _) = api_as("ada").await;
    let (board, _) = board_with_lists(&api, "Labels").await;

    let palette = api.create_label(board.id, "Bug", "Red").await.unwrap();
    assert_eq!(palette.color, "#eb5a46");
    assert_eq!(palette.name, "Bug");

    let hex = api.create_label(board.id, "", "#ABC").await.unwrap();
    assert_eq!(hex.color, "#aabbcc");
    assert_eq!(hex.name, "");

    let err = api.create_label(board.id, "Bad", "#12345").await.unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));
    let err = api.create_label(board.id, &"x".repeat(51), "green").await.unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));

    let labels = api.list_labels(board.id).await.unwrap();
    assert_eq!(labels.len(), 8);
}

#[tokio::test]
async fn test_update_label() {
    let (api, _) = api_as("ada").await;
    let (board, _) = board_with_lists(&api, "Labels").await;
    let label = api.create_label(board.id, "Bug", "red").await.unwrap();

    let renamed = api.update_label(label.id, Some("Defect"), None).await.unwrap();
    assert_eq!(renamed.name, "Defect");
    assert_eq!(renamed.color, "#eb5a46");

    let recolored = api.update_label(label.id, None, Some("#00FF00")).await.unwrap();
    assert_eq!(recolored.color, "#00ff00");
    assert_eq!(recolored.name, "Defect");
}

#[tokio::test]
async fn test_label_management_requires_manager() {
    let (api, _) = api_as("ada").await;
    let (board, lists) = board_with_lists(&api, "Labels").await;
    let label = api.create_label(board.id, "Bug", "red").await.unwrap();
    let card = api.create_card(lists[0], "Card").await.unwrap();
    register(&api, "bob").await;
    api.add_member(board.id, "bob", BoardRole::Member).await.unwrap();

    sign_in(&api, "bob").await;
    assert!(matches!(
        api.create_label(board.id, "Mine", "blue").await,
        Err(ApiError::Forbidden(_))
    ));
    assert!(matches!(api.delete_label(label.id).await, Err(ApiError::Forbidden(_))));

    // Labelling cards is open to every member
    assert!(api.add_label_to_card(card.id, label.id).await.unwrap());
}

#[tokio::test]
async fn test_add_label_to_card_is_idempotent() {
    let (api, _) = api_as("ada").await;
    let (board, lists) = board_with_lists(&api, "Labels").await;
    let label = api.create_label(board.id, "Bug", "red").await.unwrap();
    let card = api.create_card(lists[0], "Card").await.unwrap();

    assert!(api.add_label_to_card(card.id, label.id).await.unwrap());
    assert!(!api.add_label_to_card(card.id, label.id).await.unwrap());

    let detail = api.get_card(card.id).await.unwrap();
    assert_eq!(detail.labels.len(), 1);
    assert_eq!(detail.labels[0].id, label.id);

    let tagged: Vec<i32> = api.cards_with_label(label.id).await.unwrap().iter().map(|c| c.id).collect();
    assert_eq!(tagged, vec![card.id]);

    assert!(api.remove_label_from_card(card.id, label.id).await.unwrap());
    assert!(!api.remove_label_from_card(card.id, label.id).await.unwrap());
    assert!(api.get_card(card.id).await.unwrap().labels.is_empty());
}

#[tokio::test]
async fn test_label_from_other_board_rejected() {
    let (api, _) = api_as("ada").await;
    let (_, lists) = board_with_lists(&api, "One").await;
    let (other, _) = board_with_lists(&api, "Two").await;
    let foreign = api.create_label(other.id, "Foreign", "pink").await.unwrap();
    let card = api.create_card(lists[0], "Card").await.unwrap();

    let err = api.add_label_to_card(card.id, foreign.id).await.unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));

    let err = api.add_label_to_card(card.id, 9999).await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound { .. }));
}

#[tokio::test]
async fn test_delete_label_unlinks_cards() {
    let (api, _) = api_as("ada").await;
    let (board, lists) = board_with_lists(&api, "Labels").await;
    let label = api.create_label(board.id, "Bug", "red").await.unwrap();
    let first = api.create_card(lists[0], "First").await.unwrap();
    let second = api.create_card(lists[1], "Second").await.unwrap();
    api.add_label_to_card(first.id, label.id).await.unwrap();
    api.add_label_to_card(second.id, label.id).await.unwrap();

    let stats = api.delete_label(label.id).await.unwrap();
    assert_eq!(stats.labels, 1);
    assert_eq!(stats.card_labels, 2);

    assert!(api.get_card(first.id).await.unwrap().labels.is_empty());
    assert!(api.snapshot().await.unwrap().card_labels.is_empty());
    assert_eq!(api.get_board(board.id).await.unwrap().lists[1].cards[0].label_ids, Vec::<i32>::new());
}
