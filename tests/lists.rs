mod common;

use common::{api_as, board_with_lists, register, sign_in};
use workshift::api::ApiError;

async fn list_titles(api: &workshift::WorkShiftApi, board_id: i32) -> Vec<(String, i32)> {
    api.get_board(board_id)
        .await
        .unwrap()
        .lists
        .into_iter()
        .map(|l| (l.list.title, l.list.position))
        .collect()
}

#[tokio::test]
async fn test_create_list_appends() {
    let (api, _) = api_as("ada").await;
    let (board, _) = board_with_lists(&api, "Lists").await;

    let list = api.create_list(board.id, "Review").await.unwrap();
    assert_eq!(list.position, 3);
    assert_eq!(list.board_id, board.id);

    let err = api.create_list(board.id, " ").await.unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));
}

#[tokio::test]
async fn test_rename_list() {
    let (api, _) = api_as("ada").await;
    let (_, lists) = board_with_lists(&api, "Lists").await;

    let renamed = api.rename_list(lists[0], "Backlog").await.unwrap();
    assert_eq!(renamed.title, "Backlog");
    assert_eq!(renamed.position, 0);

    let err = api.rename_list(9999, "Nope").await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound { .. }));
}

#[tokio::test]
async fn test_move_list_renumbers_and_clamps() {
    let (api, _) = api_as("ada").await;
    let (board, lists) = board_with_lists(&api, "Lists").await;

    let moved = api.move_list(lists[2], 0).await.unwrap();
    let order: Vec<i32> = moved.iter().map(|l| l.id).collect();
    assert_eq!(order, vec![lists[2], lists[0], lists[1]]);

    assert_eq!(
        list_titles(&api, board.id).await,
        vec![
            ("Done".to_string(), 0),
            ("To Do".to_string(), 1),
            ("Doing".to_string(), 2)
        ]
    );

    // Past the end lands last, negative lands first
    api.move_list(lists[2], 42).await.unwrap();
    api.move_list(lists[1], -3).await.unwrap();
    assert_eq!(
        list_titles(&api, board.id).await,
        vec![
            ("Doing".to_string(), 0),
            ("To Do".to_string(), 1),
            ("Done".to_string(), 2)
        ]
    );
}

#[tokio::test]
async fn test_delete_list_closes_gap() {
    let (api, _) = api_as("ada").await;
    let (board, lists) = board_with_lists(&api, "Lists").await;
    api.create_card(lists[0], "Gone with the list").await.unwrap();
    api.create_card(lists[0], "Also gone").await.unwrap();

    let stats = api.delete_list(lists[0]).await.unwrap();
    assert_eq!(stats.lists, 1);
    assert_eq!(stats.cards, 2);

    assert_eq!(
        list_titles(&api, board.id).await,
        vec![("Doing".to_string(), 0), ("Done".to_string(), 1)]
    );
    assert!(api.snapshot().await.unwrap().cards.is_empty());
}

#[tokio::test]
async fn test_lists_require_membership() {
    let (api, _) = api_as("ada").await;
    let (board, lists) = board_with_lists(&api, "Lists").await;

    register(&api, "bob").await;
    sign_in(&api, "bob").await;
    assert!(matches!(
        api.create_list(board.id, "Sneaky").await,
        Err(ApiError::Forbidden(_))
    ));
    assert!(matches!(api.delete_list(lists[0]).await, Err(ApiError::Forbidden(_))));
}
