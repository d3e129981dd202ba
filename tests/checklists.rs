mod common;

use common::{api_as, board_with_lists};
use workshift::api::ApiError;

async fn checklist(api: &workshift::WorkShiftApi, card_id: i32) -> Vec<(String, i32, bool)> {
    api.get_card(card_id)
        .await
        .unwrap()
        .checklist
        .into_iter()
        .map(|i| (i.content, i.position, i.is_completed))
        .collect()
}

#[tokio::test]
async fn test_add_and_toggle_items() {
    let (api, _) = api_as("ada").await;
    let (_, lists) = board_with_lists(&api, "Checklists").await;
    let card = api.create_card(lists[0], "Card").await.unwrap();

    let first = api.add_checklist_item(card.id, "Outline").await.unwrap();
    let second = api.add_checklist_item(card.id, "Draft").await.unwrap();
    assert_eq!((first.position, second.position), (0, 1));
    assert!(!first.is_completed);

    assert!(api.toggle_checklist_item(first.id).await.unwrap().is_completed);
    assert!(!api.toggle_checklist_item(first.id).await.unwrap().is_completed);

    let err = api.add_checklist_item(card.id, "   ").await.unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));
}

#[tokio::test]
async fn test_update_item() {
    let (api, _) = api_as("ada").await;
    let (_, lists) = board_with_lists(&api, "Checklists").await;
    let card = api.create_card(lists[0], "Card").await.unwrap();
    let item = api.add_checklist_item(card.id, "Outline").await.unwrap();

    let updated = api
        .update_checklist_item(item.id, Some("Detailed outline"), Some(true))
        .await
        .unwrap();
    assert_eq!(updated.content, "Detailed outline");
    assert!(updated.is_completed);

    let unchanged = api.update_checklist_item(item.id, None, None).await.unwrap();
    assert_eq!(unchanged, updated);

    let err = api.update_checklist_item(9999, None, Some(true)).await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound { .. }));
}

#[tokio::test]
async fn test_move_and_delete_items_renumber() {
    let (api, _) = api_as("ada").await;
    let (_, lists) = board_with_lists(&api, "Checklists").await;
    let card = api.create_card(lists[0], "Card").await.unwrap();
    let a = api.add_checklist_item(card.id, "A").await.unwrap();
    let b = api.add_checklist_item(card.id, "B").await.unwrap();
    api.add_checklist_item(card.id, "C").await.unwrap();

    let moved = api.move_checklist_item(a.id, 10).await.unwrap();
    let order: Vec<&str> = moved.iter().map(|i| i.content.as_str()).collect();
    assert_eq!(order, vec!["B", "C", "A"]);

    api.delete_checklist_item(b.id).await.unwrap();
    assert_eq!(
        checklist(&api, card.id).await,
        vec![("C".to_string(), 0, false), ("A".to_string(), 1, false)]
    );
}
