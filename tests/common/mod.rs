//! Helpers shared by the integration tests.
#![allow(dead_code)]

use workshift::api::{UserProfile, WorkShiftApi};
use workshift::config::Config;
use workshift::entities::board;

pub const PASSWORD: &str = "secret-pass";

/// API over a fresh store with the default configuration
pub async fn new_api() -> WorkShiftApi {
    new_api_with(Config::default()).await
}

pub async fn new_api_with(config: Config) -> WorkShiftApi {
    WorkShiftApi::new(config).await.expect("store should open")
}

/// Register `username` with an `@example.com` address and the shared password
pub async fn register(api: &WorkShiftApi, username: &str) -> UserProfile {
    api.register(username, &format!("{}@example.com", username), PASSWORD, username)
        .await
        .expect("registration should succeed")
}

pub async fn sign_in(api: &WorkShiftApi, username: &str) {
    api.login(username, PASSWORD).await.expect("sign in should succeed");
}

/// Fresh API with `username` registered and signed in
pub async fn api_as(username: &str) -> (WorkShiftApi, UserProfile) {
    let api = new_api().await;
    let user = register(&api, username).await;
    sign_in(&api, username).await;
    (api, user)
}

/// Board created by the signed-in user, with the ids of its default lists
pub async fn board_with_lists(api: &WorkShiftApi, title: &str) -> (board::Model, Vec<i32>) {
    let board = api.create_board(title, None, None).await.unwrap();
    let view = api.get_board(board.id).await.unwrap();
    let lists = view.lists.iter().map(|l| l.list.id).collect();
    (board, lists)
}

/// Card titles per list, in position order
pub async fn card_titles(api: &WorkShiftApi, board_id: i32) -> Vec<Vec<String>> {
    api.get_board(board_id)
        .await
        .unwrap()
        .lists
        .iter()
        .map(|l| l.cards.iter().map(|c| c.card.title.clone()).collect())
        .collect()
}

/// Card positions per list, in position order
pub async fn card_positions(api: &WorkShiftApi, board_id: i32) -> Vec<Vec<i32>> {
    api.get_board(board_id)
        .await
        .unwrap()
        .lists
        .iter()
        .map(|l| l.cards.iter().map(|c| c.card.position).collect())
        .collect()
}
