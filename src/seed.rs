//! Demo content for a first run.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use log::{debug, info};

use crate::api::{ApiError, ApiResult, CardUpdate, WorkShiftApi};
use crate::constants::{DEMO_EMAIL, DEMO_PASSWORD, DEMO_USERNAME};
use crate::entities::board;
use crate::utils::{color, datetime};

/// Create the demo user and a demo board, then sign in as the demo user.
///
/// Returns `None` without changing anything when the demo user already exists.
pub async fn seed_demo_data(api: &WorkShiftApi) -> ApiResult<Option<board::Model>> {
    match api.register(DEMO_USERNAME, DEMO_EMAIL, DEMO_PASSWORD, "Demo User").await {
        Ok(_) => {}
        Err(ApiError::Conflict(_)) => {
            debug!("Demo user already exists, skipping seed");
            return Ok(None);
        }
        Err(e) => return Err(e),
    }
    api.login(DEMO_USERNAME, DEMO_PASSWORD).await?;

    let board = api
        .create_board(
            "Welcome to WorkShift",
            Some("A sample board to try lists, cards and labels."),
            None,
        )
        .await?;
    let view = api.get_board(board.id).await?;

    let mut list_ids: Vec<i32> = view.lists.iter().map(|l| l.list.id).collect();
    for title in ["To Do", "Doing", "Done"].iter().skip(list_ids.len()) {
        list_ids.push(api.create_list(board.id, title).await?.id);
    }
    let (todo, doing, done) = (list_ids[0], list_ids[1], list_ids[2]);

    let labels = match view.labels.len() {
        0 => vec![
            api.create_label(board.id, "Feature", "green").await?,
            api.create_label(board.id, "Urgent", "red").await?,
        ],
        _ => view.labels,
    };
    let feature = labels[0].id;
    let red = color::resolve_label_color("red");
    let urgent = labels
        .iter()
        .find(|l| Some(&l.color) == red.as_ref())
        .unwrap_or(&labels[labels.len() - 1])
        .id;
    api.update_label(feature, Some("Feature"), None).await?;
    api.update_label(urgent, Some("Urgent"), None).await?;

    let explore = api.create_card(todo, "Explore the board").await?;
    api.update_card(
        explore.id,
        CardUpdate {
            description: Some(Some("Drag cards between lists to track progress.".to_string())),
            due_date: Some(Some(datetime::format_date_with_offset(2))),
            ..Default::default()
        },
    )
    .await?;
    api.add_label_to_card(explore.id, feature).await?;

    let launch = api.create_card(todo, "Plan the launch").await?;
    api.update_card(
        launch.id,
        CardUpdate {
            due_date: Some(Some(datetime::format_date_with_offset(-1))),
            ..Default::default()
        },
    )
    .await?;
    api.add_label_to_card(launch.id, urgent).await?;

    api.create_card(todo, "Invite your team").await?;

    let guide = api.create_card(doing, "Write the onboarding guide").await?;
    for step in ["Outline", "First draft", "Review"] {
        api.add_checklist_item(guide.id, step).await?;
    }
    let checklist = api.get_card(guide.id).await?.checklist;
    if let Some(first) = checklist.first() {
        api.toggle_checklist_item(first.id).await?;
    }
    api.add_comment(guide.id, "Keep it short, one page is enough.").await?;
    api.add_attachment(
        guide.id,
        "notes.txt",
        Some("text/plain"),
        &STANDARD.encode("Welcome to WorkShift!\n"),
    )
    .await?;

    let account = api.create_card(done, "Create a WorkShift account").await?;
    api.update_card(
        account.id,
        CardUpdate {
            is_completed: Some(true),
            ..Default::default()
        },
    )
    .await?;

    info!("Seeded demo board {}", board.id);
    Ok(Some(board))
}
