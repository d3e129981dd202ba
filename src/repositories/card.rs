//! Card repository for database operations.

use anyhow::Result;
use sea_orm::sea_query::{Expr, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, QueryTrait,
};

use super::CascadeStats;
use crate::entities::{attachment, card, card_label, checklist_item, comment, list};
use crate::ordering;
use crate::utils::datetime;

/// `LIKE` pattern matching `query` as a plain substring, escaped with `\`.
fn contains_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for c in query.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Repository for card-related database operations.
pub struct CardRepository;

impl CardRepository {
    /// Get a single card by id.
    pub async fn get_by_id<C>(conn: &C, id: i32) -> Result<Option<card::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(card::Entity::find_by_id(id).one(conn).await?)
    }

    /// Get the cards of a list ordered by position.
    pub async fn get_for_list<C>(conn: &C, list_id: i32) -> Result<Vec<card::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(card::Entity::find()
            .filter(card::Column::ListId.eq(list_id))
            .order_by_asc(card::Column::Position)
            .order_by_asc(card::Column::Id)
            .all(conn)
            .await?)
    }

    /// Get every card on a board, grouped by list id then position.
    pub async fn get_for_board<C>(conn: &C, board_id: i32) -> Result<Vec<card::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(card::Entity::find()
            .filter(card::Column::ListId.in_subquery(Self::board_lists(board_id)))
            .order_by_asc(card::Column::ListId)
            .order_by_asc(card::Column::Position)
            .all(conn)
            .await?)
    }

    /// Number of cards in a list.
    pub async fn count_for_list<C>(conn: &C, list_id: i32) -> Result<u64>
    where
        C: ConnectionTrait,
    {
        Ok(card::Entity::find()
            .filter(card::Column::ListId.eq(list_id))
            .count(conn)
            .await?)
    }

    /// Board owning the list a card sits in.
    pub async fn board_id_for_card<C>(conn: &C, card_id: i32) -> Result<Option<i32>>
    where
        C: ConnectionTrait,
    {
        let Some(card) = Self::get_by_id(conn, card_id).await? else {
            return Ok(None);
        };
        Ok(list::Entity::find_by_id(card.list_id).one(conn).await?.map(|l| l.board_id))
    }

    /// Search cards of a board by title or description.
    pub async fn search<C>(conn: &C, board_id: i32, query: &str) -> Result<Vec<card::Model>>
    where
        C: ConnectionTrait,
    {
        let pattern = contains_pattern(query);
        Ok(card::Entity::find()
            .filter(card::Column::ListId.in_subquery(Self::board_lists(board_id)))
            .filter(
                Condition::any()
                    .add(Expr::col(card::Column::Title).like(LikeExpr::new(pattern.as_str()).escape('\\')))
                    .add(Expr::col(card::Column::Description).like(LikeExpr::new(pattern.as_str()).escape('\\'))),
            )
            .order_by_asc(card::Column::IsCompleted)
            .order_by_asc(card::Column::ListId)
            .order_by_asc(card::Column::Position)
            .all(conn)
            .await?)
    }

    /// Get cards carrying a label.
    pub async fn get_with_label<C>(conn: &C, label_id: i32) -> Result<Vec<card::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(card::Entity::find()
            .filter(
                card::Column::Id.in_subquery(
                    card_label::Entity::find()
                        .filter(card_label::Column::LabelId.eq(label_id))
                        .select_only()
                        .column(card_label::Column::CardId)
                        .into_query(),
                ),
            )
            .order_by_asc(card::Column::ListId)
            .order_by_asc(card::Column::Position)
            .all(conn)
            .await?)
    }

    /// Open cards of a board due strictly before `today`, oldest first.
    pub async fn get_overdue<C>(conn: &C, board_id: i32, today: &str) -> Result<Vec<card::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(card::Entity::find()
            .filter(card::Column::ListId.in_subquery(Self::board_lists(board_id)))
            .filter(card::Column::IsCompleted.eq(false))
            .filter(card::Column::DueDate.is_not_null())
            .filter(card::Column::DueDate.lt(today))
            .order_by_asc(card::Column::DueDate)
            .order_by_asc(card::Column::Id)
            .all(conn)
            .await?)
    }

    /// Open cards of a board due between `from` and `to`, inclusive.
    pub async fn get_due_between<C>(conn: &C, board_id: i32, from: &str, to: &str) -> Result<Vec<card::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(card::Entity::find()
            .filter(card::Column::ListId.in_subquery(Self::board_lists(board_id)))
            .filter(card::Column::IsCompleted.eq(false))
            .filter(card::Column::DueDate.between(from, to))
            .order_by_asc(card::Column::DueDate)
            .order_by_asc(card::Column::Id)
            .all(conn)
            .await?)
    }

    /// Insert a card at `position`. Callers renumber siblings.
    pub async fn create<C>(
        conn: &C,
        list_id: i32,
        title: &str,
        position: i32,
        created_by: Option<i32>,
    ) -> Result<card::Model>
    where
        C: ConnectionTrait,
    {
        let now = datetime::now_rfc3339();
        let model = card::ActiveModel {
            id: ActiveValue::NotSet,
            list_id: ActiveValue::Set(list_id),
            title: ActiveValue::Set(title.to_string()),
            description: ActiveValue::Set(None),
            position: ActiveValue::Set(position),
            due_date: ActiveValue::Set(None),
            is_completed: ActiveValue::Set(false),
            created_by: ActiveValue::Set(created_by),
            created_at: ActiveValue::Set(now.clone()),
            updated_at: ActiveValue::Set(now),
        };
        Ok(model.insert(conn).await?)
    }

    /// Update a card, stamping `updated_at`.
    pub async fn update<C>(conn: &C, mut card: card::ActiveModel) -> Result<card::Model>
    where
        C: ConnectionTrait,
    {
        card.updated_at = ActiveValue::Set(datetime::now_rfc3339());
        Ok(card.update(conn).await?)
    }

    /// Write positions `0..n` following the order of `cards`, all placed in `list_id`.
    pub async fn renumber<C>(conn: &C, list_id: i32, cards: &[card::Model]) -> Result<()>
    where
        C: ConnectionTrait,
    {
        let changes = ordering::position_changes(
            cards
                .iter()
                // a card arriving from another list always needs a write
                .map(|c| (c.id, if c.list_id == list_id { c.position } else { -1 })),
        );
        for (id, position) in changes {
            card::Entity::update_many()
                .col_expr(card::Column::ListId, Expr::value(list_id))
                .col_expr(card::Column::Position, Expr::value(position))
                .col_expr(card::Column::UpdatedAt, Expr::value(datetime::now_rfc3339()))
                .filter(card::Column::Id.eq(id))
                .exec(conn)
                .await?;
        }
        Ok(())
    }

    /// Delete a card with its comments, checklist items, label links and attachments.
    pub async fn delete_cascade<C>(conn: &C, card_id: i32) -> Result<CascadeStats>
    where
        C: ConnectionTrait,
    {
        let stats = CascadeStats {
            comments: comment::Entity::delete_many()
                .filter(comment::Column::CardId.eq(card_id))
                .exec(conn)
                .await?
                .rows_affected,
            checklist_items: checklist_item::Entity::delete_many()
                .filter(checklist_item::Column::CardId.eq(card_id))
                .exec(conn)
                .await?
                .rows_affected,
            card_labels: card_label::Entity::delete_many()
                .filter(card_label::Column::CardId.eq(card_id))
                .exec(conn)
                .await?
                .rows_affected,
            attachments: attachment::Entity::delete_many()
                .filter(attachment::Column::CardId.eq(card_id))
                .exec(conn)
                .await?
                .rows_affected,
            cards: card::Entity::delete_by_id(card_id).exec(conn).await?.rows_affected,
            ..Default::default()
        };
        Ok(stats)
    }

    fn board_lists(board_id: i32) -> sea_orm::sea_query::SelectStatement {
        list::Entity::find()
            .filter(list::Column::BoardId.eq(board_id))
            .select_only()
            .column(list::Column::Id)
            .into_query()
    }
}
