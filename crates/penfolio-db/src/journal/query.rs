use penfolio_entity::journal::{self, Entity as Journal, Model as JournalModel, MoodTag};
use sea_orm::sea_query::{Expr, ExprTrait, Func, LikeExpr};
use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};
use std::error::Error;
use uuid::Uuid;

/// Which slice of a user's journals a listing query should return.
///
/// There is deliberately no way to express "everything": the covert slice
/// is only reachable by asking for it explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoodSelection {
    Only(MoodTag),
    ExceptCovert,
}

pub struct Query;

impl Query {
    /// Load one page of a user's journals, newest first, together with the
    /// total number of matching rows.
    pub async fn get_user_journals<C: ConnectionTrait>(
        conn: &C,
        user_id: Uuid,
        selection: MoodSelection,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<JournalModel>, u64), DbErr> {
        let mut query = Journal::find().filter(journal::Column::UserId.eq(user_id));

        query = match selection {
            MoodSelection::Only(mood_tag) => query.filter(journal::Column::MoodTag.eq(mood_tag)),
            MoodSelection::ExceptCovert => query.filter(journal::Column::MoodTag.ne(MoodTag::Covert)),
        };

        let paginator = query
            .order_by_desc(journal::Column::CreatedAt)
            .paginate(conn, per_page.max(1));

        let count = paginator
            .num_items()
            .await
            .inspect_err(|error| tracing::error!(error = error as &dyn Error, "failed to count user journals"))?;
        let journals = paginator
            .fetch_page(page.saturating_sub(1))
            .await
            .inspect_err(|error| tracing::error!(error = error as &dyn Error, "failed to load user journals"))?;

        Ok((journals, count))
    }

    pub async fn get_user_journal<C: ConnectionTrait>(
        conn: &C,
        user_id: Uuid,
        journal_id: Uuid,
    ) -> Result<Option<JournalModel>, DbErr> {
        Journal::find_by_id(journal_id)
            .filter(journal::Column::UserId.eq(user_id))
            .one(conn)
            .await
            .inspect_err(|error| tracing::error!(error = error as &dyn Error, "failed to load user journal"))
    }

    /// Case-insensitive substring search over title and content.
    /// Covert journals are filtered out before the term is even looked at.
    pub async fn search_user_journals<C: ConnectionTrait>(
        conn: &C,
        user_id: Uuid,
        term: &str,
    ) -> Result<Vec<JournalModel>, DbErr> {
        let pattern = like_pattern(term);

        Journal::find()
            .filter(journal::Column::UserId.eq(user_id))
            .filter(journal::Column::MoodTag.ne(MoodTag::Covert))
            .filter(
                Condition::any()
                    .add(
                        Expr::expr(Func::lower(Expr::col((Journal, journal::Column::Title))))
                            .like(LikeExpr::new(pattern.clone()).escape('\\')),
                    )
                    .add(
                        Expr::expr(Func::lower(Expr::col((Journal, journal::Column::Content))))
                            .like(LikeExpr::new(pattern).escape('\\')),
                    ),
            )
            .order_by_desc(journal::Column::CreatedAt)
            .all(conn)
            .await
            .inspect_err(|error| tracing::error!(error = error as &dyn Error, "failed to search user journals"))
    }
}

fn like_pattern(term: &str) -> String {
    let escaped = term
        .to_lowercase()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}
