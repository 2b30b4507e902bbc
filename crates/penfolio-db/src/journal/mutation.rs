use chrono::Utc;
use penfolio_entity::journal::{self, Model as JournalModel, MoodTag};
use sea_orm::{ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, NotSet, QueryFilter};
use std::error::Error;
use uuid::Uuid;

pub struct Mutation;

impl Mutation {
    pub async fn create_journal<C: ConnectionTrait>(
        conn: &C,
        user_id: Uuid,
        title: String,
        content: String,
        mood_tag: MoodTag,
    ) -> Result<JournalModel, DbErr> {
        let now = Utc::now().fixed_offset();
        let journal = journal::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            user_id: ActiveValue::Set(user_id),
            title: ActiveValue::Set(title),
            content: ActiveValue::Set(content),
            mood_tag: ActiveValue::Set(mood_tag),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        };

        journal
            .insert(conn)
            .await
            .inspect_err(|error| tracing::error!(error = error as &dyn Error, "failed to create journal"))
    }

    /// Write the supplied fields of a user's journal; absent fields keep
    /// their stored values.
    pub async fn update_journal<C: ConnectionTrait>(
        conn: &C,
        user_id: Uuid,
        journal_id: Uuid,
        title: Option<String>,
        content: Option<String>,
        mood_tag: Option<MoodTag>,
    ) -> Result<(), DbErr> {
        let journal = journal::ActiveModel {
            id: NotSet,
            user_id: NotSet,
            title: title.map_or(NotSet, ActiveValue::Set),
            content: content.map_or(NotSet, ActiveValue::Set),
            mood_tag: mood_tag.map_or(NotSet, ActiveValue::Set),
            created_at: NotSet,
            updated_at: ActiveValue::Set(Utc::now().fixed_offset()),
        };

        let res = journal::Entity::update_many()
            .set(journal)
            .filter(journal::Column::UserId.eq(user_id))
            .filter(journal::Column::Id.eq(journal_id))
            .exec(conn)
            .await?;
        if res.rows_affected == 0 {
            return Err(DbErr::RecordNotFound("Journal not found".to_string()));
        }
        Ok(())
    }

    pub async fn delete_journal<C: ConnectionTrait>(conn: &C, user_id: Uuid, journal_id: Uuid) -> Result<(), DbErr> {
        let res = journal::Entity::delete_many()
            .filter(journal::Column::UserId.eq(user_id))
            .filter(journal::Column::Id.eq(journal_id))
            .exec(conn)
            .await
            .inspect_err(|error| tracing::error!(error = error as &dyn Error, "failed to delete journal"))?;
        if res.rows_affected == 0 {
            return Err(DbErr::RecordNotFound("Journal not found".to_string()));
        }
        Ok(())
    }
}
