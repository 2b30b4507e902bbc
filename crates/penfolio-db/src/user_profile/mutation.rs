use chrono::NaiveDate;
use penfolio_entity::user_profile::{self, Model as UserProfileModel};
use sea_orm::{ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, NotSet, QueryFilter};
use std::error::Error;
use uuid::Uuid;

pub struct Mutation;

impl Mutation {
    pub async fn create_profile<C: ConnectionTrait>(conn: &C, user_id: Uuid) -> Result<UserProfileModel, DbErr> {
        let profile = user_profile::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            pin_hash: ActiveValue::Set(None),
            current_streak: ActiveValue::Set(0),
            longest_streak: ActiveValue::Set(0),
            last_content_date: ActiveValue::Set(None),
        };

        profile
            .insert(conn)
            .await
            .inspect_err(|error| tracing::error!(error = error as &dyn Error, "failed to create user profile"))
    }

    pub async fn set_pin_hash<C: ConnectionTrait>(conn: &C, user_id: Uuid, pin_hash: String) -> Result<(), DbErr> {
        let profile = user_profile::ActiveModel {
            user_id: NotSet,
            pin_hash: ActiveValue::Set(Some(pin_hash)),
            current_streak: NotSet,
            longest_streak: NotSet,
            last_content_date: NotSet,
        };

        let res = user_profile::Entity::update_many()
            .set(profile)
            .filter(user_profile::Column::UserId.eq(user_id))
            .exec(conn)
            .await?;
        if res.rows_affected == 0 {
            return Err(DbErr::RecordNotFound("User profile not found".to_string()));
        }
        Ok(())
    }

    pub async fn update_streak<C: ConnectionTrait>(
        conn: &C,
        user_id: Uuid,
        current_streak: i32,
        longest_streak: i32,
        last_content_date: NaiveDate,
    ) -> Result<(), DbErr> {
        let profile = user_profile::ActiveModel {
            user_id: NotSet,
            pin_hash: NotSet,
            current_streak: ActiveValue::Set(current_streak),
            longest_streak: ActiveValue::Set(longest_streak),
            last_content_date: ActiveValue::Set(Some(last_content_date)),
        };

        let res = user_profile::Entity::update_many()
            .set(profile)
            .filter(user_profile::Column::UserId.eq(user_id))
            .exec(conn)
            .await?;
        if res.rows_affected == 0 {
            return Err(DbErr::RecordNotFound("User profile not found".to_string()));
        }
        Ok(())
    }
}
