use penfolio_entity::user_profile::{Entity as UserProfile, Model as UserProfileModel};
use sea_orm::{ConnectionTrait, DbErr, EntityTrait};
use uuid::Uuid;

pub struct Query;

impl Query {
    pub async fn find_by_user_id<C: ConnectionTrait>(
        conn: &C,
        user_id: Uuid,
    ) -> Result<Option<UserProfileModel>, DbErr> {
        UserProfile::find_by_id(user_id).one(conn).await.inspect_err(|error| {
            tracing::error!(error = error as &dyn std::error::Error, "error loading user profile");
        })
    }
}
