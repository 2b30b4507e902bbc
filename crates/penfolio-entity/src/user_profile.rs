use chrono::NaiveDate;
use sea_orm::entity::prelude::*;

/// Per-account profile row, paired 1:1 with `users` via the shared key.
/// The streak columns are only ever written by the streak accounting,
/// `pin_hash` only by explicit PIN management.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "user_profile")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: Uuid,
    pub pin_hash: Option<String>,
    pub current_streak: i32,
    pub longest_streak: i32,
    pub last_content_date: Option<NaiveDate>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::user::Entity",
        from = "Column::UserId",
        to = "crate::user::Column::Id"
    )]
    User,
}

impl Related<crate::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
