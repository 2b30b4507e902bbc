use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Profile projection; the PIN is only ever visible as `has_pin`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserProfile {
    pub current_streak: i32,
    pub longest_streak: i32,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub last_content_date: Option<NaiveDate>,
    pub has_pin: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: Uuid,
    #[schema(example = "username")]
    pub username: String,
    pub email: String,
    pub profile: UserProfile,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Registration {
    pub user: User,
    pub access_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize() {
        let id = Uuid::new_v4();
        let user = User {
            id,
            username: "ada".to_owned(),
            email: "ada@example.org".to_owned(),
            profile: UserProfile {
                current_streak: 2,
                longest_streak: 5,
                last_content_date: None,
                has_pin: false,
            },
        };
        assert_eq!(
            format!(
                r#"{{"id":"{id}","username":"ada","email":"ada@example.org","profile":{{"current_streak":2,"longest_streak":5,"has_pin":false}}}}"#
            ),
            serde_json::to_string(&user).unwrap()
        );
    }
}
