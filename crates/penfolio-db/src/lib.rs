pub mod access_token;
pub mod journal;
pub mod user;
pub mod user_profile;
pub mod util;

pub use sea_orm;
