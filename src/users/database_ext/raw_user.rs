use crate::users::{User, UserId};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(sqlx::FromRow, Debug, Clone, PartialEq)]
pub(super) struct RawUser {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: i64,
}

impl TryFrom<RawUser> for User {
    type Error = anyhow::Error;

    fn try_from(raw_user: RawUser) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId::from(Uuid::parse_str(&raw_user.id)?),
            email: raw_user.email,
            first_name: raw_user.first_name,
            last_name: raw_user.last_name,
            created_at: OffsetDateTime::from_unix_timestamp(raw_user.created_at)?,
        })
    }
}

impl From<&User> for RawUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            created_at: user.created_at.unix_timestamp(),
        }
    }
}
