use crate::users::UserId;
use serde_derive::Serialize;
use time::OffsetDateTime;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct User {
    #[serde(skip_serializing)]
    pub id: UserId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(with = "time::serde::timestamp")]
    pub created_at: OffsetDateTime,
}

impl AsRef<User> for User {
    fn as_ref(&self) -> &User {
        self
    }
}
