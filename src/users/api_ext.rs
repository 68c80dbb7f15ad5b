use crate::{
    api::Api,
    network::{EmailTransport, EmailTransportError},
    users::{User, UserId, UserSignupError},
};
use anyhow::Context;
use time::OffsetDateTime;

/// Describes the API to work with users.
pub struct UsersApiExt<'a, ET: EmailTransport> {
    api: &'a Api<ET>,
}

impl<'a, ET: EmailTransport> UsersApiExt<'a, ET>
where
    ET::Error: EmailTransportError,
{
    /// Creates Users API.
    pub fn new(api: &'a Api<ET>) -> Self {
        Self { api }
    }

    /// Retrieves the user with the specified email.
    pub async fn get_by_email<E: AsRef<str>>(&self, email: E) -> anyhow::Result<Option<User>> {
        self.api.db.get_user_by_email(email).await
    }

    /// Signs up a user with the specified email and profile. If a user with such email is already
    /// registered, this method throws.
    pub async fn signup(
        &self,
        email: &str,
        first_name: &str,
        last_name: &str,
    ) -> anyhow::Result<User> {
        if self
            .get_by_email(email)
            .await
            .with_context(|| "Failed to check if user already exists.")?
            .is_some()
        {
            return Err(UserSignupError::EmailAlreadyRegistered.into());
        }

        let user = User {
            id: UserId::new(),
            email: email.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            // The database stores timestamps with second precision.
            created_at: OffsetDateTime::from_unix_timestamp(
                OffsetDateTime::now_utc().unix_timestamp(),
            )?,
        };

        // Use insert instead of upsert here to prevent multiple signup requests from the same
        // user.
        self.api
            .db
            .insert_user(&user)
            .await
            .with_context(|| "Cannot signup user, failed to insert a new user.")?;

        Ok(user)
    }
}

impl<ET: EmailTransport> Api<ET>
where
    ET::Error: EmailTransportError,
{
    /// Returns an API to work with users.
    pub fn users(&self) -> UsersApiExt<'_, ET> {
        UsersApiExt::new(self)
    }
}
