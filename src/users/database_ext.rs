mod raw_user;

use self::raw_user::RawUser;
use crate::{
    database::Database,
    users::{User, UserId},
};

/// Extends the primary database with the user management-related methods.
impl Database {
    /// Retrieves a user from the `users` table using user ID.
    pub async fn get_user(&self, id: UserId) -> anyhow::Result<Option<User>> {
        sqlx::query_as::<_, RawUser>(
            r#"
SELECT id, email, first_name, last_name, created_at
FROM users
WHERE id = $1
                "#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?
        .map(User::try_from)
        .transpose()
    }

    /// Retrieves a user from the `users` table using user email.
    pub async fn get_user_by_email<T: AsRef<str>>(&self, email: T) -> anyhow::Result<Option<User>> {
        sqlx::query_as::<_, RawUser>(
            r#"
SELECT id, email, first_name, last_name, created_at
FROM users
WHERE email = $1
                "#,
        )
        .bind(email.as_ref())
        .fetch_optional(&self.pool)
        .await?
        .map(User::try_from)
        .transpose()
    }

    /// Inserts a user into the `users` table, fails if a user with the same email already exists.
    pub async fn insert_user<U: AsRef<User>>(&self, user: U) -> anyhow::Result<()> {
        let raw_user = RawUser::from(user.as_ref());

        sqlx::query(
            r#"
INSERT INTO users (id, email, first_name, last_name, created_at)
VALUES ( $1, $2, $3, $4, $5 )
        "#,
        )
        .bind(&raw_user.id)
        .bind(&raw_user.email)
        .bind(&raw_user.first_name)
        .bind(&raw_user.last_name)
        .bind(raw_user.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
