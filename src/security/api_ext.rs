use crate::{
    api::Api,
    network::{EmailTransport, EmailTransportError},
    security::{InvalidLinkError, MagicLinkPayload, magic_link_email::MagicLinkEmailTemplate},
    users::User,
};
use time::OffsetDateTime;
use url::Url;

/// Path under the public origin that validates magic links. Changing it breaks previously issued,
/// unclicked links.
pub const VALIDATE_MAGIC_LINK_PATH: &str = "/validate-magic-link";
/// Name of the single query parameter carrying the encoded magic link payload.
const MAGIC_LINK_QUERY_PARAM: &str = "magic";

/// Platter security controller: issues and validates magic links.
pub struct SecurityApiExt<'a, ET: EmailTransport> {
    api: &'a Api<ET>,
}

impl<'a, ET: EmailTransport> SecurityApiExt<'a, ET>
where
    ET::Error: EmailTransportError,
{
    /// Instantiates security API extension.
    pub fn new(api: &'a Api<ET>) -> Self {
        Self { api }
    }

    /// Builds a magic link for the specified email and nonce: encrypts the
    /// `{email, nonce, issued_at}` payload and attaches it as the `magic` query parameter on the
    /// validation path under the configured public origin.
    pub fn issue_magic_link(&self, email: &str, nonce: &str) -> anyhow::Result<Url> {
        let payload = MagicLinkPayload {
            email: email.to_string(),
            nonce: nonce.to_string(),
            issued_at: OffsetDateTime::now_utc(),
        };
        let encoded = self.api.magic_link_codec.encode(&payload)?;

        let mut link = self.api.config.public_url.join(VALIDATE_MAGIC_LINK_PATH)?;
        link.query_pairs_mut()
            .append_pair(MAGIC_LINK_QUERY_PARAM, &encoded);

        Ok(link)
    }

    /// Extracts and decodes the magic link payload from the URL of an incoming validation
    /// request. Expiry and nonce matching are NOT enforced here since they require session state,
    /// see [`SecurityApiExt::signin_with_link`].
    pub fn validate_magic_link(&self, url: &Url) -> Result<MagicLinkPayload, InvalidLinkError> {
        let Some(encoded) = url.query_pairs().find_map(|(name, value)| {
            (name == MAGIC_LINK_QUERY_PARAM).then(|| value.into_owned())
        }) else {
            return Err(InvalidLinkError::MissingPayload);
        };

        Ok(self.api.magic_link_codec.decode(&encoded)?)
    }

    /// Completes a login attempt for an already validated payload. The payload nonce must compare
    /// equal to the nonce stored in the session when the link was issued, and the link must still
    /// be within its validity window. Returns the user the payload email resolves to, or `None`
    /// when no such user is registered yet.
    pub async fn signin_with_link(
        &self,
        payload: &MagicLinkPayload,
        pending_nonce: Option<&str>,
    ) -> anyhow::Result<Option<User>> {
        if pending_nonce != Some(payload.nonce.as_str()) {
            return Err(InvalidLinkError::NonceMismatch.into());
        }

        let validity = self.api.config.magic_link_validity;
        if !validity.is_zero() && OffsetDateTime::now_utc() - payload.issued_at > validity {
            return Err(InvalidLinkError::Expired.into());
        }

        self.api.users().get_by_email(&payload.email).await
    }

    /// Sends the magic link to the specified email address.
    pub async fn send_magic_link_email(&self, email: &str, link: &Url) -> anyhow::Result<()> {
        Ok(self
            .api
            .emails()
            .send(email, MagicLinkEmailTemplate { link }.compile_to_email())
            .await?)
    }
}

impl<ET: EmailTransport> Api<ET>
where
    ET::Error: EmailTransportError,
{
    /// Returns an API to work with security related tasks.
    pub fn security(&self) -> SecurityApiExt<'_, ET> {
        SecurityApiExt::new(self)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        security::{DecodeError, InvalidLinkError, MagicLinkPayload},
        tests::{mock_api, mock_api_with_config, mock_config},
    };
    use sqlx::SqlitePool;
    use time::OffsetDateTime;
    use url::Url;

    #[sqlx::test]
    async fn issues_magic_links_under_the_public_origin(pool: SqlitePool) -> anyhow::Result<()> {
        let api = mock_api(pool).await?;
        let security_api = api.security();

        let link = security_api.issue_magic_link("dev@platter.dev", "n1")?;

        assert_eq!(link.origin().ascii_serialization(), "https://platter.dev");
        assert_eq!(link.path(), "/validate-magic-link");
        assert_eq!(link.query_pairs().count(), 1);

        let payload = security_api.validate_magic_link(&link)?;
        assert_eq!(payload.email, "dev@platter.dev");
        assert_eq!(payload.nonce, "n1");
        assert!(payload.issued_at <= OffsetDateTime::now_utc());

        Ok(())
    }

    #[sqlx::test]
    async fn validation_requires_magic_parameter(pool: SqlitePool) -> anyhow::Result<()> {
        let api = mock_api(pool).await?;

        let url = Url::parse("https://platter.dev/validate-magic-link")?;
        assert!(matches!(
            api.security().validate_magic_link(&url),
            Err(InvalidLinkError::MissingPayload)
        ));

        let url = Url::parse("https://platter.dev/validate-magic-link?other=value")?;
        assert!(matches!(
            api.security().validate_magic_link(&url),
            Err(InvalidLinkError::MissingPayload)
        ));

        Ok(())
    }

    #[sqlx::test]
    async fn validation_rejects_garbage_payload(pool: SqlitePool) -> anyhow::Result<()> {
        let api = mock_api(pool).await?;

        let url = Url::parse("https://platter.dev/validate-magic-link?magic=garbage")?;
        assert!(matches!(
            api.security().validate_magic_link(&url),
            Err(InvalidLinkError::MalformedPayload(
                DecodeError::InvalidEncoding(_)
            ))
        ));

        Ok(())
    }

    #[sqlx::test]
    async fn signin_requires_matching_nonce(pool: SqlitePool) -> anyhow::Result<()> {
        let api = mock_api(pool).await?;
        let security_api = api.security();

        let user = api
            .users()
            .signup("dev@platter.dev", "Dev", "Platter")
            .await?;

        let link = security_api.issue_magic_link("dev@platter.dev", "n1")?;
        let payload = security_api.validate_magic_link(&link)?;

        // The nonce stored at issuance time signs the user in.
        assert_eq!(
            security_api.signin_with_link(&payload, Some("n1")).await?,
            Some(user)
        );

        // A different nonce, or no nonce at all, is rejected.
        for pending_nonce in [Some("n2"), None] {
            let signin_error = security_api
                .signin_with_link(&payload, pending_nonce)
                .await
                .unwrap_err();
            assert!(matches!(
                signin_error.downcast_ref::<InvalidLinkError>(),
                Some(InvalidLinkError::NonceMismatch)
            ));
        }

        Ok(())
    }

    #[sqlx::test]
    async fn signin_resolves_unknown_emails_to_none(pool: SqlitePool) -> anyhow::Result<()> {
        let api = mock_api(pool).await?;
        let security_api = api.security();

        let link = security_api.issue_magic_link("unknown@platter.dev", "n1")?;
        let payload = security_api.validate_magic_link(&link)?;

        assert_eq!(
            security_api.signin_with_link(&payload, Some("n1")).await?,
            None
        );

        Ok(())
    }

    #[sqlx::test]
    async fn signin_rejects_expired_links(pool: SqlitePool) -> anyhow::Result<()> {
        let api = mock_api(pool).await?;
        let security_api = api.security();

        let payload = MagicLinkPayload {
            email: "dev@platter.dev".to_string(),
            nonce: "n1".to_string(),
            // January 1, 2010 11:00:00
            issued_at: OffsetDateTime::from_unix_timestamp(1262340000)?,
        };

        let signin_error = security_api
            .signin_with_link(&payload, Some("n1"))
            .await
            .unwrap_err();
        assert!(matches!(
            signin_error.downcast_ref::<InvalidLinkError>(),
            Some(InvalidLinkError::Expired)
        ));

        Ok(())
    }

    #[sqlx::test]
    async fn zero_validity_disables_the_expiry_check(pool: SqlitePool) -> anyhow::Result<()> {
        let mut config = mock_config()?;
        config.magic_link_validity = std::time::Duration::ZERO;

        let api = mock_api_with_config(pool, config).await?;
        let payload = MagicLinkPayload {
            email: "dev@platter.dev".to_string(),
            nonce: "n1".to_string(),
            // January 1, 2010 11:00:00
            issued_at: OffsetDateTime::from_unix_timestamp(1262340000)?,
        };

        assert_eq!(
            api.security().signin_with_link(&payload, Some("n1")).await?,
            None
        );

        Ok(())
    }

    #[sqlx::test]
    async fn can_send_magic_link_email(pool: SqlitePool) -> anyhow::Result<()> {
        let api = mock_api(pool).await?;
        let security_api = api.security();

        let link = security_api.issue_magic_link("dev@platter.dev", "n1")?;
        security_api
            .send_magic_link_email("dev@platter.dev", &link)
            .await?;

        let messages = api.network.email_transport.messages().await;
        assert_eq!(messages.len(), 1);

        // Undo the quoted-printable soft line breaks before looking for the link.
        let (_, content) = &messages[0];
        let content = content
            .replace("=\r\n", "")
            .replace("=\n", "")
            .replace("=3D", "=");
        assert!(content.contains("Subject: Log in to Platter"));
        assert!(content.contains(link.as_str()));

        Ok(())
    }
}
