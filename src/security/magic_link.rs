use serde_derive::{Deserialize, Serialize};
use time::OffsetDateTime;

/// The data embedded into a magic link: who is logging in, the nonce binding the link to a single
/// login attempt, and when the link was issued. Created by the issuer, consumed by the validator.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MagicLinkPayload {
    pub email: String,
    pub nonce: String,
    #[serde(with = "time::serde::timestamp")]
    pub issued_at: OffsetDateTime,
}

#[cfg(test)]
mod tests {
    use super::MagicLinkPayload;
    use insta::assert_json_snapshot;
    use time::OffsetDateTime;

    #[test]
    fn serialization() -> anyhow::Result<()> {
        let payload = MagicLinkPayload {
            email: "dev@platter.dev".to_string(),
            nonce: "00000000-0000-0000-0000-000000000001".to_string(),
            // January 1, 2010 11:00:00
            issued_at: OffsetDateTime::from_unix_timestamp(1262340000)?,
        };

        assert_json_snapshot!(payload, @r###"
        {
          "email": "dev@platter.dev",
          "nonce": "00000000-0000-0000-0000-000000000001",
          "issued_at": 1262340000
        }
        "###);

        Ok(())
    }

    #[test]
    fn deserialization() -> anyhow::Result<()> {
        let payload = serde_json::from_str::<MagicLinkPayload>(
            r#"{"email":"dev@platter.dev","nonce":"n1","issued_at":1262340000}"#,
        )?;

        assert_eq!(
            payload,
            MagicLinkPayload {
                email: "dev@platter.dev".to_string(),
                nonce: "n1".to_string(),
                issued_at: OffsetDateTime::from_unix_timestamp(1262340000)?,
            }
        );

        Ok(())
    }

    #[test]
    fn deserialization_requires_all_fields() {
        for incomplete in [
            r#"{"nonce":"n1","issued_at":1262340000}"#,
            r#"{"email":"dev@platter.dev","issued_at":1262340000}"#,
            r#"{"email":"dev@platter.dev","nonce":"n1"}"#,
            r#"{"email":"dev@platter.dev","nonce":"n1","issued_at":"not-a-timestamp"}"#,
        ] {
            assert!(serde_json::from_str::<MagicLinkPayload>(incomplete).is_err());
        }
    }
}
