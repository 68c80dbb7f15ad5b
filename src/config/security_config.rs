use serde_derive::{Deserialize, Serialize};

/// Configuration for the security functionality (sessions and magic links).
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SecurityConfig {
    /// Name of the session cookie used by the authentication component.
    pub session_cookie_name: String,
    /// Hex-encoded key (64+ bytes) used to sign and encrypt the session cookie. If not provided,
    /// the server refuses to start.
    pub session_secret: Option<String>,
    /// Hex-encoded 32-byte key used to encrypt magic link payloads. If not provided, the server
    /// refuses to start.
    pub magic_link_secret: Option<String>,
    /// How long an issued magic link stays valid, in seconds. Zero disables the expiry check.
    pub magic_link_validity_secs: u64,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            session_cookie_name: "id".to_string(),
            session_secret: None,
            magic_link_secret: None,
            magic_link_validity_secs: 900,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::SecurityConfig;
    use insta::assert_toml_snapshot;

    #[test]
    fn serialization_and_default() {
        assert_toml_snapshot!(SecurityConfig::default(), @r###"
        session_cookie_name = 'id'
        magic_link_validity_secs = 900
        "###);

        let config = SecurityConfig {
            session_secret: Some("3024bf8975b03b84e405f36a7bacd1c1".to_string()),
            magic_link_secret: Some("a1b2c3d4e5f6a7b8c9d0e1f2a3b4c5d6".to_string()),
            ..Default::default()
        };

        assert_toml_snapshot!(config, @r###"
        session_cookie_name = 'id'
        session_secret = '3024bf8975b03b84e405f36a7bacd1c1'
        magic_link_secret = 'a1b2c3d4e5f6a7b8c9d0e1f2a3b4c5d6'
        magic_link_validity_secs = 900
        "###);
    }

    #[test]
    fn deserialization() {
        let config: SecurityConfig = toml::from_str(
            r#"
        session_cookie_name = 'id'
    "#,
        )
        .unwrap();

        assert_eq!(
            config,
            SecurityConfig {
                session_cookie_name: "id".to_string(),
                session_secret: None,
                magic_link_secret: None,
                magic_link_validity_secs: 900,
            }
        );

        let config: SecurityConfig = toml::from_str(
            r#"
        session_cookie_name = 'id'
        session_secret = '3024bf8975b03b84e405f36a7bacd1c1'
        magic_link_secret = 'a1b2c3d4e5f6a7b8c9d0e1f2a3b4c5d6'
        magic_link_validity_secs = 60
    "#,
        )
        .unwrap();

        assert_eq!(
            config,
            SecurityConfig {
                session_secret: Some("3024bf8975b03b84e405f36a7bacd1c1".to_string()),
                magic_link_secret: Some("a1b2c3d4e5f6a7b8c9d0e1f2a3b4c5d6".to_string()),
                magic_link_validity_secs: 60,
                ..Default::default()
            }
        );
    }
}
