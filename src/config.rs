mod database_config;
mod raw_config;
mod security_config;
mod smtp_config;

use std::time::Duration;
use url::Url;

pub use self::{
    database_config::DatabaseConfig, raw_config::RawConfig, security_config::SecurityConfig,
    smtp_config::SmtpConfig,
};

/// Length of the magic link encryption key, in bytes (AES-256).
const MAGIC_LINK_SECRET_LENGTH_BYTES: usize = 32;
/// Minimum length of the session cookie signing/encryption key, in bytes.
const SESSION_SECRET_MIN_LENGTH_BYTES: usize = 64;

/// Errors caused by missing or malformed required configuration. These are fatal: the server
/// refuses to start rather than failing per-request later.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("public URL is not configured")]
    MissingPublicUrl,
    #[error("magic link secret is not configured")]
    MissingMagicLinkSecret,
    #[error("magic link secret must be a hex-encoded 32-byte value")]
    InvalidMagicLinkSecret,
    #[error("session secret is not configured")]
    MissingSessionSecret,
    #[error("session secret must be a hex-encoded value of at least 64 bytes")]
    InvalidSessionSecret,
}

/// Main server config.
#[derive(Clone, Debug)]
pub struct Config {
    /// HTTP port to bind API server to.
    pub http_port: u16,
    /// External/public URL through which the service is being accessed. Magic links are issued
    /// under this origin.
    pub public_url: Url,
    /// Database configuration.
    pub db: DatabaseConfig,
    /// Configuration for the SMTP functionality.
    pub smtp: Option<SmtpConfig>,
    /// Name of the session cookie.
    pub session_cookie_name: String,
    /// Hex-encoded key used to sign and encrypt the session cookie.
    pub session_secret: String,
    /// Hex-encoded 32-byte key used to encrypt magic link payloads.
    pub magic_link_secret: String,
    /// How long an issued magic link stays valid. A zero duration disables the expiry check.
    pub magic_link_validity: Duration,
}

impl TryFrom<RawConfig> for Config {
    type Error = ConfigError;

    fn try_from(raw_config: RawConfig) -> Result<Self, Self::Error> {
        let public_url = raw_config.public_url.ok_or(ConfigError::MissingPublicUrl)?;

        let magic_link_secret = raw_config
            .security
            .magic_link_secret
            .ok_or(ConfigError::MissingMagicLinkSecret)?;
        match hex::decode(&magic_link_secret) {
            Ok(key) if key.len() == MAGIC_LINK_SECRET_LENGTH_BYTES => {}
            _ => return Err(ConfigError::InvalidMagicLinkSecret),
        }

        let session_secret = raw_config
            .security
            .session_secret
            .ok_or(ConfigError::MissingSessionSecret)?;
        match hex::decode(&session_secret) {
            Ok(key) if key.len() >= SESSION_SECRET_MIN_LENGTH_BYTES => {}
            _ => return Err(ConfigError::InvalidSessionSecret),
        }

        Ok(Self {
            http_port: raw_config.port,
            public_url,
            db: raw_config.db,
            smtp: raw_config.smtp,
            session_cookie_name: raw_config.security.session_cookie_name,
            session_secret,
            magic_link_secret,
            magic_link_validity: Duration::from_secs(
                raw_config.security.magic_link_validity_secs,
            ),
        })
    }
}

impl AsRef<Config> for Config {
    fn as_ref(&self) -> &Config {
        self
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{Config, ConfigError, RawConfig, SecurityConfig};
    use std::time::Duration;
    use url::Url;

    fn valid_raw_config() -> RawConfig {
        RawConfig {
            public_url: Some(Url::parse("https://platter.dev").unwrap()),
            security: SecurityConfig {
                magic_link_secret: Some("a".repeat(64)),
                session_secret: Some("b".repeat(128)),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn conversion_succeeds_for_valid_raw_config() -> anyhow::Result<()> {
        let config = Config::try_from(valid_raw_config())?;

        assert_eq!(config.http_port, 7575);
        assert_eq!(config.public_url.as_str(), "https://platter.dev/");
        assert_eq!(config.session_cookie_name, "id");
        assert_eq!(config.magic_link_validity, Duration::from_secs(900));

        Ok(())
    }

    #[test]
    fn conversion_requires_public_url() {
        let raw_config = RawConfig {
            public_url: None,
            ..valid_raw_config()
        };

        assert_eq!(
            Config::try_from(raw_config).unwrap_err(),
            ConfigError::MissingPublicUrl
        );
    }

    #[test]
    fn conversion_requires_magic_link_secret() {
        let mut raw_config = valid_raw_config();
        raw_config.security.magic_link_secret = None;
        assert_eq!(
            Config::try_from(raw_config).unwrap_err(),
            ConfigError::MissingMagicLinkSecret
        );

        let wrong_length_secret = "c".repeat(66);
        for invalid_secret in ["not-hex", "aabb", wrong_length_secret.as_str()] {
            let mut raw_config = valid_raw_config();
            raw_config.security.magic_link_secret = Some(invalid_secret.to_string());
            assert_eq!(
                Config::try_from(raw_config).unwrap_err(),
                ConfigError::InvalidMagicLinkSecret
            );
        }
    }

    #[test]
    fn conversion_requires_session_secret() {
        let mut raw_config = valid_raw_config();
        raw_config.security.session_secret = None;
        assert_eq!(
            Config::try_from(raw_config).unwrap_err(),
            ConfigError::MissingSessionSecret
        );

        let wrong_length_secret = "d".repeat(126);
        for invalid_secret in ["not-hex", wrong_length_secret.as_str()] {
            let mut raw_config = valid_raw_config();
            raw_config.security.session_secret = Some(invalid_secret.to_string());
            assert_eq!(
                Config::try_from(raw_config).unwrap_err(),
                ConfigError::InvalidSessionSecret
            );
        }
    }
}
