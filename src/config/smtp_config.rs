use serde_derive::{Deserialize, Serialize};

/// Configuration for the SMTP functionality.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct SmtpConfig {
    /// Username to use to authenticate to the SMTP server. Also used as the FROM address.
    pub username: String,
    /// Password to use to authenticate to the SMTP server.
    pub password: String,
    /// Address of the SMTP server.
    pub address: String,
    /// Optional catch-all email recipient that receives all outgoing emails instead of the
    /// original recipients (used for troubleshooting only).
    pub catch_all_recipient: Option<String>,
}

#[cfg(test)]
mod tests {
    use crate::config::SmtpConfig;
    use insta::assert_toml_snapshot;

    #[test]
    fn serialization() {
        let config = SmtpConfig {
            username: "hello@platter.dev".to_string(),
            password: "password".to_string(),
            address: "smtp.platter.dev".to_string(),
            catch_all_recipient: None,
        };
        assert_toml_snapshot!(config, @r###"
        username = 'hello@platter.dev'
        password = 'password'
        address = 'smtp.platter.dev'
        "###);
    }

    #[test]
    fn deserialization() {
        let config: SmtpConfig = toml::from_str(
            r#"
        username = 'hello@platter.dev'
        password = 'password'
        address = 'smtp.platter.dev'
        catch_all_recipient = 'dev@platter.dev'
    "#,
        )
        .unwrap();

        assert_eq!(
            config,
            SmtpConfig {
                username: "hello@platter.dev".to_string(),
                password: "password".to_string(),
                address: "smtp.platter.dev".to_string(),
                catch_all_recipient: Some("dev@platter.dev".to_string()),
            }
        );
    }
}
