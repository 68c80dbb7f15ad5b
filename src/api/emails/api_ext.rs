use crate::{
    api::{Api, Email},
    network::{EmailTransport, EmailTransportError},
};
use lettre::{
    Message,
    message::{Mailbox, MultiPart, SinglePart, header::ContentType},
};

/// Represents possible errors that can happen while dispatching an email. Delivery is never
/// retried internally; the failure is surfaced to the caller.
#[derive(thiserror::Error, Debug)]
pub enum DeliveryError {
    #[error("SMTP is not configured")]
    TransportNotConfigured,
    #[error("cannot parse recipient address `{0}`")]
    InvalidRecipient(String),
    #[error("failed to send email")]
    Transport(#[source] anyhow::Error),
}

/// Describes the API to dispatch emails.
pub struct EmailsApiExt<'a, ET: EmailTransport> {
    api: &'a Api<ET>,
}

impl<'a, ET: EmailTransport> EmailsApiExt<'a, ET>
where
    ET::Error: EmailTransportError,
{
    /// Creates Emails API.
    pub fn new(api: &'a Api<ET>) -> Self {
        Self { api }
    }

    /// Sends the email to the specified recipient through the configured SMTP settings.
    pub async fn send(&self, recipient: &str, email: Email) -> Result<(), DeliveryError> {
        let Some(ref smtp_config) = self.api.config.smtp else {
            return Err(DeliveryError::TransportNotConfigured);
        };

        let recipient = if let Some(ref catch_all) = smtp_config.catch_all_recipient {
            catch_all.as_str()
        } else {
            recipient
        };
        let recipient = recipient
            .parse::<Mailbox>()
            .map_err(|_| DeliveryError::InvalidRecipient(recipient.to_string()))?;

        let sender = smtp_config
            .username
            .parse::<Mailbox>()
            .map_err(|err| DeliveryError::Transport(anyhow::Error::new(err)))?;

        let message_builder = Message::builder()
            .from(sender.clone())
            .reply_to(sender)
            .to(recipient)
            .subject(email.subject);

        let message = match email.html {
            Some(html) => message_builder.multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(email.text),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(html),
                    ),
            ),
            None => message_builder.body(email.text),
        }
        .map_err(|err| DeliveryError::Transport(anyhow::Error::new(err)))?;

        self.api
            .network
            .email_transport
            .send(message)
            .await
            .map_err(|err| DeliveryError::Transport(anyhow::Error::new(err)))?;

        Ok(())
    }
}

impl<ET: EmailTransport> Api<ET>
where
    ET::Error: EmailTransportError,
{
    /// Returns an API to dispatch emails.
    pub fn emails(&self) -> EmailsApiExt<'_, ET> {
        EmailsApiExt::new(self)
    }
}
