mod emails;

pub use self::emails::Email;
#[cfg(test)]
pub use self::emails::DeliveryError;

use crate::{
    config::Config,
    database::Database,
    network::{EmailTransport, Network},
    security::MagicLinkCodec,
};

/// Collection of the APIs shared by all request handlers.
#[derive(Clone)]
pub struct Api<ET: EmailTransport> {
    pub config: Config,
    pub db: Database,
    pub network: Network<ET>,
    pub magic_link_codec: MagicLinkCodec,
}

impl<ET: EmailTransport> Api<ET> {
    /// Instantiates APIs collection with the specified config, database, network, and magic link
    /// codec.
    pub fn new(
        config: Config,
        db: Database,
        network: Network<ET>,
        magic_link_codec: MagicLinkCodec,
    ) -> Self {
        Self {
            config,
            db,
            network,
            magic_link_codec,
        }
    }
}

impl<ET: EmailTransport> AsRef<Api<ET>> for Api<ET> {
    fn as_ref(&self) -> &Self {
        self
    }
}
