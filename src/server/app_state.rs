use crate::{api::Api, config::Config, network::EmailTransport};

pub struct AppState<ET: EmailTransport> {
    pub config: Config,
    pub api: Api<ET>,
}

impl<ET: EmailTransport> AppState<ET> {
    pub fn new(config: Config, api: Api<ET>) -> Self {
        Self { config, api }
    }
}
