use crate::{database::Database, error::Error, server::UserSession, users::User};
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use anyhow::anyhow;
use std::{future::Future, pin::Pin};

impl FromRequest for User {
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move {
            let session = UserSession::extract(&req)
                .await
                .map_err(|err| Error::from(anyhow!("Failed to extract session: {err}")))?;
            let Some(user_id) = session.user_id() else {
                return Err(Error::unauthorized());
            };

            let db = web::Data::<Database>::extract(&req)
                .await
                .map_err(|err| Error::from(anyhow!("Failed to extract database: {err}")))?;
            match db.get_user(user_id).await {
                Ok(Some(user)) => Ok(user),
                Ok(None) => Err(Error::unauthorized()),
                Err(err) => {
                    tracing::error!("Failed to extract user information due to: {err:?}");
                    Err(Error::from(err))
                }
            }
        })
    }
}
