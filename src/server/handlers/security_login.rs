use crate::{
    error::Error as PlatterError,
    logging::UserLogContext,
    network::{EmailTransport, EmailTransportError},
    server::{AppState, UserSession, http_errors::generic_internal_server_error},
};
use actix_web::{HttpResponse, http::header, web};
use serde_derive::Deserialize;
use serde_json::json;
use uuid::Uuid;

#[derive(Deserialize)]
pub struct LoginParams {
    pub email: String,
}

pub async fn security_login<ET: EmailTransport>(
    state: web::Data<AppState<ET>>,
    session: UserSession,
    body_params: web::Form<LoginParams>,
) -> Result<HttpResponse, PlatterError>
where
    ET::Error: EmailTransportError,
{
    // The login form is only for logged-out sessions.
    if let Some(user_id) = session.user_id() {
        tracing::debug!(
            user = ?UserLogContext::new(user_id),
            "Ignoring login submission of an already authenticated user."
        );
        return Ok(HttpResponse::SeeOther()
            .insert_header((header::LOCATION, "/app"))
            .finish());
    }

    let body_params = body_params.into_inner();
    let email = body_params.email.trim();
    if email.is_empty() || !email.contains('@') {
        tracing::error!("Invalid email was used for login: {}", email);
        return Err(PlatterError::client("This email appears to be invalid."));
    }

    // The fresh nonce binds the link to this login attempt. Storing it replaces any previously
    // pending nonce, implicitly invalidating earlier unclicked links for this session.
    let nonce = Uuid::new_v4().to_string();
    session.set_pending_nonce(&nonce)?;

    let security_api = state.api.security();
    let link = security_api.issue_magic_link(email, &nonce)?;

    match security_api.send_magic_link_email(email, &link).await {
        Ok(_) => {
            tracing::info!("Successfully sent magic link email.");
            Ok(HttpResponse::Ok().json(json!({ "status": "ok" })))
        }
        Err(err) => {
            tracing::error!("Failed to send magic link email: {err:?}");
            Ok(generic_internal_server_error())
        }
    }
}
