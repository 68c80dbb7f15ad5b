use crate::{
    error::Error as PlatterError,
    network::{EmailTransport, EmailTransportError},
    security::{InvalidLinkError, MagicLinkPayload},
    server::{AppState, UserSession},
    users::User,
};
use actix_web::{HttpRequest, HttpResponse, http::header, web};
use serde_derive::Deserialize;
use serde_json::json;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupParams {
    pub first_name: String,
    pub last_name: String,
}

/// Handles a magic link click. A link for an email that is not registered yet cannot complete the
/// login on its own; the response asks the client to collect the user profile and re-submit to
/// the same URL.
pub async fn security_magic_link_validate<ET: EmailTransport>(
    state: web::Data<AppState<ET>>,
    session: UserSession,
    request: HttpRequest,
) -> Result<HttpResponse, PlatterError>
where
    ET::Error: EmailTransportError,
{
    if session.user_id().is_some() {
        return Ok(redirect_into_app());
    }

    let (payload, user) = validate_link(&state, &session, &request).await?;
    match user {
        Some(user) => {
            session.set_user_id(user.id)?;
            tracing::info!(user = ?user.log_context(), "Successfully signed in user.");
            Ok(redirect_into_app())
        }
        None => Ok(HttpResponse::Ok().json(json!({
            "status": "signupRequired",
            "email": payload.email,
        }))),
    }
}

/// Completes the first login for an email that has no user record yet: the magic link is
/// re-validated from scratch, then the submitted profile is used to create the user.
pub async fn security_magic_link_signup<ET: EmailTransport>(
    state: web::Data<AppState<ET>>,
    session: UserSession,
    request: HttpRequest,
    body_params: web::Form<SignupParams>,
) -> Result<HttpResponse, PlatterError>
where
    ET::Error: EmailTransportError,
{
    if session.user_id().is_some() {
        return Ok(redirect_into_app());
    }

    let (payload, user) = validate_link(&state, &session, &request).await?;
    let user = match user {
        // The account was registered in the meantime, complete the login as usual.
        Some(user) => user,
        None => {
            let body_params = body_params.into_inner();
            let first_name = body_params.first_name.trim();
            let last_name = body_params.last_name.trim();
            if first_name.is_empty() || last_name.is_empty() {
                return Err(PlatterError::client(
                    "First name and last name cannot be empty.",
                ));
            }

            state
                .api
                .users()
                .signup(&payload.email, first_name, last_name)
                .await?
        }
    };

    session.set_user_id(user.id)?;
    tracing::info!(user = ?user.log_context(), "Successfully signed up and signed in user.");
    Ok(redirect_into_app())
}

/// Runs the link validator on the request URL and completes the nonce/expiry checks against the
/// session. Rejections surface as client errors with a human-readable message.
async fn validate_link<ET: EmailTransport>(
    state: &web::Data<AppState<ET>>,
    session: &UserSession,
    request: &HttpRequest,
) -> Result<(MagicLinkPayload, Option<User>), PlatterError>
where
    ET::Error: EmailTransportError,
{
    let url = state
        .config
        .public_url
        .join(&request.uri().to_string())
        .map_err(|err| {
            tracing::error!("Cannot reconstruct validation request URL: {err:?}");
            PlatterError::from(anyhow::Error::new(err))
        })?;

    let security_api = state.api.security();
    let payload = security_api.validate_magic_link(&url).inspect_err(|err| {
        tracing::error!("Rejected magic link: {err}");
    })?;

    let user = security_api
        .signin_with_link(&payload, session.pending_nonce().as_deref())
        .await
        .map_err(|err| match err.downcast::<InvalidLinkError>() {
            Ok(link_error) => {
                tracing::error!("Rejected magic link: {link_error}");
                PlatterError::from(link_error)
            }
            Err(err) => {
                tracing::error!("Failed to complete magic link login: {err:?}");
                PlatterError::from(err)
            }
        })?;

    Ok((payload, user))
}

fn redirect_into_app() -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/app"))
        .finish()
}
