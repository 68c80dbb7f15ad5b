mod app_state;
mod extractors;
mod handlers;
mod http_errors;
mod user_session;

use crate::{
    api::Api,
    config::Config,
    database::Database,
    network::{EmailTransport, EmailTransportError, Network},
    security::{MagicLinkCodec, VALIDATE_MAGIC_LINK_PATH},
};
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::{App, HttpServer, cookie::Key, middleware, web};
use anyhow::Context;
use lettre::{
    AsyncSmtpTransport, Tokio1Executor, transport::smtp::authentication::Credentials,
};
use tracing::info;
use tracing_actix_web::TracingLogger;

pub use self::{app_state::AppState, user_session::UserSession};

#[actix_web::main]
pub async fn run(config: Config) -> Result<(), anyhow::Error> {
    let database = Database::open(&config.db).await?;

    let email_transport = match config.smtp {
        Some(ref smtp_config) => AsyncSmtpTransport::<Tokio1Executor>::relay(&smtp_config.address)?
            .credentials(Credentials::new(
                smtp_config.username.clone(),
                smtp_config.password.clone(),
            ))
            .build(),
        None => AsyncSmtpTransport::<Tokio1Executor>::unencrypted_localhost(),
    };

    let magic_link_codec = MagicLinkCodec::new(&config.magic_link_secret)?;
    let session_key = hex::decode(&config.session_secret)
        .with_context(|| "Session secret is not valid hex.")?;

    let api = Api::new(
        config.clone(),
        database.clone(),
        Network::new(email_transport),
        magic_link_codec,
    );

    let http_server_url = format!("0.0.0.0:{}", config.http_port);
    let state = web::Data::new(AppState::new(config, api));
    let database = web::Data::new(database);
    let http_server = HttpServer::new(move || {
        // The session middleware signs and encrypts the cookie that backs `UserSession`; a
        // cookie that fails the integrity check comes back as a fresh empty session.
        let session_middleware = SessionMiddleware::builder(
            CookieSessionStore::default(),
            Key::from(&session_key),
        )
        .cookie_name(state.config.session_cookie_name.clone())
        .cookie_secure(state.config.public_url.scheme() == "https")
        .build();

        App::new()
            .wrap(middleware::Compat::new(middleware::Compress::default()))
            .wrap(middleware::NormalizePath::trim())
            .wrap(TracingLogger::default())
            .wrap(session_middleware)
            .app_data(state.clone())
            .app_data(database.clone())
            .configure(configure_routes::<AsyncSmtpTransport<Tokio1Executor>>)
    });

    let http_server = http_server
        .bind(&http_server_url)
        .with_context(|| format!("Failed to bind to {}.", &http_server_url))?;

    info!("Platter API server is available at http://{http_server_url}");

    http_server
        .run()
        .await
        .with_context(|| "Failed to run Platter API server.")
}

fn configure_routes<ET: EmailTransport>(config: &mut web::ServiceConfig)
where
    ET::Error: EmailTransportError,
{
    config
        .service(
            web::scope("/api")
                .route("/login", web::post().to(handlers::security_login::<ET>))
                .route("/logout", web::post().to(handlers::security_logout))
                .route("/user", web::get().to(handlers::user_get)),
        )
        .route(
            VALIDATE_MAGIC_LINK_PATH,
            web::get().to(handlers::security_magic_link_validate::<ET>),
        )
        .route(
            VALIDATE_MAGIC_LINK_PATH,
            web::post().to(handlers::security_magic_link_signup::<ET>),
        );
}
