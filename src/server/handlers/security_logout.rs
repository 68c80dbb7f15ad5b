use crate::server::UserSession;
use actix_web::{HttpResponse, Responder};

pub async fn security_logout(session: UserSession) -> impl Responder {
    session.clear();
    HttpResponse::NoContent()
        .append_header(("Clear-Site-Data", r#""cache", "cookies""#))
        .finish()
}
