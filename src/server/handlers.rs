mod security_login;
mod security_logout;
mod security_magic_link;
mod user_get;

pub use self::{
    security_login::security_login,
    security_logout::security_logout,
    security_magic_link::{security_magic_link_signup, security_magic_link_validate},
    user_get::user_get,
};
