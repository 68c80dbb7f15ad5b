mod api_ext;
mod email;

pub use self::email::Email;
#[cfg(test)]
pub use self::api_ext::DeliveryError;
