mod api_ext;
mod invalid_link_error;
mod magic_link;
mod magic_link_codec;
mod magic_link_email;

pub use self::{
    api_ext::VALIDATE_MAGIC_LINK_PATH,
    invalid_link_error::InvalidLinkError,
    magic_link::MagicLinkPayload,
    magic_link_codec::{DecodeError, MagicLinkCodec},
};
