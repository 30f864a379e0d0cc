//! Token codec - three-segment structure and its base64url segments

mod base64url;
mod token;

pub use base64url::{base64_url_decode, base64_url_decode_binary, base64_url_encode};
pub(crate) use base64url::base64_decode_standard;
pub use token::{decode_token, encode_parts};
pub(crate) use token::parse_token;
