//! Token validity checks applied before a token may be stored.
//!
//! The store only asks "may this string be stored?"; it never verifies a
//! signature. [`JwtSyntax`] accepts anything shaped like a compact JWT.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};

/// Decides whether a token may be appended to the store.
pub trait TokenValidator {
    fn is_valid(&self, token: &str) -> bool;
}

impl<F> TokenValidator for F
where
    F: Fn(&str) -> bool,
{
    fn is_valid(&self, token: &str) -> bool {
        self(token)
    }
}

/// Syntactic JWT check: `header.payload.signature`, where header and payload
/// are unpadded base64url JSON objects and the signature is base64url
/// (empty for unsigned tokens).
#[derive(Debug, Clone, Copy, Default)]
pub struct JwtSyntax;

impl TokenValidator for JwtSyntax {
    fn is_valid(&self, token: &str) -> bool {
        let mut parts = token.split('.');
        let (Some(header), Some(payload), Some(signature), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return false;
        };

        is_json_object(header)
            && is_json_object(payload)
            && URL_SAFE_NO_PAD.decode(signature).is_ok()
    }
}

fn is_json_object(segment: &str) -> bool {
    URL_SAFE_NO_PAD
        .decode(segment)
        .ok()
        .and_then(|bytes| serde_json::from_slice::<serde_json::Value>(&bytes).ok())
        .is_some_and(|value| value.is_object())
}

/// Structural requirements on any stored entry: non-empty, single line.
pub(crate) fn is_storable(token: &str) -> bool {
    !token.is_empty() && !token.contains('\n')
}
