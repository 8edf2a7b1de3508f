//! Signed-URL target resolver.
//!
//! Signed upload/download URLs embed a short-lived access token and the
//! target object identifier as reserved query parameters. The resolver
//! strips both before any bytes move, so the token is never sent to the
//! storage endpoint itself and stays available for the follow-up metadata
//! call.

use url::Url;

use zapdos_core::constants::{SIGNED_PARAM_OBJECT_ID, SIGNED_PARAM_TOKEN};
use zapdos_core::ZapdosError;

/// Token, object id, and transport-clean URL derived from one signed URL.
/// Lifetime: one upload attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSignedTarget {
    pub token: String,
    pub object_id: String,
    pub cleaned_url: String,
}

/// Extract the reserved parameters from a signed URL.
///
/// An unparseable input reports both values absent rather than panicking,
/// so the caller decides whether that fails the whole batch or one file.
pub fn resolve_signed_url(raw: &str) -> Result<ParsedSignedTarget, ZapdosError> {
    let parsed = match Url::parse(raw) {
        Ok(url) => url,
        Err(_) => {
            return Err(ZapdosError::MalformedSignedUrl {
                token_present: false,
                object_id_present: false,
            })
        }
    };

    let mut token = None;
    let mut object_id = None;
    let mut kept: Vec<(String, String)> = Vec::new();
    for (key, value) in parsed.query_pairs() {
        match key.as_ref() {
            SIGNED_PARAM_TOKEN => token = Some(value.into_owned()),
            SIGNED_PARAM_OBJECT_ID => object_id = Some(value.into_owned()),
            _ => kept.push((key.into_owned(), value.into_owned())),
        }
    }

    match (token, object_id) {
        (Some(token), Some(object_id)) => {
            let mut cleaned = parsed;
            cleaned.set_query(None);
            if !kept.is_empty() {
                let mut pairs = cleaned.query_pairs_mut();
                for (key, value) in &kept {
                    pairs.append_pair(key, value);
                }
            }
            Ok(ParsedSignedTarget {
                token,
                object_id,
                cleaned_url: cleaned.to_string(),
            })
        }
        (token, object_id) => Err(ZapdosError::MalformedSignedUrl {
            token_present: token.is_some(),
            object_id_present: object_id.is_some(),
        }),
    }
}
