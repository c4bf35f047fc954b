//! Compact JWT serialization: `base64url(header).base64url(payload).signature`.

use crate::DecodeError;
use base64::{
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine,
};
use serde_json::{Map, Value};

/// base64url without padding on encode, padding tolerated on decode.
const BASE64_URL: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// A decoded compact token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedJwt {
    /// The JOSE header.
    pub header: Map<String, Value>,
    /// The claims.
    pub payload: Map<String, Value>,
    /// The raw signature segment, not validated.
    pub signature: String,
}

/// Decode a three-segment compact token.
pub fn decode(token: &str) -> Result<DecodedJwt, DecodeError> {
    let segments: Vec<&str> = token.split('.').collect();
    let [header, payload, signature] = segments.as_slice() else {
        return Err(DecodeError::SegmentCount(segments.len()));
    };

    Ok(DecodedJwt {
        header: decode_segment(header, "header")?,
        payload: decode_segment(payload, "payload")?,
        signature: signature.to_string(),
    })
}

fn decode_segment(segment: &str, name: &'static str) -> Result<Map<String, Value>, DecodeError> {
    let bytes = BASE64_URL
        .decode(segment)
        .map_err(|source| DecodeError::Base64 { segment: name, source })?;
    match serde_json::from_slice(&bytes) {
        Ok(Value::Object(object)) => Ok(object),
        Ok(_) => Err(DecodeError::NotAnObject(name)),
        Err(source) => Err(DecodeError::Json { segment: name, source }),
    }
}

/// base64url-encode a JSON object.
pub fn encode_segment(object: &Map<String, Value>) -> Result<String, serde_json::Error> {
    serde_json::to_vec(object).map(|json| BASE64_URL.encode(json))
}

/// Encode the signing input `base64url(header).base64url(payload)`.
pub fn encode_segments(
    header: &Map<String, Value>,
    payload: &Map<String, Value>,
) -> Result<String, serde_json::Error> {
    Ok(format!("{}.{}", encode_segment(header)?, encode_segment(payload)?))
}
