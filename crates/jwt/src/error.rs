use alloy::signers::local::LocalSignerError;
use typeddata_schema::InferenceError;

/// An error that can occur when decoding a payload or compact token.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// Input bytes are not UTF-8.
    #[error("payload is not valid UTF-8: {0}")]
    Utf8(#[from] core::str::Utf8Error),
    /// A compact token must have exactly three segments.
    #[error("expected 3 token segments, found {0}")]
    SegmentCount(usize),
    /// A token segment is not base64url.
    #[error("token {segment} is not valid base64url: {source}")]
    Base64 {
        /// The segment that failed.
        segment: &'static str,
        /// The underlying error.
        source: base64::DecodeError,
    },
    /// A token segment is not JSON.
    #[error("token {segment} is not valid JSON: {source}")]
    Json {
        /// The segment that failed.
        segment: &'static str,
        /// The underlying error.
        source: serde_json::Error,
    },
    /// A section that must be a JSON object is missing or has another type.
    #[error("{0} is missing or not a JSON object")]
    NotAnObject(&'static str),
}

/// An error that can occur when signing or verifying typed-data JWTs.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input is neither a JSON payload object nor a decodable token.
    #[error(transparent)]
    Decode(#[from] DecodeError),
    /// A payload value has no Solidity type.
    #[error(transparent)]
    UnsupportedValue(#[from] InferenceError),
    /// Signing was requested without a resolvable domain.
    #[error(
        "EIP-712 domain is missing. Embed it at `payload.domain` or create the signer with a domain"
    )]
    DomainMissing,
    /// The embedded `payload.domain` is not a valid domain object.
    #[error("invalid EIP-712 domain: {0}")]
    InvalidDomain(#[source] serde_json::Error),
    /// No authenticator matched the recovered signer.
    #[error("invalid_signature: Signature invalid for JWT")]
    InvalidSignature,
    /// The signer handed to the algorithm does not follow the signer contract.
    #[error("foreign signer: {0}")]
    ForeignSigner(&'static str),
    /// The private key could not be loaded.
    #[error("invalid private key: {0}")]
    InvalidKey(#[from] LocalSignerError),
    /// Error assembling the typed data.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    /// Error hashing the typed data.
    #[error(transparent)]
    TypedData(#[from] alloy::dyn_abi::Error),
    /// Malformed signature, or recovery failed.
    #[error(transparent)]
    Signature(#[from] alloy::primitives::SignatureError),
    /// Error from the underlying signer.
    #[error(transparent)]
    Signer(#[from] alloy::signers::Error),
}
