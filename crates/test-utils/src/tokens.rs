use serde_json::{json, Map, Value};

/// `header.payload` data whose claims embed `domain: { chainId: 11155111 }`.
pub const DATA_WITH_DOMAIN: &str = "eyJhbGciOiJFdGhUeXBlZERhdGFTaWduYXR1cmUiLCJ0eXAiOiJKV1QifQ.eyJzdWIiOiIxMjM0NTY3ODkwIiwibmFtZSI6IkpvaG4gRG9lIiwiaWF0IjoxNTE2MjM5MDIyLCJkb21haW4iOnsiY2hhaW5JZCI6MTExNTUxMTF9fQ";

/// `header.payload` data without a domain.
pub const DATA_WITHOUT_DOMAIN: &str = "eyJhbGciOiJFdGhUeXBlZERhdGFTaWduYXR1cmUiLCJ0eXAiOiJKV1QifQ.eyJzdWIiOiIxMjM0NTY3ODkwIiwibmFtZSI6IkpvaG4gRG9lIiwiaWF0IjoxNTE2MjM5MDIyfQ";

/// The `EthTypedDataSignature` header.
pub fn header() -> Map<String, Value> {
    object(json!({ "alg": "EthTypedDataSignature", "typ": "JWT" }))
}

/// The claims of [`DATA_WITHOUT_DOMAIN`].
pub fn claims() -> Map<String, Value> {
    object(json!({ "sub": "1234567890", "name": "John Doe", "iat": 1516239022 }))
}

/// Unwrap a JSON object literal.
pub fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(object) => object,
        other => panic!("expected a JSON object, got {other}"),
    }
}

/// Flip the first hex digit of a signature.
pub fn tamper(signature: &str) -> String {
    let (first, rest) = signature.split_at(1);
    let flipped = if first == "0" { "1" } else { "0" };
    format!("{flipped}{rest}")
}
