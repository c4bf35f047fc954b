use crate::{jwt, DecodeError, Error, TypedDataDomain};
use alloy::dyn_abi::TypedData;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use typeddata_schema::infer_types;

/// Root type name of every typed-data JWT.
pub const PRIMARY_TYPE: &str = "JWT";

/// Stand-in signature segment appended when decoding unsigned
/// `header.payload` data.
pub const PLACEHOLDER_SIGNATURE: &str = "fakesignature";

/// The `{ header, payload }` object that is signed as EIP-712 typed data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypedPayload {
    /// The JOSE header.
    pub header: Map<String, Value>,
    /// The claims.
    pub payload: Map<String, Value>,
}

impl TypedPayload {
    /// Create a new payload object.
    pub const fn new(header: Map<String, Value>, payload: Map<String, Value>) -> Self {
        Self { header, payload }
    }

    /// Parse signer input: either a JSON `{ header, payload }` object, or
    /// unsigned `header.payload` compact data.
    pub fn parse(data: &[u8]) -> Result<Self, DecodeError> {
        let text = core::str::from_utf8(data)?;
        match serde_json::from_str::<Value>(text) {
            Ok(Value::Object(object)) => Self::from_object(object),
            _ => Self::from_token(&format!("{text}.{PLACEHOLDER_SIGNATURE}")),
        }
    }

    /// Decode a complete three-segment compact token.
    pub fn from_token(token: &str) -> Result<Self, DecodeError> {
        let decoded = jwt::decode(token)?;
        Ok(Self::new(decoded.header, decoded.payload))
    }

    fn from_object(mut object: Map<String, Value>) -> Result<Self, DecodeError> {
        let header = take_object(&mut object, "header")?;
        let payload = take_object(&mut object, "payload")?;
        Ok(Self::new(header, payload))
    }

    /// The domain embedded at `payload.domain`, if any. `null` counts as
    /// absent.
    pub fn embedded_domain(&self) -> Result<Option<TypedDataDomain>, Error> {
        match self.payload.get("domain") {
            None | Some(Value::Null) => Ok(None),
            Some(domain) => {
                serde_json::from_value(domain.clone()).map(Some).map_err(Error::InvalidDomain)
            }
        }
    }

    /// A new payload with `domain` written at `payload.domain`.
    pub fn with_domain(mut self, domain: &TypedDataDomain) -> Result<Self, Error> {
        self.payload.insert("domain".to_string(), serde_json::to_value(domain)?);
        Ok(self)
    }

    /// The message object: `{ "header": .., "payload": .. }`.
    pub fn to_value(&self) -> Value {
        let mut message = Map::with_capacity(2);
        message.insert("header".to_string(), Value::Object(self.header.clone()));
        message.insert("payload".to_string(), Value::Object(self.payload.clone()));
        Value::Object(message)
    }

    /// Build the typed data signed and verified for this payload under
    /// `domain`, with types inferred from the message itself.
    pub fn typed_data(&self, domain: &TypedDataDomain) -> Result<TypedData, Error> {
        let message = self.to_value();
        let inferred = infer_types(&message, PRIMARY_TYPE)?;
        let domain = serde_json::to_value(domain.to_eip712())?;

        let typed_data = json!({
            "types": inferred.types.to_json(),
            "primaryType": inferred.primary_type,
            "domain": domain,
            "message": message,
        });
        serde_json::from_value(typed_data).map_err(Into::into)
    }
}

fn take_object(
    object: &mut Map<String, Value>,
    key: &'static str,
) -> Result<Map<String, Value>, DecodeError> {
    match object.remove(key) {
        Some(Value::Object(section)) => Ok(section),
        _ => Err(DecodeError::NotAnObject(key)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::U256;

    const DATA: &str = "eyJhbGciOiJFdGhUeXBlZERhdGFTaWduYXR1cmUiLCJ0eXAiOiJKV1QifQ.eyJzdWIiOiIxMjM0NTY3ODkwIiwibmFtZSI6IkpvaG4gRG9lIiwiaWF0IjoxNTE2MjM5MDIyLCJkb21haW4iOnsiY2hhaW5JZCI6MTExNTUxMTF9fQ";

    #[test]
    fn parses_token_data() {
        let payload = TypedPayload::parse(DATA.as_bytes()).unwrap();
        assert_eq!(payload.header["alg"], "EthTypedDataSignature");
        assert_eq!(payload.payload["sub"], "1234567890");
        assert_eq!(payload.embedded_domain().unwrap().unwrap().chain_id, Some(11155111));
    }

    #[test]
    fn parses_json_object() {
        let input = json!({ "header": { "alg": "X" }, "payload": { "sub": "1" } }).to_string();
        let payload = TypedPayload::parse(input.as_bytes()).unwrap();
        assert_eq!(payload.to_value(), json!({ "header": { "alg": "X" }, "payload": { "sub": "1" } }));
        assert_eq!(payload.embedded_domain().unwrap(), None);
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(matches!(TypedPayload::parse(b"{"), Err(DecodeError::SegmentCount(2))));
        assert!(matches!(
            TypedPayload::parse(br#"{ "header": {} }"#),
            Err(DecodeError::NotAnObject("payload"))
        ));
        assert!(matches!(TypedPayload::parse(&[0xff, 0xfe]), Err(DecodeError::Utf8(_))));
    }

    #[test]
    fn builds_typed_data() {
        let payload = TypedPayload::parse(DATA.as_bytes()).unwrap();
        let domain = payload.embedded_domain().unwrap().unwrap();
        let typed_data = payload.typed_data(&domain).unwrap();

        assert_eq!(typed_data.primary_type, PRIMARY_TYPE);
        assert_eq!(typed_data.domain.chain_id, Some(U256::from(11155111u64)));
        assert_eq!(typed_data.message, payload.to_value());

        // identical payloads hash identically, a different domain does not
        let hash = typed_data.eip712_signing_hash().unwrap();
        let again = TypedPayload::parse(DATA.as_bytes()).unwrap().typed_data(&domain).unwrap();
        assert_eq!(again.eip712_signing_hash().unwrap(), hash);
        let other = payload.typed_data(&TypedDataDomain::with_chain_id(1)).unwrap();
        assert_ne!(other.eip712_signing_hash().unwrap(), hash);
    }

    #[test]
    fn rejects_unsupported_claims() {
        let input = json!({ "header": {}, "payload": { "score": 0.5, "domain": {} } }).to_string();
        let payload = TypedPayload::parse(input.as_bytes()).unwrap();
        let err = payload.typed_data(&TypedDataDomain::default()).unwrap_err();
        assert!(matches!(err, Error::UnsupportedValue(_)));
    }
}
