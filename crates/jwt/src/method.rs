use alloy::primitives::Address;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Verification method types usable with typed-data JWT signatures.
pub const VALID_VERIFICATION_METHOD_TYPES: [&str; 2] =
    ["EcdsaSecp256k1VerificationKey2019", "EcdsaSecp256k1RecoveryMethod2020"];

/// A DID verification method (authenticator) a signature is checked against.
///
/// Only `blockchainAccountId` and `ethereumAddress` take part in matching.
/// Any other properties are kept as-is in `extra`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationMethod {
    /// The method id, e.g. `did:example:123#controller`.
    pub id: String,
    /// The method type.
    #[serde(rename = "type")]
    pub method_type: String,
    /// The controlling DID.
    pub controller: String,
    /// A CAIP-10 account id, `eip155:<chainId>:<address>`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blockchain_account_id: Option<String>,
    /// A bare hex address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ethereum_address: Option<String>,
    /// Other properties.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl VerificationMethod {
    /// Create a method with no identifier.
    pub fn new(
        id: impl Into<String>,
        method_type: impl Into<String>,
        controller: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            method_type: method_type.into(),
            controller: controller.into(),
            blockchain_account_id: None,
            ethereum_address: None,
            extra: Map::new(),
        }
    }

    /// Set the account id.
    pub fn with_blockchain_account_id(mut self, account_id: impl Into<String>) -> Self {
        self.blockchain_account_id = Some(account_id.into());
        self
    }

    /// Set the bare address.
    pub fn with_ethereum_address(mut self, address: impl Into<String>) -> Self {
        self.ethereum_address = Some(address.into());
        self
    }

    /// True if the method carries an address to match against.
    pub const fn has_identifier(&self) -> bool {
        self.blockchain_account_id.is_some() || self.ethereum_address.is_some()
    }

    /// True if the method type is one of [`VALID_VERIFICATION_METHOD_TYPES`].
    pub fn is_supported_type(&self) -> bool {
        VALID_VERIFICATION_METHOD_TYPES.contains(&self.method_type.as_str())
    }

    /// Match a recovered signer against this method.
    ///
    /// An account id matches if its address equals `recovered` and, when the
    /// domain binds a chain id, its chain segment equals that id. A bare
    /// address is only accepted when the domain binds a chain id. The bare
    /// address is ignored if an account id is present.
    pub fn matches(&self, recovered: Address, chain_id: Option<&str>) -> bool {
        let recovered = format!("{recovered:#x}");

        if let Some(account_id) = &self.blockchain_account_id {
            let mut parts = account_id.split(':').skip(1);
            let (Some(chain), Some(address)) = (parts.next(), parts.next()) else {
                return false;
            };
            if !address.eq_ignore_ascii_case(&recovered) {
                return false;
            }
            return match chain_id {
                Some(id) => id == chain,
                None => true,
            };
        }

        match (&self.ethereum_address, chain_id) {
            (Some(address), Some(_)) => address.eq_ignore_ascii_case(&recovered),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;
    use serde_json::json;

    const SIGNER: Address = address!("0x14791697260E4c9A71f18484C9f997B308e59325");

    fn method() -> VerificationMethod {
        VerificationMethod::new(
            "did:ethr:sepolia:0x1#controller",
            VALID_VERIFICATION_METHOD_TYPES[1],
            "did:ethr:sepolia:0x1",
        )
    }

    #[test]
    fn account_id_match() {
        let m = method()
            .with_blockchain_account_id("eip155:11155111:0x14791697260e4c9a71f18484c9f997b308e59325");
        assert!(m.matches(SIGNER, Some("11155111")));
        assert!(m.matches(SIGNER, None));
        assert!(!m.matches(SIGNER, Some("1")));
        assert!(!m.matches(Address::ZERO, Some("11155111")));
    }

    #[test]
    fn bare_address_needs_chain_id() {
        let m = method().with_ethereum_address("0x14791697260E4C9A71F18484C9F997B308E59325");
        assert!(m.matches(SIGNER, Some("1")));
        assert!(!m.matches(SIGNER, None));
    }

    #[test]
    fn account_id_shadows_bare_address() {
        let m = method()
            .with_blockchain_account_id("eip155:1:0x0000000000000000000000000000000000000000")
            .with_ethereum_address(SIGNER.to_string());
        assert!(!m.matches(SIGNER, Some("1")));
    }

    #[test]
    fn malformed_account_id() {
        let m = method().with_blockchain_account_id("eip155");
        assert!(!m.matches(SIGNER, None));
        assert!(m.has_identifier());
        assert!(!method().has_identifier());
    }

    #[test]
    fn serde_keeps_extra_fields() {
        let value = json!({
            "id": "did:example:1#key",
            "type": "EcdsaSecp256k1RecoveryMethod2020",
            "controller": "did:example:1",
            "blockchainAccountId": "eip155:1:0x0000000000000000000000000000000000000000",
            "publicKeyHex": "02ab"
        });
        let m: VerificationMethod = serde_json::from_value(value.clone()).unwrap();
        assert!(m.is_supported_type());
        assert_eq!(m.extra["publicKeyHex"], "02ab");
        assert_eq!(serde_json::to_value(&m).unwrap(), value);
    }
}
