use crate::{Error, TypedPayload};
use alloy::{
    primitives::{Address, B256, U256},
    sol_types::Eip712Domain,
};
use serde::{Deserialize, Serialize};
use std::{borrow::Cow, num::ParseIntError};
use tracing::debug;

/// An EIP-712 domain, as it appears at `payload.domain` in a JWT.
///
/// Every field is optional. `chainId` may be given as a JSON number, a
/// decimal string, or a `0x`-prefixed hex string, and is always serialized
/// as a number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypedDataDomain {
    /// The user-readable name of the signing domain.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// The current major version of the signing domain.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// The EIP-155 chain id.
    #[serde(default, skip_serializing_if = "Option::is_none", with = "chain_id_serde")]
    pub chain_id: Option<u64>,
    /// The address of the contract that will verify the signature.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verifying_contract: Option<Address>,
    /// A disambiguating salt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salt: Option<B256>,
}

impl TypedDataDomain {
    /// A domain binding only the chain id.
    pub const fn with_chain_id(chain_id: u64) -> Self {
        Self {
            name: None,
            version: None,
            chain_id: Some(chain_id),
            verifying_contract: None,
            salt: None,
        }
    }

    /// The chain id as the canonical decimal string compared against the
    /// chain segment of `eip155:<chainId>:<address>` account ids.
    pub fn chain_id_string(&self) -> Option<String> {
        self.chain_id.map(|id| id.to_string())
    }

    /// Convert to the [`Eip712Domain`] used for hashing.
    pub fn to_eip712(&self) -> Eip712Domain {
        Eip712Domain {
            name: self.name.clone().map(Cow::Owned),
            version: self.version.clone().map(Cow::Owned),
            chain_id: self.chain_id.map(U256::from),
            verifying_contract: self.verifying_contract,
            salt: self.salt,
        }
    }
}

impl From<&TypedDataDomain> for Eip712Domain {
    fn from(domain: &TypedDataDomain) -> Self {
        domain.to_eip712()
    }
}

/// Parse a chain id from a decimal or `0x`-prefixed hex string.
pub fn parse_chain_id(s: &str) -> Result<u64, ParseIntError> {
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => s.parse(),
    }
}

mod chain_id_serde {
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ChainIdRepr {
        Number(u64),
        String(String),
    }

    pub(super) fn serialize<S: Serializer>(
        chain_id: &Option<u64>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match chain_id {
            Some(id) => serializer.serialize_u64(*id),
            None => serializer.serialize_none(),
        }
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<u64>, D::Error> {
        match Option::<ChainIdRepr>::deserialize(deserializer)? {
            None => Ok(None),
            Some(ChainIdRepr::Number(id)) => Ok(Some(id)),
            Some(ChainIdRepr::String(s)) => {
                super::parse_chain_id(&s).map(Some).map_err(D::Error::custom)
            }
        }
    }
}

/// Resolve the domain binding a signature at signing time.
///
/// The domain embedded at `payload.domain` wins. Otherwise `configured` is
/// used and written into a new payload value at `payload.domain`, so the
/// signed message exposes the domain it was signed under.
pub(crate) fn resolve_signing_domain(
    payload: TypedPayload,
    configured: Option<&TypedDataDomain>,
) -> Result<(TypedPayload, TypedDataDomain), Error> {
    if let Some(embedded) = payload.embedded_domain()? {
        debug!(source = "embedded", chain_id = ?embedded.chain_id, "resolved signing domain");
        return Ok((payload, embedded));
    }
    let domain = configured.ok_or(Error::DomainMissing)?;
    debug!(source = "configured", chain_id = ?domain.chain_id, "resolved signing domain");
    Ok((payload.with_domain(domain)?, domain.clone()))
}

/// Resolve the domain binding a signature at verification time.
///
/// An explicit override wins over the embedded domain. If the override is
/// used and nothing is embedded, it is back-filled exactly as at signing.
/// Without either, the empty domain is used.
pub(crate) fn resolve_verification_domain(
    payload: TypedPayload,
    domain_override: Option<&TypedDataDomain>,
) -> Result<(TypedPayload, TypedDataDomain), Error> {
    let embedded = payload.embedded_domain()?;
    match (domain_override, embedded) {
        (Some(domain), Some(_)) => Ok((payload, domain.clone())),
        (Some(domain), None) => Ok((payload.with_domain(domain)?, domain.clone())),
        (None, Some(embedded)) => Ok((payload, embedded)),
        (None, None) => Ok((payload, TypedDataDomain::default())),
    }
}
