use crate::{domain::resolve_signing_domain, jwt, Error, TypedDataDomain, TypedPayload};
use alloy::{
    dyn_abi::TypedData,
    primitives::{Address, Signature, B256},
    signers::{
        local::{LocalSignerError, PrivateKeySigner},
        Signer,
    },
};
use serde_json::{Map, Value};
use tracing::{debug, instrument};

/// The key material a [`TypedDataSigner`] signs with.
///
/// Raw and hex keys are loaded into a [`PrivateKeySigner`]. Any other
/// [`Signer`], e.g. a hardware wallet or a remote signer, can be supplied as
/// [`SignerKey::External`]; it only needs to sign typed data.
#[derive(Clone)]
pub enum SignerKey<S = PrivateKeySigner> {
    /// A raw 32-byte secp256k1 private key.
    Raw(B256),
    /// A hex-encoded private key, with or without `0x`.
    Hex(String),
    /// A signer that holds its own key.
    External(S),
}

/// A [`SignerKey`] without an external signer.
pub type LocalSignerKey = SignerKey<PrivateKeySigner>;

impl<S> core::fmt::Debug for SignerKey<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Raw(_) => f.write_str("SignerKey::Raw(..)"),
            Self::Hex(_) => f.write_str("SignerKey::Hex(..)"),
            Self::External(_) => f.write_str("SignerKey::External(..)"),
        }
    }
}

#[derive(Debug, Clone)]
enum Wallet<S> {
    Local(PrivateKeySigner),
    External(S),
}

/// Signs JWT data as EIP-712 typed data.
///
/// The signed message is `{ header, payload }` with its types inferred from
/// the data itself and `JWT` as the primary type. The domain is taken from
/// `payload.domain` if present, otherwise from the domain the signer was
/// created with.
#[derive(Debug, Clone)]
pub struct TypedDataSigner<S = PrivateKeySigner> {
    wallet: Wallet<S>,
    domain: Option<TypedDataDomain>,
}

impl<S> TypedDataSigner<S>
where
    S: Signer + Send + Sync,
{
    /// Create a signer from key material and an optional default domain.
    pub fn new(key: SignerKey<S>, domain: Option<TypedDataDomain>) -> Result<Self, Error> {
        let wallet = match key {
            SignerKey::Raw(bytes) => Wallet::Local(
                PrivateKeySigner::from_bytes(&bytes).map_err(LocalSignerError::from)?,
            ),
            SignerKey::Hex(hex) => Wallet::Local(hex.parse()?),
            SignerKey::External(signer) => Wallet::External(signer),
        };
        Ok(Self { wallet, domain })
    }

    /// The address signatures recover to.
    pub fn address(&self) -> Address {
        match &self.wallet {
            Wallet::Local(signer) => signer.address(),
            Wallet::External(signer) => signer.address(),
        }
    }

    /// The default domain, used when the payload embeds none.
    pub const fn domain(&self) -> Option<&TypedDataDomain> {
        self.domain.as_ref()
    }

    /// Sign JWT data, given either as a JSON `{ header, payload }` object or
    /// as unsigned `header.payload` compact data.
    ///
    /// Returns the 65-byte `r || s || v` signature as lowercase hex, without
    /// a `0x` prefix.
    #[instrument(skip_all, fields(signer = %self.address()))]
    pub async fn sign(&self, data: impl AsRef<[u8]>) -> Result<String, Error> {
        let payload = TypedPayload::parse(data.as_ref())?;
        let (payload, domain) = resolve_signing_domain(payload, self.domain.as_ref())?;
        let typed_data = payload.typed_data(&domain)?;

        let signature = self.sign_typed_data(&typed_data).await?;
        debug!("signed typed-data JWT");
        Ok(hex::encode(signature.as_bytes()))
    }

    /// Sign a header and claims set, returning the complete compact token.
    ///
    /// The resolved domain is written into the claims before encoding, so
    /// the token verifies without a domain override.
    #[instrument(skip_all, fields(signer = %self.address()))]
    pub async fn sign_jwt(
        &self,
        header: Map<String, Value>,
        payload: Map<String, Value>,
    ) -> Result<String, Error> {
        let (payload, _) =
            resolve_signing_domain(TypedPayload::new(header, payload), self.domain.as_ref())?;
        let data = jwt::encode_segments(&payload.header, &payload.payload)?;
        let signature = self.sign(&data).await?;
        Ok(format!("{data}.{signature}"))
    }

    async fn sign_typed_data(&self, typed_data: &TypedData) -> Result<Signature, Error> {
        let signature = match &self.wallet {
            Wallet::Local(signer) => signer.sign_dynamic_typed_data(typed_data).await?,
            Wallet::External(signer) => signer.sign_dynamic_typed_data(typed_data).await?,
        };
        Ok(signature)
    }
}

impl TypedDataSigner {
    /// Create a signer from a local key.
    pub fn from_key(key: LocalSignerKey, domain: Option<TypedDataDomain>) -> Result<Self, Error> {
        Self::new(key, domain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::b256;

    const KEY: &str = "0x0123456789012345678901234567890123456789012345678901234567890123";
    const DATA: &str = "eyJhbGciOiJFdGhUeXBlZERhdGFTaWduYXR1cmUiLCJ0eXAiOiJKV1QifQ.eyJzdWIiOiIxMjM0NTY3ODkwIiwibmFtZSI6IkpvaG4gRG9lIiwiaWF0IjoxNTE2MjM5MDIyLCJkb21haW4iOnsiY2hhaW5JZCI6MTExNTUxMTF9fQ";
    const DATA_NO_DOMAIN: &str = "eyJhbGciOiJFdGhUeXBlZERhdGFTaWduYXR1cmUiLCJ0eXAiOiJKV1QifQ.eyJzdWIiOiIxMjM0NTY3ODkwIiwibmFtZSI6IkpvaG4gRG9lIiwiaWF0IjoxNTE2MjM5MDIyfQ";

    #[test]
    fn key_forms_agree() {
        let raw = b256!("0x0123456789012345678901234567890123456789012345678901234567890123");
        let from_hex = TypedDataSigner::from_key(SignerKey::Hex(KEY.into()), None).unwrap();
        let from_bare_hex =
            TypedDataSigner::from_key(SignerKey::Hex(KEY.trim_start_matches("0x").into()), None)
                .unwrap();
        let from_raw = TypedDataSigner::from_key(SignerKey::Raw(raw), None).unwrap();
        let external = TypedDataSigner::new(
            SignerKey::External(PrivateKeySigner::from_bytes(&raw).unwrap()),
            None,
        )
        .unwrap();

        assert_eq!(from_hex.address(), from_raw.address());
        assert_eq!(from_bare_hex.address(), from_raw.address());
        assert_eq!(external.address(), from_raw.address());
    }

    #[test]
    fn invalid_keys() {
        assert!(matches!(
            TypedDataSigner::from_key(SignerKey::Hex("0xnothex".into()), None),
            Err(Error::InvalidKey(_))
        ));
        assert!(matches!(
            TypedDataSigner::from_key(SignerKey::Raw(B256::ZERO), None),
            Err(Error::InvalidKey(_))
        ));
    }

    #[test]
    fn key_debug_hides_material() {
        assert_eq!(format!("{:?}", LocalSignerKey::Hex(KEY.into())), "SignerKey::Hex(..)");
    }

    #[tokio::test]
    async fn signature_format() {
        let signer = TypedDataSigner::from_key(SignerKey::Hex(KEY.into()), None).unwrap();
        let signature = signer.sign(DATA).await.unwrap();

        assert_eq!(signature.len(), 130);
        assert!(!signature.starts_with("0x"));
        assert!(signature.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
        // deterministic RFC 6979 nonces
        assert_eq!(signer.sign(DATA.as_bytes()).await.unwrap(), signature);
    }

    #[tokio::test]
    async fn configured_domain_is_ignored_when_embedded() {
        let plain = TypedDataSigner::from_key(SignerKey::Hex(KEY.into()), None).unwrap();
        let configured = TypedDataSigner::from_key(
            SignerKey::Hex(KEY.into()),
            Some(TypedDataDomain::with_chain_id(1)),
        )
        .unwrap();
        assert_eq!(plain.sign(DATA).await.unwrap(), configured.sign(DATA).await.unwrap());
    }

    #[tokio::test]
    async fn missing_domain() {
        let signer = TypedDataSigner::from_key(SignerKey::Hex(KEY.into()), None).unwrap();
        assert!(matches!(signer.sign(DATA_NO_DOMAIN).await, Err(Error::DomainMissing)));
    }

    #[tokio::test]
    async fn malformed_data() {
        let signer = TypedDataSigner::from_key(
            SignerKey::Hex(KEY.into()),
            Some(TypedDataDomain::with_chain_id(1)),
        )
        .unwrap();
        assert!(matches!(signer.sign("not a token").await, Err(Error::Decode(_))));
    }
}
