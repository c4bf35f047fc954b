use crate::{Error, TypedDataSigner};
use alloy::{primitives::Signature, signers::Signer};
use core::future::Future;
use tracing::{debug, instrument};

/// The JWT `alg` value of typed-data signatures.
pub const ALGORITHM_NAME: &str = "EthTypedDataSignature";

/// Probe sent to signers before the real payload. It is neither JSON nor
/// compact data, so a typed-data signer must refuse it.
const PROBE: &str = "{";

/// What a [`JwtSigner`] produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignerOutput {
    /// A hex-encoded typed-data signature.
    Hex(String),
    /// A raw ECDSA signature, as produced by plain ES256K signers.
    Ecdsa(Signature),
}

/// A signer a JWT library hands the signing input to.
pub trait JwtSigner {
    /// Sign the JWT signing input.
    fn sign_data(&self, data: &[u8]) -> impl Future<Output = Result<SignerOutput, Error>> + Send;
}

impl<S> JwtSigner for TypedDataSigner<S>
where
    S: Signer + Send + Sync,
{
    fn sign_data(&self, data: &[u8]) -> impl Future<Output = Result<SignerOutput, Error>> + Send {
        async move { self.sign(data).await.map(SignerOutput::Hex) }
    }
}

/// The `EthTypedDataSignature` JWT signing algorithm.
///
/// Only signers that sign typed data are accepted. Before signing, the signer
/// is probed with malformed input; anything but a decode or missing-domain
/// failure marks it as a foreign signer.
#[derive(Debug, Clone, Copy, Default)]
pub struct EthTypedDataAlgorithm;

impl EthTypedDataAlgorithm {
    /// The algorithm name.
    pub const fn name(&self) -> &'static str {
        ALGORITHM_NAME
    }

    /// Sign the `header.payload` signing input with `signer`.
    #[instrument(skip_all, fields(alg = ALGORITHM_NAME))]
    pub async fn sign<J: JwtSigner>(&self, payload: &str, signer: &J) -> Result<String, Error> {
        match signer.sign_data(PROBE.as_bytes()).await {
            Err(Error::Decode(_) | Error::DomainMissing) => {}
            Ok(_) => {
                debug!("signer accepted the probe");
                return Err(Error::ForeignSigner("signer accepted malformed input"));
            }
            Err(error) => {
                debug!(%error, "signer failed the probe");
                return Err(Error::ForeignSigner("signer does not sign typed data"));
            }
        }

        match signer.sign_data(payload.as_bytes()).await? {
            SignerOutput::Hex(signature) => Ok(signature),
            SignerOutput::Ecdsa(_) => Err(Error::ForeignSigner("signer returned a raw signature")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SignerKey, TypedDataDomain};

    const KEY: &str = "0x0123456789012345678901234567890123456789012345678901234567890123";
    const DATA: &str = "eyJhbGciOiJFdGhUeXBlZERhdGFTaWduYXR1cmUiLCJ0eXAiOiJKV1QifQ.eyJzdWIiOiIxMjM0NTY3ODkwIiwibmFtZSI6IkpvaG4gRG9lIiwiaWF0IjoxNTE2MjM5MDIyLCJkb21haW4iOnsiY2hhaW5JZCI6MTExNTUxMTF9fQ";

    struct Fixed(SignerOutput);

    impl JwtSigner for Fixed {
        fn sign_data(
            &self,
            _data: &[u8],
        ) -> impl Future<Output = Result<SignerOutput, Error>> + Send {
            let output = self.0.clone();
            async move { Ok(output) }
        }
    }

    #[tokio::test]
    async fn signs_with_typed_data_signer() {
        let signer = TypedDataSigner::from_key(SignerKey::Hex(KEY.into()), None).unwrap();
        let signature = EthTypedDataAlgorithm.sign(DATA, &signer).await.unwrap();
        assert_eq!(signature, signer.sign(DATA).await.unwrap());
        assert_eq!(EthTypedDataAlgorithm.name(), "EthTypedDataSignature");
    }

    #[tokio::test]
    async fn propagates_signing_errors() {
        let signer = TypedDataSigner::from_key(SignerKey::Hex(KEY.into()), None).unwrap();
        let data = "eyJhbGciOiJFdGhUeXBlZERhdGFTaWduYXR1cmUiLCJ0eXAiOiJKV1QifQ.eyJzdWIiOiIxMjM0NTY3ODkwIn0";
        assert!(matches!(
            EthTypedDataAlgorithm.sign(data, &signer).await,
            Err(Error::DomainMissing)
        ));

        let configured = TypedDataSigner::from_key(
            SignerKey::Hex(KEY.into()),
            Some(TypedDataDomain::with_chain_id(1)),
        )
        .unwrap();
        assert!(EthTypedDataAlgorithm.sign(data, &configured).await.is_ok());
    }

    #[tokio::test]
    async fn rejects_foreign_signers() {
        let accepts_anything = Fixed(SignerOutput::Hex("signature".into()));
        assert!(matches!(
            EthTypedDataAlgorithm.sign(DATA, &accepts_anything).await,
            Err(Error::ForeignSigner(_))
        ));
    }
}
