//! [`JwtSigner`]s that do not produce typed-data signatures.

use alloy::{
    primitives::keccak256,
    signers::{local::PrivateKeySigner, SignerSync},
};
use core::future::Future;
use typeddata_jwt::{Error, JwtSigner, SignerOutput, TypedPayload};

/// Returns a fixed string for any input.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptsAnything;

impl JwtSigner for AcceptsAnything {
    fn sign_data(&self, _data: &[u8]) -> impl Future<Output = Result<SignerOutput, Error>> + Send {
        async { Ok(SignerOutput::Hex("signature".to_string())) }
    }
}

/// Refuses malformed payloads like a typed-data signer, but signs the raw
/// bytes with plain ECDSA.
#[derive(Debug, Clone)]
pub struct RawEcdsaSigner(pub PrivateKeySigner);

impl JwtSigner for RawEcdsaSigner {
    fn sign_data(&self, data: &[u8]) -> impl Future<Output = Result<SignerOutput, Error>> + Send {
        let result = TypedPayload::parse(data)
            .map_err(Error::from)
            .and_then(|_| self.0.sign_hash_sync(&keccak256(data)).map_err(Error::from))
            .map(SignerOutput::Ecdsa);
        async move { result }
    }
}
