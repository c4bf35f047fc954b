use alloy::{
    primitives::Address,
    signers::{k256::ecdsa::SigningKey, local::PrivateKeySigner},
};
use std::sync::LazyLock;
use typeddata_jwt::{SignerKey, TypedDataDomain, TypedDataSigner};

/// Test signers used in tests.
pub static TEST_SIGNERS: LazyLock<[PrivateKeySigner; 10]> = LazyLock::new(|| {
    [
        PrivateKeySigner::from(SigningKey::from_slice(&[1u8; 32]).unwrap()),
        PrivateKeySigner::from(SigningKey::from_slice(&[2u8; 32]).unwrap()),
        PrivateKeySigner::from(SigningKey::from_slice(&[3u8; 32]).unwrap()),
        PrivateKeySigner::from(SigningKey::from_slice(&[4u8; 32]).unwrap()),
        PrivateKeySigner::from(SigningKey::from_slice(&[5u8; 32]).unwrap()),
        PrivateKeySigner::from(SigningKey::from_slice(&[6u8; 32]).unwrap()),
        PrivateKeySigner::from(SigningKey::from_slice(&[7u8; 32]).unwrap()),
        PrivateKeySigner::from(SigningKey::from_slice(&[8u8; 32]).unwrap()),
        PrivateKeySigner::from(SigningKey::from_slice(&[9u8; 32]).unwrap()),
        PrivateKeySigner::from(SigningKey::from_slice(&[10u8; 32]).unwrap()),
    ]
});

/// Test users used in tests. Addresses corresponding to [`TEST_SIGNERS`].
pub static TEST_USERS: LazyLock<[Address; 10]> =
    LazyLock::new(|| TEST_SIGNERS.each_ref().map(|s| s.address()));

/// A fixed hex private key.
pub const TEST_KEY_HEX: &str = "0x0123456789012345678901234567890123456789012345678901234567890123";

/// Sepolia, the chain id used by the fixture tokens.
pub const TEST_CHAIN_ID: u64 = 11155111;

/// A signer for `TEST_SIGNERS[idx]`, with an optional default domain.
pub fn typed_data_signer(idx: usize, domain: Option<TypedDataDomain>) -> TypedDataSigner {
    TypedDataSigner::from_key(SignerKey::Raw(TEST_SIGNERS[idx].to_bytes()), domain).unwrap()
}
